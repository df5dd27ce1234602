// ABOUTME: Example application decoding a hex encoded relay layer PDU
// ABOUTME: Prints the relay fields and the transfer layer message carried inside

use argh::FromArgs;
use sms_pdu::tpdu::TpMessage;
use std::error::Error;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Decode an RP-DATA, RP-ACK, RP-ERROR or RP-SMMA given as hex
#[derive(FromArgs)]
struct CliArgs {
    /// whether or not to enable debugging
    #[argh(switch, short = 'd')]
    debugging: bool,

    /// the PDU as a hex string, e.g. 0601
    #[argh(positional)]
    pdu: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli_args: CliArgs = argh::from_env();

    let level = if cli_args.debugging {
        Level::TRACE
    } else {
        Level::WARN
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let data = hex::decode(cli_args.pdu.trim())?;
    let Some(message) = sms_pdu::decode(&data)? else {
        eprintln!("Unrecognized PDU");
        std::process::exit(1);
    };

    println!("{} ({}), reference {}", message.kind, message.direction, message.reference);
    if let Some(source) = &message.source {
        println!("  source:      {source}");
    }
    if let Some(destination) = &message.destination {
        println!("  destination: {destination}");
    }
    if let Some(cause) = message.cause {
        println!("  cause:       {}", cause.description());
    }

    match &message.tpdu {
        Some(TpMessage::Submit(submit)) => {
            println!("SMS-SUBMIT to {} (ref {:?})", submit.destination, submit.reference);
            println!("  {}", submit.content);
        }
        Some(TpMessage::Deliver(deliver)) => {
            println!("SMS-DELIVER from {}", deliver.origin);
            if let Some(timestamp) = deliver.timestamp {
                println!("  sent:        {timestamp}");
            }
            println!("  {}", deliver.content);
        }
        Some(TpMessage::StatusReport(report)) => {
            println!("SMS-STATUS-REPORT for {} (ref {})", report.recipient, report.reference);
            println!("  status:      {}", report.status);
        }
        Some(other) => println!("{other:#?}"),
        None if message.content.is_some() => println!("TPDU not recognized"),
        None => {}
    }

    Ok(())
}
