// ABOUTME: Benchmark suite for the SMS PDU codec
// ABOUTME: Measures septet packing, TPDU serialization and full relay decode

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use sms_pdu::codec::{Decodable, Encodable};
use sms_pdu::datatypes::alphabet::gsm7bit;
use sms_pdu::datatypes::{Address, TimeStamp};
use sms_pdu::tpdu::{Deliver, DeliverMessage, Submit, SubmitMessage};
use sms_pdu::{CodecConfig, Envelope, FixedReference, SmsCodec};
use std::time::Duration;

const TEXT: &str = "The quick brown fox jumps over the lazy dog while the GSM network carries it along";

fn create_sample_submit() -> SubmitMessage {
    SubmitMessage {
        reference: Some(1),
        ..SubmitMessage::new("71231234567", TEXT)
    }
}

fn create_sample_deliver() -> DeliverMessage {
    let stamp = [0x22, 0x21, 0x92, 0x81, 0x73, 0x91, 0x21];
    DeliverMessage {
        timestamp: TimeStamp::from_slice(&stamp).ok(),
        ..DeliverMessage::new(Address::alphanumeric("Bank"), TEXT)
    }
}

fn bench_alphabet(c: &mut Criterion) {
    let mut group = c.benchmark_group("gsm7bit");
    group.measurement_time(Duration::from_secs(10));

    group.bench_function("encode", |b| b.iter(|| gsm7bit::encode(black_box(TEXT))));

    let packed = gsm7bit::encode(TEXT).unwrap();
    let count = TEXT.chars().count();
    group.bench_function("decode", |b| {
        b.iter(|| gsm7bit::decode(black_box(&packed), Some(count)))
    });

    group.finish();
}

fn bench_serialization(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialization");
    group.measurement_time(Duration::from_secs(10));
    let config = CodecConfig::new(2000, 12);

    let submit = create_sample_submit();
    group.bench_function("submit", |b| {
        b.iter(|| {
            Submit::from_message(black_box(&submit), &FixedReference(1))
                .and_then(|pdu| pdu.to_bytes())
        })
    });

    let deliver = create_sample_deliver();
    group.bench_function("deliver", |b| {
        b.iter(|| {
            Deliver::from_message(black_box(&deliver), &config).and_then(|pdu| pdu.to_bytes())
        })
    });

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    group.measurement_time(Duration::from_secs(10));
    let codec = SmsCodec::new(CodecConfig::new(2000, 12), FixedReference(1));
    let envelope = Envelope::new("73219876543");

    let submit = codec.submit(&envelope, &create_sample_submit()).unwrap();
    group.bench_function("submit", |b| b.iter(|| sms_pdu::decode(black_box(&submit))));

    let deliver = codec.deliver(&envelope, &create_sample_deliver()).unwrap();
    group.bench_function("deliver", |b| b.iter(|| sms_pdu::decode(black_box(&deliver))));

    group.finish();
}

criterion_group!(benches, bench_alphabet, bench_serialization, bench_decode);
criterion_main!(benches);
