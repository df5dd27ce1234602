// ABOUTME: Character set codecs for short message text (GSM 03.38)
// ABOUTME: GSM 7-bit septet packing, the USSD packing variant and UCS2 byte ordering

use crate::codec::CodecError;
use bytes::Bytes;

/// GSM 03.38 default alphabet, indexed by septet value
pub const GSM_ALPHABET: [char; 128] = [
    '@', '£', '$', '¥', 'è', 'é', 'ù', 'ì', 'ò', 'Ç', '\n', 'Ø', 'ø', '\r', 'Å', 'å', //
    'Δ', '_', 'Φ', 'Γ', 'Λ', 'Ω', 'Π', 'Ψ', 'Σ', 'Θ', 'Ξ', '\x1b', 'Æ', 'æ', 'ß', 'É', //
    ' ', '!', '"', '#', '¤', '%', '&', '\'', '(', ')', '*', '+', ',', '-', '.', '/', //
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', ':', ';', '<', '=', '>', '?', //
    '¡', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', //
    'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', 'Ä', 'Ö', 'Ñ', 'Ü', '§', //
    '¿', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', //
    'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', 'ä', 'ö', 'ñ', 'ü', 'à', //
];

/// Packing of the default alphabet into a continuous 7-bit stream
pub mod gsm7bit {
    use super::*;

    /// Septet value of a character, if the default alphabet has it
    pub fn septet(ch: char) -> Option<u8> {
        GSM_ALPHABET.iter().position(|&c| c == ch).map(|i| i as u8)
    }

    /// Number of octets needed to carry `septets` packed septets
    pub fn packed_len(septets: usize) -> usize {
        (septets * 7).div_ceil(8)
    }

    pub fn encode(text: &str) -> Result<Bytes, CodecError> {
        let septets = text
            .chars()
            .map(|ch| septet(ch).ok_or(CodecError::InvalidCharacter(ch)))
            .collect::<Result<Vec<u8>, _>>()?;

        Ok(Bytes::from(pack(&septets)))
    }

    /// Pack raw septet values, least significant bits first
    pub fn pack(septets: &[u8]) -> Vec<u8> {
        let mut out = vec![0u8; packed_len(septets.len())];

        for (i, &value) in septets.iter().enumerate() {
            let bit = i * 7;
            let index = bit / 8;
            let shifted = u16::from(value & 0x7F) << (bit % 8);

            out[index] |= shifted as u8;
            if index + 1 < out.len() {
                out[index + 1] |= (shifted >> 8) as u8;
            }
        }

        out
    }

    /// Decode up to `count` characters, or every whole septet when `count` is `None`
    ///
    /// Trailing fill bits decode as `@` (septet 0), so callers that know the
    /// character count should always pass it.
    pub fn decode(data: &[u8], count: Option<usize>) -> String {
        let available = data.len() * 8 / 7;
        let count = count.map_or(available, |count| count.min(available));

        (0..count)
            .map(|i| {
                let bit = i * 7;
                let index = bit / 8;
                let shift = bit % 8;

                let mut value = u16::from(data[index]) >> shift;
                if shift > 1 {
                    if let Some(&next) = data.get(index + 1) {
                        value |= u16::from(next) << (8 - shift);
                    }
                }

                GSM_ALPHABET[usize::from(value & 0x7F)]
            })
            .collect()
    }
}

/// USSD packing (GSM 03.38 6.1.2.3.1)
///
/// When the last octet would carry seven spare bits a carriage return fills
/// them, so the receiver cannot mistake the padding for an `@`.
pub mod ussd7bit {
    use super::*;

    pub fn encode(text: &str) -> Result<Bytes, CodecError> {
        if text.chars().count() * 7 % 8 == 1 {
            gsm7bit::encode(&format!("{text}\r"))
        } else {
            gsm7bit::encode(text)
        }
    }

    pub fn decode(data: &[u8]) -> String {
        let mut text = gsm7bit::decode(data, None);
        if text.ends_with('\r') {
            text.pop();
        }
        text
    }
}

/// UCS2 text, carried big-endian on the wire
pub mod ucs2 {
    use super::*;

    /// Swap the two octets of every 16-bit unit
    ///
    /// Moves a buffer between little-endian UTF-16 and wire order. A trailing
    /// odd octet is copied unchanged.
    pub fn toggle(data: &[u8]) -> Bytes {
        let mut out = data.to_vec();
        for pair in out.chunks_exact_mut(2) {
            pair.swap(0, 1);
        }
        Bytes::from(out)
    }

    pub fn encode(text: &str) -> Bytes {
        text.encode_utf16()
            .flat_map(|unit| unit.to_be_bytes())
            .collect::<Vec<u8>>()
            .into()
    }

    pub fn decode(data: &[u8]) -> Result<String, CodecError> {
        if data.len() % 2 != 0 {
            return Err(CodecError::FieldValidation {
                field: "ucs2",
                reason: format!("odd octet count {}", data.len()),
            });
        }

        let units: Vec<u16> = data
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();

        String::from_utf16(&units).map_err(|e| CodecError::FieldValidation {
            field: "ucs2",
            reason: e.to_string(),
        })
    }
}
