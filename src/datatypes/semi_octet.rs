// ABOUTME: Semi-octet (swapped BCD) digit strings, GSM 03.40 9.1.2.3
// ABOUTME: Low digit in the low nibble, odd-length strings padded with the 0xF fill nibble

use crate::codec::CodecError;
use bytes::Bytes;

/// Nibble padding an odd digit count
pub const FILL: u8 = 0x0F;

const DIGITS: [char; 15] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', '*', '#', 'a', 'b', 'c',
];

/// Nibble value for a digit
pub fn nibble(ch: char) -> Option<u8> {
    DIGITS.iter().position(|&d| d == ch).map(|i| i as u8)
}

pub fn encode(digits: &str) -> Result<Bytes, CodecError> {
    let nibbles = digits
        .chars()
        .map(|ch| nibble(ch).ok_or(CodecError::InvalidCharacter(ch)))
        .collect::<Result<Vec<u8>, _>>()?;

    Ok(nibbles
        .chunks(2)
        .map(|pair| pair[0] | pair.get(1).copied().unwrap_or(FILL) << 4)
        .collect::<Vec<u8>>()
        .into())
}

/// Decode every nibble, dropping fill nibbles
pub fn decode(data: &[u8]) -> String {
    data.iter()
        .flat_map(|&octet| [octet & 0x0F, octet >> 4])
        .filter_map(|nibble| DIGITS.get(usize::from(nibble)))
        .collect()
}
