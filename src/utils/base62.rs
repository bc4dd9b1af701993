//! Base-62 text encoding of arbitrary byte strings.
//!
//! The bytes are read as one big-endian integer and rewritten in base 62 over
//! `0-9A-Za-z`. Each leading zero byte becomes one leading `'0'`, so inputs of
//! different lengths never share an encoding.

const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Encodes `bytes` as a base-62 string.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(encode(&[61]), "z");
/// assert_eq!(encode(&[0, 62]), "010");
/// ```
pub fn encode(bytes: &[u8]) -> String {
    let zeros = bytes.iter().take_while(|&&b| b == 0).count();

    // little-endian base-62 digits
    let mut digits: Vec<u8> = Vec::with_capacity(bytes.len() * 138 / 100 + 1);
    for &byte in &bytes[zeros..] {
        let mut carry = byte as u32;
        for digit in digits.iter_mut() {
            carry += (*digit as u32) << 8;
            *digit = (carry % 62) as u8;
            carry /= 62;
        }
        while carry > 0 {
            digits.push((carry % 62) as u8);
            carry /= 62;
        }
    }

    let mut out = String::with_capacity(zeros + digits.len());
    out.extend(std::iter::repeat_n('0', zeros));
    out.extend(digits.iter().rev().map(|&d| ALPHABET[d as usize] as char));
    out
}
