/// Numeric mode encoder (Mode 0001)
/// Groups of 3 digits = 10 bits, 2 digits = 7 bits, 1 digit = 4 bits
use crate::encoder::bit_buffer::BitWriter;

pub struct NumericEncoder;

impl NumericEncoder {
    pub fn is_numeric(b: u8) -> bool {
        b.is_ascii_digit()
    }

    /// Payload bits for `count` digits
    pub fn bit_length(count: usize) -> usize {
        10 * (count / 3) + [0, 4, 7][count % 3]
    }

    /// Write the digits; every byte must be an ASCII digit
    pub fn encode(digits: &[u8], out: &mut BitWriter) {
        for group in digits.chunks(3) {
            let value = group.iter().fold(0u32, |acc, &d| {
                debug_assert!(Self::is_numeric(d));
                acc * 10 + u32::from(d - b'0')
            });
            out.append_bits(value, group.len() as u8 * 3 + 1);
        }
    }
}
