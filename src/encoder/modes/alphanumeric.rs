/// Alphanumeric mode encoder (Mode 0010)
/// Alphanumeric character set: 0-9, A-Z, space, $%*+-./:
use crate::encoder::bit_buffer::BitWriter;

const ALPHANUMERIC_TABLE: [u8; 45] = *b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

/// Pairs = 11 bits, single = 6 bits
pub struct AlphanumericEncoder;

impl AlphanumericEncoder {
    /// Position of `b` in the 45-symbol alphabet
    pub fn index_of(b: u8) -> Option<u32> {
        ALPHANUMERIC_TABLE
            .iter()
            .position(|&c| c == b)
            .map(|i| i as u32)
    }

    pub fn is_alphanumeric(b: u8) -> bool {
        Self::index_of(b).is_some()
    }

    pub fn bit_length(count: usize) -> usize {
        11 * (count / 2) + 6 * (count % 2)
    }

    /// Write the characters; every byte must belong to the alphabet
    pub fn encode(text: &[u8], out: &mut BitWriter) {
        for pair in text.chunks(2) {
            let value = pair
                .iter()
                .fold(0u32, |acc, &c| acc * 45 + Self::index_of(c).unwrap_or(0));
            out.append_bits(value, if pair.len() == 2 { 11 } else { 6 });
        }
    }
}
