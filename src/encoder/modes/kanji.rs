/// Kanji mode encoder (Mode 1000)
/// Shift JIS double-byte characters packed into 13 bits each
use crate::encoder::bit_buffer::BitWriter;

pub struct KanjiEncoder;

impl KanjiEncoder {
    /// 13-bit value of a Shift JIS pair, `None` outside the kanji ranges
    pub fn pair_value(hi: u8, lo: u8) -> Option<u32> {
        if !(0x40..=0xFC).contains(&lo) || lo == 0x7F {
            return None;
        }
        let code = u32::from(hi) << 8 | u32::from(lo);
        let offset = match code {
            0x8140..=0x9FFC => code - 0x8140,
            0xE040..=0xEBBF => code - 0xC140,
            _ => return None,
        };
        Some((offset >> 8) * 0xC0 + (offset & 0xFF))
    }

    /// Payload bits for `count` characters
    pub fn bit_length(count: usize) -> usize {
        count * 13
    }

    /// Write Shift JIS pairs; `sjis` must hold whole valid pairs
    pub fn encode(sjis: &[u8], out: &mut BitWriter) {
        debug_assert!(sjis.len() % 2 == 0);
        for pair in sjis.chunks_exact(2) {
            let value = Self::pair_value(pair[0], pair[1]).unwrap_or(0);
            out.append_bits(value, 13);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_values() {
        // Examples from the standard: 0x935F -> 0xD9F, 0xE4AA -> 0x1AAA
        assert_eq!(KanjiEncoder::pair_value(0x93, 0x5F), Some(0x0D9F));
        assert_eq!(KanjiEncoder::pair_value(0xE4, 0xAA), Some(0x1AAA));
        assert_eq!(KanjiEncoder::pair_value(0x81, 0x40), Some(0));
    }

    #[test]
    fn test_rejects_non_kanji() {
        assert_eq!(KanjiEncoder::pair_value(0x41, 0x42), None);
        assert_eq!(KanjiEncoder::pair_value(0x93, 0x7F), None);
        assert_eq!(KanjiEncoder::pair_value(0xA0, 0x40), None);
        assert_eq!(KanjiEncoder::pair_value(0xEB, 0xC0), None);
    }

    #[test]
    fn test_kanji_encode() {
        let mut bw = BitWriter::new();
        KanjiEncoder::encode(&[0x93, 0x5F, 0xE4, 0xAA], &mut bw);
        assert_eq!(bw.len(), 26);
        let mut expected = BitWriter::new();
        expected.append_bits(0x0D9F, 13);
        expected.append_bits(0x1AAA, 13);
        assert_eq!(bw, expected);
    }
}
