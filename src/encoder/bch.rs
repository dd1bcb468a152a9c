/// BCH codes protecting QR format and version information
use crate::models::{ECLevel, MaskPattern, Version};

/// x^10 + x^8 + x^5 + x^4 + x^2 + x + 1
const FORMAT_GENERATOR: u32 = 0x537;
/// Applied so the format word is never all zeros
const FORMAT_MASK: u16 = 0x5412;
/// x^12 + x^11 + x^10 + x^9 + x^8 + x^5 + x^2 + 1
const VERSION_GENERATOR: u32 = 0x1F25;

pub struct BchEncoder;

impl BchEncoder {
    /// 15-bit format word: 2 EC bits, 3 mask bits, 10 BCH bits, masked
    pub fn format_bits(ec_level: ECLevel, mask: MaskPattern) -> u16 {
        let data = u32::from(ec_level.format_bits()) << 3 | u32::from(mask.number());
        let word = data << 10 | Self::remainder(data, 10, FORMAT_GENERATOR);
        word as u16 ^ FORMAT_MASK
    }

    /// 18-bit version word: 6 version bits, 12 BCH bits
    pub fn version_bits(version: Version) -> u32 {
        let data = u32::from(version.number());
        data << 12 | Self::remainder(data, 12, VERSION_GENERATOR)
    }

    /// Remainder of data * x^degree divided by `generator`
    fn remainder(data: u32, degree: u32, generator: u32) -> u32 {
        let mut rem = data;
        for _ in 0..degree {
            rem = (rem << 1) ^ ((rem >> (degree - 1)) * generator);
        }
        rem & ((1 << degree) - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_words() {
        assert_eq!(BchEncoder::format_bits(ECLevel::M, MaskPattern::Pattern0), 0x5412);
        assert_eq!(BchEncoder::format_bits(ECLevel::L, MaskPattern::Pattern4), 0x662F);
        assert_eq!(BchEncoder::format_bits(ECLevel::H, MaskPattern::Pattern7), 0x083B);
        assert_eq!(BchEncoder::format_bits(ECLevel::Q, MaskPattern::Pattern3), 0x3A06);
    }

    #[test]
    fn test_format_words_are_distinct() {
        let mut seen = std::collections::HashSet::new();
        for level in ECLevel::ALL {
            for mask in MaskPattern::ALL {
                assert!(seen.insert(BchEncoder::format_bits(level, mask)));
            }
        }
    }

    #[test]
    fn test_version_words() {
        let v = |n| Version::new(n).unwrap();
        assert_eq!(BchEncoder::version_bits(v(7)), 0x07C94);
        assert_eq!(BchEncoder::version_bits(v(21)), 0x15683);
        assert_eq!(BchEncoder::version_bits(v(40)), 0x28C69);
    }
}
