/// Version information placement for QR codes v7+
use crate::encoder::bch::BchEncoder;
use crate::models::{BitMatrix, Version};

/// Version info is 18 bits (6 data + 12 BCH), written as a 6x3 block left
/// of the top-right finder and its transpose above the bottom-left finder.
pub struct VersionInfo;

impl VersionInfo {
    /// Write both copies; versions below 7 carry no version info
    pub fn write(matrix: &mut BitMatrix, version: Version) {
        if !version.has_version_info() {
            return;
        }
        let size = version.size();
        let bits = BchEncoder::version_bits(version);
        for i in 0..18 {
            let dark = (bits >> i) & 1 == 1;
            let a = size - 11 + i % 3;
            let b = i / 3;
            matrix.set(a, b, dark);
            matrix.set(b, a, dark);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_versions_untouched() {
        let v6 = Version::new(6).unwrap();
        let mut matrix = BitMatrix::square(v6.size());
        VersionInfo::write(&mut matrix, v6);
        assert_eq!(matrix.count_ones(), 0);
    }

    #[test]
    fn test_version_7_blocks() {
        let v7 = Version::new(7).unwrap();
        let mut matrix = BitMatrix::square(45);
        VersionInfo::write(&mut matrix, v7);
        // 0x07C94 has 8 set bits, drawn twice
        assert_eq!(matrix.count_ones(), 16);
        // Bit 0 of 0x07C94 is 0, bit 2 is 1
        assert!(!matrix.get(34, 0));
        assert!(matrix.get(36, 0));
        assert!(matrix.get(0, 36));
        // Top-right block is the transpose of the bottom-left block
        for y in 0..6 {
            for x in 34..37 {
                assert_eq!(matrix.get(x, y), matrix.get(y, x));
            }
        }
    }
}
