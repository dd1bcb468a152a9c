/// Format information placement
use crate::encoder::bch::BchEncoder;
use crate::models::{BitMatrix, ECLevel, MaskPattern};

/// Format info is 15 bits (2 EC level + 3 mask + 10 BCH), written twice:
/// around the top-left finder, and split between the top-right and
/// bottom-left finders.
pub struct FormatInfo {
    pub ec_level: ECLevel,
    pub mask_pattern: MaskPattern,
}

impl FormatInfo {
    pub fn new(ec_level: ECLevel, mask_pattern: MaskPattern) -> Self {
        Self {
            ec_level,
            mask_pattern,
        }
    }

    pub fn bits(&self) -> u16 {
        BchEncoder::format_bits(self.ec_level, self.mask_pattern)
    }

    /// Write both copies into `matrix`, addressed (x, y). Also sets the
    /// dark module, which shares the bottom-left strip.
    pub fn write(&self, matrix: &mut BitMatrix) {
        let size = matrix.width();
        let bits = self.bits();
        let bit = |i: usize| (bits >> i) & 1 == 1;

        // Top-left: column 8 going down (skipping timing row 6), then row 8
        // going left (skipping timing column 6)
        for i in 0..6 {
            matrix.set(8, i, bit(i));
        }
        matrix.set(8, 7, bit(6));
        matrix.set(8, 8, bit(7));
        matrix.set(7, 8, bit(8));
        for i in 9..15 {
            matrix.set(14 - i, 8, bit(i));
        }

        // Top-right row 8, then bottom-left column 8
        for i in 0..8 {
            matrix.set(size - 1 - i, 8, bit(i));
        }
        for i in 8..15 {
            matrix.set(8, size - 15 + i, bit(i));
        }
        matrix.set(8, size - 8, true);
    }

    /// Read the top-left copy back out of `matrix`
    pub fn read_top_left(matrix: &BitMatrix) -> u16 {
        let mut coords: Vec<(usize, usize)> = (0..6).map(|i| (8, i)).collect();
        coords.extend([(8, 7), (8, 8), (7, 8)]);
        coords.extend((9..15).map(|i| (14 - i, 8)));
        coords
            .iter()
            .enumerate()
            .fold(0, |acc, (i, &(x, y))| acc | u16::from(matrix.get(x, y)) << i)
    }
}
