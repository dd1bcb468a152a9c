use super::{BitMatrix, ECLevel, MaskPattern, Version};

/// Finished QR symbol handed to a renderer.
///
/// The grid is immutable: it is only produced by the encoder and exposes
/// read-only accessors. Coordinates are `(row, col)` with `(0, 0)` at the
/// top-left module; the quiet zone is not part of the grid itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleGrid {
    modules: BitMatrix,
    version: Version,
    ec_level: ECLevel,
    mask: MaskPattern,
    quiet_zone: usize,
}

impl ModuleGrid {
    pub(crate) fn new(
        modules: BitMatrix,
        version: Version,
        ec_level: ECLevel,
        mask: MaskPattern,
        quiet_zone: usize,
    ) -> Self {
        debug_assert_eq!(modules.width(), version.size());
        Self {
            modules,
            version,
            ec_level,
            mask,
            quiet_zone,
        }
    }

    /// Side length in modules (4 * version + 17)
    pub fn side_length(&self) -> usize {
        self.modules.width()
    }

    /// Dark (`true`) or light module at `(row, col)`; outside the symbol is light
    pub fn module_at(&self, row: usize, col: usize) -> bool {
        self.modules.get(col, row)
    }

    /// Light margin in modules the renderer should draw around the symbol
    pub fn quiet_zone(&self) -> usize {
        self.quiet_zone
    }

    /// Side length including the quiet zone on both sides
    pub fn outer_side_length(&self) -> usize {
        self.side_length() + 2 * self.quiet_zone
    }

    /// Module at `(row, col)` measured from the outer corner of the quiet zone
    pub fn module_with_margin(&self, row: usize, col: usize) -> bool {
        let qz = self.quiet_zone;
        if row < qz || col < qz {
            return false;
        }
        self.module_at(row - qz, col - qz)
    }

    /// Symbol version
    pub fn version(&self) -> Version {
        self.version
    }

    /// Error correction level written in the format information
    pub fn ec_level(&self) -> ECLevel {
        self.ec_level
    }

    /// Mask pattern applied to the data region
    pub fn mask(&self) -> MaskPattern {
        self.mask
    }

    /// Count of dark modules inside the symbol
    pub fn dark_count(&self) -> usize {
        self.modules.count_ones()
    }

    /// Row-major copy of the modules, one `Vec<bool>` per row
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        let size = self.side_length();
        (0..size)
            .map(|row| (0..size).map(|col| self.module_at(row, col)).collect())
            .collect()
    }

    /// Underlying bit matrix, addressed `(x, y)` = `(col, row)`
    pub fn as_matrix(&self) -> &BitMatrix {
        &self.modules
    }
}
