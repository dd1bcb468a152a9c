//! Symbol assembly: function patterns, codeword placement, masking

use crate::encoder::function_mask::{FunctionMask, draw_function_patterns};
use crate::encoder::masking::{MaskEvaluation, evaluate_masks, masked_trial};
use crate::encoder::placement::place_codewords;
use crate::encoder::tables::raw_codewords;
use crate::encoder::version::VersionInfo;
use crate::models::{BitMatrix, ECLevel, MaskPattern, ModuleGrid, Version};

/// Symbol with function patterns and version information drawn, waiting
/// for codewords
#[derive(Debug, Clone)]
pub struct MatrixBuilder {
    func: FunctionMask,
    modules: BitMatrix,
}

impl MatrixBuilder {
    pub fn new(version: Version) -> Self {
        let mut modules = BitMatrix::square(version.size());
        draw_function_patterns(&mut modules, version);
        VersionInfo::write(&mut modules, version);
        Self {
            func: FunctionMask::new(version),
            modules,
        }
    }

    pub fn version(&self) -> Version {
        self.func.version()
    }

    /// Place the final interleaved codeword sequence
    pub fn place_codewords(mut self, codewords: &[u8]) -> PlacedMatrix {
        debug_assert_eq!(codewords.len(), raw_codewords(self.func.version()));
        let modules = place_codewords(&mut self.modules, &self.func, codewords);
        tracing::trace!(version = %self.func.version(), modules, "placed codewords");
        PlacedMatrix {
            func: self.func,
            modules: self.modules,
        }
    }
}

/// Unmasked symbol with every data module placed
#[derive(Debug, Clone)]
pub struct PlacedMatrix {
    func: FunctionMask,
    modules: BitMatrix,
}

impl PlacedMatrix {
    pub fn version(&self) -> Version {
        self.func.version()
    }

    /// Modules before masking; format areas are still blank
    pub fn unmasked(&self) -> &BitMatrix {
        &self.modules
    }

    pub fn evaluate_masks(&self, ec_level: ECLevel, parallel: bool) -> MaskEvaluation {
        evaluate_masks(&self.modules, &self.func, ec_level, parallel)
    }

    /// Apply `mask`, write format information and hand back the finished grid
    pub fn finish(&self, ec_level: ECLevel, mask: MaskPattern, quiet_zone: usize) -> ModuleGrid {
        let modules = masked_trial(&self.modules, &self.func, ec_level, mask);
        ModuleGrid::new(modules, self.version(), ec_level, mask, quiet_zone)
    }
}
