pub mod matrix;
pub mod module_grid;
pub mod qr_code;

pub use matrix::BitMatrix;
pub use module_grid::ModuleGrid;
pub use qr_code::{ECLevel, MaskPattern, Version};
