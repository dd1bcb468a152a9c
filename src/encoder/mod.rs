//! QR code encoding modules
//!
//! The pipeline runs in this order:
//! - Segmentation of the input into numeric/alphanumeric/byte/kanji runs
//! - Version selection and data codeword assembly
//! - Reed-Solomon error correction and block interleaving
//! - Matrix construction, codeword placement and mask selection

/// BCH codes for format and version info
pub mod bch;
/// Append-only bit writer
pub mod bit_buffer;
/// Segment headers, payloads, terminator and padding
pub mod bitstream;
/// Version selection against data capacity
pub mod capacity;
pub mod config;
/// Block splitting and interleaving
pub mod error_correction;
/// Format information placement (EC level, mask pattern)
pub mod format;
/// Function module mask and function pattern drawing
pub mod function_mask;
/// Penalty scoring and mask selection
pub mod masking;
/// Symbol assembly from codewords
pub mod matrix_builder;
/// Data mode encoders (numeric, alphanumeric, byte, kanji)
pub mod modes;
/// Zig-zag codeword placement
pub mod placement;
/// Reed-Solomon EC codeword generation
pub mod reed_solomon;
/// Input segmentation
pub mod segment;
/// ISO/IEC 18004 tables (ECC codewords/blocks, alignment positions)
pub mod tables;
/// Version information placement (versions 7-40)
pub mod version;
