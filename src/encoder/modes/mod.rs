//! Per-mode payload encoders
//!
//! Each encoder turns a segment payload into its mode-specific bits:
//! - Numeric: 3 digits per 10 bits
//! - Alphanumeric: 2 characters per 11 bits over a 45-symbol alphabet
//! - Byte: 8 bits per byte, verbatim
//! - Kanji: 13 bits per Shift JIS double-byte character

pub mod alphanumeric;
pub mod byte;
pub mod kanji;
pub mod numeric;
