use crate::encoder::segment::Mode;
use crate::models::ECLevel;
use thiserror::Error;

/// Failure of a single encode request. No partial symbol is ever returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("character at position {position} cannot be encoded{}", mode_hint(.mode))]
    UnsupportedCharacter {
        /// Offset into the input (characters for text input, bytes otherwise)
        position: usize,
        /// Mode that was forced when the character was rejected
        mode: Option<Mode>,
    },

    #[error(
        "data too large for EC level {ec_level}: {} bits needed, {capacity_bits} bits available{}",
        bits_hint(.required_bits),
        fallback_hint(.fallback)
    )]
    DataTooLarge {
        /// Requested error correction level
        ec_level: ECLevel,
        /// Bits needed at the largest allowed version, `None` when a segment
        /// overflows its character count field
        required_bits: Option<usize>,
        /// Data capacity of the largest allowed version at `ec_level`
        capacity_bits: usize,
        /// Strongest weaker level that would fit, if any
        fallback: Option<ECLevel>,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
}

/// Rejected encoder configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("version {0} is outside 1-40")]
    VersionOutOfRange(u8),

    #[error("mask {0} is outside 0-7")]
    MaskOutOfRange(u8),

    #[error("minimum version {min} exceeds maximum version {max}")]
    VersionBounds { min: u8, max: u8 },

    #[error(
        "version {version} holds {capacity_bits} data bits but {} are needed",
        bits_hint(.required_bits)
    )]
    VersionTooSmall {
        version: u8,
        required_bits: Option<usize>,
        capacity_bits: usize,
    },

    #[error("ECI assignment number {0} exceeds 999999")]
    EciOutOfRange(u32),

    #[error("structured append position {index} of {total} is invalid (total must be 2-16)")]
    StructuredAppend { index: u8, total: u8 },

    #[error("{0} mode cannot carry data")]
    ForcedMode(Mode),
}

pub type Result<T> = std::result::Result<T, EncodingError>;

fn mode_hint(mode: &Option<Mode>) -> String {
    match mode {
        Some(mode) => format!(" in {mode} mode"),
        None => String::new(),
    }
}

fn bits_hint(bits: &Option<usize>) -> String {
    match bits {
        Some(bits) => bits.to_string(),
        None => "more".to_string(),
    }
}

fn fallback_hint(fallback: &Option<ECLevel>) -> String {
    match fallback {
        Some(level) => format!(" (fits at EC level {level})"),
        None => String::new(),
    }
}
