use std::sync::OnceLock;

use crate::encoder::modes::byte::ByteEncoding;
use crate::encoder::segment::{Mode, SegmentOptions, StructuredAppend};
use crate::error::ConfigError;
use crate::models::{ECLevel, MaskPattern, Version};

fn parse_env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

fn parse_env_bool_u8(name: &str, default: bool) -> bool {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u8>().ok())
        .map(|v| v != 0)
        .unwrap_or(default)
}

static DEFAULT_QUIET_ZONE: OnceLock<usize> = OnceLock::new();

/// Quiet zone width used when options don't set one (`QR_QUIET_ZONE`, default 4)
pub(crate) fn default_quiet_zone() -> usize {
    *DEFAULT_QUIET_ZONE.get_or_init(|| parse_env_usize("QR_QUIET_ZONE", 4).min(64))
}

static PARALLEL_MASKS: OnceLock<bool> = OnceLock::new();

/// Whether mask trials run on the rayon pool (`QR_PARALLEL_MASKS`, default on)
pub(crate) fn parallel_masks() -> bool {
    *PARALLEL_MASKS.get_or_init(|| parse_env_bool_u8("QR_PARALLEL_MASKS", true))
}

/// Settings for one encode request.
///
/// Versions and masks are kept as raw numbers so out-of-range values can be
/// reported by [`EncodeOptions::validate`] instead of rejected at the call site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeOptions {
    pub ec_level: ECLevel,
    /// Smallest version to consider (1-40)
    pub min_version: u8,
    /// Largest version to consider (1-40)
    pub max_version: u8,
    /// Use exactly this version; overrides the min/max search
    pub version: Option<u8>,
    /// Use this mask (0-7) instead of the lowest-penalty one
    pub mask: Option<u8>,
    pub quiet_zone: usize,
    /// Raise the EC level as far as the chosen version allows
    pub boost_ec_level: bool,
    pub segment: SegmentOptions,
    /// ECI assignment number emitted ahead of the data
    pub eci: Option<u32>,
    pub structured_append: Option<StructuredAppend>,
    pub parallel_masks: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            ec_level: ECLevel::default(),
            min_version: Version::MIN.number(),
            max_version: Version::MAX.number(),
            version: None,
            mask: None,
            quiet_zone: default_quiet_zone(),
            boost_ec_level: false,
            segment: SegmentOptions::default(),
            eci: None,
            structured_append: None,
            parallel_masks: parallel_masks(),
        }
    }
}

impl EncodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ec_level(mut self, ec_level: ECLevel) -> Self {
        self.ec_level = ec_level;
        self
    }

    pub fn with_min_version(mut self, version: u8) -> Self {
        self.min_version = version;
        self
    }

    pub fn with_max_version(mut self, version: u8) -> Self {
        self.max_version = version;
        self
    }

    pub fn with_version(mut self, version: u8) -> Self {
        self.version = Some(version);
        self
    }

    pub fn with_mask(mut self, mask: u8) -> Self {
        self.mask = Some(mask);
        self
    }

    pub fn with_quiet_zone(mut self, modules: usize) -> Self {
        self.quiet_zone = modules;
        self
    }

    pub fn with_boost_ec_level(mut self, boost: bool) -> Self {
        self.boost_ec_level = boost;
        self
    }

    pub fn with_forced_mode(mut self, mode: Mode) -> Self {
        self.segment.forced_mode = Some(mode);
        self
    }

    pub fn with_byte_encoding(mut self, encoding: ByteEncoding) -> Self {
        self.segment.byte_encoding = encoding;
        self
    }

    pub fn with_kanji(mut self, enabled: bool) -> Self {
        self.segment.kanji = enabled;
        self
    }

    pub fn with_eci(mut self, assignment: u32) -> Self {
        self.eci = Some(assignment);
        self
    }

    pub fn with_structured_append(mut self, header: StructuredAppend) -> Self {
        self.structured_append = Some(header);
        self
    }

    pub fn with_parallel_masks(mut self, parallel: bool) -> Self {
        self.parallel_masks = parallel;
        self
    }

    /// Check ranges and consistency, resolving the version bounds
    pub fn validate(&self) -> Result<ValidatedOptions, ConfigError> {
        let version = |n: u8| Version::new(n).ok_or(ConfigError::VersionOutOfRange(n));
        let min = version(self.min_version)?;
        let max = version(self.max_version)?;
        if min > max {
            return Err(ConfigError::VersionBounds {
                min: self.min_version,
                max: self.max_version,
            });
        }
        let exact = self.version.map(version).transpose()?;
        let mask = self
            .mask
            .map(|m| MaskPattern::from_bits(m).ok_or(ConfigError::MaskOutOfRange(m)))
            .transpose()?;
        if let Some(eci) = self.eci.filter(|&eci| eci >= 1_000_000) {
            return Err(ConfigError::EciOutOfRange(eci));
        }
        if let Some(mode) = self.segment.forced_mode.filter(|m| !m.is_data()) {
            return Err(ConfigError::ForcedMode(mode));
        }
        Ok(ValidatedOptions {
            min_version: exact.unwrap_or(min),
            max_version: exact.unwrap_or(max),
            exact_version: exact,
            mask,
        })
    }
}

/// Range-checked view of the version and mask settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedOptions {
    pub min_version: Version,
    pub max_version: Version,
    pub exact_version: Option<Version>,
    pub mask: Option<MaskPattern>,
}
