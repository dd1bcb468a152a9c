//! Version selection
//!
//! Character count field widths change at versions 10 and 27, so a segment
//! list is re-measured at every candidate version rather than once.

use crate::encoder::segment::Segment;
use crate::encoder::tables::data_capacity_bits;
use crate::error::{ConfigError, EncodingError, Result};
use crate::models::{ECLevel, Version};

/// Bits needed by `segments` at `version`, `None` if any character count
/// overflows its field
pub fn total_bits(segments: &[Segment], version: Version) -> Option<usize> {
    segments
        .iter()
        .try_fold(0usize, |acc, seg| Some(acc + seg.encoded_bits(version)?))
}

/// Whether `segments` fit a symbol of `version` at `ec_level`
pub fn fits(segments: &[Segment], version: Version, ec_level: ECLevel) -> bool {
    total_bits(segments, version).is_some_and(|bits| bits <= data_capacity_bits(version, ec_level))
}

/// Smallest version in `min..=max` that holds `segments`
pub fn first_fit(
    segments: &[Segment],
    ec_level: ECLevel,
    min: Version,
    max: Version,
) -> Option<Version> {
    min.range_to(max).find(|&v| fits(segments, v, ec_level))
}

/// Smallest version in `min..=max` that holds `segments` at `ec_level`.
///
/// On failure the error carries the bits needed at `max`, the capacity of
/// `max`, and the strongest weaker EC level that would have fit.
pub fn select_version(
    segments: &[Segment],
    ec_level: ECLevel,
    min: Version,
    max: Version,
) -> Result<Version> {
    if min > max {
        return Err(ConfigError::VersionBounds {
            min: min.number(),
            max: max.number(),
        }
        .into());
    }
    if let Some(version) = first_fit(segments, ec_level, min, max) {
        tracing::debug!(%version, %ec_level, "selected version");
        return Ok(version);
    }

    let fallback = ECLevel::ALL
        .into_iter()
        .rev()
        .filter(|&level| level < ec_level)
        .find(|&level| first_fit(segments, level, min, max).is_some());
    let err = EncodingError::DataTooLarge {
        ec_level,
        required_bits: total_bits(segments, max),
        capacity_bits: data_capacity_bits(max, ec_level),
        fallback,
    };
    tracing::debug!(%err, "no version fits");
    Err(err)
}

/// Check that an explicitly requested version is large enough
pub fn check_version(
    segments: &[Segment],
    version: Version,
    ec_level: ECLevel,
) -> std::result::Result<(), ConfigError> {
    if fits(segments, version, ec_level) {
        Ok(())
    } else {
        Err(ConfigError::VersionTooSmall {
            version: version.number(),
            required_bits: total_bits(segments, version),
            capacity_bits: data_capacity_bits(version, ec_level),
        })
    }
}

/// Strongest level at or above `ec_level` that still fits `version`
pub fn boost_ec_level(segments: &[Segment], version: Version, ec_level: ECLevel) -> ECLevel {
    // Capacity shrinks as the level rises, so stop at the first miss
    std::iter::successors(Some(ec_level), |level| level.stronger())
        .take_while(|&level| fits(segments, version, level))
        .last()
        .unwrap_or(ec_level)
}
