//! rust_qr_gen - QR Code symbol encoder
//!
//! Turns text or bytes into a standards-compliant QR Code (Model 2,
//! versions 1-40) module grid. Rendering is left to the caller: the result
//! is a [`ModuleGrid`] of dark/light modules plus the quiet zone width.
//!
//! ```
//! use rust_qr_gen::{ECLevel, encode};
//!
//! let grid = encode(b"HELLO WORLD", ECLevel::Q, None, None).unwrap();
//! assert_eq!(grid.side_length(), 21);
//! assert!(grid.module_at(0, 0));
//! ```

/// QR code encoding modules (segmentation, error correction, matrix, masking)
pub mod encoder;
/// Error types
pub mod error;
/// Core data structures (BitMatrix, Version, ECLevel, ModuleGrid, etc.)
pub mod models;

pub use encoder::config::EncodeOptions;
pub use encoder::masking::MaskEvaluation;
pub use encoder::modes::byte::ByteEncoding;
pub use encoder::segment::{Mode, Segment, StructuredAppend};
pub use error::{ConfigError, EncodingError, Result};
pub use models::{BitMatrix, ECLevel, MaskPattern, ModuleGrid, Version};

use encoder::bitstream::encode_data_codewords;
use encoder::capacity::{boost_ec_level, check_version, select_version};
use encoder::config::ValidatedOptions;
use encoder::error_correction::add_error_correction;
use encoder::matrix_builder::{MatrixBuilder, PlacedMatrix};
use encoder::segment::Segmenter;

/// Encode raw bytes into a QR symbol
///
/// # Arguments
/// * `data` - Payload bytes; segmented into numeric/alphanumeric/byte runs
/// * `ec_level` - Error correction level
/// * `min_version` - Smallest version to consider (1-40), default 1
/// * `mask` - Force a mask pattern (0-7) instead of the lowest-penalty one
///
/// # Errors
/// [`EncodingError::DataTooLarge`] when no version up to 40 holds the data,
/// [`EncodingError::InvalidConfiguration`] for out-of-range version or mask.
pub fn encode(
    data: &[u8],
    ec_level: ECLevel,
    min_version: Option<u8>,
    mask: Option<u8>,
) -> Result<ModuleGrid> {
    let mut options = EncodeOptions::new().with_ec_level(ec_level);
    if let Some(version) = min_version {
        options = options.with_min_version(version);
    }
    if let Some(mask) = mask {
        options = options.with_mask(mask);
    }
    Encoder::with_options(options).encode(data)
}

/// Encode text with default options at the given EC level. Characters
/// outside ISO-8859-1 are rejected; use [`Encoder`] with
/// [`ByteEncoding::Utf8`] for arbitrary text.
pub fn encode_text(text: &str, ec_level: ECLevel) -> Result<ModuleGrid> {
    Encoder::with_options(EncodeOptions::new().with_ec_level(ec_level)).encode_text(text)
}

/// Configurable encoder; cheap to clone and safe to share across threads
#[derive(Debug, Clone, Default)]
pub struct Encoder {
    options: EncodeOptions,
}

impl Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: EncodeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &EncodeOptions {
        &self.options
    }

    pub fn encode(&self, data: &[u8]) -> Result<ModuleGrid> {
        Ok(self.plan(data)?.build())
    }

    pub fn encode_text(&self, text: &str) -> Result<ModuleGrid> {
        Ok(self.plan_text(text)?.build())
    }

    /// Run every step up to codeword placement without committing to a mask
    pub fn plan(&self, data: &[u8]) -> Result<EncodePlan> {
        let checked = self.options.validate()?;
        let segments = Segmenter::new(self.options.segment).segment_bytes(data)?;
        self.plan_checked(segments, checked)
    }

    pub fn plan_text(&self, text: &str) -> Result<EncodePlan> {
        let checked = self.options.validate()?;
        let segments = Segmenter::new(self.options.segment).segment_text(text)?;
        self.plan_checked(segments, checked)
    }

    /// Plan pre-built data segments. Headers configured on the encoder
    /// (structured append, ECI) are still prepended.
    pub fn plan_segments(&self, segments: Vec<Segment>) -> Result<EncodePlan> {
        let checked = self.options.validate()?;
        self.plan_checked(segments, checked)
    }

    fn plan_checked(&self, data: Vec<Segment>, checked: ValidatedOptions) -> Result<EncodePlan> {
        let mut segments = Vec::with_capacity(data.len() + 2);
        if let Some(header) = self.options.structured_append {
            segments.push(Segment::structured_append(header));
        }
        if let Some(assignment) = self.options.eci {
            segments.push(Segment::eci(assignment)?);
        }
        segments.extend(data);

        let mut ec_level = self.options.ec_level;
        let version = match checked.exact_version {
            Some(version) => {
                check_version(&segments, version, ec_level)?;
                version
            }
            None => select_version(&segments, ec_level, checked.min_version, checked.max_version)?,
        };
        if self.options.boost_ec_level {
            ec_level = boost_ec_level(&segments, version, ec_level);
        }

        let data_codewords = encode_data_codewords(&segments, version, ec_level)?;
        let codewords = add_error_correction(&data_codewords, version, ec_level);
        let placed = MatrixBuilder::new(version).place_codewords(&codewords);

        tracing::debug!(
            %version,
            %ec_level,
            segments = segments.len(),
            data_codewords = data_codewords.len(),
            codewords = codewords.len(),
            "planned symbol"
        );
        Ok(EncodePlan {
            segments,
            ec_level,
            data_codewords,
            codewords,
            placed,
            mask: checked.mask,
            quiet_zone: self.options.quiet_zone,
            parallel_masks: self.options.parallel_masks,
        })
    }
}

/// Intermediate artifacts of one encode request, up to the unmasked symbol
#[derive(Debug, Clone)]
pub struct EncodePlan {
    segments: Vec<Segment>,
    ec_level: ECLevel,
    data_codewords: Vec<u8>,
    codewords: Vec<u8>,
    placed: PlacedMatrix,
    mask: Option<MaskPattern>,
    quiet_zone: usize,
    parallel_masks: bool,
}

impl EncodePlan {
    /// Segments in bitstream order, headers first
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn version(&self) -> Version {
        self.placed.version()
    }

    /// EC level after any boosting
    pub fn ec_level(&self) -> ECLevel {
        self.ec_level
    }

    /// Padded data codewords before error correction
    pub fn data_codewords(&self) -> &[u8] {
        &self.data_codewords
    }

    /// Interleaved data and EC codewords as placed in the symbol
    pub fn codewords(&self) -> &[u8] {
        &self.codewords
    }

    /// Symbol before masking and format information
    pub fn unmasked(&self) -> &BitMatrix {
        self.placed.unmasked()
    }

    /// Penalty scores of all eight masks
    pub fn evaluate_masks(&self) -> MaskEvaluation {
        self.placed.evaluate_masks(self.ec_level, self.parallel_masks)
    }

    /// Finish with the forced mask, or the lowest-penalty one
    pub fn build(&self) -> ModuleGrid {
        let mask = match self.mask {
            Some(mask) => mask,
            None => self.evaluate_masks().best(),
        };
        self.build_with_mask(mask)
    }

    /// Finish with a specific mask
    pub fn build_with_mask(&self, mask: MaskPattern) -> ModuleGrid {
        let grid = self.placed.finish(self.ec_level, mask, self.quiet_zone);
        tracing::debug!(
            version = %grid.version(),
            ec_level = %grid.ec_level(),
            %mask,
            "encoded symbol"
        );
        grid
    }
}
