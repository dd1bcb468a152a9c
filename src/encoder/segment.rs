//! Data segmentation
//!
//! Input is scanned left to right and grouped into runs. A run starts in the
//! narrowest mode its first character allows and absorbs every following
//! character that mode (or a mode it covers) can represent; the first
//! incompatible character opens a new run. Adjacent runs are then merged
//! into the wider mode whenever the merged segment is not longer.

use std::fmt;

use crate::encoder::bit_buffer::BitWriter;
use crate::encoder::modes::{
    alphanumeric::AlphanumericEncoder, byte::ByteEncoder, byte::ByteEncoding, kanji::KanjiEncoder,
    numeric::NumericEncoder,
};
use crate::error::{ConfigError, EncodingError, Result};
use crate::models::Version;

/// Segment mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Numeric,
    Alphanumeric,
    Byte,
    Kanji,
    /// Extended Channel Interpretation designator (header only)
    Eci,
    /// Structured append header (header only)
    StructuredAppend,
}

impl Mode {
    /// 4-bit mode indicator
    pub fn indicator(self) -> u32 {
        match self {
            Mode::Numeric => 0b0001,
            Mode::Alphanumeric => 0b0010,
            Mode::Byte => 0b0100,
            Mode::Kanji => 0b1000,
            Mode::Eci => 0b0111,
            Mode::StructuredAppend => 0b0011,
        }
    }

    /// Width of the character count field for a version
    pub fn char_count_bits(self, version: Version) -> u8 {
        let widths = match self {
            Mode::Numeric => [10, 12, 14],
            Mode::Alphanumeric => [9, 11, 13],
            Mode::Byte => [8, 16, 16],
            Mode::Kanji => [8, 10, 12],
            Mode::Eci | Mode::StructuredAppend => [0, 0, 0],
        };
        match version.number() {
            1..=9 => widths[0],
            10..=26 => widths[1],
            _ => widths[2],
        }
    }

    /// Whether the mode carries character data (as opposed to a header)
    pub fn is_data(self) -> bool {
        matches!(
            self,
            Mode::Numeric | Mode::Alphanumeric | Mode::Byte | Mode::Kanji
        )
    }

    /// Whether every payload of `other` can be re-encoded in `self`
    fn covers(self, other: Mode) -> bool {
        match (self, other) {
            (a, b) if a == b => true,
            (Mode::Alphanumeric, Mode::Numeric) => true,
            (Mode::Byte, Mode::Numeric | Mode::Alphanumeric | Mode::Kanji) => true,
            _ => false,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Numeric => "numeric",
            Mode::Alphanumeric => "alphanumeric",
            Mode::Byte => "byte",
            Mode::Kanji => "kanji",
            Mode::Eci => "ECI",
            Mode::StructuredAppend => "structured append",
        };
        f.write_str(name)
    }
}

/// Position of one symbol within a structured append sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructuredAppend {
    index: u8,
    total: u8,
    parity: u8,
}

impl StructuredAppend {
    /// `index` is zero-based; `total` is the number of symbols (2-16);
    /// `parity` is the XOR of every byte of the complete message
    pub fn new(index: u8, total: u8, parity: u8) -> std::result::Result<Self, ConfigError> {
        if !(2..=16).contains(&total) || index >= total {
            return Err(ConfigError::StructuredAppend { index, total });
        }
        Ok(Self {
            index,
            total,
            parity,
        })
    }

    /// Parity byte over the full, unsplit message
    pub fn parity_of(message: &[u8]) -> u8 {
        message.iter().fold(0, |acc, b| acc ^ b)
    }

    pub fn index(&self) -> u8 {
        self.index
    }

    pub fn total(&self) -> u8 {
        self.total
    }

    pub fn parity(&self) -> u8 {
        self.parity
    }
}

/// A run of input encoded in one mode. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    mode: Mode,
    data: Vec<u8>,
    num_chars: usize,
}

impl Segment {
    /// Digits only
    pub fn numeric(digits: &[u8]) -> Result<Self> {
        Self::check_all(digits, Mode::Numeric, NumericEncoder::is_numeric)?;
        Ok(Self::raw(Mode::Numeric, digits.to_vec(), digits.len()))
    }

    /// Characters of the 45-symbol alphanumeric set
    pub fn alphanumeric(text: &[u8]) -> Result<Self> {
        Self::check_all(text, Mode::Alphanumeric, AlphanumericEncoder::is_alphanumeric)?;
        Ok(Self::raw(Mode::Alphanumeric, text.to_vec(), text.len()))
    }

    /// Arbitrary bytes
    pub fn bytes(data: &[u8]) -> Self {
        Self::raw(Mode::Byte, data.to_vec(), data.len())
    }

    /// Shift JIS double-byte kanji characters
    pub fn kanji(sjis: &[u8]) -> Result<Self> {
        for (i, pair) in sjis.chunks(2).enumerate() {
            let valid = pair.len() == 2 && KanjiEncoder::pair_value(pair[0], pair[1]).is_some();
            if !valid {
                return Err(EncodingError::UnsupportedCharacter {
                    position: i * 2,
                    mode: Some(Mode::Kanji),
                });
            }
        }
        Ok(Self::raw(Mode::Kanji, sjis.to_vec(), sjis.len() / 2))
    }

    /// ECI designator for an assignment number (0-999999)
    pub fn eci(assignment: u32) -> std::result::Result<Self, ConfigError> {
        let mut bw = BitWriter::new();
        if assignment < 1 << 7 {
            bw.append_bits(assignment, 8);
        } else if assignment < 1 << 14 {
            bw.append_bits(0b10, 2);
            bw.append_bits(assignment, 14);
        } else if assignment < 1_000_000 {
            bw.append_bits(0b110, 3);
            bw.append_bits(assignment, 21);
        } else {
            return Err(ConfigError::EciOutOfRange(assignment));
        }
        Ok(Self::raw(Mode::Eci, bw.into_bytes(), 0))
    }

    /// Structured append header
    pub fn structured_append(header: StructuredAppend) -> Self {
        let position = header.index << 4 | (header.total - 1);
        Self::raw(
            Mode::StructuredAppend,
            vec![position, header.parity],
            0,
        )
    }

    fn raw(mode: Mode, data: Vec<u8>, num_chars: usize) -> Self {
        Self {
            mode,
            data,
            num_chars,
        }
    }

    fn check_all(data: &[u8], mode: Mode, accepts: fn(u8) -> bool) -> Result<()> {
        match data.iter().position(|&b| !accepts(b)) {
            Some(position) => Err(EncodingError::UnsupportedCharacter {
                position,
                mode: Some(mode),
            }),
            None => Ok(()),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Characters as counted by the character count indicator
    pub fn num_chars(&self) -> usize {
        self.num_chars
    }

    /// Payload as supplied (digits, characters, bytes or Shift JIS pairs)
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Payload bits, excluding mode indicator and character count
    pub fn payload_bits(&self) -> usize {
        match self.mode {
            Mode::Numeric => NumericEncoder::bit_length(self.num_chars),
            Mode::Alphanumeric => AlphanumericEncoder::bit_length(self.num_chars),
            Mode::Byte => ByteEncoder::bit_length(self.num_chars),
            Mode::Kanji => KanjiEncoder::bit_length(self.num_chars),
            Mode::Eci | Mode::StructuredAppend => self.data.len() * 8,
        }
    }

    /// Total bits at `version`, `None` if the character count overflows its field
    pub fn encoded_bits(&self, version: Version) -> Option<usize> {
        let cc_bits = self.mode.char_count_bits(version);
        if cc_bits > 0 && self.num_chars >= 1usize << cc_bits {
            return None;
        }
        Some(4 + usize::from(cc_bits) + self.payload_bits())
    }

    /// Append mode-specific payload bits
    pub fn write_payload(&self, out: &mut BitWriter) {
        match self.mode {
            Mode::Numeric => NumericEncoder::encode(&self.data, out),
            Mode::Alphanumeric => AlphanumericEncoder::encode(&self.data, out),
            Mode::Byte => ByteEncoder::encode(&self.data, out),
            Mode::Kanji => KanjiEncoder::encode(&self.data, out),
            Mode::Eci => {
                // Designators are 8, 16 or 24 bits; stored byte-aligned
                out.append_bytes(&self.data);
            }
            Mode::StructuredAppend => out.append_bytes(&self.data),
        }
    }
}

/// Segmentation settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SegmentOptions {
    /// Encode the whole input in this mode instead of classifying it
    pub forced_mode: Option<Mode>,
    /// Byte conversion for text input, or byte mode disabled
    pub byte_encoding: ByteEncoding,
    /// Recognise Shift JIS kanji pairs in byte input
    pub kanji: bool,
}

/// Splits input into mode-tagged segments.
///
/// Runs only ever widen: once a byte character opens a byte run, every
/// character after it stays in that run, digits and letters included.
/// A narrow run is split out only when it comes before the first wider one.
#[derive(Debug, Clone, Default)]
pub struct Segmenter {
    options: SegmentOptions,
}

impl Segmenter {
    pub fn new(options: SegmentOptions) -> Self {
        Self { options }
    }

    /// Segment raw bytes; error positions are byte offsets
    pub fn segment_bytes(&self, data: &[u8]) -> Result<Vec<Segment>> {
        self.segment_units(data, self.options.kanji)
    }

    /// Segment text; error positions are character indices
    pub fn segment_text(&self, text: &str) -> Result<Vec<Segment>> {
        let encoding = self.options.byte_encoding;
        let bytes = encoding
            .encode_text(text)
            .map_err(|position| EncodingError::UnsupportedCharacter {
                position,
                mode: self.options.forced_mode,
            })?;
        // Kanji detection on converted text would misread UTF-8 sequences
        self.segment_units(&bytes, false).map_err(|err| match err {
            EncodingError::UnsupportedCharacter { position, mode }
                if encoding == ByteEncoding::Utf8 =>
            {
                EncodingError::UnsupportedCharacter {
                    position: text
                        .char_indices()
                        .take_while(|&(offset, _)| offset < position)
                        .count(),
                    mode,
                }
            }
            other => other,
        })
    }

    fn segment_units(&self, data: &[u8], kanji: bool) -> Result<Vec<Segment>> {
        if let Some(mode) = self.options.forced_mode {
            return self.forced(data, mode).map(|seg| vec![seg]);
        }
        if data.is_empty() {
            return Ok(vec![Segment::bytes(&[])]);
        }

        let allows_bytes = self.options.byte_encoding.allows_bytes();
        let mut runs: Vec<(Mode, usize, usize)> = Vec::new();
        let mut i = 0;
        while i < data.len() {
            let (mode, len) = classify(data, i, kanji);
            if mode == Mode::Byte && !allows_bytes {
                return Err(EncodingError::UnsupportedCharacter {
                    position: i,
                    mode: None,
                });
            }
            match runs.last_mut() {
                Some(run) if run.0.covers(mode) => run.2 = i + len,
                _ => runs.push((mode, i, i + len)),
            }
            i += len;
        }

        let mut segments: Vec<Segment> = runs
            .into_iter()
            .map(|(mode, start, end)| build(mode, &data[start..end]))
            .collect();
        merge_adjacent(&mut segments);

        tracing::trace!(
            segments = segments.len(),
            modes = ?segments.iter().map(|s| s.mode).collect::<Vec<_>>(),
            "segmented input"
        );
        Ok(segments)
    }

    fn forced(&self, data: &[u8], mode: Mode) -> Result<Segment> {
        match mode {
            Mode::Numeric => Segment::numeric(data),
            Mode::Alphanumeric => Segment::alphanumeric(data),
            Mode::Kanji => Segment::kanji(data),
            Mode::Byte if !self.options.byte_encoding.allows_bytes() && !data.is_empty() => {
                Err(EncodingError::UnsupportedCharacter {
                    position: 0,
                    mode: Some(Mode::Byte),
                })
            }
            Mode::Byte => Ok(Segment::bytes(data)),
            Mode::Eci | Mode::StructuredAppend => Err(ConfigError::ForcedMode(mode).into()),
        }
    }
}

/// Narrowest mode for the unit starting at `i`, and the unit's byte length
fn classify(data: &[u8], i: usize, kanji: bool) -> (Mode, usize) {
    let b = data[i];
    if kanji
        && i + 1 < data.len()
        && KanjiEncoder::pair_value(b, data[i + 1]).is_some()
    {
        (Mode::Kanji, 2)
    } else if NumericEncoder::is_numeric(b) {
        (Mode::Numeric, 1)
    } else if AlphanumericEncoder::is_alphanumeric(b) {
        (Mode::Alphanumeric, 1)
    } else {
        (Mode::Byte, 1)
    }
}

fn build(mode: Mode, data: &[u8]) -> Segment {
    let num_chars = match mode {
        Mode::Kanji => data.len() / 2,
        _ => data.len(),
    };
    Segment::raw(mode, data.to_vec(), num_chars)
}

/// First version of each character count width class (1-9, 10-26, 27-40)
const CLASS_STARTS: [u8; 3] = [1, 10, 27];

/// Whether encoding `a` and `b` as one `merged` segment is never longer.
///
/// A class where `a` or `b` overflows its count field cannot hold the pair
/// either way and is skipped. A class where only `merged` overflows, or
/// where it costs more bits, keeps the pair apart.
fn merge_is_cheaper(merged: &Segment, a: &Segment, b: &Segment) -> bool {
    CLASS_STARTS
        .into_iter()
        .filter_map(Version::new)
        .all(|version| {
            match (a.encoded_bits(version), b.encoded_bits(version)) {
                (Some(a_bits), Some(b_bits)) => merged
                    .encoded_bits(version)
                    .is_some_and(|bits| bits <= a_bits + b_bits),
                _ => true,
            }
        })
}

fn merge_adjacent(segments: &mut Vec<Segment>) {
    let mut i = 0;
    while i + 1 < segments.len() {
        let (a, b) = (&segments[i], &segments[i + 1]);
        let wider = if a.mode.covers(b.mode) {
            Some(a.mode)
        } else if b.mode.covers(a.mode) {
            Some(b.mode)
        } else {
            None
        };
        let merged = wider.map(|mode| {
            let mut data = a.data.clone();
            data.extend_from_slice(&b.data);
            build(mode, &data)
        });
        match merged {
            Some(merged) if merge_is_cheaper(&merged, a, b) => {
                segments.splice(i..i + 2, [merged]);
                i = i.saturating_sub(1);
            }
            _ => i += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn modes(segments: &[Segment]) -> Vec<Mode> {
        segments.iter().map(Segment::mode).collect()
    }

    #[test]
    fn test_numeric_input() {
        let segs = Segmenter::default().segment_bytes(b"0123456789").unwrap();
        assert_eq!(modes(&segs), vec![Mode::Numeric]);
        assert_eq!(segs[0].num_chars(), 10);
        assert_eq!(segs[0].payload_bits(), 34);
    }

    #[test]
    fn test_alphanumeric_absorbs_digits() {
        let segs = Segmenter::default().segment_bytes(b"HELLO WORLD 42").unwrap();
        assert_eq!(modes(&segs), vec![Mode::Alphanumeric]);
    }

    #[test]
    fn test_url_is_single_byte_segment() {
        let segs = Segmenter::default()
            .segment_text("https://example.com/path?q=1")
            .unwrap();
        assert_eq!(modes(&segs), vec![Mode::Byte]);
        assert_eq!(segs[0].data(), b"https://example.com/path?q=1");
    }

    #[test]
    fn test_long_numeric_prefix_stays_separate() {
        let segs = Segmenter::default()
            .segment_bytes(b"123456789012345678901234hello")
            .unwrap();
        assert_eq!(modes(&segs), vec![Mode::Numeric, Mode::Byte]);
        let total: usize = segs.iter().map(|s| s.data().len()).sum();
        assert_eq!(total, 29);
    }

    #[test]
    fn test_oversized_numeric_run_is_not_widened() {
        let mut data = vec![b'7'; 3000];
        data.push(b'a');
        let segs = Segmenter::default().segment_bytes(&data).unwrap();
        assert_eq!(modes(&segs), vec![Mode::Numeric, Mode::Byte]);
        assert_eq!(segs[0].num_chars(), 3000);

        let mut data = vec![b'A'; 1800];
        data.push(b'a');
        let segs = Segmenter::default().segment_bytes(&data).unwrap();
        assert_eq!(modes(&segs), vec![Mode::Alphanumeric, Mode::Byte]);
    }

    #[test]
    fn test_digits_after_byte_stay_in_byte_run() {
        let segs = Segmenter::default()
            .segment_bytes(b"hello123456789012345678901234567890")
            .unwrap();
        assert_eq!(modes(&segs), vec![Mode::Byte]);
    }

    #[test]
    fn test_short_prefix_merges() {
        let segs = Segmenter::default().segment_bytes(b"1A1A1A").unwrap();
        assert_eq!(modes(&segs), vec![Mode::Alphanumeric]);
        assert_eq!(segs[0].data(), b"1A1A1A");
    }

    #[test]
    fn test_empty_input() {
        let segs = Segmenter::default().segment_bytes(b"").unwrap();
        assert_eq!(segs, vec![Segment::bytes(&[])]);
    }

    #[test]
    fn test_kanji_runs() {
        let options = SegmentOptions {
            kanji: true,
            ..SegmentOptions::default()
        };
        let data = [0x93, 0x5F, 0xE4, 0xAA, 0x93, 0x5F, 0xE4, 0xAA, 0x93, 0x5F];
        let segs = Segmenter::new(options).segment_bytes(&data).unwrap();
        assert_eq!(modes(&segs), vec![Mode::Kanji]);
        assert_eq!(segs[0].num_chars(), 5);
    }

    #[test]
    fn test_kanji_disabled_by_default() {
        let segs = Segmenter::default()
            .segment_bytes(&[0x93, 0x5F])
            .unwrap();
        assert_eq!(modes(&segs), vec![Mode::Byte]);
    }

    #[test]
    fn test_byte_mode_disabled() {
        let options = SegmentOptions {
            byte_encoding: ByteEncoding::Disabled,
            ..SegmentOptions::default()
        };
        let err = Segmenter::new(options).segment_text("ABC#D").unwrap_err();
        assert_eq!(
            err,
            EncodingError::UnsupportedCharacter {
                position: 3,
                mode: None
            }
        );
    }

    #[test]
    fn test_latin1_rejects_wide_chars() {
        let err = Segmenter::default().segment_text("price: 5\u{20ac}").unwrap_err();
        assert_eq!(
            err,
            EncodingError::UnsupportedCharacter {
                position: 8,
                mode: None
            }
        );
    }

    #[test]
    fn test_forced_mode() {
        let options = SegmentOptions {
            forced_mode: Some(Mode::Byte),
            ..SegmentOptions::default()
        };
        let segs = Segmenter::new(options).segment_bytes(b"12345").unwrap();
        assert_eq!(modes(&segs), vec![Mode::Byte]);

        let options = SegmentOptions {
            forced_mode: Some(Mode::Numeric),
            byte_encoding: ByteEncoding::Utf8,
            ..SegmentOptions::default()
        };
        let err = Segmenter::new(options).segment_text("\u{e9}\u{e9}1x").unwrap_err();
        assert_eq!(
            err,
            EncodingError::UnsupportedCharacter {
                position: 0,
                mode: Some(Mode::Numeric)
            }
        );
        let err = Segmenter::new(options).segment_text("12\u{e9}").unwrap_err();
        assert_eq!(
            err,
            EncodingError::UnsupportedCharacter {
                position: 2,
                mode: Some(Mode::Numeric)
            }
        );
    }

    #[test]
    fn test_eci_designator_widths() {
        assert_eq!(Segment::eci(26).unwrap().payload_bits(), 8);
        assert_eq!(Segment::eci(1000).unwrap().payload_bits(), 16);
        assert_eq!(Segment::eci(999_999).unwrap().payload_bits(), 24);
        assert_eq!(
            Segment::eci(1_000_000),
            Err(ConfigError::EciOutOfRange(1_000_000))
        );
    }

    #[test]
    fn test_structured_append_header() {
        let header = StructuredAppend::new(2, 4, 0x5A).unwrap();
        let seg = Segment::structured_append(header);
        assert_eq!(seg.data(), &[0x23, 0x5A]);
        assert_eq!(seg.encoded_bits(Version::MIN), Some(20));
        assert!(StructuredAppend::new(4, 4, 0).is_err());
        assert!(StructuredAppend::new(0, 17, 0).is_err());
        assert_eq!(StructuredAppend::parity_of(b"AB"), b'A' ^ b'B');
    }

    #[test]
    fn test_char_count_overflow() {
        let seg = Segment::bytes(&[0u8; 256]);
        assert_eq!(seg.encoded_bits(Version::MIN), None);
        assert_eq!(
            seg.encoded_bits(Version::new(10).unwrap()),
            Some(4 + 16 + 2048)
        );
    }
}
