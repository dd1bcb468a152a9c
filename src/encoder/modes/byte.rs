/// Byte mode encoder (Mode 0100) for 8-bit data
use crate::encoder::bit_buffer::BitWriter;

/// How text input is turned into byte-mode data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteEncoding {
    /// One byte per character, U+0000-U+00FF only (the QR default charset)
    #[default]
    Iso8859_1,
    /// UTF-8 bytes of the text
    Utf8,
    /// Byte mode is off; only numeric/alphanumeric/kanji input is accepted
    Disabled,
}

impl ByteEncoding {
    /// Convert text to bytes. On failure returns the character index that
    /// has no representation.
    pub fn encode_text(self, text: &str) -> Result<Vec<u8>, usize> {
        match self {
            ByteEncoding::Utf8 => Ok(text.as_bytes().to_vec()),
            ByteEncoding::Iso8859_1 | ByteEncoding::Disabled => text
                .chars()
                .enumerate()
                .map(|(i, c)| u8::try_from(u32::from(c)).map_err(|_| i))
                .collect(),
        }
    }

    pub fn allows_bytes(self) -> bool {
        self != ByteEncoding::Disabled
    }
}

/// 8 bits per byte, verbatim
pub struct ByteEncoder;

impl ByteEncoder {
    pub fn bit_length(count: usize) -> usize {
        count * 8
    }

    pub fn encode(bytes: &[u8], out: &mut BitWriter) {
        out.append_bytes(bytes);
    }
}
