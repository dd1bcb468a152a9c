/// Append-only MSB-first bit writer backing the data bitstream
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitWriter {
    data: Vec<u8>,
    length: usize,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writer with room for `bits` bits before reallocating
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            data: Vec::with_capacity(bits.div_ceil(8)),
            length: 0,
        }
    }

    /// Number of bits written so far
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Append the low `count` bits of `value`, most significant first
    pub fn append_bits(&mut self, value: u32, count: u8) {
        assert!(count <= 31 && value >> count == 0, "value does not fit in {count} bits");
        for i in (0..count).rev() {
            let bit = ((value >> i) & 1) as u8;
            let shift = 7 - (self.length % 8);
            if shift == 7 {
                self.data.push(bit << shift);
            } else if let Some(last) = self.data.last_mut() {
                *last |= bit << shift;
            }
            self.length += 1;
        }
    }

    /// Append whole bytes
    pub fn append_bytes(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.append_bits(u32::from(b), 8);
        }
    }

    /// Bits still needed to reach the next byte boundary
    pub fn bits_to_byte_boundary(&self) -> usize {
        self.length.wrapping_neg() & 7
    }

    /// Written bits packed into bytes; a trailing partial byte is zero-filled
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}
