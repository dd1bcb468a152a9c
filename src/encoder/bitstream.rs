//! Data codeword assembly: segment headers, payloads, terminator and padding

use crate::encoder::bit_buffer::BitWriter;
use crate::encoder::capacity::check_version;
use crate::encoder::segment::Segment;
use crate::encoder::tables::data_capacity_bits;
use crate::error::Result;
use crate::models::{ECLevel, Version};

/// Alternating filler bytes appended after the terminator
const PAD_BYTES: [u8; 2] = [0xEC, 0x11];

/// Serialise `segments` into exactly the data codeword count of
/// (`version`, `ec_level`).
pub fn encode_data_codewords(
    segments: &[Segment],
    version: Version,
    ec_level: ECLevel,
) -> Result<Vec<u8>> {
    check_version(segments, version, ec_level)?;

    let capacity = data_capacity_bits(version, ec_level);
    let mut bw = BitWriter::with_capacity(capacity);
    for seg in segments {
        let cc_bits = seg.mode().char_count_bits(version);
        bw.append_bits(seg.mode().indicator(), 4);
        // check_version guarantees the count fits its field
        bw.append_bits(seg.num_chars() as u32, cc_bits);
        seg.write_payload(&mut bw);
    }
    let used = bw.len();

    let terminator = (capacity - bw.len()).min(4);
    bw.append_bits(0, terminator as u8);
    let align = bw.bits_to_byte_boundary();
    bw.append_bits(0, align as u8);

    let mut padding = PAD_BYTES.iter().cycle();
    while bw.len() < capacity {
        if let Some(&pad) = padding.next() {
            bw.append_bits(u32::from(pad), 8);
        }
    }

    tracing::trace!(
        %version,
        %ec_level,
        used_bits = used,
        capacity_bits = capacity,
        "assembled data codewords"
    );
    Ok(bw.into_bytes())
}
