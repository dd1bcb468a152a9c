//! Block splitting and codeword interleaving

use crate::encoder::reed_solomon::ReedSolomonEncoder;
use crate::encoder::tables::{BlockLayout, block_layout};
use crate::models::{ECLevel, Version};

/// One Reed-Solomon block: its data codewords and their EC codewords
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodewordBlock {
    pub data: Vec<u8>,
    pub ecc: Vec<u8>,
}

/// Split data codewords into blocks (short blocks first) and compute each
/// block's EC codewords.
///
/// # Panics
///
/// If `data` is not exactly the layout's data codeword count.
pub fn split_blocks(data: &[u8], layout: &BlockLayout) -> Vec<CodewordBlock> {
    assert_eq!(data.len(), layout.total_data(), "data codeword count mismatch");
    let rs = ReedSolomonEncoder::new(layout.ecc_per_block);
    let mut offset = 0;
    (0..layout.num_blocks)
        .map(|i| {
            let len = layout.data_len(i);
            let block = &data[offset..offset + len];
            offset += len;
            CodewordBlock {
                data: block.to_vec(),
                ecc: rs.remainder(block),
            }
        })
        .collect()
}

/// Interleave blocks: data codewords column by column (short blocks drop
/// out of the last column), then EC codewords column by column.
pub fn interleave(blocks: &[CodewordBlock]) -> Vec<u8> {
    let longest = blocks.iter().map(|b| b.data.len()).max().unwrap_or(0);
    let ecc_len = blocks.first().map_or(0, |b| b.ecc.len());
    let total: usize = blocks.iter().map(|b| b.data.len() + b.ecc.len()).sum();

    let mut out = Vec::with_capacity(total);
    for i in 0..longest {
        out.extend(blocks.iter().filter_map(|b| b.data.get(i)));
    }
    for i in 0..ecc_len {
        out.extend(blocks.iter().filter_map(|b| b.ecc.get(i)));
    }
    out
}

/// Final codeword sequence for a symbol: data plus EC, interleaved
pub fn add_error_correction(data: &[u8], version: Version, ec_level: ECLevel) -> Vec<u8> {
    let layout = block_layout(version, ec_level);
    let blocks = split_blocks(data, &layout);
    tracing::trace!(
        %version,
        %ec_level,
        blocks = layout.num_blocks,
        ecc_per_block = layout.ecc_per_block,
        "computed error correction"
    );
    interleave(&blocks)
}
