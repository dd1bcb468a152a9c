//! Codeword placement along the zig-zag module path

use crate::encoder::function_mask::FunctionMask;
use crate::models::BitMatrix;

/// Data module coordinates (x, y) in placement order.
///
/// Columns are taken in pairs from the right edge, skipping the vertical
/// timing column. The first pair runs upward and direction alternates with
/// each pair; within a row the right column comes first.
pub fn data_module_path(func: &FunctionMask) -> impl Iterator<Item = (usize, usize)> + '_ {
    let size = func.size();
    let rights = (1..size)
        .rev()
        .step_by(2)
        .map(|right| if right <= 6 { right - 1 } else { right });
    rights.flat_map(move |right| {
        let upward = (right + 1) & 2 == 0;
        (0..size).flat_map(move |vert| {
            let y = if upward { size - 1 - vert } else { vert };
            [right, right - 1].into_iter().map(move |x| (x, y))
        })
    })
    .filter(|&(x, y)| !func.is_function(x, y))
}

/// Write `codewords` MSB-first along the path. Modules past the last
/// codeword (remainder bits) are left light.
pub fn place_codewords(modules: &mut BitMatrix, func: &FunctionMask, codewords: &[u8]) -> usize {
    let mut bits = codewords
        .iter()
        .flat_map(|&cw| (0..8).rev().map(move |i| (cw >> i) & 1 == 1));
    let mut placed = 0;
    for (x, y) in data_module_path(func) {
        let dark = bits.next().unwrap_or(false);
        modules.set(x, y, dark);
        placed += 1;
    }
    placed
}
