use crate::encoder::tables::alignment_pattern_positions;
use crate::models::{BitMatrix, Version};

/// Function module mask for a specific QR version.
/// true = function module (not data), false = data module.
#[derive(Debug, Clone)]
pub struct FunctionMask {
    mask: BitMatrix,
    version: Version,
}

impl FunctionMask {
    pub fn new(version: Version) -> Self {
        let size = version.size();
        let mut mask = BitMatrix::square(size);

        // Finder patterns plus separators
        mask.fill_rect(0, 0, 8, 8, true);
        mask.fill_rect(size - 8, 0, 8, 8, true);
        mask.fill_rect(0, size - 8, 8, 8, true);

        // Timing patterns (row 6 and column 6)
        mask.fill_rect(6, 0, 1, size, true);
        mask.fill_rect(0, 6, size, 1, true);

        for (cx, cy) in alignment_centres(version) {
            mask.fill_rect(cx - 2, cy - 2, 5, 5, true);
        }

        // Format info areas, including the dark module at (8, size - 8)
        mask.fill_rect(8, 0, 1, 9, true);
        mask.fill_rect(0, 8, 9, 1, true);
        mask.fill_rect(size - 8, 8, 8, 1, true);
        mask.fill_rect(8, size - 8, 1, 8, true);

        if version.has_version_info() {
            mask.fill_rect(size - 11, 0, 3, 6, true);
            mask.fill_rect(0, size - 11, 6, 3, true);
        }

        Self { mask, version }
    }

    pub fn size(&self) -> usize {
        self.mask.width()
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn is_function(&self, x: usize, y: usize) -> bool {
        self.mask.get(x, y)
    }

    pub fn data_module_count(&self) -> usize {
        self.size() * self.size() - self.mask.count_ones()
    }
}

/// Alignment pattern centres as (x, y), skipping the three that would
/// overlap a finder pattern
pub fn alignment_centres(version: Version) -> impl Iterator<Item = (usize, usize)> {
    let positions = alignment_pattern_positions(version);
    let last = positions.len().saturating_sub(1);
    positions.iter().enumerate().flat_map(move |(i, &cx)| {
        positions
            .iter()
            .enumerate()
            .filter(move |&(j, _)| {
                !((i == 0 && j == 0) || (i == 0 && j == last) || (i == last && j == 0))
            })
            .map(move |(_, &cy)| (cx, cy))
    })
}

/// Draw finder, separator, timing and alignment patterns plus the dark
/// module. Format and version areas are left for their own writers.
pub fn draw_function_patterns(modules: &mut BitMatrix, version: Version) {
    let size = version.size();

    for i in 0..size {
        modules.set(6, i, i % 2 == 0);
        modules.set(i, 6, i % 2 == 0);
    }

    for (cx, cy) in [(3, 3), (size - 4, 3), (3, size - 4)] {
        draw_square_rings(modules, cx, cy, 4, |ring| ring != 2 && ring != 4);
    }

    for (cx, cy) in alignment_centres(version) {
        draw_square_rings(modules, cx, cy, 2, |ring| ring != 1);
    }

    modules.set(8, size - 8, true);
}

/// Paint concentric square rings around (cx, cy) out to `radius`; a ring's
/// colour is `dark(ring)`. Modules outside the symbol are skipped.
fn draw_square_rings(
    modules: &mut BitMatrix,
    cx: usize,
    cy: usize,
    radius: usize,
    dark: impl Fn(usize) -> bool,
) {
    for y in cy.saturating_sub(radius)..=cy + radius {
        for x in cx.saturating_sub(radius)..=cx + radius {
            let ring = x.abs_diff(cx).max(y.abs_diff(cy));
            // BitMatrix::set ignores out-of-range coordinates
            modules.set(x, y, dark(ring));
        }
    }
}
