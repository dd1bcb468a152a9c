//! Data masking and mask selection
//!
//! Every mask is tried on its own copy of the unmasked symbol with that
//! mask's format information already drawn, so trials share no state and
//! can run on the rayon pool.

use rayon::prelude::*;

use crate::encoder::format::FormatInfo;
use crate::encoder::function_mask::FunctionMask;
use crate::models::{BitMatrix, ECLevel, MaskPattern};

const PENALTY_N1: u32 = 3;
const PENALTY_N2: u32 = 3;
const PENALTY_N3: u32 = 40;
const PENALTY_N4: u32 = 10;

/// Flip every data module selected by `mask`; function modules are never masked
pub fn apply_mask(modules: &mut BitMatrix, func: &FunctionMask, mask: MaskPattern) {
    let size = func.size();
    for y in 0..size {
        for x in 0..size {
            if !func.is_function(x, y) && mask.is_masked(y, x) {
                modules.toggle(x, y);
            }
        }
    }
}

/// Penalty score split by rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PenaltyBreakdown {
    /// Same-colour runs of 5 or more in a row or column
    pub runs: u32,
    /// 2x2 single-colour blocks
    pub blocks: u32,
    /// 1:1:3:1:1 finder-like patterns with a 4-module light border
    pub finder_like: u32,
    /// Deviation of the dark ratio from 50%
    pub balance: u32,
}

impl PenaltyBreakdown {
    pub fn total(&self) -> u32 {
        self.runs + self.blocks + self.finder_like + self.balance
    }
}

/// Sliding window over the last seven run lengths of a line
struct FinderPenalty {
    size: usize,
    history: [usize; 7],
}

impl FinderPenalty {
    fn new(size: usize) -> Self {
        Self {
            size,
            history: [0; 7],
        }
    }

    fn add_history(&mut self, mut run: usize) {
        // The light border outside the symbol extends the first run
        if self.history[0] == 0 {
            run += self.size;
        }
        self.history.copy_within(0..6, 1);
        self.history[0] = run;
    }

    fn count_patterns(&self) -> u32 {
        let h = &self.history;
        let n = h[1];
        let core = n > 0 && h[2] == n && h[3] == n * 3 && h[4] == n && h[5] == n;
        u32::from(core && h[0] >= n * 4 && h[6] >= n) + u32::from(core && h[6] >= n * 4 && h[0] >= n)
    }

    fn terminate_and_count(&mut self, color: bool, mut run: usize) -> u32 {
        if color {
            self.add_history(run);
            run = 0;
        }
        run += self.size;
        self.add_history(run);
        self.count_patterns()
    }
}

/// (run penalty, finder-like pattern count) for one row or column
fn line_penalty(size: usize, module: impl Fn(usize) -> bool) -> (u32, u32) {
    let mut runs = 0;
    let mut patterns = 0;
    let mut color = false;
    let mut run = 0;
    let mut history = FinderPenalty::new(size);
    for i in 0..size {
        let dark = module(i);
        if dark == color {
            run += 1;
            if run == 5 {
                runs += PENALTY_N1;
            } else if run > 5 {
                runs += 1;
            }
        } else {
            history.add_history(run);
            if !color {
                patterns += history.count_patterns();
            }
            color = dark;
            run = 1;
        }
    }
    patterns += history.terminate_and_count(color, run);
    (runs, patterns)
}

/// Score a finished (masked, format-bearing) symbol by the four penalty rules
pub fn penalty_breakdown(modules: &BitMatrix) -> PenaltyBreakdown {
    let size = modules.width();
    let mut breakdown = PenaltyBreakdown::default();

    for y in 0..size {
        let (runs, patterns) = line_penalty(size, |x| modules.get(x, y));
        breakdown.runs += runs;
        breakdown.finder_like += patterns * PENALTY_N3;
    }
    for x in 0..size {
        let (runs, patterns) = line_penalty(size, |y| modules.get(x, y));
        breakdown.runs += runs;
        breakdown.finder_like += patterns * PENALTY_N3;
    }

    for y in 0..size.saturating_sub(1) {
        for x in 0..size - 1 {
            let color = modules.get(x, y);
            if color == modules.get(x + 1, y)
                && color == modules.get(x, y + 1)
                && color == modules.get(x + 1, y + 1)
            {
                breakdown.blocks += PENALTY_N2;
            }
        }
    }

    // Side length is odd, so the deviation is never exactly zero
    let total = size * size;
    let dark = modules.count_ones();
    let deviation = (dark * 20).abs_diff(total * 10);
    let k = (deviation + total - 1) / total;
    breakdown.balance = k.saturating_sub(1) as u32 * PENALTY_N4;

    breakdown
}

pub fn penalty_score(modules: &BitMatrix) -> u32 {
    penalty_breakdown(modules).total()
}

/// Copy of `unmasked` with `mask` applied and format information drawn
pub fn masked_trial(
    unmasked: &BitMatrix,
    func: &FunctionMask,
    ec_level: ECLevel,
    mask: MaskPattern,
) -> BitMatrix {
    let mut trial = unmasked.clone();
    apply_mask(&mut trial, func, mask);
    FormatInfo::new(ec_level, mask).write(&mut trial);
    trial
}

/// Penalty of every mask and the winner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskEvaluation {
    scores: [u32; 8],
    best: MaskPattern,
}

impl MaskEvaluation {
    fn from_scores(scores: [u32; 8]) -> Self {
        // Lowest score wins; ties go to the lowest mask number
        let best = MaskPattern::ALL
            .into_iter()
            .min_by_key(|m| (scores[usize::from(m.number())], m.number()))
            .unwrap_or(MaskPattern::Pattern0);
        Self { scores, best }
    }

    /// Scores indexed by mask number
    pub fn scores(&self) -> &[u32; 8] {
        &self.scores
    }

    pub fn score(&self, mask: MaskPattern) -> u32 {
        self.scores[usize::from(mask.number())]
    }

    pub fn best(&self) -> MaskPattern {
        self.best
    }
}

/// Score all eight masks against the same unmasked symbol
pub fn evaluate_masks(
    unmasked: &BitMatrix,
    func: &FunctionMask,
    ec_level: ECLevel,
    parallel: bool,
) -> MaskEvaluation {
    let score = |mask: MaskPattern| penalty_score(&masked_trial(unmasked, func, ec_level, mask));
    let mut scores = [0u32; 8];
    if parallel {
        let results: Vec<u32> = MaskPattern::ALL.par_iter().map(|&m| score(m)).collect();
        scores.copy_from_slice(&results);
    } else {
        for (slot, mask) in scores.iter_mut().zip(MaskPattern::ALL) {
            *slot = score(mask);
        }
    }
    let evaluation = MaskEvaluation::from_scores(scores);
    tracing::debug!(?scores, best = %evaluation.best, "evaluated masks");
    evaluation
}
