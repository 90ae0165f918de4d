//! Mask selection by the four-rule penalty score

use super::function_patterns::SymbolCanvas;
use crate::models::{BitMatrix, ECLevel, MaskPattern};

const PENALTY_N1: usize = 3;
const PENALTY_N2: usize = 3;
const PENALTY_N3: usize = 40;
const PENALTY_N4: usize = 10;

const FINDER_LIKE: [bool; 11] = [
    true, false, true, true, true, false, true, false, false, false, false,
];

/// Try every mask on a canvas holding unmasked codewords, keep the lowest
/// penalty (first wins on ties) and leave it applied with matching format bits.
pub fn apply_best_mask(canvas: &mut SymbolCanvas, ec_level: ECLevel) -> MaskPattern {
    let mut best = MaskPattern::Pattern0;
    let mut best_score = usize::MAX;
    for mask in MaskPattern::ALL {
        canvas.apply_mask(mask);
        canvas.draw_format(ec_level, mask);
        let score = penalty_score(canvas.modules());
        if score < best_score {
            best = mask;
            best_score = score;
        }
        canvas.apply_mask(mask);
    }
    canvas.apply_mask(best);
    canvas.draw_format(ec_level, best);
    tracing::debug!(mask = best.bits(), penalty = best_score, "selected mask");
    best
}

/// Sum of the four ISO/IEC 18004 penalty rules. Lower is better.
pub fn penalty_score(modules: &BitMatrix) -> usize {
    let size = modules.width();
    let rows = (0..size).map(|y| (0..size).map(|x| modules.get(x, y)).collect::<Vec<_>>());
    let cols = (0..size).map(|x| (0..size).map(|y| modules.get(x, y)).collect::<Vec<_>>());

    let mut score = 0;
    for line in rows.chain(cols) {
        score += run_penalty(&line);
        score += finder_like_penalty(&line);
    }
    score += block_penalty(modules);
    score += balance_penalty(modules);
    score
}

/// Rule 1: runs of five or more same-colored modules
fn run_penalty(line: &[bool]) -> usize {
    let mut score = 0;
    let mut run = 0;
    let mut color = None;
    for &module in line {
        if Some(module) == color {
            run += 1;
        } else {
            if run >= 5 {
                score += PENALTY_N1 + run - 5;
            }
            color = Some(module);
            run = 1;
        }
    }
    if run >= 5 {
        score += PENALTY_N1 + run - 5;
    }
    score
}

/// Rule 2: 2x2 blocks of one color
fn block_penalty(modules: &BitMatrix) -> usize {
    let size = modules.width();
    let mut score = 0;
    for y in 0..size.saturating_sub(1) {
        for x in 0..size.saturating_sub(1) {
            let c = modules.get(x, y);
            if c == modules.get(x + 1, y) && c == modules.get(x, y + 1) && c == modules.get(x + 1, y + 1)
            {
                score += PENALTY_N2;
            }
        }
    }
    score
}

/// Rule 3: 1:1:3:1:1 dark pattern with four light modules on either side.
/// The quiet zone counts as light.
fn finder_like_penalty(line: &[bool]) -> usize {
    let mut padded = vec![false; 4];
    padded.extend_from_slice(line);
    padded.extend_from_slice(&[false; 4]);

    padded
        .windows(FINDER_LIKE.len())
        .filter(|w| w.iter().eq(FINDER_LIKE.iter()) || w.iter().eq(FINDER_LIKE.iter().rev()))
        .count()
        * PENALTY_N3
}

/// Rule 4: distance of the dark ratio from 50%, in 5% steps
fn balance_penalty(modules: &BitMatrix) -> usize {
    let total = modules.width() * modules.height();
    if total == 0 {
        return 0;
    }
    let dark = modules.count_ones();
    let k = (((dark * 20).abs_diff(total * 10) + total - 1) / total).saturating_sub(1);
    k * PENALTY_N4
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_penalty() {
        assert_eq!(run_penalty(&[true; 4]), 0);
        assert_eq!(run_penalty(&[true; 5]), 3);
        assert_eq!(run_penalty(&[false; 7]), 5);
        let mixed = [true, true, true, true, true, false, true];
        assert_eq!(run_penalty(&mixed), 3);
    }

    #[test]
    fn test_finder_like_penalty() {
        let mut line = vec![false; 4];
        line.extend_from_slice(&[true, false, true, true, true, false, true]);
        line.extend_from_slice(&[false; 4]);
        // Light on both sides matches both orientations
        assert_eq!(finder_like_penalty(&line), 80);

        let plain = [true, false, true, false, true, false];
        assert_eq!(finder_like_penalty(&plain), 0);
    }

    #[test]
    fn test_balance_penalty() {
        let mut near_half = BitMatrix::new(21, 21);
        for i in 0..220 {
            near_half.set(i % 21, i / 21, true);
        }
        assert_eq!(balance_penalty(&near_half), 0);

        let mut m = BitMatrix::new(3, 3);
        for (x, y) in [(0, 0), (1, 0), (2, 0), (0, 1)] {
            m.set(x, y, true);
        }
        assert_eq!(balance_penalty(&m), 10);

        let mut dark = BitMatrix::new(3, 3);
        for i in 0..9 {
            dark.set(i % 3, i / 3, true);
        }
        assert_eq!(balance_penalty(&dark), 90);
    }

    #[test]
    fn test_block_penalty_uniform() {
        let m = BitMatrix::new(3, 3);
        assert_eq!(block_penalty(&m), 4 * 3);
    }
}
