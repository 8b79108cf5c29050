//! Data masking (ISO 18004 Section 7.8).
//!
//! Masking XORs data modules with a pattern to avoid:
//! - Large areas of same color (hard to scan)
//! - Patterns resembling finder patterns (false positives)
//!
//! The 8 mask patterns (row = i, col = j):
//! - 0: (i + j) mod 2 = 0
//! - 1: i mod 2 = 0
//! - 2: j mod 3 = 0
//! - 3: (i + j) mod 3 = 0
//! - 4: (i/2 + j/3) mod 2 = 0
//! - 5: (i*j) mod 2 + (i*j) mod 3 = 0
//! - 6: ((i*j) mod 2 + (i*j) mod 3) mod 2 = 0
//! - 7: ((i+j) mod 2 + (i*j) mod 3) mod 2 = 0

use std::fmt;

use log::trace;

use crate::error::QrError;
use crate::format::place_format_info;
use crate::matrix::Matrix;

/// One of the eight mask patterns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MaskPattern(u8);

impl MaskPattern {
    /// Mask 0, (row + col) % 2 == 0.
    pub const CHECKERBOARD: MaskPattern = MaskPattern(0);

    pub fn new(number: u8) -> Result<Self, QrError> {
        if number < 8 {
            Ok(Self(number))
        } else {
            Err(QrError::InvalidMask(number))
        }
    }

    pub fn all() -> impl Iterator<Item = MaskPattern> {
        (0..8).map(MaskPattern)
    }

    pub fn number(self) -> u8 {
        self.0
    }

    /// Whether the module at (row, col) is flipped by this mask.
    pub fn is_masked(self, row: usize, col: usize) -> bool {
        let (i, j) = (row, col);
        match self.0 {
            0 => (i + j).is_multiple_of(2),
            1 => i.is_multiple_of(2),
            2 => j.is_multiple_of(3),
            3 => (i + j).is_multiple_of(3),
            4 => (i / 2 + j / 3).is_multiple_of(2),
            5 => (i * j) % 2 + (i * j) % 3 == 0,
            6 => ((i * j) % 2 + (i * j) % 3).is_multiple_of(2),
            _ => ((i + j) % 2 + (i * j) % 3).is_multiple_of(2),
        }
    }
}

impl fmt::Display for MaskPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How the encoder picks the mask.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MaskSelection {
    /// Evaluate all eight masks and keep the lowest penalty score.
    #[default]
    LowestPenalty,
    /// Always use the given mask.
    Fixed(MaskPattern),
}

/// Apply a mask pattern to every non-reserved module.
///
/// XOR, so applying the same mask twice restores the matrix.
pub fn apply_mask(matrix: &mut Matrix, mask: MaskPattern) {
    let size = matrix.size();

    for row in 0..size {
        for col in 0..size {
            if !matrix.is_reserved(row, col) && mask.is_masked(row, col) {
                matrix.toggle(row, col);
            }
        }
    }
}

/// Mask the matrix according to `selection` and write the format info.
pub fn finish(matrix: &mut Matrix, selection: MaskSelection) -> MaskPattern {
    let mask = match selection {
        MaskSelection::Fixed(mask) => mask,
        MaskSelection::LowestPenalty => select_mask(matrix),
    };

    apply_mask(matrix, mask);
    place_format_info(matrix, mask);
    mask
}

/// Pick the mask with the lowest penalty. Leaves the matrix unmasked.
///
/// Each candidate is scored with its own format information drawn, since
/// those modules take part in the run and block rules.
pub fn select_mask(matrix: &mut Matrix) -> MaskPattern {
    let mut best_mask = MaskPattern::CHECKERBOARD;
    let mut best_penalty = u32::MAX;

    for mask in MaskPattern::all() {
        apply_mask(matrix, mask);
        place_format_info(matrix, mask);
        let score = penalty(matrix);
        trace!("mask {} penalty {}", mask, score);

        if score < best_penalty {
            best_penalty = score;
            best_mask = mask;
        }

        // Undo mask to try next
        apply_mask(matrix, mask);
    }

    best_mask
}

/// Calculate penalty score for the current pattern.
///
/// Four penalty rules:
/// 1. Consecutive modules of same color (>=5): 3 + (length - 5)
/// 2. 2x2 blocks of same color: 3 per block
/// 3. Finder-like patterns: 40 each
/// 4. Color imbalance: 10 per 5% deviation from 50% dark
pub fn penalty(matrix: &Matrix) -> u32 {
    let size = matrix.size();
    let modules = matrix.rows();
    let mut penalty = 0u32;

    // Rule 1: Consecutive same-color runs
    for row in modules {
        penalty += run_penalty(row.iter().copied());
    }
    for col in 0..size {
        penalty += run_penalty(modules.iter().map(|row| row[col]));
    }

    // Rule 2: 2x2 blocks
    for row in 0..size - 1 {
        for col in 0..size - 1 {
            let color = modules[row][col];
            if color == modules[row][col + 1]
                && color == modules[row + 1][col]
                && color == modules[row + 1][col + 1]
            {
                penalty += 3;
            }
        }
    }

    // Rule 3: 1:1:3:1:1 finder-like patterns with 4 light modules on one side
    for row in 0..size {
        for col in 0..=size - 11 {
            if is_finder_like((0..11).map(|i| modules[row][col + i])) {
                penalty += 40;
            }
        }
    }
    for col in 0..size {
        for row in 0..=size - 11 {
            if is_finder_like((0..11).map(|i| modules[row + i][col])) {
                penalty += 40;
            }
        }
    }

    // Rule 4: Color imbalance
    let total = size * size;
    let dark_percent = (matrix.dark_count() * 100) / total;
    let deviation = (dark_percent as i32 - 50).unsigned_abs();
    penalty += (deviation / 5) * 10;

    penalty
}

const FINDER_LIKE: [bool; 11] = [
    true, false, true, true, true, false, true, false, false, false, false,
];

fn is_finder_like(window: impl Iterator<Item = bool>) -> bool {
    let window: Vec<bool> = window.collect();
    window == FINDER_LIKE || window.iter().eq(FINDER_LIKE.iter().rev())
}

fn run_penalty(iter: impl Iterator<Item = bool>) -> u32 {
    let mut penalty = 0u32;
    let mut run_color = false;
    let mut run_len = 0usize;

    for module in iter {
        if module == run_color {
            run_len += 1;
        } else {
            if run_len >= 5 {
                penalty += 3 + (run_len - 5) as u32;
            }
            run_color = module;
            run_len = 1;
        }
    }

    if run_len >= 5 {
        penalty += 3 + (run_len - 5) as u32;
    }

    penalty
}
