//! The transition rule.
//!
//! A cell activates when its neighborhood code is one of
//! [`ACTIVATING_CODES`] and the 11-cell window around it holds fewer than
//! [`DENSITY_LIMIT`] live cells. [`Perturbation`] then applies the random
//! overrides on top of that base value.
//!
//! ```text
//! code   7   6   5   4   3   2   1   0
//! wne   111 110 101 100 011 010 001 000
//! base   0   0   0   1   1   1   1   0     (when density < 8)
//! ```

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::error::{AutomataError, Result};
use crate::ring::Ring;
use crate::source::UniformSource;

/// Neighborhood codes that activate a cell.
pub const ACTIVATING_CODES: [u8; 4] = [1, 2, 3, 4];

/// Half-width of the density window (window is `2 * 5 + 1` cells).
pub const DENSITY_REACH: usize = 5;

/// Windows holding this many live cells or more suppress activation.
pub const DENSITY_LIMIT: usize = 8;

/// Encodes a cell and its two neighbors as `4*west + 2*center + east`.
pub fn neighborhood_code(west: u8, center: u8, east: u8) -> u8 {
    (west << 2) | (center << 1) | east
}

/// Base next-value from a neighborhood code and window density.
pub fn activates(code: u8, density: usize) -> bool {
    ACTIVATING_CODES.contains(&code) && density < DENSITY_LIMIT
}

/// Base next-value of the cell at `index`, read from `ring`.
pub fn base_value(ring: &Ring, index: isize) -> u8 {
    let index = ring.normalize(index) as isize;
    let code = neighborhood_code(ring.get(index - 1), ring.get(index), ring.get(index + 1));
    let density = ring.range_sum(index, DENSITY_REACH);
    u8::from(activates(code, density))
}

/// Computes the deterministic next generation of `ring`.
///
/// Every cell reads the same (unmodified) ring.
pub fn base_generation(ring: &Ring) -> Vec<u8> {
    (0..ring.len() as isize)
        .map(|i| base_value(ring, i))
        .collect()
}

/// Per-cell random overrides applied after the base rule.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Perturbation {
    /// Probability of flipping the cell, whatever the rule said.
    toggle: f64,
    /// Probability that an activated cell is forced back to 0.
    erase: f64,
    /// Probability that an inactive cell is forced to 1.
    fill: f64,
}

impl Perturbation {
    /// No overrides; the automaton is fully deterministic.
    pub const NONE: Self = Self {
        toggle: 0.0,
        erase: 0.0,
        fill: 0.0,
    };

    /// Creates a perturbation, checking every probability lies in `[0, 1]`.
    pub fn new(toggle: f64, erase: f64, fill: f64) -> Result<Self> {
        Ok(Self {
            toggle: check_probability("toggle", toggle)?,
            erase: check_probability("erase", erase)?,
            fill: check_probability("fill", fill)?,
        })
    }

    /// Toggle probability.
    pub fn toggle(&self) -> f64 {
        self.toggle
    }

    /// Erase probability.
    pub fn erase(&self) -> f64 {
        self.erase
    }

    /// Fill probability.
    pub fn fill(&self) -> f64 {
        self.fill
    }

    /// Returns true if no override can ever fire.
    pub fn is_none(&self) -> bool {
        self.toggle == 0.0 && self.erase == 0.0 && self.fill == 0.0
    }

    /// Applies the overrides to one base value.
    ///
    /// Toggle is checked first; erase or fill only get a draw when toggle did
    /// not fire.
    pub fn apply<S: UniformSource + ?Sized>(&self, base: u8, source: &mut S) -> u8 {
        if source.next_unit() < self.toggle {
            return 1 - base;
        }
        if base == 1 {
            if source.next_unit() < self.erase {
                return 0;
            }
        } else if source.next_unit() < self.fill {
            return 1;
        }
        base
    }
}

/// Validates a probability, rejecting NaN and anything outside `[0, 1]`.
pub(crate) fn check_probability(name: &'static str, value: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(AutomataError::InvalidProbability { name, value })
    }
}
