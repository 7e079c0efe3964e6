//! Optimization direction of a population.
//!
//! Chromosomes are always kept sorted by ascending fitness; the `Objective`
//! decides which end of that list holds the best chromosomes.

use std::fmt;
use std::str::FromStr;

use crate::error::GeneticError;

/// Whether higher or lower fitness is better.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Objective {
    #[default]
    Maximize,
    Minimize,
}

impl Objective {
    /// Returns `true` if `candidate` is strictly better than `incumbent`.
    pub fn is_better(&self, candidate: f64, incumbent: f64) -> bool {
        match self {
            Objective::Maximize => candidate > incumbent,
            Objective::Minimize => candidate < incumbent,
        }
    }

    /// Returns `true` if `fitness` is at least as good as `target`.
    pub fn reached(&self, fitness: f64, target: f64) -> bool {
        match self {
            Objective::Maximize => fitness >= target,
            Objective::Minimize => fitness <= target,
        }
    }

    /// Maps a rank (0 = best) onto an index of a list of `len` chromosomes
    /// sorted by ascending fitness.
    pub fn rank_index(&self, len: usize, rank: usize) -> usize {
        match self {
            Objective::Maximize => len - 1 - rank,
            Objective::Minimize => rank,
        }
    }

    /// The index range holding the `count` best chromosomes of an ascending list.
    pub fn best_range(&self, len: usize, count: usize) -> std::ops::Range<usize> {
        match self {
            Objective::Maximize => len - count..len,
            Objective::Minimize => 0..count,
        }
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Objective::Maximize => write!(f, "max"),
            Objective::Minimize => write!(f, "min"),
        }
    }
}

impl FromStr for Objective {
    type Err = GeneticError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "max" | "maximize" => Ok(Objective::Maximize),
            "min" | "minimize" => Ok(Objective::Minimize),
            other => Err(GeneticError::Configuration(format!(
                "Unknown objective '{}'",
                other
            ))),
        }
    }
}
