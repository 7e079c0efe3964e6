use crate::chromosome::Chromosome;
use crate::error::Result;
use crate::rng::RandomNumberGenerator;

use super::mutation_strategy::{finish, MutationStrategy};

/// Which position a selected gene is swapped with.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SwapTarget {
    /// Any position of the encoding, drawn uniformly.
    #[default]
    Random,
    /// The next position, wrapping from the last gene to the first.
    Neighbor,
}

/// Swap mutation.
///
/// Visits every position and, with probability `rate`, swaps its gene with
/// another position. Swapping only reorders genes, so permutation encodings
/// stay valid. The neighbor variant keeps changes local, which disturbs tour
/// encodings less than random swaps.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default)]
pub struct SwapMutation {
    target: SwapTarget,
}

impl SwapMutation {
    pub fn new(target: SwapTarget) -> Self {
        Self { target }
    }

    /// Swaps with a uniformly drawn position.
    pub fn random() -> Self {
        Self::new(SwapTarget::Random)
    }

    /// Swaps with the adjacent position.
    pub fn neighbor() -> Self {
        Self::new(SwapTarget::Neighbor)
    }

    pub fn target(&self) -> SwapTarget {
        self.target
    }
}

impl<C> MutationStrategy<C> for SwapMutation
where
    C: Chromosome,
{
    fn mutate(&self, chromosome: &C, rate: f64, rng: &mut RandomNumberGenerator) -> Result<C> {
        let mut genes = chromosome.genes().to_vec();
        let length = genes.len();
        if length < 2 {
            return Ok(chromosome.clone());
        }

        let mut changed = false;
        for position in 0..length {
            if !rng.chance(rate) {
                continue;
            }
            let other = match self.target {
                SwapTarget::Random => rng.index(length),
                SwapTarget::Neighbor => (position + 1) % length,
            };
            if other != position {
                genes.swap(position, other);
                changed = true;
            }
        }

        finish(chromosome, genes, changed)
    }
}
