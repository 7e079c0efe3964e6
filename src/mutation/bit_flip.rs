use crate::chromosome::{Chromosome, Gene};
use crate::error::Result;
use crate::rng::RandomNumberGenerator;

use super::mutation_strategy::{finish, MutationStrategy};

/// Flips each gene independently with probability `rate`.
///
/// Flipping uses `Gene::flipped`, so it is meant for binary encodings.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default)]
pub struct BitFlipMutation;

impl BitFlipMutation {
    pub fn new() -> Self {
        Self
    }
}

impl<C> MutationStrategy<C> for BitFlipMutation
where
    C: Chromosome,
{
    fn mutate(&self, chromosome: &C, rate: f64, rng: &mut RandomNumberGenerator) -> Result<C> {
        let mut changed = false;
        let genes = chromosome
            .genes()
            .iter()
            .map(|&gene| {
                if rng.chance(rate) {
                    changed = true;
                    gene.flipped()
                } else {
                    gene
                }
            })
            .collect();

        finish(chromosome, genes, changed)
    }
}
