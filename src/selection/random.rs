use crate::chromosome::Chromosome;
use crate::error::{GeneticError, Result};
use crate::objective::Objective;
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_strategy::SelectionStrategy;

/// Selects a chromosome uniformly at random, ignoring fitness.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSelection;

impl RandomSelection {
    pub fn new() -> Self {
        Self
    }
}

impl<C> SelectionStrategy<C> for RandomSelection
where
    C: Chromosome,
{
    fn select(
        &self,
        chromosomes: &[C],
        _objective: Objective,
        rng: &mut RandomNumberGenerator,
    ) -> Result<usize> {
        if chromosomes.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }
        Ok(rng.index(chromosomes.len()))
    }
}
