use crate::chromosome::Chromosome;
use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;

use super::crossover_strategy::{ensure_same_length, CrossoverStrategy};

/// One-point crossover.
///
/// Draws a pivot uniformly in `[0, length)` and swaps the gene suffixes of the
/// two parents from the pivot on, producing two children.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default)]
pub struct OnePointCrossover;

impl OnePointCrossover {
    pub fn new() -> Self {
        Self
    }

    pub(crate) fn recombine<G: Copy>(first: &[G], second: &[G], pivot: usize) -> (Vec<G>, Vec<G>) {
        let mut child_one = Vec::with_capacity(first.len());
        let mut child_two = Vec::with_capacity(first.len());

        child_one.extend_from_slice(&first[..pivot]);
        child_one.extend_from_slice(&second[pivot..]);
        child_two.extend_from_slice(&second[..pivot]);
        child_two.extend_from_slice(&first[pivot..]);

        (child_one, child_two)
    }
}

impl<C> CrossoverStrategy<C> for OnePointCrossover
where
    C: Chromosome,
{
    fn crossover(
        &self,
        first: &C,
        second: &C,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<C>> {
        let length = ensure_same_length(first, second)?;
        if length == 0 {
            return Err(GeneticError::StrategyContractViolation(
                "Cannot cross over empty encodings".to_string(),
            ));
        }

        let pivot = rng.index(length);
        let (child_one, child_two) = Self::recombine(first.genes(), second.genes(), pivot);

        Ok(vec![
            first.create_child(child_one)?,
            second.create_child(child_two)?,
        ])
    }
}
