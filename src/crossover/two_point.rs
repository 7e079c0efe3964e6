use crate::chromosome::Chromosome;
use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;

use super::crossover_strategy::{ensure_same_length, CrossoverStrategy};

/// Two-point crossover.
///
/// Draws two ordered cut points `start <= end` and swaps the middle segment
/// `[start, end)` between the parents, producing two children.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default)]
pub struct TwoPointCrossover;

impl TwoPointCrossover {
    pub fn new() -> Self {
        Self
    }

    pub(crate) fn recombine<G: Copy>(
        first: &[G],
        second: &[G],
        start: usize,
        end: usize,
    ) -> (Vec<G>, Vec<G>) {
        let mut child_one = first.to_vec();
        let mut child_two = second.to_vec();

        child_one[start..end].copy_from_slice(&second[start..end]);
        child_two[start..end].copy_from_slice(&first[start..end]);

        (child_one, child_two)
    }
}

impl<C> CrossoverStrategy<C> for TwoPointCrossover
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

        let start = rng.index(length);
        let end = start + rng.index(length - start + 1);
        let (child_one, child_two) = Self::recombine(first.genes(), second.genes(), start, end);

        Ok(vec![
            first.create_child(child_one)?,
            second.create_child(child_two)?,
        ])
    }
}
