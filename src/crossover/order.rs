use crate::chromosome::Chromosome;
use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;

use super::crossover_strategy::{ensure_same_length, CrossoverStrategy};

/// Order-preserving crossover for permutation encodings.
///
/// A contiguous segment `[start, end)` is drawn. The first child receives the
/// second parent's segment at the same positions; its remaining positions are
/// filled with the first parent's genes in their original order, skipping any
/// gene already placed. The second child is built symmetrically.
///
/// Given two valid permutations of the same elements, both children are valid
/// permutations of those elements.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderCrossover;

impl OrderCrossover {
    pub fn new() -> Self {
        Self
    }

    /// Builds one child: `donor[start..end]` in place, `base` fills the rest.
    pub(crate) fn build_child<G: Copy + PartialEq>(
        base: &[G],
        donor: &[G],
        start: usize,
        end: usize,
    ) -> Vec<G> {
        let segment = &donor[start..end];
        let mut fill = base.iter().filter(|gene| !segment.contains(gene));

        let mut child = Vec::with_capacity(base.len());
        for position in 0..base.len() {
            if (start..end).contains(&position) {
                child.push(donor[position]);
            } else if let Some(&gene) = fill.next() {
                child.push(gene);
            }
        }
        child
    }
}

impl<C> CrossoverStrategy<C> for OrderCrossover
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

        let child_one = Self::build_child(first.genes(), second.genes(), start, end);
        let child_two = Self::build_child(second.genes(), first.genes(), start, end);

        Ok(vec![
            first.create_child(child_one)?,
            second.create_child(child_two)?,
        ])
    }
}
