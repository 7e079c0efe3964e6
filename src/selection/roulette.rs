use crate::chromosome::Chromosome;
use crate::error::{GeneticError, Result};
use crate::objective::Objective;
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_strategy::SelectionStrategy;

/// A selection strategy that selects chromosomes through roulette wheel selection.
///
/// Roulette wheel selection (also known as fitness proportionate selection) draws
/// a value uniformly in `[0, Σfitness)` and walks the chromosomes in list order,
/// subtracting each fitness until the running value is no longer positive. The
/// chromosome at which that happens is selected; if rounding never brings the
/// value to zero, the last chromosome is selected.
///
/// The wheel is proportional to raw fitness, so it suits maximizing populations
/// with non-negative fitness. For minimizing populations use tournament selection.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default)]
pub struct RouletteWheelSelection;

impl RouletteWheelSelection {
    /// Creates a new RouletteWheelSelection strategy.
    pub fn new() -> Self {
        Self
    }

    /// Spins the wheel over the given fitness values.
    fn spin(fitness: impl Iterator<Item = f64> + Clone, len: usize, draw: f64) -> usize {
        let sum: f64 = fitness.clone().sum();
        let mut remaining = draw * sum;

        for (index, value) in fitness.enumerate() {
            remaining -= value;
            if remaining <= 0.0 {
                return index;
            }
        }

        len - 1
    }
}

impl<C> SelectionStrategy<C> for RouletteWheelSelection
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

        let draw = rng.uniform();
        Ok(Self::spin(
            chromosomes.iter().map(|c| c.fitness()),
            chromosomes.len(),
            draw,
        ))
    }
}
