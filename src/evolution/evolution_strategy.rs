use std::fmt::Debug;

use crate::chromosome::Chromosome;
use crate::crossover::CrossoverStrategy;
use crate::error::Result;
use crate::mutation::MutationStrategy;
use crate::objective::Objective;
use crate::population::GeneticRates;
use crate::rng::RandomNumberGenerator;
use crate::selection::SelectionStrategy;

/// The selection, crossover and mutation strategies of a population, borrowed
/// for the duration of one `evolve` call.
#[derive(Debug)]
pub struct Operators<'a, C>
where
    C: Chromosome,
{
    pub selection: &'a dyn SelectionStrategy<C>,
    pub crossover: &'a dyn CrossoverStrategy<C>,
    pub mutation: &'a dyn MutationStrategy<C>,
}

/// Trait for replacement policies.
pub trait EvolutionStrategy<C>: Debug + Send + Sync
where
    C: Chromosome,
{
    /// Builds the next generation from `current`.
    ///
    /// # Arguments
    ///
    /// * `current` - The current generation, sorted by ascending fitness.
    /// * `operators` - The strategies used to breed offspring.
    /// * `rates` - Elitism, crossover and mutation rates.
    /// * `objective` - Which end of the sorted list holds the best chromosomes.
    /// * `rng` - The population's random number generator.
    ///
    /// # Returns
    ///
    /// A generation of `current.len()` chromosomes. The caller sorts it.
    ///
    /// # Errors
    ///
    /// Propagates strategy errors; returns `EmptyPopulation` for an empty
    /// current generation.
    fn evolve(
        &self,
        current: &[C],
        operators: &Operators<'_, C>,
        rates: &GeneticRates,
        objective: Objective,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<C>>;
}
