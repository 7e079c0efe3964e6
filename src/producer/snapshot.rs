use crate::chromosome::Chromosome;

/// Immutable summary of one generation of one population.
///
/// `chromosomes` carries the full sorted generation only when the producer
/// was configured with `include_chromosomes`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<C> {
    pub population_id: String,
    pub generation: usize,
    pub min_fitness: f64,
    pub max_fitness: f64,
    pub average_fitness: f64,
    pub fittest: C,
    pub least_fit: C,
    pub chromosomes: Option<Vec<C>>,
}

impl<C> Snapshot<C>
where
    C: Chromosome,
{
    /// Fitness of the fittest chromosome.
    pub fn best_fitness(&self) -> f64 {
        self.fittest.fitness()
    }
}
