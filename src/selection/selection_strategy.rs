use std::fmt::Debug;

use crate::chromosome::Chromosome;
use crate::error::{GeneticError, Result};
use crate::objective::Objective;
use crate::rng::RandomNumberGenerator;

/// Trait for parent selection strategies.
///
/// A selection strategy picks one chromosome out of the current generation and
/// returns its index. The chromosomes are sorted by ascending fitness; the
/// objective tells the strategy which end is the good one.
///
/// # Examples
///
/// ```
/// use genetic_engine::objective::Objective;
/// use genetic_engine::rng::RandomNumberGenerator;
/// use genetic_engine::selection::{SelectionStrategy, TournamentSelection};
/// # use genetic_engine::chromosome::Chromosome;
/// # use genetic_engine::error::Result;
/// # #[derive(Clone, Debug)]
/// # struct Value(f64);
/// # impl Chromosome for Value {
/// #     type Gene = f64;
/// #     fn genes(&self) -> &[f64] { std::slice::from_ref(&self.0) }
/// #     fn fitness(&self) -> f64 { self.0 }
/// #     fn create_child(&self, genes: Vec<f64>) -> Result<Self> { Ok(Value(genes[0])) }
/// # }
///
/// let chromosomes = vec![Value(0.1), Value(0.5), Value(0.9)];
/// let mut rng = RandomNumberGenerator::from_seed(1);
///
/// let selection = TournamentSelection::new(3).unwrap();
/// let index = selection
///     .select(&chromosomes, Objective::Maximize, &mut rng)
///     .unwrap();
///
/// assert_eq!(index, 2);
/// ```
pub trait SelectionStrategy<C>: Debug + Send + Sync
where
    C: Chromosome,
{
    /// Selects one chromosome and returns its index into `chromosomes`.
    ///
    /// # Errors
    ///
    /// Returns `EmptyPopulation` if `chromosomes` is empty.
    fn select(
        &self,
        chromosomes: &[C],
        objective: Objective,
        rng: &mut RandomNumberGenerator,
    ) -> Result<usize>;
}

/// Runs a selection strategy and verifies that the returned index is valid.
///
/// # Errors
///
/// Returns `StrategyContractViolation` if the strategy returns an index outside
/// of `chromosomes`, and propagates any error of the strategy itself.
pub fn checked_select<C: Chromosome>(
    strategy: &dyn SelectionStrategy<C>,
    chromosomes: &[C],
    objective: Objective,
    rng: &mut RandomNumberGenerator,
) -> Result<usize> {
    let index = strategy.select(chromosomes, objective, rng)?;
    if index >= chromosomes.len() {
        return Err(GeneticError::StrategyContractViolation(format!(
            "{:?} selected index {} from {} chromosomes",
            strategy,
            index,
            chromosomes.len()
        )));
    }
    Ok(index)
}
