use std::fmt::Debug;

use crate::chromosome::Chromosome;
use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;

/// Trait for mutation strategies.
///
/// `rate` is the per-gene probability of a change. With a rate of zero the
/// returned chromosome has an encoding identical to the input.
pub trait MutationStrategy<C>: Debug + Send + Sync
where
    C: Chromosome,
{
    /// Returns a mutated copy of `chromosome`.
    ///
    /// # Errors
    ///
    /// Propagates `InvalidEncoding` from `create_child`.
    fn mutate(&self, chromosome: &C, rate: f64, rng: &mut RandomNumberGenerator) -> Result<C>;
}

/// Builds the mutated chromosome, reusing the parent when no gene changed.
pub(crate) fn finish<C: Chromosome>(parent: &C, genes: Vec<C::Gene>, changed: bool) -> Result<C> {
    if changed {
        parent.create_child(genes)
    } else {
        Ok(parent.clone())
    }
}

/// Runs a mutation strategy and verifies that the result keeps the input's length.
///
/// # Errors
///
/// Returns `StrategyContractViolation` if the mutated encoding changed length.
pub fn checked_mutate<C: Chromosome>(
    strategy: &dyn MutationStrategy<C>,
    chromosome: &C,
    rate: f64,
    rng: &mut RandomNumberGenerator,
) -> Result<C> {
    let mutated = strategy.mutate(chromosome, rate, rng)?;
    if mutated.len() != chromosome.len() {
        return Err(GeneticError::StrategyContractViolation(format!(
            "{:?} changed the encoding length from {} to {}",
            strategy,
            chromosome.len(),
            mutated.len()
        )));
    }
    Ok(mutated)
}
