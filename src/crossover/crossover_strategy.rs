use std::fmt::Debug;

use crate::chromosome::Chromosome;
use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;

/// Trait for crossover strategies.
pub trait CrossoverStrategy<C>: Debug + Send + Sync
where
    C: Chromosome,
{
    /// Combines two parents into up to two children.
    ///
    /// # Errors
    ///
    /// Returns `StrategyContractViolation` if the parents cannot be combined
    /// (e.g. different lengths), and propagates `InvalidEncoding` from
    /// `create_child`.
    fn crossover(
        &self,
        first: &C,
        second: &C,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<C>>;
}

/// Runs a crossover strategy and verifies that every child has the length of its parents.
///
/// # Errors
///
/// Returns `StrategyContractViolation` if more than two children are produced or
/// a child's length differs from the parents'.
pub fn checked_crossover<C: Chromosome>(
    strategy: &dyn CrossoverStrategy<C>,
    first: &C,
    second: &C,
    rng: &mut RandomNumberGenerator,
) -> Result<Vec<C>> {
    let children = strategy.crossover(first, second, rng)?;

    if children.len() > 2 {
        return Err(GeneticError::StrategyContractViolation(format!(
            "{:?} produced {} children, at most 2 allowed",
            strategy,
            children.len()
        )));
    }

    if let Some(child) = children.iter().find(|c| c.len() != first.len()) {
        return Err(GeneticError::StrategyContractViolation(format!(
            "{:?} produced a child of length {}, parents have length {}",
            strategy,
            child.len(),
            first.len()
        )));
    }

    Ok(children)
}

/// Verifies that two parents can be recombined gene by gene.
pub(crate) fn ensure_same_length<C: Chromosome>(first: &C, second: &C) -> Result<usize> {
    if first.len() != second.len() {
        return Err(GeneticError::StrategyContractViolation(format!(
            "parents differ in length: {} and {}",
            first.len(),
            second.len()
        )));
    }
    Ok(first.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chromosome::tests::Bits;

    #[derive(Debug)]
    struct Truncating;

    impl CrossoverStrategy<Bits> for Truncating {
        fn crossover(
            &self,
            first: &Bits,
            _second: &Bits,
            _rng: &mut RandomNumberGenerator,
        ) -> Result<Vec<Bits>> {
            Ok(vec![first.create_child(first.genes()[1..].to_vec())?])
        }
    }

    #[test]
    fn test_checked_crossover_rejects_wrong_length() {
        let first = Bits::from_bits("0101");
        let second = Bits::from_bits("1111");
        let mut rng = RandomNumberGenerator::from_seed(1);

        let result = checked_crossover(&Truncating, &first, &second, &mut rng);

        assert!(matches!(
            result,
            Err(GeneticError::StrategyContractViolation(_))
        ));
    }

    #[test]
    fn test_ensure_same_length() {
        assert_eq!(
            ensure_same_length(&Bits::from_bits("01"), &Bits::from_bits("10")).unwrap(),
            2
        );
        assert!(ensure_same_length(&Bits::from_bits("01"), &Bits::from_bits("1")).is_err());
    }
}
