use tracing::trace;

use crate::chromosome::{sort_by_fitness, Chromosome};
use crate::crossover::checked_crossover;
use crate::error::{GeneticError, Result};
use crate::mutation::checked_mutate;
use crate::objective::Objective;
use crate::population::GeneticRates;
use crate::rng::RandomNumberGenerator;
use crate::selection::checked_select;

use super::evolution_strategy::{EvolutionStrategy, Operators};

/// Canonical generational replacement.
///
/// 1. The `floor(elitism × N)` best chromosomes are copied unchanged.
/// 2. Until the next generation holds `N` chromosomes, a uniform draw `u`
///    decides the branch. If `u <= crossover`, two parents are selected from
///    the current generation, crossed over, and each child is mutated and
///    appended (surplus children are dropped). Otherwise the chromosome at
///    the next unfilled rank of the current generation is mutated and appended.
/// 3. The next generation is sorted by fitness.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerationalEvolution;

impl GenerationalEvolution {
    pub fn new() -> Self {
        Self
    }
}

impl<C> EvolutionStrategy<C> for GenerationalEvolution
where
    C: Chromosome,
{
    fn evolve(
        &self,
        current: &[C],
        operators: &Operators<'_, C>,
        rates: &GeneticRates,
        objective: Objective,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<C>> {
        if current.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }

        let size = current.len();
        let elite_count = rates.elite_count(size);

        let mut next = Vec::with_capacity(size);
        next.extend_from_slice(&current[objective.best_range(size, elite_count)]);

        let mut crossovers = 0usize;
        while next.len() < size {
            if rng.uniform() <= rates.crossover() {
                crossovers += 1;
                let first = checked_select(operators.selection, current, objective, rng)?;
                let second = checked_select(operators.selection, current, objective, rng)?;

                let children =
                    checked_crossover(operators.crossover, &current[first], &current[second], rng)?;
                for child in children {
                    if next.len() == size {
                        break;
                    }
                    next.push(checked_mutate(operators.mutation, &child, rates.mutation(), rng)?);
                }
            } else {
                let source = &current[objective.rank_index(size, next.len())];
                next.push(checked_mutate(operators.mutation, source, rates.mutation(), rng)?);
            }
        }

        trace!(elite_count, crossovers, "Built next generation");

        sort_by_fitness(&mut next);
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chromosome::tests::Bits;
    use crate::chromosome::is_sorted_by_fitness;
    use crate::crossover::OnePointCrossover;
    use crate::mutation::BitFlipMutation;
    use crate::selection::TournamentSelection;

    fn population(rng: &mut RandomNumberGenerator, size: usize) -> Vec<Bits> {
        let mut chromosomes: Vec<Bits> = (0..size)
            .map(|_| Bits::new((0..12).map(|_| rng.index(2) as u8).collect()).unwrap())
            .collect();
        sort_by_fitness(&mut chromosomes);
        chromosomes
    }

    fn operators<'a>(
        selection: &'a TournamentSelection,
        crossover: &'a OnePointCrossover,
        mutation: &'a BitFlipMutation,
    ) -> Operators<'a, Bits> {
        Operators {
            selection,
            crossover,
            mutation,
        }
    }

    #[test]
    fn test_generational_keeps_size_and_order() {
        let mut rng = RandomNumberGenerator::from_seed(17);
        let current = population(&mut rng, 30);
        let (s, c, m) = (TournamentSelection::default(), OnePointCrossover, BitFlipMutation);
        let rates = GeneticRates::new(0.1, 0.7, 0.2).unwrap();

        for objective in [Objective::Maximize, Objective::Minimize] {
            let next = GenerationalEvolution
                .evolve(&current, &operators(&s, &c, &m), &rates, objective, &mut rng)
                .unwrap();

            assert_eq!(next.len(), 30);
            assert!(is_sorted_by_fitness(&next));
        }
    }

    #[test]
    fn test_elites_survive_unchanged() {
        let mut rng = RandomNumberGenerator::from_seed(23);
        let current = population(&mut rng, 20);
        let (s, c, m) = (TournamentSelection::default(), OnePointCrossover, BitFlipMutation);
        // High mutation so that non-elites almost never equal their source
        let rates = GeneticRates::new(0.5, 0.5, 0.25).unwrap();

        let next = GenerationalEvolution
            .evolve(&current, &operators(&s, &c, &m), &rates, Objective::Maximize, &mut rng)
            .unwrap();

        for elite in &current[15..] {
            assert!(next.contains(elite), "elite {:?} missing", elite);
        }
        assert!(next[19].fitness() >= current[19].fitness());
    }

    #[test]
    fn test_no_crossover_no_mutation_copies_ranks() {
        let mut rng = RandomNumberGenerator::from_seed(3);
        let current = population(&mut rng, 10);
        let (s, c, m) = (TournamentSelection::default(), OnePointCrossover, BitFlipMutation);
        let rates = GeneticRates::new(0.0, 0.0, 0.0).unwrap();

        let next = GenerationalEvolution
            .evolve(&current, &operators(&s, &c, &m), &rates, Objective::Minimize, &mut rng)
            .unwrap();

        // Every slot takes the next rank of the current generation unchanged
        assert_eq!(next, current);
    }

    #[test]
    fn test_empty_generation() {
        let mut rng = RandomNumberGenerator::from_seed(3);
        let (s, c, m) = (TournamentSelection::default(), OnePointCrossover, BitFlipMutation);
        let rates = GeneticRates::default();

        let result = GenerationalEvolution.evolve(
            &[],
            &operators(&s, &c, &m),
            &rates,
            Objective::Maximize,
            &mut rng,
        );
        assert!(matches!(result, Err(GeneticError::EmptyPopulation)));
    }
}
