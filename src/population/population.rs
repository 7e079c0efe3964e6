use tracing::{debug, trace};

use crate::chromosome::{sort_by_fitness, Chromosome};
use crate::crossover::CrossoverStrategy;
use crate::error::{GeneticError, Result};
use crate::evolution::{EvolutionStrategy, Operators};
use crate::mutation::MutationStrategy;
use crate::objective::Objective;
use crate::producer::Snapshot;
use crate::rng::RandomNumberGenerator;
use crate::selection::SelectionStrategy;

use super::rates::GeneticRates;

/// One generation of chromosomes and the machinery to evolve it.
///
/// The chromosome list always holds exactly `size()` chromosomes sorted by
/// ascending fitness, so the best and worst chromosomes sit at the two ends of
/// the list and are read in constant time.
///
/// A population is owned by a single producer at a time. It holds its own
/// random number generator, so separate populations can evolve on separate
/// threads without sharing state.
#[derive(Debug)]
pub struct Population<C>
where
    C: Chromosome,
{
    pub(super) id: String,
    pub(super) rates: GeneticRates,
    pub(super) objective: Objective,
    pub(super) chromosomes: Vec<C>,
    pub(super) selection: Box<dyn SelectionStrategy<C>>,
    pub(super) crossover: Box<dyn CrossoverStrategy<C>>,
    pub(super) mutation: Box<dyn MutationStrategy<C>>,
    pub(super) evolution: Box<dyn EvolutionStrategy<C>>,
    pub(super) rng: RandomNumberGenerator,
}

impl<C> Population<C>
where
    C: Chromosome,
{
    /// Replaces the current generation with the next one.
    ///
    /// The next generation is built by the evolution strategy, checked, sorted,
    /// and then swapped in as a whole. If any step fails the current generation
    /// is left untouched.
    ///
    /// # Errors
    ///
    /// Propagates errors from the strategies. Returns
    /// `StrategyContractViolation` if the evolution strategy returns a
    /// generation of the wrong size.
    pub fn evolve(&mut self) -> Result<()> {
        let operators = Operators {
            selection: self.selection.as_ref(),
            crossover: self.crossover.as_ref(),
            mutation: self.mutation.as_ref(),
        };

        let mut next = self.evolution.evolve(
            &self.chromosomes,
            &operators,
            &self.rates,
            self.objective,
            &mut self.rng,
        )?;

        if next.len() != self.chromosomes.len() {
            return Err(GeneticError::StrategyContractViolation(format!(
                "{:?} returned {} chromosomes for a population of {}",
                self.evolution,
                next.len(),
                self.chromosomes.len()
            )));
        }

        sort_by_fitness(&mut next);
        self.chromosomes = next;

        trace!(
            population = %self.id,
            best = self.fittest().fitness(),
            "Evolved generation"
        );

        Ok(())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Number of chromosomes. Never changes after construction.
    pub fn size(&self) -> usize {
        self.chromosomes.len()
    }

    pub fn rates(&self) -> &GeneticRates {
        &self.rates
    }

    pub fn objective(&self) -> Objective {
        self.objective
    }

    /// The current generation, sorted by ascending fitness.
    pub fn chromosomes(&self) -> &[C] {
        &self.chromosomes
    }

    /// The best chromosome under the population's objective.
    pub fn fittest(&self) -> &C {
        &self.chromosomes[self.objective.rank_index(self.size(), 0)]
    }

    /// The worst chromosome under the population's objective.
    pub fn least_fit(&self) -> &C {
        &self.chromosomes[self.objective.rank_index(self.size(), self.size() - 1)]
    }

    pub fn min_fitness(&self) -> f64 {
        self.chromosomes[0].fitness()
    }

    pub fn max_fitness(&self) -> f64 {
        self.chromosomes[self.size() - 1].fitness()
    }

    /// The best fitness under the population's objective.
    pub fn best_fitness(&self) -> f64 {
        self.fittest().fitness()
    }

    pub fn average_fitness(&self) -> f64 {
        self.chromosomes.iter().map(|c| c.fitness()).sum::<f64>() / self.size() as f64
    }

    /// Fitness values in list order (ascending).
    pub fn fitness_values(&self) -> Vec<f64> {
        self.chromosomes.iter().map(|c| c.fitness()).collect()
    }

    /// Captures the current generation as an immutable snapshot.
    ///
    /// # Arguments
    ///
    /// * `generation` - The generation index stamped on the snapshot.
    /// * `include_chromosomes` - Whether to copy the full sorted chromosome list.
    pub fn snapshot(&self, generation: usize, include_chromosomes: bool) -> Snapshot<C> {
        debug!(population = %self.id, generation, "Taking snapshot");
        Snapshot {
            population_id: self.id.clone(),
            generation,
            min_fitness: self.min_fitness(),
            max_fitness: self.max_fitness(),
            average_fitness: self.average_fitness(),
            fittest: self.fittest().clone(),
            least_fit: self.least_fit().clone(),
            chromosomes: include_chromosomes.then(|| self.chromosomes.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::chromosome::tests::Bits;
    use crate::chromosome::{is_sorted_by_fitness, Chromosome};
    use crate::crossover::OnePointCrossover;
    use crate::error::{GeneticError, Result};
    use crate::evolution::{EvolutionStrategy, Operators};
    use crate::mutation::BitFlipMutation;
    use crate::objective::Objective;
    use crate::population::{GeneticRates, Population, PopulationBuilder};
    use crate::rng::RandomNumberGenerator;
    use crate::selection::TournamentSelection;

    fn bits_population(objective: Objective, seed: u64) -> Population<Bits> {
        PopulationBuilder::new()
            .with_id("bits")
            .with_size(40)
            .with_objective(objective)
            .with_rates(GeneticRates::new(0.05, 0.7, 0.1).unwrap())
            .with_selection(TournamentSelection::default())
            .with_crossover(OnePointCrossover)
            .with_mutation(BitFlipMutation)
            .with_seed(seed)
            .with_generator(|rng| Bits::new((0..10).map(|_| rng.index(2) as u8).collect()))
            .build()
            .unwrap()
    }

    #[test]
    fn test_size_and_order_invariants() {
        for objective in [Objective::Maximize, Objective::Minimize] {
            let mut population = bits_population(objective, 5);
            assert!(is_sorted_by_fitness(population.chromosomes()));

            for _ in 0..25 {
                population.evolve().unwrap();
                assert_eq!(population.size(), 40);
                assert!(is_sorted_by_fitness(population.chromosomes()));
            }
        }
    }

    #[test]
    fn test_best_fitness_never_worsens() {
        let mut population = bits_population(Objective::Maximize, 9);
        let mut best = population.best_fitness();
        for _ in 0..30 {
            population.evolve().unwrap();
            assert!(population.best_fitness() >= best);
            best = population.best_fitness();
        }

        let mut population = bits_population(Objective::Minimize, 9);
        let mut best = population.best_fitness();
        for _ in 0..30 {
            population.evolve().unwrap();
            assert!(population.best_fitness() <= best);
            best = population.best_fitness();
        }
    }

    #[test]
    fn test_elites_carried_over() {
        let mut population = bits_population(Objective::Minimize, 12);
        for _ in 0..10 {
            let elites: Vec<Bits> = population.chromosomes()[..4].to_vec();
            population.evolve().unwrap();
            for elite in &elites {
                assert!(population.chromosomes().contains(elite));
            }
        }
    }

    #[test]
    fn test_aggregates() {
        let population = bits_population(Objective::Minimize, 1);
        let values = population.fitness_values();

        assert_eq!(population.min_fitness(), values[0]);
        assert_eq!(population.max_fitness(), values[39]);
        assert_eq!(population.fittest().fitness(), population.min_fitness());
        assert_eq!(population.least_fit().fitness(), population.max_fitness());
        let average = values.iter().sum::<f64>() / 40.0;
        assert!((population.average_fitness() - average).abs() < 1e-12);

        let snapshot = population.snapshot(7, true);
        assert_eq!(snapshot.population_id, "bits");
        assert_eq!(snapshot.generation, 7);
        assert_eq!(snapshot.chromosomes.as_ref().map(Vec::len), Some(40));
        assert!(population.snapshot(7, false).chromosomes.is_none());
    }

    #[derive(Debug)]
    struct Shrinking;

    impl EvolutionStrategy<Bits> for Shrinking {
        fn evolve(
            &self,
            current: &[Bits],
            _operators: &Operators<'_, Bits>,
            _rates: &GeneticRates,
            _objective: Objective,
            _rng: &mut RandomNumberGenerator,
        ) -> Result<Vec<Bits>> {
            Ok(current[1..].to_vec())
        }
    }

    #[test]
    fn test_wrong_size_generation_is_rejected() {
        let mut population = PopulationBuilder::new()
            .with_chromosomes(vec![
                Bits::from_bits("01"),
                Bits::from_bits("11"),
                Bits::from_bits("00"),
            ])
            .with_selection(TournamentSelection::default())
            .with_crossover(OnePointCrossover)
            .with_mutation(BitFlipMutation)
            .with_evolution(Shrinking)
            .build()
            .unwrap();
        let before = population.fitness_values();

        match population.evolve() {
            Err(GeneticError::StrategyContractViolation(_)) => (),
            other => panic!("Expected StrategyContractViolation, got {:?}", other),
        }
        // The failed generation was not applied
        assert_eq!(population.fitness_values(), before);
        assert_eq!(before, vec![0.0, 1.0, 2.0]);
    }
}
