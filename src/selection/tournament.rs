use crate::chromosome::Chromosome;
use crate::error::{GeneticError, Result};
use crate::objective::Objective;
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_strategy::SelectionStrategy;

/// A selection strategy that selects chromosomes through tournament selection.
///
/// Tournament selection samples `tournament_size` distinct chromosomes uniformly
/// without replacement and returns the best of them according to the
/// population's objective. Ties go to the participant drawn first.
///
/// Tournament selection provides a balance between exploration and exploitation:
/// - Smaller tournament sizes lead to more exploration (more random selection)
/// - Larger tournament sizes lead to more exploitation (more focus on the best chromosomes)
///
/// A tournament larger than the population uses every chromosome once.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct TournamentSelection {
    tournament_size: usize,
}

impl TournamentSelection {
    /// Creates a new TournamentSelection strategy with the specified tournament size.
    ///
    /// # Errors
    ///
    /// Returns an error if `tournament_size` is 0.
    pub fn new(tournament_size: usize) -> Result<Self> {
        if tournament_size < 1 {
            return Err(GeneticError::Configuration(
                "Tournament size must be at least 1".to_string(),
            ));
        }

        Ok(Self { tournament_size })
    }

    pub fn tournament_size(&self) -> usize {
        self.tournament_size
    }

    /// Runs a single tournament among `len` candidates and returns the index
    /// of the winner. Only the sampled candidates' fitness is read.
    pub(crate) fn run_tournament<F>(
        &self,
        len: usize,
        fitness: F,
        objective: Objective,
        rng: &mut RandomNumberGenerator,
    ) -> Result<usize>
    where
        F: Fn(usize) -> f64,
    {
        if len == 0 {
            return Err(GeneticError::EmptyPopulation);
        }

        let participants = rng.sample_distinct(len, self.tournament_size.max(1));

        let mut best_idx = participants[0];
        let mut best_fitness = fitness(best_idx);
        for &idx in &participants[1..] {
            let candidate = fitness(idx);
            if objective.is_better(candidate, best_fitness) {
                best_idx = idx;
                best_fitness = candidate;
            }
        }

        Ok(best_idx)
    }
}

impl Default for TournamentSelection {
    fn default() -> Self {
        Self { tournament_size: 2 }
    }
}

impl<C> SelectionStrategy<C> for TournamentSelection
where
    C: Chromosome,
{
    fn select(
        &self,
        chromosomes: &[C],
        objective: Objective,
        rng: &mut RandomNumberGenerator,
    ) -> Result<usize> {
        self.run_tournament(chromosomes.len(), |i| chromosomes[i].fitness(), objective, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chromosome::tests::Bits;

    fn population() -> Vec<Bits> {
        vec![
            Bits::from_bits("0000"),
            Bits::from_bits("1000"),
            Bits::from_bits("1100"),
            Bits::from_bits("1110"),
            Bits::from_bits("1111"),
        ]
    }

    #[test]
    fn test_tournament_selection() {
        let chromosomes = population();
        let mut rng = RandomNumberGenerator::from_seed(42);

        let selection = TournamentSelection::default();
        for _ in 0..50 {
            let index = selection
                .select(&chromosomes, Objective::Maximize, &mut rng)
                .unwrap();
            // The worst chromosome can never win a tournament of two distinct participants
            assert!(index > 0 && index < chromosomes.len());
        }
    }

    #[test]
    fn test_full_tournament_picks_best() {
        let chromosomes = population();
        let mut rng = RandomNumberGenerator::from_seed(7);

        // Tournament size equal to population size (equivalent to elitist selection)
        let selection = TournamentSelection::new(5).unwrap();
        assert_eq!(
            selection.select(&chromosomes, Objective::Maximize, &mut rng).unwrap(),
            4
        );
        assert_eq!(
            selection.select(&chromosomes, Objective::Minimize, &mut rng).unwrap(),
            0
        );

        // Large tournament size (greater than population size) is clamped
        let selection = TournamentSelection::new(10).unwrap();
        assert_eq!(
            selection.select(&chromosomes, Objective::Maximize, &mut rng).unwrap(),
            4
        );
    }

    #[test]
    fn test_tournament_lower_is_better() {
        let chromosomes = population();
        let mut rng = RandomNumberGenerator::from_seed(3);

        let selection = TournamentSelection::new(2).unwrap();
        for _ in 0..50 {
            let index = selection
                .select(&chromosomes, Objective::Minimize, &mut rng)
                .unwrap();
            // The best (highest) chromosome can never win when minimizing
            assert!(index < 4);
        }
    }

    #[test]
    fn test_tie_goes_to_first_drawn() {
        let fitness = vec![1.0, 1.0, 1.0];
        let selection = TournamentSelection::new(3).unwrap();

        let mut rng = RandomNumberGenerator::from_seed(11);
        let mut replay = rng.clone();

        let winner = selection
            .run_tournament(fitness.len(), |i| fitness[i], Objective::Maximize, &mut rng)
            .unwrap();
        let first_drawn = replay.sample_distinct(3, 3)[0];

        assert_eq!(winner, first_drawn);
    }

    #[test]
    fn test_reads_only_participants() {
        let reads = std::cell::RefCell::new(Vec::new());
        let selection = TournamentSelection::new(3).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(5);

        let winner = selection
            .run_tournament(
                10_000,
                |i| {
                    reads.borrow_mut().push(i);
                    i as f64
                },
                Objective::Maximize,
                &mut rng,
            )
            .unwrap();

        let reads = reads.into_inner();
        assert_eq!(reads.len(), 3);
        assert_eq!(winner, *reads.iter().max().unwrap());
    }

    #[test]
    fn test_tournament_selection_empty_population() {
        let chromosomes: Vec<Bits> = Vec::new();
        let mut rng = RandomNumberGenerator::from_seed(1);

        let selection = TournamentSelection::default();
        let result = selection.select(&chromosomes, Objective::Maximize, &mut rng);

        assert!(result.is_err());
    }

    #[test]
    fn test_tournament_selection_invalid_size() {
        // Tournament size must be at least 1
        let selection = TournamentSelection::new(0);

        assert!(selection.is_err());
    }
}
