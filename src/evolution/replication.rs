//! Replication schemes.
//!
//! A replicating evolution runs the generational algorithm, keeps the elite
//! chromosomes of the current generation, and refills every other slot by
//! replicating chromosomes of the offspring according to a scheme.

use tracing::trace;

use crate::chromosome::{sort_by_fitness, Chromosome};
use crate::error::{GeneticError, Result};
use crate::objective::Objective;
use crate::population::GeneticRates;
use crate::rng::RandomNumberGenerator;
use crate::selection::TournamentSelection;

use super::evolution_strategy::{EvolutionStrategy, Operators};
use super::generational::GenerationalEvolution;

/// How the non-elite slots of a generation are refilled from the offspring.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum Replication {
    /// The best `ceil(fraction × N)` offspring are each copied `copies` times,
    /// best first, cycling until every slot is filled.
    Top { fraction: f64, copies: usize },
    /// Linear rank sampling: the worst offspring has weight `2 - pressure`,
    /// the best has weight `pressure`.
    RankBased { pressure: f64 },
    /// Every slot takes the winner of a tournament among `size` offspring.
    Tournament { size: usize },
}

/// Generational evolution followed by a replication scheme.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct ReplicatingEvolution {
    replication: Replication,
    base: GenerationalEvolution,
}

impl ReplicatingEvolution {
    /// Creates a replicating evolution.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if:
    /// - `Top` has a fraction outside `(0, 1]` or zero copies
    /// - `RankBased` has a pressure outside `[1, 2]`
    /// - `Tournament` has a size of zero
    pub fn new(replication: Replication) -> Result<Self> {
        match &replication {
            Replication::Top { fraction, copies } => {
                if !(*fraction > 0.0 && *fraction <= 1.0) {
                    return Err(GeneticError::Configuration(format!(
                        "Replication fraction must be in (0, 1], got {}",
                        fraction
                    )));
                }
                if *copies == 0 {
                    return Err(GeneticError::Configuration(
                        "Replication copies must be at least 1".to_string(),
                    ));
                }
            }
            Replication::RankBased { pressure } => {
                if !(1.0..=2.0).contains(pressure) {
                    return Err(GeneticError::Configuration(
                        "Selection pressure must be in the range [1.0, 2.0]".to_string(),
                    ));
                }
            }
            Replication::Tournament { size } => {
                TournamentSelection::new(*size)?;
            }
        }

        Ok(Self {
            replication,
            base: GenerationalEvolution,
        })
    }

    /// Replicates the top 10% of the offspring ten times each.
    pub fn top() -> Self {
        Self {
            replication: Replication::Top {
                fraction: 0.1,
                copies: 10,
            },
            base: GenerationalEvolution,
        }
    }

    pub fn rank_based(pressure: f64) -> Result<Self> {
        Self::new(Replication::RankBased { pressure })
    }

    pub fn tournament(size: usize) -> Result<Self> {
        Self::new(Replication::Tournament { size })
    }

    pub fn replication(&self) -> &Replication {
        &self.replication
    }

    /// Picks `slots` indices into the sorted `offspring`.
    fn replicate(
        &self,
        offspring: &[f64],
        slots: usize,
        objective: Objective,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<usize>> {
        let size = offspring.len();
        match &self.replication {
            Replication::Top { fraction, copies } => {
                let top = ((fraction * size as f64).ceil() as usize).clamp(1, size);
                Ok((0..top)
                    .flat_map(|rank| {
                        std::iter::repeat(objective.rank_index(size, rank)).take(*copies)
                    })
                    .cycle()
                    .take(slots)
                    .collect())
            }
            Replication::RankBased { pressure } => {
                let cumulative = rank_probabilities(size, *pressure, objective);
                Ok((0..slots)
                    .map(|_| {
                        let draw = rng.uniform();
                        cumulative
                            .iter()
                            .position(|&p| draw <= p)
                            .unwrap_or(size - 1)
                    })
                    .collect())
            }
            Replication::Tournament { size: tournament_size } => {
                let tournament = TournamentSelection::new(*tournament_size)?;
                (0..slots)
                    .map(|_| {
                        tournament.run_tournament(offspring.len(), |i| offspring[i], objective, rng)
                    })
                    .collect()
            }
        }
    }
}

/// Cumulative linear-rank probabilities for a list sorted by ascending fitness.
///
/// Rank 0 is the worst chromosome under `objective` and receives
/// `(2 - s) / N`; each better rank adds `2 (s - 1) / (N (N - 1))`.
fn rank_probabilities(size: usize, pressure: f64, objective: Objective) -> Vec<f64> {
    if size == 1 {
        return vec![1.0];
    }

    let n = size as f64;
    let mut cumulative = 0.0;
    let mut probs: Vec<f64> = (0..size)
        .map(|index| {
            let rank = (size - 1 - objective.rank_index(size, index)) as f64;
            cumulative += (2.0 - pressure) / n + 2.0 * rank * (pressure - 1.0) / (n * (n - 1.0));
            cumulative
        })
        .collect();

    if let Some(last) = probs.last_mut() {
        *last = 1.0;
    }
    probs
}

impl<C> EvolutionStrategy<C> for ReplicatingEvolution
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
        let offspring = self.base.evolve(current, operators, rates, objective, rng)?;

        let size = current.len();
        let elite_count = rates.elite_count(size);
        let fitness: Vec<f64> = offspring.iter().map(|c| c.fitness()).collect();
        let picks = self.replicate(&fitness, size - elite_count, objective, rng)?;

        let mut next = Vec::with_capacity(size);
        next.extend_from_slice(&current[objective.best_range(size, elite_count)]);
        next.extend(picks.into_iter().map(|index| offspring[index].clone()));

        trace!(elite_count, scheme = ?self.replication, "Replicated offspring");

        sort_by_fitness(&mut next);
        Ok(next)
    }
}
