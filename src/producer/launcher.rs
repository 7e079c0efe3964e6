//! Multi-population launcher.
//!
//! ```rust
//! use std::time::Duration;
//! use genetic_engine::population::PopulationBuilder;
//! use genetic_engine::producer::{snapshot_channel, ProducerLauncher, ProducerOptions};
//! use genetic_engine::registry::{CrossoverKind, MutationKind, SelectionKind};
//! # use genetic_engine::chromosome::Chromosome;
//! # use genetic_engine::error::Result;
//! # #[derive(Clone, Debug)]
//! # struct Ones(Vec<u8>);
//! # impl Chromosome for Ones {
//! #     type Gene = u8;
//! #     fn genes(&self) -> &[u8] { &self.0 }
//! #     fn fitness(&self) -> f64 { self.0.iter().map(|&g| g as f64).sum() }
//! #     fn create_child(&self, genes: Vec<u8>) -> Result<Self> { Ok(Ones(genes)) }
//! # }
//! # let build = |id: &str| PopulationBuilder::new()
//! #     .with_id(id)
//! #     .with_size(10)
//! #     .with_selection_kind(SelectionKind::Tournament(2))
//! #     .with_crossover_kind(CrossoverKind::OnePoint)
//! #     .with_mutation_kind(MutationKind::BitFlip)
//! #     .with_generator(|rng| Ok(Ones((0..6).map(|_| rng.index(2) as u8).collect())))
//! #     .build()
//! #     .unwrap();
//!
//! let (sender, receiver) = snapshot_channel(64);
//! let running = ProducerLauncher::new(ProducerOptions::new(20, Some(6.0)))
//!     .with_stagger(Duration::from_millis(5))
//!     .add(build("a"))
//!     .add(build("b"))
//!     .launch(Some(sender))
//!     .unwrap();
//!
//! let consumer = std::thread::spawn(move || receiver.iter().count());
//! for (id, result) in running.join() {
//!     assert!(result.is_ok(), "population {} failed", id);
//! }
//! assert!(consumer.join().unwrap() >= 2);
//! ```

use std::any::Any;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, info};

use crate::chromosome::Chromosome;
use crate::error::{GeneticError, Result};
use crate::population::Population;

use super::cancellation::CancellationToken;
use super::channel::SnapshotSender;
use super::options::ProducerOptions;
use super::producer::{GenerationProducer, ProducerReport};

/// Starts one producer thread per population.
///
/// All producers share one cancellation token and, when a sender is given,
/// publish onto one fan-in channel. Snapshots carry their population id, and
/// each population's snapshots arrive in generation order.
#[derive(Debug)]
pub struct ProducerLauncher<C>
where
    C: Chromosome,
{
    options: ProducerOptions,
    stagger: Duration,
    cancellation: CancellationToken,
    populations: Vec<(Population<C>, Option<ProducerOptions>)>,
}

impl<C> ProducerLauncher<C>
where
    C: Chromosome,
{
    /// Creates a launcher whose producers use `options` unless overridden.
    pub fn new(options: ProducerOptions) -> Self {
        Self {
            options,
            stagger: Duration::ZERO,
            cancellation: CancellationToken::new(),
            populations: Vec::new(),
        }
    }

    /// Delay between consecutive producer starts.
    pub fn with_stagger(mut self, stagger: Duration) -> Self {
        self.stagger = stagger;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Adds a population run with the launcher's options.
    pub fn add(mut self, population: Population<C>) -> Self {
        self.populations.push((population, None));
        self
    }

    /// Adds a population run with its own options.
    pub fn add_with_options(mut self, population: Population<C>, options: ProducerOptions) -> Self {
        self.populations.push((population, Some(options)));
        self
    }

    /// Starts every producer, waiting `stagger` between starts. Cancellation
    /// cuts the wait short; producers started after it end as `Cancelled`.
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if no population was added, and `Other` if a
    /// thread cannot be spawned. Producers already started are cancelled in
    /// that case.
    pub fn launch(self, sender: Option<SnapshotSender<C>>) -> Result<RunningProducers<C>> {
        if self.populations.is_empty() {
            return Err(GeneticError::Configuration(
                "At least one population is required".to_string(),
            ));
        }

        let count = self.populations.len();
        let mut handles = Vec::with_capacity(count);

        for (index, (population, options)) in self.populations.into_iter().enumerate() {
            if index > 0 && !self.stagger.is_zero() {
                self.cancellation.wait_timeout(self.stagger);
            }

            let id = population.id().to_string();
            let mut producer =
                GenerationProducer::new(population, options.unwrap_or_else(|| self.options.clone()))
                    .with_cancellation(self.cancellation.clone());
            if let Some(sender) = &sender {
                producer = producer.with_sender(sender.clone());
            }

            let spawned = thread::Builder::new()
                .name(format!("producer-{}", id))
                .spawn(move || producer.run());

            match spawned {
                Ok(handle) => {
                    debug!(population = %id, "Producer thread started");
                    handles.push((id, handle));
                }
                Err(e) => {
                    self.cancellation.cancel();
                    return Err(GeneticError::Other(format!(
                        "Failed to spawn producer thread for '{}': {}",
                        id, e
                    )));
                }
            }
        }

        info!(producers = count, "Producers launched");

        Ok(RunningProducers {
            handles,
            cancellation: self.cancellation,
        })
    }
}

/// Handles to launched producers.
#[derive(Debug)]
pub struct RunningProducers<C>
where
    C: Chromosome,
{
    handles: Vec<(String, JoinHandle<Result<ProducerReport<C>>>)>,
    cancellation: CancellationToken,
}

impl<C> RunningProducers<C>
where
    C: Chromosome,
{
    /// Asks every producer to stop after its current generation.
    pub fn cancel(&self) {
        info!(producers = self.handles.len(), "Cancelling producers");
        self.cancellation.cancel();
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation.clone()
    }

    pub fn population_ids(&self) -> Vec<&str> {
        self.handles.iter().map(|(id, _)| id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Waits for every producer, in launch order.
    ///
    /// A producer that failed or panicked yields an error for its own
    /// population only.
    pub fn join(self) -> Vec<(String, Result<ProducerReport<C>>)> {
        self.handles
            .into_iter()
            .map(|(id, handle)| {
                let result = handle.join().unwrap_or_else(|payload| {
                    Err(GeneticError::ProducerPanicked(panic_message(payload)))
                });
                (id, result)
            })
            .collect()
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chromosome::tests::Bits;
    use crate::crossover::OnePointCrossover;
    use crate::mutation::{BitFlipMutation, MutationStrategy};
    use crate::population::PopulationBuilder;
    use crate::producer::channel::snapshot_channel;
    use crate::producer::producer::ProducerState;
    use crate::rng::RandomNumberGenerator;
    use crate::selection::TournamentSelection;

    fn population(id: &str, seed: u64) -> Population<Bits> {
        PopulationBuilder::new()
            .with_id(id)
            .with_size(20)
            .with_selection(TournamentSelection::default())
            .with_crossover(OnePointCrossover)
            .with_mutation(BitFlipMutation)
            .with_seed(seed)
            .with_generator(|rng| Bits::new((0..16).map(|_| rng.index(2) as u8).collect()))
            .build()
            .unwrap()
    }

    #[derive(Debug)]
    struct Exploding;

    impl MutationStrategy<Bits> for Exploding {
        fn mutate(&self, _: &Bits, _: f64, _: &mut RandomNumberGenerator) -> Result<Bits> {
            panic!("mutation exploded");
        }
    }

    #[test]
    fn test_snapshots_ordered_per_population() {
        let (sender, receiver) = snapshot_channel(8);
        let running = ProducerLauncher::new(ProducerOptions::new(15, None))
            .add(population("a", 1))
            .add(population("b", 2))
            .add(population("c", 3))
            .with_stagger(Duration::from_millis(1))
            .launch(Some(sender))
            .unwrap();
        assert_eq!(running.population_ids(), vec!["a", "b", "c"]);

        // Block is not configured, so drain concurrently to observe most snapshots
        let consumer = thread::spawn(move || {
            let mut last: std::collections::HashMap<String, usize> = Default::default();
            for snapshot in receiver.iter() {
                if let Some(&previous) = last.get(&snapshot.population_id) {
                    assert!(snapshot.generation > previous);
                }
                last.insert(snapshot.population_id.clone(), snapshot.generation);
            }
            last.len()
        });

        let results = running.join();
        assert_eq!(results.len(), 3);
        for (_, result) in &results {
            assert!(result.is_ok());
        }
        assert!(consumer.join().unwrap() >= 1);
    }

    #[test]
    fn test_panic_is_isolated() {
        let broken = PopulationBuilder::new()
            .with_id("broken")
            .with_chromosomes(vec![Bits::from_bits("01"), Bits::from_bits("10")])
            .with_selection(TournamentSelection::default())
            .with_crossover(OnePointCrossover)
            .with_mutation(Exploding)
            .with_elitism_rate(0.0)
            .build()
            .unwrap();

        let running = ProducerLauncher::new(ProducerOptions::new(5, None))
            .add(broken)
            .add(population("healthy", 4))
            .launch(None)
            .unwrap();

        let results = running.join();
        match &results[0] {
            (id, Err(GeneticError::ProducerPanicked(message))) => {
                assert_eq!(id, "broken");
                assert!(message.contains("exploded"));
            }
            other => panic!("Expected a panic report, got {:?}", other.0),
        }
        let healthy = results[1].1.as_ref().unwrap();
        assert_eq!(healthy.generation, 5);
    }

    #[test]
    fn test_cancel_stops_all() {
        let token = CancellationToken::new();
        token.cancel();

        let running = ProducerLauncher::new(ProducerOptions::new(1_000_000, None))
            .with_cancellation(token)
            .add(population("x", 5))
            .add(population("y", 6))
            .launch(None)
            .unwrap();

        for (_, result) in running.join() {
            assert_eq!(result.unwrap().state, ProducerState::Cancelled);
        }
    }

    #[test]
    fn test_cancel_cuts_stagger_short() {
        let token = CancellationToken::new();
        token.cancel();

        let start = std::time::Instant::now();
        let running = ProducerLauncher::new(ProducerOptions::new(10, None))
            .with_cancellation(token)
            .with_stagger(Duration::from_secs(60))
            .add(population("p", 7))
            .add(population("q", 8))
            .add(population("r", 9))
            .launch(None)
            .unwrap();
        assert!(start.elapsed() < Duration::from_secs(30));

        for (_, result) in running.join() {
            assert_eq!(result.unwrap().state, ProducerState::Cancelled);
        }
    }

    #[test]
    fn test_launch_requires_population() {
        let result = ProducerLauncher::<Bits>::new(ProducerOptions::default()).launch(None);
        assert!(matches!(result, Err(GeneticError::Configuration(_))));
    }
}
