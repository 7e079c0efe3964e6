use tracing::{debug, info, warn};

use crate::chromosome::Chromosome;
use crate::error::{GeneticError, Result};
use crate::population::Population;

use super::cancellation::CancellationToken;
use super::channel::SnapshotSender;
use super::options::{Backpressure, ProducerOptions};

/// Why a producer stopped on its own.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    MaxGenerationsReached,
    TargetFitnessReached,
}

/// Lifecycle of a producer.
///
/// `Idle → Running → {Stopped(reason), Cancelled}`. A producer whose channel
/// is closed by the consumer ends as `Cancelled`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProducerState {
    Idle,
    Running,
    Stopped(StopReason),
    Cancelled,
}

impl ProducerState {
    /// Returns `true` for `Stopped` and `Cancelled`.
    pub fn is_finished(&self) -> bool {
        matches!(self, ProducerState::Stopped(_) | ProducerState::Cancelled)
    }
}

/// Outcome of a producer run.
#[derive(Debug)]
pub struct ProducerReport<C>
where
    C: Chromosome,
{
    /// Final state; never `Idle` or `Running`.
    pub state: ProducerState,
    /// Index of the last generation reached.
    pub generation: usize,
    /// Snapshots accepted by the channel.
    pub published: usize,
    /// Snapshots discarded because the channel was full.
    pub dropped: usize,
    /// The population in its final generation.
    pub population: Population<C>,
}

/// Drives one population from generation 0 until a stop condition holds or
/// cancellation is observed, publishing a snapshot per generation.
///
/// Without a sender the producer runs headless and only the report is
/// returned.
///
/// # Example
///
/// ```rust
/// use genetic_engine::population::PopulationBuilder;
/// use genetic_engine::producer::{
///     snapshot_channel, GenerationProducer, ProducerOptions, ProducerState, StopReason,
/// };
/// use genetic_engine::registry::{CrossoverKind, MutationKind, SelectionKind};
/// # use genetic_engine::chromosome::Chromosome;
/// # use genetic_engine::error::Result;
/// # #[derive(Clone, Debug)]
/// # struct Ones(Vec<u8>);
/// # impl Chromosome for Ones {
/// #     type Gene = u8;
/// #     fn genes(&self) -> &[u8] { &self.0 }
/// #     fn fitness(&self) -> f64 { self.0.iter().map(|&g| g as f64).sum() }
/// #     fn create_child(&self, genes: Vec<u8>) -> Result<Self> { Ok(Ones(genes)) }
/// # }
///
/// let population = PopulationBuilder::new()
///     .with_size(10)
///     .with_selection_kind(SelectionKind::Roulette)
///     .with_crossover_kind(CrossoverKind::OnePoint)
///     .with_mutation_kind(MutationKind::BitFlip)
///     .with_generator(|rng| Ok(Ones((0..4).map(|_| rng.index(2) as u8).collect())))
///     .build()
///     .unwrap();
///
/// let (sender, receiver) = snapshot_channel(16);
/// let report = GenerationProducer::new(population, ProducerOptions::new(5, None))
///     .with_sender(sender)
///     .run()
///     .unwrap();
///
/// assert_eq!(report.state, ProducerState::Stopped(StopReason::MaxGenerationsReached));
/// let generations: Vec<usize> = receiver.iter().map(|s| s.generation).collect();
/// assert_eq!(generations, vec![0, 1, 2, 3, 4, 5]);
/// ```
#[derive(Debug)]
pub struct GenerationProducer<C>
where
    C: Chromosome,
{
    population: Population<C>,
    options: ProducerOptions,
    sender: Option<SnapshotSender<C>>,
    cancellation: CancellationToken,
    state: ProducerState,
    generation: usize,
    published: usize,
    dropped: usize,
}

impl<C> GenerationProducer<C>
where
    C: Chromosome,
{
    pub fn new(population: Population<C>, options: ProducerOptions) -> Self {
        Self {
            population,
            options,
            sender: None,
            cancellation: CancellationToken::new(),
            state: ProducerState::Idle,
            generation: 0,
            published: 0,
            dropped: 0,
        }
    }

    /// Publishes snapshots on `sender`.
    pub fn with_sender(mut self, sender: SnapshotSender<C>) -> Self {
        self.sender = Some(sender);
        self
    }

    /// Observes `token` instead of a private one.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// A handle that cancels this producer.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation.clone()
    }

    pub fn state(&self) -> ProducerState {
        self.state
    }

    pub fn population(&self) -> &Population<C> {
        &self.population
    }

    /// Runs the producer to completion on the calling thread.
    ///
    /// # Errors
    ///
    /// Propagates any error from `Population::evolve`. The population is
    /// dropped along with the failed run.
    pub fn run(mut self) -> Result<ProducerReport<C>> {
        if self.cancellation.is_cancelled() {
            self.state = ProducerState::Cancelled;
            info!(population = %self.population.id(), "Producer cancelled before start");
            return Ok(self.into_report());
        }

        self.state = ProducerState::Running;
        info!(
            population = %self.population.id(),
            max_generations = self.options.get_max_generations(),
            target_fitness = ?self.options.get_target_fitness(),
            "Producer started"
        );

        if self.publish() {
            loop {
                if let Some(reason) = self.stop_reason() {
                    self.state = ProducerState::Stopped(reason);
                    break;
                }
                if self.cancellation.is_cancelled() {
                    self.state = ProducerState::Cancelled;
                    break;
                }

                if let Err(e) = self.population.evolve() {
                    warn!(
                        population = %self.population.id(),
                        generation = self.generation,
                        error = %e,
                        "Producer aborted"
                    );
                    return Err(e);
                }
                self.generation += 1;

                if !self.publish() {
                    break;
                }
            }
        }

        info!(
            population = %self.population.id(),
            state = ?self.state,
            generation = self.generation,
            best_fitness = self.population.best_fitness(),
            published = self.published,
            dropped = self.dropped,
            "Producer finished"
        );

        Ok(self.into_report())
    }

    fn stop_reason(&self) -> Option<StopReason> {
        if let Some(target) = self.options.get_target_fitness() {
            if self
                .population
                .objective()
                .reached(self.population.best_fitness(), target)
            {
                return Some(StopReason::TargetFitnessReached);
            }
        }
        if self.generation >= self.options.get_max_generations() {
            return Some(StopReason::MaxGenerationsReached);
        }
        None
    }

    /// Publishes the current generation. Returns `false` if the producer must
    /// stop because it was cancelled while waiting or the channel is closed.
    fn publish(&mut self) -> bool {
        let Some(sender) = &self.sender else {
            return true;
        };

        let snapshot = self
            .population
            .snapshot(self.generation, self.options.get_include_chromosomes());

        let outcome = match self.options.get_backpressure() {
            Backpressure::Drop => sender.try_publish(snapshot).map(|_| true),
            Backpressure::Block => sender.publish_unless_cancelled(snapshot, &self.cancellation),
        };

        match outcome {
            Ok(true) => {
                self.published += 1;
                true
            }
            Ok(false) => {
                self.state = ProducerState::Cancelled;
                false
            }
            Err(GeneticError::ChannelFull) => {
                self.dropped += 1;
                debug!(
                    population = %self.population.id(),
                    generation = self.generation,
                    "Snapshot dropped, channel full"
                );
                true
            }
            Err(e) => {
                warn!(
                    population = %self.population.id(),
                    generation = self.generation,
                    error = %e,
                    "Snapshot channel closed, stopping producer"
                );
                self.state = ProducerState::Cancelled;
                false
            }
        }
    }

    fn into_report(self) -> ProducerReport<C> {
        ProducerReport {
            state: self.state,
            generation: self.generation,
            published: self.published,
            dropped: self.dropped,
            population: self.population,
        }
    }
}
