//! A generational genetic algorithm engine.
//!
//! Problems plug in by implementing [`Chromosome`]. A [`Population`] evolves
//! its chromosomes with pluggable selection, crossover, mutation and evolution
//! strategies, and a [`GenerationProducer`] drives it through generations while
//! publishing a [`Snapshot`] of each one on a bounded channel.

pub mod chromosome;
pub mod crossover;
pub mod error;
pub mod evolution;
pub mod mutation;
pub mod objective;
pub mod population;
pub mod producer;
pub mod registry;
pub mod rng;
pub mod selection;

// Re-export commonly used types for convenience
pub use chromosome::{Chromosome, Gene};
pub use crossover::{CrossoverStrategy, OnePointCrossover, OrderCrossover, TwoPointCrossover};
pub use error::{GeneticError, OptionExt, Result};
pub use evolution::{EvolutionStrategy, GenerationalEvolution, Replication, ReplicatingEvolution};
pub use mutation::{BitFlipMutation, MutationStrategy, SwapMutation};
pub use objective::Objective;
pub use population::{GeneticRates, Population, PopulationBuilder};
pub use producer::{
    snapshot_channel, Backpressure, CancellationToken, GenerationProducer, ParameterSweep,
    ProducerLauncher, ProducerOptions, ProducerReport, ProducerState, Snapshot, StopReason,
    SweepOptions, SweepPoint,
};
pub use registry::{CrossoverKind, EvolutionKind, MutationKind, SelectionKind};
pub use rng::RandomNumberGenerator;
pub use selection::{
    RandomSelection, RouletteWheelSelection, SelectionStrategy, TournamentSelection,
};
