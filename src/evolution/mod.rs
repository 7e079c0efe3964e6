//! # Evolution Strategies
//!
//! An evolution strategy is the replacement policy of a population: given the
//! current sorted generation and the population's operators and rates, it builds
//! the next generation. `GenerationalEvolution` is the canonical algorithm;
//! `ReplicatingEvolution` reshapes its offspring with a replication scheme.
pub mod evolution_strategy;
pub mod generational;
pub mod replication;

pub use evolution_strategy::{EvolutionStrategy, Operators};
pub use generational::GenerationalEvolution;
pub use replication::{Replication, ReplicatingEvolution};
