//! # Mutation Strategies
//!
//! A mutation strategy perturbs a chromosome's encoding at a given rate and
//! returns a new chromosome. The input is never modified.
pub mod bit_flip;
pub mod mutation_strategy;
pub mod swap;

pub use bit_flip::BitFlipMutation;
pub use mutation_strategy::{checked_mutate, MutationStrategy};
pub use swap::{SwapMutation, SwapTarget};
