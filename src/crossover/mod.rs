//! # Crossover Strategies
//!
//! A crossover strategy combines the encodings of two parents into zero, one or
//! two children. Parents are borrowed read-only; every child is a new chromosome
//! built through `Chromosome::create_child`.
pub mod crossover_strategy;
pub mod one_point;
pub mod order;
pub mod two_point;

pub use crossover_strategy::{checked_crossover, CrossoverStrategy};
pub use one_point::OnePointCrossover;
pub use order::OrderCrossover;
pub use two_point::TwoPointCrossover;
