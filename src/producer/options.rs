//! # ProducerOptions
//!
//! Configuration of a `GenerationProducer`: when to stop, and what to do when
//! the snapshot channel is full.
//!
//! ## Example
//!
//! ```rust
//! use genetic_engine::producer::{Backpressure, ProducerOptions};
//!
//! let options = ProducerOptions::builder()
//!     .max_generations(500)
//!     .target_fitness(10.0)
//!     .backpressure(Backpressure::Block)
//!     .build();
//!
//! assert_eq!(options.get_max_generations(), 500);
//! assert_eq!(options.get_target_fitness(), Some(10.0));
//! ```

/// What a producer does with a snapshot when the channel is full.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backpressure {
    /// Discard the snapshot and keep evolving. Monitoring is lossy.
    #[default]
    Drop,
    /// Wait until the consumer makes room. Every generation is observed.
    Block,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ProducerOptions {
    max_generations: usize,
    target_fitness: Option<f64>,
    backpressure: Backpressure,
    include_chromosomes: bool,
}

impl ProducerOptions {
    /// Creates options with the given generation cap and optional target fitness.
    pub fn new(max_generations: usize, target_fitness: Option<f64>) -> Self {
        Self {
            max_generations,
            target_fitness,
            ..Self::default()
        }
    }

    pub fn get_max_generations(&self) -> usize {
        self.max_generations
    }

    pub fn get_target_fitness(&self) -> Option<f64> {
        self.target_fitness
    }

    pub fn get_backpressure(&self) -> Backpressure {
        self.backpressure
    }

    /// Whether snapshots carry the full sorted chromosome list.
    pub fn get_include_chromosomes(&self) -> bool {
        self.include_chromosomes
    }

    pub fn set_max_generations(&mut self, max_generations: usize) {
        self.max_generations = max_generations;
    }

    pub fn set_target_fitness(&mut self, target_fitness: Option<f64>) {
        self.target_fitness = target_fitness;
    }

    pub fn set_backpressure(&mut self, backpressure: Backpressure) {
        self.backpressure = backpressure;
    }

    pub fn set_include_chromosomes(&mut self, include_chromosomes: bool) {
        self.include_chromosomes = include_chromosomes;
    }

    /// Returns a builder for creating a `ProducerOptions` instance.
    pub fn builder() -> ProducerOptionsBuilder {
        ProducerOptionsBuilder::default()
    }
}

impl Default for ProducerOptions {
    fn default() -> Self {
        Self {
            max_generations: 100,
            target_fitness: None,
            backpressure: Backpressure::Drop,
            include_chromosomes: false,
        }
    }
}

/// Builder for `ProducerOptions`.
#[derive(Debug, Clone, Default)]
pub struct ProducerOptionsBuilder {
    max_generations: Option<usize>,
    target_fitness: Option<f64>,
    backpressure: Option<Backpressure>,
    include_chromosomes: Option<bool>,
}

impl ProducerOptionsBuilder {
    /// Sets the generation cap.
    pub fn max_generations(mut self, value: usize) -> Self {
        self.max_generations = Some(value);
        self
    }

    /// Sets the fitness at which the producer stops early.
    pub fn target_fitness(mut self, value: f64) -> Self {
        self.target_fitness = Some(value);
        self
    }

    pub fn backpressure(mut self, value: Backpressure) -> Self {
        self.backpressure = Some(value);
        self
    }

    pub fn include_chromosomes(mut self, value: bool) -> Self {
        self.include_chromosomes = Some(value);
        self
    }

    /// Builds the `ProducerOptions` instance.
    pub fn build(self) -> ProducerOptions {
        let defaults = ProducerOptions::default();
        ProducerOptions {
            max_generations: self.max_generations.unwrap_or(defaults.max_generations),
            target_fitness: self.target_fitness,
            backpressure: self.backpressure.unwrap_or(defaults.backpressure),
            include_chromosomes: self
                .include_chromosomes
                .unwrap_or(defaults.include_chromosomes),
        }
    }
}
