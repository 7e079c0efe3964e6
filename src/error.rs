//! # Error Types
//!
//! This module defines the error type shared by every part of the engine.
//! Construction-time failures (`InvalidRate`, `InvalidEncoding`, `Configuration`)
//! are surfaced immediately and never retried. A `StrategyContractViolation`
//! aborts the producer of the affected population only. `ChannelFull` and
//! `ChannelClosed` are signalling conditions of the snapshot handoff and are
//! handled according to the configured backpressure policy.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use genetic_engine::error::{GeneticError, Result};
//!
//! fn validate(rate: f64) -> Result<f64> {
//!     if !(0.0..1.0).contains(&rate) {
//!         return Err(GeneticError::InvalidRate { name: "mutation", value: rate });
//!     }
//!     Ok(rate)
//! }
//!
//! assert!(validate(0.5).is_ok());
//! assert!(validate(1.0).is_err());
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use genetic_engine::error::{GeneticError, OptionExt};
//!
//! fn best(fitness: &[f64]) -> genetic_engine::error::Result<f64> {
//!     fitness
//!         .iter()
//!         .cloned()
//!         .fold(None, |acc: Option<f64>, f| Some(acc.map_or(f, |a| a.max(f))))
//!         .ok_or_else_genetic(|| GeneticError::EmptyPopulation)
//! }
//!
//! assert!(best(&[]).is_err());
//! ```

use thiserror::Error;

/// Represents errors that can occur while building or evolving populations.
#[derive(Error, Debug)]
pub enum GeneticError {
    /// A genetic rate outside of `[0, 1)` was supplied at construction.
    #[error("Invalid rate: {name} rate must be in [0, 1), got {value}")]
    InvalidRate { name: &'static str, value: f64 },

    /// A chromosome was constructed from a malformed encoding.
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),

    /// An injected strategy broke its contract, e.g. returned an out-of-range
    /// index or a child of the wrong length.
    #[error("Strategy contract violation: {0}")]
    StrategyContractViolation(String),

    /// Error that occurs when an invalid configuration is provided.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error that occurs when an empty population is encountered.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// Every receiver of the snapshot channel has been dropped.
    #[error("Snapshot channel closed")]
    ChannelClosed,

    /// The snapshot channel is at capacity.
    #[error("Snapshot channel full")]
    ChannelFull,

    /// Error that occurs when a random number generator cannot be created.
    #[error("Random generation error: {0}")]
    RandomGeneration(String),

    /// A producer thread panicked before reporting a result.
    #[error("Producer panicked: {0}")]
    ProducerPanicked(String),

    /// A generic error with a custom message.
    #[error("{0}")]
    Other(String),
}

/// A specialized Result type for engine operations.
pub type Result<T> = std::result::Result<T, GeneticError>;

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T, GeneticError>` using
    /// a closure to generate the error.
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError,
    {
        self.ok_or_else(err_fn)
    }
}
