use crate::error::{GeneticError, Result};

/// Mutation, crossover and elitism rates of a population.
///
/// Every rate is a probability in `[0, 1)`. Rates are checked when built and
/// never again during evolution.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneticRates {
    mutation: f64,
    crossover: f64,
    elitism: f64,
}

impl GeneticRates {
    /// Creates a validated set of rates.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRate` naming the first rate that is not a finite value in `[0, 1)`.
    pub fn new(mutation: f64, crossover: f64, elitism: f64) -> Result<Self> {
        let rates = Self {
            mutation,
            crossover,
            elitism,
        };
        rates.validate()?;
        Ok(rates)
    }

    /// Checks every rate. Useful after deserializing.
    pub fn validate(&self) -> Result<()> {
        check("mutation", self.mutation)?;
        check("crossover", self.crossover)?;
        check("elitism", self.elitism)
    }

    pub fn mutation(&self) -> f64 {
        self.mutation
    }

    pub fn crossover(&self) -> f64 {
        self.crossover
    }

    pub fn elitism(&self) -> f64 {
        self.elitism
    }

    /// Number of elite chromosomes in a generation of `size`: `floor(elitism × size)`.
    pub fn elite_count(&self, size: usize) -> usize {
        (self.elitism * size as f64).floor() as usize
    }
}

fn check(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && (0.0..1.0).contains(&value) {
        Ok(())
    } else {
        Err(GeneticError::InvalidRate { name, value })
    }
}

impl Default for GeneticRates {
    fn default() -> Self {
        Self {
            mutation: 0.05,
            crossover: 0.7,
            elitism: 0.1,
        }
    }
}
