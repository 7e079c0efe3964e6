//! # Parameter Sweep
//!
//! Estimates how fast a problem converges across a grid of mutation and
//! crossover rates. Every grid point runs `runs` independent, headless
//! populations until the target fitness or the generation cap and records the
//! generation at which each run stopped. Runs share nothing, so the grid is
//! spread over rayon's thread pool without locking.

use std::marker::PhantomData;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::chromosome::Chromosome;
use crate::error::{GeneticError, Result};
use crate::population::{GeneticRates, Population};

use super::cancellation::CancellationToken;
use super::options::ProducerOptions;
use super::producer::{GenerationProducer, ProducerState, StopReason};

/// Grid and stopping parameters of a sweep.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SweepOptions {
    /// Inclusive mutation rate range.
    pub mutation_range: (f64, f64),
    /// Inclusive crossover rate range.
    pub crossover_range: (f64, f64),
    /// Number of evenly spaced values per range.
    pub steps: usize,
    /// Independent runs per grid point.
    pub runs: usize,
    pub max_generations: usize,
    pub target_fitness: f64,
    /// Base seed; every run derives its own seed from it.
    pub seed: u64,
    /// Worker threads. `None` uses rayon's global pool.
    pub threads: Option<usize>,
}

impl SweepOptions {
    /// Checks the grid.
    ///
    /// # Errors
    ///
    /// `InvalidRate` for a range bound outside `[0, 1)`; `Configuration` for a
    /// reversed range or zero steps or runs.
    pub fn validate(&self) -> Result<()> {
        if self.steps == 0 || self.runs == 0 {
            return Err(GeneticError::Configuration(
                "Sweep steps and runs must be at least 1".to_string(),
            ));
        }
        for (name, (start, end)) in [
            ("mutation", self.mutation_range),
            ("crossover", self.crossover_range),
        ] {
            for value in [start, end] {
                if !(value.is_finite() && (0.0..1.0).contains(&value)) {
                    return Err(GeneticError::InvalidRate { name, value });
                }
            }
            if start > end {
                return Err(GeneticError::Configuration(format!(
                    "Sweep {} range is reversed: {} > {}",
                    name, start, end
                )));
            }
        }
        Ok(())
    }

    /// The `steps` evenly spaced values of an inclusive range.
    fn values(&self, (start, end): (f64, f64)) -> Vec<f64> {
        if self.steps == 1 {
            return vec![start];
        }
        let step = (end - start) / (self.steps - 1) as f64;
        (0..self.steps).map(|i| start + step * i as f64).collect()
    }
}

impl Default for SweepOptions {
    fn default() -> Self {
        Self {
            mutation_range: (0.0, 0.5),
            crossover_range: (0.0, 0.9),
            steps: 10,
            runs: 10,
            max_generations: 500,
            target_fitness: 0.0,
            seed: 0,
            threads: None,
        }
    }
}

/// Averaged result of one grid point.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SweepPoint {
    pub mutation_rate: f64,
    pub crossover_rate: f64,
    /// Mean stopping generation; runs that missed the target count as the cap.
    pub average_generations: f64,
    /// Runs that reached the target fitness.
    pub target_hits: usize,
}

/// Runs a mutation × crossover grid in parallel.
///
/// The factory builds one population for a given mutation rate, crossover
/// rate and seed. It is called concurrently from worker threads.
pub struct ParameterSweep<C, F>
where
    C: Chromosome,
    F: Fn(GeneticRates, u64) -> Result<Population<C>> + Send + Sync,
{
    options: SweepOptions,
    elitism_rate: f64,
    factory: F,
    cancellation: CancellationToken,
    _marker: PhantomData<fn() -> C>,
}

impl<C, F> ParameterSweep<C, F>
where
    C: Chromosome,
    F: Fn(GeneticRates, u64) -> Result<Population<C>> + Send + Sync,
{
    /// Creates a sweep.
    ///
    /// # Arguments
    ///
    /// * `options` - The grid and stopping parameters.
    /// * `elitism_rate` - Elitism rate shared by every run.
    /// * `factory` - Builds a population from the rates and seed of one run.
    ///
    /// # Errors
    ///
    /// Returns the errors of `SweepOptions::validate`, and `InvalidRate` for
    /// an elitism rate outside `[0, 1)`.
    pub fn new(options: SweepOptions, elitism_rate: f64, factory: F) -> Result<Self> {
        options.validate()?;
        GeneticRates::new(0.0, 0.0, elitism_rate)?;

        Ok(Self {
            options,
            elitism_rate,
            factory,
            cancellation: CancellationToken::new(),
            _marker: PhantomData,
        })
    }

    /// Observes `token`; a cancelled sweep finishes its in-flight generations
    /// and reports what it has.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    pub fn options(&self) -> &SweepOptions {
        &self.options
    }

    /// Runs the sweep.
    ///
    /// # Returns
    ///
    /// One `SweepPoint` per grid point, sorted by mutation rate, then
    /// crossover rate.
    ///
    /// # Errors
    ///
    /// Propagates the first factory or producer error, and returns
    /// `Configuration` if a dedicated thread pool cannot be built.
    pub fn run(&self) -> Result<Vec<SweepPoint>> {
        let mutation_rates = self.options.values(self.options.mutation_range);
        let crossover_rates = self.options.values(self.options.crossover_range);

        let grid: Vec<(usize, f64, f64)> = mutation_rates
            .iter()
            .flat_map(|&m| crossover_rates.iter().map(move |&c| (m, c)))
            .enumerate()
            .map(|(index, (m, c))| (index, m, c))
            .collect();

        info!(
            points = grid.len(),
            runs = self.options.runs,
            "Starting parameter sweep"
        );

        let evaluate = || -> Result<Vec<SweepPoint>> {
            grid.par_iter()
                .map(|&(index, m, c)| self.evaluate_point(index, m, c))
                .collect()
        };

        let mut points = match self.options.threads {
            Some(threads) => rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|e| {
                    GeneticError::Configuration(format!("Failed to build thread pool: {}", e))
                })?
                .install(evaluate)?,
            None => evaluate()?,
        };

        points.sort_by(|a, b| {
            a.mutation_rate
                .total_cmp(&b.mutation_rate)
                .then(a.crossover_rate.total_cmp(&b.crossover_rate))
        });

        info!(points = points.len(), "Parameter sweep finished");
        Ok(points)
    }

    fn evaluate_point(
        &self,
        index: usize,
        mutation_rate: f64,
        crossover_rate: f64,
    ) -> Result<SweepPoint> {
        let rates = GeneticRates::new(mutation_rate, crossover_rate, self.elitism_rate)?;
        let options = ProducerOptions::new(
            self.options.max_generations,
            Some(self.options.target_fitness),
        );

        let mut total_generations = 0usize;
        let mut target_hits = 0usize;
        for run in 0..self.options.runs {
            let seed = self
                .options
                .seed
                .wrapping_add((index * self.options.runs + run) as u64);
            let population = (self.factory)(rates, seed)?;

            let report = GenerationProducer::new(population, options.clone())
                .with_cancellation(self.cancellation.clone())
                .run()?;

            total_generations += report.generation;
            if report.state == ProducerState::Stopped(StopReason::TargetFitnessReached) {
                target_hits += 1;
            }
        }

        let average_generations = total_generations as f64 / self.options.runs as f64;
        debug!(
            mutation_rate,
            crossover_rate,
            average_generations,
            target_hits,
            "Sweep point evaluated"
        );

        Ok(SweepPoint {
            mutation_rate,
            crossover_rate,
            average_generations,
            target_hits,
        })
    }
}
