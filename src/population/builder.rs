use tracing::info;

use crate::chromosome::{sort_by_fitness, Chromosome};
use crate::crossover::CrossoverStrategy;
use crate::error::{GeneticError, OptionExt, Result};
use crate::evolution::{EvolutionStrategy, GenerationalEvolution};
use crate::mutation::MutationStrategy;
use crate::objective::Objective;
use crate::registry::{CrossoverKind, EvolutionKind, MutationKind, SelectionKind};
use crate::rng::RandomNumberGenerator;
use crate::selection::SelectionStrategy;

use super::population::Population;
use super::rates::GeneticRates;

type Generator<C> = Box<dyn FnMut(&mut RandomNumberGenerator) -> Result<C> + Send>;

/// Builder for `Population`.
///
/// The initial generation comes either from `with_chromosomes` or from a
/// generator called `size` times with the population's own random number
/// generator, so a seeded build is reproducible.
///
/// # Example
///
/// ```rust
/// use genetic_engine::population::PopulationBuilder;
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
/// let mut population = PopulationBuilder::new()
///     .with_id("ones")
///     .with_size(20)
///     .with_mutation_rate(0.05)
///     .with_crossover_rate(0.7)
///     .with_elitism_rate(0.1)
///     .with_selection_kind(SelectionKind::Tournament(2))
///     .with_crossover_kind(CrossoverKind::OnePoint)
///     .with_mutation_kind(MutationKind::BitFlip)
///     .with_seed(42)
///     .with_generator(|rng| Ok(Ones((0..8).map(|_| rng.index(2) as u8).collect())))
///     .build()
///     .unwrap();
///
/// population.evolve().unwrap();
/// assert_eq!(population.size(), 20);
/// ```
pub struct PopulationBuilder<C>
where
    C: Chromosome,
{
    id: Option<String>,
    size: Option<usize>,
    mutation_rate: f64,
    crossover_rate: f64,
    elitism_rate: f64,
    objective: Objective,
    chromosomes: Option<Vec<C>>,
    generator: Option<Generator<C>>,
    selection: Option<Result<Box<dyn SelectionStrategy<C>>>>,
    crossover: Option<Box<dyn CrossoverStrategy<C>>>,
    mutation: Option<Box<dyn MutationStrategy<C>>>,
    evolution: Option<Result<Box<dyn EvolutionStrategy<C>>>>,
    rng: Option<RandomNumberGenerator>,
}

impl<C> PopulationBuilder<C>
where
    C: Chromosome,
{
    pub fn new() -> Self {
        let rates = GeneticRates::default();
        Self {
            id: None,
            size: None,
            mutation_rate: rates.mutation(),
            crossover_rate: rates.crossover(),
            elitism_rate: rates.elitism(),
            objective: Objective::default(),
            chromosomes: None,
            generator: None,
            selection: None,
            crossover: None,
            mutation: None,
            evolution: None,
            rng: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_rates(mut self, rates: GeneticRates) -> Self {
        self.mutation_rate = rates.mutation();
        self.crossover_rate = rates.crossover();
        self.elitism_rate = rates.elitism();
        self
    }

    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    pub fn with_elitism_rate(mut self, rate: f64) -> Self {
        self.elitism_rate = rate;
        self
    }

    pub fn with_objective(mut self, objective: Objective) -> Self {
        self.objective = objective;
        self
    }

    /// Uses the given chromosomes as the initial generation.
    pub fn with_chromosomes(mut self, chromosomes: Vec<C>) -> Self {
        self.chromosomes = Some(chromosomes);
        self
    }

    /// Builds the initial generation by calling `generator` once per slot.
    pub fn with_generator<F>(mut self, generator: F) -> Self
    where
        F: FnMut(&mut RandomNumberGenerator) -> Result<C> + Send + 'static,
    {
        self.generator = Some(Box::new(generator));
        self
    }

    pub fn with_selection<S>(mut self, selection: S) -> Self
    where
        S: SelectionStrategy<C> + 'static,
    {
        self.selection = Some(Ok(Box::new(selection)));
        self
    }

    pub fn with_crossover<X>(mut self, crossover: X) -> Self
    where
        X: CrossoverStrategy<C> + 'static,
    {
        self.crossover = Some(Box::new(crossover));
        self
    }

    pub fn with_mutation<M>(mut self, mutation: M) -> Self
    where
        M: MutationStrategy<C> + 'static,
    {
        self.mutation = Some(Box::new(mutation));
        self
    }

    pub fn with_evolution<E>(mut self, evolution: E) -> Self
    where
        E: EvolutionStrategy<C> + 'static,
    {
        self.evolution = Some(Ok(Box::new(evolution)));
        self
    }

    /// Uses a registered selection strategy. An invalid parameter is
    /// reported by `build`.
    pub fn with_selection_kind(mut self, kind: SelectionKind) -> Self {
        self.selection = Some(kind.build());
        self
    }

    pub fn with_crossover_kind(mut self, kind: CrossoverKind) -> Self {
        self.crossover = Some(kind.build());
        self
    }

    pub fn with_mutation_kind(mut self, kind: MutationKind) -> Self {
        self.mutation = Some(kind.build());
        self
    }

    pub fn with_evolution_kind(mut self, kind: EvolutionKind) -> Self {
        self.evolution = Some(kind.build());
        self
    }

    /// Seeds the population's random number generator.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Some(RandomNumberGenerator::from_seed(seed));
        self
    }

    pub fn with_rng(mut self, rng: RandomNumberGenerator) -> Self {
        self.rng = Some(rng);
        self
    }

    /// Builds the population.
    ///
    /// # Errors
    ///
    /// - `InvalidRate` if any rate is outside `[0, 1)`.
    /// - `Configuration` if the size is zero, the size disagrees with the
    ///   supplied chromosomes, no initial generation source is given, the
    ///   chromosomes differ in encoding length, a selection, crossover or
    ///   mutation strategy is missing, or a registered strategy kind carries
    ///   an invalid parameter.
    /// - Any error returned by the generator.
    pub fn build(self) -> Result<Population<C>> {
        let rates = GeneticRates::new(self.mutation_rate, self.crossover_rate, self.elitism_rate)?;

        let selection = self.selection.ok_or_else_genetic(|| {
            GeneticError::Configuration("Selection strategy must be specified".to_string())
        })??;
        let crossover = self.crossover.ok_or_else_genetic(|| {
            GeneticError::Configuration("Crossover strategy must be specified".to_string())
        })?;
        let mutation = self.mutation.ok_or_else_genetic(|| {
            GeneticError::Configuration("Mutation strategy must be specified".to_string())
        })?;
        let evolution = match self.evolution {
            Some(evolution) => evolution?,
            None => Box::new(GenerationalEvolution),
        };

        let mut rng = self.rng.unwrap_or_default();

        let mut chromosomes = match (self.chromosomes, self.generator) {
            (Some(chromosomes), _) => {
                if let Some(size) = self.size {
                    if size != chromosomes.len() {
                        return Err(GeneticError::Configuration(format!(
                            "Population size {} does not match {} initial chromosomes",
                            size,
                            chromosomes.len()
                        )));
                    }
                }
                chromosomes
            }
            (None, Some(mut generator)) => {
                let size = self.size.ok_or_else_genetic(|| {
                    GeneticError::Configuration(
                        "Population size must be specified with a generator".to_string(),
                    )
                })?;
                (0..size)
                    .map(|_| generator(&mut rng))
                    .collect::<Result<Vec<C>>>()?
            }
            (None, None) => {
                return Err(GeneticError::Configuration(
                    "Initial chromosomes or a generator must be specified".to_string(),
                ))
            }
        };

        if chromosomes.is_empty() {
            return Err(GeneticError::Configuration(
                "Population size cannot be zero".to_string(),
            ));
        }

        let length = chromosomes[0].len();
        if chromosomes.iter().any(|c| c.len() != length) {
            return Err(GeneticError::Configuration(
                "Chromosomes of a population must share one encoding length".to_string(),
            ));
        }

        sort_by_fitness(&mut chromosomes);

        let id = self.id.unwrap_or_else(|| "population".to_string());
        info!(
            population = %id,
            size = chromosomes.len(),
            objective = %self.objective,
            mutation_rate = rates.mutation(),
            crossover_rate = rates.crossover(),
            elitism_rate = rates.elitism(),
            "Population created"
        );

        Ok(Population {
            id,
            rates,
            objective: self.objective,
            chromosomes,
            selection,
            crossover,
            mutation,
            evolution,
            rng,
        })
    }
}

impl<C> Default for PopulationBuilder<C>
where
    C: Chromosome,
{
    fn default() -> Self {
        Self::new()
    }
}
