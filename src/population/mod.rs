//! # Population
//!
//! A `Population` owns one sorted generation of chromosomes together with the
//! strategies and rates used to evolve it. Construction goes through
//! `PopulationBuilder`; all parameters are validated once, at build time.
pub mod builder;
pub mod population;
pub mod rates;

pub use builder::PopulationBuilder;
pub use population::Population;
pub use rates::GeneticRates;
