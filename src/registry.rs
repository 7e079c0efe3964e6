//! # Strategy Registry
//!
//! Maps small integer ids and names, as supplied by a CLI or configuration
//! file, onto concrete strategies.
//!
//! | id | selection | crossover | mutation | evolution |
//! |----|-----------|-----------|----------|-----------|
//! | 0 | `random` | `one-point` | `bit-flip` | `generational` |
//! | 1 | `roulette` | `two-point` | `random-swap` | `top-replicate` |
//! | 2 | `tournament:2` | `order` | `neighbor-swap` | `tournament-replicate:5` |
//! | 3 | `tournament:4` | | | `rank-replicate:2` |
//! | 4 | `tournament:8` | | | |
//!
//! ```rust
//! use genetic_engine::registry::{EvolutionKind, SelectionKind};
//!
//! assert_eq!(SelectionKind::from_id(3).unwrap(), SelectionKind::Tournament(4));
//! assert_eq!("tournament:4".parse::<SelectionKind>().unwrap(), SelectionKind::Tournament(4));
//! assert_eq!(EvolutionKind::from_id(2).unwrap().to_string(), "tournament-replicate:5");
//! assert!(SelectionKind::from_id(9).is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use crate::chromosome::Chromosome;
use crate::crossover::{CrossoverStrategy, OnePointCrossover, OrderCrossover, TwoPointCrossover};
use crate::error::{GeneticError, Result};
use crate::evolution::{EvolutionStrategy, GenerationalEvolution, ReplicatingEvolution};
use crate::mutation::{BitFlipMutation, MutationStrategy, SwapMutation};
use crate::selection::{
    RandomSelection, RouletteWheelSelection, SelectionStrategy, TournamentSelection,
};

fn unknown_id(kind: &str, id: u8) -> GeneticError {
    GeneticError::Configuration(format!("Unknown {} strategy id {}", kind, id))
}

fn unknown_name(kind: &str, name: &str) -> GeneticError {
    GeneticError::Configuration(format!("Unknown {} strategy '{}'", kind, name))
}

/// Splits `name:arg` and parses the argument.
fn parse_argument<T: FromStr>(kind: &str, name: &str, argument: &str) -> Result<T> {
    argument
        .parse()
        .map_err(|_| unknown_name(kind, &format!("{}:{}", name, argument)))
}

/// Selection strategies by id or name.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionKind {
    Random,
    Roulette,
    Tournament(usize),
}

impl SelectionKind {
    /// # Errors
    ///
    /// Returns `Configuration` for an unknown id.
    pub fn from_id(id: u8) -> Result<Self> {
        match id {
            0 => Ok(Self::Random),
            1 => Ok(Self::Roulette),
            2 => Ok(Self::Tournament(2)),
            3 => Ok(Self::Tournament(4)),
            4 => Ok(Self::Tournament(8)),
            _ => Err(unknown_id("selection", id)),
        }
    }

    /// Builds the strategy.
    ///
    /// # Errors
    ///
    /// Returns `Configuration` for a tournament of size zero.
    pub fn build<C: Chromosome>(&self) -> Result<Box<dyn SelectionStrategy<C>>> {
        Ok(match *self {
            Self::Random => Box::new(RandomSelection),
            Self::Roulette => Box::new(RouletteWheelSelection),
            Self::Tournament(size) => Box::new(TournamentSelection::new(size)?),
        })
    }
}

impl fmt::Display for SelectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Random => write!(f, "random"),
            Self::Roulette => write!(f, "roulette"),
            Self::Tournament(size) => write!(f, "tournament:{}", size),
        }
    }
}

impl FromStr for SelectionKind {
    type Err = GeneticError;

    fn from_str(s: &str) -> Result<Self> {
        match s.split_once(':') {
            None => match s {
                "random" => Ok(Self::Random),
                "roulette" => Ok(Self::Roulette),
                "tournament" => Ok(Self::Tournament(2)),
                _ => Err(unknown_name("selection", s)),
            },
            Some(("tournament", size)) => {
                let size: usize = parse_argument("selection", "tournament", size)?;
                if size == 0 {
                    return Err(GeneticError::Configuration(
                        "Tournament size must be at least 1".to_string(),
                    ));
                }
                Ok(Self::Tournament(size))
            }
            Some(_) => Err(unknown_name("selection", s)),
        }
    }
}

/// Crossover strategies by id or name.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossoverKind {
    OnePoint,
    TwoPoint,
    Order,
}

impl CrossoverKind {
    /// # Errors
    ///
    /// Returns `Configuration` for an unknown id.
    pub fn from_id(id: u8) -> Result<Self> {
        match id {
            0 => Ok(Self::OnePoint),
            1 => Ok(Self::TwoPoint),
            2 => Ok(Self::Order),
            _ => Err(unknown_id("crossover", id)),
        }
    }

    pub fn build<C: Chromosome>(&self) -> Box<dyn CrossoverStrategy<C>> {
        match self {
            Self::OnePoint => Box::new(OnePointCrossover),
            Self::TwoPoint => Box::new(TwoPointCrossover),
            Self::Order => Box::new(OrderCrossover),
        }
    }
}

impl fmt::Display for CrossoverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::OnePoint => "one-point",
            Self::TwoPoint => "two-point",
            Self::Order => "order",
        };
        f.write_str(name)
    }
}

impl FromStr for CrossoverKind {
    type Err = GeneticError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "one-point" => Ok(Self::OnePoint),
            "two-point" => Ok(Self::TwoPoint),
            "order" => Ok(Self::Order),
            _ => Err(unknown_name("crossover", s)),
        }
    }
}

/// Mutation strategies by id or name.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    BitFlip,
    RandomSwap,
    NeighborSwap,
}

impl MutationKind {
    /// # Errors
    ///
    /// Returns `Configuration` for an unknown id.
    pub fn from_id(id: u8) -> Result<Self> {
        match id {
            0 => Ok(Self::BitFlip),
            1 => Ok(Self::RandomSwap),
            2 => Ok(Self::NeighborSwap),
            _ => Err(unknown_id("mutation", id)),
        }
    }

    pub fn build<C: Chromosome>(&self) -> Box<dyn MutationStrategy<C>> {
        match self {
            Self::BitFlip => Box::new(BitFlipMutation),
            Self::RandomSwap => Box::new(SwapMutation::random()),
            Self::NeighborSwap => Box::new(SwapMutation::neighbor()),
        }
    }
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::BitFlip => "bit-flip",
            Self::RandomSwap => "random-swap",
            Self::NeighborSwap => "neighbor-swap",
        };
        f.write_str(name)
    }
}

impl FromStr for MutationKind {
    type Err = GeneticError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "bit-flip" => Ok(Self::BitFlip),
            "random-swap" => Ok(Self::RandomSwap),
            "neighbor-swap" => Ok(Self::NeighborSwap),
            _ => Err(unknown_name("mutation", s)),
        }
    }
}

/// Evolution strategies by id or name.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EvolutionKind {
    Generational,
    /// Top 10% of the offspring replicated ten times.
    TopReplicate,
    TournamentReplicate(usize),
    RankReplicate(f64),
}

impl EvolutionKind {
    /// # Errors
    ///
    /// Returns `Configuration` for an unknown id.
    pub fn from_id(id: u8) -> Result<Self> {
        match id {
            0 => Ok(Self::Generational),
            1 => Ok(Self::TopReplicate),
            2 => Ok(Self::TournamentReplicate(5)),
            3 => Ok(Self::RankReplicate(2.0)),
            _ => Err(unknown_id("evolution", id)),
        }
    }

    /// Builds the strategy.
    ///
    /// # Errors
    ///
    /// Returns `Configuration` for a replication tournament of size zero or a
    /// rank pressure outside `[1, 2]`.
    pub fn build<C: Chromosome>(&self) -> Result<Box<dyn EvolutionStrategy<C>>> {
        Ok(match *self {
            Self::Generational => Box::new(GenerationalEvolution),
            Self::TopReplicate => Box::new(ReplicatingEvolution::top()),
            Self::TournamentReplicate(size) => Box::new(ReplicatingEvolution::tournament(size)?),
            Self::RankReplicate(pressure) => Box::new(ReplicatingEvolution::rank_based(pressure)?),
        })
    }
}

impl fmt::Display for EvolutionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generational => write!(f, "generational"),
            Self::TopReplicate => write!(f, "top-replicate"),
            Self::TournamentReplicate(size) => write!(f, "tournament-replicate:{}", size),
            Self::RankReplicate(pressure) => write!(f, "rank-replicate:{}", pressure),
        }
    }
}

impl FromStr for EvolutionKind {
    type Err = GeneticError;

    fn from_str(s: &str) -> Result<Self> {
        match s.split_once(':') {
            None => match s {
                "generational" => Ok(Self::Generational),
                "top-replicate" => Ok(Self::TopReplicate),
                "tournament-replicate" => Ok(Self::TournamentReplicate(5)),
                "rank-replicate" => Ok(Self::RankReplicate(2.0)),
                _ => Err(unknown_name("evolution", s)),
            },
            Some(("tournament-replicate", size)) => {
                let size: usize = parse_argument("evolution", "tournament-replicate", size)?;
                ReplicatingEvolution::tournament(size)?;
                Ok(Self::TournamentReplicate(size))
            }
            Some(("rank-replicate", pressure)) => {
                let pressure: f64 = parse_argument("evolution", "rank-replicate", pressure)?;
                ReplicatingEvolution::rank_based(pressure)?;
                Ok(Self::RankReplicate(pressure))
            }
            Some(_) => Err(unknown_name("evolution", s)),
        }
    }
}
