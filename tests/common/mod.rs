#![allow(dead_code)]

use std::sync::Arc;

use genetic_engine::{
    chromosome::Chromosome,
    error::{GeneticError, Result},
    rng::RandomNumberGenerator,
};

/// Installs a test subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::INFO)
        .try_init();
}

/// Binary string whose fitness is the number of set bits.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct BitString {
    bits: Vec<u8>,
    ones: f64,
}

impl BitString {
    pub fn new(bits: Vec<u8>) -> Result<Self> {
        if let Some(bad) = bits.iter().find(|&&b| b > 1) {
            return Err(GeneticError::InvalidEncoding(format!(
                "bit out of range: {}",
                bad
            )));
        }
        let ones = bits.iter().filter(|&&b| b == 1).count() as f64;
        Ok(Self { bits, ones })
    }

    pub fn random(rng: &mut RandomNumberGenerator, length: usize) -> Result<Self> {
        Self::new((0..length).map(|_| rng.index(2) as u8).collect())
    }
}

impl Chromosome for BitString {
    type Gene = u8;

    fn genes(&self) -> &[u8] {
        &self.bits
    }

    fn fitness(&self) -> f64 {
        self.ones
    }

    fn create_child(&self, genes: Vec<u8>) -> Result<Self> {
        BitString::new(genes)
    }
}

/// A closed tour over a shared set of cities. Fitness is the tour length.
#[derive(Clone, Debug)]
pub struct Tour {
    cities: Arc<Vec<(f64, f64)>>,
    order: Vec<usize>,
    length: f64,
}

impl Tour {
    pub fn new(cities: Arc<Vec<(f64, f64)>>, order: Vec<usize>) -> Result<Self> {
        if order.len() != cities.len() {
            return Err(GeneticError::InvalidEncoding(format!(
                "tour visits {} of {} cities",
                order.len(),
                cities.len()
            )));
        }
        let mut seen = vec![false; cities.len()];
        for &city in &order {
            if city >= cities.len() || seen[city] {
                return Err(GeneticError::InvalidEncoding(format!(
                    "tour is not a permutation: {:?}",
                    order
                )));
            }
            seen[city] = true;
        }

        let length = (0..order.len())
            .map(|i| {
                let (x1, y1) = cities[order[i]];
                let (x2, y2) = cities[order[(i + 1) % order.len()]];
                ((x2 - x1).powi(2) + (y2 - y1).powi(2)).sqrt()
            })
            .sum();

        Ok(Self {
            cities,
            order,
            length,
        })
    }

    pub fn random(cities: Arc<Vec<(f64, f64)>>, rng: &mut RandomNumberGenerator) -> Result<Self> {
        let order = rng.sample_distinct(cities.len(), cities.len());
        Self::new(cities, order)
    }

    pub fn order(&self) -> &[usize] {
        &self.order
    }
}

impl Chromosome for Tour {
    type Gene = usize;

    fn genes(&self) -> &[usize] {
        &self.order
    }

    fn fitness(&self) -> f64 {
        self.length
    }

    fn create_child(&self, genes: Vec<usize>) -> Result<Self> {
        Tour::new(Arc::clone(&self.cities), genes)
    }
}

/// `count` cities evenly spaced on a circle of `radius`.
pub fn circle_cities(count: usize, radius: f64) -> Arc<Vec<(f64, f64)>> {
    Arc::new(
        (0..count)
            .map(|i| {
                let angle = 2.0 * std::f64::consts::PI * i as f64 / count as f64;
                (radius * angle.cos(), radius * angle.sin())
            })
            .collect(),
    )
}

/// Length of the optimal tour around `circle_cities(count, radius)`.
pub fn circle_perimeter(count: usize, radius: f64) -> f64 {
    count as f64 * 2.0 * radius * (std::f64::consts::PI / count as f64).sin()
}
