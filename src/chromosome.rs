//! # Chromosome Trait
//!
//! The `Chromosome` trait is the one per-problem extension point of the engine.
//! A chromosome wraps an encoding (a sequence of genes whose meaning belongs to
//! the problem) together with a fitness value computed once when the chromosome
//! is built. Chromosomes are never changed after construction: every strategy that
//! alters genes asks the parent for a new instance through `create_child`.
//!
//! ## Example
//!
//! ```rust
//! use genetic_engine::chromosome::Chromosome;
//! use genetic_engine::error::{GeneticError, Result};
//!
//! #[derive(Clone, Debug)]
//! struct Ones {
//!     genes: Vec<u8>,
//!     fitness: f64,
//! }
//!
//! impl Ones {
//!     fn new(genes: Vec<u8>) -> Result<Self> {
//!         if genes.iter().any(|&g| g > 1) {
//!             return Err(GeneticError::InvalidEncoding("genes must be 0 or 1".to_string()));
//!         }
//!         let fitness = genes.iter().map(|&g| g as f64).sum();
//!         Ok(Self { genes, fitness })
//!     }
//! }
//!
//! impl Chromosome for Ones {
//!     type Gene = u8;
//!
//!     fn genes(&self) -> &[u8] {
//!         &self.genes
//!     }
//!
//!     fn fitness(&self) -> f64 {
//!         self.fitness
//!     }
//!
//!     fn create_child(&self, genes: Vec<u8>) -> Result<Self> {
//!         Ones::new(genes)
//!     }
//! }
//!
//! let parent = Ones::new(vec![1, 0, 1]).unwrap();
//! let child = parent.create_child(vec![1, 1, 1]).unwrap();
//! assert_eq!(child.fitness(), 3.0);
//! assert!(parent.create_child(vec![2, 0, 0]).is_err());
//! ```

use std::cmp::Ordering;
use std::fmt::Debug;

use crate::error::Result;

/// A single element of a chromosome's encoding.
///
/// Genes are opaque numeric values. The only operation the engine needs on
/// them beyond copying and comparing is `flipped`, used by bit-flip mutation:
/// it toggles between the zero and one values of the type.
pub trait Gene: Copy + PartialEq + Debug + Send + Sync + 'static {
    /// Returns the toggled gene: zero becomes one, anything else becomes zero.
    fn flipped(self) -> Self;
}

impl Gene for bool {
    fn flipped(self) -> Self {
        !self
    }
}

macro_rules! impl_numeric_gene {
    ($($t:ty => $zero:expr, $one:expr);* $(;)?) => {
        $(
            impl Gene for $t {
                fn flipped(self) -> Self {
                    if self == $zero { $one } else { $zero }
                }
            }
        )*
    };
}

impl_numeric_gene! {
    u8 => 0, 1;
    u16 => 0, 1;
    u32 => 0, 1;
    u64 => 0, 1;
    usize => 0, 1;
    i8 => 0, 1;
    i16 => 0, 1;
    i32 => 0, 1;
    i64 => 0, 1;
    isize => 0, 1;
    f32 => 0.0, 1.0;
    f64 => 0.0, 1.0;
}

/// Trait for candidate solutions evolved by the engine.
///
/// Implementations must compute fitness once at construction and never mutate
/// the encoding afterwards. `create_child` must be a pure function of its input
/// (no shared mutable state), so populations can evolve on separate threads.
pub trait Chromosome: Clone + Debug + Send + Sync + 'static {
    /// The gene type of the encoding.
    type Gene: Gene;

    /// Returns the encoding.
    fn genes(&self) -> &[Self::Gene];

    /// Returns the cached fitness. Never recomputes.
    fn fitness(&self) -> f64;

    /// Builds a new chromosome of the same kind for the given encoding,
    /// computing its fitness.
    ///
    /// # Errors
    ///
    /// Returns `InvalidEncoding` if `genes` is malformed for this problem
    /// (wrong length, out-of-range value, duplicate in a permutation, ...).
    fn create_child(&self, genes: Vec<Self::Gene>) -> Result<Self>;

    /// Number of genes in the encoding.
    fn len(&self) -> usize {
        self.genes().len()
    }

    /// Returns `true` if the encoding holds no genes.
    fn is_empty(&self) -> bool {
        self.genes().is_empty()
    }

    /// Compares two chromosomes by fitness only.
    fn compare(&self, other: &Self) -> Ordering {
        compare_fitness(self, other)
    }
}

/// Total order of chromosomes by fitness (ascending).
///
/// Uses `f64::total_cmp`, so a NaN fitness sorts after every finite value
/// instead of breaking the sort.
pub fn compare_fitness<C: Chromosome>(a: &C, b: &C) -> Ordering {
    a.fitness().total_cmp(&b.fitness())
}

/// Sorts chromosomes by ascending fitness. The sort is stable.
pub fn sort_by_fitness<C: Chromosome>(chromosomes: &mut [C]) {
    chromosomes.sort_by(compare_fitness);
}

/// Returns `true` if the chromosomes are sorted by ascending fitness.
pub fn is_sorted_by_fitness<C: Chromosome>(chromosomes: &[C]) -> bool {
    chromosomes
        .windows(2)
        .all(|pair| compare_fitness(&pair[0], &pair[1]) != Ordering::Greater)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::GeneticError;

    /// Binary chromosome counting set bits, shared by the unit tests of the crate.
    #[derive(Clone, Debug, PartialEq)]
    pub(crate) struct Bits {
        genes: Vec<u8>,
        fitness: f64,
    }

    impl Bits {
        pub(crate) fn new(genes: Vec<u8>) -> Result<Self> {
            if let Some(bad) = genes.iter().find(|&&g| g > 1) {
                return Err(GeneticError::InvalidEncoding(format!(
                    "bit gene out of range: {}",
                    bad
                )));
            }
            let fitness = genes.iter().map(|&g| g as f64).sum();
            Ok(Self { genes, fitness })
        }

        pub(crate) fn from_bits(bits: &str) -> Self {
            Self::new(bits.bytes().map(|b| b - b'0').collect()).unwrap()
        }
    }

    impl Chromosome for Bits {
        type Gene = u8;

        fn genes(&self) -> &[u8] {
            &self.genes
        }

        fn fitness(&self) -> f64 {
            self.fitness
        }

        fn create_child(&self, genes: Vec<u8>) -> Result<Self> {
            Bits::new(genes)
        }
    }

    /// Permutation chromosome whose fitness is the number of genes in place.
    #[derive(Clone, Debug, PartialEq)]
    pub(crate) struct Perm {
        genes: Vec<usize>,
        fitness: f64,
    }

    impl Perm {
        pub(crate) fn new(genes: Vec<usize>) -> Result<Self> {
            let mut seen = vec![false; genes.len()];
            for &g in &genes {
                if g >= genes.len() || seen[g] {
                    return Err(GeneticError::InvalidEncoding(format!(
                        "not a permutation: {:?}",
                        genes
                    )));
                }
                seen[g] = true;
            }
            let fitness = genes.iter().enumerate().filter(|(i, g)| *i == **g).count() as f64;
            Ok(Self { genes, fitness })
        }
    }

    impl Chromosome for Perm {
        type Gene = usize;

        fn genes(&self) -> &[usize] {
            &self.genes
        }

        fn fitness(&self) -> f64 {
            self.fitness
        }

        fn create_child(&self, genes: Vec<usize>) -> Result<Self> {
            Perm::new(genes)
        }
    }

    #[test]
    fn test_gene_flipped() {
        assert_eq!(0u8.flipped(), 1);
        assert_eq!(1u8.flipped(), 0);
        assert_eq!(7i32.flipped(), 0);
        assert!(false.flipped());
        assert_eq!(0.0f64.flipped(), 1.0);
    }

    #[test]
    fn test_create_child_validates() {
        let parent = Bits::from_bits("0101");
        assert_eq!(parent.fitness(), 2.0);

        let child = parent.create_child(vec![1, 1, 1, 1]).unwrap();
        assert_eq!(child.fitness(), 4.0);
        assert_eq!(parent.genes(), &[0, 1, 0, 1]);

        match parent.create_child(vec![0, 3]) {
            Err(GeneticError::InvalidEncoding(_)) => (),
            other => panic!("Expected InvalidEncoding, got {:?}", other),
        }
    }

    #[test]
    fn test_compare_and_sort() {
        let mut list = vec![
            Bits::from_bits("111"),
            Bits::from_bits("000"),
            Bits::from_bits("010"),
        ];
        assert_eq!(list[0].compare(&list[1]), Ordering::Greater);
        assert!(!is_sorted_by_fitness(&list));

        sort_by_fitness(&mut list);

        assert!(is_sorted_by_fitness(&list));
        assert_eq!(list[0].fitness(), 0.0);
        assert_eq!(list[2].fitness(), 3.0);
    }
}
