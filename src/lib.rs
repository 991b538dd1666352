//! Generic genetic-algorithm engine.
//!
//! Candidate solutions ([`Organism`]s) carry named, heritable parameters
//! ([`gene::Gene`] values); the engine iteratively selects, breeds, and
//! mutates them across generations to maximize a user-supplied fitness
//! function.
//!
//! # Core abstractions
//!
//! - [`gene::Gene`]: policy object for one heritable parameter —
//!   random initialization, crossover of two parent values, mutation.
//!   Built-in genes cover booleans, bounded integers and floats,
//!   characters, fixed-length sequences, and permutations.
//! - [`Organism`]: one candidate solution — a value per registered gene,
//!   a cached fitness score, and breeding via per-gene combination.
//! - [`Species`]: the user-implemented problem definition — gene
//!   registry, fitness function, optional per-generation callback.
//! - [`Selection`]: strategy for choosing breeding parents —
//!   proportional (roulette), rank, tournament, or uniform.
//! - [`Engine`]: the generational loop — elitism, culling,
//!   crossover-skip, migration, selection, breeding, statistics.
//!
//! Execution is single-threaded and synchronous; randomness comes from
//! one seedable generator ([`EvolveConfig::with_seed`] gives
//! reproducible runs).
//!
//! # Example
//!
//! ```
//! use heredity::{Engine, EvolveConfig, GeneSet, Organism, Selection, Species};
//! use heredity::gene::{BoolGene, SeqCrossover, SeqMutation, SequenceGene};
//! use heredity::EvolveError;
//! use std::sync::Arc;
//!
//! /// Maximize the number of `true` bits in a 16-bit string.
//! struct OneMax;
//!
//! impl Species for OneMax {
//!     fn gene_set(&self) -> Result<GeneSet, EvolveError> {
//!         let mut genes = GeneSet::new();
//!         let bit = Arc::new(BoolGene::new(0.0)?);
//!         genes.register(
//!             "bits",
//!             Arc::new(SequenceGene::new(
//!                 bit,
//!                 16,
//!                 SeqCrossover::Uniform,
//!                 SeqMutation::RandomReset,
//!                 0.2,
//!             )?),
//!         )?;
//!         Ok(genes)
//!     }
//!
//!     fn evaluate(&self, organism: &Organism) -> f64 {
//!         let bits = organism.value("bits").and_then(|v| v.as_seq()).unwrap_or(&[]);
//!         bits.iter().filter(|b| b.as_bool() == Some(true)).count() as f64
//!     }
//! }
//!
//! let config = EvolveConfig::default()
//!     .with_population_size(30)
//!     .with_generations(10)
//!     .with_selection(Selection::Tournament(3))
//!     .with_seed(42);
//!
//! let result = Engine::evolve(&OneMax, &config).unwrap();
//! assert_eq!(result.history.len(), 10);
//! let best = result.best.unwrap();
//! assert!(best.fitness().unwrap() > 8.0);
//! ```

mod config;
mod engine;
mod error;
pub mod gene;
mod organism;
pub mod random;
mod selection;
mod species;

pub use config::EvolveConfig;
pub use engine::{Engine, EvolveResult, GenerationRecord};
pub use error::EvolveError;
pub use gene::GeneValue;
pub use organism::{GeneSet, Organism};
pub use selection::Selection;
pub use species::Species;
