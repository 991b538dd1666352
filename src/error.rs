//! Error taxonomy for the evolutionary engine.
//!
//! Three families of failures, all surfaced eagerly and never retried:
//!
//! - **Configuration errors**: invalid rates, operator parameters, or
//!   selection settings. Detected at construction or at the start of an
//!   `evolve` call.
//! - **Contract violations**: breeding organisms from different gene sets,
//!   or handing a gene a value of the wrong kind.
//! - **Degenerate inputs**: empty parent pools, non-positive total fitness
//!   for fitness-weighted sampling, unscored organisms in a pool.

use thiserror::Error;

/// Errors produced by gene construction, breeding, selection, and the
/// evolutionary loop.
#[derive(Debug, Error)]
pub enum EvolveError {
    /// A configuration parameter is out of range or inconsistent.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Two organisms with different gene registries were bred.
    #[error("cannot breed organisms from different gene sets")]
    SpeciesMismatch,

    /// A gene received a value of a kind it does not operate on.
    #[error("expected a {expected} value, got {actual}")]
    KindMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    /// A sequence value does not have the length its gene declares.
    #[error("expected a sequence of length {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// A value is not a permutation of a permutation gene's element list.
    #[error("value is not a permutation of the declared elements")]
    InvalidPermutation,

    /// A gene name was registered twice on the same gene set.
    #[error("duplicate gene name `{0}`")]
    DuplicateGene(String),

    /// An organism was spawned from a gene set with no registered genes.
    #[error("gene set has no registered genes")]
    EmptyGeneSet,

    /// Selection was invoked with no parents to choose from.
    #[error("parent pool is empty")]
    EmptyParentPool,

    /// Selection was asked to produce zero offspring.
    #[error("at least one offspring must be requested")]
    NoOffspringRequested,

    /// Total fitness is zero or negative, so fitness-weighted sampling
    /// has no defined distribution.
    #[error("total fitness {total} is not positive; fitness-weighted selection is undefined")]
    DegenerateFitness { total: f64 },

    /// Tournament selection needs at least `sample_size` organisms.
    #[error("tournament sample size {sample_size} exceeds parent pool size {pool_size}")]
    TournamentPoolTooSmall {
        sample_size: usize,
        pool_size: usize,
    },

    /// Unique parents were requested but the pool can never yield two
    /// distinct parents (pool of one, or a tournament that always
    /// returns the same winner).
    #[error("unique parents requested but the parent pool cannot yield two distinct parents")]
    UniqueParentsInfeasible,

    /// An organism reached selection without a cached fitness value.
    #[error("organism {id} has no cached fitness")]
    UnscoredOrganism { id: u64 },
}
