//! Problem definition: the species contract the engine runs against.

use crate::engine::GenerationRecord;
use crate::error::EvolveError;
use crate::organism::{GeneSet, Organism};

/// Defines a species for the evolutionary engine.
///
/// This is the one trait a user implements to plug a problem into the
/// engine. It covers:
///
/// 1. **Registration**: which named genes every organism carries
/// 2. **Evaluation**: the fitness function (higher is better)
/// 3. **Observation**: an optional per-generation callback
///
/// # Implementing
///
/// ```
/// use heredity::{GeneSet, Organism, Species};
/// use heredity::gene::IntGene;
/// use heredity::EvolveError;
/// use std::sync::Arc;
///
/// struct HighScore;
///
/// impl Species for HighScore {
///     fn gene_set(&self) -> Result<GeneSet, EvolveError> {
///         let mut genes = GeneSet::new();
///         genes.register("score", Arc::new(IntGene::new(0, 100, 0.05)?))?;
///         Ok(genes)
///     }
///
///     fn evaluate(&self, organism: &Organism) -> f64 {
///         organism.value("score").and_then(|v| v.as_int()).unwrap_or(0) as f64
///     }
/// }
/// ```
pub trait Species: Send + Sync {
    /// Builds the gene registry for this species.
    ///
    /// Called once per `evolve` run; every organism of the run shares
    /// the returned registry.
    fn gene_set(&self) -> Result<GeneSet, EvolveError>;

    /// Computes the fitness of one organism. Higher fitness is better.
    ///
    /// Called synchronously by the engine, once per organism per
    /// generation; the engine imposes no timeout, so bounding the cost
    /// of evaluation is the implementer's responsibility.
    fn evaluate(&self, organism: &Organism) -> f64;

    /// Called synchronously after each generation with its statistics
    /// record, before the next generation begins.
    ///
    /// The default implementation does nothing.
    fn on_generation(&self, _record: &GenerationRecord) {}
}
