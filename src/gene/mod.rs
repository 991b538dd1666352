//! Gene contracts and built-in gene implementations.
//!
//! A [`Gene`] is the policy object for one named, heritable parameter:
//! it defines the legal value domain, how a fresh value is drawn, how two
//! parent values combine, and how a value mutates. Gene objects are
//! shared, immutable configuration — every organism of a species
//! references the same gene instances and owns only its values.
//!
//! # Built-in genes
//!
//! - [`BoolGene`], [`IntGene`], [`FloatGene`], [`CharGene`]: scalar domains
//! - [`SequenceGene`]: a fixed-length sequence of element values with
//!   selectable crossover ([`SeqCrossover`]) and mutation ([`SeqMutation`])
//!   operators
//! - [`PermutationGene`]: orderings of a fixed element list, recombined
//!   with partially-mapped crossover
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Eiben & Smith (2015), *Introduction to Evolutionary Computing*

mod permutation;
mod scalar;
mod sequence;
mod value;

pub use permutation::PermutationGene;
pub use scalar::{BoolGene, CharClass, CharGene, FloatGene, IntGene};
pub use sequence::{SeqCrossover, SeqMutation, SequenceGene};
pub use value::GeneValue;

use crate::error::EvolveError;
use rand::RngCore;

/// Policy object for one heritable parameter.
///
/// Implementations must be stateless with respect to any one organism:
/// the same gene instance serves every organism of a species. All three
/// required operations must keep their results inside the gene's legal
/// domain for any in-domain inputs.
///
/// The trait is object-safe; organisms hold genes as `Arc<dyn Gene>`.
pub trait Gene: Send + Sync {
    /// Draws a fresh value from the gene's full domain, with no
    /// dependency on any previous value.
    fn random_value(&self, rng: &mut dyn RngCore) -> Result<GeneValue, EvolveError>;

    /// Combines two parent values into one child value.
    ///
    /// Defined for any two in-domain values; `a` and `b` need not differ.
    fn crossover(
        &self,
        a: &GeneValue,
        b: &GeneValue,
        rng: &mut dyn RngCore,
    ) -> Result<GeneValue, EvolveError>;

    /// Returns `value` unchanged or a perturbed replacement, with
    /// perturbation probability equal to the gene's mutation rate.
    fn mutate(&self, value: GeneValue, rng: &mut dyn RngCore) -> Result<GeneValue, EvolveError>;

    /// The value a freshly constructed organism starts with.
    ///
    /// Defaults to [`random_value`](Gene::random_value). Composite genes
    /// override this to draw each element independently.
    fn initial_value(&self, rng: &mut dyn RngCore) -> Result<GeneValue, EvolveError> {
        self.random_value(rng)
    }

    /// Produces a child value from two parent values.
    ///
    /// Always `mutate(crossover(a, b))`, in that order. Breeding calls
    /// this exactly once per gene; implementations should not override it.
    fn from_parent_values(
        &self,
        a: &GeneValue,
        b: &GeneValue,
        rng: &mut dyn RngCore,
    ) -> Result<GeneValue, EvolveError> {
        let child = self.crossover(a, b, rng)?;
        self.mutate(child, rng)
    }
}

/// Validates a mutation rate, shared by every built-in gene constructor.
pub(crate) fn check_mutation_rate(rate: f64) -> Result<(), EvolveError> {
    if !(0.0..=1.0).contains(&rate) || rate.is_nan() {
        return Err(EvolveError::Config(format!(
            "mutation_rate must be in [0, 1], got {rate}"
        )));
    }
    Ok(())
}
