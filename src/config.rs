//! Engine configuration.
//!
//! [`EvolveConfig`] holds all parameters that control the generational
//! loop. Out-of-range values are never clamped or silently defaulted:
//! [`validate`](EvolveConfig::validate) reports them once, at the start
//! of an `evolve` call.

use crate::error::EvolveError;
use crate::selection::Selection;

/// Configuration for one evolutionary run.
///
/// # Defaults
///
/// ```
/// use heredity::EvolveConfig;
///
/// let config = EvolveConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.generations, 100);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use heredity::{EvolveConfig, Selection};
///
/// let config = EvolveConfig::default()
///     .with_population_size(200)
///     .with_selection(Selection::Rank)
///     .with_elite_rate(0.1)
///     .with_migration_rate(0.05)
///     .with_seed(42);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvolveConfig {
    /// Number of organisms in every generation.
    pub population_size: usize,

    /// Number of generations to run. Zero is valid and produces an
    /// empty history.
    pub generations: usize,

    /// Strategy for choosing breeding parents.
    pub selection: Selection,

    /// When set, the two parents of each pair must be distinct
    /// individuals (by identity, not by value).
    pub unique_parents: bool,

    /// Probability that a middle-band organism becomes breeding material
    /// instead of being carried unchanged into the next generation
    /// (0.0–1.0).
    pub crossover_rate: f64,

    /// Fraction of the population carried forward unchanged as elites
    /// (0.0–1.0, floor of the product is the elite count).
    pub elite_rate: f64,

    /// Fraction of the population, lowest fitness first, excluded from
    /// breeding and dropped (0.0–1.0).
    pub cull_rate: f64,

    /// Fraction of the population injected as fresh random organisms
    /// into the breeding pool each generation. May exceed 1.0; must be
    /// non-negative.
    pub migration_rate: f64,

    /// Random seed for reproducibility. `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for EvolveConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            generations: 100,
            selection: Selection::default(),
            unique_parents: false,
            crossover_rate: 0.9,
            elite_rate: 0.1,
            cull_rate: 0.1,
            migration_rate: 0.0,
            seed: None,
        }
    }
}

impl EvolveConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    /// Requires the two parents of each pair to be distinct individuals.
    pub fn with_unique_parents(mut self, unique: bool) -> Self {
        self.unique_parents = unique;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    /// Sets the elite rate.
    pub fn with_elite_rate(mut self, rate: f64) -> Self {
        self.elite_rate = rate;
        self
    }

    /// Sets the cull rate.
    pub fn with_cull_rate(mut self, rate: f64) -> Self {
        self.cull_rate = rate;
        self
    }

    /// Sets the migration rate.
    pub fn with_migration_rate(mut self, rate: f64) -> Self {
        self.migration_rate = rate;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), EvolveError> {
        if self.population_size < 1 {
            return Err(EvolveError::Config(
                "population_size must be at least 1".into(),
            ));
        }
        for (name, rate) in [
            ("crossover_rate", self.crossover_rate),
            ("elite_rate", self.elite_rate),
            ("cull_rate", self.cull_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) || rate.is_nan() {
                return Err(EvolveError::Config(format!(
                    "{name} must be in [0, 1], got {rate}"
                )));
            }
        }
        if !self.migration_rate.is_finite() || self.migration_rate < 0.0 {
            return Err(EvolveError::Config(format!(
                "migration_rate must be finite and non-negative, got {}",
                self.migration_rate
            )));
        }
        if self.elite_rate + self.cull_rate > 1.0 {
            return Err(EvolveError::Config(format!(
                "elite_rate ({}) + cull_rate ({}) must not exceed 1.0",
                self.elite_rate, self.cull_rate
            )));
        }
        self.selection.validate()?;
        Ok(())
    }
}
