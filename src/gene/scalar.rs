//! Built-in scalar genes: boolean, bounded integer, bounded float, character.
//!
//! All four share the same shape: crossover picks one parent's value with
//! equal probability, and mutation replaces the value with a fresh random
//! draw at the configured rate.

use super::value::kind_mismatch;
use super::{check_mutation_rate, Gene, GeneValue};
use crate::error::EvolveError;
use rand::{Rng, RngCore};

/// A gene whose value is `true` or `false`.
#[derive(Debug, Clone)]
pub struct BoolGene {
    mutation_rate: f64,
}

impl BoolGene {
    pub fn new(mutation_rate: f64) -> Result<Self, EvolveError> {
        check_mutation_rate(mutation_rate)?;
        Ok(Self { mutation_rate })
    }
}

impl Gene for BoolGene {
    fn random_value(&self, rng: &mut dyn RngCore) -> Result<GeneValue, EvolveError> {
        Ok(GeneValue::Bool(rng.random_bool(0.5)))
    }

    fn crossover(
        &self,
        a: &GeneValue,
        b: &GeneValue,
        rng: &mut dyn RngCore,
    ) -> Result<GeneValue, EvolveError> {
        a.as_bool().ok_or_else(|| kind_mismatch("bool", a))?;
        b.as_bool().ok_or_else(|| kind_mismatch("bool", b))?;
        Ok(if rng.random_bool(0.5) { a.clone() } else { b.clone() })
    }

    fn mutate(&self, value: GeneValue, rng: &mut dyn RngCore) -> Result<GeneValue, EvolveError> {
        value.as_bool().ok_or_else(|| kind_mismatch("bool", &value))?;
        if rng.random::<f64>() < self.mutation_rate {
            self.random_value(rng)
        } else {
            Ok(value)
        }
    }
}

/// A gene whose value is an integer in `[min, max]` (inclusive).
#[derive(Debug, Clone)]
pub struct IntGene {
    min: i64,
    max: i64,
    mutation_rate: f64,
}

impl IntGene {
    pub fn new(min: i64, max: i64, mutation_rate: f64) -> Result<Self, EvolveError> {
        check_mutation_rate(mutation_rate)?;
        if min > max {
            return Err(EvolveError::Config(format!(
                "int gene bounds are inverted: min {min} > max {max}"
            )));
        }
        Ok(Self {
            min,
            max,
            mutation_rate,
        })
    }
}

impl Gene for IntGene {
    fn random_value(&self, rng: &mut dyn RngCore) -> Result<GeneValue, EvolveError> {
        Ok(GeneValue::Int(rng.random_range(self.min..=self.max)))
    }

    fn crossover(
        &self,
        a: &GeneValue,
        b: &GeneValue,
        rng: &mut dyn RngCore,
    ) -> Result<GeneValue, EvolveError> {
        a.as_int().ok_or_else(|| kind_mismatch("int", a))?;
        b.as_int().ok_or_else(|| kind_mismatch("int", b))?;
        Ok(if rng.random_bool(0.5) { a.clone() } else { b.clone() })
    }

    fn mutate(&self, value: GeneValue, rng: &mut dyn RngCore) -> Result<GeneValue, EvolveError> {
        value.as_int().ok_or_else(|| kind_mismatch("int", &value))?;
        if rng.random::<f64>() < self.mutation_rate {
            self.random_value(rng)
        } else {
            Ok(value)
        }
    }
}

/// A gene whose value is a float drawn uniformly from `[min, max)`.
#[derive(Debug, Clone)]
pub struct FloatGene {
    min: f64,
    max: f64,
    mutation_rate: f64,
}

impl FloatGene {
    pub fn new(min: f64, max: f64, mutation_rate: f64) -> Result<Self, EvolveError> {
        check_mutation_rate(mutation_rate)?;
        if !min.is_finite() || !max.is_finite() {
            return Err(EvolveError::Config(format!(
                "float gene bounds must be finite, got [{min}, {max})"
            )));
        }
        if min >= max {
            return Err(EvolveError::Config(format!(
                "float gene bounds are empty: min {min} >= max {max}"
            )));
        }
        Ok(Self {
            min,
            max,
            mutation_rate,
        })
    }
}

impl Gene for FloatGene {
    fn random_value(&self, rng: &mut dyn RngCore) -> Result<GeneValue, EvolveError> {
        Ok(GeneValue::Float(rng.random_range(self.min..self.max)))
    }

    fn crossover(
        &self,
        a: &GeneValue,
        b: &GeneValue,
        rng: &mut dyn RngCore,
    ) -> Result<GeneValue, EvolveError> {
        a.as_float().ok_or_else(|| kind_mismatch("float", a))?;
        b.as_float().ok_or_else(|| kind_mismatch("float", b))?;
        Ok(if rng.random_bool(0.5) { a.clone() } else { b.clone() })
    }

    fn mutate(&self, value: GeneValue, rng: &mut dyn RngCore) -> Result<GeneValue, EvolveError> {
        value.as_float().ok_or_else(|| kind_mismatch("float", &value))?;
        if rng.random::<f64>() < self.mutation_rate {
            self.random_value(rng)
        } else {
            Ok(value)
        }
    }
}

/// Character classes a [`CharGene`] pool can be built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CharClass {
    AsciiLowercase,
    AsciiUppercase,
    AsciiPunctuation,
}

impl CharClass {
    fn chars(self) -> impl Iterator<Item = char> {
        let range: Vec<char> = match self {
            CharClass::AsciiLowercase => ('a'..='z').collect(),
            CharClass::AsciiUppercase => ('A'..='Z').collect(),
            CharClass::AsciiPunctuation => ('!'..='~')
                .filter(|c| c.is_ascii_punctuation())
                .collect(),
        };
        range.into_iter()
    }
}

/// A gene whose value is one character from a fixed pool.
#[derive(Debug, Clone)]
pub struct CharGene {
    pool: Vec<char>,
    mutation_rate: f64,
}

impl CharGene {
    /// Builds a gene over an explicit character pool.
    pub fn new(pool: Vec<char>, mutation_rate: f64) -> Result<Self, EvolveError> {
        check_mutation_rate(mutation_rate)?;
        if pool.is_empty() {
            return Err(EvolveError::Config(
                "char gene pool must not be empty".into(),
            ));
        }
        Ok(Self {
            pool,
            mutation_rate,
        })
    }

    /// Builds a gene whose pool is the union of the given classes.
    pub fn from_classes(classes: &[CharClass], mutation_rate: f64) -> Result<Self, EvolveError> {
        let pool: Vec<char> = classes.iter().flat_map(|c| c.chars()).collect();
        Self::new(pool, mutation_rate)
    }
}

impl Gene for CharGene {
    fn random_value(&self, rng: &mut dyn RngCore) -> Result<GeneValue, EvolveError> {
        let idx = rng.random_range(0..self.pool.len());
        Ok(GeneValue::Char(self.pool[idx]))
    }

    fn crossover(
        &self,
        a: &GeneValue,
        b: &GeneValue,
        rng: &mut dyn RngCore,
    ) -> Result<GeneValue, EvolveError> {
        a.as_char().ok_or_else(|| kind_mismatch("char", a))?;
        b.as_char().ok_or_else(|| kind_mismatch("char", b))?;
        Ok(if rng.random_bool(0.5) { a.clone() } else { b.clone() })
    }

    fn mutate(&self, value: GeneValue, rng: &mut dyn RngCore) -> Result<GeneValue, EvolveError> {
        value.as_char().ok_or_else(|| kind_mismatch("char", &value))?;
        if rng.random::<f64>() < self.mutation_rate {
            self.random_value(rng)
        } else {
            Ok(value)
        }
    }
}
