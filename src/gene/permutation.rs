//! Permutation genes: orderings of a fixed element list.
//!
//! Values are sequences containing every declared element exactly once.
//! Crossover uses Partially Mapped Crossover (PMX), which preserves the
//! absolute position of elements from both parents as far as possible.
//!
//! # References
//!
//! - Goldberg & Lingle (1985), "Alleles, Loci, and the Traveling
//!   Salesman Problem"

use super::sequence::{insertion, inversion, random_unique_index_pair, scramble, swap};
use super::value::kind_mismatch;
use super::{check_mutation_rate, Gene, GeneValue, SeqMutation};
use crate::error::EvolveError;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

/// A gene whose value is a permutation of a fixed element list.
///
/// Only the order-changing mutation operators are legal; `RandomReset`
/// would break the permutation property and is rejected at construction.
#[derive(Debug)]
pub struct PermutationGene {
    elements: Vec<GeneValue>,
    mutation: SeqMutation,
    mutation_rate: f64,
}

impl PermutationGene {
    pub fn new(
        elements: Vec<GeneValue>,
        mutation: SeqMutation,
        mutation_rate: f64,
    ) -> Result<Self, EvolveError> {
        check_mutation_rate(mutation_rate)?;
        if elements.len() < 2 {
            return Err(EvolveError::Config(format!(
                "permutation gene needs at least 2 elements, got {}",
                elements.len()
            )));
        }
        for (i, e) in elements.iter().enumerate() {
            if elements[..i].contains(e) {
                return Err(EvolveError::Config(format!(
                    "permutation elements must be distinct; {e:?} appears twice"
                )));
            }
        }
        if mutation == SeqMutation::RandomReset {
            return Err(EvolveError::Config(
                "random-reset mutation is not defined for permutation genes".into(),
            ));
        }
        Ok(Self {
            elements,
            mutation,
            mutation_rate,
        })
    }

    /// Maps a value sequence to the index permutation over `self.elements`.
    fn to_indices(&self, v: &GeneValue) -> Result<Vec<usize>, EvolveError> {
        let seq = v.as_seq().ok_or_else(|| kind_mismatch("sequence", v))?;
        if seq.len() != self.elements.len() {
            return Err(EvolveError::InvalidPermutation);
        }
        let mut indices = Vec::with_capacity(seq.len());
        let mut seen = vec![false; self.elements.len()];
        for item in seq {
            let idx = self
                .elements
                .iter()
                .position(|e| e == item)
                .ok_or(EvolveError::InvalidPermutation)?;
            if seen[idx] {
                return Err(EvolveError::InvalidPermutation);
            }
            seen[idx] = true;
            indices.push(idx);
        }
        Ok(indices)
    }

    fn from_indices(&self, indices: &[usize]) -> GeneValue {
        GeneValue::Seq(indices.iter().map(|&i| self.elements[i].clone()).collect())
    }
}

impl Gene for PermutationGene {
    fn random_value(&self, rng: &mut dyn RngCore) -> Result<GeneValue, EvolveError> {
        let mut values = self.elements.clone();
        values.shuffle(rng);
        Ok(GeneValue::Seq(values))
    }

    fn crossover(
        &self,
        a: &GeneValue,
        b: &GeneValue,
        rng: &mut dyn RngCore,
    ) -> Result<GeneValue, EvolveError> {
        let a = self.to_indices(a)?;
        let b = self.to_indices(b)?;
        let child = pmx_crossover(&a, &b, rng);
        Ok(self.from_indices(&child))
    }

    fn mutate(&self, value: GeneValue, rng: &mut dyn RngCore) -> Result<GeneValue, EvolveError> {
        self.to_indices(&value)?;
        if rng.random::<f64>() >= self.mutation_rate {
            return Ok(value);
        }
        let mut values = value.into_seq()?;
        match self.mutation {
            SeqMutation::Swap => swap(&mut values, rng),
            SeqMutation::Insertion => insertion(&mut values, rng),
            SeqMutation::Scramble => scramble(&mut values, rng),
            SeqMutation::Inversion => inversion(&mut values, rng),
            // Rejected at construction.
            SeqMutation::RandomReset => unreachable!(),
        }
        Ok(GeneValue::Seq(values))
    }
}

/// Partially Mapped Crossover over index permutations.
///
/// Copies a random segment from `parent1`, then places `parent2`'s
/// segment elements through the mapping chain, and fills the remaining
/// positions from `parent2`.
fn pmx_crossover(parent1: &[usize], parent2: &[usize], rng: &mut dyn RngCore) -> Vec<usize> {
    let n = parent1.len();
    let (i, j) = random_unique_index_pair(n, rng);
    let (start, end) = (i.min(j), i.max(j));

    let sentinel = usize::MAX;
    let mut child = vec![sentinel; n];
    let mut placed = vec![false; n];

    for k in start..=end {
        child[k] = parent1[k];
        placed[parent1[k]] = true;
    }

    for k in start..=end {
        let donor_val = parent2[k];
        if placed[donor_val] {
            continue;
        }
        // Follow the mapping chain until it leaves the copied segment.
        let mut pos = k;
        loop {
            let mapped_val = parent1[pos];
            let donor_pos = parent2
                .iter()
                .position(|&v| v == mapped_val)
                .expect("parents are permutations of the same index set");
            if donor_pos < start || donor_pos > end {
                child[donor_pos] = donor_val;
                placed[donor_val] = true;
                break;
            }
            pos = donor_pos;
        }
    }

    for k in 0..n {
        if child[k] == sentinel {
            child[k] = parent2[k];
        }
    }

    child
}
