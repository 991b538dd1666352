//! Sequence genes: fixed-length compositions of an element gene.
//!
//! A [`SequenceGene`] produces values that are ordered sequences of
//! element values. Crossover and mutation act on the sequence as a whole:
//! the element gene contributes only its domain (random draws), never its
//! own mutation rate.
//!
//! # References
//!
//! - Eiben & Smith (2015), *Introduction to Evolutionary Computing*, ch. 4
//! - Cicirello (2023), "Genetic Operators for Permutation Representation"

use super::value::kind_mismatch;
use super::{check_mutation_rate, Gene, GeneValue};
use crate::error::EvolveError;
use rand::seq::index;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use std::sync::Arc;

/// Crossover operator for sequence values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SeqCrossover {
    /// Each position independently takes parent A's or parent B's element
    /// with probability 0.5.
    Uniform,
    /// One interior cut point; equivalent to `NPoint(1)`.
    OnePoint,
    /// Two interior cut points; equivalent to `NPoint(2)`.
    TwoPoint,
    /// `n` distinct interior cut points partition the sequence into `n+1`
    /// segments; one coin flip picks the first segment's parent and the
    /// source alternates at each cut.
    NPoint(usize),
}

impl SeqCrossover {
    /// Number of cut points, or `None` for positionwise operators.
    fn cut_count(self) -> Option<usize> {
        match self {
            SeqCrossover::Uniform => None,
            SeqCrossover::OnePoint => Some(1),
            SeqCrossover::TwoPoint => Some(2),
            SeqCrossover::NPoint(n) => Some(n),
        }
    }
}

/// Mutation operator for sequence values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SeqMutation {
    /// Replace one random element with a fresh draw from the element gene.
    RandomReset,
    /// Exchange two distinct random positions.
    Swap,
    /// Remove the element at one random position and reinsert it at a
    /// second, distinct position, shifting the elements between them.
    Insertion,
    /// Shuffle the sub-range between two distinct random positions.
    Scramble,
    /// Reverse the sub-range between two distinct random positions.
    Inversion,
}

/// A gene whose value is an ordered sequence of `length` element values.
///
/// Mutation applies to the whole sequence at the sequence's own rate; the
/// element gene's mutation rate is never consulted.
pub struct SequenceGene {
    element: Arc<dyn Gene>,
    length: usize,
    crossover: SeqCrossover,
    mutation: SeqMutation,
    mutation_rate: f64,
}

// The element gene is a trait object, so Debug is written by hand and
// omits it.
impl std::fmt::Debug for SequenceGene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SequenceGene")
            .field("length", &self.length)
            .field("crossover", &self.crossover)
            .field("mutation", &self.mutation)
            .field("mutation_rate", &self.mutation_rate)
            .finish()
    }
}

impl SequenceGene {
    /// Builds a sequence gene, validating the operator configuration.
    ///
    /// Cut-point crossovers need `1 <= n <= length - 2` so that `n`
    /// distinct interior cut positions exist.
    pub fn new(
        element: Arc<dyn Gene>,
        length: usize,
        crossover: SeqCrossover,
        mutation: SeqMutation,
        mutation_rate: f64,
    ) -> Result<Self, EvolveError> {
        check_mutation_rate(mutation_rate)?;
        if length < 2 {
            return Err(EvolveError::Config(format!(
                "sequence length must be at least 2, got {length}"
            )));
        }
        if let Some(n) = crossover.cut_count() {
            if n == 0 {
                return Err(EvolveError::Config(
                    "n-point crossover requires a positive n".into(),
                ));
            }
            if n > length - 2 {
                return Err(EvolveError::Config(format!(
                    "{n}-point crossover needs {n} interior cut positions, \
                     but a sequence of length {length} has only {}",
                    length - 2
                )));
            }
        }
        Ok(Self {
            element,
            length,
            crossover,
            mutation,
            mutation_rate,
        })
    }

    fn check_parent<'v>(&self, v: &'v GeneValue) -> Result<&'v [GeneValue], EvolveError> {
        let seq = v.as_seq().ok_or_else(|| kind_mismatch("sequence", v))?;
        if seq.len() != self.length {
            return Err(EvolveError::LengthMismatch {
                expected: self.length,
                actual: seq.len(),
            });
        }
        Ok(seq)
    }

    fn uniform_crossover(
        &self,
        a: &[GeneValue],
        b: &[GeneValue],
        rng: &mut dyn RngCore,
    ) -> Vec<GeneValue> {
        (0..self.length)
            .map(|i| {
                if rng.random_bool(0.5) {
                    a[i].clone()
                } else {
                    b[i].clone()
                }
            })
            .collect()
    }

    /// Cut-point crossover with `n` distinct interior cuts.
    ///
    /// The source parent for the first segment comes from one coin flip;
    /// after emitting a cut position the source alternates. Cut positions
    /// are sampled without replacement from `1..length - 1`.
    fn n_point_crossover(
        &self,
        a: &[GeneValue],
        b: &[GeneValue],
        n: usize,
        rng: &mut dyn RngCore,
    ) -> Vec<GeneValue> {
        let mut is_cut = vec![false; self.length];
        for i in index::sample(rng, self.length - 2, n) {
            is_cut[i + 1] = true;
        }

        let mut from_a = rng.random_bool(0.5);
        let mut child = Vec::with_capacity(self.length);
        for i in 0..self.length {
            child.push(if from_a { a[i].clone() } else { b[i].clone() });
            if is_cut[i] {
                from_a = !from_a;
            }
        }
        child
    }
}

impl Gene for SequenceGene {
    fn random_value(&self, rng: &mut dyn RngCore) -> Result<GeneValue, EvolveError> {
        let values = (0..self.length)
            .map(|_| self.element.random_value(rng))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(GeneValue::Seq(values))
    }

    /// Each element draws its own initial value, rather than one
    /// whole-sequence draw.
    fn initial_value(&self, rng: &mut dyn RngCore) -> Result<GeneValue, EvolveError> {
        let values = (0..self.length)
            .map(|_| self.element.initial_value(rng))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(GeneValue::Seq(values))
    }

    fn crossover(
        &self,
        a: &GeneValue,
        b: &GeneValue,
        rng: &mut dyn RngCore,
    ) -> Result<GeneValue, EvolveError> {
        let a = self.check_parent(a)?;
        let b = self.check_parent(b)?;
        let child = match self.crossover.cut_count() {
            None => self.uniform_crossover(a, b, rng),
            Some(n) => self.n_point_crossover(a, b, n, rng),
        };
        Ok(GeneValue::Seq(child))
    }

    fn mutate(&self, value: GeneValue, rng: &mut dyn RngCore) -> Result<GeneValue, EvolveError> {
        self.check_parent(&value)?;
        if rng.random::<f64>() >= self.mutation_rate {
            return Ok(value);
        }
        let mut values = value.into_seq()?;
        match self.mutation {
            SeqMutation::RandomReset => {
                let idx = rng.random_range(0..values.len());
                values[idx] = self.element.random_value(rng)?;
            }
            SeqMutation::Swap => swap(&mut values, rng),
            SeqMutation::Insertion => insertion(&mut values, rng),
            SeqMutation::Scramble => scramble(&mut values, rng),
            SeqMutation::Inversion => inversion(&mut values, rng),
        }
        Ok(GeneValue::Seq(values))
    }
}

// ============================================================================
// Order-changing operators, shared with permutation genes
// ============================================================================

/// Two distinct random indices into a slice of `len >= 2` elements.
///
/// Both indices are uniform over `0..len`; the second is redrawn from the
/// remaining positions, so the pair is always distinct and in bounds.
pub(crate) fn random_unique_index_pair(len: usize, rng: &mut dyn RngCore) -> (usize, usize) {
    debug_assert!(len >= 2);
    let a = rng.random_range(0..len);
    let mut b = rng.random_range(0..len - 1);
    if b >= a {
        b += 1;
    }
    (a, b)
}

pub(crate) fn swap(values: &mut [GeneValue], rng: &mut dyn RngCore) {
    let (a, b) = random_unique_index_pair(values.len(), rng);
    values.swap(a, b);
}

pub(crate) fn insertion(values: &mut Vec<GeneValue>, rng: &mut dyn RngCore) {
    let (from, to) = random_unique_index_pair(values.len(), rng);
    let item = values.remove(from);
    values.insert(to, item);
}

pub(crate) fn scramble(values: &mut [GeneValue], rng: &mut dyn RngCore) {
    let (a, b) = random_unique_index_pair(values.len(), rng);
    let (lo, hi) = (a.min(b), a.max(b));
    values[lo..hi].shuffle(rng);
}

pub(crate) fn inversion(values: &mut [GeneValue], rng: &mut dyn RngCore) {
    let (a, b) = random_unique_index_pair(values.len(), rng);
    let (lo, hi) = (a.min(b), a.max(b));
    values[lo..hi].reverse();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gene::IntGene;
    use crate::random::create_rng;

    fn int_element() -> Arc<dyn Gene> {
        // Element rate zero: mutation belongs to the sequence level.
        Arc::new(IntGene::new(0, 9, 0.0).unwrap())
    }

    fn seq_of(ints: &[i64]) -> GeneValue {
        GeneValue::Seq(ints.iter().map(|&i| GeneValue::Int(i)).collect())
    }

    fn ints_of(v: &GeneValue) -> Vec<i64> {
        v.as_seq()
            .unwrap()
            .iter()
            .map(|e| e.as_int().unwrap())
            .collect()
    }

    #[test]
    fn test_random_value_has_declared_length() {
        let gene = SequenceGene::new(
            int_element(),
            8,
            SeqCrossover::Uniform,
            SeqMutation::Swap,
            0.1,
        )
        .unwrap();
        let mut rng = create_rng(42);
        let v = gene.random_value(&mut rng).unwrap();
        assert_eq!(v.as_seq().unwrap().len(), 8);
    }

    #[test]
    fn test_uniform_crossover_picks_per_position() {
        let gene = SequenceGene::new(
            int_element(),
            6,
            SeqCrossover::Uniform,
            SeqMutation::Swap,
            0.0,
        )
        .unwrap();
        let mut rng = create_rng(42);
        let a = seq_of(&[0, 0, 0, 0, 0, 0]);
        let b = seq_of(&[1, 1, 1, 1, 1, 1]);
        let mut saw_mixed = false;
        for _ in 0..50 {
            let child = ints_of(&gene.crossover(&a, &b, &mut rng).unwrap());
            assert!(child.iter().all(|&x| x == 0 || x == 1));
            if child.contains(&0) && child.contains(&1) {
                saw_mixed = true;
            }
        }
        assert!(saw_mixed, "uniform crossover should mix parents");
    }

    #[test]
    fn test_n_point_produces_alternating_segments() {
        let n = 3;
        let len = 10;
        let gene = SequenceGene::new(
            int_element(),
            len,
            SeqCrossover::NPoint(n),
            SeqMutation::Swap,
            0.0,
        )
        .unwrap();
        let mut rng = create_rng(7);
        let a = seq_of(&[0; 10]);
        let b = seq_of(&[1; 10]);
        for _ in 0..100 {
            let child = ints_of(&gene.crossover(&a, &b, &mut rng).unwrap());
            // Count source switches: with n interior cuts there are
            // exactly n switches, hence n + 1 segments covering the
            // whole sequence.
            let switches = child.windows(2).filter(|w| w[0] != w[1]).count();
            assert_eq!(switches, n, "child {child:?} should have {n} cuts");
            assert_eq!(child.len(), len);
        }
    }

    #[test]
    fn test_one_and_two_point_match_n_point() {
        let a = seq_of(&[0, 0, 0, 0, 0, 0, 0, 0]);
        let b = seq_of(&[1, 1, 1, 1, 1, 1, 1, 1]);
        for (named, n) in [(SeqCrossover::OnePoint, 1), (SeqCrossover::TwoPoint, 2)] {
            let named_gene =
                SequenceGene::new(int_element(), 8, named, SeqMutation::Swap, 0.0).unwrap();
            let n_gene = SequenceGene::new(
                int_element(),
                8,
                SeqCrossover::NPoint(n),
                SeqMutation::Swap,
                0.0,
            )
            .unwrap();
            // Same seed, same draws, same child.
            let mut rng1 = create_rng(99);
            let mut rng2 = create_rng(99);
            for _ in 0..20 {
                let c1 = named_gene.crossover(&a, &b, &mut rng1).unwrap();
                let c2 = n_gene.crossover(&a, &b, &mut rng2).unwrap();
                assert_eq!(c1, c2);
            }
        }
    }

    #[test]
    fn test_debug_omits_element_gene() {
        let gene = SequenceGene::new(
            int_element(),
            8,
            SeqCrossover::Uniform,
            SeqMutation::Swap,
            0.1,
        )
        .unwrap();
        let rendered = format!("{gene:?}");
        assert!(rendered.contains("SequenceGene"));
        assert!(rendered.contains("length: 8"));
    }

    #[test]
    fn test_n_point_requires_positive_n() {
        let err = SequenceGene::new(
            int_element(),
            8,
            SeqCrossover::NPoint(0),
            SeqMutation::Swap,
            0.1,
        )
        .unwrap_err();
        assert!(matches!(err, EvolveError::Config(_)));
    }

    #[test]
    fn test_n_point_requires_enough_interior_positions() {
        // Length 5 has 3 interior positions; 4 cuts cannot fit.
        assert!(SequenceGene::new(
            int_element(),
            5,
            SeqCrossover::NPoint(4),
            SeqMutation::Swap,
            0.1,
        )
        .is_err());
        assert!(SequenceGene::new(
            int_element(),
            5,
            SeqCrossover::NPoint(3),
            SeqMutation::Swap,
            0.1,
        )
        .is_ok());
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let gene = SequenceGene::new(
            int_element(),
            6,
            SeqCrossover::Uniform,
            SeqMutation::Swap,
            0.1,
        )
        .unwrap();
        let mut rng = create_rng(42);
        let short = seq_of(&[1, 2, 3]);
        let ok = seq_of(&[1, 2, 3, 4, 5, 6]);
        let err = gene.crossover(&short, &ok, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            EvolveError::LengthMismatch {
                expected: 6,
                actual: 3
            }
        ));
    }

    #[test]
    fn test_mutation_rate_zero_is_identity() {
        let gene = SequenceGene::new(
            int_element(),
            5,
            SeqCrossover::Uniform,
            SeqMutation::Swap,
            0.0,
        )
        .unwrap();
        let mut rng = create_rng(42);
        let v = seq_of(&[1, 2, 3, 4, 5]);
        for _ in 0..50 {
            assert_eq!(gene.mutate(v.clone(), &mut rng).unwrap(), v);
        }
    }

    #[test]
    fn test_swap_mutation_preserves_multiset() {
        let gene = SequenceGene::new(
            int_element(),
            5,
            SeqCrossover::Uniform,
            SeqMutation::Swap,
            1.0,
        )
        .unwrap();
        let mut rng = create_rng(42);
        for _ in 0..50 {
            let v = ints_of(&gene.mutate(seq_of(&[1, 2, 3, 4, 5]), &mut rng).unwrap());
            let mut sorted = v.clone();
            sorted.sort_unstable();
            assert_eq!(sorted, vec![1, 2, 3, 4, 5]);
            assert_ne!(v, vec![1, 2, 3, 4, 5], "swap must move two elements");
        }
    }

    #[test]
    fn test_insertion_mutation_preserves_multiset_and_length() {
        let gene = SequenceGene::new(
            int_element(),
            6,
            SeqCrossover::Uniform,
            SeqMutation::Insertion,
            1.0,
        )
        .unwrap();
        let mut rng = create_rng(42);
        for _ in 0..50 {
            let v = ints_of(
                &gene
                    .mutate(seq_of(&[1, 2, 3, 4, 5, 6]), &mut rng)
                    .unwrap(),
            );
            assert_eq!(v.len(), 6);
            let mut sorted = v;
            sorted.sort_unstable();
            assert_eq!(sorted, vec![1, 2, 3, 4, 5, 6]);
        }
    }

    #[test]
    fn test_scramble_and_inversion_preserve_multiset() {
        for mutation in [SeqMutation::Scramble, SeqMutation::Inversion] {
            let gene =
                SequenceGene::new(int_element(), 7, SeqCrossover::Uniform, mutation, 1.0).unwrap();
            let mut rng = create_rng(42);
            for _ in 0..50 {
                let v = ints_of(
                    &gene
                        .mutate(seq_of(&[1, 2, 3, 4, 5, 6, 7]), &mut rng)
                        .unwrap(),
                );
                let mut sorted = v;
                sorted.sort_unstable();
                assert_eq!(sorted, vec![1, 2, 3, 4, 5, 6, 7]);
            }
        }
    }

    #[test]
    fn test_random_reset_replaces_one_element() {
        let gene = SequenceGene::new(
            int_element(),
            4,
            SeqCrossover::Uniform,
            SeqMutation::RandomReset,
            1.0,
        )
        .unwrap();
        let mut rng = create_rng(42);
        // Elements outside the element domain: any reset is visible.
        let v = ints_of(&gene.mutate(seq_of(&[100, 100, 100, 100]), &mut rng).unwrap());
        let replaced = v.iter().filter(|&&x| x != 100).count();
        assert_eq!(replaced, 1, "exactly one element should be reset, got {v:?}");
    }

    #[test]
    fn test_unique_index_pair_distinct_and_in_bounds() {
        let mut rng = create_rng(42);
        for len in 2..10 {
            for _ in 0..200 {
                let (a, b) = random_unique_index_pair(len, &mut rng);
                assert_ne!(a, b);
                assert!(a < len && b < len);
            }
        }
    }
}
