//! Selection strategies: turning a scored parent pool into offspring.
//!
//! All strategies assume **maximization** (higher fitness = better) and
//! produce each offspring by breeding two drawn parents. Per-call state
//! (fitness totals, rank orderings) is computed once, not per draw.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use crate::error::EvolveError;
use crate::organism::Organism;
use rand::seq::index;
use rand::{Rng, RngCore};

/// Strategy for choosing breeding parents from a scored pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Roulette-wheel sampling weighted by raw fitness share.
    ///
    /// Undefined when the pool's total fitness is not positive; such
    /// pools are reported as [`EvolveError::DegenerateFitness`].
    Proportional,

    /// Roulette-wheel sampling over ascending fitness ranks `1..=N`.
    ///
    /// Flattens the pressure exerted by fitness magnitude and outliers.
    Rank,

    /// Draw `sample_size` distinct organisms, keep the fittest.
    ///
    /// With `sample_size` equal to the pool size this deterministically
    /// returns the pool maximum.
    Tournament(usize),

    /// Uniform random draws, ignoring fitness entirely.
    Uniform,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Tournament(3)
    }
}

impl Selection {
    /// Validates strategy parameters that do not depend on the pool.
    pub(crate) fn validate(&self) -> Result<(), EvolveError> {
        if let Selection::Tournament(0) = self {
            return Err(EvolveError::Config(
                "tournament sample size must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Produces exactly `num_offspring` offspring from the pool.
    ///
    /// Every pool member must carry a cached fitness. With
    /// `unique_parents`, the second parent of each pair is redrawn until
    /// it differs from the first by identity; pools that can never yield
    /// two distinct parents are rejected up front.
    pub fn offspring(
        &self,
        pool: &[Organism],
        num_offspring: usize,
        unique_parents: bool,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<Organism>, EvolveError> {
        if pool.is_empty() {
            return Err(EvolveError::EmptyParentPool);
        }
        if num_offspring < 1 {
            return Err(EvolveError::NoOffspringRequested);
        }
        self.validate()?;
        if unique_parents {
            if pool.len() < 2 {
                return Err(EvolveError::UniqueParentsInfeasible);
            }
            // A tournament over the whole pool always crowns the same
            // winner, so the redraw could never terminate.
            if let Selection::Tournament(k) = self {
                if *k >= pool.len() {
                    return Err(EvolveError::UniqueParentsInfeasible);
                }
            }
        }

        let sampler = Sampler::prepare(self, pool)?;
        let mut offspring = Vec::with_capacity(num_offspring);
        for _ in 0..num_offspring {
            let first = sampler.draw(pool, rng);
            let mut second = sampler.draw(pool, rng);
            while unique_parents && second.id() == first.id() {
                second = sampler.draw(pool, rng);
            }
            offspring.push(first.breed(second, rng)?);
        }
        Ok(offspring)
    }
}

/// Per-call sampling state, computed once per [`Selection::offspring`].
enum Sampler {
    Proportional { fitnesses: Vec<f64>, total: f64 },
    Rank { order: Vec<usize>, rank_sum: f64 },
    Tournament { sample_size: usize },
    Uniform,
}

impl Sampler {
    fn prepare(selection: &Selection, pool: &[Organism]) -> Result<Self, EvolveError> {
        // Selection runs over scored pools only, whichever strategy.
        let fitnesses = pool
            .iter()
            .map(|o| o.scored_fitness())
            .collect::<Result<Vec<f64>, _>>()?;

        match selection {
            Selection::Proportional => {
                let total: f64 = fitnesses.iter().sum();
                if total <= 0.0 {
                    return Err(EvolveError::DegenerateFitness { total });
                }
                Ok(Sampler::Proportional { fitnesses, total })
            }
            Selection::Rank => {
                let n = pool.len();
                let mut order: Vec<usize> = (0..n).collect();
                order.sort_by(|&a, &b| {
                    fitnesses[a]
                        .partial_cmp(&fitnesses[b])
                        .unwrap_or(std::cmp::Ordering::Equal)
                });
                let rank_sum = (n * (n + 1)) as f64 / 2.0;
                Ok(Sampler::Rank { order, rank_sum })
            }
            Selection::Tournament(sample_size) => {
                if *sample_size > pool.len() {
                    return Err(EvolveError::TournamentPoolTooSmall {
                        sample_size: *sample_size,
                        pool_size: pool.len(),
                    });
                }
                Ok(Sampler::Tournament {
                    sample_size: *sample_size,
                })
            }
            Selection::Uniform => Ok(Sampler::Uniform),
        }
    }

    fn draw<'p>(&self, pool: &'p [Organism], rng: &mut dyn RngCore) -> &'p Organism {
        match self {
            Sampler::Proportional { fitnesses, total } => {
                let stop = rng.random_range(0.0..*total);
                let mut cumulative = 0.0;
                for (i, f) in fitnesses.iter().enumerate() {
                    cumulative += f;
                    if cumulative >= stop {
                        return &pool[i];
                    }
                }
                &pool[pool.len() - 1] // floating-point fallback
            }
            Sampler::Rank { order, rank_sum } => {
                let stop = rng.random_range(0.0..*rank_sum);
                let mut cumulative = 0.0;
                for (rank0, &pool_idx) in order.iter().enumerate() {
                    cumulative += (rank0 + 1) as f64;
                    if cumulative >= stop {
                        return &pool[pool_idx];
                    }
                }
                &pool[order[order.len() - 1]] // floating-point fallback
            }
            Sampler::Tournament { sample_size } => {
                let contestants = index::sample(rng, pool.len(), *sample_size);
                contestants
                    .iter()
                    .map(|i| &pool[i])
                    .max_by(|a, b| {
                        a.fitness()
                            .partial_cmp(&b.fitness())
                            .unwrap_or(std::cmp::Ordering::Equal)
                    })
                    .expect("tournament sample size is at least 1")
            }
            Sampler::Uniform => &pool[rng.random_range(0..pool.len())],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gene::IntGene;
    use crate::organism::GeneSet;
    use crate::random::create_rng;
    use std::sync::Arc;

    /// Pool of organisms with the given fitness values.
    fn make_pool(fitnesses: &[f64]) -> Vec<Organism> {
        let mut set = GeneSet::new();
        set.register("x", Arc::new(IntGene::new(0, 10, 0.0).unwrap()))
            .unwrap();
        let set = Arc::new(set);
        let mut rng = create_rng(0);
        fitnesses
            .iter()
            .map(|&f| {
                let mut o = set.spawn(&mut rng).unwrap();
                o.set_fitness(f);
                o
            })
            .collect()
    }

    /// Frequency with which each pool index is drawn, over `trials` draws.
    fn draw_counts(selection: Selection, pool: &[Organism], trials: usize) -> Vec<usize> {
        let mut rng = create_rng(42);
        let sampler = Sampler::prepare(&selection, pool).unwrap();
        let mut counts = vec![0usize; pool.len()];
        for _ in 0..trials {
            let drawn = sampler.draw(pool, &mut rng);
            let idx = pool.iter().position(|o| o.id() == drawn.id()).unwrap();
            counts[idx] += 1;
        }
        counts
    }

    #[test]
    fn test_proportional_equal_fitness_is_uniform() {
        let pool = make_pool(&[1.0, 1.0, 1.0, 1.0]);
        let counts = draw_counts(Selection::Proportional, &pool, 10_000);
        for &c in &counts {
            assert!(
                (2000..3000).contains(&c),
                "expected ~2500 draws per index, got {counts:?}"
            );
        }
    }

    #[test]
    fn test_proportional_dominant_fitness_dominates() {
        let pool = make_pool(&[0.0, 0.0, 0.0, 100.0]);
        let counts = draw_counts(Selection::Proportional, &pool, 10_000);
        assert!(
            counts[3] > 9900,
            "index with all the fitness should win almost always, got {counts:?}"
        );
    }

    #[test]
    fn test_proportional_zero_total_is_degenerate() {
        let pool = make_pool(&[0.0, 0.0, 0.0]);
        let mut rng = create_rng(42);
        let err = Selection::Proportional
            .offspring(&pool, 1, false, &mut rng)
            .unwrap_err();
        assert!(matches!(err, EvolveError::DegenerateFitness { .. }));
    }

    #[test]
    fn test_proportional_negative_total_is_degenerate() {
        let pool = make_pool(&[-1.0, -2.0, 1.0]);
        let mut rng = create_rng(42);
        let err = Selection::Proportional
            .offspring(&pool, 1, false, &mut rng)
            .unwrap_err();
        assert!(matches!(err, EvolveError::DegenerateFitness { .. }));
    }

    #[test]
    fn test_rank_flattens_outliers() {
        // Fitness outlier at index 0; rank selection should prefer it,
        // but only by its rank share (4/10), not its fitness share.
        let pool = make_pool(&[1000.0, 3.0, 2.0, 1.0]);
        let counts = draw_counts(Selection::Rank, &pool, 10_000);
        assert!(counts[0] > counts[1]);
        assert!(counts[1] > counts[2]);
        assert!(counts[2] > counts[3]);
        assert!(
            counts[0] < 5000,
            "rank selection should not let the outlier dominate, got {counts:?}"
        );
    }

    #[test]
    fn test_tournament_full_pool_is_deterministic_max() {
        let pool = make_pool(&[5.0, 9.0, 1.0, 7.0]);
        let counts = draw_counts(Selection::Tournament(4), &pool, 1000);
        assert_eq!(counts[1], 1000, "full-pool tournament must always return the max");
    }

    #[test]
    fn test_tournament_pool_too_small() {
        let pool = make_pool(&[1.0, 2.0]);
        let mut rng = create_rng(42);
        let err = Selection::Tournament(3)
            .offspring(&pool, 1, false, &mut rng)
            .unwrap_err();
        assert!(matches!(
            err,
            EvolveError::TournamentPoolTooSmall {
                sample_size: 3,
                pool_size: 2
            }
        ));
    }

    #[test]
    fn test_tournament_zero_sample_size_rejected() {
        let pool = make_pool(&[1.0, 2.0]);
        let mut rng = create_rng(42);
        let err = Selection::Tournament(0)
            .offspring(&pool, 1, false, &mut rng)
            .unwrap_err();
        assert!(matches!(err, EvolveError::Config(_)));
    }

    #[test]
    fn test_uniform_ignores_fitness() {
        let pool = make_pool(&[0.0, 0.0, 0.0, 1000.0]);
        let counts = draw_counts(Selection::Uniform, &pool, 10_000);
        for &c in &counts {
            assert!(
                (2000..3000).contains(&c),
                "uniform selection should ignore fitness, got {counts:?}"
            );
        }
    }

    #[test]
    fn test_offspring_count_is_exact() {
        let pool = make_pool(&[1.0, 2.0, 3.0, 4.0]);
        let mut rng = create_rng(42);
        for n in [1, 4, 9] {
            let offspring = Selection::Proportional
                .offspring(&pool, n, false, &mut rng)
                .unwrap();
            assert_eq!(offspring.len(), n);
            for child in &offspring {
                assert_eq!(child.parents().len(), 2);
                assert!(child.fitness().is_none());
            }
        }
    }

    #[test]
    fn test_empty_pool_rejected() {
        let mut rng = create_rng(42);
        let err = Selection::Uniform
            .offspring(&[], 1, false, &mut rng)
            .unwrap_err();
        assert!(matches!(err, EvolveError::EmptyParentPool));
    }

    #[test]
    fn test_zero_offspring_rejected() {
        let pool = make_pool(&[1.0, 2.0]);
        let mut rng = create_rng(42);
        let err = Selection::Uniform
            .offspring(&pool, 0, false, &mut rng)
            .unwrap_err();
        assert!(matches!(err, EvolveError::NoOffspringRequested));
    }

    #[test]
    fn test_unscored_pool_rejected() {
        let mut set = GeneSet::new();
        set.register("x", Arc::new(IntGene::new(0, 10, 0.0).unwrap()))
            .unwrap();
        let set = Arc::new(set);
        let mut rng = create_rng(42);
        let pool = vec![set.spawn(&mut rng).unwrap(), set.spawn(&mut rng).unwrap()];
        let err = Selection::Uniform
            .offspring(&pool, 1, false, &mut rng)
            .unwrap_err();
        assert!(matches!(err, EvolveError::UnscoredOrganism { .. }));
    }

    #[test]
    fn test_unique_parents_never_pairs_an_organism_with_itself() {
        let pool = make_pool(&[1.0, 1.0, 1.0]);
        let mut rng = create_rng(42);
        for selection in [
            Selection::Proportional,
            Selection::Rank,
            Selection::Tournament(2),
            Selection::Uniform,
        ] {
            let offspring = selection.offspring(&pool, 200, true, &mut rng).unwrap();
            for child in &offspring {
                let parents = child.parents();
                assert_ne!(parents[0], parents[1], "{selection:?} paired an organism with itself");
            }
        }
    }

    #[test]
    fn test_unique_parents_pool_of_one_rejected() {
        let pool = make_pool(&[1.0]);
        let mut rng = create_rng(42);
        let err = Selection::Uniform
            .offspring(&pool, 1, true, &mut rng)
            .unwrap_err();
        assert!(matches!(err, EvolveError::UniqueParentsInfeasible));
    }

    #[test]
    fn test_unique_parents_full_pool_tournament_rejected() {
        let pool = make_pool(&[1.0, 2.0, 3.0]);
        let mut rng = create_rng(42);
        let err = Selection::Tournament(3)
            .offspring(&pool, 1, true, &mut rng)
            .unwrap_err();
        assert!(matches!(err, EvolveError::UniqueParentsInfeasible));
    }
}
