//! The generational loop.
//!
//! [`Engine::evolve`] orchestrates the complete evolutionary process:
//! initial random population → per-generation elitism, culling,
//! crossover-skip, migration, selection and breeding → fitness
//! evaluation → statistics. It returns one [`GenerationRecord`] per
//! generation, in order.

use crate::config::EvolveConfig;
use crate::error::EvolveError;
use crate::organism::{GeneSet, Organism};
use crate::random::create_rng;
use crate::species::Species;
use log::{debug, info};
use rand::{Rng, RngCore};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Statistics captured once per generation. Read-only once produced.
#[derive(Debug, Clone)]
pub struct GenerationRecord {
    /// 1-based generation number.
    pub generation: usize,

    /// Snapshot of the full population after evaluation.
    pub population: Vec<Organism>,

    /// The most fit organism of this generation.
    pub best: Organism,

    /// The least fit organism of this generation.
    pub worst: Organism,

    pub max_fitness: f64,
    pub min_fitness: f64,
    pub avg_fitness: f64,
}

/// Result of an evolutionary run.
#[derive(Debug, Clone)]
pub struct EvolveResult {
    /// One record per completed generation, in generation order.
    pub history: Vec<GenerationRecord>,

    /// The most fit organism seen across the whole run, or `None` when
    /// no generation completed.
    pub best: Option<Organism>,

    /// Number of generations completed.
    pub generations: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,
}

/// Executes the generational loop.
///
/// # Usage
///
/// ```ignore
/// let result = Engine::evolve(&my_species, &EvolveConfig::default().with_seed(42))?;
/// println!("best fitness: {:?}", result.best.map(|o| o.fitness()));
/// ```
pub struct Engine;

impl Engine {
    /// Runs the evolutionary loop to completion.
    pub fn evolve<S: Species>(
        species: &S,
        config: &EvolveConfig,
    ) -> Result<EvolveResult, EvolveError> {
        Self::evolve_with_cancel(species, config, None)
    }

    /// Runs the evolutionary loop with an optional cancellation token.
    ///
    /// The flag is checked at each generation boundary; when set, the
    /// run stops before starting the next generation and returns the
    /// history accumulated so far with `cancelled = true`.
    pub fn evolve_with_cancel<S: Species>(
        species: &S,
        config: &EvolveConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<EvolveResult, EvolveError> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };

        let gene_set = Arc::new(species.gene_set()?);
        if gene_set.is_empty() {
            return Err(EvolveError::EmptyGeneSet);
        }

        info!(
            "starting evolution: population={}, generations={}, selection={:?}",
            config.population_size, config.generations, config.selection
        );

        let mut population: Vec<Organism> = Vec::new();
        let mut history: Vec<GenerationRecord> = Vec::with_capacity(config.generations);
        let mut best: Option<Organism> = None;
        let mut cancelled = false;

        for generation in 1..=config.generations {
            if let Some(flag) = &cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            population = if population.is_empty() {
                (0..config.population_size)
                    .map(|_| gene_set.spawn(&mut rng))
                    .collect::<Result<Vec<_>, _>>()?
            } else {
                next_generation(species, config, &gene_set, population, &mut rng)?
            };

            // Every organism is scored exactly once per generation,
            // elites and carried organisms included.
            for organism in &mut population {
                let fitness = species.evaluate(organism);
                organism.set_fitness(fitness);
            }

            let record = make_record(generation, &population)?;
            debug!(
                "generation {}: max={:.4} avg={:.4} min={:.4}",
                generation, record.max_fitness, record.avg_fitness, record.min_fitness
            );

            if best
                .as_ref()
                .and_then(|b| b.fitness())
                .map_or(true, |f| record.max_fitness > f)
            {
                best = Some(record.best.clone());
            }

            species.on_generation(&record);
            history.push(record);
        }

        info!(
            "evolution finished after {} generation(s){}",
            history.len(),
            if cancelled { " (cancelled)" } else { "" }
        );

        Ok(EvolveResult {
            generations: history.len(),
            history,
            best,
            cancelled,
        })
    }
}

/// Produces the next generation from a fully scored population.
fn next_generation<S: Species>(
    species: &S,
    config: &EvolveConfig,
    gene_set: &Arc<GeneSet>,
    mut population: Vec<Organism>,
    rng: &mut dyn RngCore,
) -> Result<Vec<Organism>, EvolveError> {
    let size = config.population_size;
    population.sort_by(|a, b| {
        b.fitness()
            .partial_cmp(&a.fitness())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let elite_count = (config.elite_rate * size as f64).floor() as usize;
    let cull_count = (config.cull_rate * size as f64).floor() as usize;

    // Everyone but the culled tail stays eligible for breeding,
    // elites and carried organisms included.
    let survivors = &population[..size - cull_count];

    // Middle band: an independent draw per organism decides whether it
    // becomes breeding material or is carried forward unchanged.
    let mut direct_carry: Vec<Organism> = Vec::new();
    for organism in &survivors[elite_count..] {
        if rng.random::<f64>() >= config.crossover_rate {
            direct_carry.push(organism.clone());
        }
    }

    // Fresh organisms join the breeding pool, scored immediately so
    // fitness-weighted strategies see them correctly.
    let migrant_count = (config.migration_rate * size as f64).floor() as usize;
    let mut parent_pool: Vec<Organism> = survivors.to_vec();
    for _ in 0..migrant_count {
        let mut migrant = gene_set.spawn(rng)?;
        let fitness = species.evaluate(&migrant);
        migrant.set_fitness(fitness);
        parent_pool.push(migrant);
    }

    let offspring_count = size - elite_count - direct_carry.len();

    let mut next = Vec::with_capacity(size);
    next.extend_from_slice(&population[..elite_count]);
    next.extend(direct_carry);
    if offspring_count > 0 {
        let offspring = config.selection.offspring(
            &parent_pool,
            offspring_count,
            config.unique_parents,
            rng,
        )?;
        next.extend(offspring);
    }

    debug_assert_eq!(next.len(), size);
    Ok(next)
}

/// Captures the per-generation statistics over a scored population.
fn make_record(generation: usize, population: &[Organism]) -> Result<GenerationRecord, EvolveError> {
    let mut best = &population[0];
    let mut worst = &population[0];
    let mut max_fitness = population[0].scored_fitness()?;
    let mut min_fitness = max_fitness;
    let mut sum = 0.0;
    for organism in population {
        let fitness = organism.scored_fitness()?;
        sum += fitness;
        if fitness > max_fitness {
            max_fitness = fitness;
            best = organism;
        }
        if fitness < min_fitness {
            min_fitness = fitness;
            worst = organism;
        }
    }
    Ok(GenerationRecord {
        generation,
        population: population.to_vec(),
        best: best.clone(),
        worst: worst.clone(),
        max_fitness,
        min_fitness,
        avg_fitness: sum / population.len() as f64,
    })
}
