//! Organisms and the gene registry that defines a species.
//!
//! A [`GeneSet`] is the ordered, shared registry of named genes for one
//! species; an [`Organism`] owns one value per registered gene plus a
//! cached fitness score. Gene behavior is shared through `Arc`, values
//! are owned per organism.

use crate::error::EvolveError;
use crate::gene::{Gene, GeneValue};
use rand::RngCore;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_ORGANISM_ID: AtomicU64 = AtomicU64::new(1);

/// Ordered registry of named genes, shared by every organism of a species.
///
/// Two organisms belong to the same species exactly when they reference
/// the same `Arc<GeneSet>`; structural equality of two registries is not
/// enough to make their organisms interbreedable.
#[derive(Default)]
pub struct GeneSet {
    genes: Vec<(String, Arc<dyn Gene>)>,
}

impl GeneSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a gene under a name. Names must be unique per set.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        gene: Arc<dyn Gene>,
    ) -> Result<(), EvolveError> {
        let name = name.into();
        if self.genes.iter().any(|(n, _)| *n == name) {
            return Err(EvolveError::DuplicateGene(name));
        }
        self.genes.push((name, gene));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.genes.iter().map(|(n, _)| n.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Gene>> {
        self.genes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, g)| g)
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.genes.iter().position(|(n, _)| n == name)
    }

    /// Creates a fresh organism: every gene takes its initial value.
    pub fn spawn(self: &Arc<Self>, rng: &mut dyn RngCore) -> Result<Organism, EvolveError> {
        if self.genes.is_empty() {
            return Err(EvolveError::EmptyGeneSet);
        }
        let values = self
            .genes
            .iter()
            .map(|(_, gene)| gene.initial_value(rng))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Organism {
            id: NEXT_ORGANISM_ID.fetch_add(1, Ordering::Relaxed),
            genes: Arc::clone(self),
            values,
            fitness: None,
            parents: Vec::new(),
        })
    }
}

/// One candidate solution: a set of gene values plus a cached fitness.
///
/// Organisms are distinct individuals even when their values are equal;
/// identity is the process-unique [`id`](Organism::id). Cloning preserves
/// the id, so clones are snapshots of the same individual, used for
/// generation records.
#[derive(Clone)]
pub struct Organism {
    id: u64,
    genes: Arc<GeneSet>,
    values: Vec<GeneValue>,
    fitness: Option<f64>,
    parents: Vec<u64>,
}

impl Organism {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Cached fitness, or `None` if this organism has not been scored.
    pub fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    /// Fitness required to be present, for selection over scored pools.
    pub(crate) fn scored_fitness(&self) -> Result<f64, EvolveError> {
        self.fitness
            .ok_or(EvolveError::UnscoredOrganism { id: self.id })
    }

    pub(crate) fn set_fitness(&mut self, fitness: f64) {
        self.fitness = Some(fitness);
    }

    /// Ids of the two parents this organism was bred from, or empty for
    /// a spawned organism. Provenance only, never consulted by the engine.
    pub fn parents(&self) -> &[u64] {
        &self.parents
    }

    pub fn gene_set(&self) -> &Arc<GeneSet> {
        &self.genes
    }

    /// The current value for a registered gene name.
    pub fn value(&self, name: &str) -> Option<&GeneValue> {
        self.genes.index_of(name).map(|i| &self.values[i])
    }

    /// All `(name, value)` pairs in registration order.
    pub fn values(&self) -> impl Iterator<Item = (&str, &GeneValue)> {
        self.genes
            .names()
            .zip(self.values.iter())
    }

    /// Breeds this organism with another of the same species.
    ///
    /// Every gene combines the two parent values through
    /// [`Gene::from_parent_values`] (crossover, then mutation, exactly
    /// once). The child records both parent ids and starts unscored.
    pub fn breed(&self, other: &Organism, rng: &mut dyn RngCore) -> Result<Organism, EvolveError> {
        if !Arc::ptr_eq(&self.genes, &other.genes) {
            return Err(EvolveError::SpeciesMismatch);
        }
        let values = self
            .genes
            .genes
            .iter()
            .zip(self.values.iter().zip(other.values.iter()))
            .map(|((_, gene), (a, b))| gene.from_parent_values(a, b, rng))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Organism {
            id: NEXT_ORGANISM_ID.fetch_add(1, Ordering::Relaxed),
            genes: Arc::clone(&self.genes),
            values,
            fitness: None,
            parents: vec![self.id, other.id],
        })
    }
}

impl std::fmt::Debug for Organism {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Organism")
            .field("id", &self.id)
            .field("fitness", &self.fitness)
            .field("values", &self.values)
            .field("parents", &self.parents)
            .finish()
    }
}
