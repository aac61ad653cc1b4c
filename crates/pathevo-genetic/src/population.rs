use std::slice;

use pathevo_grid::Grid;
use rand::Rng;

use crate::{
    AllocationError, FitnessStats, Individual,
    error::{try_reserve, try_vec},
    generator,
};

/// An ordered collection of individuals.
///
/// Order only matters around reproduction: the population is sorted by
/// fitness (best first) and the leading individuals become elites. Each
/// population owns its individuals outright; nothing is shared between
/// generations.
#[derive(Debug, Clone, Default)]
pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty population with room for `capacity` individuals.
    pub fn with_capacity(capacity: usize) -> Result<Self, AllocationError> {
        Ok(Self {
            individuals: try_vec(capacity, "population")?,
        })
    }

    /// Creates a population of `count` random-walk individuals.
    ///
    /// See [`generator::generate`] for how each individual is built.
    pub fn random<R>(grid: &Grid, count: usize, rng: &mut R) -> Result<Self, AllocationError>
    where
        R: Rng + ?Sized,
    {
        let mut population = Self::with_capacity(count)?;
        population.extend_random(grid, count, rng)?;
        Ok(population)
    }

    /// Appends `count` random-walk individuals.
    pub fn extend_random<R>(
        &mut self,
        grid: &Grid,
        count: usize,
        rng: &mut R,
    ) -> Result<(), AllocationError>
    where
        R: Rng + ?Sized,
    {
        self.try_reserve(count)?;
        for _ in 0..count {
            self.individuals.push(generator::generate(grid, rng)?);
        }
        Ok(())
    }

    pub fn try_reserve(&mut self, additional: usize) -> Result<(), AllocationError> {
        try_reserve(&mut self.individuals, additional, "population")
    }

    pub fn push(&mut self, individual: Individual) {
        self.individuals.push(individual);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    #[must_use]
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    pub fn iter(&self) -> slice::Iter<'_, Individual> {
        self.individuals.iter()
    }

    /// Returns the individual with the highest fitness.
    #[must_use]
    pub fn best(&self) -> Option<&Individual> {
        self.individuals
            .iter()
            .max_by(|a, b| a.fitness().total_cmp(&b.fitness()))
    }

    /// Sorts by fitness in descending order (best first).
    ///
    /// Uses a total order on `f64`, so allocation-failure sentinels
    /// (`-inf`) end up last. Ties keep no particular order.
    pub fn sort_by_fitness_desc(&mut self) {
        self.individuals
            .sort_unstable_by(|a, b| b.fitness().total_cmp(&a.fitness()));
    }

    #[must_use]
    pub fn is_sorted_by_fitness(&self) -> bool {
        self.individuals
            .is_sorted_by(|a, b| a.fitness() >= b.fitness())
    }

    /// Deep-copies the first `n` individuals (or all, if fewer) into a new population.
    ///
    /// Intended for an already-sorted population, where the prefix holds the
    /// elites. The source is left untouched, and the copies share no storage
    /// with it.
    pub fn copy_top_n(&self, n: usize) -> Result<Self, AllocationError> {
        let n = n.min(self.individuals.len());
        let mut copy = Self::with_capacity(n)?;
        for ind in &self.individuals[..n] {
            copy.individuals.push(ind.try_clone()?);
        }
        Ok(copy)
    }

    /// Summarizes the fitness distribution, or `None` for an empty population.
    #[must_use]
    pub fn fitness_stats(&self) -> Option<FitnessStats> {
        FitnessStats::new(self.individuals.iter().map(Individual::fitness))
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a Individual;
    type IntoIter = slice::Iter<'a, Individual>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Population {
    type Item = Individual;
    type IntoIter = std::vec::IntoIter<Individual>;

    fn into_iter(self) -> Self::IntoIter {
        self.individuals.into_iter()
    }
}
