use pathevo_grid::Grid;
use rand::Rng;

use crate::{AllocationError, Individual, Population, operators};

/// Parameters for producing one generation from the previous one.
///
/// Each call to [`reproduce`](Self::reproduce) builds the next population in
/// three stages:
///
/// 1. **Elitism**: the top `elite_count` individuals are copied unchanged
/// 2. **Breeding**: the sorted population is walked in adjacent pairs
///    (`0` with `1`, `2` with `3`, ...) and each pair yields one child, up to
///    `max_children`
/// 3. **Top-up**: fresh random-walk individuals fill the remaining slots up to
///    `population_size`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reproducer {
    /// Size of every produced population.
    pub population_size: usize,
    /// Number of top individuals carried over unchanged.
    pub elite_count: usize,
    /// Upper bound on crossover children per generation.
    pub max_children: usize,
    /// Per-gene mutation probability applied to every child.
    pub mutation_rate: f64,
    /// Sequence length a child is built with, before walking truncates it.
    pub child_len: usize,
}

impl Reproducer {
    pub const DEFAULT: Self = Self {
        population_size: 100,
        elite_count: 5,
        max_children: 45,
        mutation_rate: 0.05,
        child_len: 100,
    };

    /// Produces the next generation from `population`.
    ///
    /// The result always holds exactly `population_size` individuals, with the
    /// elites first, then the children, then the random top-up. On allocation
    /// failure the partially built population is dropped and the error is
    /// returned.
    ///
    /// # Panics
    ///
    /// Panics if `population` is not sorted by fitness in descending order.
    pub fn reproduce<R>(
        &self,
        population: &Population,
        grid: &Grid,
        rng: &mut R,
    ) -> Result<Population, AllocationError>
    where
        R: Rng + ?Sized,
    {
        assert!(population.is_sorted_by_fitness());

        let mut next = population.copy_top_n(self.elite_count)?;
        let elites = next.len();
        next.try_reserve(self.population_size.saturating_sub(elites))?;

        for pair in population
            .individuals()
            .chunks_exact(2)
            .take(self.max_children)
        {
            if next.len() >= self.population_size {
                break;
            }
            next.push(self.breed(&pair[0], &pair[1], grid, rng)?);
        }
        let children = next.len() - elites;

        let missing = self.population_size.saturating_sub(next.len());
        next.extend_random(grid, missing, rng)?;

        log::debug!(
            "reproduced {elites} elites, {children} children, {missing} random individuals"
        );
        Ok(next)
    }

    /// Builds one child from two parents: crossover, then mutation, then a walk
    /// over `grid` that truncates the sequence where it halts.
    pub fn breed<R>(
        &self,
        head_parent: &Individual,
        tail_parent: &Individual,
        grid: &Grid,
        rng: &mut R,
    ) -> Result<Individual, AllocationError>
    where
        R: Rng + ?Sized,
    {
        let mut genes = operators::crossover(
            head_parent.moves(),
            tail_parent.moves(),
            self.child_len,
            rng,
        )?;
        operators::mutate(&mut genes, self.mutation_rate, rng);
        Ok(Individual::from_walk(grid, genes))
    }
}

impl Default for Reproducer {
    fn default() -> Self {
        Self::DEFAULT
    }
}
