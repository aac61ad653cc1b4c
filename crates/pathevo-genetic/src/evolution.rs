use std::mem;

use pathevo_grid::Grid;
use rand::Rng;

use crate::{EvolutionError, GenerationStats, Population, Reproducer};

/// Lifecycle of an [`Evolution`].
///
/// ```text
/// Initial --populate--> Populated { 0 } --advance--> Populated { 1 } ... --finish--> Final
///                 \                          \
///                  `-- failure --> Aborted    `-- failure --> Aborted
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum EvolutionState {
    Initial,
    Populated { generation: usize },
    Final,
    Aborted,
}

/// Generation loop over a single grid.
///
/// Owns the random source and the current population. Each
/// [`advance`](Self::advance) sorts the current population, hands it to the
/// [`Reproducer`] and replaces it with the result, dropping the previous
/// generation.
#[derive(Debug)]
pub struct Evolution<'g, R> {
    grid: &'g Grid,
    reproducer: Reproducer,
    rng: R,
    population: Population,
    state: EvolutionState,
}

impl<'g, R> Evolution<'g, R>
where
    R: Rng,
{
    #[must_use]
    pub fn new(grid: &'g Grid, reproducer: Reproducer, rng: R) -> Self {
        Self {
            grid,
            reproducer,
            rng,
            population: Population::new(),
            state: EvolutionState::Initial,
        }
    }

    #[must_use]
    pub fn state(&self) -> EvolutionState {
        self.state
    }

    #[must_use]
    pub fn grid(&self) -> &'g Grid {
        self.grid
    }

    #[must_use]
    pub fn reproducer(&self) -> &Reproducer {
        &self.reproducer
    }

    /// The current population, in the order reproduction left it.
    #[must_use]
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Builds generation 0 from random walks.
    ///
    /// # Panics
    ///
    /// Panics unless the state is [`EvolutionState::Initial`].
    pub fn populate(&mut self) -> Result<GenerationStats, EvolutionError> {
        assert!(self.state.is_initial(), "populate called in {:?}", self.state);
        match Population::random(self.grid, self.reproducer.population_size, &mut self.rng) {
            Ok(population) => self.population = population,
            Err(source) => {
                log::error!("{source}");
                self.abort();
                return Err(EvolutionError::Populate { source });
            }
        }
        self.state = EvolutionState::Populated { generation: 0 };
        Ok(self.record(0))
    }

    /// Produces the next generation.
    ///
    /// # Panics
    ///
    /// Panics unless the state is [`EvolutionState::Populated`].
    pub fn advance(&mut self) -> Result<GenerationStats, EvolutionError> {
        let EvolutionState::Populated { generation } = self.state else {
            panic!("advance called in {:?}", self.state);
        };
        let generation = generation + 1;

        self.population.sort_by_fitness_desc();
        match self
            .reproducer
            .reproduce(&self.population, self.grid, &mut self.rng)
        {
            Ok(next) => self.population = next,
            Err(source) => {
                log::error!("generation {generation}: {source}");
                self.abort();
                return Err(EvolutionError::Reproduction { generation, source });
            }
        }
        self.state = EvolutionState::Populated { generation };
        Ok(self.record(generation))
    }

    /// Sorts the last population (best first) and hands it out.
    ///
    /// # Panics
    ///
    /// Panics unless the state is [`EvolutionState::Populated`].
    pub fn finish(&mut self) -> Population {
        assert!(self.state.is_populated(), "finish called in {:?}", self.state);
        self.population.sort_by_fitness_desc();
        self.state = EvolutionState::Final;
        mem::take(&mut self.population)
    }

    /// Populates, advances `generations` times, then finishes.
    ///
    /// `observe` is called with the statistics of the initial population and
    /// of every generation after it.
    pub fn run<F>(
        &mut self,
        generations: usize,
        mut observe: F,
    ) -> Result<Population, EvolutionError>
    where
        F: FnMut(&GenerationStats),
    {
        observe(&self.populate()?);
        for _ in 0..generations {
            observe(&self.advance()?);
        }
        Ok(self.finish())
    }

    fn abort(&mut self) {
        self.population = Population::new();
        self.state = EvolutionState::Aborted;
    }

    fn record(&self, generation: usize) -> GenerationStats {
        let stats = GenerationStats::new(generation, &self.population, self.grid);
        if let Some(fitness) = &stats.fitness {
            log::info!(
                "generation {generation}: best {:.2}, mean {:.2}, median {:.2}, {} at goal",
                fitness.max,
                fitness.mean,
                fitness.median,
                stats.goal_reached,
            );
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    fn grid() -> Grid {
        "6 7\nS......\n.##.##.\n.#...#.\n.#.#.#.\n...#...\n.#...#E\n"
            .parse()
            .unwrap()
    }

    #[test]
    fn test_state_transitions() {
        let grid = grid();
        let mut evolution = Evolution::new(&grid, Reproducer::DEFAULT, Pcg32::seed_from_u64(0));
        assert_eq!(evolution.state(), EvolutionState::Initial);
        assert!(evolution.population().is_empty());

        let stats = evolution.populate().unwrap();
        assert_eq!(stats.generation, 0);
        assert_eq!(evolution.state(), EvolutionState::Populated { generation: 0 });
        assert_eq!(evolution.population().len(), 100);

        let stats = evolution.advance().unwrap();
        assert_eq!(stats.generation, 1);
        assert_eq!(evolution.state(), EvolutionState::Populated { generation: 1 });
        assert_eq!(evolution.population().len(), 100);

        let population = evolution.finish();
        assert!(evolution.state().is_final());
        assert!(evolution.population().is_empty());
        assert_eq!(population.len(), 100);
        assert!(population.is_sorted_by_fitness());
    }

    #[test]
    fn test_run_observes_every_generation() {
        let grid = grid();
        let mut evolution = Evolution::new(&grid, Reproducer::DEFAULT, Pcg32::seed_from_u64(1));
        let mut seen = vec![];
        let population = evolution
            .run(10, |stats| seen.push(stats.generation))
            .unwrap();
        assert_eq!(seen, (0..=10).collect::<Vec<_>>());
        assert_eq!(population.len(), 100);
        assert!(population.is_sorted_by_fitness());
    }

    #[test]
    fn test_best_fitness_never_drops() {
        // Elites are carried over unchanged, so the best score is monotone.
        let grid = grid();
        let mut evolution = Evolution::new(&grid, Reproducer::DEFAULT, Pcg32::seed_from_u64(2));
        let mut best = vec![];
        evolution
            .run(20, |stats| best.push(stats.best_fitness().unwrap()))
            .unwrap();
        for pair in best.windows(2) {
            assert!(pair[1] >= pair[0], "{} < {}", pair[1], pair[0]);
        }
    }

    #[test]
    fn test_run_is_reproducible_from_seed() {
        let grid = grid();
        let genotypes = |seed| {
            let mut evolution =
                Evolution::new(&grid, Reproducer::DEFAULT, Pcg32::seed_from_u64(seed));
            evolution
                .run(5, |_| {})
                .unwrap()
                .iter()
                .map(crate::Individual::genotype)
                .collect::<Vec<_>>()
        };
        assert_eq!(genotypes(7), genotypes(7));
    }

    #[test]
    fn test_zero_generations_returns_initial_population() {
        let grid = grid();
        let mut evolution = Evolution::new(&grid, Reproducer::DEFAULT, Pcg32::seed_from_u64(3));
        let population = evolution.run(0, |_| {}).unwrap();
        assert_eq!(population.len(), 100);
        for ind in &population {
            assert_eq!(ind.collisions(), 0);
        }
    }

    #[test]
    #[should_panic(expected = "advance called in Initial")]
    fn test_advance_before_populate_panics() {
        let grid = grid();
        let mut evolution = Evolution::new(&grid, Reproducer::DEFAULT, Pcg32::seed_from_u64(4));
        let _ = evolution.advance();
    }
}
