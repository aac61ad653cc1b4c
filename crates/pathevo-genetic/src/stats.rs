use pathevo_grid::Grid;

use crate::Population;

/// Descriptive statistics over the fitness values of a population.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitnessStats {
    pub min: f64,
    pub max: f64,
    /// The arithmetic mean.
    pub mean: f64,
    /// The upper median (`sorted[len / 2]`).
    pub median: f64,
    /// The population standard deviation.
    pub std_dev: f64,
}

impl FitnessStats {
    /// Computes statistics from unsorted values, or `None` if there are none.
    ///
    /// ```
    /// use pathevo_genetic::FitnessStats;
    ///
    /// let stats = FitnessStats::new([5.0, 2.0, 4.0, 1.0, 3.0]).unwrap();
    /// assert_eq!(stats.min, 1.0);
    /// assert_eq!(stats.max, 5.0);
    /// assert_eq!(stats.mean, 3.0);
    /// assert_eq!(stats.median, 3.0);
    /// assert!(FitnessStats::new([]).is_none());
    /// ```
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut values = values.into_iter().collect::<Vec<_>>();
        values.sort_by(f64::total_cmp);
        Self::from_sorted(&values)
    }

    /// Computes statistics from values sorted in ascending order.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        assert!(
            sorted_values.is_sorted_by(|a, b| a.total_cmp(b).is_le()),
            "values must be sorted in ascending order"
        );

        let min = *sorted_values.first()?;
        let max = *sorted_values.last()?;
        let n = sorted_values.len() as f64;
        let mean = sorted_values.iter().sum::<f64>() / n;
        let median = sorted_values[sorted_values.len() / 2];
        let variance = sorted_values
            .iter()
            .map(|v| (v - mean).powi(2))
            .sum::<f64>()
            / n;

        Some(Self {
            min,
            max,
            mean,
            median,
            std_dev: variance.sqrt(),
        })
    }
}

/// Snapshot of a population after one generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationStats {
    /// Generation number; the initial population is generation 0.
    pub generation: usize,
    /// `None` only for an empty population.
    pub fitness: Option<FitnessStats>,
    /// Number of individuals whose walk ends on the goal.
    pub goal_reached: usize,
    /// Move count of the fittest individual.
    pub best_moves_taken: Option<usize>,
}

impl GenerationStats {
    #[must_use]
    pub fn new(generation: usize, population: &Population, grid: &Grid) -> Self {
        Self {
            generation,
            fitness: population.fitness_stats(),
            goal_reached: population
                .iter()
                .filter(|ind| ind.reached_goal(grid))
                .count(),
            best_moves_taken: population.best().map(crate::Individual::moves_taken),
        }
    }

    #[must_use]
    pub fn best_fitness(&self) -> Option<f64> {
        self.fitness.map(|f| f.max)
    }
}

#[cfg(test)]
mod tests {
    use pathevo_grid::Direction;

    use super::*;
    use crate::Individual;

    #[test]
    fn test_fitness_stats_even_count_uses_upper_median() {
        let stats = FitnessStats::new([4.0, 1.0, 3.0, 2.0]).unwrap();
        assert_eq!(stats.median, 3.0);
        assert_eq!(stats.mean, 2.5);
        assert!((stats.std_dev - 1.25_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_fitness_stats_single_value() {
        let stats = FitnessStats::new([7.5]).unwrap();
        assert_eq!(stats.min, 7.5);
        assert_eq!(stats.max, 7.5);
        assert_eq!(stats.std_dev, 0.0);
    }

    #[test]
    fn test_generation_stats() {
        let grid: Grid = "3 3\nS..\n...\n..E\n".parse().unwrap();
        let mut population = Population::new();
        for symbols in ["DDBB", "B", "DDB"] {
            population.push(Individual::from_walk(
                &grid,
                Direction::parse_sequence(symbols).unwrap(),
            ));
        }
        let stats = GenerationStats::new(3, &population, &grid);
        assert_eq!(stats.generation, 3);
        assert_eq!(stats.goal_reached, 1);
        assert_eq!(stats.best_moves_taken, Some(4));
        assert_eq!(
            stats.best_fitness(),
            population.best().map(Individual::fitness)
        );
    }

    #[test]
    fn test_generation_stats_empty_population() {
        let grid: Grid = "1 2\nSE\n".parse().unwrap();
        let stats = GenerationStats::new(0, &Population::new(), &grid);
        assert!(stats.fitness.is_none());
        assert_eq!(stats.goal_reached, 0);
        assert_eq!(stats.best_moves_taken, None);
    }
}
