use std::path::PathBuf;

use chrono::{DateTime, Utc};
use pathevo_genetic::{FitnessStats, GenerationStats, Individual, Population};
use pathevo_grid::Grid;
use serde::{Deserialize, Serialize};

/// Machine-readable record of a finished `evolve` run.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RunSummary {
    pub map: PathBuf,
    pub rows: usize,
    pub cols: usize,
    pub seed: u64,
    pub generations: usize,
    pub finished_at: DateTime<Utc>,
    pub best: Option<IndividualRecord>,
    pub history: Vec<GenerationRecord>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct IndividualRecord {
    pub genotype: String,
    pub fitness: f64,
    pub moves_taken: usize,
    pub collisions: usize,
    pub final_row: usize,
    pub final_col: usize,
    pub reached_goal: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GenerationRecord {
    pub generation: usize,
    pub fitness: Option<FitnessRecord>,
    pub goal_reached: usize,
    pub best_moves_taken: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct FitnessRecord {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
}

impl RunSummary {
    pub fn new(
        map: PathBuf,
        grid: &Grid,
        seed: u64,
        generations: usize,
        population: &Population,
        history: Vec<GenerationRecord>,
    ) -> Self {
        Self {
            map,
            rows: grid.rows(),
            cols: grid.cols(),
            seed,
            generations,
            finished_at: Utc::now(),
            best: population
                .best()
                .map(|ind| IndividualRecord::new(ind, grid)),
            history,
        }
    }
}

impl IndividualRecord {
    pub fn new(ind: &Individual, grid: &Grid) -> Self {
        let pos = ind.final_position();
        Self {
            genotype: ind.genotype(),
            fitness: ind.fitness(),
            moves_taken: ind.moves_taken(),
            collisions: ind.collisions(),
            final_row: pos.row,
            final_col: pos.col,
            reached_goal: ind.reached_goal(grid),
        }
    }
}

impl From<&GenerationStats> for GenerationRecord {
    fn from(stats: &GenerationStats) -> Self {
        Self {
            generation: stats.generation,
            fitness: stats.fitness.map(FitnessRecord::from),
            goal_reached: stats.goal_reached,
            best_moves_taken: stats.best_moves_taken,
        }
    }
}

impl From<FitnessStats> for FitnessRecord {
    fn from(stats: FitnessStats) -> Self {
        let FitnessStats {
            min,
            max,
            mean,
            median,
            std_dev,
        } = stats;
        Self {
            min,
            max,
            mean,
            median,
            std_dev,
        }
    }
}
