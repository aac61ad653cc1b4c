//! Genetic algorithm that evolves move sequences through a [`Grid`](pathevo_grid::Grid).
//!
//! Each individual is a sequence of [`Direction`](pathevo_grid::Direction)s
//! walked from the grid's start cell. The algorithm repeatedly scores, selects,
//! recombines and mutates a fixed-size population so that paths drift towards
//! the goal.
//!
//! # How Evolution Works
//!
//! 1. **Initialization** - [`generator`] builds random individuals by a random walk
//!    over open cells
//! 2. **Evaluation** - [`fitness`] walks each sequence and scores the result
//! 3. **Sorting** - The population is sorted by fitness, best first
//! 4. **Elitism** - The best few individuals are deep-copied into the next generation
//! 5. **Reproduction** - Adjacent pairs produce one child each through head/tail
//!    crossover and per-gene mutation ([`operators`])
//! 6. **Top-up** - Fresh random individuals restore the fixed population size
//! 7. **Repeat** - [`Evolution`] drives the cycle for a fixed number of generations
//!
//! # Architecture
//!
//! ```text
//! Evolution (generation loop, owns the RNG and the population)
//!     ↓ sorts, then hands the population to
//! Reproducer (elitism + crossover + mutation + top-up)
//!     ↓ uses
//! generator / operators / fitness
//!     ↓ read
//! Grid (pathevo-grid)
//! ```
//!
//! # Example
//!
//! ```
//! use pathevo_genetic::{Evolution, Reproducer};
//! use pathevo_grid::Grid;
//! use rand::SeedableRng as _;
//! use rand_pcg::Pcg32;
//!
//! let grid: Grid = "3 4\nS...\n.##.\n...E\n".parse().unwrap();
//! let mut evolution = Evolution::new(&grid, Reproducer::DEFAULT, Pcg32::seed_from_u64(1));
//! let population = evolution.run(5, |_stats| {}).unwrap();
//! assert_eq!(population.len(), Reproducer::DEFAULT.population_size);
//! ```
//!
//! # Randomness
//!
//! All random decisions draw from one caller-provided [`rand::Rng`], so a run
//! is fully reproducible from its seed.
//!
//! # Current Limitations
//!
//! - **Fixed parameters**: population size, elite count and mutation rate are
//!   constants ([`Reproducer::DEFAULT`]); there is no adaptive control
//! - **No optimality**: the fitness rewards long valid walks, so the best
//!   individual is not necessarily a shortest path, or a path to the goal at all
//! - **Single-threaded**: evaluation is sequential

pub use self::{
    error::*, evolution::*, individual::*, population::*, reproduction::*, stats::*,
};

mod error;
mod evolution;
pub mod fitness;
pub mod generator;
mod individual;
pub mod operators;
mod population;
mod reproduction;
mod stats;
