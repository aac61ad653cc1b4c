//! Random-walk generation of initial individuals.
//!
//! A generated walk only ever steps into open cells, so it never collides.
//! It stops early when the goal is reached or when no open neighbor is left.

use pathevo_grid::Grid;
use rand::{Rng, seq::IndexedRandom as _};

use crate::{AllocationError, Individual, error::try_vec};

/// Shortest target length drawn for a random walk.
pub const MIN_WALK_LEN: usize = 10;
/// Longest target length drawn for a random walk.
pub const MAX_WALK_LEN: usize = 100;

/// Generates one individual by a random walk from the start cell.
///
/// A target length is drawn uniformly from `MIN_WALK_LEN..=MAX_WALK_LEN`. At
/// each step one of the in-bounds, non-wall neighbors of the current cell is
/// picked uniformly. The walk ends early at the goal or when the current
/// cell has no open neighbor (an enclosed start yields an empty sequence).
pub fn generate<R>(grid: &Grid, rng: &mut R) -> Result<Individual, AllocationError>
where
    R: Rng + ?Sized,
{
    let target_len = rng.random_range(MIN_WALK_LEN..=MAX_WALK_LEN);
    let mut moves = try_vec(target_len, "random walk")?;

    let mut pos = grid.start();
    while moves.len() < target_len {
        let neighbors = grid.open_neighbors(pos);
        let Some(&(dir, next)) = neighbors.as_slice().choose(rng) else {
            break;
        };
        moves.push(dir);
        pos = next;
        if pos == grid.goal() {
            break;
        }
    }

    Ok(Individual::from_walk(grid, moves))
}
