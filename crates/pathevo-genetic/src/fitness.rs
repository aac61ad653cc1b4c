//! Fitness evaluation of move sequences.
//!
//! A sequence is scored by walking it from the grid's start cell:
//!
//! - Moving against the grid border is a no-op (the walker stays in place)
//! - Entering a wall counts one collision and ends the walk
//! - Entering the goal ends the walk
//!
//! The score combines how close the walk ended to the goal with penalties
//! for collisions and revisited cells and a reward for the number of moves
//! taken:
//!
//! ```text
//! 1000 - distance - 5·collisions - 3·repetitions + 10·moves + 0.1·moves²
//! ```
//!
//! The quadratic move reward favors long valid walks over the penalty terms.
//! This trades path economy for exploration and can be exploited by padding
//! (e.g. bumping into the border repeatedly still counts as moves).

use pathevo_grid::{Direction, Grid, Position};

pub const BASE_SCORE: f64 = 1000.0;
pub const COLLISION_PENALTY: f64 = 5.0;
pub const REPETITION_PENALTY: f64 = 3.0;
pub const MOVE_REWARD: f64 = 10.0;
pub const MOVE_REWARD_QUADRATIC: f64 = 0.1;

/// Where a walk over a move sequence ended and how it got there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trace {
    pub final_position: Position,
    /// Number of wall hits (0 or 1, since the first hit ends the walk).
    pub collisions: usize,
    /// Number of leading moves that were applied before the walk halted.
    pub moves_taken: usize,
}

/// Result of [`evaluate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    /// Fitness score, higher is better.
    ///
    /// `f64::NEG_INFINITY` if the visit table could not be allocated.
    pub score: f64,
    pub final_position: Position,
    pub collisions: usize,
    pub moves_taken: usize,
    /// Sum of `visits - 1` over every cell entered more than once.
    pub repetitions: usize,
    /// Manhattan distance from the final position to the goal.
    pub distance: usize,
}

/// Walks `moves` from the start cell, calling `on_enter` for every cell moved
/// into (including stay-in-place moves against the border).
pub fn trace<F>(grid: &Grid, moves: &[Direction], mut on_enter: F) -> Trace
where
    F: FnMut(Position),
{
    let mut pos = grid.start();
    let mut collisions = 0;
    let mut moves_taken = 0;
    for &dir in moves {
        let next = grid.step(pos, dir);
        if grid.is_wall(next) {
            collisions += 1;
            break;
        }
        pos = next;
        moves_taken += 1;
        on_enter(pos);
        if pos == grid.goal() {
            break;
        }
    }
    Trace {
        final_position: pos,
        collisions,
        moves_taken,
    }
}

/// Scores a move sequence against `grid`.
///
/// Deterministic: the same grid and sequence always produce the same
/// evaluation.
///
/// # Example
///
/// ```
/// use pathevo_genetic::fitness;
/// use pathevo_grid::{Direction, Grid, Position};
///
/// let grid: Grid = "3 3\nS..\n...\n..E\n".parse().unwrap();
///
/// let eval = fitness::evaluate(&grid, &[Direction::Down, Direction::Right]);
/// assert_eq!(eval.final_position, Position::new(1, 1));
/// assert_eq!(eval.distance, 2);
/// assert!((eval.score - (1000.0 - 2.0 + 20.0 + 0.4)).abs() < 1e-9);
///
/// let eval = fitness::evaluate(&grid, &[]);
/// assert_eq!(eval.score, 996.0);
/// ```
#[must_use]
pub fn evaluate(grid: &Grid, moves: &[Direction]) -> Evaluation {
    let mut visits = Vec::new();
    if let Err(e) = visits.try_reserve_exact(grid.cell_count()) {
        log::error!(
            "failed to allocate visit table for a {}x{} grid: {e}",
            grid.rows(),
            grid.cols()
        );
        let trace = trace(grid, moves, |_| {});
        let distance = trace.final_position.manhattan_distance(grid.goal());
        return Evaluation {
            score: f64::NEG_INFINITY,
            final_position: trace.final_position,
            collisions: trace.collisions,
            moves_taken: trace.moves_taken,
            repetitions: 0,
            distance,
        };
    }
    visits.resize(grid.cell_count(), 0_usize);
    visits[grid.cell_index(grid.start())] = 1;

    let trace = trace(grid, moves, |pos| visits[grid.cell_index(pos)] += 1);
    let repetitions = visits.iter().map(|v| v.saturating_sub(1)).sum();
    let distance = trace.final_position.manhattan_distance(grid.goal());

    Evaluation {
        score: score(distance, trace.collisions, repetitions, trace.moves_taken),
        final_position: trace.final_position,
        collisions: trace.collisions,
        moves_taken: trace.moves_taken,
        repetitions,
        distance,
    }
}

#[expect(clippy::cast_precision_loss)]
fn score(distance: usize, collisions: usize, repetitions: usize, moves_taken: usize) -> f64 {
    let moves = moves_taken as f64;
    BASE_SCORE - distance as f64 - COLLISION_PENALTY * collisions as f64
        - REPETITION_PENALTY * repetitions as f64
        + MOVE_REWARD * moves
        + MOVE_REWARD_QUADRATIC * moves * moves
}
