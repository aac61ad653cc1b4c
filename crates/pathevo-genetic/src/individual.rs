use std::mem;

use pathevo_grid::{Direction, Grid, Position};
use rand::Rng;

use crate::{AllocationError, error::try_vec, fitness, operators};

/// A single candidate path.
///
/// An individual owns its move sequence together with the state derived from
/// walking it: fitness, final position and collision count. The sequence only
/// ever holds moves that were actually taken, so its length is also the
/// individual's move count.
#[derive(Debug, Clone)]
pub struct Individual {
    moves: Vec<Direction>,
    fitness: f64,
    final_position: Position,
    collisions: usize,
}

impl Individual {
    /// Walks `moves` over `grid` and builds an individual from the result.
    ///
    /// The walk halts at the first wall hit or on reaching the goal; moves
    /// after that point are discarded. The collision that halted the walk, if
    /// any, is recorded on the individual, and fitness is then evaluated on
    /// the truncated sequence.
    ///
    /// ```
    /// use pathevo_genetic::Individual;
    /// use pathevo_grid::{Direction, Grid};
    ///
    /// let grid: Grid = "2 3\nS.#\n..E\n".parse().unwrap();
    /// let moves = Direction::parse_sequence("DDBB").unwrap();
    /// let ind = Individual::from_walk(&grid, moves);
    ///
    /// // The second move hits the wall at (0, 2).
    /// assert_eq!(ind.genotype(), "D");
    /// assert_eq!(ind.moves_taken(), 1);
    /// assert_eq!(ind.collisions(), 1);
    /// ```
    #[must_use]
    pub fn from_walk(grid: &Grid, mut moves: Vec<Direction>) -> Self {
        let trace = fitness::trace(grid, &moves, |_| {});
        moves.truncate(trace.moves_taken);
        moves.shrink_to_fit();
        let evaluation = fitness::evaluate(grid, &moves);
        Self {
            moves,
            fitness: evaluation.score,
            final_position: evaluation.final_position,
            collisions: trace.collisions,
        }
    }

    /// Deep copy that reports allocation failure instead of aborting.
    pub fn try_clone(&self) -> Result<Self, AllocationError> {
        let mut moves = try_vec(self.moves.len(), "individual copy")?;
        moves.extend_from_slice(&self.moves);
        Ok(Self {
            moves,
            fitness: self.fitness,
            final_position: self.final_position,
            collisions: self.collisions,
        })
    }

    #[must_use]
    pub fn moves(&self) -> &[Direction] {
        &self.moves
    }

    /// Number of moves in the sequence, which is always the number of moves taken.
    #[must_use]
    pub fn moves_taken(&self) -> usize {
        self.moves.len()
    }

    /// Higher is better. See [`fitness`](crate::fitness) for the formula.
    #[must_use]
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    #[must_use]
    pub fn final_position(&self) -> Position {
        self.final_position
    }

    #[must_use]
    pub fn collisions(&self) -> usize {
        self.collisions
    }

    #[must_use]
    pub fn reached_goal(&self, grid: &Grid) -> bool {
        self.final_position == grid.goal()
    }

    /// The move sequence as a symbol string (e.g. `"BDDC"`).
    #[must_use]
    pub fn genotype(&self) -> String {
        Direction::sequence_to_string(&self.moves)
    }

    /// Cells entered by the walk, in order, excluding the start cell.
    #[must_use]
    pub fn path(&self, grid: &Grid) -> Vec<Position> {
        let mut path = Vec::with_capacity(self.moves.len());
        fitness::trace(grid, &self.moves, |pos| path.push(pos));
        path
    }

    /// Mutates the sequence in place and re-walks it.
    ///
    /// Each move is replaced by a random direction with probability `rate`.
    /// Fitness and derived state are recomputed, and the sequence may shrink
    /// if the mutated walk halts earlier.
    pub fn mutate<R>(&mut self, grid: &Grid, rate: f64, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        operators::mutate(&mut self.moves, rate, rng);
        *self = Self::from_walk(grid, mem::take(&mut self.moves));
    }
}
