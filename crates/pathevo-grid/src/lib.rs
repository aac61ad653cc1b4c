//! Grid model for path evolution.
//!
//! This crate provides the read-only world that candidate paths are scored
//! against:
//!
//! - [`Grid`] - Rectangular map of free cells and walls with one start and one goal
//! - [`Position`] - `(row, col)` coordinate inside a grid
//! - [`Direction`] - One of the four orthogonal moves a path is made of
//!
//! # Text Format
//!
//! Grids are read from a small text format:
//!
//! ```text
//! <rows> <cols>
//! S..#
//! .#..
//! ...E
//! ```
//!
//! `#` is a wall, `S` the start cell, `E` the goal cell, and every other
//! character is free space. See [`Grid`] for parsing and loading.
//!
//! # Example
//!
//! ```
//! use pathevo_grid::{Direction, Grid, Position};
//!
//! let grid: Grid = "2 3\nS.#\n..E\n".parse().unwrap();
//! assert_eq!(grid.start(), Position::new(0, 0));
//! assert_eq!(grid.goal(), Position::new(1, 2));
//! assert!(grid.is_wall(Position::new(0, 2)));
//!
//! // Moving against the border is a no-op.
//! assert_eq!(grid.step(grid.start(), Direction::Up), grid.start());
//! ```

pub use self::{direction::*, grid::*, position::*};

mod direction;
mod grid;
mod position;
