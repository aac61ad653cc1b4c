use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
    str::FromStr,
};

use arrayvec::ArrayVec;

use crate::{Direction, Position};

/// Contents of a single grid cell.
///
/// Start and goal cells are [`Cell::Free`]; their coordinates are kept on the
/// [`Grid`] itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Free,
    Wall,
}

/// The two terminal cells every grid must contain exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Terminal {
    #[display("start ('S')")]
    Start,
    #[display("goal ('E')")]
    Goal,
}

/// Error returned when grid text is structurally invalid.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseGridError {
    #[display("malformed dimensions line {line:?}: expected `<rows> <cols>` with positive integers")]
    MalformedDimensions { line: String },
    #[display("row {row} has {found} cells, expected {expected}")]
    MalformedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[display("grid text ends before row {row}")]
    MissingRow { row: usize },
    #[display("grid has no {kind} cell")]
    MissingStartOrGoal { kind: Terminal },
    #[display("grid has more than one {kind} cell: {first} and {second}")]
    DuplicateStartOrGoal {
        kind: Terminal,
        first: Position,
        second: Position,
    },
}

/// Error returned by [`Grid::load`].
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum LoadGridError {
    #[display("failed to read grid file {}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[display("invalid grid file {}", path.display())]
    Parse {
        path: PathBuf,
        source: ParseGridError,
    },
}

/// Rectangular map that candidate paths are walked over.
///
/// A grid is built once (via [`FromStr`] or [`Grid::load`]) and is read-only
/// afterwards. Parsing guarantees:
///
/// - both dimensions are positive
/// - exactly one start and one goal cell exist
/// - every stored coordinate lies within `[0, rows) x [0, cols)`
///
/// # Example
///
/// ```
/// use pathevo_grid::{Direction, Grid, Position};
///
/// let grid: Grid = "3 3\nS.#\n.#.\n..E\n".parse().unwrap();
///
/// let neighbors: Vec<_> = grid.open_neighbors(grid.start()).into_iter().collect();
/// assert_eq!(
///     neighbors,
///     [
///         (Direction::Down, Position::new(1, 0)),
///         (Direction::Right, Position::new(0, 1)),
///     ]
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    start: Position,
    goal: Position,
}

impl Grid {
    const WALL: char = '#';
    const START: char = 'S';
    const GOAL: char = 'E';
    const FREE: char = '.';
    const PATH: char = '*';

    /// Reads and parses a grid file.
    pub fn load<P>(path: P) -> Result<Self, LoadGridError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| LoadGridError::Io {
            path: path.to_owned(),
            source,
        })?;
        let grid: Self = text.parse().map_err(|source| LoadGridError::Parse {
            path: path.to_owned(),
            source,
        })?;
        log::debug!(
            "loaded {}x{} grid from {} (start {}, goal {})",
            grid.rows,
            grid.cols,
            path.display(),
            grid.start,
            grid.goal
        );
        Ok(grid)
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells (`rows * cols`).
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn start(&self) -> Position {
        self.start
    }

    #[must_use]
    pub fn goal(&self) -> Position {
        self.goal
    }

    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// Row-major index of `pos`, suitable for per-cell side tables of
    /// length [`cell_count`](Self::cell_count).
    ///
    /// # Panics
    ///
    /// Panics if `pos` lies outside the grid.
    #[must_use]
    pub fn cell_index(&self, pos: Position) -> usize {
        assert!(self.contains(pos), "position {pos} outside grid");
        pos.row * self.cols + pos.col
    }

    #[must_use]
    pub fn cell(&self, pos: Position) -> Option<Cell> {
        self.contains(pos).then(|| self.cells[self.cell_index(pos)])
    }

    /// Returns `true` if `pos` is a wall. Positions outside the grid are not walls.
    #[must_use]
    pub fn is_wall(&self, pos: Position) -> bool {
        self.cell(pos) == Some(Cell::Wall)
    }

    /// Applies `dir` to `from`, returning `None` if the result leaves the grid.
    ///
    /// Walls are not checked.
    #[must_use]
    pub fn try_step(&self, from: Position, dir: Direction) -> Option<Position> {
        let Position { row, col } = from;
        let to = match dir {
            Direction::Up => Position::new(row.checked_sub(1)?, col),
            Direction::Down => Position::new(row + 1, col),
            Direction::Left => Position::new(row, col.checked_sub(1)?),
            Direction::Right => Position::new(row, col + 1),
        };
        self.contains(to).then_some(to)
    }

    /// Applies `dir` to `from`, staying in place when the move would leave the grid.
    ///
    /// Walls are not checked.
    #[must_use]
    pub fn step(&self, from: Position, dir: Direction) -> Position {
        self.try_step(from, dir).unwrap_or(from)
    }

    /// Returns the in-bounds, non-wall orthogonal neighbors of `from`.
    ///
    /// Neighbors are listed in [`Direction::ALL`] order (up, down, left, right).
    #[must_use]
    pub fn open_neighbors(
        &self,
        from: Position,
    ) -> ArrayVec<(Direction, Position), { Direction::LEN }> {
        Direction::ALL
            .into_iter()
            .filter_map(|dir| self.try_step(from, dir).map(|to| (dir, to)))
            .filter(|(_, to)| !self.is_wall(*to))
            .collect()
    }

    /// Draws the grid rows (without the dimensions line) with every position
    /// in `path` marked `*`.
    ///
    /// Start and goal keep their `S` and `E` symbols. Positions outside the
    /// grid are ignored.
    ///
    /// ```
    /// use pathevo_grid::{Grid, Position};
    ///
    /// let grid: Grid = "2 3\nS.#\n..E\n".parse().unwrap();
    /// let drawn = grid.render_path([Position::new(0, 1), Position::new(1, 1)]);
    /// assert_eq!(drawn, "S*#\n.*E\n");
    /// ```
    #[must_use]
    pub fn render_path<I>(&self, path: I) -> String
    where
        I: IntoIterator<Item = Position>,
    {
        let mut marked = vec![false; self.cell_count()];
        for pos in path {
            if self.contains(pos) {
                marked[self.cell_index(pos)] = true;
            }
        }
        let mut out = String::with_capacity((self.cols + 1) * self.rows);
        // writing into a String cannot fail
        let _ = self.write_rows(&mut out, |pos| marked[self.cell_index(pos)]);
        out
    }

    fn write_rows<W, F>(&self, out: &mut W, is_marked: F) -> fmt::Result
    where
        W: fmt::Write,
        F: Fn(Position) -> bool,
    {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let pos = Position::new(row, col);
                let ch = if pos == self.start {
                    Self::START
                } else if pos == self.goal {
                    Self::GOAL
                } else if self.is_wall(pos) {
                    Self::WALL
                } else if is_marked(pos) {
                    Self::PATH
                } else {
                    Self::FREE
                };
                out.write_char(ch)?;
            }
            out.write_char('\n')?;
        }
        Ok(())
    }
}

/// Re-renders the grid in its text format. Free cells are written as `.`.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.rows, self.cols)?;
        self.write_rows(f, |_| false)
    }
}

impl FromStr for Grid {
    type Err = ParseGridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines = s.lines();
        let dims_line = lines.by_ref().find(|l| !l.trim().is_empty()).unwrap_or("");
        let (rows, cols) =
            parse_dimensions(dims_line).ok_or_else(|| ParseGridError::MalformedDimensions {
                line: dims_line.to_owned(),
            })?;

        let mut cells = vec![];
        let mut start = None;
        let mut goal = None;
        for row in 0..rows {
            let line = lines.next().ok_or(ParseGridError::MissingRow { row })?;
            let found = line.chars().count();
            if found != cols {
                return Err(ParseGridError::MalformedRow {
                    row,
                    expected: cols,
                    found,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let pos = Position::new(row, col);
                let cell = match ch {
                    Self::WALL => Cell::Wall,
                    Self::START => {
                        record_terminal(&mut start, pos, Terminal::Start)?;
                        Cell::Free
                    }
                    Self::GOAL => {
                        record_terminal(&mut goal, pos, Terminal::Goal)?;
                        Cell::Free
                    }
                    _ => Cell::Free,
                };
                cells.push(cell);
            }
        }

        let start = start.ok_or(ParseGridError::MissingStartOrGoal {
            kind: Terminal::Start,
        })?;
        let goal = goal.ok_or(ParseGridError::MissingStartOrGoal {
            kind: Terminal::Goal,
        })?;
        Ok(Self {
            rows,
            cols,
            cells,
            start,
            goal,
        })
    }
}

fn parse_dimensions(line: &str) -> Option<(usize, usize)> {
    let mut parts = line.split_whitespace();
    let rows = parts.next()?.parse::<usize>().ok()?;
    let cols = parts.next()?.parse::<usize>().ok()?;
    if parts.next().is_some() || rows == 0 || cols == 0 {
        return None;
    }
    rows.checked_mul(cols)?;
    Some((rows, cols))
}

fn record_terminal(
    slot: &mut Option<Position>,
    pos: Position,
    kind: Terminal,
) -> Result<(), ParseGridError> {
    if let Some(first) = *slot {
        return Err(ParseGridError::DuplicateStartOrGoal {
            kind,
            first,
            second: pos,
        });
    }
    *slot = Some(pos);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    const MAZE: &str = "4 5\nS..#.\n.#.#.\n.#...\n...#E\n";

    fn maze() -> Grid {
        MAZE.parse().unwrap()
    }

    #[test]
    fn test_parse_basic() {
        let grid = maze();
        assert_eq!(grid.rows(), 4);
        assert_eq!(grid.cols(), 5);
        assert_eq!(grid.cell_count(), 20);
        assert_eq!(grid.start(), Position::new(0, 0));
        assert_eq!(grid.goal(), Position::new(3, 4));
        assert!(grid.is_wall(Position::new(0, 3)));
        assert!(grid.is_wall(Position::new(1, 1)));
        assert!(!grid.is_wall(Position::new(2, 2)));
        assert_eq!(grid.cell(grid.start()), Some(Cell::Free));
        assert_eq!(grid.cell(grid.goal()), Some(Cell::Free));
        assert_eq!(grid.cell(Position::new(4, 0)), None);
    }

    #[test]
    fn test_parse_unknown_characters_are_free() {
        let grid: Grid = "1 4\nSx E\n".parse().unwrap();
        assert_eq!(grid.cell(Position::new(0, 1)), Some(Cell::Free));
        assert_eq!(grid.cell(Position::new(0, 2)), Some(Cell::Free));
    }

    #[test]
    fn test_parse_accepts_crlf_and_trailing_lines() {
        let grid: Grid = "2 2\r\nS.\r\n.E\r\nignored trailer\n".parse().unwrap();
        assert_eq!(grid.goal(), Position::new(1, 1));
    }

    #[test]
    fn test_parse_malformed_dimensions() {
        for text in ["", "3\nS.E\n", "a b\n", "0 3\n", "2 3 4\n", "-1 2\n"] {
            let err = text.parse::<Grid>().unwrap_err();
            assert!(
                matches!(err, ParseGridError::MalformedDimensions { .. }),
                "unexpected error for {text:?}: {err:?}"
            );
        }
    }

    #[test]
    fn test_parse_malformed_row() {
        let err = "2 3\nS.E\n..\n".parse::<Grid>().unwrap_err();
        assert_eq!(
            err,
            ParseGridError::MalformedRow {
                row: 1,
                expected: 3,
                found: 2
            }
        );

        let err = "1 2\nS.E\n".parse::<Grid>().unwrap_err();
        assert_eq!(
            err,
            ParseGridError::MalformedRow {
                row: 0,
                expected: 2,
                found: 3
            }
        );
    }

    #[test]
    fn test_parse_missing_row() {
        let err = "3 2\nS.\n.E\n".parse::<Grid>().unwrap_err();
        assert_eq!(err, ParseGridError::MissingRow { row: 2 });
    }

    #[test]
    fn test_parse_missing_terminals() {
        let err = "1 3\n..E\n".parse::<Grid>().unwrap_err();
        assert_eq!(
            err,
            ParseGridError::MissingStartOrGoal {
                kind: Terminal::Start
            }
        );

        let err = "1 3\nS..\n".parse::<Grid>().unwrap_err();
        assert_eq!(
            err,
            ParseGridError::MissingStartOrGoal {
                kind: Terminal::Goal
            }
        );
    }

    #[test]
    fn test_parse_duplicate_terminal() {
        let err = "2 2\nSE\nS.\n".parse::<Grid>().unwrap_err();
        assert_eq!(
            err,
            ParseGridError::DuplicateStartOrGoal {
                kind: Terminal::Start,
                first: Position::new(0, 0),
                second: Position::new(1, 0),
            }
        );
    }

    #[test]
    fn test_display_normalizes_free_cells() {
        let grid: Grid = "2 3\nSx#\n _E\n".parse().unwrap();
        assert_eq!(grid.to_string(), "2 3\nS.#\n..E\n");
        assert_eq!(grid.to_string().parse::<Grid>().unwrap(), grid);
    }

    #[test]
    fn test_step_clamps_at_border() {
        let grid = maze();
        let corner = Position::new(0, 0);
        assert_eq!(grid.step(corner, Direction::Up), corner);
        assert_eq!(grid.step(corner, Direction::Left), corner);
        assert_eq!(grid.step(corner, Direction::Down), Position::new(1, 0));
        assert_eq!(grid.step(corner, Direction::Right), Position::new(0, 1));

        let far = Position::new(3, 4);
        assert_eq!(grid.step(far, Direction::Down), far);
        assert_eq!(grid.step(far, Direction::Right), far);
        assert_eq!(grid.try_step(far, Direction::Right), None);
    }

    #[test]
    fn test_step_does_not_check_walls() {
        let grid = maze();
        assert_eq!(
            grid.step(Position::new(0, 2), Direction::Right),
            Position::new(0, 3)
        );
    }

    #[test]
    fn test_open_neighbors_order_and_walls() {
        let grid = maze();
        let neighbors = grid.open_neighbors(Position::new(2, 2));
        assert_eq!(
            neighbors.as_slice(),
            [
                (Direction::Up, Position::new(1, 2)),
                (Direction::Down, Position::new(3, 2)),
                (Direction::Right, Position::new(2, 3)),
            ]
        );
    }

    #[test]
    fn test_open_neighbors_enclosed_cell() {
        let grid: Grid = "3 3\n.#.\n#S#\n.#E\n".parse().unwrap();
        assert!(grid.open_neighbors(grid.start()).is_empty());
    }

    #[test]
    fn test_render_path() {
        let grid = maze();
        let path = [
            Position::new(0, 1),
            Position::new(0, 2),
            Position::new(1, 2),
            Position::new(9, 9),
        ];
        assert_eq!(
            grid.render_path(path),
            "S**#.\n.#*#.\n.#...\n...#E\n"
        );
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MAZE.as_bytes()).unwrap();
        let grid = Grid::load(file.path()).unwrap();
        assert_eq!(grid, maze());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Grid::load(dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, LoadGridError::Io { .. }));
    }

    #[test]
    fn test_load_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"2 2\nS.\n..\n").unwrap();
        let err = Grid::load(file.path()).unwrap_err();
        assert!(matches!(
            err,
            LoadGridError::Parse {
                source: ParseGridError::MissingStartOrGoal {
                    kind: Terminal::Goal
                },
                ..
            }
        ));
    }
}
