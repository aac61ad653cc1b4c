/// A cell coordinate inside a [`Grid`](crate::Grid).
///
/// `row` grows downwards and `col` grows to the right; `(0, 0)` is the
/// top-left cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[display("({row}, {col})")]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns the Manhattan (taxicab) distance to `other`.
    ///
    /// ```
    /// use pathevo_grid::Position;
    ///
    /// let a = Position::new(0, 0);
    /// let b = Position::new(2, 3);
    /// assert_eq!(a.manhattan_distance(b), 5);
    /// assert_eq!(b.manhattan_distance(a), 5);
    /// ```
    #[must_use]
    pub fn manhattan_distance(self, other: Self) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}
