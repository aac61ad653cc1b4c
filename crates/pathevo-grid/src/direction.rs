use rand::{
    Rng,
    distr::{Distribution, StandardUniform},
};

/// One orthogonal move of a path.
///
/// Each direction has a single-character symbol used by every text surface
/// (genotype strings, CSV export):
///
/// | Direction | Symbol | Effect      |
/// |-----------|--------|-------------|
/// | `Up`      | `C`    | row - 1     |
/// | `Down`    | `B`    | row + 1     |
/// | `Left`    | `E`    | col - 1     |
/// | `Right`   | `D`    | col + 1     |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const LEN: usize = 4;

    /// All directions in neighbor-enumeration order (up, down, left, right).
    pub const ALL: [Self; Self::LEN] = [Self::Up, Self::Down, Self::Left, Self::Right];

    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Up => 'C',
            Self::Down => 'B',
            Self::Left => 'E',
            Self::Right => 'D',
        }
    }

    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'C' => Some(Self::Up),
            'B' => Some(Self::Down),
            'E' => Some(Self::Left),
            'D' => Some(Self::Right),
            _ => None,
        }
    }

    /// Parses a genotype string such as `"BDDC"`.
    ///
    /// Returns `None` if any character is not a direction symbol.
    ///
    /// ```
    /// use pathevo_grid::Direction;
    ///
    /// let moves = Direction::parse_sequence("BD").unwrap();
    /// assert_eq!(moves, [Direction::Down, Direction::Right]);
    /// assert!(Direction::parse_sequence("BX").is_none());
    /// ```
    #[must_use]
    pub fn parse_sequence(symbols: &str) -> Option<Vec<Self>> {
        symbols.chars().map(Self::from_symbol).collect()
    }

    /// Renders a move sequence back into its symbol string.
    #[must_use]
    pub fn sequence_to_string(moves: &[Self]) -> String {
        moves.iter().map(|d| d.symbol()).collect()
    }
}

/// Samples a direction uniformly, so that `rng.random::<Direction>()` works.
impl Distribution<Direction> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Direction {
        Direction::ALL[rng.random_range(0..Direction::LEN)]
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_symbols_are_distinct_and_invertible() {
        for dir in Direction::ALL {
            assert_eq!(Direction::from_symbol(dir.symbol()), Some(dir));
        }
        assert_eq!(Direction::from_symbol('#'), None);
    }

    #[test]
    fn test_sequence_to_string() {
        let moves = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];
        assert_eq!(Direction::sequence_to_string(&moves), "CBED");
        assert_eq!(Direction::sequence_to_string(&[]), "");
    }

    #[test]
    fn test_random_direction_covers_all_variants() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut seen = [false; Direction::LEN];
        for _ in 0..200 {
            let dir: Direction = rng.random();
            seen[Direction::ALL.iter().position(|d| *d == dir).unwrap()] = true;
        }
        assert!(seen.iter().all(|s| *s), "not all directions sampled: {seen:?}");
    }
}
