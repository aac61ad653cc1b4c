use std::path::PathBuf;

use pathevo_grid::{Grid, Position};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct CheckMapArg {
    /// Grid file to validate
    pub(super) map: PathBuf,
}

pub(crate) fn run(arg: &CheckMapArg) -> anyhow::Result<()> {
    let CheckMapArg { map } = arg;
    let grid = Grid::load(map)?;
    let summary = MapSummary::new(&grid);

    eprintln!("Map: {}", map.display());
    eprintln!("  Size:  {} rows x {} cols", grid.rows(), grid.cols());
    eprintln!("  Start: {}", grid.start());
    eprintln!("  Goal:  {}", grid.goal());
    eprintln!("  Walls: {} of {} cells", summary.walls, grid.cell_count());
    eprintln!("  Start to goal distance: {}", summary.distance);
    if summary.start_exits == 0 {
        log::warn!(
            "start cell {} has no open neighbor; every walk will be empty",
            grid.start()
        );
    }
    print!("{grid}");

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MapSummary {
    walls: usize,
    distance: usize,
    start_exits: usize,
}

impl MapSummary {
    fn new(grid: &Grid) -> Self {
        let walls = (0..grid.rows())
            .flat_map(|row| (0..grid.cols()).map(move |col| Position::new(row, col)))
            .filter(|pos| grid.is_wall(*pos))
            .count();
        Self {
            walls,
            distance: grid.start().manhattan_distance(grid.goal()),
            start_exits: grid.open_neighbors(grid.start()).len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_map_summary() {
        let grid: Grid = "3 4\nS.#.\n.##.\n...E\n".parse().unwrap();
        assert_eq!(
            MapSummary::new(&grid),
            MapSummary {
                walls: 3,
                distance: 5,
                start_exits: 2,
            }
        );
    }

    #[test]
    fn test_enclosed_start() {
        let grid: Grid = "2 2\nS#\n#E\n".parse().unwrap();
        assert_eq!(MapSummary::new(&grid).start_exits, 0);
    }

    #[test]
    fn test_run() {
        let dir = tempfile::tempdir().unwrap();
        let map = dir.path().join("map.txt");
        fs::write(&map, "2 3\nS.#\n..E\n").unwrap();
        run(&CheckMapArg { map: map.clone() }).unwrap();

        fs::write(&map, "2 3\nS.#\n..\n").unwrap();
        assert!(run(&CheckMapArg { map }).is_err());
    }
}
