use clap::{Parser, Subcommand};

use self::{check_map::CheckMapArg, evolve::EvolveArg};

mod check_map;
mod evolve;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Evolve paths through a grid using a genetic algorithm
    Evolve(#[clap(flatten)] EvolveArg),
    /// Validate a grid file and print it back
    CheckMap(#[clap(flatten)] CheckMapArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Evolve(arg) => evolve::run(&arg)?,
        Mode::CheckMap(arg) => check_map::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_definition_is_valid() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_evolve_defaults() {
        let args = CommandArgs::try_parse_from(["pathevo", "evolve", "map.txt"]).unwrap();
        let arg = match args.mode {
            Mode::Evolve(arg) => arg,
            mode => panic!("expected evolve, got {mode:?}"),
        };
        assert_eq!(arg.map, Path::new("map.txt"));
        assert_eq!(arg.output, Path::new("resultado.csv"));
        assert_eq!(arg.generations, 50);
        assert_eq!(arg.seed, None);
        assert_eq!(arg.summary, None);
        assert_eq!(arg.show_best, 5);
    }

    #[test]
    fn test_evolve_options() {
        let args = CommandArgs::try_parse_from([
            "pathevo",
            "evolve",
            "maze.txt",
            "--output",
            "-",
            "--generations",
            "10",
            "--seed",
            "1234",
            "--summary",
            "run.json",
            "--show-best",
            "3",
        ])
        .unwrap();
        let arg = match args.mode {
            Mode::Evolve(arg) => arg,
            mode => panic!("expected evolve, got {mode:?}"),
        };
        assert_eq!(arg.output, Path::new("-"));
        assert_eq!(arg.generations, 10);
        assert_eq!(arg.seed, Some(1234));
        assert_eq!(arg.summary.as_deref(), Some(Path::new("run.json")));
        assert_eq!(arg.show_best, 3);
    }

    #[test]
    fn test_check_map() {
        let args = CommandArgs::try_parse_from(["pathevo", "check-map", "maze.txt"]).unwrap();
        assert!(matches!(args.mode, Mode::CheckMap(_)));
    }

    #[test]
    fn test_missing_map_is_rejected() {
        assert!(CommandArgs::try_parse_from(["pathevo", "evolve"]).is_err());
        assert!(CommandArgs::try_parse_from(["pathevo"]).is_err());
    }
}
