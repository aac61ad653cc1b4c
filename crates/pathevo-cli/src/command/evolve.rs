use std::{io::Write as _, path::PathBuf};

use anyhow::Context;
use pathevo_genetic::{Evolution, Population, Reproducer};
use pathevo_grid::Grid;
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;

use crate::{
    export,
    model::run_summary::{GenerationRecord, RunSummary},
    util::Output,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct EvolveArg {
    /// Grid file to evolve paths through
    pub(super) map: PathBuf,
    /// CSV file for the final population (`-` for stdout)
    #[arg(long, default_value = "resultado.csv")]
    pub(super) output: PathBuf,
    /// Number of generations to run after the initial population
    #[arg(long, default_value_t = 50)]
    pub(super) generations: usize,
    /// Random seed (drawn from the OS generator if omitted)
    #[arg(long)]
    pub(super) seed: Option<u64>,
    /// Write a JSON run summary to this file
    #[arg(long)]
    pub(super) summary: Option<PathBuf>,
    /// Number of best individuals to list at the end
    #[arg(long, default_value_t = 5)]
    pub(super) show_best: usize,
}

pub(crate) fn run(arg: &EvolveArg) -> anyhow::Result<()> {
    let EvolveArg {
        map,
        output,
        generations,
        seed,
        summary,
        show_best,
    } = arg;

    let grid = Grid::load(map)?;
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    log::info!(
        "evolving paths through {} ({}x{}, start {}, goal {}) with seed {seed}",
        map.display(),
        grid.rows(),
        grid.cols(),
        grid.start(),
        grid.goal()
    );

    let mut history = vec![];
    let mut evolution = Evolution::new(&grid, Reproducer::DEFAULT, Pcg32::seed_from_u64(seed));
    let population = evolution
        .run(*generations, |stats| history.push(GenerationRecord::from(stats)))
        .with_context(|| format!("Evolution failed on {} (seed {seed})", map.display()))?;

    let mut csv = Output::from_output_path(output)?;
    export::write_population_csv(&mut csv, &population)
        .and_then(|()| csv.flush())
        .with_context(|| format!("Failed to write CSV to {}", csv.display_path()))?;
    log::info!(
        "wrote {} individuals to {}",
        population.len(),
        csv.display_path()
    );
    drop(csv);

    if let Some(path) = summary {
        let run_summary =
            RunSummary::new(map.clone(), &grid, seed, *generations, &population, history);
        Output::save_json(&run_summary, path)?;
        log::info!("wrote run summary to {}", path.display());
    }

    print_report(&grid, &population, *show_best);
    eprintln!("Seed: {seed}");

    Ok(())
}

fn print_report(grid: &Grid, population: &Population, show_best: usize) {
    eprintln!("Best Individuals:");
    for (i, ind) in population.iter().take(show_best).enumerate() {
        eprintln!(
            "  {i:2}: {:10.2}  moves {:3}  collisions {}  final {}{}",
            ind.fitness(),
            ind.moves_taken(),
            ind.collisions(),
            ind.final_position(),
            if ind.reached_goal(grid) { "  (goal)" } else { "" },
        );
        eprintln!("      {}", ind.genotype());
    }

    if let Some(best) = population.best() {
        eprintln!();
        eprintln!("Best path:");
        eprint!("{}", grid.render_path(best.path(grid)));
    }
}
