//! CSV export of a final population.
//!
//! ```text
//! genotipo,fitness,totalMov,colisoes,x,y
//! "BDDB",1041.60,4,0,2,2
//! ```
//!
//! The genotype is always double-quoted, fitness has two decimals, and
//! `x`/`y` are the final row/column.

use std::io::{self, Write};

use pathevo_genetic::{Individual, Population};

pub const CSV_HEADER: &str = "genotipo,fitness,totalMov,colisoes,x,y";

pub fn write_population_csv<W>(writer: &mut W, population: &Population) -> io::Result<()>
where
    W: Write + ?Sized,
{
    writeln!(writer, "{CSV_HEADER}")?;
    for ind in population {
        write_record(writer, ind)?;
    }
    Ok(())
}

fn write_record<W>(writer: &mut W, ind: &Individual) -> io::Result<()>
where
    W: Write + ?Sized,
{
    let pos = ind.final_position();
    writeln!(
        writer,
        "\"{}\",{:.2},{},{},{},{}",
        ind.genotype(),
        ind.fitness(),
        ind.moves_taken(),
        ind.collisions(),
        pos.row,
        pos.col,
    )
}
