use std::{
    fs::File,
    io::{BufWriter, Write},
};

use crate::{
    Result, SortOutcome,
    options::{OutputKind, SortOptions},
};

/// Writes the outcome to `--output`, or stdout when no output path is set.
pub fn write_outcome(outcome: &SortOutcome, options: &SortOptions) -> Result<()> {
    match options.output_path() {
        Some(path) => {
            let file = File::create(path)?;
            write_outcome_to(outcome, options.emit, BufWriter::new(file))
        }
        None => write_outcome_to(outcome, options.emit, std::io::stdout().lock()),
    }
}

/// `Matrix` writes the sorted matrix row by row, `Order` one original index per line.
pub fn write_outcome_to<W: Write>(outcome: &SortOutcome, kind: OutputKind, mut out: W) -> Result<()> {
    match kind {
        OutputKind::Matrix => outcome.matrix.write_to(out)?,
        OutputKind::Order => {
            for idx in &outcome.order {
                writeln!(out, "{idx}")?;
            }
            out.flush()?;
        }
    }
    Ok(())
}
