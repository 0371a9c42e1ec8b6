use std::time::Instant;

use log::info;

use matrix_sort_core::{
    ExternalSolver, Result, SortOptions, logging, read_matrix, sort_matrix, write_outcome,
};

fn main() -> Result<()> {
    let now = Instant::now();
    let options = SortOptions::from_args()?;
    logging::init_logger(&options)?;

    info!("options: {options}");

    let matrix = read_matrix(&options)?;
    info!("input: n={}", matrix.size());

    let mut solver = ExternalSolver::new(options.solver_path())
        .with_extra_args(&options.solver_args);
    if let Some(seed) = options.solver_seed {
        solver = solver.with_seed(seed);
    }

    let outcome = sort_matrix(&matrix, &options, &solver)?;
    write_outcome(&outcome, &options)?;

    info!(
        "output: n={} removed={} time={:.2}s",
        outcome.order.len(),
        outcome.removed.len(),
        now.elapsed().as_secs_f32()
    );

    Ok(())
}
