//! Clean, solve, rearrange: the whole sort of one similarity matrix.

use crate::{
    Permutation, Result, SimilarityMatrix,
    algo::{
        clean::{CleanedMatrix, clean_matrix},
        rearrange::{rearrange, reinsert},
    },
    options::{ReinsertMode, SortOptions},
    tsp::{encode::write_problem_file, solver::TourSolver, tour::ParsedTour},
    workdir::WorkDir,
};

/// Below this many nodes every order is optimal up to reversal.
const MIN_SOLVER_NODES: usize = 3;

#[derive(Clone, Debug)]
pub struct SortOutcome {
    pub matrix: SimilarityMatrix,
    /// `order[x]` is the original index shown at output position `x`.
    pub order: Vec<usize>,
    /// Original indices of the rows removed by cleaning.
    pub removed: Vec<usize>,
    /// Position of the dummy node in the solver tour, when a solver ran.
    pub dummy_index: Option<usize>,
}

/// Sorts `matrix` so similar rows end up next to each other.
#[matrix_sort_derive::timer("sort")]
pub fn sort_matrix<S>(
    matrix: &SimilarityMatrix,
    options: &SortOptions,
    solver: &S,
) -> Result<SortOutcome>
where
    S: TourSolver + ?Sized,
{
    let cleaned = clean_matrix(matrix);
    let n = cleaned.matrix.size();

    let (order, dummy_index) = if n < MIN_SOLVER_NODES {
        log::debug!("sort: skipping solver n={n}");
        (Permutation::identity(n), None)
    } else {
        let (order, dummy_index) = solve_order(&cleaned.matrix, options, solver)?;
        (order, Some(dummy_index))
    };

    let outcome = apply_order(matrix, &cleaned, &order, options.reinsert)?;
    log::info!(
        "sort: n={} kept={n} removed={} dummy_index={} reinsert={}",
        matrix.size(),
        cleaned.removed.len(),
        dummy_index.map_or_else(|| "-".to_string(), |idx| idx.to_string()),
        options.reinsert
    );

    Ok(SortOutcome {
        dummy_index,
        ..outcome
    })
}

fn solve_order<S>(
    matrix: &SimilarityMatrix,
    options: &SortOptions,
    solver: &S,
) -> Result<(Permutation, usize)>
where
    S: TourSolver + ?Sized,
{
    let work_dir = WorkDir::create(options.work_dir_path())?;
    let result = run_solver(&work_dir, matrix, options, solver);

    if options.cleanup {
        work_dir.cleanup();
    } else {
        let kept = work_dir.keep();
        log::info!("sort: kept workdir={}", kept.display());
    }

    result
}

fn run_solver<S>(
    work_dir: &WorkDir,
    matrix: &SimilarityMatrix,
    options: &SortOptions,
    solver: &S,
) -> Result<(Permutation, usize)>
where
    S: TourSolver + ?Sized,
{
    let problem = work_dir.problem_file();
    let tour = work_dir.tour_file();

    write_problem_file(&problem, matrix, &options.distance(), &options.comment)?;
    solver.solve(&problem, &tour)?;

    let parsed = ParsedTour::from_file(&tour, matrix.size())?;
    let dummy_index = parsed.dummy_index();
    let order = if options.rotate_to_dummy {
        parsed.normalized()
    } else {
        parsed.into_permutation()
    };
    log::debug!("sort: tour parsed dummy_index={dummy_index}");

    Ok((order, dummy_index))
}

/// `order` ranges over the cleaned matrix; the result is expressed in
/// original indices according to `mode`.
fn apply_order(
    original: &SimilarityMatrix,
    cleaned: &CleanedMatrix<'_>,
    order: &Permutation,
    mode: ReinsertMode,
) -> Result<SortOutcome> {
    let removed = cleaned.removed.clone();

    let (matrix, order) = match mode {
        ReinsertMode::Drop => (
            rearrange(&cleaned.matrix, order)?,
            order.map_indices(&cleaned.kept),
        ),
        ReinsertMode::Place => {
            let sorted = rearrange(&cleaned.matrix, order)?;
            let matrix = reinsert(&sorted, &cleaned.kept, original.size(), f64::NAN)?;

            // Removed slots keep their own index; kept slots take the sorted order.
            let mut placed: Vec<usize> = (0..original.size()).collect();
            for (slot, idx) in cleaned.kept.iter().zip(order.map_indices(&cleaned.kept)) {
                placed[*slot] = idx;
            }
            (matrix, placed)
        }
        ReinsertMode::Follow => {
            let expanded = cleaned.expand_order(order)?;
            (rearrange(original, &expanded)?, expanded.into_inner())
        }
    };

    Ok(SortOutcome {
        matrix,
        order,
        removed,
        dummy_index: None,
    })
}
