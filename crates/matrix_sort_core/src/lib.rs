//! Reorders a similarity matrix so that similar rows sit next to each other.
//!
//! The matrix is cleaned of empty rows, turned into a symmetric TSP instance
//! with one extra dummy node, solved by an external solver (Concorde), and
//! the resulting tour is cut at the dummy to get a linear order.

mod algo;
mod error;
mod io;
pub mod logging;
mod matrix;
mod permutation;
mod pipeline;
mod tsp;
mod workdir;

pub(crate) use io::options;

pub use algo::clean::{BadSuccessors, CleanedMatrix, clean_matrix};
pub use algo::distance::{SigmoidDistance, SimilarityToDistance};
pub use algo::rearrange::{rearrange, rearrange_into, reinsert};
pub use error::{Error, Result};
pub use io::input::{parse_matrix, read_matrix};
pub use io::options::{LogFormat, LogLevel, OutputKind, ReinsertMode, SortOptions};
pub use io::output::{write_outcome, write_outcome_to};
pub use matrix::SimilarityMatrix;
pub use permutation::Permutation;
pub use pipeline::{SortOutcome, sort_matrix};
pub use tsp::encode::{encode, encode_to_string, write_problem_file};
pub use tsp::solver::{ExternalSolver, TourSolver};
pub use tsp::tour::ParsedTour;
pub use workdir::{WorkDir, cleanup_workdir};
