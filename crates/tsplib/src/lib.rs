//! `tsplib` writes TSPLIB instances for explicit distance tables, runs an
//! external TSP solver as a subprocess, and reads the solver's tour file.
//!
//! The crate targets solvers with a Concorde-style command line
//! (`<exe> [args] -o <tour> <problem>`) whose output tour lists the node count
//! on the first line, followed by zero-based node ids.
//!
//! # Quickstart
//!
//! ```no_run
//! use std::{fs::File, io::BufWriter, path::Path};
//!
//! use tsplib::{
//!     problem::{FullMatrixWriter, ProblemHeader},
//!     process::SolverProcess,
//!     tour::SolutionTour,
//! };
//!
//! fn main() -> tsplib::TsplibResult<()> {
//!     let header = ProblemHeader::explicit_full_matrix("SORT", 2);
//!     let file = BufWriter::new(File::create("work/problem.tsp")?);
//!     let mut writer = FullMatrixWriter::begin(file, &header)?;
//!     writer.write_row([0, 7])?;
//!     writer.write_row([7, 0])?;
//!     writer.finish()?;
//!
//!     SolverProcess::new("concorde").run(
//!         Path::new("work/problem.tsp"),
//!         Path::new("work/problem.tour"),
//!         "concorde run",
//!     )?;
//!     let tour = SolutionTour::from_file("work/problem.tour")?;
//!     println!("{:?}", tour.nodes);
//!     Ok(())
//! }
//! ```

pub mod problem;
pub mod process;
pub mod tour;

mod error;
mod keyword_writer;

pub use error::{TsplibError, TsplibResult};
