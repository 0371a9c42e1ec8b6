use std::{
    fs,
    path::{Path, PathBuf},
};

use tsplib::process::SolverProcess;

use crate::{Error, Result};

/// Something that turns a TSPLIB problem file into a tour file.
pub trait TourSolver {
    /// Solves `problem` and leaves the tour at `tour`.
    fn solve(&self, problem: &Path, tour: &Path) -> Result<()>;
}

/// Runs an external solver binary (Concorde by default) and blocks until it exits.
#[derive(Clone, Debug)]
pub struct ExternalSolver {
    process: SolverProcess,
}

impl ExternalSolver {
    pub fn new(exe: impl Into<PathBuf>) -> Self {
        Self {
            process: SolverProcess::new(exe),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.process = self.process.with_extra_args(["-s".to_string(), seed.to_string()]);
        self
    }

    /// Extra arguments split on whitespace, placed before `-o`.
    pub fn with_extra_args(mut self, args: &str) -> Self {
        self.process = self.process.with_extra_args(args.split_whitespace());
        self
    }

    pub fn exe_path(&self) -> &Path {
        self.process.exe_path()
    }

    /// The solver runs inside the problem's directory, where it leaves its
    /// scratch files.
    fn process_for(&self, problem: &Path) -> SolverProcess {
        match problem.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => self.process.clone().with_current_dir(dir),
            _ => self.process.clone(),
        }
    }
}

impl TourSolver for ExternalSolver {
    fn solve(&self, problem: &Path, tour: &Path) -> Result<()> {
        log::debug!(
            "solver.run: start exe={} problem={} tour={}",
            self.exe_path().display(),
            problem.display(),
            tour.display()
        );

        // A leftover tour must not pass for this run's output.
        if tour.exists() {
            fs::remove_file(tour)?;
        }

        self.process_for(problem)
            .run(problem, tour, "solver run failed")?;

        if !tour.exists() {
            return Err(Error::external_process(format!(
                "solver finished but tour file {} was not created",
                tour.display()
            )));
        }

        log::debug!("solver.run: done tour={}", tour.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{
        ffi::OsStr,
        fs,
        path::Path,
        time::{SystemTime, UNIX_EPOCH},
    };

    use super::{ExternalSolver, TourSolver};
    use crate::Error;

    fn unique_temp_dir(name: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after epoch")
            .as_nanos();
        std::env::temp_dir().join(format!("matrix-sort-tests-{name}-{nanos}"))
    }

    #[test]
    fn seed_and_extra_args_come_before_output_flag() {
        let solver = ExternalSolver::new("concorde")
            .with_seed(7)
            .with_extra_args("  -x   -V ");
        let problem = Path::new("/tmp/work/problem.tsp");
        let cmd = solver
            .process_for(problem)
            .command(problem, Path::new("/tmp/work/problem.tour"));

        let args: Vec<&OsStr> = cmd.get_args().collect();
        assert_eq!(
            args,
            ["-s", "7", "-x", "-V", "-o", "/tmp/work/problem.tour", "/tmp/work/problem.tsp"]
        );
        assert_eq!(cmd.get_current_dir(), Some(Path::new("/tmp/work")));
    }

    #[test]
    fn missing_executable_is_an_external_process_error() {
        let dir = unique_temp_dir("solver-missing");
        fs::create_dir_all(&dir).expect("create temp dir");
        let solver = ExternalSolver::new(dir.join("no-such-solver"));

        let err = solver
            .solve(&dir.join("problem.tsp"), &dir.join("problem.tour"))
            .expect_err("launch should fail");
        assert!(matches!(err, Error::ExternalProcess(_)));

        fs::remove_dir_all(&dir).expect("remove temp dir");
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_process_failed() {
        let dir = unique_temp_dir("solver-false");
        fs::create_dir_all(&dir).expect("create temp dir");
        let solver = ExternalSolver::new("false");

        let err = solver
            .solve(&dir.join("problem.tsp"), &dir.join("problem.tour"))
            .expect_err("false exits non-zero");
        assert!(matches!(err, Error::ProcessFailed { .. }));

        fs::remove_dir_all(&dir).expect("remove temp dir");
    }

    #[cfg(unix)]
    #[test]
    fn success_without_tour_file_is_an_error() {
        let dir = unique_temp_dir("solver-true");
        fs::create_dir_all(&dir).expect("create temp dir");
        let solver = ExternalSolver::new("true");

        let err = solver
            .solve(&dir.join("problem.tsp"), &dir.join("problem.tour"))
            .expect_err("no tour written");
        assert!(err.to_string().contains("was not created"));

        fs::remove_dir_all(&dir).expect("remove temp dir");
    }

    #[cfg(unix)]
    #[test]
    fn stale_tour_is_not_accepted_when_solver_writes_nothing() {
        let dir = unique_temp_dir("solver-stale");
        fs::create_dir_all(&dir).expect("create temp dir");
        let tour = dir.join("problem.tour");
        fs::write(&tour, "3\n2 0 1\n").expect("seed old tour");

        let err = ExternalSolver::new("true")
            .solve(&dir.join("problem.tsp"), &tour)
            .expect_err("old tour must not count");
        assert!(err.to_string().contains("was not created"));
        assert!(!tour.exists());

        fs::remove_dir_all(&dir).expect("remove temp dir");
    }

    #[cfg(unix)]
    #[test]
    fn script_solver_writes_tour() {
        use std::os::unix::fs::PermissionsExt;

        let dir = unique_temp_dir("solver-script");
        fs::create_dir_all(&dir).expect("create temp dir");
        let script = dir.join("fake-concorde.sh");
        fs::write(&script, "#!/bin/sh\nprintf '3\\n2 0 1\\n' > \"$2\"\n").expect("write script");
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).expect("chmod script");

        let tour = dir.join("problem.tour");
        ExternalSolver::new(&script)
            .solve(&dir.join("problem.tsp"), &tour)
            .expect("script solver");
        assert_eq!(fs::read_to_string(&tour).expect("read tour"), "3\n2 0 1\n");

        fs::remove_dir_all(&dir).expect("remove temp dir");
    }
}
