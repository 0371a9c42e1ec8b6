use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use crate::{TsplibError, TsplibResult};

const OUTPUT_FLAG: &str = "-o";

/// Blocking invocation of an external TSP solver:
/// `<exe> <extra args...> -o <tour> <problem>`.
#[derive(Clone, Debug)]
pub struct SolverProcess {
    exe_path: PathBuf,
    current_dir: Option<PathBuf>,
    extra_args: Vec<OsString>,
}

impl SolverProcess {
    pub fn new(exe_path: impl Into<PathBuf>) -> Self {
        Self {
            exe_path: exe_path.into(),
            current_dir: None,
            extra_args: Vec::new(),
        }
    }

    pub fn with_current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    pub fn with_extra_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.extra_args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn exe_path(&self) -> &Path {
        &self.exe_path
    }

    pub fn command(&self, problem_file: &Path, tour_file: &Path) -> Command {
        let mut cmd = Command::new(&self.exe_path);
        cmd.args(&self.extra_args)
            .arg(OUTPUT_FLAG)
            .arg(tour_file)
            .arg(problem_file);
        if let Some(dir) = &self.current_dir {
            cmd.current_dir(dir);
        }
        cmd
    }

    /// Runs the solver to completion. A launch failure and a non-zero exit are
    /// both errors; `context` prefixes the latter together with captured output.
    pub fn run(
        &self,
        problem_file: &Path,
        tour_file: &Path,
        context: impl ToString,
    ) -> TsplibResult<Output> {
        let output = self
            .command(problem_file, tour_file)
            .output()
            .map_err(|source| TsplibError::Launch {
                program: self.exe_path.display().to_string(),
                source,
            })?;

        if output.status.success() {
            Ok(output)
        } else {
            Err(TsplibError::ProcessFailed {
                context: format!("{} ({})", context.to_string(), output.status),
                stdout: String::from_utf8_lossy(&output.stdout).to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            })
        }
    }
}
