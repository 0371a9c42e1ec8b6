use std::{
    env,
    path::{Path, PathBuf},
    process,
};

use log::LevelFilter;
use matrix_sort_derive::{CliOptions, CliValue, KvDisplay};

use crate::{Error, Result, SigmoidDistance};

/// Runtime options for one sorting run.
#[derive(Clone, Debug, CliOptions, KvDisplay)]
pub struct SortOptions {
    /// Path to the TSP solver executable.
    #[cli(long = "solver-exe")]
    #[kv(fmt = "path")]
    pub solver_exe: PathBuf,
    /// Base directory; each run solves in a fresh subdirectory of it.
    #[cli(long = "work-dir")]
    #[kv(fmt = "path")]
    pub work_dir: PathBuf,
    /// Random seed passed to the solver as `-s <seed>`.
    #[cli(long = "solver-seed")]
    #[kv(fmt = "opt")]
    pub solver_seed: Option<u64>,
    /// Extra solver arguments, split on whitespace.
    #[cli(long = "solver-args", hint = "args")]
    pub solver_args: String,
    /// Comment written into the problem header.
    #[cli(long = "comment")]
    pub comment: String,
    /// Scale of the sigmoid distance transform.
    #[cli(long = "factor")]
    pub factor: f64,
    /// Added to the sigmoid denominator.
    #[cli(long = "summand")]
    pub summand: f64,
    /// Distance used where the similarity is NaN.
    #[cli(long = "nan-replacement")]
    pub nan_replacement: f64,
    /// Rotate the order to start right after the dummy node.
    pub rotate_to_dummy: bool,
    /// What to do with rows removed during cleaning: `drop`, `place` or `follow`.
    #[cli(long = "reinsert", parse_with = "ReinsertMode::parse")]
    pub reinsert: ReinsertMode,
    /// Write the sorted matrix or the order of original indices.
    #[cli(long = "emit", parse_with = "OutputKind::parse")]
    pub emit: OutputKind,
    /// Whether to remove the run directory after the run.
    pub cleanup: bool,
    /// Structured logging level.
    #[cli(long = "log-level", parse_with = "LogLevel::parse")]
    pub log_level: LogLevel,
    /// Logging output format.
    #[cli(long = "log-format", parse_with = "LogFormat::parse")]
    pub log_format: LogFormat,
    /// Include timestamps in log lines.
    pub log_timestamp: bool,
    /// Optional output file path for logs. Empty means stderr.
    #[cli(long = "log-output", hint = "path")]
    pub log_output: String,
    /// Optional input matrix file. Empty means stdin.
    #[cli(long = "input", hint = "path")]
    pub input: String,
    /// Optional output file. Empty means stdout.
    #[cli(long = "output", hint = "path")]
    pub output: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, CliValue)]
#[cli_value(option = "log-level")]
pub enum LogLevel {
    Error,
    #[cli(alias = "warning")]
    Warn,
    Info,
    Debug,
    Trace,
    Off,
}

impl LogLevel {
    pub fn to_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
            Self::Off => LevelFilter::Off,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, CliValue)]
#[cli_value(option = "log-format")]
pub enum LogFormat {
    Compact,
    Pretty,
}

/// Treatment of the rows and columns removed by cleaning.
#[derive(Clone, Copy, Debug, Eq, PartialEq, CliValue)]
#[cli_value(option = "reinsert")]
pub enum ReinsertMode {
    /// Output only the kept rows.
    Drop,
    /// Put removed rows back at their original index, filled with NaN.
    Place,
    /// Put each removed row right behind the kept row it followed.
    Follow,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, CliValue)]
#[cli_value(option = "emit")]
pub enum OutputKind {
    Matrix,
    Order,
}

impl Default for SortOptions {
    fn default() -> Self {
        Self {
            solver_exe: PathBuf::from("concorde"),
            work_dir: default_work_dir(),
            solver_seed: None,
            solver_args: String::new(),
            comment: String::new(),
            factor: 1000.0,
            summand: 0.0,
            nan_replacement: 1_000_000.0,
            rotate_to_dummy: true,
            reinsert: ReinsertMode::Drop,
            emit: OutputKind::Matrix,
            cleanup: true,
            log_level: LogLevel::Warn,
            log_format: LogFormat::Compact,
            log_timestamp: true,
            log_output: String::new(),
            input: String::new(),
            output: String::new(),
        }
    }
}

impl SortOptions {
    pub fn from_args() -> Result<Self> {
        Self::parse_from_iter(env::args().skip(1))
    }

    pub fn parse_from_iter<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Self::default();
        let mut args = args
            .into_iter()
            .map(|arg| arg.as_ref().to_owned())
            .peekable();

        while let Some(arg) = args.next() {
            let raw_name = option_name(&arg)?;

            // Boolean flags never consume the following argument.
            let (name, inline) = match raw_name.split_once('=') {
                Some((name, value)) => (name, Some(value.to_string())),
                None => (raw_name, None),
            };
            if let Some((slot, negated)) = options.flag_slot(name) {
                *slot = flag_value(name, inline, negated)?;
                continue;
            }

            let (name, value) = Self::split_arg(raw_name, &mut args);
            if !options.apply_cli_option(&name, value)? {
                return Err(Error::invalid_input(format!(
                    "Unknown option: --{name}\n\n{}",
                    Self::usage()
                )));
            }
        }

        Ok(options)
    }

    /// The field behind a boolean flag, and whether the flag is the `--no-` form.
    fn flag_slot(&mut self, name: &str) -> Option<(&mut bool, bool)> {
        let (base, negated) = match name.strip_prefix("no-") {
            Some(base) => (base, true),
            None => (name, false),
        };
        let slot = match base {
            "rotate-to-dummy" => &mut self.rotate_to_dummy,
            "cleanup" => &mut self.cleanup,
            "log-timestamp" => &mut self.log_timestamp,
            _ => return None,
        };
        Some((slot, negated))
    }

    pub fn usage() -> String {
        format!(
            concat!(
                "Usage:\n",
                "  matrix-sort [options] [--input matrix.txt]\n",
                "  matrix-sort [options] < matrix.txt\n\n",
                "Options:\n",
                "{}",
                "  --rotate-to-dummy[=<bool>]\n",
                "  --no-rotate-to-dummy\n",
                "  --log-timestamp[=<bool>]\n",
                "  --no-log-timestamp\n",
                "  --cleanup[=<bool>]\n",
                "  --no-cleanup\n",
                "  --help\n",
                "\n",
                "Examples:\n",
                "  matrix-sort --input sim.txt --output sorted.txt\n",
                "  matrix-sort --solver-exe /opt/concorde/concorde --solver-seed 7 < sim.txt\n",
                "  matrix-sort --reinsert=follow --emit=order --log-level=info < sim.txt\n",
                "  matrix-sort --no-cleanup --work-dir ./run --log-level=debug < sim.txt\n",
            ),
            Self::cli_option_help()
        )
    }

    pub fn distance(&self) -> SigmoidDistance {
        SigmoidDistance::new(self.factor)
            .with_summand(self.summand)
            .with_nan_replacement(self.nan_replacement)
    }

    pub fn log_output_path(&self) -> Option<&Path> {
        optional_path(&self.log_output)
    }

    pub fn output_path(&self) -> Option<&Path> {
        optional_path(&self.output)
    }

    pub fn input_path(&self) -> Option<&Path> {
        optional_path(&self.input)
    }

    pub fn solver_path(&self) -> &Path {
        &self.solver_exe
    }

    pub fn work_dir_path(&self) -> &Path {
        &self.work_dir
    }
}

fn optional_path(raw: &str) -> Option<&Path> {
    let raw = raw.trim();
    if raw.is_empty() || raw == "-" {
        None
    } else {
        Some(Path::new(raw))
    }
}

fn default_work_dir() -> PathBuf {
    env::temp_dir().join(format!("matrix-sort-{}", process::id()))
}

/// Strips the leading `--`; `--help` and positional arguments end parsing.
fn option_name(arg: &str) -> Result<&str> {
    if arg == "--help" || arg == "-h" {
        return Err(Error::invalid_input(SortOptions::usage()));
    }

    match arg.strip_prefix("--") {
        Some("") => Err(Error::invalid_input(format!(
            "Invalid option name: {arg}\n\n{}",
            SortOptions::usage()
        ))),
        Some(name) => Ok(name),
        None => Err(Error::invalid_input(format!(
            "Unexpected argument: {arg}\n\n{}",
            SortOptions::usage()
        ))),
    }
}

/// `--x` and `--x=<bool>` set the flag; `--no-x` clears it and takes no value.
fn flag_value(name: &str, value: Option<String>, negated: bool) -> Result<bool> {
    match (value, negated) {
        (None, negated) => Ok(!negated),
        (Some(v), false) => parse_bool(name, &v),
        (Some(_), true) => Err(Error::invalid_input(format!(
            "Flag --{name} does not take a value"
        ))),
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value {
        "1" | "true" | "TRUE" | "True" | "yes" | "YES" | "on" | "ON" => Ok(true),
        "0" | "false" | "FALSE" | "False" | "no" | "NO" | "off" | "OFF" => Ok(false),
        _ => Err(Error::invalid_input(format!(
            "Invalid boolean for --{name}: {value} (expected true/false)"
        ))),
    }
}
