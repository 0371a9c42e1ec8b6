use std::{
    collections::HashSet,
    fs, io,
    path::{Path, PathBuf},
    sync::{
        Mutex, OnceLock,
        atomic::{AtomicUsize, Ordering},
    },
};

use crate::Result;

const PROBLEM_FILE: &str = "problem.tsp";
const TOUR_FILE: &str = "problem.tour";

static RUN_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Work directories removed by the Ctrl-C handler.
struct InterruptCleanup {
    dirs: Mutex<HashSet<PathBuf>>,
}

static INTERRUPT_CLEANUP: OnceLock<InterruptCleanup> = OnceLock::new();

impl InterruptCleanup {
    /// The process-wide registry; the handler is installed on first use.
    fn global() -> &'static Self {
        INTERRUPT_CLEANUP.get_or_init(|| {
            if let Err(err) = ctrlc::set_handler(|| {
                for dir in Self::global().snapshot() {
                    cleanup_workdir(&dir);
                }
                std::process::exit(130);
            }) {
                log::warn!("cleanup: failed to install interrupt handler err={err}");
            }
            Self {
                dirs: Mutex::new(HashSet::new()),
            }
        })
    }

    fn insert(&self, dir: &Path) {
        if let Ok(mut dirs) = self.dirs.lock() {
            dirs.insert(dir.to_path_buf());
        }
    }

    fn remove(&self, dir: &Path) {
        if let Ok(mut dirs) = self.dirs.lock() {
            dirs.remove(dir);
        }
    }

    fn snapshot(&self) -> Vec<PathBuf> {
        self.dirs
            .lock()
            .map(|dirs| dirs.iter().cloned().collect())
            .unwrap_or_default()
    }

    #[cfg(test)]
    fn contains(&self, dir: &Path) -> bool {
        self.dirs.lock().is_ok_and(|dirs| dirs.contains(dir))
    }
}

/// Removes `work_dir` recursively. Failures are logged, not returned.
pub fn cleanup_workdir(work_dir: &Path) {
    if work_dir.exists() {
        if let Err(err) = fs::remove_dir_all(work_dir) {
            log::warn!(
                "cleanup: failed to remove workdir={} err={err}",
                work_dir.display()
            );
            return;
        }
        log::debug!("cleanup: removed workdir={}", work_dir.display());
    }

    if let Some(registry) = INTERRUPT_CLEANUP.get() {
        registry.remove(work_dir);
    }
}

/// Fresh `run-<pid>-<n>` directory under a base directory, holding one run's
/// `problem.tsp` and `problem.tour`.
///
/// Only the run directory is registered for Ctrl-C removal and deleted by
/// [`WorkDir::cleanup`]. The base is removed too when this run created it and
/// it is empty afterwards; a pre-existing base is never touched.
#[derive(Debug)]
pub struct WorkDir {
    path: PathBuf,
    created_base: Option<PathBuf>,
}

impl WorkDir {
    /// Creates a new run directory under `base` (creating `base` and parents
    /// when missing). Paths are absolute, since the solver runs with the run
    /// directory as its working directory.
    pub fn create(base: &Path) -> Result<Self> {
        let base_existed = base.is_dir();
        fs::create_dir_all(base)?;
        let base = fs::canonicalize(base)?;

        let path = loop {
            let candidate = base.join(format!(
                "run-{}-{}",
                std::process::id(),
                RUN_COUNTER.fetch_add(1, Ordering::Relaxed)
            ));
            match fs::create_dir(&candidate) {
                Ok(()) => break candidate,
                Err(err) if err.kind() == io::ErrorKind::AlreadyExists => continue,
                Err(err) => return Err(err.into()),
            }
        };

        InterruptCleanup::global().insert(&path);
        log::debug!("workdir: ready path={}", path.display());
        Ok(Self {
            path,
            created_base: (!base_existed).then_some(base),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn problem_file(&self) -> PathBuf {
        self.path.join(PROBLEM_FILE)
    }

    pub fn tour_file(&self) -> PathBuf {
        self.path.join(TOUR_FILE)
    }

    pub fn cleanup(self) {
        cleanup_workdir(&self.path);
        if let Some(base) = &self.created_base
            && fs::remove_dir(base).is_ok()
        {
            log::debug!("cleanup: removed base={}", base.display());
        }
    }

    /// Leaves the directory on disk and drops it from the Ctrl-C registry.
    pub fn keep(self) -> PathBuf {
        InterruptCleanup::global().remove(&self.path);
        self.path
    }
}
