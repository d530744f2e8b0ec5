use crate::generator::GenerationResult;
use std::path::{Path, PathBuf};

/// What happened to the combine step of a run
#[derive(Debug, Clone, PartialEq)]
pub enum CombineOutcome {
    NotRequested,
    /// Requested, but no segment succeeded
    Skipped,
    Written(PathBuf),
    Failed(String),
}

/// Summary of a full invocation
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub results: Vec<GenerationResult>,
    pub combine: CombineOutcome,
}

impl RunReport {
    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.success).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.succeeded()
    }

    /// Paths of the successfully generated segments, in config order
    pub fn generated_paths(&self) -> Vec<PathBuf> {
        self.results
            .iter()
            .filter(|r| r.success)
            .map(|r| r.path.clone())
            .collect()
    }

    pub fn combined_path(&self) -> Option<&Path> {
        match &self.combine {
            CombineOutcome::Written(path) => Some(path),
            _ => None,
        }
    }

    /// At least one segment succeeded and, if combining was requested, the
    /// combined file was written.
    pub fn is_success(&self) -> bool {
        self.succeeded() > 0
            && matches!(
                self.combine,
                CombineOutcome::NotRequested | CombineOutcome::Written(_)
            )
    }
}
