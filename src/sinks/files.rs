use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::warn;

const RESPONSES_PREFIX: &str = "stress_test_responses";
const SUMMARY_PREFIX: &str = "stress_test_summarize";
const TIMESTAMP_FORMAT: &str = "%H_%M_%S";

/// Where one run writes its artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub responses: PathBuf,
    pub summary: PathBuf,
}

impl ArtifactPaths {
    /// Paths stamped with the current local wall-clock time.
    #[must_use]
    pub fn stamped_now(dir: &Path) -> Self {
        let stamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        Self::with_stamp(dir, &stamp)
    }

    #[must_use]
    pub fn with_stamp(dir: &Path, stamp: &str) -> Self {
        Self {
            responses: dir.join(format!("{}_{}.csv", RESPONSES_PREFIX, stamp)),
            summary: dir.join(format!("{}_{}.csv", SUMMARY_PREFIX, stamp)),
        }
    }
}

/// Returns `requested` when it is an existing directory, else the current
/// directory. An empty string means the current directory.
#[must_use]
pub fn resolve_output_dir(requested: &str) -> PathBuf {
    if requested.is_empty() {
        return PathBuf::from(".");
    }
    let path = Path::new(requested);
    if path.is_dir() {
        path.to_path_buf()
    } else {
        warn!(
            "Couldn't find output directory '{}', saving artifacts in the current directory.",
            requested
        );
        PathBuf::from(".")
    }
}
