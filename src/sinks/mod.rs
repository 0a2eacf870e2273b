//! Run artifacts: the response log CSV, the summary text file, and the
//! optional JSON summary.
mod artifacts;
mod files;
mod format;
mod responses;
mod summary;


pub use artifacts::write_run_artifacts;
pub use files::{ArtifactPaths, resolve_output_dir};
pub use responses::write_responses_csv;
pub use summary::{format_summary, write_summary_json, write_summary_text};
