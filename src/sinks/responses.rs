use std::collections::HashSet;
use std::fs::File;
use std::path::Path;

use csv::Writer;
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::error::SinkError;

use super::format::render_cell;

/// Writes the response log to `path` and returns the number of rows.
///
/// The header is the union of all keys in first-seen order. An empty log
/// creates no file.
///
/// # Errors
///
/// Returns an error when the file cannot be created or written.
pub fn write_responses_csv(
    path: &Path,
    responses: &[&Map<String, Value>],
) -> Result<usize, SinkError> {
    if responses.is_empty() {
        warn!("No responses were captured, skipping {}", path.display());
        return Ok(0);
    }

    let columns = collect_columns(responses);
    let file = File::create(path).map_err(|err| SinkError::CreateFile {
        path: path.to_path_buf(),
        source: err,
    })?;
    let mut writer = Writer::from_writer(file);
    let csv_error = |err: csv::Error| SinkError::WriteCsv {
        path: path.to_path_buf(),
        source: err,
    };

    writer.write_record(&columns).map_err(csv_error)?;
    for response in responses {
        let row = columns
            .iter()
            .map(|column| response.get(*column).map(render_cell).unwrap_or_default());
        writer.write_record(row).map_err(csv_error)?;
    }
    writer.flush().map_err(|err| SinkError::Flush {
        path: path.to_path_buf(),
        source: err,
    })?;

    info!("Wrote {} responses to {}", responses.len(), path.display());
    Ok(responses.len())
}

fn collect_columns<'log>(responses: &[&'log Map<String, Value>]) -> Vec<&'log str> {
    let mut seen = HashSet::new();
    let mut columns = Vec::new();
    for response in responses {
        for key in response.keys() {
            if seen.insert(key.as_str()) {
                columns.push(key.as_str());
            }
        }
    }
    columns
}
