//! Ingestion of comma-separated process tables.
//!
//! Each row holds `name, description, arrival_time, burst_time, priority`.
//! Rows that cannot produce a valid record are dropped without consuming an
//! order slot, so `original_order` always counts accepted rows only.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::{Process, Ticks};
use crate::{log_checks, log_events};

/// Longest accepted process name, in characters.
pub const MAX_NAME_CHARS: usize = 50;
/// Longest accepted description, in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 100;

/// Failures that stop ingestion entirely.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Error opening file {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Error reading process rows: {0}")]
    Read(#[from] io::Error),
}

/// Why a single row was dropped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowRejection {
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    #[error("field `{0}` is not a valid integer")]
    InvalidNumber(&'static str),
    #[error("burst_time must be positive")]
    ZeroBurst,
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// Parse one row into a record with `original_order = order`.
///
/// Empty fields count as missing and consecutive separators collapse, so
/// `"a,,1,2,3"` lacks its priority. Fields beyond the fifth are ignored.
pub fn parse_row(line: &str, order: usize) -> Result<Process, RowRejection> {
    let mut fields = line.split(',').map(str::trim).filter(|f| !f.is_empty());
    let mut next = |field: &'static str| fields.next().ok_or(RowRejection::MissingField(field));

    let name = next("name")?;
    let description = next("description")?;
    let arrival = next("arrival_time")?;
    let burst = next("burst_time")?;
    let priority = next("priority")?;

    let arrival_time: Ticks = arrival
        .parse()
        .map_err(|_| RowRejection::InvalidNumber("arrival_time"))?;
    let burst_time: Ticks = burst
        .parse()
        .map_err(|_| RowRejection::InvalidNumber("burst_time"))?;
    let priority: i32 = priority
        .parse()
        .map_err(|_| RowRejection::InvalidNumber("priority"))?;
    if burst_time == 0 {
        return Err(RowRejection::ZeroBurst);
    }

    Ok(Process::new(
        truncate_chars(name, MAX_NAME_CHARS),
        truncate_chars(description, MAX_DESCRIPTION_CHARS),
        arrival_time,
        burst_time,
        priority,
        order,
    ))
}

/// Read records from any line source, stopping at `capacity` records.
pub fn read_processes<R: BufRead>(
    reader: R,
    capacity: usize,
    verbosity: u8,
) -> Result<Vec<Process>, IngestError> {
    let mut processes: Vec<Process> = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        if processes.len() >= capacity {
            log_events!(
                verbosity,
                "Capacity of {} processes reached; ignoring rows from line {}",
                capacity,
                index + 1
            );
            break;
        }

        match parse_row(&line, processes.len()) {
            Ok(process) => processes.push(process),
            Err(reason) => {
                log_checks!(verbosity, "Skipping line {}: {}", index + 1, reason);
            }
        }
    }

    Ok(processes)
}

/// Open `path` and read its records.
pub fn load_processes(
    path: &Path,
    capacity: usize,
    verbosity: u8,
) -> Result<Vec<Process>, IngestError> {
    let file = File::open(path).map_err(|source| IngestError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    read_processes(BufReader::new(file), capacity, verbosity)
}
