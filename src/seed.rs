//! Loading starter tasks from a JSON file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::task::{Status, Task, TaskId};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse seed file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A task as written by hand or by older tools: status is free text.
#[derive(Debug, Deserialize)]
struct SeedRecord {
    id: TaskId,
    title: String,
    description: String,
    #[serde(default)]
    status: String,
}

impl From<SeedRecord> for Task {
    fn from(record: SeedRecord) -> Self {
        Task {
            id: record.id,
            title: record.title,
            description: record.description,
            status: Status::normalize(&record.status),
        }
    }
}

pub fn parse(data: &str) -> Result<Vec<Task>, SeedError> {
    let records: Vec<SeedRecord> = serde_json::from_str(data)?;
    Ok(records.into_iter().map(Task::from).collect())
}

pub fn load(path: &Path) -> Result<Vec<Task>, SeedError> {
    let data = fs::read_to_string(path).map_err(|source| SeedError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&data)
}
