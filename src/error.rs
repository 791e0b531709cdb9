//! Error types for the progress tracker
//!
//! Validation failures are kept separate from I/O and codec failures so the
//! MCP layer can report them distinctly. Neither kind ever leaves the session
//! half-mutated.

use crate::tracker::ItemId;
use std::path::PathBuf;
use thiserror::Error;

/// Rejected field values at the entry boundary
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Item name must not be empty")]
    EmptyName,

    #[error("Weight must be greater than 0 (got {0})")]
    NonPositiveWeight(f64),

    #[error("Estimated hours cannot be negative (got {0})")]
    NegativeHours(f64),

    #[error("Invalid date format '{0}'. Use YYYY-MM-DD (e.g., '2025-03-15')")]
    InvalidDate(String),

    #[error("Invalid status '{0}'. Valid statuses: Not started, In progress, Blocked, Done")]
    InvalidStatus(String),

    #[error("Invalid progress mode '{0}'. Valid modes: Weighted, Unweighted, Hours-weighted")]
    InvalidMode(String),

    #[error(
        "Invalid sort key '{0}'. Valid keys: Due Date, Name, Weight, Estimate, Done, Status"
    )]
    InvalidSortKey(String),
}

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Item {0} does not exist")]
    ItemNotFound(ItemId),

    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV must, at minimum, include the '{0}' column")]
    MissingColumn(&'static str),

    #[error("Tag '{0}' is not used by any item")]
    UnknownTag(String),

    #[error("No items to export")]
    NothingToExport,

    #[error("Goal image '{}' does not exist", .0.display())]
    MissingImage(PathBuf),
}

impl TrackerError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = TrackerError> = std::result::Result<T, E>;
