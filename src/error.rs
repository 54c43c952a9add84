// File: src/error.rs
use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::core::types::{AisleId, RawItemId};

/// Which raw input table a load error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Frequency,
    Aisle,
    Order,
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableKind::Frequency => write!(f, "frequency"),
            TableKind::Aisle => write!(f, "aisle"),
            TableKind::Order => write!(f, "order"),
        }
    }
}

/// Fatal pipeline errors. Input problems abort the run before any dataset
/// is assembled; write problems abort the affected output job.
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("malformed {table} table: {reason}")]
    MalformedInput { table: TableKind, reason: String },

    #[error("dataset serialization failed: {reason}")]
    Serialization { reason: String },

    #[error("I/O failure on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid dataset record: {reason}")]
    InvalidRecord { reason: String },
}

impl DatasetError {
    /// Shorthand for input-table parse failures.
    pub fn malformed(table: TableKind, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            table,
            reason: reason.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Reasons a single substitution draw is abandoned. These never abort an
/// assembly; the engine absorbs them into run counters.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubstitutionSkip {
    #[error("item {item} has no aisle assignment")]
    MissingAisle { item: RawItemId },

    #[error("aisle {aisle} has too few distinct weighted items")]
    SaturatedAisle { aisle: AisleId },
}

pub type DatasetResult<T> = std::result::Result<T, DatasetError>;
