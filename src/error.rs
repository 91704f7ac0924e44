//! Error type shared by every column operation.
//!
//! Argument and lookup failures are raised while a header is being resolved,
//! before the output sink is opened. I/O and CSV failures abort a pass where
//! they happen and are never retried.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OpError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Column '{name}' not found in header")]
    ColumnNotFound { name: String },

    #[error("Table {source_name} has no header row")]
    EmptyTable { source_name: String },

    #[error("Calculation failed on row {row}: {message}")]
    Calculation { row: usize, message: String },

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{context}: {source}")]
    Csv {
        context: String,
        #[source]
        source: csv::Error,
    },
}

impl OpError {
    pub fn invalid(message: impl Into<String>) -> Self {
        OpError::InvalidArgument(message.into())
    }

    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        OpError::Io {
            context: context.into(),
            source,
        }
    }

    pub(crate) fn csv(context: impl Into<String>, source: csv::Error) -> Self {
        OpError::Csv {
            context: context.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, OpError>;
