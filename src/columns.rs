//! Column reference resolution against a header row.

use std::fmt;

use crate::{
    data::Cell,
    error::{OpError, Result},
};

/// How a caller identified a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnSelector {
    Name(String),
    Index(usize),
}

impl ColumnSelector {
    /// Builds a selector from the optional pair most callers carry around.
    /// A name takes precedence over an index when both are present.
    pub fn from_parts(index: Option<usize>, name: Option<String>) -> Result<Self> {
        match (name, index) {
            (Some(name), _) => Ok(ColumnSelector::Name(name)),
            (None, Some(index)) => Ok(ColumnSelector::Index(index)),
            (None, None) => Err(OpError::invalid(
                "One of index and name must be specified",
            )),
        }
    }
}

/// A column resolved against a specific header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRef {
    pub name: Option<String>,
    pub index: usize,
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "column \"{name}\" at index {}", self.index),
            None => write!(f, "column at index {}", self.index),
        }
    }
}

/// Resolves a selector to a `(name, index)` pair. Names are matched exactly
/// and the first matching header cell wins. Indexes are returned unchanged;
/// bounds are the calling operation's concern.
pub fn resolve(header: &[Cell], selector: &ColumnSelector) -> Result<ColumnRef> {
    match selector {
        ColumnSelector::Name(name) => {
            let index = header
                .iter()
                .position(|cell| cell.render() == name.as_str())
                .ok_or_else(|| OpError::ColumnNotFound { name: name.clone() })?;
            Ok(ColumnRef {
                name: Some(name.clone()),
                index,
            })
        }
        ColumnSelector::Index(index) => Ok(ColumnRef {
            name: None,
            index: *index,
        }),
    }
}

/// Ensures `index` addresses an existing cell of a header `width` wide.
pub fn check_within(index: usize, width: usize, what: &str) -> Result<()> {
    if index < width {
        Ok(())
    } else {
        Err(OpError::invalid(format!(
            "{what} {index} is out of bounds for a header of {width} column(s)"
        )))
    }
}
