//! Per-row transforms applied by the streaming writer.
//!
//! Every operation is one [`Generator`]: it is called once per row, header
//! included, with the row number (`0` for the header) and returns the row to
//! write. Single-table operations are variants of [`ColumnOperation`]; merge
//! works on pairs of rows and is [`MergeRows`].

use std::fmt;

use itertools::EitherOrBoth;

use crate::{
    data::{Cell, Row, coerce_row},
    error::{OpError, Result},
};

pub trait Generator<T = Row> {
    fn apply(&mut self, row_number: usize, input: T) -> Result<Row>;
}

type CalcFn = dyn Fn(&[Cell]) -> std::result::Result<Cell, String>;

/// A calculated-column function. It always receives a type-coerced row.
pub struct Calc {
    label: String,
    func: Box<CalcFn>,
}

impl Calc {
    pub fn new<F>(label: impl Into<String>, func: F) -> Self
    where
        F: Fn(&[Cell]) -> std::result::Result<Cell, String> + 'static,
    {
        Self {
            label: label.into(),
            func: Box::new(func),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Coerces `row` and evaluates the function on the coerced copy. The row
    /// itself is left as read.
    pub fn evaluate(&self, row_number: usize, row: &[Cell]) -> Result<Cell> {
        let coerced = coerce_row(row);
        (self.func)(&coerced).map_err(|message| OpError::Calculation {
            row: row_number,
            message,
        })
    }
}

impl fmt::Debug for Calc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Calc").field("label", &self.label).finish()
    }
}

/// A single-table column operation with its parameters already resolved
/// against the header.
#[derive(Debug)]
pub enum ColumnOperation {
    AddColumn {
        index: usize,
        name: Option<String>,
        default_value: String,
        calc: Option<Calc>,
    },
    DropColumn {
        index: usize,
    },
    RenameColumn {
        index: usize,
        new_name: String,
    },
    PositionColumn {
        index: usize,
        to_index: usize,
    },
    Select {
        from_index: usize,
        to_index: usize,
    },
}

impl Generator for ColumnOperation {
    fn apply(&mut self, row_number: usize, mut row: Row) -> Result<Row> {
        match self {
            ColumnOperation::AddColumn {
                index,
                name,
                default_value,
                calc,
            } => {
                let value = match (row_number, name.as_ref(), calc.as_ref()) {
                    (0, Some(name), _) => Cell::text(name.as_str()),
                    (_, _, Some(calc)) => calc.evaluate(row_number, &row)?,
                    _ => Cell::text(default_value.as_str()),
                };
                let at = (*index).min(row.len());
                row.insert(at, value);
            }
            ColumnOperation::DropColumn { index } => {
                if *index < row.len() {
                    row.remove(*index);
                }
            }
            ColumnOperation::RenameColumn { index, new_name } => {
                if row_number == 0 {
                    if let Some(cell) = row.get_mut(*index) {
                        *cell = Cell::text(new_name.as_str());
                    }
                }
            }
            ColumnOperation::PositionColumn { index, to_index } => {
                if *index < row.len() {
                    let cell = row.remove(*index);
                    let at = (*to_index).min(row.len());
                    row.insert(at, cell);
                }
            }
            ColumnOperation::Select {
                from_index,
                to_index,
            } => {
                let end = (*to_index).min(row.len());
                let start = (*from_index).min(end);
                row.truncate(end);
                row.drain(..start);
            }
        }
        Ok(row)
    }
}

/// Concatenates a left row with a right row. A side that has run out
/// contributes no cells at all.
#[derive(Debug, Default, Clone, Copy)]
pub struct MergeRows;

impl Generator<EitherOrBoth<Row, Row>> for MergeRows {
    fn apply(&mut self, _row_number: usize, input: EitherOrBoth<Row, Row>) -> Result<Row> {
        Ok(match input {
            EitherOrBoth::Both(mut left, right) => {
                left.extend(right);
                left
            }
            EitherOrBoth::Left(left) => left,
            EitherOrBoth::Right(right) => right,
        })
    }
}
