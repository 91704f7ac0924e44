//! Insert a column, filled with a default value or computed per row.

use std::io::Read;

use anyhow::{Context, Result};
use log::info;

use crate::{
    calc,
    cli::AddColumnArgs,
    confirm::OverwritePolicy,
    error::{self, OpError},
    io_utils::{self, FileOutput, Output},
    operation::{Calc, ColumnOperation},
    rows::RowSource,
    writer::{self, WriteOutcome},
};

#[derive(Debug, Default)]
pub struct AddColumnRequest {
    /// Insert position; appends when absent.
    pub index: Option<usize>,
    /// Header cell for the new column.
    pub name: Option<String>,
    /// Cell value for data rows; empty when absent.
    pub default_value: Option<String>,
    /// Computes each data cell from the coerced row. Also computes the header
    /// cell when no name is given.
    pub calc: Option<Calc>,
}

pub fn add_column<R: Read>(
    mut source: RowSource<R>,
    output: &dyn Output,
    request: AddColumnRequest,
    policy: &mut OverwritePolicy,
) -> error::Result<WriteOutcome> {
    let header = source.read_header()?;
    let width = header.len();
    let index = request.index.unwrap_or(width);
    if index > width {
        return Err(OpError::invalid(format!(
            "Cannot insert at index {index} into a header of {width} column(s)"
        )));
    }

    let default_value = request.default_value.unwrap_or_default();
    // Without a name or a calculation the header gets the default value too.
    let name = match (request.name, &request.calc) {
        (Some(name), _) => Some(name),
        (None, None) => Some(default_value.clone()),
        (None, Some(_)) => None,
    };

    match (&request.calc, &name) {
        (None, name) => info!(
            "Adding column \"{}\" at index {index} with default value \"{default_value}\"",
            name.as_deref().unwrap_or_default()
        ),
        (Some(calc), Some(name)) => {
            info!("Adding calculated column \"{name}\" at index {index} using {}", calc.label())
        }
        (Some(calc), None) => info!(
            "Adding calculated column at index {index} using {}",
            calc.label()
        ),
    }

    let mut operation = ColumnOperation::AddColumn {
        index,
        name,
        default_value,
        calc: request.calc,
    };
    writer::write_rows(output, policy, Some(header), source, &mut operation)
}

pub fn execute(args: &AddColumnArgs, policy: &mut OverwritePolicy) -> Result<WriteOutcome> {
    let calc = args
        .calc
        .as_deref()
        .map(calc::compile)
        .transpose()
        .context("Compiling --calc expression")?;
    let source = io_utils::open_source(&args.input)?;
    let output = FileOutput::new(&args.output);
    let request = AddColumnRequest {
        index: args.index,
        name: args.name.clone(),
        default_value: args.default.clone(),
        calc,
    };
    add_column(source, &output, request, policy)
        .with_context(|| format!("Adding column to {:?}", args.input))
}
