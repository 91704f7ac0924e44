use std::io::Read;

use anyhow::{Context, Result};
use log::info;

use crate::{
    cli::SelectArgs,
    confirm::OverwritePolicy,
    error::{self, OpError},
    io_utils::{self, FileOutput, Output},
    operation::ColumnOperation,
    rows::RowSource,
    writer::{self, WriteOutcome},
};

/// Keeps the half-open column range `[from_index, to_index)`. The range
/// defaults to the whole header and must not be empty.
pub fn select_columns<R: Read>(
    mut source: RowSource<R>,
    output: &dyn Output,
    from_index: Option<usize>,
    to_index: Option<usize>,
    policy: &mut OverwritePolicy,
) -> error::Result<WriteOutcome> {
    let header = source.read_header()?;
    let width = header.len();
    let from_index = from_index.unwrap_or(0);
    let to_index = to_index.unwrap_or(width);
    if to_index > width {
        return Err(OpError::invalid(format!(
            "End index {to_index} is out of bounds for a header of {width} column(s)"
        )));
    }
    if from_index >= to_index {
        return Err(OpError::invalid(format!(
            "Column range {from_index}..{to_index} selects no columns"
        )));
    }

    info!("Selecting columns {from_index}..{to_index} of {width}");

    let mut operation = ColumnOperation::Select {
        from_index,
        to_index,
    };
    writer::write_rows(output, policy, Some(header), source, &mut operation)
}

pub fn execute(args: &SelectArgs, policy: &mut OverwritePolicy) -> Result<WriteOutcome> {
    let source = io_utils::open_source(&args.input)?;
    let output = FileOutput::new(&args.output);
    select_columns(source, &output, args.from, args.to, policy)
        .with_context(|| format!("Selecting columns from {:?}", args.input))
}
