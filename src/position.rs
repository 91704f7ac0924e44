use std::io::Read;

use anyhow::{Context, Result};
use log::info;

use crate::{
    cli::PositionArgs,
    columns::{self, ColumnSelector},
    confirm::OverwritePolicy,
    error,
    io_utils::{self, FileOutput, Output},
    operation::ColumnOperation,
    rows::RowSource,
    writer::{self, WriteOutcome},
};

/// Moves one column so that it ends up at `to_index` in the output.
pub fn position_column<R: Read>(
    mut source: RowSource<R>,
    output: &dyn Output,
    to_index: usize,
    column: &ColumnSelector,
    policy: &mut OverwritePolicy,
) -> error::Result<WriteOutcome> {
    let header = source.read_header()?;
    let width = header.len();
    let resolved = columns::resolve(&header, column)?;
    columns::check_within(resolved.index, width, "Column index")?;
    columns::check_within(to_index, width, "Target index")?;

    info!("Moving {resolved} to index {to_index}");

    let mut operation = ColumnOperation::PositionColumn {
        index: resolved.index,
        to_index,
    };
    writer::write_rows(output, policy, Some(header), source, &mut operation)
}

pub fn execute(args: &PositionArgs, policy: &mut OverwritePolicy) -> Result<WriteOutcome> {
    let column = ColumnSelector::from_parts(args.index, args.name.clone())?;
    let source = io_utils::open_source(&args.input)?;
    let output = FileOutput::new(&args.output);
    position_column(source, &output, args.to, &column, policy)
        .with_context(|| format!("Repositioning column in {:?}", args.input))
}
