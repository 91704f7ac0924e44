use std::io::Read;

use anyhow::{Context, Result};
use log::info;

use crate::{
    cli::DropColumnArgs,
    columns::{self, ColumnSelector},
    confirm::OverwritePolicy,
    error,
    io_utils::{self, FileOutput, Output},
    operation::ColumnOperation,
    rows::RowSource,
    writer::{self, WriteOutcome},
};

/// Removes one column from the header and every data row.
pub fn drop_column<R: Read>(
    mut source: RowSource<R>,
    output: &dyn Output,
    column: &ColumnSelector,
    policy: &mut OverwritePolicy,
) -> error::Result<WriteOutcome> {
    let header = source.read_header()?;
    let resolved = columns::resolve(&header, column)?;
    columns::check_within(resolved.index, header.len(), "Column index")?;

    info!("Dropping {resolved}");

    let mut operation = ColumnOperation::DropColumn {
        index: resolved.index,
    };
    writer::write_rows(output, policy, Some(header), source, &mut operation)
}

pub fn execute(args: &DropColumnArgs, policy: &mut OverwritePolicy) -> Result<WriteOutcome> {
    let column = ColumnSelector::from_parts(args.index, args.name.clone())?;
    let source = io_utils::open_source(&args.input)?;
    let output = FileOutput::new(&args.output);
    drop_column(source, &output, &column, policy)
        .with_context(|| format!("Dropping column from {:?}", args.input))
}
