use std::io::Read;

use anyhow::{Context, Result};
use log::info;

use crate::{
    cli::RenameArgs,
    columns::{self, ColumnSelector},
    confirm::OverwritePolicy,
    error,
    io_utils::{self, FileOutput, Output},
    operation::ColumnOperation,
    rows::RowSource,
    writer::{self, WriteOutcome},
};

/// Replaces one header cell. Data rows pass through untouched.
pub fn rename_column<R: Read>(
    mut source: RowSource<R>,
    output: &dyn Output,
    new_name: &str,
    column: &ColumnSelector,
    policy: &mut OverwritePolicy,
) -> error::Result<WriteOutcome> {
    let header = source.read_header()?;
    let resolved = columns::resolve(&header, column)?;
    columns::check_within(resolved.index, header.len(), "Column index")?;

    info!("Renaming {resolved} to \"{new_name}\"");

    let mut operation = ColumnOperation::RenameColumn {
        index: resolved.index,
        new_name: new_name.to_string(),
    };
    writer::write_rows(output, policy, Some(header), source, &mut operation)
}

pub fn execute(args: &RenameArgs, policy: &mut OverwritePolicy) -> Result<WriteOutcome> {
    let column = ColumnSelector::from_parts(args.index, args.name.clone())?;
    let source = io_utils::open_source(&args.input)?;
    let output = FileOutput::new(&args.output);
    rename_column(source, &output, &args.to, &column, policy)
        .with_context(|| format!("Renaming column in {:?}", args.input))
}
