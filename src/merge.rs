//! Positional merge of two tables.
//!
//! Row `n` of the output is row `n` of the left table followed by row `n` of
//! the right table. Headers are not treated specially: they are simply the
//! first pair.

use std::io::Read;

use anyhow::{Context, Result};
use log::{debug, info};

use crate::{
    cli::MergeArgs,
    confirm::OverwritePolicy,
    error,
    io_utils::{self, FileOutput, Output},
    operation::MergeRows,
    rows::{self, RowPair, RowSource},
    writer::{self, WriteOutcome},
};

/// With `stop_shorter` the output has as many rows as the shorter table;
/// otherwise as many as the longer one, and rows past the end of the shorter
/// table carry only the longer table's cells.
pub fn merge<L: Read, R: Read>(
    left: RowSource<L>,
    right: RowSource<R>,
    output: &dyn Output,
    stop_shorter: bool,
    policy: &mut OverwritePolicy,
) -> error::Result<WriteOutcome> {
    info!("Merging {} with {}", left.name(), right.name());
    if stop_shorter {
        debug!("Stopping at the end of the shorter table");
    }
    let pairs = rows::pair_rows(left, right, stop_shorter);
    writer::write_rows(output, policy, None::<RowPair>, pairs, &mut MergeRows)
}

pub fn execute(args: &MergeArgs, policy: &mut OverwritePolicy) -> Result<WriteOutcome> {
    let left = io_utils::open_source(&args.left)?;
    let right = io_utils::open_source(&args.right)?;
    let output = FileOutput::new(&args.output);
    merge(left, right, &output, args.stop_shorter, policy)
        .with_context(|| format!("Merging {:?} with {:?}", args.left, args.right))
}
