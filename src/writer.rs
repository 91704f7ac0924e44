//! The streaming writer every operation funnels through.
//!
//! Rows are pulled from a source one at a time, passed through a
//! [`Generator`], and written to the sink before the next row is read.

use log::{info, warn};

use crate::{
    confirm::OverwritePolicy,
    error::Result,
    io_utils::Output,
    operation::Generator,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteReport {
    /// Header (when one was supplied) plus every data row consumed.
    pub rows_written: usize,
    /// Width of the first row emitted.
    pub columns: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Written(WriteReport),
    /// The output already existed and overwriting it was declined.
    Skipped { target: String },
}

impl WriteOutcome {
    pub fn report(&self) -> Option<WriteReport> {
        match self {
            WriteOutcome::Written(report) => Some(*report),
            WriteOutcome::Skipped { .. } => None,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, WriteOutcome::Skipped { .. })
    }
}

/// Streams `rows` (preceded by `header`, if any) through `generator` into
/// `output`.
///
/// The header is passed to the generator as row number 0; every following row
/// gets the count of rows written so far as its number. Nothing is created
/// when `output` exists and `policy` declines to overwrite it.
pub fn write_rows<T, I, G>(
    output: &dyn Output,
    policy: &mut OverwritePolicy,
    header: Option<T>,
    rows: I,
    generator: &mut G,
) -> Result<WriteOutcome>
where
    I: IntoIterator<Item = Result<T>>,
    G: Generator<T> + ?Sized,
{
    let target = output.describe();
    if output.exists() && !policy.allows_overwrite(&target) {
        warn!("Not overwriting existing {target}");
        return Ok(WriteOutcome::Skipped { target });
    }

    let mut sink = output.open()?;
    let mut rows_written = 0usize;
    let mut columns: Option<usize> = None;

    if let Some(header) = header {
        let row = generator.apply(rows_written, header)?;
        columns = Some(row.len());
        sink.write_row(&row)?;
        rows_written += 1;
    }

    for item in rows {
        let row = generator.apply(rows_written, item?)?;
        if columns.is_none() {
            columns = Some(row.len());
        }
        sink.write_row(&row)?;
        rows_written += 1;
    }
    sink.finish()?;

    let columns = columns.unwrap_or(0);
    info!("Wrote {rows_written} rows and {columns} columns to {target}");
    Ok(WriteOutcome::Written(WriteReport {
        rows_written,
        columns,
    }))
}
