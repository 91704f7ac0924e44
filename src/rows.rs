//! Lazy, forward-only row sources and lock-step pairing of two sources.

use std::io::Read;

use csv::StringRecord;
use itertools::{Either, EitherOrBoth, Itertools};
use log::debug;

use crate::{
    data::{Cell, Row},
    error::{OpError, Result},
};

/// A table read one record at a time. The header is just the first record;
/// whether a table has one is the caller's decision.
pub struct RowSource<R: Read> {
    reader: csv::Reader<R>,
    record: StringRecord,
    name: String,
    consumed: usize,
}

impl<R: Read> RowSource<R> {
    pub fn new(reader: R, name: impl Into<String>) -> Self {
        let reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);
        Self {
            reader,
            record: StringRecord::new(),
            name: name.into(),
            consumed: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Reads the first record as the header. Fails if the table is empty.
    pub fn read_header(&mut self) -> Result<Row> {
        let header = self
            .next_row()?
            .ok_or_else(|| OpError::EmptyTable {
                source_name: self.name.clone(),
            })?;
        debug!(
            "Header of {} has {} column(s): {:?}",
            self.name,
            header.len(),
            header
        );
        Ok(header)
    }

    fn next_row(&mut self) -> Result<Option<Row>> {
        let more = self.reader.read_record(&mut self.record).map_err(|err| {
            OpError::csv(
                format!("Reading record {} of {}", self.consumed + 1, self.name),
                err,
            )
        })?;
        if !more {
            return Ok(None);
        }
        self.consumed += 1;
        Ok(Some(
            self.record
                .iter()
                .map(|field| Cell::Text(field.to_string()))
                .collect(),
        ))
    }
}

impl<R: Read> Iterator for RowSource<R> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_row().transpose()
    }
}

/// A row of the left table, the right table, or both.
pub type RowPair = EitherOrBoth<Row, Row>;

/// Drives two sources in lock-step.
///
/// With `stop_shorter` the pairing ends as soon as either side runs out.
/// Otherwise it continues until both are exhausted and the exhausted side is
/// simply absent from the pair.
pub fn pair_rows<L, R>(
    left: L,
    right: R,
    stop_shorter: bool,
) -> impl Iterator<Item = Result<RowPair>>
where
    L: Iterator<Item = Result<Row>>,
    R: Iterator<Item = Result<Row>>,
{
    if stop_shorter {
        Either::Left(
            left.zip(right)
                .map(|(l, r)| -> Result<RowPair> { Ok(EitherOrBoth::Both(l?, r?)) }),
        )
    } else {
        Either::Right(left.zip_longest(right).map(|pair| -> Result<RowPair> {
            Ok(match pair {
                EitherOrBoth::Both(l, r) => EitherOrBoth::Both(l?, r?),
                EitherOrBoth::Left(l) => EitherOrBoth::Left(l?),
                EitherOrBoth::Right(r) => EitherOrBoth::Right(r?),
            })
        }))
    }
}
