//! Opening row sources and output sinks.
//!
//! All file I/O in csvop flows through this module:
//!
//! - **Sources**: [`open_source`] wraps a file (or stdin for `-`) in a
//!   [`RowSource`].
//! - **Outputs**: the [`Output`] trait is what the streaming writer consults
//!   before it creates anything; [`FileOutput`] is the file/stdout
//!   implementation.
//! - **Sinks**: [`CsvSink`] writes rows as comma-delimited records. The
//!   underlying `csv::Writer` flushes when dropped, so a sink abandoned on an
//!   error path still pushes out what it buffered.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::{Path, PathBuf},
};

use crate::{
    data::Cell,
    error::{OpError, Result},
    rows::RowSource,
};

pub fn is_dash(path: &Path) -> bool {
    path == Path::new("-")
}

pub fn open_source(path: &Path) -> Result<RowSource<Box<dyn Read>>> {
    let reader: Box<dyn Read> = if is_dash(path) {
        Box::new(std::io::stdin())
    } else {
        Box::new(BufReader::new(File::open(path).map_err(|err| {
            OpError::io(format!("Opening input file {path:?}"), err)
        })?))
    };
    let name = if is_dash(path) {
        "stdin".to_string()
    } else {
        path.display().to_string()
    };
    Ok(RowSource::new(reader, name))
}

/// Receives rows from the streaming writer.
pub trait RowSink {
    fn write_row(&mut self, row: &[Cell]) -> Result<()>;

    /// Flushes buffered rows. Called once after the last row.
    fn finish(&mut self) -> Result<()>;
}

/// A destination the streaming writer can check for existing data and open.
pub trait Output {
    fn exists(&self) -> bool;

    fn describe(&self) -> String;

    fn open(&self) -> Result<Box<dyn RowSink>>;
}

pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
    target: String,
}

impl<W: Write> CsvSink<W> {
    pub fn new(inner: W, target: impl Into<String>) -> Self {
        let writer = csv::WriterBuilder::new()
            .flexible(true)
            .double_quote(true)
            .from_writer(inner);
        Self {
            writer,
            target: target.into(),
        }
    }

    pub fn into_inner(self) -> Result<W> {
        let target = self.target;
        self.writer.into_inner().map_err(|err| {
            OpError::io(format!("Flushing output {target}"), err.into_error())
        })
    }
}

impl<W: Write> RowSink for CsvSink<W> {
    fn write_row(&mut self, row: &[Cell]) -> Result<()> {
        for cell in row {
            self.writer
                .write_field(cell.render().as_bytes())
                .map_err(|err| OpError::csv(format!("Writing to {}", self.target), err))?;
        }
        self.writer
            .write_record(None::<&[u8]>)
            .map_err(|err| OpError::csv(format!("Writing to {}", self.target), err))
    }

    fn finish(&mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|err| OpError::io(format!("Flushing output {}", self.target), err))
    }
}

/// A file path, or stdout when the path is `-`.
#[derive(Debug, Clone)]
pub struct FileOutput {
    path: PathBuf,
}

impl FileOutput {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Output for FileOutput {
    fn exists(&self) -> bool {
        !is_dash(&self.path) && self.path.is_file()
    }

    fn describe(&self) -> String {
        if is_dash(&self.path) {
            "stdout".to_string()
        } else {
            self.path.display().to_string()
        }
    }

    fn open(&self) -> Result<Box<dyn RowSink>> {
        let target = self.describe();
        let base: Box<dyn Write> = if is_dash(&self.path) {
            Box::new(std::io::stdout())
        } else {
            Box::new(BufWriter::new(File::create(&self.path).map_err(|err| {
                OpError::io(format!("Creating output file {:?}", self.path), err)
            })?))
        };
        Ok(Box::new(CsvSink::new(base, target)))
    }
}
