//! Delimited point-file loader.
//!
//! ## Purpose
//!
//! This module reads an ordered list of `(x, y)` pairs from a headerless
//! delimited file, one point per row.
//!
//! ## Design notes
//!
//! * Fields are trimmed; blank lines are skipped by the reader.
//! * Every row must have exactly two finite numeric fields; anything else is
//!   reported as `MalformedInputFile` with its 1-based line number.
//! * The segment-count requirement is checked later by the splitter.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use log::info;

use crate::primitives::errors::SegfitError;
use crate::primitives::segment::Point;

/// Reader for two-column point files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointLoader {
    delimiter: u8,
}

impl Default for PointLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl PointLoader {
    /// Comma-delimited loader.
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    /// Set the field delimiter.
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Load every point of the file at `path`.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Point<f64>>, SegfitError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| SegfitError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let points = self.read(file)?;
        info!("loaded {} points from {}", points.len(), path.display());
        Ok(points)
    }

    /// Parse points from any reader.
    pub fn read<R: Read>(&self, reader: R) -> Result<Vec<Point<f64>>, SegfitError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .delimiter(self.delimiter)
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        let mut points = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| SegfitError::MalformedInputFile {
                line: e.position().map_or(0, |p| p.line()),
                reason: e.to_string(),
            })?;
            points.push(parse_record(&record)?);
        }
        Ok(points)
    }
}

fn parse_record(record: &StringRecord) -> Result<Point<f64>, SegfitError> {
    let line = record.position().map_or(0, |p| p.line());

    if record.len() != 2 {
        return Err(SegfitError::MalformedInputFile {
            line,
            reason: format!("expected 2 columns, found {}", record.len()),
        });
    }

    let field = |column: usize| -> Result<f64, SegfitError> {
        let raw = &record[column];
        let value: f64 = raw.parse().map_err(|_| SegfitError::MalformedInputFile {
            line,
            reason: format!("non-numeric value '{raw}' in column {}", column + 1),
        })?;
        if !value.is_finite() {
            return Err(SegfitError::MalformedInputFile {
                line,
                reason: format!("non-finite value '{raw}' in column {}", column + 1),
            });
        }
        Ok(value)
    };

    Ok(Point::new(field(0)?, field(1)?))
}
