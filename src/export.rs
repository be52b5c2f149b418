//! Export Bundle Module
//! Packs the full practice table as CSV together with the static notes file
//! into an in-memory zip archive, named for the current date.

use chrono::NaiveDate;
use polars::prelude::*;
use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;
use thiserror::Error;
use ::zip::write::FileOptions;
use ::zip::ZipWriter;

/// CSV entry name inside the archive.
pub const CSV_ENTRY: &str = "calculations.csv";
/// Notes entry name inside the archive.
pub const NOTES_ENTRY: &str = "calculations.txt";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV serialization failed: {0}")]
    Csv(#[from] PolarsError),
    #[error("Zip write failed: {0}")]
    Zip(#[from] ::zip::result::ZipError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Archive filename for the given date: `nhsstreamlit_YYYY-MM-DD.zip`.
pub fn archive_name(date: NaiveDate) -> String {
    format!("nhsstreamlit_{}.zip", date.format("%Y-%m-%d"))
}

/// Serialize the full table to CSV bytes, header included.
pub fn table_csv(df: &DataFrame) -> Result<Vec<u8>, ExportError> {
    let mut buffer = Vec::new();
    CsvWriter::new(&mut buffer)
        .include_header(true)
        .finish(&mut df.clone())?;
    Ok(buffer)
}

/// Build the in-memory export archive: the full (unfiltered) table as
/// `calculations.csv` plus the verbatim notes file as `calculations.txt`.
pub fn build_archive(df: &DataFrame, notes_path: &Path) -> Result<Vec<u8>, ExportError> {
    let csv_bytes = table_csv(df)?;
    let notes = fs::read(notes_path)?;

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default();
    for (entry, bytes) in [(CSV_ENTRY, &csv_bytes), (NOTES_ENTRY, &notes)] {
        zip.start_file(entry, options)?;
        zip.write_all(bytes)?;
    }
    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}
