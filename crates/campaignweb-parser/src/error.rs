//! Error types for campaignweb-parser

use thiserror::Error;
use std::io;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error reading {path}: {source}")]
    IoError {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Cannot read workbook {path}: {message}")]
    WorkbookError { path: String, message: String },

    #[error("Worksheet '{sheet}' not found in {path}")]
    MissingSheet { path: String, sheet: String },

    #[error("Column '{column}' not found in {path}")]
    MissingColumn { path: String, column: String },

    #[error("CSV error in {path}: {message}")]
    CsvError { path: String, message: String },
}

impl ParseError {
    /// True when the underlying file does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, ParseError::IoError { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }

    /// Path of the file that failed
    pub fn path(&self) -> &str {
        match self {
            ParseError::IoError { path, .. }
            | ParseError::WorkbookError { path, .. }
            | ParseError::MissingSheet { path, .. }
            | ParseError::MissingColumn { path, .. }
            | ParseError::CsvError { path, .. } => path,
        }
    }
}
