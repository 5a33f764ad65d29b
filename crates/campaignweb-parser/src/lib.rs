//! Readers for candidate revenue and expense sources
//!
//! A candidate folder holds a revenue workbook and an expense CSV. This crate
//! turns them into [`SourceTable`]s of raw cells and owns the value coercion
//! rules applied to those cells.

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

pub mod error;
pub mod parser;
pub mod sources;
pub mod types;

pub use error::ParseError;
pub use parser::{coerce_value, parse_expense_value, parse_revenue_value};
pub use sources::{read_expense_csv, read_revenue_workbook};
pub use types::{
    CellValue, SourceKind, SourceRow, SourceTable, DONOR_COLUMN, SUPPLIER_COLUMN, VALUE_COLUMN,
};

// ==================== Reader Trait ====================

/// Reader reference type
pub type SourceReaderRef = Arc<dyn SourceReader>;

/// Trait for loading candidate sources from storage
#[async_trait]
pub trait SourceReader: Send + Sync {
    /// Read the revenue rows from a workbook sheet
    async fn read_revenue(&self, path: &Path, sheet: &str) -> Result<SourceTable, ParseError>;

    /// Read the expense rows from a delimited file
    async fn read_expenses(&self, path: &Path, delimiter: u8) -> Result<SourceTable, ParseError>;
}

/// Default reader backed by the local filesystem
#[derive(Debug, Default)]
pub struct FileSourceReader;

async fn read_bytes(path: &Path) -> Result<Vec<u8>, ParseError> {
    tokio::fs::read(path).await.map_err(|source| ParseError::IoError {
        path: path.display().to_string(),
        source,
    })
}

#[async_trait]
impl SourceReader for FileSourceReader {
    async fn read_revenue(&self, path: &Path, sheet: &str) -> Result<SourceTable, ParseError> {
        let bytes = read_bytes(path).await?;
        read_revenue_workbook(bytes, sheet, &path.display().to_string())
    }

    async fn read_expenses(&self, path: &Path, delimiter: u8) -> Result<SourceTable, ParseError> {
        let bytes = read_bytes(path).await?;
        read_expense_csv(&bytes, delimiter, &path.display().to_string())
    }
}

// ==================== Tests ====================
