//! In-memory decoding of the two source formats
//!
//! Both readers locate the counterparty and value columns by header name, so
//! extra columns and column order do not matter.

use std::io::Cursor;

use calamine::{DataType, Reader, Xlsx};

use crate::error::ParseError;
use crate::types::{CellValue, SourceKind, SourceRow, SourceTable, VALUE_COLUMN};

// ==================== Revenue Workbook ====================

/// Decode the revenue worksheet of an `.xlsx` workbook
pub fn read_revenue_workbook(bytes: Vec<u8>, sheet: &str, path: &str) -> Result<SourceTable, ParseError> {
    let kind = SourceKind::Revenue;
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).map_err(|e| ParseError::WorkbookError {
        path: path.to_string(),
        message: e.to_string(),
    })?;

    let range = workbook
        .worksheet_range(sheet)
        .ok_or_else(|| ParseError::MissingSheet {
            path: path.to_string(),
            sheet: sheet.to_string(),
        })?
        .map_err(|e| ParseError::WorkbookError {
            path: path.to_string(),
            message: e.to_string(),
        })?;

    let mut rows = range.rows();
    let header = rows.next().ok_or_else(|| ParseError::MissingColumn {
        path: path.to_string(),
        column: kind.name_column().to_string(),
    })?;
    log::debug!("read_revenue_workbook: {} header: {:?}", path, header);

    let name_idx = header_index(header, kind.name_column(), path)?;
    let value_idx = header_index(header, VALUE_COLUMN, path)?;

    let records = rows
        .map(|row| SourceRow {
            counterparty: row.get(name_idx).and_then(cell_text),
            value: row.get(value_idx).map(cell_value).unwrap_or(CellValue::Empty),
        })
        .collect();

    Ok(SourceTable::new(kind, records))
}

fn header_index(header: &[DataType], column: &str, path: &str) -> Result<usize, ParseError> {
    header
        .iter()
        .position(|cell| matches!(cell, DataType::String(s) if s.trim() == column))
        .ok_or_else(|| ParseError::MissingColumn {
            path: path.to_string(),
            column: column.to_string(),
        })
}

fn cell_text(cell: &DataType) -> Option<String> {
    match cell {
        DataType::String(s) if s.trim().is_empty() => None,
        DataType::String(s) => Some(s.clone()),
        DataType::Float(f) => Some(f.to_string()),
        DataType::Int(i) => Some(i.to_string()),
        DataType::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn cell_value(cell: &DataType) -> CellValue {
    match cell {
        DataType::String(s) if s.trim().is_empty() => CellValue::Empty,
        DataType::String(s) => CellValue::Text(s.clone()),
        DataType::Float(f) => CellValue::Number(*f),
        DataType::Int(i) => CellValue::Number(*i as f64),
        DataType::Empty => CellValue::Empty,
        DataType::Bool(b) => CellValue::Text(b.to_string()),
        other => CellValue::Text(format!("{:?}", other)),
    }
}

// ==================== Expense CSV ====================

/// Decode the expense CSV
///
/// Fields are decoded lossily, so a file saved in a legacy encoding still
/// loads with replacement characters instead of failing.
pub fn read_expense_csv(bytes: &[u8], delimiter: u8, path: &str) -> Result<SourceTable, ParseError> {
    let kind = SourceKind::Expense;
    let csv_error = |e: csv::Error| ParseError::CsvError {
        path: path.to_string(),
        message: e.to_string(),
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(bytes);

    let header: Vec<String> = reader
        .byte_headers()
        .map_err(csv_error)?
        .iter()
        .map(|field| decode_field(field).trim_start_matches('\u{feff}').trim().to_string())
        .collect();
    log::debug!("read_expense_csv: {} header: {:?}", path, header);

    let position = |column: &str| {
        header.iter().position(|h| h == column).ok_or_else(|| ParseError::MissingColumn {
            path: path.to_string(),
            column: column.to_string(),
        })
    };
    let name_idx = position(kind.name_column())?;
    let value_idx = position(VALUE_COLUMN)?;

    let mut records = Vec::new();
    for record in reader.byte_records() {
        let record = record.map_err(csv_error)?;

        let counterparty = record
            .get(name_idx)
            .map(decode_field)
            .filter(|name| !name.trim().is_empty());
        let value = match record.get(value_idx).map(decode_field) {
            Some(text) if !text.trim().is_empty() => CellValue::Text(text),
            _ => CellValue::Empty,
        };

        records.push(SourceRow { counterparty, value });
    }

    Ok(SourceTable::new(kind, records))
}

fn decode_field(field: &[u8]) -> String {
    String::from_utf8_lossy(field).into_owned()
}

// ==================== Tests ====================
