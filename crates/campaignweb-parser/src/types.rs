//! Source record types

use serde::{Deserialize, Serialize};

/// Column holding the monetary value in both sources
pub const VALUE_COLUMN: &str = "Valor";
/// Counterparty column of the revenue workbook
pub const DONOR_COLUMN: &str = "Nome do Doador";
/// Counterparty column of the expense CSV
pub const SUPPLIER_COLUMN: &str = "Nome do Fornecedor";

/// Which of the two candidate sources a table came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Donations (`receitas.xlsx`)
    Revenue,
    /// Supplier payments (`despesas.csv`)
    Expense,
}

impl SourceKind {
    /// Name of the counterparty column for this source
    pub fn name_column(&self) -> &'static str {
        match self {
            SourceKind::Revenue => DONOR_COLUMN,
            SourceKind::Expense => SUPPLIER_COLUMN,
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::Revenue => write!(f, "revenue"),
            SourceKind::Expense => write!(f, "expense"),
        }
    }
}

/// A value cell as it was read, before any numeric coercion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Text cell, usually a locale-formatted number
    Text(String),
    /// Numeric cell (workbooks only)
    Number(f64),
    /// Blank cell or empty CSV field
    Empty,
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Empty => Ok(()),
        }
    }
}

/// One row of a source: counterparty and raw value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRow {
    /// Counterparty name; `None` when the cell is blank
    pub counterparty: Option<String>,
    pub value: CellValue,
}

impl SourceRow {
    pub fn new(counterparty: Option<&str>, value: CellValue) -> Self {
        Self {
            counterparty: counterparty.map(str::to_string),
            value,
        }
    }
}

/// All rows read from one source file, in file order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceTable {
    pub kind: SourceKind,
    pub rows: Vec<SourceRow>,
}

impl SourceTable {
    pub fn new(kind: SourceKind, rows: Vec<SourceRow>) -> Self {
        Self { kind, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
