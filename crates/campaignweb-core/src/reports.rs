//! Report structures for pages and API responses

use campaignweb_parser::{CellValue, SourceKind, SourceTable, VALUE_COLUMN};
use campaignweb_utils::{apply_mask, mask_number};
use serde::{Deserialize, Serialize};

use crate::aggregate::Aggregate;
use crate::charts::ChartSet;
use crate::folders::CandidateFolder;

/// Route of the full revenue table
pub const REVENUE_TABLE_ROUTE: &str = "/mostrar_todos_receitas";
/// Route of the full expense table
pub const EXPENSE_TABLE_ROUTE: &str = "/mostrar_todos_despesas";

pub fn table_route(kind: SourceKind) -> &'static str {
    match kind {
        SourceKind::Revenue => REVENUE_TABLE_ROUTE,
        SourceKind::Expense => EXPENSE_TABLE_ROUTE,
    }
}

/// Everything the dashboard shows for one candidate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateReport {
    pub folder: CandidateFolder,
    /// `data:` URI of the candidate photo
    pub photo: String,
    pub revenue: Aggregate,
    pub expense: Aggregate,
    pub charts: ChartSet,
}

/// One line of a full table, value already masked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub name: String,
    pub value: String,
}

/// Untruncated source listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableReport {
    pub kind: SourceKind,
    /// Page heading, e.g. `Total de Receitas - Ana Lima`
    pub heading: String,
    pub columns: [String; 2],
    pub rows: Vec<TableRow>,
}

fn mask_cell(cell: &CellValue) -> String {
    match cell {
        CellValue::Text(text) => apply_mask(text),
        CellValue::Number(n) => mask_number(*n),
        CellValue::Empty => String::new(),
    }
}

/// List every row of a source with the currency mask applied
///
/// Rows stay in file order and are neither grouped nor filtered.
pub fn build_table(folder: &CandidateFolder, table: &SourceTable) -> TableReport {
    let heading = match table.kind {
        SourceKind::Revenue => format!("Total de Receitas - {}", folder.name),
        SourceKind::Expense => format!("Total de Despesas - {}", folder.name),
    };

    TableReport {
        kind: table.kind,
        heading,
        columns: [table.kind.name_column().to_string(), VALUE_COLUMN.to_string()],
        rows: table
            .rows
            .iter()
            .map(|row| TableRow {
                name: row.counterparty.clone().unwrap_or_default(),
                value: mask_cell(&row.value),
            })
            .collect(),
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use campaignweb_parser::SourceRow;

    #[test]
    fn test_table_route() {
        assert_eq!(table_route(SourceKind::Revenue), "/mostrar_todos_receitas");
        assert_eq!(table_route(SourceKind::Expense), "/mostrar_todos_despesas");
    }

    #[test]
    fn test_build_table_masks_values() {
        let folder = CandidateFolder::new("dados/Ana Lima");
        let table = SourceTable::new(
            SourceKind::Revenue,
            vec![
                SourceRow::new(Some("Maria"), CellValue::Text("1234,56".to_string())),
                SourceRow::new(Some("João"), CellValue::Number(2500.0)),
                SourceRow::new(Some("Pedro"), CellValue::Text("abc".to_string())),
                SourceRow::new(None, CellValue::Empty),
            ],
        );

        let report = build_table(&folder, &table);
        assert_eq!(report.heading, "Total de Receitas - Ana Lima");
        assert_eq!(report.columns, ["Nome do Doador".to_string(), "Valor".to_string()]);
        assert_eq!(
            report.rows,
            vec![
                TableRow { name: "Maria".to_string(), value: "R$ 1.234,56".to_string() },
                TableRow { name: "João".to_string(), value: "R$ 2.500,00".to_string() },
                TableRow { name: "Pedro".to_string(), value: "abc".to_string() },
                TableRow { name: String::new(), value: String::new() },
            ]
        );
    }

    #[test]
    fn test_build_table_keeps_duplicates() {
        let folder = CandidateFolder::new("dados/Bruno");
        let table = SourceTable::new(
            SourceKind::Expense,
            vec![
                SourceRow::new(Some("Posto"), CellValue::Text("10,00".to_string())),
                SourceRow::new(Some("Posto"), CellValue::Text("1.234,56".to_string())),
            ],
        );

        let report = build_table(&folder, &table);
        assert_eq!(report.heading, "Total de Despesas - Bruno");
        assert_eq!(report.columns[0], "Nome do Fornecedor");
        assert_eq!(report.rows.len(), 2);
        // The mask strips thousands dots even though the expense sum does not
        assert_eq!(report.rows[1].value, "R$ 1.234,56");
    }
}
