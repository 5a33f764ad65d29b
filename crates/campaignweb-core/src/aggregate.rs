//! Per-counterparty aggregation
//!
//! Rows are grouped by exact counterparty name (case sensitive, no
//! normalization). The grand total is summed over every row with a parsed
//! value, including rows without a counterparty, so it never depends on
//! grouping or on display truncation.

use std::collections::BTreeMap;

use campaignweb_parser::{coerce_value, SourceKind, SourceTable};
use serde::{Deserialize, Serialize};

/// Summed value for one counterparty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRow {
    pub name: String,
    pub value: f64,
}

impl AggregateRow {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self { name: name.into(), value }
    }
}

/// Grouped sums for one source, ordered by counterparty name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregate {
    pub kind: SourceKind,
    pub rows: Vec<AggregateRow>,
    /// Sum of every parsed value in the source
    pub total: f64,
    /// Rows whose value parsed
    pub parsed_count: usize,
    /// Rows whose value was missing or did not parse
    pub skipped_count: usize,
}

impl Aggregate {
    /// Number of distinct counterparties
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.rows.iter().find(|r| r.name == name).map(|r| r.value)
    }
}

/// Coerce, group and sum a source table
///
/// A counterparty whose values all failed to parse still gets a row, with a
/// sum of zero.
pub fn aggregate(table: &SourceTable) -> Aggregate {
    let mut groups: BTreeMap<&str, f64> = BTreeMap::new();
    let mut total = 0.0;
    let mut parsed_count = 0;
    let mut skipped_count = 0;

    for row in &table.rows {
        let value = coerce_value(table.kind, &row.value);
        match value {
            Some(v) => {
                total += v;
                parsed_count += 1;
            }
            None => skipped_count += 1,
        }

        if let Some(name) = row.counterparty.as_deref() {
            *groups.entry(name).or_insert(0.0) += value.unwrap_or(0.0);
        }
    }

    if skipped_count > 0 {
        log::debug!(
            "aggregate {}: {} rows without a usable value",
            table.kind,
            skipped_count
        );
    }

    Aggregate {
        kind: table.kind,
        rows: groups
            .into_iter()
            .map(|(name, value)| AggregateRow::new(name, value))
            .collect(),
        total,
        parsed_count,
        skipped_count,
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use campaignweb_parser::{CellValue, SourceRow};

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn test_aggregate_groups_and_sums() {
        let table = SourceTable::new(
            SourceKind::Revenue,
            vec![
                SourceRow::new(Some("Maria"), text("1.000,00")),
                SourceRow::new(Some("João"), text("250,50")),
                SourceRow::new(Some("Maria"), text("500")),
            ],
        );

        let agg = aggregate(&table);
        assert_eq!(agg.len(), 2);
        assert_eq!(agg.get("Maria"), Some(1500.0));
        assert_eq!(agg.get("João"), Some(250.5));
        assert_eq!(agg.total, 1750.5);
        assert_eq!(agg.parsed_count, 3);
    }

    #[test]
    fn test_aggregate_orders_by_name() {
        let table = SourceTable::new(
            SourceKind::Expense,
            vec![
                SourceRow::new(Some("Zeta"), text("1")),
                SourceRow::new(Some("Alfa"), text("2")),
                SourceRow::new(Some("Meio"), text("3")),
            ],
        );

        let names: Vec<_> = aggregate(&table).rows.into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Alfa", "Meio", "Zeta"]);
    }

    #[test]
    fn test_aggregate_is_case_sensitive() {
        let table = SourceTable::new(
            SourceKind::Expense,
            vec![
                SourceRow::new(Some("Gráfica"), text("10")),
                SourceRow::new(Some("GRÁFICA"), text("20")),
            ],
        );
        assert_eq!(aggregate(&table).len(), 2);
    }

    #[test]
    fn test_total_includes_unnamed_rows_and_skips_invalid() {
        let table = SourceTable::new(
            SourceKind::Revenue,
            vec![
                SourceRow::new(Some("Maria"), text("100,00")),
                SourceRow::new(None, text("50,00")),
                SourceRow::new(Some("Maria"), text("abc")),
                SourceRow::new(Some("Pedro"), CellValue::Empty),
            ],
        );

        let agg = aggregate(&table);
        assert_eq!(agg.total, 150.0);
        assert_eq!(agg.parsed_count, 2);
        assert_eq!(agg.skipped_count, 2);
        assert_eq!(agg.get("Maria"), Some(100.0));
        assert_eq!(agg.get("Pedro"), Some(0.0));
        let grouped: f64 = agg.rows.iter().map(|r| r.value).sum();
        assert!(grouped < agg.total);
    }

    #[test]
    fn test_expense_rule_drops_thousands_separated_values() {
        let table = SourceTable::new(
            SourceKind::Expense,
            vec![
                SourceRow::new(Some("Agência"), text("1.234,56")),
                SourceRow::new(Some("Agência"), text("10,00")),
            ],
        );

        let agg = aggregate(&table);
        assert_eq!(agg.total, 10.0);
        assert_eq!(agg.get("Agência"), Some(10.0));
    }

    #[test]
    fn test_aggregate_empty_table() {
        let agg = aggregate(&SourceTable::new(SourceKind::Revenue, vec![]));
        assert!(agg.is_empty());
        assert_eq!(agg.total, 0.0);
    }
}
