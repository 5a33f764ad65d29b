//! Bar chart models for the dashboard
//!
//! The server builds complete chart models (bars, labels, tooltips, titles)
//! and the page only draws them.

use campaignweb_config::ChartConfig;
use campaignweb_parser::SourceKind;
use campaignweb_utils::{folder_link, format_grouped, format_value};
use serde::{Deserialize, Serialize};

use crate::aggregate::{Aggregate, AggregateRow};
use crate::folders::CandidateFolder;
use crate::reports::table_route;

/// Text of the link to the untruncated table
pub const SHOW_ALL_LABEL: &str = "Mostrar Todos";

/// First color of the default bar palette; revenue category bars use it
pub const DEFAULT_BAR_COLOR: &str = "#636efa";

/// Display strings for one source kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryLabels {
    /// Chart id and bar name, e.g. `Receitas`
    pub plural: &'static str,
    /// Title when every counterparty is shown
    pub total_title: &'static str,
    /// Tooltip label for the counterparty
    pub counterparty: &'static str,
}

pub fn category_labels(kind: SourceKind) -> CategoryLabels {
    match kind {
        SourceKind::Revenue => CategoryLabels {
            plural: "Receitas",
            total_title: "Receita Total",
            counterparty: "Doador",
        },
        SourceKind::Expense => CategoryLabels {
            plural: "Despesas",
            total_title: "Despesa Total",
            counterparty: "Fornecedor",
        },
    }
}

/// Link shown next to a chart title
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartLink {
    pub label: String,
    pub href: String,
}

/// One bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    /// Abbreviated value drawn on the bar
    pub text: String,
    /// Tooltip lines
    pub hover: Vec<String>,
    pub color: String,
}

/// A titled bar chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarChart {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_all: Option<ChartLink>,
    pub bars: Vec<Bar>,
}

impl BarChart {
    pub fn is_truncated(&self) -> bool {
        self.show_all.is_some()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.bars.iter().map(|b| b.label.as_str()).collect()
    }
}

/// The three charts of a candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSet {
    pub revenue: BarChart,
    pub expense: BarChart,
    pub totals: BarChart,
}

/// Pick the rows to draw
///
/// With more than `limit` rows the `limit` largest are kept, largest first;
/// equal values keep their incoming (name) order. Otherwise every row is
/// kept as is. The flag tells whether anything was cut.
pub fn select_top(rows: &[AggregateRow], limit: usize) -> (Vec<AggregateRow>, bool) {
    if rows.len() <= limit {
        return (rows.to_vec(), false);
    }

    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| b.value.total_cmp(&a.value));
    sorted.truncate(limit);
    (sorted, true)
}

/// Builds chart models from aggregates
#[derive(Debug, Clone)]
pub struct ChartBuilder {
    top_items: usize,
    revenue_color: String,
    expense_color: String,
}

impl Default for ChartBuilder {
    fn default() -> Self {
        Self::new(&ChartConfig::default())
    }
}

impl ChartBuilder {
    pub fn new(config: &ChartConfig) -> Self {
        Self {
            top_items: config.top_items_count.max(1),
            revenue_color: config.revenue_color.clone(),
            expense_color: config.expense_color.clone(),
        }
    }

    /// Color of a source in the totals chart
    fn color(&self, kind: SourceKind) -> &str {
        match kind {
            SourceKind::Revenue => &self.revenue_color,
            SourceKind::Expense => &self.expense_color,
        }
    }

    /// Color of the per-counterparty bars
    fn category_color(&self, kind: SourceKind) -> &str {
        match kind {
            SourceKind::Revenue => DEFAULT_BAR_COLOR,
            SourceKind::Expense => &self.expense_color,
        }
    }

    /// Revenue or expense chart, truncated to the top items when needed
    pub fn category_chart(&self, aggregate: &Aggregate, folder: &CandidateFolder) -> BarChart {
        let labels = category_labels(aggregate.kind);
        let total = format_value(aggregate.total);
        let (rows, truncated) = select_top(&aggregate.rows, self.top_items);

        let (title, show_all) = if truncated {
            (
                format!("Top {} {} ({})", self.top_items, labels.plural, total),
                Some(ChartLink {
                    label: SHOW_ALL_LABEL.to_string(),
                    href: folder_link(table_route(aggregate.kind), &folder.id()),
                }),
            )
        } else {
            (format!("{} ({})", labels.total_title, total), None)
        };

        let color = self.category_color(aggregate.kind);
        let bars = rows
            .into_iter()
            .map(|row| Bar {
                text: format_value(row.value),
                hover: vec![
                    format!("{}: {}", labels.counterparty, row.name),
                    format!("Valor: {}", format_grouped(row.value, 0, '.', ',')),
                ],
                color: color.to_string(),
                label: row.name,
                value: row.value,
            })
            .collect();

        BarChart {
            id: labels.plural.to_string(),
            title,
            show_all,
            bars,
        }
    }

    /// Side-by-side grand totals, never truncated
    pub fn totals_chart(&self, revenue: &Aggregate, expense: &Aggregate) -> BarChart {
        let bars = [revenue, expense]
            .into_iter()
            .map(|agg| {
                let labels = category_labels(agg.kind);
                Bar {
                    label: labels.plural.to_string(),
                    value: agg.total,
                    text: format_value(agg.total),
                    hover: vec![format!("Valor: {}", format_grouped(agg.total, 0, '.', ','))],
                    color: self.color(agg.kind).to_string(),
                }
            })
            .collect();

        BarChart {
            id: "Totais".to_string(),
            title: "Totais".to_string(),
            show_all: None,
            bars,
        }
    }

    pub fn build(&self, folder: &CandidateFolder, revenue: &Aggregate, expense: &Aggregate) -> ChartSet {
        ChartSet {
            revenue: self.category_chart(revenue, folder),
            expense: self.category_chart(expense, folder),
            totals: self.totals_chart(revenue, expense),
        }
    }
}

// ==================== Tests ====================
