//! Aggregation and chart building for candidate finance data
//!
//! Every call re-reads the candidate's files; nothing is cached between
//! requests. The only shared state is the folder list, fixed at startup.

pub mod aggregate;
pub mod charts;
pub mod error;
pub mod folders;
pub mod reports;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use campaignweb_config::Config;
use campaignweb_parser::{SourceKind, SourceReaderRef, SourceTable};

pub use aggregate::{aggregate, Aggregate, AggregateRow};
pub use charts::{select_top, Bar, BarChart, ChartBuilder, ChartLink, ChartSet};
pub use error::{CoreError, CoreResult, ErrorCode, ErrorDetails, ErrorSeverity};
pub use folders::{list_candidate_folders, CandidateFolder};
pub use reports::{
    build_table, table_route, CandidateReport, TableReport, TableRow, EXPENSE_TABLE_ROUTE,
    REVENUE_TABLE_ROUTE,
};

/// Candidate data service
pub struct Campaigns {
    config: Config,
    reader: SourceReaderRef,
    folders: Vec<CandidateFolder>,
    charts: ChartBuilder,
}

impl Campaigns {
    /// Create a service over a known folder list
    pub fn new(config: Config, reader: SourceReaderRef, folders: Vec<CandidateFolder>) -> Self {
        let charts = ChartBuilder::new(&config.charts);
        Self {
            config,
            reader,
            folders,
            charts,
        }
    }

    /// List the candidate folders under the configured base path
    pub fn discover(config: Config, reader: SourceReaderRef) -> CoreResult<Self> {
        let folders = list_candidate_folders(&config.data.path)?;
        log::info!(
            "Loaded {} candidate folders from {}",
            folders.len(),
            config.data.path.display()
        );
        Ok(Self::new(config, reader, folders))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn folders(&self) -> &[CandidateFolder] {
        &self.folders
    }

    /// Folder selected when the dashboard opens
    pub fn default_folder(&self) -> Option<&CandidateFolder> {
        self.folders.first()
    }

    /// Look up a folder by identity (dropdown value)
    pub fn find_folder(&self, id: &str) -> CoreResult<&CandidateFolder> {
        folders::find_folder(&self.folders, id).ok_or_else(|| CoreError::FolderNotFound {
            folder: id.to_string(),
        })
    }

    /// Look up a folder from a full-table URL segment
    pub fn resolve_encoded(&self, segment: &str) -> CoreResult<&CandidateFolder> {
        folders::resolve_encoded(&self.folders, segment).ok_or_else(|| CoreError::FolderNotFound {
            folder: segment.to_string(),
        })
    }

    /// Read one source of a folder from disk
    pub async fn source(&self, kind: SourceKind, folder: &CandidateFolder) -> CoreResult<SourceTable> {
        let data = &self.config.data;
        let table = match kind {
            SourceKind::Revenue => {
                self.reader
                    .read_revenue(&self.config.revenue_path(&folder.path), &data.revenue_sheet)
                    .await?
            }
            SourceKind::Expense => {
                self.reader
                    .read_expenses(&self.config.expense_path(&folder.path), data.delimiter_byte())
                    .await?
            }
        };
        log::debug!("Read {} {} rows for {}", table.len(), kind, folder.name);
        Ok(table)
    }

    /// Grouped sums of one source
    pub async fn aggregate(&self, kind: SourceKind, folder: &CandidateFolder) -> CoreResult<Aggregate> {
        Ok(aggregate(&self.source(kind, folder).await?))
    }

    /// Candidate photo as a `data:` URI
    pub async fn photo_data_uri(&self, folder: &CandidateFolder) -> CoreResult<String> {
        let path = self.config.photo_path(&folder.path);
        let bytes = tokio::fs::read(&path).await.map_err(|e| CoreError::io(&path, e))?;
        Ok(format!("data:image/jpeg;base64,{}", STANDARD.encode(bytes)))
    }

    /// Aggregates, photo and charts for the dashboard
    pub async fn report(&self, folder: &CandidateFolder) -> CoreResult<CandidateReport> {
        let revenue = self.aggregate(SourceKind::Revenue, folder).await?;
        let expense = self.aggregate(SourceKind::Expense, folder).await?;
        let photo = self.photo_data_uri(folder).await?;
        let charts = self.charts.build(folder, &revenue, &expense);

        Ok(CandidateReport {
            folder: folder.clone(),
            photo,
            revenue,
            expense,
            charts,
        })
    }

    /// Untruncated, masked listing of one source
    pub async fn full_table(&self, kind: SourceKind, folder: &CandidateFolder) -> CoreResult<TableReport> {
        let table = self.source(kind, folder).await?;
        Ok(build_table(folder, &table))
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use campaignweb_parser::{CellValue, FileSourceReader, ParseError, SourceReader, SourceRow};
    use std::path::{Path, PathBuf};
    use std::sync::Arc;

    fn fixtures() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../fixtures/dados")
    }

    fn campaigns() -> Campaigns {
        let mut config = Config::default();
        config.data.path = fixtures();
        Campaigns::discover(config, Arc::new(FileSourceReader)).unwrap()
    }

    #[test]
    fn test_discover_fixture_folders() {
        let campaigns = campaigns();
        let names: Vec<_> = campaigns.folders().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Ana Lima", "Bruno Souza", "Carlos Vazio"]);
        assert_eq!(campaigns.default_folder().map(|f| f.name.as_str()), Some("Ana Lima"));
    }

    #[test]
    fn test_find_folder() {
        let campaigns = campaigns();
        let id = campaigns.folders()[1].id();
        assert_eq!(campaigns.find_folder(&id).unwrap().name, "Bruno Souza");
        assert!(matches!(
            campaigns.find_folder("dados/Ninguém"),
            Err(CoreError::FolderNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_report_with_truncated_revenue() {
        let campaigns = campaigns();
        let folder = campaigns.folders()[0].clone();
        let report = campaigns.report(&folder).await.unwrap();

        assert_eq!(report.revenue.total, 171_750.5);
        assert_eq!(report.revenue.len(), 18);
        assert_eq!(report.revenue.get("Doador 01"), Some(1500.5));
        assert_eq!(report.revenue.get("Doador 05"), Some(5000.0));
        assert_eq!(report.revenue.skipped_count, 1);

        let chart = &report.charts.revenue;
        assert_eq!(chart.title, "Top 15 Receitas (172k)");
        assert_eq!(chart.bars.len(), 15);
        assert_eq!(chart.bars[0].label, "Doador 18");
        assert!(!chart.labels().contains(&"Doador 03"));
        let link = chart.show_all.as_ref().unwrap();
        assert_eq!(link.href, campaignweb_utils::folder_link(REVENUE_TABLE_ROUTE, &folder.id()));

        assert!(report.photo.starts_with("data:image/jpeg;base64,/9j/"));
    }

    #[tokio::test]
    async fn test_report_expense_rules() {
        let campaigns = campaigns();
        let folder = campaigns.folders()[0].clone();
        let report = campaigns.report(&folder).await.unwrap();

        // "n/a" and "1.234,56" are both dropped on the expense side
        assert_eq!(report.expense.total, 3120.0);
        assert_eq!(report.expense.get("Agência Voz"), Some(0.0));
        assert_eq!(report.expense.get("Gráfica Rápida"), Some(2000.0));
        assert_eq!(report.charts.expense.title, "Despesa Total (3k)");
        assert!(!report.charts.expense.is_truncated());

        let totals = &report.charts.totals;
        assert_eq!(totals.bars[0].value, report.revenue.total);
        assert_eq!(totals.bars[1].value, report.expense.total);
    }

    #[tokio::test]
    async fn test_report_with_truncated_expense() {
        let campaigns = campaigns();
        let folder = campaigns.folders()[1].clone();
        let report = campaigns.report(&folder).await.unwrap();

        assert_eq!(report.revenue.total, 14_000.0);
        assert_eq!(report.charts.revenue.title, "Receita Total (14k)");
        assert_eq!(report.charts.revenue.labels(), vec!["Carla Dias", "Eduardo Lins"]);

        assert_eq!(report.expense.total, 13_600.0);
        assert_eq!(report.charts.expense.title, "Top 15 Despesas (14k)");
        assert_eq!(report.charts.expense.bars.len(), 15);
        assert!(!report.charts.expense.labels().contains(&"Fornecedor A"));
        assert!(report.charts.expense.show_all.is_some());
    }

    #[tokio::test]
    async fn test_report_missing_files() {
        let campaigns = campaigns();
        let folder = campaigns.folders()[2].clone();
        let err = campaigns.report(&folder).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::FileNotFound);
    }

    #[tokio::test]
    async fn test_full_table() {
        let campaigns = campaigns();
        let folder = campaigns.folders()[0].clone();

        let table = campaigns.full_table(SourceKind::Revenue, &folder).await.unwrap();
        assert_eq!(table.heading, "Total de Receitas - Ana Lima");
        assert_eq!(table.rows.len(), 21);
        assert_eq!(table.rows[0].value, "R$ 1.000,00");

        let table = campaigns.full_table(SourceKind::Expense, &folder).await.unwrap();
        assert_eq!(table.rows.len(), 6);
        assert_eq!(table.rows[3].value, "n/a");
    }

    struct StaticReader;

    #[async_trait]
    impl SourceReader for StaticReader {
        async fn read_revenue(&self, _path: &Path, _sheet: &str) -> Result<SourceTable, ParseError> {
            Ok(SourceTable::new(
                SourceKind::Revenue,
                vec![SourceRow::new(Some("Maria"), CellValue::Number(10.0))],
            ))
        }

        async fn read_expenses(&self, path: &Path, _delimiter: u8) -> Result<SourceTable, ParseError> {
            Err(ParseError::CsvError {
                path: path.display().to_string(),
                message: "unterminated quote".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_custom_reader() {
        let folder = CandidateFolder::new("dados/Maria");
        let campaigns = Campaigns::new(Config::default(), Arc::new(StaticReader), vec![folder.clone()]);

        let revenue = campaigns.aggregate(SourceKind::Revenue, &folder).await.unwrap();
        assert_eq!(revenue.total, 10.0);

        let err = campaigns.aggregate(SourceKind::Expense, &folder).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidSource);
    }
}
