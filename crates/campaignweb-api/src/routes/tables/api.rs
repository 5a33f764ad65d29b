//! Full-table handlers

use axum::extract::{Path, State};
use axum::response::Html;
use campaignweb_parser::SourceKind;

use crate::{ApiError, AppState};

async fn table_page(state: &AppState, kind: SourceKind, segment: &str) -> Result<Html<String>, ApiError> {
    let folder = state.campaigns.resolve_encoded(segment)?;
    let report = state.campaigns.full_table(kind, folder).await?;
    log::debug!("Rendering {} {} rows for {}", report.rows.len(), kind, folder.name);
    Ok(Html(super::page::render_table_page(&report)))
}

/// Every revenue row of a folder
pub async fn page_all_revenue(
    State(state): State<AppState>,
    Path(folder): Path<String>,
) -> Result<Html<String>, ApiError> {
    table_page(&state, SourceKind::Revenue, &folder).await
}

/// Every expense row of a folder
pub async fn page_all_expenses(
    State(state): State<AppState>,
    Path(folder): Path<String>,
) -> Result<Html<String>, ApiError> {
    table_page(&state, SourceKind::Expense, &folder).await
}
