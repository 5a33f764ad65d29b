//! Dashboard handlers - full page, HTMX panel and chart JSON

use axum::extract::{Query, State};
use axum::response::Html;
use axum::Json;
use campaignweb_core::{Campaigns, CandidateFolder, ChartSet};
use serde::Deserialize;

use crate::{ApiError, AppState};

/// Folder selection carried by the dropdown
#[derive(Debug, Default, Deserialize)]
pub struct PanelQuery {
    /// Folder identity; empty means nothing selected
    pub pasta: Option<String>,
}

impl PanelQuery {
    fn selected(&self) -> Option<&str> {
        self.pasta.as_deref().filter(|p| !p.is_empty())
    }
}

/// Render the panel for the selection, or the placeholder when there is none
async fn panel_html(campaigns: &Campaigns, selected: Option<&CandidateFolder>) -> Result<String, ApiError> {
    match selected {
        Some(folder) => {
            let report = campaigns.report(folder).await?;
            Ok(super::page::render_panel(&report))
        }
        None => Ok(super::page::render_placeholder()),
    }
}

/// Dashboard page; opens on the first folder unless `pasta` says otherwise
pub async fn page_index(
    State(state): State<AppState>,
    Query(query): Query<PanelQuery>,
) -> Result<Html<String>, ApiError> {
    let campaigns = &state.campaigns;
    let selected = match query.pasta.as_deref() {
        None => campaigns.default_folder(),
        Some(_) => match query.selected() {
            Some(id) => Some(campaigns.find_folder(id)?),
            None => None,
        },
    };

    // A broken folder fails only its panel; the dropdown must stay usable
    let panel = match panel_html(campaigns, selected).await {
        Ok(panel) => panel,
        Err(e) => {
            log::error!("Failed to build panel on page load: {}", e);
            super::page::render_panel_error(&e)
        }
    };
    Ok(Html(super::page::render_dashboard(campaigns, selected, &panel)))
}

/// Graph container content for a dropdown change
pub async fn htmx_panel(
    State(state): State<AppState>,
    Query(query): Query<PanelQuery>,
) -> Result<Html<String>, ApiError> {
    let campaigns = &state.campaigns;
    let selected = match query.selected() {
        Some(id) => Some(campaigns.find_folder(id)?),
        None => None,
    };

    Ok(Html(panel_html(campaigns, selected).await?))
}

/// Chart models of one folder as JSON
pub async fn api_panel(
    State(state): State<AppState>,
    Query(query): Query<PanelQuery>,
) -> Result<Json<ChartSet>, ApiError> {
    let id = query.selected().ok_or_else(|| ApiError::BadRequest {
        message: "query parameter 'pasta' is required".to_string(),
    })?;

    let folder = state.campaigns.find_folder(id)?;
    let report = state.campaigns.report(folder).await?;
    Ok(Json(report.charts))
}
