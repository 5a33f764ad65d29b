//! HTTP dashboard server with HTMX support
//!
//! Routes are organized into modules:
//! - routes::dashboard: Candidate selector, chart panel, chart JSON
//! - routes::tables: Untruncated revenue and expense tables

pub mod error;
pub mod routes;

use axum::{routing::get, Router};
use campaignweb_core::{Campaigns, EXPENSE_TABLE_ROUTE, REVENUE_TABLE_ROUTE};
use std::sync::Arc;
use tokio::net::TcpListener;

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub campaigns: Arc<Campaigns>,
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::dashboard::{api_panel, htmx_panel, page_index};
    use routes::tables::{page_all_expenses, page_all_revenue};

    Router::new()
        // API endpoints
        .route("/api/health", get(health_check))
        .route("/api/painel", get(api_panel))
        // Pages
        .route("/", get(page_index))
        .route(&format!("{}/:folder", REVENUE_TABLE_ROUTE), get(page_all_revenue))
        .route(&format!("{}/:folder", EXPENSE_TABLE_ROUTE), get(page_all_expenses))
        // HTMX partials
        .route("/painel", get(htmx_panel))
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

// ==================== Template Functions ====================

/// Base HTML template
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{}</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <script src="https://cdn.jsdelivr.net/npm/chart.js@4.4.1/dist/chart.umd.min.js"></script>
    <script src="https://cdn.tailwindcss.com"></script>
    <style>
        .htmx-indicator {{ opacity: 0; transition: opacity 0.3s; }}
        .htmx-request .htmx-indicator {{ opacity: 1; }}
        .htmx-request.htmx-indicator {{ opacity: 1; }}
    </style>
</head>
<body class="bg-gray-50 text-gray-900">
    {}
</body>
</html>"#,
        campaignweb_utils::escape_html(title),
        content
    )
}

/// Start the HTTP server
///
/// Binds to the configured address and serves until Ctrl+C.
pub async fn start_server(campaigns: Arc<Campaigns>) -> std::io::Result<()> {
    let server = campaigns.config().server.clone();
    let addr = format!("{}:{}", server.host, server.port);
    let router = create_router(AppState { campaigns });

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting campaignweb server on http://{}", addr);
    log::info!("Available routes:");
    log::info!("  - / (Dashboard)");
    log::info!("  - {}/<pasta> (All revenue rows)", REVENUE_TABLE_ROUTE);
    log::info!("  - {}/<pasta> (All expense rows)", EXPENSE_TABLE_ROUTE);
    log::info!("  - /api/* (JSON API endpoints)");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    log::info!("Server stopped gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
    }
}

// ==================== Tests ====================
