//! Dashboard routes - candidate dropdown and chart panel
//!
//! Structure:
//! - api.rs: Page, HTMX partial and JSON handlers
//! - page.rs: HTML rendering

pub mod api;
pub mod page;

pub use api::{api_panel, htmx_panel, page_index, PanelQuery};
