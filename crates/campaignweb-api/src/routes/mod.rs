//! Route modules for the dashboard server
//!
//! - dashboard: Candidate selector, chart panel, chart JSON
//! - tables: Full revenue / expense tables linked from truncated charts
//!
//! Each module follows a consistent structure:
//! - mod.rs: Module declaration and exports
//! - api.rs: Handlers (JSON and HTMX endpoints)
//! - page.rs: HTML rendering

pub mod dashboard;
pub mod tables;
