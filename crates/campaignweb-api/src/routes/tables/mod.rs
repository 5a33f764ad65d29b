//! Full-table routes - every source row with the currency mask
//!
//! Structure:
//! - api.rs: Handlers
//! - page.rs: Full page rendering

pub mod api;
pub mod page;

pub use api::{page_all_expenses, page_all_revenue};
