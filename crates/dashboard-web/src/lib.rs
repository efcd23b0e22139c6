//! HTTP layer for the exam attendance dashboard.
//!
//! A thin axum shell over the data pipeline: the HTML dashboard, CSV
//! downloads, a JSON metrics endpoint and a health probe.

pub mod context;
pub mod endpoints;
pub mod error;
pub mod palette;
pub mod router;
pub mod server;
pub mod view;

pub use dashboard_core as core;
