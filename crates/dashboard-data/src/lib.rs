//! Data layer for the exam attendance dashboard.
//!
//! Reads the source spreadsheet as raw text rows, cleans them into the
//! canonical record set, aggregates dashboard metrics and serialises the
//! downloadable CSV reports. Every entry point re-reads the source file.

pub mod aggregator;
pub mod analysis;
pub mod export;
pub mod loader;
pub mod reader;

#[cfg(test)]
mod fixtures;

pub use dashboard_core as core;
