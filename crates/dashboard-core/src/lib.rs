//! Shared types for the exam attendance dashboard.
//!
//! Holds the canonical record model and its positional source schema, the
//! cell-level cleaning rules, currency formatting, error types and the
//! command-line settings used by every other crate in the workspace.

pub mod data_processors;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
