pub mod dashboard;
pub mod download;
pub mod health;
pub mod metrics;
