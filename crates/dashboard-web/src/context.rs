//! Per-server context shared by every handler.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashboard_data::reader::LoadOptions;
use tokio::task::JoinError;

/// Where the records come from and how to read them.
///
/// Holds no records: every request runs the pipeline against the file again.
#[derive(Debug, Clone)]
pub struct DashboardContext {
    source: Arc<PathBuf>,
    options: LoadOptions,
}

impl DashboardContext {
    pub fn new(source: impl Into<PathBuf>, options: LoadOptions) -> Self {
        Self {
            source: Arc::new(source.into()),
            options,
        }
    }

    /// Path of the source spreadsheet.
    pub fn source(&self) -> &Path {
        self.source.as_path()
    }

    /// Run a synchronous pipeline job on the blocking thread pool.
    pub async fn run<T, F>(&self, job: F) -> Result<T, JoinError>
    where
        F: FnOnce(&Path, &LoadOptions) -> T + Send + 'static,
        T: Send + 'static,
    {
        let source = Arc::clone(&self.source);
        let options = self.options;
        tokio::task::spawn_blocking(move || job(source.as_path(), &options)).await
    }
}
