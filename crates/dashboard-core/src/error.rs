use std::path::PathBuf;
use thiserror::Error;

/// Failure to turn the source spreadsheet into a record set.
///
/// Fatal to the current request; the message is surfaced verbatim.
#[derive(Error, Debug)]
pub enum IngestionError {
    /// The source file does not exist.
    #[error("Source file not found: {0}")]
    SourceNotFound(PathBuf),

    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The workbook could not be opened or decoded.
    #[error("Failed to open workbook {path}: {message}")]
    Workbook { path: PathBuf, message: String },

    /// The workbook contains no worksheet at all.
    #[error("Workbook {0} has no worksheets")]
    NoWorksheet(PathBuf),

    /// A delimited text source could not be parsed.
    #[error("Failed to parse CSV source: {0}")]
    Csv(#[from] csv::Error),

    /// The file extension is not one of the supported source formats.
    #[error("Unsupported source format: {0}")]
    UnsupportedFormat(String),

    /// The sheet is not exactly as wide as the positional schema.
    #[error("Sheet has {found} columns, expected {expected}")]
    SchemaMismatch { expected: usize, found: usize },
}

/// A source row excluded from the record set.
///
/// Never surfaced to callers; the loader only counts these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unparsable service date: {0:?}")]
pub struct RowRejected(pub String);

/// Failure while producing dashboard metrics for the rendering layer.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The record set could not be loaded.
    #[error(transparent)]
    Ingestion(#[from] IngestionError),

    /// The worker running the pipeline did not complete.
    #[error("Pipeline task failed: {0}")]
    Task(String),
}

/// Failure while materialising a CSV export.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The record set could not be loaded.
    #[error(transparent)]
    Ingestion(#[from] IngestionError),

    /// The delimited payload could not be written.
    #[error("Failed to write CSV export: {0}")]
    Write(#[from] csv::Error),

    /// Writing the payload to its destination failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The worker running the export did not complete.
    #[error("Export task failed: {0}")]
    Task(String),
}

/// A download kind outside the supported set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid export type: {0}")]
pub struct InvalidExportKind(pub String);

/// Convenience alias used by the loader.
pub type Result<T> = std::result::Result<T, IngestionError>;
