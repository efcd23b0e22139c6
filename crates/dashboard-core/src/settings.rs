use clap::Parser;
use std::path::PathBuf;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Clinical exam attendance dashboard
#[derive(Parser, Debug, Clone)]
#[command(
    name = "exam-dashboard",
    about = "Dashboard and CSV reports over a clinical exam attendance spreadsheet",
    version
)]
pub struct Settings {
    /// Spreadsheet holding the attendance records (.xlsx, .xls, .ods or .csv)
    #[arg(long, env = "EXAM_DASHBOARD_SOURCE", default_value = "dados.xlsx")]
    pub source: PathBuf,

    /// Address the HTTP server listens on
    #[arg(long, env = "EXAM_DASHBOARD_BIND", default_value = "127.0.0.1:5000")]
    pub bind: String,

    /// Field delimiter used when the source is a CSV file
    #[arg(long, env = "EXAM_DASHBOARD_CSV_DELIMITER", default_value = ";", value_parser = parse_delimiter)]
    pub csv_delimiter: u8,

    /// Run mode
    #[arg(long, default_value = "serve", value_parser = ["serve", "summary", "export"])]
    pub mode: String,

    /// Report to produce in export mode
    #[arg(long, value_parser = ["medicos", "exames", "cids", "geral"])]
    pub kind: Option<String>,

    /// Output file for export mode (defaults to the report's download name)
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Logging level
    #[arg(long, env = "EXAM_DASHBOARD_LOG_LEVEL", default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse the process arguments and apply derived overrides.
    pub fn load() -> Self {
        Self::load_from_args(std::env::args_os())
    }

    /// Same as [`Settings::load`] but with an explicit argument list.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let mut settings = Settings::parse_from(args);

        // --debug overrides log level.
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }

        settings
    }
}

/// Accept a single ASCII character as a CSV delimiter.
fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s.as_bytes() {
        [b] if b.is_ascii() => Ok(*b),
        _ => Err(format!("delimiter must be a single ASCII character, got {s:?}")),
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
