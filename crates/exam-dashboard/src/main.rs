mod bootstrap;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dashboard_core::settings::Settings;
use dashboard_data::analysis::build_metrics;
use dashboard_data::export::{export, ExportKind};
use dashboard_data::loader::load_with_report;
use dashboard_data::reader::LoadOptions;
use dashboard_web::context::DashboardContext;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("Exam dashboard v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Source: {}, Mode: {}",
        settings.source.display(),
        settings.mode
    );

    let options = LoadOptions {
        csv_delimiter: settings.csv_delimiter,
    };

    match settings.mode.as_str() {
        "serve" => {
            let ctx = DashboardContext::new(settings.source.clone(), options);
            dashboard_web::server::serve(&settings.bind, ctx)
                .await
                .with_context(|| format!("server on {} failed", settings.bind))?;
        }

        "summary" => {
            let summary = run_summary(&settings.source, &options)?;
            println!("{summary}");
        }

        "export" => {
            let kind = settings
                .kind
                .as_deref()
                .context("--kind is required in export mode")?
                .parse::<ExportKind>()?;
            let written = run_export(&settings.source, &options, kind, settings.out.as_deref())?;
            tracing::info!("Wrote {} report to {}", kind, written.display());
        }

        other => {
            eprintln!("Unknown mode: {other}");
        }
    }

    Ok(())
}

/// Load the source once and render metrics plus load counters as pretty JSON.
fn run_summary(source: &Path, options: &LoadOptions) -> Result<String> {
    let outcome = load_with_report(source, options)?;
    let metrics = build_metrics(&outcome.records);
    let doc = serde_json::json!({
        "source": source.display().to_string(),
        "load": outcome.report,
        "metrics": metrics,
    });
    Ok(serde_json::to_string_pretty(&doc)?)
}

/// Write one report to `out`, or to its download filename when `out` is `None`.
fn run_export(
    source: &Path,
    options: &LoadOptions,
    kind: ExportKind,
    out: Option<&Path>,
) -> Result<PathBuf> {
    let payload = export(source, options, kind)?;
    let target = out.map_or_else(|| PathBuf::from(payload.filename), Path::to_path_buf);
    std::fs::write(&target, &payload.body)
        .with_context(|| format!("failed to write {}", target.display()))?;
    Ok(target)
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = "01/03/2024;P1;DR A;EXAME X;HOSPITAL;URGENTE;J45;10,00;10,00\n\
                          02/03/2024;P2;;;;;;5,00;abc\n\
                          ??;P3;;;;;;;\n";

    fn write_sample(tmp: &TempDir) -> PathBuf {
        let path = tmp.path().join("dados.csv");
        std::fs::write(&path, SAMPLE).unwrap();
        path
    }

    #[test]
    fn test_run_summary_reports_metrics_and_counters() {
        let tmp = TempDir::new().unwrap();
        let source = write_sample(&tmp);

        let summary = run_summary(&source, &LoadOptions::default()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&summary).unwrap();

        assert_eq!(json["metrics"]["total_records"], 2);
        assert_eq!(json["metrics"]["total_revenue"], "R$ 10,00");
        assert_eq!(json["load"]["rows_read"], 3);
        assert_eq!(json["load"]["rows_rejected"], 1);
        assert_eq!(json["load"]["amount_fallbacks"], 1);
    }

    #[test]
    fn test_run_summary_missing_source_fails() {
        let tmp = TempDir::new().unwrap();
        let err = run_summary(&tmp.path().join("nope.xlsx"), &LoadOptions::default()).unwrap_err();
        assert!(err.to_string().contains("Source file not found"));
    }

    #[test]
    fn test_run_export_writes_to_requested_path() {
        let tmp = TempDir::new().unwrap();
        let source = write_sample(&tmp);
        let out = tmp.path().join("medicos.csv");

        let written = run_export(
            &source,
            &LoadOptions::default(),
            ExportKind::Physicians,
            Some(&out),
        )
        .unwrap();

        assert_eq!(written, out);
        let body = std::fs::read(&out).unwrap();
        assert_eq!(
            body,
            "\u{feff}Médico Solicitante;Qtd Exames\nDR A;1\nNOT INFORMED;1\n".as_bytes()
        );
    }
}
