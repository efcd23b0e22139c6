//! Cleaning pipeline from raw rows to the canonical record set.
//!
//! Rules run in a fixed order per row: parse the service date (rejecting the
//! row on failure), coerce the net amount (zero on failure), then normalise
//! the categorical text fields.

use std::path::Path;

use dashboard_core::data_processors::{AmountProcessor, DateProcessor, TextNormalizer};
use dashboard_core::error::{Result, RowRejected};
use dashboard_core::models::{AttendanceRecord, Column, RawRow};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::reader::{read_raw_rows, LoadOptions};

// ── Public types ──────────────────────────────────────────────────────────────

/// Counters describing what the cleaning pass did to one source file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Rows read from the source, before any filtering.
    pub rows_read: usize,
    /// Rows dropped because the service date did not parse.
    pub rows_rejected: usize,
    /// Kept rows whose net amount fell back to zero.
    pub amount_fallbacks: usize,
}

/// Records plus the report describing how they were obtained.
#[derive(Debug, Clone, Default)]
pub struct LoadOutcome {
    pub records: Vec<AttendanceRecord>,
    pub report: LoadReport,
}

/// A cleaned row and whether its net amount was coerced.
#[derive(Debug, Clone)]
pub struct NormalizedRow {
    pub record: AttendanceRecord,
    pub amount_fallback: bool,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load and clean the source spreadsheet at `path`.
///
/// Re-reads the file on every call; nothing is cached.
pub fn load(path: &Path, options: &LoadOptions) -> Result<Vec<AttendanceRecord>> {
    load_with_report(path, options).map(|outcome| outcome.records)
}

/// Same as [`load`] but also returns the [`LoadReport`].
pub fn load_with_report(path: &Path, options: &LoadOptions) -> Result<LoadOutcome> {
    let load_start = std::time::Instant::now();
    let rows = read_raw_rows(path, options)?;
    let outcome = normalize_rows(rows);

    info!(
        "Loaded {} records from {} ({} rejected, {} amount fallbacks) in {:.3}s",
        outcome.records.len(),
        path.display(),
        outcome.report.rows_rejected,
        outcome.report.amount_fallbacks,
        load_start.elapsed().as_secs_f64()
    );

    Ok(outcome)
}

/// Clean a batch of raw rows, dropping those without a usable date.
pub fn normalize_rows(rows: Vec<RawRow>) -> LoadOutcome {
    let mut outcome = LoadOutcome {
        records: Vec::with_capacity(rows.len()),
        report: LoadReport {
            rows_read: rows.len(),
            ..LoadReport::default()
        },
    };

    for (line, row) in rows.into_iter().enumerate() {
        match normalize_row(row) {
            Ok(normalized) => {
                if normalized.amount_fallback {
                    outcome.report.amount_fallbacks += 1;
                }
                outcome.records.push(normalized.record);
            }
            Err(rejected) => {
                debug!("Dropping row {}: {}", line + 1, rejected);
                outcome.report.rows_rejected += 1;
            }
        }
    }

    if outcome.report.rows_read > 0 && outcome.records.is_empty() {
        warn!(
            "All {} source rows were rejected; check the date column",
            outcome.report.rows_read
        );
    }

    outcome
}

/// Clean a single row.
pub fn normalize_row(mut row: RawRow) -> std::result::Result<NormalizedRow, RowRejected> {
    let date_of_service = DateProcessor::parse(row.get(Column::DateOfService))
        .ok_or_else(|| RowRejected(row.get(Column::DateOfService).to_string()))?;

    let (net_total, amount_fallback) = AmountProcessor::coerce(row.get(Column::NetTotal));

    let record = AttendanceRecord {
        date_of_service,
        patient: row.take(Column::Patient),
        requesting_physician: TextNormalizer::category(row.get(Column::RequestingPhysician)),
        exam: TextNormalizer::category(row.get(Column::Exam)),
        patient_origin: TextNormalizer::category(row.get(Column::PatientOrigin)),
        care_priority: TextNormalizer::category(row.get(Column::CarePriority)),
        diagnosis_code: TextNormalizer::category(row.get(Column::DiagnosisCode)),
        item_total: row.take(Column::ItemTotal),
        net_total,
    };

    Ok(NormalizedRow {
        record,
        amount_fallback,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
