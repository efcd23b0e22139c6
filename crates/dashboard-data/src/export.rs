//! Downloadable CSV reports.
//!
//! Payloads are semicolon-delimited and start with a UTF-8 byte-order mark so
//! spreadsheet software in pt-BR locales opens them with the right encoding
//! and column split.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use dashboard_core::error::{ExportError, InvalidExportKind};
use dashboard_core::models::{AttendanceRecord, Column, Dimension, FrequencyEntry};
use tracing::info;

use crate::aggregator::AttendanceAggregator;
use crate::loader::load;
use crate::reader::LoadOptions;

/// Plain-text reply for a download kind outside [`ExportKind`].
pub const INVALID_EXPORT_MESSAGE: &str = "Tipo inválido";

/// UTF-8 byte-order mark prepended to every payload.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

const DELIMITER: u8 = b';';

// ── ExportKind ────────────────────────────────────────────────────────────────

/// The reports a client can download.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportKind {
    /// Requests per physician (`medicos`).
    Physicians,
    /// Exams performed (`exames`).
    Exams,
    /// Every diagnosis code, untruncated (`cids`).
    DiagnosisCodes,
    /// The whole cleaned record set (`geral`).
    FullTable,
}

impl ExportKind {
    pub const ALL: [ExportKind; 4] = [
        ExportKind::Physicians,
        ExportKind::Exams,
        ExportKind::DiagnosisCodes,
        ExportKind::FullTable,
    ];

    /// URL segment identifying this report.
    pub fn slug(self) -> &'static str {
        match self {
            ExportKind::Physicians => "medicos",
            ExportKind::Exams => "exames",
            ExportKind::DiagnosisCodes => "cids",
            ExportKind::FullTable => "geral",
        }
    }

    /// File name suggested to the client.
    pub fn filename(self) -> &'static str {
        match self {
            ExportKind::Physicians => "relatorio_medicos.csv",
            ExportKind::Exams => "relatorio_exames.csv",
            ExportKind::DiagnosisCodes => "relatorio_cids.csv",
            ExportKind::FullTable => "base_completa.csv",
        }
    }

    /// Dimension and column headers for the frequency reports.
    fn frequency_layout(self) -> Option<(Dimension, [&'static str; 2])> {
        match self {
            ExportKind::Physicians => Some((
                Dimension::RequestingPhysician,
                ["Médico Solicitante", "Qtd Exames"],
            )),
            ExportKind::Exams => Some((Dimension::Exam, ["Exame", "Qtd Realizada"])),
            ExportKind::DiagnosisCodes => Some((
                Dimension::DiagnosisCode,
                ["Diagnóstico (CID)", "Ocorrências"],
            )),
            ExportKind::FullTable => None,
        }
    }
}

impl FromStr for ExportKind {
    type Err = InvalidExportKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExportKind::ALL
            .into_iter()
            .find(|kind| kind.slug() == s)
            .ok_or_else(|| InvalidExportKind(s.to_string()))
    }
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

// ── ExportTable ───────────────────────────────────────────────────────────────

/// A report ready to be serialised.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportTable {
    /// Two-column `(label, count)` table with human-readable headers.
    Frequency {
        headers: [&'static str; 2],
        entries: Vec<FrequencyEntry>,
    },
    /// Every cleaned record under the canonical column names.
    Records(Vec<AttendanceRecord>),
}

impl ExportTable {
    /// Build the table for `kind` from a loaded record set.
    pub fn build(kind: ExportKind, records: Vec<AttendanceRecord>) -> Self {
        match kind.frequency_layout() {
            Some((dimension, headers)) => ExportTable::Frequency {
                headers,
                entries: AttendanceAggregator::full_frequency(&records, dimension),
            },
            None => ExportTable::Records(records),
        }
    }

    /// Number of data lines the payload will contain.
    pub fn row_count(&self) -> usize {
        match self {
            ExportTable::Frequency { entries, .. } => entries.len(),
            ExportTable::Records(records) => records.len(),
        }
    }

    /// Serialise as BOM-prefixed, semicolon-delimited CSV.
    pub fn to_csv_bytes(&self) -> Result<Vec<u8>, ExportError> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(DELIMITER)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(UTF8_BOM.to_vec());

        match self {
            ExportTable::Frequency { headers, entries } => {
                writer.write_record(headers)?;
                for entry in entries {
                    writer.write_record([entry.label.as_str(), &entry.count.to_string()])?;
                }
            }
            ExportTable::Records(records) => {
                writer.write_record(Column::ALL.iter().map(|c| c.name()))?;
                for record in records {
                    writer.write_record(record_cells(record))?;
                }
            }
        }

        writer
            .into_inner()
            .map_err(|e| ExportError::Io(e.into_error()))
    }
}

/// Cells of one record in [`Column::ALL`] order.
fn record_cells(record: &AttendanceRecord) -> [String; 9] {
    [
        record.date_of_service.format("%Y-%m-%d").to_string(),
        record.patient.clone(),
        record.requesting_physician.clone(),
        record.exam.clone(),
        record.patient_origin.clone(),
        record.care_priority.clone(),
        record.diagnosis_code.clone(),
        record.item_total.clone(),
        format!("{:.2}", record.net_total),
    ]
}

// ── ExportPayload ─────────────────────────────────────────────────────────────

/// A serialised report plus its download name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPayload {
    pub filename: &'static str,
    pub body: Vec<u8>,
}

/// Load the source at `path` and serialise the report for `kind`.
pub fn export(path: &Path, options: &LoadOptions, kind: ExportKind) -> Result<ExportPayload, ExportError> {
    let records = load(path, options)?;
    let table = ExportTable::build(kind, records);
    let body = table.to_csv_bytes()?;

    info!(
        "Exported {} report: {} rows, {} bytes",
        kind,
        table.row_count(),
        body.len()
    );

    Ok(ExportPayload {
        filename: kind.filename(),
        body,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
