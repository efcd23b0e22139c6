//! Raw row extraction from the source spreadsheet.
//!
//! Every cell is read as plain text; no numeric or date inference happens
//! here, so the cleaning rules in [`crate::loader`] see the same strings a
//! text-only reader would.

use std::path::Path;

use calamine::{open_workbook_auto, Data, DataType, Reader};
use dashboard_core::error::{IngestionError, Result};
use dashboard_core::models::{RawRow, SCHEMA_WIDTH};
use tracing::debug;

/// Options that affect how the source file is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Field delimiter for `.csv` sources.
    pub csv_delimiter: u8,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { csv_delimiter: b';' }
    }
}

/// Source file formats the reader understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Workbook,
    Csv,
}

impl SourceFormat {
    /// Pick a format from the file extension (case-insensitive).
    pub fn detect(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(SourceFormat::Workbook),
            "csv" | "txt" => Ok(SourceFormat::Csv),
            _ => Err(IngestionError::UnsupportedFormat(ext)),
        }
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Read every row of the first sheet of `path` as [`RawRow`]s.
///
/// Fails when the file is missing or unreadable, or when the sheet is not
/// exactly [`SCHEMA_WIDTH`] columns wide. An empty sheet yields no rows.
pub fn read_raw_rows(path: &Path, options: &LoadOptions) -> Result<Vec<RawRow>> {
    if !path.exists() {
        return Err(IngestionError::SourceNotFound(path.to_path_buf()));
    }

    let rows = match SourceFormat::detect(path)? {
        SourceFormat::Workbook => read_workbook_cells(path)?,
        SourceFormat::Csv => read_csv_cells(path, options.csv_delimiter)?,
    };

    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    if !rows.is_empty() && width != SCHEMA_WIDTH {
        return Err(IngestionError::SchemaMismatch {
            expected: SCHEMA_WIDTH,
            found: width,
        });
    }

    debug!("Read {} raw rows from {}", rows.len(), path.display());

    Ok(rows.into_iter().map(RawRow::from_cells).collect())
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Text cells of the first worksheet, left-padded so column A is index 0
/// even when the used range starts further right.
fn read_workbook_cells(path: &Path) -> Result<Vec<Vec<String>>> {
    let workbook_err = |e: calamine::Error| IngestionError::Workbook {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    let mut workbook = open_workbook_auto(path).map_err(workbook_err)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| IngestionError::NoWorksheet(path.to_path_buf()))?
        .map_err(workbook_err)?;

    let leading = range.start().map(|(_, col)| col as usize).unwrap_or(0);

    let rows = range
        .rows()
        .map(|row| {
            let mut cells = vec![String::new(); leading];
            cells.extend(row.iter().map(cell_text));
            cells
        })
        .collect();

    Ok(rows)
}

/// Render a workbook cell the way a text-only reader would see it.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => match cell.as_datetime() {
            Some(naive) => naive.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => dt.as_f64().to_string(),
        },
    }
}

fn read_csv_cells(path: &Path, delimiter: u8) -> Result<Vec<Vec<String>>> {
    let bytes = std::fs::read(path).map_err(|source| IngestionError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(bytes.as_slice());

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let mut cells: Vec<String> = record.iter().map(str::to_string).collect();
        if rows.is_empty() {
            if let Some(first) = cells.first_mut() {
                if let Some(stripped) = first.strip_prefix('\u{feff}') {
                    *first = stripped.to_string();
                }
            }
        }
        rows.push(cells);
    }

    Ok(rows)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::write_sample_workbook;
    use dashboard_core::models::Column;
    use rust_xlsxwriter::Workbook;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_source(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_detect_formats() {
        assert_eq!(
            SourceFormat::detect(Path::new("dados.xlsx")).unwrap(),
            SourceFormat::Workbook
        );
        assert_eq!(
            SourceFormat::detect(Path::new("DADOS.XLS")).unwrap(),
            SourceFormat::Workbook
        );
        assert_eq!(
            SourceFormat::detect(Path::new("dados.csv")).unwrap(),
            SourceFormat::Csv
        );
        assert!(matches!(
            SourceFormat::detect(Path::new("dados.pdf")),
            Err(IngestionError::UnsupportedFormat(ext)) if ext == "pdf"
        ));
    }

    #[test]
    fn test_missing_file_is_ingestion_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("missing.xlsx");
        let err = read_raw_rows(&path, &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, IngestionError::SourceNotFound(_)));
    }

    #[test]
    fn test_corrupt_workbook_is_ingestion_error() {
        let tmp = TempDir::new().unwrap();
        let path = write_source(&tmp, "broken.xlsx", "this is not a zip archive");
        let err = read_raw_rows(&path, &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, IngestionError::Workbook { .. }));
    }

    #[test]
    fn test_csv_rows_are_positional() {
        let tmp = TempDir::new().unwrap();
        let path = write_source(
            &tmp,
            "dados.csv",
            "01/03/2024;P1;DR A;EXAME X;HOSPITAL;URGENTE;J45;10,00;10,00\n",
        );
        let rows = read_raw_rows(&path, &LoadOptions::default()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get(Column::DateOfService), "01/03/2024");
        assert_eq!(rows[0].get(Column::DiagnosisCode), "J45");
        assert_eq!(rows[0].get(Column::NetTotal), "10,00");
    }

    #[test]
    fn test_csv_short_rows_are_padded() {
        let tmp = TempDir::new().unwrap();
        let path = write_source(
            &tmp,
            "dados.csv",
            "01/03/2024;P1;DR A;EXAME X;HOSPITAL;URGENTE;J45;10,00;10,00\n02/03/2024;P2\n",
        );
        let rows = read_raw_rows(&path, &LoadOptions::default()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].get(Column::Patient), "P2");
        assert_eq!(rows[1].get(Column::NetTotal), "");
    }

    #[test]
    fn test_csv_strips_byte_order_mark() {
        let tmp = TempDir::new().unwrap();
        let path = write_source(&tmp, "dados.csv", "\u{feff}01/03/2024;P1;;;;;;;\n");
        let rows = read_raw_rows(&path, &LoadOptions::default()).unwrap();
        assert_eq!(rows[0].get(Column::DateOfService), "01/03/2024");
    }

    #[test]
    fn test_csv_custom_delimiter() {
        let tmp = TempDir::new().unwrap();
        let path = write_source(&tmp, "dados.csv", "01/03/2024,P1,DR A,,,,,,\n");
        let options = LoadOptions { csv_delimiter: b',' };
        let rows = read_raw_rows(&path, &options).unwrap();
        assert_eq!(rows[0].get(Column::RequestingPhysician), "DR A");
    }

    #[test]
    fn test_wrong_width_is_schema_mismatch() {
        let tmp = TempDir::new().unwrap();
        let path = write_source(&tmp, "dados.csv", "01/03/2024;P1;DR A\n");
        let err = read_raw_rows(&path, &LoadOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            IngestionError::SchemaMismatch {
                expected: 9,
                found: 3
            }
        ));
    }

    #[test]
    fn test_empty_source_yields_no_rows() {
        let tmp = TempDir::new().unwrap();
        let path = write_source(&tmp, "dados.csv", "");
        let rows = read_raw_rows(&path, &LoadOptions::default()).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_unreadable_csv_is_file_read_error() {
        let tmp = TempDir::new().unwrap();
        // A directory passes the existence check but cannot be read.
        let path = tmp.path().join("dados.csv");
        std::fs::create_dir(&path).unwrap();

        let err = read_raw_rows(&path, &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, IngestionError::FileRead { .. }));
        assert!(err.to_string().contains("dados.csv"));
    }

    // ── workbooks ─────────────────────────────────────────────────────────────

    #[test]
    fn test_workbook_cells_are_rendered_as_text() {
        let tmp = TempDir::new().unwrap();
        let path = write_sample_workbook(&tmp);

        let rows = read_raw_rows(&path, &LoadOptions::default()).unwrap();
        assert_eq!(rows.len(), 2);

        // Native date cells come through as ISO text.
        assert_eq!(rows[0].get(Column::DateOfService), "2024-03-01 00:00:00");
        assert_eq!(rows[0].get(Column::RequestingPhysician), "dr a");
        assert_eq!(rows[0].get(Column::NetTotal), "1234.5");
        assert_eq!(rows[0].get(Column::DiagnosisCode), "");

        assert_eq!(rows[1].get(Column::DateOfService), "15/04/2024");
        assert_eq!(rows[1].get(Column::NetTotal), "5,00");
    }

    #[test]
    fn test_workbook_range_offset_is_padded() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("dados.xlsx");
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        // Column A left empty; the used range starts at B.
        for col in 1..9u16 {
            sheet.write_string(0, col, format!("C{col}")).unwrap();
        }
        workbook.save(&path).unwrap();

        let rows = read_raw_rows(&path, &LoadOptions::default()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get(Column::DateOfService), "");
        assert_eq!(rows[0].get(Column::Patient), "C1");
        assert_eq!(rows[0].get(Column::NetTotal), "C8");
    }

    #[test]
    fn test_workbook_wrong_width_is_schema_mismatch() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("dados.xlsx");
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for col in 0..7u16 {
            sheet.write_string(0, col, "x").unwrap();
        }
        workbook.save(&path).unwrap();

        let err = read_raw_rows(&path, &LoadOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            IngestionError::SchemaMismatch {
                expected: 9,
                found: 7
            }
        ));
    }

    #[test]
    fn test_cell_text_rendering() {
        assert_eq!(cell_text(&Data::Empty), "");
        assert_eq!(cell_text(&Data::String("DR A".to_string())), "DR A");
        assert_eq!(cell_text(&Data::Int(42)), "42");
        assert_eq!(cell_text(&Data::Float(10.5)), "10.5");
        assert_eq!(cell_text(&Data::Float(10.0)), "10");
    }
}
