//! On-disk workbook fixtures shared by the unit tests.

use std::path::PathBuf;

use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use tempfile::TempDir;

/// Write a two-row `dados.xlsx` into `dir`.
///
/// Row 1 has a native date cell and a numeric net amount; row 2 has a
/// day-first text date and a comma-decimal text amount. The diagnosis column
/// of row 1 is left empty.
pub fn write_sample_workbook(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("dados.xlsx");
    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("dd/mm/yyyy");
    let sheet = workbook.add_worksheet();

    let date = ExcelDateTime::from_ymd(2024, 3, 1).unwrap();
    sheet.write_datetime_with_format(0, 0, &date, &date_format).unwrap();
    for (col, text) in [(1, "P1"), (2, "dr a"), (3, "hemograma"), (4, "hospital"), (5, "urgente")] {
        sheet.write_string(0, col, text).unwrap();
    }
    sheet.write_string(0, 7, "1234,50").unwrap();
    sheet.write_number(0, 8, 1234.5).unwrap();

    for (col, text) in [
        (0, "15/04/2024"),
        (1, "P2"),
        (2, "DR B"),
        (3, "RAIO X"),
        (4, "AMBULATORIO"),
        (5, "ELETIVO"),
        (6, "J45"),
        (7, "5,00"),
        (8, "5,00"),
    ] {
        sheet.write_string(1, col, text).unwrap();
    }

    workbook.save(&path).unwrap();
    path
}
