use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Label substituted for blank categorical cells.
pub const NOT_INFORMED: &str = "NOT INFORMED";

/// Number of columns in the positional source schema.
pub const SCHEMA_WIDTH: usize = 9;

/// Positional source schema. The spreadsheet carries no trusted header row,
/// so a cell's meaning is fixed by its column index alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    DateOfService,
    Patient,
    RequestingPhysician,
    Exam,
    PatientOrigin,
    CarePriority,
    DiagnosisCode,
    ItemTotal,
    NetTotal,
}

impl Column {
    /// All columns in source order.
    pub const ALL: [Column; SCHEMA_WIDTH] = [
        Column::DateOfService,
        Column::Patient,
        Column::RequestingPhysician,
        Column::Exam,
        Column::PatientOrigin,
        Column::CarePriority,
        Column::DiagnosisCode,
        Column::ItemTotal,
        Column::NetTotal,
    ];

    /// Zero-based position of this column in a [`RawRow`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Canonical header name, used by the full-table export.
    pub fn name(self) -> &'static str {
        match self {
            Column::DateOfService => "date_of_service",
            Column::Patient => "patient",
            Column::RequestingPhysician => "requesting_physician",
            Column::Exam => "exam",
            Column::PatientOrigin => "patient_origin",
            Column::CarePriority => "care_priority",
            Column::DiagnosisCode => "diagnosis_code",
            Column::ItemTotal => "item_total",
            Column::NetTotal => "net_total",
        }
    }
}

/// One untyped source row, exactly [`SCHEMA_WIDTH`] text cells wide.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    cells: [String; SCHEMA_WIDTH],
}

impl RawRow {
    /// Build a row from up to [`SCHEMA_WIDTH`] cells; missing trailing cells
    /// are left empty and extra cells are ignored.
    pub fn from_cells<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row = RawRow::default();
        for (slot, cell) in row.cells.iter_mut().zip(cells) {
            *slot = cell.into();
        }
        row
    }

    /// Text of the cell in `column`.
    pub fn get(&self, column: Column) -> &str {
        &self.cells[column.index()]
    }

    /// Move the cell in `column` out of the row.
    pub fn take(&mut self, column: Column) -> String {
        std::mem::take(&mut self.cells[column.index()])
    }
}

/// One cleaned attendance row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Day the exam was performed.
    pub date_of_service: NaiveDate,
    /// Patient name, verbatim.
    pub patient: String,
    pub requesting_physician: String,
    pub exam: String,
    pub patient_origin: String,
    pub care_priority: String,
    pub diagnosis_code: String,
    /// Gross item amount as it appeared in the source.
    pub item_total: String,
    /// Net amount after coercion; never NaN or infinite.
    pub net_total: f64,
}

/// Categorical fields that frequency tables can be computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    RequestingPhysician,
    Exam,
    PatientOrigin,
    CarePriority,
    DiagnosisCode,
}

impl Dimension {
    /// Every normalized categorical dimension.
    pub const ALL: [Dimension; 5] = [
        Dimension::RequestingPhysician,
        Dimension::Exam,
        Dimension::PatientOrigin,
        Dimension::CarePriority,
        Dimension::DiagnosisCode,
    ];

    /// Value of this dimension on `record`.
    pub fn value_of(self, record: &AttendanceRecord) -> &str {
        match self {
            Dimension::RequestingPhysician => &record.requesting_physician,
            Dimension::Exam => &record.exam,
            Dimension::PatientOrigin => &record.patient_origin,
            Dimension::CarePriority => &record.care_priority,
            Dimension::DiagnosisCode => &record.diagnosis_code,
        }
    }

    /// Source column backing this dimension.
    pub fn column(self) -> Column {
        match self {
            Dimension::RequestingPhysician => Column::RequestingPhysician,
            Dimension::Exam => Column::Exam,
            Dimension::PatientOrigin => Column::PatientOrigin,
            Dimension::CarePriority => Column::CarePriority,
            Dimension::DiagnosisCode => Column::DiagnosisCode,
        }
    }
}

/// A single `(label, count)` row of a frequency table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyEntry {
    pub label: String,
    pub count: usize,
}

/// Number of records in one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyCount {
    /// Month label in `MM/YYYY` form.
    pub month: String,
    pub count: usize,
}

/// Everything the dashboard view needs, derived from one load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardMetrics {
    pub physicians: Vec<FrequencyEntry>,
    pub exams: Vec<FrequencyEntry>,
    pub origins: Vec<FrequencyEntry>,
    pub priorities: Vec<FrequencyEntry>,
    pub diagnoses: Vec<FrequencyEntry>,
    pub timeline: Vec<MonthlyCount>,
    pub total_records: usize,
    /// Net revenue already formatted as Brazilian currency text.
    pub total_revenue: String,
}
