//! Dashboard pipeline: load the source, then derive every metric the view
//! shows.

use std::path::Path;

use dashboard_core::error::RenderError;
use dashboard_core::models::{AttendanceRecord, DashboardMetrics, Dimension};

use crate::aggregator::AttendanceAggregator;
use crate::loader::load;
use crate::reader::LoadOptions;

/// Number of categories kept on each dashboard chart.
pub const DASHBOARD_TOP_N: usize = 10;

/// Derive [`DashboardMetrics`] from an already-loaded record set.
///
/// Never fails; an empty set produces empty tables, a zero count and
/// `"R$ 0,00"`.
pub fn build_metrics(records: &[AttendanceRecord]) -> DashboardMetrics {
    let top = |dimension| AttendanceAggregator::top_n_frequency(records, dimension, DASHBOARD_TOP_N);

    DashboardMetrics {
        physicians: top(Dimension::RequestingPhysician),
        exams: top(Dimension::Exam),
        origins: top(Dimension::PatientOrigin),
        priorities: top(Dimension::CarePriority),
        diagnoses: top(Dimension::DiagnosisCode),
        timeline: AttendanceAggregator::monthly_time_series(records),
        total_records: AttendanceAggregator::total_count(records),
        total_revenue: AttendanceAggregator::total_revenue_formatted(records),
    }
}

/// Run the full dashboard pipeline against the file at `path`.
///
/// The source is re-read on every call. Failures come back as a
/// [`RenderError`] for the presentation layer to display.
pub fn dashboard_metrics(path: &Path, options: &LoadOptions) -> Result<DashboardMetrics, RenderError> {
    let records = load(path, options)?;
    Ok(build_metrics(&records))
}
