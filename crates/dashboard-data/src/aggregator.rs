//! Frequency tables, monthly counts and revenue totals over the record set.

use std::collections::{BTreeMap, HashMap};

use chrono::Datelike;
use dashboard_core::formatting::format_brl;
use dashboard_core::models::{AttendanceRecord, Dimension, FrequencyEntry, MonthlyCount};

// ── AttendanceAggregator ──────────────────────────────────────────────────────

/// Stateless helper that derives dashboard figures from cleaned records.
pub struct AttendanceAggregator;

impl AttendanceAggregator {
    /// Count every distinct value of `dimension`.
    ///
    /// Sorted by descending count. Equal counts keep the order in which the
    /// labels first appear in `records`.
    pub fn full_frequency(records: &[AttendanceRecord], dimension: Dimension) -> Vec<FrequencyEntry> {
        let mut positions: HashMap<&str, usize> = HashMap::new();
        let mut entries: Vec<FrequencyEntry> = Vec::new();

        for record in records {
            let label = dimension.value_of(record);
            match positions.get(label) {
                Some(&idx) => entries[idx].count += 1,
                None => {
                    positions.insert(label, entries.len());
                    entries.push(FrequencyEntry {
                        label: label.to_string(),
                        count: 1,
                    });
                }
            }
        }

        // Stable sort: ties stay in first-seen order.
        entries.sort_by(|a, b| b.count.cmp(&a.count));
        entries
    }

    /// The `n` most frequent values of `dimension`, same ordering as
    /// [`AttendanceAggregator::full_frequency`].
    pub fn top_n_frequency(
        records: &[AttendanceRecord],
        dimension: Dimension,
        n: usize,
    ) -> Vec<FrequencyEntry> {
        let mut entries = Self::full_frequency(records, dimension);
        entries.truncate(n);
        entries
    }

    /// Record counts per calendar month of service, labelled `MM/YYYY`.
    ///
    /// Chronological; months without records are omitted.
    pub fn monthly_time_series(records: &[AttendanceRecord]) -> Vec<MonthlyCount> {
        // BTreeMap on (year, month) keeps chronological order.
        let mut months: BTreeMap<(i32, u32), usize> = BTreeMap::new();

        for record in records {
            let date = record.date_of_service;
            *months.entry((date.year(), date.month())).or_insert(0) += 1;
        }

        months
            .into_iter()
            .map(|((year, month), count)| MonthlyCount {
                month: format!("{:02}/{:04}", month, year),
                count,
            })
            .collect()
    }

    /// Number of records.
    pub fn total_count(records: &[AttendanceRecord]) -> usize {
        records.len()
    }

    /// Sum of `net_total` over all records.
    ///
    /// Amounts are summed in sorted order so the result does not depend on
    /// row order.
    pub fn total_revenue(records: &[AttendanceRecord]) -> f64 {
        let mut amounts: Vec<f64> = records.iter().map(|r| r.net_total).collect();
        amounts.sort_by(f64::total_cmp);
        amounts.into_iter().sum()
    }

    /// [`AttendanceAggregator::total_revenue`] as Brazilian currency text,
    /// e.g. `"R$ 1.234,50"`.
    pub fn total_revenue_formatted(records: &[AttendanceRecord]) -> String {
        format_brl(Self::total_revenue(records))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
