use crate::data_types::{DateRange, SeriesPoint, SnapshotSummary};
use chrono::NaiveDate;
use serde::Serialize;

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Figures shown in the indicator row for the selected date range.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Summary {
    pub latest_date: Option<NaiveDate>,
    pub latest_count: Option<u32>,
    /// Latest count minus the count of the day before it.
    pub count_delta: Option<i64>,
    pub latest_median: Option<f64>,
    /// Latest median minus the median of the day before it, to 2 dp.
    pub median_delta: Option<f64>,
    pub days_in_window: usize,
    pub range_label: String,
    pub avg_confidence: f64,
    pub measurements: u64,
}

impl Summary {
    /// `window` holds the fleet days inside `range`.
    pub fn compute(
        window: &[SeriesPoint],
        range: Option<DateRange>,
        totals: &SnapshotSummary,
    ) -> Self {
        let latest = window.last();
        let previous = window.len().checked_sub(2).and_then(|i| window.get(i));
        Self {
            latest_date: latest.map(|p| p.date),
            latest_count: latest.map(SeriesPoint::count_or_zero),
            count_delta: latest
                .zip(previous)
                .map(|(l, p)| l.count_or_zero() as i64 - p.count_or_zero() as i64),
            latest_median: latest.map(|p| round2(p.median)),
            median_delta: latest.zip(previous).map(|(l, p)| round2(l.median - p.median)),
            days_in_window: window.len(),
            range_label: range.map(|r| r.label()).unwrap_or_default(),
            avg_confidence: totals.avg_confidence,
            measurements: totals.measurements,
        }
    }

    /// Signed delta such as `+0.20` or `-1.05`; empty without a previous day.
    pub fn median_delta_label(&self) -> String {
        self.median_delta
            .map(|d| format!("{d:+.2}"))
            .unwrap_or_default()
    }

    pub fn count_delta_label(&self) -> String {
        self.count_delta
            .map(|d| format!("{d:+}"))
            .unwrap_or_default()
    }
}
