use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Inclusive calendar-day window. `start <= end` always holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Builds a range, swapping inverted endpoints.
    pub fn new(a: NaiveDate, b: NaiveDate) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// `end - start` in days.
    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    pub fn clamp_to(&self, bounds: &DateRange) -> Self {
        Self {
            start: self.start.clamp(bounds.start, bounds.end),
            end: self.end.clamp(bounds.start, bounds.end),
        }
    }

    pub fn label(&self) -> String {
        format!("{} → {}", self.start, self.end)
    }
}

/// Quick-range buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RangePreset {
    LastDays(usize),
    All,
}

impl RangePreset {
    pub const STANDARD: [RangePreset; 4] = [
        RangePreset::LastDays(7),
        RangePreset::LastDays(14),
        RangePreset::LastDays(30),
        RangePreset::All,
    ];

    pub fn label(&self) -> String {
        match self {
            Self::LastDays(n) => format!("{n}d"),
            Self::All => "All".to_string(),
        }
    }

    /// Range covered by the preset over an ascending list of days.
    pub fn resolve(&self, dates: &[NaiveDate]) -> Option<DateRange> {
        let last = *dates.last()?;
        let start = match self {
            Self::All => dates[0],
            Self::LastDays(n) => dates[dates.len().saturating_sub((*n).max(1))],
        };
        Some(DateRange::new(start, last))
    }
}
