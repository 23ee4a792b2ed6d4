//! Snapshot data supplied by the external fetch collaborator.

use super::range::DateRange;
use chrono::NaiveDate;
use eyre::{ensure, Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type EntityId = u32;

/// One day of aggregated measurements.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub median: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q25: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q75: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

impl SeriesPoint {
    pub fn new(date: NaiveDate, median: f64) -> Self {
        Self {
            date,
            median,
            q25: None,
            q75: None,
            count: None,
        }
    }

    pub fn with_band(mut self, q25: f64, q75: f64) -> Self {
        self.q25 = Some(q25);
        self.q75 = Some(q75);
        self
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    pub fn count_or_zero(&self) -> u32 {
        self.count.unwrap_or(0)
    }

    /// `q25 <= median <= q75` for whichever quantiles are present.
    pub fn band_is_ordered(&self) -> bool {
        self.q25.map_or(true, |q| q <= self.median) && self.q75.map_or(true, |q| self.median <= q)
    }
}

/// Sub-slice of a date-ordered series whose dates fall inside `range`.
pub fn slice_in_range<'a>(points: &'a [SeriesPoint], range: &DateRange) -> &'a [SeriesPoint] {
    let start = points.partition_point(|p| p.date < range.start);
    let end = points.partition_point(|p| p.date <= range.end);
    &points[start..end.max(start)]
}

/// Index of the point dated `date`, if present.
pub fn find_date(points: &[SeriesPoint], date: NaiveDate) -> Option<usize> {
    points.binary_search_by(|p| p.date.cmp(&date)).ok()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnomalyKind {
    Spike,
    Drop,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnomalyRecord {
    pub entity_id: EntityId,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: AnomalyKind,
    pub diameter: f64,
    pub prev_diameter: f64,
    pub delta: f64,
}

impl AnomalyRecord {
    /// `delta == diameter - prev_diameter` and its sign agrees with the kind.
    pub fn is_consistent(&self) -> bool {
        let expected = self.diameter - self.prev_diameter;
        let sign_ok = match self.kind {
            AnomalyKind::Spike => self.delta > 0.0,
            AnomalyKind::Drop => self.delta < 0.0,
        };
        sign_ok && (expected - self.delta).abs() < 1e-2
    }
}

/// Totals computed upstream that the core only displays.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotSummary {
    #[serde(default)]
    pub avg_confidence: f64,
    #[serde(default)]
    pub measurements: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub fleet_daily: Vec<SeriesPoint>,
    #[serde(default)]
    pub entity_daily: BTreeMap<EntityId, Vec<SeriesPoint>>,
    #[serde(default)]
    pub entity_ids: Vec<EntityId>,
    #[serde(default)]
    pub anomalies: Vec<AnomalyRecord>,
    #[serde(default)]
    pub summary: SnapshotSummary,
}

impl Snapshot {
    pub fn new(
        fleet_daily: Vec<SeriesPoint>,
        entity_daily: BTreeMap<EntityId, Vec<SeriesPoint>>,
    ) -> Result<Self> {
        let mut snapshot = Self {
            fleet_daily,
            entity_daily,
            ..Default::default()
        };
        snapshot.normalize()?;
        Ok(snapshot)
    }

    pub fn from_json(payload: &str) -> Result<Self> {
        let mut snapshot: Self =
            serde_json::from_str(payload).wrap_err("invalid snapshot payload")?;
        snapshot.normalize()?;
        Ok(snapshot)
    }

    /// Checks ordering invariants and repairs what can be repaired.
    pub fn normalize(&mut self) -> Result<()> {
        for pair in self.fleet_daily.windows(2) {
            ensure!(
                pair[0].date < pair[1].date,
                "fleet series is not strictly ascending at {} -> {}",
                pair[0].date,
                pair[1].date
            );
            if (pair[1].date - pair[0].date).num_days() != 1 {
                tracing::warn!(after = %pair[0].date, before = %pair[1].date, "fleet series has a gap");
            }
        }
        for p in &self.fleet_daily {
            if !p.band_is_ordered() {
                tracing::warn!(date = %p.date, "fleet quantile band is not ordered around the median");
            }
        }

        for (id, points) in self.entity_daily.iter_mut() {
            points.sort_by_key(|p| p.date);
            let before = points.len();
            points.dedup_by_key(|p| p.date);
            if points.len() != before {
                tracing::warn!(entity = id, dropped = before - points.len(), "duplicate dates in entity series");
            }
        }

        if self.entity_ids.is_empty() {
            self.entity_ids = self.entity_daily.keys().copied().collect();
        }

        let before = self.anomalies.len();
        self.anomalies.retain(AnomalyRecord::is_consistent);
        if self.anomalies.len() != before {
            tracing::warn!(dropped = before - self.anomalies.len(), "inconsistent anomaly records");
        }
        Ok(())
    }

    pub fn fleet_dates(&self) -> Vec<NaiveDate> {
        self.fleet_daily.iter().map(|p| p.date).collect()
    }

    pub fn entity_series(&self, id: EntityId) -> Option<&[SeriesPoint]> {
        self.entity_daily.get(&id).map(Vec::as_slice)
    }

    /// Position of `id` in the full identifier list; drives stable colours.
    pub fn entity_position(&self, id: EntityId) -> Option<usize> {
        self.entity_ids.iter().position(|e| *e == id)
    }
}
