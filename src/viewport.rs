//! Viewport Model
//!
//! The shared state every chart reads before drawing: the logical date range
//! picked with the range controls, and a secondary zoom/pan magnification applied
//! inside that range. All mutators leave the state clamped and ordered, so a
//! renderer can never observe a half-applied edit.

use crate::data_types::DateRange;
use crate::scales::ChartScale;
use crate::view_controller::ViewController;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Zoom/pan applied within the filtered range.
///
/// `scale = 1` shows the whole filtered range; `offset` is the fractional start
/// of the visible window. `[offset, offset + 1/scale]` always lies in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZoomState {
    pub scale: f64,
    pub offset: f64,
}

impl Default for ZoomState {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: 0.0,
        }
    }
}

impl ZoomState {
    pub fn is_zoomed(&self) -> bool {
        self.scale > 1.0
    }

    /// Share of the filtered range currently visible.
    pub fn visible_fraction(&self) -> f64 {
        1.0 / self.scale
    }

    /// Zooms by `factor` keeping the point at `fraction` of the plot area fixed.
    /// Returns false when the clamped scale did not change.
    pub fn zoom_at(&mut self, fraction: f64, factor: f64, max_scale: f64) -> bool {
        if !factor.is_finite() || factor <= 0.0 {
            return false;
        }
        let fraction = if fraction.is_finite() { fraction.clamp(0.0, 1.0) } else { 0.5 };
        let old_scale = self.scale;
        let new_scale = (old_scale * factor).clamp(1.0, max_scale.max(1.0));
        if (new_scale - old_scale).abs() < 1e-12 {
            return false;
        }
        let offset = ViewController::zoom_offset_at(self.offset, fraction, old_scale, new_scale);
        self.scale = new_scale;
        self.offset = ViewController::clamp_offset(offset, new_scale);
        true
    }

    /// Moves the window by `delta` of its own width.
    pub fn pan_by(&mut self, delta: f64) -> bool {
        let before = self.offset;
        self.offset = ViewController::clamp_offset(self.offset + delta / self.scale, self.scale);
        self.offset != before
    }

    /// Sets the offset relative to a captured starting offset. `delta` is already
    /// expressed as a fraction of the full filtered range.
    pub fn pan_from(&mut self, start_offset: f64, delta: f64) -> bool {
        let before = self.offset;
        self.offset = ViewController::clamp_offset(start_offset + delta, self.scale);
        self.offset != before
    }

    pub fn reset(&mut self) -> bool {
        let changed = *self != Self::default();
        *self = Self::default();
        changed
    }

    /// Index window of a series of length `n` that is currently shown.
    pub fn visible_index_range(&self, n: usize) -> Option<IndexRange> {
        if n == 0 {
            return None;
        }
        let last = (n - 1) as f64;
        let max = (n - 1) as i64;
        let start = ((self.offset * last).floor() as i64).clamp(0, max);
        let end = (((self.offset + self.visible_fraction()) * last).ceil() as i64).clamp(0, max);
        Some(IndexRange {
            start_idx: start as usize,
            end_idx: end.max(start) as usize,
        })
    }

    /// Linear index→pixel mapping over the visible window only.
    pub fn index_to_pixel(&self, n: usize, pixel_width: f32) -> IndexMapping {
        let last = n.saturating_sub(1) as f64;
        let start = self.offset * last;
        let end = start + self.visible_fraction() * last;
        IndexMapping {
            scale: ChartScale::new_linear((start, end), (0.0, pixel_width)),
        }
    }

    pub fn label(&self) -> String {
        if self.scale <= 1.0 {
            "1×".to_string()
        } else {
            format!("{:.1}×", self.scale)
        }
    }
}

/// Inclusive index window `[start_idx, end_idx]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexRange {
    pub start_idx: usize,
    pub end_idx: usize,
}

impl IndexRange {
    pub fn len(&self) -> usize {
        self.end_idx - self.start_idx + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, i: usize) -> bool {
        i >= self.start_idx && i <= self.end_idx
    }

    pub fn iter(&self) -> std::ops::RangeInclusive<usize> {
        self.start_idx..=self.end_idx
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let end = (self.end_idx + 1).min(items.len());
        &items[self.start_idx.min(end)..end]
    }
}

/// Index→pixel mapping. Indices outside the visible window land outside
/// `[0, pixel_width]`; callers clip.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IndexMapping {
    scale: ChartScale,
}

impl IndexMapping {
    pub fn map(&self, index: f64) -> f32 {
        self.scale.map(index)
    }

    pub fn invert(&self, pixel: f32) -> f64 {
        self.scale.invert(pixel)
    }

    pub fn as_scale(&self) -> ChartScale {
        self.scale
    }

    /// Pixel distance between two consecutive indices.
    pub fn step(&self) -> f32 {
        (self.map(1.0) - self.map(0.0)).abs()
    }
}

/// Shared viewport: logical date range plus the zoom applied inside it.
#[derive(Clone, Debug)]
pub struct Viewport {
    full: Option<DateRange>,
    range: Option<DateRange>,
    zoom: ZoomState,
    max_scale: f64,
    range_revision: u64,
}

impl Viewport {
    /// `dates` is the ascending day list of the fleet series.
    pub fn new(dates: &[NaiveDate], max_scale: f64) -> Self {
        let full = match (dates.first(), dates.last()) {
            (Some(first), Some(last)) => Some(DateRange::new(*first, *last)),
            _ => None,
        };
        Self {
            full,
            range: full,
            zoom: ZoomState::default(),
            max_scale: max_scale.max(1.0),
            range_revision: 0,
        }
    }

    pub fn full_range(&self) -> Option<DateRange> {
        self.full
    }

    pub fn range(&self) -> Option<DateRange> {
        self.range
    }

    pub fn zoom(&self) -> ZoomState {
        self.zoom
    }

    pub fn max_scale(&self) -> f64 {
        self.max_scale
    }

    /// Bumped on every range change; keys caches derived from the range.
    pub fn range_revision(&self) -> u64 {
        self.range_revision
    }

    /// Sets the logical range: swaps inverted input, clamps to the monitored
    /// span and resets the zoom. Returns the effective range.
    pub fn set_range(&mut self, start: NaiveDate, end: NaiveDate) -> Option<DateRange> {
        let full = self.full?;
        let range = DateRange::new(start, end).clamp_to(&full);
        self.range = Some(range);
        self.zoom = ZoomState::default();
        self.range_revision += 1;
        tracing::debug!(start = %range.start, end = %range.end, "viewport range set");
        Some(range)
    }

    pub fn zoom_at(&mut self, fraction: f64, factor: f64) -> bool {
        self.zoom.zoom_at(fraction, factor, self.max_scale)
    }

    pub fn pan_by(&mut self, delta: f64) -> bool {
        self.zoom.pan_by(delta)
    }

    pub fn pan_from(&mut self, start_offset: f64, delta: f64) -> bool {
        self.zoom.pan_from(start_offset, delta)
    }

    pub fn reset_zoom(&mut self) -> bool {
        self.zoom.reset()
    }

    pub fn visible_index_range(&self, n: usize) -> Option<IndexRange> {
        self.zoom.visible_index_range(n)
    }

    pub fn index_to_pixel(&self, n: usize, pixel_width: f32) -> IndexMapping {
        self.zoom.index_to_pixel(n, pixel_width)
    }
}
