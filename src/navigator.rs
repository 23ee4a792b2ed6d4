//! Minimap brush
//!
//! Always drawn over the full fleet series; the zoom state never reaches it.
//! Handle and band drags produce a new date range, which the caller applies
//! through the viewport like any other range edit.

use crate::data_types::{DateRange, MinimapConfig, SeriesPoint};
use crate::scene::{DrawCommand, Fill, HitRegion, HoverTarget, Rect, Scene, Tooltip};
use crate::theme::ChartTheme;
use crate::utils::date_formatter::{format_day, DayFormat};
use crate::view_controller::ViewController;
use chrono::NaiveDate;
use glam::Vec2;

const IN_RANGE_OPACITY: f32 = 0.55;
const OUT_OF_RANGE_OPACITY: f32 = 0.1;
const HANDLE_WIDTH: f32 = 3.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BrushTarget {
    StartHandle,
    EndHandle,
    Band,
}

/// State captured when a minimap drag starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BrushDrag {
    pub target: BrushTarget,
    pub start_x: f32,
    pub start_idx: usize,
    pub end_idx: usize,
}

/// Day indices `[start, end]` of `range` within the ascending `dates`.
pub fn range_indices(dates: &[NaiveDate], range: &DateRange) -> Option<(usize, usize)> {
    if dates.is_empty() {
        return None;
    }
    let last = dates.len() - 1;
    let start = dates.partition_point(|d| *d < range.start).min(last);
    let end = dates.partition_point(|d| *d <= range.end).saturating_sub(1);
    Some((start, end.max(start)))
}

pub struct Navigator {
    config: MinimapConfig,
    width: f32,
    drag: Option<BrushDrag>,
}

impl Navigator {
    pub fn new(config: MinimapConfig, width: f32) -> Self {
        Self {
            config,
            width,
            drag: None,
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn set_width(&mut self, width: f32) {
        self.width = width.max(0.0);
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn drag(&self) -> Option<&BrushDrag> {
        self.drag.as_ref()
    }

    /// Pixel x of the left and right handles: `start / total` and `(end + 1) / total`.
    pub fn handle_positions(&self, total: usize, start_idx: usize, end_idx: usize) -> (f32, f32) {
        if total == 0 {
            return (0.0, self.width);
        }
        let left = start_idx as f32 / total as f32 * self.width;
        let right = (end_idx + 1) as f32 / total as f32 * self.width;
        (left, right.max(left + self.config.min_selection_width))
    }

    pub fn hit_test(&self, x: f32, dates: &[NaiveDate], range: &DateRange) -> Option<BrushTarget> {
        let (s, e) = range_indices(dates, range)?;
        let (left, right) = self.handle_positions(dates.len(), s, e);
        let reach = self.config.handle_hit_width / 2.0;
        let to_left = (x - left).abs();
        let to_right = (x - right).abs();
        if to_left <= reach || to_right <= reach {
            // Nearest handle wins when both are in reach.
            return Some(if to_left <= to_right {
                BrushTarget::StartHandle
            } else {
                BrushTarget::EndHandle
            });
        }
        (x > left && x < right).then_some(BrushTarget::Band)
    }

    /// Starts a drag when `x` hits a handle or the band.
    pub fn begin_drag(
        &mut self,
        x: f32,
        dates: &[NaiveDate],
        range: &DateRange,
    ) -> Option<BrushTarget> {
        let target = self.hit_test(x, dates, range)?;
        let (start_idx, end_idx) = range_indices(dates, range)?;
        self.drag = Some(BrushDrag {
            target,
            start_x: x,
            start_idx,
            end_idx,
        });
        tracing::debug!(?target, "minimap drag started");
        Some(target)
    }

    /// Range the active drag asks for with the pointer at `x`.
    ///
    /// Handles follow the day under the pointer but never cross each other.
    /// The band moves by whole days and keeps its length, shifted back inside
    /// the series when it would run past either end.
    pub fn drag_to(&self, x: f32, dates: &[NaiveDate]) -> Option<DateRange> {
        let drag = self.drag?;
        let n = dates.len();
        let (start, end) = match drag.target {
            BrushTarget::StartHandle => {
                let idx = ViewController::map_pixels_to_slot(x, self.width, n)?;
                (idx.min(drag.end_idx), drag.end_idx)
            }
            BrushTarget::EndHandle => {
                let idx = ViewController::map_pixels_to_slot(x, self.width, n)?;
                (drag.start_idx, idx.max(drag.start_idx))
            }
            BrushTarget::Band => {
                if n == 0 {
                    return None;
                }
                let span = drag.end_idx - drag.start_idx;
                let delta = ViewController::pixels_to_slot_delta(x - drag.start_x, self.width, n);
                let mut start = (drag.start_idx as i64 + delta).max(0) as usize;
                let mut end = start + span;
                if end >= n {
                    end = n - 1;
                    start = end.saturating_sub(span);
                }
                (start, end)
            }
        };
        Some(DateRange::new(*dates.get(start)?, *dates.get(end)?))
    }

    pub fn end_drag(&mut self) -> bool {
        self.drag.take().is_some()
    }

    /// One bar per fleet day plus the selection band and its handles.
    pub fn render(
        &self,
        fleet: &[SeriesPoint],
        range: Option<DateRange>,
        theme: &ChartTheme,
    ) -> Scene {
        let height = self.config.height;
        let mut scene = Scene::new(self.width, height);
        let n = fleet.len();
        if n == 0 || self.width <= 0.0 {
            return scene;
        }

        let floor = self.config.bar_floor;
        let max_count = fleet.iter().map(SeriesPoint::count_or_zero).max().unwrap_or(0);
        let slot = self.width / n as f32;
        let bar_width = (slot - 1.0).max(1.0);
        for (i, p) in fleet.iter().enumerate() {
            let bar_height = if max_count > 0 {
                p.count_or_zero() as f32 / max_count as f32 * (height - 2.0 * floor) + floor
            } else {
                floor
            };
            let in_range = range.map_or(true, |r| r.contains(p.date));
            let opacity = if in_range {
                IN_RANGE_OPACITY
            } else {
                OUT_OF_RANGE_OPACITY
            };
            let rect = Rect::new(i as f32 * slot, height - bar_height, bar_width, bar_height);
            scene.push(DrawCommand::Rect {
                rect,
                fill: Fill::Solid(theme.accent.opacity(opacity)),
                corner_radius: 0.0,
            });
            scene.hover_targets.push(HoverTarget {
                region: HitRegion::Rect(Rect::new(i as f32 * slot, 0.0, slot, height)),
                anchor: None,
                tooltip: Tooltip {
                    title: format_day(p.date, DayFormat::Long),
                    value: format!("{} detections", p.count_or_zero()),
                    detail: None,
                    color: theme.accent,
                },
            });
        }

        let dates: Vec<NaiveDate> = fleet.iter().map(|p| p.date).collect();
        let Some((s, e)) = range.and_then(|r| range_indices(&dates, &r)) else {
            return scene;
        };
        let (left, right) = self.handle_positions(n, s, e);
        scene.push(DrawCommand::Rect {
            rect: Rect::new(left, 0.0, right - left, height),
            fill: Fill::Solid(theme.accent.opacity(0.08)),
            corner_radius: 0.0,
        });
        for x in [left, right] {
            scene.push(DrawCommand::Rect {
                rect: Rect::new(x - HANDLE_WIDTH / 2.0, 0.0, HANDLE_WIDTH, height),
                fill: Fill::Solid(theme.accent),
                corner_radius: 1.0,
            });
            scene.push(DrawCommand::Circle {
                center: Vec2::new(x, height / 2.0),
                radius: 4.0,
                fill: theme.accent,
                stroke: None,
            });
        }
        scene
    }
}
