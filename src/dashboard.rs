//! Redraw orchestrator
//!
//! [`Dashboard`] is the context object the host talks to. It owns the snapshot,
//! the shared [`Viewport`], the gesture controller, the minimap brush and the
//! redraw scheduler, and rebuilds every chart scene in a fixed order whenever
//! the state changes.

use crate::data_types::{
    find_date, slice_in_range, AnomalyRecord, DashboardConfig, DateRange, EntityId, Margins,
    RangePreset, SeriesPoint, Snapshot,
};
use crate::gesture::{CursorAffordance, GestureController, GestureResponse};
use crate::navigator::Navigator;
use crate::plot_types::{
    ChartKind, ComparisonPlot, DetectionsPlot, DistributionPlot, EntityPlot, FleetMedianPlot,
    OverlaySeries, PlotRenderer, RenderContext, Surface,
};
use crate::scene::Scene;
use crate::scheduler::RedrawScheduler;
use crate::summary::Summary;
use crate::theme::ChartTheme;
use crate::viewport::{Viewport, ZoomState};
use chrono::NaiveDate;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Instant;

/// Where a pointer event happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerTarget {
    Chart(ChartKind),
    Minimap,
}

/// Attachment points of every chart and of the minimap.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Surfaces {
    pub fleet: Surface,
    pub entity: Surface,
    pub distribution: Surface,
    pub detections: Surface,
    pub comparison: Surface,
    pub minimap: Surface,
}

impl Default for Surfaces {
    fn default() -> Self {
        Self {
            fleet: Surface::new(720.0, 220.0),
            entity: Surface::new(720.0, 200.0),
            distribution: Surface::new(360.0, 200.0),
            detections: Surface::new(360.0, 200.0),
            comparison: Surface::new(720.0, 220.0),
            minimap: Surface::new(720.0, 40.0),
        }
    }
}

impl Surfaces {
    pub fn chart(&self, kind: ChartKind) -> Surface {
        match kind {
            ChartKind::FleetMedian => self.fleet,
            ChartKind::Entity => self.entity,
            ChartKind::Distribution => self.distribution,
            ChartKind::Detections => self.detections,
            ChartKind::Comparison => self.comparison,
        }
    }

    fn chart_mut(&mut self, kind: ChartKind) -> &mut Surface {
        match kind {
            ChartKind::FleetMedian => &mut self.fleet,
            ChartKind::Entity => &mut self.entity,
            ChartKind::Distribution => &mut self.distribution,
            ChartKind::Detections => &mut self.detections,
            ChartKind::Comparison => &mut self.comparison,
        }
    }
}

/// Render timings shared with the host (chart -> nanoseconds of its last render).
#[derive(Clone, Debug, Default)]
pub struct RenderStats {
    pub chart_render_times: Arc<RwLock<HashMap<ChartKind, u64>>>,
    passes: Arc<RwLock<u64>>,
}

impl RenderStats {
    pub fn record(&self, kind: ChartKind, nanos: u64) {
        self.chart_render_times.write().insert(kind, nanos);
    }

    pub fn chart_nanos(&self, kind: ChartKind) -> Option<u64> {
        self.chart_render_times.read().get(&kind).copied()
    }

    pub fn total_render_nanos(&self) -> u64 {
        self.chart_render_times.read().values().sum()
    }

    pub fn passes(&self) -> u64 {
        *self.passes.read()
    }

    fn finish_pass(&self) {
        *self.passes.write() += 1;
    }
}

/// Read-outs for the controls around the charts.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ControlsState {
    pub range: Option<DateRange>,
    pub range_label: String,
    pub zoom: ZoomState,
    pub zoom_label: String,
    pub active_preset: Option<RangePreset>,
    pub selected_entity: Option<EntityId>,
    pub comparison: Vec<EntityId>,
    pub anomalies_in_range: usize,
}

/// Output of one redraw pass.
#[derive(Clone, Debug, Default)]
pub struct Frame {
    pub charts: BTreeMap<ChartKind, Scene>,
    pub minimap: Scene,
    pub summary: Summary,
    pub controls: ControlsState,
    /// Number of redraw passes so far.
    pub revision: u64,
}

impl Frame {
    pub fn chart(&self, kind: ChartKind) -> Option<&Scene> {
        self.charts.get(&kind)
    }
}

pub struct Dashboard {
    snapshot: Snapshot,
    dates: Vec<NaiveDate>,
    config: DashboardConfig,
    theme: ChartTheme,
    surfaces: Surfaces,
    viewport: Viewport,
    gestures: GestureController,
    scheduler: RedrawScheduler,
    navigator: Navigator,
    selected_entity: Option<EntityId>,
    comparison: Vec<EntityId>,
    active_preset: Option<RangePreset>,
    stats: RenderStats,
    frame: Frame,
}

impl Dashboard {
    /// Binds the gesture views once and draws the first frame.
    pub fn new(snapshot: Snapshot, surfaces: Surfaces, config: DashboardConfig) -> Self {
        let dates = snapshot.fleet_dates();
        let viewport = Viewport::new(&dates, config.zoom.max_scale);
        let mut gestures = GestureController::new(config.zoom.wheel_factor);
        for kind in ChartKind::ALL.into_iter().filter(|k| k.takes_gestures()) {
            let area = surfaces.chart(kind).plot_area(&Self::margins(&config, kind));
            gestures.register(kind.view_id(), area);
        }
        let navigator = Navigator::new(config.minimap.clone(), surfaces.minimap.width);
        let selected_entity = snapshot.entity_ids.first().copied();

        let mut dashboard = Self {
            snapshot,
            dates,
            config,
            theme: ChartTheme::default(),
            surfaces,
            viewport,
            gestures,
            scheduler: RedrawScheduler::new(),
            navigator,
            selected_entity,
            comparison: Vec::new(),
            active_preset: Some(RangePreset::All),
            stats: RenderStats::default(),
            frame: Frame::default(),
        };
        dashboard.comparison = dashboard.default_comparison();
        dashboard.redraw_all();
        dashboard
    }

    pub fn with_theme(mut self, theme: ChartTheme) -> Self {
        self.theme = theme;
        self.redraw_all();
        self
    }

    fn margins(config: &DashboardConfig, kind: ChartKind) -> Margins {
        match kind {
            ChartKind::Distribution | ChartKind::Detections => config.bar_margins,
            _ => config.series_margins,
        }
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn range(&self) -> Option<DateRange> {
        self.viewport.range()
    }

    pub fn zoom(&self) -> ZoomState {
        self.viewport.zoom()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn theme(&self) -> &ChartTheme {
        &self.theme
    }

    pub fn surfaces(&self) -> &Surfaces {
        &self.surfaces
    }

    pub fn gestures(&self) -> &GestureController {
        &self.gestures
    }

    pub fn scheduler(&self) -> &RedrawScheduler {
        &self.scheduler
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn stats(&self) -> &RenderStats {
        &self.stats
    }

    pub fn active_preset(&self) -> Option<RangePreset> {
        self.active_preset
    }

    pub fn selected_entity(&self) -> Option<EntityId> {
        self.selected_entity
    }

    /// Plotting area of a chart, in its surface's coordinates.
    pub fn plot_area(&self, kind: ChartKind) -> crate::scene::Rect {
        self.surfaces
            .chart(kind)
            .plot_area(&Self::margins(&self.config, kind))
    }

    // --- Redraw -----------------------------------------------------------

    /// Rebuilds the summary, the read-outs, the minimap and every chart, in
    /// that order. Work per chart is bounded by its visible window.
    pub fn redraw_all(&mut self) {
        let started = Instant::now();
        let range = self.viewport.range();
        let zoom = self.viewport.zoom();
        let fleet_window: &[SeriesPoint] = match range {
            Some(r) => slice_in_range(&self.snapshot.fleet_daily, &r),
            None => &[],
        };

        let summary = Summary::compute(fleet_window, range, &self.snapshot.summary);
        let controls = self.controls_state();
        let minimap = self
            .navigator
            .render(&self.snapshot.fleet_daily, range, &self.theme);

        let mut charts = BTreeMap::new();
        for kind in ChartKind::ALL {
            let ctx = RenderContext {
                surface: self.surfaces.chart(kind),
                margins: Self::margins(&self.config, kind),
                theme: &self.theme,
                axis: &self.config.axis,
                zoom,
                value_unit: &self.config.value_unit,
            };
            let chart_start = Instant::now();
            let scene = self.render_chart(kind, fleet_window, range, &ctx);
            let nanos = chart_start.elapsed().as_nanos() as u64;
            self.stats.record(kind, nanos);
            tracing::trace!(chart = ?kind, nanos, "chart rendered");
            charts.insert(kind, scene);
        }

        self.frame = Frame {
            charts,
            minimap,
            summary,
            controls,
            revision: self.frame.revision + 1,
        };
        self.stats.finish_pass();
        tracing::trace!(
            revision = self.frame.revision,
            elapsed = ?started.elapsed(),
            "redraw pass complete"
        );
    }

    /// Display-loop callback. Runs the coalesced redraw if one is pending.
    pub fn on_frame(&mut self) -> bool {
        if !self.scheduler.take() {
            return false;
        }
        self.redraw_all();
        true
    }

    fn render_chart(
        &self,
        kind: ChartKind,
        fleet_window: &[SeriesPoint],
        range: Option<DateRange>,
        ctx: &RenderContext,
    ) -> Scene {
        match kind {
            ChartKind::FleetMedian => FleetMedianPlot::new(fleet_window).render(ctx),
            ChartKind::Entity => {
                let points = self
                    .selected_entity
                    .and_then(|id| self.snapshot.entity_series(id))
                    .zip(range)
                    .map_or(&[][..], |(points, r)| slice_in_range(points, &r));
                EntityPlot::new(self.selected_entity, points).render(ctx)
            }
            ChartKind::Distribution => {
                let (date, values) = self.distribution_values(fleet_window, ctx.zoom);
                DistributionPlot::new(date, values).render(ctx)
            }
            ChartKind::Detections => DetectionsPlot::new(fleet_window).render(ctx),
            ChartKind::Comparison => ComparisonPlot::new(self.overlay_series(range)).render(ctx),
        }
    }

    /// Entity medians on the latest visible fleet day.
    fn distribution_values(
        &self,
        fleet_window: &[SeriesPoint],
        zoom: ZoomState,
    ) -> (Option<NaiveDate>, Vec<f64>) {
        let Some(visible) = zoom.visible_index_range(fleet_window.len()) else {
            return (None, vec![]);
        };
        let date = fleet_window[visible.end_idx].date;
        let values = self
            .snapshot
            .entity_ids
            .iter()
            .filter_map(|id| self.snapshot.entity_series(*id))
            .filter_map(|points| find_date(points, date).map(|k| points[k].median))
            .filter(|v| v.is_finite())
            .collect();
        (Some(date), values)
    }

    fn overlay_series(&self, range: Option<DateRange>) -> Vec<OverlaySeries<'_>> {
        let Some(range) = range else {
            return vec![];
        };
        self.comparison_selection()
            .into_iter()
            .filter_map(|id| {
                let Some(points) = self.snapshot.entity_series(id) else {
                    tracing::debug!(entity = id, "no series for compared entity, skipping");
                    return None;
                };
                let position = self.snapshot.entity_position(id).unwrap_or(0);
                Some(OverlaySeries {
                    id,
                    color: self.theme.palette_color(position),
                    points: slice_in_range(points, &range),
                })
            })
            .collect()
    }

    fn controls_state(&self) -> ControlsState {
        let range = self.viewport.range();
        let zoom = self.viewport.zoom();
        ControlsState {
            range,
            range_label: range.map(|r| r.label()).unwrap_or_default(),
            zoom,
            zoom_label: zoom.label(),
            active_preset: self.active_preset,
            selected_entity: self.selected_entity,
            comparison: self.comparison_selection(),
            anomalies_in_range: self.anomalies_in_range().len(),
        }
    }

    // --- Range controls ---------------------------------------------------

    /// Range edit from the inputs or the shell. Inverted input is swapped; the
    /// zoom resets and everything redraws right away.
    pub fn apply_range_change(&mut self, start: NaiveDate, end: NaiveDate) -> Option<DateRange> {
        let range = self.viewport.set_range(start, end)?;
        self.active_preset = None;
        self.redraw_all();
        Some(range)
    }

    pub fn set_range_start(&mut self, start: NaiveDate) -> Option<DateRange> {
        let end = self.viewport.range()?.end;
        self.apply_range_change(start, end)
    }

    pub fn set_range_end(&mut self, end: NaiveDate) -> Option<DateRange> {
        let start = self.viewport.range()?.start;
        self.apply_range_change(start, end)
    }

    pub fn apply_preset(&mut self, preset: RangePreset) -> Option<DateRange> {
        let wanted = preset.resolve(&self.dates)?;
        let range = self.viewport.set_range(wanted.start, wanted.end)?;
        self.active_preset = Some(preset);
        tracing::debug!(preset = %preset.label(), "range preset applied");
        self.redraw_all();
        Some(range)
    }

    /// Records in the selected range.
    pub fn anomalies_in_range(&self) -> Vec<&AnomalyRecord> {
        let Some(range) = self.viewport.range() else {
            return vec![];
        };
        self.snapshot
            .anomalies
            .iter()
            .filter(|a| range.contains(a.date))
            .collect()
    }

    // --- Zoom buttons -----------------------------------------------------

    fn schedule_if(&mut self, changed: bool) -> GestureResponse {
        if changed {
            GestureResponse::handled(self.scheduler.request())
        } else {
            GestureResponse::handled(false)
        }
    }

    /// Zooms in around the centre of the plotting area.
    pub fn zoom_in(&mut self) -> GestureResponse {
        let changed = self.viewport.zoom_at(0.5, self.config.zoom.step_factor);
        self.schedule_if(changed)
    }

    pub fn zoom_out(&mut self) -> GestureResponse {
        let changed = self
            .viewport
            .zoom_at(0.5, 1.0 / self.config.zoom.step_factor);
        self.schedule_if(changed)
    }

    pub fn reset_zoom(&mut self) -> GestureResponse {
        let changed = self.viewport.reset_zoom();
        self.schedule_if(changed)
    }

    pub fn pan_left(&mut self) -> GestureResponse {
        let changed = self.viewport.pan_by(-self.config.zoom.pan_step);
        self.schedule_if(changed)
    }

    pub fn pan_right(&mut self) -> GestureResponse {
        let changed = self.viewport.pan_by(self.config.zoom.pan_step);
        self.schedule_if(changed)
    }

    // --- Pointer routing --------------------------------------------------
    //
    // `x` is always relative to the target's own surface.

    pub fn wheel(&mut self, target: PointerTarget, x: f32, delta_y: f32) -> GestureResponse {
        match target {
            PointerTarget::Chart(kind) => self.gestures.wheel(
                &mut self.viewport,
                &mut self.scheduler,
                kind.view_id(),
                x,
                delta_y,
            ),
            PointerTarget::Minimap => GestureResponse::IGNORED,
        }
    }

    pub fn pointer_down(&mut self, target: PointerTarget, x: f32) -> GestureResponse {
        match target {
            PointerTarget::Chart(_) if self.navigator.is_dragging() => GestureResponse::IGNORED,
            PointerTarget::Chart(kind) => {
                self.gestures
                    .pointer_down(&self.viewport, kind.view_id(), x)
            }
            PointerTarget::Minimap => {
                if self.gestures.is_dragging() {
                    return GestureResponse::IGNORED;
                }
                let Some(range) = self.viewport.range() else {
                    return GestureResponse::IGNORED;
                };
                match self.navigator.begin_drag(x, &self.dates, &range) {
                    Some(_) => GestureResponse::handled(false),
                    None => GestureResponse::IGNORED,
                }
            }
        }
    }

    /// Only the target that started the active drag is listened to.
    pub fn pointer_move(&mut self, target: PointerTarget, x: f32) -> GestureResponse {
        if self.navigator.is_dragging() {
            if target != PointerTarget::Minimap {
                return GestureResponse::IGNORED;
            }
            return self.brush_to(x);
        }
        match target {
            PointerTarget::Chart(kind)
                if self
                    .gestures
                    .session()
                    .is_some_and(|s| s.view == kind.view_id()) =>
            {
                self.gestures
                    .pointer_move(&mut self.viewport, &mut self.scheduler, x)
            }
            _ => GestureResponse::IGNORED,
        }
    }

    pub fn pointer_up(&mut self) -> GestureResponse {
        if self.navigator.end_drag() {
            return GestureResponse::handled(false);
        }
        self.gestures.pointer_up()
    }

    /// Minimap edits apply and redraw immediately.
    fn brush_to(&mut self, x: f32) -> GestureResponse {
        let Some(next) = self.navigator.drag_to(x, &self.dates) else {
            return GestureResponse::handled(false);
        };
        if self.viewport.range() == Some(next) {
            return GestureResponse::handled(false);
        }
        self.viewport.set_range(next.start, next.end);
        self.active_preset = None;
        self.redraw_all();
        GestureResponse::handled(false)
    }

    pub fn cursor(&self, target: PointerTarget) -> CursorAffordance {
        match target {
            PointerTarget::Chart(kind) => self.gestures.cursor(kind.view_id(), &self.viewport),
            PointerTarget::Minimap if self.navigator.is_dragging() => CursorAffordance::Grabbing,
            PointerTarget::Minimap => CursorAffordance::Default,
        }
    }

    // --- Selection --------------------------------------------------------

    pub fn select_entity(&mut self, id: EntityId) -> bool {
        if self.snapshot.entity_position(id).is_none() {
            tracing::warn!(entity = id, "unknown entity id");
            return false;
        }
        if self.selected_entity == Some(id) {
            return false;
        }
        self.selected_entity = Some(id);
        tracing::debug!(entity = id, "entity selected");
        self.redraw_all();
        true
    }

    fn palette_size(&self) -> usize {
        self.theme.palette.len().max(1)
    }

    fn default_comparison(&self) -> Vec<EntityId> {
        let n = self.config.overlay.default_selection.min(self.palette_size());
        self.snapshot.entity_ids.iter().take(n).copied().collect()
    }

    /// The compared entities, ordered by their position in the id list. An
    /// empty selection falls back to the leading ids.
    pub fn comparison_selection(&self) -> Vec<EntityId> {
        if self.comparison.is_empty() {
            self.default_comparison()
        } else {
            self.comparison.clone()
        }
    }

    /// Adds or removes one entity. Adding fails once the palette is exhausted.
    pub fn toggle_comparison(&mut self, id: EntityId) -> bool {
        if self.snapshot.entity_position(id).is_none() {
            tracing::warn!(entity = id, "unknown comparison id");
            return false;
        }
        let mut selection = self.comparison_selection();
        if let Some(i) = selection.iter().position(|e| *e == id) {
            selection.remove(i);
        } else if selection.len() >= self.palette_size() {
            tracing::debug!(entity = id, "comparison is full");
            return false;
        } else {
            selection.push(id);
        }
        self.set_selection(selection);
        true
    }

    /// Replaces the selection. Unknown ids are dropped; the rest is capped at
    /// the palette size.
    pub fn set_comparison(&mut self, ids: impl IntoIterator<Item = EntityId>) {
        let selection = ids
            .into_iter()
            .filter(|id| {
                let known = self.snapshot.entity_position(*id).is_some();
                if !known {
                    tracing::warn!(entity = id, "unknown comparison id");
                }
                known
            })
            .collect();
        self.set_selection(selection);
    }

    fn set_selection(&mut self, mut selection: Vec<EntityId>) {
        selection.sort_by_key(|id| self.snapshot.entity_position(*id));
        selection.dedup();
        selection.truncate(self.palette_size());
        tracing::debug!(?selection, "comparison selection changed");
        self.comparison = selection;
        self.redraw_all();
    }

    // --- Layout -----------------------------------------------------------

    pub fn resize(&mut self, target: PointerTarget, surface: Surface) {
        match target {
            PointerTarget::Chart(kind) => {
                *self.surfaces.chart_mut(kind) = surface;
                let area = surface.plot_area(&Self::margins(&self.config, kind));
                self.gestures.update_plot_area(kind.view_id(), area);
            }
            PointerTarget::Minimap => {
                self.surfaces.minimap = surface;
                self.navigator.set_width(surface.width);
            }
        }
        self.redraw_all();
    }
}
