use super::{ChartKind, PlotRenderer, RenderContext, NO_DATA_MESSAGE};
use crate::axis_renderer::AxisRenderer;
use crate::data_types::{EntityId, SeriesPoint};
use crate::scales::{extent, nice_bounds, step_ticks};
use crate::scene::{
    area_path, line_path, DrawCommand, Fill, HitRegion, HoverTarget, LegendItem, LegendSwatch,
    Scene, StrokeStyle, Tooltip,
};
use crate::transform::PlotTransform;
use crate::utils::date_formatter::{format_day, DayFormat};

const POINT_RADIUS: f32 = 3.0;
const HOVER_RADIUS: f32 = 8.0;

/// Median history of a single entity, one dot per measured day.
pub struct EntityPlot<'a> {
    pub id: Option<EntityId>,
    /// The entity's days inside the selected date range.
    pub points: &'a [SeriesPoint],
}

impl<'a> EntityPlot<'a> {
    pub fn new(id: Option<EntityId>, points: &'a [SeriesPoint]) -> Self {
        Self { id, points }
    }

    pub fn caption(&self) -> Option<String> {
        self.id
            .map(|id| format!("#{id} · {} days in range", self.points.len()))
    }
}

impl PlotRenderer for EntityPlot<'_> {
    fn kind(&self) -> ChartKind {
        ChartKind::Entity
    }

    fn render(&self, ctx: &RenderContext) -> Scene {
        let mut scene = ctx.scene();
        let theme = ctx.theme;
        scene.caption = self.caption();
        let n = self.points.len();
        let Some(visible) = ctx.zoom.visible_index_range(n) else {
            AxisRenderer::paint_placeholder(&mut scene, NO_DATA_MESSAGE, theme);
            return scene;
        };

        let area = ctx.plot_area();
        let window = visible.slice(self.points);
        let (min, max) = extent(window.iter().map(|p| p.median)).unwrap_or((0.0, 1.0));
        let (lo, hi) = nice_bounds(min, max, ctx.axis.value_step, ctx.axis.entity_padding);
        let transform =
            PlotTransform::for_index(ctx.zoom.index_to_pixel(n, area.width()), (lo, hi), area);

        AxisRenderer::paint_value_grid(
            &mut scene,
            &transform,
            &step_ticks(lo, hi, ctx.axis.tick_step),
            theme,
        );

        let points: Vec<_> = visible
            .iter()
            .map(|i| transform.data_to_screen(i as f64, self.points[i].median))
            .collect();

        scene.push(DrawCommand::PushClip(area));
        scene.push(DrawCommand::Path {
            path: area_path(&points, transform.baseline()),
            fill: Some(Fill::VerticalGradient {
                color: theme.accent_secondary,
                top_opacity: 0.2,
                bottom_opacity: 0.0,
            }),
            stroke: None,
        });
        scene.push(DrawCommand::Path {
            path: line_path(&points),
            fill: None,
            stroke: Some(StrokeStyle::solid(theme.accent_secondary, 1.5)),
        });
        for center in &points {
            scene.push(DrawCommand::Circle {
                center: *center,
                radius: POINT_RADIUS,
                fill: theme.accent_secondary,
                stroke: Some(StrokeStyle::solid(theme.point_outline, 1.5)),
            });
        }
        scene.push(DrawCommand::PopClip);

        for (i, center) in visible.iter().zip(&points) {
            if !transform.x_in_view(center.x, 0.0) {
                continue;
            }
            let p = &self.points[i];
            scene.hover_targets.push(HoverTarget {
                region: HitRegion::Circle {
                    center: *center,
                    radius: HOVER_RADIUS,
                },
                anchor: Some(*center),
                tooltip: Tooltip {
                    title: format_day(p.date, DayFormat::Long),
                    value: format!("{:.2} {}", p.median, ctx.value_unit),
                    detail: p.count.map(|c| format!("{c} measurements")),
                    color: theme.accent_secondary,
                },
            });
        }

        AxisRenderer::paint_date_labels(
            &mut scene,
            &transform,
            |i| self.points.get(i).map(|p| p.date),
            visible,
            ctx.axis.date_labels,
            theme,
        );
        AxisRenderer::paint_x_axis_line(&mut scene, area, theme);
        AxisRenderer::paint_zoom_bar(&mut scene, area, ctx.zoom, theme);

        if let Some(id) = self.id {
            scene.legend.push(LegendItem {
                label: format!("#{id}"),
                color: theme.accent_secondary,
                swatch: LegendSwatch::Line,
            });
        }
        AxisRenderer::push_zoom_hint(&mut scene, ctx);
        scene
    }
}
