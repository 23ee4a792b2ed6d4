use super::{ChartKind, PlotRenderer, RenderContext, NO_DATA_MESSAGE};
use crate::axis_renderer::AxisRenderer;
use crate::data_types::SeriesPoint;
use crate::scales::count_ticks;
use crate::scene::{DrawCommand, Fill, HitRegion, HoverTarget, Rect, Scene, Tooltip};
use crate::transform::PlotTransform;
use crate::utils::date_formatter::{format_day, DayFormat};

/// Share of the per-day slot covered by a bar.
const BAR_WIDTH_PCT: f32 = 0.72;

/// Daily detection counts of the fleet as vertical bars.
pub struct DetectionsPlot<'a> {
    pub points: &'a [SeriesPoint],
}

impl<'a> DetectionsPlot<'a> {
    pub fn new(points: &'a [SeriesPoint]) -> Self {
        Self { points }
    }
}

impl PlotRenderer for DetectionsPlot<'_> {
    fn kind(&self) -> ChartKind {
        ChartKind::Detections
    }

    fn render(&self, ctx: &RenderContext) -> Scene {
        let mut scene = ctx.scene();
        let theme = ctx.theme;
        let n = self.points.len();
        let Some(visible) = ctx.zoom.visible_index_range(n) else {
            AxisRenderer::paint_placeholder(&mut scene, NO_DATA_MESSAGE, theme);
            return scene;
        };

        let area = ctx.plot_area();
        let max_count = visible
            .slice(self.points)
            .iter()
            .map(SeriesPoint::count_or_zero)
            .max()
            .unwrap_or(0) as f64;
        let transform = PlotTransform::for_index(
            ctx.zoom.index_to_pixel(n, area.width()),
            (0.0, (max_count * ctx.axis.count_headroom).max(1.0)),
            area,
        );

        AxisRenderer::paint_value_grid(&mut scene, &transform, &count_ticks(max_count), theme);

        // Edge bars may straddle the plot area and get clipped.
        let bar_width = (area.width() / visible.len() as f32 * BAR_WIDTH_PCT).max(1.0);
        scene.push(DrawCommand::PushClip(area));
        for i in visible.iter() {
            let p = &self.points[i];
            let x = transform.x_data_to_screen(i as f64);
            let top = transform.y_data_to_screen(p.count_or_zero() as f64);
            let rect = Rect::new(x - bar_width / 2.0, top, bar_width, transform.baseline() - top);
            scene.push(DrawCommand::Rect {
                rect,
                fill: Fill::Solid(theme.accent_secondary.opacity(0.8)),
                corner_radius: 2.0,
            });
            scene.hover_targets.push(HoverTarget {
                region: HitRegion::Rect(Rect::new(
                    x - bar_width / 2.0,
                    area.top(),
                    bar_width,
                    area.height(),
                )),
                anchor: None,
                tooltip: Tooltip {
                    title: format_day(p.date, DayFormat::Long),
                    value: format!("{} detections", p.count_or_zero()),
                    detail: None,
                    color: theme.accent_secondary,
                },
            });
        }
        scene.push(DrawCommand::PopClip);

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
        scene
    }
}
