use super::{ChartKind, PlotRenderer, RenderContext, NO_DATA_MESSAGE};
use crate::axis_renderer::AxisRenderer;
use crate::data_types::SeriesPoint;
use crate::scales::{extent, nice_bounds, step_ticks};
use crate::scene::{
    area_path, band_path, line_path, DrawCommand, Fill, HitRegion, HoverTarget, LegendItem,
    LegendSwatch, Rect, Scene, StrokeStyle, Tooltip,
};
use crate::transform::PlotTransform;
use crate::utils::date_formatter::{format_day, DayFormat};

/// Fleet median line over its interquartile band.
pub struct FleetMedianPlot<'a> {
    /// Fleet days inside the selected date range.
    pub points: &'a [SeriesPoint],
}

impl<'a> FleetMedianPlot<'a> {
    pub fn new(points: &'a [SeriesPoint]) -> Self {
        Self { points }
    }

    /// Value bounds over medians and quantiles of `window`.
    pub fn value_bounds(window: &[SeriesPoint]) -> Option<(f64, f64)> {
        extent(
            window
                .iter()
                .flat_map(|p| [Some(p.median), p.q25, p.q75])
                .flatten(),
        )
    }
}

impl PlotRenderer for FleetMedianPlot<'_> {
    fn kind(&self) -> ChartKind {
        ChartKind::FleetMedian
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
        let window = visible.slice(self.points);
        let (min, max) = Self::value_bounds(window).unwrap_or((0.0, 1.0));
        let (lo, hi) = nice_bounds(min, max, ctx.axis.value_step, ctx.axis.fleet_padding);
        let mapping = ctx.zoom.index_to_pixel(n, area.width());
        let transform = PlotTransform::for_index(mapping, (lo, hi), area);

        AxisRenderer::paint_value_grid(
            &mut scene,
            &transform,
            &step_ticks(lo, hi, ctx.axis.tick_step),
            theme,
        );

        let mut medians = Vec::with_capacity(visible.len());
        let mut upper = Vec::new();
        let mut lower = Vec::new();
        for i in visible.iter() {
            let p = &self.points[i];
            medians.push(transform.data_to_screen(i as f64, p.median));
            if let (Some(q25), Some(q75)) = (p.q25, p.q75) {
                upper.push(transform.data_to_screen(i as f64, q75));
                lower.push(transform.data_to_screen(i as f64, q25));
            }
        }

        scene.push(DrawCommand::PushClip(area));
        if upper.len() > 1 {
            scene.push(DrawCommand::Path {
                path: band_path(&upper, &lower),
                fill: Some(Fill::Solid(theme.accent.opacity(0.12))),
                stroke: None,
            });
        }
        scene.push(DrawCommand::Path {
            path: area_path(&medians, transform.baseline()),
            fill: Some(Fill::VerticalGradient {
                color: theme.accent,
                top_opacity: 0.25,
                bottom_opacity: 0.0,
            }),
            stroke: None,
        });
        scene.push(DrawCommand::Path {
            path: line_path(&medians),
            fill: None,
            stroke: Some(StrokeStyle::solid(theme.accent, 2.0)),
        });
        scene.push(DrawCommand::PopClip);

        // One full-height hover column per visible day.
        let step = if n > 1 { mapping.step() } else { area.width() }.max(1.0);
        for (i, anchor) in visible.iter().zip(&medians) {
            if !transform.x_in_view(anchor.x, step / 2.0) {
                continue;
            }
            let p = &self.points[i];
            let left = (anchor.x - step / 2.0).max(area.left());
            let right = (anchor.x + step / 2.0).min(area.right());
            scene.hover_targets.push(HoverTarget {
                region: HitRegion::Rect(Rect::new(left, area.top(), right - left, area.height())),
                anchor: Some(*anchor),
                tooltip: Tooltip {
                    title: format_day(p.date, DayFormat::Long),
                    value: format!("{:.2} {}", p.median, ctx.value_unit),
                    detail: match (p.q25, p.q75) {
                        (Some(q25), Some(q75)) => Some(format!("IQR {q25:.2}–{q75:.2}")),
                        _ => None,
                    },
                    color: theme.accent,
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

        scene.legend.push(LegendItem {
            label: "Median".to_string(),
            color: theme.accent,
            swatch: LegendSwatch::Line,
        });
        scene.legend.push(LegendItem {
            label: "IQR".to_string(),
            color: theme.accent.opacity(0.3),
            swatch: LegendSwatch::Band,
        });
        AxisRenderer::push_zoom_hint(&mut scene, ctx);
        scene
    }
}
