use super::{ChartKind, PlotRenderer, RenderContext, NO_SELECTION_MESSAGE};
use crate::axis_renderer::AxisRenderer;
use crate::data_types::{find_date, EntityId, SeriesPoint};
use crate::scales::{extent, nice_bounds, step_ticks};
use crate::scene::{
    segmented_line_path, Color, DrawCommand, HitRegion, HoverTarget, LegendItem, LegendSwatch,
    Scene, StrokeStyle, Tooltip,
};
use crate::transform::PlotTransform;
use crate::utils::date_formatter::{format_day, DayFormat};
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// One compared entity, already restricted to the selected date range.
#[derive(Clone, Debug)]
pub struct OverlaySeries<'a> {
    pub id: EntityId,
    pub color: Color,
    pub points: &'a [SeriesPoint],
}

/// Sorted, deduplicated union of the days of every series.
pub fn union_dates(series: &[OverlaySeries]) -> Vec<NaiveDate> {
    series
        .iter()
        .flat_map(|s| s.points.iter().map(|p| p.date))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Several entities on one shared date axis.
///
/// Each series is sampled at every day of the union axis; a day the entity
/// was not measured breaks its line instead of being bridged.
pub struct ComparisonPlot<'a> {
    pub series: Vec<OverlaySeries<'a>>,
}

impl<'a> ComparisonPlot<'a> {
    pub fn new(series: Vec<OverlaySeries<'a>>) -> Self {
        Self { series }
    }
}

impl PlotRenderer for ComparisonPlot<'_> {
    fn kind(&self) -> ChartKind {
        ChartKind::Comparison
    }

    fn render(&self, ctx: &RenderContext) -> Scene {
        let mut scene = ctx.scene();
        let theme = ctx.theme;
        let axis = union_dates(&self.series);
        let n = axis.len();
        let Some(visible) = ctx.zoom.visible_index_range(n) else {
            AxisRenderer::paint_placeholder(&mut scene, NO_SELECTION_MESSAGE, theme);
            return scene;
        };
        let visible_days = visible.slice(&axis);

        // Per series, the value at each visible day of the union axis.
        let samples: Vec<Vec<Option<f64>>> = self
            .series
            .iter()
            .map(|s| {
                visible_days
                    .iter()
                    .map(|d| find_date(s.points, *d).map(|k| s.points[k].median))
                    .collect()
            })
            .collect();

        let area = ctx.plot_area();
        let (min, max) = extent(samples.iter().flatten().flatten().copied()).unwrap_or((0.0, 1.0));
        let (lo, hi) = nice_bounds(min, max, ctx.axis.value_step, ctx.axis.entity_padding);
        let transform =
            PlotTransform::for_index(ctx.zoom.index_to_pixel(n, area.width()), (lo, hi), area);

        AxisRenderer::paint_value_grid(
            &mut scene,
            &transform,
            &step_ticks(lo, hi, ctx.axis.tick_step),
            theme,
        );

        scene.push(DrawCommand::PushClip(area));
        for (series, values) in self.series.iter().zip(&samples) {
            if values.iter().all(Option::is_none) {
                continue;
            }
            let positions: Vec<_> = visible
                .iter()
                .zip(values)
                .map(|(i, v)| v.map(|v| transform.data_to_screen(i as f64, v)))
                .collect();
            scene.push(DrawCommand::Path {
                path: segmented_line_path(positions.iter().copied()),
                fill: None,
                stroke: Some(StrokeStyle::solid(series.color, 1.5)),
            });
            for (day, center) in visible_days.iter().zip(&positions) {
                let Some(center) = center else {
                    continue;
                };
                scene.push(DrawCommand::Circle {
                    center: *center,
                    radius: 2.5,
                    fill: series.color,
                    stroke: None,
                });
                if let Some(k) = find_date(series.points, *day) {
                    scene.hover_targets.push(HoverTarget {
                        region: HitRegion::Circle {
                            center: *center,
                            radius: 7.0,
                        },
                        anchor: Some(*center),
                        tooltip: Tooltip {
                            title: format!("#{} · {}", series.id, format_day(*day, DayFormat::Long)),
                            value: format!("{:.2} {}", series.points[k].median, ctx.value_unit),
                            detail: None,
                            color: series.color,
                        },
                    });
                }
            }
            scene.legend.push(LegendItem {
                label: format!("#{}", series.id),
                color: series.color,
                swatch: LegendSwatch::Line,
            });
        }
        scene.push(DrawCommand::PopClip);

        AxisRenderer::paint_date_labels(
            &mut scene,
            &transform,
            |i| axis.get(i).copied(),
            visible,
            ctx.axis.date_labels,
            theme,
        );
        AxisRenderer::paint_x_axis_line(&mut scene, area, theme);
        AxisRenderer::paint_zoom_bar(&mut scene, area, ctx.zoom, theme);
        AxisRenderer::push_zoom_hint(&mut scene, ctx);
        scene
    }
}
