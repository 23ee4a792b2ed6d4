use super::{ChartKind, PlotRenderer, RenderContext, NO_DATA_MESSAGE};
use crate::axis_renderer::AxisRenderer;
use crate::scales::{count_ticks, extent, ChartScale};
use crate::scene::{
    DrawCommand, Fill, HitRegion, HoverTarget, Rect, Scene, StrokeStyle, TextAnchor, Tooltip,
};
use crate::transform::PlotTransform;
use crate::utils::date_formatter::{format_day, DayFormat};
use chrono::NaiveDate;
use glam::Vec2;

/// Half-open value interval `[x0, x1)` (the last bin also holds its upper edge).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bin {
    pub x0: f64,
    pub x1: f64,
    pub count: usize,
}

/// Equal-width binning over the extent of `values`.
///
/// The bin count is the number of values clamped to `[min_bins, max_bins]`.
/// When every value is identical the bin width falls back to 1. Non-finite
/// values are ignored; every finite value lands in exactly one bin.
pub fn bin_values(values: &[f64], min_bins: usize, max_bins: usize) -> Vec<Bin> {
    let Some((min, max)) = extent(values.iter().copied()) else {
        return vec![];
    };
    let bins = values.len().clamp(min_bins.max(1), max_bins.max(min_bins).max(1));
    let width = if max > min { (max - min) / bins as f64 } else { 1.0 };

    let mut out: Vec<Bin> = (0..bins)
        .map(|k| Bin {
            x0: min + k as f64 * width,
            x1: min + (k + 1) as f64 * width,
            count: 0,
        })
        .collect();
    for v in values.iter().filter(|v| v.is_finite()) {
        let k = (((v - min) / width).floor() as usize).min(bins - 1);
        out[k].count += 1;
    }
    out
}

/// Distribution of entity medians on one day.
pub struct DistributionPlot {
    pub date: Option<NaiveDate>,
    pub values: Vec<f64>,
}

impl DistributionPlot {
    pub fn new(date: Option<NaiveDate>, values: Vec<f64>) -> Self {
        Self { date, values }
    }

    pub fn mean(&self) -> Option<f64> {
        let finite: Vec<f64> = self.values.iter().copied().filter(|v| v.is_finite()).collect();
        (!finite.is_empty()).then(|| finite.iter().sum::<f64>() / finite.len() as f64)
    }
}

impl PlotRenderer for DistributionPlot {
    fn kind(&self) -> ChartKind {
        ChartKind::Distribution
    }

    fn render(&self, ctx: &RenderContext) -> Scene {
        let mut scene = ctx.scene();
        let theme = ctx.theme;
        scene.caption = self.date.map(|d| format_day(d, DayFormat::Long));

        let bins = bin_values(&self.values, ctx.axis.min_bins, ctx.axis.max_bins);
        let (Some(first), Some(mean)) = (bins.first(), self.mean()) else {
            AxisRenderer::paint_placeholder(&mut scene, NO_DATA_MESSAGE, theme);
            return scene;
        };
        let last_filled = bins
            .iter()
            .rev()
            .find(|b| b.count > 0)
            .map_or(first.x1, |b| b.x1);
        let max_count = bins.iter().map(|b| b.count).max().unwrap_or(0) as f64;

        let area = ctx.plot_area();
        let transform = PlotTransform::new(
            ChartScale::new_linear((first.x0 - 0.1, last_filled + 0.1), (0.0, area.width())),
            ChartScale::new_linear(
                (0.0, (max_count * ctx.axis.histogram_headroom).max(1.0)),
                (area.height(), 0.0),
            ),
            area,
        );

        AxisRenderer::paint_value_grid(&mut scene, &transform, &count_ticks(max_count), theme);

        scene.push(DrawCommand::PushClip(area));
        for bin in bins.iter().filter(|b| b.count > 0) {
            let left = transform.x_data_to_screen(bin.x0) + 1.0;
            let right = transform.x_data_to_screen(bin.x1) - 1.0;
            let top = transform.y_data_to_screen(bin.count as f64);
            let rect = Rect::new(left, top, (right - left).max(1.0), transform.baseline() - top);
            scene.push(DrawCommand::Rect {
                rect,
                fill: Fill::Solid(theme.accent_tertiary.opacity(0.75)),
                corner_radius: 2.0,
            });
            scene.hover_targets.push(HoverTarget {
                region: HitRegion::Rect(rect),
                anchor: None,
                tooltip: Tooltip {
                    title: format!("{:.2}–{:.2} {}", bin.x0, bin.x1, ctx.value_unit),
                    value: format!("{} entities", bin.count),
                    detail: None,
                    color: theme.accent_tertiary,
                },
            });
        }

        let mean_x = transform.x_data_to_screen(mean);
        scene.push(DrawCommand::Line {
            from: Vec2::new(mean_x, area.top()),
            to: Vec2::new(mean_x, area.bottom()),
            stroke: StrokeStyle::dashed(theme.accent, 1.0, 4.0, 3.0),
        });
        scene.push(DrawCommand::PopClip);
        scene.push(DrawCommand::Text {
            position: Vec2::new(mean_x + 4.0, area.top() + theme.axis_label_size),
            text: format!("med {mean:.2}"),
            color: theme.accent,
            size: theme.axis_label_size,
            anchor: TextAnchor::Start,
        });

        let lo = first.x0;
        let hi = last_filled;
        AxisRenderer::paint_value_labels(
            &mut scene,
            &transform,
            &[
                (lo, format!("{lo:.1}")),
                ((lo + hi) / 2.0, format!("{:.1}", (lo + hi) / 2.0)),
                (hi, format!("{hi:.1}")),
            ],
            theme,
        );
        AxisRenderer::paint_x_axis_line(&mut scene, area, theme);
        scene
    }
}
