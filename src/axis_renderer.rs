use crate::plot_types::{RenderContext, ZOOM_HINT};
use crate::scales::format_tick;
use crate::scene::{
    DrawCommand, Fill, LegendItem, LegendSwatch, Rect, Scene, StrokeStyle, TextAnchor,
};
use crate::theme::ChartTheme;
use crate::transform::PlotTransform;
use crate::utils::date_formatter::{determine_day_format, format_day};
use crate::viewport::{IndexRange, ZoomState};
use chrono::NaiveDate;
use glam::Vec2;

/// Gap between the plot area and the tick labels.
const LABEL_GAP: f32 = 6.0;

pub struct AxisRenderer;

impl AxisRenderer {
    /// Dashed horizontal gridlines with value labels left of the plot area.
    pub fn paint_value_grid(
        scene: &mut Scene,
        transform: &PlotTransform,
        ticks: &[f64],
        theme: &ChartTheme,
    ) {
        let area = transform.area;
        for tick in ticks {
            let y = transform.y_data_to_screen(*tick);
            if y < area.top() - 0.5 || y > area.bottom() + 0.5 {
                continue;
            }
            scene.push(DrawCommand::Line {
                from: Vec2::new(area.left(), y),
                to: Vec2::new(area.right(), y),
                stroke: StrokeStyle::dashed(theme.grid_line, 1.0, 3.0, 4.0),
            });
            scene.push(DrawCommand::Text {
                position: Vec2::new(area.left() - LABEL_GAP, y + theme.axis_label_size / 3.0),
                text: format_tick(*tick),
                color: theme.axis_label,
                size: theme.axis_label_size,
                anchor: TextAnchor::End,
            });
        }
    }

    /// Date labels under the plot area, one every `max(1, visible / labels)` days
    /// of the visible window. `date_at(i)` is the day at index `i`.
    pub fn paint_date_labels(
        scene: &mut Scene,
        transform: &PlotTransform,
        date_at: impl Fn(usize) -> Option<NaiveDate>,
        visible: IndexRange,
        labels: usize,
        theme: &ChartTheme,
    ) {
        let area = transform.area;
        let every = (visible.len() / labels.max(1)).max(1);
        let format = determine_day_format(visible.len());
        for i in visible.iter().step_by(every) {
            let Some(date) = date_at(i) else {
                break;
            };
            let x = transform.x_data_to_screen(i as f64);
            if !transform.x_in_view(x, 0.5) {
                continue;
            }
            scene.push(DrawCommand::Text {
                position: Vec2::new(x, area.bottom() + LABEL_GAP + theme.axis_label_size),
                text: format_day(date, format),
                color: theme.axis_label,
                size: theme.axis_label_size,
                anchor: TextAnchor::Middle,
            });
        }
    }

    /// Free-form labels under the plot area at data positions on the x scale.
    pub fn paint_value_labels(
        scene: &mut Scene,
        transform: &PlotTransform,
        labels: &[(f64, String)],
        theme: &ChartTheme,
    ) {
        let y = transform.area.bottom() + LABEL_GAP + theme.axis_label_size;
        for (value, text) in labels {
            scene.push(DrawCommand::Text {
                position: Vec2::new(transform.x_data_to_screen(*value), y),
                text: text.clone(),
                color: theme.axis_label,
                size: theme.axis_label_size,
                anchor: TextAnchor::Middle,
            });
        }
    }

    pub fn paint_x_axis_line(scene: &mut Scene, area: Rect, theme: &ChartTheme) {
        scene.push(DrawCommand::Line {
            from: Vec2::new(area.left(), area.bottom()),
            to: Vec2::new(area.right(), area.bottom()),
            stroke: StrokeStyle::solid(theme.axis_line, 1.0),
        });
    }

    /// Thin bar along the bottom edge of the surface showing which part of the
    /// filtered range is visible. Drawn only while zoomed in.
    pub fn paint_zoom_bar(scene: &mut Scene, area: Rect, zoom: ZoomState, theme: &ChartTheme) {
        if !zoom.is_zoomed() {
            return;
        }
        let y = scene.height - 3.0;
        let track = Rect::new(area.left(), y, area.width(), 2.0);
        scene.push(DrawCommand::Rect {
            rect: track,
            fill: Fill::Solid(theme.zoom_track),
            corner_radius: 1.0,
        });
        let width = (area.width() / zoom.scale as f32).max(4.0);
        let x = area.left() + zoom.offset as f32 * area.width();
        scene.push(DrawCommand::Rect {
            rect: Rect::new(x, y, width.min(area.right() - x).max(0.0), 2.0),
            fill: Fill::Solid(theme.accent.opacity(0.8)),
            corner_radius: 1.0,
        });
    }

    /// Replaces the chart with a centred message.
    pub fn paint_placeholder(scene: &mut Scene, message: &str, theme: &ChartTheme) {
        scene.push(DrawCommand::Text {
            position: Vec2::new(scene.width / 2.0, scene.height / 2.0),
            text: message.to_string(),
            color: theme.axis_label,
            size: theme.message_size,
            anchor: TextAnchor::Middle,
        });
        scene.placeholder = Some(message.to_string());
    }

    /// The gesture hint shown in legends while zoomed in.
    pub fn push_zoom_hint(scene: &mut Scene, ctx: &RenderContext) {
        if ctx.zoom.is_zoomed() {
            scene.legend.push(LegendItem {
                label: ZOOM_HINT.to_string(),
                color: ctx.theme.axis_label,
                swatch: LegendSwatch::Hint,
            });
        }
    }
}
