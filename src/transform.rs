//! Transform helper for coordinate projection

use crate::scales::ChartScale;
use crate::scene::Rect;
use crate::viewport::IndexMapping;
use glam::Vec2;

/// Projects data coordinates into surface pixels for one plotting area.
#[derive(Clone, Copy, Debug)]
pub struct PlotTransform {
    pub x_scale: ChartScale,
    pub y_scale: ChartScale,
    pub area: Rect,
}

impl PlotTransform {
    pub fn new(x_scale: ChartScale, y_scale: ChartScale, area: Rect) -> Self {
        Self {
            x_scale,
            y_scale,
            area,
        }
    }

    /// Index axis from the viewport, value axis growing upwards over `y_domain`.
    pub fn for_index(mapping: IndexMapping, y_domain: (f64, f64), area: Rect) -> Self {
        Self::new(
            mapping.as_scale(),
            ChartScale::new_linear(y_domain, (area.height(), 0.0)),
            area,
        )
    }

    pub fn data_to_screen(&self, x: f64, y: f64) -> Vec2 {
        Vec2::new(self.x_data_to_screen(x), self.y_data_to_screen(y))
    }

    pub fn screen_to_data(&self, p: Vec2) -> (f64, f64) {
        (
            self.x_scale.invert(p.x - self.area.left()),
            self.y_scale.invert(p.y - self.area.top()),
        )
    }

    pub fn x_data_to_screen(&self, x: f64) -> f32 {
        self.area.left() + self.x_scale.map(x)
    }

    pub fn y_data_to_screen(&self, y: f64) -> f32 {
        self.area.top() + self.y_scale.map(y)
    }

    /// Whether a screen x lies within the plot area widened by `slack` on both sides.
    pub fn x_in_view(&self, x: f32, slack: f32) -> bool {
        x >= self.area.left() - slack && x <= self.area.right() + slack
    }

    pub fn baseline(&self) -> f32 {
        self.area.bottom()
    }
}
