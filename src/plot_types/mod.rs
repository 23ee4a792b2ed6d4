// Plot types module

pub mod bar;
pub mod entity;
pub mod fleet;
pub mod histogram;
pub mod overlay;

pub use bar::DetectionsPlot;
pub use entity::EntityPlot;
pub use fleet::FleetMedianPlot;
pub use histogram::{bin_values, Bin, DistributionPlot};
pub use overlay::{union_dates, ComparisonPlot, OverlaySeries};

use crate::data_types::{AxisConfig, Margins};
use crate::gesture::ViewId;
use crate::scene::{Rect, Scene};
use crate::theme::ChartTheme;
use crate::viewport::ZoomState;
use serde::{Deserialize, Serialize};

pub const NO_DATA_MESSAGE: &str = "No data in selected range";
pub const NO_SELECTION_MESSAGE: &str = "Select entities to compare";
pub const ZOOM_HINT: &str = "Scroll to zoom · Drag to pan";

/// The charts of the dashboard, in redraw order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ChartKind {
    FleetMedian,
    Entity,
    Distribution,
    Detections,
    Comparison,
}

impl ChartKind {
    pub const ALL: [ChartKind; 5] = [
        ChartKind::FleetMedian,
        ChartKind::Entity,
        ChartKind::Distribution,
        ChartKind::Detections,
        ChartKind::Comparison,
    ];

    pub fn view_id(self) -> ViewId {
        ViewId(self as u32)
    }

    /// Charts drawn on the shared date axis take wheel and drag gestures.
    pub fn takes_gestures(self) -> bool {
        !matches!(self, ChartKind::Distribution)
    }

    pub fn title(self) -> &'static str {
        match self {
            ChartKind::FleetMedian => "Fleet median",
            ChartKind::Entity => "Entity",
            ChartKind::Distribution => "Distribution",
            ChartKind::Detections => "Detections",
            ChartKind::Comparison => "Comparison",
        }
    }
}

/// Pixel size of the surface a chart is attached to.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    pub width: f32,
    pub height: f32,
}

impl Surface {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Plotting area left after removing `margins`. Never negative.
    pub fn plot_area(&self, margins: &Margins) -> Rect {
        Rect::new(
            margins.left,
            margins.top,
            (self.width - margins.left - margins.right).max(0.0),
            (self.height - margins.top - margins.bottom).max(0.0),
        )
    }
}

/// Everything a renderer reads besides its own data.
pub struct RenderContext<'a> {
    pub surface: Surface,
    pub margins: Margins,
    pub theme: &'a ChartTheme,
    pub axis: &'a AxisConfig,
    pub zoom: ZoomState,
    pub value_unit: &'a str,
}

impl RenderContext<'_> {
    pub fn plot_area(&self) -> Rect {
        self.surface.plot_area(&self.margins)
    }

    pub fn scene(&self) -> Scene {
        Scene::new(self.surface.width, self.surface.height)
    }
}

/// Trait for rendering chart kinds into a retained scene
pub trait PlotRenderer {
    fn kind(&self) -> ChartKind;

    /// Builds the full scene. Empty inputs produce a placeholder scene.
    fn render(&self, ctx: &RenderContext) -> Scene;
}
