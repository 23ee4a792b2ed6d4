//! fleet_chart crate: linked time-series charts sharing one zoomable viewport

pub mod axis_renderer;
pub mod dashboard;
pub mod data_types;
pub mod gesture;
pub mod navigator;
pub mod plot_types;
pub mod scales;
pub mod scene;
pub mod scheduler;
pub mod summary;
pub mod theme;
pub mod transform;
pub mod utils;
pub mod view_controller;
pub mod viewport;

#[cfg(feature = "gpui")]
pub mod gpui_backend;

pub use dashboard::{Dashboard, Frame, PointerTarget, Surfaces};
pub use data_types::{DashboardConfig, DateRange, RangePreset, SeriesPoint, Snapshot};
pub use gesture::{CursorAffordance, GestureResponse};
pub use plot_types::{ChartKind, PlotRenderer, Surface};
pub use scene::Scene;
pub use viewport::{Viewport, ZoomState};
