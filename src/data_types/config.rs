use eyre::{ensure, Result, WrapErr};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    pub max_scale: f64,
    /// Per-notch factor applied by wheel gestures.
    pub wheel_factor: f64,
    /// Factor applied by the zoom buttons.
    pub step_factor: f64,
    /// Fraction of the visible window moved by the pan buttons.
    pub pan_step: f64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            max_scale: 20.0,
            wheel_factor: 1.3,
            step_factor: 1.5,
            pan_step: 0.12,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinimapConfig {
    pub height: f32,
    /// Minimum bar height so zero-count days stay visible.
    pub bar_floor: f32,
    /// Width of the grab zone around each handle.
    pub handle_hit_width: f32,
    pub min_selection_width: f32,
}

impl Default for MinimapConfig {
    fn default() -> Self {
        Self {
            height: 40.0,
            bar_floor: 4.0,
            handle_hit_width: 10.0,
            min_selection_width: 2.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Margins {
    pub const fn new(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self { left, right, top, bottom }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisConfig {
    /// Approximate number of date labels along the x axis.
    pub date_labels: usize,
    /// Value domains are rounded outward to multiples of this step.
    pub value_step: f64,
    pub fleet_padding: f64,
    pub entity_padding: f64,
    pub tick_step: f64,
    pub count_headroom: f64,
    pub histogram_headroom: f64,
    pub min_bins: usize,
    pub max_bins: usize,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            date_labels: 7,
            value_step: 0.2,
            fleet_padding: 0.2,
            entity_padding: 0.3,
            tick_step: 0.5,
            count_headroom: 1.12,
            histogram_headroom: 1.15,
            min_bins: 4,
            max_bins: 18,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// How many leading entity ids are compared when nothing is selected.
    pub default_selection: usize,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self { default_selection: 3 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub zoom: ZoomConfig,
    pub minimap: MinimapConfig,
    pub axis: AxisConfig,
    pub overlay: OverlayConfig,
    /// Margins of the time-series charts.
    pub series_margins: Margins,
    /// Margins of the histogram and bar charts.
    pub bar_margins: Margins,
    pub value_unit: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            zoom: ZoomConfig::default(),
            minimap: MinimapConfig::default(),
            axis: AxisConfig::default(),
            overlay: OverlayConfig::default(),
            series_margins: Margins::new(44.0, 20.0, 10.0, 36.0),
            bar_margins: Margins::new(44.0, 16.0, 10.0, 36.0),
            value_unit: "cm".to_string(),
        }
    }
}

impl DashboardConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).wrap_err("invalid dashboard config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.zoom.max_scale >= 1.0, "zoom.max_scale must be >= 1");
        ensure!(self.zoom.wheel_factor > 1.0, "zoom.wheel_factor must be > 1");
        ensure!(self.zoom.step_factor > 1.0, "zoom.step_factor must be > 1");
        ensure!(
            self.axis.min_bins >= 1 && self.axis.min_bins <= self.axis.max_bins,
            "axis bin limits are inconsistent"
        );
        Ok(())
    }
}
