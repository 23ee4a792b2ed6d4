use crate::scene::Color;

#[derive(Clone, Debug)]
pub struct ChartTheme {
    pub background: Color,
    pub grid_line: Color,
    pub axis_line: Color,
    pub axis_label: Color,
    pub axis_label_size: f32,
    pub message_size: f32,
    pub text: Color,
    /// Fleet median line and the minimap bars.
    pub accent: Color,
    /// Single-entity line and detection bars.
    pub accent_secondary: Color,
    /// Histogram bars.
    pub accent_tertiary: Color,
    pub point_outline: Color,
    pub zoom_track: Color,
    /// Comparison colours, indexed by an entity's position in the full id list.
    pub palette: Vec<Color>,
}

impl ChartTheme {
    pub fn palette_color(&self, position: usize) -> Color {
        if self.palette.is_empty() {
            return self.accent;
        }
        self.palette[position % self.palette.len()]
    }
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            background: Color::rgb(0x0d110e),
            grid_line: Color::rgb(0x1a2318),
            axis_line: Color::rgb(0x2e3d2e),
            axis_label: Color::rgb(0x6b7f6b),
            axis_label_size: 8.0,
            message_size: 10.0,
            text: Color::rgb(0xe8ede8),
            accent: Color::rgb(0xc8e028),
            accent_secondary: Color::rgb(0xf5c842),
            accent_tertiary: Color::rgb(0x6dcfa0),
            point_outline: Color::rgb(0x0d110e),
            zoom_track: Color::rgb(0x2e3d2e).opacity(0.7),
            palette: vec![
                Color::rgb(0xc8e028),
                Color::rgb(0x6dcfa0),
                Color::rgb(0xf5c842),
                Color::rgb(0x7ec8e3),
                Color::rgb(0xff8c69),
                Color::rgb(0xc084fc),
            ],
        }
    }
}
