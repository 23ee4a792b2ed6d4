//! Retained scene description.
//!
//! Renderers never talk to a drawing API directly: they append
//! [`DrawCommand`]s to a [`Scene`] that a backend interprets later. Coordinates
//! are in surface pixels, origin at the top-left corner of the surface.

use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Builds an opaque colour from `0xRRGGBB`.
    pub const fn rgb(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
            a: 1.0,
        }
    }

    pub const fn transparent() -> Self {
        Self { r: 0.0, g: 0.0, b: 0.0, a: 0.0 }
    }

    pub fn opacity(self, factor: f32) -> Self {
        Self {
            a: (self.a * factor).clamp(0.0, 1.0),
            ..self
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    pub fn left(&self) -> f32 {
        self.origin.x
    }

    pub fn top(&self) -> f32 {
        self.origin.y
    }

    pub fn right(&self) -> f32 {
        self.origin.x + self.size.x
    }

    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.y
    }

    pub fn width(&self) -> f32 {
        self.size.x
    }

    pub fn height(&self) -> f32 {
        self.size.y
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Fill {
    Solid(Color),
    /// Top-to-bottom fade of a single colour.
    VerticalGradient {
        color: Color,
        top_opacity: f32,
        bottom_opacity: f32,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f32,
    /// Dash and gap lengths.
    pub dash: Option<(f32, f32)>,
}

impl StrokeStyle {
    pub fn solid(color: Color, width: f32) -> Self {
        Self { color, width, dash: None }
    }

    pub fn dashed(color: Color, width: f32, dash: f32, gap: f32) -> Self {
        Self {
            color,
            width,
            dash: Some((dash, gap)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathVerb {
    MoveTo(Vec2),
    LineTo(Vec2),
    Close,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    pub verbs: Vec<PathVerb>,
}

impl Path {
    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }

    /// Number of disjoint pieces (one per `MoveTo`).
    pub fn subpath_count(&self) -> usize {
        self.verbs
            .iter()
            .filter(|v| matches!(v, PathVerb::MoveTo(_)))
            .count()
    }

    pub fn points(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.verbs.iter().filter_map(|v| match v {
            PathVerb::MoveTo(p) | PathVerb::LineTo(p) => Some(*p),
            PathVerb::Close => None,
        })
    }
}

#[derive(Default)]
pub struct PathBuilder {
    path: Path,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, p: Vec2) {
        self.path.verbs.push(PathVerb::MoveTo(p));
    }

    pub fn line_to(&mut self, p: Vec2) {
        if self.path.verbs.is_empty() {
            self.move_to(p);
        } else {
            self.path.verbs.push(PathVerb::LineTo(p));
        }
    }

    pub fn close(&mut self) {
        if !self.path.verbs.is_empty() {
            self.path.verbs.push(PathVerb::Close);
        }
    }

    pub fn build(self) -> Path {
        self.path
    }
}

/// Polyline through `points`.
pub fn line_path(points: &[Vec2]) -> Path {
    let mut builder = PathBuilder::new();
    for (i, p) in points.iter().enumerate() {
        if i == 0 {
            builder.move_to(*p);
        } else {
            builder.line_to(*p);
        }
    }
    builder.build()
}

/// Polyline that starts a new piece after every `None`, so gaps are left open.
pub fn segmented_line_path(points: impl IntoIterator<Item = Option<Vec2>>) -> Path {
    let mut builder = PathBuilder::new();
    let mut pen_down = false;
    for p in points {
        match p {
            Some(p) if pen_down => builder.line_to(p),
            Some(p) => {
                builder.move_to(p);
                pen_down = true;
            }
            None => pen_down = false,
        }
    }
    builder.build()
}

/// Closed region under the polyline down to `baseline_y`.
pub fn area_path(points: &[Vec2], baseline_y: f32) -> Path {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return Path::default();
    };
    let mut builder = PathBuilder::new();
    builder.move_to(*first);
    for p in &points[1..] {
        builder.line_to(*p);
    }
    builder.line_to(Vec2::new(last.x, baseline_y));
    builder.line_to(Vec2::new(first.x, baseline_y));
    builder.close();
    builder.build()
}

/// Closed band between an upper and a lower polyline sharing the same x positions.
pub fn band_path(upper: &[Vec2], lower: &[Vec2]) -> Path {
    if upper.is_empty() || lower.is_empty() {
        return Path::default();
    }
    let mut builder = PathBuilder::new();
    builder.move_to(upper[0]);
    for p in &upper[1..] {
        builder.line_to(*p);
    }
    for p in lower.iter().rev() {
        builder.line_to(*p);
    }
    builder.close();
    builder.build()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Path {
        path: Path,
        fill: Option<Fill>,
        stroke: Option<StrokeStyle>,
    },
    Line {
        from: Vec2,
        to: Vec2,
        stroke: StrokeStyle,
    },
    Rect {
        rect: Rect,
        fill: Fill,
        corner_radius: f32,
    },
    Circle {
        center: Vec2,
        radius: f32,
        fill: Color,
        stroke: Option<StrokeStyle>,
    },
    Text {
        position: Vec2,
        text: String,
        color: Color,
        size: f32,
        anchor: TextAnchor,
    },
    PushClip(Rect),
    PopClip,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HitRegion {
    Rect(Rect),
    Circle { center: Vec2, radius: f32 },
}

impl HitRegion {
    pub fn contains(&self, p: Vec2) -> bool {
        match self {
            Self::Rect(r) => r.contains(p),
            Self::Circle { center, radius } => center.distance(p) <= *radius,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
    pub title: String,
    pub value: String,
    pub detail: Option<String>,
    pub color: Color,
}

/// A pointer-sensitive region attached to a data point or bin.
#[derive(Clone, Debug, PartialEq)]
pub struct HoverTarget {
    pub region: HitRegion,
    /// Where a hover highlight dot goes, if the chart draws one.
    pub anchor: Option<Vec2>,
    pub tooltip: Tooltip,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LegendSwatch {
    Line,
    Band,
    Hint,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LegendItem {
    pub label: String,
    pub color: Color,
    pub swatch: LegendSwatch,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    pub width: f32,
    pub height: f32,
    pub commands: Vec<DrawCommand>,
    pub hover_targets: Vec<HoverTarget>,
    pub legend: Vec<LegendItem>,
    pub caption: Option<String>,
    /// Set when the chart had nothing to plot and drew a message instead.
    pub placeholder: Option<String>,
}

impl Scene {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn is_placeholder(&self) -> bool {
        self.placeholder.is_some()
    }

    /// Topmost hover target under `p`.
    pub fn hit_test(&self, p: Vec2) -> Option<&HoverTarget> {
        self.hover_targets.iter().rev().find(|t| t.region.contains(p))
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Path { path, .. } => Some(path),
            _ => None,
        })
    }

    pub fn rects(&self) -> impl Iterator<Item = &Rect> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Rect { rect, .. } => Some(rect),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segmented_path_breaks_on_gaps() {
        let path = segmented_line_path([
            Some(Vec2::new(0.0, 0.0)),
            Some(Vec2::new(1.0, 1.0)),
            None,
            Some(Vec2::new(3.0, 3.0)),
            Some(Vec2::new(4.0, 4.0)),
        ]);
        assert_eq!(path.subpath_count(), 2);
        assert_eq!(path.points().count(), 4);
    }

    #[test]
    fn area_closes_on_baseline() {
        let path = area_path(&[Vec2::new(0.0, 5.0), Vec2::new(10.0, 2.0)], 20.0);
        let pts: Vec<_> = path.points().collect();
        assert_eq!(pts[2], Vec2::new(10.0, 20.0));
        assert_eq!(pts[3], Vec2::new(0.0, 20.0));
        assert_eq!(path.verbs.last(), Some(&PathVerb::Close));
    }
}
