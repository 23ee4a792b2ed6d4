//! gpui backend: paints retained scenes and forwards gpui input to a [`Dashboard`].

use crate::dashboard::{Dashboard, Frame, PointerTarget};
use crate::data_types::RangePreset;
use crate::gesture::{CursorAffordance, GestureResponse};
use crate::plot_types::{ChartKind, Surface};
use crate::scene::{self as retained, DrawCommand, Fill, PathVerb, StrokeStyle, TextAnchor};
use crate::theme::ChartTheme;
use crate::utils::PixelsExt;
use gpui::prelude::*;
use gpui::*;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Lines-to-pixels factor for line-based wheel deltas.
const LINE_HEIGHT_PX: f32 = 20.0;

pub fn to_hsla(c: retained::Color) -> Hsla {
    Rgba {
        r: c.r,
        g: c.g,
        b: c.b,
        a: c.a,
    }
    .into()
}

fn at(origin: Point<Pixels>, p: glam::Vec2) -> Point<Pixels> {
    point(origin.x + px(p.x), origin.y + px(p.y))
}

fn to_bounds(origin: Point<Pixels>, rect: retained::Rect) -> Bounds<Pixels> {
    Bounds::new(
        at(origin, rect.origin),
        size(px(rect.width().max(0.0)), px(rect.height().max(0.0))),
    )
}

fn to_background(fill: Fill) -> Background {
    match fill {
        Fill::Solid(color) => to_hsla(color).into(),
        Fill::VerticalGradient {
            color,
            top_opacity,
            bottom_opacity,
        } => linear_gradient(
            180.0,
            linear_color_stop(to_hsla(color.opacity(top_opacity)), 0.0),
            linear_color_stop(to_hsla(color.opacity(bottom_opacity)), 1.0),
        ),
    }
}

fn cursor_style(cursor: CursorAffordance) -> CursorStyle {
    match cursor {
        CursorAffordance::Default => CursorStyle::Arrow,
        CursorAffordance::Grab => CursorStyle::OpenHand,
        CursorAffordance::Grabbing => CursorStyle::ClosedHand,
    }
}

fn build_path(
    path: &retained::Path,
    origin: Point<Pixels>,
    mut builder: gpui::PathBuilder,
) -> Option<gpui::Path<Pixels>> {
    if path.is_empty() {
        return None;
    }
    for verb in &path.verbs {
        match verb {
            PathVerb::MoveTo(p) => builder.move_to(at(origin, *p)),
            PathVerb::LineTo(p) => builder.line_to(at(origin, *p)),
            PathVerb::Close => builder.close(),
        }
    }
    builder.build().ok()
}

fn paint_line(
    from: glam::Vec2,
    to: glam::Vec2,
    stroke: &StrokeStyle,
    origin: Point<Pixels>,
    window: &mut Window,
) {
    let mut builder = gpui::PathBuilder::stroke(px(stroke.width));
    match stroke.dash {
        Some((dash, gap)) if dash > 0.0 && dash + gap > 0.0 => {
            let len = from.distance(to);
            if len <= 0.0 {
                return;
            }
            let dir = (to - from) / len;
            let mut t = 0.0;
            while t < len {
                let end = (t + dash).min(len);
                builder.move_to(at(origin, from + dir * t));
                builder.line_to(at(origin, from + dir * end));
                t = end + gap;
            }
        }
        _ => {
            builder.move_to(at(origin, from));
            builder.line_to(at(origin, to));
        }
    }
    if let Ok(path) = builder.build() {
        window.paint_path(path, to_hsla(stroke.color));
    }
}

fn paint_text(
    text: &str,
    position: glam::Vec2,
    color: retained::Color,
    font_size: f32,
    anchor: TextAnchor,
    origin: Point<Pixels>,
    window: &mut Window,
    cx: &mut App,
) {
    let font_size = px(font_size);
    let run = TextRun {
        len: text.len(),
        font: TextStyle::default().font(),
        color: to_hsla(color),
        background_color: None,
        underline: None,
        strikethrough: None,
    };
    if let Ok(lines) =
        window
            .text_system()
            .shape_text(text.to_string().into(), font_size, &[run], None, None)
    {
        for line in lines {
            let width = line.width();
            let shift = match anchor {
                TextAnchor::Start => px(0.0),
                TextAnchor::Middle => width / 2.0,
                TextAnchor::End => width,
            };
            // Scene text positions are baselines.
            let top_left = point(
                origin.x + px(position.x) - shift,
                origin.y + px(position.y) - font_size,
            );
            let _ = line.paint(top_left, font_size, TextAlign::Left, None, window, cx);
        }
    }
}

fn paint_command(command: &DrawCommand, origin: Point<Pixels>, window: &mut Window, cx: &mut App) {
    match command {
        DrawCommand::Path { path, fill, stroke } => {
            if let Some(fill) = fill {
                if let Some(p) = build_path(path, origin, gpui::PathBuilder::fill()) {
                    window.paint_path(p, to_background(*fill));
                }
            }
            if let Some(stroke) = stroke {
                if let Some(p) = build_path(path, origin, gpui::PathBuilder::stroke(px(stroke.width)))
                {
                    window.paint_path(p, to_hsla(stroke.color));
                }
            }
        }
        DrawCommand::Line { from, to, stroke } => paint_line(*from, *to, stroke, origin, window),
        DrawCommand::Rect {
            rect,
            fill: background,
            corner_radius,
        } => {
            window.paint_quad(
                fill(to_bounds(origin, *rect), to_background(*background))
                    .corner_radii(Corners::all(px(*corner_radius))),
            );
        }
        DrawCommand::Circle {
            center,
            radius,
            fill: color,
            stroke,
        } => {
            let r = glam::Vec2::splat(*radius);
            let bounds = to_bounds(
                origin,
                retained::Rect {
                    origin: *center - r,
                    size: r * 2.0,
                },
            );
            let mut quad = fill(bounds, to_hsla(*color)).corner_radii(Corners::all(px(*radius)));
            if let Some(stroke) = stroke {
                quad = quad
                    .border_widths(Edges::all(px(stroke.width)))
                    .border_color(to_hsla(stroke.color));
            }
            window.paint_quad(quad);
        }
        DrawCommand::Text {
            position,
            text,
            color,
            size,
            anchor,
        } => paint_text(text, *position, *color, *size, *anchor, origin, window, cx),
        DrawCommand::PushClip(_) | DrawCommand::PopClip => {}
    }
}

/// Index of the `PopClip` closing the `PushClip` at `open`, or the slice length.
fn matching_pop(commands: &[DrawCommand], open: usize) -> usize {
    let mut depth = 0usize;
    for (k, command) in commands.iter().enumerate().skip(open) {
        match command {
            DrawCommand::PushClip(_) => depth += 1,
            DrawCommand::PopClip => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return k;
                }
            }
            _ => {}
        }
    }
    commands.len()
}

fn paint_commands(
    commands: &[DrawCommand],
    origin: Point<Pixels>,
    window: &mut Window,
    cx: &mut App,
) {
    let mut i = 0;
    while i < commands.len() {
        if let DrawCommand::PushClip(rect) = &commands[i] {
            let end = matching_pop(commands, i);
            let inner = &commands[i + 1..end];
            let mask = ContentMask {
                bounds: to_bounds(origin, *rect),
            };
            window.with_content_mask(Some(mask), |window| {
                paint_commands(inner, origin, window, cx)
            });
            i = end + 1;
            continue;
        }
        paint_command(&commands[i], origin, window, cx);
        i += 1;
    }
}

/// Paints a scene with its origin at the top-left corner of `bounds`.
pub fn paint_scene(scene: &retained::Scene, bounds: Bounds<Pixels>, window: &mut Window, cx: &mut App) {
    paint_commands(&scene.commands, bounds.origin, window, cx);
}

/// Window content hosting a [`Dashboard`].
pub struct DashboardView {
    dashboard: Dashboard,
    bounds: Rc<RefCell<HashMap<PointerTarget, Bounds<Pixels>>>>,
    hover: Option<(ChartKind, glam::Vec2)>,
}

impl DashboardView {
    pub fn new(dashboard: Dashboard) -> Self {
        Self {
            dashboard,
            bounds: Rc::new(RefCell::new(HashMap::new())),
            hover: None,
        }
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    fn local(&self, target: PointerTarget, position: Point<Pixels>) -> Option<glam::Vec2> {
        let bounds = self.bounds.borrow().get(&target).copied()?;
        Some(glam::Vec2::new(
            (position.x - bounds.origin.x).as_f32(),
            (position.y - bounds.origin.y).as_f32(),
        ))
    }

    /// Resizes surfaces whose laid-out size changed since the last paint.
    fn sync_surfaces(&mut self) {
        let laid_out: Vec<(PointerTarget, Bounds<Pixels>)> =
            self.bounds.borrow().iter().map(|(t, b)| (*t, *b)).collect();
        for (target, bounds) in laid_out {
            let current = match target {
                PointerTarget::Chart(kind) => self.dashboard.surfaces().chart(kind),
                PointerTarget::Minimap => self.dashboard.surfaces().minimap,
            };
            let next = Surface::new(bounds.size.width.as_f32(), bounds.size.height.as_f32());
            if (current.width - next.width).abs() > 0.5 || (current.height - next.height).abs() > 0.5
            {
                self.dashboard.resize(target, next);
            }
        }
    }

    fn respond(&mut self, response: GestureResponse, window: &mut Window, cx: &mut Context<Self>) {
        if response.handled {
            cx.stop_propagation();
        }
        if response.schedule_frame {
            cx.on_next_frame(window, |this, _window, cx| {
                if this.dashboard.on_frame() {
                    cx.notify();
                }
            });
        }
        cx.notify();
    }

    fn on_wheel(
        &mut self,
        target: PointerTarget,
        event: &ScrollWheelEvent,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        let delta_y = match event.delta {
            ScrollDelta::Pixels(p) => p.y.as_f32(),
            ScrollDelta::Lines(p) => p.y * LINE_HEIGHT_PX,
        };
        let Some(local) = self.local(target, event.position) else {
            return;
        };
        // gpui reports movement away from the user as positive.
        let response = self.dashboard.wheel(target, local.x, -delta_y);
        self.respond(response, window, cx);
    }

    fn on_pointer_down(
        &mut self,
        target: PointerTarget,
        event: &MouseDownEvent,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        let Some(local) = self.local(target, event.position) else {
            return;
        };
        let response = self.dashboard.pointer_down(target, local.x);
        self.respond(response, window, cx);
    }

    /// Moves go to whichever target owns the active drag; otherwise they drive hover.
    fn on_pointer_move(&mut self, event: &MouseMoveEvent, window: &mut Window, cx: &mut Context<Self>) {
        let dragging = if self.dashboard.navigator().is_dragging() {
            Some(PointerTarget::Minimap)
        } else {
            self.dashboard
                .gestures()
                .session()
                .and_then(|s| ChartKind::ALL.into_iter().find(|k| k.view_id() == s.view))
                .map(PointerTarget::Chart)
        };
        if let Some(target) = dragging {
            if let Some(local) = self.local(target, event.position) {
                let response = self.dashboard.pointer_move(target, local.x);
                self.respond(response, window, cx);
            }
            return;
        }

        let hovered = self
            .bounds
            .borrow()
            .iter()
            .find_map(|(target, bounds)| match target {
                PointerTarget::Chart(kind) if bounds.contains(&event.position) => Some(*kind),
                _ => None,
            });
        let hover = hovered.and_then(|kind| {
            self.local(PointerTarget::Chart(kind), event.position)
                .map(|p| (kind, p))
        });
        if hover != self.hover {
            self.hover = hover;
            cx.notify();
        }
    }

    fn on_pointer_up(&mut self, _event: &MouseUpEvent, window: &mut Window, cx: &mut Context<Self>) {
        let response = self.dashboard.pointer_up();
        self.respond(response, window, cx);
    }

    fn surface_canvas(
        &self,
        target: PointerTarget,
        scene: retained::Scene,
        hover_anchor: Option<(glam::Vec2, Hsla)>,
    ) -> impl IntoElement {
        let bounds_rc = self.bounds.clone();
        canvas(
            move |bounds, window, _cx| {
                let previous = bounds_rc.borrow_mut().insert(target, bounds);
                if previous.map_or(true, |b| b.size != bounds.size) {
                    window.request_animation_frame();
                }
            },
            move |bounds, (), window, cx| {
                paint_scene(&scene, bounds, window, cx);
                if let Some((p, color)) = hover_anchor {
                    let dot = Bounds::new(at(bounds.origin, p - glam::Vec2::splat(4.0)), size(px(8.0), px(8.0)));
                    window.paint_quad(fill(dot, color).corner_radii(Corners::all(px(4.0))));
                }
            },
        )
        .size_full()
    }

    fn render_chart(
        &self,
        kind: ChartKind,
        frame: &Frame,
        theme: &ChartTheme,
        cx: &mut Context<Self>,
    ) -> Div {
        let target = PointerTarget::Chart(kind);
        let scene = frame.chart(kind).cloned().unwrap_or_default();
        let height = self.dashboard.surfaces().chart(kind).height;
        let hovered = self
            .hover
            .filter(|(k, _)| *k == kind)
            .and_then(|(_, p)| scene.hit_test(p).cloned());

        let mut header = div()
            .flex()
            .gap_2()
            .text_xs()
            .child(kind.title().to_string());
        if let Some(caption) = &scene.caption {
            header = header.child(div().text_color(to_hsla(theme.axis_label)).child(caption.clone()));
        }
        for item in &scene.legend {
            header = header.child(div().text_color(to_hsla(item.color)).child(item.label.clone()));
        }

        let anchor = hovered
            .as_ref()
            .and_then(|h| h.anchor.map(|a| (a, to_hsla(h.tooltip.color))));
        let mut body = div()
            .relative()
            .w_full()
            .h(px(height))
            .cursor(cursor_style(self.dashboard.cursor(target)))
            .on_scroll_wheel(cx.listener(move |this, event: &ScrollWheelEvent, window, cx| {
                this.on_wheel(target, event, window, cx)
            }))
            .on_mouse_down(
                MouseButton::Left,
                cx.listener(move |this, event: &MouseDownEvent, window, cx| {
                    this.on_pointer_down(target, event, window, cx)
                }),
            )
            .child(self.surface_canvas(target, scene, anchor));

        if let (Some(h), Some((_, p))) = (hovered, self.hover) {
            let mut tooltip = div()
                .absolute()
                .left(px(p.x + 12.0))
                .top(px(p.y))
                .p_1()
                .rounded_sm()
                .border_1()
                .border_color(to_hsla(h.tooltip.color))
                .bg(to_hsla(theme.background))
                .text_xs()
                .child(h.tooltip.title.clone())
                .child(div().text_color(to_hsla(h.tooltip.color)).child(h.tooltip.value.clone()));
            if let Some(detail) = h.tooltip.detail {
                tooltip = tooltip.child(div().text_color(to_hsla(theme.axis_label)).child(detail));
            }
            body = body.child(tooltip);
        }

        div().flex().flex_col().flex_1().gap_1().child(header).child(body)
    }

    fn button(label: String, active: bool, theme: &ChartTheme) -> Div {
        div()
            .px_2()
            .py_1()
            .rounded_sm()
            .border_1()
            .border_color(to_hsla(theme.axis_line))
            .bg(if active {
                to_hsla(theme.accent.opacity(0.25))
            } else {
                to_hsla(retained::Color::transparent())
            })
            .text_xs()
            .cursor(CursorStyle::PointingHand)
            .child(label)
    }

    fn render_controls(&self, frame: &Frame, theme: &ChartTheme, cx: &mut Context<Self>) -> Div {
        let mut row = div().flex().items_center().gap_2();
        for preset in RangePreset::STANDARD {
            let active = frame.controls.active_preset == Some(preset);
            row = row.child(Self::button(preset.label(), active, theme).on_mouse_down(
                MouseButton::Left,
                cx.listener(move |this, _: &MouseDownEvent, _window, cx| {
                    cx.stop_propagation();
                    this.dashboard.apply_preset(preset);
                    cx.notify();
                }),
            ));
        }

        type Action = fn(&mut Dashboard) -> GestureResponse;
        let actions: [(&str, Action); 5] = [
            ("−", Dashboard::zoom_out),
            ("+", Dashboard::zoom_in),
            ("1×", Dashboard::reset_zoom),
            ("←", Dashboard::pan_left),
            ("→", Dashboard::pan_right),
        ];
        for (label, action) in actions {
            row = row.child(Self::button(label.to_string(), false, theme).on_mouse_down(
                MouseButton::Left,
                cx.listener(move |this, _: &MouseDownEvent, window, cx| {
                    let response = action(&mut this.dashboard);
                    this.respond(response, window, cx);
                }),
            ));
        }

        row.child(div().text_xs().child(frame.controls.zoom_label.clone()))
            .child(
                div()
                    .text_xs()
                    .text_color(to_hsla(theme.axis_label))
                    .child(frame.controls.range_label.clone()),
            )
    }

    fn render_summary(frame: &Frame, theme: &ChartTheme) -> Div {
        let s = &frame.summary;
        let kpi = |label: &str, value: String| {
            div()
                .flex()
                .flex_col()
                .child(div().text_xs().text_color(to_hsla(theme.axis_label)).child(label.to_string()))
                .child(div().text_sm().child(value))
        };
        div()
            .flex()
            .gap_4()
            .child(kpi(
                "Latest count",
                format!(
                    "{} {}",
                    s.latest_count.map(|c| c.to_string()).unwrap_or_else(|| "—".into()),
                    s.count_delta_label()
                ),
            ))
            .child(kpi(
                "Latest median",
                format!(
                    "{} {}",
                    s.latest_median.map(|m| format!("{m:.2}")).unwrap_or_else(|| "—".into()),
                    s.median_delta_label()
                ),
            ))
            .child(kpi("Days", s.days_in_window.to_string()))
            .child(kpi("Anomalies", frame.controls.anomalies_in_range.to_string()))
            .child(kpi("Measurements", s.measurements.to_string()))
            .child(kpi("Avg confidence", format!("{:.2}", s.avg_confidence)))
    }

    fn render_selection(&self, frame: &Frame, theme: &ChartTheme, cx: &mut Context<Self>) -> Div {
        let ids = self.dashboard.snapshot().entity_ids.clone();
        let mut entity_row = div().flex().gap_1().text_xs().child("Entity");
        let mut compare_row = div().flex().gap_1().text_xs().child("Compare");
        for (position, id) in ids.into_iter().enumerate() {
            let selected = frame.controls.selected_entity == Some(id);
            entity_row = entity_row.child(Self::button(format!("#{id}"), selected, theme).on_mouse_down(
                MouseButton::Left,
                cx.listener(move |this, _: &MouseDownEvent, _window, cx| {
                    cx.stop_propagation();
                    this.dashboard.select_entity(id);
                    cx.notify();
                }),
            ));
            let compared = frame.controls.comparison.contains(&id);
            compare_row = compare_row.child(
                Self::button(format!("#{id}"), compared, theme)
                    .text_color(to_hsla(theme.palette_color(position)))
                    .on_mouse_down(
                        MouseButton::Left,
                        cx.listener(move |this, _: &MouseDownEvent, _window, cx| {
                            cx.stop_propagation();
                            this.dashboard.toggle_comparison(id);
                            cx.notify();
                        }),
                    ),
            );
        }
        div().flex().flex_col().gap_1().child(entity_row).child(compare_row)
    }
}

impl Render for DashboardView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        self.sync_surfaces();
        let theme = self.dashboard.theme().clone();
        let frame = self.dashboard.frame().clone();
        let minimap_height = self.dashboard.config().minimap.height;
        let minimap = PointerTarget::Minimap;

        div()
            .size_full()
            .flex()
            .flex_col()
            .gap_2()
            .p_3()
            .bg(to_hsla(theme.background))
            .text_color(to_hsla(theme.text))
            .on_mouse_move(cx.listener(Self::on_pointer_move))
            .on_mouse_up(MouseButton::Left, cx.listener(Self::on_pointer_up))
            .child(self.render_controls(&frame, &theme, cx))
            .child(Self::render_summary(&frame, &theme))
            .child(
                div()
                    .w_full()
                    .h(px(minimap_height))
                    .cursor(cursor_style(self.dashboard.cursor(minimap)))
                    .on_mouse_down(
                        MouseButton::Left,
                        cx.listener(move |this, event: &MouseDownEvent, window, cx| {
                            this.on_pointer_down(minimap, event, window, cx)
                        }),
                    )
                    .child(self.surface_canvas(minimap, frame.minimap.clone(), None)),
            )
            .child(self.render_chart(ChartKind::FleetMedian, &frame, &theme, cx))
            .child(
                div()
                    .flex()
                    .gap_2()
                    .child(self.render_chart(ChartKind::Distribution, &frame, &theme, cx))
                    .child(self.render_chart(ChartKind::Detections, &frame, &theme, cx)),
            )
            .child(self.render_selection(&frame, &theme, cx))
            .child(self.render_chart(ChartKind::Entity, &frame, &theme, cx))
            .child(self.render_chart(ChartKind::Comparison, &frame, &theme, cx))
    }
}
