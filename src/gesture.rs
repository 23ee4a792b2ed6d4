//! Gesture Controller
//!
//! Turns raw pointer input on registered views into [`Viewport`] mutations.
//! Views are registered once during setup; the set of registered ids is what
//! keeps a view from ever being bound twice, however many times it redraws.
//! There is a single drag session for the whole system.

use crate::scene::Rect;
use crate::scheduler::RedrawScheduler;
use crate::view_controller::ViewController;
use crate::viewport::Viewport;
use std::collections::{HashMap, HashSet};

/// Stable identity of a chart view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorAffordance {
    Default,
    Grab,
    Grabbing,
}

/// The one in-flight press-drag-release pan.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSession {
    pub view: ViewId,
    pub start_x: f32,
    pub start_offset: f64,
}

/// What the host should do after forwarding an event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GestureResponse {
    /// The event was consumed; the host suppresses its default behaviour.
    pub handled: bool,
    /// A redraw was newly requested; the host schedules one frame callback.
    pub schedule_frame: bool,
}

impl GestureResponse {
    pub const IGNORED: Self = Self {
        handled: false,
        schedule_frame: false,
    };

    pub fn handled(schedule_frame: bool) -> Self {
        Self {
            handled: true,
            schedule_frame,
        }
    }

    pub fn merge(self, other: Self) -> Self {
        Self {
            handled: self.handled || other.handled,
            schedule_frame: self.schedule_frame || other.schedule_frame,
        }
    }
}

#[derive(Debug)]
pub struct GestureController {
    registered: HashSet<ViewId>,
    plot_areas: HashMap<ViewId, Rect>,
    session: Option<DragSession>,
    wheel_factor: f64,
}

impl GestureController {
    pub fn new(wheel_factor: f64) -> Self {
        Self {
            registered: HashSet::new(),
            plot_areas: HashMap::new(),
            session: None,
            wheel_factor,
        }
    }

    /// Binds a view. Returns false (and only refreshes its plot area) when the
    /// view is already bound.
    pub fn register(&mut self, view: ViewId, plot_area: Rect) -> bool {
        self.plot_areas.insert(view, plot_area);
        if !self.registered.insert(view) {
            tracing::debug!(?view, "view already registered, keeping existing binding");
            return false;
        }
        tracing::debug!(?view, "view registered for gestures");
        true
    }

    pub fn is_registered(&self, view: ViewId) -> bool {
        self.registered.contains(&view)
    }

    pub fn registered_count(&self) -> usize {
        self.registered.len()
    }

    /// Updates the plotting area of a bound view after a layout change.
    pub fn update_plot_area(&mut self, view: ViewId, plot_area: Rect) {
        if self.registered.contains(&view) {
            self.plot_areas.insert(view, plot_area);
        }
    }

    pub fn plot_area(&self, view: ViewId) -> Option<Rect> {
        self.plot_areas.get(&view).copied()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Wheel over `view` at surface x `x`. Negative `delta_y` (away from the user) zooms in.
    pub fn wheel(
        &mut self,
        viewport: &mut Viewport,
        scheduler: &mut RedrawScheduler,
        view: ViewId,
        x: f32,
        delta_y: f32,
    ) -> GestureResponse {
        let Some(area) = self.bound_area(view) else {
            return GestureResponse::IGNORED;
        };
        let factor = ViewController::compute_zoom_factor(delta_y, self.wheel_factor);
        let fraction = ViewController::map_pixels_to_fraction(x - area.left(), area.width());
        if factor == 1.0 || !viewport.zoom_at(fraction, factor) {
            return GestureResponse::handled(false);
        }
        GestureResponse::handled(scheduler.request())
    }

    /// Press on `view`. Starts a pan session only when zoomed in and no other
    /// session is active.
    pub fn pointer_down(&mut self, viewport: &Viewport, view: ViewId, x: f32) -> GestureResponse {
        if self.bound_area(view).is_none() || !viewport.zoom().is_zoomed() || self.session.is_some()
        {
            return GestureResponse::IGNORED;
        }
        self.session = Some(DragSession {
            view,
            start_x: x,
            start_offset: viewport.zoom().offset,
        });
        GestureResponse::handled(false)
    }

    /// Pointer moved anywhere. Pans relative to the offset captured at press time.
    pub fn pointer_move(
        &mut self,
        viewport: &mut Viewport,
        scheduler: &mut RedrawScheduler,
        x: f32,
    ) -> GestureResponse {
        let Some(session) = self.session else {
            return GestureResponse::IGNORED;
        };
        let width = self
            .plot_areas
            .get(&session.view)
            .map(Rect::width)
            .unwrap_or(0.0);
        let delta =
            ViewController::drag_delta_fraction(session.start_x, x, width, viewport.zoom().scale);
        if !viewport.pan_from(session.start_offset, delta) {
            return GestureResponse::handled(false);
        }
        GestureResponse::handled(scheduler.request())
    }

    /// Pointer released anywhere. Ends the session, if any.
    pub fn pointer_up(&mut self) -> GestureResponse {
        match self.session.take() {
            Some(_) => GestureResponse::handled(false),
            None => GestureResponse::IGNORED,
        }
    }

    pub fn cursor(&self, view: ViewId, viewport: &Viewport) -> CursorAffordance {
        if !self.registered.contains(&view) {
            return CursorAffordance::Default;
        }
        match self.session {
            Some(s) if s.view == view => CursorAffordance::Grabbing,
            _ if viewport.zoom().is_zoomed() => CursorAffordance::Grab,
            _ => CursorAffordance::Default,
        }
    }

    fn bound_area(&self, view: ViewId) -> Option<Rect> {
        if !self.registered.contains(&view) {
            return None;
        }
        self.plot_areas.get(&view).copied()
    }
}
