/// ViewController holds the arithmetic of interactions (zoom, pan, pointer mapping)
/// independently of any windowing or drawing infrastructure, to keep it testable.
pub struct ViewController;

impl ViewController {
    /// Largest valid offset for a zoom scale: the visible window `[offset, offset + 1/scale]`
    /// must stay inside `[0, 1]`.
    pub fn max_offset(scale: f64) -> f64 {
        (1.0 - 1.0 / scale.max(1.0)).max(0.0)
    }

    pub fn clamp_offset(offset: f64, scale: f64) -> f64 {
        if !offset.is_finite() {
            return 0.0;
        }
        offset.clamp(0.0, Self::max_offset(scale))
    }

    /// Offset that keeps the point at `fraction` of the visible window fixed when
    /// the scale moves from `old_scale` to `new_scale`. Not clamped.
    pub fn zoom_offset_at(offset: f64, fraction: f64, old_scale: f64, new_scale: f64) -> f64 {
        fraction - (fraction - offset) * (old_scale / new_scale)
    }

    /// Wheel direction to zoom factor: away from the user (negative delta) zooms in.
    pub fn compute_zoom_factor(delta_y: f32, wheel_factor: f64) -> f64 {
        if delta_y < 0.0 {
            wheel_factor
        } else if delta_y > 0.0 {
            1.0 / wheel_factor
        } else {
            1.0
        }
    }

    /// Offset change for a drag from `start_x` to `current_x` over a view `view_width` wide.
    /// Dragging right moves the window left.
    pub fn drag_delta_fraction(start_x: f32, current_x: f32, view_width: f32, scale: f64) -> f64 {
        if view_width <= 0.0 {
            return 0.0;
        }
        (start_x - current_x) as f64 / view_width as f64 / scale.max(1.0)
    }

    /// Maps a pixel position to a fraction in `[0, 1]` of `total_pixels`.
    pub fn map_pixels_to_fraction(pixels: f32, total_pixels: f32) -> f64 {
        if total_pixels <= 0.0 {
            return 0.0;
        }
        (pixels / total_pixels).clamp(0.0, 1.0) as f64
    }

    /// Maps a pixel position onto one of `n` equal slots, as the minimap does for days.
    pub fn map_pixels_to_slot(pixels: f32, total_pixels: f32, n: usize) -> Option<usize> {
        if n == 0 || total_pixels <= 0.0 {
            return None;
        }
        let frac = ((pixels / total_pixels) as f64).clamp(0.0, 0.9999);
        Some(((frac * n as f64).floor() as usize).min(n - 1))
    }

    /// Whole-slot shift for a horizontal drag of `delta_pixels` over `n` slots.
    pub fn pixels_to_slot_delta(delta_pixels: f32, total_pixels: f32, n: usize) -> i64 {
        if total_pixels <= 0.0 {
            return 0;
        }
        ((delta_pixels / total_pixels) as f64 * n as f64).round() as i64
    }
}
