//! Linear scales mapping a value domain onto a pixel range.

/// A linear mapping from a numeric domain to a pixel range.
///
/// A degenerate domain (`min == max`) maps every value to the midpoint of the
/// range instead of dividing by zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartScale {
    domain: (f64, f64),
    range: (f32, f32),
}

impl ChartScale {
    pub fn new_linear(domain: (f64, f64), range: (f32, f32)) -> Self {
        Self { domain, range }
    }

    pub fn is_degenerate(&self) -> bool {
        let (d_min, d_max) = self.domain;
        (d_max - d_min).abs() < f64::EPSILON || !(d_max - d_min).is_finite()
    }

    pub fn map(&self, value: f64) -> f32 {
        let (r0, r1) = self.range;
        if self.is_degenerate() {
            return (r0 + r1) / 2.0;
        }
        let (d0, d1) = self.domain;
        let res = r0 as f64 + (value - d0) / (d1 - d0) * (r1 - r0) as f64;
        if res.is_nan() || res.is_infinite() {
            (r0 + r1) / 2.0
        } else {
            res as f32
        }
    }

    pub fn invert(&self, pixel: f32) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if self.is_degenerate() || (r1 - r0).abs() < f32::EPSILON {
            return (d0 + d1) / 2.0;
        }
        d0 + ((pixel - r0) / (r1 - r0)) as f64 * (d1 - d0)
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f32, f32) {
        self.range
    }
}

/// Value bounds of a slice, ignoring non-finite values.
pub fn extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        if v.is_finite() {
            min = min.min(v);
            max = max.max(v);
        }
    }
    (min != f64::INFINITY).then_some((min, max))
}

/// Rounds `[min, max]` outward to multiples of `step`, then pads both ends.
///
/// `nice_bounds(4.93, 5.27, 0.2, 0.2)` gives `(4.6, 5.6)`.
pub fn nice_bounds(min: f64, max: f64, step: f64, padding: f64) -> (f64, f64) {
    if step <= 0.0 || !step.is_finite() {
        return (min - padding, max + padding);
    }
    let lo = (min / step).floor() * step - padding;
    let hi = (max / step).ceil() * step + padding;
    if (hi - lo).abs() < f64::EPSILON {
        (lo - 0.5, hi + 0.5)
    } else {
        (lo, hi)
    }
}

/// Ticks at every multiple of `step` inside `[min, max]`, rounded to one decimal.
pub fn step_ticks(min: f64, max: f64, step: f64) -> Vec<f64> {
    if step <= 0.0 || !step.is_finite() || !(max >= min) {
        return vec![];
    }
    let first = (min / step).ceil();
    let last = (max / step + 1e-9).floor();
    if last - first > 1000.0 {
        return vec![];
    }
    let mut ticks = Vec::new();
    let mut k = first;
    while k <= last {
        ticks.push(((k * step) * 10.0).round() / 10.0);
        k += 1.0;
    }
    ticks
}

/// `[0, round(max / 2), max]` ticks used by count axes.
pub fn count_ticks(max: f64) -> Vec<f64> {
    if max <= 0.0 {
        return vec![0.0];
    }
    let mut ticks = vec![0.0, (max / 2.0).round(), max];
    ticks.dedup();
    ticks
}

/// Formats a tick value without trailing noise.
pub fn format_tick(value: f64) -> String {
    if value.fract().abs() < 1e-9 {
        format!("{:.0}", value)
    } else if value.abs() < 0.001 {
        format!("{:.4}", value)
    } else {
        format!("{:.1}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_endpoints() {
        let s = ChartScale::new_linear((0.0, 10.0), (100.0, 0.0));
        assert_eq!(s.map(0.0), 100.0);
        assert_eq!(s.map(10.0), 0.0);
        assert_eq!(s.map(5.0), 50.0);
        assert!((s.invert(25.0) - 7.5).abs() < 1e-9);
    }

    #[test]
    fn degenerate_domain_maps_to_midpoint() {
        let s = ChartScale::new_linear((3.0, 3.0), (0.0, 80.0));
        assert_eq!(s.map(3.0), 40.0);
        assert_eq!(s.map(-100.0), 40.0);
        assert_eq!(s.invert(10.0), 3.0);
    }

    #[test]
    fn nice_bounds_round_outward() {
        let (lo, hi) = nice_bounds(4.93, 5.27, 0.2, 0.2);
        assert!((lo - 4.6).abs() < 1e-9);
        assert!((hi - 5.6).abs() < 1e-9);
    }

    #[test]
    fn step_ticks_stay_inside() {
        let ticks = step_ticks(4.6, 5.6, 0.5);
        assert_eq!(ticks, vec![5.0, 5.5]);
        assert!(step_ticks(1.0, 0.0, 0.5).is_empty());
    }
}
