use chrono::{Days, NaiveDate};
use fleet_chart::viewport::{IndexRange, Viewport, ZoomState};

fn days(n: u64) -> Vec<NaiveDate> {
    let first = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    (0..n).map(|i| first + Days::new(i)).collect()
}

#[test]
fn test_wheel_zoom_scenario() {
    let mut zoom = ZoomState::default();
    assert!(zoom.zoom_at(0.5, 1.3, 20.0));
    assert!((zoom.scale - 1.3).abs() < 1e-12);
    assert!((zoom.offset - 0.1154).abs() < 1e-3);

    let range = zoom.visible_index_range(100).unwrap();
    assert_eq!(range, IndexRange { start_idx: 11, end_idx: 88 });
}

#[test]
fn test_zoom_round_trip() {
    let mut zoom = ZoomState {
        scale: 2.0,
        offset: 0.25,
    };
    assert!(zoom.zoom_at(0.4, 1.5, 20.0));
    assert!((zoom.scale - 3.0).abs() < 1e-12);
    assert!((zoom.offset - 0.3).abs() < 1e-12);

    assert!(zoom.zoom_at(0.4, 1.0 / 1.5, 20.0));
    assert!((zoom.scale - 2.0).abs() < 1e-12);
    assert!((zoom.offset - 0.25).abs() < 1e-12);
}

#[test]
fn test_zoom_is_noop_at_bounds() {
    let mut zoom = ZoomState::default();
    assert!(!zoom.zoom_at(0.5, 1.0 / 1.3, 20.0));
    assert_eq!(zoom, ZoomState::default());

    let mut zoom = ZoomState {
        scale: 20.0,
        offset: 0.5,
    };
    assert!(!zoom.zoom_at(0.5, 1.3, 20.0));
    assert_eq!(zoom.scale, 20.0);

    // Scale is clamped to the maximum
    let mut zoom = ZoomState {
        scale: 18.0,
        offset: 0.0,
    };
    assert!(zoom.zoom_at(0.0, 1.3, 20.0));
    assert_eq!(zoom.scale, 20.0);
}

#[test]
fn test_pan_is_clamped() {
    let mut zoom = ZoomState {
        scale: 2.0,
        offset: 0.0,
    };
    assert!(zoom.pan_by(0.12));
    assert!((zoom.offset - 0.06).abs() < 1e-12);

    assert!(zoom.pan_by(10.0));
    assert_eq!(zoom.offset, 0.5);
    assert!(!zoom.pan_by(1.0));

    assert!(zoom.pan_by(-10.0));
    assert_eq!(zoom.offset, 0.0);
}

#[test]
fn test_pan_without_zoom_does_nothing() {
    let mut zoom = ZoomState::default();
    assert!(!zoom.pan_by(0.12));
    assert_eq!(zoom.offset, 0.0);
}

#[test]
fn test_pan_from_is_relative_to_start() {
    let mut zoom = ZoomState {
        scale: 4.0,
        offset: 0.2,
    };
    zoom.pan_from(0.2, 0.1);
    zoom.pan_from(0.2, 0.15);
    assert!((zoom.offset - 0.35).abs() < 1e-12);
}

#[test]
fn test_visible_index_range_edges() {
    let zoom = ZoomState::default();
    assert_eq!(zoom.visible_index_range(0), None);
    assert_eq!(
        zoom.visible_index_range(1),
        Some(IndexRange { start_idx: 0, end_idx: 0 })
    );
    assert_eq!(
        zoom.visible_index_range(10),
        Some(IndexRange { start_idx: 0, end_idx: 9 })
    );

    let zoom = ZoomState {
        scale: 20.0,
        offset: 0.95,
    };
    let r = zoom.visible_index_range(3).unwrap();
    assert!(r.start_idx <= r.end_idx && r.end_idx <= 2);
}

#[test]
fn test_index_to_pixel() {
    let zoom = ZoomState::default();
    let m = zoom.index_to_pixel(11, 100.0);
    assert_eq!(m.map(0.0), 0.0);
    assert_eq!(m.map(5.0), 50.0);
    assert_eq!(m.map(10.0), 100.0);

    let zoom = ZoomState {
        scale: 2.0,
        offset: 0.5,
    };
    let m = zoom.index_to_pixel(11, 100.0);
    assert_eq!(m.map(5.0), 0.0);
    assert_eq!(m.map(10.0), 100.0);
    // Points before the window land left of the plot
    assert_eq!(m.map(0.0), -100.0);
    assert!((m.step() - 20.0).abs() < 1e-4);

    // A single point collapses to the middle
    let m = ZoomState::default().index_to_pixel(1, 80.0);
    assert_eq!(m.map(0.0), 40.0);
}

#[test]
fn test_zoom_label() {
    assert_eq!(ZoomState::default().label(), "1×");
    let zoom = ZoomState {
        scale: 2.345,
        offset: 0.0,
    };
    assert_eq!(zoom.label(), "2.3×");
}

#[test]
fn test_index_range_slice() {
    let items = [0, 1, 2, 3, 4];
    let r = IndexRange { start_idx: 1, end_idx: 3 };
    assert_eq!(r.slice(&items), &[1, 2, 3]);
    assert_eq!(r.len(), 3);
    assert!(r.contains(3) && !r.contains(4));
}

#[test]
fn test_set_range_resets_zoom() {
    let d = days(30);
    let mut vp = Viewport::new(&d, 20.0);
    assert_eq!(vp.range(), vp.full_range());
    assert_eq!(vp.range().unwrap().start, d[0]);
    assert_eq!(vp.range().unwrap().end, d[29]);

    vp.zoom_at(0.3, 3.0);
    vp.pan_by(0.2);
    assert!(vp.zoom().is_zoomed());

    let revision = vp.range_revision();
    let range = vp.set_range(d[5], d[10]).unwrap();
    assert_eq!((range.start, range.end), (d[5], d[10]));
    assert_eq!(vp.zoom(), ZoomState::default());
    assert_eq!(vp.range_revision(), revision + 1);
}

#[test]
fn test_set_range_swaps_and_clamps() {
    let d = days(10);
    let mut vp = Viewport::new(&d, 20.0);
    let range = vp.set_range(d[7], d[2]).unwrap();
    assert_eq!((range.start, range.end), (d[2], d[7]));

    let before = d[0] - Days::new(5);
    let after = d[9] + Days::new(5);
    let range = vp.set_range(before, after).unwrap();
    assert_eq!((range.start, range.end), (d[0], d[9]));
}

#[test]
fn test_empty_viewport() {
    let mut vp = Viewport::new(&[], 20.0);
    assert_eq!(vp.range(), None);
    let d = days(2);
    assert_eq!(vp.set_range(d[0], d[1]), None);
    assert_eq!(vp.visible_index_range(0), None);
}
