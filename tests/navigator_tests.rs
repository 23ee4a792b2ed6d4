use chrono::{Days, NaiveDate};
use fleet_chart::data_types::{DateRange, MinimapConfig, SeriesPoint};
use fleet_chart::navigator::{BrushTarget, Navigator};
use fleet_chart::theme::ChartTheme;

fn days(n: u64) -> Vec<NaiveDate> {
    let first = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    (0..n).map(|i| first + Days::new(i)).collect()
}

fn setup() -> (Navigator, Vec<NaiveDate>, DateRange) {
    let d = days(10);
    let range = DateRange::new(d[2], d[5]);
    (Navigator::new(MinimapConfig::default(), 100.0), d, range)
}

fn drag(nav: &mut Navigator, d: &[NaiveDate], range: &DateRange, from: f32, to: f32) -> DateRange {
    nav.begin_drag(from, d, range).unwrap();
    let out = nav.drag_to(to, d).unwrap();
    nav.end_drag();
    out
}

#[test]
fn test_hit_test() {
    let (nav, d, range) = setup();
    assert_eq!(nav.hit_test(20.0, &d, &range), Some(BrushTarget::StartHandle));
    assert_eq!(nav.hit_test(23.0, &d, &range), Some(BrushTarget::StartHandle));
    assert_eq!(nav.hit_test(60.0, &d, &range), Some(BrushTarget::EndHandle));
    assert_eq!(nav.hit_test(40.0, &d, &range), Some(BrushTarget::Band));
    assert_eq!(nav.hit_test(90.0, &d, &range), None);
    assert_eq!(nav.hit_test(5.0, &d, &range), None);
}

#[test]
fn test_start_handle_drag() {
    let (mut nav, d, range) = setup();
    let r = drag(&mut nav, &d, &range, 20.0, 45.0);
    assert_eq!((r.start, r.end), (d[4], d[5]));

    // The start handle cannot pass the end
    let r = drag(&mut nav, &d, &range, 20.0, 80.0);
    assert_eq!((r.start, r.end), (d[5], d[5]));
}

#[test]
fn test_end_handle_drag() {
    let (mut nav, d, range) = setup();
    let r = drag(&mut nav, &d, &range, 60.0, 95.0);
    assert_eq!((r.start, r.end), (d[2], d[9]));

    let r = drag(&mut nav, &d, &range, 60.0, 5.0);
    assert_eq!((r.start, r.end), (d[2], d[2]));
}

#[test]
fn test_band_drag_keeps_length() {
    let (mut nav, d, range) = setup();
    let r = drag(&mut nav, &d, &range, 40.0, 66.0);
    assert_eq!((r.start, r.end), (d[5], d[8]));

    // Past the right edge the band is pushed back inside
    let r = drag(&mut nav, &d, &range, 40.0, 120.0);
    assert_eq!((r.start, r.end), (d[6], d[9]));

    let r = drag(&mut nav, &d, &range, 40.0, -10.0);
    assert_eq!((r.start, r.end), (d[0], d[3]));
}

#[test]
fn test_drag_lifecycle() {
    let (mut nav, d, range) = setup();
    assert!(!nav.is_dragging());
    assert_eq!(nav.drag_to(50.0, &d), None);
    assert_eq!(nav.begin_drag(90.0, &d, &range), None);
    assert!(!nav.is_dragging());

    assert_eq!(nav.begin_drag(40.0, &d, &range), Some(BrushTarget::Band));
    assert!(nav.is_dragging());
    assert_eq!(nav.drag().unwrap().start_idx, 2);
    assert!(nav.end_drag());
    assert!(!nav.end_drag());
}

#[test]
fn test_render_bars_and_band() {
    let d = days(5);
    let counts = [0, 5, 10, 5, 0];
    let fleet: Vec<SeriesPoint> = d
        .iter()
        .zip(counts)
        .map(|(date, c)| SeriesPoint::new(*date, 5.0).with_count(c))
        .collect();
    let nav = Navigator::new(MinimapConfig::default(), 100.0);
    let scene = nav.render(&fleet, Some(DateRange::new(d[1], d[3])), &ChartTheme::default());

    let rects: Vec<_> = scene.rects().collect();
    // One bar per day, the band, and two handles
    assert_eq!(rects.len(), 5 + 3);
    assert_eq!(rects[0].height(), 4.0);
    assert_eq!(rects[2].height(), 40.0 - 4.0);
    assert_eq!(scene.hover_targets.len(), 5);
    assert_eq!(scene.width, 100.0);
    assert_eq!(scene.height, 40.0);
}

#[test]
fn test_render_all_zero_counts_use_floor() {
    let d = days(3);
    let fleet: Vec<SeriesPoint> = d.iter().map(|date| SeriesPoint::new(*date, 1.0)).collect();
    let nav = Navigator::new(MinimapConfig::default(), 90.0);
    let scene = nav.render(&fleet, None, &ChartTheme::default());
    let rects: Vec<_> = scene.rects().collect();
    assert_eq!(rects.len(), 3);
    assert!(rects.iter().all(|r| r.height() == 4.0));
}

#[test]
fn test_render_empty() {
    let nav = Navigator::new(MinimapConfig::default(), 100.0);
    let scene = nav.render(&[], None, &ChartTheme::default());
    assert!(scene.commands.is_empty());
}
