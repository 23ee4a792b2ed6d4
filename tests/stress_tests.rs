use chrono::{Days, NaiveDate};
use fleet_chart::data_types::{DateRange, MinimapConfig};
use fleet_chart::navigator::{range_indices, Navigator};
use fleet_chart::plot_types::bin_values;
use fleet_chart::viewport::ZoomState;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn days(n: u64) -> Vec<NaiveDate> {
    let first = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();
    (0..n).map(|i| first + Days::new(i)).collect()
}

#[test]
fn test_random_zoom_and_pan_keep_window_inside() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut zoom = ZoomState::default();
    for _ in 0..5_000 {
        if rng.random_bool(0.5) {
            let factor = if rng.random_bool(0.6) { 1.3 } else { 1.0 / 1.3 };
            zoom.zoom_at(rng.random_range(0.0..=1.0), factor, 20.0);
        } else {
            zoom.pan_by(rng.random_range(-0.5..0.5));
        }
        assert!(zoom.scale >= 1.0 && zoom.scale <= 20.0);
        assert!(zoom.offset >= 0.0);
        assert!(zoom.offset + 1.0 / zoom.scale <= 1.0 + 1e-9);

        let n = rng.random_range(1..400usize);
        let r = zoom.visible_index_range(n).unwrap();
        assert!(r.start_idx <= r.end_idx);
        assert!(r.end_idx < n);
    }
}

#[test]
fn test_random_band_drags_keep_length() {
    let mut rng = StdRng::seed_from_u64(7);
    let dates = days(60);
    for _ in 0..1_000 {
        let width = rng.random_range(100.0..1200.0f32);
        let mut nav = Navigator::new(MinimapConfig::default(), width);
        let start = rng.random_range(0..50usize);
        let end = rng.random_range(start + 10..60usize);
        let range = DateRange::new(dates[start], dates[end]);
        let (left, right) = nav.handle_positions(dates.len(), start, end);
        let x = (left + right) / 2.0;
        if nav.begin_drag(x, &dates, &range).is_none() {
            continue;
        }
        let moved = nav
            .drag_to(x + rng.random_range(-width..width), &dates)
            .unwrap();
        nav.end_drag();
        let (s, e) = range_indices(&dates, &moved).unwrap();
        assert_eq!(e - s, end - start);
        assert!(e < dates.len());
    }
}

#[test]
fn test_random_bins_hold_every_value() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..500 {
        let len = rng.random_range(1..60usize);
        let values: Vec<f64> = (0..len).map(|_| rng.random_range(2.0..9.0)).collect();
        let bins = bin_values(&values, 4, 18);
        assert_eq!(bins.len(), len.clamp(4, 18));
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), len);
        for pair in bins.windows(2) {
            assert!((pair[0].x1 - pair[1].x0).abs() < 1e-9);
        }
    }
}
