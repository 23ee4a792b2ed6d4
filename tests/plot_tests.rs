use chrono::{Days, NaiveDate};
use fleet_chart::data_types::{AxisConfig, DashboardConfig, SeriesPoint};
use fleet_chart::plot_types::{
    union_dates, ComparisonPlot, DetectionsPlot, DistributionPlot, EntityPlot, FleetMedianPlot,
    OverlaySeries, PlotRenderer, RenderContext, Surface, NO_DATA_MESSAGE, NO_SELECTION_MESSAGE,
    ZOOM_HINT,
};
use fleet_chart::scene::{DrawCommand, Scene};
use fleet_chart::theme::ChartTheme;
use fleet_chart::viewport::ZoomState;
use fleet_chart::ChartKind;

fn day(i: u64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Days::new(i)
}

fn render(plot: &dyn PlotRenderer, surface: Surface, zoom: ZoomState) -> Scene {
    let config = DashboardConfig::default();
    let theme = ChartTheme::default();
    let axis = AxisConfig::default();
    let margins = match plot.kind() {
        ChartKind::Distribution | ChartKind::Detections => config.bar_margins,
        _ => config.series_margins,
    };
    let ctx = RenderContext {
        surface,
        margins,
        theme: &theme,
        axis: &axis,
        zoom,
        value_unit: &config.value_unit,
    };
    plot.render(&ctx)
}

fn texts(scene: &Scene) -> Vec<String> {
    scene.texts().map(str::to_string).collect()
}

#[test]
fn test_fleet_ticks_round_outward() {
    let points = vec![
        SeriesPoint::new(day(0), 4.93).with_band(4.8, 5.1),
        SeriesPoint::new(day(1), 5.27).with_band(5.0, 5.4),
    ];
    let scene = render(
        &FleetMedianPlot::new(&points),
        Surface::new(720.0, 220.0),
        ZoomState::default(),
    );
    let texts = texts(&scene);
    assert!(texts.contains(&"5".to_string()));
    assert!(texts.contains(&"5.5".to_string()));
    assert_eq!(scene.hover_targets.len(), 2);
    assert_eq!(scene.legend.len(), 2);
    assert!(scene.placeholder.is_none());
}

#[test]
fn test_fleet_rescales_to_visible_window() {
    let points: Vec<SeriesPoint> = (0..100)
        .map(|i| SeriesPoint::new(day(i), i as f64 * 0.1))
        .collect();
    let surface = Surface::new(720.0, 220.0);

    let full = render(&FleetMedianPlot::new(&points), surface, ZoomState::default());
    assert!(texts(&full).contains(&"2".to_string()));
    assert!(full.legend.iter().all(|l| l.label != ZOOM_HINT));
    assert_eq!(full.rects().count(), 0);

    let zoom = ZoomState {
        scale: 4.0,
        offset: 0.75,
    };
    let zoomed = render(&FleetMedianPlot::new(&points), surface, zoom);
    // Only days 74..=99 are visible, so the low ticks disappear
    assert!(!texts(&zoomed).contains(&"2".to_string()));
    assert_eq!(zoomed.hover_targets.len(), 26);

    let bar: Vec<_> = zoomed.rects().collect();
    assert_eq!(bar.len(), 2);
    assert!(bar.iter().all(|r| r.top() == 220.0 - 3.0));
    assert!(zoomed.legend.iter().any(|l| l.label == ZOOM_HINT));
}

#[test]
fn test_fleet_empty_is_placeholder() {
    let scene = render(
        &FleetMedianPlot::new(&[]),
        Surface::new(720.0, 220.0),
        ZoomState::default(),
    );
    assert!(scene.is_placeholder());
    assert_eq!(scene.placeholder.as_deref(), Some(NO_DATA_MESSAGE));
}

#[test]
fn test_entity_caption_and_marks() {
    let points = vec![
        SeriesPoint::new(day(0), 5.0),
        SeriesPoint::new(day(1), 5.2),
        SeriesPoint::new(day(3), 5.1),
    ];
    let plot = EntityPlot::new(Some(7), &points);
    assert_eq!(plot.caption().as_deref(), Some("#7 · 3 days in range"));
    let scene = render(&plot, Surface::new(720.0, 200.0), ZoomState::default());
    let circles = scene
        .commands
        .iter()
        .filter(|c| matches!(c, DrawCommand::Circle { .. }))
        .count();
    assert_eq!(circles, 3);
    assert_eq!(scene.hover_targets.len(), 3);
    assert_eq!(scene.legend[0].label, "#7");

    let empty = render(
        &EntityPlot::new(Some(7), &[]),
        Surface::new(720.0, 200.0),
        ZoomState::default(),
    );
    assert_eq!(empty.placeholder.as_deref(), Some(NO_DATA_MESSAGE));
    assert_eq!(empty.caption.as_deref(), Some("#7 · 0 days in range"));
}

#[test]
fn test_detection_bars() {
    let points: Vec<SeriesPoint> = [2, 4, 6, 8]
        .iter()
        .enumerate()
        .map(|(i, c)| SeriesPoint::new(day(i as u64), 5.0).with_count(*c))
        .collect();
    let scene = render(
        &DetectionsPlot::new(&points),
        Surface::new(360.0, 200.0),
        ZoomState::default(),
    );
    let texts = texts(&scene);
    for tick in ["0", "4", "8"] {
        assert!(texts.contains(&tick.to_string()), "missing tick {tick}");
    }
    let bars: Vec<_> = scene.rects().collect();
    assert_eq!(bars.len(), 4);
    // 300px plot width over 4 days at 72% of each slot
    assert!(bars.iter().all(|r| (r.width() - 54.0).abs() < 1e-3));
    // The tallest bar leaves headroom under the top of the plot area
    let tallest = bars.iter().map(|r| r.height()).fold(0.0f32, f32::max);
    assert!(tallest < 154.0);
    assert!(bars[0].height() < bars[3].height());
    assert_eq!(scene.hover_targets[3].tooltip.value, "8 detections");
}

#[test]
fn test_histogram_single_value() {
    let plot = DistributionPlot::new(Some(day(4)), vec![5.0]);
    assert_eq!(plot.mean(), Some(5.0));
    let scene = render(&plot, Surface::new(360.0, 200.0), ZoomState::default());
    assert_eq!(scene.rects().count(), 1);
    assert!(texts(&scene).contains(&"med 5.00".to_string()));
    assert_eq!(scene.caption.as_deref(), Some("5 January 2024"));
    assert_eq!(scene.hover_targets[0].tooltip.value, "1 entities");
}

#[test]
fn test_histogram_skips_empty_bins() {
    let plot = DistributionPlot::new(None, vec![1.0, 1.1, 1.2, 9.0, f64::NAN]);
    let scene = render(&plot, Surface::new(360.0, 200.0), ZoomState::default());
    assert_eq!(scene.rects().count(), 2);
    assert!((plot.mean().unwrap() - 3.075).abs() < 1e-9);
}

#[test]
fn test_histogram_empty_is_placeholder() {
    let scene = render(
        &DistributionPlot::new(None, vec![]),
        Surface::new(360.0, 200.0),
        ZoomState::default(),
    );
    assert_eq!(scene.placeholder.as_deref(), Some(NO_DATA_MESSAGE));
}

#[test]
fn test_union_dates_dedup() {
    let theme = ChartTheme::default();
    let a = vec![SeriesPoint::new(day(0), 1.0), SeriesPoint::new(day(2), 1.0)];
    let b = vec![SeriesPoint::new(day(1), 2.0), SeriesPoint::new(day(2), 2.0)];
    let series = vec![
        OverlaySeries {
            id: 1,
            color: theme.palette_color(0),
            points: &a,
        },
        OverlaySeries {
            id: 2,
            color: theme.palette_color(1),
            points: &b,
        },
    ];
    assert_eq!(union_dates(&series), vec![day(0), day(1), day(2)]);
}

#[test]
fn test_overlay_breaks_lines_at_gaps() {
    let theme = ChartTheme::default();
    let a: Vec<SeriesPoint> = (0..4).map(|i| SeriesPoint::new(day(i), 5.0)).collect();
    let b = vec![
        SeriesPoint::new(day(0), 6.0),
        SeriesPoint::new(day(1), 6.1),
        SeriesPoint::new(day(3), 6.3),
    ];
    let plot = ComparisonPlot::new(vec![
        OverlaySeries {
            id: 3,
            color: theme.palette_color(0),
            points: &a,
        },
        OverlaySeries {
            id: 7,
            color: theme.palette_color(1),
            points: &b,
        },
    ]);
    let scene = render(&plot, Surface::new(720.0, 220.0), ZoomState::default());
    let subpaths: Vec<usize> = scene.paths().map(|p| p.subpath_count()).collect();
    assert_eq!(subpaths, vec![1, 2]);
    assert_eq!(scene.hover_targets.len(), 7);
    let labels: Vec<&str> = scene.legend.iter().map(|l| l.label.as_str()).collect();
    assert_eq!(labels, vec!["#3", "#7"]);
}

#[test]
fn test_overlay_without_series_is_placeholder() {
    let scene = render(
        &ComparisonPlot::new(vec![]),
        Surface::new(720.0, 220.0),
        ZoomState::default(),
    );
    assert_eq!(scene.placeholder.as_deref(), Some(NO_SELECTION_MESSAGE));
}
