use fleet_chart::scales::ChartScale;
use fleet_chart::scene::Rect;
use fleet_chart::transform::PlotTransform;
use fleet_chart::viewport::ZoomState;
use glam::Vec2;

fn transform(zoom: ZoomState) -> PlotTransform {
    let area = Rect::new(10.0, 20.0, 100.0, 50.0);
    PlotTransform::for_index(zoom.index_to_pixel(11, area.width()), (0.0, 10.0), area)
}

#[test]
fn test_index_transform_corners() {
    let t = transform(ZoomState::default());
    assert_eq!(t.data_to_screen(0.0, 0.0), Vec2::new(10.0, 70.0));
    assert_eq!(t.data_to_screen(10.0, 10.0), Vec2::new(110.0, 20.0));
    assert_eq!(t.baseline(), 70.0);
    assert_eq!(t.x_scale.domain(), (0.0, 10.0));
    assert_eq!(t.y_scale.range(), (50.0, 0.0));
}

#[test]
fn test_screen_to_data_inverts() {
    let t = transform(ZoomState::default());
    let (x, y) = t.screen_to_data(Vec2::new(60.0, 45.0));
    assert!((x - 5.0).abs() < 1e-4);
    assert!((y - 5.0).abs() < 1e-4);
}

#[test]
fn test_zoomed_points_fall_outside_area() {
    let t = transform(ZoomState {
        scale: 2.0,
        offset: 0.5,
    });
    let x = t.x_data_to_screen(0.0);
    assert!(x < t.area.left());
    assert!(!t.x_in_view(x, 5.0));
    assert!(t.x_in_view(t.x_data_to_screen(5.0), 0.0));
    assert!(t.x_in_view(t.area.right() + 2.0, 3.0));
}

#[test]
fn test_linear_scale_degenerate_domain() {
    let scale = ChartScale::new_linear((3.0, 3.0), (0.0, 200.0));
    assert!(scale.is_degenerate());
    assert_eq!(scale.map(3.0), 100.0);
    assert_eq!(scale.map(42.0), 100.0);
}
