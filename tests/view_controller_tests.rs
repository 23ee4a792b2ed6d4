use fleet_chart::view_controller::ViewController;

#[test]
fn test_max_offset() {
    assert_eq!(ViewController::max_offset(1.0), 0.0);
    assert_eq!(ViewController::max_offset(2.0), 0.5);
    assert_eq!(ViewController::max_offset(4.0), 0.75);
    // Scales below 1 never produce a negative window
    assert_eq!(ViewController::max_offset(0.5), 0.0);
}

#[test]
fn test_clamp_offset() {
    assert_eq!(ViewController::clamp_offset(0.7, 2.0), 0.5);
    assert_eq!(ViewController::clamp_offset(-0.1, 2.0), 0.0);
    assert_eq!(ViewController::clamp_offset(0.3, 2.0), 0.3);
    assert_eq!(ViewController::clamp_offset(f64::NAN, 2.0), 0.0);
}

#[test]
fn test_zoom_offset_keeps_anchor() {
    let offset = ViewController::zoom_offset_at(0.0, 0.5, 1.0, 1.3);
    assert!((offset - (0.5 - 0.5 / 1.3)).abs() < 1e-12);
    assert!((offset - 0.1154).abs() < 1e-3);

    // The anchor keeps its distance to the window start, measured in zoomed units
    let (old_scale, new_scale, old_offset, f) = (2.0, 3.0, 0.25, 0.4);
    let new_offset = ViewController::zoom_offset_at(old_offset, f, old_scale, new_scale);
    assert!(((f - new_offset) * new_scale - (f - old_offset) * old_scale).abs() < 1e-12);
    assert!((new_offset - 0.3).abs() < 1e-12);
}

#[test]
fn test_compute_zoom_factor() {
    assert_eq!(ViewController::compute_zoom_factor(-3.0, 1.3), 1.3);
    assert!((ViewController::compute_zoom_factor(3.0, 1.3) - 1.0 / 1.3).abs() < 1e-12);
    assert_eq!(ViewController::compute_zoom_factor(0.0, 1.3), 1.0);
}

#[test]
fn test_drag_delta_fraction() {
    // Dragging left by 50px over 500px at 2x moves the window right by 5%
    assert!((ViewController::drag_delta_fraction(100.0, 50.0, 500.0, 2.0) - 0.05).abs() < 1e-12);
    assert!((ViewController::drag_delta_fraction(50.0, 100.0, 500.0, 2.0) + 0.05).abs() < 1e-12);
    assert_eq!(ViewController::drag_delta_fraction(100.0, 50.0, 0.0, 2.0), 0.0);
}

#[test]
fn test_map_pixels_to_fraction() {
    assert_eq!(ViewController::map_pixels_to_fraction(250.0, 500.0), 0.5);
    assert_eq!(ViewController::map_pixels_to_fraction(-10.0, 500.0), 0.0);
    assert_eq!(ViewController::map_pixels_to_fraction(900.0, 500.0), 1.0);
    assert_eq!(ViewController::map_pixels_to_fraction(10.0, 0.0), 0.0);
}

#[test]
fn test_map_pixels_to_slot() {
    assert_eq!(ViewController::map_pixels_to_slot(0.0, 100.0, 10), Some(0));
    assert_eq!(ViewController::map_pixels_to_slot(55.0, 100.0, 10), Some(5));
    assert_eq!(ViewController::map_pixels_to_slot(100.0, 100.0, 10), Some(9));
    assert_eq!(ViewController::map_pixels_to_slot(150.0, 100.0, 10), Some(9));
    assert_eq!(ViewController::map_pixels_to_slot(-5.0, 100.0, 10), Some(0));
    assert_eq!(ViewController::map_pixels_to_slot(5.0, 100.0, 0), None);
}

#[test]
fn test_pixels_to_slot_delta() {
    assert_eq!(ViewController::pixels_to_slot_delta(26.0, 100.0, 10), 3);
    assert_eq!(ViewController::pixels_to_slot_delta(-14.0, 100.0, 10), -1);
    assert_eq!(ViewController::pixels_to_slot_delta(4.0, 100.0, 10), 0);
    assert_eq!(ViewController::pixels_to_slot_delta(4.0, 0.0, 10), 0);
}
