use fleet_chart::data_types::{AnomalyKind, DashboardConfig, Snapshot};

const PAYLOAD: &str = r#"{
    "fleet_daily": [
        {"date": "2024-01-01", "median": 5.0, "q25": 4.8, "q75": 5.3, "count": 10},
        {"date": "2024-01-02", "median": 5.2, "q25": 4.9, "q75": 5.4, "count": 12}
    ],
    "entity_daily": {
        "7": [
            {"date": "2024-01-02", "median": 6.1},
            {"date": "2024-01-01", "median": 6.0, "count": 4}
        ],
        "3": [{"date": "2024-01-01", "median": 4.9}]
    },
    "anomalies": [
        {"entity_id": 7, "date": "2024-01-02", "type": "spike", "diameter": 6.1, "prev_diameter": 6.0, "delta": 0.1},
        {"entity_id": 3, "date": "2024-01-02", "type": "drop", "diameter": 4.0, "prev_diameter": 4.9, "delta": 0.9}
    ],
    "summary": {"avg_confidence": 0.93, "measurements": 1234}
}"#;

#[test]
fn test_parse_snapshot() {
    let snap = Snapshot::from_json(PAYLOAD).unwrap();
    assert_eq!(snap.fleet_daily.len(), 2);
    assert_eq!(snap.fleet_daily[1].count, Some(12));
    assert_eq!(snap.fleet_daily[0].q25, Some(4.8));

    // Ids come from the map keys when absent, in ascending order
    assert_eq!(snap.entity_ids, vec![3, 7]);
    assert_eq!(snap.entity_position(7), Some(1));

    let series = snap.entity_series(7).unwrap();
    assert!(series[0].date < series[1].date);
    assert_eq!(series[0].count, Some(4));
    assert!(snap.entity_series(99).is_none());

    // The drop with a positive delta is inconsistent and dropped
    assert_eq!(snap.anomalies.len(), 1);
    assert_eq!(snap.anomalies[0].kind, AnomalyKind::Spike);
    assert_eq!(snap.summary.measurements, 1234);
}

#[test]
fn test_unordered_fleet_is_rejected() {
    let payload = r#"{"fleet_daily": [
        {"date": "2024-01-02", "median": 5.0},
        {"date": "2024-01-01", "median": 5.1}
    ]}"#;
    assert!(Snapshot::from_json(payload).is_err());
    assert!(Snapshot::from_json("not json").is_err());
}

#[test]
fn test_duplicate_entity_days_are_merged() {
    let payload = r#"{"fleet_daily": [], "entity_daily": {"1": [
        {"date": "2024-01-01", "median": 5.0},
        {"date": "2024-01-01", "median": 5.5}
    ]}}"#;
    let snap = Snapshot::from_json(payload).unwrap();
    assert_eq!(snap.entity_series(1).unwrap().len(), 1);
}

#[test]
fn test_partial_config_uses_defaults() {
    let config = DashboardConfig::from_json(r#"{"zoom": {"max_scale": 8.0}, "value_unit": "mm"}"#)
        .unwrap();
    assert_eq!(config.zoom.max_scale, 8.0);
    assert_eq!(config.zoom.wheel_factor, 1.3);
    assert_eq!(config.minimap.height, 40.0);
    assert_eq!(config.value_unit, "mm");
    assert_eq!(config.axis.max_bins, 18);
}

#[test]
fn test_invalid_config_is_rejected() {
    assert!(DashboardConfig::from_json(r#"{"zoom": {"max_scale": 0.5}}"#).is_err());
    assert!(DashboardConfig::from_json(r#"{"axis": {"min_bins": 20, "max_bins": 4}}"#).is_err());
    assert!(DashboardConfig::default().validate().is_ok());
}
