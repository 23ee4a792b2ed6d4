use chrono::{Days, NaiveDate};
use fleet_chart::data_types::{AnomalyKind, AnomalyRecord, SnapshotSummary};
use fleet_chart::gpui_backend::DashboardView;
use fleet_chart::{Dashboard, DashboardConfig, SeriesPoint, Snapshot, Surfaces};
use gpui::prelude::*;
use gpui::*;
use rand::Rng;
use std::collections::BTreeMap;
use tracing_subscriber::EnvFilter;

fn synthetic_snapshot() -> eyre::Result<Snapshot> {
    let mut rng = rand::rng();
    let first = NaiveDate::from_ymd_opt(2024, 1, 1).ok_or_else(|| eyre::eyre!("bad date"))?;
    let days = 120u64;

    let mut entity_daily = BTreeMap::new();
    for id in 1..=8u32 {
        let base = 4.5 + id as f64 * 0.1;
        let mut points = Vec::new();
        for d in 0..days {
            // Entities are not measured every day.
            if rng.random_range(0.0..1.0) < 0.15 {
                continue;
            }
            let median = base + (d as f64 * 0.05).sin() * 0.3 + rng.random_range(-0.1..0.1);
            points.push(SeriesPoint::new(first + Days::new(d), median).with_count(rng.random_range(1..6)));
        }
        entity_daily.insert(id, points);
    }

    let fleet_daily = (0..days)
        .map(|d| {
            let median = 5.0 + (d as f64 * 0.05).sin() * 0.25;
            SeriesPoint::new(first + Days::new(d), median)
                .with_band(median - 0.3, median + 0.3)
                .with_count(rng.random_range(20..60))
        })
        .collect();

    let mut snapshot = Snapshot::new(fleet_daily, entity_daily)?;
    snapshot.anomalies.push(AnomalyRecord {
        entity_id: 3,
        date: first + Days::new(100),
        kind: AnomalyKind::Spike,
        diameter: 6.1,
        prev_diameter: 5.2,
        delta: 0.9,
    });
    snapshot.summary = SnapshotSummary {
        avg_confidence: 0.91,
        measurements: 4200,
    };
    Ok(snapshot)
}

fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let snapshot = synthetic_snapshot()?;
    Application::new().run(move |cx: &mut App| {
        let dashboard = Dashboard::new(snapshot, Surfaces::default(), DashboardConfig::default());
        cx.open_window(WindowOptions::default(), |_window, cx| {
            cx.new(|_cx| DashboardView::new(dashboard))
        })
        .expect("failed to open window");
    });
    Ok(())
}
