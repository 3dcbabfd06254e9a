// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Metrics Engine Integration Tests
//!
//! Drives the full pipeline through the public API:
//! 1. Per-activity load for each signal branch
//! 2. Window aggregation and ratio guards
//! 3. Performance DNA and insight selection
//! 4. Snapshot assembly from a JSON activity export

use anyhow::Result;
use chrono::{DateTime, Duration, TimeZone, Utc};
use endurance_metrics::config::EngineConfig;
use endurance_metrics::intelligence::{
    calculate_load_stats, calculate_training_load, detect_performance_dna, generate_insights,
    InsightType, LoadAggregator, MetricsEngine, PerformanceDna,
};
use endurance_metrics::models::{Activity, ActivityType, Provider};

fn reference() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 20, 6, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

fn run(id: &str, at: DateTime<Utc>, minutes: f64) -> Activity {
    Activity::new(id, "athlete-1", ActivityType::Run, at, minutes * 60.0)
}

#[test]
fn test_single_heart_rate_activity_scenario() {
    let now = reference();
    let activity = run("hr", now, 60.0).with_heart_rate(150.0, 180.0);

    let load = calculate_training_load(&activity);
    assert!(load > 255.0 && load < 270.0, "load {load}");

    let stats = calculate_load_stats(std::slice::from_ref(&activity), Some(now));
    assert!((stats.acute_avg - load / 7.0).abs() < 1e-9);
    assert!((stats.chronic_avg - load / 28.0).abs() < 1e-9);
    assert!((stats.ac_ratio - 4.0).abs() < 1e-9);

    let snapshot = MetricsEngine::new().refresh_at("athlete-1", &[activity], now);
    assert_eq!(snapshot.insights[0].title, "High Injury Risk");
    assert_eq!(snapshot.insights[0].insight_type, InsightType::Warning);
    assert_eq!(snapshot.insights[0].value.as_deref(), Some("4.00"));
}

#[test]
fn test_rpe_and_duration_scenarios() {
    let now = reference();
    assert!((calculate_training_load(&run("rpe", now, 30.0).with_rpe(6.0)) - 270.0).abs() < 1e-9);
    assert!((calculate_training_load(&run("plain", now, 45.0)) - 90.0).abs() < 1e-9);
}

#[test]
fn test_zero_history_safety() {
    let stats = calculate_load_stats(&[], Some(reference()));
    assert_eq!(stats.ac_ratio, 0.0);
    assert_eq!(stats.consistency_score, 0.0);

    assert_eq!(detect_performance_dna(&[]), vec![PerformanceDna::Balanced]);

    let insights = generate_insights(stats.ac_ratio, stats.consistency_score);
    assert!(insights.iter().any(|i| i.title == "Detraining Risk"));
}

#[test]
fn test_window_exclusion() {
    let now = reference();
    let activities = vec![
        run("too-old", now - Duration::days(28) - Duration::milliseconds(1), 120.0),
        run("future", now + Duration::minutes(5), 120.0),
    ];

    let stats = LoadAggregator::new().calculate(&activities, now);
    assert_eq!(stats.acute_avg, 0.0);
    assert_eq!(stats.chronic_avg, 0.0);
    assert_eq!(stats.ac_ratio, 0.0);
}

#[test]
fn test_trait_classification_scenario() {
    let now = reference();
    let activities: Vec<Activity> = (0..25)
        .map(|i| run(&format!("r{i}"), now - Duration::days(i), 60.0).with_distance(12_000.0))
        .collect();

    let dna = detect_performance_dna(&activities);
    assert_eq!(
        dna,
        vec![PerformanceDna::EnduranceMonster, PerformanceDna::ConsistencyKing]
    );
}

#[test]
fn test_steady_training_block() {
    let now = reference();
    // Same session every other day for four weeks
    let activities: Vec<Activity> = (0..14)
        .map(|i| {
            run(&format!("d{i}"), now - Duration::days(i * 2), 50.0)
                .with_distance(8_000.0)
                .with_heart_rate(145.0, 185.0)
                .with_provider(Provider::Garmin)
        })
        .collect();

    let snapshot = MetricsEngine::new().refresh_at("athlete-1", &activities, now);

    assert!(snapshot.ac_ratio >= 0.8 && snapshot.ac_ratio <= 1.5, "ratio {}", snapshot.ac_ratio);
    assert_eq!(snapshot.consistency_score, 100.0);
    assert_eq!(snapshot.insights.len(), 2);
    assert_eq!(snapshot.insights[0].title, "Optimal Training Zone");
    assert_eq!(snapshot.insights[1].title, "Consistent Effort");
    assert_eq!(snapshot.performance_dna, vec![PerformanceDna::Balanced]);
    assert_eq!(snapshot.ramp_rate, 0.0);
}

#[test]
fn test_snapshot_from_json_export() -> Result<()> {
    let export = r#"[
        {
            "id": "1",
            "athlete_id": "athlete-1",
            "activity_type": "Run",
            "provider": "Strava",
            "timestamp": "2025-03-19T07:00:00Z",
            "name": "Easy Run",
            "duration_seconds": 2700,
            "distance_meters": 7500
        },
        {
            "id": "2",
            "athlete_id": "athlete-1",
            "activity_type": "strength",
            "provider": "manual",
            "timestamp": "2025-03-10T18:00:00Z",
            "name": "Gym",
            "duration_seconds": 1800,
            "rpe": 7
        }
    ]"#;

    let activities: Vec<Activity> = serde_json::from_str(export)?;
    let snapshot = MetricsEngine::new().refresh_at("athlete-1", &activities, reference());

    // 45 min fallback in the acute window, plus 30 min at RPE 7 in the chronic window
    assert!((snapshot.acute_load - 90.0).abs() < 1e-9);
    assert!((snapshot.chronic_load - 405.0).abs() < 1e-9);
    assert_eq!(snapshot.performance_dna, vec![PerformanceDna::Balanced]);

    let json = serde_json::to_value(&snapshot)?;
    assert_eq!(json["insights"][0]["metric"], "AC Ratio");
    Ok(())
}

#[test]
fn test_engine_uses_loaded_config() -> Result<()> {
    let config = EngineConfig::from_toml_str(
        r#"
[traits]
consistency_session_count = 2

[insights]
high_risk_ratio = 10.0
"#,
    )?;

    let now = reference();
    let activities: Vec<Activity> = (0..3)
        .map(|i| run(&format!("c{i}"), now - Duration::hours(i), 30.0).with_distance(6_000.0))
        .collect();

    let snapshot = MetricsEngine::with_config(config).refresh_at("athlete-1", &activities, now);
    assert_eq!(snapshot.performance_dna, vec![PerformanceDna::ConsistencyKing]);
    assert_eq!(snapshot.insights[0].title, "Optimal Training Zone");
    Ok(())
}

#[test]
fn test_invalid_windows_rejected_at_load() {
    for toml in [
        "[windows]\nacute_days = 0",
        "[windows]\nchronic_days = 100000000000",
        "[windows]\nconsistency_target_weeks = 0",
    ] {
        assert!(EngineConfig::from_toml_str(toml).is_err(), "{toml}");
    }
}

#[test]
fn test_hand_built_windows_never_panic() {
    let mut config = EngineConfig::default();
    config.windows.acute_days = 0;
    config.windows.chronic_days = i64::MAX;

    let now = reference();
    let activities = vec![run("r", now, 45.0)];
    let snapshot = MetricsEngine::with_config(config).refresh_at("athlete-1", &activities, now);

    assert!(snapshot.acute_load.is_finite());
    assert!(snapshot.chronic_load.is_finite());
    assert!(snapshot.ac_ratio.is_finite());
}
