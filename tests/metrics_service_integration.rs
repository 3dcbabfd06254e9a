// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Store-backed refresh tests: activities go in through the store, snapshots
//! come back out of it.

use anyhow::Result;
use chrono::{Duration, Utc};
use endurance_metrics::intelligence::PerformanceDna;
use endurance_metrics::metrics_service::MetricsService;
use endurance_metrics::models::{ActivityType, NewActivity, Provider};
use endurance_metrics::store::{ActivityStore, InMemoryStore, MetricsStore};
use std::sync::Arc;
use std::thread;

fn imported_run(athlete_id: &str, days_ago: i64, distance_meters: f64) -> NewActivity {
    NewActivity {
        athlete_id: athlete_id.to_string(),
        activity_type: ActivityType::Run,
        provider: Provider::Coros,
        timestamp: Utc::now() - Duration::days(days_ago),
        name: "Morning Coros Run".to_string(),
        duration_seconds: 3000.0,
        distance_meters,
        average_heart_rate: Some(140.0),
        max_heart_rate: Some(175.0),
        elevation_gain: Some(80.0),
        cadence: Some(170.0),
        rpe: Some(6.0),
    }
}

#[test]
fn test_refresh_replaces_previous_snapshot() -> Result<()> {
    let store = Arc::new(InMemoryStore::new());
    let service = MetricsService::new(Arc::clone(&store));

    let empty = service.refresh_athlete("ath-1")?;
    assert_eq!(empty.performance_dna, vec![PerformanceDna::Balanced]);

    for day in 0..3 {
        store.create_activity(imported_run("ath-1", day, 11_000.0))?;
    }

    let refreshed = service.refresh_athlete("ath-1")?;
    assert_eq!(refreshed.performance_dna, vec![PerformanceDna::EnduranceMonster]);
    assert!(refreshed.acute_load > 0.0);

    let latest = store.latest_metrics("ath-1")?;
    assert_eq!(latest, Some(refreshed));
    Ok(())
}

#[test]
fn test_deleted_activity_drops_out_of_next_refresh() -> Result<()> {
    let store = Arc::new(InMemoryStore::new());
    let service = MetricsService::new(Arc::clone(&store));

    let kept = store.create_activity(imported_run("ath-1", 1, 6_000.0))?;
    let removed = store.create_activity(imported_run("ath-1", 2, 6_000.0))?;

    let before = service.refresh_athlete("ath-1")?;
    assert!(store.delete_activity(&removed.id)?);
    let after = service.refresh_athlete("ath-1")?;

    assert!(after.acute_load < before.acute_load);
    assert!(store.get_activity(&kept.id)?.is_some());
    Ok(())
}

#[test]
fn test_parallel_refreshes_are_independent() -> Result<()> {
    let store = Arc::new(InMemoryStore::new());
    for athlete in ["ath-1", "ath-2", "ath-3", "ath-4"] {
        for day in 0..5 {
            store.create_activity(imported_run(athlete, day * 3, 4_000.0))?;
        }
    }

    let service = Arc::new(MetricsService::new(Arc::clone(&store)));
    let handles: Vec<_> = ["ath-1", "ath-2", "ath-3", "ath-4"]
        .into_iter()
        .map(|athlete| {
            let service = Arc::clone(&service);
            thread::spawn(move || service.refresh_athlete(athlete))
        })
        .collect();

    let mut ratios = Vec::new();
    for handle in handles {
        let snapshot = handle
            .join()
            .map_err(|_| anyhow::anyhow!("refresh thread panicked"))??;
        assert_eq!(snapshot.performance_dna, vec![PerformanceDna::Speedster]);
        ratios.push(snapshot.ac_ratio);
    }

    // Identical histories produce identical ratios
    assert!(ratios.windows(2).all(|w| (w[0] - w[1]).abs() < 1e-9));
    for athlete in ["ath-1", "ath-2", "ath-3", "ath-4"] {
        assert!(service.latest_required(athlete).is_ok());
    }
    Ok(())
}
