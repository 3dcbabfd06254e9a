// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Data Access
//!
//! Store abstractions the metrics service is wired to. The engine never sees
//! a store; callers fetch activities, hand them to the engine and persist the
//! resulting snapshot.
//!
//! [`InMemoryStore`] is a thread-safe implementation backed by concurrent maps,
//! suitable for tests, demos and single-process deployments.

use dashmap::DashMap;
use uuid::Uuid;

use crate::intelligence::MetricsSnapshot;
use crate::logging::AppLogger;
use crate::models::{Activity, NewActivity};

/// Errors raised by store implementations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid activity data: {0}")]
    InvalidData(String),

    /// Storage-layer failure. `InMemoryStore` never returns it; persistent
    /// backends map their driver errors here.
    #[error("Store backend failure: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Read/write access to activity records
pub trait ActivityStore: Send + Sync {
    /// All activities of an athlete, newest first
    fn activities_for_athlete(&self, athlete_id: &str) -> StoreResult<Vec<Activity>>;

    /// Look up a single activity
    fn get_activity(&self, id: &str) -> StoreResult<Option<Activity>>;

    /// Store a new activity, assigning it an identifier
    fn create_activity(&self, activity: NewActivity) -> StoreResult<Activity>;

    /// Remove an activity; returns whether it existed
    fn delete_activity(&self, id: &str) -> StoreResult<bool>;
}

/// Latest-snapshot storage, one snapshot per athlete
pub trait MetricsStore: Send + Sync {
    /// Most recent snapshot of an athlete
    fn latest_metrics(&self, athlete_id: &str) -> StoreResult<Option<MetricsSnapshot>>;

    /// Persist a snapshot, replacing the athlete's previous one
    fn save_metrics(&self, snapshot: MetricsSnapshot) -> StoreResult<()>;
}

/// In-memory activity and metrics store
#[derive(Debug, Default)]
pub struct InMemoryStore {
    activities: DashMap<String, Activity>,
    snapshots: DashMap<String, MetricsSnapshot>,
}

impl InMemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all activities with `activities`
    pub fn seed_activities(&self, activities: Vec<Activity>) {
        self.activities.clear();
        let count = activities.len();
        for activity in activities {
            self.activities.insert(activity.id.clone(), activity);
        }
        AppLogger::log_store_operation("seed", "activities", count, true);
    }

    /// Insert snapshots, replacing existing ones for the same athletes
    pub fn seed_metrics(&self, snapshots: Vec<MetricsSnapshot>) {
        let count = snapshots.len();
        for snapshot in snapshots {
            self.snapshots.insert(snapshot.athlete_id.clone(), snapshot);
        }
        AppLogger::log_store_operation("seed", "metrics", count, true);
    }

    /// Number of stored activities
    pub fn activity_count(&self) -> usize {
        self.activities.len()
    }
}

impl ActivityStore for InMemoryStore {
    fn activities_for_athlete(&self, athlete_id: &str) -> StoreResult<Vec<Activity>> {
        let mut activities: Vec<Activity> = self
            .activities
            .iter()
            .filter(|entry| entry.athlete_id == athlete_id)
            .map(|entry| entry.value().clone())
            .collect();

        // Id as tie-breaker keeps the order stable across map iteration orders
        activities.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then_with(|| a.id.cmp(&b.id)));

        AppLogger::log_store_operation("list", "activities", activities.len(), true);
        Ok(activities)
    }

    fn get_activity(&self, id: &str) -> StoreResult<Option<Activity>> {
        Ok(self.activities.get(id).map(|entry| entry.value().clone()))
    }

    fn create_activity(&self, activity: NewActivity) -> StoreResult<Activity> {
        if activity.athlete_id.trim().is_empty() {
            AppLogger::log_store_operation("create", "activities", 0, false);
            return Err(StoreError::InvalidData(
                "activity must belong to an athlete".to_string(),
            ));
        }

        let activity = activity.into_activity(Uuid::new_v4().to_string());
        self.activities.insert(activity.id.clone(), activity.clone());

        AppLogger::log_store_operation("create", "activities", 1, true);
        Ok(activity)
    }

    fn delete_activity(&self, id: &str) -> StoreResult<bool> {
        let removed = self.activities.remove(id).is_some();
        AppLogger::log_store_operation("delete", "activities", usize::from(removed), true);
        Ok(removed)
    }
}

impl MetricsStore for InMemoryStore {
    fn latest_metrics(&self, athlete_id: &str) -> StoreResult<Option<MetricsSnapshot>> {
        Ok(self.snapshots.get(athlete_id).map(|entry| entry.value().clone()))
    }

    fn save_metrics(&self, snapshot: MetricsSnapshot) -> StoreResult<()> {
        self.snapshots.insert(snapshot.athlete_id.clone(), snapshot);
        AppLogger::log_store_operation("save", "metrics", 1, true);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intelligence::MetricsEngine;
    use crate::models::{ActivityType, Provider};
    use chrono::{Duration, Utc};

    fn new_activity(athlete_id: &str, days_ago: i64) -> NewActivity {
        NewActivity {
            athlete_id: athlete_id.to_string(),
            activity_type: ActivityType::Run,
            provider: Provider::Strava,
            timestamp: Utc::now() - Duration::days(days_ago),
            name: "Morning Strava Run".to_string(),
            duration_seconds: 1800.0,
            distance_meters: 6000.0,
            average_heart_rate: Some(145.0),
            max_heart_rate: Some(172.0),
            elevation_gain: Some(40.0),
            cadence: Some(172.0),
            rpe: Some(6.0),
        }
    }

    #[test]
    fn test_create_assigns_unique_ids() -> StoreResult<()> {
        let store = InMemoryStore::new();
        let first = store.create_activity(new_activity("ath-1", 1))?;
        let second = store.create_activity(new_activity("ath-1", 2))?;

        assert_ne!(first.id, second.id);
        assert_eq!(store.activity_count(), 2);
        assert_eq!(store.get_activity(&first.id)?, Some(first.clone()));
        Ok(())
    }

    #[test]
    fn test_create_requires_athlete() {
        let store = InMemoryStore::new();
        let result = store.create_activity(new_activity("  ", 0));

        assert!(matches!(result, Err(StoreError::InvalidData(_))));
        assert_eq!(store.activity_count(), 0);
    }

    #[test]
    fn test_activities_for_athlete_newest_first() -> StoreResult<()> {
        let store = InMemoryStore::new();
        store.create_activity(new_activity("ath-1", 5))?;
        store.create_activity(new_activity("ath-1", 1))?;
        store.create_activity(new_activity("ath-2", 0))?;
        store.create_activity(new_activity("ath-1", 3))?;

        let activities = store.activities_for_athlete("ath-1")?;
        assert_eq!(activities.len(), 3);
        assert!(activities.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
        assert!(activities.iter().all(|a| a.athlete_id == "ath-1"));
        Ok(())
    }

    #[test]
    fn test_delete_activity() -> StoreResult<()> {
        let store = InMemoryStore::new();
        let created = store.create_activity(new_activity("ath-1", 1))?;

        assert!(store.delete_activity(&created.id)?);
        assert!(!store.delete_activity(&created.id)?);
        assert!(store.get_activity(&created.id)?.is_none());
        Ok(())
    }

    #[test]
    fn test_seed_replaces_activities() -> StoreResult<()> {
        let store = InMemoryStore::new();
        store.create_activity(new_activity("ath-1", 1))?;

        store.seed_activities(vec![Activity::new(
            "seeded",
            "ath-9",
            ActivityType::Strength,
            Utc::now(),
            2400.0,
        )]);

        assert_eq!(store.activity_count(), 1);
        assert!(store.activities_for_athlete("ath-1")?.is_empty());
        assert_eq!(store.activities_for_athlete("ath-9")?.len(), 1);
        Ok(())
    }

    #[test]
    fn test_save_metrics_overwrites() -> StoreResult<()> {
        let store = InMemoryStore::new();
        let engine = MetricsEngine::new();

        store.save_metrics(engine.refresh("ath-1", &[]))?;
        let activity = Activity::new("x", "ath-1", ActivityType::Run, Utc::now(), 3600.0);
        let second = engine.refresh("ath-1", &[activity]);
        store.save_metrics(second.clone())?;

        assert_eq!(store.latest_metrics("ath-1")?, Some(second));
        assert!(store.latest_metrics("ath-2")?.is_none());
        Ok(())
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            StoreError::Backend("connection reset".into()).to_string(),
            "Store backend failure: connection reset"
        );
        assert_eq!(
            StoreError::NotFound("activity a1".into()).to_string(),
            "Not found: activity a1"
        );
    }

    #[test]
    fn test_seed_metrics() -> StoreResult<()> {
        let store = InMemoryStore::new();
        let engine = MetricsEngine::new();
        store.seed_metrics(vec![engine.refresh("a", &[]), engine.refresh("b", &[])]);

        assert!(store.latest_metrics("a")?.is_some());
        assert!(store.latest_metrics("b")?.is_some());
        Ok(())
    }
}
