// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Refresh service wiring a store to the metrics engine

use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::EngineConfig;
use crate::intelligence::{MetricsEngine, MetricsSnapshot};
use crate::logging::AppLogger;
use crate::store::{ActivityStore, MetricsStore, StoreError, StoreResult};

/// Fetches an athlete's activities, computes a snapshot and persists it
pub struct MetricsService<S> {
    store: Arc<S>,
    engine: MetricsEngine,
}

impl<S> MetricsService<S>
where
    S: ActivityStore + MetricsStore,
{
    /// Create a service with the default engine configuration
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            engine: MetricsEngine::new(),
        }
    }

    /// Create a service with a custom engine configuration
    pub fn with_config(store: Arc<S>, config: EngineConfig) -> Self {
        Self {
            store,
            engine: MetricsEngine::with_config(config),
        }
    }

    /// Underlying store
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Refresh as of the current instant
    pub fn refresh_athlete(&self, athlete_id: &str) -> StoreResult<MetricsSnapshot> {
        self.refresh_athlete_at(athlete_id, Utc::now())
    }

    /// Refresh as of `now`, replacing the athlete's stored snapshot
    pub fn refresh_athlete_at(
        &self,
        athlete_id: &str,
        now: DateTime<Utc>,
    ) -> StoreResult<MetricsSnapshot> {
        let started = Instant::now();

        let activities = self.store.activities_for_athlete(athlete_id)?;
        let snapshot = self.engine.refresh_at(athlete_id, &activities, now);
        self.store.save_metrics(snapshot.clone())?;

        AppLogger::log_metrics_refresh(
            athlete_id,
            activities.len(),
            snapshot.ac_ratio,
            snapshot.consistency_score,
            duration_millis(started.elapsed()),
        );

        Ok(snapshot)
    }

    /// Refresh several athletes, stopping at the first store error
    pub fn refresh_athletes(&self, athlete_ids: &[&str]) -> StoreResult<Vec<MetricsSnapshot>> {
        let now = Utc::now();
        athlete_ids
            .iter()
            .map(|athlete_id| self.refresh_athlete_at(athlete_id, now))
            .collect()
    }

    /// Most recently stored snapshot, if any
    pub fn latest(&self, athlete_id: &str) -> StoreResult<Option<MetricsSnapshot>> {
        self.store.latest_metrics(athlete_id)
    }

    /// Most recently stored snapshot, returning an error if none exists
    pub fn latest_required(&self, athlete_id: &str) -> StoreResult<MetricsSnapshot> {
        self.latest(athlete_id)?
            .ok_or_else(|| StoreError::NotFound(format!("metrics for athlete {athlete_id}")))
    }
}

/// Whole milliseconds, saturating at `u64::MAX`
fn duration_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
