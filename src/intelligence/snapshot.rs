// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Metrics snapshot assembly

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::insights::{Insight, InsightGenerator};
use super::load_stats::LoadAggregator;
use super::performance_dna::{PerformanceDna, PerformanceDnaClassifier};
use crate::config::EngineConfig;
use crate::models::Activity;

/// Complete metrics output for one athlete at one instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub athlete_id: String,

    /// When the snapshot was computed; also the window reference instant
    pub date: DateTime<Utc>,

    /// Total load over the acute window
    pub acute_load: f64,

    /// Total load over the chronic window
    pub chronic_load: f64,

    /// Ratio of the daily acute and chronic averages
    pub ac_ratio: f64,

    /// 0-100
    pub consistency_score: f64,

    /// Week-over-week load change. Always 0: no prior snapshot is compared.
    pub ramp_rate: f64,

    pub performance_dna: Vec<PerformanceDna>,
    pub insights: Vec<Insight>,
}

/// Runs aggregation, classification and insight generation for an athlete
#[derive(Debug, Clone, Default)]
pub struct MetricsEngine {
    config: EngineConfig,
    aggregator: LoadAggregator,
    classifier: PerformanceDnaClassifier,
    insight_generator: InsightGenerator,
}

impl MetricsEngine {
    /// Create an engine with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine from configuration
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            aggregator: LoadAggregator::with_config(&config),
            classifier: PerformanceDnaClassifier::with_thresholds(config.traits.clone()),
            insight_generator: InsightGenerator::with_thresholds(config.insights.clone()),
            config,
        }
    }

    /// Configuration in use
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Snapshot as of the current instant
    pub fn refresh(&self, athlete_id: &str, activities: &[Activity]) -> MetricsSnapshot {
        self.refresh_at(athlete_id, activities, Utc::now())
    }

    /// Snapshot as of `now`, which is both the window reference and the
    /// snapshot timestamp
    pub fn refresh_at(
        &self,
        athlete_id: &str,
        activities: &[Activity],
        now: DateTime<Utc>,
    ) -> MetricsSnapshot {
        let stats = self.aggregator.calculate(activities, now);
        let performance_dna = self.classifier.classify(activities);
        let insights = self
            .insight_generator
            .generate_insights(stats.ac_ratio, stats.consistency_score);

        // Display totals; the ratio itself stays on daily averages
        let acute_load = stats.acute_avg * self.config.windows.acute_span_days() as f64;
        let chronic_load = stats.chronic_avg * self.config.windows.chronic_span_days() as f64;

        debug!(
            athlete.id = %athlete_id,
            activities = activities.len(),
            acute_load,
            chronic_load,
            ac_ratio = stats.ac_ratio,
            consistency = stats.consistency_score,
            "Computed metrics snapshot"
        );

        MetricsSnapshot {
            athlete_id: athlete_id.to_string(),
            date: now,
            acute_load,
            chronic_load,
            ac_ratio: stats.ac_ratio,
            consistency_score: stats.consistency_score,
            ramp_rate: 0.0,
            performance_dna,
            insights,
        }
    }
}

/// Refresh an athlete's metrics with default configuration
pub fn refresh_athlete_metrics(athlete_id: &str, activities: &[Activity]) -> MetricsSnapshot {
    MetricsEngine::new().refresh(athlete_id, activities)
}
