// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Acute/chronic load aggregation and consistency scoring

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::training_load::TrainingLoadCalculator;
use crate::config::{EngineConfig, WindowConfig};
use crate::constants::windows::{MAX_CONSISTENCY_SCORE, WEEK_MILLIS};
use crate::models::Activity;

/// Rolling load statistics relative to a reference instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadStats {
    /// Acute window load divided by the acute window length in days
    pub acute_avg: f64,
    /// Chronic window load divided by the chronic window length in days
    pub chronic_avg: f64,
    /// `acute_avg / chronic_avg`, or 0 when there is no chronic load
    pub ac_ratio: f64,
    /// 0-100, share of target weeks that contained training
    pub consistency_score: f64,
}

/// Aggregates per-activity loads over the acute and chronic windows
#[derive(Debug, Clone, Default)]
pub struct LoadAggregator {
    calculator: TrainingLoadCalculator,
    windows: WindowConfig,
}

impl LoadAggregator {
    /// Create an aggregator with the default model and 7/28 day windows
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an aggregator from engine configuration
    pub fn with_config(config: &EngineConfig) -> Self {
        Self {
            calculator: TrainingLoadCalculator::with_config(config.load_model.clone()),
            windows: config.windows.clone(),
        }
    }

    /// Statistics relative to the current instant
    pub fn calculate_now(&self, activities: &[Activity]) -> LoadStats {
        self.calculate(activities, Utc::now())
    }

    /// Statistics relative to `reference`.
    ///
    /// Both windows end at `reference` inclusive; activities after it are
    /// ignored. Week buckets are epoch-aligned 7-day spans, not calendar weeks.
    pub fn calculate(&self, activities: &[Activity], reference: DateTime<Utc>) -> LoadStats {
        let acute_days = self.windows.acute_span_days();
        let chronic_days = self.windows.chronic_span_days();
        let acute_start = window_start(reference, acute_days);
        let chronic_start = window_start(reference, chronic_days);

        let mut acute_load = 0.0;
        let mut chronic_load = 0.0;
        let mut weeks_with_training = HashSet::new();

        for activity in activities {
            let timestamp = activity.timestamp;
            if timestamp > reference {
                continue;
            }

            let in_acute = timestamp >= acute_start;
            let in_chronic = timestamp >= chronic_start;
            if !in_acute && !in_chronic {
                continue;
            }

            let load = self.calculator.calculate(activity);
            if in_acute {
                acute_load += load;
            }
            if in_chronic {
                chronic_load += load;
                weeks_with_training.insert(week_bucket(timestamp));
            }
        }

        let acute_avg = acute_load / acute_days as f64;
        let chronic_avg = chronic_load / chronic_days as f64;

        let ac_ratio = if chronic_avg == 0.0 {
            0.0
        } else {
            acute_avg / chronic_avg
        };

        let target_weeks = f64::from(self.windows.consistency_target_weeks.max(1));
        let consistency_score = (weeks_with_training.len() as f64 / target_weeks
            * MAX_CONSISTENCY_SCORE)
            .min(MAX_CONSISTENCY_SCORE);

        LoadStats {
            acute_avg,
            chronic_avg,
            ac_ratio,
            consistency_score,
        }
    }
}

/// Start of a window ending at `reference`; saturates at the earliest
/// representable instant
fn window_start(reference: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    Duration::try_days(days)
        .and_then(|span| reference.checked_sub_signed(span))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Epoch-aligned week index of an instant
fn week_bucket(timestamp: DateTime<Utc>) -> i64 {
    timestamp.timestamp_millis().div_euclid(WEEK_MILLIS)
}

/// Load statistics with default configuration; `reference` defaults to now
pub fn calculate_load_stats(activities: &[Activity], reference: Option<DateTime<Utc>>) -> LoadStats {
    let aggregator = LoadAggregator::new();
    match reference {
        Some(reference) => aggregator.calculate(activities, reference),
        None => aggregator.calculate_now(activities),
    }
}
