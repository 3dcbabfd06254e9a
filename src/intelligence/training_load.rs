// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Per-activity training load
//!
//! Converts one activity into a scalar load using the best signal available:
//! heart-rate reserve (exponential TRIMP-style model), then perceived exertion,
//! then a flat duration-based estimate.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::LoadModelConfig;
use crate::models::Activity;

/// Signal that produced an activity's load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadSource {
    /// Average and maximum heart rate
    HeartRate,
    /// Self-reported perceived exertion
    Rpe,
    /// Duration only, assuming moderate effort
    Duration,
}

/// Training load of a single activity together with the signal it came from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActivityLoad {
    pub load: f64,
    pub source: LoadSource,
}

/// Calculator for per-activity training load
#[derive(Debug, Clone, Default)]
pub struct TrainingLoadCalculator {
    config: LoadModelConfig,
}

impl TrainingLoadCalculator {
    /// Create a calculator with the default load model
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a calculator with custom model parameters
    pub fn with_config(config: LoadModelConfig) -> Self {
        Self { config }
    }

    /// Training load for an activity. Never fails; malformed input yields a
    /// malformed number.
    pub fn calculate(&self, activity: &Activity) -> f64 {
        self.calculate_detailed(activity).load
    }

    /// Training load and the branch that produced it
    pub fn calculate_detailed(&self, activity: &Activity) -> ActivityLoad {
        let duration_minutes = activity.duration_minutes();

        if let Some(load) = self.heart_rate_load(activity, duration_minutes) {
            return ActivityLoad {
                load,
                source: LoadSource::HeartRate,
            };
        }

        if let Some(rpe) = signal(activity.rpe) {
            return ActivityLoad {
                load: duration_minutes * (rpe * self.config.rpe_multiplier),
                source: LoadSource::Rpe,
            };
        }

        ActivityLoad {
            load: duration_minutes * self.config.duration_fallback_multiplier,
            source: LoadSource::Duration,
        }
    }

    /// Exponential heart-rate-reserve load, `None` when the branch does not apply
    fn heart_rate_load(&self, activity: &Activity, duration_minutes: f64) -> Option<f64> {
        let avg_hr = signal(activity.average_heart_rate)?;
        let max_hr = signal(activity.max_heart_rate)?;

        let resting_hr = self.config.assumed_resting_hr;
        let hr_reserve = max_hr - resting_hr;

        // A non-positive reserve would divide by zero or flip the intensity sign
        if hr_reserve <= 0.0 {
            warn!(
                activity.id = %activity.id,
                activity.max_hr = max_hr,
                resting_hr = resting_hr,
                "Heart rate reserve is not positive, using fallback load"
            );
            return None;
        }

        let intensity = (avg_hr - resting_hr) / hr_reserve;
        Some(duration_minutes * (self.config.hr_intensity_exponent * intensity).exp())
    }
}

/// A recorded value counts as signal only when it is positive
fn signal(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v > 0.0)
}

/// Training load for an activity using the default model
pub fn calculate_training_load(activity: &Activity) -> f64 {
    TrainingLoadCalculator::new().calculate(activity)
}
