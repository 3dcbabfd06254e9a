// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Constants Module
//!
//! Default model parameters for the training-load engine and environment-based
//! configuration helpers. The model defaults are mirrored by
//! [`EngineConfig::default`](crate::config::EngineConfig), which is what the
//! engine actually reads at runtime.

use std::env;

/// Training-load model parameters
pub mod load_model {
    /// Resting heart rate assumed when the athlete's real value is unknown (BPM)
    pub const ASSUMED_RESTING_HR: f64 = 50.0;

    /// Exponent weighting applied to heart-rate-reserve intensity
    pub const HR_INTENSITY_EXPONENT: f64 = 1.92;

    /// Load per minute per RPE point
    pub const RPE_MULTIPLIER: f64 = 1.5;

    /// Load per minute when no heart rate or RPE is available
    pub const DURATION_FALLBACK_MULTIPLIER: f64 = 2.0;
}

/// Rolling window parameters
pub mod windows {
    /// Acute (fatigue) window length in days
    pub const ACUTE_WINDOW_DAYS: i64 = 7;

    /// Chronic (fitness) window length in days
    pub const CHRONIC_WINDOW_DAYS: i64 = 28;

    /// Distinct training weeks needed for a full consistency score
    pub const CONSISTENCY_TARGET_WEEKS: u32 = 4;

    /// Milliseconds in one epoch-aligned week bucket
    pub const WEEK_MILLIS: i64 = 7 * 24 * 60 * 60 * 1000;

    /// Upper bound of the consistency score
    pub const MAX_CONSISTENCY_SCORE: f64 = 100.0;

    /// Longest accepted window, roughly ten years
    pub const MAX_WINDOW_DAYS: i64 = 3650;
}

/// Insight thresholds
pub mod insights {
    /// AC ratio above which injury risk is flagged
    pub const HIGH_RISK_RATIO: f64 = 1.5;

    /// AC ratio below which detraining is flagged
    pub const DETRAINING_RATIO: f64 = 0.8;

    /// Consistency score above which consistent effort is praised
    pub const CONSISTENT_EFFORT_SCORE: f64 = 80.0;

    /// Metric name used by the AC ratio insights
    pub const METRIC_AC_RATIO: &str = "AC Ratio";

    /// Metric name used by the consistency insight
    pub const METRIC_CONSISTENCY: &str = "Consistency";
}

/// Performance DNA thresholds
pub mod traits {
    /// Mean run distance (meters) above which an athlete is an endurance type
    pub const ENDURANCE_DISTANCE_METERS: f64 = 10_000.0;

    /// Mean run distance (meters) below which an athlete is a speed type
    pub const SPEEDSTER_DISTANCE_METERS: f64 = 5_000.0;

    /// Session count above which an athlete is flagged as consistent
    pub const CONSISTENCY_SESSION_COUNT: usize = 20;
}

/// Service identity
pub mod service {
    /// Service name used in structured logs
    pub const SERVICE_NAME: &str = "endurance-metrics";

    /// Crate version from Cargo.toml
    pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

    /// Config file name searched in the working directory and config dir
    pub const CONFIG_FILE_NAME: &str = "metrics_config.toml";
}

/// Environment-based configuration
pub mod env_config {
    use super::env;

    /// Explicit engine config path from `METRICS_CONFIG_PATH`
    pub fn config_path() -> Option<String> {
        env::var("METRICS_CONFIG_PATH").ok()
    }

    /// Get log level from environment or default
    pub fn log_level() -> String {
        env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
    }
}
