// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Engine configuration: load model, rolling windows, insight and trait thresholds

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;

use crate::constants::{insights, load_model, traits, windows};

/// Main engine configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub load_model: LoadModelConfig,
    pub windows: WindowConfig,
    pub insights: InsightThresholds,
    pub traits: TraitThresholds,
}

/// Per-activity training load model parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadModelConfig {
    pub assumed_resting_hr: f64,
    pub hr_intensity_exponent: f64,
    pub rpe_multiplier: f64,
    pub duration_fallback_multiplier: f64,
}

/// Rolling window lengths used by the load aggregator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub acute_days: i64,
    pub chronic_days: i64,
    pub consistency_target_weeks: u32,
}

/// Ratio and consistency thresholds for insight generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightThresholds {
    pub high_risk_ratio: f64,
    pub detraining_ratio: f64,
    pub consistent_effort_score: f64,
}

/// Distance and volume thresholds for performance DNA classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraitThresholds {
    pub endurance_distance_meters: f64,
    pub speedster_distance_meters: f64,
    pub consistency_session_count: usize,
}

impl EngineConfig {
    /// Load configuration from a specific TOML file
    pub fn load_from_file(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read metrics config file: {path}"))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse metrics config file: {path}"))
    }

    /// Parse configuration from TOML text; missing tables keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject window settings the aggregator cannot evaluate
    pub fn validate(&self) -> Result<()> {
        let window_config = &self.windows;

        for (name, days) in [
            ("acute_days", window_config.acute_days),
            ("chronic_days", window_config.chronic_days),
        ] {
            if days <= 0 {
                bail!("windows.{name} must be positive, got {days}");
            }
            if days > windows::MAX_WINDOW_DAYS {
                bail!(
                    "windows.{name} must not exceed {} days, got {days}",
                    windows::MAX_WINDOW_DAYS
                );
            }
        }

        if window_config.consistency_target_weeks == 0 {
            bail!("windows.consistency_target_weeks must be at least 1");
        }

        Ok(())
    }
}

impl WindowConfig {
    /// Acute window length clamped to `1..=MAX_WINDOW_DAYS`
    pub fn acute_span_days(&self) -> i64 {
        self.acute_days.clamp(1, windows::MAX_WINDOW_DAYS)
    }

    /// Chronic window length clamped to `1..=MAX_WINDOW_DAYS`
    pub fn chronic_span_days(&self) -> i64 {
        self.chronic_days.clamp(1, windows::MAX_WINDOW_DAYS)
    }
}

impl Default for LoadModelConfig {
    fn default() -> Self {
        Self {
            assumed_resting_hr: load_model::ASSUMED_RESTING_HR,
            hr_intensity_exponent: load_model::HR_INTENSITY_EXPONENT,
            rpe_multiplier: load_model::RPE_MULTIPLIER,
            duration_fallback_multiplier: load_model::DURATION_FALLBACK_MULTIPLIER,
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            acute_days: windows::ACUTE_WINDOW_DAYS,
            chronic_days: windows::CHRONIC_WINDOW_DAYS,
            consistency_target_weeks: windows::CONSISTENCY_TARGET_WEEKS,
        }
    }
}

impl Default for InsightThresholds {
    fn default() -> Self {
        Self {
            high_risk_ratio: insights::HIGH_RISK_RATIO,
            detraining_ratio: insights::DETRAINING_RATIO,
            consistent_effort_score: insights::CONSISTENT_EFFORT_SCORE,
        }
    }
}

impl Default for TraitThresholds {
    fn default() -> Self {
        Self {
            endurance_distance_meters: traits::ENDURANCE_DISTANCE_METERS,
            speedster_distance_meters: traits::SPEEDSTER_DISTANCE_METERS,
            consistency_session_count: traits::CONSISTENCY_SESSION_COUNT,
        }
    }
}
