// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Insight generation from load ratio and consistency

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::InsightThresholds;
use crate::constants::insights::{METRIC_AC_RATIO, METRIC_CONSISTENCY};

/// An advisory message shown alongside the metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    /// Unique identifier, fresh on every refresh
    pub id: String,

    /// Severity category
    pub insight_type: InsightType,

    /// Short headline
    pub title: String,

    /// Human-readable explanation
    pub description: String,

    /// Name of the metric the insight refers to
    pub metric: String,

    /// Formatted metric value, if the insight carries one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Severity of an insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightType {
    /// Encouraging observation
    #[serde(alias = "Positive")]
    Positive,

    /// Risk that warrants action
    #[serde(alias = "Warning")]
    Warning,

    /// Informational
    #[serde(alias = "Neutral")]
    Neutral,
}

/// Zone of the acute:chronic ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatioZone {
    /// Acute load well above chronic load
    HighInjuryRisk,
    /// Acute load well below chronic load
    DetrainingRisk,
    /// Between the two thresholds, inclusive
    Optimal,
}

impl Insight {
    /// Create an insight with a freshly generated identifier
    pub fn new(
        insight_type: InsightType,
        title: &str,
        description: &str,
        metric: &str,
        value: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            insight_type,
            title: title.to_string(),
            description: description.to_string(),
            metric: metric.to_string(),
            value,
        }
    }
}

/// Insight generator for training-load advice
#[derive(Debug, Clone, Default)]
pub struct InsightGenerator {
    thresholds: InsightThresholds,
}

impl InsightGenerator {
    /// Create a new insight generator with default thresholds
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new insight generator with custom thresholds
    pub fn with_thresholds(thresholds: InsightThresholds) -> Self {
        Self { thresholds }
    }

    /// Classify an AC ratio. NaN lands in the optimal zone since it fails
    /// both threshold comparisons.
    pub fn ratio_zone(&self, ac_ratio: f64) -> RatioZone {
        if ac_ratio > self.thresholds.high_risk_ratio {
            RatioZone::HighInjuryRisk
        } else if ac_ratio < self.thresholds.detraining_ratio {
            RatioZone::DetrainingRisk
        } else {
            RatioZone::Optimal
        }
    }

    /// Insights for a ratio and consistency score. The first entry is always
    /// the ratio insight.
    pub fn generate_insights(&self, ac_ratio: f64, consistency_score: f64) -> Vec<Insight> {
        let mut insights = vec![Self::ratio_insight(self.ratio_zone(ac_ratio), ac_ratio)];

        if consistency_score > self.thresholds.consistent_effort_score {
            insights.push(Insight::new(
                InsightType::Positive,
                "Consistent Effort",
                "You've maintained a solid training rhythm over the last month.",
                METRIC_CONSISTENCY,
                None,
            ));
        }

        insights
    }

    fn ratio_insight(zone: RatioZone, ac_ratio: f64) -> Insight {
        let value = Some(format!("{ac_ratio:.2}"));

        match zone {
            RatioZone::HighInjuryRisk => Insight::new(
                InsightType::Warning,
                "High Injury Risk",
                "Your acute load is significantly higher than your chronic load. Consider tapering.",
                METRIC_AC_RATIO,
                value,
            ),
            RatioZone::DetrainingRisk => Insight::new(
                InsightType::Neutral,
                "Detraining Risk",
                "Your recent training volume has dropped compared to your monthly average.",
                METRIC_AC_RATIO,
                value,
            ),
            RatioZone::Optimal => Insight::new(
                InsightType::Positive,
                "Optimal Training Zone",
                "Your training load is perfectly balanced for progressive overload.",
                METRIC_AC_RATIO,
                value,
            ),
        }
    }
}

/// Insights with default thresholds
pub fn generate_insights(ac_ratio: f64, consistency_score: f64) -> Vec<Insight> {
    InsightGenerator::new().generate_insights(ac_ratio, consistency_score)
}
