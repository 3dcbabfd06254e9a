// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Performance DNA: categorical athlete archetypes derived from training history

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::TraitThresholds;
use crate::models::Activity;

/// Athlete archetype tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PerformanceDna {
    /// Short average run distance
    #[serde(rename = "Speedster")]
    Speedster,
    /// Long average run distance
    #[serde(rename = "Endurance Monster")]
    EnduranceMonster,
    /// Not assigned by the classifier; may appear in imported snapshots
    #[serde(rename = "Negative Splitter")]
    NegativeSplitter,
    /// Not assigned by the classifier; may appear in imported snapshots
    #[serde(rename = "Volume Responder")]
    VolumeResponder,
    /// High session count
    #[serde(rename = "Consistency King")]
    ConsistencyKing,
    /// No distinctive pattern
    #[serde(rename = "Balanced")]
    Balanced,
}

impl PerformanceDna {
    /// Display label
    pub const fn label(self) -> &'static str {
        match self {
            Self::Speedster => "Speedster",
            Self::EnduranceMonster => "Endurance Monster",
            Self::NegativeSplitter => "Negative Splitter",
            Self::VolumeResponder => "Volume Responder",
            Self::ConsistencyKing => "Consistency King",
            Self::Balanced => "Balanced",
        }
    }
}

impl fmt::Display for PerformanceDna {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Distance profile of an athlete's runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DistanceProfile {
    Long,
    Short,
    Middle,
}

/// Assigns performance DNA tags from an activity collection
#[derive(Debug, Clone, Default)]
pub struct PerformanceDnaClassifier {
    thresholds: TraitThresholds,
}

impl PerformanceDnaClassifier {
    /// Create a classifier with default thresholds
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a classifier with custom thresholds
    pub fn with_thresholds(thresholds: TraitThresholds) -> Self {
        Self { thresholds }
    }

    /// Tags in evaluation order; never empty
    pub fn classify(&self, activities: &[Activity]) -> Vec<PerformanceDna> {
        if activities.is_empty() {
            return vec![PerformanceDna::Balanced];
        }

        let mut dna = Vec::new();

        match self.distance_profile(activities) {
            DistanceProfile::Long => dna.push(PerformanceDna::EnduranceMonster),
            DistanceProfile::Short => dna.push(PerformanceDna::Speedster),
            DistanceProfile::Middle => {}
        }

        if activities.len() > self.thresholds.consistency_session_count {
            dna.push(PerformanceDna::ConsistencyKing);
        }

        if dna.is_empty() {
            dna.push(PerformanceDna::Balanced);
        }
        dna
    }

    /// Mean run distance classification; no runs counts as a mean of zero
    fn distance_profile(&self, activities: &[Activity]) -> DistanceProfile {
        let (run_count, total_distance) = activities
            .iter()
            .filter(|a| a.is_run())
            .fold((0_usize, 0.0), |(count, total), a| (count + 1, total + a.distance_meters));

        let mean_distance = total_distance / run_count.max(1) as f64;

        if mean_distance > self.thresholds.endurance_distance_meters {
            DistanceProfile::Long
        } else if mean_distance < self.thresholds.speedster_distance_meters {
            DistanceProfile::Short
        } else {
            DistanceProfile::Middle
        }
    }
}

/// Performance DNA with default thresholds
pub fn detect_performance_dna(activities: &[Activity]) -> Vec<PerformanceDna> {
    PerformanceDnaClassifier::new().classify(activities)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ActivityType;
    use chrono::Utc;

    fn runs(count: usize, distance_meters: f64) -> Vec<Activity> {
        (0..count)
            .map(|i| {
                Activity::new(format!("r{i}"), "athlete", ActivityType::Run, Utc::now(), 3600.0)
                    .with_distance(distance_meters)
            })
            .collect()
    }

    #[test]
    fn test_empty_is_balanced() {
        assert_eq!(detect_performance_dna(&[]), vec![PerformanceDna::Balanced]);
    }

    #[test]
    fn test_long_runs_and_volume() {
        let dna = detect_performance_dna(&runs(25, 12_000.0));
        assert_eq!(
            dna,
            vec![PerformanceDna::EnduranceMonster, PerformanceDna::ConsistencyKing]
        );
    }

    #[test]
    fn test_short_runs() {
        assert_eq!(detect_performance_dna(&runs(3, 4_000.0)), vec![PerformanceDna::Speedster]);
    }

    #[test]
    fn test_middle_distance_is_balanced() {
        assert_eq!(detect_performance_dna(&runs(5, 5_000.0)), vec![PerformanceDna::Balanced]);
        assert_eq!(detect_performance_dna(&runs(5, 10_000.0)), vec![PerformanceDna::Balanced]);
    }

    #[test]
    fn test_session_count_boundary() {
        let twenty = detect_performance_dna(&runs(20, 8_000.0));
        assert_eq!(twenty, vec![PerformanceDna::Balanced]);

        let twenty_one = detect_performance_dna(&runs(21, 8_000.0));
        assert_eq!(twenty_one, vec![PerformanceDna::ConsistencyKing]);
    }

    #[test]
    fn test_non_run_history_has_zero_mean_distance() {
        let rides: Vec<Activity> = (0..3)
            .map(|i| {
                Activity::new(format!("b{i}"), "athlete", ActivityType::Ride, Utc::now(), 3600.0)
                    .with_distance(40_000.0)
            })
            .collect();

        assert_eq!(detect_performance_dna(&rides), vec![PerformanceDna::Speedster]);
    }

    #[test]
    fn test_only_runs_count_toward_distance() {
        let mut activities = runs(2, 12_000.0);
        activities.push(
            Activity::new("swim", "athlete", ActivityType::Swim, Utc::now(), 1800.0)
                .with_distance(1_500.0),
        );

        assert_eq!(
            detect_performance_dna(&activities),
            vec![PerformanceDna::EnduranceMonster]
        );
    }

    #[test]
    fn test_labels_serialize_as_display_text() {
        let json = serde_json::to_string(&vec![
            PerformanceDna::EnduranceMonster,
            PerformanceDna::ConsistencyKing,
        ])
        .unwrap();
        assert_eq!(json, r#"["Endurance Monster","Consistency King"]"#);

        let parsed: PerformanceDna = serde_json::from_str("\"Negative Splitter\"").unwrap();
        assert_eq!(parsed, PerformanceDna::NegativeSplitter);
        assert_eq!(parsed.to_string(), "Negative Splitter");
    }
}
