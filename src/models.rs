// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Data Models
//!
//! Activity records consumed by the training-load engine.
//!
//! Activities are produced by an ingestion collaborator (provider import, manual
//! entry) and are never mutated by the engine. Numeric fields are kept as `f64`
//! so imported data with fractional seconds or averaged heart rates is accepted
//! as-is; the engine tolerates malformed values instead of rejecting them.
//!
//! ## Core Models
//!
//! - [`Activity`]: a single recorded exercise session
//! - [`NewActivity`]: an activity before the store has assigned it an id
//! - [`ActivityType`]: closed set of session types
//! - [`Provider`]: the source that produced the record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single recorded exercise session
///
/// # Examples
///
/// ```rust
/// use endurance_metrics::models::{Activity, ActivityType};
/// use chrono::Utc;
///
/// let activity = Activity::new("a1", "athlete-1", ActivityType::Run, Utc::now(), 3600.0)
///     .with_distance(10_000.0)
///     .with_heart_rate(150.0, 180.0);
///
/// assert_eq!(activity.duration_minutes(), 60.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Unique identifier for the activity
    pub id: String,
    /// Athlete who owns this activity
    pub athlete_id: String,
    /// Session type
    pub activity_type: ActivityType,
    /// Source of the record
    pub provider: Provider,
    /// When the activity took place (UTC)
    pub timestamp: DateTime<Utc>,
    /// Display name
    pub name: String,
    /// Total duration in seconds
    pub duration_seconds: f64,
    /// Distance in meters, zero for non-distance activities
    #[serde(default)]
    pub distance_meters: f64,
    /// Average heart rate (BPM)
    pub average_heart_rate: Option<f64>,
    /// Maximum heart rate (BPM)
    pub max_heart_rate: Option<f64>,
    /// Elevation gained in meters
    pub elevation_gain: Option<f64>,
    /// Average cadence (steps or revolutions per minute)
    pub cadence: Option<f64>,
    /// Rate of perceived exertion, 1-10
    pub rpe: Option<f64>,
}

/// An activity that has not been assigned an identifier yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewActivity {
    pub athlete_id: String,
    pub activity_type: ActivityType,
    pub provider: Provider,
    pub timestamp: DateTime<Utc>,
    pub name: String,
    pub duration_seconds: f64,
    #[serde(default)]
    pub distance_meters: f64,
    pub average_heart_rate: Option<f64>,
    pub max_heart_rate: Option<f64>,
    pub elevation_gain: Option<f64>,
    pub cadence: Option<f64>,
    pub rpe: Option<f64>,
}

/// Session types recognised by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    #[serde(alias = "Run")]
    Run,
    #[serde(alias = "Ride")]
    Ride,
    #[serde(alias = "Swim")]
    Swim,
    #[serde(alias = "Strength")]
    Strength,
    #[serde(alias = "Other")]
    Other,
}

/// Source that produced an activity record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    #[serde(alias = "Garmin")]
    Garmin,
    #[serde(alias = "Strava")]
    Strava,
    #[serde(alias = "AppleHealth")]
    AppleHealth,
    #[serde(alias = "Coros")]
    Coros,
    #[serde(alias = "Manual")]
    Manual,
}

impl Activity {
    /// Create a manual activity with no distance or physiological signal
    pub fn new(
        id: impl Into<String>,
        athlete_id: impl Into<String>,
        activity_type: ActivityType,
        timestamp: DateTime<Utc>,
        duration_seconds: f64,
    ) -> Self {
        Self {
            id: id.into(),
            athlete_id: athlete_id.into(),
            activity_type,
            provider: Provider::Manual,
            timestamp,
            name: format!("{activity_type} session"),
            duration_seconds,
            distance_meters: 0.0,
            average_heart_rate: None,
            max_heart_rate: None,
            elevation_gain: None,
            cadence: None,
            rpe: None,
        }
    }

    /// Set the distance in meters
    #[must_use]
    pub fn with_distance(mut self, distance_meters: f64) -> Self {
        self.distance_meters = distance_meters;
        self
    }

    /// Set average and maximum heart rate
    #[must_use]
    pub fn with_heart_rate(mut self, average: f64, max: f64) -> Self {
        self.average_heart_rate = Some(average);
        self.max_heart_rate = Some(max);
        self
    }

    /// Set the perceived exertion
    #[must_use]
    pub fn with_rpe(mut self, rpe: f64) -> Self {
        self.rpe = Some(rpe);
        self
    }

    /// Set the source provider
    #[must_use]
    pub fn with_provider(mut self, provider: Provider) -> Self {
        self.provider = provider;
        self
    }

    /// Duration in minutes
    pub fn duration_minutes(&self) -> f64 {
        self.duration_seconds / 60.0
    }

    /// Whether this is a running session
    pub fn is_run(&self) -> bool {
        self.activity_type == ActivityType::Run
    }
}

impl NewActivity {
    /// Attach an identifier, producing a stored activity
    pub fn into_activity(self, id: String) -> Activity {
        Activity {
            id,
            athlete_id: self.athlete_id,
            activity_type: self.activity_type,
            provider: self.provider,
            timestamp: self.timestamp,
            name: self.name,
            duration_seconds: self.duration_seconds,
            distance_meters: self.distance_meters,
            average_heart_rate: self.average_heart_rate,
            max_heart_rate: self.max_heart_rate,
            elevation_gain: self.elevation_gain,
            cadence: self.cadence,
            rpe: self.rpe,
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Run => "Run",
            Self::Ride => "Ride",
            Self::Swim => "Swim",
            Self::Strength => "Strength",
            Self::Other => "Other",
        };
        f.write_str(label)
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Garmin => "Garmin",
            Self::Strava => "Strava",
            Self::AppleHealth => "AppleHealth",
            Self::Coros => "Coros",
            Self::Manual => "Manual",
        };
        f.write_str(label)
    }
}
