// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Endurance Metrics
//!
//! Training-load analytics for endurance athletes. Turns a history of raw
//! exercise activities (duration, heart rate, perceived exertion) into a
//! metrics snapshot: acute and chronic load, acute:chronic ratio, a
//! consistency score, performance DNA tags and advisory insights.
//!
//! ## Features
//!
//! - **Best-signal load model**: heart-rate reserve, then RPE, then duration
//! - **Rolling windows**: 7-day acute and 28-day chronic load
//! - **Injury-risk advice**: AC ratio zones with human-readable insights
//! - **Configurable**: every model constant can be overridden from TOML
//! - **Store-agnostic**: the engine takes plain slices; stores are injected
//!
//! ## Architecture
//!
//! - **Models**: activity records
//! - **Intelligence**: the pure computation pipeline
//! - **Store**: data-access traits and an in-memory implementation
//! - **Metrics service**: fetch, compute, persist
//! - **Config**: engine parameters
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::Utc;
//! use endurance_metrics::intelligence::{refresh_athlete_metrics, PerformanceDna};
//! use endurance_metrics::models::{Activity, ActivityType};
//!
//! let activities = vec![
//!     Activity::new("a1", "athlete-1", ActivityType::Run, Utc::now(), 3600.0)
//!         .with_distance(12_000.0)
//!         .with_heart_rate(150.0, 180.0),
//! ];
//!
//! let snapshot = refresh_athlete_metrics("athlete-1", &activities);
//! assert_eq!(snapshot.performance_dna, vec![PerformanceDna::EnduranceMonster]);
//! assert_eq!(snapshot.insights[0].title, "High Injury Risk");
//! ```

/// Common data models for activity records
pub mod models;

/// Engine configuration management
pub mod config;

/// Default model parameters and environment helpers
pub mod constants;

/// Training-load analytics pipeline
pub mod intelligence;

/// Data-access traits and in-memory store
pub mod store;

/// Store-backed metrics refresh
pub mod metrics_service;

/// Structured logging setup
pub mod logging;
