// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Intelligence Module
//!
//! Training-load analytics over an athlete's activity history.
//!
//! The pipeline, leaves first:
//! - [`training_load`]: one activity to a scalar load
//! - [`load_stats`]: acute/chronic averages, AC ratio and consistency
//! - [`performance_dna`]: categorical archetype tags
//! - [`insights`]: advisory messages from ratio and consistency
//! - [`snapshot`]: assembles everything into a [`MetricsSnapshot`]
//!
//! Every stage is a synchronous computation over borrowed data. Nothing here
//! touches storage or holds state between calls, so refreshes for different
//! athletes can run in parallel freely.

pub mod insights;
pub mod load_stats;
pub mod performance_dna;
pub mod snapshot;
pub mod training_load;

pub use insights::{generate_insights, Insight, InsightGenerator, InsightType, RatioZone};
pub use load_stats::{calculate_load_stats, LoadAggregator, LoadStats};
pub use performance_dna::{detect_performance_dna, PerformanceDna, PerformanceDnaClassifier};
pub use snapshot::{refresh_athlete_metrics, MetricsEngine, MetricsSnapshot};
pub use training_load::{calculate_training_load, ActivityLoad, LoadSource, TrainingLoadCalculator};
