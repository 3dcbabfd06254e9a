// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Structured logging for the engine, the store and the CLI.
//!
//! Output always goes to stderr: the CLI prints snapshot JSON on stdout and
//! the two streams must not mix.

use anyhow::Result;
use serde_json::json;
use std::env;
use std::fmt as std_fmt;
use std::io;
use std::str::FromStr;
use tracing::{debug, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::constants::{env_config, service};

/// Subscriber settings
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub level: String,
    pub format: LogFormat,
    /// Source file and line on every event
    pub include_location: bool,
    /// Thread ids and names on every event
    pub include_thread: bool,
    /// Span open/close events
    pub include_spans: bool,
    pub service_name: String,
    pub service_version: String,
    /// Deployment environment; `production` turns on every detail toggle
    pub environment: String,
}

/// Event rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per line
    Json,
    /// Human-readable multi-field lines
    #[default]
    Pretty,
    /// Message and fields only
    Compact,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            other => Err(format!("unknown log format: {other}")),
        }
    }
}

impl std_fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std_fmt::Formatter<'_>) -> std_fmt::Result {
        f.write_str(match self {
            Self::Json => "json",
            Self::Pretty => "pretty",
            Self::Compact => "compact",
        })
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
            include_location: false,
            include_thread: false,
            include_spans: false,
            service_name: service::SERVICE_NAME.to_string(),
            service_version: service::SERVICE_VERSION.to_string(),
            environment: "development".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Read settings from `RUST_LOG`, `LOG_FORMAT`, `ENVIRONMENT`,
    /// `LOG_INCLUDE_*`, `SERVICE_NAME` and `SERVICE_VERSION`
    pub fn from_env() -> Self {
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
        let production = environment == "production";
        let flag = |name: &str| production || env::var(name).is_ok();

        Self {
            level: env_config::log_level(),
            // Unknown formats fall back to pretty rather than aborting startup
            format: env::var("LOG_FORMAT")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or_default(),
            include_location: flag("LOG_INCLUDE_LOCATION"),
            include_thread: flag("LOG_INCLUDE_THREAD"),
            include_spans: flag("LOG_INCLUDE_SPANS"),
            service_name: env::var("SERVICE_NAME")
                .unwrap_or_else(|_| service::SERVICE_NAME.to_string()),
            service_version: env::var("SERVICE_VERSION")
                .unwrap_or_else(|_| service::SERVICE_VERSION.to_string()),
            environment,
        }
    }

    fn span_events(&self) -> FmtSpan {
        if self.include_spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }

    /// Install the global subscriber. Fails if one is already installed.
    pub fn init(&self) -> Result<()> {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.level))
            .unwrap_or_else(|_| EnvFilter::new("info"));

        // Exactly one of the three layers is Some
        let json_layer = (self.format == LogFormat::Json).then(|| {
            fmt::layer()
                .json()
                .with_file(self.include_location)
                .with_line_number(self.include_location)
                .with_thread_ids(self.include_thread)
                .with_thread_names(self.include_thread)
                .with_span_events(self.span_events())
                .with_writer(io::stderr)
        });
        let pretty_layer = (self.format == LogFormat::Pretty).then(|| {
            fmt::layer()
                .with_file(self.include_location)
                .with_line_number(self.include_location)
                .with_thread_ids(self.include_thread)
                .with_thread_names(self.include_thread)
                .with_span_events(self.span_events())
                .with_writer(io::stderr)
        });
        let compact_layer = (self.format == LogFormat::Compact).then(|| {
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(io::stderr)
        });

        tracing_subscriber::registry()
            .with(filter)
            .with(json_layer)
            .with(pretty_layer)
            .with(compact_layer)
            .try_init()?;

        self.log_startup_info();
        Ok(())
    }

    fn log_startup_info(&self) {
        info!(
            service.name = %self.service_name,
            service.version = %self.service_version,
            environment = %self.environment,
            log.level = %self.level,
            log.format = %self.format,
            "Endurance metrics starting up"
        );

        let summary = json!({
            "service": self.service_name,
            "version": self.service_version,
            "environment": self.environment,
            "log": {
                "level": self.level,
                "format": self.format.to_string(),
                "location": self.include_location,
                "thread": self.include_thread,
                "spans": self.include_spans
            }
        });
        debug!("Logging configured: {}", summary);
    }
}

/// Install the default subscriber
pub fn init_default() -> Result<()> {
    LoggingConfig::default().init()
}

/// Install a subscriber configured from the environment
pub fn init_from_env() -> Result<()> {
    LoggingConfig::from_env().init()
}

/// Domain event helpers with consistent field names
pub struct AppLogger;

impl AppLogger {
    /// A snapshot was computed and stored
    pub fn log_metrics_refresh(
        athlete_id: &str,
        activity_count: usize,
        ac_ratio: f64,
        consistency_score: f64,
        duration_ms: u64,
    ) {
        info!(
            athlete.id = %athlete_id,
            metrics.activity_count = activity_count,
            metrics.ac_ratio = ac_ratio,
            metrics.consistency = consistency_score,
            metrics.duration_ms = duration_ms,
            "Metrics refreshed"
        );
    }

    pub fn log_store_operation(operation: &str, collection: &str, records: usize, success: bool) {
        debug!(
            store.operation = %operation,
            store.collection = %collection,
            store.records = records,
            store.success = success,
            "Store operation"
        );
    }

    /// Which configuration source won and the windows it sets
    pub fn log_engine_config(source: &str, acute_days: i64, chronic_days: i64) {
        info!(
            config.source = %source,
            config.acute_days = acute_days,
            config.chronic_days = chronic_days,
            "Engine configuration loaded"
        );
    }
}
