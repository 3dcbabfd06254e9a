// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use endurance_metrics::config::EngineConfig;
use endurance_metrics::intelligence::MetricsEngine;
use endurance_metrics::logging::{self, AppLogger};
use endurance_metrics::models::Activity;
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Compute a training-load metrics snapshot from a JSON activity export
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON file containing an array of activities
    #[arg(short, long, required_unless_present = "print_config")]
    input: Option<PathBuf>,

    /// Athlete whose activities are analysed
    #[arg(short, long, required_unless_present = "print_config")]
    athlete: Option<String>,

    /// Reference instant (RFC 3339); defaults to now
    #[arg(short, long)]
    reference_date: Option<DateTime<Utc>>,

    /// Engine configuration file (TOML)
    #[arg(short, long)]
    config: Option<String>,

    /// Pretty-print the snapshot JSON
    #[arg(long)]
    pretty: bool,

    /// Print the effective engine configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    logging::init_from_env()?;

    let config = EngineConfig::load(args.config.clone())?;
    AppLogger::log_engine_config(
        args.config.as_deref().unwrap_or("default"),
        config.windows.acute_days,
        config.windows.chronic_days,
    );

    if args.print_config {
        let rendered = toml::to_string_pretty(&config).context("Failed to render config")?;
        println!("{rendered}");
        return Ok(());
    }

    let input = args.input.context("--input is required")?;
    let athlete_id = args.athlete.context("--athlete is required")?;

    let content = fs::read_to_string(&input)
        .with_context(|| format!("Failed to read activities file: {}", input.display()))?;
    let activities: Vec<Activity> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse activities file: {}", input.display()))?;

    let total = activities.len();
    let athlete_activities: Vec<Activity> = activities
        .into_iter()
        .filter(|activity| activity.athlete_id == athlete_id)
        .collect();

    info!(
        athlete.id = %athlete_id,
        activities.total = total,
        activities.selected = athlete_activities.len(),
        "Loaded activities"
    );

    let now = args.reference_date.unwrap_or_else(Utc::now);
    let snapshot = MetricsEngine::with_config(config).refresh_at(&athlete_id, &athlete_activities, now);

    let output = if args.pretty {
        serde_json::to_string_pretty(&snapshot)?
    } else {
        serde_json::to_string(&snapshot)?
    };
    println!("{output}");

    Ok(())
}
