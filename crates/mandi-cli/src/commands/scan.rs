//! Scan command implementation.

use crate::cli::{Preset, ScanArgs};
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use mandi_aggregator::{Aggregator, AggregatorConfig, Analysis};
use mandi_store::SqliteStore;

/// Execute the scan command.
pub async fn execute_scan(
    args: ScanArgs,
    store: &mut SqliteStore,
    config: &Config,
    formatter: &Formatter,
) -> Result<Analysis> {
    let aggregator_config = scan_config(&config.aggregator, args.preset, args.dry_run);
    let dry_run = aggregator_config.dry_run;

    let extractor = super::extractor(config)?;
    let mut aggregator = Aggregator::new(extractor, aggregator_config)?;
    let analysis = aggregator.scan(store)?;

    println!("{}", formatter.format_analysis(&analysis, dry_run)?);

    Ok(analysis)
}

/// Thresholds for one pass: a preset replaces the configured thresholds but
/// keeps the configured fallback location and interval.
pub fn scan_config(base: &AggregatorConfig, preset: Option<Preset>, dry_run: bool) -> AggregatorConfig {
    let thresholds = match preset {
        None | Some(Preset::Default) => base.clone(),
        Some(Preset::Strict) => AggregatorConfig::strict(),
        Some(Preset::Lenient) => AggregatorConfig::lenient(),
    };

    AggregatorConfig {
        dry_run: base.dry_run || dry_run,
        scan_interval_secs: base.scan_interval_secs,
        fallback_location: base.fallback_location.clone(),
        ..thresholds
    }
}
