//! Watch command implementation.

use crate::cli::WatchArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use mandi_aggregator::{Aggregator, AggregatorWorker};
use mandi_store::SqliteStore;

/// Execute the watch command.
pub async fn execute_watch(
    args: WatchArgs,
    store: &mut SqliteStore,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let mut aggregator_config = config.aggregator.clone();
    if let Some(secs) = args.interval {
        aggregator_config.scan_interval_secs = secs;
    }
    aggregator_config.dry_run |= args.dry_run;

    let extractor = super::extractor(config)?;
    let mut worker = AggregatorWorker::new(Aggregator::new(extractor, aggregator_config.clone())?);

    if !formatter.is_quiet() && !formatter.is_json() {
        println!(
            "{}",
            formatter.info(&format!(
                "Scanning every {}s. Press Ctrl+C to stop.",
                aggregator_config.scan_interval_secs
            ))
        );
    }

    match args.cycles {
        Some(cycles) => worker.run_cycles(store, cycles).await?,
        None => worker.run(store).await?,
    }

    let metrics = worker.metrics();
    if formatter.is_json() {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "scans": metrics.scan_count,
                "posts_scanned": metrics.posts_scanned,
                "promoted": metrics.promoted,
                "skipped_existing": metrics.skipped_existing,
                "below_threshold": metrics.below_threshold,
            }))?
        );
    } else if formatter.is_quiet() {
        println!("{}", metrics.promoted);
    } else {
        println!("{}", metrics.summary());
    }

    Ok(())
}
