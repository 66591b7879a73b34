//! Stats command implementation.

use crate::cli::StatsArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use mandi_aggregator::{supplier_stats, SupplierStats};
use mandi_domain::traits::{PostStore, SupplierStore};
use mandi_store::SqliteStore;

/// Execute the stats command.
pub async fn execute_stats(
    args: StatsArgs,
    store: &SqliteStore,
    config: &Config,
    formatter: &Formatter,
) -> Result<SupplierStats> {
    let supplier = store
        .find_supplier_by_name(&args.name)?
        .ok_or_else(|| CliError::NotFound(format!("supplier '{}'", args.name.trim())))?;

    let extractor = super::extractor(config)?;
    let posts = store.list_posts()?;
    let stats = supplier_stats(&extractor, &supplier, &posts);

    println!("{}", formatter.format_stats(&supplier, &stats)?);

    Ok(stats)
}
