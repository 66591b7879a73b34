//! Import command implementation.

use crate::cli::ImportArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::input::ImportBundle;
use crate::output::Formatter;
use mandi_aggregator::Aggregator;
use mandi_domain::traits::{PostStore, SupplierStore};
use mandi_store::{SqliteStore, StoreError};
use std::fs;
use std::io::{self, Read};

/// What an import wrote.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub suppliers: usize,
    pub posts: usize,
    /// Records whose id or supplier name already existed
    pub skipped: usize,
}

/// Execute the import command.
pub async fn execute_import(
    args: ImportArgs,
    store: &mut SqliteStore,
    config: &Config,
    formatter: &Formatter,
) -> Result<ImportSummary> {
    // Read the bundle from file or stdin
    let json_data = if args.stdin {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else if let Some(file_path) = args.file {
        fs::read_to_string(file_path)?
    } else {
        return Err(CliError::InvalidInput(
            "Must specify either --file or --stdin".to_string(),
        ));
    };

    let bundle = ImportBundle::from_json(&json_data)?;
    if bundle.is_empty() {
        return Err(CliError::InvalidInput("Nothing to import".to_string()));
    }

    let summary = import_bundle(bundle, store, config)?;

    if !formatter.is_quiet() && !formatter.is_json() {
        println!("{}", formatter.bulk_result("Imported", summary.suppliers, "supplier"));
        println!("{}", formatter.bulk_result("Imported", summary.posts, "post"));
        if summary.skipped > 0 {
            println!(
                "{}",
                formatter.warning(&format!("Skipped {} existing record(s)", summary.skipped))
            );
        }
    }

    if args.scan {
        let extractor = super::extractor(config)?;
        let mut aggregator = Aggregator::new(extractor, config.aggregator.clone())?;
        let analysis = aggregator.scan(store)?;
        println!("{}", formatter.format_analysis(&analysis, config.aggregator.dry_run)?);
    } else if formatter.is_json() {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "suppliers": summary.suppliers,
                "posts": summary.posts,
                "skipped": summary.skipped,
            }))?
        );
    }

    Ok(summary)
}

/// Write suppliers first, then posts; duplicates are skipped, not fatal.
pub fn import_bundle(
    bundle: ImportBundle,
    store: &mut SqliteStore,
    config: &Config,
) -> Result<ImportSummary> {
    let extractor = super::extractor(config)?;
    let home = config.home.to_location();
    let mut summary = ImportSummary::default();

    for input in bundle.suppliers {
        let supplier = input.into_supplier(&home)?;
        match store.insert_supplier(supplier) {
            Ok(_) => summary.suppliers += 1,
            Err(StoreError::Duplicate(msg)) => {
                tracing::warn!("Skipping supplier: {}", msg);
                summary.skipped += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }

    for input in bundle.posts {
        let post = input.into_post(&extractor, &home)?;
        match store.insert_post(post) {
            Ok(_) => summary.posts += 1,
            Err(StoreError::Duplicate(msg)) => {
                tracing::warn!("Skipping post: {}", msg);
                summary.skipped += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }

    tracing::info!(
        "Imported {} supplier(s) and {} post(s), skipped {}",
        summary.suppliers,
        summary.posts,
        summary.skipped
    );

    Ok(summary)
}
