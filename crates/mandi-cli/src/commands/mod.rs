//! Command implementations.

pub mod detect;
pub mod feed;
pub mod hint;
pub mod import;
pub mod post;
pub mod scan;
pub mod stats;
pub mod suppliers;
pub mod vote;
pub mod watch;

pub use self::detect::execute_detect;
pub use self::feed::execute_feed;
pub use self::hint::execute_hint;
pub use self::import::execute_import;
pub use self::post::execute_post;
pub use self::scan::execute_scan;
pub use self::stats::execute_stats;
pub use self::suppliers::execute_suppliers;
pub use self::vote::execute_vote;
pub use self::watch::execute_watch;

use crate::config::Config;
use crate::error::Result;
use mandi_extractor::SupplierExtractor;
use mandi_store::SqliteStore;
use std::fs;

/// Open the configured database, creating its directory if needed.
pub fn open_store(config: &Config) -> Result<SqliteStore> {
    let path = config.database_path()?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    tracing::debug!("Opening database at {}", path.display());
    Ok(SqliteStore::new(&path)?)
}

/// Build the extractor described by the config.
pub(crate) fn extractor(config: &Config) -> Result<SupplierExtractor> {
    Ok(SupplierExtractor::new(config.extractor.clone())?)
}
