//! Suppliers command implementation.

use crate::cli::SuppliersArgs;
use crate::config::Config;
use crate::error::Result;
use crate::input::{category_filter, origin};
use crate::output::Formatter;
use mandi_domain::traits::SupplierStore;
use mandi_domain::{distance_km, sort_by_proximity, Nearby, Supplier, SupplierQuery};
use mandi_store::SqliteStore;

/// Execute the suppliers command.
pub async fn execute_suppliers(
    args: SuppliersArgs,
    store: &SqliteStore,
    config: &Config,
    formatter: &Formatter,
) -> Result<Vec<Nearby<Supplier>>> {
    let query = SupplierQuery {
        category: category_filter(args.category.as_deref())?,
        text: args.search,
    };
    let origin = origin(args.lat, args.lon, &config.home.to_location());

    let suppliers = store.list_suppliers()?;
    let matching: Vec<Supplier> = query.apply(&suppliers).into_iter().cloned().collect();

    let rows = if args.near {
        sort_by_proximity(&origin, matching)
    } else {
        matching
            .into_iter()
            .map(|supplier| Nearby {
                distance_km: distance_km(&origin, &supplier.location),
                item: supplier,
            })
            .collect()
    };

    println!("{}", formatter.format_suppliers(&rows)?);

    Ok(rows)
}
