//! Feed command implementation.

use crate::cli::FeedArgs;
use crate::config::Config;
use crate::error::Result;
use crate::input::{category_filter, origin};
use crate::output::Formatter;
use mandi_domain::traits::PostStore;
use mandi_domain::{sort_by_proximity, Nearby, Post};
use mandi_store::SqliteStore;

/// Execute the feed command.
///
/// Posts are ranked nearest first; posts at the same distance stay newest
/// first.
pub async fn execute_feed(
    args: FeedArgs,
    store: &SqliteStore,
    config: &Config,
    formatter: &Formatter,
) -> Result<Vec<Nearby<Post>>> {
    let category = category_filter(args.category.as_deref())?;
    let origin = origin(args.lat, args.lon, &config.home.to_location());

    let posts = store
        .list_posts()?
        .into_iter()
        .filter(|p| category.is_none() || p.category == category);

    let mut rows = sort_by_proximity(&origin, posts);
    rows.truncate(args.limit);

    println!("{}", formatter.format_posts(&rows)?);

    Ok(rows)
}
