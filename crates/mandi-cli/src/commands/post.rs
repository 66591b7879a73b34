//! Post command implementation.

use crate::cli::PostArgs;
use crate::config::Config;
use crate::error::Result;
use crate::input::PostInput;
use crate::output::Formatter;
use mandi_aggregator::Aggregator;
use mandi_domain::traits::PostStore;
use mandi_domain::{Location, Post};
use mandi_store::SqliteStore;

/// Execute the post command.
///
/// Publishes the post with the detected supplier recorded on it, then runs
/// a promotion pass unless `--no-scan` is given.
pub async fn execute_post(
    args: PostArgs,
    store: &mut SqliteStore,
    config: &Config,
    formatter: &Formatter,
) -> Result<Post> {
    let extractor = super::extractor(config)?;
    let location = post_location(&args, &config.home.to_location());
    if !location.is_valid() {
        tracing::warn!(
            "Post coordinates ({}, {}) are invalid; distances to it will be unknown",
            location.latitude,
            location.longitude
        );
    }

    let input = PostInput {
        id: None,
        content: args.content,
        category: args.category,
        author: args.author,
        user_id: args.user.or_else(|| config.settings.user.clone()),
        likes: 0,
        dislikes: 0,
        comments: 0,
        created_at: None,
        location: None,
    };
    let post = input.into_post(&extractor, &location)?;
    let id = store.insert_post(post.clone())?;

    let promoted = if args.no_scan {
        Vec::new()
    } else {
        let mut aggregator = Aggregator::new(extractor, config.aggregator.clone())?;
        aggregator.scan(store)?.suppliers
    };

    if formatter.is_json() {
        let names: Vec<&str> = promoted.iter().map(|s| s.name.as_str()).collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "id": id.to_string(),
                "supplier_name": post.supplier_name,
                "promoted": names,
            }))?
        );
    } else if formatter.is_quiet() {
        println!("{}", id);
    } else {
        println!("{}", formatter.success(&format!("Posted {}", id)));
        if let Some(name) = &post.supplier_name {
            println!("{}", formatter.info(&format!("Supplier detected: {}", name)));
        }
        for supplier in &promoted {
            println!(
                "{}",
                formatter.success(&format!("New supplier listed: {}", supplier.name))
            );
        }
    }

    Ok(post)
}

/// Explicit coordinates with their labels, else home with any label overrides.
fn post_location(args: &PostArgs, home: &Location) -> Location {
    match (args.lat, args.lon) {
        (Some(latitude), Some(longitude)) => Location::new(
            latitude,
            longitude,
            &args.address,
            args.area.clone().unwrap_or_default(),
            args.city.clone().unwrap_or_default(),
        ),
        _ => Location::new(
            home.latitude,
            home.longitude,
            &args.address,
            args.area.clone().unwrap_or_else(|| home.area.clone()),
            args.city.clone().unwrap_or_else(|| home.city.clone()),
        ),
    }
}
