//! Command-level tests against an in-memory store

use mandi_cli::cli::{
    CliDirection, FeedArgs, ImportArgs, PostArgs, ScanArgs, StatsArgs, SuppliersArgs, TargetKind,
    VoteArgs, WatchArgs,
};
use mandi_cli::commands;
use mandi_cli::config::OutputFormat;
use mandi_cli::{CliError, Config, Formatter};
use mandi_domain::traits::{PostStore, SupplierStore};
use mandi_domain::VoteDirection;
use mandi_store::SqliteStore;
use std::fs;
use std::path::PathBuf;

const SEED: &str = r#"
{
    "suppliers": [
        {
            "id": "s-spice",
            "name": "Spice Palace",
            "category": "spices",
            "thumbs_up": 40,
            "thumbs_down": 2,
            "is_verified": true,
            "location": { "latitude": 28.6562, "longitude": 77.2410, "area": "Khari Baoli", "city": "Delhi" }
        },
        {
            "id": "s-dairy",
            "name": "Anand Dairy",
            "category": "dairy",
            "location": { "latitude": 28.5355, "longitude": 77.3910, "area": "Sector 18", "city": "Noida" }
        }
    ],
    "posts": [
        {
            "id": "p1",
            "content": "Got tomatoes from Green Valley Farms",
            "category": "vegetables",
            "author": "Rajesh",
            "likes": 5,
            "dislikes": 1,
            "created_at": 1700000000,
            "location": { "latitude": 28.6519, "longitude": 77.1909, "area": "Karol Bagh", "city": "Delhi" }
        },
        {
            "id": "p2",
            "content": "Got tomatoes from Green Valley Farms",
            "category": "vegetables",
            "author": "Priya",
            "likes": 5,
            "dislikes": 1,
            "created_at": 1700000100,
            "location": { "latitude": 28.7073, "longitude": 77.1755, "area": "Azadpur", "city": "Delhi" }
        },
        {
            "id": "p3",
            "content": "Spice Palace haldi is pure",
            "category": "spices",
            "author": "Amit",
            "created_at": 1700000200
        }
    ]
}
"#;

fn quiet() -> Formatter {
    Formatter::new(OutputFormat::Quiet, false)
}

fn config() -> Config {
    let mut config = Config::default();
    config.settings.user = Some("asha".to_string());
    config
}

fn seed_file(dir: &tempfile::TempDir) -> PathBuf {
    let path = dir.path().join("seed.json");
    fs::write(&path, SEED).unwrap();
    path
}

async fn seeded_store(dir: &tempfile::TempDir) -> SqliteStore {
    let mut store = SqliteStore::in_memory().unwrap();
    let args = ImportArgs {
        file: Some(seed_file(dir)),
        stdin: false,
        scan: false,
    };
    commands::execute_import(args, &mut store, &config(), &quiet())
        .await
        .unwrap();
    store
}

#[tokio::test]
async fn test_import_records_detected_supplier() {
    let dir = tempfile::tempdir().unwrap();
    let store = seeded_store(&dir).await;

    assert_eq!(store.post_count().unwrap(), 3);
    assert_eq!(store.list_suppliers().unwrap().len(), 2);

    let post = store.get_post(&"p1".into()).unwrap().unwrap();
    assert_eq!(post.supplier_name.as_deref(), Some("Green Valley Farms"));
    assert_eq!(post.author.id.as_str(), "rajesh");
}

#[tokio::test]
async fn test_reimport_skips_existing() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = seeded_store(&dir).await;

    let args = ImportArgs {
        file: Some(seed_file(&dir)),
        stdin: false,
        scan: false,
    };
    let summary = commands::execute_import(args, &mut store, &config(), &quiet())
        .await
        .unwrap();

    assert_eq!(summary.suppliers, 0);
    assert_eq!(summary.posts, 0);
    assert_eq!(summary.skipped, 5);
}

#[tokio::test]
async fn test_import_requires_source() {
    let mut store = SqliteStore::in_memory().unwrap();
    let args = ImportArgs {
        file: None,
        stdin: false,
        scan: false,
    };
    let result = commands::execute_import(args, &mut store, &config(), &quiet()).await;
    assert!(matches!(result, Err(CliError::InvalidInput(_))));
}

#[tokio::test]
async fn test_scan_promotes_once() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = seeded_store(&dir).await;

    let dry = commands::execute_scan(
        ScanArgs {
            dry_run: true,
            preset: None,
        },
        &mut store,
        &config(),
        &quiet(),
    )
    .await
    .unwrap();
    assert_eq!(dry.suppliers.len(), 1);
    assert_eq!(store.list_suppliers().unwrap().len(), 2);

    let analysis = commands::execute_scan(
        ScanArgs {
            dry_run: false,
            preset: None,
        },
        &mut store,
        &config(),
        &quiet(),
    )
    .await
    .unwrap();
    assert_eq!(analysis.suppliers.len(), 1);
    assert_eq!(analysis.metrics.skipped_existing, 1);

    let promoted = store.find_supplier_by_name("green valley farms").unwrap().unwrap();
    assert_eq!((promoted.thumbs_up, promoted.thumbs_down), (10, 2));
    assert!(promoted.is_verified);
    assert_eq!(promoted.trust_score(), 83);

    let again = commands::execute_scan(
        ScanArgs {
            dry_run: false,
            preset: None,
        },
        &mut store,
        &config(),
        &quiet(),
    )
    .await
    .unwrap();
    assert!(again.suppliers.is_empty());
    assert_eq!(store.list_suppliers().unwrap().len(), 3);
}

#[tokio::test]
async fn test_post_triggers_promotion() {
    let mut store = SqliteStore::in_memory().unwrap();
    let post_args = |author: &str, content: &str| PostArgs {
        content: content.to_string(),
        category: None,
        author: author.to_string(),
        user: None,
        lat: None,
        lon: None,
        area: None,
        city: None,
        address: String::new(),
        no_scan: false,
    };

    let first = commands::execute_post(
        post_args("Amit", "Bought dal from Sharma Store"),
        &mut store,
        &config(),
        &quiet(),
    )
    .await
    .unwrap();
    assert_eq!(first.supplier_name.as_deref(), Some("Sharma Store"));
    assert_eq!(first.author.id.as_str(), "asha");
    assert_eq!(first.location.area, "Delhi");
    assert!(store.list_suppliers().unwrap().is_empty());

    commands::execute_post(
        post_args("Neha", "Rice at Sharma Store was cheap"),
        &mut store,
        &config(),
        &quiet(),
    )
    .await
    .unwrap();
    assert!(store.find_supplier_by_name("Sharma Store").unwrap().is_some());
}

#[tokio::test]
async fn test_suppliers_filter_and_proximity() {
    let dir = tempfile::tempdir().unwrap();
    let store = seeded_store(&dir).await;

    let all = commands::execute_suppliers(
        SuppliersArgs {
            category: None,
            search: None,
            near: true,
            lat: Some(28.5355),
            lon: Some(77.3910),
        },
        &store,
        &config(),
        &quiet(),
    )
    .await
    .unwrap();
    assert_eq!(all[0].item.name, "Anand Dairy");
    assert_eq!(all[0].distance_km, 0.0);
    assert!(all[1].distance_km > 10.0);

    let spices = commands::execute_suppliers(
        SuppliersArgs {
            category: None,
            search: Some("SPICE".to_string()),
            near: false,
            lat: None,
            lon: None,
        },
        &store,
        &config(),
        &quiet(),
    )
    .await
    .unwrap();
    assert_eq!(spices.len(), 1);
    assert_eq!(spices[0].item.name, "Spice Palace");

    let unknown = commands::execute_suppliers(
        SuppliersArgs {
            category: Some("toys".to_string()),
            search: None,
            near: false,
            lat: None,
            lon: None,
        },
        &store,
        &config(),
        &quiet(),
    )
    .await;
    assert!(matches!(unknown, Err(CliError::InvalidInput(_))));
}

#[tokio::test]
async fn test_feed_nearest_first() {
    let dir = tempfile::tempdir().unwrap();
    let store = seeded_store(&dir).await;

    let feed = commands::execute_feed(
        FeedArgs {
            category: Some("vegetables".to_string()),
            limit: 10,
            lat: Some(28.7073),
            lon: Some(77.1755),
        },
        &store,
        &config(),
        &quiet(),
    )
    .await
    .unwrap();

    let ids: Vec<&str> = feed.iter().map(|n| n.item.id.as_str()).collect();
    assert_eq!(ids, vec!["p2", "p1"]);

    let limited = commands::execute_feed(
        FeedArgs {
            category: None,
            limit: 1,
            lat: None,
            lon: None,
        },
        &store,
        &config(),
        &quiet(),
    )
    .await
    .unwrap();
    assert_eq!(limited.len(), 1);
}

#[tokio::test]
async fn test_vote_toggle_and_swap() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = seeded_store(&dir).await;
    let vote = |kind, id: &str, direction| VoteArgs {
        kind,
        id: id.to_string(),
        direction,
        user: None,
    };

    let (change, counters) = commands::execute_vote(
        vote(TargetKind::Supplier, "s-spice", CliDirection::Up),
        &mut store,
        &config(),
        &quiet(),
    )
    .await
    .unwrap();
    assert_eq!(change.current, Some(VoteDirection::Up));
    assert_eq!(counters, (41, 2));

    let (change, counters) = commands::execute_vote(
        vote(TargetKind::Supplier, "s-spice", CliDirection::Down),
        &mut store,
        &config(),
        &quiet(),
    )
    .await
    .unwrap();
    assert_eq!(change.previous, Some(VoteDirection::Up));
    assert_eq!(counters, (40, 3));

    let (change, counters) = commands::execute_vote(
        vote(TargetKind::Post, "p3", CliDirection::Up),
        &mut store,
        &config(),
        &quiet(),
    )
    .await
    .unwrap();
    assert_eq!(counters, (1, 0));
    assert!(!change.is_retraction());

    let (change, counters) = commands::execute_vote(
        vote(TargetKind::Post, "p3", CliDirection::Up),
        &mut store,
        &config(),
        &quiet(),
    )
    .await
    .unwrap();
    assert!(change.is_retraction());
    assert_eq!(counters, (0, 0));
}

#[tokio::test]
async fn test_vote_needs_user_and_target() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = seeded_store(&dir).await;

    let anonymous = commands::execute_vote(
        VoteArgs {
            kind: TargetKind::Post,
            id: "p1".to_string(),
            direction: CliDirection::Up,
            user: None,
        },
        &mut store,
        &Config::default(),
        &quiet(),
    )
    .await;
    assert!(matches!(anonymous, Err(CliError::InvalidInput(_))));

    let missing = commands::execute_vote(
        VoteArgs {
            kind: TargetKind::Post,
            id: "ghost".to_string(),
            direction: CliDirection::Up,
            user: None,
        },
        &mut store,
        &config(),
        &quiet(),
    )
    .await;
    assert!(matches!(missing, Err(CliError::Store(_))));
}

#[tokio::test]
async fn test_stats() {
    let dir = tempfile::tempdir().unwrap();
    let store = seeded_store(&dir).await;

    let stats = commands::execute_stats(
        StatsArgs {
            name: "spice palace".to_string(),
        },
        &store,
        &config(),
        &quiet(),
    )
    .await
    .unwrap();
    assert_eq!(stats.total_posts, 1);
    assert_eq!(stats.average_rating, Some(95.2));

    let unknown = commands::execute_stats(
        StatsArgs {
            name: "Nobody Traders".to_string(),
        },
        &store,
        &config(),
        &quiet(),
    )
    .await;
    assert!(matches!(unknown, Err(CliError::NotFound(_))));
}

#[tokio::test]
async fn test_watch_bounded() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = seeded_store(&dir).await;

    commands::execute_watch(
        WatchArgs {
            interval: Some(1),
            cycles: Some(1),
            dry_run: false,
        },
        &mut store,
        &config(),
        &quiet(),
    )
    .await
    .unwrap();

    assert!(store.find_supplier_by_name("Green Valley Farms").unwrap().is_some());
}

#[test]
fn test_open_store_creates_directory() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::default();
    config.settings.database = Some(dir.path().join("nested").join("mandi.db"));

    let store = commands::open_store(&config).unwrap();
    assert_eq!(store.post_count().unwrap(), 0);
    assert!(dir.path().join("nested").join("mandi.db").exists());
}
