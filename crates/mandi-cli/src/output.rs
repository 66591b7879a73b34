//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use mandi_aggregator::{Analysis, SupplierStats};
use mandi_domain::{
    DetectedSupplier, Location, Nearby, Post, Supplier, TrustTier, VoteChange, VoteTarget,
};
use serde_json::{json, Value};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format detections, one per line or row.
    pub fn format_detections(&self, detections: &[DetectedSupplier]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let values: Vec<Value> = detections.iter().map(detection_json).collect();
                Ok(serde_json::to_string_pretty(&values)?)
            }
            OutputFormat::Quiet => Ok(detections
                .iter()
                .map(|d| d.name.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if detections.is_empty() {
                    return Ok(self.colorize("No supplier detected.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Supplier", "Tier", "Confidence", "Category", "Location"]);
                for detection in detections {
                    builder.push_record([
                        detection.name.clone(),
                        detection.source.as_str().to_string(),
                        format!("{:.2}", detection.confidence),
                        category_label(detection.category.map(|c| c.as_str())),
                        detection.location.clone().unwrap_or_default(),
                    ]);
                }
                Ok(self.render(builder))
            }
        }
    }

    /// Format a live-input name hint.
    pub fn format_hint(&self, hint: &str) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({ "hint": hint }))?),
            OutputFormat::Quiet => Ok(hint.to_string()),
            OutputFormat::Table if hint.is_empty() => {
                Ok(self.colorize("No supplier name yet.", "yellow"))
            }
            OutputFormat::Table => Ok(format!("Supplier: {}", self.colorize(hint, "cyan"))),
        }
    }

    /// Format suppliers with their distance from the viewer.
    pub fn format_suppliers(&self, suppliers: &[Nearby<Supplier>]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let values: Vec<Value> = suppliers
                    .iter()
                    .map(|n| supplier_json(&n.item, Some(n.distance_km)))
                    .collect();
                Ok(serde_json::to_string_pretty(&values)?)
            }
            OutputFormat::Quiet => Ok(suppliers
                .iter()
                .map(|n| format!("{}\t{}", n.item.id, n.item.name))
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if suppliers.is_empty() {
                    return Ok(self.colorize("No suppliers found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record([
                    "ID", "Name", "Category", "Trust", "Votes", "Verified", "Area", "Distance",
                ]);
                for nearby in suppliers {
                    let supplier = &nearby.item;
                    builder.push_record([
                        supplier.id.to_string(),
                        supplier.name.clone(),
                        category_label(supplier.category.map(|c| c.as_str())),
                        self.trust_label(supplier.trust_score(), supplier.trust_tier()),
                        format!("+{} / -{}", supplier.thumbs_up, supplier.thumbs_down),
                        if supplier.is_verified { "yes" } else { "no" }.to_string(),
                        location_label(&supplier.location),
                        format_distance(nearby.distance_km),
                    ]);
                }
                Ok(self.render(builder))
            }
        }
    }

    /// Format posts with their distance from the viewer.
    pub fn format_posts(&self, posts: &[Nearby<Post>]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let values: Vec<Value> = posts
                    .iter()
                    .map(|n| post_json(&n.item, n.distance_km))
                    .collect();
                Ok(serde_json::to_string_pretty(&values)?)
            }
            OutputFormat::Quiet => Ok(posts
                .iter()
                .map(|n| n.item.id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if posts.is_empty() {
                    return Ok(self.colorize("No posts yet.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record([
                    "ID", "Author", "Post", "Category", "Supplier", "Votes", "Trust", "Distance",
                ]);
                for nearby in posts {
                    let post = &nearby.item;
                    builder.push_record([
                        post.id.to_string(),
                        post.author.name.clone(),
                        truncate(&post.content, 48),
                        category_label(post.category.map(|c| c.as_str())),
                        post.supplier_name.clone().unwrap_or_default(),
                        format!("+{} / -{}", post.likes, post.dislikes),
                        self.tier_label(TrustTier::for_votes(post.likes, post.dislikes)),
                        format_distance(nearby.distance_km),
                    ]);
                }
                Ok(self.render(builder))
            }
        }
    }

    /// Format the result of an aggregation pass.
    pub fn format_analysis(&self, analysis: &Analysis, dry_run: bool) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let suppliers: Vec<Value> = analysis
                    .suppliers
                    .iter()
                    .map(|s| supplier_json(s, None))
                    .collect();
                let metrics = &analysis.metrics;
                Ok(serde_json::to_string_pretty(&json!({
                    "dry_run": dry_run,
                    "suppliers": suppliers,
                    "metrics": {
                        "posts_scanned": metrics.posts_scanned,
                        "detections": metrics.total_detections(),
                        "promoted": metrics.promoted,
                        "skipped_existing": metrics.skipped_existing,
                        "below_threshold": metrics.below_threshold,
                        "runtime_ms": metrics.total_runtime_ms,
                    }
                }))?)
            }
            OutputFormat::Quiet => Ok(analysis
                .suppliers
                .iter()
                .map(|s| s.name.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                let verb = if dry_run { "Would promote" } else { "Promoted" };
                let mut out = if analysis.suppliers.is_empty() {
                    self.info("No new suppliers.")
                } else {
                    let mut builder = Builder::default();
                    builder.push_record(["Name", "Category", "Trust", "Votes", "Verified", "Area"]);
                    for supplier in &analysis.suppliers {
                        builder.push_record([
                            supplier.name.clone(),
                            category_label(supplier.category.map(|c| c.as_str())),
                            self.trust_label(supplier.trust_score(), supplier.trust_tier()),
                            format!("+{} / -{}", supplier.thumbs_up, supplier.thumbs_down),
                            if supplier.is_verified { "yes" } else { "no" }.to_string(),
                            supplier.location.area.clone(),
                        ]);
                    }
                    format!(
                        "{}\n{}",
                        self.success(&format!("{} {} supplier(s)", verb, analysis.suppliers.len())),
                        self.render(builder)
                    )
                };
                out.push_str("\n\n");
                out.push_str(&analysis.metrics.summary());
                Ok(out)
            }
        }
    }

    /// Format statistics for one supplier.
    pub fn format_stats(&self, supplier: &Supplier, stats: &SupplierStats) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
                "supplier": supplier_json(supplier, None),
                "total_posts": stats.total_posts,
                "total_likes": stats.total_likes,
                "total_dislikes": stats.total_dislikes,
                "average_rating": stats.average_rating,
            }))?),
            OutputFormat::Quiet => Ok(stats.total_posts.to_string()),
            OutputFormat::Table => {
                let rating = stats
                    .average_rating
                    .map(|r| format!("{:.1}%", r))
                    .unwrap_or_else(|| "n/a".to_string());

                let mut builder = Builder::default();
                builder.push_record(["Supplier", "Posts", "Likes", "Dislikes", "Rating", "Trust"]);
                builder.push_record([
                    supplier.name.clone(),
                    stats.total_posts.to_string(),
                    stats.total_likes.to_string(),
                    stats.total_dislikes.to_string(),
                    rating,
                    self.trust_label(supplier.trust_score(), supplier.trust_tier()),
                ]);
                Ok(self.render(builder))
            }
        }
    }

    /// Format the outcome of a vote, with the target's counters afterwards.
    pub fn format_vote(
        &self,
        target: &VoteTarget,
        change: &VoteChange,
        counters: (u32, u32),
    ) -> Result<String> {
        let (kind, id) = match target {
            VoteTarget::Post(id) => ("post", id.to_string()),
            VoteTarget::Supplier(id) => ("supplier", id.to_string()),
        };
        let current = change.current.map(|d| d.as_str());

        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
                "target": kind,
                "id": id,
                "previous": change.previous.map(|d| d.as_str()),
                "current": current,
                "up": counters.0,
                "down": counters.1,
            }))?),
            OutputFormat::Quiet => Ok(current.unwrap_or("none").to_string()),
            OutputFormat::Table => {
                let action = match (change.previous, change.current) {
                    (_, None) => "Vote retracted on".to_string(),
                    (Some(_), Some(d)) => format!("Vote changed to {} on", d.as_str()),
                    (None, Some(d)) => format!("Voted {} on", d.as_str()),
                };
                Ok(self.success(&format!(
                    "{} {} {} (now +{} / -{})",
                    action, kind, id, counters.0, counters.1
                )))
            }
        }
    }

    /// Format bulk operation result.
    pub fn bulk_result(&self, operation: &str, count: usize, what: &str) -> String {
        self.success(&format!("{} {} {}(s)", operation, count, what))
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Whether messages should be printed at all.
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    /// Whether output is machine-readable JSON.
    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }

    fn trust_label(&self, score: u8, tier: TrustTier) -> String {
        self.colorize(&format!("{}%", score), tier_color(tier))
    }

    fn tier_label(&self, tier: TrustTier) -> String {
        self.colorize(tier.as_str(), tier_color(tier))
    }

    fn render(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            "dimmed" => text.dimmed().to_string(),
            _ => text.to_string(),
        }
    }
}

/// "2.4 km away", or "unknown" when either location is unusable.
pub fn format_distance(km: f64) -> String {
    if km.is_finite() {
        format!("{:.1} km away", km)
    } else {
        "unknown".to_string()
    }
}

fn tier_color(tier: TrustTier) -> &'static str {
    match tier {
        TrustTier::High => "green",
        TrustTier::Medium => "yellow",
        TrustTier::Low => "red",
        TrustTier::Unknown => "dimmed",
    }
}

fn category_label(category: Option<&str>) -> String {
    category.unwrap_or("-").to_string()
}

fn location_label(location: &Location) -> String {
    match (location.area.is_empty(), location.city.is_empty()) {
        (true, true) => String::new(),
        (false, true) => location.area.clone(),
        (true, false) => location.city.clone(),
        (false, false) => location.display_name(),
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

fn detection_json(detection: &DetectedSupplier) -> Value {
    json!({
        "name": detection.name,
        "confidence": detection.confidence,
        "tier": detection.source.as_str(),
        "category": detection.category.map(|c| c.as_str()),
        "location": detection.location,
    })
}

fn location_json(location: &Location) -> Value {
    json!({
        "latitude": finite(location.latitude),
        "longitude": finite(location.longitude),
        "address": location.address,
        "area": location.area,
        "city": location.city,
    })
}

fn supplier_json(supplier: &Supplier, distance_km: Option<f64>) -> Value {
    let mut value = json!({
        "id": supplier.id.to_string(),
        "name": supplier.name,
        "category": supplier.category.map(|c| c.as_str()),
        "thumbs_up": supplier.thumbs_up,
        "thumbs_down": supplier.thumbs_down,
        "trust_score": supplier.trust_score(),
        "trust_tier": supplier.trust_tier().as_str(),
        "is_verified": supplier.is_verified,
        "location": location_json(&supplier.location),
    });
    if let (Some(distance), Some(object)) = (distance_km, value.as_object_mut()) {
        object.insert("distance_km".to_string(), json!(finite(distance)));
    }
    value
}

fn post_json(post: &Post, distance_km: f64) -> Value {
    json!({
        "id": post.id.to_string(),
        "content": post.content,
        "category": post.category.map(|c| c.as_str()),
        "author": { "name": post.author.name, "id": post.author.id.to_string() },
        "supplier_name": post.supplier_name,
        "likes": post.likes,
        "dislikes": post.dislikes,
        "comments": post.comments,
        "trust_tier": TrustTier::for_votes(post.likes, post.dislikes).as_str(),
        "created_at": post.created_at,
        "location": location_json(&post.location),
        "distance_km": finite(distance_km),
    })
}
