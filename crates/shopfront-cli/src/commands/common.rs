use std::env;

use chrono::Utc;
use serde::Serialize;
use shopfront_core::catalog::Catalog;
use shopfront_core::gateway::HttpCatalogGateway;
use shopfront_core::models::{OverlayKind, OverlayStats};
use shopfront_core::store::FileOverlayPersistence;
use shopfront_core::{CatalogConfig, CatalogEntry, ItemId, OverlayRecord};

use crate::cli::GlobalOptions;
use crate::error::CliError;

pub type CliCatalog = Catalog<HttpCatalogGateway, FileOverlayPersistence>;

#[derive(Debug, Serialize)]
pub struct ProductListItem {
    pub id: i64,
    pub title: String,
    pub price: f64,
    pub price_label: String,
    pub description: String,
    pub category: String,
    pub image: String,
    pub rating: Option<f64>,
    pub rating_count: Option<u64>,
    pub source: &'static str,
    pub status: Option<OverlayKind>,
    pub original_id: Option<i64>,
    pub updated_at: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct StatsItem {
    pub total: usize,
    pub local: usize,
    pub modified: usize,
    pub deleted: usize,
    pub untouched: usize,
}

/// Config file, then environment, then command-line flags.
pub fn resolve_config(options: &GlobalOptions) -> Result<CatalogConfig, CliError> {
    let file_config = match options
        .config
        .clone()
        .or_else(CatalogConfig::default_config_path)
    {
        Some(path) => CatalogConfig::load_from_path(&path)?,
        None => CatalogConfig::default(),
    };

    Ok(file_config
        .with_env_overrides(|key| env::var(key).ok())
        .merge(CatalogConfig {
            api_base_url: options.api_url.clone(),
            overlay_path: options.overlay_path.clone(),
            request_timeout_secs: None,
        }))
}

pub fn open_catalog(options: &GlobalOptions) -> Result<CliCatalog, CliError> {
    let config = resolve_config(options)?;
    Ok(Catalog::open(&config)?)
}

pub fn parse_product_id(raw: &str) -> Result<ItemId, CliError> {
    raw.parse::<ItemId>()
        .map_err(|_| CliError::InvalidProductId(raw.trim().to_string()))
}

/// Clap value parser for prices: finite and not negative.
pub fn parse_price(raw: &str) -> Result<f64, String> {
    let price = raw
        .trim()
        .trim_start_matches('$')
        .parse::<f64>()
        .map_err(|error| format!("invalid price '{raw}': {error}"))?;
    if !price.is_finite() || price < 0.0 {
        return Err(format!("price must be a non-negative number (got {raw})"));
    }
    Ok(price)
}

pub fn normalize_field(value: Option<String>) -> Option<String> {
    value.map(|value| value.trim().to_string())
}

pub fn format_price(price: f64) -> String {
    if price.is_nan() {
        return "$0.00".to_string();
    }
    format!("${price:.2}")
}

pub fn truncate_text(text: &str, max_chars: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() <= max_chars {
        collapsed
    } else {
        let take_len = max_chars.saturating_sub(3);
        let mut truncated = collapsed.chars().take(take_len).collect::<String>();
        truncated.push_str("...");
        truncated
    }
}

pub const fn status_label(kind: Option<OverlayKind>) -> &'static str {
    match kind {
        None | Some(OverlayKind::Untouched) => "",
        Some(OverlayKind::LocalOnly) => "local",
        Some(OverlayKind::Modified) => "edited",
        Some(OverlayKind::Tombstone) => "deleted",
    }
}

pub fn format_entry_lines(entries: &[CatalogEntry]) -> Vec<String> {
    entries
        .iter()
        .map(|entry| {
            let item = entry.item();
            let status = status_label(entry.overlay().map(OverlayRecord::kind));
            let title = truncate_text(&item.title, 40);
            let price = format_price(item.price);
            format!(
                "{:<16}  {status:<7}  {title:<40}  {price:>10}  {}",
                item.id, item.category
            )
        })
        .collect()
}

pub fn format_entry_detail(entry: &CatalogEntry) -> Vec<String> {
    let item = entry.item();
    let mut lines = vec![
        format!("ID:          {}", item.id),
        format!("Title:       {}", item.title),
        format!("Price:       {}", format_price(item.price)),
        format!("Category:    {}", item.category),
        format!("Image:       {}", item.image),
    ];
    if let Some(rating) = item.rating {
        lines.push(format!(
            "Rating:      {:.1} ({} reviews)",
            rating.rate, rating.count
        ));
    }

    match entry.overlay() {
        Some(record) => {
            let status = status_label(Some(record.kind()));
            let status = if status.is_empty() { "local copy" } else { status };
            lines.push(format!("Source:      overlay ({status})"));
            if let Some(original_id) = record.original_id {
                lines.push(format!("Original ID: {original_id}"));
            }
            lines.push(format!(
                "Updated:     {}",
                format_relative_time(record.updated_at, Utc::now().timestamp_millis())
            ));
        }
        None => lines.push("Source:      remote".to_string()),
    }

    lines.push(String::new());
    lines.push(item.description.clone());
    lines
}

pub fn format_tombstone_lines(records: &[OverlayRecord]) -> Vec<String> {
    let now_ms = Utc::now().timestamp_millis();
    records
        .iter()
        .map(|record| {
            let title = truncate_text(&record.item.title, 40);
            let deleted = format_relative_time(record.updated_at, now_ms);
            format!("{:<16}  {title:<40}  deleted {deleted}", record.id())
        })
        .collect()
}

pub fn format_stats_lines(stats: &OverlayStats) -> Vec<String> {
    vec![
        format!("Local records: {}", stats.total),
        format!("  created:     {}", stats.local),
        format!("  edited:      {}", stats.modified),
        format!("  deleted:     {}", stats.deleted),
        format!("  unchanged:   {}", stats.untouched()),
    ]
}

pub fn entry_to_list_item(entry: &CatalogEntry) -> ProductListItem {
    let item = entry.item();
    let overlay = entry.overlay();
    ProductListItem {
        id: item.id.get(),
        title: item.title.clone(),
        price: item.price,
        price_label: format_price(item.price),
        description: item.description.clone(),
        category: item.category.clone(),
        image: item.image.clone(),
        rating: item.rating.map(|rating| rating.rate),
        rating_count: item.rating.map(|rating| rating.count),
        source: if overlay.is_some() { "overlay" } else { "remote" },
        status: overlay.map(OverlayRecord::kind),
        original_id: overlay.and_then(|record| record.original_id.map(ItemId::get)),
        updated_at: overlay.map(|record| record.updated_at),
    }
}

pub fn record_to_list_item(record: &OverlayRecord) -> ProductListItem {
    entry_to_list_item(&CatalogEntry::Overlay(record.clone()))
}

pub const fn stats_to_item(stats: &OverlayStats) -> StatsItem {
    StatsItem {
        total: stats.total,
        local: stats.local,
        modified: stats.modified,
        deleted: stats.deleted,
        untouched: stats.untouched(),
    }
}

pub fn format_relative_time(timestamp_ms: i64, now_ms: i64) -> String {
    let diff = now_ms.saturating_sub(timestamp_ms);
    let minute = 60_000;
    let hour = 60 * minute;
    let day = 24 * hour;
    let week = 7 * day;
    let month = 30 * day;
    let year = 365 * day;

    if diff < minute {
        "just now".to_string()
    } else if diff < hour {
        format!("{}m ago", diff / minute)
    } else if diff < day {
        format!("{}h ago", diff / hour)
    } else if diff < week {
        format!("{}d ago", diff / day)
    } else if diff < month {
        format!("{}w ago", diff / week)
    } else if diff < year {
        format!("{}mo ago", diff / month)
    } else {
        format!("{}y ago", diff / year)
    }
}
