use std::path::PathBuf;

use clap::Parser;
use pretty_assertions::assert_eq;
use shopfront_core::models::{OverlayKind, OverlayStats, Rating};
use shopfront_core::{CatalogEntry, Item, ItemId, OverlayRecord};

use crate::cli::{Cli, Commands, GlobalOptions};
use crate::commands::add::build_draft;
use crate::commands::common::{
    entry_to_list_item, format_entry_detail, format_entry_lines, format_price,
    format_relative_time, format_stats_lines, open_catalog, parse_price, parse_product_id,
    resolve_config, status_label, truncate_text,
};
use crate::commands::edit::build_patch;
use crate::commands::maintenance::{run_clear, run_purge};
use crate::commands::restore::run_restore;
use crate::error::CliError;

fn item(id: i64, title: &str) -> Item {
    Item {
        id: ItemId::new(id),
        title: title.to_string(),
        price: 12.5,
        description: format!("{title} description"),
        category: "electronics".to_string(),
        image: String::new(),
        rating: Some(Rating {
            rate: 4.4,
            count: 8,
        }),
    }
}

fn options_with_overlay(path: PathBuf) -> GlobalOptions {
    GlobalOptions {
        api_url: Some("http://127.0.0.1:9".to_string()),
        overlay_path: Some(path),
        config: Some(PathBuf::from("/nonexistent/shopfront/config.json")),
    }
}

#[test]
fn parse_price_accepts_plain_and_dollar_values() {
    assert!((parse_price("19.99").unwrap() - 19.99).abs() < f64::EPSILON);
    assert!((parse_price(" $7 ").unwrap() - 7.0).abs() < f64::EPSILON);
    assert!(parse_price("0").is_ok());
}

#[test]
fn parse_price_rejects_negative_and_non_numeric() {
    assert!(parse_price("-1").is_err());
    assert!(parse_price("cheap").is_err());
    assert!(parse_price("NaN").is_err());
    assert!(parse_price("inf").is_err());
}

#[test]
fn format_price_uses_two_decimals() {
    assert_eq!(format_price(3.0), "$3.00");
    assert_eq!(format_price(109.951), "$109.95");
    assert_eq!(format_price(f64::NAN), "$0.00");
}

#[test]
fn truncate_text_collapses_whitespace_and_adds_ellipsis() {
    assert_eq!(truncate_text("  a\n  b  ", 10), "a b");
    assert_eq!(truncate_text("abcdefghij", 6), "abc...");
}

#[test]
fn format_relative_time_buckets() {
    let now = 10_000_000_000;
    assert_eq!(format_relative_time(now - 5_000, now), "just now");
    assert_eq!(format_relative_time(now - 5 * 60_000, now), "5m ago");
    assert_eq!(format_relative_time(now - 3 * 3_600_000, now), "3h ago");
    assert_eq!(format_relative_time(now - 2 * 86_400_000, now), "2d ago");
    assert_eq!(format_relative_time(now + 1_000, now), "just now");
}

#[test]
fn parse_product_id_rejects_non_integers() {
    assert_eq!(parse_product_id(" 12 ").unwrap(), ItemId::new(12));
    assert!(matches!(
        parse_product_id("abc"),
        Err(CliError::InvalidProductId(raw)) if raw == "abc"
    ));
}

#[test]
fn status_label_names_overlay_kinds() {
    assert_eq!(status_label(None), "");
    assert_eq!(status_label(Some(OverlayKind::LocalOnly)), "local");
    assert_eq!(status_label(Some(OverlayKind::Modified)), "edited");
    assert_eq!(status_label(Some(OverlayKind::Tombstone)), "deleted");
    assert_eq!(status_label(Some(OverlayKind::Untouched)), "");
}

#[test]
fn format_entry_lines_marks_local_products() {
    let entries = vec![
        CatalogEntry::Overlay(OverlayRecord::local(item(1_700_000_000_000_123, "Lamp"), 1)),
        CatalogEntry::Remote(item(2, "Phone")),
    ];
    let lines = format_entry_lines(&entries);

    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("1700000000000123"));
    assert!(lines[0].contains("local"));
    assert!(lines[0].contains("$12.50"));
    assert!(lines[1].starts_with("2 "));
    assert!(!lines[1].contains("local"));
}

#[test]
fn format_entry_detail_shows_source_and_rating() {
    let remote = format_entry_detail(&CatalogEntry::Remote(item(2, "Phone")));
    assert!(remote.contains(&"Source:      remote".to_string()));
    assert!(remote.contains(&"Rating:      4.4 (8 reviews)".to_string()));

    let mut record = OverlayRecord::derived_from(item(2, "Phone"), 1);
    record.is_modified = true;
    let edited = format_entry_detail(&CatalogEntry::Overlay(record));
    assert!(edited.contains(&"Source:      overlay (edited)".to_string()));
    assert!(edited.contains(&"Original ID: 2".to_string()));
}

#[test]
fn entry_to_list_item_reports_overlay_fields() {
    let record = OverlayRecord::derived_from(item(4, "Ring"), 55);
    let json_item = entry_to_list_item(&CatalogEntry::Overlay(record));
    assert_eq!(json_item.id, 4);
    assert_eq!(json_item.source, "overlay");
    assert_eq!(json_item.original_id, Some(4));
    assert_eq!(json_item.updated_at, Some(55));
    assert_eq!(json_item.price_label, "$12.50");
}

#[test]
fn format_stats_lines_lists_counts() {
    let stats = OverlayStats {
        total: 5,
        local: 2,
        modified: 1,
        deleted: 1,
    };
    let lines = format_stats_lines(&stats);
    assert_eq!(lines[0], "Local records: 5");
    assert_eq!(lines[4], "  unchanged:   1");
}

#[test]
fn build_draft_trims_and_requires_title() {
    let draft = build_draft("  Lamp ", 3.0, " warm ", " home ", "").unwrap();
    assert_eq!(draft.title, "Lamp");
    assert_eq!(draft.description, "warm");
    assert_eq!(draft.category, "home");
    assert!(matches!(
        build_draft("   ", 1.0, "", "", ""),
        Err(CliError::EmptyTitle)
    ));
}

#[test]
fn build_patch_requires_a_change() {
    assert!(matches!(
        build_patch(None, None, None, None, None),
        Err(CliError::EmptyEdit)
    ));
    assert!(matches!(
        build_patch(Some("  ".to_string()), None, None, None, None),
        Err(CliError::EmptyTitle)
    ));

    let patch = build_patch(None, Some(5.0), Some(" new ".to_string()), None, None).unwrap();
    assert_eq!(patch.description.as_deref(), Some("new"));
    assert_eq!(patch.title, None);
}

#[test]
fn resolve_config_prefers_flags_over_file() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.json");
    std::fs::write(
        &config_path,
        r#"{"api_base_url":"https://file.example.com","overlay_path":"/tmp/file-overlay.json","request_timeout_secs":3}"#,
    )
    .unwrap();

    let options = GlobalOptions {
        api_url: Some("https://flag.example.com/".to_string()),
        overlay_path: None,
        config: Some(config_path),
    };
    let config = resolve_config(&options).unwrap();

    assert_eq!(config.api_base_url().unwrap(), "https://flag.example.com");
    if std::env::var("SHOPFRONT_OVERLAY_PATH").is_err() {
        assert_eq!(
            config.overlay_path().unwrap(),
            PathBuf::from("/tmp/file-overlay.json")
        );
    }
}

#[test]
fn resolve_config_reports_broken_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.json");
    std::fs::write(&config_path, "{ not json").unwrap();

    let options = GlobalOptions {
        config: Some(config_path),
        ..GlobalOptions::default()
    };
    assert!(matches!(
        resolve_config(&options),
        Err(CliError::Core(shopfront_core::Error::InvalidInput(_)))
    ));
}

#[test]
fn restore_of_unknown_product_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let options = options_with_overlay(dir.path().join("overlay.json"));

    assert!(matches!(
        run_restore("7", &options),
        Err(CliError::Core(shopfront_core::Error::NotFound(id))) if id == ItemId::new(7)
    ));
}

#[test]
fn destructive_commands_require_confirmation() {
    let dir = tempfile::tempdir().unwrap();
    let options = options_with_overlay(dir.path().join("overlay.json"));

    assert!(matches!(
        run_purge(false, &options),
        Err(CliError::ConfirmationRequired(_))
    ));
    assert!(matches!(
        run_clear(false, &options),
        Err(CliError::ConfirmationRequired(_))
    ));
    run_purge(true, &options).unwrap();
    run_clear(true, &options).unwrap();
}

#[test]
fn open_catalog_uses_overlay_flag() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("overlay.json");
    let catalog = open_catalog(&options_with_overlay(path)).unwrap();
    assert_eq!(catalog.get_stats(), OverlayStats::default());
}

#[test]
fn cli_parses_edit_with_partial_fields() {
    let cli = Cli::try_parse_from([
        "shopfront",
        "edit",
        "3",
        "--price",
        "$4.50",
        "--api-url",
        "http://localhost:3000",
    ])
    .unwrap();

    assert_eq!(cli.global.api_url.as_deref(), Some("http://localhost:3000"));
    match cli.command {
        Commands::Edit {
            id, price, title, ..
        } => {
            assert_eq!(id, "3");
            assert_eq!(price, Some(4.5));
            assert_eq!(title, None);
        }
        _ => panic!("expected edit command"),
    }
}

#[test]
fn cli_rejects_negative_price_and_accepts_aliases() {
    assert!(Cli::try_parse_from(["shopfront", "add", "--title", "x", "--price", "-2"]).is_err());
    assert!(matches!(
        Cli::try_parse_from(["shopfront", "rm", "5"]).unwrap().command,
        Commands::Delete { .. }
    ));
    assert!(matches!(
        Cli::try_parse_from(["shopfront", "ls", "--limit", "3"])
            .unwrap()
            .command,
        Commands::List { limit: Some(3), json: false }
    ));
}
