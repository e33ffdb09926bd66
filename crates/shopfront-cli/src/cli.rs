use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::commands::common::parse_price;

#[derive(Parser)]
#[command(name = "shopfront")]
#[command(about = "Browse and edit a product catalog with local overlays")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Remote catalog base URL
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Path to the local overlay file
    #[arg(long, global = true, value_name = "PATH")]
    pub overlay_path: Option<PathBuf>,

    /// Path to the config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List products (local creations first)
    #[command(alias = "ls")]
    List {
        /// Number of products to show
        #[arg(short, long)]
        limit: Option<usize>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a single product
    Show {
        /// Product ID
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a local product
    #[command(alias = "new")]
    Add {
        #[arg(long)]
        title: String,
        #[arg(long, value_parser = parse_price)]
        price: f64,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        category: String,
        /// Image URL
        #[arg(long, default_value = "")]
        image: String,
    },
    /// Edit fields of a product
    Edit {
        /// Product ID
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long, value_parser = parse_price)]
        price: Option<f64>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category: Option<String>,
        /// Image URL
        #[arg(long)]
        image: Option<String>,
    },
    /// Delete a product (restorable)
    #[command(alias = "rm")]
    Delete {
        /// Product ID
        id: String,
    },
    /// Restore a deleted product
    Restore {
        /// Product ID
        id: String,
    },
    /// List deleted products
    Trash {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Permanently remove deleted products
    Purge {
        /// Skip the confirmation guard
        #[arg(long)]
        yes: bool,
    },
    /// Show local edit statistics
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Forget every local edit
    Clear {
        /// Skip the confirmation guard
        #[arg(long)]
        yes: bool,
    },
    /// Request an auth token from the catalog
    Login {
        #[arg(long, value_name = "NAME")]
        username: String,
        #[arg(long, value_name = "PASSWORD")]
        password: String,
    },
}
