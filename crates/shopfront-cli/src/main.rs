//! Shopfront CLI - browse and edit a product catalog from the terminal
//!
//! Edits are kept in a local overlay file and mirrored to the remote
//! catalog on a best-effort basis.

mod cli;
mod commands;
mod error;

#[cfg(test)]
mod tests;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::add::{build_draft, run_add};
use crate::commands::delete::run_delete;
use crate::commands::edit::{build_patch, run_edit};
use crate::commands::list::run_list;
use crate::commands::login::run_login;
use crate::commands::maintenance::{run_clear, run_purge, run_stats};
use crate::commands::restore::{run_restore, run_trash};
use crate::commands::show::run_show;
use crate::error::CliError;

const DEFAULT_LOG_FILTER: &str = "shopfront_core=warn";

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let options = cli.global;

    match cli.command {
        Commands::List { limit, json } => run_list(limit, json, &options).await?,
        Commands::Show { id, json } => run_show(&id, json, &options).await?,
        Commands::Add {
            title,
            price,
            description,
            category,
            image,
        } => {
            let draft = build_draft(&title, price, &description, &category, &image)?;
            run_add(draft, &options).await?;
        }
        Commands::Edit {
            id,
            title,
            price,
            description,
            category,
            image,
        } => {
            let patch = build_patch(title, price, description, category, image)?;
            run_edit(&id, patch, &options).await?;
        }
        Commands::Delete { id } => run_delete(&id, &options).await?,
        Commands::Restore { id } => run_restore(&id, &options)?,
        Commands::Trash { json } => run_trash(json, &options)?,
        Commands::Purge { yes } => run_purge(yes, &options)?,
        Commands::Stats { json } => run_stats(json, &options)?,
        Commands::Clear { yes } => run_clear(yes, &options)?,
        Commands::Login { username, password } => {
            run_login(username, password, &options).await?;
        }
    }

    Ok(())
}
