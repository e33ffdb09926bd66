use crate::cli::GlobalOptions;
use crate::commands::common::{format_stats_lines, open_catalog, stats_to_item};
use crate::error::CliError;

pub fn run_stats(as_json: bool, options: &GlobalOptions) -> Result<(), CliError> {
    let catalog = open_catalog(options)?;
    let stats = catalog.get_stats();

    if as_json {
        println!("{}", serde_json::to_string_pretty(&stats_to_item(&stats))?);
    } else {
        for line in format_stats_lines(&stats) {
            println!("{line}");
        }
    }
    Ok(())
}

pub fn run_purge(confirmed: bool, options: &GlobalOptions) -> Result<(), CliError> {
    if !confirmed {
        return Err(CliError::ConfirmationRequired("purge deleted products"));
    }

    let catalog = open_catalog(options)?;
    let purged = catalog.purge_tombstones()?;
    println!("Purged {purged} deleted products");
    Ok(())
}

pub fn run_clear(confirmed: bool, options: &GlobalOptions) -> Result<(), CliError> {
    if !confirmed {
        return Err(CliError::ConfirmationRequired("clear all local data"));
    }

    let catalog = open_catalog(options)?;
    catalog.clear_all_local_data()?;
    println!("Local product data cleared");
    Ok(())
}
