use crate::cli::GlobalOptions;
use crate::commands::common::{
    format_tombstone_lines, open_catalog, parse_product_id, record_to_list_item, ProductListItem,
};
use crate::error::CliError;

pub fn run_restore(id: &str, options: &GlobalOptions) -> Result<(), CliError> {
    let id = parse_product_id(id)?;
    let catalog = open_catalog(options)?;
    let record = catalog.restore_product(id)?;

    println!("{}", record.id());
    Ok(())
}

pub fn run_trash(as_json: bool, options: &GlobalOptions) -> Result<(), CliError> {
    let catalog = open_catalog(options)?;
    let tombstones = catalog.list_tombstones();

    if as_json {
        let json_items = tombstones
            .iter()
            .map(record_to_list_item)
            .collect::<Vec<ProductListItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
        return Ok(());
    }

    if tombstones.is_empty() {
        println!("No deleted products.");
        return Ok(());
    }

    for line in format_tombstone_lines(&tombstones) {
        println!("{line}");
    }
    Ok(())
}
