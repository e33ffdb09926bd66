use crate::cli::GlobalOptions;
use crate::commands::common::{
    entry_to_list_item, format_entry_lines, open_catalog, ProductListItem,
};
use crate::error::CliError;

pub async fn run_list(
    limit: Option<usize>,
    as_json: bool,
    options: &GlobalOptions,
) -> Result<(), CliError> {
    let catalog = open_catalog(options)?;
    let mut entries = catalog.list_products().await;
    if let Some(limit) = limit {
        entries.truncate(limit);
    }

    if as_json {
        let json_items = entries
            .iter()
            .map(entry_to_list_item)
            .collect::<Vec<ProductListItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
    } else if entries.is_empty() {
        println!("No products available.");
    } else {
        for line in format_entry_lines(&entries) {
            println!("{line}");
        }
    }

    Ok(())
}
