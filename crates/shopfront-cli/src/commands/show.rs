use crate::cli::GlobalOptions;
use crate::commands::common::{
    entry_to_list_item, format_entry_detail, open_catalog, parse_product_id,
};
use crate::error::CliError;

pub async fn run_show(id: &str, as_json: bool, options: &GlobalOptions) -> Result<(), CliError> {
    let id = parse_product_id(id)?;
    let catalog = open_catalog(options)?;
    let entry = catalog.get_product(id).await?;

    if as_json {
        println!(
            "{}",
            serde_json::to_string_pretty(&entry_to_list_item(&entry))?
        );
    } else {
        for line in format_entry_detail(&entry) {
            println!("{line}");
        }
    }

    Ok(())
}
