use crate::cli::GlobalOptions;
use crate::commands::common::{open_catalog, parse_product_id};
use crate::error::CliError;

pub async fn run_delete(id: &str, options: &GlobalOptions) -> Result<(), CliError> {
    let id = parse_product_id(id)?;
    let catalog = open_catalog(options)?;
    let record = catalog.delete_product(id).await?;
    catalog.flush_mirrors().await;

    println!("{}", record.id());
    Ok(())
}
