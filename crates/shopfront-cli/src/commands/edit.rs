use shopfront_core::ItemPatch;

use crate::cli::GlobalOptions;
use crate::commands::common::{normalize_field, open_catalog, parse_product_id};
use crate::error::CliError;

pub fn build_patch(
    title: Option<String>,
    price: Option<f64>,
    description: Option<String>,
    category: Option<String>,
    image: Option<String>,
) -> Result<ItemPatch, CliError> {
    let title = normalize_field(title);
    if title.as_deref() == Some("") {
        return Err(CliError::EmptyTitle);
    }

    let patch = ItemPatch {
        title,
        price,
        description: normalize_field(description),
        category: normalize_field(category),
        image: normalize_field(image),
    };
    if patch.is_empty() {
        return Err(CliError::EmptyEdit);
    }
    Ok(patch)
}

pub async fn run_edit(id: &str, patch: ItemPatch, options: &GlobalOptions) -> Result<(), CliError> {
    let id = parse_product_id(id)?;
    let catalog = open_catalog(options)?;
    let record = catalog.update_product(id, patch).await?;
    catalog.flush_mirrors().await;

    println!("{}", record.id());
    Ok(())
}
