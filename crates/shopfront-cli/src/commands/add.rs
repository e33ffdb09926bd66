use shopfront_core::ItemDraft;

use crate::cli::GlobalOptions;
use crate::commands::common::open_catalog;
use crate::error::CliError;

pub fn build_draft(
    title: &str,
    price: f64,
    description: &str,
    category: &str,
    image: &str,
) -> Result<ItemDraft, CliError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(CliError::EmptyTitle);
    }

    Ok(ItemDraft {
        title: title.to_string(),
        price,
        description: description.trim().to_string(),
        category: category.trim().to_string(),
        image: image.trim().to_string(),
    })
}

pub async fn run_add(draft: ItemDraft, options: &GlobalOptions) -> Result<(), CliError> {
    let catalog = open_catalog(options)?;
    let record = catalog.create_product(draft).await?;
    catalog.flush_mirrors().await;

    println!("{}", record.id());
    Ok(())
}
