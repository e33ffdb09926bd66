use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] shopfront_core::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Product ID must be an integer: {0}")]
    InvalidProductId(String),
    #[error("Product title cannot be empty")]
    EmptyTitle,
    #[error("No changes given; pass at least one of --title, --price, --description, --category, --image")]
    EmptyEdit,
    #[error("Refusing to {0} without --yes")]
    ConfirmationRequired(&'static str),
}
