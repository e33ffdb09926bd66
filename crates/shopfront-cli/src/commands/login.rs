use shopfront_core::gateway::LoginCredentials;

use crate::cli::GlobalOptions;
use crate::commands::common::open_catalog;
use crate::error::CliError;

pub async fn run_login(
    username: String,
    password: String,
    options: &GlobalOptions,
) -> Result<(), CliError> {
    let catalog = open_catalog(options)?;
    let token = catalog
        .login(&LoginCredentials {
            username: username.trim().to_string(),
            password,
        })
        .await?;

    println!("{}", token.token);
    Ok(())
}
