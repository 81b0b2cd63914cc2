//! Password hashing command.

use clap::Args;
use serde::Serialize;

use resq_auth::credential::CredentialHasher;
use resq_core::config::AppConfig;
use resq_core::error::AppError;

use crate::output::{self, OutputFormat};

/// Arguments for the hash command
#[derive(Debug, Args)]
pub struct HashArgs {
    /// Password (will prompt if not provided)
    #[arg(short, long)]
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
struct HashOutput {
    record: String,
}

/// Execute the hash command
pub async fn execute(
    args: &HashArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let hasher = CredentialHasher::new(&config.auth)?;
    let password = super::read_password(args.password.as_deref(), true)?;

    let record = tokio::task::spawn_blocking(move || hasher.hash(&password))
        .await
        .map_err(|e| AppError::internal(format!("Hashing task failed: {}", e)))??;

    match format {
        OutputFormat::Text => println!("{}", record.as_str()),
        OutputFormat::Json => output::print_item(
            &HashOutput {
                record: record.into_string(),
            },
            format,
        ),
    }

    Ok(())
}
