//! Password verification command.

use clap::Args;
use serde::Serialize;

use resq_auth::credential::CredentialHasher;
use resq_auth::error::CredentialError;
use resq_core::config::AppConfig;
use resq_core::error::AppError;

use crate::output::{self, OutputFormat};

/// Arguments for the verify command
#[derive(Debug, Args)]
pub struct VerifyArgs {
    /// Stored credential record
    #[arg(short, long)]
    pub record: String,
    /// Password (will prompt if not provided)
    #[arg(short, long)]
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
struct VerifyOutput {
    matches: bool,
    needs_rehash: bool,
}

/// Execute the verify command. Exits non-zero when the password does not match.
pub async fn execute(
    args: &VerifyArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let hasher = CredentialHasher::new(&config.auth)?;
    let password = super::read_password(args.password.as_deref(), false)?;
    let record = args.record.clone();

    let (result, needs_rehash) = tokio::task::spawn_blocking(move || {
        (hasher.check(&password, &record), hasher.needs_rehash(&record))
    })
    .await
    .map_err(|e| AppError::internal(format!("Verification task failed: {}", e)))?;

    let matches = match result {
        Ok(()) => true,
        Err(CredentialError::Mismatch) => false,
        Err(e) => return Err(AppError::validation(e.to_string())),
    };

    match format {
        OutputFormat::Text if matches => {
            output::print_success("Password matches");
            if needs_rehash {
                println!("  Record uses outdated parameters and should be re-hashed");
            }
        }
        OutputFormat::Text => {}
        OutputFormat::Json => output::print_item(
            &VerifyOutput {
                matches,
                needs_rehash,
            },
            format,
        ),
    }

    if matches {
        Ok(())
    } else {
        Err(AppError::unauthorized("Password does not match"))
    }
}
