//! Configuration CLI commands.

use std::sync::Arc;

use clap::{Args, Subcommand};

use resq_auth::credential::CredentialHasher;
use resq_auth::token::{TokenIssuer, TokenVerifier};
use resq_core::config::AppConfig;
use resq_core::error::AppError;
use resq_core::traits::SystemClock;

use crate::output;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Build every auth component from the configuration and report problems
    Check,
}

/// Execute config commands
pub fn execute(args: &ConfigArgs, config: &AppConfig) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Check => {
            let hasher = CredentialHasher::new(&config.auth)?;
            TokenIssuer::from_config(&config.auth, Arc::new(SystemClock))?;
            TokenVerifier::from_config(&config.auth, Arc::new(SystemClock))?;

            let kdf = &config.auth.kdf;
            output::print_success("Configuration is valid");
            println!(
                "  KDF: argon2id m={}KiB t={} p={} salt={}B key={}B",
                kdf.memory_kib, kdf.iterations, kdf.parallelism, kdf.salt_length, kdf.key_length
            );
            println!("  Token TTL: {}h", config.auth.token_ttl_hours);
            println!("  Minimum password length: {}", hasher.policy().min_length());
        }
    }

    Ok(())
}
