//! CLI command definitions and dispatch.

pub mod config;
pub mod hash;
pub mod token;
pub mod verify;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use resq_core::config::AppConfig;
use resq_core::error::AppError;

/// ResQ credential and session-token administration
#[derive(Debug, Parser)]
#[command(name = "resq", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Hash a password into a credential record
    Hash(hash::HashArgs),
    /// Check a password against a credential record
    Verify(verify::VerifyArgs),
    /// Issue or inspect session tokens
    Token(token::TokenArgs),
    /// Configuration checks
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: &AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Hash(args) => hash::execute(args, config, self.format).await,
            Commands::Verify(args) => verify::execute(args, config, self.format).await,
            Commands::Token(args) => token::execute(args, config, self.format),
            Commands::Config(args) => config::execute(args, config),
        }
    }
}

/// Helper: read a password from the argument or prompt for it
pub fn read_password(provided: Option<&str>, confirm: bool) -> Result<String, AppError> {
    if let Some(p) = provided {
        return Ok(p.to_string());
    }

    let mut prompt = dialoguer::Password::new().with_prompt("Password");
    if confirm {
        prompt = prompt.with_confirmation("Confirm password", "Passwords do not match");
    }

    prompt
        .interact()
        .map_err(|e| AppError::internal(format!("Input error: {}", e)))
}
