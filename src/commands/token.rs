//! Session-token commands.

use std::sync::Arc;

use chrono::Duration;
use clap::{Args, Subcommand};

use resq_auth::token::{TokenIssuer, TokenVerifier};
use resq_core::config::AppConfig;
use resq_core::error::AppError;
use resq_core::traits::SystemClock;

use crate::output::{self, OutputFormat};

/// Arguments for token commands
#[derive(Debug, Args)]
pub struct TokenArgs {
    /// Token subcommand
    #[command(subcommand)]
    pub command: TokenCommand,
}

/// Token subcommands
#[derive(Debug, Subcommand)]
pub enum TokenCommand {
    /// Issue a token for a subject
    Issue {
        /// Subject identifier
        #[arg(short, long)]
        subject: String,
        /// Lifetime in hours (defaults to auth.token_ttl_hours)
        #[arg(long)]
        ttl_hours: Option<u32>,
    },
    /// Verify a token and show its claims or the reason it was rejected
    Inspect {
        /// The token to inspect
        token: String,
    },
}

/// Execute token commands
pub fn execute(args: &TokenArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    match &args.command {
        TokenCommand::Issue { subject, ttl_hours } => {
            let issuer = TokenIssuer::from_config(&config.auth, Arc::new(SystemClock))?;
            let ttl = match ttl_hours {
                Some(h) => Duration::hours(i64::from(*h)),
                None => issuer.default_ttl(),
            };

            let issued = issuer.issue(subject, ttl)?;

            match format {
                OutputFormat::Text => {
                    println!("{}", issued.token);
                    println!("  Expires: {}", issued.expires_at.to_rfc3339());
                }
                OutputFormat::Json => output::print_item(&issued, format),
            }
        }
        TokenCommand::Inspect { token } => {
            let verifier = TokenVerifier::from_config(&config.auth, Arc::new(SystemClock))?;

            // Operator diagnostics: report the specific rejection reason.
            match verifier.verify_claims(token) {
                Ok(claims) => match format {
                    OutputFormat::Text => {
                        output::print_success("Token is valid");
                        println!("  Subject: {}", claims.sub);
                        println!("  Issued:  {}", claims.issued_at().to_rfc3339());
                        println!("  Expires: {}", claims.expires_at().to_rfc3339());
                    }
                    OutputFormat::Json => output::print_item(&claims, format),
                },
                Err(e) => {
                    return Err(AppError::unauthorized(format!("Token rejected: {}", e)));
                }
            }
        }
    }

    Ok(())
}
