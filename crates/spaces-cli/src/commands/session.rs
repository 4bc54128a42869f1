//! Development session commands.

use clap::{Args, Subcommand};

use spaces_auth::{SessionIssuer, SessionUser};
use spaces_core::error::AppError;

use crate::output::{self, OutputFormat};

/// Arguments for session commands
#[derive(Debug, Args)]
pub struct SessionArgs {
    /// Session subcommand
    #[command(subcommand)]
    pub command: SessionCommand,
}

/// Session subcommands
#[derive(Debug, Subcommand)]
pub enum SessionCommand {
    /// Mint a session token signed with the configured secret
    Issue {
        /// Email of the user
        #[arg(long)]
        email: String,
        /// Display name
        #[arg(long)]
        name: Option<String>,
        /// Identity provider user ID
        #[arg(long)]
        id: Option<String>,
    },
}

/// Execute session commands
pub async fn execute(args: &SessionArgs, env: &str, format: OutputFormat) -> Result<(), AppError> {
    let config = super::load_config(env)?;

    match &args.command {
        SessionCommand::Issue { email, name, id } => {
            let mut user = SessionUser::new(email.trim());
            if let Some(name) = name {
                user = user.with_name(name);
            }
            if let Some(id) = id {
                user = user.with_id(id);
            }

            let issued = SessionIssuer::new(&config.session).issue(&user)?;

            match format {
                OutputFormat::Json => output::print_json(&serde_json::json!({
                    "cookie": config.session.cookie_name,
                    "token": issued.token,
                    "expires_at": issued.expires_at,
                })),
                OutputFormat::Table => {
                    output::print_kv("Cookie", &config.session.cookie_name);
                    output::print_kv("Expires", &issued.expires_at.to_rfc3339());
                    println!("{}", issued.token);
                }
            }
        }
    }

    Ok(())
}
