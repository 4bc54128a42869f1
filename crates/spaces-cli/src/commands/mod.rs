//! CLI command definitions and dispatch.

pub mod activity;
pub mod file;
pub mod member;
pub mod serve;
pub mod session;
pub mod space;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use spaces_core::config::AppConfig;
use spaces_core::error::AppError;
use spaces_entity::{Space, SpaceId};
use spaces_view::{
    GatewayClient, SettingsLoad, SpaceSettingsController, SpacesApi, settings,
};

use crate::notifier::TerminalNotifier;
use crate::output::OutputFormat;

/// Spaces: shared workspaces for files and the people who use them
#[derive(Debug, Parser)]
#[command(name = "spaces", version, about, long_about = None)]
pub struct Cli {
    /// Configuration environment (selects config/{env}.toml)
    #[arg(short, long, env = "SPACES_ENV", default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Gateway base URL
    #[arg(long, env = "SPACES_GATEWAY_URL", default_value = "http://localhost:3000")]
    pub gateway: String,

    /// Session token sent as the session cookie
    #[arg(long, env = "SPACES_SESSION", hide_env_values = true)]
    pub session: Option<String>,

    /// Answer yes to every confirmation
    #[arg(short, long)]
    pub yes: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the gateway
    Serve(serve::ServeArgs),
    /// Development sessions
    Session(session::SessionArgs),
    /// Space management
    Spaces(space::SpaceArgs),
    /// Files in a space
    Files(file::FileArgs),
    /// Activity log of a space
    Activity(activity::ActivityArgs),
    /// Space membership
    Members(member::MemberArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Serve(args) => serve::execute(args, &self.env).await,
            Commands::Session(args) => session::execute(args, &self.env, self.format).await,
            Commands::Spaces(args) => space::execute(args, self).await,
            Commands::Files(args) => file::execute(args, self).await,
            Commands::Activity(args) => activity::execute(args, self).await,
            Commands::Members(args) => member::execute(args, self).await,
        }
    }

    /// Gateway client carrying the session cookie.
    pub fn client(&self) -> Result<GatewayClient, AppError> {
        let client = GatewayClient::new(&self.gateway)?;
        let Some(token) = self.session.as_deref() else {
            return Ok(client);
        };

        let config = load_config(&self.env)?;
        Ok(client.with_session(&config.session.cookie_name, token))
    }

    /// Notifier honoring `--yes`.
    pub fn notifier(&self) -> Arc<TerminalNotifier> {
        Arc::new(TerminalNotifier::new(self.yes))
    }
}

/// Helper: load configuration for an environment
pub fn load_config(env: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(env).map_err(|e| e.context("Failed to load config"))
}

/// Helper: fetch one space
pub async fn fetch_space(api: &GatewayClient, space_id: &str) -> Result<Space, AppError> {
    api.get_space(&SpaceId::from(space_id))
        .await
        .map_err(|e| AppError::new(e.kind, settings::load_failure_message(&e)))
}

/// Helper: open the settings controller for a space as the signed-in user
pub async fn open_settings(
    cli: &Cli,
    space_id: &str,
    notifier: Arc<TerminalNotifier>,
) -> Result<SpaceSettingsController, AppError> {
    let api = cli.client()?;
    let email = api
        .session_email()
        .await?
        .ok_or_else(|| AppError::unauthorized("Not signed in: pass --session"))?;

    let loaded = SpaceSettingsController::load(
        Arc::new(api),
        notifier,
        email,
        &SpaceId::from(space_id),
    )
    .await
    .map_err(|e| AppError::new(e.kind, settings::load_failure_message(&e)))?;

    match loaded {
        SettingsLoad::Ready(controller) => Ok(controller),
        SettingsLoad::NotFound => Err(AppError::not_found(format!("Space '{space_id}' not found"))),
        SettingsLoad::Redirect => Err(AppError::unauthorized(format!(
            "You do not have access to space '{space_id}'"
        ))),
    }
}
