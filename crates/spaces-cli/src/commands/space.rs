//! Space management commands.

use std::sync::Arc;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use spaces_core::error::AppError;
use spaces_entity::Space;
use spaces_view::{DashboardController, Navigation};

use super::Cli;
use crate::output::{self, OutputFormat};

/// Arguments for space commands
#[derive(Debug, Args)]
pub struct SpaceArgs {
    /// Space subcommand
    #[command(subcommand)]
    pub command: SpaceCommand,
}

/// Space subcommands
#[derive(Debug, Subcommand)]
pub enum SpaceCommand {
    /// List your spaces
    List,
    /// Create a space
    Create {
        /// Space name
        name: String,
        /// Description
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Show a space with its members
    Show {
        /// Space ID
        id: String,
    },
    /// Rename or re-describe a space
    Update {
        /// Space ID
        id: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New description
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a space
    Delete {
        /// Space ID
        id: String,
    },
}

/// Space display row
#[derive(Debug, Serialize, Tabled)]
struct SpaceRow {
    /// ID
    id: String,
    /// Name
    name: String,
    /// Owner
    owner: String,
    /// Members
    members: usize,
    /// Description
    description: String,
}

impl From<&Space> for SpaceRow {
    fn from(space: &Space) -> Self {
        Self {
            id: space.id.to_string(),
            name: space.name.clone(),
            owner: space.admin_email.clone(),
            members: space.members().len(),
            description: space.description_or_empty().to_string(),
        }
    }
}

/// Execute space commands
pub async fn execute(args: &SpaceArgs, cli: &Cli) -> Result<(), AppError> {
    match &args.command {
        SpaceCommand::List => {
            let dashboard = DashboardController::new(Arc::new(cli.client()?), cli.notifier());
            dashboard.load_spaces().await;

            let rows: Vec<SpaceRow> = dashboard.state().await.spaces.iter().map(SpaceRow::from).collect();
            output::print_list(&rows, cli.format);
        }
        SpaceCommand::Create { name, description } => {
            let dashboard = DashboardController::new(Arc::new(cli.client()?), cli.notifier());
            if name.trim().is_empty() {
                return Err(AppError::validation("Space name must not be blank"));
            }
            if !dashboard.create_space(name, description).await {
                return Err(AppError::external("Space was not created"));
            }
            output::print_success(&format!("Space '{}' created", name.trim()));
        }
        SpaceCommand::Show { id } => {
            let settings = super::open_settings(cli, id, cli.notifier()).await?;
            let space = settings.space();

            match cli.format {
                OutputFormat::Json => output::print_json(space),
                OutputFormat::Table => {
                    output::print_kv("ID", space.id.as_str());
                    output::print_kv("Name", &space.name);
                    output::print_kv("Description", space.description_or_empty());
                    output::print_kv("Owner", &space.admin_email);
                    output::print_kv("Members", &space.members().len().to_string());
                    output::print_kv("You can manage", if settings.is_admin() { "yes" } else { "no" });
                }
            }
        }
        SpaceCommand::Update {
            id,
            name,
            description,
        } => {
            let notifier = cli.notifier();
            let mut settings = super::open_settings(cli, id, notifier.clone()).await?;
            if !settings.is_admin() {
                return Err(AppError::unauthorized("Only space admins can edit a space"));
            }
            if let Some(name) = name {
                settings.set_name(name.as_str());
            }
            if let Some(description) = description {
                settings.set_description(description.as_str());
            }

            if settings.save().await {
                output::print_success(&format!("Space '{}' updated", settings.space().name));
            } else {
                notifier.ensure_no_failure("Space was not updated")?;
                output::print_warning("No changes saved");
            }
        }
        SpaceCommand::Delete { id } => {
            let notifier = cli.notifier();
            let mut settings = super::open_settings(cli, id, notifier.clone()).await?;
            if !settings.is_admin() {
                return Err(AppError::unauthorized("Only space admins can delete a space"));
            }
            match settings.delete().await {
                Navigation::Home => output::print_success(&format!("Space {id} deleted")),
                Navigation::Stay => {
                    notifier.ensure_no_failure("Space was not deleted")?;
                    println!("Cancelled.");
                }
            }
        }
    }

    Ok(())
}
