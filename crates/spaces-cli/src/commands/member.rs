//! Membership commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use spaces_core::error::AppError;
use spaces_entity::{Member, MemberRole};

use super::Cli;
use crate::output;

/// Arguments for member commands
#[derive(Debug, Args)]
pub struct MemberArgs {
    /// Member subcommand
    #[command(subcommand)]
    pub command: MemberCommand,
}

/// Member subcommands
#[derive(Debug, Subcommand)]
pub enum MemberCommand {
    /// List members of a space
    List {
        /// Space ID
        space: String,
    },
    /// Add a member by email
    Add {
        /// Space ID
        space: String,
        /// Email of the new member
        email: String,
    },
    /// Remove a member
    Remove {
        /// Space ID
        space: String,
        /// Email of the member
        email: String,
    },
    /// Change a member's role (ADMIN or MEMBER)
    Role {
        /// Space ID
        space: String,
        /// Email of the member
        email: String,
        /// New role
        role: MemberRole,
    },
}

/// Member display row
#[derive(Debug, Serialize, Tabled)]
struct MemberRow {
    /// Email
    email: String,
    /// Role
    role: String,
    /// Owner
    owner: String,
}

/// Execute member commands
pub async fn execute(args: &MemberArgs, cli: &Cli) -> Result<(), AppError> {
    match &args.command {
        MemberCommand::List { space } => {
            let settings = super::open_settings(cli, space, cli.notifier()).await?;
            let owner = settings.space().admin_email.clone();

            let rows: Vec<MemberRow> = settings
                .members()
                .iter()
                .map(|m: &Member| MemberRow {
                    email: m.email.clone(),
                    role: m.role.to_string(),
                    owner: if m.owner || m.email == owner { "✓" } else { "" }.to_string(),
                })
                .collect();
            output::print_list(&rows, cli.format);
        }
        MemberCommand::Add { space, email } => {
            if email.trim().is_empty() {
                return Err(AppError::validation("Member email must not be blank"));
            }
            let mut settings = super::open_settings(cli, space, cli.notifier()).await?;
            require_admin(settings.is_admin())?;
            settings.set_member_email(email.as_str());

            if !settings.add_member().await {
                return Err(AppError::external(format!("{} was not added", email.trim())));
            }
            output::print_success(&format!("Added {} to {}", email.trim(), settings.space().name));
        }
        MemberCommand::Remove { space, email } => {
            let notifier = cli.notifier();
            let mut settings = super::open_settings(cli, space, notifier.clone()).await?;
            require_admin(settings.is_admin())?;

            if settings.remove_member(email).await {
                output::print_success(&format!("Removed {email} from {}", settings.space().name));
            } else {
                notifier.ensure_no_failure(&format!("{email} was not removed"))?;
                println!("{email} was not removed.");
            }
        }
        MemberCommand::Role { space, email, role } => {
            let mut settings = super::open_settings(cli, space, cli.notifier()).await?;
            require_admin(settings.is_admin())?;

            if !settings.change_role(email, *role).await {
                return Err(AppError::external(format!("Role of {email} was not changed")));
            }
            output::print_success(&format!("{email} is now {role}"));
        }
    }

    Ok(())
}

fn require_admin(is_admin: bool) -> Result<(), AppError> {
    if is_admin {
        Ok(())
    } else {
        Err(AppError::unauthorized("Only space admins can manage members"))
    }
}
