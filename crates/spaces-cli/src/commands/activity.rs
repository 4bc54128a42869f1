//! Activity log command.

use std::sync::Arc;

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use spaces_core::error::AppError;
use spaces_entity::Activity;
use spaces_view::DashboardController;
use spaces_view::format::format_relative_time;

use super::Cli;
use crate::output;

/// Arguments for the activity command
#[derive(Debug, Args)]
pub struct ActivityArgs {
    /// Space ID
    pub space: String,

    /// Show at most this many entries
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Activity display row
#[derive(Debug, Serialize, Tabled)]
struct ActivityRow {
    /// When
    when: String,
    /// Who
    user: String,
    /// Action
    action: String,
    /// Details
    details: String,
}

impl From<&Activity> for ActivityRow {
    fn from(entry: &Activity) -> Self {
        Self {
            when: format_relative_time(entry.timestamp, chrono::Utc::now()),
            user: entry.user_email.clone(),
            action: entry.action.clone(),
            details: entry.details.clone().unwrap_or_default(),
        }
    }
}

/// Execute the activity command
pub async fn execute(args: &ActivityArgs, cli: &Cli) -> Result<(), AppError> {
    let api = cli.client()?;
    let space = super::fetch_space(&api, &args.space).await?;

    let dashboard = DashboardController::new(Arc::new(api), cli.notifier());
    dashboard.select_space(space).await;

    let activity = dashboard.state().await.activity;
    let limit = args.limit.unwrap_or(activity.len());
    let rows: Vec<ActivityRow> = activity.iter().take(limit).map(ActivityRow::from).collect();
    output::print_list(&rows, cli.format);

    Ok(())
}
