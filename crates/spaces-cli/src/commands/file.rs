//! File commands.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use spaces_core::error::AppError;
use spaces_entity::{FileId, SpaceFile};
use spaces_view::format::{format_file_size, format_relative_time};
use spaces_view::{DashboardController, FileUpload};

use super::Cli;
use crate::output;

/// Arguments for file commands
#[derive(Debug, Args)]
pub struct FileArgs {
    /// File subcommand
    #[command(subcommand)]
    pub command: FileCommand,
}

/// File subcommands
#[derive(Debug, Subcommand)]
pub enum FileCommand {
    /// List files in a space
    List {
        /// Space ID
        space: String,
    },
    /// Upload a local file to a space
    Upload {
        /// Space ID
        space: String,
        /// Local file path
        path: PathBuf,
    },
    /// Download a file
    Download {
        /// File ID
        file: String,
        /// Output path (defaults to the served file name)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Delete a file from a space
    Delete {
        /// Space ID
        space: String,
        /// File ID
        file: String,
    },
}

/// File display row
#[derive(Debug, Serialize, Tabled)]
struct FileRow {
    /// ID
    id: String,
    /// Name
    name: String,
    /// Size
    size: String,
    /// Uploaded by
    uploader: String,
    /// Uploaded
    uploaded: String,
}

impl From<&SpaceFile> for FileRow {
    fn from(file: &SpaceFile) -> Self {
        Self {
            id: file.id.to_string(),
            name: file.original_filename.clone(),
            size: format_file_size(file.size),
            uploader: file.uploader_email.clone(),
            uploaded: format_relative_time(file.uploaded_at, chrono::Utc::now()),
        }
    }
}

/// Execute file commands
pub async fn execute(args: &FileArgs, cli: &Cli) -> Result<(), AppError> {
    let api = cli.client()?;

    match &args.command {
        FileCommand::List { space } => {
            let space = super::fetch_space(&api, space).await?;
            let dashboard = DashboardController::new(Arc::new(api), cli.notifier());
            dashboard.select_space(space).await;

            let rows: Vec<FileRow> = dashboard.state().await.files.iter().map(FileRow::from).collect();
            output::print_list(&rows, cli.format);
        }
        FileCommand::Upload { space, path } => {
            let upload = FileUpload::from_path(path).await?;
            let file_name = upload.file_name.clone();

            let space = super::fetch_space(&api, space).await?;
            let dashboard = DashboardController::new(Arc::new(api), cli.notifier());
            dashboard.select_space(space).await;

            if !dashboard.upload_file(upload).await {
                return Err(AppError::external(format!("Upload of '{file_name}' failed")));
            }
            output::print_success(&format!("Uploaded {file_name}"));
        }
        FileCommand::Download { file, out } => {
            let dashboard = DashboardController::new(Arc::new(api), cli.notifier());
            let download = dashboard
                .download_file(&FileId::from(file.as_str()))
                .await
                .ok_or_else(|| AppError::external(format!("Download of {file} failed")))?;

            let path = out
                .clone()
                .or_else(|| download.file_name().map(PathBuf::from))
                .unwrap_or_else(|| PathBuf::from(file));

            tokio::fs::write(&path, &download.data).await?;
            output::print_success(&format!(
                "Saved {} ({}, {})",
                path.display(),
                format_file_size(download.data.len() as u64),
                download.content_type
            ));
        }
        FileCommand::Delete { space, file } => {
            let space = super::fetch_space(&api, space).await?;
            let notifier = cli.notifier();
            let dashboard = DashboardController::new(Arc::new(api), notifier.clone());
            dashboard.select_space(space).await;

            if dashboard.delete_file(&FileId::from(file.as_str())).await {
                output::print_success(&format!("File {file} deleted"));
            } else {
                notifier.ensure_no_failure(&format!("File {file} was not deleted"))?;
                println!("File {file} was not deleted.");
            }
        }
    }

    Ok(())
}
