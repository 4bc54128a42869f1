//! # spaces-view
//!
//! Client-side controllers for the Spaces gateway. They hold the state a
//! screen renders (the last fetched spaces, files, members and activity)
//! and translate user actions into gateway requests.
//!
//! - `api`: the [`SpacesApi`] seam and its transfer types
//! - `client`: [`GatewayClient`], the reqwest implementation
//! - `dashboard`: space list, selection, files and activity
//! - `settings`: one space's name, description and membership
//! - `format`: file size and relative time rendering

pub mod api;
pub mod client;
pub mod dashboard;
pub mod format;
pub mod notifier;
pub mod settings;

#[cfg(test)]
mod testing;

pub use api::{Download, FileUpload, SpacesApi};
pub use client::GatewayClient;
pub use dashboard::{DashboardController, DashboardState};
pub use notifier::{Notifier, failure_message};
pub use settings::{Navigation, SettingsLoad, SpaceSettingsController};
