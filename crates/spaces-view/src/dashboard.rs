//! Dashboard: the caller's spaces, the selected one, its files and activity.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;
use tracing::{debug, warn};

use spaces_entity::{Activity, FileId, NewSpace, Space, SpaceFile, SpaceId};

use crate::api::{Download, FileUpload, SpacesApi};
use crate::notifier::{Notifier, failure_message};

/// What the dashboard renders.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    /// Spaces from the last list fetch.
    pub spaces: Vec<Space>,
    /// The selected space.
    pub selected: Option<Space>,
    /// Files of the selected space.
    pub files: Vec<SpaceFile>,
    /// Activity of the selected space.
    pub activity: Vec<Activity>,
    /// A space list fetch is in flight.
    pub loading_spaces: bool,
    /// Files/activity for the selection are in flight.
    pub loading_data: bool,
}

/// Drives the dashboard screen.
///
/// Every selection takes a new token. Files and activity that arrive for a
/// superseded token are dropped, so a slow reply for an earlier selection
/// never overwrites the current one.
#[derive(Debug)]
pub struct DashboardController {
    api: Arc<dyn SpacesApi>,
    notifier: Arc<dyn Notifier>,
    state: RwLock<DashboardState>,
    selection: AtomicU64,
}

impl DashboardController {
    /// Creates a controller with empty state.
    pub fn new(api: Arc<dyn SpacesApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            state: RwLock::new(DashboardState::default()),
            selection: AtomicU64::new(0),
        }
    }

    /// Snapshot of the current state.
    pub async fn state(&self) -> DashboardState {
        self.state.read().await.clone()
    }

    /// Fetches the space list and selects the first space if nothing is
    /// selected yet.
    pub async fn load_spaces(&self) {
        self.state.write().await.loading_spaces = true;

        let first = match self.api.list_spaces().await {
            Ok(spaces) => {
                let mut state = self.state.write().await;
                state.spaces = spaces;
                state.loading_spaces = false;
                if state.selected.is_none() {
                    state.spaces.first().cloned()
                } else {
                    None
                }
            }
            Err(e) => {
                warn!(error = %e, "Failed to load spaces");
                self.state.write().await.loading_spaces = false;
                None
            }
        };

        if let Some(space) = first {
            self.select_space(space).await;
        }
    }

    /// Selects a space and loads its files and activity concurrently.
    pub async fn select_space(&self, space: Space) {
        let space_id = space.id.clone();
        let token = {
            let mut state = self.state.write().await;
            state.selected = Some(space);
            state.loading_data = true;
            self.next_token()
        };
        self.load_space_data(token, &space_id).await;
    }

    /// Re-fetches the selected space and replaces it in the selection and
    /// the list.
    pub async fn refresh_current_space(&self) {
        let Some(space_id) = self.selected_id().await else {
            return;
        };

        match self.api.get_space(&space_id).await {
            Ok(updated) => {
                let mut state = self.state.write().await;
                if state.selected.as_ref().map(|s| &s.id) == Some(&updated.id) {
                    state.selected = Some(updated.clone());
                }
                for space in state.spaces.iter_mut().filter(|s| s.id == updated.id) {
                    *space = updated.clone();
                }
            }
            Err(e) => warn!(space_id = %space_id, error = %e, "Failed to refresh space"),
        }
    }

    /// Re-fetches the selected space, then its files and activity.
    pub async fn refresh(&self) {
        self.refresh_current_space().await;

        let Some(space_id) = self.selected_id().await else {
            return;
        };
        let token = {
            let mut state = self.state.write().await;
            state.loading_data = true;
            self.next_token()
        };
        self.load_space_data(token, &space_id).await;
    }

    /// Creates a space. Names that are blank after trimming are rejected
    /// without a request. Returns whether the space was created.
    pub async fn create_space(&self, name: &str, description: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }

        let space = NewSpace {
            name: name.to_string(),
            description: description.to_string(),
        };
        match self.api.create_space(&space).await {
            Ok(_) => {
                self.load_spaces().await;
                true
            }
            Err(e) => {
                self.notifier
                    .alert(&failure_message(&e, "Failed to create space"));
                false
            }
        }
    }

    /// Uploads a file to the selected space, then reloads its files and
    /// activity in that order.
    pub async fn upload_file(&self, upload: FileUpload) -> bool {
        let Some(space_id) = self.selected_id().await else {
            return false;
        };

        match self.api.upload_file(&space_id, upload).await {
            Ok(_) => {
                self.reload_after_change(&space_id).await;
                true
            }
            Err(e) => {
                self.notifier
                    .alert(&failure_message(&e, "Failed to upload file"));
                false
            }
        }
    }

    /// Downloads a file's contents.
    pub async fn download_file(&self, file_id: &FileId) -> Option<Download> {
        match self.api.download_file(file_id).await {
            Ok(download) => Some(download),
            Err(e) => {
                warn!(file_id = %file_id, error = %e, "Download failed");
                self.notifier.alert("Failed to download file");
                None
            }
        }
    }

    /// Deletes a file from the selected space after confirmation, then
    /// reloads files and activity.
    pub async fn delete_file(&self, file_id: &FileId) -> bool {
        let Some(space_id) = self.selected_id().await else {
            return false;
        };
        if !self.notifier.confirm("Delete this file?") {
            return false;
        }

        match self.api.delete_file(file_id).await {
            Ok(()) => {
                self.reload_after_change(&space_id).await;
                true
            }
            Err(e) => {
                self.notifier
                    .alert(&failure_message(&e, "Failed to delete file"));
                false
            }
        }
    }

    fn next_token(&self) -> u64 {
        self.selection.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, token: u64) -> bool {
        self.selection.load(Ordering::SeqCst) == token
    }

    async fn selected_id(&self) -> Option<SpaceId> {
        self.state.read().await.selected.as_ref().map(|s| s.id.clone())
    }

    /// Fans out the files and activity fetches and applies both if the
    /// selection is still `token`.
    async fn load_space_data(&self, token: u64, space_id: &SpaceId) {
        let (files, activity) = tokio::join!(
            self.api.list_files(space_id),
            self.api.list_activity(space_id)
        );

        // Checked under the lock: selections bump the token while holding it.
        let mut state = self.state.write().await;
        if !self.is_current(token) {
            debug!(space_id = %space_id, "Discarding data for superseded selection");
            return;
        }

        state.files = files.unwrap_or_else(|e| {
            warn!(space_id = %space_id, error = %e, "Failed to load files");
            Vec::new()
        });
        state.activity = activity.unwrap_or_else(|e| {
            warn!(space_id = %space_id, error = %e, "Failed to load activity");
            Vec::new()
        });
        state.loading_data = false;
    }

    /// Files, then activity, sequentially, for the current selection.
    async fn reload_after_change(&self, space_id: &SpaceId) {
        let token = self.selection.load(Ordering::SeqCst);

        let files = self.api.list_files(space_id).await;
        {
            let mut state = self.state.write().await;
            if self.is_current(token) {
                state.files = files.unwrap_or_else(|e| {
                    warn!(space_id = %space_id, error = %e, "Failed to load files");
                    Vec::new()
                });
            }
        }

        let activity = self.api.list_activity(space_id).await;
        let mut state = self.state.write().await;
        if self.is_current(token) {
            state.activity = activity.unwrap_or_else(|e| {
                warn!(space_id = %space_id, error = %e, "Failed to load activity");
                Vec::new()
            });
        }
    }
}
