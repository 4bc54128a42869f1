//! Space settings: rename, describe, delete, and manage members.

use std::sync::Arc;

use tracing::warn;

use spaces_core::error::AppError;
use spaces_core::result::AppResult;
use spaces_entity::{Activity, Member, MemberRole, NewMember, RoleChange, Space, SpaceId, SpaceUpdate};

use crate::api::SpacesApi;
use crate::notifier::{Notifier, failure_message};

const OWNER_REMOVAL_MESSAGE: &str = "You cannot remove the workspace owner.";

/// Outcome of opening the settings screen.
#[derive(Debug)]
pub enum SettingsLoad {
    /// The space loaded.
    Ready(SpaceSettingsController),
    /// The space does not exist.
    NotFound,
    /// The caller may not see the space; go back to the dashboard.
    Redirect,
}

/// Where to go after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Remain on the settings screen.
    Stay,
    /// Back to the dashboard.
    Home,
}

/// Drives the settings screen of one space for one user.
///
/// Mutations are admin-only. Non-admins get no request and no alert.
#[derive(Debug)]
pub struct SpaceSettingsController {
    api: Arc<dyn SpacesApi>,
    notifier: Arc<dyn Notifier>,
    current_email: String,
    space: Space,
    name: String,
    description: String,
    members: Vec<Member>,
    member_email: String,
    activity: Vec<Activity>,
}

impl SpaceSettingsController {
    /// Fetches the space and its activity.
    ///
    /// 404 gives [`SettingsLoad::NotFound`], 403 gives
    /// [`SettingsLoad::Redirect`], other failures are errors. A failed
    /// activity fetch just leaves the log empty.
    pub async fn load(
        api: Arc<dyn SpacesApi>,
        notifier: Arc<dyn Notifier>,
        current_email: impl Into<String>,
        space_id: &SpaceId,
    ) -> AppResult<SettingsLoad> {
        let space = match api.get_space(space_id).await {
            Ok(space) => space,
            Err(e) => {
                return match e.upstream_status() {
                    Some(404) => Ok(SettingsLoad::NotFound),
                    Some(403) => Ok(SettingsLoad::Redirect),
                    _ => Err(e.context("Failed to load space")),
                };
            }
        };

        let activity = api.list_activity(space_id).await.unwrap_or_else(|e| {
            warn!(space_id = %space_id, error = %e, "Failed to load activity");
            Vec::new()
        });

        Ok(SettingsLoad::Ready(Self {
            api,
            notifier,
            current_email: current_email.into(),
            name: space.name.clone(),
            description: space.description_or_empty().to_string(),
            members: space.members().to_vec(),
            member_email: String::new(),
            activity,
            space,
        }))
    }

    /// The space as last fetched.
    pub fn space(&self) -> &Space {
        &self.space
    }

    /// Name draft.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Description draft.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Members as last fetched.
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// New-member email draft.
    pub fn member_email(&self) -> &str {
        &self.member_email
    }

    /// Activity as last fetched.
    pub fn activity(&self) -> &[Activity] {
        &self.activity
    }

    /// Edit the name draft.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Edit the description draft.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Edit the new-member email draft.
    pub fn set_member_email(&mut self, email: impl Into<String>) {
        self.member_email = email.into();
    }

    /// Whether the current user owns the space or holds the `ADMIN` role.
    pub fn is_admin(&self) -> bool {
        self.space.is_admin(&self.current_email)
    }

    /// Sends the fields that differ from the fetched space. Nothing is sent
    /// when nothing changed.
    pub async fn save(&mut self) -> bool {
        if !self.is_admin() {
            return false;
        }

        let update = self.pending_update();
        if update.is_empty() {
            return false;
        }

        match self.api.update_space(&self.space.id, &update).await {
            Ok(_) => {
                self.refresh().await;
                true
            }
            Err(e) => {
                self.notifier
                    .alert(&failure_message(&e, "Unable to update space"));
                false
            }
        }
    }

    /// Deletes the space after confirmation.
    pub async fn delete(&mut self) -> Navigation {
        if !self.is_admin() {
            return Navigation::Stay;
        }
        let prompt = format!("Delete \"{}\"? This cannot be undone.", self.space.name);
        if !self.notifier.confirm(&prompt) {
            return Navigation::Stay;
        }

        match self.api.delete_space(&self.space.id).await {
            Ok(_) => Navigation::Home,
            Err(e) => {
                self.notifier
                    .alert(&failure_message(&e, "Unable to delete space"));
                Navigation::Stay
            }
        }
    }

    /// Adds the member named in the email draft.
    pub async fn add_member(&mut self) -> bool {
        let email = self.member_email.trim().to_string();
        if !self.is_admin() || email.is_empty() {
            return false;
        }

        match self.api.add_member(&self.space.id, &NewMember { email }).await {
            Ok(_) => {
                self.member_email.clear();
                self.refresh().await;
                true
            }
            Err(e) => {
                self.notifier
                    .alert(&failure_message(&e, "Unable to add member"));
                false
            }
        }
    }

    /// Removes a member after confirmation. The owner cannot be removed.
    pub async fn remove_member(&mut self, email: &str) -> bool {
        if !self.is_admin() {
            return false;
        }
        if self.space.is_owner(email) {
            self.notifier.alert(OWNER_REMOVAL_MESSAGE);
            return false;
        }
        if !self
            .notifier
            .confirm(&format!("Remove {email} from this workspace?"))
        {
            return false;
        }

        match self.api.remove_member(&self.space.id, email).await {
            Ok(_) => {
                self.refresh().await;
                true
            }
            Err(e) => {
                self.notifier
                    .alert(&failure_message(&e, "Unable to remove member"));
                false
            }
        }
    }

    /// Changes a member's role.
    pub async fn change_role(&mut self, email: &str, role: MemberRole) -> bool {
        if !self.is_admin() {
            return false;
        }

        match self
            .api
            .change_role(&self.space.id, email, &RoleChange { role })
            .await
        {
            Ok(_) => {
                self.refresh().await;
                true
            }
            Err(e) => {
                self.notifier
                    .alert(&failure_message(&e, "Unable to update role"));
                false
            }
        }
    }

    /// Re-fetches the space (name, description, members) and activity.
    pub async fn refresh(&mut self) {
        match self.api.get_space(&self.space.id).await {
            Ok(space) => {
                self.name = space.name.clone();
                self.description = space.description_or_empty().to_string();
                self.members = space.members().to_vec();
                self.space = space;
            }
            Err(e) => warn!(space_id = %self.space.id, error = %e, "Failed to refresh space"),
        }

        match self.api.list_activity(&self.space.id).await {
            Ok(activity) => self.activity = activity,
            Err(e) => warn!(space_id = %self.space.id, error = %e, "Failed to refresh activity"),
        }
    }

    fn pending_update(&self) -> SpaceUpdate {
        let name = self.name.trim();
        SpaceUpdate {
            name: (name != self.space.name).then(|| name.to_string()),
            description: (self.description != self.space.description_or_empty())
                .then(|| self.description.clone()),
        }
    }
}

/// Turns a failed load into the message the settings screen shows.
pub fn load_failure_message(err: &AppError) -> String {
    failure_message(err, "Failed to load space")
}
