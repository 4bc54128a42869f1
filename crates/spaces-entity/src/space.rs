//! Space models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::SpaceId;
use crate::member::{Member, MemberRole};

/// A shared workspace containing files, members, and an activity log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Space {
    /// Backend identifier.
    pub id: SpaceId,
    /// Display name.
    pub name: String,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Email of the space owner.
    pub admin_email: String,
    /// Members, when the backend includes them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<Member>>,
    /// Creation time, when the backend includes it.
    #[serde(
        default,
        with = "crate::timestamp::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

impl Space {
    /// Members as a slice (empty when the backend omitted them).
    pub fn members(&self) -> &[Member] {
        self.members.as_deref().unwrap_or_default()
    }

    /// Whether `email` owns the space.
    pub fn is_owner(&self, email: &str) -> bool {
        self.admin_email == email
    }

    /// Whether `email` may administer the space: the owner, or a member
    /// holding the `ADMIN` role.
    pub fn is_admin(&self, email: &str) -> bool {
        self.is_owner(email)
            || self
                .members()
                .iter()
                .any(|m| m.email == email && m.role == MemberRole::Admin)
    }

    /// Description or the empty string.
    pub fn description_or_empty(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

/// Body of `POST /api/spaces`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSpace {
    /// Display name.
    pub name: String,
    /// Description (may be empty).
    #[serde(default)]
    pub description: String,
}

/// Body of `PUT /api/spaces/{id}`. Only present fields are changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpaceUpdate {
    /// New name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SpaceUpdate {
    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}
