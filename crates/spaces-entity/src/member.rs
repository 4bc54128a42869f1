//! Space membership models.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use spaces_core::AppError;

/// Role a member holds within a space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MemberRole {
    /// May edit the space and manage members.
    Admin,
    /// May read and upload.
    Member,
}

impl MemberRole {
    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Member => "MEMBER",
        }
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MemberRole {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ADMIN" => Ok(Self::Admin),
            "MEMBER" => Ok(Self::Member),
            _ => Err(AppError::validation(format!(
                "Invalid member role: '{s}'. Expected ADMIN or MEMBER"
            ))),
        }
    }
}

/// A member of a space. Emails are unique within a space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// Member email.
    pub email: String,
    /// Role within the space.
    pub role: MemberRole,
    /// Whether this member owns the space.
    #[serde(default)]
    pub owner: bool,
    /// When the member was added.
    #[serde(
        default,
        with = "crate::timestamp::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub added_at: Option<DateTime<Utc>>,
}

/// Body of `POST /api/spaces/{id}/members`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMember {
    /// Email of the user to add.
    pub email: String,
}

/// Body of `PUT /api/spaces/{id}/members/{email}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoleChange {
    /// Role to assign.
    pub role: MemberRole,
}
