//! Activity log model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::ActivityId;

/// One entry of a space's activity log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Backend identifier.
    pub id: ActivityId,
    /// Email of the acting user.
    pub user_email: String,
    /// Action label, e.g. `UPLOAD_FILE`.
    pub action: String,
    /// Extra detail, e.g. the file name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// When it happened.
    #[serde(with = "crate::timestamp::required")]
    pub timestamp: DateTime<Utc>,
}
