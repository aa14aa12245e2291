use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::user::UserRef;

/// A note on a ticket. Internal comments are visible to staff only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    pub content: String,
    pub author: UserRef,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub is_internal: bool,
}
