use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Actor role as issued by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Role {
    Employee,
    Hr,
    Admin,
    It,
    SuperAdmin,
}

impl Role {
    /// Roles with ticket-management rights.
    pub const STAFF: [Role; 4] = [Role::Admin, Role::Hr, Role::SuperAdmin, Role::It];

    pub fn is_staff(self) -> bool {
        Self::STAFF.contains(&self)
    }
}

/// The authenticated account, as returned by `/auth/login` and `/auth/me`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// A person embedded in a ticket (requester, assignee, comment author).
///
/// List endpoints only populate name and email, so everything else is
/// optional on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRef {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

impl UserRef {
    pub fn is(&self, user: &User) -> bool {
        !self.id.is_empty() && self.id == user.id
    }
}
