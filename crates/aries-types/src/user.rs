//! User account and profile types.

use serde::{Deserialize, Serialize};

/// A platform user account.
///
/// Every entity instance is a verbatim copy of the last server response;
/// the client never fabricates or locally derives one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Server-assigned numeric id.
    pub id: u64,
    /// Login name.
    pub username: String,
    /// Account email.
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    /// Whether the account is active.
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Server-formatted join timestamp.
    #[serde(default)]
    pub date_joined: String,
    #[serde(default)]
    pub last_login: Option<String>,
}

/// Role a profile holds on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileRole {
    Admin,
    Captain,
    #[default]
    Member,
}

/// Extended profile attached to a [`User`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: u64,
    pub user: User,
    #[serde(default)]
    pub role: ProfileRole,
    /// Whether this profile may create organizations and host tournaments.
    #[serde(default)]
    pub is_organizer: bool,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

fn default_true() -> bool {
    true
}
