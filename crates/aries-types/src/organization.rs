//! Organization entity types.
//!
//! Organizations are pure organizers: they host tournaments, distribute
//! prizes, and carry server-derived reputation counters. All counters are
//! computed server-side and must never be adjusted locally.

use serde::{Deserialize, Serialize};

use crate::user::User;

/// Kind of organizer an organization is registered as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrganizationType {
    EsportsCompany,
    TournamentOrganizer,
    GamingCommunity,
    EventCompany,
    Sponsor,
    MediaCompany,
}

/// Role of a member inside an organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Admin,
    Captain,
    #[default]
    Member,
    Recruit,
}

/// A membership record inside an organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizationMember {
    pub id: u64,
    /// Owning organization id.
    pub organization: u64,
    pub user: User,
    #[serde(default)]
    pub role: MemberRole,
    #[serde(default)]
    pub joined_at: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// A tournament-organizing body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub id: u64,
    pub name: String,
    /// Short display tag.
    pub tag: String,
    pub email: String,
    #[serde(default)]
    pub description: String,
    pub country: String,
    pub organization_type: OrganizationType,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub primary_game: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Id of the user who created the organization.
    #[serde(default)]
    pub created_by: u64,
    #[serde(default)]
    pub can_host_tournaments: bool,
    #[serde(default)]
    pub can_sponsor_events: bool,
    /// Server-derived lifetime counter.
    #[serde(default)]
    pub total_tournaments_hosted: u64,
    /// Server-derived lifetime counter.
    #[serde(default)]
    pub total_prize_money_distributed: f64,
    #[serde(default)]
    pub members: Vec<OrganizationMember>,
    pub created_at: String,
    /// Revision marker for the record.
    pub updated_at: String,
}

fn default_true() -> bool {
    true
}
