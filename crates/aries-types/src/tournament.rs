//! Tournament entity types.

use serde::{Deserialize, Serialize};

use crate::organization::Organization;
use crate::user::User;

/// Whether participants enter individually or as a clan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TournamentType {
    Individual,
    Clan,
}

/// Competition format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TourFormat {
    League,
    Cup,
    GroupsKnockout,
}

/// Lifecycle state of a tournament, assigned by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TournamentStatus {
    Upcoming,
    Ongoing,
    Completed,
    Cancelled,
}

/// State of a single participant within a tournament.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantStatus {
    Active,
    Eliminated,
    Withdrawn,
}

/// An entry in a tournament's participant list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentParticipant {
    pub id: u64,
    /// Owning tournament id.
    pub tournament: u64,
    /// Present for individual tournaments.
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub joined_at: String,
    pub status: ParticipantStatus,
}

/// A tournament hosted by an organization.
///
/// The participant list and the eligibility window are server-derived;
/// the client refreshes the whole record after any membership mutation
/// instead of patching counts locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub created_by: User,
    /// The hosting organization.
    pub organizer: Organization,
    pub tournament_type: TournamentType,
    pub tour_format: TourFormat,
    pub status: TournamentStatus,
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub max_participants: Option<u32>,
    #[serde(default)]
    pub entry_fee: Option<f64>,
    #[serde(default)]
    pub prize_pool: Option<f64>,
    #[serde(default)]
    pub home_or_away: bool,
    #[serde(default)]
    pub participants: Vec<TournamentParticipant>,
    pub created_at: String,
    /// Revision marker for the record.
    pub updated_at: String,
}

impl Tournament {
    /// Number of participants still active in the bracket.
    #[must_use]
    pub fn active_participants(&self) -> usize {
        self.participants
            .iter()
            .filter(|p| p.status == ParticipantStatus::Active)
            .count()
    }

    /// Whether the tournament still accepts entries.
    #[must_use]
    pub fn accepts_entries(&self) -> bool {
        if self.status != TournamentStatus::Upcoming {
            return false;
        }
        match self.max_participants {
            Some(max) => self.participants.len() < max as usize,
            None => true,
        }
    }
}
