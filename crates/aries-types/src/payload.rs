//! Typed mutation payloads.
//!
//! Bodies for create/update/join calls are closed structural types checked
//! with `validator` before any network call, so malformed input is rejected
//! locally instead of only by the server.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::organization::OrganizationType;
use crate::tournament::{TourFormat, TournamentType};

/// Body for `POST /organizations/`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewOrganization {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 10))]
    pub tag: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 2000))]
    pub description: String,
    #[validate(length(min = 2, max = 2))]
    pub country: String,
    pub organization_type: OrganizationType,
    #[validate(url)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_game: Option<String>,
}

/// Partial body for `PATCH /organizations/{id}/`.
///
/// Unset fields are omitted from the request so the server leaves them
/// untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct OrganizationPatch {
    #[validate(length(min = 1, max = 100))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 10))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[validate(email)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[validate(length(max = 2000))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_type: Option<OrganizationType>,
    #[validate(url)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_game: Option<String>,
}

/// Body for `POST /tournaments/`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewTournament {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub tournament_type: TournamentType,
    pub tour_format: TourFormat,
    #[validate(length(min = 1))]
    pub start_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    /// A bracket needs at least two entrants.
    #[validate(range(min = 2))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_participants: Option<u32>,
    #[validate(range(min = 0.0))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_fee: Option<f64>,
    #[validate(range(min = 0.0))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prize_pool: Option<f64>,
    #[serde(default)]
    pub home_or_away: bool,
}

/// Partial body for `PATCH /tournaments/{id}/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct TournamentPatch {
    #[validate(length(min = 1, max = 100))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[validate(range(min = 2))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_participants: Option<u32>,
    #[validate(range(min = 0.0))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_fee: Option<f64>,
    #[validate(range(min = 0.0))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prize_pool: Option<f64>,
}

/// Body for `POST /organizations/{id}/join/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JoinOrganization {
    /// Optional note shown to the organization's admins.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Body for `POST /tournaments/{id}/join/`. The endpoint takes no fields.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct JoinTournament {}

/// Body for `PATCH /tournaments/{id}/matches/{match_id}/`.
///
/// Standings, eliminations, and match states derived from a result are
/// computed server-side; callers re-fetch the tournament afterwards.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate)]
pub struct MatchResult {
    pub home_score: u32,
    pub away_score: u32,
}

/// Body for `POST /auth/login/`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
}

/// Body for `POST /auth/register/`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 30))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    #[validate(must_match(other = "password"))]
    pub confirm_password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

/// Partial body for `PATCH /users/{id}/profile/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ProfilePatch {
    #[validate(length(max = 32))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[validate(url)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_org() -> NewOrganization {
        NewOrganization {
            name: "Night Owls".into(),
            tag: "OWL".into(),
            email: "contact@owls.gg".into(),
            description: "Community organizer".into(),
            country: "DE".into(),
            organization_type: OrganizationType::GamingCommunity,
            website: None,
            primary_game: None,
        }
    }

    #[test]
    fn test_valid_organization_payload_passes() {
        assert!(new_org().validate().is_ok());
    }

    #[test]
    fn test_bad_email_rejected_locally() {
        let mut payload = new_org();
        payload.email = "not-an-email".into();
        assert!(payload.validate().is_err());
    }

    #[test]
    fn test_single_entrant_bracket_rejected() {
        let payload = NewTournament {
            name: "Solo".into(),
            description: None,
            tournament_type: TournamentType::Individual,
            tour_format: TourFormat::Cup,
            start_date: "2025-03-01".into(),
            end_date: None,
            max_participants: Some(1),
            entry_fee: None,
            prize_pool: None,
            home_or_away: false,
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn test_register_requires_matching_passwords() {
        let req = RegisterRequest {
            username: "alice".into(),
            email: "alice@example.com".into(),
            password: "hunter2hunter2".into(),
            confirm_password: "different".into(),
            first_name: String::new(),
            last_name: String::new(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_patch_omits_unset_fields() {
        let patch = TournamentPatch {
            name: Some("Renamed".into()),
            ..Default::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({"name": "Renamed"}));
    }
}
