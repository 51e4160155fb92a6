//! Filter sets narrowing list fetches.
//!
//! Every predicate is optional; unset predicates are omitted from the
//! query string entirely so the server applies no constraint.

use serde::{Deserialize, Serialize};

use crate::organization::OrganizationType;
use crate::tournament::{TournamentStatus, TournamentType};

/// Predicates for organization list fetches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrganizationFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_type: Option<OrganizationType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_verified: Option<bool>,
    /// Free-text search over name and tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

/// Predicates for tournament list fetches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TournamentFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tournament_type: Option<TournamentType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TournamentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filters_serialize_to_nothing() {
        let qs = serde_urlencoded::to_string(TournamentFilters::default()).unwrap();
        assert_eq!(qs, "");
    }

    #[test]
    fn test_set_predicates_appear_in_query() {
        let filters = TournamentFilters {
            status: Some(TournamentStatus::Upcoming),
            search: Some("spring".into()),
            ..Default::default()
        };
        let qs = serde_urlencoded::to_string(&filters).unwrap();

        assert_eq!(qs, "status=upcoming&search=spring");
    }

    #[test]
    fn test_bool_predicate_serializes_as_literal() {
        let filters = OrganizationFilters {
            is_verified: Some(true),
            ..Default::default()
        };
        let qs = serde_urlencoded::to_string(&filters).unwrap();

        assert_eq!(qs, "is_verified=true");
    }
}
