//! The [`Collection`] trait binding an entity family to its endpoints.

use serde::de::DeserializeOwned;
use serde::Serialize;
use validator::Validate;

use crate::filter::{OrganizationFilters, TournamentFilters};
use crate::organization::Organization;
use crate::payload::{
    JoinOrganization, JoinTournament, NewOrganization, NewTournament, OrganizationPatch,
    TournamentPatch,
};
use crate::tournament::Tournament;

/// Entity families that get their own collection store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityFamily {
    Organizations,
    Tournaments,
}

/// An entity family served by the standard collection endpoints.
///
/// Implementors tie together the REST path segment, the filter set, and the
/// typed mutation payloads for one family, so the gateway and the stores can
/// be written once and instantiated per family.
pub trait Collection: Clone + std::fmt::Debug + DeserializeOwned + Send + Sync + 'static {
    /// URL path segment, e.g. `tournaments` in `/tournaments/{id}/`.
    const PATH: &'static str;
    /// Family tag carried by store events.
    const FAMILY: EntityFamily;

    /// Optional predicates for list fetches.
    type Filters: Serialize + Clone + Default + PartialEq + std::fmt::Debug + Send + Sync + 'static;
    /// Creation payload.
    type Create: Serialize + Validate + Send + Sync;
    /// Partial-update payload.
    type Patch: Serialize + Validate + Send + Sync;
    /// Body of the `join` endpoint.
    type Join: Serialize + Send + Sync;

    /// Server-assigned numeric id.
    fn id(&self) -> u64;

    /// Revision marker of this copy of the record.
    fn updated_at(&self) -> &str;
}

impl Collection for Organization {
    const PATH: &'static str = "organizations";
    const FAMILY: EntityFamily = EntityFamily::Organizations;

    type Filters = OrganizationFilters;
    type Create = NewOrganization;
    type Patch = OrganizationPatch;
    type Join = JoinOrganization;

    fn id(&self) -> u64 {
        self.id
    }

    fn updated_at(&self) -> &str {
        &self.updated_at
    }
}

impl Collection for Tournament {
    const PATH: &'static str = "tournaments";
    const FAMILY: EntityFamily = EntityFamily::Tournaments;

    type Filters = TournamentFilters;
    type Create = NewTournament;
    type Patch = TournamentPatch;
    type Join = JoinTournament;

    fn id(&self) -> u64 {
        self.id
    }

    fn updated_at(&self) -> &str {
        &self.updated_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_match_api_layout() {
        assert_eq!(Organization::PATH, "organizations");
        assert_eq!(Tournament::PATH, "tournaments");
    }
}
