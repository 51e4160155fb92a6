//! Common types used throughout the Aries client.
//!
//! This crate provides the entity model, wire envelopes, filter sets, and
//! typed mutation payloads for the Aries tournament platform, plus the
//! [`Collection`] trait binding each entity family to its REST endpoints.

mod collection;
mod envelope;
mod filter;
mod organization;
mod payload;
mod tournament;
mod user;

pub use collection::{Collection, EntityFamily};
pub use envelope::{Ack, AuthData, Envelope, Page, Pagination};
pub use filter::{OrganizationFilters, TournamentFilters};
pub use organization::{
    MemberRole, Organization, OrganizationMember, OrganizationType,
};
pub use payload::{
    JoinOrganization, JoinTournament, LoginRequest, MatchResult, NewOrganization, NewTournament,
    OrganizationPatch, ProfilePatch, RegisterRequest, TournamentPatch,
};
pub use tournament::{
    ParticipantStatus, TourFormat, Tournament, TournamentParticipant, TournamentStatus,
    TournamentType,
};
pub use user::{Profile, ProfileRole, User};
