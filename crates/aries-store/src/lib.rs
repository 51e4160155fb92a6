//! In-memory collection stores for the Aries client.
//!
//! One [`CollectionStore`] per entity family owns that family's cached
//! list, detail focus, filter set, pagination window, and status. Stores
//! never reach into each other's caches; cross-store effects travel over
//! the thin [`StoreEvents`] bus as re-fetch hints. The parallel
//! [`SessionStore`] mirrors authentication state.

mod collection;
mod error;
mod events;
mod session;
mod state;

pub use collection::{CollectionStore, OrganizationStore, TournamentStore};
pub use error::StoreError;
pub use events::{Mutation, StoreEvent, StoreEvents};
pub use session::{SessionState, SessionStore};
pub use state::{CollectionState, Status};
