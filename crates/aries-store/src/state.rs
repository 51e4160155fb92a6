//! Per-store cached state.

use aries_types::{Collection, Pagination};

/// Loading status of a store.
///
/// Transitions: `Idle → Loading → {Ready, Failed}`; from `Ready` or
/// `Failed` any new operation re-enters `Loading`. `Failed` keeps the
/// last-known-good data visible; only the status and message change.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(String),
}

impl Status {
    #[must_use]
    pub fn is_ready(&self) -> bool {
        *self == Self::Ready
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        *self == Self::Loading
    }

    /// The failure reason, if the last operation failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Cached state of one entity family.
///
/// `items` and `pagination` always describe the most recently *committed*
/// fetch; a fetch in flight never partially overwrites them.
#[derive(Debug, Clone)]
pub struct CollectionState<C: Collection> {
    /// Current page of results, in server-defined order.
    pub items: Vec<C>,
    /// At most one entity designated as the detail focus. May or may not
    /// also be present in `items`.
    pub selected: Option<C>,
    /// Filter criteria that produced `items`.
    pub filters: C::Filters,
    /// The window `items` represents.
    pub pagination: Pagination,
    pub status: Status,
}

impl<C: Collection> CollectionState<C> {
    /// Looks up a cached entity by id in the current page.
    #[must_use]
    pub fn item(&self, id: u64) -> Option<&C> {
        self.items.iter().find(|e| e.id() == id)
    }
}

impl<C: Collection> Default for CollectionState<C> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            selected: None,
            filters: C::Filters::default(),
            pagination: Pagination::default(),
            status: Status::Idle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aries_types::Organization;

    #[test]
    fn test_default_state_is_empty_and_idle() {
        let state = CollectionState::<Organization>::default();

        assert!(state.items.is_empty());
        assert!(state.selected.is_none());
        assert_eq!(state.status, Status::Idle);
        assert_eq!(state.pagination.page, 1);
        assert_eq!(state.pagination.total_count, 0);
    }

    #[test]
    fn test_status_error_accessor() {
        assert_eq!(Status::Failed("boom".into()).error(), Some("boom"));
        assert_eq!(Status::Ready.error(), None);
    }
}
