//! Generic collection store.
//!
//! One instance per entity family. All commits are all-or-nothing: a
//! failed operation changes only the status, never the cached data.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use validator::Validate;

use aries_client::ApiClient;
use aries_types::{Collection, MatchResult, Organization, Pagination, Tournament};

use crate::error::StoreError;
use crate::events::{Mutation, StoreEvent, StoreEvents};
use crate::state::{CollectionState, Status};

/// The organization collection store.
pub type OrganizationStore = CollectionStore<Organization>;
/// The tournament collection store.
pub type TournamentStore = CollectionStore<Tournament>;

struct Inner<C: Collection> {
    api: ApiClient,
    state: Mutex<CollectionState<C>>,
    /// Ticket counter for list fetches. A response commits only if its
    /// ticket is still the newest issued; older responses are discarded,
    /// so the cache always reflects the newest *issued* request.
    list_seq: AtomicU64,
    /// Ticket counter for detail fetches, independent of the list window.
    detail_seq: AtomicU64,
    events: Option<StoreEvents>,
}

/// In-memory cache and operations for one entity family.
///
/// The handle is cheap to clone; all clones share one cache. Methods take
/// `&self` so interleaved operations from different UI events are safe.
/// The state lock is never held across an await point.
pub struct CollectionStore<C: Collection> {
    inner: Arc<Inner<C>>,
}

impl<C: Collection> Clone for CollectionStore<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: Collection> CollectionStore<C> {
    /// Creates a store with empty state, no event bus attached.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self::build(api, None)
    }

    /// Creates a store that publishes committed mutations on `events`.
    #[must_use]
    pub fn with_events(api: ApiClient, events: StoreEvents) -> Self {
        Self::build(api, Some(events))
    }

    fn build(api: ApiClient, events: Option<StoreEvents>) -> Self {
        Self {
            inner: Arc::new(Inner {
                api,
                state: Mutex::new(CollectionState::default()),
                list_seq: AtomicU64::new(0),
                detail_seq: AtomicU64::new(0),
                events,
            }),
        }
    }

    /// Returns a copy of the current state for rendering.
    #[must_use]
    pub fn snapshot(&self) -> CollectionState<C> {
        self.inner.state.lock().clone()
    }

    /// Stores the filter set for the next `fetch_list`. Does not fetch.
    pub fn set_filters(&self, filters: C::Filters) {
        self.inner.state.lock().filters = filters;
    }

    /// Designates the detail focus without a network call.
    pub fn set_selected(&self, entity: Option<C>) {
        self.inner.state.lock().selected = entity;
    }

    /// Drops a `Failed` status back to `Idle`. Cached data is untouched.
    pub fn clear_error(&self) {
        let mut state = self.inner.state.lock();
        if matches!(state.status, Status::Failed(_)) {
            state.status = Status::Idle;
        }
    }

    fn begin(&self) {
        self.inner.state.lock().status = Status::Loading;
    }

    fn fail(&self, reason: String) {
        self.inner.state.lock().status = Status::Failed(reason);
    }

    fn publish(&self, kind: Mutation, id: u64) {
        if let Some(ref events) = self.inner.events {
            events.publish(StoreEvent {
                family: C::FAMILY,
                id,
                kind,
            });
        }
    }

    /// Fetches one page of the filtered list and atomically replaces
    /// `items`, `pagination`, and `filters` on success. On failure the
    /// cached window stays untouched and only the status changes.
    ///
    /// A `fetch_list` issued while another is in flight supersedes it:
    /// whichever response belongs to the newest issued request wins,
    /// regardless of arrival order.
    pub async fn fetch_list(&self, filters: C::Filters, page: u32) -> Result<(), StoreError> {
        let ticket = self.inner.list_seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.begin();

        match self.inner.api.list::<C>(&filters, page).await {
            Ok(window) => {
                // The ticket check and the commit must happen under the
                // same lock; checked outside, a newer commit could slip in
                // between the check and the lock.
                let mut state = self.inner.state.lock();
                if self.newest_list(ticket) {
                    state.items = window.results;
                    state.pagination = Pagination {
                        page: window.page,
                        total_pages: window.total_pages,
                        total_count: window.count,
                    };
                    state.filters = filters;
                    state.status = Status::Ready;
                } else {
                    tracing::debug!(
                        family = ?C::FAMILY,
                        ticket,
                        "discarding superseded list response"
                    );
                }
                Ok(())
            }
            Err(e) => {
                let err = StoreError::from(e);
                let mut state = self.inner.state.lock();
                if self.newest_list(ticket) {
                    state.status = Status::Failed(err.reason());
                }
                Err(err)
            }
        }
    }

    /// Fetches a single entity and sets it as the detail focus. If the
    /// entity is also present in `items`, the cached copy is replaced so
    /// list and detail views never diverge.
    pub async fn fetch_one(&self, id: u64) -> Result<(), StoreError> {
        let ticket = self.inner.detail_seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.begin();

        match self.inner.api.get::<C>(id).await {
            Ok(entity) => {
                // Same locking rule as `fetch_list`.
                let mut state = self.inner.state.lock();
                if self.newest_detail(ticket) {
                    if let Some(slot) = state.items.iter_mut().find(|e| e.id() == id) {
                        *slot = entity.clone();
                    }
                    state.selected = Some(entity);
                    state.status = Status::Ready;
                } else {
                    tracing::debug!(
                        family = ?C::FAMILY,
                        ticket,
                        "discarding superseded detail response"
                    );
                }
                Ok(())
            }
            Err(e) => {
                let err = StoreError::from(e);
                let mut state = self.inner.state.lock();
                if self.newest_detail(ticket) {
                    state.status = Status::Failed(err.reason());
                }
                Err(err)
            }
        }
    }

    fn newest_list(&self, ticket: u64) -> bool {
        ticket == self.inner.list_seq.load(Ordering::SeqCst)
    }

    fn newest_detail(&self, ticket: u64) -> bool {
        ticket == self.inner.detail_seq.load(Ordering::SeqCst)
    }

    /// Creates an entity. The server's canonical record is prepended to
    /// `items` and becomes the detail focus; no refetch is needed because
    /// the response already is the authoritative new entity.
    pub async fn create(&self, payload: C::Create) -> Result<C, StoreError> {
        if let Err(errors) = payload.validate() {
            let err = StoreError::invalid(errors);
            self.fail(err.reason());
            return Err(err);
        }
        self.begin();

        match self.inner.api.create::<C>(&payload).await {
            Ok(entity) => {
                {
                    let mut state = self.inner.state.lock();
                    state.items.insert(0, entity.clone());
                    state.selected = Some(entity.clone());
                    state.status = Status::Ready;
                }
                self.publish(Mutation::Created, entity.id());
                Ok(entity)
            }
            Err(e) => {
                let err = StoreError::from(e);
                self.fail(err.reason());
                Err(err)
            }
        }
    }

    /// Applies a partial update. Both the cached list element and the
    /// detail focus (when they match `id`) are replaced with the server's
    /// canonical record, never a local merge.
    pub async fn update(&self, id: u64, patch: C::Patch) -> Result<C, StoreError> {
        if let Err(errors) = patch.validate() {
            let err = StoreError::invalid(errors);
            self.fail(err.reason());
            return Err(err);
        }
        self.begin();

        match self.inner.api.update::<C>(id, &patch).await {
            Ok(entity) => {
                {
                    let mut state = self.inner.state.lock();
                    if let Some(slot) = state.items.iter_mut().find(|e| e.id() == id) {
                        *slot = entity.clone();
                    }
                    if state.selected.as_ref().is_some_and(|s| s.id() == id) {
                        state.selected = Some(entity.clone());
                    }
                    state.status = Status::Ready;
                }
                self.publish(Mutation::Updated, id);
                Ok(entity)
            }
            Err(e) => {
                let err = StoreError::from(e);
                self.fail(err.reason());
                Err(err)
            }
        }
    }

    /// Deletes an entity, removing it from `items` and clearing the detail
    /// focus if it matched. Deleting an id absent from the current page
    /// still succeeds and leaves the page as is.
    pub async fn delete(&self, id: u64) -> Result<(), StoreError> {
        self.begin();

        match self.inner.api.delete::<C>(id).await {
            Ok(()) => {
                {
                    let mut state = self.inner.state.lock();
                    state.items.retain(|e| e.id() != id);
                    if state.selected.as_ref().is_some_and(|s| s.id() == id) {
                        state.selected = None;
                    }
                    state.status = Status::Ready;
                }
                self.publish(Mutation::Deleted, id);
                Ok(())
            }
            Err(e) => {
                let err = StoreError::from(e);
                self.fail(err.reason());
                Err(err)
            }
        }
    }

    /// Joins an entity, then pulls the authoritative post-mutation record.
    /// Membership counts and eligibility are server-derived, so they are
    /// never incremented locally.
    pub async fn join(&self, id: u64, body: C::Join) -> Result<(), StoreError> {
        self.begin();

        if let Err(e) = self.inner.api.join::<C>(id, &body).await {
            let err = StoreError::from(e);
            self.fail(err.reason());
            return Err(err);
        }

        self.publish(Mutation::Joined, id);
        self.fetch_one(id).await
    }

    /// Leaves an entity, then pulls the authoritative post-mutation record.
    pub async fn leave(&self, id: u64) -> Result<(), StoreError> {
        self.begin();

        if let Err(e) = self.inner.api.leave::<C>(id).await {
            let err = StoreError::from(e);
            self.fail(err.reason());
            return Err(err);
        }

        self.publish(Mutation::Left, id);
        self.fetch_one(id).await
    }
}

impl CollectionStore<Tournament> {
    /// Records a match result, then pulls the authoritative tournament
    /// record. Standings, eliminations, and match states are server-derived
    /// and never computed locally.
    pub async fn update_match_result(
        &self,
        tournament_id: u64,
        match_id: u64,
        result: MatchResult,
    ) -> Result<(), StoreError> {
        if let Err(errors) = result.validate() {
            let err = StoreError::invalid(errors);
            self.fail(err.reason());
            return Err(err);
        }
        self.begin();

        if let Err(e) = self
            .inner
            .api
            .update_match_result(tournament_id, match_id, &result)
            .await
        {
            let err = StoreError::from(e);
            self.fail(err.reason());
            return Err(err);
        }

        self.publish(Mutation::Updated, tournament_id);
        self.fetch_one(tournament_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aries_client::Session;
    use aries_types::{
        EntityFamily, JoinOrganization, OrganizationFilters, OrganizationPatch,
    };
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn org_json(id: u64, name: &str) -> serde_json::Value {
        json!({
            "id": id,
            "name": name,
            "tag": "OWL",
            "email": "contact@owls.gg",
            "country": "DE",
            "organization_type": "gaming_community",
            "created_at": "2025-01-01T00:00:00Z",
            "updated_at": "2025-01-02T00:00:00Z"
        })
    }

    fn page_json(results: Vec<serde_json::Value>, count: u64, page: u32, total: u32) -> serde_json::Value {
        json!({
            "results": results,
            "count": count,
            "page": page,
            "total_pages": total
        })
    }

    fn store(server: &MockServer) -> OrganizationStore {
        CollectionStore::new(ApiClient::new(server.uri(), Session::new()))
    }

    async fn seed_list(server: &MockServer, store: &OrganizationStore) {
        Mock::given(method("GET"))
            .and(path("/organizations/"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
                vec![org_json(7, "Night Owls"), org_json(8, "Daybreak")],
                2,
                1,
                1,
            )))
            .mount(server)
            .await;
        store
            .fetch_list(OrganizationFilters::default(), 1)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_fetch_list_commits_items_pagination_and_filters() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/organizations/"))
            .and(query_param("search", "owl"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
                vec![org_json(7, "Night Owls"), org_json(8, "Owl Camp")],
                5,
                1,
                3,
            )))
            .mount(&server)
            .await;

        let store = store(&server);
        let filters = OrganizationFilters {
            search: Some("owl".into()),
            ..Default::default()
        };
        store.fetch_list(filters.clone(), 1).await.unwrap();

        let state = store.snapshot();
        assert_eq!(state.items.len(), 2);
        assert_eq!(state.items[0].id, 7);
        assert_eq!(state.pagination.page, 1);
        assert_eq!(state.pagination.total_pages, 3);
        assert_eq!(state.pagination.total_count, 5);
        assert_eq!(state.filters, filters);
        assert!(state.status.is_ready());
    }

    #[tokio::test]
    async fn test_failed_fetch_leaves_window_untouched() {
        let server = MockServer::start().await;
        let store = store(&server);
        seed_list(&server, &store).await;

        Mock::given(method("GET"))
            .and(path("/organizations/"))
            .and(query_param("page", "2"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!({"message": "storage offline"})),
            )
            .mount(&server)
            .await;

        let before = store.snapshot();
        let err = store
            .fetch_list(OrganizationFilters::default(), 2)
            .await
            .unwrap_err();

        let after = store.snapshot();
        assert_eq!(err.reason(), "storage offline");
        assert_eq!(after.items, before.items);
        assert_eq!(after.pagination, before.pagination);
        assert_eq!(after.filters, before.filters);
        assert_eq!(after.status.error(), Some("storage offline"));
    }

    #[tokio::test]
    async fn test_create_prepends_canonical_entity() {
        let server = MockServer::start().await;
        let bus = StoreEvents::new();
        let mut events = bus.subscribe();
        let store: OrganizationStore =
            CollectionStore::with_events(ApiClient::new(server.uri(), Session::new()), bus);
        seed_list(&server, &store).await;

        Mock::given(method("POST"))
            .and(path("/organizations/"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "success": true,
                "data": org_json(11, "Fresh Org")
            })))
            .mount(&server)
            .await;

        let payload = serde_json::from_value(json!({
            "name": "Fresh Org",
            "tag": "FRS",
            "email": "fresh@example.com",
            "description": "",
            "country": "DE",
            "organization_type": "gaming_community"
        }))
        .unwrap();
        let created = store.create(payload).await.unwrap();

        let state = store.snapshot();
        assert_eq!(created.id, 11);
        assert_eq!(state.items.len(), 3);
        assert_eq!(state.items[0].id, 11);
        assert_eq!(state.selected.as_ref().map(|o| o.id), Some(11));
        assert!(state.status.is_ready());

        let event = events.try_recv().unwrap();
        assert_eq!(event.family, EntityFamily::Organizations);
        assert_eq!(event.id, 11);
        assert_eq!(event.kind, Mutation::Created);
    }

    #[tokio::test]
    async fn test_invalid_payload_rejected_before_network() {
        let server = MockServer::start().await;
        let store = store(&server);
        seed_list(&server, &store).await;

        let payload = serde_json::from_value(json!({
            "name": "Broken",
            "tag": "BRK",
            "email": "not-an-email",
            "description": "",
            "country": "DE",
            "organization_type": "gaming_community"
        }))
        .unwrap();
        let err = store.create(payload).await.unwrap_err();

        let state = store.snapshot();
        assert!(matches!(err, StoreError::Invalid(_)));
        assert_eq!(state.items.len(), 2);
        assert!(state.status.error().is_some());
    }

    #[tokio::test]
    async fn test_update_replaces_list_element_and_selected() {
        let server = MockServer::start().await;
        let store = store(&server);
        seed_list(&server, &store).await;
        let current = store.snapshot().items[0].clone();
        store.set_selected(Some(current));

        Mock::given(method("PATCH"))
            .and(path("/organizations/7/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": org_json(7, "Renamed Owls")
            })))
            .mount(&server)
            .await;

        let patch = OrganizationPatch {
            name: Some("Renamed Owls".into()),
            ..Default::default()
        };
        store.update(7, patch).await.unwrap();

        let state = store.snapshot();
        assert_eq!(state.item(7).unwrap().name, "Renamed Owls");
        assert_eq!(state.items[1].name, "Daybreak");
        assert_eq!(
            state.selected.as_ref().map(|o| o.name.as_str()),
            Some("Renamed Owls")
        );
    }

    #[tokio::test]
    async fn test_failed_mutation_changes_nothing_but_status() {
        let server = MockServer::start().await;
        let store = store(&server);
        seed_list(&server, &store).await;
        let before = store.snapshot();

        Mock::given(method("PATCH"))
            .and(path("/organizations/7/"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({"message": "tag too long"})),
            )
            .mount(&server)
            .await;

        let err = store
            .update(7, OrganizationPatch::default())
            .await
            .unwrap_err();

        let after = store.snapshot();
        assert_eq!(err.reason(), "tag too long");
        assert_eq!(after.items, before.items);
        assert_eq!(after.selected, before.selected);
        assert_eq!(after.status.error(), Some("tag too long"));
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_one_and_clears_selected() {
        let server = MockServer::start().await;
        let store = store(&server);
        seed_list(&server, &store).await;
        let current = store.snapshot().items[0].clone();
        store.set_selected(Some(current));

        Mock::given(method("DELETE"))
            .and(path("/organizations/7/"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        store.delete(7).await.unwrap();

        let state = store.snapshot();
        assert_eq!(state.items.len(), 1);
        assert!(state.item(7).is_none());
        assert!(state.selected.is_none());
    }

    #[tokio::test]
    async fn test_delete_of_absent_id_leaves_page_as_is() {
        let server = MockServer::start().await;
        let store = store(&server);
        seed_list(&server, &store).await;

        Mock::given(method("DELETE"))
            .and(path("/organizations/99/"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        store.delete(99).await.unwrap();

        let state = store.snapshot();
        assert_eq!(state.items.len(), 2);
        assert!(state.status.is_ready());
    }

    #[tokio::test]
    async fn test_join_refreshes_from_server_instead_of_counting_locally() {
        let server = MockServer::start().await;
        let store = store(&server);
        seed_list(&server, &store).await;

        Mock::given(method("POST"))
            .and(path("/organizations/7/join/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .mount(&server)
            .await;

        let mut refreshed = org_json(7, "Night Owls");
        refreshed["members"] = json!([{
            "id": 31,
            "organization": 7,
            "user": {"id": 1, "username": "alice", "email": "alice@example.com"},
            "role": "recruit"
        }]);
        refreshed["updated_at"] = json!("2025-01-03T00:00:00Z");
        Mock::given(method("GET"))
            .and(path("/organizations/7/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": refreshed
            })))
            .mount(&server)
            .await;

        store
            .join(7, JoinOrganization { message: None })
            .await
            .unwrap();

        let state = store.snapshot();
        let selected = state.selected.as_ref().unwrap();
        assert_eq!(selected.members.len(), 1);
        assert_eq!(selected.updated_at, "2025-01-03T00:00:00Z");
        // The list copy reflects the same authoritative record.
        assert_eq!(state.item(7).unwrap(), selected);
        assert!(state.status.is_ready());
    }

    #[tokio::test]
    async fn test_join_rejection_leaves_cache_untouched() {
        let server = MockServer::start().await;
        let store = store(&server);
        seed_list(&server, &store).await;
        let before = store.snapshot();

        Mock::given(method("POST"))
            .and(path("/organizations/7/join/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": false,
                "message": "applications closed"
            })))
            .mount(&server)
            .await;

        let err = store
            .join(7, JoinOrganization { message: None })
            .await
            .unwrap_err();

        let after = store.snapshot();
        assert_eq!(err.reason(), "applications closed");
        assert_eq!(after.items, before.items);
        assert_eq!(after.selected, before.selected);
    }

    #[tokio::test]
    async fn test_leave_refreshes_from_server_instead_of_counting_locally() {
        let server = MockServer::start().await;
        let store = store(&server);
        seed_list(&server, &store).await;

        Mock::given(method("POST"))
            .and(path("/organizations/7/leave/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .mount(&server)
            .await;

        let mut refreshed = org_json(7, "Night Owls");
        refreshed["updated_at"] = json!("2025-01-04T00:00:00Z");
        Mock::given(method("GET"))
            .and(path("/organizations/7/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": refreshed
            })))
            .mount(&server)
            .await;

        store.leave(7).await.unwrap();

        let state = store.snapshot();
        let selected = state.selected.as_ref().unwrap();
        assert!(selected.members.is_empty());
        assert_eq!(selected.updated_at, "2025-01-04T00:00:00Z");
        assert_eq!(state.item(7).unwrap(), selected);
        assert!(state.status.is_ready());
    }

    #[tokio::test]
    async fn test_leave_rejection_leaves_cache_untouched() {
        let server = MockServer::start().await;
        let store = store(&server);
        seed_list(&server, &store).await;
        let before = store.snapshot();

        Mock::given(method("POST"))
            .and(path("/organizations/7/leave/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": false,
                "message": "owners cannot leave"
            })))
            .mount(&server)
            .await;

        let err = store.leave(7).await.unwrap_err();

        let after = store.snapshot();
        assert_eq!(err.reason(), "owners cannot leave");
        assert_eq!(after.items, before.items);
        assert_eq!(after.selected, before.selected);
        assert_eq!(after.status.error(), Some("owners cannot leave"));
    }

    fn tournament_json(id: u64, name: &str) -> serde_json::Value {
        json!({
            "id": id,
            "name": name,
            "created_by": {"id": 1, "username": "ref", "email": "ref@example.com"},
            "organizer": org_json(2, "Host"),
            "tournament_type": "individual",
            "tour_format": "cup",
            "status": "ongoing",
            "start_date": "2025-03-01",
            "created_at": "2025-01-01T00:00:00Z",
            "updated_at": "2025-01-02T00:00:00Z"
        })
    }

    #[tokio::test]
    async fn test_match_result_triggers_authoritative_refresh() {
        let server = MockServer::start().await;

        Mock::given(method("PATCH"))
            .and(path("/tournaments/9/matches/3/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .mount(&server)
            .await;

        let mut refreshed = tournament_json(9, "Spring Cup");
        refreshed["participants"] = json!([
            {"id": 21, "tournament": 9, "status": "active"},
            {"id": 22, "tournament": 9, "status": "eliminated"}
        ]);
        Mock::given(method("GET"))
            .and(path("/tournaments/9/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": refreshed
            })))
            .mount(&server)
            .await;

        let store: TournamentStore =
            CollectionStore::new(ApiClient::new(server.uri(), Session::new()));
        store
            .update_match_result(
                9,
                3,
                MatchResult {
                    home_score: 2,
                    away_score: 1,
                },
            )
            .await
            .unwrap();

        let state = store.snapshot();
        let selected = state.selected.as_ref().unwrap();
        // Eliminations come from the refreshed record, not local counting.
        assert_eq!(selected.participants.len(), 2);
        assert_eq!(selected.active_participants(), 1);
        assert!(state.status.is_ready());
    }

    #[tokio::test]
    async fn test_match_result_rejection_skips_refresh() {
        let server = MockServer::start().await;

        Mock::given(method("PATCH"))
            .and(path("/tournaments/9/matches/3/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": false,
                "message": "match already completed"
            })))
            .mount(&server)
            .await;

        let store: TournamentStore =
            CollectionStore::new(ApiClient::new(server.uri(), Session::new()));
        let err = store
            .update_match_result(
                9,
                3,
                MatchResult {
                    home_score: 2,
                    away_score: 1,
                },
            )
            .await
            .unwrap_err();

        let state = store.snapshot();
        assert_eq!(err.reason(), "match already completed");
        assert!(state.selected.is_none());
        assert_eq!(state.status.error(), Some("match already completed"));
        // No GET went out after the rejection.
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_superseded_fetch_response_is_discarded() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/organizations/"))
            .and(query_param("page", "1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(Duration::from_millis(200))
                    .set_body_json(page_json(vec![org_json(1, "Stale")], 1, 1, 1)),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/organizations/"))
            .and(query_param("page", "2"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(page_json(vec![org_json(2, "Current")], 3, 2, 2)),
            )
            .mount(&server)
            .await;

        let store = store(&server);
        let slow = {
            let store = store.clone();
            tokio::spawn(async move { store.fetch_list(OrganizationFilters::default(), 1).await })
        };
        // Give the first request time to go out before superseding it.
        tokio::time::sleep(Duration::from_millis(50)).await;
        store
            .fetch_list(OrganizationFilters::default(), 2)
            .await
            .unwrap();
        slow.await.unwrap().unwrap();

        let state = store.snapshot();
        assert_eq!(state.pagination.page, 2);
        assert_eq!(state.items[0].id, 2);
        assert_eq!(state.items[0].name, "Current");
        assert!(state.status.is_ready());
    }

    #[tokio::test]
    async fn test_set_filters_does_not_fetch() {
        let server = MockServer::start().await;
        let store = store(&server);

        let filters = OrganizationFilters {
            is_verified: Some(true),
            ..Default::default()
        };
        store.set_filters(filters.clone());

        let state = store.snapshot();
        assert_eq!(state.filters, filters);
        assert_eq!(state.status, Status::Idle);
        assert!(state.items.is_empty());
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clear_error_returns_to_idle() {
        let server = MockServer::start().await;
        let store = store(&server);

        Mock::given(method("GET"))
            .and(path("/organizations/"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let _ = store.fetch_list(OrganizationFilters::default(), 1).await;
        assert!(store.snapshot().status.error().is_some());

        store.clear_error();
        assert_eq!(store.snapshot().status, Status::Idle);
    }
}
