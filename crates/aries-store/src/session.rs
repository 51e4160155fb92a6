//! Authentication store.
//!
//! A parallel store with the same shape as the collection stores,
//! mirroring who is signed in. Token handling itself lives in the
//! gateway's session context; this store only tracks the snapshot the
//! view layer renders.

use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use validator::Validate;

use aries_client::{ApiClient, SessionEvent};
use aries_types::{LoginRequest, Profile, ProfilePatch, RegisterRequest, User};

use crate::error::StoreError;
use crate::state::Status;

/// Authentication state mirrored for rendering.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub user: Option<User>,
    pub profile: Option<Profile>,
    pub authenticated: bool,
    pub status: Status,
}

struct Inner {
    api: ApiClient,
    state: Mutex<SessionState>,
}

/// Store tracking the authenticated user. Cheap to clone.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Inner>,
}

impl SessionStore {
    /// Creates the store, seeding state from the session context restored
    /// at startup (persisted token + user snapshot).
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        let state = match api.session().account() {
            Some(account) if api.session().is_authenticated() => SessionState {
                user: Some(account.user),
                profile: Some(account.profile),
                authenticated: true,
                status: Status::Idle,
            },
            _ => SessionState::default(),
        };
        Self {
            inner: Arc::new(Inner {
                api,
                state: Mutex::new(state),
            }),
        }
    }

    /// Returns a copy of the current state for rendering.
    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.inner.state.lock().clone()
    }

    /// Drops a `Failed` status back to `Idle`.
    pub fn clear_error(&self) {
        let mut state = self.inner.state.lock();
        if matches!(state.status, Status::Failed(_)) {
            state.status = Status::Idle;
        }
    }

    /// Watches the gateway's session events and signs the store out when
    /// the server expires the token. Runs until the session is dropped.
    pub fn watch(&self) -> JoinHandle<()> {
        let store = self.clone();
        let mut events = store.inner.api.session().subscribe();
        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(SessionEvent::Expired) => {
                        tracing::info!("Session expired, signing store out");
                        store.reset();
                    }
                    Ok(_) => {}
                    Err(RecvError::Lagged(_)) => continue,
                    Err(RecvError::Closed) => break,
                }
            }
        })
    }

    fn begin(&self) {
        self.inner.state.lock().status = Status::Loading;
    }

    fn fail(&self, reason: String) {
        self.inner.state.lock().status = Status::Failed(reason);
    }

    fn reset(&self) {
        *self.inner.state.lock() = SessionState::default();
    }

    /// Signs in. The gateway stores the token; this store keeps the user.
    pub async fn login(&self, credentials: LoginRequest) -> Result<(), StoreError> {
        if let Err(errors) = credentials.validate() {
            let err = StoreError::invalid(errors);
            self.fail(err.reason());
            return Err(err);
        }
        self.begin();

        match self.inner.api.login(&credentials).await {
            Ok(data) => {
                let mut state = self.inner.state.lock();
                state.user = Some(data.user);
                state.profile = Some(data.profile);
                state.authenticated = true;
                state.status = Status::Ready;
                Ok(())
            }
            Err(e) => {
                let err = StoreError::from(e);
                self.fail(err.reason());
                Err(err)
            }
        }
    }

    /// Registers a new account and signs in.
    pub async fn register(&self, registration: RegisterRequest) -> Result<(), StoreError> {
        if let Err(errors) = registration.validate() {
            let err = StoreError::invalid(errors);
            self.fail(err.reason());
            return Err(err);
        }
        self.begin();

        match self.inner.api.register(&registration).await {
            Ok(data) => {
                let mut state = self.inner.state.lock();
                state.user = Some(data.user);
                state.profile = Some(data.profile);
                state.authenticated = true;
                state.status = Status::Ready;
                Ok(())
            }
            Err(e) => {
                let err = StoreError::from(e);
                self.fail(err.reason());
                Err(err)
            }
        }
    }

    /// Signs out. The local session is cleared whatever the server says;
    /// a failed revocation only gets logged.
    pub async fn logout(&self) {
        self.begin();
        if let Err(e) = self.inner.api.logout().await {
            tracing::warn!(error = %e, "Logout request failed, clearing local session anyway");
        }
        self.reset();
    }

    /// Re-fetches the authenticated user, reconciling with the server.
    pub async fn refresh_current_user(&self) -> Result<(), StoreError> {
        self.begin();

        match self.inner.api.current_user().await {
            Ok(data) => {
                let mut state = self.inner.state.lock();
                state.user = Some(data.user);
                state.profile = Some(data.profile);
                state.authenticated = true;
                state.status = Status::Ready;
                Ok(())
            }
            Err(e) => {
                let err = StoreError::from(e);
                {
                    let mut state = self.inner.state.lock();
                    state.authenticated = false;
                    state.status = Status::Failed(err.reason());
                }
                Err(err)
            }
        }
    }

    /// Updates the signed-in user's profile with the server's canonical
    /// record. A signed-out store ignores the call.
    pub async fn update_profile(&self, patch: ProfilePatch) -> Result<(), StoreError> {
        let Some(user_id) = self.inner.state.lock().user.as_ref().map(|u| u.id) else {
            return Ok(());
        };
        if let Err(errors) = patch.validate() {
            let err = StoreError::invalid(errors);
            self.fail(err.reason());
            return Err(err);
        }
        self.begin();

        match self.inner.api.update_profile(user_id, &patch).await {
            Ok(profile) => {
                let mut state = self.inner.state.lock();
                state.profile = Some(profile);
                state.status = Status::Ready;
                Ok(())
            }
            Err(e) => {
                let err = StoreError::from(e);
                self.fail(err.reason());
                Err(err)
            }
        }
    }
}
