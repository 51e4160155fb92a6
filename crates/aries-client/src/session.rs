//! Process-wide session context.
//!
//! The bearer token and the authenticated-user snapshot live here, behind
//! an explicit context object passed to the gateway's constructor. The
//! gateway is the only writer (login, register, logout, expiry detection);
//! stores and views are readers.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::broadcast;

use aries_types::{Profile, User};

use crate::config::Config;

/// Minimal snapshot of the authenticated user, persisted across reloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    pub user: User,
    pub profile: Profile,
}

/// Session lifecycle transitions observable by the rest of the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// Credentials accepted; a token is now held.
    LoggedIn,
    /// User-initiated sign-out; the token is gone.
    LoggedOut,
    /// The server rejected the token. It has been cleared and the user must
    /// re-authenticate.
    Expired,
}

struct SessionInner {
    token: RwLock<Option<String>>,
    account: RwLock<Option<AccountSnapshot>>,
    events: broadcast::Sender<SessionEvent>,
    /// Where the session persists itself, `None` for in-memory sessions.
    store_path: Option<PathBuf>,
}

/// Shared handle to the session context. Cheap to clone.
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

impl Session {
    /// Creates an empty in-memory session that never touches disk.
    #[must_use]
    pub fn new() -> Self {
        Self::build(None, None, None)
    }

    /// Restores a session from a loaded [`Config`], persisting future
    /// changes to the default config location.
    #[must_use]
    pub fn restore(config: &Config) -> Self {
        Self::build(
            config.token.clone(),
            config.account.clone(),
            Config::default_path(),
        )
    }

    /// Restores a session that persists to an explicit path.
    #[must_use]
    pub fn restore_from(config: &Config, path: PathBuf) -> Self {
        Self::build(config.token.clone(), config.account.clone(), Some(path))
    }

    fn build(
        token: Option<String>,
        account: Option<AccountSnapshot>,
        store_path: Option<PathBuf>,
    ) -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            inner: Arc::new(SessionInner {
                token: RwLock::new(token),
                account: RwLock::new(account),
                events,
                store_path,
            }),
        }
    }

    /// The current bearer token, if one is held.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.inner.token.read().clone()
    }

    /// The authenticated-user snapshot, if logged in.
    #[must_use]
    pub fn account(&self) -> Option<AccountSnapshot> {
        self.inner.account.read().clone()
    }

    /// Whether a token is currently held.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner.token.read().is_some()
    }

    /// Subscribe to session lifecycle events.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.inner.events.subscribe()
    }

    /// Begin an authenticated session. Gateway-only.
    pub(crate) fn begin(&self, token: String, account: AccountSnapshot) {
        tracing::info!(user = %account.user.username, "Session started");
        *self.inner.token.write() = Some(token);
        *self.inner.account.write() = Some(account);
        self.persist();
        let _ = self.inner.events.send(SessionEvent::LoggedIn);
    }

    /// Refresh the stored account snapshot without touching the token.
    pub(crate) fn refresh_account(&self, account: AccountSnapshot) {
        *self.inner.account.write() = Some(account);
        self.persist();
    }

    /// End the session on user sign-out. Gateway-only.
    pub(crate) fn end(&self) {
        tracing::info!("Session ended");
        *self.inner.token.write() = None;
        *self.inner.account.write() = None;
        self.persist();
        let _ = self.inner.events.send(SessionEvent::LoggedOut);
    }

    /// Tear the session down after the server rejected the token.
    /// Subsequent requests carry no token until re-authentication.
    pub(crate) fn expire(&self) {
        let had_token = self.inner.token.write().take().is_some();
        *self.inner.account.write() = None;
        if had_token {
            tracing::info!("Session expired, token cleared");
            self.persist();
            let _ = self.inner.events.send(SessionEvent::Expired);
        }
    }

    /// Write token and snapshot through to the config file, preserving
    /// whatever base URL is already stored there.
    fn persist(&self) {
        let Some(ref path) = self.inner.store_path else {
            return;
        };
        let mut config = Config::load_from(path);
        config.token = self.token();
        config.account = self.account();
        if let Err(e) = config.save_to(path) {
            tracing::warn!(error = %e, "Failed to persist session");
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
