//! HTTP client for the Aries platform API.

use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;

use aries_types::{
    Ack, AuthData, Collection, Envelope, LoginRequest, MatchResult, Page, Profile, ProfilePatch,
    RegisterRequest,
};

use crate::error::{ApiError, ApiResult};
use crate::session::{AccountSnapshot, Session};

/// HTTP client for the Aries platform API.
///
/// Every outbound request goes through this client: it attaches the current
/// bearer token from the [`Session`], normalizes failures into [`ApiError`],
/// and tears the session down when the server answers 401. The client is
/// cheaply cloneable and can be shared across stores.
///
/// # Examples
///
/// ```rust,ignore
/// use aries_client::{ApiClient, Config, Session};
/// use aries_types::{Tournament, TournamentFilters};
///
/// let config = Config::load();
/// let session = Session::restore(&config);
/// let api = ApiClient::new(config.base_url, session);
///
/// let page = api.list::<Tournament>(&TournamentFilters::default(), 1).await?;
/// ```
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
    session: Session,
}

impl ApiClient {
    /// Creates a new client against `base_url`, reading auth state from
    /// `session`.
    pub fn new(base_url: impl Into<String>, session: Session) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .build()
                .expect("failed to create HTTP client"),
            session,
        }
    }

    /// Returns the configured base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The session context this client reads from and writes to.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Shapes a request, attaching the bearer token when one is held.
    /// A missing token is not an error here; rejecting unauthenticated
    /// calls is the server's decision.
    fn request(&self, method: Method, url: String) -> reqwest::RequestBuilder {
        let builder = self.http.request(method, url);
        match self.session.token() {
            Some(token) => builder.header("Authorization", format!("Bearer {token}")),
            None => builder,
        }
    }

    /// Normalizes a response: 2xx passes through, 401 tears the session
    /// down, everything else becomes a [`ApiError::Server`] with whatever
    /// message the body carried.
    async fn handle(&self, res: reqwest::Response) -> ApiResult<reqwest::Response> {
        let status = res.status();
        if status.is_success() {
            return Ok(res);
        }

        let message = Self::error_message(res).await;
        if status == StatusCode::UNAUTHORIZED {
            self.session.expire();
        }
        Err(ApiError::Server {
            status: status.as_u16(),
            message,
        })
    }

    /// Mines an error body for a `message` field, falling back to raw text.
    async fn error_message(res: reqwest::Response) -> String {
        let text = res.text().await.unwrap_or_default();
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(&text) {
            if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
                return message.to_string();
            }
            if let Some(detail) = value.get("detail").and_then(|d| d.as_str()) {
                return detail.to_string();
            }
        }
        text.trim().to_string()
    }

    async fn decode<T: DeserializeOwned>(res: reqwest::Response) -> ApiResult<T> {
        res.json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    /// Unwraps a single-entity envelope, turning `success: false` into
    /// [`ApiError::Rejected`].
    async fn unwrap_envelope<T: DeserializeOwned>(res: reqwest::Response) -> ApiResult<T> {
        let envelope: Envelope<T> = Self::decode(res).await?;
        if envelope.success {
            envelope
                .data
                .ok_or_else(|| ApiError::InvalidResponse("envelope missing data".to_string()))
        } else {
            Err(ApiError::Rejected(Self::rejection_message(
                envelope.message,
                envelope.errors,
            )))
        }
    }

    async fn unwrap_ack(res: reqwest::Response) -> ApiResult<Ack> {
        let ack: Ack = Self::decode(res).await?;
        if ack.success {
            Ok(ack)
        } else {
            Err(ApiError::Rejected(Self::rejection_message(
                ack.message.clone(),
                Vec::new(),
            )))
        }
    }

    fn rejection_message(message: Option<String>, errors: Vec<String>) -> String {
        if let Some(message) = message {
            return message;
        }
        if !errors.is_empty() {
            return errors.join("; ");
        }
        "request rejected by server".to_string()
    }

    // ==================== Collection Endpoints ====================

    /// Fetches one page of a filtered entity list. Pages are 1-based.
    pub async fn list<C: Collection>(
        &self,
        filters: &C::Filters,
        page: u32,
    ) -> ApiResult<Page<C>> {
        let res = self
            .request(Method::GET, self.url(&format!("{}/", C::PATH)))
            .query(filters)
            .query(&[("page", page)])
            .send()
            .await?;

        let res = self.handle(res).await?;
        Self::decode(res).await
    }

    /// Fetches a single entity by id.
    pub async fn get<C: Collection>(&self, id: u64) -> ApiResult<C> {
        let res = self
            .request(Method::GET, self.url(&format!("{}/{}/", C::PATH, id)))
            .send()
            .await?;

        let res = self.handle(res).await?;
        Self::unwrap_envelope(res).await
    }

    /// Creates an entity and returns the server's canonical record.
    pub async fn create<C: Collection>(&self, payload: &C::Create) -> ApiResult<C> {
        let res = self
            .request(Method::POST, self.url(&format!("{}/", C::PATH)))
            .json(payload)
            .send()
            .await?;

        let res = self.handle(res).await?;
        Self::unwrap_envelope(res).await
    }

    /// Applies a partial update and returns the server's canonical record.
    pub async fn update<C: Collection>(&self, id: u64, patch: &C::Patch) -> ApiResult<C> {
        let res = self
            .request(Method::PATCH, self.url(&format!("{}/{}/", C::PATH, id)))
            .json(patch)
            .send()
            .await?;

        let res = self.handle(res).await?;
        Self::unwrap_envelope(res).await
    }

    /// Deletes an entity.
    pub async fn delete<C: Collection>(&self, id: u64) -> ApiResult<()> {
        let res = self
            .request(Method::DELETE, self.url(&format!("{}/{}/", C::PATH, id)))
            .send()
            .await?;

        self.handle(res).await?;
        Ok(())
    }

    /// Requests membership in an entity. The ack carries no entity payload;
    /// callers must re-fetch for post-mutation state.
    pub async fn join<C: Collection>(&self, id: u64, body: &C::Join) -> ApiResult<Ack> {
        let res = self
            .request(
                Method::POST,
                self.url(&format!("{}/{}/join/", C::PATH, id)),
            )
            .json(body)
            .send()
            .await?;

        let res = self.handle(res).await?;
        Self::unwrap_ack(res).await
    }

    /// Gives up membership in an entity.
    pub async fn leave<C: Collection>(&self, id: u64) -> ApiResult<Ack> {
        let res = self
            .request(
                Method::POST,
                self.url(&format!("{}/{}/leave/", C::PATH, id)),
            )
            .send()
            .await?;

        let res = self.handle(res).await?;
        Self::unwrap_ack(res).await
    }

    /// Records the result of a match inside a tournament. The ack carries
    /// no entity payload; standings and match states are server-derived, so
    /// callers must re-fetch the tournament.
    pub async fn update_match_result(
        &self,
        tournament_id: u64,
        match_id: u64,
        result: &MatchResult,
    ) -> ApiResult<Ack> {
        let res = self
            .request(
                Method::PATCH,
                self.url(&format!("tournaments/{tournament_id}/matches/{match_id}/")),
            )
            .json(result)
            .send()
            .await?;

        let res = self.handle(res).await?;
        Self::unwrap_ack(res).await
    }

    // ==================== Authentication Endpoints ====================

    /// Logs in and stores the returned token in the session.
    pub async fn login(&self, credentials: &LoginRequest) -> ApiResult<AuthData> {
        let res = self
            .request(Method::POST, self.url("auth/login/"))
            .json(credentials)
            .send()
            .await?;

        let res = self.handle(res).await?;
        let data: AuthData = Self::unwrap_envelope(res).await?;
        self.adopt(&data)?;
        Ok(data)
    }

    /// Registers a new account and stores the returned token in the session.
    pub async fn register(&self, registration: &RegisterRequest) -> ApiResult<AuthData> {
        let res = self
            .request(Method::POST, self.url("auth/register/"))
            .json(registration)
            .send()
            .await?;

        let res = self.handle(res).await?;
        let data: AuthData = Self::unwrap_envelope(res).await?;
        self.adopt(&data)?;
        Ok(data)
    }

    fn adopt(&self, data: &AuthData) -> ApiResult<()> {
        let token = data
            .token
            .clone()
            .ok_or_else(|| ApiError::InvalidResponse("auth response missing token".to_string()))?;
        self.session.begin(
            token,
            AccountSnapshot {
                user: data.user.clone(),
                profile: data.profile.clone(),
            },
        );
        Ok(())
    }

    /// Signs out. The local session is cleared whatever the server answers.
    pub async fn logout(&self) -> ApiResult<()> {
        let outcome: ApiResult<()> = async {
            let res = self
                .request(Method::POST, self.url("auth/logout/"))
                .send()
                .await?;
            self.handle(res).await?;
            Ok(())
        }
        .await;

        self.session.end();
        outcome
    }

    /// Fetches the authenticated user and refreshes the session snapshot.
    pub async fn current_user(&self) -> ApiResult<AuthData> {
        let res = self
            .request(Method::GET, self.url("auth/me/"))
            .send()
            .await?;

        let res = self.handle(res).await?;
        let data: AuthData = Self::unwrap_envelope(res).await?;
        self.session.refresh_account(AccountSnapshot {
            user: data.user.clone(),
            profile: data.profile.clone(),
        });
        Ok(data)
    }

    /// Updates a user profile and returns the server's canonical record.
    pub async fn update_profile(&self, user_id: u64, patch: &ProfilePatch) -> ApiResult<Profile> {
        let res = self
            .request(
                Method::PATCH,
                self.url(&format!("users/{user_id}/profile/")),
            )
            .json(patch)
            .send()
            .await?;

        let res = self.handle(res).await?;
        let profile: Profile = Self::unwrap_envelope(res).await?;

        // Keep the persisted snapshot in step with the canonical record.
        if let Some(mut account) = self.session.account() {
            if account.user.id == user_id {
                account.profile = profile.clone();
                self.session.refresh_account(account);
            }
        }
        Ok(profile)
    }
}
