//! Authenticated request client.
//!
//! [`ApiClient`] owns the access/refresh token pair and is the only thing in
//! the crate that talks to the backend. Every call goes through
//! [`ApiClient::request`], which attaches the bearer token, and on a 401
//! performs one silent refresh followed by one resend of the same request.
//! When a refresh is impossible the tokens are purged, [`AuthState::Expired`]
//! is published, and the call fails with [`ApiError::SessionExpired`].

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::{watch, Mutex, RwLock};
use tracing::{debug, info, warn};
use url::Url;

use super::tokens::TokenPair;
use crate::config::ClientConfig;
use crate::error::{failure_message, ApiError, ApiResult};
use crate::traits::{set_header, Headers, HttpClient, HttpRequest, Method, Response, TokenStore};

/// Path of the token refresh endpoint.
pub const REFRESH_PATH: &str = "/refresh/";

pub(crate) const CONTENT_TYPE: &str = "Content-Type";
pub(crate) const JSON_CONTENT_TYPE: &str = "application/json";
const AUTHORIZATION: &str = "Authorization";

/// Authentication state as seen by front ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    /// No tokens held.
    SignedOut,
    /// An access token is held.
    SignedIn,
    /// The session could not be renewed; the user must sign in again.
    Expired,
}

/// Caller-side description of a request.
///
/// Defaults to a `GET` with no extra headers and no body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: Headers,
    pub body: Option<serde_json::Value>,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    /// A `POST` carrying `body` as JSON.
    pub fn post(body: serde_json::Value) -> Self {
        Self::default().with_method(Method::Post).with_json(body)
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        set_header(&mut self.headers, name, value);
        self
    }

    pub fn with_json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }
}

#[derive(Deserialize)]
struct RefreshResponse {
    access: String,
    #[serde(default)]
    refresh: Option<String>,
}

/// Where a request goes, and whether the bearer token may travel with it.
#[derive(Debug, Clone, PartialEq)]
struct Target {
    url: String,
    same_origin: bool,
}

/// Progress of a single logical call through the refresh-and-retry cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attempt {
    Initial,
    Retrying,
}

/// The authenticated request client.
///
/// Construct one per backend and share it (`Arc<ApiClient>`) with every
/// caller; it is the single source of truth for the current credential.
pub struct ApiClient {
    base: Url,
    http: Arc<dyn HttpClient>,
    store: Arc<dyn TokenStore>,
    tokens: RwLock<TokenPair>,
    /// Serializes refreshes so overlapping 401s trigger one refresh call.
    refresh_gate: Mutex<()>,
    state: watch::Sender<AuthState>,
}

impl ApiClient {
    /// Build a client for the configured base origin. Starts signed out;
    /// call [`restore`](Self::restore) to pick up persisted tokens.
    pub fn new(
        config: &ClientConfig,
        http: Arc<dyn HttpClient>,
        store: Arc<dyn TokenStore>,
    ) -> ApiResult<Self> {
        Ok(Self {
            base: config.base_origin()?,
            http,
            store,
            tokens: RwLock::new(TokenPair::default()),
            refresh_gate: Mutex::new(()),
            state: watch::channel(AuthState::SignedOut).0,
        })
    }

    /// Shorthand for [`new`](Self::new) with only a base URL.
    pub fn with_base_url(
        base_url: &str,
        http: Arc<dyn HttpClient>,
        store: Arc<dyn TokenStore>,
    ) -> ApiResult<Self> {
        Self::new(&ClientConfig::new().with_base_url(base_url), http, store)
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Load the persisted pair into memory.
    ///
    /// Returns whether an access token is now held. A storage failure is
    /// logged and leaves the client signed out.
    pub async fn restore(&self) -> bool {
        match self.store.load().await {
            Ok(Some(tokens)) => {
                let signed_in = tokens.has_access_token();
                *self.tokens.write().await = tokens;
                if signed_in {
                    self.publish(AuthState::SignedIn);
                }
                debug!(signed_in, "Restored persisted tokens");
                signed_in
            }
            Ok(None) => false,
            Err(e) => {
                warn!("Could not load stored tokens: {}", e);
                false
            }
        }
    }

    /// Snapshot of the held pair.
    pub async fn tokens(&self) -> TokenPair {
        self.tokens.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.tokens.read().await.has_access_token()
    }

    pub fn auth_state(&self) -> AuthState {
        *self.state.borrow()
    }

    /// Watch authentication state changes. `Expired` is the signal to send
    /// the user back to the sign-in entry point.
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    /// Replace the held pair and persist it. No network activity.
    pub async fn set_tokens(&self, access: impl Into<String>, refresh: impl Into<String>) {
        let snapshot = {
            let mut tokens = self.tokens.write().await;
            *tokens = TokenPair::new(access, refresh);
            tokens.clone()
        };
        self.persist(&snapshot).await;
        self.publish(AuthState::SignedIn);
    }

    /// Drop both tokens from memory and storage. No network activity.
    pub async fn clear_tokens(&self) {
        self.wipe().await;
        self.publish(AuthState::SignedOut);
    }

    /// Issue an authenticated request and parse the JSON response body.
    ///
    /// `path` is either relative to the base origin or an absolute URL. The
    /// bearer token is only attached for the base origin, and only 401s
    /// from the base origin trigger a refresh.
    pub async fn request<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> ApiResult<T> {
        let target = self.resolve(path)?;
        let mut attempt = Attempt::Initial;

        loop {
            let access_token = self.tokens.read().await.access_token.clone();
            let request = build_request(&target, &options, access_token.as_deref());
            debug!(method = %request.method, url = %request.url, ?attempt, "Sending request");

            let response = self.http.execute(&request).await?;

            if !(response.is_unauthorized() && target.same_origin) {
                return parse_response(response);
            }

            attempt = match attempt {
                Attempt::Initial => {
                    if !self.refresh_after_unauthorized(access_token.as_deref()).await {
                        self.expire_session().await;
                        return Err(ApiError::SessionExpired);
                    }
                    Attempt::Retrying
                }
                Attempt::Retrying => {
                    warn!(url = %request.url, "Still unauthorized after token refresh");
                    return parse_response(response);
                }
            };
        }
    }

    /// Exchange the refresh token for a new access token.
    ///
    /// Never fails loudly: any problem is logged and reported as `false`.
    /// The refresh token is only replaced when the server sends a new one.
    pub async fn refresh(&self) -> bool {
        let Some(refresh_token) = self.tokens.read().await.refresh_token.clone() else {
            debug!("No refresh token held");
            return false;
        };

        let body = serde_json::json!({ "refresh": refresh_token }).to_string();
        let request = self.json_post(REFRESH_PATH, body);

        let response = match self.http.execute(&request).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Token refresh failed: {}", e);
                return false;
            }
        };

        if !response.is_success() {
            warn!(status = response.status, "Token refresh rejected");
            return false;
        }

        let renewed: RefreshResponse = match response.json() {
            Ok(renewed) => renewed,
            Err(e) => {
                warn!("Unreadable token refresh response: {}", e);
                return false;
            }
        };

        let snapshot = {
            let mut tokens = self.tokens.write().await;
            if tokens.refresh_token.as_deref() != Some(refresh_token.as_str()) {
                // Signed out or replaced by a login while the refresh was in flight
                return tokens.has_access_token();
            }
            tokens.access_token = Some(renewed.access);
            if let Some(rotated) = renewed.refresh {
                tokens.refresh_token = Some(rotated);
            }
            tokens.clone()
        };

        self.persist(&snapshot).await;
        info!("Access token refreshed");
        true
    }

    /// Refresh after a 401, unless another caller already did while we
    /// waited for the gate.
    async fn refresh_after_unauthorized(&self, stale_token: Option<&str>) -> bool {
        let _gate = self.refresh_gate.lock().await;

        let current = self.tokens.read().await.access_token.clone();
        if current.is_some() && current.as_deref() != stale_token {
            debug!("Access token was renewed by a concurrent request");
            return true;
        }

        self.refresh().await
    }

    async fn expire_session(&self) {
        warn!("Session expired; clearing stored tokens");
        self.wipe().await;
        self.publish(AuthState::Expired);
    }

    async fn wipe(&self) {
        *self.tokens.write().await = TokenPair::default();
        if let Err(e) = self.store.clear().await {
            warn!("Could not clear stored tokens: {}", e);
        }
    }

    async fn persist(&self, tokens: &TokenPair) {
        if let Err(e) = self.store.save(tokens).await {
            warn!("Could not persist tokens: {}", e);
        }
    }

    fn publish(&self, state: AuthState) {
        self.state.send_if_modified(|current| {
            if *current == state {
                return false;
            }
            info!(from = ?*current, to = ?state, "Auth state changed");
            *current = state;
            true
        });
    }

    /// Absolute URL for a path on the base origin.
    pub(crate) fn endpoint(&self, path: &str) -> String {
        let base = self.base.as_str().trim_end_matches('/');
        if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        }
    }

    /// Unauthenticated JSON `POST` to the base origin.
    pub(crate) fn json_post(&self, path: &str, body: String) -> HttpRequest {
        HttpRequest::new(Method::Post, self.endpoint(path))
            .with_header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .with_body(body)
    }

    pub(crate) fn http(&self) -> &dyn HttpClient {
        self.http.as_ref()
    }

    fn resolve(&self, path: &str) -> ApiResult<Target> {
        match Url::parse(path) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(Target {
                same_origin: url.origin() == self.base.origin(),
                url: url.into(),
            }),
            Ok(_) => Err(ApiError::InvalidUrl(path.to_string())),
            Err(_) => Ok(Target {
                url: self.endpoint(path),
                same_origin: true,
            }),
        }
    }
}

fn build_request(target: &Target, options: &RequestOptions, access_token: Option<&str>) -> HttpRequest {
    let mut request = HttpRequest::new(options.method, target.url.clone())
        .with_header(CONTENT_TYPE, JSON_CONTENT_TYPE);

    for (name, value) in &options.headers {
        set_header(&mut request.headers, name, value.clone());
    }

    // Applied last so a caller-supplied Authorization never wins
    if let (true, Some(token)) = (target.same_origin, access_token) {
        set_header(&mut request.headers, AUTHORIZATION, format!("Bearer {}", token));
    }

    if let Some(body) = &options.body {
        request.body = Some(body.to_string());
    }

    request
}

fn parse_response<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    if !response.is_success() {
        let message = failure_message(response.status, &response.body);
        debug!(status = response.status, %message, "Request failed");
        return Err(ApiError::Status {
            status: response.status,
            message,
        });
    }

    if response.body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::deserialize(serde_json::Value::Null)?);
    }

    Ok(response.json()?)
}
