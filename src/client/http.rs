use reqwest::{Method, RequestBuilder, Response, StatusCode, multipart::Form};
use serde::{Serialize, de::DeserializeOwned};
use std::sync::{Arc, RwLock};

/// SessionStore
///
/// The one durable piece of client-side state: the session token. An explicit,
/// dependency-injected object rather than a hidden global, preserving the
/// "single source of truth, single writer" invariant. Only the auth client
/// (on login/logout) and the 401 interceptor in [`ApiClient`] ever write here,
/// and the only mutations are "set on login" and "delete".
#[derive(Default)]
pub struct SessionStore {
    token: RwLock<Option<String>>,
}

impl SessionStore {
    /// Replaces the stored token. A token is never edited in place; a new
    /// login replaces it wholesale.
    pub fn set(&self, token: String) {
        *self.token.write().expect("session lock poisoned") = Some(token);
    }

    /// Deletes the stored token. Idempotent.
    pub fn clear(&self) {
        *self.token.write().expect("session lock poisoned") = None;
    }

    pub fn get(&self) -> Option<String> {
        self.token.read().expect("session lock poisoned").clone()
    }

    /// Synchronous, local-only presence check. Does NOT validate the token
    /// against the server: it can report true for an expired or tampered token
    /// until the next network call fails with 401 and forces logout. Every
    /// real API call re-validates server-side, so the gap closes itself.
    pub fn is_present(&self) -> bool {
        self.token.read().expect("session lock poisoned").is_some()
    }
}

/// ClientError
///
/// The client-side failure taxonomy. `AuthExpired` is the explicit, typed form
/// of the 401 teardown: by the time a caller sees it, the token is already
/// gone from the session store, and the top-level handler is expected to
/// route the user back to the login screen.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server rejected the session token. The token has been cleared.
    #[error("Session expired, please log in again")]
    AuthExpired,

    /// The server answered with a non-success status. Carries the
    /// user-facing message from the `{"message"}` error body.
    #[error("{message}")]
    Api { status: StatusCode, message: String },

    /// The request never produced a server answer (DNS, connect, decode).
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// ApiClient
///
/// The single choke point for every network call the client side makes. If a
/// token is present in the session store it is attached as a Bearer header,
/// automatically and centrally, so no caller ever attaches a stale header by
/// hand. Any 401 response deletes the token and surfaces as
/// [`ClientError::AuthExpired`]; no component downstream needs its own 401
/// handling.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            session: Arc::new(SessionStore::default()),
        }
    }

    /// The shared session store. Hand this to whatever owns the login screen.
    pub fn session(&self) -> Arc<SessionStore> {
        self.session.clone()
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self
            .http
            .request(method, format!("{}{}", self.base_url, path));
        if let Some(token) = self.session.get() {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// dispatch
    ///
    /// Sends the request and applies the uniform response contract:
    /// - 401 → token deleted, `AuthExpired`.
    /// - other non-success → `Api` with the server's `{"message"}` body.
    /// - success → the raw response, handed back to the typed readers.
    async fn dispatch(&self, builder: RequestBuilder) -> Result<Response, ClientError> {
        let response = builder.send().await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            self.session.clear();
            return Err(ClientError::AuthExpired);
        }

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|body| body.get("message")?.as_str().map(String::from))
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("Request failed")
                        .to_string()
                });
            return Err(ClientError::Api { status, message });
        }

        Ok(response)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self.dispatch(self.request(Method::GET, path)).await?;
        Ok(response.json().await?)
    }

    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let response = self
            .dispatch(self.request(Method::POST, path).json(body))
            .await?;
        Ok(response.json().await?)
    }

    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<T, ClientError> {
        let response = self
            .dispatch(self.request(Method::POST, path).multipart(form))
            .await?;
        Ok(response.json().await?)
    }

    pub async fn put_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<T, ClientError> {
        let response = self
            .dispatch(self.request(Method::PUT, path).multipart(form))
            .await?;
        Ok(response.json().await?)
    }

    pub async fn delete(&self, path: &str) -> Result<(), ClientError> {
        self.dispatch(self.request(Method::DELETE, path)).await?;
        Ok(())
    }
}
