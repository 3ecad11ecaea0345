use super::http::{ApiClient, ClientError};
use crate::models::{LoginRequest, LoginResponse, UserProfile};

/// AuthClient
///
/// The session lifecycle, driven through the shared [`ApiClient`]. Two states:
/// unauthenticated (no token in the session store) and authenticated (token
/// held). Login is the only transition into the second state; logout and any
/// 401 are the transitions out.
#[derive(Clone)]
pub struct AuthClient {
    api: ApiClient,
}

impl AuthClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// login
    ///
    /// Sends credentials to the backend; on success stores the returned token
    /// and hands back the profile. On failure the server's generic message
    /// propagates unchanged: the backend does not distinguish "wrong email"
    /// from "wrong password", and neither does this client.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<UserProfile, ClientError> {
        let response: LoginResponse = self.api.post_json("/auth/login", credentials).await?;
        self.api.session().set(response.token);
        Ok(response.user)
    }

    /// logout
    ///
    /// Deletes the token. Idempotent: callable when already unauthenticated
    /// with no error. Routing the user back to the login screen is the
    /// caller's responsibility (the admin panel raises its `login_required`
    /// flag).
    pub fn logout(&self) {
        self.api.session().clear();
    }

    /// current_user
    ///
    /// Asks the backend "who am I" with the current token. Returns None on any
    /// failure: transient network errors and rejected sessions are both
    /// flattened into "no current user". Callers that need to distinguish
    /// them must watch for the 401 teardown instead.
    pub async fn current_user(&self) -> Option<UserProfile> {
        self.api.get_json("/auth/me").await.ok()
    }

    /// is_authenticated
    ///
    /// Synchronous, local-only token presence check; never touches the server.
    pub fn is_authenticated(&self) -> bool {
        self.api.session().is_present()
    }
}
