use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// ApiError
///
/// The server-side error taxonomy. Every failing handler path maps onto one of
/// these variants, and each variant renders as a JSON body of the form
/// `{"message": "..."}` with the matching status code, which is what the API
/// client and the admin panel display to the user.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Input the user can correct (missing field, malformed part, duplicate email).
    #[error("{0}")]
    Validation(String),

    /// Bad login credentials. One combined message for unknown email and wrong
    /// password; the two cases must stay indistinguishable to the caller.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Missing or rejected session token.
    #[error("Unauthorized")]
    Unauthorized,

    /// Admin-only endpoint reached with a non-admin session.
    #[error("Forbidden")]
    Forbidden,

    #[error("{0}")]
    NotFound(String),

    /// Storage or database failure. The underlying cause is logged server-side
    /// and never leaked to the client.
    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            // The login contract uses 400, not 401: a 401 anywhere triggers the
            // client's session teardown, which must not fire on a failed login.
            ApiError::InvalidCredentials => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "message": self.to_string() }));
        (self.status(), body).into_response()
    }
}
