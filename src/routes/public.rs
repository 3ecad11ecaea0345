use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Public Router Module
///
/// Defines endpoints that are **unauthenticated** and accessible to any client
/// (anonymous or logged-in): the auth gateway (register/login) and the
/// read-only content listings the marketing pages render from.
///
/// Every mutation lives behind the authenticated router; nothing in this
/// module writes content.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // A simple, unauthenticated endpoint used for monitoring and load balancer checks.
        // Returns "ok" immediately to verify the service is running and responsive.
        .route("/health", get(|| async { "ok" }))
        // POST /auth/register
        // New account creation. Duplicate emails are rejected with a client error;
        // the stored role is always 'user'.
        .route("/auth/register", post(handlers::register_user))
        // POST /auth/login
        // Credential validation and session token issuance. Unknown email and wrong
        // password share one indistinguishable error response.
        .route("/auth/login", post(handlers::login_user))
        // GET /news, GET /news/{id}
        // News and event listings for the public site. The detail route bumps the
        // view counter.
        .route("/news", get(handlers::get_news))
        .route("/news/{id}", get(handlers::get_news_item))
        // GET /routes, GET /routes/{id}
        // Cycling route catalogue with full track geometry on the detail route.
        .route("/routes", get(handlers::get_routes))
        .route("/routes/{id}", get(handlers::get_route))
        // GET /gallery, GET /gallery/{id}
        // Photo gallery listings.
        .route("/gallery", get(handlers::get_gallery))
        .route("/gallery/{id}", get(handlers::get_gallery_image))
}
