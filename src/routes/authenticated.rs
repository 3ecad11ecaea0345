use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post, put},
};

/// Authenticated Router Module
///
/// Defines the routes accessible to any user who has successfully passed the
/// authentication layer: the session introspection endpoint and every content
/// mutation driven by the admin editors.
///
/// Access Control Strategy:
/// Every handler in this module relies on the `AuthUser` extractor middleware
/// being present on the router layer above this module. This guarantees that
/// all handlers receive a validated `AuthUser` struct containing the identity
/// claims of the session token.
pub fn authenticated_routes() -> Router<AppState> {
    Router::<AppState>::new()
        // GET /auth/me
        // Resolves the current account from the token claims. The one route that
        // can answer 404 for a valid token (account deleted after issuance).
        .route("/auth/me", get(handlers::get_me))
        // --- News Management ---
        // POST /news, PUT/DELETE /news/{id}
        // Multipart submissions from the news editor: scalar fields, a JSON-encoded
        // tag list, and a single optional cover image under the `image` field.
        .route("/news", post(handlers::create_news))
        .route(
            "/news/{id}",
            put(handlers::update_news).delete(handlers::delete_news),
        )
        // --- Route Management ---
        // POST /routes, PUT/DELETE /routes/{id}
        // Route photos share the repeated `images` field name; the optional track
        // file arrives under `gpx`.
        .route("/routes", post(handlers::create_route))
        .route(
            "/routes/{id}",
            put(handlers::update_route).delete(handlers::delete_route),
        )
        // POST /routes/parse-gpx
        // Editor utility: extracts track points from a GPX upload without creating
        // a route.
        .route("/routes/parse-gpx", post(handlers::parse_gpx))
        // --- Gallery Management ---
        // POST /gallery, PUT/DELETE /gallery/{id}
        // The metadata-bearing gallery path (one required `image` file).
        .route("/gallery", post(handlers::create_gallery_image))
        .route(
            "/gallery/{id}",
            put(handlers::update_gallery_image).delete(handlers::delete_gallery_image),
        )
        // POST /gallery/bulk
        // The bulk path: repeated `images` parts, no per-file metadata. Kept as a
        // separate contract from the metadata create path.
        .route("/gallery/bulk", post(handlers::bulk_upload_gallery))
}
