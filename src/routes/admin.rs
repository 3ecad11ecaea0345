use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Admin Router Module
///
/// Defines the routes exclusively accessible to users with the 'admin' role.
///
/// Access Control:
/// This router is mounted behind the same authentication middleware as the
/// authenticated module; the `role='admin'` permission is then explicitly
/// checked inside each handler before any data access.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        // GET /admin/stats
        // Retrieves core dashboard metrics (totals for news, routes, gallery
        // images and accounts) compiled from the store in a single call.
        .route("/stats", get(handlers::get_admin_stats))
}
