/// Client Module Index
///
/// The typed API client consumed by the site frontends and the admin panel.
/// Every network call funnels through [`http::ApiClient`], which owns the
/// session token handling; the per-resource clients translate domain CRUD
/// calls into HTTP requests; [`admin::AdminPanel`] orchestrates the three
/// resource clients behind the content-management screens.

/// The single outbound request pipeline: token attachment and the 401
/// session-teardown contract.
pub mod http;

/// Login/logout/"who am I" over the session store.
pub mod auth;

/// Explicit multipart payload builders: which fields are scalar, which are
/// JSON-array-encoded, and which are file parts.
pub mod payload;

/// Typed CRUD wrappers, one per content resource.
pub mod gallery;
pub mod news;
pub mod routes;

/// The admin panel view-model and its synchronization contract.
pub mod admin;

pub use admin::{AdminPanel, ContentCounts, Editor, EditorMode, Notice};
pub use auth::AuthClient;
pub use gallery::GalleryClient;
pub use http::{ApiClient, ClientError, SessionStore};
pub use news::NewsClient;
pub use payload::{FileAttachment, GalleryPayload, NewsPayload, RoutePayload};
pub use routes::RoutesClient;
