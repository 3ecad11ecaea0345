use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Core Application Schemas (Mapped to Database) ---

/// User
///
/// The canonical account record stored in the `users` table. This struct is
/// internal to the server: it carries the password hash and is therefore never
/// serialized. Every outward-facing path goes through [`UserProfile`].
#[derive(Debug, Clone, FromRow, Default)]
pub struct User {
    pub id: Uuid,
    // The user's primary identifier. Uniqueness is enforced by the store.
    pub email: String,
    pub name: String,
    // The RBAC field: 'user' or 'admin'.
    pub role: String,
    // Argon2 PHC string. Never leaves the repository/auth boundary.
    pub password_hash: String,
}

impl User {
    /// Strips the credential material, leaving only the public profile.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            email: self.email.clone(),
            name: self.name.clone(),
            role: self.role.clone(),
        }
    }
}

/// UserProfile
///
/// Output schema for the registration response, the login response, and
/// `GET /auth/me`. Identical identity claims are embedded in the session token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default, PartialEq)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: String,
}

/// NewsItem
///
/// A news post or club event from the `news` table. The `kind` field
/// distinguishes the two; events additionally carry location, participant
/// count and difficulty.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default, PartialEq)]
pub struct NewsItem {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub author: String,
    // Display date chosen by the editor, distinct from the record timestamps.
    pub date: String,
    pub category: String,

    /// "news" | "event". Serialized as `type`, which is a reserved keyword in Rust.
    #[serde(rename = "type")]
    pub kind: String,

    // Public URL of the stored cover image.
    pub image: String,
    // Incremented server-side on every detail view.
    pub views: i64,
    pub tags: Vec<String>,
    pub featured: bool,

    // Event-only fields.
    pub location: Option<String>,
    pub participants: Option<i64>,
    pub difficulty: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// RoutePoint
///
/// A single coordinate of a route track, as produced by the GPX scan or
/// submitted by the editor.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default, PartialEq)]
pub struct RoutePoint {
    pub lat: f64,
    pub lng: f64,
    pub elevation: Option<f64>,
}

/// BikeRoute
///
/// A cycling route from the `routes` table: track geometry, ride metadata and
/// a set of photo URLs.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default, PartialEq)]
pub struct BikeRoute {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    // Kilometres.
    pub distance: f64,
    // Minutes.
    pub duration: f64,
    pub difficulty: String,

    /// Route category (e.g. city/mountain/road). Serialized as `type`.
    #[serde(rename = "type")]
    pub kind: String,

    pub points: Vec<RoutePoint>,
    pub images: Vec<String>,
    pub tags: Vec<String>,
    pub author: String,
    pub featured: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// GalleryImage
///
/// A single photo in the club gallery. Entities created through the bulk path
/// carry empty titles and tags; the metadata path fills them in.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default, PartialEq)]
pub struct GalleryImage {
    pub id: Uuid,
    pub url: String,
    // Same URL as `url`: thumbnail generation is a non-goal, but the field is
    // part of the wire contract consumed by the gallery grid.
    pub thumbnail: String,
    pub title: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub author: String,
    // Optional links to the event or route the photo belongs to.
    pub event: Option<String>,
    pub route: Option<String>,
    pub created_at: DateTime<Utc>,
}

// --- Auth Payloads ---

/// RegisterRequest
///
/// Input payload for `POST /auth/register`. The `role` field is accepted for
/// wire compatibility but ignored: accounts are always created with role
/// 'user', so roles cannot be self-escalated through this endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// LoginRequest
///
/// Input payload for `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// LoginResponse
///
/// Output schema for a successful login: the signed session token plus the
/// public profile of the account it was issued for.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserProfile,
}

/// GpxParseResponse
///
/// Output schema for `POST /routes/parse-gpx`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct GpxParseResponse {
    pub points: Vec<RoutePoint>,
}

// --- Repository Input Records ---
//
// These are the fully resolved forms handed to the repository after multipart
// decoding and file storage: every file attachment has already been replaced
// by its stored public URL.

/// NewNews
///
/// Insert record for a news item. `image` is the stored URL (empty when the
/// submission carried no file).
#[derive(Debug, Clone, Default)]
pub struct NewNews {
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub author: String,
    pub date: String,
    pub category: String,
    pub kind: String,
    pub image: String,
    pub tags: Vec<String>,
    pub featured: bool,
    pub location: Option<String>,
    pub participants: Option<i64>,
    pub difficulty: Option<String>,
}

/// NewsPatch
///
/// Partial update record for a news item. `None` fields leave the stored
/// column untouched (COALESCE semantics in the repository).
#[derive(Debug, Clone, Default)]
pub struct NewsPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
    pub category: Option<String>,
    pub kind: Option<String>,
    pub image: Option<String>,
    pub tags: Option<Vec<String>>,
    pub featured: Option<bool>,
    pub location: Option<String>,
    pub participants: Option<i64>,
    pub difficulty: Option<String>,
}

/// NewRoute
///
/// Insert record for a route. `images` holds the stored URLs of every photo
/// uploaded with the submission.
#[derive(Debug, Clone, Default)]
pub struct NewRoute {
    pub title: String,
    pub description: String,
    pub distance: f64,
    pub duration: f64,
    pub difficulty: String,
    pub kind: String,
    pub points: Vec<RoutePoint>,
    pub images: Vec<String>,
    pub tags: Vec<String>,
    pub author: String,
    pub featured: bool,
}

/// RoutePatch
///
/// Partial update record for a route. A `Some(images)` replaces the whole
/// photo set; `None` keeps the stored one.
#[derive(Debug, Clone, Default)]
pub struct RoutePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub distance: Option<f64>,
    pub duration: Option<f64>,
    pub difficulty: Option<String>,
    pub kind: Option<String>,
    pub points: Option<Vec<RoutePoint>>,
    pub images: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub author: Option<String>,
    pub featured: Option<bool>,
}

/// NewGalleryImage
///
/// Insert record for a gallery photo. The bulk path constructs these with
/// default metadata; the create path fills in title/description/tags.
#[derive(Debug, Clone, Default)]
pub struct NewGalleryImage {
    pub url: String,
    pub thumbnail: String,
    pub title: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub author: String,
    pub event: Option<String>,
    pub route: Option<String>,
}

/// GalleryPatch
///
/// Partial update record for a gallery photo.
#[derive(Debug, Clone, Default)]
pub struct GalleryPatch {
    pub url: Option<String>,
    pub thumbnail: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub event: Option<String>,
    pub route: Option<String>,
}

// --- Dashboard Schemas (Output) ---

/// AdminDashboardStats
///
/// Output schema for the administrative statistics endpoint (`GET /admin/stats`).
/// Compiled from the store in a single call; the admin panel's own tile counts
/// are derived client-side from the fetched lists instead.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct AdminDashboardStats {
    pub total_news: i64,
    pub total_routes: i64,
    pub total_gallery_images: i64,
    pub total_users: i64,
}
