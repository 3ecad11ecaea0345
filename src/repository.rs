use crate::models::{
    AdminDashboardStats, BikeRoute, GalleryImage, GalleryPatch, NewGalleryImage, NewNews, NewRoute,
    NewsItem, NewsPatch, RoutePatch, RoutePoint, User,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;
use uuid::Uuid;

/// Repository Trait
///
/// Defines the abstract contract for all persistence operations. This is the
/// core of the Repository Abstraction pattern, allowing the handlers to
/// interact with the data layer without knowing the specific implementation
/// (SQLite, Mock, etc.).
///
/// **Send + Sync + async_trait** are required to make the trait object
/// (`Arc<dyn Repository>`) safely shareable across Axum's task boundaries.
#[async_trait]
pub trait Repository: Send + Sync {
    // --- Accounts ---
    async fn get_user(&self, id: Uuid) -> Option<User>;
    // Exact-match lookup backing both login and the duplicate-email check.
    async fn get_user_by_email(&self, email: &str) -> Option<User>;
    // Returns None when the insert is rejected (email uniqueness violation).
    async fn create_user(&self, user: User) -> Option<User>;

    // --- News ---
    async fn get_news(&self) -> Vec<NewsItem>;
    // Detail read: increments the view counter as a side effect.
    async fn get_news_item(&self, id: Uuid) -> Option<NewsItem>;
    async fn create_news(&self, rec: NewNews) -> Option<NewsItem>;
    // Partial update, COALESCE semantics: None fields keep the stored value.
    async fn update_news(&self, id: Uuid, patch: NewsPatch) -> Option<NewsItem>;
    async fn delete_news(&self, id: Uuid) -> bool;

    // --- Routes ---
    async fn get_routes(&self) -> Vec<BikeRoute>;
    async fn get_route(&self, id: Uuid) -> Option<BikeRoute>;
    async fn create_route(&self, rec: NewRoute) -> Option<BikeRoute>;
    async fn update_route(&self, id: Uuid, patch: RoutePatch) -> Option<BikeRoute>;
    async fn delete_route(&self, id: Uuid) -> bool;

    // --- Gallery ---
    async fn get_gallery(&self) -> Vec<GalleryImage>;
    async fn get_gallery_image(&self, id: Uuid) -> Option<GalleryImage>;
    async fn create_gallery_image(&self, rec: NewGalleryImage) -> Option<GalleryImage>;
    async fn update_gallery_image(&self, id: Uuid, patch: GalleryPatch) -> Option<GalleryImage>;
    async fn delete_gallery_image(&self, id: Uuid) -> bool;
    // Bulk path: inserts a batch of metadata-less records in one call.
    async fn create_gallery_bulk(&self, recs: Vec<NewGalleryImage>) -> Vec<GalleryImage>;

    // --- Dashboard ---
    async fn get_stats(&self) -> AdminDashboardStats;
}

/// RepositoryState
///
/// The concrete type used to share the persistence layer access across the application state.
pub type RepositoryState = Arc<dyn Repository>;

/// SqliteRepository
///
/// The concrete implementation of the `Repository` trait, backed by the single
/// SQLite database file the portal runs on.
pub struct SqliteRepository {
    pool: SqlitePool,
}

// --- Internal Row Mappings ---
//
// SQLite stores the array-valued fields (tags, points, images) as JSON text
// columns. These row structs carry the raw column values; the From impls
// decode the JSON into the public models.

#[derive(FromRow)]
struct NewsRow {
    id: Uuid,
    title: String,
    content: String,
    excerpt: String,
    author: String,
    date: String,
    category: String,
    kind: String,
    image: String,
    views: i64,
    tags: String,
    featured: bool,
    location: Option<String>,
    participants: Option<i64>,
    difficulty: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<NewsRow> for NewsItem {
    fn from(row: NewsRow) -> Self {
        NewsItem {
            id: row.id,
            title: row.title,
            content: row.content,
            excerpt: row.excerpt,
            author: row.author,
            date: row.date,
            category: row.category,
            kind: row.kind,
            image: row.image,
            views: row.views,
            tags: decode_json(&row.tags),
            featured: row.featured,
            location: row.location,
            participants: row.participants,
            difficulty: row.difficulty,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(FromRow)]
struct RouteRow {
    id: Uuid,
    title: String,
    description: String,
    distance: f64,
    duration: f64,
    difficulty: String,
    kind: String,
    points: String,
    images: String,
    tags: String,
    author: String,
    featured: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<RouteRow> for BikeRoute {
    fn from(row: RouteRow) -> Self {
        BikeRoute {
            id: row.id,
            title: row.title,
            description: row.description,
            distance: row.distance,
            duration: row.duration,
            difficulty: row.difficulty,
            kind: row.kind,
            points: decode_json::<RoutePoint>(&row.points),
            images: decode_json(&row.images),
            tags: decode_json(&row.tags),
            author: row.author,
            featured: row.featured,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(FromRow)]
struct GalleryRow {
    id: Uuid,
    url: String,
    thumbnail: String,
    title: String,
    description: Option<String>,
    tags: String,
    author: String,
    event: Option<String>,
    route: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<GalleryRow> for GalleryImage {
    fn from(row: GalleryRow) -> Self {
        GalleryImage {
            id: row.id,
            url: row.url,
            thumbnail: row.thumbnail,
            title: row.title,
            description: row.description,
            tags: decode_json(&row.tags),
            author: row.author,
            event: row.event,
            route: row.route,
            created_at: row.created_at,
        }
    }
}

fn decode_json<T: serde::de::DeserializeOwned>(raw: &str) -> Vec<T> {
    serde_json::from_str(raw).unwrap_or_default()
}

fn encode_json<T: serde::Serialize>(value: &[T]) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "[]".to_string())
}

impl SqliteRepository {
    /// Creates a new repository instance using the initialized connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// migrate
    ///
    /// Applies the schema at startup. All statements are idempotent
    /// (`CREATE TABLE IF NOT EXISTS`), so this is safe to run on every boot.
    pub async fn migrate(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id            TEXT PRIMARY KEY,
                email         TEXT NOT NULL UNIQUE,
                name          TEXT NOT NULL DEFAULT '',
                role          TEXT NOT NULL DEFAULT 'user',
                password_hash TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS news (
                id           TEXT PRIMARY KEY,
                title        TEXT NOT NULL,
                content      TEXT NOT NULL DEFAULT '',
                excerpt      TEXT NOT NULL DEFAULT '',
                author       TEXT NOT NULL DEFAULT '',
                date         TEXT NOT NULL DEFAULT '',
                category     TEXT NOT NULL DEFAULT '',
                kind         TEXT NOT NULL DEFAULT 'news',
                image        TEXT NOT NULL DEFAULT '',
                views        INTEGER NOT NULL DEFAULT 0,
                tags         TEXT NOT NULL DEFAULT '[]',
                featured     INTEGER NOT NULL DEFAULT 0,
                location     TEXT,
                participants INTEGER,
                difficulty   TEXT,
                created_at   TEXT NOT NULL,
                updated_at   TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS routes (
                id          TEXT PRIMARY KEY,
                title       TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                distance    REAL NOT NULL DEFAULT 0,
                duration    REAL NOT NULL DEFAULT 0,
                difficulty  TEXT NOT NULL DEFAULT '',
                kind        TEXT NOT NULL DEFAULT '',
                points      TEXT NOT NULL DEFAULT '[]',
                images      TEXT NOT NULL DEFAULT '[]',
                tags        TEXT NOT NULL DEFAULT '[]',
                author      TEXT NOT NULL DEFAULT '',
                featured    INTEGER NOT NULL DEFAULT 0,
                created_at  TEXT NOT NULL,
                updated_at  TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS gallery (
                id          TEXT PRIMARY KEY,
                url         TEXT NOT NULL,
                thumbnail   TEXT NOT NULL DEFAULT '',
                title       TEXT NOT NULL DEFAULT '',
                description TEXT,
                tags        TEXT NOT NULL DEFAULT '[]',
                author      TEXT NOT NULL DEFAULT '',
                event       TEXT,
                route       TEXT,
                created_at  TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // Plain fetch helpers shared by the create/update paths. These never touch
    // the view counter.
    async fn fetch_news(&self, id: Uuid) -> Option<NewsItem> {
        sqlx::query_as::<_, NewsRow>("SELECT * FROM news WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("fetch_news error: {:?}", e);
                None
            })
            .map(NewsItem::from)
    }

    async fn fetch_route(&self, id: Uuid) -> Option<BikeRoute> {
        sqlx::query_as::<_, RouteRow>("SELECT * FROM routes WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("fetch_route error: {:?}", e);
                None
            })
            .map(BikeRoute::from)
    }

    async fn fetch_gallery_image(&self, id: Uuid) -> Option<GalleryImage> {
        sqlx::query_as::<_, GalleryRow>("SELECT * FROM gallery WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("fetch_gallery_image error: {:?}", e);
                None
            })
            .map(GalleryImage::from)
    }
}

#[async_trait]
impl Repository for SqliteRepository {
    // --- ACCOUNTS ---

    /// get_user
    ///
    /// Retrieves the full account record needed for authentication and
    /// authorization checks.
    async fn get_user(&self, id: Uuid) -> Option<User> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("get_user error: {:?}", e);
                None
            })
    }

    /// get_user_by_email
    ///
    /// Exact-match lookup by email. Backs the login flow and the
    /// duplicate-registration check.
    async fn get_user_by_email(&self, email: &str) -> Option<User> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("get_user_by_email error: {:?}", e);
                None
            })
    }

    /// create_user
    ///
    /// Inserts a new account. The UNIQUE constraint on `email` is the final
    /// authority on duplicates; a violation surfaces as None and the handler
    /// maps it to the user-facing conflict error.
    async fn create_user(&self, user: User) -> Option<User> {
        let result = sqlx::query(
            "INSERT INTO users (id, email, name, role, password_hash) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.role)
        .bind(&user.password_hash)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Some(user),
            Err(e) => {
                tracing::error!("create_user error: {:?}", e);
                None
            }
        }
    }

    // --- NEWS ---

    /// get_news
    ///
    /// Lists all news items, newest first.
    async fn get_news(&self) -> Vec<NewsItem> {
        match sqlx::query_as::<_, NewsRow>("SELECT * FROM news ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
        {
            Ok(rows) => rows.into_iter().map(NewsItem::from).collect(),
            Err(e) => {
                tracing::error!("get_news error: {:?}", e);
                vec![]
            }
        }
    }

    /// get_news_item
    ///
    /// Detail retrieval. Bumps the view counter before reading, so the
    /// returned entity already reflects this visit.
    async fn get_news_item(&self, id: Uuid) -> Option<NewsItem> {
        if let Err(e) = sqlx::query("UPDATE news SET views = views + 1 WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
        {
            tracing::error!("view counter error: {:?}", e);
        }
        self.fetch_news(id).await
    }

    /// create_news
    ///
    /// Inserts a news item with a fresh UUID and server-side timestamps.
    async fn create_news(&self, rec: NewNews) -> Option<NewsItem> {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO news (id, title, content, excerpt, author, date, category, kind,
                              image, views, tags, featured, location, participants, difficulty,
                              created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, 0, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id)
        .bind(&rec.title)
        .bind(&rec.content)
        .bind(&rec.excerpt)
        .bind(&rec.author)
        .bind(&rec.date)
        .bind(&rec.category)
        .bind(&rec.kind)
        .bind(&rec.image)
        .bind(encode_json(&rec.tags))
        .bind(rec.featured)
        .bind(&rec.location)
        .bind(rec.participants)
        .bind(&rec.difficulty)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => self.fetch_news(id).await,
            Err(e) => {
                tracing::error!("create_news error: {:?}", e);
                None
            }
        }
    }

    /// update_news
    ///
    /// Partial update using COALESCE so only the provided fields change.
    /// Returns None when the id does not exist.
    async fn update_news(&self, id: Uuid, patch: NewsPatch) -> Option<NewsItem> {
        let result = sqlx::query(
            r#"
            UPDATE news
            SET title        = COALESCE(?, title),
                content      = COALESCE(?, content),
                excerpt      = COALESCE(?, excerpt),
                author       = COALESCE(?, author),
                date         = COALESCE(?, date),
                category     = COALESCE(?, category),
                kind         = COALESCE(?, kind),
                image        = COALESCE(?, image),
                tags         = COALESCE(?, tags),
                featured     = COALESCE(?, featured),
                location     = COALESCE(?, location),
                participants = COALESCE(?, participants),
                difficulty   = COALESCE(?, difficulty),
                updated_at   = ?
            WHERE id = ?
            "#,
        )
        .bind(&patch.title)
        .bind(&patch.content)
        .bind(&patch.excerpt)
        .bind(&patch.author)
        .bind(&patch.date)
        .bind(&patch.category)
        .bind(&patch.kind)
        .bind(&patch.image)
        .bind(patch.tags.as_deref().map(encode_json))
        .bind(patch.featured)
        .bind(&patch.location)
        .bind(patch.participants)
        .bind(&patch.difficulty)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await;

        match result {
            Ok(res) if res.rows_affected() > 0 => self.fetch_news(id).await,
            Ok(_) => None,
            Err(e) => {
                tracing::error!("update_news error: {:?}", e);
                None
            }
        }
    }

    /// delete_news
    ///
    /// Hard delete. True only if a row was removed.
    async fn delete_news(&self, id: Uuid) -> bool {
        match sqlx::query("DELETE FROM news WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
        {
            Ok(res) => res.rows_affected() > 0,
            Err(e) => {
                tracing::error!("delete_news error: {:?}", e);
                false
            }
        }
    }

    // --- ROUTES ---

    /// get_routes
    ///
    /// Lists all routes, newest first.
    async fn get_routes(&self) -> Vec<BikeRoute> {
        match sqlx::query_as::<_, RouteRow>("SELECT * FROM routes ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
        {
            Ok(rows) => rows.into_iter().map(BikeRoute::from).collect(),
            Err(e) => {
                tracing::error!("get_routes error: {:?}", e);
                vec![]
            }
        }
    }

    async fn get_route(&self, id: Uuid) -> Option<BikeRoute> {
        self.fetch_route(id).await
    }

    /// create_route
    ///
    /// Inserts a route; track points, photo URLs and tags land as JSON columns.
    async fn create_route(&self, rec: NewRoute) -> Option<BikeRoute> {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO routes (id, title, description, distance, duration, difficulty, kind,
                                points, images, tags, author, featured, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id)
        .bind(&rec.title)
        .bind(&rec.description)
        .bind(rec.distance)
        .bind(rec.duration)
        .bind(&rec.difficulty)
        .bind(&rec.kind)
        .bind(encode_json(&rec.points))
        .bind(encode_json(&rec.images))
        .bind(encode_json(&rec.tags))
        .bind(&rec.author)
        .bind(rec.featured)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => self.fetch_route(id).await,
            Err(e) => {
                tracing::error!("create_route error: {:?}", e);
                None
            }
        }
    }

    /// update_route
    ///
    /// Partial update with COALESCE. A provided image set replaces the stored
    /// one wholesale.
    async fn update_route(&self, id: Uuid, patch: RoutePatch) -> Option<BikeRoute> {
        let result = sqlx::query(
            r#"
            UPDATE routes
            SET title       = COALESCE(?, title),
                description = COALESCE(?, description),
                distance    = COALESCE(?, distance),
                duration    = COALESCE(?, duration),
                difficulty  = COALESCE(?, difficulty),
                kind        = COALESCE(?, kind),
                points      = COALESCE(?, points),
                images      = COALESCE(?, images),
                tags        = COALESCE(?, tags),
                author      = COALESCE(?, author),
                featured    = COALESCE(?, featured),
                updated_at  = ?
            WHERE id = ?
            "#,
        )
        .bind(&patch.title)
        .bind(&patch.description)
        .bind(patch.distance)
        .bind(patch.duration)
        .bind(&patch.difficulty)
        .bind(&patch.kind)
        .bind(patch.points.as_deref().map(encode_json))
        .bind(patch.images.as_deref().map(encode_json))
        .bind(patch.tags.as_deref().map(encode_json))
        .bind(&patch.author)
        .bind(patch.featured)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await;

        match result {
            Ok(res) if res.rows_affected() > 0 => self.fetch_route(id).await,
            Ok(_) => None,
            Err(e) => {
                tracing::error!("update_route error: {:?}", e);
                None
            }
        }
    }

    async fn delete_route(&self, id: Uuid) -> bool {
        match sqlx::query("DELETE FROM routes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
        {
            Ok(res) => res.rows_affected() > 0,
            Err(e) => {
                tracing::error!("delete_route error: {:?}", e);
                false
            }
        }
    }

    // --- GALLERY ---

    /// get_gallery
    ///
    /// Lists all gallery photos, newest first.
    async fn get_gallery(&self) -> Vec<GalleryImage> {
        match sqlx::query_as::<_, GalleryRow>("SELECT * FROM gallery ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
        {
            Ok(rows) => rows.into_iter().map(GalleryImage::from).collect(),
            Err(e) => {
                tracing::error!("get_gallery error: {:?}", e);
                vec![]
            }
        }
    }

    async fn get_gallery_image(&self, id: Uuid) -> Option<GalleryImage> {
        self.fetch_gallery_image(id).await
    }

    /// create_gallery_image
    ///
    /// Inserts one photo record (metadata path and bulk path both funnel here).
    async fn create_gallery_image(&self, rec: NewGalleryImage) -> Option<GalleryImage> {
        let id = Uuid::new_v4();
        let result = sqlx::query(
            r#"
            INSERT INTO gallery (id, url, thumbnail, title, description, tags, author,
                                 event, route, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id)
        .bind(&rec.url)
        .bind(&rec.thumbnail)
        .bind(&rec.title)
        .bind(&rec.description)
        .bind(encode_json(&rec.tags))
        .bind(&rec.author)
        .bind(&rec.event)
        .bind(&rec.route)
        .bind(Utc::now())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => self.fetch_gallery_image(id).await,
            Err(e) => {
                tracing::error!("create_gallery_image error: {:?}", e);
                None
            }
        }
    }

    /// update_gallery_image
    ///
    /// Partial metadata update; the stored file URLs only change when a new
    /// upload replaced them.
    async fn update_gallery_image(&self, id: Uuid, patch: GalleryPatch) -> Option<GalleryImage> {
        let result = sqlx::query(
            r#"
            UPDATE gallery
            SET url         = COALESCE(?, url),
                thumbnail   = COALESCE(?, thumbnail),
                title       = COALESCE(?, title),
                description = COALESCE(?, description),
                tags        = COALESCE(?, tags),
                event       = COALESCE(?, event),
                route       = COALESCE(?, route)
            WHERE id = ?
            "#,
        )
        .bind(&patch.url)
        .bind(&patch.thumbnail)
        .bind(&patch.title)
        .bind(&patch.description)
        .bind(patch.tags.as_deref().map(encode_json))
        .bind(&patch.event)
        .bind(&patch.route)
        .bind(id)
        .execute(&self.pool)
        .await;

        match result {
            Ok(res) if res.rows_affected() > 0 => self.fetch_gallery_image(id).await,
            Ok(_) => None,
            Err(e) => {
                tracing::error!("update_gallery_image error: {:?}", e);
                None
            }
        }
    }

    async fn delete_gallery_image(&self, id: Uuid) -> bool {
        match sqlx::query("DELETE FROM gallery WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
        {
            Ok(res) => res.rows_affected() > 0,
            Err(e) => {
                tracing::error!("delete_gallery_image error: {:?}", e);
                false
            }
        }
    }

    /// create_gallery_bulk
    ///
    /// Inserts a batch of records, preserving submission order. A failed
    /// insert is logged and skipped; the remaining files still land.
    async fn create_gallery_bulk(&self, recs: Vec<NewGalleryImage>) -> Vec<GalleryImage> {
        let mut created = Vec::with_capacity(recs.len());
        for rec in recs {
            if let Some(image) = self.create_gallery_image(rec).await {
                created.push(image);
            }
        }
        created
    }

    // --- DASHBOARD ---

    /// get_stats
    ///
    /// Compiles all counters for the administrative dashboard in a single call.
    async fn get_stats(&self) -> AdminDashboardStats {
        let total_news = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM news")
            .fetch_one(&self.pool)
            .await
            .unwrap_or(0);
        let total_routes = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM routes")
            .fetch_one(&self.pool)
            .await
            .unwrap_or(0);
        let total_gallery_images = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM gallery")
            .fetch_one(&self.pool)
            .await
            .unwrap_or(0);
        let total_users = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .unwrap_or(0);
        AdminDashboardStats {
            total_news,
            total_routes,
            total_gallery_images,
            total_users,
        }
    }
}
