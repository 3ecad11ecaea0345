use crate::{
    AppState,
    auth::{self, AuthUser},
    error::ApiError,
    forms::{BulkUploadForm, GalleryForm, GpxUploadForm, NewsForm, RouteForm, UploadedFile},
    gpx,
    models::{
        AdminDashboardStats, BikeRoute, GalleryImage, GpxParseResponse, LoginRequest,
        LoginResponse, NewGalleryImage, NewsItem, RegisterRequest, User, UserProfile,
    },
};
use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};
use uuid::Uuid;

// --- Upload Helper ---

/// store_upload
///
/// Persists one received file through the storage service under a unique,
/// prefix-scoped object key (e.g. `news/UUID.jpg`) and returns its public URL.
/// The underlying storage error is logged but never leaked to the client.
async fn store_upload(
    state: &AppState,
    prefix: &str,
    file: UploadedFile,
) -> Result<String, ApiError> {
    let key = format!("{}/{}.{}", prefix, Uuid::new_v4(), file.extension());
    state
        .storage
        .put_object(&key, &file.content_type, file.bytes)
        .await
        .map_err(|e| {
            tracing::error!("storage error for key {}: {}", key, e);
            ApiError::Internal
        })
}

// --- Auth Handlers ---

/// register_user
///
/// [Public Route] Creates a new account. Rejects an already-registered email
/// with a client error. The stored role is always 'user' regardless of the
/// submitted payload, so roles cannot be self-escalated here; the password
/// hash never appears in the response.
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Registered", body = UserProfile),
        (status = 400, description = "Email already taken")
    )
)]
pub async fn register_user(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<UserProfile>, ApiError> {
    if payload.email.trim().is_empty() || payload.password.is_empty() {
        return Err(ApiError::Validation(
            "Email and password are required".to_string(),
        ));
    }

    // Exact-match duplicate check before attempting the insert.
    if state.repo.get_user_by_email(&payload.email).await.is_some() {
        return Err(ApiError::Validation(
            "A user with this email already exists".to_string(),
        ));
    }

    let password_hash = auth::hash_password(&payload.password).map_err(|e| {
        tracing::error!("password hashing error: {:?}", e);
        ApiError::Internal
    })?;

    let user = User {
        id: Uuid::new_v4(),
        email: payload.email,
        name: payload.name.unwrap_or_default(),
        role: "user".to_string(),
        password_hash,
    };

    // The UNIQUE constraint still backs the check above: a racing duplicate
    // insert fails here and reports the same conflict.
    let created = state.repo.create_user(user).await.ok_or_else(|| {
        ApiError::Validation("A user with this email already exists".to_string())
    })?;

    Ok(Json(created.profile()))
}

/// login_user
///
/// [Public Route] Validates credentials and issues the session token.
///
/// Unknown email and wrong password produce one combined error so the
/// endpoint never leaks which accounts exist.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 400, description = "Invalid credentials")
    )
)]
pub async fn login_user(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = state
        .repo
        .get_user_by_email(&payload.email)
        .await
        .ok_or(ApiError::InvalidCredentials)?;

    if !auth::verify_password(&payload.password, &user.password_hash) {
        return Err(ApiError::InvalidCredentials);
    }

    let token = auth::issue_token(&user, &state.config.jwt_secret).map_err(|e| {
        tracing::error!("token issuance error: {:?}", e);
        ApiError::Internal
    })?;

    Ok(Json(LoginResponse {
        token,
        user: user.profile(),
    }))
}

/// get_me
///
/// [Authenticated Route] Resolves the current user from the token claims.
/// Responds 404 when the account was deleted after the token was issued,
/// the only path that can yield "authenticated but no current user".
#[utoipa::path(
    get,
    path = "/auth/me",
    responses(
        (status = 200, description = "Profile", body = UserProfile),
        (status = 404, description = "Account no longer exists")
    )
)]
pub async fn get_me(
    AuthUser { id, .. }: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<UserProfile>, ApiError> {
    match state.repo.get_user(id).await {
        Some(user) => Ok(Json(user.profile())),
        None => Err(ApiError::NotFound("User not found".to_string())),
    }
}

// --- News Handlers ---

/// get_news
///
/// [Public Route] Lists all news items and events, newest first.
#[utoipa::path(
    get,
    path = "/news",
    responses((status = 200, description = "News list", body = [NewsItem]))
)]
pub async fn get_news(State(state): State<AppState>) -> Json<Vec<NewsItem>> {
    Json(state.repo.get_news().await)
}

/// get_news_item
///
/// [Public Route] Retrieves a single news item and bumps its view counter.
#[utoipa::path(
    get,
    path = "/news/{id}",
    params(("id" = Uuid, Path, description = "News ID")),
    responses((status = 200, description = "Found", body = NewsItem))
)]
pub async fn get_news_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<NewsItem>, ApiError> {
    match state.repo.get_news_item(id).await {
        Some(item) => Ok(Json(item)),
        None => Err(ApiError::NotFound("News item not found".to_string())),
    }
}

/// create_news
///
/// [Authenticated Route] Accepts the news editor's multipart submission,
/// stores the optional cover image, and inserts the item. The response is the
/// canonical server entity: id, stored image URL and timestamps are all
/// server-assigned.
#[utoipa::path(
    post,
    path = "/news",
    responses((status = 200, description = "Created", body = NewsItem))
)]
pub async fn create_news(
    user: AuthUser,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<NewsItem>, ApiError> {
    let mut form = NewsForm::from_multipart(multipart).await?;

    let image_url = match form.image.take() {
        Some(file) => Some(store_upload(&state, "news", file).await?),
        None => None,
    };

    let rec = form.into_new(&user.email, image_url)?;
    match state.repo.create_news(rec).await {
        Some(item) => Ok(Json(item)),
        None => Err(ApiError::Internal),
    }
}

/// update_news
///
/// [Authenticated Route] Partial update: only the submitted fields change, and
/// a newly uploaded image replaces the stored one.
#[utoipa::path(
    put,
    path = "/news/{id}",
    params(("id" = Uuid, Path, description = "News ID")),
    responses((status = 200, description = "Updated", body = NewsItem))
)]
pub async fn update_news(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<NewsItem>, ApiError> {
    let mut form = NewsForm::from_multipart(multipart).await?;

    let image_url = match form.image.take() {
        Some(file) => Some(store_upload(&state, "news", file).await?),
        None => None,
    };

    match state.repo.update_news(id, form.into_patch(image_url)).await {
        Some(item) => Ok(Json(item)),
        None => Err(ApiError::NotFound("News item not found".to_string())),
    }
}

/// delete_news
///
/// [Authenticated Route] Hard delete; there is no undo, which is why the admin
/// panel gates this behind an explicit confirmation step.
#[utoipa::path(
    delete,
    path = "/news/{id}",
    params(("id" = Uuid, Path, description = "News ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_news(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if state.repo.delete_news(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("News item not found".to_string()))
    }
}

// --- Route Handlers ---

/// get_routes
///
/// [Public Route] Lists all cycling routes, newest first.
#[utoipa::path(
    get,
    path = "/routes",
    responses((status = 200, description = "Route list", body = [BikeRoute]))
)]
pub async fn get_routes(State(state): State<AppState>) -> Json<Vec<BikeRoute>> {
    Json(state.repo.get_routes().await)
}

/// get_route
///
/// [Public Route] Retrieves a single route with its full track geometry.
#[utoipa::path(
    get,
    path = "/routes/{id}",
    params(("id" = Uuid, Path, description = "Route ID")),
    responses((status = 200, description = "Found", body = BikeRoute))
)]
pub async fn get_route(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BikeRoute>, ApiError> {
    match state.repo.get_route(id).await {
        Some(route) => Ok(Json(route)),
        None => Err(ApiError::NotFound("Route not found".to_string())),
    }
}

/// create_route
///
/// [Authenticated Route] Accepts the route editor's multipart submission.
/// Every photo under the repeated `images` field is stored; when the editor
/// attached a GPX file but no explicit points, the track is scanned out of it.
#[utoipa::path(
    post,
    path = "/routes",
    responses((status = 200, description = "Created", body = BikeRoute))
)]
pub async fn create_route(
    user: AuthUser,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<BikeRoute>, ApiError> {
    let mut form = RouteForm::from_multipart(multipart).await?;

    let mut image_urls = Vec::with_capacity(form.images.len());
    for file in std::mem::take(&mut form.images) {
        image_urls.push(store_upload(&state, "routes", file).await?);
    }

    if form.points.is_none() {
        if let Some(gpx_file) = form.gpx.take() {
            let text = String::from_utf8_lossy(&gpx_file.bytes).into_owned();
            form.points = Some(gpx::scan_track_points(&text));
        }
    }

    let rec = form.into_new(&user.email, image_urls)?;
    match state.repo.create_route(rec).await {
        Some(route) => Ok(Json(route)),
        None => Err(ApiError::Internal),
    }
}

/// update_route
///
/// [Authenticated Route] Partial update. Newly uploaded photos replace the
/// stored image set wholesale; an absent `images` field keeps it.
#[utoipa::path(
    put,
    path = "/routes/{id}",
    params(("id" = Uuid, Path, description = "Route ID")),
    responses((status = 200, description = "Updated", body = BikeRoute))
)]
pub async fn update_route(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<BikeRoute>, ApiError> {
    let mut form = RouteForm::from_multipart(multipart).await?;

    let image_urls = if form.images.is_empty() {
        None
    } else {
        let mut urls = Vec::with_capacity(form.images.len());
        for file in std::mem::take(&mut form.images) {
            urls.push(store_upload(&state, "routes", file).await?);
        }
        Some(urls)
    };

    match state.repo.update_route(id, form.into_patch(image_urls)).await {
        Some(route) => Ok(Json(route)),
        None => Err(ApiError::NotFound("Route not found".to_string())),
    }
}

/// delete_route
///
/// [Authenticated Route] Hard delete of a route.
#[utoipa::path(
    delete,
    path = "/routes/{id}",
    params(("id" = Uuid, Path, description = "Route ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_route(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if state.repo.delete_route(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Route not found".to_string()))
    }
}

/// parse_gpx
///
/// [Authenticated Route] Editor utility: extracts the coordinate list from an
/// uploaded GPX file without creating anything.
#[utoipa::path(
    post,
    path = "/routes/parse-gpx",
    responses((status = 200, description = "Parsed points", body = GpxParseResponse))
)]
pub async fn parse_gpx(
    _user: AuthUser,
    multipart: Multipart,
) -> Result<Json<GpxParseResponse>, ApiError> {
    let form = GpxUploadForm::from_multipart(multipart).await?;
    let file = form
        .gpx
        .ok_or_else(|| ApiError::Validation("Field 'gpx' is required".to_string()))?;

    let text = String::from_utf8_lossy(&file.bytes).into_owned();
    Ok(Json(GpxParseResponse {
        points: gpx::scan_track_points(&text),
    }))
}

// --- Gallery Handlers ---

/// get_gallery
///
/// [Public Route] Lists all gallery photos, newest first.
#[utoipa::path(
    get,
    path = "/gallery",
    responses((status = 200, description = "Gallery list", body = [GalleryImage]))
)]
pub async fn get_gallery(State(state): State<AppState>) -> Json<Vec<GalleryImage>> {
    Json(state.repo.get_gallery().await)
}

/// get_gallery_image
///
/// [Public Route] Retrieves a single gallery photo record.
#[utoipa::path(
    get,
    path = "/gallery/{id}",
    params(("id" = Uuid, Path, description = "Gallery image ID")),
    responses((status = 200, description = "Found", body = GalleryImage))
)]
pub async fn get_gallery_image(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GalleryImage>, ApiError> {
    match state.repo.get_gallery_image(id).await {
        Some(image) => Ok(Json(image)),
        None => Err(ApiError::NotFound("Gallery image not found".to_string())),
    }
}

/// create_gallery_image
///
/// [Authenticated Route] The metadata-bearing gallery path: one required image
/// file plus title/description/tags.
#[utoipa::path(
    post,
    path = "/gallery",
    responses((status = 200, description = "Created", body = GalleryImage))
)]
pub async fn create_gallery_image(
    user: AuthUser,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<GalleryImage>, ApiError> {
    let mut form = GalleryForm::from_multipart(multipart).await?;

    let file = form
        .image
        .take()
        .ok_or_else(|| ApiError::Validation("Field 'image' is required".to_string()))?;
    let url = store_upload(&state, "gallery", file).await?;

    let rec = form.into_new(&user.email, url);
    match state.repo.create_gallery_image(rec).await {
        Some(image) => Ok(Json(image)),
        None => Err(ApiError::Internal),
    }
}

/// update_gallery_image
///
/// [Authenticated Route] Partial metadata update; a newly uploaded file
/// replaces the stored one.
#[utoipa::path(
    put,
    path = "/gallery/{id}",
    params(("id" = Uuid, Path, description = "Gallery image ID")),
    responses((status = 200, description = "Updated", body = GalleryImage))
)]
pub async fn update_gallery_image(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<GalleryImage>, ApiError> {
    let mut form = GalleryForm::from_multipart(multipart).await?;

    let url = match form.image.take() {
        Some(file) => Some(store_upload(&state, "gallery", file).await?),
        None => None,
    };

    match state
        .repo
        .update_gallery_image(id, form.into_patch(url))
        .await
    {
        Some(image) => Ok(Json(image)),
        None => Err(ApiError::NotFound("Gallery image not found".to_string())),
    }
}

/// delete_gallery_image
///
/// [Authenticated Route] Hard delete of a gallery photo record.
#[utoipa::path(
    delete,
    path = "/gallery/{id}",
    params(("id" = Uuid, Path, description = "Gallery image ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_gallery_image(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if state.repo.delete_gallery_image(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Gallery image not found".to_string()))
    }
}

/// bulk_upload_gallery
///
/// [Authenticated Route] The bulk path: a plain list of files with no per-file
/// metadata. Each file becomes its own record with empty title/tags. This is a
/// distinct contract from the metadata `create` path and stays separate.
#[utoipa::path(
    post,
    path = "/gallery/bulk",
    responses((status = 200, description = "Created records", body = [GalleryImage]))
)]
pub async fn bulk_upload_gallery(
    user: AuthUser,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<Vec<GalleryImage>>, ApiError> {
    let form = BulkUploadForm::from_multipart(multipart).await?;
    if form.images.is_empty() {
        return Err(ApiError::Validation(
            "At least one 'images' file part is required".to_string(),
        ));
    }

    let mut recs = Vec::with_capacity(form.images.len());
    for file in form.images {
        let url = store_upload(&state, "gallery", file).await?;
        recs.push(NewGalleryImage {
            thumbnail: url.clone(),
            url,
            title: String::new(),
            description: None,
            tags: vec![],
            author: user.email.clone(),
            event: None,
            route: None,
        });
    }

    Ok(Json(state.repo.create_gallery_bulk(recs).await))
}

// --- Admin Handlers ---

/// get_admin_stats
///
/// [Admin Route] Retrieves core application statistics for the dashboard.
///
/// *Authorization*: Explicitly checks that the `role` resolved from the token
/// is "admin".
#[utoipa::path(
    get,
    path = "/admin/stats",
    responses((status = 200, description = "Stats", body = AdminDashboardStats))
)]
pub async fn get_admin_stats(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<AdminDashboardStats>, ApiError> {
    if role != "admin" {
        return Err(ApiError::Forbidden);
    }
    Ok(Json(state.repo.get_stats().await))
}
