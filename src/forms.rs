use axum::extract::Multipart;
use axum::extract::multipart::Field;

use crate::error::ApiError;
use crate::models::{
    GalleryPatch, NewGalleryImage, NewNews, NewRoute, NewsPatch, RoutePatch, RoutePoint,
};

/// UploadedFile
///
/// One binary part lifted out of a multipart submission, before it is handed
/// to the storage layer.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    async fn from_field(field: Field<'_>) -> Result<Self, ApiError> {
        let file_name = field.file_name().unwrap_or("upload.bin").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::Validation(format!("Failed to read file part: {}", e)))?
            .to_vec();
        Ok(Self {
            file_name,
            content_type,
            bytes,
        })
    }

    /// File extension used when deriving the storage object key.
    pub fn extension(&self) -> &str {
        std::path::Path::new(&self.file_name)
            .extension()
            .and_then(std::ffi::OsStr::to_str)
            .unwrap_or("bin")
    }
}

// The submission contracts mirror the admin editors exactly: scalar fields
// arrive as text parts, `tags` and `points` as single JSON-encoded parts, a
// single news/gallery image under the field name `image`, route photos as
// repeated `images` parts, and a route track file under `gpx`.

async fn text_of(field: Field<'_>, name: &str) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| ApiError::Validation(format!("Failed to read field '{}': {}", name, e)))
}

fn json_list<T: serde::de::DeserializeOwned>(raw: &str, name: &str) -> Result<Vec<T>, ApiError> {
    serde_json::from_str(raw)
        .map_err(|_| ApiError::Validation(format!("Field '{}' must be a JSON array", name)))
}

fn parse_number<T: std::str::FromStr>(raw: &str, name: &str) -> Result<T, ApiError> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::Validation(format!("Field '{}' must be a number", name)))
}

fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim(), "true" | "1")
}

/// NewsForm
///
/// The decoded multipart submission of the news editor. Every field is
/// optional at this stage; create vs. update decide what is required.
#[derive(Debug, Default)]
pub struct NewsForm {
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
    pub category: Option<String>,
    pub kind: Option<String>,
    pub tags: Option<Vec<String>>,
    pub featured: Option<bool>,
    pub location: Option<String>,
    pub participants: Option<i64>,
    pub difficulty: Option<String>,
    pub image: Option<UploadedFile>,
}

impl NewsForm {
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = Self::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::Validation(format!("Malformed multipart body: {}", e)))?
        {
            let name = field.name().unwrap_or("").to_string();
            match name.as_str() {
                "image" => form.image = Some(UploadedFile::from_field(field).await?),
                "tags" => form.tags = Some(json_list(&text_of(field, "tags").await?, "tags")?),
                "featured" => form.featured = Some(parse_flag(&text_of(field, "featured").await?)),
                "participants" => {
                    form.participants =
                        Some(parse_number(&text_of(field, "participants").await?, "participants")?)
                }
                "title" => form.title = Some(text_of(field, "title").await?),
                "content" => form.content = Some(text_of(field, "content").await?),
                "excerpt" => form.excerpt = Some(text_of(field, "excerpt").await?),
                "author" => form.author = Some(text_of(field, "author").await?),
                "date" => form.date = Some(text_of(field, "date").await?),
                "category" => form.category = Some(text_of(field, "category").await?),
                "type" => form.kind = Some(text_of(field, "type").await?),
                "location" => form.location = Some(text_of(field, "location").await?),
                "difficulty" => form.difficulty = Some(text_of(field, "difficulty").await?),
                // Unknown parts are ignored rather than rejected.
                _ => {}
            }
        }
        Ok(form)
    }

    /// Resolves the form into an insert record. `author_fallback` is the
    /// authenticated user's display name, used when the editor left the
    /// attribution field empty. `image_url` is the stored URL of the uploaded
    /// cover image, if any.
    pub fn into_new(self, author_fallback: &str, image_url: Option<String>) -> Result<NewNews, ApiError> {
        let title = match self.title {
            Some(t) if !t.trim().is_empty() => t,
            _ => return Err(ApiError::Validation("Field 'title' is required".to_string())),
        };
        Ok(NewNews {
            title,
            content: self.content.unwrap_or_default(),
            excerpt: self.excerpt.unwrap_or_default(),
            author: self
                .author
                .filter(|a| !a.trim().is_empty())
                .unwrap_or_else(|| author_fallback.to_string()),
            date: self.date.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
            kind: self.kind.unwrap_or_else(|| "news".to_string()),
            image: image_url.unwrap_or_default(),
            tags: self.tags.unwrap_or_default(),
            featured: self.featured.unwrap_or(false),
            location: self.location,
            participants: self.participants,
            difficulty: self.difficulty,
        })
    }

    /// Resolves the form into a partial update record.
    pub fn into_patch(self, image_url: Option<String>) -> NewsPatch {
        NewsPatch {
            title: self.title,
            content: self.content,
            excerpt: self.excerpt,
            author: self.author,
            date: self.date,
            category: self.category,
            kind: self.kind,
            image: image_url,
            tags: self.tags,
            featured: self.featured,
            location: self.location,
            participants: self.participants,
            difficulty: self.difficulty,
        }
    }
}

/// RouteForm
///
/// The decoded multipart submission of the route editor. Route photos share
/// the one repeated `images` field name; the optional track file arrives
/// under `gpx`.
#[derive(Debug, Default)]
pub struct RouteForm {
    pub title: Option<String>,
    pub description: Option<String>,
    pub distance: Option<f64>,
    pub duration: Option<f64>,
    pub difficulty: Option<String>,
    pub kind: Option<String>,
    pub points: Option<Vec<RoutePoint>>,
    pub tags: Option<Vec<String>>,
    pub author: Option<String>,
    pub featured: Option<bool>,
    pub images: Vec<UploadedFile>,
    pub gpx: Option<UploadedFile>,
}

impl RouteForm {
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = Self::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::Validation(format!("Malformed multipart body: {}", e)))?
        {
            let name = field.name().unwrap_or("").to_string();
            match name.as_str() {
                "images" => form.images.push(UploadedFile::from_field(field).await?),
                "gpx" => form.gpx = Some(UploadedFile::from_field(field).await?),
                "tags" => form.tags = Some(json_list(&text_of(field, "tags").await?, "tags")?),
                "points" => {
                    form.points = Some(json_list(&text_of(field, "points").await?, "points")?)
                }
                "distance" => {
                    form.distance =
                        Some(parse_number(&text_of(field, "distance").await?, "distance")?)
                }
                "duration" => {
                    form.duration =
                        Some(parse_number(&text_of(field, "duration").await?, "duration")?)
                }
                "featured" => form.featured = Some(parse_flag(&text_of(field, "featured").await?)),
                "title" => form.title = Some(text_of(field, "title").await?),
                "description" => form.description = Some(text_of(field, "description").await?),
                "difficulty" => form.difficulty = Some(text_of(field, "difficulty").await?),
                "type" => form.kind = Some(text_of(field, "type").await?),
                "author" => form.author = Some(text_of(field, "author").await?),
                _ => {}
            }
        }
        Ok(form)
    }

    pub fn into_new(
        self,
        author_fallback: &str,
        image_urls: Vec<String>,
    ) -> Result<NewRoute, ApiError> {
        let title = match self.title {
            Some(t) if !t.trim().is_empty() => t,
            _ => return Err(ApiError::Validation("Field 'title' is required".to_string())),
        };
        Ok(NewRoute {
            title,
            description: self.description.unwrap_or_default(),
            distance: self.distance.unwrap_or(0.0),
            duration: self.duration.unwrap_or(0.0),
            difficulty: self.difficulty.unwrap_or_default(),
            kind: self.kind.unwrap_or_default(),
            points: self.points.unwrap_or_default(),
            images: image_urls,
            tags: self.tags.unwrap_or_default(),
            author: self
                .author
                .filter(|a| !a.trim().is_empty())
                .unwrap_or_else(|| author_fallback.to_string()),
            featured: self.featured.unwrap_or(false),
        })
    }

    pub fn into_patch(self, image_urls: Option<Vec<String>>) -> RoutePatch {
        RoutePatch {
            title: self.title,
            description: self.description,
            distance: self.distance,
            duration: self.duration,
            difficulty: self.difficulty,
            kind: self.kind,
            points: self.points,
            images: image_urls,
            tags: self.tags,
            author: self.author,
            featured: self.featured,
        }
    }
}

/// GalleryForm
///
/// The decoded multipart submission of the gallery editor (the metadata path;
/// the bulk path uses [`BulkUploadForm`]).
#[derive(Debug, Default)]
pub struct GalleryForm {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub author: Option<String>,
    pub event: Option<String>,
    pub route: Option<String>,
    pub image: Option<UploadedFile>,
}

impl GalleryForm {
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = Self::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::Validation(format!("Malformed multipart body: {}", e)))?
        {
            let name = field.name().unwrap_or("").to_string();
            match name.as_str() {
                "image" => form.image = Some(UploadedFile::from_field(field).await?),
                "tags" => form.tags = Some(json_list(&text_of(field, "tags").await?, "tags")?),
                "title" => form.title = Some(text_of(field, "title").await?),
                "description" => form.description = Some(text_of(field, "description").await?),
                "author" => form.author = Some(text_of(field, "author").await?),
                "event" => form.event = Some(text_of(field, "event").await?),
                "route" => form.route = Some(text_of(field, "route").await?),
                _ => {}
            }
        }
        Ok(form)
    }

    pub fn into_new(self, author_fallback: &str, url: String) -> NewGalleryImage {
        NewGalleryImage {
            thumbnail: url.clone(),
            url,
            title: self.title.unwrap_or_default(),
            description: self.description,
            tags: self.tags.unwrap_or_default(),
            author: self
                .author
                .filter(|a| !a.trim().is_empty())
                .unwrap_or_else(|| author_fallback.to_string()),
            event: self.event,
            route: self.route,
        }
    }

    pub fn into_patch(self, url: Option<String>) -> GalleryPatch {
        GalleryPatch {
            thumbnail: url.clone(),
            url,
            title: self.title,
            description: self.description,
            tags: self.tags,
            event: self.event,
            route: self.route,
        }
    }
}

/// BulkUploadForm
///
/// The gallery bulk path: nothing but repeated `images` file parts. This is a
/// distinct contract from the metadata-bearing create path and the two must
/// not be merged; bulk skips per-image titles/descriptions/tags entirely.
#[derive(Debug, Default)]
pub struct BulkUploadForm {
    pub images: Vec<UploadedFile>,
}

impl BulkUploadForm {
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = Self::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::Validation(format!("Malformed multipart body: {}", e)))?
        {
            if field.name().unwrap_or("") == "images" {
                form.images.push(UploadedFile::from_field(field).await?);
            }
        }
        Ok(form)
    }
}

/// GpxUploadForm
///
/// The `/routes/parse-gpx` submission: one `gpx` file part.
#[derive(Debug, Default)]
pub struct GpxUploadForm {
    pub gpx: Option<UploadedFile>,
}

impl GpxUploadForm {
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = Self::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::Validation(format!("Malformed multipart body: {}", e)))?
        {
            if field.name().unwrap_or("") == "gpx" {
                form.gpx = Some(UploadedFile::from_field(field).await?);
            }
        }
        Ok(form)
    }
}
