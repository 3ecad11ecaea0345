use reqwest::multipart::{Form, Part};

use super::http::ClientError;
use crate::models::{BikeRoute, GalleryImage, NewsItem, RoutePoint};

/// FileAttachment
///
/// One binary file selected in an editor, before multipart encoding.
#[derive(Debug, Clone, Default)]
pub struct FileAttachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl FileAttachment {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    fn into_part(self) -> Result<Part, ClientError> {
        Ok(Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(&self.content_type)?)
    }
}

fn json_text(form: Form, name: &'static str, value: &impl serde::Serialize) -> Form {
    form.text(
        name,
        serde_json::to_string(value).unwrap_or_else(|_| "[]".to_string()),
    )
}

// The three payload builders below enumerate the full serialization contract
// per resource: which fields travel as plain text parts, which as a single
// JSON-encoded part, and which as file parts. No runtime type sniffing.
// `None` fields are omitted from the form entirely, which is what makes
// updates partial.

/// NewsPayload
///
/// The news editor's submission. One optional cover image under the singular
/// field name `image`; `tags` as one JSON-encoded part; everything else text.
#[derive(Debug, Clone, Default)]
pub struct NewsPayload {
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
    pub image: Option<FileAttachment>,
}

impl NewsPayload {
    pub fn into_form(self) -> Result<Form, ClientError> {
        let mut form = Form::new();
        if let Some(v) = self.title {
            form = form.text("title", v);
        }
        if let Some(v) = self.content {
            form = form.text("content", v);
        }
        if let Some(v) = self.excerpt {
            form = form.text("excerpt", v);
        }
        if let Some(v) = self.author {
            form = form.text("author", v);
        }
        if let Some(v) = self.date {
            form = form.text("date", v);
        }
        if let Some(v) = self.category {
            form = form.text("category", v);
        }
        if let Some(v) = self.kind {
            form = form.text("type", v);
        }
        if let Some(v) = &self.tags {
            form = json_text(form, "tags", v);
        }
        if let Some(v) = self.featured {
            form = form.text("featured", v.to_string());
        }
        if let Some(v) = self.location {
            form = form.text("location", v);
        }
        if let Some(v) = self.participants {
            form = form.text("participants", v.to_string());
        }
        if let Some(v) = self.difficulty {
            form = form.text("difficulty", v);
        }
        if let Some(file) = self.image {
            form = form.part("image", file.into_part()?);
        }
        Ok(form)
    }
}

impl From<&NewsItem> for NewsPayload {
    /// Pre-populates the editor form from an existing entity (edit mode).
    /// File attachments never round-trip: the stored image stays unless the
    /// editor picks a new file.
    fn from(item: &NewsItem) -> Self {
        Self {
            title: Some(item.title.clone()),
            content: Some(item.content.clone()),
            excerpt: Some(item.excerpt.clone()),
            author: Some(item.author.clone()),
            date: Some(item.date.clone()),
            category: Some(item.category.clone()),
            kind: Some(item.kind.clone()),
            tags: Some(item.tags.clone()),
            featured: Some(item.featured),
            location: item.location.clone(),
            participants: item.participants,
            difficulty: item.difficulty.clone(),
            image: None,
        }
    }
}

/// RoutePayload
///
/// The route editor's submission. All photos share the one repeated `images`
/// field name; `points` and `tags` are JSON-encoded parts; an optional track
/// file travels under `gpx`.
#[derive(Debug, Clone, Default)]
pub struct RoutePayload {
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
    pub images: Vec<FileAttachment>,
    pub gpx: Option<FileAttachment>,
}

impl RoutePayload {
    pub fn into_form(self) -> Result<Form, ClientError> {
        let mut form = Form::new();
        if let Some(v) = self.title {
            form = form.text("title", v);
        }
        if let Some(v) = self.description {
            form = form.text("description", v);
        }
        if let Some(v) = self.distance {
            form = form.text("distance", v.to_string());
        }
        if let Some(v) = self.duration {
            form = form.text("duration", v.to_string());
        }
        if let Some(v) = self.difficulty {
            form = form.text("difficulty", v);
        }
        if let Some(v) = self.kind {
            form = form.text("type", v);
        }
        if let Some(v) = &self.points {
            form = json_text(form, "points", v);
        }
        if let Some(v) = &self.tags {
            form = json_text(form, "tags", v);
        }
        if let Some(v) = self.author {
            form = form.text("author", v);
        }
        if let Some(v) = self.featured {
            form = form.text("featured", v.to_string());
        }
        for file in self.images {
            form = form.part("images", file.into_part()?);
        }
        if let Some(file) = self.gpx {
            form = form.part("gpx", file.into_part()?);
        }
        Ok(form)
    }
}

impl From<&BikeRoute> for RoutePayload {
    fn from(route: &BikeRoute) -> Self {
        Self {
            title: Some(route.title.clone()),
            description: Some(route.description.clone()),
            distance: Some(route.distance),
            duration: Some(route.duration),
            difficulty: Some(route.difficulty.clone()),
            kind: Some(route.kind.clone()),
            points: Some(route.points.clone()),
            tags: Some(route.tags.clone()),
            author: Some(route.author.clone()),
            featured: Some(route.featured),
            images: vec![],
            gpx: None,
        }
    }
}

/// GalleryPayload
///
/// The gallery editor's metadata-bearing submission: one image file under
/// `image` plus title/description/tags. The bulk path has no builder: it is
/// a plain file list with nothing to enumerate.
#[derive(Debug, Clone, Default)]
pub struct GalleryPayload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub author: Option<String>,
    pub event: Option<String>,
    pub route: Option<String>,
    pub image: Option<FileAttachment>,
}

impl GalleryPayload {
    pub fn into_form(self) -> Result<Form, ClientError> {
        let mut form = Form::new();
        if let Some(v) = self.title {
            form = form.text("title", v);
        }
        if let Some(v) = self.description {
            form = form.text("description", v);
        }
        if let Some(v) = &self.tags {
            form = json_text(form, "tags", v);
        }
        if let Some(v) = self.author {
            form = form.text("author", v);
        }
        if let Some(v) = self.event {
            form = form.text("event", v);
        }
        if let Some(v) = self.route {
            form = form.text("route", v);
        }
        if let Some(file) = self.image {
            form = form.part("image", file.into_part()?);
        }
        Ok(form)
    }
}

impl From<&GalleryImage> for GalleryPayload {
    fn from(image: &GalleryImage) -> Self {
        Self {
            title: Some(image.title.clone()),
            description: image.description.clone(),
            tags: Some(image.tags.clone()),
            author: Some(image.author.clone()),
            event: image.event.clone(),
            route: image.route.clone(),
            image: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_prefill_copies_fields_but_never_files() {
        let item = NewsItem {
            title: "Весенний велопробег".to_string(),
            tags: vec!["велопробег".to_string(), "весна".to_string()],
            image: "http://localhost:9000/bucket/news/cover.jpg".to_string(),
            ..Default::default()
        };
        let payload = NewsPayload::from(&item);
        assert_eq!(payload.title.as_deref(), Some("Весенний велопробег"));
        assert_eq!(payload.tags.as_ref().map(Vec::len), Some(2));
        // The stored image URL is not a file attachment.
        assert!(payload.image.is_none());
    }

    #[test]
    fn empty_payload_builds_an_empty_form() {
        // An all-None payload must serialize to a form with no parts, which is
        // what makes a no-op update leave the entity untouched.
        assert!(NewsPayload::default().into_form().is_ok());
        assert!(RoutePayload::default().into_form().is_ok());
        assert!(GalleryPayload::default().into_form().is_ok());
    }
}
