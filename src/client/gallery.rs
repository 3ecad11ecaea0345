use reqwest::multipart::{Form, Part};
use uuid::Uuid;

use super::http::{ApiClient, ClientError};
use super::payload::{FileAttachment, GalleryPayload};
use crate::models::GalleryImage;

/// GalleryClient
///
/// Typed CRUD wrapper for the gallery resource. The metadata-bearing `create`
/// path and the metadata-less `upload_bulk` path are separate contracts and
/// must not be merged.
#[derive(Clone)]
pub struct GalleryClient {
    api: ApiClient,
}

impl GalleryClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn get_all(&self) -> Result<Vec<GalleryImage>, ClientError> {
        self.api.get_json("/gallery").await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<GalleryImage, ClientError> {
        self.api.get_json(&format!("/gallery/{}", id)).await
    }

    pub async fn create(&self, payload: GalleryPayload) -> Result<GalleryImage, ClientError> {
        self.api
            .post_multipart("/gallery", payload.into_form()?)
            .await
    }

    pub async fn update(
        &self,
        id: Uuid,
        payload: GalleryPayload,
    ) -> Result<GalleryImage, ClientError> {
        self.api
            .put_multipart(&format!("/gallery/{}", id), payload.into_form()?)
            .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ClientError> {
        self.api.delete(&format!("/gallery/{}", id)).await
    }

    /// upload_bulk
    ///
    /// The bulk path: a plain list of files, each appended under the repeated
    /// `images` field name, with no per-file metadata.
    pub async fn upload_bulk(
        &self,
        files: Vec<FileAttachment>,
    ) -> Result<Vec<GalleryImage>, ClientError> {
        let mut form = Form::new();
        for file in files {
            form = form.part(
                "images",
                Part::bytes(file.bytes)
                    .file_name(file.file_name)
                    .mime_str(&file.content_type)?,
            );
        }
        self.api.post_multipart("/gallery/bulk", form).await
    }
}
