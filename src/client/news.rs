use uuid::Uuid;

use super::http::{ApiClient, ClientError};
use super::payload::NewsPayload;
use crate::models::NewsItem;

/// NewsClient
///
/// Typed CRUD wrapper for the news resource. Every method returns the
/// canonical server-confirmed entity; callers replace their local copy with
/// the response rather than merging. Failures propagate untouched, with no
/// retries and no suppression; the admin panel owns user-facing reporting.
#[derive(Clone)]
pub struct NewsClient {
    api: ApiClient,
}

impl NewsClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn get_all(&self) -> Result<Vec<NewsItem>, ClientError> {
        self.api.get_json("/news").await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<NewsItem, ClientError> {
        self.api.get_json(&format!("/news/{}", id)).await
    }

    pub async fn create(&self, payload: NewsPayload) -> Result<NewsItem, ClientError> {
        self.api.post_multipart("/news", payload.into_form()?).await
    }

    pub async fn update(&self, id: Uuid, payload: NewsPayload) -> Result<NewsItem, ClientError> {
        self.api
            .put_multipart(&format!("/news/{}", id), payload.into_form()?)
            .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ClientError> {
        self.api.delete(&format!("/news/{}", id)).await
    }
}
