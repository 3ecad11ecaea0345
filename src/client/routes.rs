use reqwest::multipart::Form;
use uuid::Uuid;

use super::http::{ApiClient, ClientError};
use super::payload::{FileAttachment, RoutePayload};
use crate::models::{BikeRoute, GpxParseResponse, RoutePoint};

/// RoutesClient
///
/// Typed CRUD wrapper for the cycling-route resource, plus the GPX parse
/// utility the route editor uses to seed its track map.
#[derive(Clone)]
pub struct RoutesClient {
    api: ApiClient,
}

impl RoutesClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn get_all(&self) -> Result<Vec<BikeRoute>, ClientError> {
        self.api.get_json("/routes").await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<BikeRoute, ClientError> {
        self.api.get_json(&format!("/routes/{}", id)).await
    }

    pub async fn create(&self, payload: RoutePayload) -> Result<BikeRoute, ClientError> {
        self.api
            .post_multipart("/routes", payload.into_form()?)
            .await
    }

    pub async fn update(&self, id: Uuid, payload: RoutePayload) -> Result<BikeRoute, ClientError> {
        self.api
            .put_multipart(&format!("/routes/{}", id), payload.into_form()?)
            .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ClientError> {
        self.api.delete(&format!("/routes/{}", id)).await
    }

    /// parse_gpx
    ///
    /// Uploads one track file and returns the extracted coordinate list
    /// without creating a route.
    pub async fn parse_gpx(&self, file: FileAttachment) -> Result<Vec<RoutePoint>, ClientError> {
        let form = Form::new().part(
            "gpx",
            reqwest::multipart::Part::bytes(file.bytes)
                .file_name(file.file_name)
                .mime_str(&file.content_type)?,
        );
        let response: GpxParseResponse = self.api.post_multipart("/routes/parse-gpx", form).await?;
        Ok(response.points)
    }
}
