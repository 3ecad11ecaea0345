use async_trait::async_trait;
use aws_sdk_s3 as s3;
use s3::primitives::ByteStream;
use std::sync::Arc;

// 1. StorageService Contract
/// StorageService
///
/// Defines the abstract contract for all interactions with the object storage
/// layer. This trait allows us to swap the concrete implementation — the real
/// S3 client (S3StorageClient) in production against the in-memory Mock
/// (MockStorageService) during testing — without affecting the calling handlers.
#[async_trait]
pub trait StorageService: Send + Sync {
    /// Ensures the configured bucket exists. Used primarily in the local setup
    /// to automatically provision the required bucket in MinIO. No-op in tests.
    async fn ensure_bucket_exists(&self);

    /// Stores one uploaded file under the given object key and returns the
    /// public URL the stored entity will reference.
    ///
    /// # Arguments
    /// * `key`: the final object key (prefix + filename) in the bucket.
    /// * `content_type`: the MIME type reported by the multipart field.
    /// * `bytes`: the raw file content received by the server.
    async fn put_object(
        &self,
        key: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, String>;
}

// 2. The Real Implementation (S3/MinIO)
/// S3StorageClient
///
/// The concrete implementation using the AWS SDK for S3. Due to S3
/// compatibility, this client transparently handles connections to a
/// Dockerized MinIO instance locally and any hosted S3 gateway in production.
///
/// `force_path_style(true)` is required for MinIO-style gateways, and it also
/// keeps the public URL shape predictable: `endpoint/bucket/key`.
#[derive(Clone)]
pub struct S3StorageClient {
    client: s3::Client,
    endpoint: String,
    bucket_name: String,
}

impl S3StorageClient {
    /// new
    ///
    /// Constructs the S3 client using credentials and configuration from AppConfig.
    pub async fn new(
        endpoint: &str,
        region: &str,
        access_key: &str,
        secret_key: &str,
        bucket: &str,
    ) -> Self {
        let credentials =
            s3::config::Credentials::new(access_key, secret_key, None, None, "static");

        let config = s3::Config::builder()
            .credentials_provider(credentials)
            .endpoint_url(endpoint)
            .region(s3::config::Region::new(region.to_string()))
            .behavior_version_latest()
            // Path-style addressing (http://endpoint/bucket/key) is required
            // for MinIO and S3-compatible API gateways.
            .force_path_style(true)
            .build();

        let client = s3::Client::from_conf(config);

        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            bucket_name: bucket.to_string(),
        }
    }
}

#[async_trait]
impl StorageService for S3StorageClient {
    /// ensure_bucket_exists
    ///
    /// Calls the S3 CreateBucket API. Since S3 APIs are idempotent, this only
    /// creates the bucket if it does not already exist. Safe to call at startup.
    async fn ensure_bucket_exists(&self) {
        let _ = self
            .client
            .create_bucket()
            .bucket(&self.bucket_name)
            .send()
            .await;
    }

    /// put_object
    ///
    /// Uploads the received bytes and derives the public path-style URL.
    async fn put_object(
        &self,
        key: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, String> {
        let key = sanitize_key(key);

        self.client
            .put_object()
            .bucket(&self.bucket_name)
            .key(&key)
            .content_type(content_type)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| e.to_string())?;

        Ok(format!("{}/{}/{}", self.endpoint, self.bucket_name, key))
    }
}

/// sanitize_key
///
/// Utility function to prevent path traversal attacks by removing directory
/// navigation components (e.g., `..`, `.`) from a user-provided key segment.
fn sanitize_key(key: &str) -> String {
    key.split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".." && *segment != ".")
        .collect::<Vec<_>>()
        .join("/")
}

// 3. The Mock Implementation (For Unit Tests)
/// MockStorageService
///
/// A mock implementation of `StorageService` used exclusively for unit and
/// integration testing. This lets the upload handlers run without a network
/// connection to S3, isolating the test boundary. Stored keys are kept in
/// memory so tests can assert on what was written.
#[derive(Clone, Default)]
pub struct MockStorageService {
    /// When true, all operations return a simulated failure.
    pub should_fail: bool,
    stored: Arc<std::sync::Mutex<Vec<String>>>,
}

impl MockStorageService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    /// Object keys written so far, in insertion order.
    pub fn stored_keys(&self) -> Vec<String> {
        self.stored.lock().expect("mock storage lock").clone()
    }
}

#[async_trait]
impl StorageService for MockStorageService {
    async fn ensure_bucket_exists(&self) {
        // No-op in mock environment.
    }

    async fn put_object(
        &self,
        key: &str,
        _content_type: &str,
        _bytes: Vec<u8>,
    ) -> Result<String, String> {
        if self.should_fail {
            return Err("Mock Storage Error: Simulation requested".to_string());
        }

        let sanitized_key = sanitize_key(key);
        self.stored
            .lock()
            .expect("mock storage lock")
            .push(sanitized_key.clone());

        // Deterministic, local-style URL for mock assertions.
        Ok(format!(
            "http://localhost:9000/mock-bucket/{}",
            sanitized_key
        ))
    }
}

/// StorageState
///
/// The concrete type used to share the storage service access across the application state.
pub type StorageState = Arc<dyn StorageService>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_traversal_segments() {
        assert_eq!(sanitize_key("news/../../etc/passwd"), "news/etc/passwd");
        assert_eq!(sanitize_key("./gallery//photo.jpg"), "gallery/photo.jpg");
    }

    #[tokio::test]
    async fn mock_records_stored_keys() {
        let mock = MockStorageService::new();
        let url = mock
            .put_object("gallery/a.jpg", "image/jpeg", vec![1, 2, 3])
            .await
            .expect("put failed");
        assert_eq!(url, "http://localhost:9000/mock-bucket/gallery/a.jpg");
        assert_eq!(mock.stored_keys(), vec!["gallery/a.jpg".to_string()]);
    }

    #[tokio::test]
    async fn failing_mock_simulates_storage_outage() {
        let mock = MockStorageService::new_failing();
        assert!(
            mock.put_object("k", "image/jpeg", vec![])
                .await
                .is_err()
        );
    }
}
