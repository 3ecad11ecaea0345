use std::env;

/// AppConfig
///
/// Holds the application's entire configuration state. This struct is designed to be
/// immutable once loaded, ensuring consistency across all threads and services
/// (Repository, Storage, token issuance). It is pulled into the application state
/// via FromRef, embodying the "immutable AppConfig" part of the Unified State Pattern.
#[derive(Clone)]
pub struct AppConfig {
    // SQLite connection string (the club portal keeps a single database file).
    pub db_url: String,
    // TCP port the HTTP server binds to.
    pub port: u16,
    // S3-compatible storage endpoint URL (MinIO in local, hosted S3 in prod).
    pub s3_endpoint: String,
    // S3 region (often a stub for local setups).
    pub s3_region: String,
    // Access Key ID for S3-compatible storage.
    pub s3_key: String,
    // Secret Access Key for S3-compatible storage.
    pub s3_secret: String,
    // The bucket name used for all media uploads (news images, route photos, gallery).
    pub s3_bucket: String,
    // Runtime environment marker. Controls log format selection.
    pub env: Env,
    // Secret key used to sign and validate session tokens.
    pub jwt_secret: String,
}

/// Env
///
/// Defines the runtime context, used to switch between development conveniences
/// (MinIO defaults, pretty logs) and production-grade infrastructure (explicit
/// secrets, JSON logs).
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

impl Default for AppConfig {
    /// default
    ///
    /// Provides a safe, non-panicking AppConfig instance primarily used for test setup.
    /// This allows us to instantiate the configuration without needing to set environment
    /// variables for lightweight unit or integration testing state scaffolding.
    fn default() -> Self {
        Self {
            db_url: "sqlite::memory:".to_string(),
            port: 3001,
            // Default MinIO credentials for local/testing convenience.
            s3_endpoint: "http://localhost:9000".to_string(),
            s3_region: "us-east-1".to_string(),
            s3_key: "admin".to_string(),
            s3_secret: "password".to_string(),
            s3_bucket: "bike-unity-test".to_string(),
            env: Env::Local,
            jwt_secret: "super-secure-test-secret-value-local".to_string(),
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// The canonical function for initializing the application configuration at startup.
    /// It reads all parameters from environment variables and implements the fail-fast
    /// principle.
    ///
    /// # Panics
    /// Panics if a critical environment variable required for the current runtime
    /// environment (especially Production) is not found. This prevents the application
    /// from starting with an incomplete or insecure configuration.
    pub fn load() -> Self {
        let env_str = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        let env = match env_str.as_str() {
            "production" => Env::Production,
            _ => Env::Local,
        };

        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3001);

        // JWT Secret Resolution
        // The production secret is mandatory and must be explicitly set.
        let jwt_secret = match env {
            Env::Production => {
                env::var("JWT_SECRET").expect("FATAL: JWT_SECRET must be set in production.")
            }
            // In local, we provide a fallback, though the developer should ideally set one.
            _ => env::var("JWT_SECRET")
                .unwrap_or_else(|_| "super-secure-test-secret-value-local".to_string()),
        };

        match env {
            Env::Local => Self {
                env: Env::Local,
                // Local default keeps the database file next to the binary.
                db_url: env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "sqlite:bike_unity.db?mode=rwc".to_string()),
                port,
                // Local storage (MinIO) uses hardcoded or known default credentials.
                s3_endpoint: "http://localhost:9000".to_string(),
                s3_region: "us-east-1".to_string(),
                s3_key: "admin".to_string(),
                s3_secret: "password".to_string(),
                s3_bucket: "bike-unity-uploads".to_string(),
                jwt_secret,
            },
            Env::Production => Self {
                env: Env::Production,
                // Production environment demands explicit setting of all infrastructure secrets.
                db_url: env::var("DATABASE_URL").expect("FATAL: DATABASE_URL required in prod"),
                port,
                s3_endpoint: env::var("S3_ENDPOINT").expect("FATAL: S3_ENDPOINT required in prod"),
                s3_region: env::var("S3_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
                s3_key: env::var("S3_ACCESS_KEY").expect("FATAL: S3_ACCESS_KEY required in prod"),
                s3_secret: env::var("S3_SECRET_KEY")
                    .expect("FATAL: S3_SECRET_KEY required in prod"),
                s3_bucket: env::var("S3_BUCKET_NAME")
                    .unwrap_or_else(|_| "bike-unity-uploads".to_string()),
                jwt_secret,
            },
        }
    }
}
