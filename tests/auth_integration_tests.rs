use axum::{
    extract::{FromRef, FromRequestParts},
    http::{Method, Request, StatusCode, Uri, header, request::Parts},
};
use bike_unity_portal::{
    AppConfig,
    auth::{AuthUser, Claims},
};
use jsonwebtoken::{EncodingKey, Header, encode};
use std::time::SystemTime;
use uuid::Uuid;

// --- Test State ---

// The extractor only needs the configuration (for the signing secret), so the
// test state carries nothing else.
#[derive(Clone)]
struct TestState {
    config: AppConfig,
}

impl FromRef<TestState> for AppConfig {
    fn from_ref(state: &TestState) -> AppConfig {
        state.config.clone()
    }
}

// --- Helper Functions ---

const TEST_JWT_SECRET: &str = "test-secret-value-1234567890";
const TEST_USER_ID: Uuid = Uuid::from_u128(1);

fn create_token(user_id: Uuid, role: &str, exp_offset: i64, secret: &str) -> String {
    let now = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64;

    let claims = Claims {
        sub: user_id,
        email: "rider@test.com".to_string(),
        role: role.to_string(),
        iat: now as usize,
        // Token expires exp_offset seconds from now (may be in the past).
        exp: (now + exp_offset) as usize,
    };

    let key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), &claims, &key).unwrap()
}

fn test_state() -> TestState {
    let mut config = AppConfig::default();
    config.jwt_secret = TEST_JWT_SECRET.to_string();
    TestState { config }
}

/// Helper to get the mutable Parts struct from a generated Request.
fn get_request_parts(method: Method, uri: Uri) -> Parts {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap();
    let (parts, _) = request.into_parts();
    parts
}

fn with_bearer(token: &str) -> Parts {
    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap());
    parts.headers.insert(
        header::AUTHORIZATION,
        header::HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
    );
    parts
}

// --- Tests ---

#[tokio::test]
async fn test_auth_success_with_valid_jwt() {
    let token = create_token(TEST_USER_ID, "user", 3600, TEST_JWT_SECRET);
    let state = test_state();
    let mut parts = with_bearer(&token);

    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await;

    assert!(auth_user.is_ok());
    let user = auth_user.unwrap();
    assert_eq!(user.id, TEST_USER_ID);
    assert_eq!(user.email, "rider@test.com");
    assert_eq!(user.role, "user");
}

#[tokio::test]
async fn test_auth_failure_with_missing_header() {
    let state = test_state();
    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap());

    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await;

    assert!(auth_user.is_err());
    assert_eq!(auth_user.unwrap_err(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_auth_failure_with_expired_jwt() {
    // Expired one hour ago.
    let token = create_token(TEST_USER_ID, "user", -3600, TEST_JWT_SECRET);
    let state = test_state();
    let mut parts = with_bearer(&token);

    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await;

    assert!(auth_user.is_err());
    assert_eq!(auth_user.unwrap_err(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_auth_failure_with_wrong_secret() {
    let token = create_token(TEST_USER_ID, "user", 3600, "some-other-secret");
    let state = test_state();
    let mut parts = with_bearer(&token);

    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await;

    assert!(auth_user.is_err());
    assert_eq!(auth_user.unwrap_err(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_auth_failure_with_garbage_token() {
    let state = test_state();
    let mut parts = with_bearer("definitely-not-a-jwt");

    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await;

    assert!(auth_user.is_err());
    assert_eq!(auth_user.unwrap_err(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_auth_failure_without_bearer_prefix() {
    let token = create_token(TEST_USER_ID, "user", 3600, TEST_JWT_SECRET);
    let state = test_state();

    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap());
    parts.headers.insert(
        header::AUTHORIZATION,
        header::HeaderValue::from_str(&token).unwrap(),
    );

    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await;

    assert!(auth_user.is_err());
    assert_eq!(auth_user.unwrap_err(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_role_claim_round_trips() {
    let token = create_token(TEST_USER_ID, "admin", 3600, TEST_JWT_SECRET);
    let state = test_state();
    let mut parts = with_bearer(&token);

    let user = AuthUser::from_request_parts(&mut parts, &state)
        .await
        .expect("valid token");
    assert_eq!(user.role, "admin");
}
