use bike_unity_portal::{
    AppConfig, AppState, MockStorageService, create_router,
    client::{ApiClient, AuthClient, ClientError, NewsClient, NewsPayload},
    models::LoginRequest,
    repository::{RepositoryState, SqliteRepository},
    storage::StorageState,
};
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;
use tokio::net::TcpListener;
use uuid::Uuid;

struct TestApp {
    address: String,
    pool: sqlx::SqlitePool,
}

async fn spawn_app() -> TestApp {
    let db_url = format!(
        "sqlite:{}/bike-unity-test-{}.db?mode=rwc",
        std::env::temp_dir().display(),
        Uuid::new_v4()
    );

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&db_url)
        .await
        .expect("Failed to open the test database");

    let repo = SqliteRepository::new(pool.clone());
    repo.migrate().await.expect("Failed to apply schema");

    let state = AppState {
        repo: Arc::new(repo) as RepositoryState,
        storage: Arc::new(MockStorageService::new()) as StorageState,
        config: AppConfig::default(),
    };
    let router = create_router(state);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    TestApp { address, pool }
}

async fn register(app: &TestApp, email: &str, password: &str) {
    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{}/auth/register", app.address))
        .json(&serde_json::json!({ "email": email, "password": password, "name": "Райдер" }))
        .send()
        .await
        .expect("register request failed");
    assert_eq!(resp.status(), 200);
}

fn credentials(email: &str, password: &str) -> LoginRequest {
    LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    }
}

#[tokio::test]
async fn login_then_current_user_returns_the_same_account() {
    let app = spawn_app().await;
    register(&app, "a@b.com", "secret1").await;

    let api = ApiClient::new(app.address.clone());
    let auth = AuthClient::new(api);
    assert!(!auth.is_authenticated());

    let profile = auth
        .login(&credentials("a@b.com", "secret1"))
        .await
        .expect("login failed");
    assert!(auth.is_authenticated());

    let me = auth.current_user().await.expect("no current user");
    assert_eq!(me.id, profile.id);
    assert_eq!(me.email, "a@b.com");
}

#[tokio::test]
async fn invalid_credentials_are_indistinguishable() {
    let app = spawn_app().await;
    register(&app, "a@b.com", "secret1").await;

    let api = ApiClient::new(app.address.clone());
    let auth = AuthClient::new(api);

    // Unknown email.
    let unknown = auth
        .login(&credentials("nobody@b.com", "secret1"))
        .await
        .unwrap_err();
    // Wrong password for an existing account.
    let wrong = auth
        .login(&credentials("a@b.com", "wrong-password"))
        .await
        .unwrap_err();

    let unknown_msg = match &unknown {
        ClientError::Api { status, message } => {
            assert_eq!(status.as_u16(), 400);
            message.clone()
        }
        other => panic!("expected Api error, got {:?}", other),
    };
    let wrong_msg = match &wrong {
        ClientError::Api { message, .. } => message.clone(),
        other => panic!("expected Api error, got {:?}", other),
    };

    // Byte-identical messages: no account-existence leakage.
    assert_eq!(unknown_msg, wrong_msg);
    assert_eq!(unknown_msg, "Invalid email or password");

    // No token was stored on either failure.
    assert!(!auth.is_authenticated());
}

#[tokio::test]
async fn duplicate_registration_fails_and_the_first_account_survives() {
    let app = spawn_app().await;
    register(&app, "a@b.com", "secret1").await;

    // Second registration with the same email, different password.
    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{}/auth/register", app.address))
        .json(&serde_json::json!({ "email": "a@b.com", "password": "other-password" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    // The original credentials still log in.
    let api = ApiClient::new(app.address.clone());
    let auth = AuthClient::new(api);
    assert!(auth.login(&credentials("a@b.com", "secret1")).await.is_ok());
}

#[tokio::test]
async fn a_rejected_token_is_cleared_from_the_session() {
    let app = spawn_app().await;
    let api = ApiClient::new(app.address.clone());
    let auth = AuthClient::new(api.clone());
    let news = NewsClient::new(api.clone());

    // A tampered token passes the local presence check...
    api.session().set("tampered-token".to_string());
    assert!(auth.is_authenticated());

    // ...until the next call fails with 401 and triggers the teardown.
    let err = news
        .create(NewsPayload {
            title: Some("Попытка".to_string()),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::AuthExpired));

    assert!(!api.session().is_present());
    assert!(!auth.is_authenticated());
}

#[tokio::test]
async fn logout_is_idempotent() {
    let app = spawn_app().await;
    register(&app, "a@b.com", "secret1").await;

    let api = ApiClient::new(app.address.clone());
    let auth = AuthClient::new(api);

    auth.login(&credentials("a@b.com", "secret1"))
        .await
        .expect("login failed");
    assert!(auth.is_authenticated());

    auth.logout();
    assert!(!auth.is_authenticated());
    // Logging out while already unauthenticated is not an error.
    auth.logout();
    assert!(!auth.is_authenticated());
}

#[tokio::test]
async fn vanished_account_yields_no_current_user_but_keeps_the_token() {
    let app = spawn_app().await;
    register(&app, "gone@b.com", "secret1").await;

    let api = ApiClient::new(app.address.clone());
    let auth = AuthClient::new(api.clone());
    auth.login(&credentials("gone@b.com", "secret1"))
        .await
        .expect("login failed");

    // Delete the account out from under the valid token.
    sqlx::query("DELETE FROM users WHERE email = ?")
        .bind("gone@b.com")
        .execute(&app.pool)
        .await
        .unwrap();

    // /auth/me answers 404, which current_user flattens to None. A 404 is not
    // a 401: the token itself was not rejected, so it stays in the store.
    assert!(auth.current_user().await.is_none());
    assert!(auth.is_authenticated());
}
