use bike_unity_portal::{
    AppConfig, AppState, MockStorageService, create_router,
    models::{LoginResponse, NewsItem, UserProfile},
    repository::{RepositoryState, SqliteRepository},
    storage::StorageState,
};
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;
use tokio::net::TcpListener;
use uuid::Uuid;

#[derive(Debug)]
pub struct TestApp {
    pub address: String,
    pub pool: sqlx::SqlitePool,
}

async fn spawn_app() -> TestApp {
    // Every test gets its own throwaway database file.
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

/// Registers an account and returns the session token from a fresh login.
async fn register_and_login(app: &TestApp, email: &str, password: &str) -> String {
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{}/auth/register", app.address))
        .json(&serde_json::json!({ "email": email, "password": password, "name": "Тест" }))
        .send()
        .await
        .expect("register request failed");
    assert_eq!(resp.status(), 200);

    let resp = client
        .post(format!("{}/auth/login", app.address))
        .json(&serde_json::json!({ "email": email, "password": password }))
        .send()
        .await
        .expect("login request failed");
    assert_eq!(resp.status(), 200);

    let body: LoginResponse = resp.json().await.unwrap();
    body.token
}

#[tokio::test]
async fn test_health_check() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let response = client
        .get(format!("{}/health", app.address))
        .send()
        .await
        .expect("req fail");
    assert!(response.status().is_success());
}

#[tokio::test]
async fn test_register_login_me_roundtrip() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let token = register_and_login(&app, "rider@test.com", "secret1").await;

    let resp = client
        .get(format!("{}/auth/me", app.address))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let me: UserProfile = resp.json().await.unwrap();
    assert_eq!(me.email, "rider@test.com");
    assert_eq!(me.name, "Тест");
    assert_eq!(me.role, "user");
}

#[tokio::test]
async fn test_registration_never_stores_a_submitted_role() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    // The payload asks for admin; the stored account must still be 'user'.
    let resp = client
        .post(format!("{}/auth/register", app.address))
        .json(&serde_json::json!({
            "email": "sneaky@test.com", "password": "secret1", "role": "admin"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let profile: UserProfile = resp.json().await.unwrap();
    assert_eq!(profile.role, "user");
}

#[tokio::test]
async fn test_news_lifecycle() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let token = register_and_login(&app, "editor@test.com", "secret1").await;

    // Create: scalars as text parts, tags as one JSON part, image as a file part.
    let form = reqwest::multipart::Form::new()
        .text("title", "Открытие сезона")
        .text("content", "Мы рады объявить о начале нового сезона!")
        .text("category", "Новости")
        .text("type", "news")
        .text("tags", r#"["сезон","открытие"]"#)
        .part(
            "image",
            reqwest::multipart::Part::bytes(vec![0xFF, 0xD8, 0xFF])
                .file_name("cover.jpg")
                .mime_str("image/jpeg")
                .unwrap(),
        );

    let resp = client
        .post(format!("{}/news", app.address))
        .bearer_auth(&token)
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let created: NewsItem = resp.json().await.unwrap();
    assert_eq!(created.tags, vec!["сезон", "открытие"]);
    assert!(created.image.contains("/news/"));
    assert_eq!(created.views, 0);

    // The listing reflects the server-confirmed entity.
    let list: Vec<NewsItem> = client
        .get(format!("{}/news", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(list.iter().any(|item| item.id == created.id));

    // Partial update: only the title changes.
    let form = reqwest::multipart::Form::new().text("title", "Сезон открыт");
    let resp = client
        .put(format!("{}/news/{}", app.address, created.id))
        .bearer_auth(&token)
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let updated: NewsItem = resp.json().await.unwrap();
    assert_eq!(updated.title, "Сезон открыт");
    assert_eq!(updated.content, created.content);
    assert_eq!(updated.tags, created.tags);

    // Delete, then the detail route answers 404.
    let resp = client
        .delete(format!("{}/news/{}", app.address, created.id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 204);

    let resp = client
        .get(format!("{}/news/{}", app.address, created.id))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn test_news_detail_increments_views() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let token = register_and_login(&app, "views@test.com", "secret1").await;

    let form = reqwest::multipart::Form::new().text("title", "Счётчик");
    let created: NewsItem = client
        .post(format!("{}/news", app.address))
        .bearer_auth(&token)
        .multipart(form)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let first: NewsItem = client
        .get(format!("{}/news/{}", app.address, created.id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let second: NewsItem = client
        .get(format!("{}/news/{}", app.address, created.id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(first.views, 1);
    assert_eq!(second.views, 2);
}

#[tokio::test]
async fn test_mutations_require_a_token() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let form = reqwest::multipart::Form::new().text("title", "Аноним");
    let resp = client
        .post(format!("{}/news", app.address))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);

    // Public reads stay open.
    let resp = client
        .get(format!("{}/news", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn test_admin_stats_enforces_the_role() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let token = register_and_login(&app, "user@test.com", "secret1").await;

    let resp = client
        .get(format!("{}/admin/stats", app.address))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 403);

    // Promote the account directly in the store, then log in again so the
    // fresh token carries the admin role claim.
    sqlx::query("UPDATE users SET role = 'admin' WHERE email = ?")
        .bind("user@test.com")
        .execute(&app.pool)
        .await
        .unwrap();

    let resp = client
        .post(format!("{}/auth/login", app.address))
        .json(&serde_json::json!({ "email": "user@test.com", "password": "secret1" }))
        .send()
        .await
        .unwrap();
    let body: LoginResponse = resp.json().await.unwrap();

    let resp = client
        .get(format!("{}/admin/stats", app.address))
        .bearer_auth(&body.token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let stats: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(stats["total_users"], 1);
}
