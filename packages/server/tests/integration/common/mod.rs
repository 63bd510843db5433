use std::net::SocketAddr;
use std::sync::Arc;

use community::DbIdentityProvider;
use community::entity::user;
use reqwest::Client;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};
use serde_json::{Value, json};

use server::config::{
    AppConfig, AuthConfig, CommunityConfig, CorsConfig, DatabaseConfig, ServerConfig,
};
use server::state::AppState;
use server::utils::jwt;

pub const JWT_SECRET: &str = "test-secret-for-integration-tests";

pub mod routes {
    pub const POSTS: &str = "/api/v1/community/posts";

    pub fn posts_page(page: u64, limit: u64) -> String {
        format!("/api/v1/community/posts?page={page}&limit={limit}")
    }

    pub fn post(id: &str) -> String {
        format!("/api/v1/community/posts/{id}")
    }

    pub fn post_update(id: &str) -> String {
        format!("/api/v1/community/posts/{id}/update")
    }

    pub fn post_delete(id: &str) -> String {
        format!("/api/v1/community/posts/{id}/delete")
    }

    pub fn comments(post_id: &str) -> String {
        format!("/api/v1/community/posts/{post_id}/comments")
    }

    pub fn comment(post_id: &str, comment_id: &str) -> String {
        format!("/api/v1/community/posts/{post_id}/comments/{comment_id}")
    }

    pub fn like(post_id: &str) -> String {
        format!("/api/v1/community/posts/{post_id}/like")
    }

    pub fn user(id: &str) -> String {
        format!("/api/v1/community/users/{id}")
    }

    pub fn follow(id: &str) -> String {
        format!("/api/v1/community/users/{id}/follow")
    }
}

/// A running test server.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub db: DatabaseConnection,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    /// Raw response body as text.
    pub text: String,
    /// Parsed JSON body, or `Null` if the response is not valid JSON.
    pub body: Value,
}

impl TestResponse {
    async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let text = res.text().await.expect("Failed to read response body");
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Self { status, text, body }
    }
}

fn test_config(community: CommunityConfig) -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors: CorsConfig {
                allow_origins: vec![],
                max_age: 3600,
            },
        },
        database: DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
        },
        auth: AuthConfig {
            jwt_secret: JWT_SECRET.to_string(),
        },
        community,
    }
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(CommunityConfig::default()).await
    }

    /// Spawn with the community feature switched off.
    pub async fn spawn_disabled() -> Self {
        Self::spawn_with(CommunityConfig {
            enabled: false,
            ..Default::default()
        })
        .await
    }

    pub async fn spawn_with(community: CommunityConfig) -> Self {
        // One connection so every query sees the same in-memory database.
        let mut opts = ConnectOptions::new("sqlite::memory:");
        opts.max_connections(1).min_connections(1).sqlx_logging(false);
        let db = Database::connect(opts)
            .await
            .expect("Failed to open in-memory database");
        community::schema::sync_schema(&db)
            .await
            .expect("Failed to create schema");

        let identity = Arc::new(DbIdentityProvider::new(db.clone()));
        let state = AppState::new(db.clone(), identity, test_config(community));
        let app = server::build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            client: Client::new(),
            db,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn post_with_token(&self, path: &str, body: &Value, token: &str) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .header("Authorization", format!("Bearer {token}"))
            .json(body)
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn post_raw_with_token(&self, path: &str, body: &str, token: &str) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .header("Authorization", format!("Bearer {token}"))
            .header("Content-Type", "application/json")
            .body(body.to_string())
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn get_with_token(&self, path: &str, token: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .header("Authorization", format!("Bearer {token}"))
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    pub async fn get_without_token(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    pub async fn delete_with_token(&self, path: &str, token: &str) -> TestResponse {
        let res = self
            .client
            .delete(self.url(path))
            .header("Authorization", format!("Bearer {token}"))
            .send()
            .await
            .expect("Failed to send DELETE request");

        TestResponse::from_response(res).await
    }

    /// Insert a user with `role` and return a signed token for them.
    pub async fn create_user_with_role(&self, id: &str, role: &str) -> String {
        user::ActiveModel {
            id: Set(id.to_string()),
            name: Set(format!("{id} name")),
            email: Set(format!("{id}@example.com")),
            role: Set(role.to_string()),
            profile_image_url: Set(None),
            created_at: Set(community::time::current_time_ns()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .expect("Failed to insert user");

        jwt::sign(id, role, JWT_SECRET).expect("Failed to sign token")
    }

    /// Insert a verified member and return their token.
    pub async fn create_member(&self, id: &str) -> String {
        self.create_user_with_role(id, "user").await
    }

    /// Publish a post and return its id.
    pub async fn create_post(&self, token: &str, content: &str) -> String {
        let res = self
            .post_with_token(routes::POSTS, &json!({"content": content}), token)
            .await;
        assert_eq!(res.status, 201, "Post creation failed: {}", res.text);
        res.body["id"]
            .as_str()
            .expect("Post response missing id")
            .to_string()
    }
}
