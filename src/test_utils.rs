//! Test utilities for CLI testing
//!
//! Provides a mock JSON API server (JSONPlaceholder-shaped) and test
//! helpers for integration testing.

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

/// Mock server state
#[derive(Debug, Clone)]
pub struct MockServerState {
    /// Stored posts, served by `/posts` and `/posts/:id`
    pub posts: Arc<Mutex<Vec<Value>>>,
    /// Id assigned to the next created resource
    pub next_id: Arc<Mutex<u64>>,
}

impl Default for MockServerState {
    fn default() -> Self {
        let posts = vec![
            json!({"userId": 1, "id": 1, "title": "first post", "body": "hello"}),
            json!({"userId": 1, "id": 2, "title": "second post", "body": "world"}),
            json!({"userId": 2, "id": 3, "title": "third post", "body": "again"}),
        ];

        Self {
            posts: Arc::new(Mutex::new(posts)),
            next_id: Arc::new(Mutex::new(101)),
        }
    }
}

/// Mock JSON API server
#[derive(Debug, Default)]
pub struct MockServer {
    state: MockServerState,
    port: u16,
}

impl MockServer {
    /// Create a new mock server
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the mock server and return the base URL
    pub async fn start(mut self) -> Result<(Self, String)> {
        let app = self.create_router();

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        self.port = addr.port();

        let base_url = format!("http://127.0.0.1:{}", self.port);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("Mock server error: {}", e);
            }
        });

        // Give the server a moment to start and verify it's running
        for _ in 0..20 {
            tokio::time::sleep(Duration::from_millis(20)).await;
            if tokio::net::TcpStream::connect(("127.0.0.1", self.port))
                .await
                .is_ok()
            {
                break;
            }
        }

        Ok((self, base_url))
    }

    /// Get the server port
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Get a reference to the server state
    pub fn state(&self) -> &MockServerState {
        &self.state
    }

    /// Create the mock server router
    fn create_router(&self) -> Router {
        Router::new()
            .route("/", get(root_handler))
            .route("/posts", get(list_posts_handler))
            .route("/posts", post(create_post_handler))
            .route("/posts/:id", get(get_post_handler))
            .route("/error", get(error_handler))
            .route("/garbage", get(garbage_handler))
            .with_state(self.state.clone())
    }
}

// Handler functions

async fn root_handler() -> Json<Value> {
    Json(json!({
        "service": "mock JSON API",
        "status": "ok"
    }))
}

async fn list_posts_handler(State(state): State<MockServerState>) -> Json<Value> {
    let posts = state.posts.lock().unwrap().clone();
    Json(Value::Array(posts))
}

async fn get_post_handler(
    Path(id): Path<u64>,
    State(state): State<MockServerState>,
) -> Result<Json<Value>, StatusCode> {
    let posts = state.posts.lock().unwrap();
    posts
        .iter()
        .find(|p| p["id"] == json!(id))
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn create_post_handler(
    State(state): State<MockServerState>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut next_id = state.next_id.lock().unwrap();
    let id = *next_id;
    *next_id += 1;

    // Echo the submitted fields plus the assigned id, like JSONPlaceholder
    let mut created = match body {
        Value::Object(fields) => fields,
        other => {
            let mut fields = serde_json::Map::new();
            fields.insert("data".to_string(), other);
            fields
        }
    };
    created.insert("id".to_string(), json!(id));

    (StatusCode::CREATED, Json(Value::Object(created)))
}

async fn error_handler() -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"error": "boom"})),
    )
}

async fn garbage_handler() -> (StatusCode, String) {
    (StatusCode::OK, "this is not json".to_string())
}
