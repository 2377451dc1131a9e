/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - Test database setup and cleanup
/// - User registration/login through the real API
/// - Request building and response parsing helpers
///
/// Tests need a running PostgreSQL instance; they skip themselves when
/// `DATABASE_URL` is not set so the unit suite stays runnable anywhere.

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use jotter_api::app::{build_router, AppState};
use jotter_api::config::Config;
use jotter_shared::models::user::User;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::Service as _;
use uuid::Uuid;

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
    pub config: Config,
    created_users: Vec<Uuid>,
}

impl TestContext {
    /// Creates a new test context, or `None` when no database is configured.
    pub async fn try_new() -> anyhow::Result<Option<Self>> {
        if std::env::var("DATABASE_URL").is_err() {
            return Ok(None);
        }

        // A signing secret is needed but its value is irrelevant here
        if std::env::var("JWT_SECRET").is_err() {
            std::env::set_var("JWT_SECRET", "integration-test-secret-0123456789abcdef");
        }

        let config = Config::from_env()?;

        let db = PgPool::connect(&config.database.url).await?;

        // Run migrations (path relative to Cargo.toml, not this file)
        sqlx::migrate!("../migrations").run(&db).await?;

        let state = AppState::new(db.clone(), config.clone());
        let app = build_router(state);

        Ok(Some(TestContext {
            db,
            app,
            config,
            created_users: Vec::new(),
        }))
    }

    /// Registers a fresh user through the API and logs them in.
    ///
    /// Returns the user ID and a session token. The email is randomized so
    /// tests can run concurrently against a shared database.
    pub async fn register_and_login(&mut self, password: &str) -> anyhow::Result<(Uuid, String)> {
        let email = format!("test-{}@example.com", Uuid::new_v4());

        let response = self
            .post_json(
                "/auth/register",
                None,
                json!({ "email": email, "password": password }),
            )
            .await;
        anyhow::ensure!(
            response.status() == StatusCode::CREATED,
            "registration failed: {}",
            response.status()
        );
        let body = body_json(response).await;
        let user_id: Uuid = body["user_id"].as_str().unwrap().parse()?;
        self.created_users.push(user_id);

        let response = self
            .post_json(
                "/auth/login",
                None,
                json!({ "email": email, "password": password }),
            )
            .await;
        anyhow::ensure!(
            response.status() == StatusCode::OK,
            "login failed: {}",
            response.status()
        );
        let body = body_json(response).await;
        let token = body["token"].as_str().unwrap().to_string();

        Ok((user_id, token))
    }

    /// Sends a JSON request through the router.
    pub async fn post_json(
        &mut self,
        uri: &str,
        token: Option<&str>,
        body: Value,
    ) -> Response<Body> {
        self.request_json("POST", uri, token, Some(body)).await
    }

    /// Sends a request with an optional JSON body and bearer token.
    pub async fn request_json(
        &mut self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.app.clone().call(request).await.unwrap()
    }

    /// Removes every user this context registered.
    ///
    /// `ON DELETE CASCADE` takes their notes with them.
    pub async fn cleanup(&self) -> anyhow::Result<()> {
        for user_id in &self.created_users {
            User::delete(&self.db, *user_id).await?;
        }
        Ok(())
    }
}

/// Parses a response body as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Reads a response body as raw bytes.
pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

/// Skips the current test when no database is configured.
///
/// Expands to a `TestContext` or returns early.
#[macro_export]
macro_rules! require_db {
    () => {
        match common::TestContext::try_new().await.unwrap() {
            Some(ctx) => ctx,
            None => {
                eprintln!("skipping: DATABASE_URL not set");
                return;
            }
        }
    };
}
