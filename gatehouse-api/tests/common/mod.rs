/// Common test utilities for integration tests
///
/// Provides shared infrastructure for driving the real router end to end:
/// - an app wired to a fresh in-memory directory per test
/// - seeded accounts with known passwords
/// - bearer token generation
/// - request/response helpers

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, Response},
    Router,
};
use gatehouse_api::app::{build_router, AppState};
use gatehouse_api::config::{ApiConfig, Config, JwtConfig};
use gatehouse_shared::auth::jwt::{create_token, Claims};
use gatehouse_shared::auth::password::hash_password;
use gatehouse_shared::directory::{AccountDirectory, MemoryDirectory};
use gatehouse_shared::models::account::{Account, NewAccount};
use serde_json::Value;
use tower::ServiceExt as _;

/// Signing secret used by every test app
pub const TEST_SECRET: &str = "integration-test-secret-at-least-32-bytes";

/// Test context: the real router plus a handle on its directory
pub struct TestContext {
    pub app: Router,
    pub directory: Arc<MemoryDirectory>,
}

impl TestContext {
    /// Creates a fresh app over an empty directory
    pub fn new() -> Self {
        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors_origins: vec!["*".to_string()],
                production: false,
            },
            jwt: JwtConfig {
                secret: TEST_SECRET.to_string(),
            },
        };

        let directory = Arc::new(MemoryDirectory::new());
        let state = AppState::new(directory.clone(), config);

        Self {
            app: build_router(state),
            directory,
        }
    }

    /// Seeds an account directly into the directory, bypassing the API
    pub async fn seed_account(&self, email: &str, password: &str, is_adm: bool) -> Account {
        let password_hash = hash_password(password).expect("Hashing should succeed");

        self.directory
            .create(NewAccount {
                name: "Seeded User".to_string(),
                email: email.to_string(),
                password_hash,
                is_adm,
            })
            .await
            .expect("Seeding should succeed")
    }

    /// Issues a valid bearer token for a seeded account
    pub fn token_for(&self, account: &Account) -> String {
        create_token(&Claims::new(account.uuid, account.is_adm), TEST_SECRET)
            .expect("Token creation should succeed")
    }

    /// Sends a request through the router
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.app.clone().oneshot(request).await.unwrap()
    }
}

/// Reads a response body as JSON
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
