/// Application state and router builder
///
/// This module defines the shared application state and builds the Axum
/// router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use gatehouse_api::{app::{build_router, AppState}, config::Config};
/// use gatehouse_shared::directory::MemoryDirectory;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let state = AppState::new(Arc::new(MemoryDirectory::new()), config);
/// let app = build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, middleware::security::SecurityHeadersLayer};
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, patch, post},
    Router,
};
use gatehouse_shared::auth::middleware::create_bearer_auth;
use gatehouse_shared::directory::AccountDirectory;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor. The
/// account directory is injected here by the composition root; handlers
/// never reach for ambient storage.
#[derive(Clone)]
pub struct AppState {
    /// Account directory
    pub directory: Arc<dyn AccountDirectory>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(directory: Arc<dyn AccountDirectory>, config: Config) -> Self {
        Self {
            directory,
            config: Arc::new(config),
        }
    }

    /// Gets the token signing secret
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── GET    /health            # Liveness (public)
/// ├── POST   /users             # Registration (public)
/// ├── POST   /login             # Login (public)
/// ├── GET    /users             # List accounts (bearer, elevated only)
/// ├── GET    /users/profile     # Own profile (bearer)
/// ├── PATCH  /users/:id         # Update profile (bearer, self or elevated)
/// └── DELETE /users/:id         # Delete account (bearer, self or elevated)
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Security headers
/// 4. Bearer authentication (protected routes only)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Public routes: no credentials needed to register or log in
    let public_routes = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/users", post(routes::users::register))
        .route("/login", post(routes::auth::login));

    // Protected routes: bearer token required; the middleware rejects
    // missing, malformed, and invalid tokens before any handler runs.
    let protected_routes = Router::new()
        .route("/users", get(routes::users::list_accounts))
        .route("/users/profile", get(routes::users::get_profile))
        .route(
            "/users/:id",
            patch(routes::users::update_account).delete(routes::users::delete_account),
        )
        .route_layer(axum::middleware::from_fn(create_bearer_auth(
            state.jwt_secret().to_string(),
        )));

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.contains(&"*".to_string()) {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .layer(SecurityHeadersLayer::new(state.config.api.production))
        .with_state(state)
}
