/// Bearer authentication middleware for Axum
///
/// Extracts the `Authorization: Bearer <token>` header, validates the
/// token, and inserts the resulting [`Caller`] into request extensions.
/// Handlers behind this middleware extract it with Axum's `Extension`
/// extractor:
///
/// ```
/// use axum::Extension;
/// use gatehouse_shared::auth::access::Caller;
///
/// async fn handler(Extension(caller): Extension<Caller>) -> String {
///     format!("Hello, account {}!", caller.id)
/// }
/// ```
///
/// A missing header, a header without the `Bearer` scheme, and an
/// invalid or expired token all short-circuit with 401 before any
/// handler runs. No request reaches business logic without a verified
/// caller identity.

use axum::{
    extract::Request,
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use super::access::Caller;
use super::jwt::{validate_token, JwtError};

/// Error type for bearer authentication
#[derive(Debug)]
pub enum AuthError {
    /// Authorization header absent
    MissingHeader,

    /// Authorization header present but not `Bearer <token>`
    MalformedHeader,

    /// Token failed validation (bad signature, expired, garbage)
    InvalidToken(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        // Every failure mode is 401; the body does not distinguish a
        // missing header from a forged token.
        let message = match self {
            AuthError::MissingHeader | AuthError::MalformedHeader => {
                "Missing authorization headers".to_string()
            }
            AuthError::InvalidToken(msg) => msg,
        };

        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "unauthorized", "message": message })),
        )
            .into_response()
    }
}

/// Resolves the request headers into an authenticated caller
///
/// # Errors
///
/// - `AuthError::MissingHeader` if there is no Authorization header
/// - `AuthError::MalformedHeader` if it lacks the `Bearer ` scheme
/// - `AuthError::InvalidToken` if signature or expiry checks fail
pub fn authenticate(headers: &HeaderMap, secret: &str) -> Result<Caller, AuthError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingHeader)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::MalformedHeader)?;

    let claims = validate_token(token, secret).map_err(|e| match e {
        JwtError::Expired => AuthError::InvalidToken("Token expired".to_string()),
        _ => AuthError::InvalidToken(format!("Invalid token: {}", e)),
    })?;

    Ok(Caller {
        id: claims.sub,
        is_adm: claims.is_adm,
    })
}

/// Bearer authentication middleware
///
/// On success, runs the rest of the stack with a [`Caller`] extension
/// attached to the request.
pub async fn bearer_auth(secret: String, mut req: Request, next: Next) -> Result<Response, AuthError> {
    let caller = authenticate(req.headers(), &secret)?;
    req.extensions_mut().insert(caller);

    Ok(next.run(req).await)
}

/// Creates a bearer authentication middleware closure
///
/// Helper that captures the signing secret for use with
/// `axum::middleware::from_fn`.
///
/// ```no_run
/// use axum::{middleware, routing::get, Router};
/// use gatehouse_shared::auth::middleware::create_bearer_auth;
///
/// let app: Router = Router::new()
///     .route("/protected", get(|| async { "OK" }))
///     .layer(middleware::from_fn(create_bearer_auth("secret")));
/// ```
pub fn create_bearer_auth(
    secret: impl Into<String>,
) -> impl Fn(Request, Next) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AuthError>> + Send>>
       + Clone {
    let secret = secret.into();
    move |req, next| {
        let secret = secret.clone();
        Box::pin(bearer_auth(secret, req, next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::{create_token, Claims};
    use chrono::Duration;
    use uuid::Uuid;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, value.parse().unwrap());
        headers
    }

    #[test]
    fn test_missing_header_short_circuits() {
        let result = authenticate(&HeaderMap::new(), SECRET);
        assert!(matches!(result, Err(AuthError::MissingHeader)));
    }

    #[test]
    fn test_header_without_scheme_rejected() {
        let token = create_token(&Claims::new(Uuid::new_v4(), false), SECRET).unwrap();

        // Raw token with no "Bearer " prefix
        let result = authenticate(&headers_with(&token), SECRET);
        assert!(matches!(result, Err(AuthError::MalformedHeader)));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let result = authenticate(&headers_with("Bearer not-a-jwt"), SECRET);
        assert!(matches!(result, Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn test_expired_token_rejected() {
        let claims = Claims::with_expiration(Uuid::new_v4(), false, Duration::seconds(-3600));
        let token = create_token(&claims, SECRET).unwrap();

        let result = authenticate(&headers_with(&format!("Bearer {}", token)), SECRET);
        assert!(matches!(result, Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn test_valid_token_yields_caller() {
        let account_id = Uuid::new_v4();
        let token = create_token(&Claims::new(account_id, true), SECRET).unwrap();

        let caller = authenticate(&headers_with(&format!("Bearer {}", token)), SECRET)
            .expect("Valid token should authenticate");

        assert_eq!(caller.id, account_id);
        assert!(caller.is_adm);
    }

    #[test]
    fn test_all_failures_are_401() {
        for err in [
            AuthError::MissingHeader,
            AuthError::MalformedHeader,
            AuthError::InvalidToken("Token expired".to_string()),
        ] {
            let response = err.into_response();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        }
    }
}
