/// Bearer token generation and validation
///
/// Tokens are JWTs signed with HS256 (HMAC-SHA256) using a process-wide
/// secret. Each token carries the account identity as the subject claim
/// and the elevated-privilege flag as a custom claim, and expires a fixed
/// 24 hours after issuance. Tokens are never persisted or revoked; every
/// use re-checks the signature and the expiry.
///
/// # Example
///
/// ```
/// use gatehouse_shared::auth::jwt::{create_token, validate_token, Claims};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let account_id = Uuid::new_v4();
/// let secret = "a-signing-secret-of-at-least-32-bytes!!";
///
/// let token = create_token(&Claims::new(account_id, false), secret)?;
///
/// let claims = validate_token(&token, secret)?;
/// assert_eq!(claims.sub, account_id);
/// assert!(!claims.is_adm);
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Issuer claim stamped into every token
const ISSUER: &str = "gatehouse";

/// Fixed validity window from issuance
pub const TOKEN_TTL_HOURS: i64 = 24;

/// Error type for token operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Failed to create token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Token failed signature, format, or issuer checks
    #[error("Failed to validate token: {0}")]
    ValidationError(String),

    /// Token has expired
    #[error("Token has expired")]
    Expired,
}

/// Claims carried by a Gatehouse bearer token
///
/// # Standard Claims
///
/// - `sub`: Subject (account UUID)
/// - `iss`: Issuer (always "gatehouse")
/// - `iat`: Issued at timestamp
/// - `exp`: Expiration timestamp (`iat` + 24 hours)
///
/// # Custom Claims
///
/// - `isAdm`: Elevated-privilege flag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - account ID
    pub sub: Uuid,

    /// Issuer - always "gatehouse"
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Elevated-privilege flag (custom claim)
    #[serde(rename = "isAdm")]
    pub is_adm: bool,
}

impl Claims {
    /// Creates claims for an account with the default 24 hour expiry
    pub fn new(account_id: Uuid, is_adm: bool) -> Self {
        Self::with_expiration(account_id, is_adm, Duration::hours(TOKEN_TTL_HOURS))
    }

    /// Creates claims with a custom expiry window
    ///
    /// A negative duration produces an already-expired token; the expiry
    /// tests rely on this.
    pub fn with_expiration(account_id: Uuid, is_adm: bool, expires_in: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: account_id,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: (now + expires_in).timestamp(),
            is_adm,
        }
    }

    /// Checks if the token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Signs claims into a bearer token
///
/// # Errors
///
/// Returns `JwtError::CreateError` if encoding fails.
///
/// # Security
///
/// The secret should be at least 32 bytes (256 bits) for HS256, randomly
/// generated, and supplied via configuration. It must never be embedded
/// as a source literal.
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, claims, &key)
        .map_err(|e| JwtError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Validates a bearer token and extracts its claims
///
/// Verifies that the signature matches `secret`, the token has not
/// expired, and the issuer is "gatehouse". A token signed with any other
/// secret fails here regardless of its contents.
///
/// # Errors
///
/// - `JwtError::Expired` past the expiry timestamp
/// - `JwtError::ValidationError` for a bad signature, wrong issuer, or
///   malformed token
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.validate_exp = true;
    validation.leeway = 0;

    let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
        _ => JwtError::ValidationError(format!("Token validation failed: {}", e)),
    })?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    #[test]
    fn test_claims_creation() {
        let account_id = Uuid::new_v4();
        let claims = Claims::new(account_id, true);

        assert_eq!(claims.sub, account_id);
        assert_eq!(claims.iss, "gatehouse");
        assert!(claims.is_adm);
        assert!(!claims.is_expired());
        assert_eq!(claims.exp - claims.iat, TOKEN_TTL_HOURS * 3600);
    }

    #[test]
    fn test_create_and_validate_token() {
        let account_id = Uuid::new_v4();

        let token = create_token(&Claims::new(account_id, false), SECRET)
            .expect("Should create token");

        let validated = validate_token(&token, SECRET).expect("Should validate token");
        assert_eq!(validated.sub, account_id);
        assert!(!validated.is_adm);
        assert_eq!(validated.iss, "gatehouse");
    }

    #[test]
    fn test_elevated_flag_round_trips() {
        let token = create_token(&Claims::new(Uuid::new_v4(), true), SECRET).unwrap();
        let validated = validate_token(&token, SECRET).unwrap();
        assert!(validated.is_adm);
    }

    #[test]
    fn test_validate_with_wrong_secret() {
        let token = create_token(&Claims::new(Uuid::new_v4(), false), SECRET)
            .expect("Should create token");

        let result = validate_token(&token, "a-completely-different-signing-secret");
        assert!(matches!(result, Err(JwtError::ValidationError(_))));
    }

    #[test]
    fn test_validate_expired_token() {
        let claims = Claims::with_expiration(Uuid::new_v4(), false, Duration::seconds(-3600));
        assert!(claims.is_expired());

        let token = create_token(&claims, SECRET).expect("Should create token");
        let result = validate_token(&token, SECRET);

        assert!(matches!(result, Err(JwtError::Expired)));
    }

    #[test]
    fn test_validate_garbage_token() {
        assert!(validate_token("not-a-jwt", SECRET).is_err());
        assert!(validate_token("", SECRET).is_err());
        assert!(validate_token("a.b.c", SECRET).is_err());
    }
}
