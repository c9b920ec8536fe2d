/// Authentication and authorization utilities
///
/// This module provides the secure core of Gatehouse:
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`jwt`]: Bearer token generation and validation
/// - [`access`]: The allow/deny decision for self vs. elevated access
/// - [`middleware`]: Axum middleware turning bearer tokens into callers
///
/// # Security Features
///
/// - **Password Hashing**: Argon2id with 64 MB memory, 3 iterations
/// - **Bearer Tokens**: HS256 signing, fixed 24 hour expiry window
/// - **Constant-time Comparison**: Verification delegates to the argon2
///   primitive, which compares digests in constant time

pub mod access;
pub mod jwt;
pub mod middleware;
pub mod password;
