/// Password hashing using Argon2id
///
/// Gatehouse never stores or compares plaintext passwords. Registration
/// stores the PHC-string digest produced here; login re-derives the digest
/// from the supplied plaintext and the salt/parameters embedded in the
/// stored string.
///
/// # Security
///
/// - **Algorithm**: Argon2id (hybrid of Argon2i and Argon2d)
/// - **Memory**: 64 MB (65536 KB)
/// - **Iterations**: 3 passes
/// - **Parallelism**: 4 lanes
/// - **Salt**: 16 random bytes per call, so hashing the same password
///   twice yields different digests
///
/// # Example
///
/// ```
/// use gatehouse_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let digest = hash_password("hunter2-but-longer")?;
///
/// assert!(verify_password("hunter2-but-longer", &digest));
/// assert!(!verify_password("wrong", &digest));
/// # Ok(())
/// # }
/// ```

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, ParamsBuilder, Version,
};

/// Error type for password hashing
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Failed to hash password
    #[error("Failed to hash password: {0}")]
    HashError(String),
}

/// Hashes a password using Argon2id
///
/// The output is a PHC string carrying the algorithm identifier, the
/// parameters, the salt, and the digest, e.g.:
///
/// ```text
/// $argon2id$v=19$m=65536,t=3,p=4$c2FsdHNhbHRzYWx0$hash...
/// ```
///
/// # Errors
///
/// Returns `PasswordError::HashError` if the parameters are rejected or
/// digest generation fails.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    // 64 MB, 3 passes, 4 lanes. Deliberately expensive.
    let params = ParamsBuilder::new()
        .m_cost(65536)
        .t_cost(3)
        .p_cost(4)
        .output_len(32)
        .build()
        .map_err(|e| PasswordError::HashError(format!("Invalid parameters: {}", e)))?;

    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, params);

    let digest = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashError(format!("Hash generation failed: {}", e)))?;

    Ok(digest.to_string())
}

/// Verifies a password against a stored digest
///
/// Returns `true` iff the plaintext reproduces the digest under the
/// parameters embedded in it. Comparison is constant-time inside the
/// argon2 primitive.
///
/// A malformed or truncated digest verifies as `false`; nothing escapes
/// this boundary as an error. Login treats every failure mode identically,
/// so a parse failure and a wrong password must be indistinguishable to
/// the caller.
pub fn verify_password(password: &str, digest: &str) -> bool {
    let parsed = match PasswordHash::new(digest) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!("Rejecting unparseable password digest: {}", e);
            return false;
        }
    };

    // Parameters travel inside the PHC string, so the default instance
    // verifies digests produced with any cost settings.
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
