/// Access control decisions
///
/// Gatehouse's permission model is deliberately small: elevated callers
/// may act on any account and on unscoped administrative operations;
/// ordinary callers may only act on themselves.
///
/// # Example
///
/// ```
/// use gatehouse_shared::auth::access::{authorize, Caller};
/// use uuid::Uuid;
///
/// let me = Uuid::new_v4();
/// let caller = Caller { id: me, is_adm: false };
///
/// // Self-access is always allowed
/// assert!(authorize(&caller, Some(me)).is_ok());
///
/// // Anything else requires elevation
/// assert!(authorize(&caller, Some(Uuid::new_v4())).is_err());
/// assert!(authorize(&caller, None).is_err());
/// ```

use uuid::Uuid;

/// Authenticated caller identity for one request
///
/// Produced solely by successful token verification and threaded
/// explicitly through handlers. Never persisted; lives only as long as
/// the request that carried the token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    /// Account ID taken from the token's subject claim
    pub id: Uuid,

    /// Elevated-privilege flag taken from the token's `isAdm` claim
    pub is_adm: bool,
}

/// Error type for denied access
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AccessError {
    /// Caller is authenticated but lacks the privilege for this operation
    #[error("missing admin permissions")]
    MissingAdmin,
}

/// Decides whether `caller` may act on `target`
///
/// Rules, in priority order:
///
/// 1. No target (unscoped operation, e.g. listing all accounts): allow
///    iff the caller is elevated.
/// 2. Target is the caller's own account: allow unconditionally.
/// 3. Target is another account: allow iff the caller is elevated.
///
/// # Errors
///
/// Returns `AccessError::MissingAdmin` on every deny; the HTTP layer maps
/// it to 403 Forbidden.
pub fn authorize(caller: &Caller, target: Option<Uuid>) -> Result<(), AccessError> {
    match target {
        Some(id) if id == caller.id => Ok(()),
        _ if caller.is_adm => Ok(()),
        _ => Err(AccessError::MissingAdmin),
    }
}
