/// The account directory
///
/// The directory is the single store of account records, keyed by UUID,
/// with email uniqueness enforced inside it. It is injected at the
/// composition root and passed explicitly to the handlers; nothing in
/// Gatehouse holds ambient account state.
///
/// [`MemoryDirectory`] is the in-process implementation. The trait seam
/// exists so a persistent store can be slotted in without touching the
/// auth core or the handlers.

pub mod memory;

pub use memory::MemoryDirectory;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::account::{Account, AccountChanges, NewAccount};

/// Error type for directory operations
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DirectoryError {
    /// Another account already holds this email
    #[error("E-mail already registered")]
    EmailTaken,

    /// No account with this ID
    #[error("Account {0} not found")]
    NotFound(Uuid),
}

/// Store of account records
///
/// Implementations must uphold two invariants:
///
/// - exactly one account per email at any time, including under
///   concurrent `create`/`update` calls;
/// - `uuid` and `created_on` never change after `create`.
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    /// Persists a new account record
    ///
    /// Fails with `EmailTaken` if the email is already registered. The
    /// uniqueness check and the insert happen under one exclusive
    /// critical section.
    async fn create(&self, new: NewAccount) -> Result<Account, DirectoryError>;

    /// Looks up an account by ID
    async fn find_by_id(&self, id: Uuid) -> Option<Account>;

    /// Looks up an account by email
    async fn find_by_email(&self, email: &str) -> Option<Account>;

    /// Applies profile changes to an account
    ///
    /// Touches name, email, and the update timestamp only. Fails with
    /// `EmailTaken` if the new email belongs to a different account, and
    /// `NotFound` if the ID does not exist.
    async fn update(&self, id: Uuid, changes: AccountChanges) -> Result<Account, DirectoryError>;

    /// Removes an account
    async fn delete(&self, id: Uuid) -> Result<(), DirectoryError>;

    /// Returns every account record
    async fn list(&self) -> Vec<Account>;
}
