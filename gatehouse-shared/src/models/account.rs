/// Account records and views
///
/// An [`Account`] is the internal record held by the account directory.
/// It carries the Argon2id password digest, so it is never serialized;
/// everything that leaves the service goes through [`Profile`], which has
/// no digest field at all. Wire names are camelCase (`createdOn`,
/// `updateOn`, `isAdm`) to match the service's JSON contract.
///
/// # Example
///
/// ```
/// use gatehouse_shared::models::account::{Account, NewAccount, Profile};
///
/// let account = Account::new(NewAccount {
///     name: "Ada".to_string(),
///     email: "ada@example.com".to_string(),
///     password_hash: "$argon2id$...".to_string(),
///     is_adm: false,
/// });
///
/// let profile = Profile::from(&account);
/// assert_eq!(profile.email, "ada@example.com");
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An account record
///
/// The identifier is generated at creation and immutable for the life of
/// the record. Updates may touch `name`, `email`, and `update_on` only;
/// the password digest and the privilege flag are not mutable through
/// the profile-update path.
#[derive(Debug, Clone)]
pub struct Account {
    /// Unique account ID (UUID v4), immutable
    pub uuid: Uuid,

    /// When the account was created, immutable
    pub created_on: DateTime<Utc>,

    /// When the account was last updated
    pub update_on: DateTime<Utc>,

    /// Display name
    pub name: String,

    /// Email address, unique across all accounts
    pub email: String,

    /// Argon2id digest. Never plaintext, never serialized.
    pub password_hash: String,

    /// Elevated-privilege flag
    pub is_adm: bool,
}

impl Account {
    /// Materializes a record from registration input
    ///
    /// Generates a fresh UUID and stamps both timestamps with the current
    /// time.
    pub fn new(new: NewAccount) -> Self {
        let now = Utc::now();

        Self {
            uuid: Uuid::new_v4(),
            created_on: now,
            update_on: now,
            name: new.name,
            email: new.email,
            password_hash: new.password_hash,
            is_adm: new.is_adm,
        }
    }
}

/// Input for creating an account
///
/// Carries the already-hashed password; plaintext never crosses into the
/// directory.
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// Display name
    pub name: String,

    /// Email address
    pub email: String,

    /// Argon2id digest (NOT the plaintext password)
    pub password_hash: String,

    /// Elevated-privilege flag
    pub is_adm: bool,
}

/// Changes applicable to an existing account
///
/// Only name and email are reachable through updates. `None` leaves a
/// field untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountChanges {
    /// New display name
    pub name: Option<String>,

    /// New email address (still subject to the uniqueness invariant)
    pub email: Option<String>,
}

/// Outward-facing view of an account
///
/// Structurally incapable of leaking the password digest: there is no
/// field for it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub uuid: Uuid,
    pub created_on: DateTime<Utc>,
    pub update_on: DateTime<Utc>,
    pub name: String,
    pub email: String,
    pub is_adm: bool,
}

impl From<&Account> for Profile {
    fn from(account: &Account) -> Self {
        Self {
            uuid: account.uuid,
            created_on: account.created_on,
            update_on: account.update_on,
            name: account.name.clone(),
            email: account.email.clone(),
            is_adm: account.is_adm,
        }
    }
}
