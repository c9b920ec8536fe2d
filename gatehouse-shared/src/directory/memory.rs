/// In-memory account directory
///
/// Backs the directory with a `RwLock`'d map. All mutations take the
/// write lock, so the email-uniqueness check and the insert/update it
/// guards are atomic with respect to concurrent registrations. Password
/// hashing happens before `create` is called and therefore never runs
/// while the lock is held.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{AccountDirectory, DirectoryError};
use crate::models::account::{Account, AccountChanges, NewAccount};

/// Process-local account store
#[derive(Debug, Default)]
pub struct MemoryDirectory {
    accounts: RwLock<HashMap<Uuid, Account>>,
}

impl MemoryDirectory {
    /// Creates an empty directory
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountDirectory for MemoryDirectory {
    async fn create(&self, new: NewAccount) -> Result<Account, DirectoryError> {
        let mut accounts = self.accounts.write().await;

        if accounts.values().any(|a| a.email == new.email) {
            return Err(DirectoryError::EmailTaken);
        }

        let account = Account::new(new);
        accounts.insert(account.uuid, account.clone());

        tracing::debug!(account_id = %account.uuid, "Account created");

        Ok(account)
    }

    async fn find_by_id(&self, id: Uuid) -> Option<Account> {
        self.accounts.read().await.get(&id).cloned()
    }

    async fn find_by_email(&self, email: &str) -> Option<Account> {
        self.accounts
            .read()
            .await
            .values()
            .find(|a| a.email == email)
            .cloned()
    }

    async fn update(&self, id: Uuid, changes: AccountChanges) -> Result<Account, DirectoryError> {
        let mut accounts = self.accounts.write().await;

        if let Some(email) = &changes.email {
            // The new email may collide with any account except the one
            // being updated.
            if accounts.values().any(|a| a.email == *email && a.uuid != id) {
                return Err(DirectoryError::EmailTaken);
            }
        }

        let account = accounts.get_mut(&id).ok_or(DirectoryError::NotFound(id))?;

        if let Some(name) = changes.name {
            account.name = name;
        }
        if let Some(email) = changes.email {
            account.email = email;
        }
        account.update_on = Utc::now();

        Ok(account.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), DirectoryError> {
        let mut accounts = self.accounts.write().await;

        accounts
            .remove(&id)
            .map(|_| ())
            .ok_or(DirectoryError::NotFound(id))
    }

    async fn list(&self) -> Vec<Account> {
        self.accounts.read().await.values().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn new_account(email: &str) -> NewAccount {
        NewAccount {
            name: "Test User".to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$v=19$m=65536,t=3,p=4$salt$digest".to_string(),
            is_adm: false,
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let dir = MemoryDirectory::new();

        let created = dir.create(new_account("a@x.com")).await.unwrap();

        let by_id = dir.find_by_id(created.uuid).await.unwrap();
        assert_eq!(by_id.email, "a@x.com");

        let by_email = dir.find_by_email("a@x.com").await.unwrap();
        assert_eq!(by_email.uuid, created.uuid);

        assert!(dir.find_by_email("missing@x.com").await.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let dir = MemoryDirectory::new();

        dir.create(new_account("a@x.com")).await.unwrap();
        let result = dir.create(new_account("a@x.com")).await;

        assert_eq!(result.unwrap_err(), DirectoryError::EmailTaken);
        assert_eq!(dir.list().await.len(), 1);
    }

    #[tokio::test]
    async fn test_update_touches_profile_fields_only() {
        let dir = MemoryDirectory::new();
        let created = dir.create(new_account("a@x.com")).await.unwrap();

        let updated = dir
            .update(
                created.uuid,
                AccountChanges {
                    name: Some("Renamed".to_string()),
                    email: Some("b@x.com".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.email, "b@x.com");
        assert_eq!(updated.uuid, created.uuid);
        assert_eq!(updated.created_on, created.created_on);
        assert_eq!(updated.password_hash, created.password_hash);
        assert!(updated.update_on >= created.update_on);
    }

    #[tokio::test]
    async fn test_update_to_taken_email_rejected() {
        let dir = MemoryDirectory::new();
        dir.create(new_account("a@x.com")).await.unwrap();
        let second = dir.create(new_account("b@x.com")).await.unwrap();

        let result = dir
            .update(
                second.uuid,
                AccountChanges {
                    name: None,
                    email: Some("a@x.com".to_string()),
                },
            )
            .await;

        assert_eq!(result.unwrap_err(), DirectoryError::EmailTaken);
    }

    #[tokio::test]
    async fn test_update_keeping_own_email_is_fine() {
        let dir = MemoryDirectory::new();
        let created = dir.create(new_account("a@x.com")).await.unwrap();

        let result = dir
            .update(
                created.uuid,
                AccountChanges {
                    name: Some("Renamed".to_string()),
                    email: Some("a@x.com".to_string()),
                },
            )
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_delete() {
        let dir = MemoryDirectory::new();
        let created = dir.create(new_account("a@x.com")).await.unwrap();

        dir.delete(created.uuid).await.unwrap();
        assert!(dir.find_by_id(created.uuid).await.is_none());

        let result = dir.delete(created.uuid).await;
        assert_eq!(result.unwrap_err(), DirectoryError::NotFound(created.uuid));
    }

    #[tokio::test]
    async fn test_missing_id_update_is_not_found() {
        let dir = MemoryDirectory::new();
        let ghost = Uuid::new_v4();

        let result = dir.update(ghost, AccountChanges::default()).await;
        assert_eq!(result.unwrap_err(), DirectoryError::NotFound(ghost));
    }

    /// Concurrent registrations with the same email: exactly one wins.
    #[tokio::test]
    async fn test_concurrent_registration_preserves_uniqueness() {
        let dir = Arc::new(MemoryDirectory::new());

        let mut handles = Vec::new();
        for _ in 0..16 {
            let dir = Arc::clone(&dir);
            handles.push(tokio::spawn(async move {
                dir.create(new_account("race@x.com")).await
            }));
        }

        let mut created = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                created += 1;
            }
        }

        assert_eq!(created, 1);
        assert_eq!(dir.list().await.len(), 1);
    }
}
