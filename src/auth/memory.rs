use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::{
    repo::{StoreError, UserStore},
    repo_types::{NewUser, User},
};

/// In-process store with the same uniqueness rules as the `users` table.
#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<User>>,
}

impl MemoryUserStore {
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<User>> {
        self.users.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_user_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<User>, StoreError> {
        Ok(self
            .lock()
            .iter()
            .find(|u| u.username == username || u.email == email)
            .cloned())
    }

    async fn find_password_hash_by_username(
        &self,
        username: &str,
    ) -> Result<Option<String>, StoreError> {
        Ok(self
            .lock()
            .iter()
            .find(|u| u.username == username)
            .map(|u| u.password_hash.clone()))
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(self.lock().iter().find(|u| u.username == username).cloned())
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError> {
        let mut users = self.lock();
        if users
            .iter()
            .any(|u| u.username == user.username || u.email == user.email)
        {
            return Err(StoreError::Conflict);
        }
        let created = User {
            id: Uuid::new_v4(),
            full_name: user.full_name,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            created_at: OffsetDateTime::now_utc(),
        };
        users.push(created.clone());
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            full_name: username.into(),
            username: username.into(),
            email: email.into(),
            password_hash: "$argon2id$stub".into(),
        }
    }

    #[tokio::test]
    async fn memory_store_enforces_unique_username_and_email() {
        let store = MemoryUserStore::default();
        store.insert_user(new_user("alice_01", "a@example.com")).await.unwrap();

        let dup_name = store.insert_user(new_user("alice_01", "b@example.com")).await;
        assert!(matches!(dup_name, Err(StoreError::Conflict)));
        let dup_email = store.insert_user(new_user("bob", "a@example.com")).await;
        assert!(matches!(dup_email, Err(StoreError::Conflict)));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn memory_store_lookups() {
        let store = MemoryUserStore::default();
        store.insert_user(new_user("alice_01", "a@example.com")).await.unwrap();

        assert!(store
            .find_user_by_username_or_email("nobody", "a@example.com")
            .await
            .unwrap()
            .is_some());
        assert!(store
            .find_user_by_username_or_email("nobody", "n@example.com")
            .await
            .unwrap()
            .is_none());
        assert_eq!(
            store.find_password_hash_by_username("alice_01").await.unwrap().as_deref(),
            Some("$argon2id$stub")
        );
        // exact match only
        assert!(store.find_password_hash_by_username("ALICE_01").await.unwrap().is_none());
    }
}
