use async_trait::async_trait;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::models::{UpdateUser, User};

/// Repository trait for account persistence.
///
/// Every method is one atomic unit: lookup, credential check and mutation
/// happen without another operation on the same account interleaving.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account; fails if the id is taken
    async fn create(&self, user: User) -> UserResult<User>;

    /// Get an account by id
    async fn get_by_id(&self, id: &str) -> UserResult<Option<User>>;

    /// Authenticate and apply a profile update, returning the updated account
    async fn update(&self, id: &str, credential: &str, changes: UpdateUser) -> UserResult<User>;

    /// Authenticate and remove an account
    async fn delete(&self, id: &str, credential: &str) -> UserResult<()>;

    /// Number of stored accounts
    async fn count(&self) -> UserResult<usize>;
}

/// In-memory implementation of UserRepository
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> UserResult<User> {
        let mut users = self.users.write().await;

        match users.entry(user.id.clone()) {
            Entry::Occupied(_) => Err(UserError::AlreadyExists(user.id)),
            Entry::Vacant(slot) => {
                tracing::info!(user_id = %user.id, "Created user");
                Ok(slot.insert(user).clone())
            }
        }
    }

    async fn get_by_id(&self, id: &str) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(id).cloned())
    }

    async fn update(&self, id: &str, credential: &str, changes: UpdateUser) -> UserResult<User> {
        let mut users = self.users.write().await;

        let user = users.get_mut(id).ok_or(UserError::NotFound)?;
        user.authenticate(credential)?;
        user.apply_update(changes)?;

        tracing::info!(user_id = %id, "Updated user");
        Ok(user.clone())
    }

    async fn delete(&self, id: &str, credential: &str) -> UserResult<()> {
        let mut users = self.users.write().await;

        users
            .get(id)
            .ok_or(UserError::NotFound)?
            .authenticate(credential)?;
        users.remove(id);

        tracing::info!(user_id = %id, "Deleted user");
        Ok(())
    }

    async fn count(&self) -> UserResult<usize> {
        Ok(self.users.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str) -> User {
        User::new(id.to_string(), "PaSSwd4TY".to_string(), None, None)
    }

    fn note(value: &str) -> UpdateUser {
        UpdateUser {
            note: Some(value.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_and_get_user() {
        let repo = InMemoryUserRepository::new();

        let created = repo.create(user("TaroYamada")).await.unwrap();
        assert_eq!(created.display_name, "TaroYamada");

        let fetched = repo.get_by_id("TaroYamada").await.unwrap();
        assert_eq!(fetched, Some(created));
        assert!(repo.get_by_id("taroyamada").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_id_error() {
        let repo = InMemoryUserRepository::new();
        repo.create(user("TaroYamada")).await.unwrap();

        let mut second = user("TaroYamada");
        second.note = "second".to_string();
        let result = repo.create(second).await;

        assert!(matches!(result, Err(UserError::AlreadyExists(id)) if id == "TaroYamada"));
        let stored = repo.get_by_id("TaroYamada").await.unwrap().unwrap();
        assert_eq!(stored.note, "");
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_check_order() {
        let repo = InMemoryUserRepository::new();
        repo.create(user("TaroYamada")).await.unwrap();

        let missing = repo.update("HanakoSato", "PaSSwd4TY", note("x")).await;
        assert!(matches!(missing, Err(UserError::NotFound)));

        // A bad credential wins over an invalid body.
        let wrong = repo
            .update("TaroYamada", "wrongpass", UpdateUser::default())
            .await;
        assert!(matches!(wrong, Err(UserError::AuthenticationFailed)));

        let empty = repo
            .update("TaroYamada", "PaSSwd4TY", UpdateUser::default())
            .await;
        assert!(matches!(empty, Err(UserError::NothingToUpdate)));

        let updated = repo
            .update("TaroYamada", "PaSSwd4TY", note("hello"))
            .await
            .unwrap();
        assert_eq!(updated.note, "hello");
        assert_eq!(updated.display_name, "TaroYamada");
    }

    #[tokio::test]
    async fn test_delete_user() {
        let repo = InMemoryUserRepository::new();
        repo.create(user("TaroYamada")).await.unwrap();

        let wrong = repo.delete("TaroYamada", "wrongpass").await;
        assert!(matches!(wrong, Err(UserError::AuthenticationFailed)));
        assert_eq!(repo.count().await.unwrap(), 1);

        repo.delete("TaroYamada", "PaSSwd4TY").await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 0);

        let again = repo.delete("TaroYamada", "PaSSwd4TY").await;
        assert!(matches!(again, Err(UserError::NotFound)));
    }

    #[tokio::test]
    async fn test_concurrent_creates_with_same_id() {
        let repo = InMemoryUserRepository::new();

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.create(user("TaroYamada")).await })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                created += 1;
            }
        }

        assert_eq!(created, 1);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_updates_and_delete_on_same_id() {
        let repo = InMemoryUserRepository::new();
        repo.create(user("TaroYamada")).await.unwrap();

        let updates: Vec<_> = (0..32)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move {
                    repo.update("TaroYamada", "PaSSwd4TY", note(&format!("note {i}")))
                        .await
                })
            })
            .collect();
        let delete = {
            let repo = repo.clone();
            tokio::spawn(async move { repo.delete("TaroYamada", "PaSSwd4TY").await })
        };

        for handle in updates {
            match handle.await.unwrap() {
                Ok(updated) => assert_eq!(updated.display_name, "TaroYamada"),
                Err(UserError::NotFound) => {}
                Err(other) => panic!("unexpected error: {other:?}"),
            }
        }
        delete.await.unwrap().unwrap();

        assert!(repo.get_by_id("TaroYamada").await.unwrap().is_none());
        assert_eq!(repo.count().await.unwrap(), 0);
    }
}
