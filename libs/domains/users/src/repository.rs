use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{Role, User};

/// Repository trait for account persistence
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Look a user up by exact email
    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>>;

    /// Store a new user; fails with [`UserError::DuplicateEmail`] if the
    /// email is taken
    async fn create(&self, user: User) -> UserResult<User>;

    /// Overwrite a user's role; fails with [`UserError::UserNotFound`] if
    /// the id is unknown
    async fn update_role(&self, id: Uuid, role: Role) -> UserResult<()>;
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn create(&self, user: User) -> UserResult<User> {
        let mut users = self.users.write().await;

        // Check and insert under one write lock, like a unique index would
        if users.values().any(|u| u.email == user.email) {
            return Err(UserError::DuplicateEmail);
        }

        users.insert(user.id, user.clone());
        tracing::debug!(user_id = %user.id, "Stored user");
        Ok(user)
    }

    async fn update_role(&self, id: Uuid, role: Role) -> UserResult<()> {
        let mut users = self.users.write().await;
        let user = users.get_mut(&id).ok_or(UserError::UserNotFound)?;
        user.role = role;
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: &str) -> User {
        User::new("Test".into(), email.into(), "hash".into(), Role::Student)
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = InMemoryUserRepository::new();
        let created = repo.create(user("a@x.edu")).await.unwrap();

        let found = repo.find_by_email("a@x.edu").await.unwrap();
        assert_eq!(found, Some(created));
    }

    #[tokio::test]
    async fn test_email_lookup_is_case_sensitive() {
        let repo = InMemoryUserRepository::new();
        repo.create(user("a@x.edu")).await.unwrap();

        assert!(repo.find_by_email("A@x.edu").await.unwrap().is_none());
        // Differently-cased address is a distinct account
        assert!(repo.create(user("A@x.edu")).await.is_ok());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let repo = InMemoryUserRepository::new();
        repo.create(user("a@x.edu")).await.unwrap();

        let err = repo.create(user("a@x.edu")).await.unwrap_err();
        assert!(matches!(err, UserError::DuplicateEmail));
    }

    #[tokio::test]
    async fn test_update_role() {
        let repo = InMemoryUserRepository::new();
        let created = repo.create(user("a@x.edu")).await.unwrap();

        repo.update_role(created.id, Role::Admin).await.unwrap();
        let found = repo.find_by_email("a@x.edu").await.unwrap().unwrap();
        assert_eq!(found.role, Role::Admin);

        let err = repo.update_role(Uuid::now_v7(), Role::Admin).await.unwrap_err();
        assert!(matches!(err, UserError::UserNotFound));
    }
}
