use std::sync::Arc;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{CreatedUser, Profile, SignupRequest, UpdateUser, User, UserDetails};
use crate::repository::UserRepository;

/// Service layer for account business logic
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Validate and store a new account
    pub async fn signup(&self, input: SignupRequest) -> UserResult<CreatedUser> {
        input.validate()?;

        let user = User::new(input.id, input.credential, input.display_name, input.note);
        let created = self.repository.create(user).await?;

        Ok(CreatedUser::from(&created))
    }

    /// Get an account's public details after checking its credential
    pub async fn get_user(&self, id: &str, credential: &str) -> UserResult<UserDetails> {
        let user = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound)?;
        user.authenticate(credential)?;

        Ok(UserDetails::from(&user))
    }

    /// Update `displayName` and/or `note`, returning the resulting profile
    pub async fn update_user(
        &self,
        id: &str,
        credential: &str,
        input: UpdateUser,
    ) -> UserResult<Profile> {
        let user = self.repository.update(id, credential, input).await?;
        Ok(Profile::from(&user))
    }

    /// Permanently remove an account
    pub async fn close_account(&self, id: &str, credential: &str) -> UserResult<()> {
        self.repository.delete(id, credential).await
    }

    /// Number of stored accounts
    pub async fn count(&self) -> UserResult<usize> {
        self.repository.count().await
    }
}
