use axum_helpers::{Page, PageQuery};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, UpdateUser, User, UserSortField, normalize_email};
use crate::repository::UserRepository;

/// Service layer for User business logic
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn create_user(&self, input: CreateUser) -> UserResult<User> {
        input.validate()?;

        let email = normalize_email(&input.email);
        if self.repository.email_taken(&email, None).await? {
            return Err(UserError::DuplicateEmail(email));
        }

        self.repository.create(User::from(input)).await
    }

    pub async fn get_user(&self, id: Uuid) -> UserResult<User> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    pub async fn list_users(&self, query: PageQuery<UserSortField>) -> UserResult<Page<User>> {
        self.repository.find_page(query).await
    }

    /// Partial update. An id with no live user is `NotFound`.
    pub async fn update_user(&self, id: Uuid, input: UpdateUser) -> UserResult<User> {
        input.validate()?;

        let mut user = self.get_user(id).await?;

        if let Some(email) = input.email.as_deref().map(normalize_email)
            && email != user.email
            && self.repository.email_taken(&email, Some(id)).await?
        {
            return Err(UserError::DuplicateEmail(email));
        }

        user.apply_update(input);
        self.repository.update(user).await
    }

    pub async fn delete_user(&self, id: Uuid) -> UserResult<()> {
        if !self.repository.soft_delete(id).await? {
            return Err(UserError::NotFound(id));
        }
        Ok(())
    }
}
