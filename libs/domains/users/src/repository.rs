use async_trait::async_trait;
use axum_helpers::{Page, PageQuery, SortDirection};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{User, UserSortField};

/// Repository trait for User persistence
///
/// Every read ignores soft-deleted users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: User) -> UserResult<User>;

    async fn find_by_id(&self, id: Uuid) -> UserResult<Option<User>>;

    async fn find_page(&self, query: PageQuery<UserSortField>) -> UserResult<Page<User>>;

    /// Persists every field of an existing live user
    async fn update(&self, user: User) -> UserResult<User>;

    /// Returns `false` when no live user has this id
    async fn soft_delete(&self, id: Uuid) -> UserResult<bool>;

    /// Whether a live user other than `exclude` owns `email`
    async fn email_taken(&self, email: &str, exclude: Option<Uuid>) -> UserResult<bool>;
}

#[derive(Debug, Clone)]
struct StoredUser {
    user: User,
    deleted: bool,
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, StoredUser>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn compare(a: &User, b: &User, field: UserSortField) -> Ordering {
    let primary = match field {
        UserSortField::Id => Ordering::Equal,
        UserSortField::Name => a.name.cmp(&b.name),
        UserSortField::Email => a.email.cmp(&b.email),
        UserSortField::CreatedAt => a.created_at.cmp(&b.created_at),
        UserSortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
    };
    primary.then_with(|| a.id.cmp(&b.id))
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> UserResult<User> {
        let mut users = self.users.write().await;

        let taken = users
            .values()
            .any(|s| !s.deleted && s.user.email == user.email);
        if taken {
            return Err(UserError::DuplicateEmail(user.email));
        }

        users.insert(
            user.id,
            StoredUser {
                user: user.clone(),
                deleted: false,
            },
        );

        tracing::info!(user_id = %user.id, "Created user");
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .get(&id)
            .filter(|s| !s.deleted)
            .map(|s| s.user.clone()))
    }

    async fn find_page(&self, query: PageQuery<UserSortField>) -> UserResult<Page<User>> {
        let users = self.users.read().await;

        let mut live: Vec<User> = users
            .values()
            .filter(|s| !s.deleted)
            .map(|s| s.user.clone())
            .collect();

        live.sort_by(|a, b| {
            let ordering = compare(a, b, query.field);
            match query.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });

        let total = live.len() as u64;
        let content = live
            .into_iter()
            .skip(query.offset() as usize)
            .take(query.size as usize)
            .collect();

        Ok(Page::new(content, query.page, query.size, total))
    }

    async fn update(&self, user: User) -> UserResult<User> {
        let mut users = self.users.write().await;

        match users.get_mut(&user.id) {
            Some(stored) if !stored.deleted => {
                stored.user = user.clone();
                tracing::info!(user_id = %user.id, "Updated user");
                Ok(user)
            }
            _ => Err(UserError::NotFound(user.id)),
        }
    }

    async fn soft_delete(&self, id: Uuid) -> UserResult<bool> {
        let mut users = self.users.write().await;

        match users.get_mut(&id) {
            Some(stored) if !stored.deleted => {
                stored.deleted = true;
                stored.user.updated_at = chrono::Utc::now();
                tracing::info!(user_id = %id, "Soft-deleted user");
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn email_taken(&self, email: &str, exclude: Option<Uuid>) -> UserResult<bool> {
        let users = self.users.read().await;
        Ok(users.values().any(|s| {
            !s.deleted && Some(s.user.id) != exclude && s.user.email == email
        }))
    }
}
