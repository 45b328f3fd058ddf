use async_trait::async_trait;
use axum_helpers::{Page, PageQuery};
use database::BaseRepository;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, PaginatorTrait, QueryFilter, SqlErr};
use uuid::Uuid;

use crate::{
    entity,
    error::{UserError, UserResult},
    models::{User, UserSortField},
    repository::UserRepository,
};

#[derive(Clone)]
pub struct PgUserRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

/// The partial unique index on live emails can still fire when two requests race.
fn map_write_error(err: DbErr, email: &str) -> UserError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => UserError::DuplicateEmail(email.to_string()),
        _ => UserError::Database(err),
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: User) -> UserResult<User> {
        let email = user.email.clone();
        let model = self
            .base
            .insert(entity::ActiveModel::from(user))
            .await
            .map_err(|e| map_write_error(e, &email))?;

        tracing::info!(user_id = %model.id, "Created user");
        Ok(model.into())
    }

    async fn find_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let model = self.base.find_live_by_id(id).await?;
        Ok(model.map(Into::into))
    }

    async fn find_page(&self, query: PageQuery<UserSortField>) -> UserResult<Page<User>> {
        let (models, total) = self
            .base
            .fetch_page(
                self.base.live(),
                query.field.into(),
                query.direction.into(),
                query.page,
                query.size,
            )
            .await?;

        let users = models.into_iter().map(Into::into).collect();
        Ok(Page::new(users, query.page, query.size, total))
    }

    async fn update(&self, user: User) -> UserResult<User> {
        let id = user.id;
        let email = user.email.clone();
        let model = self
            .base
            .update_live(id, entity::ActiveModel::from(user))
            .await
            .map_err(|e| map_write_error(e, &email))?
            .ok_or(UserError::NotFound(id))?;

        tracing::info!(user_id = %id, "Updated user");
        Ok(model.into())
    }

    async fn soft_delete(&self, id: Uuid) -> UserResult<bool> {
        let deleted = self.base.soft_delete(id).await?;
        if deleted {
            tracing::info!(user_id = %id, "Soft-deleted user");
        }
        Ok(deleted)
    }

    async fn email_taken(&self, email: &str, exclude: Option<Uuid>) -> UserResult<bool> {
        let mut select = self
            .base
            .live()
            .filter(entity::Column::Email.eq(email));
        if let Some(id) = exclude {
            select = select.filter(entity::Column::Id.ne(id));
        }

        let count = select.count(self.base.db()).await?;
        Ok(count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateUser;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Value};
    use std::collections::BTreeMap;

    fn model(name: &str) -> entity::Model {
        let now = chrono::Utc::now().fixed_offset();
        entity::Model {
            id: Uuid::now_v7(),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: None,
            deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    fn count_row(total: i64) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([("num_items", Value::from(total))])
    }

    #[tokio::test]
    async fn test_find_by_id_maps_row_to_domain() {
        let row = model("Ada");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row.clone()]])
            .into_connection();
        let repo = PgUserRepository::new(db.clone());

        let user = repo.find_by_id(row.id).await.unwrap().unwrap();
        assert_eq!(user.id, row.id);
        assert_eq!(user.email, "ada@example.com");

        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains("deleted"));
    }

    #[tokio::test]
    async fn test_find_page_wraps_rows_and_total() {
        let rows = vec![model("Ada"), model("Grace")];
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![count_row(3)]])
            .append_query_results([rows])
            .into_connection();
        let repo = PgUserRepository::new(db);

        let query = PageQuery {
            size: 2,
            ..PageQuery::default()
        };
        let page = repo.find_page(query).await.unwrap();

        assert_eq!(page.content.len(), 2);
        assert_eq!(page.total_elements, 3);
        assert_eq!(page.total_pages, 2);
    }

    #[tokio::test]
    async fn test_update_missing_user_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();
        let repo = PgUserRepository::new(db);

        let user = User::from(CreateUser {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone: None,
        });

        let result = repo.update(user).await;
        assert!(matches!(result, Err(UserError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_soft_delete_reports_missing_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();
        let repo = PgUserRepository::new(db);

        assert!(!repo.soft_delete(Uuid::now_v7()).await.unwrap());
    }

    #[test]
    fn test_map_write_error_passes_through_other_errors() {
        let err = map_write_error(DbErr::Custom("boom".to_string()), "ada@example.com");
        assert!(matches!(err, UserError::Database(_)));
    }
}
