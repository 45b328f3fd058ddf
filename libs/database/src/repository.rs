//! Generic repository over SeaORM entities with soft-delete support.
//!
//! Rows are never physically removed. A soft-deleted row keeps its data but
//! carries `deleted = true` and is invisible to every read made through
//! [`BaseRepository::live`].

use std::marker::PhantomData;

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, Order, PaginatorTrait, QueryFilter, QueryOrder, Select,
};
use uuid::Uuid;

/// Entities addressed by a UUID key that carry a `deleted` flag and an
/// `updated_at` timestamp.
pub trait SoftDelete: EntityTrait {
    fn id_column() -> Self::Column;
    fn deleted_column() -> Self::Column;
    fn updated_at_column() -> Self::Column;
}

pub struct BaseRepository<E> {
    db: DatabaseConnection,
    _entity: PhantomData<E>,
}

impl<E> Clone for BaseRepository<E> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E> BaseRepository<E>
where
    E: SoftDelete,
    E::Model: Send + Sync,
{
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Select over rows that are not soft-deleted
    pub fn live(&self) -> Select<E> {
        E::find().filter(E::deleted_column().eq(false))
    }

    pub async fn find_live_by_id(&self, id: Uuid) -> Result<Option<E::Model>, DbErr> {
        self.live()
            .filter(E::id_column().eq(id))
            .one(&self.db)
            .await
    }

    pub async fn count_live(&self) -> Result<u64, DbErr> {
        self.live().count(&self.db).await
    }

    pub async fn insert<A>(&self, model: A) -> Result<E::Model, DbErr>
    where
        A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
        E::Model: IntoActiveModel<A>,
    {
        model.insert(&self.db).await
    }

    /// Writes the set columns of `model` to the live row `id` in one
    /// `UPDATE ... WHERE deleted = false RETURNING *`.
    ///
    /// The key and the `deleted` flag are never written, so a row deleted
    /// concurrently stays deleted. Returns `None` when no live row has this id.
    pub async fn update_live<A>(&self, id: Uuid, mut model: A) -> Result<Option<E::Model>, DbErr>
    where
        A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
        E::Model: IntoActiveModel<A>,
    {
        model.not_set(E::id_column());
        model.not_set(E::deleted_column());

        let mut updated = E::update_many()
            .set(model)
            .filter(E::id_column().eq(id))
            .filter(E::deleted_column().eq(false))
            .exec_with_returning(&self.db)
            .await?;

        Ok(updated.pop())
    }

    /// Fetches one zero-based page of `select` plus the total number of matching rows.
    ///
    /// Ties on `order_by` are broken by id so pages stay stable. A page whose
    /// offset does not fit a Postgres `BIGINT` is empty.
    pub async fn fetch_page(
        &self,
        select: Select<E>,
        order_by: E::Column,
        order: Order,
        page: u64,
        size: u64,
    ) -> Result<(Vec<E::Model>, u64), DbErr> {
        let paginator = select
            .order_by(order_by, order)
            .order_by_asc(E::id_column())
            .paginate(&self.db, size);

        let total = paginator.num_items().await?;
        let in_range = page
            .checked_mul(size)
            .is_some_and(|offset| offset <= i64::MAX as u64);
        if !in_range {
            return Ok((Vec::new(), total));
        }

        let items = paginator.fetch_page(page).await?;
        Ok((items, total))
    }

    /// Marks a live row as deleted and bumps `updated_at`.
    ///
    /// Returns `false` when no live row has this id.
    pub async fn soft_delete(&self, id: Uuid) -> Result<bool, DbErr> {
        let result = E::update_many()
            .col_expr(E::deleted_column(), Expr::value(true))
            .col_expr(
                E::updated_at_column(),
                Expr::value(chrono::Utc::now().fixed_offset()),
            )
            .filter(E::id_column().eq(id))
            .filter(E::deleted_column().eq(false))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
