//! Repository for the `items` table.

use chrono::Utc;
use sqlx::{PgExecutor, PgPool};
use stockroom_core::depreciation::sweep_item;
use stockroom_core::status::{STATUS_ACTIVE, STATUS_DELETED};
use stockroom_core::types::{Date, DbId};

use crate::models::item::{CreateItem, Item, UpdateItem};
use crate::repositories::ItemInvestmentRepo;

/// Item columns joined with the category name, shared across read queries.
const SELECT_JOINED: &str = "SELECT i.id, i.name, i.category_id, c.name AS category_name, \
                              i.photo_url, i.price, i.purchase_date, i.total_usage_days, \
                              i.is_replacement_needed, i.depreciated_rate, i.status, \
                              i.created_at, i.updated_at \
                              FROM items i JOIN categories c ON c.id = i.category_id";

/// Advisory lock key held for the duration of a replacement sweep.
const SWEEP_LOCK_KEY: i64 = 0x5354_4B52_4D53;

/// Provides transactional CRUD for items and the replacement sweep.
pub struct ItemRepo;

impl ItemRepo {
    /// Insert an item together with its investment record.
    ///
    /// Both rows are written in one transaction; if either insert fails
    /// nothing is persisted. Returns the item re-read with its category name.
    pub async fn create(pool: &PgPool, input: &CreateItem) -> Result<Item, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let (id,): (DbId,) = sqlx::query_as(
            "INSERT INTO items (name, category_id, photo_url, price, purchase_date, depreciated_rate)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id",
        )
        .bind(&input.name)
        .bind(input.category_id)
        .bind(&input.photo_url)
        .bind(input.price)
        .bind(input.purchase_date)
        .bind(input.depreciated_rate)
        .fetch_one(&mut *tx)
        .await?;

        let today = Utc::now().date_naive();
        ItemInvestmentRepo::create_for_item(
            &mut tx,
            id,
            input.price,
            input.depreciated_rate,
            today,
        )
        .await?;

        let item = Self::fetch_active(&mut *tx, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;

        tx.commit().await?;
        tracing::debug!(item_id = id, "Item created with investment record");
        Ok(item)
    }

    /// Find an active item by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Item>, sqlx::Error> {
        Self::fetch_active(pool, id).await
    }

    /// Find an item by ID, including soft-deleted rows.
    pub async fn find_by_id_include_deleted(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Item>, sqlx::Error> {
        let query = format!("{SELECT_JOINED} WHERE i.id = $1");
        sqlx::query_as::<_, Item>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all active items ordered by ID.
    pub async fn list(pool: &PgPool) -> Result<Vec<Item>, sqlx::Error> {
        let query = format!("{SELECT_JOINED} WHERE i.status = 'active' ORDER BY i.id");
        sqlx::query_as::<_, Item>(&query).fetch_all(pool).await
    }

    /// Update an item. Only `Some` fields in `input` are applied.
    ///
    /// Usage days and the replacement flag are never touched here. The
    /// investment record keeps its creation-time values.
    ///
    /// Returns `None` if no active row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateItem,
    ) -> Result<Option<Item>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let updated: Option<(DbId,)> = sqlx::query_as(
            "UPDATE items SET
                name = COALESCE($2, name),
                category_id = COALESCE($3, category_id),
                photo_url = COALESCE($4, photo_url),
                price = COALESCE($5, price),
                purchase_date = COALESCE($6, purchase_date),
                depreciated_rate = COALESCE($7, depreciated_rate),
                updated_at = NOW()
             WHERE id = $1 AND status = 'active'
             RETURNING id",
        )
        .bind(id)
        .bind(&input.name)
        .bind(input.category_id)
        .bind(&input.photo_url)
        .bind(input.price)
        .bind(input.purchase_date)
        .bind(input.depreciated_rate)
        .fetch_optional(&mut *tx)
        .await?;

        if updated.is_none() {
            return Ok(None);
        }

        let item = Self::fetch_active(&mut *tx, id).await?;
        tx.commit().await?;
        Ok(item)
    }

    /// Soft-delete an active item, returning its stored photo path.
    ///
    /// Returns `None` if no active row with the given `id` exists.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<Option<String>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let photo: Option<(String,)> = sqlx::query_as(
            "UPDATE items SET status = $2, updated_at = NOW()
             WHERE id = $1 AND status = $3
             RETURNING photo_url",
        )
        .bind(id)
        .bind(STATUS_DELETED)
        .bind(STATUS_ACTIVE)
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(photo.map(|(photo_url,)| photo_url))
    }

    /// Recompute usage days and the replacement flag of every active item.
    ///
    /// Runs in a single transaction that first takes a transaction-scoped
    /// advisory lock, so two sweeps never interleave. Each item is written
    /// individually; any failure rolls the whole sweep back. Returns every
    /// swept item with its new values.
    pub async fn sweep_replacement(
        pool: &PgPool,
        threshold_days: i32,
        today: Date,
    ) -> Result<Vec<Item>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(SWEEP_LOCK_KEY)
            .execute(&mut *tx)
            .await?;

        let query = format!("{SELECT_JOINED} WHERE i.status = 'active' ORDER BY i.id");
        let items = sqlx::query_as::<_, Item>(&query)
            .fetch_all(&mut *tx)
            .await?;

        let mut swept = Vec::with_capacity(items.len());
        for mut item in items {
            let state = sweep_item(
                item.purchase_date,
                item.is_replacement_needed,
                threshold_days,
                today,
            );

            sqlx::query(
                "UPDATE items SET total_usage_days = $2, is_replacement_needed = $3
                 WHERE id = $1",
            )
            .bind(item.id)
            .bind(state.total_usage_days)
            .bind(state.is_replacement_needed)
            .execute(&mut *tx)
            .await?;

            item.total_usage_days = state.total_usage_days;
            item.is_replacement_needed = state.is_replacement_needed;
            swept.push(item);
        }

        tx.commit().await?;

        let flagged = swept.iter().filter(|i| i.is_replacement_needed).count();
        tracing::info!(
            swept = swept.len(),
            flagged,
            threshold_days,
            "Replacement sweep committed"
        );
        Ok(swept)
    }

    async fn fetch_active<'e, E>(executor: E, id: DbId) -> Result<Option<Item>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("{SELECT_JOINED} WHERE i.id = $1 AND i.status = 'active'");
        sqlx::query_as::<_, Item>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }
}
