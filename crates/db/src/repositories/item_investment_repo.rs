//! Repository for the `item_investments` table.

use sqlx::{PgConnection, PgPool};
use stockroom_core::depreciation::current_value;
use stockroom_core::types::{Date, DbId};

use crate::models::item_investment::{InvestmentTotals, ItemInvestment, ItemInvestmentDetail};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, item_id, initial_price, current_value, depreciation_rate, \
                        last_depreciation_date, created_at";

/// Provides access to item investment records.
///
/// Rows are only ever written by [`ItemInvestmentRepo::create_for_item`],
/// which runs inside the transaction that creates the item.
pub struct ItemInvestmentRepo;

impl ItemInvestmentRepo {
    /// Insert the investment row for a freshly inserted item.
    ///
    /// Takes the connection of the caller's open transaction so the item and
    /// its investment commit or roll back together.
    pub async fn create_for_item(
        conn: &mut PgConnection,
        item_id: DbId,
        price: f64,
        depreciated_rate: i32,
        today: Date,
    ) -> Result<ItemInvestment, sqlx::Error> {
        let query = format!(
            "INSERT INTO item_investments
                (item_id, initial_price, current_value, depreciation_rate, last_depreciation_date)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ItemInvestment>(&query)
            .bind(item_id)
            .bind(price)
            .bind(current_value(price, depreciated_rate))
            .bind(depreciated_rate)
            .bind(today)
            .fetch_one(&mut *conn)
            .await
    }

    /// Find the investment record of an active item.
    pub async fn find_by_item_id(
        pool: &PgPool,
        item_id: DbId,
    ) -> Result<Option<ItemInvestmentDetail>, sqlx::Error> {
        sqlx::query_as::<_, ItemInvestmentDetail>(
            "SELECT inv.item_id, i.name AS item_name, i.depreciated_rate,
                    inv.initial_price, inv.current_value, inv.last_depreciation_date
             FROM item_investments inv
             JOIN items i ON i.id = inv.item_id
             WHERE inv.item_id = $1 AND i.status = 'active'",
        )
        .bind(item_id)
        .fetch_optional(pool)
        .await
    }

    /// Sum of initial prices and current values across every investment row.
    pub async fn totals(pool: &PgPool) -> Result<InvestmentTotals, sqlx::Error> {
        sqlx::query_as::<_, InvestmentTotals>(
            "SELECT COALESCE(SUM(initial_price), 0) AS total_investment,
                    COALESCE(SUM(current_value), 0) AS depreciated_value
             FROM item_investments",
        )
        .fetch_one(pool)
        .await
    }
}
