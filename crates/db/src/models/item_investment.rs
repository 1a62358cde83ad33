//! Item investment model and aggregate DTOs.

use serde::Serialize;
use sqlx::FromRow;
use stockroom_core::types::{Date, DbId, Timestamp};

/// A row from the `item_investments` table (1:1 with `items`).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ItemInvestment {
    pub id: DbId,
    pub item_id: DbId,
    pub initial_price: f64,
    pub current_value: f64,
    pub depreciation_rate: i32,
    pub last_depreciation_date: Date,
    pub created_at: Timestamp,
}

/// Investment row joined with the owning item's name and current rate.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ItemInvestmentDetail {
    pub item_id: DbId,
    pub item_name: String,
    pub depreciated_rate: i32,
    pub initial_price: f64,
    pub current_value: f64,
    pub last_depreciation_date: Date,
}

/// Totals across every investment row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InvestmentTotals {
    pub total_investment: f64,
    pub depreciated_value: f64,
}
