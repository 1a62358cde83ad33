//! Handlers for the `/investments` resource (read-only).

use axum::extract::State;
use axum::Json;
use stockroom_core::error::CoreError;
use stockroom_core::types::DbId;
use stockroom_db::models::item_investment::{InvestmentTotals, ItemInvestmentDetail};
use stockroom_db::repositories::ItemInvestmentRepo;

use crate::error::{AppError, AppResult};
use crate::extract::ApiPath;
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/investments
///
/// Total purchase price and total depreciated value across all items.
pub async fn totals(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<ApiResponse<InvestmentTotals>>> {
    let totals = ItemInvestmentRepo::totals(&state.pool).await?;
    Ok(ApiResponse::ok("Investment totals retrieved successfully", totals))
}

/// GET /api/investments/{item_id}
pub async fn get_by_item(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiPath(item_id): ApiPath<DbId>,
) -> AppResult<Json<ApiResponse<ItemInvestmentDetail>>> {
    let investment = ItemInvestmentRepo::find_by_item_id(&state.pool, item_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ItemInvestment",
            id: item_id,
        }))?;
    Ok(ApiResponse::ok("Investment retrieved successfully", investment))
}
