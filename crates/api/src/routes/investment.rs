//! Route definitions for the `/investments` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::investment;
use crate::state::AppState;

/// Routes mounted at `/investments`.
///
/// ```text
/// GET /            -> totals
/// GET /{item_id}   -> get_by_item
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(investment::totals))
        .route("/{item_id}", get(investment::get_by_item))
}
