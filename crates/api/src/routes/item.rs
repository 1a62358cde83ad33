//! Route definitions for the `/items` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::item;
use crate::state::AppState;

/// Routes mounted at `/items`.
///
/// ```text
/// GET    /              -> list
/// POST   /              -> create (multipart)
/// GET    /replacement   -> replacement
/// GET    /{id}          -> get_by_id
/// PUT    /{id}          -> update (multipart)
/// DELETE /{id}          -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(item::list).post(item::create))
        .route("/replacement", get(item::replacement))
        .route(
            "/{id}",
            get(item::get_by_id).put(item::update).delete(item::delete),
        )
}
