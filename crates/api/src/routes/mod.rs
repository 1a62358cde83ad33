pub mod auth;
pub mod category;
pub mod health;
pub mod investment;
pub mod item;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                 register (public)
/// /auth/login                    login (public)
/// /auth/logout                   logout (requires auth)
///
/// /categories                    list, create
/// /categories/{id}               get, update, delete
///
/// /items                         list, create (multipart)
/// /items/replacement             run replacement sweep
/// /items/{id}                    get, update (multipart), delete
///
/// /investments                   totals
/// /investments/{item_id}         investment of one item
/// ```
///
/// Everything except register and login requires the `token` cookie.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/categories", category::router())
        .nest("/items", item::router())
        .nest("/investments", investment::router())
}
