//! Handlers for the `/categories` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use stockroom_core::error::CoreError;
use stockroom_core::types::DbId;
use stockroom_db::models::category::{Category, CreateCategory, UpdateCategory};
use stockroom_db::repositories::CategoryRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{ApiJson, ApiPath};
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/categories
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<ApiResponse<Vec<Category>>>> {
    let categories = CategoryRepo::list(&state.pool).await?;
    Ok(ApiResponse::ok("Categories retrieved successfully", categories))
}

/// POST /api/categories
///
/// Both `name` and `description` are required and must be non-blank.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(input): ApiJson<CreateCategory>,
) -> AppResult<(StatusCode, Json<ApiResponse<Category>>)> {
    require_non_blank("name", &input.name)?;
    require_non_blank("description", &input.description)?;

    let category = CategoryRepo::create(&state.pool, &input).await?;
    tracing::info!(category_id = category.id, user_id = user.user_id, "Category created");
    Ok(ApiResponse::created("Category created successfully", category))
}

/// GET /api/categories/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<ApiResponse<Category>>> {
    let category = CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(not_found(id))?;
    Ok(ApiResponse::ok("Category retrieved successfully", category))
}

/// PUT /api/categories/{id}
///
/// Partial update; at least one field must be supplied.
pub async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiPath(id): ApiPath<DbId>,
    ApiJson(input): ApiJson<UpdateCategory>,
) -> AppResult<Json<ApiResponse<Category>>> {
    if !input.has_changes() {
        return Err(CoreError::Validation("No fields to update".into()).into());
    }
    if let Some(name) = &input.name {
        require_non_blank("name", name)?;
    }
    if let Some(description) = &input.description {
        require_non_blank("description", description)?;
    }

    let category = CategoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(not_found(id))?;
    Ok(ApiResponse::ok("Category updated successfully", category))
}

/// DELETE /api/categories/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<ApiResponse<()>>> {
    if !CategoryRepo::soft_delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(category_id = id, user_id = user.user_id, "Category deleted");
    Ok(ApiResponse::message("Category deleted successfully"))
}

fn require_non_blank(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("Category {field} is required")).into());
    }
    Ok(())
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Category",
        id,
    })
}
