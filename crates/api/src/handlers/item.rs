//! Handlers for the `/items` resource.
//!
//! Create and update take `multipart/form-data` so a photo can travel with the
//! item fields. Every other endpoint is JSON.

use std::str::FromStr;

use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{NaiveDate, Utc};
use stockroom_core::error::CoreError;
use stockroom_core::types::DbId;
use stockroom_db::models::item::{CreateItem, Item, UpdateItem};
use stockroom_db::repositories::ItemRepo;

use crate::error::{AppError, AppResult};
use crate::extract::ApiPath;
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::storage::{remove_photo, save_photo};

/// Expected format of the `purchase_date` form field.
const DATE_FORMAT: &str = "%Y-%m-%d";

// ---------------------------------------------------------------------------
// Multipart form
// ---------------------------------------------------------------------------

/// Item fields as received in a multipart form. Absent fields stay `None`.
///
/// Extracted from the request body; a body that is not multipart is rejected
/// with a 400 envelope.
#[derive(Debug, Default)]
pub struct ItemForm {
    name: Option<String>,
    category_id: Option<DbId>,
    price: Option<f64>,
    purchase_date: Option<NaiveDate>,
    depreciated_rate: Option<i32>,
    /// Original filename and contents of the uploaded photo.
    photo: Option<(String, Vec<u8>)>,
}

impl ItemForm {
    async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?
        {
            let name = field.name().unwrap_or("").to_string();
            if name == "photo" {
                let filename = field.file_name().unwrap_or("").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                // Browsers send an empty part when no file was chosen.
                if !(filename.is_empty() && data.is_empty()) {
                    form.photo = Some((filename, data.to_vec()));
                }
                continue;
            }

            let text = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            match name.as_str() {
                "name" => form.name = Some(text),
                "category_id" => form.category_id = Some(parse_field(&name, &text)?),
                "price" => form.price = Some(parse_field(&name, &text)?),
                "purchase_date" => form.purchase_date = Some(parse_date(&text)?),
                "depreciated_rate" => form.depreciated_rate = Some(parse_field(&name, &text)?),
                _ => {} // ignore unknown fields
            }
        }

        Ok(form)
    }
}

impl<S> FromRequest<S> for ItemForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let multipart = Multipart::from_request(req, state).await?;
        Self::read(multipart).await
    }
}

fn parse_field<T: FromStr>(field: &str, text: &str) -> AppResult<T> {
    text.trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid value for '{field}': '{text}'")))
}

fn parse_date(text: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).map_err(|_| {
        AppError::BadRequest(format!(
            "Invalid purchase_date '{text}', expected YYYY-MM-DD"
        ))
    })
}

fn missing(field: &str) -> AppError {
    AppError::BadRequest(format!("Missing required '{field}' field"))
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Item", id })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/items
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<ApiResponse<Vec<Item>>>> {
    let items = ItemRepo::list(&state.pool).await?;
    Ok(ApiResponse::ok("Items retrieved successfully", items))
}

/// GET /api/items/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<ApiResponse<Item>>> {
    let item = ItemRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(not_found(id))?;
    Ok(ApiResponse::ok("Item retrieved successfully", item))
}

/// POST /api/items
///
/// Multipart form with `name`, `category_id`, `price`, `purchase_date`,
/// `depreciated_rate` and a `photo` file, all required. The item and its
/// investment record are written in one transaction; if that fails the stored
/// photo is removed again.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    form: ItemForm,
) -> AppResult<(StatusCode, Json<ApiResponse<Item>>)> {
    let (filename, data) = form.photo.ok_or_else(|| missing("photo"))?;

    let mut input = CreateItem {
        name: form.name.ok_or_else(|| missing("name"))?,
        category_id: form.category_id.ok_or_else(|| missing("category_id"))?,
        photo_url: String::new(),
        price: form.price.ok_or_else(|| missing("price"))?,
        purchase_date: form.purchase_date.ok_or_else(|| missing("purchase_date"))?,
        depreciated_rate: form
            .depreciated_rate
            .ok_or_else(|| missing("depreciated_rate"))?,
    };
    input.validate()?;

    input.photo_url = save_photo(&state.config.upload_dir, &filename, &data).await?;

    let item = match ItemRepo::create(&state.pool, &input).await {
        Ok(item) => item,
        Err(e) => {
            remove_photo(&input.photo_url).await;
            return Err(e.into());
        }
    };

    tracing::info!(item_id = item.id, user_id = user.user_id, "Item created");
    Ok(ApiResponse::created("Item created successfully", item))
}

/// PUT /api/items/{id}
///
/// Multipart form with any subset of the create fields. A new `photo`
/// replaces the stored one; the old file is removed once the update commits.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<DbId>,
    form: ItemForm,
) -> AppResult<Json<ApiResponse<Item>>> {
    let mut input = UpdateItem {
        name: form.name,
        category_id: form.category_id,
        photo_url: None,
        price: form.price,
        purchase_date: form.purchase_date,
        depreciated_rate: form.depreciated_rate,
    };
    if !input.has_changes() && form.photo.is_none() {
        return Err(CoreError::Validation("No fields to update".into()).into());
    }
    input.validate()?;

    let existing = ItemRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(not_found(id))?;

    if let Some((filename, data)) = &form.photo {
        input.photo_url = Some(save_photo(&state.config.upload_dir, filename, data).await?);
    }

    let updated = match ItemRepo::update(&state.pool, id, &input).await {
        Ok(Some(item)) => item,
        Ok(None) => {
            discard_new_photo(&input).await;
            return Err(not_found(id));
        }
        Err(e) => {
            discard_new_photo(&input).await;
            return Err(e.into());
        }
    };

    if input.photo_url.is_some() {
        remove_photo(&existing.photo_url).await;
    }

    tracing::info!(item_id = id, user_id = user.user_id, "Item updated");
    Ok(ApiResponse::ok("Item updated successfully", updated))
}

/// DELETE /api/items/{id}
///
/// Soft-deletes the item, then removes its photo file.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<ApiResponse<()>>> {
    let photo_url = ItemRepo::soft_delete(&state.pool, id)
        .await?
        .ok_or(not_found(id))?;

    remove_photo(&photo_url).await;

    tracing::info!(item_id = id, user_id = user.user_id, "Item deleted");
    Ok(ApiResponse::message("Item deleted successfully"))
}

/// GET /api/items/replacement
///
/// Run the replacement sweep now and return every swept item with its
/// refreshed usage days and replacement flag.
pub async fn replacement(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<ApiResponse<Vec<Item>>>> {
    let today = Utc::now().date_naive();
    let items =
        ItemRepo::sweep_replacement(&state.pool, state.config.replacement_threshold_days, today)
            .await?;

    let message = if items.is_empty() {
        "No replacement items available"
    } else {
        "Replacement items retrieved successfully"
    };
    Ok(ApiResponse::ok(message, items))
}

async fn discard_new_photo(input: &UpdateItem) {
    if let Some(path) = &input.photo_url {
        remove_photo(path).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numeric_fields() {
        assert_eq!(parse_field::<i64>("category_id", " 7 ").unwrap(), 7);
        assert_eq!(parse_field::<f64>("price", "19.5").unwrap(), 19.5);
        assert!(parse_field::<i32>("depreciated_rate", "ten").is_err());
    }

    #[test]
    fn parses_iso_dates_only() {
        assert_eq!(
            parse_date("2024-03-09").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
        );
        assert!(parse_date("09/03/2024").is_err());
        assert!(parse_date("").is_err());
    }
}
