//! Inventory item model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use stockroom_core::depreciation::validate_depreciation_rate;
use stockroom_core::error::CoreError;
use stockroom_core::items::{validate_category_id, validate_name, validate_new_item, validate_price};
use stockroom_core::types::{Date, DbId, Timestamp};

/// An item row joined with its category name.
///
/// `total_usage_days` and `is_replacement_needed` are owned by the
/// replacement sweep; no client-facing DTO can set them.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Item {
    pub id: DbId,
    pub name: String,
    pub category_id: DbId,
    pub category_name: String,
    pub photo_url: String,
    pub price: f64,
    pub purchase_date: Date,
    pub total_usage_days: i32,
    pub is_replacement_needed: bool,
    pub depreciated_rate: i32,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new item.
#[derive(Debug, Clone)]
pub struct CreateItem {
    pub name: String,
    pub category_id: DbId,
    pub photo_url: String,
    pub price: f64,
    pub purchase_date: Date,
    pub depreciated_rate: i32,
}

impl CreateItem {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_new_item(
            &self.name,
            self.category_id,
            self.price,
            self.depreciated_rate,
        )
    }
}

/// DTO for a partial item update.
///
/// `None` means "not supplied" and leaves the column untouched; `Some` is
/// always applied, so presence never depends on a value being non-empty.
#[derive(Debug, Clone, Default)]
pub struct UpdateItem {
    pub name: Option<String>,
    pub category_id: Option<DbId>,
    pub photo_url: Option<String>,
    pub price: Option<f64>,
    pub purchase_date: Option<Date>,
    pub depreciated_rate: Option<i32>,
}

impl UpdateItem {
    /// Whether at least one field was supplied.
    pub fn has_changes(&self) -> bool {
        self.name.is_some()
            || self.category_id.is_some()
            || self.photo_url.is_some()
            || self.price.is_some()
            || self.purchase_date.is_some()
            || self.depreciated_rate.is_some()
    }

    /// Validate the supplied fields only.
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(category_id) = self.category_id {
            validate_category_id(category_id)?;
        }
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        if let Some(rate) = self.depreciated_rate {
            validate_depreciation_rate(rate)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_update_has_no_changes() {
        assert!(!UpdateItem::default().has_changes());
    }

    #[test]
    fn any_supplied_field_counts_as_change() {
        let update = UpdateItem {
            depreciated_rate: Some(0),
            ..Default::default()
        };
        assert!(update.has_changes());
        assert!(update.validate().is_ok());
    }

    #[test]
    fn supplied_fields_are_validated() {
        let update = UpdateItem {
            price: Some(0.0),
            ..Default::default()
        };
        assert!(update.validate().is_err());

        let update = UpdateItem {
            name: Some(String::new()),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }
}
