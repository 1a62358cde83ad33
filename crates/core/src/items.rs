//! Field validation for inventory items and their photos.

use crate::depreciation::validate_depreciation_rate;
use crate::error::CoreError;
use crate::types::DbId;

/// Photo file extensions accepted on upload (lowercase, without the dot).
pub const ALLOWED_PHOTO_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif"];

/// Reject blank item names.
pub fn validate_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation("Item name is required".into()));
    }
    Ok(())
}

/// Prices must be finite and strictly positive.
pub fn validate_price(price: f64) -> Result<(), CoreError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(CoreError::Validation(format!(
            "Item price must be greater than 0, got {price}"
        )));
    }
    Ok(())
}

pub fn validate_category_id(category_id: DbId) -> Result<(), CoreError> {
    if category_id <= 0 {
        return Err(CoreError::Validation(format!(
            "Invalid category id {category_id}"
        )));
    }
    Ok(())
}

/// Validate every field required to create an item.
pub fn validate_new_item(
    name: &str,
    category_id: DbId,
    price: f64,
    depreciated_rate: i32,
) -> Result<(), CoreError> {
    validate_name(name)?;
    validate_category_id(category_id)?;
    validate_price(price)?;
    validate_depreciation_rate(depreciated_rate)
}

/// Extract and check the extension of an uploaded photo's filename.
///
/// Returns the lowercase extension on success.
pub fn photo_extension(filename: &str) -> Result<String, CoreError> {
    let ext = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();
    if !ALLOWED_PHOTO_EXTENSIONS.contains(&ext.as_str()) {
        return Err(CoreError::Validation(format!(
            "Unsupported photo format '{filename}'. Supported: {}",
            ALLOWED_PHOTO_EXTENSIONS.join(", ")
        )));
    }
    Ok(ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_name_is_rejected() {
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name("Laptop").is_ok());
    }

    #[test]
    fn price_must_be_positive() {
        assert!(validate_price(0.0).is_err());
        assert!(validate_price(-5.0).is_err());
        assert!(validate_price(f64::NAN).is_err());
        assert!(validate_price(0.01).is_ok());
    }

    #[test]
    fn new_item_checks_all_fields() {
        assert!(validate_new_item("Desk", 1, 250.0, 10).is_ok());
        assert!(validate_new_item("Desk", 0, 250.0, 10).is_err());
        assert!(validate_new_item("Desk", 1, 250.0, 120).is_err());
    }

    #[test]
    fn photo_extension_is_normalised() {
        assert_eq!(photo_extension("Front.JPG").unwrap(), "jpg");
        assert_eq!(photo_extension("a.b.png").unwrap(), "png");
    }

    #[test]
    fn unsupported_photo_extension_is_rejected() {
        assert!(photo_extension("malware.exe").is_err());
        assert!(photo_extension("no_extension").is_err());
    }
}
