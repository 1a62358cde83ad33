//! On-disk storage for item photos.
//!
//! Files are written as `<upload_dir>/<uuid>.<ext>`; the client's filename only
//! contributes its (validated) extension. The returned path is what gets stored
//! in `items.photo_url`.

use std::path::Path;

use stockroom_core::items::photo_extension;

use crate::error::{AppError, AppResult};

/// Write an uploaded photo and return its stored path.
pub async fn save_photo(upload_dir: &Path, filename: &str, data: &[u8]) -> AppResult<String> {
    let ext = photo_extension(filename)?;

    tokio::fs::create_dir_all(upload_dir)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to create upload dir: {e}")))?;

    let stored_name = format!("{}.{ext}", uuid::Uuid::new_v4());
    let path = upload_dir.join(stored_name);
    tokio::fs::write(&path, data)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to write photo: {e}")))?;

    tracing::debug!(path = %path.display(), bytes = data.len(), "Photo stored");
    Ok(path.to_string_lossy().into_owned())
}

/// Remove a stored photo. Failures are logged, never returned.
pub async fn remove_photo(photo_url: &str) {
    if photo_url.is_empty() {
        return;
    }
    if let Err(e) = tokio::fs::remove_file(photo_url).await {
        tracing::warn!(path = %photo_url, error = %e, "Failed to remove photo file");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn saves_under_generated_name() {
        let dir = tempfile::tempdir().unwrap();
        let stored = save_photo(dir.path(), "../../etc/Passwd.PNG", b"img")
            .await
            .unwrap();

        let path = Path::new(&stored);
        assert_eq!(path.parent(), Some(dir.path()));
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("png"));
        assert_eq!(tokio::fs::read(path).await.unwrap(), b"img");

        remove_photo(&stored).await;
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn rejects_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let result = save_photo(dir.path(), "script.sh", b"#!/bin/sh").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn removing_missing_file_is_silent() {
        remove_photo("/nonexistent/photo.png").await;
        remove_photo("").await;
    }
}
