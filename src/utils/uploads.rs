//! Multipart image plumbing.
//!
//! Uploaded parts are read into memory (bounded by the configured limit),
//! staged to a temp file, and published through the media store. The staged
//! file is removed whether publishing succeeds or fails.

use std::path::Path;

use axum::extract::multipart::Field;
use tokio::fs;
use uuid::Uuid;

use vidstream_core::{AppError, MediaStore};

/// Supported image content types and their file extensions.
const ALLOWED_IMAGE_TYPES: [(&str, &str); 4] = [
    ("image/jpeg", "jpg"),
    ("image/png", "png"),
    ("image/webp", "webp"),
    ("image/gif", "gif"),
];

#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub bytes: Vec<u8>,
    pub extension: &'static str,
}

/// Read one multipart file part as an image, enforcing content type and size.
pub async fn read_image_field(
    field: Field<'_>,
    max_bytes: usize,
) -> Result<UploadedImage, AppError> {
    let content_type = field.content_type().unwrap_or_default().to_string();
    let extension = ALLOWED_IMAGE_TYPES
        .iter()
        .find(|(mime, _)| *mime == content_type)
        .map(|(_, ext)| *ext)
        .ok_or_else(|| {
            AppError::validation(
                "Unsupported image type",
                vec![format!(
                    "content type '{}' is not an accepted image format",
                    content_type
                )],
            )
        })?;

    let bytes = field
        .bytes()
        .await
        .map_err(|_| AppError::validation("Invalid file upload", vec![]))?;

    if bytes.is_empty() {
        return Err(AppError::validation("Uploaded file is empty", vec![]));
    }
    if bytes.len() > max_bytes {
        return Err(AppError::validation(
            "Uploaded file is too large",
            vec![format!("maximum upload size is {} bytes", max_bytes)],
        ));
    }

    Ok(UploadedImage {
        bytes: bytes.to_vec(),
        extension,
    })
}

/// Stage the image locally, publish it under `key`, and return the stored
/// URL. The staged file is removed on every path.
pub async fn publish_image(
    media: &dyn MediaStore,
    image: &UploadedImage,
    key: &str,
) -> Result<String, AppError> {
    let staged =
        std::env::temp_dir().join(format!("vidstream-upload-{}.{}", Uuid::new_v4(), image.extension));
    fs::write(&staged, &image.bytes).await?;

    publish_staged(media, &staged, key).await
}

async fn publish_staged(
    media: &dyn MediaStore,
    staged: &Path,
    key: &str,
) -> Result<String, AppError> {
    let result = media.store(staged, key).await;

    if let Err(err) = fs::remove_file(staged).await {
        tracing::warn!(path = %staged.display(), error = %err, "failed to remove staged upload");
    }

    result.map_err(|e| AppError::internal(anyhow::anyhow!("Media upload failed: {}", e)))
}
