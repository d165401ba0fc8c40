//! Loading product images from disk.

use std::path::Path;

use shopverse_core::validation::{ImageError, ImageFile, to_data_url, validate_image};

use crate::error::{AppError, Result};

/// An image read from disk and accepted by [`validate_image`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedImage {
    pub file: ImageFile,
    pub bytes: Vec<u8>,
}

impl LoadedImage {
    /// The image as a `data:` URL, usable as a product `image_url`.
    #[must_use]
    pub fn data_url(&self) -> String {
        to_data_url(&self.file.mime_type, &self.bytes)
    }
}

/// MIME type inferred from the file extension.
#[must_use]
pub fn mime_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        "avif" => "image/avif",
        _ => "application/octet-stream",
    }
}

/// Read an image file, validating type and size before loading the bytes.
///
/// # Errors
///
/// Returns `AppError::Validation` for a missing file, a non-image or an
/// oversized file, and `AppError::Unexpected` for other I/O failures.
pub async fn load_image_file(path: impl AsRef<Path>) -> Result<LoadedImage> {
    let path = path.as_ref();
    let metadata = match tokio::fs::metadata(path).await {
        Ok(metadata) if metadata.is_file() => metadata,
        Ok(_) => return Err(ImageError::NoFile.into()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ImageError::NoFile.into());
        }
        Err(e) => return Err(AppError::Unexpected(format!("{}: {e}", path.display()))),
    };

    let file = ImageFile {
        name: path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        mime_type: mime_type_for(path).to_string(),
        size: metadata.len(),
    };
    validate_image(Some(&file))?;

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| AppError::Unexpected(format!("{}: {e}", path.display())))?;
    tracing::debug!(name = %file.name, size = file.size, "Loaded image");

    Ok(LoadedImage { file, bytes })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_type_for() {
        assert_eq!(mime_type_for(Path::new("lamp.JPG")), "image/jpeg");
        assert_eq!(mime_type_for(Path::new("dir/mug.png")), "image/png");
        assert_eq!(mime_type_for(Path::new("notes.txt")), "application/octet-stream");
        assert_eq!(mime_type_for(Path::new("README")), "application/octet-stream");
    }

    #[tokio::test]
    async fn test_load_image_file() {
        let path = std::env::temp_dir().join(format!("shopverse-image-{}.gif", std::process::id()));
        tokio::fs::write(&path, b"GIF89a").await.unwrap();

        let image = load_image_file(&path).await.unwrap();
        assert_eq!(image.file.mime_type, "image/gif");
        assert_eq!(image.file.size, 6);
        assert_eq!(image.data_url(), "data:image/gif;base64,R0lGODlh");

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn test_load_rejects_missing_and_non_images() {
        let err = load_image_file("/definitely/not/here.png").await.unwrap_err();
        assert_eq!(err.to_string(), "No file selected");

        let path = std::env::temp_dir().join(format!("shopverse-image-{}.txt", std::process::id()));
        tokio::fs::write(&path, b"hello").await.unwrap();
        let err = load_image_file(&path).await.unwrap_err();
        assert_eq!(err.to_string(), "Please select a valid image file (JPG, PNG, GIF)");
        let _ = tokio::fs::remove_file(&path).await;
    }
}
