//! Product image upload checks.
//!
//! Validation is metadata-only: the MIME type and byte size are checked,
//! pixel data is never decoded.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use super::ValidationResult;

/// Largest accepted upload, 5 MiB.
pub const MAX_IMAGE_SIZE: u64 = 5 * 1024 * 1024;

/// Reasons an image is rejected. `Display` is the user-facing message.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageError {
    #[error("No file selected")]
    NoFile,
    #[error("Please select a valid image file (JPG, PNG, GIF)")]
    NotAnImage,
    #[error("Image size should be less than 5MB")]
    TooLarge,
}

/// Metadata of a file picked for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub name: String,
    /// MIME type, e.g. `image/png`.
    pub mime_type: String,
    /// Size in bytes.
    pub size: u64,
}

/// Check that a picked file is an image no larger than [`MAX_IMAGE_SIZE`].
///
/// # Errors
///
/// Returns [`ImageError`] for a missing file, a non-image MIME type or an
/// oversized file, in that order.
pub fn validate_image(file: Option<&ImageFile>) -> Result<(), ImageError> {
    let file = file.ok_or(ImageError::NoFile)?;
    if !file.mime_type.starts_with("image/") {
        return Err(ImageError::NotAnImage);
    }
    if file.size > MAX_IMAGE_SIZE {
        return Err(ImageError::TooLarge);
    }
    Ok(())
}

/// Validate an image for display in a form.
#[must_use]
pub fn image_validation_result(file: Option<&ImageFile>) -> ValidationResult {
    ValidationResult::from_result(&validate_image(file))
}

/// Encode file contents as a `data:` URL, e.g. for an inline preview or
/// for storing as a product `image_url`.
#[must_use]
pub fn to_data_url(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{mime_type};base64,{}", STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(mime_type: &str, size: u64) -> ImageFile {
        ImageFile {
            name: "upload".to_string(),
            mime_type: mime_type.to_string(),
            size,
        }
    }

    #[test]
    fn test_no_file() {
        assert_eq!(validate_image(None), Err(ImageError::NoFile));
        assert_eq!(image_validation_result(None).error, "No file selected");
    }

    #[test]
    fn test_rejects_non_image() {
        assert_eq!(
            validate_image(Some(&file("application/pdf", 10))),
            Err(ImageError::NotAnImage)
        );
    }

    #[test]
    fn test_size_limit_is_inclusive() {
        assert_eq!(validate_image(Some(&file("image/png", MAX_IMAGE_SIZE))), Ok(()));
        assert_eq!(
            validate_image(Some(&file("image/png", MAX_IMAGE_SIZE + 1))),
            Err(ImageError::TooLarge)
        );
    }

    #[test]
    fn test_to_data_url() {
        assert_eq!(to_data_url("image/gif", b"GIF89a"), "data:image/gif;base64,R0lGODlh");
    }
}
