//! Uploaded document constants and validators.
//!
//! The file itself lives in external storage; these checks run on the
//! metadata the uploader reports before a `documents` row is created.

use crate::error::CoreError;

/// Largest accepted upload (10 MiB).
pub const MAX_UPLOAD_BYTES: i64 = 10 * 1024 * 1024;

/// MIME types accepted for certificate uploads.
pub const ALLOWED_MIME_TYPES: &[&str] = &["application/pdf", "image/jpeg", "image/png", "image/webp"];

// ---------------------------------------------------------------------------
// Status constants
// ---------------------------------------------------------------------------

/// Registered, extraction not started.
pub const STATUS_UPLOADED: &str = "uploaded";

/// Extraction in flight.
pub const STATUS_PROCESSING: &str = "processing";

/// Extraction finished and an extracted record is stored.
pub const STATUS_PARSED: &str = "parsed";

/// Extraction failed; the document can be re-submitted.
pub const STATUS_FAILED: &str = "failed";

// ---------------------------------------------------------------------------
// Validators
// ---------------------------------------------------------------------------

/// Validate the reported MIME type of an upload.
pub fn validate_file_type(mime_type: &str) -> Result<(), CoreError> {
    if ALLOWED_MIME_TYPES.contains(&mime_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Unsupported file type '{mime_type}'. Upload a PDF or image file (JPG, PNG, WEBP)"
        )))
    }
}

/// Validate the reported size of an upload.
pub fn validate_file_size(size_bytes: i64) -> Result<(), CoreError> {
    if size_bytes <= 0 {
        return Err(CoreError::Validation("File is empty".to_string()));
    }
    if size_bytes > MAX_UPLOAD_BYTES {
        return Err(CoreError::Validation(format!(
            "File is too large ({size_bytes} bytes). Maximum size is 10MB"
        )));
    }
    Ok(())
}

/// Validate a display file name: non-blank and at most 255 characters.
pub fn validate_file_name(file_name: &str) -> Result<(), CoreError> {
    let trimmed = file_name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("File name is required".to_string()));
    }
    if trimmed.chars().count() > 255 {
        return Err(CoreError::Validation(
            "File name must be at most 255 characters".to_string(),
        ));
    }
    Ok(())
}
