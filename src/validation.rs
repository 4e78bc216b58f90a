//! Input validation for post data.

use crate::error::{PostboardError, Result};

/// Maximum allowed length for a post title.
pub const MAX_TITLE_LENGTH: usize = 255;

/// Maximum allowed length for a post body.
pub const MAX_TEXT_LENGTH: usize = 10_000;

/// Maximum allowed length for a user's first or last name.
pub const MAX_NAME_LENGTH: usize = 100;

/// Validates a post title.
pub fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(PostboardError::Validation(
            "Title cannot be empty".to_string(),
        ));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(PostboardError::Validation(format!(
            "Title exceeds maximum length of {} characters",
            MAX_TITLE_LENGTH
        )));
    }
    Ok(())
}

/// Validates a post body.
pub fn validate_text(text: &str) -> Result<()> {
    if text.chars().count() > MAX_TEXT_LENGTH {
        return Err(PostboardError::Validation(format!(
            "Text exceeds maximum length of {} characters",
            MAX_TEXT_LENGTH
        )));
    }
    Ok(())
}

/// Validates a first or last name.
pub fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(PostboardError::Validation(
            "Name cannot be empty".to_string(),
        ));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(PostboardError::Validation(format!(
            "Name exceeds maximum length of {} characters",
            MAX_NAME_LENGTH
        )));
    }
    Ok(())
}
