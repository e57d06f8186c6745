use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::tag::NewTag;
use crate::forms::sanitize_inline_text;

/// Maximum allowed length for a tag name.
const NAME_MAX_LEN: u64 = 128;

/// Result type returned by the tag payload helpers.
pub type TagFormResult<T> = Result<T, TagFormError>;

/// Errors that can occur while processing tag payloads.
#[derive(Debug, Error)]
pub enum TagFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided name is empty after sanitization.
    #[error("tag name cannot be empty")]
    EmptyName,
}

/// JSON body accepted when creating a tag.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTagPayload {
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: String,
}

impl CreateTagPayload {
    /// Validates and sanitizes the payload into a domain `NewTag`.
    pub fn into_new_tag(self) -> TagFormResult<NewTag> {
        self.validate()?;

        let sanitized_name = sanitize_inline_text(&self.name);
        if sanitized_name.is_empty() {
            return Err(TagFormError::EmptyName);
        }

        Ok(NewTag::new(sanitized_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_tag_payload_sanitizes_and_converts() {
        let payload = CreateTagPayload {
            name: "  Seasonal \t Specials  ".to_string(),
        };

        let new_tag = payload
            .into_new_tag()
            .expect("expected conversion to succeed");

        assert_eq!(new_tag.name, "Seasonal Specials");
    }

    #[test]
    fn create_tag_payload_rejects_empty_name() {
        let payload = CreateTagPayload {
            name: "   ".to_string(),
        };

        let result = payload.into_new_tag();

        assert!(matches!(result, Err(TagFormError::EmptyName)));
    }
}
