use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 50), custom(function = "validate_slug"))]
    pub slug: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCategoryRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 50), custom(function = "validate_slug"))]
    pub slug: Option<String>,
}

/// Slugs are lowercase ASCII letters, digits, hyphens and underscores.
pub fn validate_slug(slug: &str) -> Result<(), validator::ValidationError> {
    let valid = slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(validator::ValidationError::new("slug"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_accepts_url_safe_characters() {
        assert!(validate_slug("rings-2024_new").is_ok());
        assert!(validate_slug("Rings").is_err());
        assert!(validate_slug("ear rings").is_err());
    }

    #[test]
    fn create_request_enforces_lengths() {
        let req = CreateCategoryRequest {
            name: String::new(),
            slug: "a".repeat(51),
        };
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("slug"));
    }
}
