use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult};

/// A catalogued show or series. Root entity: locations, characters and
/// pictures all hang off a cartoon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cartoon {
    /// Store-assigned surrogate key
    pub cartoon_id: i64,

    /// Natural key, unique and case-sensitive
    pub title: String,

    pub description: String,
}

/// Rejects blank title or description before any store call.
pub fn validate_cartoon_input(title: &str, description: &str) -> DomainResult<()> {
    if title.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "cartoon title must not be blank".to_string(),
        ));
    }
    if description.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "cartoon description must not be blank".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_plain_input() {
        validate_cartoon_input("Foo", "bar").unwrap();
    }

    #[test]
    fn test_validate_rejects_blank_title() {
        assert!(validate_cartoon_input("  ", "bar").is_err());
    }

    #[test]
    fn test_validate_rejects_blank_description() {
        assert!(validate_cartoon_input("Foo", "").is_err());
    }
}
