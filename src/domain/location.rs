use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult};

/// A place within a cartoon, owned by exactly one cartoon.
/// Location names are unique only within their cartoon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartoonLocation {
    /// Store-assigned surrogate key
    pub location_id: i64,

    pub location_name: String,

    pub description: String,

    /// Owning cartoon
    pub cartoon_id: i64,
}

/// Rejects blank name or description before any store call.
pub fn validate_location_input(name: &str, description: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "location name must not be blank".to_string(),
        ));
    }
    if description.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "location description must not be blank".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_blank_name() {
        assert!(validate_location_input("", "a lab").is_err());
        validate_location_input("Lab", "a lab").unwrap();
    }
}
