use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult};

/// A cartoon character, owned by exactly one location (its home).
/// Character names are unique only within their location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartoonCharacter {
    /// Store-assigned surrogate key
    pub character_id: i64,

    pub character_name: String,

    pub description: String,

    /// Home location
    pub character_home: i64,
}

/// Field values for a character that has not been persisted yet.
/// The surrogate key is assigned by the store on insert.
#[derive(Debug, Clone)]
pub struct NewCharacter {
    pub character_name: String,
    pub description: String,
    pub character_home: i64,
}

/// One character search hit, carrying the context columns the search
/// surfaces alongside the character itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterMatch {
    pub character: CartoonCharacter,
    pub location_name: String,
    pub cartoon_title: String,
}

/// Rejects blank name or description before any store call.
pub fn validate_character_input(name: &str, description: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "character name must not be blank".to_string(),
        ));
    }
    if description.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "character description must not be blank".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_blank_fields() {
        assert!(validate_character_input(" ", "desc").is_err());
        assert!(validate_character_input("Zed", "").is_err());
        validate_character_input("Zed", "a robot").unwrap();
    }
}
