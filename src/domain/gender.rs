use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult};

/// Demographic gender code. The four codes mirror the static reference
/// rows seeded into the gender table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Unknown,
    NotApplicable,
}

impl Gender {
    /// The single-character code stored in the database.
    pub fn code(&self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
            Gender::Unknown => "U",
            Gender::NotApplicable => "N",
        }
    }

    pub fn from_code(code: &str) -> DomainResult<Self> {
        match code {
            "M" => Ok(Gender::Male),
            "F" => Ok(Gender::Female),
            "U" => Ok(Gender::Unknown),
            "N" => Ok(Gender::NotApplicable),
            other => Err(DomainError::UnknownGenderCode(other.to_string())),
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// One row of the gender reference table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenderRecord {
    pub gender: Gender,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_round_trip() {
        for gender in [
            Gender::Male,
            Gender::Female,
            Gender::Unknown,
            Gender::NotApplicable,
        ] {
            assert_eq!(Gender::from_code(gender.code()).unwrap(), gender);
        }
    }

    #[test]
    fn test_unknown_code_rejected() {
        assert!(Gender::from_code("X").is_err());
    }
}
