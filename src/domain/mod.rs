// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file declares all domain modules and re-exports their public API.
// All other modules import from `crate::domain::*`

pub mod cartoon;
pub mod character;
pub mod demographic;
pub mod gender;
pub mod location;
pub mod picture;

pub use cartoon::{validate_cartoon_input, Cartoon};
pub use character::{validate_character_input, CartoonCharacter, CharacterMatch, NewCharacter};
pub use demographic::{CharacterDemographic, NewDemographic};
pub use gender::{Gender, GenderRecord};
pub use location::{validate_location_input, CartoonLocation};
pub use picture::{Picture, PictureKind};

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Unknown gender code: {0}")]
    UnknownGenderCode(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
