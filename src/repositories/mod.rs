// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO business logic
// - NO invariant enforcement
// - NO cross-repository calls
// - Explicit SQL only

pub mod cartoon_repository;
pub mod character_repository;
pub mod demographic_repository;
pub mod gender_repository;
pub mod location_repository;
pub mod picture_repository;

pub use cartoon_repository::{CartoonRepository, SqliteCartoonRepository};
pub use character_repository::{CharacterRepository, SqliteCharacterRepository};
pub use demographic_repository::{DemographicRepository, SqliteDemographicRepository};
pub use gender_repository::{GenderRepository, SqliteGenderRepository};
pub use location_repository::{LocationRepository, SqliteLocationRepository};
pub use picture_repository::{PictureRepository, SqlitePictureRepository};
