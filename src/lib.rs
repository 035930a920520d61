// src/lib.rs
// ToonHub - Local-first cartoon catalogue
//
// Architecture:
// - Domain-centric: entities and invariants live in `domain`
// - Explicit: repositories speak parameterized SQL, no hidden state
// - Local-first: an embedded SQLite store plus an image directory
// - Composition over globals: one AppState wires pool, repositories
//   and services; nothing is initialized at load time

pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod repositories;
pub mod services;

// ============================================================================
// PUBLIC API - Domain Entities
// ============================================================================

pub use domain::{
    validate_cartoon_input,
    validate_character_input,
    validate_location_input,
    Cartoon,
    CartoonCharacter,
    CartoonLocation,
    CharacterDemographic,
    CharacterMatch,
    Gender,
    GenderRecord,
    NewCharacter,
    NewDemographic,
    Picture,
    PictureKind,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use domain::{DomainError, DomainResult};
pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Configuration and Database
// ============================================================================

pub use config::{DatabaseSettings, ImageSettings, PoolSettings, Settings};
pub use db::{create_connection_pool, initialize_database, ConnectionPool};

// ============================================================================
// PUBLIC API - Repositories
// ============================================================================

pub use repositories::{
    CartoonRepository,
    CharacterRepository,
    DemographicRepository,
    GenderRepository,
    LocationRepository,
    PictureRepository,
    SqliteCartoonRepository,
    SqliteCharacterRepository,
    SqliteDemographicRepository,
    SqliteGenderRepository,
    SqliteLocationRepository,
    SqlitePictureRepository,
};

// ============================================================================
// PUBLIC API - Infrastructure
// ============================================================================

pub use infrastructure::ImageStore;

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    AddCharacterRequest,
    CartoonService,
    CharacterService,
    LocationService,
    PictureService,
    SavePictureRequest,
    StatisticSlice,
    StatisticsService,
};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::AppState;
