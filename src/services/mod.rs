// src/services/mod.rs
//
// Services Module - Orchestration Layer
//
// Services own the flow rules the repositories stay free of: input
// validation, duplicate pre-checks, multi-step picture handling and the
// statistics math.

pub mod cartoon_service;
pub mod character_service;
pub mod location_service;
pub mod picture_service;
pub mod statistics_service;


pub use cartoon_service::CartoonService;
pub use character_service::{AddCharacterRequest, CharacterService};
pub use location_service::LocationService;
pub use picture_service::{PictureService, SavePictureRequest};
pub use statistics_service::{StatisticSlice, StatisticsService};
