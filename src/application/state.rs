// src/application/state.rs
use std::sync::Arc;

use crate::config::Settings;
use crate::db::{create_connection_pool, ConnectionPool};
use crate::domain::PictureKind;
use crate::error::AppResult;
use crate::infrastructure::ImageStore;
use crate::repositories::{
    DemographicRepository, GenderRepository, SqliteCartoonRepository, SqliteCharacterRepository,
    SqliteDemographicRepository, SqliteGenderRepository, SqliteLocationRepository,
    SqlitePictureRepository,
};
use crate::services::{
    CartoonService, CharacterService, LocationService, PictureService, StatisticsService,
};

/// The wired-up catalogue. Construct exactly one per process with
/// `AppState::initialize`; every service shares the one pool behind it.
/// Dropping the state closes the pool. There are no global singletons.
pub struct AppState {
    pub cartoon_service: Arc<CartoonService>,
    pub location_service: Arc<LocationService>,
    pub character_service: Arc<CharacterService>,
    pub picture_service: Arc<PictureService>,
    pub statistics_service: Arc<StatisticsService>,
    pub genders: Arc<dyn GenderRepository>,
    pool: Arc<ConnectionPool>,
}

impl AppState {
    /// Build the pool, apply migrations and wire every repository and
    /// service.
    pub fn initialize(settings: &Settings) -> AppResult<Self> {
        let pool = Arc::new(create_connection_pool(&settings.database)?);
        crate::db::initialize_database(&pool.get()?)?;

        let cartoons = Arc::new(SqliteCartoonRepository::new(Arc::clone(&pool)));
        let locations = Arc::new(SqliteLocationRepository::new(Arc::clone(&pool)));
        let characters = Arc::new(SqliteCharacterRepository::new(Arc::clone(&pool)));
        let demographics = Arc::new(SqliteDemographicRepository::new(Arc::clone(&pool)));
        let genders: Arc<dyn GenderRepository> =
            Arc::new(SqliteGenderRepository::new(Arc::clone(&pool)));

        let store = Arc::new(ImageStore::new(settings.images.root.clone()));

        let picture_service = Arc::new(PictureService::new(
            Arc::new(SqlitePictureRepository::new(
                Arc::clone(&pool),
                PictureKind::Cartoon,
            )),
            Arc::new(SqlitePictureRepository::new(
                Arc::clone(&pool),
                PictureKind::Location,
            )),
            Arc::new(SqlitePictureRepository::new(
                Arc::clone(&pool),
                PictureKind::Character,
            )),
            store,
        ));

        Ok(Self {
            cartoon_service: Arc::new(CartoonService::new(cartoons)),
            location_service: Arc::new(LocationService::new(locations)),
            character_service: Arc::new(CharacterService::new(
                characters,
                Arc::clone(&demographics) as Arc<dyn DemographicRepository>,
            )),
            picture_service,
            statistics_service: Arc::new(StatisticsService::new(demographics)),
            genders,
            pool,
        })
    }

    /// State of the underlying pool, for diagnostics.
    pub fn pool_state(&self) -> r2d2::State {
        self.pool.state()
    }
}
