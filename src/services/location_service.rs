// src/services/location_service.rs
use std::sync::Arc;

use crate::domain::{validate_location_input, CartoonLocation};
use crate::error::{AppError, AppResult};
use crate::repositories::LocationRepository;

pub struct LocationService {
    locations: Arc<dyn LocationRepository>,
}

impl LocationService {
    pub fn new(locations: Arc<dyn LocationRepository>) -> Self {
        Self { locations }
    }

    pub fn list_names(&self, cartoon_id: i64) -> AppResult<Vec<String>> {
        self.locations.list_names(cartoon_id)
    }

    pub fn find_location(&self, name: &str, cartoon_id: i64) -> AppResult<Option<CartoonLocation>> {
        self.locations.find_by_name_and_cartoon(name, cartoon_id)
    }

    /// Adds a location under a cartoon. The duplicate pre-check is
    /// case-insensitive and scoped to the cartoon, like the lookup.
    pub fn add_location(
        &self,
        name: &str,
        description: &str,
        cartoon_id: i64,
    ) -> AppResult<CartoonLocation> {
        validate_location_input(name, description)?;

        if self
            .locations
            .find_by_name_and_cartoon(name, cartoon_id)?
            .is_some()
        {
            log::warn!("location '{}' already exists in cartoon {}", name, cartoon_id);
            return Err(AppError::AlreadyExists(format!("location '{}'", name)));
        }

        self.locations.add(name, description, cartoon_id)
    }

    pub fn update_location(&self, location: &CartoonLocation) -> AppResult<()> {
        validate_location_input(&location.location_name, &location.description)?;
        self.locations.update(location)
    }
}
