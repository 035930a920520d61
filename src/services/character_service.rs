// src/services/character_service.rs
use std::sync::Arc;

use crate::domain::{
    validate_character_input, CartoonCharacter, CharacterDemographic, CharacterMatch, DomainError,
    Gender, NewCharacter, NewDemographic,
};
use crate::error::{AppError, AppResult};
use crate::repositories::{CharacterRepository, DemographicRepository};

/// Everything needed to catalogue one character with its demographic.
#[derive(Debug, Clone)]
pub struct AddCharacterRequest {
    pub character_name: String,
    pub description: String,
    pub location_id: i64,
    pub gender: Gender,
    pub villain: Option<bool>,
}

pub struct CharacterService {
    characters: Arc<dyn CharacterRepository>,
    demographics: Arc<dyn DemographicRepository>,
}

impl CharacterService {
    pub fn new(
        characters: Arc<dyn CharacterRepository>,
        demographics: Arc<dyn DemographicRepository>,
    ) -> Self {
        Self {
            characters,
            demographics,
        }
    }

    /// Case-insensitive substring search over character names and cartoon
    /// titles. At least one pattern must be non-empty; the repository
    /// itself places no such requirement.
    pub fn search(
        &self,
        name_pattern: &str,
        title_pattern: &str,
    ) -> AppResult<Vec<CharacterMatch>> {
        if name_pattern.is_empty() && title_pattern.is_empty() {
            return Err(AppError::Domain(DomainError::InvariantViolation(
                "at least one search pattern must be provided".to_string(),
            )));
        }

        self.characters.search(name_pattern, title_pattern)
    }

    pub fn find_character(
        &self,
        name: &str,
        location_id: i64,
    ) -> AppResult<Option<CartoonCharacter>> {
        self.characters.find_by_name_and_location(name, location_id)
    }

    pub fn list_names(&self, location_id: i64) -> AppResult<Vec<String>> {
        self.characters.list_names_by_location(location_id)
    }

    pub fn demographic_for(&self, character_id: i64) -> AppResult<Option<CharacterDemographic>> {
        self.demographics.get_for_character(character_id)
    }

    /// Adds a character and its demographic as one unit. Rejects blank
    /// fields and a name already catalogued at the same location.
    pub fn add_character(
        &self,
        request: &AddCharacterRequest,
    ) -> AppResult<(CartoonCharacter, CharacterDemographic)> {
        validate_character_input(&request.character_name, &request.description)?;

        if self
            .characters
            .find_by_name_and_location(&request.character_name, request.location_id)?
            .is_some()
        {
            log::warn!(
                "character '{}' already exists at location {}",
                request.character_name,
                request.location_id
            );
            return Err(AppError::AlreadyExists(format!(
                "character '{}'",
                request.character_name
            )));
        }

        self.characters.add(
            &NewCharacter {
                character_name: request.character_name.clone(),
                description: request.description.clone(),
                character_home: request.location_id,
            },
            &NewDemographic {
                gender: request.gender,
                villain: request.villain,
            },
        )
    }

    /// Updates a character and its demographic in one unit.
    pub fn update_character(
        &self,
        character: &CartoonCharacter,
        demographic: &CharacterDemographic,
    ) -> AppResult<()> {
        validate_character_input(&character.character_name, &character.description)?;
        self.characters.update(character, demographic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::create_test_pool;
    use crate::db::initialize_database;
    use crate::repositories::cartoon_repository::{CartoonRepository, SqliteCartoonRepository};
    use crate::repositories::location_repository::{LocationRepository, SqliteLocationRepository};
    use crate::repositories::{SqliteCharacterRepository, SqliteDemographicRepository};

    fn setup() -> (CharacterService, i64) {
        let pool = Arc::new(create_test_pool());
        initialize_database(&pool.get().unwrap()).unwrap();

        let cartoon = SqliteCartoonRepository::new(Arc::clone(&pool))
            .add("Foo", "bar")
            .unwrap();
        let location = SqliteLocationRepository::new(Arc::clone(&pool))
            .add("Lab", "a lab", cartoon.cartoon_id)
            .unwrap();

        let service = CharacterService::new(
            Arc::new(SqliteCharacterRepository::new(Arc::clone(&pool))),
            Arc::new(SqliteDemographicRepository::new(pool)),
        );
        (service, location.location_id)
    }

    fn request(name: &str, location_id: i64) -> AddCharacterRequest {
        AddCharacterRequest {
            character_name: name.to_string(),
            description: format!("{} description", name),
            location_id,
            gender: Gender::Male,
            villain: Some(false),
        }
    }

    #[test]
    fn test_add_then_fetch_demographic() {
        let (service, location_id) = setup();

        let (character, demographic) = service.add_character(&request("Zed", location_id)).unwrap();
        assert_eq!(demographic.character_id, character.character_id);

        let fetched = service
            .demographic_for(character.character_id)
            .unwrap()
            .unwrap();
        assert_eq!(fetched, demographic);
    }

    #[test]
    fn test_duplicate_name_at_location_rejected() {
        let (service, location_id) = setup();
        service.add_character(&request("Zed", location_id)).unwrap();

        assert!(matches!(
            service.add_character(&request("Zed", location_id)),
            Err(AppError::AlreadyExists(_))
        ));
    }

    #[test]
    fn test_search_requires_a_pattern() {
        let (service, _) = setup();

        assert!(matches!(
            service.search("", ""),
            Err(AppError::Domain(_))
        ));
    }

    #[test]
    fn test_search_by_either_pattern() {
        let (service, location_id) = setup();
        service.add_character(&request("Zed", location_id)).unwrap();

        assert_eq!(service.search("zed", "").unwrap().len(), 1);
        assert_eq!(service.search("", "foo").unwrap().len(), 1);
        assert_eq!(service.search("zed", "nope").unwrap().len(), 0);
    }

    #[test]
    fn test_update_character_and_demographic() {
        let (service, location_id) = setup();
        let (mut character, mut demographic) =
            service.add_character(&request("Zed", location_id)).unwrap();

        character.description = "turned villain".to_string();
        demographic.villain = Some(true);
        service.update_character(&character, &demographic).unwrap();

        let fetched = service
            .demographic_for(character.character_id)
            .unwrap()
            .unwrap();
        assert_eq!(fetched.villain, Some(true));
    }
}
