// src/repositories/character_repository.rs
//
// Cartoon character persistence
//
// A character row and its demographic row form one logical unit: add and
// update touch both inside a single transaction.

use std::sync::Arc;

use rusqlite::{params, params_from_iter, Row};

use crate::db::ConnectionPool;
use crate::domain::{
    CartoonCharacter, CharacterDemographic, CharacterMatch, NewCharacter, NewDemographic,
};
use crate::error::{AppError, AppResult};

pub trait CharacterRepository: Send + Sync {
    /// Case-insensitive substring search on character name and/or cartoon
    /// title. An empty pattern places no constraint on that field; callers
    /// are responsible for requiring at least one non-empty pattern.
    fn search(&self, name_pattern: &str, title_pattern: &str) -> AppResult<Vec<CharacterMatch>>;

    /// Exact name match, scoped to a location.
    fn find_by_name_and_location(
        &self,
        name: &str,
        location_id: i64,
    ) -> AppResult<Option<CartoonCharacter>>;

    fn list_names_by_location(&self, location_id: i64) -> AppResult<Vec<String>>;

    /// Persists character and demographic as one transaction; if either
    /// insert fails the whole unit rolls back.
    fn add(
        &self,
        character: &NewCharacter,
        demographic: &NewDemographic,
    ) -> AppResult<(CartoonCharacter, CharacterDemographic)>;

    /// Updates both rows in one transaction, identified by primary key.
    fn update(
        &self,
        character: &CartoonCharacter,
        demographic: &CharacterDemographic,
    ) -> AppResult<()>;
}

pub struct SqliteCharacterRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteCharacterRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_character(row: &Row) -> Result<CartoonCharacter, rusqlite::Error> {
        Ok(CartoonCharacter {
            character_id: row.get("character_id")?,
            character_name: row.get("character_name")?,
            description: row.get("description")?,
            character_home: row.get("character_home")?,
        })
    }

    fn row_to_match(row: &Row) -> Result<CharacterMatch, rusqlite::Error> {
        Ok(CharacterMatch {
            character: Self::row_to_character(row)?,
            location_name: row.get("location_name")?,
            cartoon_title: row.get("title")?,
        })
    }
}

impl CharacterRepository for SqliteCharacterRepository {
    fn search(&self, name_pattern: &str, title_pattern: &str) -> AppResult<Vec<CharacterMatch>> {
        let conn = self.pool.get()?;

        let mut sql = String::from(
            "SELECT ch.character_id, ch.character_name, ch.description, ch.character_home,
                    l.location_name, c.title
             FROM cartoon_character ch
             JOIN cartoon_location l ON ch.character_home = l.location_id
             JOIN cartoon c ON l.cartoon_id = c.cartoon_id",
        );

        let mut clauses: Vec<String> = Vec::new();
        let mut bindings: Vec<String> = Vec::new();

        if !name_pattern.is_empty() {
            bindings.push(format!("%{}%", name_pattern.to_lowercase()));
            clauses.push(format!(
                "LOWER(ch.character_name) LIKE ?{}",
                bindings.len()
            ));
        }
        if !title_pattern.is_empty() {
            bindings.push(format!("%{}%", title_pattern.to_lowercase()));
            clauses.push(format!("LOWER(c.title) LIKE ?{}", bindings.len()));
        }
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }

        let mut stmt = conn.prepare(&sql)?;
        let matches: Vec<CharacterMatch> = stmt
            .query_map(params_from_iter(bindings.iter()), Self::row_to_match)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(matches)
    }

    fn find_by_name_and_location(
        &self,
        name: &str,
        location_id: i64,
    ) -> AppResult<Option<CartoonCharacter>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT character_id, character_name, description, character_home
             FROM cartoon_character
             WHERE character_name = ?1 AND character_home = ?2",
        )?;

        match stmt.query_row(params![name, location_id], Self::row_to_character) {
            Ok(character) => Ok(Some(character)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn list_names_by_location(&self, location_id: i64) -> AppResult<Vec<String>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT character_name FROM cartoon_character WHERE character_home = ?1",
        )?;
        let names: Vec<String> = stmt
            .query_map(params![location_id], |row| row.get(0))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(names)
    }

    fn add(
        &self,
        character: &NewCharacter,
        demographic: &NewDemographic,
    ) -> AppResult<(CartoonCharacter, CharacterDemographic)> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;

        tx.execute(
            "INSERT INTO cartoon_character (character_name, description, character_home)
             VALUES (?1, ?2, ?3)",
            params![
                character.character_name,
                character.description,
                character.character_home
            ],
        )?;
        let character_id = tx.last_insert_rowid();

        tx.execute(
            "INSERT INTO character_demographic (gender, villain, character_id)
             VALUES (?1, ?2, ?3)",
            params![demographic.gender.code(), demographic.villain, character_id],
        )?;
        let demographic_id = tx.last_insert_rowid();

        tx.commit()?;

        Ok((
            CartoonCharacter {
                character_id,
                character_name: character.character_name.clone(),
                description: character.description.clone(),
                character_home: character.character_home,
            },
            CharacterDemographic {
                demographic_id,
                gender: demographic.gender,
                villain: demographic.villain,
                character_id,
            },
        ))
    }

    fn update(
        &self,
        character: &CartoonCharacter,
        demographic: &CharacterDemographic,
    ) -> AppResult<()> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;

        let character_rows = tx.execute(
            "UPDATE cartoon_character
             SET character_name = ?1, description = ?2, character_home = ?3
             WHERE character_id = ?4",
            params![
                character.character_name,
                character.description,
                character.character_home,
                character.character_id
            ],
        )?;
        if character_rows == 0 {
            return Err(AppError::NotFound);
        }

        let demographic_rows = tx.execute(
            "UPDATE character_demographic
             SET gender = ?1, villain = ?2, character_id = ?3
             WHERE demographic_id = ?4",
            params![
                demographic.gender.code(),
                demographic.villain,
                demographic.character_id,
                demographic.demographic_id
            ],
        )?;
        if demographic_rows == 0 {
            return Err(AppError::NotFound);
        }

        tx.commit()?;
        Ok(())
    }
}
