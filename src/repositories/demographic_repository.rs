// src/repositories/demographic_repository.rs
//
// Character demographic persistence
//
// Also hosts the database-wide count queries consumed by the statistics
// service, so proportion math stays out of the SQL layer and SQL stays out
// of the service.

use std::sync::Arc;

use rusqlite::{params, Row};

use crate::db::ConnectionPool;
use crate::domain::{CharacterDemographic, Gender};
use crate::error::{AppError, AppResult};

pub trait DemographicRepository: Send + Sync {
    /// The single demographic record for a character, if present.
    fn get_for_character(&self, character_id: i64) -> AppResult<Option<CharacterDemographic>>;

    /// Count of all demographic rows in the store.
    fn count_all(&self) -> AppResult<i64>;

    /// Count of demographic rows with the given gender code.
    fn count_by_gender(&self, gender: Gender) -> AppResult<i64>;

    /// Count of demographic rows with the given villain flag;
    /// `None` counts the unknown (NULL) rows.
    fn count_by_villain(&self, villain: Option<bool>) -> AppResult<i64>;
}

pub struct SqliteDemographicRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteDemographicRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_demographic(row: &Row) -> Result<CharacterDemographic, rusqlite::Error> {
        let code: String = row.get("gender")?;
        let gender = Gender::from_code(&code)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        Ok(CharacterDemographic {
            demographic_id: row.get("demographic_id")?,
            gender,
            villain: row.get("villain")?,
            character_id: row.get("character_id")?,
        })
    }
}

impl DemographicRepository for SqliteDemographicRepository {
    fn get_for_character(&self, character_id: i64) -> AppResult<Option<CharacterDemographic>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT demographic_id, gender, villain, character_id
             FROM character_demographic
             WHERE character_id = ?1",
        )?;

        match stmt.query_row(params![character_id], Self::row_to_demographic) {
            Ok(demographic) => Ok(Some(demographic)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn count_all(&self) -> AppResult<i64> {
        let conn = self.pool.get()?;

        let count: i64 = conn.query_row("SELECT COUNT(*) FROM character_demographic", [], |row| {
            row.get(0)
        })?;

        Ok(count)
    }

    fn count_by_gender(&self, gender: Gender) -> AppResult<i64> {
        let conn = self.pool.get()?;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM character_demographic WHERE gender = ?1",
            params![gender.code()],
            |row| row.get(0),
        )?;

        Ok(count)
    }

    fn count_by_villain(&self, villain: Option<bool>) -> AppResult<i64> {
        let conn = self.pool.get()?;

        let count: i64 = match villain {
            Some(flag) => conn.query_row(
                "SELECT COUNT(*) FROM character_demographic WHERE villain = ?1",
                params![flag],
                |row| row.get(0),
            )?,
            None => conn.query_row(
                "SELECT COUNT(*) FROM character_demographic WHERE villain IS NULL",
                [],
                |row| row.get(0),
            )?,
        };

        Ok(count)
    }
}
