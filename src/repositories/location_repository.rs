// src/repositories/location_repository.rs
//
// Cartoon location persistence

use std::sync::Arc;

use rusqlite::{params, Row};

use crate::db::ConnectionPool;
use crate::domain::CartoonLocation;
use crate::error::{AppError, AppResult};

pub trait LocationRepository: Send + Sync {
    /// Names of the locations belonging to the given cartoon.
    fn list_names(&self, cartoon_id: i64) -> AppResult<Vec<String>>;

    /// Case-insensitive name match, scoped to the cartoon.
    fn find_by_name_and_cartoon(
        &self,
        name: &str,
        cartoon_id: i64,
    ) -> AppResult<Option<CartoonLocation>>;

    fn add(&self, name: &str, description: &str, cartoon_id: i64) -> AppResult<CartoonLocation>;

    fn update(&self, location: &CartoonLocation) -> AppResult<()>;
}

pub struct SqliteLocationRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteLocationRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_location(row: &Row) -> Result<CartoonLocation, rusqlite::Error> {
        Ok(CartoonLocation {
            location_id: row.get("location_id")?,
            location_name: row.get("location_name")?,
            description: row.get("description")?,
            cartoon_id: row.get("cartoon_id")?,
        })
    }
}

impl LocationRepository for SqliteLocationRepository {
    fn list_names(&self, cartoon_id: i64) -> AppResult<Vec<String>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT location_name FROM cartoon_location WHERE cartoon_id = ?1",
        )?;
        let names: Vec<String> = stmt
            .query_map(params![cartoon_id], |row| row.get(0))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(names)
    }

    fn find_by_name_and_cartoon(
        &self,
        name: &str,
        cartoon_id: i64,
    ) -> AppResult<Option<CartoonLocation>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT location_id, location_name, description, cartoon_id
             FROM cartoon_location
             WHERE LOWER(location_name) = LOWER(?1) AND cartoon_id = ?2",
        )?;

        match stmt.query_row(params![name, cartoon_id], Self::row_to_location) {
            Ok(location) => Ok(Some(location)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn add(&self, name: &str, description: &str, cartoon_id: i64) -> AppResult<CartoonLocation> {
        let conn = self.pool.get()?;

        conn.execute(
            "INSERT INTO cartoon_location (location_name, description, cartoon_id)
             VALUES (?1, ?2, ?3)",
            params![name, description, cartoon_id],
        )?;

        Ok(CartoonLocation {
            location_id: conn.last_insert_rowid(),
            location_name: name.to_string(),
            description: description.to_string(),
            cartoon_id,
        })
    }

    fn update(&self, location: &CartoonLocation) -> AppResult<()> {
        let conn = self.pool.get()?;

        let rows_affected = conn.execute(
            "UPDATE cartoon_location
             SET location_name = ?1, description = ?2, cartoon_id = ?3
             WHERE location_id = ?4",
            params![
                location.location_name,
                location.description,
                location.cartoon_id,
                location.location_id
            ],
        )?;

        if rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
