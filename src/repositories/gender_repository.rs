// src/repositories/gender_repository.rs
//
// Gender reference data lookup. The rows are seeded by the schema and
// never written by the application.

use std::sync::Arc;

use rusqlite::{params, Row};

use crate::db::ConnectionPool;
use crate::domain::{Gender, GenderRecord};
use crate::error::{AppError, AppResult};

pub trait GenderRepository: Send + Sync {
    fn list_all(&self) -> AppResult<Vec<GenderRecord>>;

    fn find_by_code(&self, code: &str) -> AppResult<Option<GenderRecord>>;
}

pub struct SqliteGenderRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteGenderRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_record(row: &Row) -> Result<GenderRecord, rusqlite::Error> {
        let code: String = row.get("gender")?;
        let gender = Gender::from_code(&code)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        Ok(GenderRecord {
            gender,
            description: row.get("description")?,
        })
    }
}

impl GenderRepository for SqliteGenderRepository {
    fn list_all(&self) -> AppResult<Vec<GenderRecord>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare("SELECT gender, description FROM gender")?;
        let records: Vec<GenderRecord> = stmt
            .query_map([], Self::row_to_record)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    fn find_by_code(&self, code: &str) -> AppResult<Option<GenderRecord>> {
        let conn = self.pool.get()?;

        let mut stmt =
            conn.prepare("SELECT gender, description FROM gender WHERE gender = ?1")?;

        match stmt.query_row(params![code], Self::row_to_record) {
            Ok(record) => Ok(Some(record)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::create_test_pool;
    use crate::db::initialize_database;

    fn setup() -> SqliteGenderRepository {
        let pool = create_test_pool();
        initialize_database(&pool.get().unwrap()).unwrap();
        SqliteGenderRepository::new(Arc::new(pool))
    }

    #[test]
    fn test_list_all_seeded_codes() {
        let repo = setup();

        let records = repo.list_all().unwrap();
        assert_eq!(records.len(), 4);

        let genders: Vec<Gender> = records.iter().map(|r| r.gender).collect();
        assert!(genders.contains(&Gender::Male));
        assert!(genders.contains(&Gender::Female));
        assert!(genders.contains(&Gender::Unknown));
        assert!(genders.contains(&Gender::NotApplicable));
    }

    #[test]
    fn test_find_by_code() {
        let repo = setup();

        let record = repo.find_by_code("F").unwrap().unwrap();
        assert_eq!(record.gender, Gender::Female);
        assert_eq!(record.description, "Female");

        assert!(repo.find_by_code("X").unwrap().is_none());
    }
}
