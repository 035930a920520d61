// src/repositories/cartoon_repository.rs
//
// Cartoon persistence

use std::sync::Arc;

use rusqlite::{params, Row};

use crate::db::ConnectionPool;
use crate::domain::Cartoon;
use crate::error::{AppError, AppResult};

pub trait CartoonRepository: Send + Sync {
    /// All cartoon titles, in natural store order.
    fn list_titles(&self) -> AppResult<Vec<String>>;

    /// Exact, case-sensitive title match.
    fn find_by_title(&self, title: &str) -> AppResult<Option<Cartoon>>;

    /// Inserts a cartoon and returns the row with its assigned id.
    /// Duplicate checking is the caller's job; a title collision surfaces
    /// as a constraint error here.
    fn add(&self, title: &str, description: &str) -> AppResult<Cartoon>;

    /// Updates an existing row, identified by primary key.
    fn update(&self, cartoon: &Cartoon) -> AppResult<()>;
}

pub struct SqliteCartoonRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteCartoonRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_cartoon(row: &Row) -> Result<Cartoon, rusqlite::Error> {
        Ok(Cartoon {
            cartoon_id: row.get("cartoon_id")?,
            title: row.get("title")?,
            description: row.get("description")?,
        })
    }
}

impl CartoonRepository for SqliteCartoonRepository {
    fn list_titles(&self) -> AppResult<Vec<String>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare("SELECT title FROM cartoon")?;
        let titles: Vec<String> = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(titles)
    }

    fn find_by_title(&self, title: &str) -> AppResult<Option<Cartoon>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT cartoon_id, title, description FROM cartoon WHERE title = ?1",
        )?;

        match stmt.query_row(params![title], Self::row_to_cartoon) {
            Ok(cartoon) => Ok(Some(cartoon)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn add(&self, title: &str, description: &str) -> AppResult<Cartoon> {
        let conn = self.pool.get()?;

        conn.execute(
            "INSERT INTO cartoon (title, description) VALUES (?1, ?2)",
            params![title, description],
        )?;

        Ok(Cartoon {
            cartoon_id: conn.last_insert_rowid(),
            title: title.to_string(),
            description: description.to_string(),
        })
    }

    fn update(&self, cartoon: &Cartoon) -> AppResult<()> {
        let conn = self.pool.get()?;

        let rows_affected = conn.execute(
            "UPDATE cartoon SET title = ?1, description = ?2 WHERE cartoon_id = ?3",
            params![cartoon.title, cartoon.description, cartoon.cartoon_id],
        )?;

        if rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::create_test_pool;
    use crate::db::initialize_database;

    fn setup() -> SqliteCartoonRepository {
        let pool = create_test_pool();
        initialize_database(&pool.get().unwrap()).unwrap();
        SqliteCartoonRepository::new(Arc::new(pool))
    }

    #[test]
    fn test_add_then_find_round_trip() {
        let repo = setup();

        let added = repo.add("Foo", "bar").unwrap();
        assert!(added.cartoon_id > 0);

        let found = repo.find_by_title("Foo").unwrap().unwrap();
        assert_eq!(found, added);
    }

    #[test]
    fn test_find_is_case_sensitive() {
        let repo = setup();
        repo.add("Foo", "bar").unwrap();

        assert!(repo.find_by_title("foo").unwrap().is_none());
        assert!(repo.find_by_title("Foo").unwrap().is_some());
    }

    #[test]
    fn test_list_titles() {
        let repo = setup();
        repo.add("Foo", "bar").unwrap();
        repo.add("Baz", "qux").unwrap();

        let titles = repo.list_titles().unwrap();
        assert_eq!(titles.len(), 2);
        assert!(titles.contains(&"Foo".to_string()));
        assert!(titles.contains(&"Baz".to_string()));
    }

    #[test]
    fn test_duplicate_title_rejected_by_store() {
        let repo = setup();
        repo.add("Foo", "bar").unwrap();

        assert!(repo.add("Foo", "again").is_err());
    }

    #[test]
    fn test_update_preserves_primary_key() {
        let repo = setup();
        let mut cartoon = repo.add("Foo", "bar").unwrap();

        cartoon.description = "new description".to_string();
        repo.update(&cartoon).unwrap();

        let found = repo.find_by_title("Foo").unwrap().unwrap();
        assert_eq!(found.cartoon_id, cartoon.cartoon_id);
        assert_eq!(found.description, "new description");
    }

    #[test]
    fn test_update_missing_row_is_not_found() {
        let repo = setup();
        let ghost = Cartoon {
            cartoon_id: 99,
            title: "Ghost".to_string(),
            description: "missing".to_string(),
        };

        assert!(matches!(repo.update(&ghost), Err(AppError::NotFound)));
    }
}
