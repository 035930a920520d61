// src/repositories/picture_repository.rs
//
// Picture persistence
//
// The three picture tables share one shape and differ only in the owning
// foreign key, so a single implementation is parameterized by PictureKind
// and instantiated once per kind. The table and column names come from
// PictureKind as static strings, never from caller input.

use std::sync::Arc;

use rusqlite::{params, Row};

use crate::db::ConnectionPool;
use crate::domain::{Picture, PictureKind};
use crate::error::{AppError, AppResult};

pub trait PictureRepository: Send + Sync {
    fn kind(&self) -> PictureKind;

    /// All pictures owned by the given entity.
    fn list_for_owner(&self, owner_id: i64) -> AppResult<Vec<Picture>>;

    /// Duplicate guard: the picture row with this exact path for this owner.
    fn find_by_path_and_owner(&self, path: &str, owner_id: i64) -> AppResult<Option<Picture>>;

    fn save(&self, path: &str, owner_id: i64) -> AppResult<Picture>;

    /// Deletes ALL rows of this kind whose path matches, returning how many
    /// went away. Zero matches is a successful no-op at this layer.
    fn delete_by_path(&self, path: &str) -> AppResult<usize>;
}

pub struct SqlitePictureRepository {
    pool: Arc<ConnectionPool>,
    kind: PictureKind,
}

impl SqlitePictureRepository {
    pub fn new(pool: Arc<ConnectionPool>, kind: PictureKind) -> Self {
        Self { pool, kind }
    }

    fn row_to_picture(kind: PictureKind) -> impl Fn(&Row) -> Result<Picture, rusqlite::Error> {
        move |row| {
            Ok(Picture {
                picture_id: row.get(0)?,
                picture_location: row.get(1)?,
                kind,
                owner_id: row.get(2)?,
            })
        }
    }
}

impl PictureRepository for SqlitePictureRepository {
    fn kind(&self) -> PictureKind {
        self.kind
    }

    fn list_for_owner(&self, owner_id: i64) -> AppResult<Vec<Picture>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT picture_id, picture_location, {owner} FROM {table} WHERE {owner} = ?1",
            owner = self.kind.owner_column(),
            table = self.kind.table(),
        ))?;
        let pictures: Vec<Picture> = stmt
            .query_map(params![owner_id], Self::row_to_picture(self.kind))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(pictures)
    }

    fn find_by_path_and_owner(&self, path: &str, owner_id: i64) -> AppResult<Option<Picture>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT picture_id, picture_location, {owner} FROM {table}
             WHERE picture_location = ?1 AND {owner} = ?2",
            owner = self.kind.owner_column(),
            table = self.kind.table(),
        ))?;

        match stmt.query_row(params![path, owner_id], Self::row_to_picture(self.kind)) {
            Ok(picture) => Ok(Some(picture)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn save(&self, path: &str, owner_id: i64) -> AppResult<Picture> {
        let conn = self.pool.get()?;

        conn.execute(
            &format!(
                "INSERT INTO {table} (picture_location, {owner}) VALUES (?1, ?2)",
                owner = self.kind.owner_column(),
                table = self.kind.table(),
            ),
            params![path, owner_id],
        )?;

        Ok(Picture {
            picture_id: conn.last_insert_rowid(),
            picture_location: path.to_string(),
            kind: self.kind,
            owner_id,
        })
    }

    fn delete_by_path(&self, path: &str) -> AppResult<usize> {
        let conn = self.pool.get()?;

        let deleted = conn.execute(
            &format!(
                "DELETE FROM {table} WHERE picture_location = ?1",
                table = self.kind.table(),
            ),
            params![path],
        )?;

        log::debug!("deleted {} {} picture row(s) for {}", deleted, self.kind, path);
        Ok(deleted)
    }
}
