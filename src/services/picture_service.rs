// src/services/picture_service.rs
//
// Picture flows: save copies the file under the cartoon's image
// directory and records the row; delete removes the file first and only
// then clears matching rows from every picture table.

use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::{DomainError, Picture, PictureKind};
use crate::error::{AppError, AppResult};
use crate::infrastructure::ImageStore;
use crate::repositories::PictureRepository;

/// Request to attach an image file to a catalogued entity.
#[derive(Debug, Clone)]
pub struct SavePictureRequest {
    /// The file selected by the user, anywhere on disk
    pub source: PathBuf,

    pub kind: PictureKind,

    /// Title of the cartoon whose image directory receives the copy
    pub cartoon_title: String,

    /// Id of the owning entity of `kind`
    pub owner_id: i64,
}

pub struct PictureService {
    cartoon_pictures: Arc<dyn PictureRepository>,
    location_pictures: Arc<dyn PictureRepository>,
    character_pictures: Arc<dyn PictureRepository>,
    store: Arc<ImageStore>,
}

impl PictureService {
    pub fn new(
        cartoon_pictures: Arc<dyn PictureRepository>,
        location_pictures: Arc<dyn PictureRepository>,
        character_pictures: Arc<dyn PictureRepository>,
        store: Arc<ImageStore>,
    ) -> Self {
        Self {
            cartoon_pictures,
            location_pictures,
            character_pictures,
            store,
        }
    }

    fn repository_for(&self, kind: PictureKind) -> &Arc<dyn PictureRepository> {
        match kind {
            PictureKind::Cartoon => &self.cartoon_pictures,
            PictureKind::Location => &self.location_pictures,
            PictureKind::Character => &self.character_pictures,
        }
    }

    pub fn list_pictures(&self, kind: PictureKind, owner_id: i64) -> AppResult<Vec<Picture>> {
        self.repository_for(kind).list_for_owner(owner_id)
    }

    pub fn find_picture(
        &self,
        kind: PictureKind,
        path: &str,
        owner_id: i64,
    ) -> AppResult<Option<Picture>> {
        self.repository_for(kind).find_by_path_and_owner(path, owner_id)
    }

    /// Copies the image under `images/<cartoon title>/` (skipped when the
    /// file is already there) and records the picture row. A row with the
    /// same path for the same owner is a duplicate and is rejected; the
    /// copied file stays either way.
    pub fn save_picture(&self, request: &SavePictureRequest) -> AppResult<Picture> {
        let file_name = request
            .source
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| {
                AppError::Domain(DomainError::InvariantViolation(
                    "picture source has no file name".to_string(),
                ))
            })?;

        let dest = self.store.image_file_for(&request.cartoon_title, &file_name);
        if !dest.exists() {
            self.store.ensure_cartoon_directory(&request.cartoon_title)?;
            if let Err(e) = self.store.copy_image(&request.source, &dest) {
                log::error!("failed to copy image '{}': {}", file_name, e);
                return Err(e);
            }
        }

        let path = self.store.image_path_for(&request.cartoon_title, &file_name);
        let repository = self.repository_for(request.kind);

        if repository
            .find_by_path_and_owner(&path, request.owner_id)?
            .is_some()
        {
            return Err(AppError::AlreadyExists(format!(
                "{} picture '{}'",
                request.kind, path
            )));
        }

        repository.save(&path, request.owner_id)
    }

    /// Deletes the image file, then every row matching the path across
    /// all three picture tables. A missing file is a failure and leaves
    /// the rows untouched. Returns how many rows went away.
    pub fn delete_picture(&self, path: &str) -> AppResult<usize> {
        let file = self.store.resolve(path);
        if let Err(e) = self.store.delete_image(&file) {
            log::error!("failed to delete image '{}': {}", path, e);
            return Err(e);
        }

        let mut deleted = 0;
        for kind in PictureKind::ALL {
            deleted += self.repository_for(kind).delete_by_path(path)?;
        }

        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use crate::db::connection::create_test_pool;
    use crate::db::initialize_database;
    use crate::db::ConnectionPool;
    use crate::repositories::cartoon_repository::{CartoonRepository, SqliteCartoonRepository};
    use crate::repositories::location_repository::{LocationRepository, SqliteLocationRepository};
    use crate::repositories::SqlitePictureRepository;

    struct Fixture {
        _dir: tempfile::TempDir,
        root: PathBuf,
        service: PictureService,
        cartoon_id: i64,
        location_id: i64,
    }

    fn setup() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let pool: Arc<ConnectionPool> = Arc::new(create_test_pool());
        initialize_database(&pool.get().unwrap()).unwrap();

        let cartoon = SqliteCartoonRepository::new(Arc::clone(&pool))
            .add("Foo", "bar")
            .unwrap();
        let location = SqliteLocationRepository::new(Arc::clone(&pool))
            .add("Lab", "a lab", cartoon.cartoon_id)
            .unwrap();

        let service = PictureService::new(
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
            Arc::new(ImageStore::new(dir.path())),
        );

        Fixture {
            root: dir.path().to_path_buf(),
            _dir: dir,
            service,
            cartoon_id: cartoon.cartoon_id,
            location_id: location.location_id,
        }
    }

    fn source_image(f: &Fixture, name: &str) -> PathBuf {
        let path = f.root.join(name);
        fs::write(&path, b"not really a png").unwrap();
        path
    }

    fn save_request(f: &Fixture, name: &str) -> SavePictureRequest {
        SavePictureRequest {
            source: source_image(f, name),
            kind: PictureKind::Cartoon,
            cartoon_title: "Foo".to_string(),
            owner_id: f.cartoon_id,
        }
    }

    #[test]
    fn test_save_copies_file_and_records_row() {
        let f = setup();

        let picture = f.service.save_picture(&save_request(&f, "cover.png")).unwrap();
        assert_eq!(picture.picture_location, "images/Foo/cover.png");

        assert!(f.root.join("images/Foo/cover.png").exists());
        assert_eq!(
            f.service
                .list_pictures(PictureKind::Cartoon, f.cartoon_id)
                .unwrap()
                .len(),
            1
        );
    }

    #[test]
    fn test_duplicate_save_rejected_file_kept() {
        let f = setup();
        f.service.save_picture(&save_request(&f, "cover.png")).unwrap();

        let result = f.service.save_picture(&save_request(&f, "cover.png"));
        assert!(matches!(result, Err(AppError::AlreadyExists(_))));

        assert!(f.root.join("images/Foo/cover.png").exists());
        assert_eq!(
            f.service
                .list_pictures(PictureKind::Cartoon, f.cartoon_id)
                .unwrap()
                .len(),
            1
        );
    }

    #[test]
    fn test_delete_removes_file_and_rows_across_kinds() {
        let f = setup();
        f.service.save_picture(&save_request(&f, "cover.png")).unwrap();

        // a second row of another kind sharing the path
        f.service
            .repository_for(PictureKind::Location)
            .save("images/Foo/cover.png", f.location_id)
            .unwrap();

        let deleted = f.service.delete_picture("images/Foo/cover.png").unwrap();
        assert_eq!(deleted, 2);

        assert!(!f.root.join("images/Foo/cover.png").exists());
        assert!(f
            .service
            .list_pictures(PictureKind::Cartoon, f.cartoon_id)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_delete_missing_file_fails_and_keeps_rows() {
        let f = setup();
        let picture = f.service.save_picture(&save_request(&f, "cover.png")).unwrap();

        // remove the file out from under the catalogue
        fs::remove_file(f.root.join("images/Foo/cover.png")).unwrap();

        assert!(f.service.delete_picture(&picture.picture_location).is_err());
        assert_eq!(
            f.service
                .list_pictures(PictureKind::Cartoon, f.cartoon_id)
                .unwrap()
                .len(),
            1
        );
    }
}
