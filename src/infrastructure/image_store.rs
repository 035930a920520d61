// src/infrastructure/image_store.rs
//
// Image file layout and transfer.
//
// Pictures live at `<root>/images/<cartoon title>/<file name>`. The
// database stores the relative part with '/' separators on every
// platform; `resolve` maps it back onto the local filesystem.

use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// The name of the images directory under the store root
pub const IMAGES_DIRECTORY: &str = "images";

/// The length of the buffer used for file copying
const BUFFER_LENGTH: usize = 8192;

pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The relative image path stored as a database record.
    pub fn image_path_for(&self, cartoon_title: &str, file_name: &str) -> String {
        format!("{}/{}/{}", IMAGES_DIRECTORY, cartoon_title, file_name)
    }

    /// Absolute location of an image under this store's root.
    pub fn image_file_for(&self, cartoon_title: &str, file_name: &str) -> PathBuf {
        self.root
            .join(IMAGES_DIRECTORY)
            .join(cartoon_title)
            .join(file_name)
    }

    /// Maps a stored relative path back onto the filesystem.
    pub fn resolve(&self, relative_path: &str) -> PathBuf {
        let mut path = self.root.clone();
        for part in relative_path.split('/') {
            path.push(part);
        }
        path
    }

    /// Creates the image directory for the given cartoon if it does not
    /// exist. Idempotent.
    pub fn ensure_cartoon_directory(&self, cartoon_title: &str) -> AppResult<()> {
        let directory = self.root.join(IMAGES_DIRECTORY).join(cartoon_title);
        fs::create_dir_all(&directory).map_err(AppError::Io)?;
        Ok(())
    }

    /// Byte-for-byte copy with a fixed-size buffer.
    pub fn copy_image(&self, source: &Path, dest: &Path) -> AppResult<()> {
        let mut reader = fs::File::open(source)?;
        let mut writer = fs::File::create(dest)?;

        let mut buffer = [0u8; BUFFER_LENGTH];
        loop {
            let bytes_read = reader.read(&mut buffer)?;
            if bytes_read == 0 {
                break;
            }
            writer.write_all(&buffer[..bytes_read])?;
        }

        Ok(())
    }

    /// Removes the image file. A missing file is an error.
    pub fn delete_image(&self, path: &Path) -> AppResult<()> {
        fs::remove_file(path).map_err(AppError::Io)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, ImageStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn test_path_convention() {
        let (_dir, store) = store();

        assert_eq!(
            store.image_path_for("Foo", "cover.png"),
            "images/Foo/cover.png"
        );
        assert!(store
            .image_file_for("Foo", "cover.png")
            .ends_with("images/Foo/cover.png"));
    }

    #[test]
    fn test_resolve_matches_image_file_for() {
        let (_dir, store) = store();

        let relative = store.image_path_for("Foo", "cover.png");
        assert_eq!(store.resolve(&relative), store.image_file_for("Foo", "cover.png"));
    }

    #[test]
    fn test_ensure_cartoon_directory_idempotent() {
        let (dir, store) = store();

        store.ensure_cartoon_directory("Foo").unwrap();
        store.ensure_cartoon_directory("Foo").unwrap();

        assert!(dir.path().join("images/Foo").is_dir());
    }

    #[test]
    fn test_copy_image_byte_for_byte() {
        let (dir, store) = store();

        // larger than one buffer to exercise the loop
        let payload: Vec<u8> = (0..20_000).map(|i| (i % 251) as u8).collect();
        let source = dir.path().join("source.png");
        fs::write(&source, &payload).unwrap();

        store.ensure_cartoon_directory("Foo").unwrap();
        let dest = store.image_file_for("Foo", "cover.png");
        store.copy_image(&source, &dest).unwrap();

        assert_eq!(fs::read(&dest).unwrap(), payload);
    }

    #[test]
    fn test_delete_image() {
        let (dir, store) = store();

        let path = dir.path().join("gone.png");
        fs::write(&path, b"x").unwrap();

        store.delete_image(&path).unwrap();
        assert!(!path.exists());

        // deleting again is an error, not a silent success
        assert!(store.delete_image(&path).is_err());
    }
}
