use crate::storage::paths::{PathManager, is_image_name};
use crate::storage::{ImageEntry, Storage};

use tokio::{
    fs::{File, read_dir, rename},
    io::{self, AsyncWriteExt},
};

pub struct FilesystemStorage {
    path_manager: PathManager,
}

impl FilesystemStorage {
    pub fn new(root: &str) -> Self {
        FilesystemStorage {
            path_manager: PathManager::new(root),
        }
    }
}

#[async_trait::async_trait]
impl Storage for FilesystemStorage {
    async fn write_image(&self, name: &str, bytes: &[u8]) -> io::Result<()> {
        let temp_path = self.path_manager.temp_path(name);
        let image_path = self.path_manager.image_path(name);

        let mut file = File::create(&temp_path).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        // Rename within the same directory is atomic; readers see either
        // nothing or the complete image.
        rename(&temp_path, &image_path).await?;
        Ok(())
    }

    async fn read_image(&self, name: &str) -> io::Result<File> {
        File::open(self.path_manager.image_path(name)).await
    }

    async fn list_images(&self) -> io::Result<Vec<ImageEntry>> {
        let mut entries = vec![];
        let mut read_dir = read_dir(self.path_manager.images_path()).await?;
        while let Some(entry) = read_dir.next_entry().await? {
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            if !is_image_name(name) {
                continue;
            }
            let size = entry.metadata().await?.len();
            entries.push(ImageEntry {
                name: name.to_string(),
                size,
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::paths::format_image_name;
    use chrono::{TimeZone, Utc};

    fn storage_in(dir: &tempfile::TempDir) -> FilesystemStorage {
        FilesystemStorage::new(dir.path().to_str().unwrap())
    }

    fn name_at(secs_offset: u32, seq: u64) -> String {
        let at = Utc
            .with_ymd_and_hms(2025, 6, 1, 12, 0, secs_offset)
            .unwrap();
        format_image_name(at, seq)
    }

    #[tokio::test]
    async fn write_then_read_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage_in(&dir);
        let payload = b"\xff\xd8\xff\xe0JPEGDATA";

        let name = name_at(0, 0);
        storage.write_image(&name, payload).await.unwrap();

        let stored = tokio::fs::read(dir.path().join(&name)).await.unwrap();
        assert_eq!(stored, payload);
        assert!(storage.read_image(&name).await.is_ok());
    }

    #[tokio::test]
    async fn write_leaves_no_temp_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage_in(&dir);

        let name = name_at(0, 0);
        storage.write_image(&name, b"bytes").await.unwrap();

        let mut names = vec![];
        let mut rd = tokio::fs::read_dir(dir.path()).await.unwrap();
        while let Some(e) = rd.next_entry().await.unwrap() {
            names.push(e.file_name().to_string_lossy().into_owned());
        }
        assert_eq!(names, vec![name]);
    }

    #[tokio::test]
    async fn listing_is_sorted_and_skips_foreign_files() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage_in(&dir);

        let second = name_at(30, 1);
        let first = name_at(10, 0);
        storage.write_image(&second, b"later").await.unwrap();
        storage.write_image(&first, b"earlier").await.unwrap();
        tokio::fs::write(dir.path().join("notes.txt"), b"ignore me")
            .await
            .unwrap();
        tokio::fs::write(dir.path().join(".shot_x.jpg.tmp"), b"partial")
            .await
            .unwrap();

        let entries = storage.list_images().await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, first);
        assert_eq!(entries[0].size, 7);
        assert_eq!(entries[1].name, second);
        assert_eq!(entries[1].size, 5);
    }

    #[tokio::test]
    async fn listing_empty_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage_in(&dir);
        assert!(storage.list_images().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn reading_missing_image_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage_in(&dir);
        let err = storage.read_image(&name_at(0, 0)).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
