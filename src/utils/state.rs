use crate::config::Config;
use crate::storage::paths::format_image_name;
use crate::storage::{Storage, driver::filesystem::FilesystemStorage};
use chrono::Utc;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

pub struct AppState {
    pub storage: Arc<dyn Storage>,
    pub config: Arc<Config>,
    /// Process-wide upload counter, the tie-breaker for uploads that
    /// land within the same microsecond.
    upload_seq: AtomicU64,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        AppState {
            storage: Arc::new(FilesystemStorage::new(&config.storage_dir)),
            config: Arc::new(config),
            upload_seq: AtomicU64::new(0),
        }
    }

    /// Generates the name for the next upload: wall-clock time to
    /// microsecond resolution plus the sequence counter, so concurrent
    /// uploads never collide on a filename.
    pub fn next_image_name(&self) -> String {
        let seq = self.upload_seq.fetch_add(1, Ordering::Relaxed);
        format_image_name(Utc::now(), seq)
    }
}
