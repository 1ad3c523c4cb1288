use tokio::{fs::File, io};

pub mod driver;
pub mod paths;

/// A stored image as seen by a listing: its canonical name and size in
/// bytes. Creation time is implicit in the name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    pub name: String,
    pub size: u64,
}

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// Persists `bytes` under `name`. The write must be atomic: a
    /// concurrent reader or lister never observes a partial file.
    async fn write_image(&self, name: &str, bytes: &[u8]) -> io::Result<()>;

    /// Opens a stored image for reading.
    async fn read_image(&self, name: &str) -> io::Result<File>;

    /// Returns every stored image matching the canonical name pattern,
    /// sorted ascending by name (oldest first). A snapshot only; the
    /// directory may change before the caller acts on it.
    async fn list_images(&self) -> io::Result<Vec<ImageEntry>>;
}
