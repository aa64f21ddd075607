use std::path::{Path, PathBuf};

use rand::Rng;
use thiserror::Error;

/// Public path prefix stored uploads are served under. The relative paths
/// persisted in blog rows start with this prefix.
pub const PUBLIC_PREFIX: &str = "/uploads";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("filename has no extension")]
    MissingExtension,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Disk-backed placement policy for accepted uploads.
///
/// Files land directly under a fixed upload root as
/// `<field>-<millis>-<random>.<ext>`, where the timestamp/random pair makes
/// collisions practically impossible without any coordination. Callers only
/// ever see the `/uploads/<name>` relative path; the filesystem root stays
/// internal.
#[derive(Clone)]
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Creates the upload root if it does not exist. Called once at startup.
    pub async fn ensure_root(&self) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    /// Writes `bytes` under the upload root and returns the relative path to
    /// persist (e.g. `/uploads/image-1711034455123-488137561.png`).
    ///
    /// The extension is taken from `original_name` verbatim, casing
    /// preserved. Nothing is written when the name has no extension.
    pub async fn save(
        &self,
        field_name: &str,
        original_name: &str,
        bytes: &[u8],
    ) -> Result<String, StoreError> {
        let ext = Path::new(original_name)
            .extension()
            .and_then(|e| e.to_str())
            .ok_or(StoreError::MissingExtension)?;

        let millis = chrono::Utc::now().timestamp_millis();
        let token: u32 = rand::rng().random_range(0..1_000_000_000);
        let filename = format!("{field_name}-{millis}-{token}.{ext}");

        tokio::fs::write(self.root.join(&filename), bytes).await?;

        Ok(format!("{PUBLIC_PREFIX}/{filename}"))
    }

    /// Best-effort removal of a previously stored file, given the relative
    /// path persisted in a blog row. Paths outside the upload root are
    /// refused. Used to clean up replaced and deleted images.
    pub async fn remove(&self, relative_path: &str) -> Result<(), StoreError> {
        let Some(name) = relative_path.strip_prefix(&format!("{PUBLIC_PREFIX}/")) else {
            return Ok(());
        };
        // Only flat names are ever produced by `save`.
        if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
            return Ok(());
        }
        match tokio::fs::remove_file(self.root.join(name)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, UploadStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path());
        (dir, store)
    }

    #[tokio::test]
    async fn save_writes_file_and_returns_relative_path() {
        let (dir, store) = store();

        let path = store.save("image", "photo.png", b"bytes").await.unwrap();

        assert!(path.starts_with("/uploads/image-"));
        assert!(path.ends_with(".png"));

        let name = path.strip_prefix("/uploads/").unwrap();
        let on_disk = std::fs::read(dir.path().join(name)).unwrap();
        assert_eq!(on_disk, b"bytes");
    }

    #[tokio::test]
    async fn save_preserves_extension_casing() {
        let (_dir, store) = store();
        let path = store.save("image", "photo.PNG", b"x").await.unwrap();
        assert!(path.ends_with(".PNG"));
    }

    #[tokio::test]
    async fn save_rejects_extensionless_name_without_writing() {
        let (dir, store) = store();
        let err = store.save("image", "noext", b"x").await.unwrap_err();
        assert!(matches!(err, StoreError::MissingExtension));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn consecutive_saves_never_collide() {
        let (dir, store) = store();
        for _ in 0..10 {
            store.save("image", "a.png", b"x").await.unwrap();
        }
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 10);
    }

    #[tokio::test]
    async fn remove_deletes_stored_file() {
        let (dir, store) = store();
        let path = store.save("image", "a.png", b"x").await.unwrap();
        store.remove(&path).await.unwrap();
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn remove_is_noop_for_missing_or_foreign_paths() {
        let (dir, store) = store();
        std::fs::write(dir.path().join("keep.png"), b"x").unwrap();

        store.remove("/uploads/gone.png").await.unwrap();
        store.remove("/elsewhere/keep.png").await.unwrap();
        store.remove("/uploads/../keep.png").await.unwrap();

        assert!(dir.path().join("keep.png").exists());
    }
}
