//! Directory-backed document store

use crate::StoreError;
use pagecite_domain::traits::DocumentResolver;
use pagecite_domain::DocumentId;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Resolves document ids as file names inside a root directory
///
/// Ids that would escape the root (path separators, `..`) never resolve.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    /// Create a store rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory documents are read from
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path for `id`, or `None` if the id is not a plain file name
    fn path_for(&self, id: &DocumentId) -> Option<PathBuf> {
        let name = id.as_str();
        let plain = !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains(['/', '\\', '\0']);
        plain.then(|| self.root.join(name))
    }
}

impl DocumentResolver for DirectoryStore {
    type Error = StoreError;

    async fn fetch(&self, id: &DocumentId) -> Result<Option<Vec<u8>>, StoreError> {
        let Some(path) = self.path_for(id) else {
            debug!("Rejected document id '{}'", id);
            return Ok(None);
        };

        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_fetch_existing_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("report.pdf"), b"%PDF-1.4 data").unwrap();

        let store = DirectoryStore::new(dir.path());
        let bytes = store.fetch(&DocumentId::new("report.pdf")).await.unwrap();
        assert_eq!(bytes.as_deref(), Some(&b"%PDF-1.4 data"[..]));
    }

    #[tokio::test]
    async fn test_fetch_missing_file() {
        let dir = TempDir::new().unwrap();
        let store = DirectoryStore::new(dir.path());

        let bytes = store.fetch(&DocumentId::new("absent.pdf")).await.unwrap();
        assert!(bytes.is_none());
    }

    #[tokio::test]
    async fn test_rejects_path_traversal() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("uploads");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(dir.path().join("secret.txt"), b"secret").unwrap();

        let store = DirectoryStore::new(&nested);
        for id in ["../secret.txt", "..", ".", "", "a/b", "a\\b"] {
            let bytes = store.fetch(&DocumentId::new(id)).await.unwrap();
            assert!(bytes.is_none(), "id {:?} should not resolve", id);
        }
    }

    #[tokio::test]
    async fn test_directory_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("folder")).unwrap();

        let store = DirectoryStore::new(dir.path());
        let result = store.fetch(&DocumentId::new("folder")).await;
        assert!(matches!(result, Err(StoreError::Io(_))));
    }
}
