//! Filesystem document store and data-directory resolution.

use std::path::{Path, PathBuf};

use kontrakt_core::store::DocumentStore;
use kontrakt_types::error::StoreError;

/// Resolve the data directory: `KONTRAKT_DATA_DIR`, else `~/.kontrakt`.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("KONTRAKT_DATA_DIR") {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".kontrakt")
}

/// Stores generated documents under `{data_dir}/documents`.
///
/// The returned file reference is the path relative to the data directory, so
/// rows stay valid if the directory is relocated.
pub struct LocalDocumentStore {
    data_dir: PathBuf,
}

impl LocalDocumentStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn documents_dir(&self) -> PathBuf {
        self.data_dir.join("documents")
    }

    fn resolve(&self, file_ref: &str) -> PathBuf {
        self.data_dir.join(file_ref)
    }
}

impl DocumentStore for LocalDocumentStore {
    async fn store(&self, filename: &str, bytes: &[u8]) -> Result<String, StoreError> {
        let dir = self.documents_dir();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?;

        let path = dir.join(filename);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?;

        Ok(Path::new("documents").join(filename).display().to_string())
    }

    async fn load(&self, file_ref: &str) -> Result<Vec<u8>, StoreError> {
        let path = self.resolve(file_ref);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StoreError::NotFound(file_ref.to_string()))
            }
            Err(e) => Err(StoreError::Io(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalDocumentStore::new(dir.path());

        let file_ref = store.store("contract-1.pdf", b"%PDF-1.4").await.unwrap();
        assert_eq!(file_ref, "documents/contract-1.pdf");

        let bytes = store.load(&file_ref).await.unwrap();
        assert_eq!(bytes, b"%PDF-1.4");
    }

    #[tokio::test]
    async fn test_load_missing_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalDocumentStore::new(dir.path());

        let err = store.load("documents/nope.pdf").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }
}
