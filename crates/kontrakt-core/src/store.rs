//! DocumentStore trait definition.
//!
//! Port for keeping generated documents retrievable after delivery. The
//! filesystem implementation lives in `kontrakt-infra`.

use kontrakt_types::error::StoreError;

/// Stores generated documents and serves them back by reference.
pub trait DocumentStore: Send + Sync {
    /// Persist `bytes` under `filename`; returns an opaque file reference.
    fn store(
        &self,
        filename: &str,
        bytes: &[u8],
    ) -> impl std::future::Future<Output = Result<String, StoreError>> + Send;

    /// Load a previously stored document.
    fn load(
        &self,
        file_ref: &str,
    ) -> impl std::future::Future<Output = Result<Vec<u8>, StoreError>> + Send;
}
