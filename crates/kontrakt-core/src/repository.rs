//! ContractRepository trait definition.
//!
//! Persistence port for contract summary rows. Implementations live in
//! `kontrakt-infra` (e.g., `SqliteContractRepository`). Uses native async fn
//! in traits (RPITIT, Rust 2024 edition).

use kontrakt_types::contract::{ContractRecord, NewContract};
use kontrakt_types::error::RepositoryError;

/// Repository trait for contract summary persistence.
pub trait ContractRepository: Send + Sync {
    /// Insert a summary row after a successful generation.
    fn save(
        &self,
        contract: &NewContract,
    ) -> impl std::future::Future<Output = Result<ContractRecord, RepositoryError>> + Send;

    /// Get one summary row by id.
    fn get(
        &self,
        id: i64,
    ) -> impl std::future::Future<Output = Result<Option<ContractRecord>, RepositoryError>> + Send;

    /// List the most recent rows, newest first.
    fn list_recent(
        &self,
        limit: i64,
    ) -> impl std::future::Future<Output = Result<Vec<ContractRecord>, RepositoryError>> + Send;

    /// Count all persisted contracts.
    fn count(&self) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;
}
