//! DocumentGenerator trait definition.
//!
//! Port for the external document-rendering service: an opaque
//! `POST payload -> bytes | error`. The HTTP implementation lives in
//! `kontrakt-infra`.

use kontrakt_types::contract::ContractPayload;
use kontrakt_types::error::GeneratorError;

/// Renders a contract payload into document bytes.
pub trait DocumentGenerator: Send + Sync {
    fn generate(
        &self,
        payload: &ContractPayload,
    ) -> impl std::future::Future<Output = Result<Vec<u8>, GeneratorError>> + Send;
}
