//! HTTP client for the document-generation service.
//!
//! Implements the `DocumentGenerator` port: one JSON POST of the contract
//! payload, document bytes back. The request timeout comes from config and
//! expiry maps to a recoverable `GeneratorError::Timeout`. The optional API
//! key is wrapped in [`secrecy::SecretString`] and never appears in Debug
//! output or logs.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use kontrakt_core::generator::DocumentGenerator;
use kontrakt_types::config::GeneratorConfig;
use kontrakt_types::contract::ContractPayload;
use kontrakt_types::error::GeneratorError;

/// How much of an error body is kept for the user-visible detail.
const DETAIL_LIMIT: usize = 200;

/// Reqwest-based implementation of `DocumentGenerator`.
pub struct HttpDocumentGenerator {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<SecretString>,
    timeout_secs: u64,
}

impl HttpDocumentGenerator {
    /// Build the client from config. The timeout is set on the client itself
    /// so every request is bounded.
    pub fn new(config: &GeneratorConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone().map(SecretString::from),
            timeout_secs: config.timeout_secs,
        }
    }

    /// Override the endpoint (useful for tests or proxies).
    pub fn with_endpoint(mut self, endpoint: String) -> Self {
        self.endpoint = endpoint;
        self
    }

    fn map_transport_error(&self, e: reqwest::Error) -> GeneratorError {
        if e.is_timeout() {
            GeneratorError::Timeout {
                seconds: self.timeout_secs,
            }
        } else {
            GeneratorError::Request(e.to_string())
        }
    }
}

impl DocumentGenerator for HttpDocumentGenerator {
    async fn generate(&self, payload: &ContractPayload) -> Result<Vec<u8>, GeneratorError> {
        debug!(endpoint = %self.endpoint, items = payload.items.len(), "Requesting document generation");

        let mut request = self.client.post(&self.endpoint).json(payload);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key.expose_secret());
        }

        let response = request
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail: String = body.chars().take(DETAIL_LIMIT).collect();
            return Err(GeneratorError::Status {
                status: status.as_u16(),
                detail,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.map_transport_error(e))?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builds_from_default_config() {
        let generator = HttpDocumentGenerator::new(&GeneratorConfig::default());
        assert_eq!(generator.timeout_secs, 30);
        assert!(generator.api_key.is_none());
    }

    #[test]
    fn test_endpoint_override() {
        let generator = HttpDocumentGenerator::new(&GeneratorConfig::default())
            .with_endpoint("http://localhost:1/never".to_string());
        assert_eq!(generator.endpoint, "http://localhost:1/never");
    }
}
