//! Application configuration types.
//!
//! Deserialized from `{data_dir}/config.toml` by the loader in
//! `kontrakt-infra`; every section falls back to defaults when absent.

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub generator: GeneratorConfig,
    pub form: FormConfig,
    pub session: SessionConfig,
}

/// Document-generation service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Endpoint the contract payload is POSTed to.
    pub endpoint: String,
    /// Request timeout; expiry is a recoverable failure.
    pub timeout_secs: u64,
    /// Optional bearer token for the generator.
    pub api_key: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8900/api/contracts/render".to_string(),
            timeout_secs: 30,
            api_key: None,
        }
    }
}

/// Form-dialog settings: skip synonyms and the placeholder sentinel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// The fixed filler substituted for an explicitly skipped field.
    pub placeholder: String,
    /// Inputs treated as "skip this field", matched case-insensitively.
    pub skip_tokens: Vec<String>,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            placeholder: "________".to_string(),
            skip_tokens: vec![
                "-".to_string(),
                "skip".to_string(),
                "пропустить".to_string(),
            ],
        }
    }
}

impl FormConfig {
    /// Whether `input` is a skip synonym.
    ///
    /// Unicode lowercase comparison: the default token set includes Cyrillic,
    /// where ASCII case folding is not enough.
    pub fn is_skip(&self, input: &str) -> bool {
        let normalized = input.trim().to_lowercase();
        self.skip_tokens
            .iter()
            .any(|token| token.to_lowercase() == normalized)
    }

    /// Normalize raw field input: skip synonyms map to the placeholder,
    /// everything else is stored verbatim.
    pub fn normalize(&self, input: &str) -> String {
        if self.is_skip(input) {
            self.placeholder.clone()
        } else {
            input.to_string()
        }
    }
}

/// Session registry housekeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Sessions idle longer than this are evicted.
    pub idle_timeout_minutes: i64,
    /// How often the eviction task runs.
    pub eviction_interval_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_timeout_minutes: 60,
            eviction_interval_secs: 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.form.placeholder, "________");
        assert!(config.form.skip_tokens.contains(&"-".to_string()));
        assert_eq!(config.generator.timeout_secs, 30);
        assert_eq!(config.session.idle_timeout_minutes, 60);
    }

    #[test]
    fn test_is_skip_matches_case_insensitively() {
        let form = FormConfig::default();
        assert!(form.is_skip("-"));
        assert!(form.is_skip("Skip"));
        assert!(form.is_skip("SKIP"));
        assert!(form.is_skip("Пропустить"));
        assert!(form.is_skip("  пропустить  "));
        assert!(!form.is_skip("ООО Биной"));
        assert!(!form.is_skip(""));
    }

    #[test]
    fn test_normalize_maps_skip_to_placeholder() {
        let form = FormConfig::default();
        assert_eq!(form.normalize("-"), "________");
        assert_eq!(form.normalize("ООО Биной"), "ООО Биной");
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
[generator]
endpoint = "https://docs.example.uz/render"
"#,
        )
        .unwrap();
        assert_eq!(config.generator.endpoint, "https://docs.example.uz/render");
        assert_eq!(config.generator.timeout_secs, 30);
        assert_eq!(config.form.placeholder, "________");
    }
}
