//! Runtime settings
//!
//! Settings are layered, last one wins:
//!
//! 1. built-in defaults
//! 2. an optional `broken-translator.{toml,yaml,json}` in the working directory
//! 3. `BROKEN_TRANSLATOR__*` environment variables (e.g. `BROKEN_TRANSLATOR__API_KEY`)
//!
//! When no key ends up configured, `GOOGLE_TRANSLATE_API_KEY` is used. The
//! loaded value is handed to the runner once; nothing re-reads the
//! environment afterwards.

use crate::error::ChainError;
use crate::google_translate::DEFAULT_ENDPOINT;
use crate::language::{Chain, LanguageCode};
use crate::logging::LogFormat;
use crate::translator::BackendKind;
use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File};
use serde::Deserialize;

pub const API_KEY_ENV: &str = "GOOGLE_TRANSLATE_API_KEY";

/// One configured chain step; `name` falls back to the language's default label
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChainStepConfig {
    pub code: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    pub api_key: Option<String>,
    pub endpoint: String,
    pub request_timeout_secs: u64,
    /// Cosmetic delay per mocked hop
    pub mock_delay_ms: u64,
    pub chain: Vec<ChainStepConfig>,
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout_secs: 30,
            mock_delay_ms: 500,
            chain: Chain::reference()
                .steps()
                .iter()
                .map(|step| ChainStepConfig {
                    code: step.code.to_string(),
                    name: Some(step.display_name.clone()),
                })
                .collect(),
            log_level: "info".to_string(),
            log_format: LogFormat::default(),
        }
    }
}

impl std::fmt::Debug for TranslatorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslatorConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("endpoint", &self.endpoint)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("mock_delay_ms", &self.mock_delay_ms)
            .field("chain", &self.chain)
            .field("log_level", &self.log_level)
            .field("log_format", &self.log_format)
            .finish()
    }
}

impl TranslatorConfig {
    pub fn load() -> Result<Self, ChainError> {
        let builder = config::Config::builder()
            .add_source(File::with_name("broken-translator").required(false))
            .add_source(
                Environment::with_prefix("BROKEN_TRANSLATOR")
                    .separator("__")
                    .try_parsing(true),
            );

        Ok(Self::from_builder(builder)?.with_key_fallback(std::env::var(API_KEY_ENV).ok()))
    }

    /// Use `fallback` when no non-blank key is configured
    pub fn with_key_fallback(mut self, fallback: Option<String>) -> Self {
        self.api_key = self
            .api_key
            .take()
            .filter(|key| !key.trim().is_empty())
            .or(fallback);
        self
    }

    /// Deserialize settings from an already-assembled set of sources
    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ChainError> {
        Ok(builder.build()?.try_deserialize()?)
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn backend(&self) -> BackendKind {
        BackendKind::select(self.api_key.as_deref())
    }

    pub fn build_chain(&self) -> Result<Chain, ChainError> {
        let steps = self
            .chain
            .iter()
            .map(|step| {
                let code: LanguageCode = step
                    .code
                    .parse()
                    .map_err(|e| ChainError::config(format!("chain step '{}': {}", step.code, e)))?;
                let name = step
                    .name
                    .clone()
                    .unwrap_or_else(|| code.default_name().to_string());
                Ok((code, name))
            })
            .collect::<Result<Vec<_>, ChainError>>()?;

        Chain::new(steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn from_toml(toml: &str) -> TranslatorConfig {
        TranslatorConfig::from_builder(
            config::Config::builder().add_source(File::from_str(toml, FileFormat::Toml)),
        )
        .unwrap()
    }

    #[test]
    fn test_defaults() {
        let cfg = TranslatorConfig::default();
        assert!(cfg.api_key.is_none());
        assert_eq!(cfg.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(cfg.mock_delay_ms, 500);
        assert_eq!(cfg.log_format, LogFormat::Pretty);
        assert!(cfg.backend().is_mock());
        assert_eq!(cfg.build_chain().unwrap(), Chain::reference());
    }

    #[test]
    fn test_empty_source_gives_defaults() {
        let cfg = from_toml("");
        assert_eq!(cfg.request_timeout_secs, 30);
        assert_eq!(cfg.build_chain().unwrap(), Chain::reference());
    }

    #[test]
    fn test_file_overrides() {
        let cfg = from_toml(
            r#"
            api_key = "real-key"
            mock_delay_ms = 0
            log_format = "json"

            [[chain]]
            code = "ko"

            [[chain]]
            code = "de"
            name = "독일어"

            [[chain]]
            code = "ko"
            name = "한국어 (최종)"
            "#,
        );

        assert_eq!(cfg.mock_delay_ms, 0);
        assert_eq!(cfg.log_format, LogFormat::Json);
        assert_eq!(
            cfg.backend(),
            BackendKind::Live {
                api_key: "real-key".to_string()
            }
        );

        let chain = cfg.build_chain().unwrap();
        assert_eq!(chain.len(), 3);
        assert_eq!(chain.steps()[0].display_name, "한국어");
        assert_eq!(chain.steps()[1].code, LanguageCode::Other("de".to_string()));
        assert_eq!(chain.steps()[1].display_name, "독일어");
    }

    #[test]
    fn test_placeholder_key_selects_mock() {
        let cfg = from_toml(r#"api_key = "your_api_key_here""#);
        assert!(cfg.backend().is_mock());
    }

    #[test]
    fn test_blank_key_falls_back() {
        let cfg = from_toml(r#"api_key = "  ""#).with_key_fallback(Some("env-key".to_string()));
        assert_eq!(
            cfg.backend(),
            BackendKind::Live {
                api_key: "env-key".to_string()
            }
        );
    }

    #[test]
    fn test_configured_key_wins_over_fallback() {
        let cfg = from_toml(r#"api_key = "file-key""#).with_key_fallback(Some("env-key".to_string()));
        assert_eq!(cfg.api_key.as_deref(), Some("file-key"));

        let cfg = from_toml("").with_key_fallback(None);
        assert!(cfg.backend().is_mock());
    }

    #[test]
    fn test_bad_chain_code_is_config_error() {
        let cfg = from_toml(
            r#"
            [[chain]]
            code = "ko"
            [[chain]]
            code = "f i"
            "#,
        );
        match cfg.build_chain() {
            Err(ChainError::Config(msg)) => assert!(msg.contains("f i")),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_single_step_chain_rejected() {
        let cfg = TranslatorConfig {
            chain: vec![ChainStepConfig {
                code: "ko".to_string(),
                name: None,
            }],
            ..TranslatorConfig::default()
        };
        assert!(cfg.build_chain().is_err());
    }

    #[test]
    fn test_wrong_type_is_settings_error() {
        let result = TranslatorConfig::from_builder(config::Config::builder().add_source(
            File::from_str("mock_delay_ms = \"soon\"", FileFormat::Toml),
        ));
        assert!(matches!(result, Err(ChainError::Settings(_))));
    }

    #[test]
    fn test_debug_masks_key() {
        let cfg = TranslatorConfig::default().with_api_key("secret-key");
        let debug = format!("{:?}", cfg);
        assert!(debug.contains("***"));
        assert!(!debug.contains("secret-key"));
    }
}
