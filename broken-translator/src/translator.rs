//! Machine translation trait and backend selection
//!
//! The `MachineTranslator` trait is the seam between the chain runner and the
//! backend that does the actual work, so the runner never knows whether it is
//! talking to Google Translate or to the mock.
//!
//! # Example
//!
//! ```ignore
//! use broken_translator::{MachineTranslator, MockTranslator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mock = MockTranslator::new();
//!     let result = mock.translate("안녕하세요", "ko", "fi").await?;
//!     println!("{}", result);
//!     Ok(())
//! }
//! ```

use crate::error::MtResult;
use async_trait::async_trait;

/// Credential value shipped in sample `.env` files; treated as "no key"
pub const PLACEHOLDER_API_KEY: &str = "your_api_key_here";

/// Generic trait for machine translation providers
///
/// All methods are async to support I/O-bound operations like network requests.
#[async_trait]
pub trait MachineTranslator: Send + Sync {
    /// Translate a single text string from source to target language
    ///
    /// # Arguments
    ///
    /// * `text` - The text to translate
    /// * `source_locale` - Source language code (e.g., "ko")
    /// * `target_locale` - Target language code (e.g., "fi")
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The translated text
    /// * `Err(MtError)` - If translation fails
    async fn translate(
        &self,
        text: &str,
        source_locale: &str,
        target_locale: &str,
    ) -> MtResult<String>;

    /// Name of this provider, used in logs
    fn provider_name(&self) -> &str;

    /// Whether this provider serves canned data instead of real translations
    fn is_mock(&self) -> bool {
        false
    }
}

/// Which backend a runner talks to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendKind {
    Mock,
    Live { api_key: String },
}

impl BackendKind {
    /// Pick the backend for a configured credential
    ///
    /// Falls back to the mock when the key is missing, blank, or still the
    /// sample placeholder.
    pub fn select(api_key: Option<&str>) -> Self {
        match api_key.map(str::trim) {
            None | Some("") | Some(PLACEHOLDER_API_KEY) => BackendKind::Mock,
            Some(key) => BackendKind::Live {
                api_key: key.to_string(),
            },
        }
    }

    pub fn is_mock(&self) -> bool {
        matches!(self, BackendKind::Mock)
    }
}
