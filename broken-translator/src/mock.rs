//! Mock Machine Translator
//!
//! A deterministic, network-free translator used whenever no API key is
//! configured. Every target language gets one canned sentence, so a mocked
//! run always ends in the same "broken" Korean text.
//!
//! # Example
//!
//! ```ignore
//! use broken_translator::{MachineTranslator, MockTranslator};
//!
//! #[tokio::test]
//! async fn test_translation() {
//!     let mock = MockTranslator::new();
//!     let result = mock.translate("hello", "ko", "xx").await.unwrap();
//!     assert_eq!(result, "[Mock: hello]");
//! }
//! ```

use crate::error::MtResult;
use crate::language::LanguageCode;
use crate::translator::MachineTranslator;
use async_trait::async_trait;
use std::time::Duration;

/// Mock translator returning fixed placeholder text per target language
#[derive(Debug, Clone, Default)]
pub struct MockTranslator {
    /// Optional simulated network delay (in milliseconds)
    delay_ms: u64,
}

impl MockTranslator {
    pub fn new() -> Self {
        Self { delay_ms: 0 }
    }

    /// Create a MockTranslator with simulated network delay
    ///
    /// ```ignore
    /// let mock = MockTranslator::with_delay(500);
    /// // Each translation will take ~500ms, like a real API round trip
    /// ```
    pub fn with_delay(delay_ms: u64) -> Self {
        Self { delay_ms }
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    async fn apply_delay(&self) {
        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }
    }
}

/// Canned translation for `target`; unknown targets echo the input
pub fn placeholder_for(target: &LanguageCode, text: &str) -> String {
    match target {
        LanguageCode::Finnish => "🤖 Tervehdys, olen koodari (핀란드어 가짜 번역)".to_string(),
        LanguageCode::Arabic => "🤖 مرحبا أنا مبرمج (아랍어 가짜 번역)".to_string(),
        LanguageCode::Japanese => {
            "🤖 こんにちは、私はプログラマーです (일본어 가짜 번역)".to_string()
        }
        LanguageCode::Korean => "🤖 인사, 나는 코더입니다 (망가진 최종 결과!)".to_string(),
        LanguageCode::Other(_) => format!("[Mock: {}]", text),
    }
}

#[async_trait]
impl MachineTranslator for MockTranslator {
    async fn translate(
        &self,
        text: &str,
        _source_locale: &str,
        target_locale: &str,
    ) -> MtResult<String> {
        self.apply_delay().await;

        // An unparseable target still gets the echo fallback; the mock never fails.
        let translated = match target_locale.parse::<LanguageCode>() {
            Ok(code) => placeholder_for(&code, text),
            Err(_) => format!("[Mock: {}]", text),
        };
        Ok(translated)
    }

    fn provider_name(&self) -> &str {
        "Mock Translator"
    }

    fn is_mock(&self) -> bool {
        true
    }
}
