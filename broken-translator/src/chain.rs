//! Translation chain runner
//!
//! Walks a [`Chain`] hop by hop. Each hop feeds the previous hop's output to
//! the backend, so hops run strictly one after another. A run either returns
//! every step or fails as a whole; no partial run is ever handed back.
//!
//! # Example
//!
//! ```
//! use broken_translator::{Chain, ChainRunner, MockTranslator};
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let runner = ChainRunner::new(Chain::reference(), Arc::new(MockTranslator::new()));
//! let run = runner.run("테스트").await.unwrap();
//!
//! assert_eq!(run.results.len(), 5);
//! assert!(run.results[0].is_original);
//! assert!(run.results[4].is_final);
//! # }
//! ```

use crate::config::TranslatorConfig;
use crate::error::ChainError;
use crate::google_translate::GoogleTranslateProvider;
use crate::language::{Chain, LanguageStep};
use crate::mock::MockTranslator;
use crate::similarity::Comparison;
use crate::translator::{BackendKind, MachineTranslator};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, instrument};

/// Text produced at one step of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainResult {
    /// Equals `language.ordinal`
    pub step: usize,
    pub language: LanguageStep,
    pub text: String,
    pub is_original: bool,
    pub is_final: bool,
}

/// Everything a run produced, in chain order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainRun {
    pub results: Vec<ChainResult>,
    pub used_mock: bool,
}

impl ChainRun {
    /// The caller's untouched input
    pub fn original(&self) -> &ChainResult {
        &self.results[0]
    }

    pub fn final_result(&self) -> &ChainResult {
        &self.results[self.results.len() - 1]
    }

    pub fn comparison(&self) -> Comparison {
        Comparison::new(&self.original().text, &self.final_result().text)
    }
}

/// Runs text through a fixed chain of translations
///
/// The backend is chosen when the runner is built and stays the same for
/// every run, so a run is never half mocked. `used_mock` in every run comes
/// from the backend itself.
#[derive(Clone)]
pub struct ChainRunner {
    chain: Chain,
    translator: Arc<dyn MachineTranslator>,
}

impl ChainRunner {
    /// Use an explicit translator
    pub fn new(chain: Chain, translator: Arc<dyn MachineTranslator>) -> Self {
        Self { chain, translator }
    }

    /// Build the chain and pick the backend from loaded settings
    pub fn from_config(config: &TranslatorConfig) -> Result<Self, ChainError> {
        let chain = config.build_chain()?;

        let runner = match config.backend() {
            BackendKind::Mock => Self::new(
                chain,
                Arc::new(MockTranslator::with_delay(config.mock_delay_ms)),
            ),
            BackendKind::Live { api_key } => {
                let provider = GoogleTranslateProvider::with_timeout(
                    api_key,
                    Duration::from_secs(config.request_timeout_secs),
                )
                .map_err(|e| ChainError::config(e.to_string()))?
                .with_endpoint(config.endpoint.clone());
                Self::new(chain, Arc::new(provider))
            }
        };

        info!(
            provider = runner.provider_name(),
            steps = runner.chain.len(),
            "translation chain ready"
        );
        Ok(runner)
    }

    /// Same backend, different chain
    pub fn with_chain(mut self, chain: Chain) -> Self {
        self.chain = chain;
        self
    }

    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    pub fn uses_mock(&self) -> bool {
        self.translator.is_mock()
    }

    pub fn provider_name(&self) -> &str {
        self.translator.provider_name()
    }

    /// Run `original_text` through every hop of the chain
    ///
    /// Empty or blank input is not rejected here; it flows through the
    /// hops like any other text. Fails on the first backend error, with the
    /// failing hop's step index and language codes attached.
    #[instrument(
        skip_all,
        fields(provider = %self.translator.provider_name(), steps = self.chain.len())
    )]
    pub async fn run(&self, original_text: &str) -> Result<ChainRun, ChainError> {
        let last = self.chain.last_index();
        let mut results = Vec::with_capacity(self.chain.len());

        results.push(ChainResult {
            step: 0,
            language: self.chain.steps()[0].clone(),
            text: original_text.to_string(),
            is_original: true,
            is_final: false,
        });

        let mut current_text = original_text.to_string();

        for (from, to) in self.chain.hops() {
            let step = to.ordinal;
            debug!(step, source = %from.code, target = %to.code, "translating hop");

            current_text = self
                .translator
                .translate(&current_text, from.code.as_str(), to.code.as_str())
                .await
                .map_err(|e| {
                    error!(step, source = %from.code, target = %to.code, error = %e, "translation hop failed");
                    ChainError::Backend {
                        step,
                        source_code: from.code.to_string(),
                        target_code: to.code.to_string(),
                        source: e,
                    }
                })?;

            results.push(ChainResult {
                step,
                language: to.clone(),
                text: current_text.clone(),
                is_original: false,
                is_final: step == last,
            });
        }

        let used_mock = self.uses_mock();
        debug!(used_mock, "chain finished");

        Ok(ChainRun { results, used_mock })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{MtError, MtResult};
    use crate::language::LanguageCode;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records every call and fails on one chosen call
    struct ScriptedTranslator {
        calls: Mutex<Vec<(String, String, String)>>,
        fail_on_call: Option<usize>,
    }

    impl ScriptedTranslator {
        fn new(fail_on_call: Option<usize>) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_on_call,
            }
        }

        fn calls(&self) -> Vec<(String, String, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MachineTranslator for ScriptedTranslator {
        async fn translate(&self, text: &str, source: &str, target: &str) -> MtResult<String> {
            let mut calls = self.calls.lock().unwrap();
            calls.push((text.to_string(), source.to_string(), target.to_string()));
            if Some(calls.len()) == self.fail_on_call {
                return Err(MtError::Api {
                    status: 500,
                    message: "scripted failure".to_string(),
                });
            }
            Ok(format!("{}>{}", text, target))
        }

        fn provider_name(&self) -> &str {
            "Scripted"
        }
    }

    fn mock_runner() -> ChainRunner {
        ChainRunner::new(Chain::reference(), Arc::new(MockTranslator::new()))
    }

    fn assert_run_shape(run: &ChainRun, len: usize) {
        assert_eq!(run.results.len(), len);
        for (i, result) in run.results.iter().enumerate() {
            assert_eq!(result.step, i);
            assert_eq!(result.language.ordinal, i);
            assert_eq!(result.is_original, i == 0, "is_original at {}", i);
            assert_eq!(result.is_final, i == len - 1, "is_final at {}", i);
        }
    }

    #[tokio::test]
    async fn test_mock_run_on_reference_chain() {
        let run = mock_runner().run("테스트").await.unwrap();

        assert_run_shape(&run, 5);
        assert!(run.used_mock);
        assert_eq!(run.results[0].text, "테스트");
        assert_eq!(
            run.results[1].text,
            "🤖 Tervehdys, olen koodari (핀란드어 가짜 번역)"
        );
        assert_eq!(run.results[1].language.code, LanguageCode::Finnish);
        assert!(run.results[4].is_final);
        assert_eq!(run.final_result().text, "🤖 인사, 나는 코더입니다 (망가진 최종 결과!)");
    }

    #[tokio::test]
    async fn test_mock_runs_are_deterministic() {
        let runner = mock_runner();
        let first = runner.run("안녕하세요").await.unwrap();
        let second = runner.run("안녕하세요").await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_each_hop_receives_previous_output() {
        let translator = Arc::new(ScriptedTranslator::new(None));
        let runner = ChainRunner::new(Chain::reference(), translator.clone());

        let run = runner.run("x").await.unwrap();

        assert_eq!(
            translator.calls(),
            vec![
                ("x".to_string(), "ko".to_string(), "fi".to_string()),
                ("x>fi".to_string(), "fi".to_string(), "ar".to_string()),
                ("x>fi>ar".to_string(), "ar".to_string(), "ja".to_string()),
                ("x>fi>ar>ja".to_string(), "ja".to_string(), "ko".to_string()),
            ]
        );
        assert_eq!(run.final_result().text, "x>fi>ar>ja>ko");
        assert!(!run.used_mock);
        assert_run_shape(&run, 5);
    }

    #[tokio::test]
    async fn test_failure_aborts_remaining_hops() {
        let translator = Arc::new(ScriptedTranslator::new(Some(2)));
        let runner = ChainRunner::new(Chain::reference(), translator.clone());

        let err = runner.run("x").await.unwrap_err();

        match &err {
            ChainError::Backend {
                step,
                source_code,
                target_code,
                source,
            } => {
                assert_eq!(*step, 2);
                assert_eq!(source_code, "fi");
                assert_eq!(target_code, "ar");
                assert!(matches!(source, MtError::Api { status: 500, .. }));
            }
            other => panic!("Expected Backend error, got {:?}", other),
        }
        assert_eq!(translator.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_failure_on_first_hop() {
        let translator = Arc::new(ScriptedTranslator::new(Some(1)));
        let runner = ChainRunner::new(Chain::reference(), translator.clone());

        let err = runner.run("x").await.unwrap_err();
        assert_eq!(err.failed_step(), Some(1));
        assert_eq!(translator.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_input_flows_through() {
        let translator = Arc::new(ScriptedTranslator::new(None));
        let runner = ChainRunner::new(Chain::reference(), translator.clone());

        let run = runner.run("").await.unwrap();
        assert_run_shape(&run, 5);
        assert_eq!(run.original().text, "");
        assert_eq!(translator.calls()[0].0, "");
    }

    #[tokio::test]
    async fn test_whitespace_input_kept_verbatim() {
        let run = mock_runner().run("  \n").await.unwrap();
        assert_eq!(run.original().text, "  \n");
        assert_run_shape(&run, 5);
    }

    #[tokio::test]
    async fn test_two_step_chain() {
        let chain = Chain::from_codes(["ko", "ja"]).unwrap();
        let runner = ChainRunner::new(chain, Arc::new(MockTranslator::new()));
        let run = runner.run("안녕").await.unwrap();

        assert_run_shape(&run, 2);
        assert!(run.results[1].is_final);
        assert!(run.results[1].text.contains("こんにちは"));
    }

    #[tokio::test]
    async fn test_with_chain_keeps_backend() {
        let runner = mock_runner().with_chain(Chain::from_codes(["ko", "fi", "ko"]).unwrap());
        assert!(runner.uses_mock());

        let run = runner.run("안녕").await.unwrap();
        assert_run_shape(&run, 3);
        assert!(run.used_mock);
    }

    #[tokio::test]
    async fn test_used_mock_follows_backend() {
        let mocked = mock_runner().run("테스트").await.unwrap();
        assert!(mocked.used_mock);
        assert_eq!(
            mocked.results[1].text,
            "🤖 Tervehdys, olen koodari (핀란드어 가짜 번역)"
        );

        let scripted = ChainRunner::new(
            Chain::reference(),
            Arc::new(ScriptedTranslator::new(None)),
        );
        assert!(!scripted.uses_mock());
        assert!(!scripted.run("테스트").await.unwrap().used_mock);
    }

    #[tokio::test]
    async fn test_unknown_language_uses_echo_fallback() {
        let chain = Chain::from_codes(["ko", "de", "ko"]).unwrap();
        let runner = ChainRunner::new(chain, Arc::new(MockTranslator::new()));
        let run = runner.run("안녕").await.unwrap();

        assert_eq!(run.results[1].text, "[Mock: 안녕]");
    }

    #[tokio::test]
    async fn test_comparison_of_mock_run() {
        let run = mock_runner().run("안녕하세요").await.unwrap();
        let cmp = run.comparison();

        assert_eq!(cmp.original, "안녕하세요");
        assert_eq!(cmp.final_text, run.final_result().text);
        assert_eq!(cmp.brokenness, 100.0 - cmp.similarity);
    }

    #[test]
    fn test_from_config_without_key_is_mock() {
        let config = TranslatorConfig {
            mock_delay_ms: 0,
            ..TranslatorConfig::default()
        };
        let runner = ChainRunner::from_config(&config).unwrap();
        assert!(runner.uses_mock());
        assert_eq!(runner.provider_name(), "Mock Translator");
        assert_eq!(runner.chain().len(), 5);
    }

    #[test]
    fn test_from_config_with_key_is_live() {
        let config = TranslatorConfig::default().with_api_key("test-key");
        let runner = ChainRunner::from_config(&config).unwrap();
        assert!(!runner.uses_mock());
        assert_eq!(runner.provider_name(), "Google Translate");
    }

    #[tokio::test]
    async fn test_concurrent_runs_do_not_interfere() {
        let runner = Arc::new(mock_runner());
        let a = tokio::spawn({
            let runner = runner.clone();
            async move { runner.run("첫째").await }
        });
        let b = tokio::spawn({
            let runner = runner.clone();
            async move { runner.run("둘째").await }
        });

        let (a, b) = (a.await.unwrap().unwrap(), b.await.unwrap().unwrap());
        assert_eq!(a.original().text, "첫째");
        assert_eq!(b.original().text, "둘째");
        assert_eq!(a.final_result().text, b.final_result().text);
    }

    #[test]
    fn test_run_serializes_camel_case() {
        let run = ChainRun {
            results: vec![ChainResult {
                step: 0,
                language: Chain::reference().steps()[0].clone(),
                text: "안녕".to_string(),
                is_original: true,
                is_final: false,
            }],
            used_mock: true,
        };
        let json = serde_json::to_value(&run).unwrap();
        assert_eq!(json["usedMock"], true);
        assert_eq!(json["results"][0]["isOriginal"], true);
        assert_eq!(json["results"][0]["isFinal"], false);
        assert_eq!(json["results"][0]["language"]["code"], "ko");
    }
}
