//! Broken translator
//!
//! Sends a text through a fixed chain of machine translations
//! (Korean → Finnish → Arabic → Japanese → Korean by default) and measures
//! how much of it survives the round trip.
//!
//! # Workflow Example
//!
//! ```ignore
//! use broken_translator::{ChainRunner, TranslatorConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1. Load settings (file, env, GOOGLE_TRANSLATE_API_KEY)
//!     let config = TranslatorConfig::load()?;
//!
//!     // 2. Build the runner; without an API key it uses the mock backend
//!     let runner = ChainRunner::from_config(&config)?;
//!
//!     // 3. Run the chain
//!     let run = runner.run("안녕하세요, 저는 개발자입니다.").await?;
//!     for result in &run.results {
//!         println!("{} {}: {}", result.language.flag(), result.language.display_name, result.text);
//!     }
//!
//!     // 4. Compare first and last text
//!     let comparison = run.comparison();
//!     println!("{:.0}% {}", comparison.brokenness, comparison.message());
//!     Ok(())
//! }
//! ```

pub mod chain;
pub mod config;
pub mod error;
pub mod google_translate;
pub mod language;
pub mod logging;
pub mod mock;
pub mod similarity;
pub mod tier;
pub mod translator;


pub use crate::config::{ChainStepConfig, TranslatorConfig};
pub use chain::{ChainResult, ChainRun, ChainRunner};
pub use error::{ChainError, MtError, MtResult};
pub use google_translate::GoogleTranslateProvider;
pub use language::{Chain, LanguageCode, LanguageStep};
pub use mock::MockTranslator;
pub use similarity::{Comparison, brokenness, similarity};
pub use tier::BrokennessTier;
pub use translator::{BackendKind, MachineTranslator};
