//! Language codes, chain steps and the chain itself
//!
//! A [`Chain`] is the fixed, ordered list of [`LanguageStep`]s a run walks
//! through. It is built once from configuration and never changes afterwards.
//!
//! # Example
//!
//! ```
//! use broken_translator::language::{Chain, LanguageCode};
//!
//! let chain = Chain::reference();
//! assert_eq!(chain.len(), 5);
//! assert_eq!(chain.steps()[1].code, LanguageCode::Finnish);
//! ```

use crate::error::{ChainError, MtError, MtResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Language identifiers known to the chain
///
/// The four languages of the reference chain get their own variants so the
/// mock backend and the display metadata can match on them; anything else is
/// carried verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LanguageCode {
    Korean,
    Finnish,
    Arabic,
    Japanese,
    Other(String),
}

impl LanguageCode {
    /// Short identifier sent to the translation backend
    pub fn as_str(&self) -> &str {
        match self {
            LanguageCode::Korean => "ko",
            LanguageCode::Finnish => "fi",
            LanguageCode::Arabic => "ar",
            LanguageCode::Japanese => "ja",
            LanguageCode::Other(code) => code,
        }
    }

    /// Default label shown for this language
    pub fn default_name(&self) -> &str {
        match self {
            LanguageCode::Korean => "한국어",
            LanguageCode::Finnish => "핀란드어",
            LanguageCode::Arabic => "아랍어",
            LanguageCode::Japanese => "일본어",
            LanguageCode::Other(code) => code,
        }
    }

    pub fn flag(&self) -> &'static str {
        match self {
            LanguageCode::Korean => "🇰🇷",
            LanguageCode::Finnish => "🇫🇮",
            LanguageCode::Arabic => "🇸🇦",
            LanguageCode::Japanese => "🇯🇵",
            LanguageCode::Other(_) => "🏳️",
        }
    }
}

impl FromStr for LanguageCode {
    type Err = MtError;

    fn from_str(s: &str) -> MtResult<Self> {
        let code = s.trim();
        validate_locale(code)?;

        Ok(match code.to_ascii_lowercase().as_str() {
            "ko" => LanguageCode::Korean,
            "fi" => LanguageCode::Finnish,
            "ar" => LanguageCode::Arabic,
            "ja" => LanguageCode::Japanese,
            _ => LanguageCode::Other(code.to_string()),
        })
    }
}

impl TryFrom<String> for LanguageCode {
    type Error = MtError;

    fn try_from(value: String) -> MtResult<Self> {
        value.parse()
    }
}

impl From<LanguageCode> for String {
    fn from(code: LanguageCode) -> Self {
        code.as_str().to_string()
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validate that a locale code is in acceptable format
///
/// Accepts only ASCII alphanumerics, hyphens and underscores, e.g. `ko`,
/// `zh-TW`, `pt_BR`.
pub fn validate_locale(locale: &str) -> MtResult<()> {
    if locale.is_empty() {
        return Err(MtError::InvalidLocale("Locale code is empty".to_string()));
    }

    if !locale
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(MtError::InvalidLocale(format!(
            "Invalid characters in locale code: {}",
            locale
        )));
    }

    Ok(())
}

/// One position in the chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageStep {
    pub code: LanguageCode,
    pub display_name: String,
    /// 0-based position in the chain
    pub ordinal: usize,
}

impl LanguageStep {
    pub fn flag(&self) -> &'static str {
        self.code.flag()
    }
}

/// The fixed, ordered sequence of steps a run traverses
///
/// Always holds at least two steps, so every chain has at least one hop.
/// Codes may repeat; the reference chain starts and ends on Korean.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Chain {
    steps: Vec<LanguageStep>,
}

impl Chain {
    /// Build a chain from `(code, display name)` pairs, assigning ordinals in order
    pub fn new<I, S>(steps: I) -> Result<Self, ChainError>
    where
        I: IntoIterator<Item = (LanguageCode, S)>,
        S: Into<String>,
    {
        let steps: Vec<LanguageStep> = steps
            .into_iter()
            .enumerate()
            .map(|(ordinal, (code, name))| LanguageStep {
                code,
                display_name: name.into(),
                ordinal,
            })
            .collect();

        if steps.len() < 2 {
            return Err(ChainError::config(format!(
                "a chain needs at least 2 steps, got {}",
                steps.len()
            )));
        }

        Ok(Self { steps })
    }

    /// Build a chain from bare codes such as `["ko", "fi", "ko"]`, using default names
    pub fn from_codes<I, S>(codes: I) -> Result<Self, ChainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parsed = codes
            .into_iter()
            .map(|c| {
                let code: LanguageCode = c
                    .as_ref()
                    .parse()
                    .map_err(|e: MtError| ChainError::config(e.to_string()))?;
                let name = code.default_name().to_string();
                Ok((code, name))
            })
            .collect::<Result<Vec<_>, ChainError>>()?;

        Self::new(parsed)
    }

    /// Korean → Finnish → Arabic → Japanese → Korean
    pub fn reference() -> Self {
        Self {
            steps: vec![
                (LanguageCode::Korean, "한국어"),
                (LanguageCode::Finnish, "핀란드어"),
                (LanguageCode::Arabic, "아랍어"),
                (LanguageCode::Japanese, "일본어"),
                (LanguageCode::Korean, "한국어 (최종)"),
            ]
            .into_iter()
            .enumerate()
            .map(|(ordinal, (code, name))| LanguageStep {
                code,
                display_name: name.to_string(),
                ordinal,
            })
            .collect(),
        }
    }

    pub fn steps(&self) -> &[LanguageStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Never true for a chain built through `new` or `reference`
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Consecutive `(from, to)` pairs, one per hop
    pub fn hops(&self) -> impl Iterator<Item = (&LanguageStep, &LanguageStep)> {
        self.steps.windows(2).map(|pair| (&pair[0], &pair[1]))
    }

    pub fn last_index(&self) -> usize {
        self.steps.len() - 1
    }
}

impl Default for Chain {
    fn default() -> Self {
        Self::reference()
    }
}
