//! Character-set similarity between two texts
//!
//! The score is a Jaccard index over the sets of distinct non-whitespace
//! characters, scaled to `0..=100`. Word order, repetition and spacing do not
//! matter, only which characters appear at all.

use crate::tier::BrokennessTier;
use serde::Serialize;
use std::collections::HashSet;

fn char_set(text: &str) -> HashSet<char> {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Similarity of `a` and `b` in percent
///
/// Two texts with no non-whitespace characters at all (both empty, or both
/// blank) score 100: there is nothing to tell them apart.
///
/// ```
/// use broken_translator::similarity::similarity;
///
/// assert_eq!(similarity("안녕", "안녕"), 100.0);
/// assert_eq!(similarity("안녕", "하세요"), 0.0);
/// assert_eq!(similarity("ab", "bc"), 100.0 / 3.0);
/// ```
pub fn similarity(a: &str, b: &str) -> f64 {
    let set_a = char_set(a);
    let set_b = char_set(b);

    let intersection = set_a.intersection(&set_b).count();
    let union = set_a.len() + set_b.len() - intersection;

    if union == 0 {
        return 100.0;
    }

    100.0 * intersection as f64 / union as f64
}

/// How far `final_text` drifted from `original`, `100 - similarity`
pub fn brokenness(original: &str, final_text: &str) -> f64 {
    100.0 - similarity(original, final_text)
}

/// Side-by-side summary of a run's first and last text
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    pub original: String,
    pub final_text: String,
    pub similarity: f64,
    pub brokenness: f64,
    pub tier: BrokennessTier,
}

impl Comparison {
    pub fn new(original: impl Into<String>, final_text: impl Into<String>) -> Self {
        let original = original.into();
        let final_text = final_text.into();
        let similarity = similarity(&original, &final_text);
        let brokenness = 100.0 - similarity;

        Self {
            original,
            final_text,
            similarity,
            brokenness,
            tier: BrokennessTier::from_brokenness(brokenness),
        }
    }

    pub fn message(&self) -> &'static str {
        self.tier.message()
    }
}
