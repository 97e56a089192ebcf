//! Brokenness tiers

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Discrete bucket for a brokenness score, level 1 (barely changed) to 5
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BrokennessTier {
    Suspicious,
    Cracked,
    Broken,
    Wrecked,
    Destroyed,
}

impl BrokennessTier {
    /// Map a brokenness score to its tier
    ///
    /// Total over `f64`: anything below 30, including NaN, is `Suspicious`.
    ///
    /// ```
    /// use broken_translator::tier::BrokennessTier;
    ///
    /// assert_eq!(BrokennessTier::from_brokenness(95.0).level(), 5);
    /// assert_eq!(BrokennessTier::from_brokenness(30.0).level(), 2);
    /// assert_eq!(BrokennessTier::from_brokenness(29.9).level(), 1);
    /// ```
    pub fn from_brokenness(score: f64) -> Self {
        if score >= 90.0 {
            BrokennessTier::Destroyed
        } else if score >= 70.0 {
            BrokennessTier::Wrecked
        } else if score >= 50.0 {
            BrokennessTier::Broken
        } else if score >= 30.0 {
            BrokennessTier::Cracked
        } else {
            BrokennessTier::Suspicious
        }
    }

    pub fn level(self) -> u8 {
        match self {
            BrokennessTier::Suspicious => 1,
            BrokennessTier::Cracked => 2,
            BrokennessTier::Broken => 3,
            BrokennessTier::Wrecked => 4,
            BrokennessTier::Destroyed => 5,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BrokennessTier::Suspicious => "suspicious",
            BrokennessTier::Cracked => "cracked",
            BrokennessTier::Broken => "broken",
            BrokennessTier::Wrecked => "wrecked",
            BrokennessTier::Destroyed => "destroyed",
        }
    }

    /// Display message shown next to the score
    pub fn message(self) -> &'static str {
        match self {
            BrokennessTier::Suspicious => "🤔 어? 너무 비슷한데?",
            BrokennessTier::Cracked => "😅 조금 망가졌어요",
            BrokennessTier::Broken => "😵 많이 망가졌네요!",
            BrokennessTier::Wrecked => "💥 엄청 망가졌어요!",
            BrokennessTier::Destroyed => "🔥 완벽하게 파괴됨!",
        }
    }
}

impl Serialize for BrokennessTier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("BrokennessTier", 3)?;
        state.serialize_field("level", &self.level())?;
        state.serialize_field("name", self.name())?;
        state.serialize_field("message", self.message())?;
        state.end()
    }
}
