use serde::{Deserialize, Serialize};

/// Default ranking weights.
/// Interview result and skills coverage dominate; experience and culture
/// fit act as tie-breakers.
pub const DEFAULT_WEIGHTS: RankingWeights = RankingWeights {
    skills_match: 0.3,
    experience: 0.2,
    interview: 0.3,
    culture_fit: 0.2,
};

/// Weights applied to the four ranking sub-scores.
///
/// Callers own the contract that weights are non-negative and sum to 1;
/// nothing here validates them, so skewed weights simply produce totals
/// outside 0..=1. `sum()` is provided for call-site checks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct RankingWeights {
    pub skills_match: f64,
    pub experience: f64,
    pub interview: f64,
    pub culture_fit: f64,
}

impl Default for RankingWeights {
    fn default() -> Self {
        DEFAULT_WEIGHTS
    }
}

impl RankingWeights {
    pub fn sum(&self) -> f64 {
        self.skills_match + self.experience + self.interview + self.culture_fit
    }
}
