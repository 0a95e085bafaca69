//! Candidate ranking against a vacancy.
//!
//! Pure snapshot-in, scores-out computation: no store access, no I/O, and
//! nothing here can fail. Candidates that have not been assessed yet are
//! skipped rather than scored at zero.

mod experience;
mod filter;
mod skills;
mod weights;

pub use experience::{extract_experience_range, experience_score, ExperienceRange, DEFAULT_RANGE};
pub use filter::{filter_candidates, FilterCriteria};
pub use skills::skills_match_score;
pub use weights::{RankingWeights, DEFAULT_WEIGHTS};

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::{Candidate, Vacancy};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub skills: f64,
    pub experience: f64,
    pub interview: f64,
    pub culture: f64,
}

/// Ranking output for one candidate. Ephemeral: recomputed per request,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateScore {
    pub candidate_id: String,
    pub total: f64,
    pub breakdown: ScoreBreakdown,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
}

/// Rank assessed candidates against a vacancy, highest total first.
///
/// The experience target range is extracted once from the vacancy
/// requirements (first "<n>[-<m>] years" pattern, defaulting to 2-8
/// years). Strengths and weaknesses are the assessment's recommendation
/// and red-flag lists passed through verbatim.
///
/// The sort is stable, so candidates with equal totals keep their input
/// order. Weights are applied as given; see [`RankingWeights`] for the
/// caller contract.
pub fn rank_candidates(
    candidates: &[Candidate],
    vacancy: &Vacancy,
    weights: &RankingWeights,
) -> Vec<CandidateScore> {
    let range = extract_experience_range(&vacancy.requirements).unwrap_or(DEFAULT_RANGE);

    let mut ranked: Vec<CandidateScore> = candidates
        .iter()
        .filter_map(|candidate| {
            let assessment = candidate.assessment.as_ref()?;

            let skills = skills_match_score(&assessment.skills, &vacancy.requirements);
            let experience = experience_score(candidate.experience, range);
            let interview = assessment.score;
            let culture = assessment.culture_fit;

            let total = skills * weights.skills_match
                + experience * weights.experience
                + interview * weights.interview
                + culture * weights.culture_fit;

            Some(CandidateScore {
                candidate_id: candidate.id.clone(),
                total,
                breakdown: ScoreBreakdown {
                    skills,
                    experience,
                    interview,
                    culture,
                },
                strengths: assessment.recommendations.clone(),
                weaknesses: assessment.red_flags.clone(),
            })
        })
        .collect();

    ranked.sort_by(|a, b| b.total.partial_cmp(&a.total).unwrap_or(Ordering::Equal));
    ranked
}
