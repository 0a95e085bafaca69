use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use tracing::info;

use hl_common::ranking::{rank_candidates, CandidateScore, RankingWeights};

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::SharedState;

#[derive(Debug, Default, Deserialize)]
pub struct RankingRequest {
    /// Restrict ranking to these candidates; all stored candidates when
    /// absent. Unknown ids are ignored.
    #[serde(default)]
    pub candidate_ids: Option<Vec<String>>,
    /// Weight overrides; missing fields fall back to the defaults.
    #[serde(default)]
    pub weights: Option<RankingWeights>,
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Rank candidates against a vacancy. Recomputed from a fresh snapshot on
/// every call; nothing is persisted.
pub async fn rank(
    State(state): State<SharedState>,
    Path(vacancy_id): Path<String>,
    _auth: AuthUser,
    Json(request): Json<RankingRequest>,
) -> Result<Json<Vec<CandidateScore>>, ApiError> {
    let vacancy = state
        .vacancies
        .get(&vacancy_id)
        .ok_or_else(|| ApiError::NotFound(format!("vacancy not found: {vacancy_id}")))?;

    let candidates = match &request.candidate_ids {
        Some(ids) => ids
            .iter()
            .filter_map(|id| state.candidates.get(id))
            .collect(),
        None => state.candidates.list(),
    };

    let weights = request.weights.unwrap_or_default();
    let mut scores = rank_candidates(&candidates, &vacancy, &weights);
    if let Some(limit) = request.limit {
        scores.truncate(limit);
    }

    info!(
        vacancy_id = %vacancy_id,
        candidates = candidates.len(),
        ranked = scores.len(),
        "ranking computed"
    );
    Ok(Json(scores))
}
