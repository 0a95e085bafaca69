use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;

use hl_common::analysis::{candidate_fit_prompt, ResumeAnalyzer};
use hl_common::assessment::Assessment;
use hl_common::ranking::{filter_candidates, FilterCriteria};
use hl_common::store::{CandidateUpdate, NewCandidate};
use hl_common::{Candidate, CandidateStatus};

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::SharedState;

#[derive(Debug, Default, Deserialize)]
pub struct CandidateListQuery {
    pub status: Option<CandidateStatus>,
    pub min_experience: Option<u32>,
    /// Comma-separated skill list; all must match.
    pub skills: Option<String>,
    pub location: Option<String>,
}

impl CandidateListQuery {
    fn into_criteria(self) -> FilterCriteria {
        FilterCriteria {
            skills: self
                .skills
                .map(|raw| {
                    raw.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            min_experience: self.min_experience,
            location: self.location,
            statuses: self.status.into_iter().collect(),
        }
    }
}

pub async fn list(
    State(state): State<SharedState>,
    Query(query): Query<CandidateListQuery>,
    _auth: AuthUser,
) -> Json<Vec<Candidate>> {
    let criteria = query.into_criteria();
    let all = state.candidates.list();
    let filtered: Vec<Candidate> = filter_candidates(&all, &criteria)
        .into_iter()
        .cloned()
        .collect();
    Json(filtered)
}

pub async fn create(
    State(state): State<SharedState>,
    _auth: AuthUser,
    Json(new): Json<NewCandidate>,
) -> (StatusCode, Json<Candidate>) {
    let candidate = state.candidates.insert(new);
    info!(candidate_id = %candidate.id, "candidate created");
    (StatusCode::CREATED, Json(candidate))
}

pub async fn get_one(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    _auth: AuthUser,
) -> Result<Json<Candidate>, ApiError> {
    state
        .candidates
        .get(&id)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("candidate not found: {id}")))
}

pub async fn update(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    _auth: AuthUser,
    Json(update): Json<CandidateUpdate>,
) -> Result<Json<Candidate>, ApiError> {
    Ok(Json(state.candidates.update(&id, update)?))
}

pub async fn remove(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    _auth: AuthUser,
) -> Result<StatusCode, ApiError> {
    state.candidates.delete(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Ingest a raw completion-service reply (JSON or text report) as the
/// candidate's typed assessment.
pub async fn put_assessment(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    _auth: AuthUser,
    body: String,
) -> Result<Json<Candidate>, ApiError> {
    let assessment = Assessment::from_model_reply(&body)?;
    let candidate = state.candidates.set_assessment(&id, assessment)?;
    info!(candidate_id = %id, "assessment ingested");
    Ok(Json(candidate))
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub resume_text: String,
    #[serde(default)]
    pub vacancy_id: Option<String>,
}

/// Run resume analysis through the injected completion backend and store
/// the resulting assessment on the candidate.
pub async fn analyze(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    _auth: AuthUser,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<Candidate>, ApiError> {
    let Some(service) = state.completion.clone() else {
        return Err(ApiError::ServiceUnavailable(
            "no completion service configured".into(),
        ));
    };

    // 404 before spending a completion call on an unknown candidate.
    if state.candidates.get(&id).is_none() {
        return Err(ApiError::NotFound(format!("candidate not found: {id}")));
    }

    let vacancy = match &request.vacancy_id {
        Some(vacancy_id) => Some(
            state
                .vacancies
                .get(vacancy_id)
                .ok_or_else(|| ApiError::NotFound(format!("vacancy not found: {vacancy_id}")))?,
        ),
        None => None,
    };

    let analyzer = ResumeAnalyzer::new(service);
    let assessment = analyzer
        .analyze_resume(&request.resume_text, vacancy.as_ref())
        .await?;

    let candidate = state.candidates.set_assessment(&id, assessment)?;
    info!(candidate_id = %id, "resume analyzed");
    Ok(Json(candidate))
}

#[derive(Debug, Deserialize)]
pub struct FitRequest {
    pub vacancy_id: String,
}

#[derive(Debug, serde::Serialize)]
pub struct FitResponse {
    pub candidate_id: String,
    pub vacancy_id: String,
    /// Narrative fit analysis, displayed as-is; never ingested as an
    /// assessment.
    pub analysis: String,
}

/// Free-text fit analysis of one candidate against a vacancy.
pub async fn fit(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    _auth: AuthUser,
    Json(request): Json<FitRequest>,
) -> Result<Json<FitResponse>, ApiError> {
    let Some(service) = state.completion.clone() else {
        return Err(ApiError::ServiceUnavailable(
            "no completion service configured".into(),
        ));
    };

    let candidate = state
        .candidates
        .get(&id)
        .ok_or_else(|| ApiError::NotFound(format!("candidate not found: {id}")))?;
    let vacancy = state.vacancies.get(&request.vacancy_id).ok_or_else(|| {
        ApiError::NotFound(format!("vacancy not found: {}", request.vacancy_id))
    })?;

    let prompt = candidate_fit_prompt(&candidate, &vacancy);
    let analysis = service
        .complete(&prompt)
        .await
        .map_err(|err| ApiError::ServiceUnavailable(err.to_string()))?;

    Ok(Json(FitResponse {
        candidate_id: candidate.id,
        vacancy_id: vacancy.id,
        analysis,
    }))
}
