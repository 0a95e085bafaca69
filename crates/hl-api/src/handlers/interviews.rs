use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use hl_common::analysis::{ChatMessage, InterviewSimulator};
use hl_common::{Candidate, Vacancy};

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::SharedState;

#[derive(Debug, Deserialize)]
pub struct InterviewMessageRequest {
    pub vacancy_id: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct InterviewReply {
    pub candidate_id: String,
    pub vacancy_id: String,
    pub reply: String,
}

#[derive(Debug, Deserialize)]
pub struct InterviewAnalysisRequest {
    pub vacancy_id: String,
    pub conversation: Vec<ChatMessage>,
}

fn load_pair(
    state: &SharedState,
    candidate_id: &str,
    vacancy_id: &str,
) -> Result<(Candidate, Vacancy), ApiError> {
    let candidate = state
        .candidates
        .get(candidate_id)
        .ok_or_else(|| ApiError::NotFound(format!("candidate not found: {candidate_id}")))?;
    let vacancy = state
        .vacancies
        .get(vacancy_id)
        .ok_or_else(|| ApiError::NotFound(format!("vacancy not found: {vacancy_id}")))?;
    Ok((candidate, vacancy))
}

/// One interviewer turn in a simulated interview. The conversation state
/// lives on the client; each turn re-sends the interviewer framing.
pub async fn message(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    _auth: AuthUser,
    Json(request): Json<InterviewMessageRequest>,
) -> Result<Json<InterviewReply>, ApiError> {
    let Some(service) = state.completion.clone() else {
        return Err(ApiError::ServiceUnavailable(
            "no completion service configured".into(),
        ));
    };

    let (candidate, vacancy) = load_pair(&state, &id, &request.vacancy_id)?;

    let simulator = InterviewSimulator::new(service);
    let reply = simulator
        .reply(&candidate, &vacancy, &request.message)
        .await
        .map_err(|err| ApiError::ServiceUnavailable(err.to_string()))?;

    Ok(Json(InterviewReply {
        candidate_id: candidate.id,
        vacancy_id: vacancy.id,
        reply,
    }))
}

/// Assess a finished interview transcript and store the result as the
/// candidate's assessment, so it feeds the interview ranking factor.
pub async fn analyze(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    _auth: AuthUser,
    Json(request): Json<InterviewAnalysisRequest>,
) -> Result<Json<Candidate>, ApiError> {
    let Some(service) = state.completion.clone() else {
        return Err(ApiError::ServiceUnavailable(
            "no completion service configured".into(),
        ));
    };

    let (_, vacancy) = load_pair(&state, &id, &request.vacancy_id)?;

    let simulator = InterviewSimulator::new(service);
    let assessment = simulator.analyze(&vacancy, &request.conversation).await?;

    let candidate = state.candidates.set_assessment(&id, assessment)?;
    info!(candidate_id = %id, turns = request.conversation.len(), "interview analyzed");
    Ok(Json(candidate))
}
