use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use hl_common::store::{NewVacancy, VacancyUpdate};
use hl_common::Vacancy;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::SharedState;

pub async fn list(State(state): State<SharedState>, _auth: AuthUser) -> Json<Vec<Vacancy>> {
    Json(state.vacancies.list())
}

pub async fn create(
    State(state): State<SharedState>,
    _auth: AuthUser,
    Json(new): Json<NewVacancy>,
) -> (StatusCode, Json<Vacancy>) {
    let vacancy = state.vacancies.insert(new);
    info!(vacancy_id = %vacancy.id, title = %vacancy.title, "vacancy created");
    (StatusCode::CREATED, Json(vacancy))
}

pub async fn get_one(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    _auth: AuthUser,
) -> Result<Json<Vacancy>, ApiError> {
    state
        .vacancies
        .get(&id)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("vacancy not found: {id}")))
}

pub async fn update(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    _auth: AuthUser,
    Json(update): Json<VacancyUpdate>,
) -> Result<Json<Vacancy>, ApiError> {
    Ok(Json(state.vacancies.update(&id, update)?))
}

pub async fn remove(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    _auth: AuthUser,
) -> Result<StatusCode, ApiError> {
    state.vacancies.delete(&id)?;
    Ok(StatusCode::NO_CONTENT)
}
