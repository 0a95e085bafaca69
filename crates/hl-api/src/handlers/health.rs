use axum::{extract::State, Json};
use serde_json::json;

use crate::SharedState;

pub async fn livez() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn readyz(State(state): State<SharedState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "application": env!("CARGO_PKG_NAME"),
        "candidates": state.candidates.list().len(),
        "vacancies": state.vacancies.list().len(),
        "completion_service": state.completion.is_some(),
    }))
}
