use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use hl_api::{AppConfig, AppState, SharedState};
use hl_common::analysis::{CompletionError, CompletionService};
use hl_common::store::{CandidateStore, NewCandidate, NewVacancy, VacancyStore};
use hl_common::{Candidate, CandidateSource};

struct CannedCompletion(&'static str);

#[async_trait]
impl CompletionService for CannedCompletion {
    async fn complete(&self, _prompt: &str) -> Result<String, CompletionError> {
        Ok(self.0.to_string())
    }
}

fn state_with_completion(reply: &'static str) -> SharedState {
    Arc::new(AppState {
        config: AppConfig::default(),
        candidates: CandidateStore::new(),
        vacancies: VacancyStore::new(),
        completion: Some(Arc::new(CannedCompletion(reply))),
    })
}

fn seed_vacancy(state: &SharedState) -> hl_common::Vacancy {
    state.vacancies.insert(NewVacancy {
        title: "Systems Engineer".into(),
        department: "Engineering".into(),
        location: "Remote".into(),
        employment_type: "Full-time".into(),
        salary: String::new(),
        description: String::new(),
        requirements: vec!["Rust".into()],
    })
}

fn seed_candidate(state: &SharedState) -> Candidate {
    state.candidates.insert(NewCandidate {
        name: "Ada".into(),
        email: "ada@example.com".into(),
        phone: None,
        location: "Remote".into(),
        source: CandidateSource::Github,
        resume_url: None,
        linkedin_url: None,
        github_url: None,
        vacancy_id: None,
        skills: vec!["Rust".into()],
        experience: 6,
    })
}

#[tokio::test]
async fn analyze_ingests_model_reply_as_assessment() {
    const REPLY: &str = r#"{
        "analysis": {
            "overallScore": 85,
            "skillsMatch": [{ "skill": "Rust", "score": 90, "notes": "" }],
            "cultureFit": 75,
            "recommendations": ["hire"]
        }
    }"#;

    let state = state_with_completion(REPLY);
    let candidate = seed_candidate(&state);
    let app = hl_api::create_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/candidates/{}/analyze", candidate.id))
                .header("content-type", "application/json")
                .body(Body::from(r#"{ "resume_text": "six years of Rust" }"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let updated: Candidate = serde_json::from_slice(&bytes).unwrap();

    let assessment = updated.assessment.expect("assessment stored");
    assert!((assessment.score - 0.85).abs() < 1e-9);
    assert_eq!(assessment.recommendations, vec!["hire".to_string()]);
}

#[tokio::test]
async fn fit_returns_narrative_without_touching_assessment() {
    let state = state_with_completion("Good overall fit for the role.");
    let candidate = seed_candidate(&state);
    let vacancy = seed_vacancy(&state);
    let state_handle = state.clone();
    let app = hl_api::create_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/candidates/{}/fit", candidate.id))
                .header("content-type", "application/json")
                .body(Body::from(format!(
                    r#"{{ "vacancy_id": "{}" }}"#,
                    vacancy.id
                )))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["analysis"], "Good overall fit for the role.");

    // Narrative analysis is display-only; the candidate stays unassessed.
    let stored = state_handle.candidates.get(&candidate.id).unwrap();
    assert!(stored.assessment.is_none());
}

#[tokio::test]
async fn interview_message_returns_interviewer_reply() {
    let state = state_with_completion("Tell me about a recent Rust project you shipped.");
    let candidate = seed_candidate(&state);
    let vacancy = seed_vacancy(&state);
    let state_handle = state.clone();
    let app = hl_api::create_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/candidates/{}/interview", candidate.id))
                .header("content-type", "application/json")
                .body(Body::from(format!(
                    r#"{{ "vacancy_id": "{}", "message": "Hello, I'm ready." }}"#,
                    vacancy.id
                )))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(
        body["reply"],
        "Tell me about a recent Rust project you shipped."
    );

    // A chat turn never assesses the candidate on its own.
    let stored = state_handle.candidates.get(&candidate.id).unwrap();
    assert!(stored.assessment.is_none());
}

#[tokio::test]
async fn interview_analysis_stores_assessment_from_report() {
    const REPLY: &str = "Overall score: 80\n\n\
        Experience Relevance: 70\n\n\
        Key strengths:\n- communicates clearly\n\n\
        Areas for improvement:\n- little async experience";

    let state = state_with_completion(REPLY);
    let candidate = seed_candidate(&state);
    let vacancy = seed_vacancy(&state);
    let app = hl_api::create_router(state);

    let conversation = format!(
        r#"{{ "vacancy_id": "{}", "conversation": [
            {{ "role": "interviewer", "content": "Walk me through your stack." }},
            {{ "role": "candidate", "content": "Axum and Postgres, mostly." }}
        ] }}"#,
        vacancy.id
    );

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!(
                    "/api/candidates/{}/interview/analysis",
                    candidate.id
                ))
                .header("content-type", "application/json")
                .body(Body::from(conversation))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let updated: Candidate = serde_json::from_slice(&bytes).unwrap();

    let assessment = updated.assessment.expect("assessment stored");
    assert!((assessment.score - 0.8).abs() < 1e-9);
    assert!((assessment.experience_relevance - 0.7).abs() < 1e-9);
    assert_eq!(assessment.red_flags, vec!["little async experience".to_string()]);
}

#[tokio::test]
async fn interview_with_unknown_vacancy_is_not_found() {
    let state = state_with_completion("unused");
    let candidate = seed_candidate(&state);
    let app = hl_api::create_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/candidates/{}/interview", candidate.id))
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{ "vacancy_id": "missing", "message": "hi" }"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn analyze_with_unparseable_reply_fails_cleanly() {
    let state = state_with_completion("{ definitely not json");
    let candidate = seed_candidate(&state);
    let app = hl_api::create_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/candidates/{}/analyze", candidate.id))
                .header("content-type", "application/json")
                .body(Body::from(r#"{ "resume_text": "resume" }"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
