use std::sync::Arc;

use axum::{
    extract::FromRef,
    http::header::{HeaderName, HeaderValue, CONTENT_TYPE},
    http::Method,
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::warn;

use hl_common::analysis::CompletionService;
use hl_common::store::{CandidateStore, VacancyStore};

pub mod auth;
pub mod error;
pub mod handlers;

use auth::AuthConfig;
use handlers::{candidates, health, interviews, rankings, vacancies};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub api_key: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 3010,
            cors_origins: vec!["http://localhost:3000".to_string()],
            api_key: None,
        }
    }
}

pub struct AppState {
    pub config: AppConfig,
    pub candidates: CandidateStore,
    pub vacancies: VacancyStore,
    /// Injected completion backend; `None` disables the analyze endpoint.
    pub completion: Option<Arc<dyn CompletionService>>,
}

pub type SharedState = Arc<AppState>;

impl FromRef<SharedState> for AuthConfig {
    fn from_ref(state: &SharedState) -> Self {
        AuthConfig {
            api_key: state.config.api_key.clone(),
        }
    }
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| {
            let parsed = origin.trim().parse::<HeaderValue>();
            if parsed.is_err() {
                warn!(origin, "ignoring unparsable CORS origin");
            }
            parsed.ok()
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE, HeaderName::from_static("x-api-key")])
}

pub fn create_router(state: SharedState) -> Router {
    let api_routes = Router::new()
        .route(
            "/candidates",
            get(candidates::list).post(candidates::create),
        )
        .route(
            "/candidates/:id",
            get(candidates::get_one)
                .put(candidates::update)
                .delete(candidates::remove),
        )
        .route("/candidates/:id/assessment", put(candidates::put_assessment))
        .route("/candidates/:id/analyze", post(candidates::analyze))
        .route("/candidates/:id/fit", post(candidates::fit))
        .route("/candidates/:id/interview", post(interviews::message))
        .route(
            "/candidates/:id/interview/analysis",
            post(interviews::analyze),
        )
        .route("/vacancies", get(vacancies::list).post(vacancies::create))
        .route(
            "/vacancies/:id",
            get(vacancies::get_one)
                .put(vacancies::update)
                .delete(vacancies::remove),
        )
        .route("/vacancies/:id/rankings", post(rankings::rank));

    Router::new()
        .route("/livez", get(health::livez))
        .route("/readyz", get(health::readyz))
        .nest("/api", api_routes)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(cors_layer(&state.config))
        .with_state(state)
}

/// State for integration tests: in-memory stores, no completion backend.
pub fn test_state(api_key: Option<&str>) -> SharedState {
    Arc::new(AppState {
        config: AppConfig {
            api_key: api_key.map(str::to_string),
            ..AppConfig::default()
        },
        candidates: CandidateStore::new(),
        vacancies: VacancyStore::new(),
        completion: None,
    })
}
