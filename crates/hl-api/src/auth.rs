use axum::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;

use crate::error::ApiError;

/// API-key auth. When no key is configured the API runs open (local
/// development); when one is set, every `/api` request must present it in
/// `X-API-Key`.
#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
    pub api_key: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AuthUser {
    #[allow(dead_code)]
    pub subject: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    AuthConfig: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = AuthConfig::from_ref(state);

        let Some(expected) = config.api_key.as_deref() else {
            return Ok(AuthUser {
                subject: "anonymous".to_string(),
            });
        };

        let provided = parts
            .headers
            .get("x-api-key")
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("missing X-API-Key header".into()))?;

        if provided != expected {
            return Err(ApiError::Unauthorized("invalid API key".into()));
        }

        Ok(AuthUser {
            subject: "api_key".to_string(),
        })
    }
}
