use crate::{
    config, GenerateTutorialBody, GenerationResult, GenerativeModel, GoogleModel,
    GoogleModelOptions, Health, ModelListing, ProxyConfig, ProxyError, ProxyResult,
    TutorialService,
};
use axum::{
    extract::State,
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::Upstream(status, _) => *status,
            Self::Configuration(_) | Self::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // The upstream variant already carries the extracted message; the
        // Display form would prepend the status a second time.
        let error = match self {
            Self::Upstream(_, message) => message,
            other => other.to_string(),
        };
        (status, Json(ErrorBody { error })).into_response()
    }
}

/// Shared handler state. `service` is `None` when no API key is configured,
/// in which case every upstream-facing endpoint reports the missing key
/// without attempting a network call.
#[derive(Clone)]
pub struct AppState {
    service: Option<TutorialService>,
}

impl AppState {
    /// Production state: a Google-backed service when the key is present.
    #[must_use]
    pub fn from_config(cfg: &ProxyConfig) -> Self {
        let service = cfg.api_key.as_ref().map(|key| {
            TutorialService::new(Arc::new(GoogleModel::new(
                cfg.model_id.clone(),
                GoogleModelOptions {
                    api_key: key.clone(),
                    ..Default::default()
                },
            )))
        });
        Self { service }
    }

    /// State backed by an explicit model; used by tests and embedders.
    #[must_use]
    pub fn with_model(model: Arc<dyn GenerativeModel>) -> Self {
        Self {
            service: Some(TutorialService::new(model)),
        }
    }

    /// State with no key configured.
    #[must_use]
    pub fn unconfigured() -> Self {
        Self { service: None }
    }

    fn service(&self) -> ProxyResult<&TutorialService> {
        self.service
            .as_ref()
            .ok_or_else(|| ProxyError::Configuration(config::KEY_GUIDANCE.to_string()))
    }
}

async fn health_handler() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn list_models_handler(
    State(state): State<AppState>,
) -> Result<Json<ModelListing>, ProxyError> {
    let listing = state.service()?.list_models().await?;
    Ok(Json(listing))
}

async fn generate_tutorial_handler(
    State(state): State<AppState>,
    Json(body): Json<GenerateTutorialBody>,
) -> Result<Json<GenerationResult>, ProxyError> {
    let result = state.service()?.generate_tutorial(&body.request).await?;
    Ok(Json(result))
}

/// Builds the proxy router. Failures never escape the handlers; every error
/// becomes a structured `{"error": ...}` body with a status code.
#[must_use]
pub fn router(state: AppState, app_url: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);
    let cors = if let Ok(origin) = app_url.parse::<HeaderValue>() {
        cors.allow_origin(origin)
    } else {
        tracing::warn!(app_url, "invalid APP_URL, leaving CORS origin unset");
        cors
    };

    Router::new()
        .route("/", get(health_handler))
        .route("/api/list-models", get(list_models_handler))
        .route("/api/generate-tutorial", post(generate_tutorial_handler))
        .layer(cors)
        .with_state(state)
}
