//! HTTP request handlers for the PomoTask service.
//!
//! Every extraction route answers both `GET ?task=...` and `POST {"task": ...}`.

use axum::{
    extract::{Query, State},
    http::{HeaderValue, Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router as AxumRouter,
};
use pomotask_domain::traits::LlmProvider;
use pomotask_domain::MetadataRecord;
use pomotask_extractor::{CategorizeResult, Extractor, ExtractorError};
use serde::{Deserialize, Serialize};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{error, warn};

/// Shared application state
pub struct AppState<L: LlmProvider> {
    /// Extraction pipeline
    pub extractor: Extractor<L>,
}

impl<L: LlmProvider> Clone for AppState<L> {
    fn clone(&self) -> Self {
        Self {
            extractor: self.extractor.clone(),
        }
    }
}

/// Task title as sent by a client
#[derive(Debug, Default, Deserialize)]
pub struct TaskRequest {
    /// Task title
    #[serde(default)]
    pub task: Option<String>,
}

impl TaskRequest {
    fn into_title(self) -> Option<String> {
        self.task.filter(|t| !t.trim().is_empty())
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Greeting
    pub message: String,
    /// Overall health status
    pub status: String,
}

/// Response of `/api/clarify`
#[derive(Debug, Serialize)]
pub struct ClarifyResponse {
    /// Always true
    pub success: bool,
    /// Title as supplied
    pub original_task: String,
    /// Validated metadata
    pub task_context: MetadataRecord,
}

/// Response of `/api/categorize`
#[derive(Debug, Serialize)]
pub struct CategorizeResponse {
    /// Always true
    pub success: bool,
    /// Title and category fields
    #[serde(flatten)]
    pub result: CategorizeResult,
}

/// Response of `/api/motivate`
#[derive(Debug, Serialize, Deserialize)]
pub struct MotivateResponse {
    /// Always true
    pub success: bool,
    /// Quote text
    pub quote: String,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Underlying cause, for upstream failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Request carried no usable title
    MissingTask,
    /// Request carried a title the pipeline refused
    BadRequest(String),
    /// The upstream model call failed
    Upstream {
        /// Verb naming the failed operation
        action: &'static str,
        /// Underlying error message
        details: String,
    },
}

impl AppError {
    fn from_extractor(action: &'static str, e: ExtractorError) -> Self {
        match e {
            ExtractorError::EmptyTitle => AppError::MissingTask,
            e if e.is_input_error() => AppError::BadRequest(e.to_string()),
            e => AppError::Upstream {
                action,
                details: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::MissingTask => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: "Task is required".to_string(),
                    details: None,
                },
            ),
            AppError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: message,
                    details: None,
                },
            ),
            AppError::Upstream { action, details } => {
                error!("Failed to {} task: {}", action, details);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: format!("Failed to {} task", action),
                        details: Some(details),
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// GET / - Health check
async fn health_check() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        message: "PomoTask Backend is running!".to_string(),
        status: "healthy".to_string(),
    })
}

async fn clarify<L: LlmProvider + 'static>(
    state: AppState<L>,
    request: TaskRequest,
) -> Result<Json<ClarifyResponse>, AppError> {
    let task = request.into_title().ok_or(AppError::MissingTask)?;

    let result = state
        .extractor
        .clarify(&task)
        .await
        .map_err(|e| AppError::from_extractor("clarify", e))?;

    Ok(Json(ClarifyResponse {
        success: true,
        original_task: result.original_task,
        task_context: result.task_context,
    }))
}

async fn categorize<L: LlmProvider + 'static>(
    state: AppState<L>,
    request: TaskRequest,
) -> Result<Json<CategorizeResponse>, AppError> {
    let task = request.into_title().ok_or(AppError::MissingTask)?;

    let result = state
        .extractor
        .categorize(&task)
        .await
        .map_err(|e| AppError::from_extractor("categorize", e))?;

    Ok(Json(CategorizeResponse {
        success: true,
        result,
    }))
}

async fn motivate<L: LlmProvider + 'static>(
    state: AppState<L>,
    request: TaskRequest,
) -> Result<Json<MotivateResponse>, AppError> {
    let task = request.into_title();

    let quote = state
        .extractor
        .motivate(task.as_deref())
        .await
        .map_err(|e| AppError::from_extractor("motivate", e))?;

    Ok(Json(MotivateResponse {
        success: true,
        quote,
    }))
}

/// Body of a POST request. A missing or unreadable body counts as no title.
fn posted(body: Option<Json<TaskRequest>>) -> TaskRequest {
    match body {
        Some(Json(request)) => request,
        None => {
            warn!("POST without a readable JSON body");
            TaskRequest::default()
        }
    }
}

/// Create the axum router with all routes
pub fn create_router<L: LlmProvider + 'static>(state: AppState<L>) -> AxumRouter {
    AxumRouter::new()
        .route("/", get(health_check))
        .route(
            "/api/clarify",
            get(|State(s): State<AppState<L>>, Query(q): Query<TaskRequest>| clarify(s, q))
                .post(|State(s): State<AppState<L>>, body: Option<Json<TaskRequest>>| {
                    clarify(s, posted(body))
                }),
        )
        .route(
            "/api/categorize",
            get(|State(s): State<AppState<L>>, Query(q): Query<TaskRequest>| categorize(s, q))
                .post(|State(s): State<AppState<L>>, body: Option<Json<TaskRequest>>| {
                    categorize(s, posted(body))
                }),
        )
        .route(
            "/api/motivate",
            get(|State(s): State<AppState<L>>, Query(q): Query<TaskRequest>| motivate(s, q))
                .post(|State(s): State<AppState<L>>, body: Option<Json<TaskRequest>>| {
                    motivate(s, posted(body))
                }),
        )
        .layer(cors_layer())
        .with_state(state)
}

/// Whether a browser origin may call the API
pub fn origin_allowed(origin: &str) -> bool {
    origin.contains("localhost") || origin.contains("azurestaticapps.net")
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(|origin: &HeaderValue, _| {
            origin.to_str().map(origin_allowed).unwrap_or(false)
        }))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE])
        .allow_credentials(true)
}
