//! HTTP request handlers for the server.
//!
//! Implements the chat, extraction and health check endpoints using axum.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router as AxumRouter,
};
use pagecite_core::{AnswerRequest, Answerer, QaError};
use pagecite_domain::traits::{DocumentResolver, LlmProvider, TextExtractor};
use pagecite_domain::{AnswerResult, DocumentId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::warn;

/// Shared application state
pub struct AppState<R, X, L> {
    /// Answering pipeline, including the extraction cache
    pub answerer: Arc<Answerer<R, X, L>>,
}

// Manual impl: the collaborators themselves need not be Clone
impl<R, X, L> Clone for AppState<R, X, L> {
    fn clone(&self) -> Self {
        Self {
            answerer: Arc::clone(&self.answerer),
        }
    }
}

/// Chat request body
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChatRequest {
    /// Question about the document
    pub question: String,
    /// Stored document to answer from
    pub document_id: String,
    /// Original upload name, shown to the model
    pub filename: Option<String>,
}

impl From<ChatRequest> for AnswerRequest {
    fn from(request: ChatRequest) -> Self {
        AnswerRequest {
            question: request.question,
            document_id: DocumentId::new(request.document_id),
            document_label: request.filename,
        }
    }
}

/// Extraction response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractResponse {
    /// Document that was extracted
    pub document_id: String,
    /// Pages reported by the PDF
    pub page_count: usize,
    /// Unix time (seconds) at which the extraction was confirmed cached
    pub extracted_at: u64,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckResponse {
    /// Always "ok" while the process serves requests
    pub status: String,
    /// Documents with a finished extraction in the cache
    pub cached_documents: usize,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Stable error kind, e.g. "document_not_found"
    pub kind: String,
}

/// Application error type
#[derive(Debug)]
pub struct AppError(pub QaError);

impl AppError {
    /// HTTP status for the wrapped error
    pub fn status(&self) -> StatusCode {
        match self.0 {
            QaError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            QaError::DocumentNotFound(_) => StatusCode::NOT_FOUND,
            QaError::ExtractionFailed(_) | QaError::InvalidPageCount(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            QaError::Storage(_) | QaError::ModelUnavailable(_) | QaError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            warn!("Request failed: {}", self.0);
        }

        let body = Json(ErrorResponse {
            error: self.0.to_string(),
            kind: self.0.kind().to_string(),
        });
        (status, body).into_response()
    }
}

impl From<QaError> for AppError {
    fn from(e: QaError) -> Self {
        AppError(e)
    }
}

/// POST /chat - Answer a question about a stored document
///
/// Model outages still answer 200 with an apology in `response`.
async fn chat<R, X, L>(
    State(state): State<AppState<R, X, L>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<AnswerResult>, AppError>
where
    R: DocumentResolver,
    X: TextExtractor,
    L: LlmProvider,
{
    let result = state.answerer.answer(request.into()).await?;
    Ok(Json(result))
}

/// GET /extract/:document_id - Extract a document ahead of questions
async fn extract<R, X, L>(
    State(state): State<AppState<R, X, L>>,
    Path(document_id): Path<String>,
) -> Result<Json<ExtractResponse>, AppError>
where
    R: DocumentResolver,
    X: TextExtractor,
    L: LlmProvider,
{
    let id = DocumentId::new(document_id);
    let document = state.answerer.extract(&id).await?;

    let extracted_at = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default();

    Ok(Json(ExtractResponse {
        document_id: id.to_string(),
        page_count: document.page_count,
        extracted_at,
    }))
}

/// GET /health - Liveness and cache size
async fn health_check<R, X, L>(
    State(state): State<AppState<R, X, L>>,
) -> Json<HealthCheckResponse>
where
    R: DocumentResolver,
    X: TextExtractor,
    L: LlmProvider,
{
    Json(HealthCheckResponse {
        status: "ok".to_string(),
        cached_documents: state.answerer.cache().len(),
    })
}

/// Create the axum router with all routes
pub fn create_router<R, X, L>(state: AppState<R, X, L>) -> AxumRouter
where
    R: DocumentResolver,
    X: TextExtractor,
    L: LlmProvider,
{
    AxumRouter::new()
        .route("/chat", post(chat::<R, X, L>))
        .route("/extract/:document_id", get(extract::<R, X, L>))
        .route("/health", get(health_check::<R, X, L>))
        .with_state(state)
}
