//! JSON HTTP API over the corpus.
//!
//! Every handler goes through one shared [`QueryEngine`], so all requests
//! reuse the same cached index until the corpus version changes.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/health` | Health check (returns version) |
//! | `GET`  | `/documents` | List all documents |
//! | `GET`  | `/documents/{id}` | Fetch one document |
//! | `POST` | `/documents` | Add a document (`{title, source, genre, text}`) |
//! | `POST` | `/search` | Keyword frequency (`{keyword}`) |
//! | `POST` | `/context` | Keyword concordance (`{keyword}`) |
//! | `GET`  | `/top-words` | Most frequent words (`?n=`) |
//! | `GET`  | `/stats` | Corpus statistics |
//! | `POST` | `/upload` | Add a TXT/DOCX/PDF file (multipart `file`, `title`, `genre`, `source`) |
//!
//! # Error Contract
//!
//! ```json
//! { "error": { "code": "bad_request", "message": "invalid query: keyword must not be empty" } }
//! ```
//!
//! Error codes: `bad_request` (400), `not_found` (404), `conflict` (409),
//! `internal` (500). Bodies, query strings and path ids that fail to parse
//! are `bad_request` too.
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted so a browser frontend can
//! be served from anywhere.

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::{JsonRejection, PathRejection, QueryRejection},
        DefaultBodyLimit, Multipart, Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use corpus_core::models::{
    ContextResult, CorpusStats, Document, FrequencyResult, NewDocument, WordCount,
};
use corpus_core::store::DocumentStore;
use corpus_core::{DuplicateTitle, QueryEngine, QueryError};

use crate::config::Config;
use crate::extract::extract_file;
use crate::genre::GenreChoice;
use crate::scan::title_from_path;
use crate::sqlite_store::SqliteStore;

/// Largest request body accepted, uploads included.
pub const MAX_BODY_BYTES: usize = 32 * 1024 * 1024;

/// Engine shared by all handlers, erased over the store implementation.
pub type SharedEngine = Arc<QueryEngine<dyn DocumentStore>>;

/// Starts the HTTP server on `[server].bind`.
///
/// Runs schema migrations first, then serves until the process is terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let store: Arc<dyn DocumentStore> = Arc::new(SqliteStore::open(config).await?);
    let engine: SharedEngine = Arc::new(QueryEngine::new(store, config.query.options()));

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    tracing::info!(addr = %listener.local_addr()?, "corpus server listening");

    serve(listener, engine).await
}

/// Serve `engine` on an already-bound listener.
pub async fn serve(listener: tokio::net::TcpListener, engine: SharedEngine) -> anyhow::Result<()> {
    axum::serve(listener, router(engine)).await?;
    Ok(())
}

/// Build the application router.
pub fn router(engine: SharedEngine) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health))
        .route("/documents", get(handle_list_documents).post(handle_add_document))
        .route("/documents/{id}", get(handle_get_document))
        .route("/search", post(handle_search))
        .route("/context", post(handle_context))
        .route("/top-words", get(handle_top_words))
        .route("/stats", get(handle_stats))
        .route("/upload", post(handle_upload))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .with_state(engine)
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

/// Internal error type that converts into an Axum HTTP response.
struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

impl AppError {
    fn new(status: StatusCode, code: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            code: code.to_string(),
            message: message.into(),
        }
    }
}

fn bad_request(message: impl Into<String>) -> AppError {
    AppError::new(StatusCode::BAD_REQUEST, "bad_request", message)
}

fn internal(err: anyhow::Error) -> AppError {
    tracing::error!(error = %err, "request failed");
    AppError::new(StatusCode::INTERNAL_SERVER_ERROR, "internal", err.to_string())
}

impl From<QueryError> for AppError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::InvalidQuery(_) => bad_request(err.to_string()),
            QueryError::NotFound(_) => {
                AppError::new(StatusCode::NOT_FOUND, "not_found", err.to_string())
            }
            QueryError::Store(e) => internal(e),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        bad_request(rejection.body_text())
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        bad_request(rejection.body_text())
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        bad_request(err.body_text())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast_ref::<DuplicateTitle>() {
            Some(dup) => AppError::new(StatusCode::CONFLICT, "conflict", dup.to_string()),
            None => internal(err),
        }
    }
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ Documents ============

async fn handle_list_documents(
    State(engine): State<SharedEngine>,
) -> Result<Json<Vec<Arc<Document>>>, AppError> {
    Ok(Json(engine.list_documents().await?))
}

async fn handle_get_document(
    State(engine): State<SharedEngine>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Arc<Document>>, AppError> {
    let Path(id) = id?;
    Ok(Json(engine.get_document(id).await?))
}

#[derive(Serialize)]
struct AddDocumentResponse {
    id: i64,
    title: String,
    message: String,
}

async fn handle_add_document(
    State(engine): State<SharedEngine>,
    doc: Result<Json<NewDocument>, JsonRejection>,
) -> Result<(StatusCode, Json<AddDocumentResponse>), AppError> {
    let Json(doc) = doc?;
    add_document(&engine, doc).await
}

async fn add_document(
    engine: &SharedEngine,
    doc: NewDocument,
) -> Result<(StatusCode, Json<AddDocumentResponse>), AppError> {
    if doc.title.trim().is_empty() {
        return Err(bad_request("title must not be empty"));
    }
    if doc.text.as_deref().map_or(true, |t| t.trim().is_empty()) {
        return Err(bad_request("text must not be empty"));
    }

    let id = engine.store().insert_document(&doc).await?;
    tracing::info!(id, title = %doc.title, genre = %doc.genre, "document added");

    Ok((
        StatusCode::CREATED,
        Json(AddDocumentResponse {
            id,
            title: doc.title,
            message: "document added".to_string(),
        }),
    ))
}

// ============ POST /upload ============

/// Text fields of an upload form; the file itself is required.
#[derive(Default)]
struct UploadForm {
    file: Option<(String, Vec<u8>)>,
    title: Option<String>,
    genre: Option<String>,
    source: Option<String>,
}

impl UploadForm {
    async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = UploadForm::default();
        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "file" => {
                    let file_name = field
                        .file_name()
                        .map(str::to_string)
                        .ok_or_else(|| bad_request("file field has no file name"))?;
                    let bytes = field.bytes().await?;
                    form.file = Some((file_name, bytes.to_vec()));
                }
                "title" => form.title = Some(field.text().await?),
                "genre" => form.genre = Some(field.text().await?),
                "source" => form.source = Some(field.text().await?),
                other => tracing::debug!(field = other, "ignoring upload field"),
            }
        }
        Ok(form)
    }
}

/// Title defaults to the file stem, genre to `other`, source to `upload`.
async fn handle_upload(
    State(engine): State<SharedEngine>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<AddDocumentResponse>), AppError> {
    let form = UploadForm::read(multipart?).await?;
    let (file_name, bytes) = form.file.ok_or_else(|| bad_request("missing file field"))?;

    let path = std::path::Path::new(&file_name);
    let text = extract_file(path, &bytes).map_err(|e| bad_request(e.to_string()))?;

    let title = form
        .title
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| title_from_path(path));
    let genre = form
        .genre
        .as_deref()
        .map(GenreChoice::parse)
        .unwrap_or_default()
        .resolve(&title, &text);
    let source = form
        .source
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| "upload".to_string());

    add_document(&engine, NewDocument::new(title, source, genre, text)).await
}

// ============ Queries ============

#[derive(Deserialize)]
struct KeywordRequest {
    #[serde(default)]
    keyword: String,
}

async fn handle_search(
    State(engine): State<SharedEngine>,
    req: Result<Json<KeywordRequest>, JsonRejection>,
) -> Result<Json<FrequencyResult>, AppError> {
    let Json(req) = req?;
    Ok(Json(engine.search_frequency(&req.keyword).await?))
}

async fn handle_context(
    State(engine): State<SharedEngine>,
    req: Result<Json<KeywordRequest>, JsonRejection>,
) -> Result<Json<Vec<ContextResult>>, AppError> {
    let Json(req) = req?;
    Ok(Json(engine.search_context(&req.keyword).await?))
}

#[derive(Deserialize)]
struct TopWordsParams {
    n: Option<i64>,
}

async fn handle_top_words(
    State(engine): State<SharedEngine>,
    params: Result<Query<TopWordsParams>, QueryRejection>,
) -> Result<Json<Vec<WordCount>>, AppError> {
    let Query(params) = params?;
    Ok(Json(engine.top_words(params.n).await?))
}

async fn handle_stats(State(engine): State<SharedEngine>) -> Result<Json<CorpusStats>, AppError> {
    Ok(Json(engine.corpus_stats().await?))
}
