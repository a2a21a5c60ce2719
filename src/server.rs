//! HTTP API over a [`Reader`].
//!
//! Every route answers JSON. Lookup failures are mapped by kind: validation
//! errors to 400, missing translations/books/chapters/verses to 404 and
//! everything else to 500, always as `{"error": ..., "kind": ...}`.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::error::ErrorKind;
use crate::reader::{Reader, ReaderError};

type SharedState = Arc<AppState>;

pub struct AppState {
    pub reader: Arc<Reader>,
}

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Bind `addr` and serve until ctrl-c or SIGTERM.
pub async fn serve(addr: SocketAddr, reader: Arc<Reader>) -> Result<(), ServerError> {
    let router = build_router(Arc::new(AppState { reader }));
    info!(%addr, "Binding HTTP listener");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("HTTP server exited");
    Ok(())
}

pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/healthz", get(health))
        .route("/api/translations", get(translations))
        .route("/api/books", get(suggest))
        .route("/api/translations/{t}", get(stats))
        .route("/api/translations/{t}/books", get(books))
        .route("/api/translations/{t}/books/{book}", get(book))
        .route("/api/translations/{t}/books/{book}/chapters", get(chapters))
        .route("/api/translations/{t}/books/{book}/chapters/{n}", get(chapter))
        .route(
            "/api/translations/{t}/books/{book}/chapters/{n}/verses/{expr}",
            get(passage),
        )
        .route("/api/translations/{t}/search", get(search))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = signal::ctrl_c().await;
    };
    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        if let Ok(mut stream) = signal(SignalKind::terminate()) {
            let _ = stream.recv().await;
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    kind: ErrorKind,
    message: String,
}

impl ApiError {
    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            kind: ErrorKind::Internal,
            message: message.into(),
        }
    }
}

impl From<ReaderError> for ApiError {
    fn from(err: ReaderError) -> Self {
        let kind = err.kind();
        let status = match kind {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Internal => {
                error!(error = %err, "request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            kind,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let payload = json!({ "error": self.message, "kind": self.kind });
        (self.status, Json(payload)).into_response()
    }
}

/// Run a reader call on the blocking pool; a cache miss reads from disk.
async fn with_reader<T, F>(state: SharedState, f: F) -> Result<Json<T>, ApiError>
where
    F: FnOnce(&Reader) -> Result<T, ReaderError> + Send + 'static,
    T: Send + 'static,
{
    let reader = Arc::clone(&state.reader);
    let result = tokio::task::spawn_blocking(move || f(&reader))
        .await
        .map_err(|e| ApiError::internal(format!("lookup task failed: {e}")))?;
    Ok(Json(result?))
}

#[derive(Debug, Default, Deserialize)]
struct RangeParams {
    from: Option<String>,
    to: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct SearchParams {
    q: Option<String>,
    limit: Option<String>,
}

async fn health() -> &'static str {
    "ok"
}

async fn translations(State(state): State<SharedState>) -> Result<impl IntoResponse, ApiError> {
    with_reader(state, |r| r.translations()).await
}

async fn suggest(
    State(state): State<SharedState>,
    Query(params): Query<SearchParams>,
) -> impl IntoResponse {
    Json(state.reader.suggest(params.q.as_deref().unwrap_or("")))
}

async fn stats(
    State(state): State<SharedState>,
    Path(t): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    with_reader(state, move |r| r.stats(&t)).await
}

async fn books(
    State(state): State<SharedState>,
    Path(t): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    with_reader(state, move |r| r.books(&t)).await
}

async fn book(
    State(state): State<SharedState>,
    Path((t, book)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    with_reader(state, move |r| r.book(&t, &book)).await
}

async fn chapters(
    State(state): State<SharedState>,
    Path((t, book)): Path<(String, String)>,
    Query(range): Query<RangeParams>,
) -> Result<impl IntoResponse, ApiError> {
    with_reader(state, move |r| {
        r.chapters(&t, &book, range.from.as_deref(), range.to.as_deref())
    })
    .await
}

async fn chapter(
    State(state): State<SharedState>,
    Path((t, book, n)): Path<(String, String, String)>,
    Query(range): Query<RangeParams>,
) -> Result<impl IntoResponse, ApiError> {
    with_reader(state, move |r| {
        r.chapter_slice(&t, &book, &n, range.from.as_deref(), range.to.as_deref())
    })
    .await
}

async fn passage(
    State(state): State<SharedState>,
    Path((t, book, n, expr)): Path<(String, String, String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    with_reader(state, move |r| r.passage(&t, &book, &n, &expr)).await
}

async fn search(
    State(state): State<SharedState>,
    Path(t): Path<String>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, ApiError> {
    with_reader(state, move |r| {
        r.search(&t, params.q.as_deref().unwrap_or(""), params.limit.as_deref())
    })
    .await
}
