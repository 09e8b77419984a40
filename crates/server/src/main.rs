// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod operator;

use axum::{
    Json, Router,
    extract::{Query, State as AxumState},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use dialer_console::ExportArtifact;
use dialer_console_api::{
    ApiError, BulkActionRequest, BulkActionResponse, ExportNumbersRequest, ImportNumbersRequest,
    ImportNumbersResponse, ListNumbersQuery, ListNumbersResponse, NumberStatsResponse,
    bulk_numbers_action, count_numbers, export_numbers, import_numbers, list_numbers,
};
use dialer_console_persistence::Persistence;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::operator::Operator;

/// Dialer Console Server - HTTP surface for the number listing and bulk actions
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    persistence: Arc<Mutex<Persistence>>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    status: StatusCode,
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Handler for GET `/numbers`.
async fn handle_list_numbers(
    AxumState(app_state): AxumState<AppState>,
    Operator(actor): Operator,
    Query(query): Query<ListNumbersQuery>,
) -> Result<Json<ListNumbersResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListNumbersResponse = list_numbers(&mut persistence, &actor, &query)?;
    drop(persistence);
    Ok(Json(response))
}

/// Handler for GET `/numbers/stats`.
async fn handle_numbers_stats(
    AxumState(app_state): AxumState<AppState>,
    Operator(actor): Operator,
    Query(query): Query<ListNumbersQuery>,
) -> Result<Json<NumberStatsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: NumberStatsResponse = count_numbers(&mut persistence, &actor, &query)?;
    drop(persistence);
    Ok(Json(response))
}

/// Handler for POST `/numbers`.
///
/// Imports a batch of raw phone numbers. Admin only.
async fn handle_import_numbers(
    AxumState(app_state): AxumState<AppState>,
    Operator(actor): Operator,
    Json(req): Json<ImportNumbersRequest>,
) -> Result<Json<ImportNumbersResponse>, HttpError> {
    info!(
        operator = %actor.id,
        count = req.phone_numbers.len(),
        "Handling import_numbers request"
    );
    let mut persistence = app_state.persistence.lock().await;
    let response: ImportNumbersResponse = import_numbers(&mut persistence, &actor, &req)?;
    drop(persistence);
    Ok(Json(response))
}

/// Handler for POST `/numbers/bulk`.
async fn handle_bulk_action(
    AxumState(app_state): AxumState<AppState>,
    Operator(actor): Operator,
    Json(req): Json<BulkActionRequest>,
) -> Result<Json<BulkActionResponse>, HttpError> {
    info!(
        operator = %actor.id,
        action = %req.action.kind(),
        select_all = req.target.is_select_all(),
        "Handling bulk action request"
    );
    let mut persistence = app_state.persistence.lock().await;
    let response: BulkActionResponse = bulk_numbers_action(&mut persistence, &actor, &req)?;
    drop(persistence);
    Ok(Json(response))
}

/// Handler for POST `/numbers/export`.
///
/// Responds with the CSV file as an attachment.
async fn handle_export_numbers(
    AxumState(app_state): AxumState<AppState>,
    Operator(actor): Operator,
    Json(req): Json<ExportNumbersRequest>,
) -> Result<Response, HttpError> {
    info!(
        operator = %actor.id,
        select_all = req.target.is_select_all(),
        "Handling export request"
    );
    let mut persistence = app_state.persistence.lock().await;
    let artifact: ExportArtifact = export_numbers(&mut persistence, &actor, &req)?;
    drop(persistence);

    let disposition: String = format!("attachment; filename=\"{}\"", artifact.file_name);
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, artifact.content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        artifact.bytes,
    )
        .into_response())
}

fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/numbers", get(handle_list_numbers))
        .route("/numbers", post(handle_import_numbers))
        .route("/numbers/stats", get(handle_numbers_stats))
        .route("/numbers/bulk", post(handle_bulk_action))
        .route("/numbers/export", post(handle_export_numbers))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Dialer Console Server");

    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
