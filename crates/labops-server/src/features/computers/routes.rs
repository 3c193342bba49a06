//! Computer API routes
//!
//! - `GET /api/v1/computers` - List computers (filter by `lab_id`, `status`)
//! - `GET /api/v1/computers/:id` - Get a computer
//! - `PUT /api/v1/computers/:id` - Update a computer
//! - `DELETE /api/v1/computers/:id` - Delete a computer (refused while in use)

use crate::api::response::{ApiResponse, ErrorResponse};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, put},
    Json, Router,
};
use sqlx::PgPool;
use uuid::Uuid;

use super::{
    commands::{
        DeleteComputerCommand, DeleteComputerError, UpdateComputerCommand, UpdateComputerError,
    },
    queries::{GetComputerError, GetComputerQuery, ListComputersError, ListComputersQuery},
};

/// Creates the computers router with all routes configured
pub fn computers_routes() -> Router<PgPool> {
    Router::new()
        .route("/", get(list_computers))
        .route("/:id", get(get_computer))
        .route("/:id", put(update_computer))
        .route("/:id", delete(delete_computer))
}

/// List computers, optionally filtered by laboratory or status
#[tracing::instrument(skip(pool, query))]
async fn list_computers(
    State(pool): State<PgPool>,
    Query(query): Query<ListComputersQuery>,
) -> Result<Response, ComputerApiError> {
    let response = super::queries::list::handle(pool, query).await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(response))).into_response())
}

/// Get a single computer
#[tracing::instrument(skip(pool), fields(computer_id = %id))]
async fn get_computer(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
) -> Result<Response, ComputerApiError> {
    let response = super::queries::get::handle(pool, GetComputerQuery { id }).await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(response))).into_response())
}

/// Update a computer
#[tracing::instrument(skip(pool, command), fields(computer_id = %id))]
async fn update_computer(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
    Json(mut command): Json<UpdateComputerCommand>,
) -> Result<Response, ComputerApiError> {
    command.id = id;

    let response = super::commands::update::handle(pool, command).await?;

    tracing::info!(computer_id = %response.computer.id, "Computer updated via API");

    Ok((StatusCode::OK, Json(ApiResponse::success(response))).into_response())
}

/// Delete a computer
#[tracing::instrument(skip(pool), fields(computer_id = %id))]
async fn delete_computer(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
) -> Result<Response, ComputerApiError> {
    let response = super::commands::delete::handle(pool, DeleteComputerCommand { id }).await?;

    tracing::info!(computer_id = %response.id, "Computer deleted via API");

    Ok((StatusCode::OK, Json(ApiResponse::success(response))).into_response())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Unified error type for computer API endpoints
#[derive(Debug)]
enum ComputerApiError {
    Update(UpdateComputerError),
    Delete(DeleteComputerError),
    Get(GetComputerError),
    List(ListComputersError),
}

impl From<UpdateComputerError> for ComputerApiError {
    fn from(err: UpdateComputerError) -> Self {
        Self::Update(err)
    }
}

impl From<DeleteComputerError> for ComputerApiError {
    fn from(err: DeleteComputerError) -> Self {
        Self::Delete(err)
    }
}

impl From<GetComputerError> for ComputerApiError {
    fn from(err: GetComputerError) -> Self {
        Self::Get(err)
    }
}

impl From<ListComputersError> for ComputerApiError {
    fn from(err: ListComputersError) -> Self {
        Self::List(err)
    }
}

impl IntoResponse for ComputerApiError {
    fn into_response(self) -> Response {
        match self {
            // Update errors
            ComputerApiError::Update(UpdateComputerError::NoFieldsToUpdate)
            | ComputerApiError::Update(UpdateComputerError::Name(_))
            | ComputerApiError::Update(UpdateComputerError::SeatNumberInvalid) => {
                let error = ErrorResponse::new("VALIDATION_ERROR", self.to_string());
                (StatusCode::BAD_REQUEST, Json(error)).into_response()
            },
            ComputerApiError::Update(UpdateComputerError::NotFound(_)) => {
                let error = ErrorResponse::new("NOT_FOUND", self.to_string());
                (StatusCode::NOT_FOUND, Json(error)).into_response()
            },
            ComputerApiError::Update(UpdateComputerError::Duplicate) => {
                let error = ErrorResponse::new("CONFLICT", self.to_string());
                (StatusCode::CONFLICT, Json(error)).into_response()
            },
            ComputerApiError::Update(UpdateComputerError::Database(_)) => {
                tracing::error!("Database error during computer update: {}", self);
                let error = ErrorResponse::new("INTERNAL_ERROR", "A database error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
            },

            // Delete errors
            ComputerApiError::Delete(DeleteComputerError::NotFound(_)) => {
                let error = ErrorResponse::new("NOT_FOUND", self.to_string());
                (StatusCode::NOT_FOUND, Json(error)).into_response()
            },
            ComputerApiError::Delete(DeleteComputerError::InUse) => {
                let error = ErrorResponse::new("CONFLICT", self.to_string());
                (StatusCode::CONFLICT, Json(error)).into_response()
            },
            ComputerApiError::Delete(DeleteComputerError::Database(_)) => {
                tracing::error!("Database error during computer deletion: {}", self);
                let error = ErrorResponse::new("INTERNAL_ERROR", "A database error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
            },

            // Get errors
            ComputerApiError::Get(GetComputerError::NotFound(_)) => {
                let error = ErrorResponse::new("NOT_FOUND", self.to_string());
                (StatusCode::NOT_FOUND, Json(error)).into_response()
            },
            ComputerApiError::Get(GetComputerError::Database(_)) => {
                tracing::error!("Database error during computer retrieval: {}", self);
                let error = ErrorResponse::new("INTERNAL_ERROR", "A database error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
            },

            // List errors
            ComputerApiError::List(ListComputersError::Database(_)) => {
                tracing::error!("Database error during computer listing: {}", self);
                let error = ErrorResponse::new("INTERNAL_ERROR", "A database error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
            },
        }
    }
}

impl std::fmt::Display for ComputerApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Update(e) => write!(f, "{}", e),
            Self::Delete(e) => write!(f, "{}", e),
            Self::Get(e) => write!(f, "{}", e),
            Self::List(e) => write!(f, "{}", e),
        }
    }
}
