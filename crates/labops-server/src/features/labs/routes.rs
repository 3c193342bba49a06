//! Laboratory API routes
//!
//! - `POST /api/v1/labs` - Create a laboratory (optionally provisioning its machines)
//! - `GET /api/v1/labs` - List laboratories with machine counts
//! - `GET /api/v1/labs/:id` - Get a laboratory with its machines
//! - `PUT /api/v1/labs/:id` - Update a laboratory, reconciling machine count
//! - `DELETE /api/v1/labs/:id` - Delete a laboratory and its machines

use crate::api::response::{ApiResponse, ErrorResponse};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use sqlx::PgPool;
use uuid::Uuid;

use super::{
    commands::{
        CreateLabCommand, CreateLabError, DeleteLabCommand, DeleteLabError, UpdateLabCommand,
        UpdateLabError,
    },
    queries::{GetLabError, GetLabQuery, ListLabsError},
};

/// Creates the labs router with all routes configured
pub fn labs_routes() -> Router<PgPool> {
    Router::new()
        .route("/", post(create_lab))
        .route("/", get(list_labs))
        .route("/:id", get(get_lab))
        .route("/:id", put(update_lab))
        .route("/:id", delete(delete_lab))
}

/// Create a new laboratory
///
/// Returns `201 Created` with the laboratory and any machines provisioned
/// from `computer_count`; `400 Bad Request` on validation failure.
#[tracing::instrument(skip(pool, command), fields(name = %command.name))]
async fn create_lab(
    State(pool): State<PgPool>,
    Json(command): Json<CreateLabCommand>,
) -> Result<Response, LabApiError> {
    let response = super::commands::create::handle(pool, command).await?;

    tracing::info!(lab_id = %response.lab.id, "Laboratory created via API");

    Ok((StatusCode::CREATED, Json(ApiResponse::success(response))).into_response())
}

/// Update a laboratory
///
/// When the body carries `computer_count`, the machine list is reconciled:
/// growth appends machines, shrinking leaves them alone and attaches a
/// `warning` object to the response.
#[tracing::instrument(skip(pool, command), fields(lab_id = %id))]
async fn update_lab(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
    Json(mut command): Json<UpdateLabCommand>,
) -> Result<Response, LabApiError> {
    command.id = id;

    let response = super::commands::update::handle(pool, command).await?;

    tracing::info!(
        lab_id = %response.lab.id,
        warned = response.warning.is_some(),
        "Laboratory updated via API"
    );

    Ok((StatusCode::OK, Json(ApiResponse::success(response))).into_response())
}

/// Delete a laboratory (machines cascade)
#[tracing::instrument(skip(pool), fields(lab_id = %id))]
async fn delete_lab(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
) -> Result<Response, LabApiError> {
    let response = super::commands::delete::handle(pool, DeleteLabCommand { id }).await?;

    tracing::info!(
        lab_id = %response.id,
        computers_removed = response.computers_removed,
        "Laboratory deleted via API"
    );

    Ok((StatusCode::OK, Json(ApiResponse::success(response))).into_response())
}

/// Get a single laboratory with its machines
#[tracing::instrument(skip(pool), fields(lab_id = %id))]
async fn get_lab(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
) -> Result<Response, LabApiError> {
    let response = super::queries::get::handle(pool, GetLabQuery { id }).await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(response))).into_response())
}

/// List all laboratories
#[tracing::instrument(skip(pool))]
async fn list_labs(State(pool): State<PgPool>) -> Result<Response, LabApiError> {
    let response = super::queries::list::handle(pool).await?;

    tracing::debug!(count = response.labs.len(), "Laboratories listed via API");

    Ok((StatusCode::OK, Json(ApiResponse::success(response))).into_response())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Unified error type for laboratory API endpoints
#[derive(Debug)]
enum LabApiError {
    Create(CreateLabError),
    Update(UpdateLabError),
    Delete(DeleteLabError),
    Get(GetLabError),
    List(ListLabsError),
}

impl From<CreateLabError> for LabApiError {
    fn from(err: CreateLabError) -> Self {
        Self::Create(err)
    }
}

impl From<UpdateLabError> for LabApiError {
    fn from(err: UpdateLabError) -> Self {
        Self::Update(err)
    }
}

impl From<DeleteLabError> for LabApiError {
    fn from(err: DeleteLabError) -> Self {
        Self::Delete(err)
    }
}

impl From<GetLabError> for LabApiError {
    fn from(err: GetLabError) -> Self {
        Self::Get(err)
    }
}

impl From<ListLabsError> for LabApiError {
    fn from(err: ListLabsError) -> Self {
        Self::List(err)
    }
}

impl IntoResponse for LabApiError {
    fn into_response(self) -> Response {
        match self {
            // Create errors
            LabApiError::Create(CreateLabError::Name(_))
            | LabApiError::Create(CreateLabError::CapacityInvalid)
            | LabApiError::Create(CreateLabError::Provision(_)) => {
                let error = ErrorResponse::new("VALIDATION_ERROR", self.to_string());
                (StatusCode::BAD_REQUEST, Json(error)).into_response()
            },
            LabApiError::Create(CreateLabError::Database(_)) => {
                tracing::error!("Database error during laboratory creation: {}", self);
                let error = ErrorResponse::new("INTERNAL_ERROR", "A database error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
            },

            // Update errors
            LabApiError::Update(UpdateLabError::NoFieldsToUpdate)
            | LabApiError::Update(UpdateLabError::Name(_))
            | LabApiError::Update(UpdateLabError::CapacityInvalid)
            | LabApiError::Update(UpdateLabError::Provision(_)) => {
                let error = ErrorResponse::new("VALIDATION_ERROR", self.to_string());
                (StatusCode::BAD_REQUEST, Json(error)).into_response()
            },
            LabApiError::Update(UpdateLabError::NotFound(_)) => {
                let error = ErrorResponse::new("NOT_FOUND", self.to_string());
                (StatusCode::NOT_FOUND, Json(error)).into_response()
            },
            LabApiError::Update(UpdateLabError::SeatConflict) => {
                let error = ErrorResponse::new("CONFLICT", self.to_string());
                (StatusCode::CONFLICT, Json(error)).into_response()
            },
            LabApiError::Update(UpdateLabError::Database(_)) => {
                tracing::error!("Database error during laboratory update: {}", self);
                let error = ErrorResponse::new("INTERNAL_ERROR", "A database error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
            },

            // Delete errors
            LabApiError::Delete(DeleteLabError::NotFound(_)) => {
                let error = ErrorResponse::new("NOT_FOUND", self.to_string());
                (StatusCode::NOT_FOUND, Json(error)).into_response()
            },
            LabApiError::Delete(DeleteLabError::Database(_)) => {
                tracing::error!("Database error during laboratory deletion: {}", self);
                let error = ErrorResponse::new("INTERNAL_ERROR", "A database error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
            },

            // Get errors
            LabApiError::Get(GetLabError::NotFound(_)) => {
                let error = ErrorResponse::new("NOT_FOUND", self.to_string());
                (StatusCode::NOT_FOUND, Json(error)).into_response()
            },
            LabApiError::Get(GetLabError::Database(_)) => {
                tracing::error!("Database error during laboratory retrieval: {}", self);
                let error = ErrorResponse::new("INTERNAL_ERROR", "A database error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
            },

            // List errors
            LabApiError::List(ListLabsError::Database(_)) => {
                tracing::error!("Database error during laboratory listing: {}", self);
                let error = ErrorResponse::new("INTERNAL_ERROR", "A database error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
            },
        }
    }
}

impl std::fmt::Display for LabApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Create(e) => write!(f, "{}", e),
            Self::Update(e) => write!(f, "{}", e),
            Self::Delete(e) => write!(f, "{}", e),
            Self::Get(e) => write!(f, "{}", e),
            Self::List(e) => write!(f, "{}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::labs::provisioning::ProvisionError;

    #[test]
    fn test_routes_structure() {
        let router = labs_routes();
        assert!(format!("{:?}", router).contains("Router"));
    }

    #[test]
    fn test_invalid_capacity_maps_to_400() {
        let err = LabApiError::Update(UpdateLabError::Provision(
            ProvisionError::InvalidCapacity { requested: 500 },
        ));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let err = LabApiError::Get(GetLabError::NotFound(Uuid::nil()));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_seat_conflict_on_growth_maps_to_409() {
        let err = LabApiError::Update(UpdateLabError::SeatConflict);
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_database_error_maps_to_500() {
        let err = LabApiError::List(ListLabsError::Database(sqlx::Error::PoolClosed));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_display_carries_bound() {
        let err = LabApiError::Create(CreateLabError::Provision(
            ProvisionError::InvalidCapacity { requested: 201 },
        ));
        assert!(err.to_string().contains("200"));
        assert!(err.to_string().contains("201"));
    }
}
