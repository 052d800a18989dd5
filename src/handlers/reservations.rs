use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, patch},
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::reservation::ReservationStatus;
use crate::errors::ServiceError;
use crate::services::reservations::{
    CreateReservationRequest, ReservationDetail, ReservationListResponse, ReservationSummary,
    UpdateReservationRequest,
};
use crate::{ApiResponse, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_reservations).post(create_reservation))
        .route(
            "/:id",
            get(get_reservation)
                .put(update_reservation)
                .delete(delete_reservation),
        )
        .route("/:id/status", patch(update_reservation_status))
}

fn map_status_str(status: &str) -> Result<ReservationStatus, ServiceError> {
    match status.to_ascii_lowercase().as_str() {
        "pending" => Ok(ReservationStatus::Pending),
        "confirmed" => Ok(ReservationStatus::Confirmed),
        "cancelled" | "canceled" => Ok(ReservationStatus::Cancelled),
        "completed" => Ok(ReservationStatus::Completed),
        other => Err(ServiceError::InvalidStatus(format!(
            "Unknown reservation status: {other}"
        ))),
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReservationListQuery {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
    pub status: Option<String>,
}

fn default_page() -> u64 {
    1
}
fn default_limit() -> u64 {
    20
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// Book a car
#[utoipa::path(
    post,
    path = "/api/v1/reservations",
    tag = "reservations",
    summary = "Create a reservation",
    request_body = CreateReservationRequest,
    responses(
        (status = 201, description = "Reservation created and priced", body = ApiResponse<ReservationDetail>),
        (status = 400, description = "Invalid booking request", body = crate::errors::ErrorResponse),
        (status = 409, description = "Booking transaction failed", body = crate::errors::ErrorResponse),
    )
)]
pub async fn create_reservation(
    State(state): State<AppState>,
    Json(request): Json<CreateReservationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ReservationDetail>>), ServiceError> {
    let detail = state.services.reservations.create_reservation(request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(detail))))
}

/// List reservations with pagination and optional status filter
#[utoipa::path(
    get,
    path = "/api/v1/reservations",
    tag = "reservations",
    summary = "List reservations",
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 1)"),
        ("limit" = Option<u64>, Query, description = "Items per page (default: 20)"),
        ("status" = Option<String>, Query, description = "Filter by reservation status"),
    ),
    responses(
        (status = 200, description = "Reservations retrieved", body = ApiResponse<ReservationListResponse>),
        (status = 400, description = "Invalid status filter", body = crate::errors::ErrorResponse),
    )
)]
pub async fn list_reservations(
    State(state): State<AppState>,
    Query(query): Query<ReservationListQuery>,
) -> Result<Json<ApiResponse<ReservationListResponse>>, ServiceError> {
    let status = query
        .status
        .as_deref()
        .map(map_status_str)
        .transpose()?;

    let result = state
        .services
        .reservations
        .list_reservations(query.page, query.limit, status)
        .await?;
    Ok(Json(ApiResponse::success(result)))
}

/// Fetch one reservation with its catalog joins and option lines
#[utoipa::path(
    get,
    path = "/api/v1/reservations/{id}",
    tag = "reservations",
    summary = "Get a reservation",
    params(("id" = Uuid, Path, description = "Reservation id")),
    responses(
        (status = 200, description = "Reservation retrieved", body = ApiResponse<ReservationDetail>),
        (status = 404, description = "Reservation not found", body = crate::errors::ErrorResponse),
    )
)]
pub async fn get_reservation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ReservationDetail>>, ServiceError> {
    let detail = state.services.reservations.get_reservation(id).await?;
    Ok(Json(ApiResponse::success(detail)))
}

/// Replace a reservation's fields and option set
#[utoipa::path(
    put,
    path = "/api/v1/reservations/{id}",
    tag = "reservations",
    summary = "Update a reservation",
    params(("id" = Uuid, Path, description = "Reservation id")),
    request_body = UpdateReservationRequest,
    responses(
        (status = 200, description = "Reservation updated and repriced", body = ApiResponse<ReservationDetail>),
        (status = 400, description = "Invalid booking request", body = crate::errors::ErrorResponse),
        (status = 404, description = "Reservation not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Booking transaction failed", body = crate::errors::ErrorResponse),
    )
)]
pub async fn update_reservation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateReservationRequest>,
) -> Result<Json<ApiResponse<ReservationDetail>>, ServiceError> {
    let detail = state
        .services
        .reservations
        .update_reservation(id, request)
        .await?;
    Ok(Json(ApiResponse::success(detail)))
}

/// Set a reservation's status
#[utoipa::path(
    patch,
    path = "/api/v1/reservations/{id}/status",
    tag = "reservations",
    summary = "Update reservation status",
    params(("id" = Uuid, Path, description = "Reservation id")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<ReservationSummary>),
        (status = 400, description = "Unknown status value", body = crate::errors::ErrorResponse),
        (status = 404, description = "Reservation not found", body = crate::errors::ErrorResponse),
    )
)]
pub async fn update_reservation_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<ApiResponse<ReservationSummary>>, ServiceError> {
    let status = map_status_str(&request.status)?;
    let summary = state.services.reservations.update_status(id, status).await?;
    Ok(Json(ApiResponse::success(summary)))
}

/// Delete a reservation and its option lines
#[utoipa::path(
    delete,
    path = "/api/v1/reservations/{id}",
    tag = "reservations",
    summary = "Delete a reservation",
    params(("id" = Uuid, Path, description = "Reservation id")),
    responses(
        (status = 204, description = "Reservation deleted"),
        (status = 404, description = "Reservation not found", body = crate::errors::ErrorResponse),
        (status = 422, description = "Deletion blocked by storage constraint", body = crate::errors::ErrorResponse),
    )
)]
pub async fn delete_reservation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServiceError> {
    state.services.reservations.delete_reservation(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
