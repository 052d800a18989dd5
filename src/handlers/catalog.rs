use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::services::catalog::{
    AddedOptionResponse, CarResponse, PackResponse, PlaceResponse,
};
use crate::{ApiResponse, AppState, ListQuery, PaginatedResponse};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/cars", get(list_cars))
        .route("/cars/:id", get(get_car))
        .route("/packs", get(list_packs))
        .route("/places", get(list_places))
        .route("/options", get(list_added_options))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PlaceListQuery {
    /// Restrict to places featured on the landing page
    #[serde(default)]
    pub home_only: bool,
}

/// List cars for the storefront search page
#[utoipa::path(
    get,
    path = "/api/v1/cars",
    tag = "catalog",
    summary = "List cars",
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 1)"),
        ("limit" = Option<u64>, Query, description = "Items per page (default: 20)"),
    ),
    responses(
        (status = 200, description = "Cars retrieved", body = ApiResponse<PaginatedResponse<CarResponse>>),
    )
)]
pub async fn list_cars(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<PaginatedResponse<CarResponse>>>, ServiceError> {
    let (items, total) = state
        .services
        .catalog
        .list_cars(query.page, query.limit)
        .await?;
    let total_pages = total.div_ceil(query.limit.max(1));
    Ok(Json(ApiResponse::success(PaginatedResponse {
        items,
        total,
        page: query.page,
        limit: query.limit,
        total_pages,
    })))
}

/// Fetch one car
#[utoipa::path(
    get,
    path = "/api/v1/cars/{id}",
    tag = "catalog",
    summary = "Get a car",
    params(("id" = Uuid, Path, description = "Car id")),
    responses(
        (status = 200, description = "Car retrieved", body = ApiResponse<CarResponse>),
        (status = 404, description = "Car not found", body = crate::errors::ErrorResponse),
    )
)]
pub async fn get_car(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<CarResponse>>, ServiceError> {
    let car = state.services.catalog.get_car(id).await?;
    Ok(Json(ApiResponse::success(car)))
}

/// List packs attachable to new reservations
#[utoipa::path(
    get,
    path = "/api/v1/packs",
    tag = "catalog",
    summary = "List active packs",
    responses(
        (status = 200, description = "Packs retrieved", body = ApiResponse<Vec<PackResponse>>),
    )
)]
pub async fn list_packs(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<PackResponse>>>, ServiceError> {
    let packs = state.services.catalog.list_active_packs().await?;
    Ok(Json(ApiResponse::success(packs)))
}

/// List pick-up/drop-off places
#[utoipa::path(
    get,
    path = "/api/v1/places",
    tag = "catalog",
    summary = "List places",
    params(
        ("home_only" = Option<bool>, Query, description = "Restrict to landing-page places"),
    ),
    responses(
        (status = 200, description = "Places retrieved", body = ApiResponse<Vec<PlaceResponse>>),
    )
)]
pub async fn list_places(
    State(state): State<AppState>,
    Query(query): Query<PlaceListQuery>,
) -> Result<Json<ApiResponse<Vec<PlaceResponse>>>, ServiceError> {
    let places = state.services.catalog.list_places(query.home_only).await?;
    Ok(Json(ApiResponse::success(places)))
}

/// List selectable extras
#[utoipa::path(
    get,
    path = "/api/v1/options",
    tag = "catalog",
    summary = "List added options",
    responses(
        (status = 200, description = "Options retrieved", body = ApiResponse<Vec<AddedOptionResponse>>),
    )
)]
pub async fn list_added_options(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<AddedOptionResponse>>>, ServiceError> {
    let options = state.services.catalog.list_added_options().await?;
    Ok(Json(ApiResponse::success(options)))
}
