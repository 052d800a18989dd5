use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Rental API",
        version = "0.1.0",
        description = r#"
# Car Rental API

Storefront and back-office backend for a car-rental business.

## Features

- **Catalog**: cars, rental packs, pick-up/drop-off places, and extras
- **Reservations**: transactional booking with per-day pricing, option
  line items, and an availability guard against double-booking
- **Pricing**: totals derived from daily rates scaled by rental duration,
  recomputed on every write

## Error Handling

Failing endpoints return a consistent error body with the appropriate
HTTP status code:

```json
{
  "error": "Bad Request",
  "message": "date_to (2025-06-01) must be strictly after date_from (2025-06-04)",
  "timestamp": "2025-06-01T00:00:00Z"
}
```
"#
    ),
    paths(
        crate::handlers::reservations::create_reservation,
        crate::handlers::reservations::list_reservations,
        crate::handlers::reservations::get_reservation,
        crate::handlers::reservations::update_reservation,
        crate::handlers::reservations::update_reservation_status,
        crate::handlers::reservations::delete_reservation,
        crate::handlers::catalog::list_cars,
        crate::handlers::catalog::get_car,
        crate::handlers::catalog::list_packs,
        crate::handlers::catalog::list_places,
        crate::handlers::catalog::list_added_options,
    ),
    components(schemas(
        crate::errors::ErrorResponse,
        crate::entities::reservation::ReservationStatus,
        crate::services::reservations::CreateReservationRequest,
        crate::services::reservations::UpdateReservationRequest,
        crate::services::reservations::OptionSelection,
        crate::services::reservations::ReservationDetail,
        crate::services::reservations::ReservationSummary,
        crate::services::reservations::ReservationListResponse,
        crate::services::reservations::ReservationOptionLine,
        crate::services::reservations::CarBrief,
        crate::services::reservations::ClientBrief,
        crate::services::reservations::PlaceBrief,
        crate::services::reservations::PackBrief,
        crate::services::catalog::CarResponse,
        crate::services::catalog::PackResponse,
        crate::services::catalog::PackItemResponse,
        crate::services::catalog::PlaceResponse,
        crate::services::catalog::AddedOptionResponse,
        crate::handlers::reservations::UpdateStatusRequest,
        crate::pricing::Quote,
    )),
    tags(
        (name = "reservations", description = "Booking and back-office reservation management"),
        (name = "catalog", description = "Read-only rental catalog"),
    )
)]
pub struct ApiDoc;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}
