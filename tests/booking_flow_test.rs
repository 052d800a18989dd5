mod common;

use axum::http::{Method, StatusCode};
use common::TestApp;
use rust_decimal_macros::dec;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use serde_json::{json, Value};
use uuid::Uuid;

use rental_api::entities::{reservation, reservation_option};
use rust_decimal::Decimal;

/// Money comes back as a JSON string whose scale depends on the storage
/// backend; compare numerically.
fn money(value: &Value) -> Decimal {
    value
        .as_str()
        .unwrap_or_else(|| panic!("not a money string: {value}"))
        .parse()
        .unwrap()
}

struct Fixture {
    car_id: Uuid,
    client_id: Uuid,
    pick_up_id: Uuid,
    drop_off_id: Uuid,
    option_id: Uuid,
}

/// Seeds the §8 worked scenario: a 300.00/day car and a 50.00/day option.
async fn seed_fixture(app: &TestApp) -> Fixture {
    Fixture {
        car_id: app.seed_car(dec!(300.00)).await,
        client_id: app.seed_client().await,
        pick_up_id: app.seed_place("Airport").await,
        drop_off_id: app.seed_place("Downtown").await,
        option_id: app.seed_added_option(dec!(50.00)).await,
    }
}

fn booking_payload(fixture: &Fixture, options: Value) -> Value {
    json!({
        "client_id": fixture.client_id,
        "car_id": fixture.car_id,
        "pick_up_place_id": fixture.pick_up_id,
        "drop_off_place_id": fixture.drop_off_id,
        "date_from": "2025-06-01",
        "date_to": "2025-06-04",
        "options": options,
    })
}

async fn reservation_count(app: &TestApp) -> u64 {
    reservation::Entity::find()
        .count(&*app.state.db)
        .await
        .unwrap()
}

async fn option_line_count(app: &TestApp, reservation_id: Option<Uuid>) -> u64 {
    let mut query = reservation_option::Entity::find();
    if let Some(id) = reservation_id {
        query = query.filter(reservation_option::Column::ReservationId.eq(id));
    }
    query.count(&*app.state.db).await.unwrap()
}

#[tokio::test]
async fn create_reservation_prices_the_booking() {
    let app = TestApp::new().await;
    let fixture = seed_fixture(&app).await;

    // 3 days at 300.00 plus 2 units of a 50.00/day option: 900 + 300.
    let payload = booking_payload(
        &fixture,
        json!([{ "added_option_id": fixture.option_id, "quantity": 2, "price_per_day": "50.00" }]),
    );

    let (status, body) = app
        .request(Method::POST, "/api/v1/reservations", Some(payload))
        .await;

    assert_eq!(status, StatusCode::CREATED, "body: {body}");
    let data = &body["data"];
    assert_eq!(money(&data["total_price"]), dec!(1200.00));
    assert_eq!(data["duration_days"], 3);
    assert_eq!(data["status"], "confirmed");
    assert!(data["pack"].is_null());
    assert_eq!(data["options"].as_array().unwrap().len(), 1);
    assert_eq!(data["options"][0]["quantity"], 2);
    assert_eq!(money(&data["options"][0]["price_per_day"]), dec!(50.00));

    let id = Uuid::parse_str(data["id"].as_str().unwrap()).unwrap();
    assert_eq!(option_line_count(&app, Some(id)).await, 1);
}

#[tokio::test]
async fn option_price_snapshots_catalog_rate_when_omitted() {
    let app = TestApp::new().await;
    let fixture = seed_fixture(&app).await;

    let payload = booking_payload(
        &fixture,
        json!([{ "added_option_id": fixture.option_id, "quantity": 1 }]),
    );

    let (status, body) = app
        .request(Method::POST, "/api/v1/reservations", Some(payload))
        .await;

    assert_eq!(status, StatusCode::CREATED, "body: {body}");
    assert_eq!(money(&body["data"]["options"][0]["price_per_day"]), dec!(50.00));
    assert_eq!(money(&body["data"]["total_price"]), dec!(1050.00));
}

#[tokio::test]
async fn update_with_empty_options_clears_lines_and_reprices() {
    let app = TestApp::new().await;
    let fixture = seed_fixture(&app).await;

    let payload = booking_payload(
        &fixture,
        json!([{ "added_option_id": fixture.option_id, "quantity": 2, "price_per_day": "50.00" }]),
    );
    let (status, body) = app
        .request(Method::POST, "/api/v1/reservations", Some(payload))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["data"]["id"].as_str().unwrap().to_string();

    // Full replace with an empty set: all previous lines are discarded.
    let update = booking_payload(&fixture, json!([]));
    let (status, body) = app
        .request(
            Method::PUT,
            &format!("/api/v1/reservations/{id}"),
            Some(update),
        )
        .await;

    assert_eq!(status, StatusCode::OK, "body: {body}");
    assert_eq!(money(&body["data"]["total_price"]), dec!(900.00));
    assert_eq!(body["data"]["options"].as_array().unwrap().len(), 0);

    let id = Uuid::parse_str(&id).unwrap();
    assert_eq!(option_line_count(&app, Some(id)).await, 0);
}

#[tokio::test]
async fn duplicate_option_ids_are_rejected_without_writes() {
    let app = TestApp::new().await;
    let fixture = seed_fixture(&app).await;

    let payload = booking_payload(
        &fixture,
        json!([
            { "added_option_id": fixture.option_id, "quantity": 1 },
            { "added_option_id": fixture.option_id, "quantity": 2 },
        ]),
    );

    let (status, body) = app
        .request(Method::POST, "/api/v1/reservations", Some(payload))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
    assert_eq!(reservation_count(&app).await, 0);
    assert_eq!(option_line_count(&app, None).await, 0);
}

#[tokio::test]
async fn non_positive_quantity_is_rejected() {
    let app = TestApp::new().await;
    let fixture = seed_fixture(&app).await;

    let payload = booking_payload(
        &fixture,
        json!([{ "added_option_id": fixture.option_id, "quantity": 0 }]),
    );

    let (status, _) = app
        .request(Method::POST, "/api/v1/reservations", Some(payload))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(reservation_count(&app).await, 0);
}

#[tokio::test]
async fn degenerate_date_range_is_rejected() {
    let app = TestApp::new().await;
    let fixture = seed_fixture(&app).await;

    let mut payload = booking_payload(&fixture, json!([]));
    payload["date_to"] = json!("2025-06-01");

    let (status, body) = app
        .request(Method::POST, "/api/v1/reservations", Some(payload))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
    assert_eq!(reservation_count(&app).await, 0);
}

#[tokio::test]
async fn dangling_references_are_rejected() {
    let app = TestApp::new().await;
    let fixture = seed_fixture(&app).await;

    let mut payload = booking_payload(&fixture, json!([]));
    payload["car_id"] = json!(Uuid::new_v4());

    let (status, _) = app
        .request(Method::POST, "/api/v1/reservations", Some(payload))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(reservation_count(&app).await, 0);
}

#[tokio::test]
async fn failed_create_leaves_no_partial_rows() {
    let app = TestApp::new().await;
    let fixture = seed_fixture(&app).await;

    // The first line is insertable; the second references nothing. The
    // transaction must roll the first line and the reservation back out.
    let payload = booking_payload(
        &fixture,
        json!([
            { "added_option_id": fixture.option_id, "quantity": 1 },
            { "added_option_id": Uuid::new_v4(), "quantity": 1 },
        ]),
    );

    let (status, body) = app
        .request(Method::POST, "/api/v1/reservations", Some(payload))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
    assert_eq!(reservation_count(&app).await, 0);
    assert_eq!(option_line_count(&app, None).await, 0);
}

#[tokio::test]
async fn failed_update_preserves_previous_state() {
    let app = TestApp::new().await;
    let fixture = seed_fixture(&app).await;

    let payload = booking_payload(
        &fixture,
        json!([{ "added_option_id": fixture.option_id, "quantity": 2, "price_per_day": "50.00" }]),
    );
    let (status, body) = app
        .request(Method::POST, "/api/v1/reservations", Some(payload))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["data"]["id"].as_str().unwrap().to_string();

    // Update replaces the option set with a dangling reference and must
    // fail after some rows were already rewritten.
    let mut update = booking_payload(
        &fixture,
        json!([{ "added_option_id": Uuid::new_v4(), "quantity": 1 }]),
    );
    update["date_to"] = json!("2025-06-10");

    let (status, _) = app
        .request(
            Method::PUT,
            &format!("/api/v1/reservations/{id}"),
            Some(update),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // The old dates, total, and option set are fully intact.
    let (status, body) = app
        .request(Method::GET, &format!("/api/v1/reservations/{id}"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["date_to"], "2025-06-04");
    assert_eq!(money(&body["data"]["total_price"]), dec!(1200.00));
    assert_eq!(body["data"]["options"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["version"], 1);
}

#[tokio::test]
async fn overlapping_bookings_for_the_same_car_are_rejected() {
    let app = TestApp::new().await;
    let fixture = seed_fixture(&app).await;

    let (status, _) = app
        .request(
            Method::POST,
            "/api/v1/reservations",
            Some(booking_payload(&fixture, json!([]))),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    // Overlaps 2025-06-01..04.
    let mut overlapping = booking_payload(&fixture, json!([]));
    overlapping["date_from"] = json!("2025-06-03");
    overlapping["date_to"] = json!("2025-06-06");

    let (status, body) = app
        .request(Method::POST, "/api/v1/reservations", Some(overlapping))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");

    // Ranges are half-open: picking up on the previous drop-off day is fine.
    let mut adjacent = booking_payload(&fixture, json!([]));
    adjacent["date_from"] = json!("2025-06-04");
    adjacent["date_to"] = json!("2025-06-06");

    let (status, body) = app
        .request(Method::POST, "/api/v1/reservations", Some(adjacent))
        .await;
    assert_eq!(status, StatusCode::CREATED, "body: {body}");
}

#[tokio::test]
async fn cancelled_reservations_release_the_car() {
    let app = TestApp::new().await;
    let fixture = seed_fixture(&app).await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/reservations",
            Some(booking_payload(&fixture, json!([]))),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, _) = app
        .request(
            Method::PATCH,
            &format!("/api/v1/reservations/{id}/status"),
            Some(json!({ "status": "cancelled" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    // The same dates can be booked again.
    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/reservations",
            Some(booking_payload(&fixture, json!([]))),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "body: {body}");
}

#[tokio::test]
async fn explicit_zero_priced_pack_matches_no_pack() {
    let app = TestApp::new().await;
    let fixture = seed_fixture(&app).await;
    let zero_pack = app.seed_pack(dec!(0.00), true).await;

    let (status, without_pack) = app
        .request(
            Method::POST,
            "/api/v1/reservations",
            Some(booking_payload(&fixture, json!([]))),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    // A different car so the availability guard stays out of the picture.
    let other_car = app.seed_car(dec!(300.00)).await;
    let mut with_pack = booking_payload(&fixture, json!([]));
    with_pack["car_id"] = json!(other_car);
    with_pack["pack_id"] = json!(zero_pack);

    let (status, with_pack) = app
        .request(Method::POST, "/api/v1/reservations", Some(with_pack))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    assert_eq!(
        money(&without_pack["data"]["total_price"]),
        money(&with_pack["data"]["total_price"])
    );
}

#[tokio::test]
async fn pack_price_scales_by_duration() {
    let app = TestApp::new().await;
    let fixture = seed_fixture(&app).await;
    let pack_id = app.seed_pack(dec!(25.00), true).await;

    let mut payload = booking_payload(&fixture, json!([]));
    payload["pack_id"] = json!(pack_id);

    let (status, body) = app
        .request(Method::POST, "/api/v1/reservations", Some(payload))
        .await;

    assert_eq!(status, StatusCode::CREATED, "body: {body}");
    // (300 + 25) * 3 days
    assert_eq!(money(&body["data"]["total_price"]), dec!(975.00));
    assert_eq!(money(&body["data"]["pack"]["price_per_day"]), dec!(25.00));
}

#[tokio::test]
async fn inactive_pack_cannot_be_attached() {
    let app = TestApp::new().await;
    let fixture = seed_fixture(&app).await;
    let pack_id = app.seed_pack(dec!(25.00), false).await;

    let mut payload = booking_payload(&fixture, json!([]));
    payload["pack_id"] = json!(pack_id);

    let (status, _) = app
        .request(Method::POST, "/api/v1/reservations", Some(payload))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(reservation_count(&app).await, 0);
}

#[tokio::test]
async fn delete_cascades_option_lines() {
    let app = TestApp::new().await;
    let fixture = seed_fixture(&app).await;

    let payload = booking_payload(
        &fixture,
        json!([{ "added_option_id": fixture.option_id, "quantity": 1 }]),
    );
    let (status, body) = app
        .request(Method::POST, "/api/v1/reservations", Some(payload))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, _) = app
        .request(Method::DELETE, &format!("/api/v1/reservations/{id}"), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app
        .request(Method::GET, &format!("/api/v1/reservations/{id}"), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(option_line_count(&app, None).await, 0);
}

#[tokio::test]
async fn unknown_reservation_ids_return_not_found() {
    let app = TestApp::new().await;
    let fixture = seed_fixture(&app).await;
    let missing = Uuid::new_v4();

    let (status, _) = app
        .request(Method::GET, &format!("/api/v1/reservations/{missing}"), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .request(
            Method::PUT,
            &format!("/api/v1/reservations/{missing}"),
            Some(booking_payload(&fixture, json!([]))),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .request(
            Method::DELETE,
            &format!("/api/v1/reservations/{missing}"),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn status_endpoint_validates_the_value() {
    let app = TestApp::new().await;
    let fixture = seed_fixture(&app).await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/reservations",
            Some(booking_payload(&fixture, json!([]))),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = app
        .request(
            Method::PATCH,
            &format!("/api/v1/reservations/{id}/status"),
            Some(json!({ "status": "completed" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "completed");
    assert_eq!(body["data"]["version"], 2);

    let (status, _) = app
        .request(
            Method::PATCH,
            &format!("/api/v1/reservations/{id}/status"),
            Some(json!({ "status": "archived" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_filters_by_status() {
    let app = TestApp::new().await;
    let fixture = seed_fixture(&app).await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/reservations",
            Some(booking_payload(&fixture, json!([]))),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let other_car = app.seed_car(dec!(120.00)).await;
    let mut second = booking_payload(&fixture, json!([]));
    second["car_id"] = json!(other_car);
    let (status, _) = app
        .request(Method::POST, "/api/v1/reservations", Some(second))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = app
        .request(
            Method::PATCH,
            &format!("/api/v1/reservations/{id}/status"),
            Some(json!({ "status": "cancelled" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .request(Method::GET, "/api/v1/reservations?status=confirmed", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["reservations"][0]["status"], "confirmed");

    let (status, body) = app.request(Method::GET, "/api/v1/reservations", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 2);
}
