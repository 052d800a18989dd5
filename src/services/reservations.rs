//! Reservation booking service.
//!
//! The only write path for reservations and their option line items. Every
//! create/update runs inside one database transaction ordered as: scalar
//! fields, then the full option-set replace, then the recomputed total —
//! the price is computed from the option rows written moments before, so a
//! caller can never observe a reservation whose stored total disagrees with
//! its stored line items.

use crate::{
    db::DbPool,
    entities::{
        added_option, car, client, pack, place, reservation,
        reservation::ReservationStatus, reservation_option,
    },
    errors::ServiceError,
    events::{Event, EventSender},
    pricing::{self, OptionLine},
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{error, info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// One requested extra: which catalog option, how many units, and
/// optionally the per-day price to snapshot. When the price is omitted the
/// current catalog price is snapshotted instead.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct OptionSelection {
    pub added_option_id: Uuid,
    #[validate(range(min = 1, message = "Option quantity must be at least 1"))]
    pub quantity: i32,
    pub price_per_day: Option<Decimal>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateReservationRequest {
    pub client_id: Uuid,
    pub car_id: Uuid,
    pub pack_id: Option<Uuid>,
    pub pick_up_place_id: Uuid,
    pub drop_off_place_id: Uuid,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    #[validate(length(max = 16, message = "Flight number must be at most 16 characters"))]
    pub flight_number: Option<String>,
    /// Defaults to `confirmed` (the storefront checkout flow); the
    /// back-office passes an explicit status.
    pub status: Option<ReservationStatus>,
    #[serde(default)]
    #[validate]
    pub options: Vec<OptionSelection>,
}

/// Full replace of a reservation: every scalar field is taken from the
/// request and the option set is swapped wholesale — an empty `options`
/// list clears all previously attached options.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateReservationRequest {
    pub client_id: Uuid,
    pub car_id: Uuid,
    pub pack_id: Option<Uuid>,
    pub pick_up_place_id: Uuid,
    pub drop_off_place_id: Uuid,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    #[validate(length(max = 16, message = "Flight number must be at most 16 characters"))]
    pub flight_number: Option<String>,
    /// Keeps the current status when omitted.
    pub status: Option<ReservationStatus>,
    #[serde(default)]
    #[validate]
    pub options: Vec<OptionSelection>,
}

/// Flat row view used by lists and status updates.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReservationSummary {
    pub id: Uuid,
    pub car_id: Uuid,
    pub client_id: Uuid,
    pub pack_id: Option<Uuid>,
    pub pick_up_place_id: Uuid,
    pub drop_off_place_id: Uuid,
    pub flight_number: Option<String>,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub status: ReservationStatus,
    pub total_price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub version: i32,
}

impl From<reservation::Model> for ReservationSummary {
    fn from(model: reservation::Model) -> Self {
        Self {
            id: model.id,
            car_id: model.car_id,
            client_id: model.client_id,
            pack_id: model.pack_id,
            pick_up_place_id: model.pick_up_place_id,
            drop_off_place_id: model.drop_off_place_id,
            flight_number: model.flight_number,
            date_from: model.date_from,
            date_to: model.date_to,
            status: model.status,
            total_price: model.total_price,
            created_at: model.created_at,
            updated_at: model.updated_at,
            version: model.version,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReservationListResponse {
    pub reservations: Vec<ReservationSummary>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CarBrief {
    pub id: Uuid,
    pub brand: String,
    pub model: String,
    pub category: String,
    pub price_per_day: Decimal,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ClientBrief {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PlaceBrief {
    pub id: Uuid,
    pub title: String,
    pub extra_fee: Decimal,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PackBrief {
    pub id: Uuid,
    pub title: String,
    pub price_per_day: Decimal,
}

/// One attached option with catalog description and snapshotted pricing.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReservationOptionLine {
    pub added_option_id: Uuid,
    pub title: String,
    pub description: String,
    pub quantity: i32,
    pub price_per_day: Decimal,
}

/// The outbound view model: a reservation joined with its catalog
/// references and expanded option lines. `total_price` is the stored,
/// already-computed value — consumers never recompute it.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReservationDetail {
    pub id: Uuid,
    pub flight_number: Option<String>,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub duration_days: i64,
    pub status: ReservationStatus,
    pub total_price: Decimal,
    pub car: CarBrief,
    pub client: ClientBrief,
    pub pick_up_place: PlaceBrief,
    pub drop_off_place: PlaceBrief,
    pub pack: Option<PackBrief>,
    pub options: Vec<ReservationOptionLine>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub version: i32,
}

/// Catalog rows a booking points at, resolved inside the transaction.
struct BookingRefs {
    car: car::Model,
    client: client::Model,
    pick_up: place::Model,
    drop_off: place::Model,
    pack: Option<pack::Model>,
}

/// Service coordinating reservation writes and their option line items.
#[derive(Clone)]
pub struct ReservationService {
    db: Arc<DbPool>,
    event_sender: Option<Arc<EventSender>>,
}

impl ReservationService {
    pub fn new(db: Arc<DbPool>, event_sender: Option<Arc<EventSender>>) -> Self {
        Self { db, event_sender }
    }

    /// Books a car: inserts the reservation, attaches its option lines,
    /// computes and persists the total, all in one transaction. Storage
    /// failures after the transaction opens surface as `BookingError` with
    /// everything rolled back.
    #[instrument(skip(self, request), fields(car_id = %request.car_id, client_id = %request.client_id))]
    pub async fn create_reservation(
        &self,
        request: CreateReservationRequest,
    ) -> Result<ReservationDetail, ServiceError> {
        request.validate()?;
        validate_date_range(request.date_from, request.date_to)?;
        validate_option_selections(&request.options)?;

        let now = Utc::now();
        let reservation_id = Uuid::new_v4();
        let status = request.status.unwrap_or(ReservationStatus::Confirmed);

        let txn = self.db.begin().await.map_err(|e| {
            error!(error = %e, "Failed to start booking transaction");
            ServiceError::BookingError(e.to_string())
        })?;

        let refs = resolve_references(
            &txn,
            request.car_id,
            request.client_id,
            request.pick_up_place_id,
            request.drop_off_place_id,
            request.pack_id,
        )
        .await
        .map_err(ServiceError::into_booking)?;

        ensure_pack_attachable(&refs)?;

        ensure_car_available(
            &txn,
            request.car_id,
            request.date_from,
            request.date_to,
            None,
        )
        .await
        .map_err(ServiceError::into_booking)?;

        let reservation_active = reservation::ActiveModel {
            id: Set(reservation_id),
            flight_number: Set(request.flight_number.clone()),
            date_from: Set(request.date_from),
            date_to: Set(request.date_to),
            pick_up_place_id: Set(request.pick_up_place_id),
            drop_off_place_id: Set(request.drop_off_place_id),
            car_id: Set(request.car_id),
            client_id: Set(request.client_id),
            pack_id: Set(request.pack_id),
            status: Set(status),
            total_price: Set(Decimal::ZERO),
            created_at: Set(now),
            updated_at: Set(Some(now)),
            version: Set(1),
        };

        let inserted = reservation_active.insert(&txn).await.map_err(|e| {
            error!(error = %e, reservation_id = %reservation_id, "Failed to insert reservation");
            ServiceError::BookingError(e.to_string())
        })?;

        let lines = attach_options(&txn, reservation_id, &request.options, now)
            .await
            .map_err(ServiceError::into_booking)?;

        let priced = persist_total(&txn, inserted, &refs, &lines)
            .await
            .map_err(ServiceError::into_booking)?;

        txn.commit().await.map_err(|e| {
            error!(error = %e, reservation_id = %reservation_id, "Failed to commit booking transaction");
            ServiceError::BookingError(e.to_string())
        })?;

        info!(
            reservation_id = %reservation_id,
            total_price = %priced.total_price,
            "Reservation created"
        );

        if let Some(event_sender) = &self.event_sender {
            event_sender
                .send_or_log(Event::ReservationCreated(reservation_id))
                .await;
        }

        Ok(assemble_detail(priced, refs, lines))
    }

    /// Replaces a reservation's scalar fields and its entire option set,
    /// then recomputes the total, in one transaction. The previous state
    /// survives intact when any step fails.
    #[instrument(skip(self, request), fields(reservation_id = %reservation_id))]
    pub async fn update_reservation(
        &self,
        reservation_id: Uuid,
        request: UpdateReservationRequest,
    ) -> Result<ReservationDetail, ServiceError> {
        request.validate()?;
        validate_date_range(request.date_from, request.date_to)?;
        validate_option_selections(&request.options)?;

        let now = Utc::now();

        let txn = self.db.begin().await.map_err(|e| {
            error!(error = %e, "Failed to start booking transaction");
            ServiceError::BookingError(e.to_string())
        })?;

        let existing = reservation::Entity::find_by_id(reservation_id)
            .one(&txn)
            .await
            .map_err(|e| ServiceError::BookingError(e.to_string()))?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Reservation {} not found", reservation_id))
            })?;

        let refs = resolve_references(
            &txn,
            request.car_id,
            request.client_id,
            request.pick_up_place_id,
            request.drop_off_place_id,
            request.pack_id,
        )
        .await
        .map_err(ServiceError::into_booking)?;

        ensure_pack_attachable(&refs)?;

        ensure_car_available(
            &txn,
            request.car_id,
            request.date_from,
            request.date_to,
            Some(reservation_id),
        )
        .await
        .map_err(ServiceError::into_booking)?;

        let status = request.status.unwrap_or(existing.status);
        let version = existing.version;

        let mut active: reservation::ActiveModel = existing.into();
        active.flight_number = Set(request.flight_number.clone());
        active.date_from = Set(request.date_from);
        active.date_to = Set(request.date_to);
        active.pick_up_place_id = Set(request.pick_up_place_id);
        active.drop_off_place_id = Set(request.drop_off_place_id);
        active.car_id = Set(request.car_id);
        active.client_id = Set(request.client_id);
        active.pack_id = Set(request.pack_id);
        active.status = Set(status);
        active.updated_at = Set(Some(now));
        active.version = Set(version + 1);

        let updated = active.update(&txn).await.map_err(|e| {
            error!(error = %e, reservation_id = %reservation_id, "Failed to update reservation");
            ServiceError::BookingError(e.to_string())
        })?;

        // Full replace: the old option set is discarded wholesale.
        reservation_option::Entity::delete_many()
            .filter(reservation_option::Column::ReservationId.eq(reservation_id))
            .exec(&txn)
            .await
            .map_err(|e| ServiceError::BookingError(e.to_string()))?;

        let lines = attach_options(&txn, reservation_id, &request.options, now)
            .await
            .map_err(ServiceError::into_booking)?;

        let priced = persist_total(&txn, updated, &refs, &lines)
            .await
            .map_err(ServiceError::into_booking)?;

        txn.commit().await.map_err(|e| {
            error!(error = %e, reservation_id = %reservation_id, "Failed to commit booking transaction");
            ServiceError::BookingError(e.to_string())
        })?;

        info!(
            reservation_id = %reservation_id,
            total_price = %priced.total_price,
            "Reservation updated"
        );

        if let Some(event_sender) = &self.event_sender {
            event_sender
                .send_or_log(Event::ReservationUpdated(reservation_id))
                .await;
        }

        Ok(assemble_detail(priced, refs, lines))
    }

    /// Sets the reservation status. The value was already checked against
    /// the enumeration; no transition-order policing happens here.
    #[instrument(skip(self), fields(reservation_id = %reservation_id, new_status = %new_status))]
    pub async fn update_status(
        &self,
        reservation_id: Uuid,
        new_status: ReservationStatus,
    ) -> Result<ReservationSummary, ServiceError> {
        let now = Utc::now();

        let txn = self.db.begin().await?;

        let existing = reservation::Entity::find_by_id(reservation_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Reservation {} not found", reservation_id))
            })?;

        let old_status = existing.status;
        let version = existing.version;

        let mut active: reservation::ActiveModel = existing.into();
        active.status = Set(new_status);
        active.updated_at = Set(Some(now));
        active.version = Set(version + 1);

        let updated = active.update(&txn).await?;
        txn.commit().await?;

        info!(
            reservation_id = %reservation_id,
            old_status = %old_status,
            new_status = %new_status,
            "Reservation status updated"
        );

        if let Some(event_sender) = &self.event_sender {
            event_sender
                .send_or_log(Event::ReservationStatusChanged {
                    reservation_id,
                    old_status: old_status.to_string(),
                    new_status: new_status.to_string(),
                })
                .await;
        }

        Ok(updated.into())
    }

    /// Convenience wrapper used by the storefront's cancel action.
    #[instrument(skip(self), fields(reservation_id = %reservation_id))]
    pub async fn cancel_reservation(
        &self,
        reservation_id: Uuid,
    ) -> Result<ReservationSummary, ServiceError> {
        self.update_status(reservation_id, ReservationStatus::Cancelled)
            .await
    }

    /// Deletes a reservation and its option lines in one transaction.
    #[instrument(skip(self), fields(reservation_id = %reservation_id))]
    pub async fn delete_reservation(&self, reservation_id: Uuid) -> Result<(), ServiceError> {
        let existing = reservation::Entity::find_by_id(reservation_id)
            .one(&*self.db)
            .await?;

        if existing.is_none() {
            return Err(ServiceError::NotFound(format!(
                "Reservation {} not found",
                reservation_id
            )));
        }

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ServiceError::DeletionError(e.to_string()))?;

        reservation_option::Entity::delete_many()
            .filter(reservation_option::Column::ReservationId.eq(reservation_id))
            .exec(&txn)
            .await
            .map_err(|e| {
                error!(error = %e, reservation_id = %reservation_id, "Failed to delete option lines");
                ServiceError::DeletionError(e.to_string())
            })?;

        let result = reservation::Entity::delete_by_id(reservation_id)
            .exec(&txn)
            .await
            .map_err(|e| {
                error!(error = %e, reservation_id = %reservation_id, "Failed to delete reservation");
                ServiceError::DeletionError(e.to_string())
            })?;

        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!(
                "Reservation {} not found",
                reservation_id
            )));
        }

        txn.commit()
            .await
            .map_err(|e| ServiceError::DeletionError(e.to_string()))?;

        info!(reservation_id = %reservation_id, "Reservation deleted");

        if let Some(event_sender) = &self.event_sender {
            event_sender
                .send_or_log(Event::ReservationDeleted(reservation_id))
                .await;
        }

        Ok(())
    }

    /// Assembles the outbound view model for one reservation.
    #[instrument(skip(self), fields(reservation_id = %reservation_id))]
    pub async fn get_reservation(
        &self,
        reservation_id: Uuid,
    ) -> Result<ReservationDetail, ServiceError> {
        let db = &*self.db;

        let model = reservation::Entity::find_by_id(reservation_id)
            .one(db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Reservation {} not found", reservation_id))
            })?;

        let refs = resolve_references(
            db,
            model.car_id,
            model.client_id,
            model.pick_up_place_id,
            model.drop_off_place_id,
            model.pack_id,
        )
        .await
        .map_err(|e| match e {
            // A persisted reservation pointing at a missing catalog row is
            // corruption, not caller error.
            ServiceError::ValidationError(msg) => ServiceError::InternalError(msg),
            other => other,
        })?;

        let rows = reservation_option::Entity::find()
            .filter(reservation_option::Column::ReservationId.eq(reservation_id))
            .find_also_related(added_option::Entity)
            .all(db)
            .await?;

        let mut lines = Vec::with_capacity(rows.len());
        for (line, option) in rows {
            let option = option.ok_or_else(|| {
                ServiceError::InternalError(format!(
                    "Option line {} references a missing catalog option",
                    line.id
                ))
            })?;
            lines.push((line, option));
        }

        Ok(assemble_detail(model, refs, lines))
    }

    /// Back-office list, newest first, optionally filtered by status.
    #[instrument(skip(self))]
    pub async fn list_reservations(
        &self,
        page: u64,
        per_page: u64,
        status: Option<ReservationStatus>,
    ) -> Result<ReservationListResponse, ServiceError> {
        let mut query = reservation::Entity::find().order_by_desc(reservation::Column::CreatedAt);
        if let Some(status) = status {
            query = query.filter(reservation::Column::Status.eq(status));
        }

        let paginator = query.paginate(&*self.db, per_page);
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok(ReservationListResponse {
            reservations: models.into_iter().map(ReservationSummary::from).collect(),
            total,
            page,
            per_page,
        })
    }
}

fn validate_date_range(date_from: NaiveDate, date_to: NaiveDate) -> Result<(), ServiceError> {
    if date_to <= date_from {
        return Err(ServiceError::ValidationError(format!(
            "date_to ({}) must be strictly after date_from ({})",
            date_to, date_from
        )));
    }
    Ok(())
}

/// Rejects duplicate option ids instead of merging them: a duplicate in one
/// request is a client-side bug worth surfacing, not an intent to add up
/// quantities.
fn validate_option_selections(selections: &[OptionSelection]) -> Result<(), ServiceError> {
    let mut seen = HashSet::with_capacity(selections.len());
    for selection in selections {
        if !seen.insert(selection.added_option_id) {
            return Err(ServiceError::ValidationError(format!(
                "Added option {} appears more than once in the selection",
                selection.added_option_id
            )));
        }
    }
    Ok(())
}

/// Resolves every catalog reference a booking names, failing with a
/// `ValidationError` on the first dangling id. Pack activity is not checked
/// here: reads must keep rendering reservations whose pack was deactivated
/// after booking; the write paths call [`ensure_pack_attachable`].
async fn resolve_references<C: ConnectionTrait>(
    conn: &C,
    car_id: Uuid,
    client_id: Uuid,
    pick_up_place_id: Uuid,
    drop_off_place_id: Uuid,
    pack_id: Option<Uuid>,
) -> Result<BookingRefs, ServiceError> {
    let car = car::Entity::find_by_id(car_id)
        .one(conn)
        .await?
        .ok_or_else(|| ServiceError::ValidationError(format!("Car {} does not exist", car_id)))?;

    let client = client::Entity::find_by_id(client_id)
        .one(conn)
        .await?
        .ok_or_else(|| {
            ServiceError::ValidationError(format!("Client {} does not exist", client_id))
        })?;

    let pick_up = place::Entity::find_by_id(pick_up_place_id)
        .one(conn)
        .await?
        .ok_or_else(|| {
            ServiceError::ValidationError(format!(
                "Pick-up place {} does not exist",
                pick_up_place_id
            ))
        })?;

    let drop_off = place::Entity::find_by_id(drop_off_place_id)
        .one(conn)
        .await?
        .ok_or_else(|| {
            ServiceError::ValidationError(format!(
                "Drop-off place {} does not exist",
                drop_off_place_id
            ))
        })?;

    let pack = match pack_id {
        Some(pack_id) => Some(
            pack::Entity::find_by_id(pack_id)
                .one(conn)
                .await?
                .ok_or_else(|| {
                    ServiceError::ValidationError(format!("Pack {} does not exist", pack_id))
                })?,
        ),
        None => None,
    };

    Ok(BookingRefs {
        car,
        client,
        pick_up,
        drop_off,
        pack,
    })
}

/// Only active packs may be attached to a new or updated booking.
fn ensure_pack_attachable(refs: &BookingRefs) -> Result<(), ServiceError> {
    if let Some(pack) = &refs.pack {
        if !pack.is_active {
            return Err(ServiceError::ValidationError(format!(
                "Pack {} is not active",
                pack.id
            )));
        }
    }
    Ok(())
}

/// Availability guard: a car cannot carry two non-cancelled reservations
/// whose `[date_from, date_to)` ranges overlap. `exclude` skips the
/// reservation being updated so it does not conflict with itself.
async fn ensure_car_available<C: ConnectionTrait>(
    conn: &C,
    car_id: Uuid,
    date_from: NaiveDate,
    date_to: NaiveDate,
    exclude: Option<Uuid>,
) -> Result<(), ServiceError> {
    let mut query = reservation::Entity::find()
        .filter(reservation::Column::CarId.eq(car_id))
        .filter(reservation::Column::Status.ne(ReservationStatus::Cancelled))
        .filter(reservation::Column::DateFrom.lt(date_to))
        .filter(reservation::Column::DateTo.gt(date_from));

    if let Some(reservation_id) = exclude {
        query = query.filter(reservation::Column::Id.ne(reservation_id));
    }

    let conflicts = query.count(conn).await?;
    if conflicts > 0 {
        return Err(ServiceError::ValidationError(format!(
            "Car {} is already booked between {} and {}",
            car_id, date_from, date_to
        )));
    }

    Ok(())
}

/// Inserts one pivot row per selection, snapshotting the per-day price.
/// A dangling option id fails the whole transaction; rows inserted before
/// the failure are rolled back with it.
async fn attach_options<C: ConnectionTrait>(
    conn: &C,
    reservation_id: Uuid,
    selections: &[OptionSelection],
    now: DateTime<Utc>,
) -> Result<Vec<(reservation_option::Model, added_option::Model)>, ServiceError> {
    let mut lines = Vec::with_capacity(selections.len());

    for selection in selections {
        let option = added_option::Entity::find_by_id(selection.added_option_id)
            .one(conn)
            .await?
            .ok_or_else(|| {
                ServiceError::ValidationError(format!(
                    "Added option {} does not exist",
                    selection.added_option_id
                ))
            })?;

        let line = reservation_option::ActiveModel {
            id: Set(Uuid::new_v4()),
            reservation_id: Set(reservation_id),
            added_option_id: Set(option.id),
            quantity: Set(selection.quantity),
            price_per_day: Set(selection.price_per_day.unwrap_or(option.price_per_day)),
            created_at: Set(now),
        };

        let model = line.insert(conn).await?;
        lines.push((model, option));
    }

    Ok(lines)
}

/// Computes the quote from the rows just written and persists the total
/// onto the reservation. Last write of every booking transaction.
async fn persist_total<C: ConnectionTrait>(
    conn: &C,
    model: reservation::Model,
    refs: &BookingRefs,
    lines: &[(reservation_option::Model, added_option::Model)],
) -> Result<reservation::Model, ServiceError> {
    let option_lines: Vec<OptionLine> = lines
        .iter()
        .map(|(line, _)| OptionLine {
            quantity: line.quantity,
            price_per_day: line.price_per_day,
        })
        .collect();

    let quote = pricing::quote(
        refs.car.price_per_day,
        refs.pack.as_ref().map(|pack| pack.price_per_day),
        &option_lines,
        model.date_from,
        model.date_to,
    );

    let mut active: reservation::ActiveModel = model.into();
    active.total_price = Set(quote.total_price);
    let priced = active.update(conn).await?;

    Ok(priced)
}

fn assemble_detail(
    model: reservation::Model,
    refs: BookingRefs,
    lines: Vec<(reservation_option::Model, added_option::Model)>,
) -> ReservationDetail {
    ReservationDetail {
        id: model.id,
        flight_number: model.flight_number,
        date_from: model.date_from,
        date_to: model.date_to,
        duration_days: pricing::rental_days(model.date_from, model.date_to),
        status: model.status,
        total_price: model.total_price,
        car: CarBrief {
            id: refs.car.id,
            brand: refs.car.brand,
            model: refs.car.model,
            category: refs.car.category,
            price_per_day: refs.car.price_per_day,
        },
        client: ClientBrief {
            id: refs.client.id,
            full_name: refs.client.full_name,
            email: refs.client.email,
        },
        pick_up_place: PlaceBrief {
            id: refs.pick_up.id,
            title: refs.pick_up.title,
            extra_fee: refs.pick_up.extra_fee,
        },
        drop_off_place: PlaceBrief {
            id: refs.drop_off.id,
            title: refs.drop_off.title,
            extra_fee: refs.drop_off.extra_fee,
        },
        pack: refs.pack.map(|pack| PackBrief {
            id: pack.id,
            title: pack.title,
            price_per_day: pack.price_per_day,
        }),
        options: lines
            .into_iter()
            .map(|(line, option)| ReservationOptionLine {
                added_option_id: option.id,
                title: option.title,
                description: option.description,
                quantity: line.quantity,
                price_per_day: line.price_per_day,
            })
            .collect(),
        created_at: model.created_at,
        updated_at: model.updated_at,
        version: model.version,
    }
}
