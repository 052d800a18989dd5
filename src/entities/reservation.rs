use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Reservation lifecycle status. Admin-settable; the service validates the
/// value against this enumeration but does not police transition order.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
    strum::Display,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ReservationStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "confirmed")]
    Confirmed,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
    #[sea_orm(string_value = "completed")]
    Completed,
}

/// The booking aggregate root. `total_price` is derived: it is recomputed
/// from the car, pack, dates, and option lines inside every write
/// transaction and is never accepted from a caller.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reservations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub flight_number: Option<String>,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub pick_up_place_id: Uuid,
    pub drop_off_place_id: Uuid,
    pub car_id: Uuid,
    pub client_id: Uuid,
    pub pack_id: Option<Uuid>,
    pub status: ReservationStatus,
    pub total_price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::car::Entity",
        from = "Column::CarId",
        to = "super::car::Column::Id"
    )]
    Car,
    #[sea_orm(
        belongs_to = "super::client::Entity",
        from = "Column::ClientId",
        to = "super::client::Column::Id"
    )]
    Client,
    #[sea_orm(
        belongs_to = "super::pack::Entity",
        from = "Column::PackId",
        to = "super::pack::Column::Id"
    )]
    Pack,
    #[sea_orm(
        belongs_to = "super::place::Entity",
        from = "Column::PickUpPlaceId",
        to = "super::place::Column::Id"
    )]
    PickUpPlace,
    #[sea_orm(
        belongs_to = "super::place::Entity",
        from = "Column::DropOffPlaceId",
        to = "super::place::Column::Id"
    )]
    DropOffPlace,
    #[sea_orm(has_many = "super::reservation_option::Entity")]
    ReservationOptions,
}

impl Related<super::car::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Car.def()
    }
}

impl Related<super::client::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Client.def()
    }
}

impl Related<super::pack::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pack.def()
    }
}

impl Related<super::reservation_option::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReservationOptions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
