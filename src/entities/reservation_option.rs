use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// One selected extra on a reservation. `price_per_day` is a snapshot taken
/// when the option was attached; later catalog price changes leave
/// historical reservations untouched. The (reservation_id, added_option_id)
/// pair is unique — quantity expresses repeated units of the same option.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, Validate)]
#[sea_orm(table_name = "reservation_added_option")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub reservation_id: Uuid,
    pub added_option_id: Uuid,
    #[validate(range(min = 1))]
    pub quantity: i32,
    pub price_per_day: Decimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::reservation::Entity",
        from = "Column::ReservationId",
        to = "super::reservation::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Reservation,
    #[sea_orm(
        belongs_to = "super::added_option::Entity",
        from = "Column::AddedOptionId",
        to = "super::added_option::Column::Id"
    )]
    AddedOption,
}

impl Related<super::reservation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reservation.def()
    }
}

impl Related<super::added_option::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AddedOption.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
