use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A catalog extra selectable per reservation (GPS, child seat, ...).
/// `price_per_day` is the current catalog rate; reservations snapshot it
/// into their own line items at attach time.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "added_options")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub price_per_day: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::reservation_option::Entity")]
    ReservationOptions,
}

impl Related<super::reservation_option::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReservationOptions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
