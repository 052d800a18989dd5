//! Read-only access to the rental catalog.
//!
//! The storefront renders from these lookups; the booking service resolves
//! references against the same tables inside its own transactions. Catalog
//! writes happen at the administrative boundary and are not exposed here.

use crate::{
    db::DbPool,
    entities::{added_option, car, pack, pack_item, place},
    errors::ServiceError,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, instrument};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CarResponse {
    pub id: Uuid,
    pub brand: String,
    pub model: String,
    pub category: String,
    pub fuel_type: String,
    pub transmission: String,
    pub luggage_count: i32,
    pub seat_count: i32,
    pub has_air_con: bool,
    pub door_count: i32,
    pub image_url: Option<String>,
    pub discount_percent: i32,
    pub price_per_day: Decimal,
    pub created_at: DateTime<Utc>,
}

impl From<car::Model> for CarResponse {
    fn from(model: car::Model) -> Self {
        Self {
            id: model.id,
            brand: model.brand,
            model: model.model,
            category: model.category,
            fuel_type: model.fuel_type,
            transmission: model.transmission,
            luggage_count: model.luggage_count,
            seat_count: model.seat_count,
            has_air_con: model.has_air_con,
            door_count: model.door_count,
            image_url: model.image_url,
            discount_percent: model.discount_percent,
            price_per_day: model.price_per_day,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PackItemResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PackResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub is_active: bool,
    pub price_per_day: Decimal,
    pub items: Vec<PackItemResponse>,
}

impl PackResponse {
    fn from_models(pack: pack::Model, items: Vec<pack_item::Model>) -> Self {
        Self {
            id: pack.id,
            title: pack.title,
            description: pack.description,
            is_active: pack.is_active,
            price_per_day: pack.price_per_day,
            items: items
                .into_iter()
                .map(|item| PackItemResponse {
                    id: item.id,
                    title: item.title,
                    description: item.description,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PlaceResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub extra_fee: Decimal,
    pub show_on_home: bool,
}

impl From<place::Model> for PlaceResponse {
    fn from(model: place::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            image_url: model.image_url,
            extra_fee: model.extra_fee,
            show_on_home: model.show_on_home,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AddedOptionResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price_per_day: Decimal,
}

impl From<added_option::Model> for AddedOptionResponse {
    fn from(model: added_option::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            price_per_day: model.price_per_day,
        }
    }
}

/// Read-side service over the catalog tables.
#[derive(Clone)]
pub struct CatalogService {
    db: Arc<DbPool>,
}

impl CatalogService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(skip(self), fields(car_id = %car_id))]
    pub async fn get_car(&self, car_id: Uuid) -> Result<CarResponse, ServiceError> {
        let car = car::Entity::find_by_id(car_id)
            .one(&*self.db)
            .await
            .map_err(|e| {
                error!(error = %e, car_id = %car_id, "Failed to fetch car");
                ServiceError::DatabaseError(e)
            })?
            .ok_or_else(|| ServiceError::NotFound(format!("Car {} not found", car_id)))?;
        Ok(car.into())
    }

    /// Lists cars for the storefront search page, newest first.
    #[instrument(skip(self))]
    pub async fn list_cars(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<CarResponse>, u64), ServiceError> {
        let paginator = car::Entity::find()
            .order_by_desc(car::Column::CreatedAt)
            .paginate(&*self.db, per_page);

        let total = paginator.num_items().await?;
        let cars = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok((cars.into_iter().map(CarResponse::from).collect(), total))
    }

    /// Packs attachable to new reservations, with their descriptive items.
    #[instrument(skip(self))]
    pub async fn list_active_packs(&self) -> Result<Vec<PackResponse>, ServiceError> {
        let packs = pack::Entity::find()
            .filter(pack::Column::IsActive.eq(true))
            .order_by_asc(pack::Column::Title)
            .find_with_related(pack_item::Entity)
            .all(&*self.db)
            .await?;

        Ok(packs
            .into_iter()
            .map(|(pack, items)| PackResponse::from_models(pack, items))
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn list_places(&self, home_only: bool) -> Result<Vec<PlaceResponse>, ServiceError> {
        let mut query = place::Entity::find().order_by_asc(place::Column::Title);
        if home_only {
            query = query.filter(place::Column::ShowOnHome.eq(true));
        }
        let places = query.all(&*self.db).await?;

        Ok(places.into_iter().map(PlaceResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn list_added_options(&self) -> Result<Vec<AddedOptionResponse>, ServiceError> {
        let options = added_option::Entity::find()
            .order_by_asc(added_option::Column::Title)
            .all(&*self.db)
            .await?;

        Ok(options.into_iter().map(AddedOptionResponse::from).collect())
    }
}
