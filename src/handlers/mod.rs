pub mod catalog;
pub mod reservations;

use crate::db::DbPool;
use crate::events::EventSender;
use crate::services::catalog::CatalogService;
use crate::services::reservations::ReservationService;
use std::sync::Arc;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub reservations: Arc<ReservationService>,
    pub catalog: Arc<CatalogService>,
}

impl AppServices {
    pub fn new(db: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            reservations: Arc::new(ReservationService::new(db.clone(), Some(event_sender))),
            catalog: Arc::new(CatalogService::new(db)),
        }
    }
}
