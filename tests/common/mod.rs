use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, Set};
use serde_json::Value;
use tokio::sync::mpsc;
use tower::ServiceExt;
use uuid::Uuid;

use rental_api::{
    config::AppConfig,
    db,
    entities::{added_option, car, client, pack, place},
    events::{self, EventSender},
    handlers::AppServices,
    AppState,
};

/// Helper harness for spinning up an application state backed by a fresh
/// SQLite database in a temp directory.
pub struct TestApp {
    router: Router,
    pub state: AppState,
    _tmp: tempfile::TempDir,
    _event_task: tokio::task::JoinHandle<()>,
}

impl TestApp {
    /// Construct a new test application with fresh database state.
    pub async fn new() -> Self {
        let tmp = tempfile::tempdir().expect("temp dir");
        let db_path = tmp.path().join("rental_test.db");

        let mut cfg = AppConfig::new(
            format!("sqlite://{}?mode=rwc", db_path.display()),
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );
        cfg.auto_migrate = true;
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("connect test database");
        db::run_migrations(&pool).await.expect("run migrations");

        let db_arc = Arc::new(pool);
        let (event_tx, event_rx) = mpsc::channel(64);
        let event_sender = EventSender::new(event_tx);
        let event_task = tokio::spawn(events::process_events(event_rx));

        let services = AppServices::new(db_arc.clone(), Arc::new(event_sender.clone()));
        let state = AppState {
            db: db_arc,
            config: cfg,
            event_sender,
            services,
        };
        let router = rental_api::app_router(state.clone());

        Self {
            router,
            state,
            _tmp: tmp,
            _event_task: event_task,
        }
    }

    /// Drives one request through the router and decodes the JSON body
    /// (Null for empty bodies such as 204 responses).
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => {
                builder = builder.header("content-type", "application/json");
                builder.body(Body::from(body.to_string())).unwrap()
            }
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("request failed");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };
        (status, json)
    }

    pub async fn seed_car(&self, price_per_day: Decimal) -> Uuid {
        let id = Uuid::new_v4();
        car::ActiveModel {
            id: Set(id),
            brand: Set("Peugeot".into()),
            model: Set("208".into()),
            category: Set("compact".into()),
            fuel_type: Set("petrol".into()),
            transmission: Set("manual".into()),
            luggage_count: Set(2),
            seat_count: Set(5),
            has_air_con: Set(true),
            door_count: Set(5),
            image_url: Set(None),
            discount_percent: Set(0),
            price_per_day: Set(price_per_day),
            created_at: Set(Utc::now()),
            updated_at: Set(None),
        }
        .insert(&*self.state.db)
        .await
        .expect("seed car");
        id
    }

    pub async fn seed_client(&self) -> Uuid {
        let id = Uuid::new_v4();
        client::ActiveModel {
            id: Set(id),
            passport_number: Set(format!("P-{}", id.simple())),
            full_name: Set("Ada Driver".into()),
            email: Set(format!("{}@example.com", id.simple())),
            mobile_number: Set("+33600000000".into()),
            address: Set("1 Rue de Rivoli, Paris".into()),
            license_number: Set(format!("L-{}", id.simple())),
            created_at: Set(Utc::now()),
            updated_at: Set(None),
        }
        .insert(&*self.state.db)
        .await
        .expect("seed client");
        id
    }

    pub async fn seed_place(&self, title: &str) -> Uuid {
        let id = Uuid::new_v4();
        place::ActiveModel {
            id: Set(id),
            title: Set(title.into()),
            description: Set("Rental desk in the arrivals hall".into()),
            image_url: Set(None),
            extra_fee: Set(Decimal::ZERO),
            show_on_home: Set(true),
            created_at: Set(Utc::now()),
            updated_at: Set(None),
        }
        .insert(&*self.state.db)
        .await
        .expect("seed place");
        id
    }

    pub async fn seed_pack(&self, price_per_day: Decimal, is_active: bool) -> Uuid {
        let id = Uuid::new_v4();
        pack::ActiveModel {
            id: Set(id),
            title: Set(format!("Pack {}", id.simple())),
            description: Set("Insurance and roadside assistance bundle".into()),
            is_active: Set(is_active),
            price_per_day: Set(price_per_day),
            created_at: Set(Utc::now()),
            updated_at: Set(None),
        }
        .insert(&*self.state.db)
        .await
        .expect("seed pack");
        id
    }

    pub async fn seed_added_option(&self, price_per_day: Decimal) -> Uuid {
        let id = Uuid::new_v4();
        added_option::ActiveModel {
            id: Set(id),
            title: Set(format!("Option {}", id.simple())),
            description: Set("A selectable extra".into()),
            price_per_day: Set(price_per_day),
            created_at: Set(Utc::now()),
            updated_at: Set(None),
        }
        .insert(&*self.state.db)
        .await
        .expect("seed added option");
        id
    }
}
