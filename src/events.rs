use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;

/// Events emitted by the booking services after a successful commit.
/// Emission is fire-and-forget: a full or closed channel is logged and
/// never fails the request that produced the event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    ReservationCreated(Uuid),
    ReservationUpdated(Uuid),
    ReservationStatusChanged {
        reservation_id: Uuid,
        old_status: String,
        new_status: String,
    },
    ReservationDeleted(Uuid),
}

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event, surfacing the failure to the caller.
    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }

    /// Sends an event and logs instead of erroring when the channel is gone.
    pub async fn send_or_log(&self, event: Event) {
        if let Err(e) = self.send(event).await {
            warn!(error = %e, "Event dropped");
        }
    }
}

/// Background consumer for the event channel. Spawned once at startup;
/// runs until every sender is dropped.
pub async fn process_events(mut rx: mpsc::Receiver<Event>) {
    info!("Starting event processing loop");

    while let Some(event) = rx.recv().await {
        match &event {
            Event::ReservationCreated(id) => {
                info!(reservation_id = %id, "Reservation created");
            }
            Event::ReservationUpdated(id) => {
                info!(reservation_id = %id, "Reservation updated");
            }
            Event::ReservationStatusChanged {
                reservation_id,
                old_status,
                new_status,
            } => {
                info!(
                    reservation_id = %reservation_id,
                    old_status = %old_status,
                    new_status = %new_status,
                    "Reservation status changed"
                );
            }
            Event::ReservationDeleted(id) => {
                info!(reservation_id = %id, "Reservation deleted");
            }
        }
    }

    info!("Event processing loop stopped");
}
