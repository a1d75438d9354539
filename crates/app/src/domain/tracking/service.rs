//! Tracking Service

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::{debug, warn};

use crate::{
    database::Db,
    domain::tracking::{
        data::{NewBehaviorEvent, TrackedEvent},
        records::BehaviorEventRecord,
        repository::PgBehaviorEventsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgTrackingService {
    db: Db,
    events: PgBehaviorEventsRepository,
}

impl PgTrackingService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            events: PgBehaviorEventsRepository::new(),
        }
    }

    async fn write_event(
        &self,
        event: NewBehaviorEvent,
    ) -> Result<BehaviorEventRecord, sqlx::Error> {
        let mut tx = self.db.begin_transaction().await?;

        let record = self.events.create_event(&mut tx, event).await?;

        tx.commit().await?;

        Ok(record)
    }
}

#[async_trait]
impl TrackingService for PgTrackingService {
    #[tracing::instrument(
        name = "tracking.service.record_event",
        skip(self, event),
        fields(kind = event.kind.as_str(), action = event.action)
    )]
    async fn record_event(&self, event: TrackedEvent, at: Timestamp) {
        match self.write_event(NewBehaviorEvent::from_tracked(event, at)).await {
            Ok(record) => debug!(event_uuid = %record.uuid, "recorded behaviour event"),
            Err(error) => warn!(error = %error, "failed to record behaviour event"),
        }
    }
}

#[automock]
#[async_trait]
pub trait TrackingService: Send + Sync {
    /// Append an event to the behaviour log.
    ///
    /// Best effort: storage failures are logged at `warn` and never returned.
    async fn record_event(&self, event: TrackedEvent, at: Timestamp);
}
