//! Operation event publishing. Every completed operation is announced on a
//! JetStream subject for external subscribers; the payload is just an
//! operation tag and a correlation id. Publishing waits for the broker ack,
//! not for any subscriber.

use crate::errors::FurloughError;
use crate::settings::Events as EventsCfg;
use async_nats::jetstream;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationKind {
    Request,
    Modify,
    Get,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationEvent {
    pub id: Uuid,
    pub name_operation: OperationKind,
}

impl OperationEvent {
    pub fn new(kind: OperationKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            name_operation: kind,
        }
    }
}

/// Seam the orchestrator drives. A non-acknowledged publish is an error,
/// never silently swallowed.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn publish(&self, kind: OperationKind) -> Result<(), FurloughError>;
}

/// NATS JetStream implementation. The connection is opened once at startup
/// and shared for the process lifetime.
#[derive(Clone)]
pub struct NatsPublisher {
    context: jetstream::Context,
    subject: String,
}

impl NatsPublisher {
    /// Connect and make sure the stream backing the subject exists.
    pub async fn connect(cfg: &EventsCfg) -> Result<Self, FurloughError> {
        let client = async_nats::connect(&cfg.url)
            .await
            .map_err(|e| FurloughError::Publish(format!("connect to {} failed: {e}", cfg.url)))?;

        let context = jetstream::new(client);
        context
            .get_or_create_stream(jetstream::stream::Config {
                name: cfg.stream.clone(),
                subjects: vec![cfg.subject.clone().into()],
                ..Default::default()
            })
            .await
            .map_err(|e| FurloughError::Publish(format!("stream setup failed: {e}")))?;

        tracing::info!(stream = %cfg.stream, subject = %cfg.subject, "Event stream ready");
        Ok(Self {
            context,
            subject: cfg.subject.clone(),
        })
    }
}

#[async_trait]
impl EventSink for NatsPublisher {
    async fn publish(&self, kind: OperationKind) -> Result<(), FurloughError> {
        let event = OperationEvent::new(kind);
        let payload = serde_json::to_vec(&event)?;

        let ack = self
            .context
            .publish(self.subject.clone(), payload.into())
            .await
            .map_err(|e| FurloughError::Publish(format!("publish failed: {e}")))?;

        // Wait for the broker to acknowledge persistence
        ack.await
            .map_err(|e| FurloughError::Publish(format!("publish not acknowledged: {e}")))?;

        tracing::debug!(event_id = %event.id, operation = ?kind, "Published operation event");
        Ok(())
    }
}
