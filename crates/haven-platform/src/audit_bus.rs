use anyhow::Result;
use redis::{AsyncCommands, Client};
use tracing::warn;

use haven_core::AuditEvent;

/// Publishes audit events as JSON on a Redis channel for the trail
/// consumers. Strictly fire-and-forget: a committed business mutation is
/// never failed or rolled back over a lost audit line.
#[derive(Clone)]
pub struct AuditBus {
    client: Client,
    channel: String,
}

impl AuditBus {
    pub fn connect(redis_url: &str, channel: &str) -> Result<Self> {
        let client = Client::open(redis_url)?;
        Ok(Self {
            client,
            channel: channel.to_string(),
        })
    }

    pub async fn record(&self, event: AuditEvent) {
        if let Err(err) = self.publish(&event).await {
            warn!("failed to publish audit event: {err}");
        }
    }

    async fn publish(&self, event: &AuditEvent) -> Result<()> {
        let mut connection = self.client.get_multiplexed_async_connection().await?;
        let serialized = serde_json::to_string(event)?;
        let _: i64 = connection.publish(&self.channel, serialized).await?;
        Ok(())
    }
}
