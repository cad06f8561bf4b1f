//! Redis broker
//!
//! Messages travel over Redis lists: producers LPUSH onto a channel key,
//! consumers BLPOP from it. This gives at-most-one delivery per message
//! across competing consumers, which is what the notify relay needs.

use std::time::Duration;

use redis::aio::ConnectionManager;
use serde::Serialize;

use stratum_common::StratumError;

use crate::model::AccountNotice;

/// Delay before reconnecting after a lost broker connection.
const RECONNECT_DELAY: Duration = Duration::from_secs(10);

/// Redis-backed message broker.
pub struct Broker {
    client: redis::Client,
    notify_channel: String,
}

impl Broker {
    /// Create a broker for the given Redis URL.
    pub fn new(url: &str, notify_channel: impl Into<String>) -> Result<Self, StratumError> {
        let client = redis::Client::open(url)
            .map_err(|e| StratumError::BrokerConnection(e.to_string()))?;
        Ok(Self {
            client,
            notify_channel: notify_channel.into(),
        })
    }

    pub fn notify_channel(&self) -> &str {
        &self.notify_channel
    }

    async fn connection(&self) -> Result<ConnectionManager, StratumError> {
        self.client
            .get_tokio_connection_manager()
            .await
            .map_err(|e| StratumError::BrokerConnection(e.to_string()))
    }

    /// Push a raw payload onto the channel.
    pub async fn publish(&self, channel: &str, payload: &str) -> Result<(), StratumError> {
        let mut conn = self.connection().await?;
        redis::cmd("LPUSH")
            .arg(channel)
            .arg(payload)
            .query_async::<_, ()>(&mut conn)
            .await
            .map_err(|e| StratumError::BrokerConnection(e.to_string()))?;
        tracing::debug!(channel, "message published");
        Ok(())
    }

    /// JSON-encode a message and push it onto the channel.
    pub async fn publish_json<T: Serialize>(
        &self,
        channel: &str,
        message: &T,
    ) -> Result<(), StratumError> {
        let payload = serde_json::to_string(message)
            .map_err(|e| StratumError::Internal(format!("failed to encode message: {e}")))?;
        self.publish(channel, &payload).await
    }

    /// Publish an account notice on the notify channel.
    pub async fn notify_account(&self, notice: &AccountNotice) -> Result<(), StratumError> {
        self.publish_json(&self.notify_channel, notice).await
    }

    /// Consume the channel, invoking `handler` for each message.
    ///
    /// Blocks forever. Connection errors are logged and retried after
    /// [`RECONNECT_DELAY`]; handler errors are logged and the loop
    /// continues.
    pub async fn subscribe<F, Fut>(&self, channel: &str, mut handler: F) -> Result<(), StratumError>
    where
        F: FnMut(String) -> Fut,
        Fut: Future<Output = anyhow::Result<()>>,
    {
        loop {
            let mut conn = match self.connection().await {
                Ok(conn) => conn,
                Err(e) => {
                    tracing::warn!(error = %e, "broker unreachable, retrying");
                    tokio::time::sleep(RECONNECT_DELAY).await;
                    continue;
                }
            };
            loop {
                let result: Result<Option<(String, String)>, redis::RedisError> =
                    redis::cmd("BLPOP")
                        .arg(channel)
                        .arg(0)
                        .query_async(&mut conn)
                        .await;
                match result {
                    Ok(Some((key, payload))) if key == channel => {
                        tracing::debug!(channel, "message received");
                        if let Err(e) = handler(payload).await {
                            tracing::error!(channel, error = %e, "message handler failed");
                        }
                    }
                    Ok(_) => {}
                    Err(e) => {
                        tracing::warn!(
                            channel,
                            error = %e,
                            "lost broker connection, reconnecting in {}s",
                            RECONNECT_DELAY.as_secs()
                        );
                        tokio::time::sleep(RECONNECT_DELAY).await;
                        break;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_url_rejected() {
        let err = Broker::new("not-a-redis-url", "stratum.notify.account").unwrap_err();
        assert!(matches!(err, StratumError::BrokerConnection(_)));
    }

    #[test]
    fn test_channel_accessor() {
        let broker = Broker::new("redis://127.0.0.1:6379", "stratum.notify.account").unwrap();
        assert_eq!(broker.notify_channel(), "stratum.notify.account");
    }
}
