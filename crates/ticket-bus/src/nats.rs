//! NATS-backed [`MessageBus`] for multi-worker deployments, grounded on
//! `some-transport::nats::NatsTransport`. Subjects are namespaced under
//! `ticketsd.<topic>` rather than the teacher's single `broadcast` subject,
//! since each topic here must stay isolated from the others.

use async_nats::Client;
use async_trait::async_trait;
use futures::StreamExt;
use tokio_stream::wrappers::ReceiverStream;

use crate::{BusError, MessageBus, Result, Topic};

#[derive(Clone)]
pub struct NatsBus {
	client: Client,
}

impl NatsBus {
	pub async fn connect(url: impl Into<String>) -> Result<Self> {
		let client = async_nats::connect(url.into()).await.map_err(|err| BusError::Nats(err.to_string()))?;
		Ok(Self { client })
	}

	#[must_use]
	pub fn from_client(client: Client) -> Self {
		Self { client }
	}

	fn subject(topic: Topic) -> String {
		format!("ticketsd.{}", topic.as_str())
	}
}

#[async_trait]
impl MessageBus for NatsBus {
	async fn publish_raw(&self, topic: Topic, payload: Vec<u8>) -> Result<()> {
		self.client.publish(Self::subject(topic), payload.into()).await.map_err(|err| BusError::PublishFailed(err.to_string()))?;
		Ok(())
	}

	async fn subscribe_raw(&self, topic: Topic) -> Result<ReceiverStream<Vec<u8>>> {
		let mut subscription = self.client.subscribe(Self::subject(topic)).await.map_err(|err| BusError::Nats(err.to_string()))?;
		let (tx, rx) = tokio::sync::mpsc::channel(256);
		tokio::spawn(async move {
			while let Some(message) = subscription.next().await {
				if tx.send(message.payload.to_vec()).await.is_err() {
					break;
				}
			}
		});
		Ok(ReceiverStream::new(rx))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn subject_is_namespaced_per_topic() {
		assert_eq!(NatsBus::subject(Topic::Autoclose), "ticketsd.AUTOCLOSE");
		assert_eq!(NatsBus::subject(Topic::ChatRelay), "ticketsd.CHAT_RELAY");
	}

	async fn nats_available(url: &str) -> bool {
		async_nats::connect(url).await.is_ok()
	}

	#[tokio::test]
	async fn publish_and_subscribe_roundtrip() {
		let url = std::env::var("NATS_URL").unwrap_or_else(|_| "nats://127.0.0.1:4222".to_string());
		if !nats_available(&url).await {
			eprintln!("skipping: no NATS server at {url}");
			return;
		}

		let bus = NatsBus::connect(&url).await.unwrap();
		let mut stream = bus.subscribe_raw(Topic::CloseRelay).await.unwrap();
		// Give the subscription time to register before publishing.
		tokio::time::sleep(std::time::Duration::from_millis(50)).await;
		bus.publish_raw(Topic::CloseRelay, b"hello".to_vec()).await.unwrap();

		use tokio_stream::StreamExt as _;
		let received = tokio::time::timeout(std::time::Duration::from_secs(2), stream.next()).await.unwrap().unwrap();
		assert_eq!(received, b"hello");
	}
}
