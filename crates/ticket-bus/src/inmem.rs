//! Process-local [`MessageBus`] backed by `async_broadcast`, grounded on
//! `some-transport::inmem::InMemTransport`'s lock-free broadcast-per-key
//! design. Used for single-worker deployments and tests (§4.1 design note:
//! the bus is swappable so `ticket-core` never depends on a broker being
//! present).

use std::sync::Arc;

use async_broadcast::{broadcast, Sender};
use async_trait::async_trait;
use dashmap::DashMap;
use tokio_stream::wrappers::ReceiverStream;

use crate::{BusError, MessageBus, Result, Topic};

const CHANNEL_CAPACITY: usize = 256;

/// Keeps one broadcast sender per topic. The `_keep_alive` receiver on each
/// sender mirrors the teacher's trick to prevent `async_broadcast` from
/// closing a topic that currently has zero subscribers.
struct TopicChannel {
	sender: Sender<Vec<u8>>,
	_keep_alive: async_broadcast::Receiver<Vec<u8>>,
}

pub struct InMemBus {
	topics: Arc<DashMap<Topic, TopicChannel>>,
}

impl InMemBus {
	#[must_use]
	pub fn new() -> Self {
		Self { topics: Arc::new(DashMap::new()) }
	}

	fn channel(&self, topic: Topic) -> Sender<Vec<u8>> {
		self
			.topics
			.entry(topic)
			.or_insert_with(|| {
				let (mut sender, keep_alive) = broadcast(CHANNEL_CAPACITY);
				sender.set_await_active(false);
				sender.set_overflow(true);
				TopicChannel { sender, _keep_alive: keep_alive }
			})
			.sender
			.clone()
	}
}

impl Default for InMemBus {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl MessageBus for InMemBus {
	async fn publish_raw(&self, topic: Topic, payload: Vec<u8>) -> Result<()> {
		self.channel(topic).broadcast(payload).await.map_err(|err| BusError::PublishFailed(err.to_string()))?;
		Ok(())
	}

	async fn subscribe_raw(&self, topic: Topic) -> Result<ReceiverStream<Vec<u8>>> {
		let mut receiver = self.channel(topic).new_receiver();
		let (tx, rx) = tokio::sync::mpsc::channel(CHANNEL_CAPACITY);
		tokio::spawn(async move {
			while let Ok(payload) = receiver.recv().await {
				if tx.send(payload).await.is_err() {
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
	use crate::{MessageBusExt, TimerPayload};
	use ticket_types::{GuildId, TicketId};

	#[tokio::test]
	async fn publish_before_subscribe_is_not_observed() {
		let bus = InMemBus::new();
		bus.publish(Topic::Autoclose, &TimerPayload::new(GuildId::new(1), TicketId::new(1))).await.unwrap();

		let mut rx = bus.subscribe::<TimerPayload>(Topic::Autoclose).await.unwrap();
		bus.publish(Topic::Autoclose, &TimerPayload::new(GuildId::new(1), TicketId::new(2))).await.unwrap();

		let received = rx.recv().await.unwrap();
		assert_eq!(received.ticket_id, TicketId::new(2));
	}

	#[tokio::test]
	async fn multiple_subscribers_each_get_every_message() {
		let bus = InMemBus::new();
		let mut rx1 = bus.subscribe::<TimerPayload>(Topic::CloseRelay).await.unwrap();
		let mut rx2 = bus.subscribe::<TimerPayload>(Topic::CloseRelay).await.unwrap();

		bus.publish(Topic::CloseRelay, &TimerPayload::new(GuildId::new(7), TicketId::new(9))).await.unwrap();

		assert_eq!(rx1.recv().await.unwrap().ticket_id, TicketId::new(9));
		assert_eq!(rx2.recv().await.unwrap().ticket_id, TicketId::new(9));
	}

	#[tokio::test]
	async fn topics_are_isolated() {
		let bus = InMemBus::new();
		let mut autoclose_rx = bus.subscribe::<TimerPayload>(Topic::Autoclose).await.unwrap();

		bus.publish(Topic::CloseRequestTimer, &TimerPayload::new(GuildId::new(1), TicketId::new(1))).await.unwrap();

		let timeout = tokio::time::timeout(std::time::Duration::from_millis(50), autoclose_rx.recv()).await;
		assert!(timeout.is_err(), "autoclose subscriber should not see a close-request-timer publish");
	}
}
