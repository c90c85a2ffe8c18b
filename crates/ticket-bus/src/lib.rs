//! Internal pub/sub fabric used to decouple the ticket engine from its timer
//! pipelines and lifecycle fan-out (§4.1, §6). Grounded on
//! `some-transport`'s `Transport<E>` trait, generalized from one channel per
//! connection to one channel per named topic, and re-encoded with
//! `serde_json` instead of `bincode` to match the rest of this stack.

pub mod error;
pub mod inmem;
pub mod nats;
pub mod payload;

pub use error::{BusError, Result};
pub use payload::{CategoryUpdateEvent, ChatRelayEvent, TimerPayload};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio_stream::wrappers::ReceiverStream;

/// The fixed set of named channels the engine talks over (§6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
	/// Ticket has been idle past the autoclose threshold (§4.8).
	Autoclose,
	/// A close-request grace period has expired unattended (§4.7).
	CloseRequestTimer,
	/// A close has been finalized and needs relaying to other workers.
	CloseRelay,
	/// Raw gateway events fanned out to interested subsystems.
	GatewayEvents,
	/// A ticket's status changed and its channel needs repositioning.
	CategoryUpdate,
	/// A ticket message was observed and should be relayed (§4.9).
	ChatRelay,
}

impl Topic {
	#[must_use]
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Autoclose => "AUTOCLOSE",
			Self::CloseRequestTimer => "CLOSE_REQUEST_TIMER",
			Self::CloseRelay => "CLOSE_RELAY",
			Self::GatewayEvents => "GATEWAY_EVENTS",
			Self::CategoryUpdate => "CATEGORY_UPDATE",
			Self::ChatRelay => "CHAT_RELAY",
		}
	}
}

impl std::fmt::Display for Topic {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Transport-agnostic pub/sub over the fixed [`Topic`] set.
///
/// Implementations encode payloads as JSON bytes; typed helpers
/// ([`MessageBusExt`]) build on top of `publish_raw`/`subscribe_raw` so
/// callers never touch bytes directly.
#[async_trait]
pub trait MessageBus: Send + Sync + 'static {
	async fn publish_raw(&self, topic: Topic, payload: Vec<u8>) -> Result<()>;

	async fn subscribe_raw(&self, topic: Topic) -> Result<ReceiverStream<Vec<u8>>>;
}

/// Typed convenience layer over [`MessageBus::publish_raw`]/`subscribe_raw`.
/// Blanket-implemented for every `MessageBus`, mirroring how
/// `ticket-kvs::Kvs` keeps its wire format private to the trait impl.
#[async_trait]
pub trait MessageBusExt: MessageBus {
	async fn publish<T: Serialize + Sync>(&self, topic: Topic, payload: &T) -> Result<()> {
		let bytes = serde_json::to_vec(payload)?;
		self.publish_raw(topic, bytes).await
	}

	async fn subscribe<T: DeserializeOwned + Send + 'static>(&self, topic: Topic) -> Result<tokio::sync::mpsc::Receiver<T>> {
		use tokio_stream::StreamExt;

		let mut raw = self.subscribe_raw(topic).await?;
		let (tx, rx) = tokio::sync::mpsc::channel(128);
		tokio::spawn(async move {
			while let Some(bytes) = raw.next().await {
				match serde_json::from_slice::<T>(&bytes) {
					Ok(value) => {
						if tx.send(value).await.is_err() {
							break;
						}
					}
					Err(err) => tracing::warn!(error = %err, "dropping malformed bus payload"),
				}
			}
		});
		Ok(rx)
	}
}

impl<B: MessageBus + ?Sized> MessageBusExt for B {}
