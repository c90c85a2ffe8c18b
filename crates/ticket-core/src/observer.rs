//! Message Observer (§4.9): resolves channel→ticket through a positive/
//! negative KVS cache, tracks the inactivity timer and first-response time,
//! relays to the chat bus, and transitions ticket status.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use ticket_bus::{ChatRelayEvent, MessageBus, MessageBusExt, Topic};
use ticket_kvs::Kvs;
use ticket_metastore::MetaStore;
use ticket_types::{ChannelId, GuildId, LastMessage, MessageId, Ticket, TicketId, TicketStatus, UserId};

use crate::error::Result;

const NEGATIVE_CACHE_TTL: Duration = Duration::from_secs(30);

fn channel_status_key(channel_id: ChannelId) -> String {
	format!("ticket_channel_status:{channel_id}")
}

#[derive(Serialize, Deserialize)]
enum CachedLookup {
	Ticket { guild_id: GuildId, ticket_id: TicketId },
	NotATicket,
}

/// An inbound message, already resolved to its guild/channel by the
/// transport (§4.9's preamble: "for each inbound message in a guild
/// channel").
pub struct InboundMessage {
	pub channel_id: ChannelId,
	pub message_id: MessageId,
	pub author_id: UserId,
	pub author_is_bot: bool,
	pub content_preview: String,
}

pub struct MessageObserver<K, M> {
	kvs: Arc<K>,
	meta: Arc<M>,
	bus: Arc<dyn MessageBus>,
}

impl<K, M> MessageObserver<K, M>
where
	K: Kvs,
	M: MetaStore,
{
	#[must_use]
	pub fn new(kvs: Arc<K>, meta: Arc<M>, bus: Arc<dyn MessageBus>) -> Self {
		Self { kvs, meta, bus }
	}

	#[tracing::instrument(skip(self, message), fields(channel_id = %message.channel_id))]
	pub async fn observe(&self, message: InboundMessage) -> Result<()> {
		if message.author_is_bot {
			return Ok(());
		}

		let Some(ticket) = self.resolve_ticket(message.channel_id).await? else {
			return Ok(());
		};
		if !ticket.open {
			return Ok(());
		}

		let is_staff = message.author_id != ticket.user_id;

		self.update_last_message(&ticket, message.message_id, message.author_id, is_staff).await?;

		if is_staff && ticket.first_response_at.is_none() {
			self.meta.record_first_response(ticket.guild_id, ticket.ticket_id, Utc::now()).await?;
		}

		self
			.bus
			.publish(Topic::ChatRelay, &ChatRelayEvent {
				guild_id: ticket.guild_id,
				ticket_id: ticket.ticket_id,
				author_id: message.author_id,
				is_staff,
				content_preview: message.content_preview,
			})
			.await?;

		self.transition_status(&ticket, is_staff).await?;

		Ok(())
	}

	async fn resolve_ticket(&self, channel_id: ChannelId) -> Result<Option<Ticket>> {
		let key = channel_status_key(channel_id);

		if let Some(bytes) = self.kvs.get(&key).await? {
			match serde_json::from_slice::<CachedLookup>(&bytes) {
				Ok(CachedLookup::NotATicket) => return Ok(None),
				Ok(CachedLookup::Ticket { guild_id, ticket_id }) => return Ok(self.meta.get_ticket(guild_id, ticket_id).await?),
				Err(err) => tracing::warn!(error = %err, "malformed channel-status cache entry, falling through to MetaStore"),
			}
		}

		match self.meta.get_ticket_by_channel(channel_id).await? {
			Some(ticket) => {
				let cached = CachedLookup::Ticket { guild_id: ticket.guild_id, ticket_id: ticket.ticket_id };
				self.kvs.set(&key, serde_json::to_vec(&cached)?, None).await?;
				Ok(Some(ticket))
			}
			None => {
				self.kvs.set(&key, serde_json::to_vec(&CachedLookup::NotATicket)?, Some(NEGATIVE_CACHE_TTL)).await?;
				Ok(None)
			}
		}
	}

	/// §4.9 step 4: reset the inactivity timer unless both the previous and
	/// the current message came from staff.
	async fn update_last_message(&self, ticket: &Ticket, message_id: MessageId, author_id: UserId, is_staff: bool) -> Result<()> {
		let both_staff = ticket.last_message.is_some_and(|last| last.is_staff && is_staff);
		if both_staff {
			return Ok(());
		}
		self.meta.update_last_message(ticket.guild_id, ticket.ticket_id, LastMessage { message_id, author_id, is_staff }).await?;
		Ok(())
	}

	/// §4.9 step 7: staff author moves the ticket to `Pending`, non-staff back
	/// to `Open`; channel tickets also get a category-reposition event.
	async fn transition_status(&self, ticket: &Ticket, is_staff: bool) -> Result<()> {
		let new_status = if is_staff { TicketStatus::Pending } else { TicketStatus::Open };
		if ticket.status == new_status {
			return Ok(());
		}

		self.meta.set_ticket_status(ticket.guild_id, ticket.ticket_id, new_status).await?;

		if !ticket.is_thread {
			self.bus.publish(Topic::CategoryUpdate, &ticket_bus::CategoryUpdateEvent { guild_id: ticket.guild_id, ticket_id: ticket.ticket_id }).await?;
		}

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use ticket_bus::inmem::InMemBus;
	use ticket_kvs::memory::InMemoryKvs;
	use ticket_metastore::InMemoryMetaStore;
	use ticket_types::{GuildId, PanelId};

	fn observer() -> (MessageObserver<InMemoryKvs, InMemoryMetaStore>, Arc<InMemoryMetaStore>) {
		let kvs = InMemoryKvs::new_shared();
		let meta = InMemoryMetaStore::new_shared();
		let bus: Arc<dyn MessageBus> = Arc::new(InMemBus::new());
		(MessageObserver::new(kvs, meta.clone(), bus), meta)
	}

	async fn seed_ticket(meta: &InMemoryMetaStore, guild_id: GuildId, opener: UserId, channel_id: ChannelId) -> TicketId {
		let ticket_id = meta.next_ticket_id(guild_id).await.unwrap();
		let mut ticket = Ticket::new_pending(guild_id, ticket_id, opener, None::<PanelId>, false, Utc::now());
		ticket.channel_id = Some(channel_id);
		meta.insert_ticket(&ticket).await.unwrap();
		meta.set_ticket_channel(guild_id, ticket_id, channel_id).await.unwrap();
		ticket_id
	}

	#[tokio::test]
	async fn staff_message_moves_ticket_to_pending() {
		let (observer, meta) = observer();
		let guild_id = GuildId::new(1);
		let opener = UserId::new(2);
		let channel_id = ChannelId::new(9);
		seed_ticket(&meta, guild_id, opener, channel_id).await;

		observer
			.observe(InboundMessage { channel_id, message_id: MessageId::new(1), author_id: UserId::new(99), author_is_bot: false, content_preview: "hi".into() })
			.await
			.unwrap();

		let ticket = meta.get_ticket_by_channel(channel_id).await.unwrap().unwrap();
		assert_eq!(ticket.status, TicketStatus::Pending);
		assert!(ticket.first_response_at.is_some());
	}

	#[tokio::test]
	async fn opener_message_keeps_ticket_open() {
		let (observer, meta) = observer();
		let guild_id = GuildId::new(1);
		let opener = UserId::new(2);
		let channel_id = ChannelId::new(9);
		seed_ticket(&meta, guild_id, opener, channel_id).await;

		observer
			.observe(InboundMessage { channel_id, message_id: MessageId::new(1), author_id: opener, author_is_bot: false, content_preview: "hi".into() })
			.await
			.unwrap();

		let ticket = meta.get_ticket_by_channel(channel_id).await.unwrap().unwrap();
		assert_eq!(ticket.status, TicketStatus::Open);
		assert!(ticket.first_response_at.is_none());
	}

	#[tokio::test]
	async fn unresolved_channel_is_a_no_op() {
		let (observer, _meta) = observer();
		observer
			.observe(InboundMessage { channel_id: ChannelId::new(404), message_id: MessageId::new(1), author_id: UserId::new(1), author_is_bot: false, content_preview: "x".into() })
			.await
			.unwrap();
	}
}
