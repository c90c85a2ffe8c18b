use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ticket_types::{GuildId, TicketId, UserId};

/// §4.1: "Each payload carries `(guild_id, ticket_id, optional user_id,
/// optional reason)`." Shared by all three timer topics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerPayload {
	pub guild_id: GuildId,
	pub ticket_id: TicketId,
	pub user_id: Option<UserId>,
	pub reason: Option<String>,
	pub enqueued_at: DateTime<Utc>,
}

impl TimerPayload {
	#[must_use]
	pub fn new(guild_id: GuildId, ticket_id: TicketId) -> Self {
		Self { guild_id, ticket_id, user_id: None, reason: None, enqueued_at: Utc::now() }
	}

	#[must_use]
	pub fn with_user(mut self, user_id: UserId) -> Self {
		self.user_id = Some(user_id);
		self
	}

	#[must_use]
	pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
		self.reason = Some(reason.into());
		self
	}
}

/// A single message-creation event fed to the chat-relay bus (§4.9 step 6).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRelayEvent {
	pub guild_id: GuildId,
	pub ticket_id: TicketId,
	pub author_id: UserId,
	pub is_staff: bool,
	pub content_preview: String,
}

/// Emitted when a channel ticket's status changes, so an external
/// category-reposition worker can move it (§4.9 step 7, out of scope itself
/// but the event this core emits is in scope).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryUpdateEvent {
	pub guild_id: GuildId,
	pub ticket_id: TicketId,
}
