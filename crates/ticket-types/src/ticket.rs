use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{ChannelId, GuildId, MessageId, PanelId, TicketId, UserId};

/// §3 `status` field: Open/Pending driven by message authorship; Closed is
/// terminal for the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TicketStatus {
	Open,
	Pending,
	Closed,
}

/// A single ticket row, identified by `(guild_id, ticket_id)` (§3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
	pub guild_id: GuildId,
	pub ticket_id: TicketId,
	pub user_id: UserId,
	pub channel_id: Option<ChannelId>,
	pub is_thread: bool,
	pub open: bool,
	pub open_time: DateTime<Utc>,
	pub panel_id: Option<PanelId>,
	pub welcome_message_id: Option<MessageId>,
	pub join_message_id: Option<MessageId>,
	pub status: TicketStatus,
	pub has_transcript: bool,
	pub claimed_by: Option<UserId>,
	pub closed_by: Option<UserId>,
	pub close_reason: Option<String>,
	pub closed_at: Option<DateTime<Utc>>,
	pub first_response_at: Option<DateTime<Utc>>,
	pub last_message: Option<LastMessage>,
}

impl Ticket {
	/// A fresh, not-yet-provisioned ticket row (§3: "channel_id is set iff
	/// provisioning succeeded").
	#[must_use]
	pub fn new_pending(guild_id: GuildId, ticket_id: TicketId, user_id: UserId, panel_id: Option<PanelId>, is_thread: bool, open_time: DateTime<Utc>) -> Self {
		Self {
			guild_id,
			ticket_id,
			user_id,
			channel_id: None,
			is_thread,
			open: true,
			open_time,
			panel_id,
			welcome_message_id: None,
			join_message_id: None,
			status: TicketStatus::Open,
			has_transcript: false,
			claimed_by: None,
			closed_by: None,
			close_reason: None,
			closed_at: None,
			first_response_at: None,
			last_message: None,
		}
	}

	#[must_use]
	pub const fn key(&self) -> crate::ids::TicketKey {
		crate::ids::TicketKey {
			guild_id: self.guild_id,
			ticket_id: self.ticket_id,
		}
	}

	/// A ticket is "orphaned" if provisioning never completed; §3 requires
	/// these be closed promptly rather than left around.
	#[must_use]
	pub const fn is_orphaned(&self) -> bool {
		self.open && self.channel_id.is_none()
	}
}

/// Accounting kept for the "last message" / inactivity-timer logic of §4.9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastMessage {
	pub message_id: MessageId,
	pub author_id: UserId,
	pub is_staff: bool,
}
