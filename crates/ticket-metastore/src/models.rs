//! Row shapes mapped to/from `ticket-types` domain types via `sqlx::FromRow`.
//! Kept separate from the trait methods so `postgres.rs` reads like a series
//! of queries rather than a wall of field wiring.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use ticket_types::{
	ChannelId, GuildId, LastMessage, MessageId, PanelId, Ticket, TicketId, TicketStatus, UserId,
};

#[derive(FromRow)]
pub(crate) struct TicketRow {
	pub guild_id: i64,
	pub ticket_id: i32,
	pub user_id: i64,
	pub channel_id: Option<i64>,
	pub is_thread: bool,
	pub open: bool,
	pub open_time: DateTime<Utc>,
	pub panel_id: Option<i64>,
	pub welcome_message_id: Option<i64>,
	pub join_message_id: Option<i64>,
	pub status: String,
	pub has_transcript: bool,
	pub claimed_by: Option<i64>,
	pub closed_by: Option<i64>,
	pub close_reason: Option<String>,
	pub closed_at: Option<DateTime<Utc>>,
	pub first_response_at: Option<DateTime<Utc>>,
	pub last_message_id: Option<i64>,
	pub last_message_author_id: Option<i64>,
	pub last_message_is_staff: Option<bool>,
}

fn status_to_str(status: TicketStatus) -> &'static str {
	match status {
		TicketStatus::Open => "open",
		TicketStatus::Pending => "pending",
		TicketStatus::Closed => "closed",
	}
}

fn status_from_str(value: &str) -> TicketStatus {
	match value {
		"pending" => TicketStatus::Pending,
		"closed" => TicketStatus::Closed,
		_ => TicketStatus::Open,
	}
}

impl TicketRow {
	pub(crate) fn into_domain(self) -> Ticket {
		let last_message = match (self.last_message_id, self.last_message_author_id, self.last_message_is_staff) {
			(Some(message_id), Some(author_id), Some(is_staff)) => {
				Some(LastMessage { message_id: MessageId::new(message_id as u64), author_id: UserId::new(author_id as u64), is_staff })
			}
			_ => None,
		};

		Ticket {
			guild_id: GuildId::new(self.guild_id as u64),
			ticket_id: TicketId::new(self.ticket_id),
			user_id: UserId::new(self.user_id as u64),
			channel_id: self.channel_id.map(|v| ChannelId::new(v as u64)),
			is_thread: self.is_thread,
			open: self.open,
			open_time: self.open_time,
			panel_id: self.panel_id.map(|v| PanelId::new(v as u64)),
			welcome_message_id: self.welcome_message_id.map(|v| MessageId::new(v as u64)),
			join_message_id: self.join_message_id.map(|v| MessageId::new(v as u64)),
			status: status_from_str(&self.status),
			has_transcript: self.has_transcript,
			claimed_by: self.claimed_by.map(|v| UserId::new(v as u64)),
			closed_by: self.closed_by.map(|v| UserId::new(v as u64)),
			close_reason: self.close_reason,
			closed_at: self.closed_at,
			first_response_at: self.first_response_at,
			last_message,
		}
	}
}

pub(crate) fn status_db_str(status: TicketStatus) -> &'static str {
	status_to_str(status)
}
