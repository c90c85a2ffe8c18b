use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{GuildId, TicketId};

/// Pending consensual-close proposal (§3, §8 scenario 6).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloseRequest {
	pub guild_id: GuildId,
	pub ticket_id: TicketId,
	pub reason: Option<String>,
	pub created_at: DateTime<Utc>,
	pub close_at: Option<DateTime<Utc>>,
}
