use std::fmt;
use serde::{Deserialize, Serialize};

macro_rules! snowflake_id {
	($name:ident) => {
		#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(pub u64);

		impl $name {
			#[must_use]
			pub const fn new(value: u64) -> Self {
				Self(value)
			}

			#[must_use]
			pub const fn get(self) -> u64 {
				self.0
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				write!(f, "{}", self.0)
			}
		}

		impl From<u64> for $name {
			fn from(value: u64) -> Self {
				Self(value)
			}
		}
	};
}

snowflake_id!(GuildId);
snowflake_id!(UserId);
snowflake_id!(ChannelId);
snowflake_id!(RoleId);
snowflake_id!(MessageId);
snowflake_id!(WebhookId);
snowflake_id!(PanelId);

/// Ticket ids are dense per guild, not platform snowflakes, so they get their
/// own narrower type instead of reusing the `snowflake_id!` macro.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(pub i32);

impl TicketId {
	#[must_use]
	pub const fn new(value: i32) -> Self {
		Self(value)
	}
}

impl fmt::Display for TicketId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// Identity of a ticket row: dense per-guild id scoped to a guild.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TicketKey {
	pub guild_id: GuildId,
	pub ticket_id: TicketId,
}

impl fmt::Display for TicketKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.guild_id, self.ticket_id)
	}
}
