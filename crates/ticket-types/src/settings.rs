use serde::{Deserialize, Serialize};

use crate::ids::{ChannelId, GuildId};

/// Autoclose rules (§3 Settings, §4.8/§4.10). Kept intentionally small: the
/// CORE only needs to know whether autoclose applies and after how long, not
/// the full admin-facing configuration surface (out of scope per §1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutocloseRules {
	pub enabled: bool,
	pub inactivity_hours: u32,
	pub on_member_leave: bool,
	pub exclude_claimed: bool,
}

impl Default for AutocloseRules {
	fn default() -> Self {
		Self {
			enabled: false,
			inactivity_hours: 24,
			on_member_leave: false,
			exclude_claimed: false,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
	pub guild_id: GuildId,
	pub use_threads: bool,
	pub thread_archive_minutes: u32,
	pub overflow_enabled: bool,
	pub overflow_category_id: Option<ChannelId>,
	pub default_category_id: Option<ChannelId>,
	pub ticket_notification_channel: Option<ChannelId>,
	pub users_can_close: bool,
	pub ticket_limit: Option<u16>,
	pub autoclose: AutocloseRules,
}

impl Settings {
	#[must_use]
	pub fn defaults(guild_id: GuildId) -> Self {
		Self {
			guild_id,
			use_threads: false,
			thread_archive_minutes: 1440,
			overflow_enabled: false,
			overflow_category_id: None,
			default_category_id: None,
			ticket_notification_channel: None,
			users_can_close: true,
			ticket_limit: None,
			autoclose: AutocloseRules::default(),
		}
	}
}
