use serde::{Deserialize, Serialize};

use crate::ids::{GuildId, RoleId, UserId};

/// §3 Blacklist: per-guild global flag plus user/role sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlacklistEntry {
	GuildWide(GuildId),
	User(GuildId, UserId),
	Role(GuildId, RoleId),
}
