use serde::{Deserialize, Serialize};

use crate::ids::{GuildId, RoleId, UserId};

/// The three effective permission levels (§4.2, GLOSSARY).
///
/// Ordered so that `Admin > Support > Everyone`; the max across matching
/// grants wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PermissionLevel {
	Everyone,
	Support,
	Admin,
}

impl PermissionLevel {
	#[must_use]
	pub fn at_least(self, required: Self) -> bool {
		self >= required
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubjectKind {
	User,
	Role,
}

/// `(guild_id, subject_id, subject_kind) -> level`. Absence implies `Everyone`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionGrant {
	pub guild_id: GuildId,
	pub subject_id: u64,
	pub subject_kind: SubjectKind,
	pub level: PermissionLevel,
}

impl PermissionGrant {
	#[must_use]
	pub fn for_user(guild_id: GuildId, user_id: UserId, level: PermissionLevel) -> Self {
		Self {
			guild_id,
			subject_id: user_id.get(),
			subject_kind: SubjectKind::User,
			level,
		}
	}

	#[must_use]
	pub fn for_role(guild_id: GuildId, role_id: RoleId, level: PermissionLevel) -> Self {
		Self {
			guild_id,
			subject_id: role_id.get(),
			subject_kind: SubjectKind::Role,
			level,
		}
	}
}
