//! Blacklist Gate (§4.3).

use std::sync::Arc;

use ticket_metastore::MetaStore;
use ticket_types::{GuildId, PermissionLevel, RoleId, UserId};

pub struct BlacklistGate<M> {
	meta: Arc<M>,
}

impl<M: MetaStore> BlacklistGate<M> {
	#[must_use]
	pub fn new(meta: Arc<M>) -> Self {
		Self { meta }
	}

	/// §4.3: global guild blacklist always denies; Support+ bypasses the
	/// per-user/per-role checks; otherwise user-id or any-role membership
	/// denies.
	pub async fn is_blacklisted(&self, guild_id: GuildId, user_id: UserId, role_ids: &[RoleId], level: PermissionLevel) -> crate::error::Result<bool> {
		if self.meta.is_guild_blacklisted(guild_id).await? {
			return Ok(true);
		}
		if level.at_least(PermissionLevel::Support) {
			return Ok(false);
		}
		if self.meta.is_user_blacklisted(guild_id, user_id).await? {
			return Ok(true);
		}
		Ok(self.meta.is_any_role_blacklisted(guild_id, role_ids).await?)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use ticket_metastore::InMemoryMetaStore;
	use ticket_types::BlacklistEntry;

	#[tokio::test]
	async fn guild_wide_blacklist_denies_everyone_including_staff() {
		let meta = InMemoryMetaStore::new_shared();
		meta.add_blacklist_entry(BlacklistEntry::GuildWide(GuildId::new(1))).await.unwrap();
		let gate = BlacklistGate::new(meta);

		let denied = gate.is_blacklisted(GuildId::new(1), UserId::new(1), &[], PermissionLevel::Admin).await.unwrap();
		assert!(denied);
	}

	#[tokio::test]
	async fn support_bypasses_per_user_blacklist() {
		let meta = InMemoryMetaStore::new_shared();
		meta.add_blacklist_entry(BlacklistEntry::User(GuildId::new(1), UserId::new(9))).await.unwrap();
		let gate = BlacklistGate::new(meta);

		let denied = gate.is_blacklisted(GuildId::new(1), UserId::new(9), &[], PermissionLevel::Support).await.unwrap();
		assert!(!denied);
	}

	#[tokio::test]
	async fn everyone_is_denied_by_role_blacklist() {
		let meta = InMemoryMetaStore::new_shared();
		meta.add_blacklist_entry(BlacklistEntry::Role(GuildId::new(1), RoleId::new(77))).await.unwrap();
		let gate = BlacklistGate::new(meta);

		let denied = gate.is_blacklisted(GuildId::new(1), UserId::new(9), &[RoleId::new(77)], PermissionLevel::Everyone).await.unwrap();
		assert!(denied);
	}
}
