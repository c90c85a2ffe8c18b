//! Permission Resolver (§4.2). KVS-cached, MetaStore-backed.

use std::sync::Arc;
use std::time::Duration;

use ticket_gateway::GuildMember;
use ticket_kvs::Kvs;
use ticket_metastore::MetaStore;
use ticket_types::{GuildId, PermissionLevel, RoleId, UserId};

fn cache_key(guild_id: GuildId, user_id: UserId) -> String {
	format!("perm_level:{guild_id}:{user_id}")
}

pub struct PermissionResolver<K, M> {
	kvs: Arc<K>,
	meta: Arc<M>,
	cache_ttl: Duration,
}

impl<K, M> PermissionResolver<K, M>
where
	K: Kvs,
	M: MetaStore,
{
	#[must_use]
	pub fn new(kvs: Arc<K>, meta: Arc<M>, cache_ttl: Duration) -> Self {
		Self { kvs, meta, cache_ttl }
	}

	/// §4.2 `level(ctx, guild_id, member)`.
	pub async fn level(&self, guild_id: GuildId, member: &GuildMember) -> crate::error::Result<PermissionLevel> {
		let key = cache_key(guild_id, member.user_id);
		if let Some(cached) = self.kvs.get(&key).await? {
			if let Some(level) = decode_level(&cached) {
				return Ok(level);
			}
		}

		if member.administrator {
			self.store(&key, PermissionLevel::Admin).await?;
			return Ok(PermissionLevel::Admin);
		}

		let level = self.resolve_from_grants(guild_id, member.user_id, &member.roles).await?;
		self.store(&key, level).await?;
		Ok(level)
	}

	async fn resolve_from_grants(&self, guild_id: GuildId, user_id: UserId, role_ids: &[RoleId]) -> crate::error::Result<PermissionLevel> {
		let mut level = PermissionLevel::Everyone;
		if let Some(grant) = self.meta.get_user_grant(guild_id, user_id).await? {
			level = level.max(grant.level);
		}
		let role_grants = self.meta.get_role_grants(guild_id, role_ids).await?;
		for grant in role_grants {
			level = level.max(grant.level);
		}
		Ok(level)
	}

	async fn store(&self, key: &str, level: PermissionLevel) -> crate::error::Result<()> {
		Ok(self.kvs.set(key, encode_level(level), Some(self.cache_ttl)).await?)
	}

	/// Permission-add/remove, role-deletion, or member-update invalidation
	/// (§4.2).
	pub async fn invalidate(&self, guild_id: GuildId, user_id: UserId) -> crate::error::Result<()> {
		Ok(self.kvs.delete(&cache_key(guild_id, user_id)).await?)
	}
}

fn encode_level(level: PermissionLevel) -> Vec<u8> {
	match level {
		PermissionLevel::Everyone => b"everyone".to_vec(),
		PermissionLevel::Support => b"support".to_vec(),
		PermissionLevel::Admin => b"admin".to_vec(),
	}
}

fn decode_level(bytes: &[u8]) -> Option<PermissionLevel> {
	match bytes {
		b"everyone" => Some(PermissionLevel::Everyone),
		b"support" => Some(PermissionLevel::Support),
		b"admin" => Some(PermissionLevel::Admin),
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use ticket_kvs::memory::InMemoryKvs;
	use ticket_metastore::InMemoryMetaStore;
	use ticket_types::{PermissionGrant, SubjectKind};

	fn member(user_id: u64, administrator: bool) -> GuildMember {
		GuildMember { user_id: UserId::new(user_id), roles: vec![], administrator }
	}

	fn resolver() -> PermissionResolver<InMemoryKvs, InMemoryMetaStore> {
		PermissionResolver::new(InMemoryKvs::new_shared(), InMemoryMetaStore::new_shared(), Duration::from_secs(60))
	}

	#[tokio::test]
	async fn administrator_bit_grants_admin_without_grants() {
		let resolver = resolver();
		let level = resolver.level(GuildId::new(1), &member(9, true)).await.unwrap();
		assert_eq!(level, PermissionLevel::Admin);
	}

	#[tokio::test]
	async fn user_grant_is_cached_after_first_lookup() {
		let resolver = resolver();
		resolver.meta.upsert_grant(&PermissionGrant::for_user(GuildId::new(1), UserId::new(9), PermissionLevel::Support)).await.unwrap();

		let level = resolver.level(GuildId::new(1), &member(9, false)).await.unwrap();
		assert_eq!(level, PermissionLevel::Support);

		// Remove the grant directly in the store; the cached level should
		// still be returned until invalidated (§4.2).
		resolver.meta.remove_grant(GuildId::new(1), 9, SubjectKind::User).await.unwrap();
		let still_cached = resolver.level(GuildId::new(1), &member(9, false)).await.unwrap();
		assert_eq!(still_cached, PermissionLevel::Support);
	}

	#[tokio::test]
	async fn invalidate_forces_a_fresh_lookup() {
		let resolver = resolver();
		resolver.meta.upsert_grant(&PermissionGrant::for_user(GuildId::new(1), UserId::new(9), PermissionLevel::Support)).await.unwrap();
		resolver.level(GuildId::new(1), &member(9, false)).await.unwrap();

		resolver.meta.remove_grant(GuildId::new(1), 9, SubjectKind::User).await.unwrap();
		resolver.invalidate(GuildId::new(1), UserId::new(9)).await.unwrap();

		let level = resolver.level(GuildId::new(1), &member(9, false)).await.unwrap();
		assert_eq!(level, PermissionLevel::Everyone);
	}
}
