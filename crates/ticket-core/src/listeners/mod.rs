//! Lifecycle Listeners (§4.10): side effects the engine runs in reaction to
//! platform events rather than a direct caller action. Each handler is a
//! thin wrapper around primitives `engine.rs`/`permission.rs` already expose
//! (`force_close`, `reopen`, `permission.invalidate`), grounded on the same
//! "one method per event kind" shape `apps/orchestrator`'s gateway-event
//! dispatch uses.

use std::sync::Arc;

use ticket_gateway::types::OutboundMessage;
use ticket_gateway::PlatformGateway;
use ticket_kvs::Kvs;
use ticket_metastore::MetaStore;
use ticket_types::{ChannelId, GuildId, RoleId, UserId};

use crate::context::OperationContext;
use crate::engine::close::{member_left_reason, thread_archived_reason};
use crate::engine::{OpenRequest, TicketEngine};
use crate::error::Result;
use crate::permission::PermissionResolver;

pub struct LifecycleListener<K, M, G> {
	engine: Arc<TicketEngine<K, M, G>>,
	meta: Arc<M>,
	gateway: Arc<G>,
	permission: Arc<PermissionResolver<K, M>>,
}

impl<K, M, G> LifecycleListener<K, M, G>
where
	K: Kvs,
	M: MetaStore,
	G: PlatformGateway,
{
	#[must_use]
	pub fn new(engine: Arc<TicketEngine<K, M, G>>, meta: Arc<M>, gateway: Arc<G>, permission: Arc<PermissionResolver<K, M>>) -> Self {
		Self { engine, meta, gateway, permission }
	}

	/// `CHANNEL_DELETE` (§4.10): the channel disappeared out from under a
	/// ticket row. Closing it promptly avoids an orphan record pointing at a
	/// channel that no longer exists.
	#[tracing::instrument(skip(self), fields(channel_id = %channel_id))]
	pub async fn on_channel_delete(&self, channel_id: ChannelId) -> Result<()> {
		let Some(ticket) = self.meta.get_ticket_by_channel(channel_id).await? else {
			return Ok(());
		};
		if !ticket.open {
			return Ok(());
		}
		self.meta.close_orphaned_ticket(ticket.guild_id, ticket.ticket_id).await?;
		self.meta.delete_close_request(ticket.guild_id, ticket.ticket_id).await?;
		Ok(())
	}

	/// `GUILD_ROLE_DELETE` (§4.10): drops the role's grant and support-team
	/// membership in one store call; panel role-mentions referencing the role
	/// are left stale and filtered out at render time rather than rewritten
	/// here (panels are not mutated by a listener).
	#[tracing::instrument(skip(self), fields(guild_id = %guild_id, role_id = %role_id))]
	pub async fn on_role_delete(&self, guild_id: GuildId, role_id: RoleId) -> Result<()> {
		self.meta.remove_role_grants(guild_id, role_id).await?;
		Ok(())
	}

	/// `GUILD_MEMBER_REMOVE` (§4.10): drops the member's own support grant,
	/// invalidates the cached permission level, and — if the guild opts in —
	/// closes every ticket the member still has open.
	#[tracing::instrument(skip(self), fields(guild_id = %guild_id, user_id = %user_id))]
	pub async fn on_member_leave(&self, guild_id: GuildId, user_id: UserId) -> Result<()> {
		self.meta.remove_grant(guild_id, user_id.get(), ticket_types::SubjectKind::User).await?;
		self.permission.invalidate(guild_id, user_id).await?;

		let settings = self.meta.get_settings(guild_id).await?;
		if !settings.autoclose.on_member_leave {
			return Ok(());
		}

		for ticket in self.meta.list_open_tickets_by_user(guild_id, user_id).await? {
			if settings.autoclose.exclude_claimed && ticket.claimed_by.is_some() {
				continue;
			}
			if let Err(err) = self.engine.force_close(guild_id, ticket.ticket_id, user_id, Some(member_left_reason().to_string())).await {
				tracing::warn!(guild_id = %guild_id, ticket_id = %ticket.ticket_id, error = %err, "member-leave autoclose failed");
			}
		}
		Ok(())
	}

	/// `GUILD_MEMBER_UPDATE` (§4.10): role changes invalidate the cached
	/// permission level; the next lookup recomputes it from the fresh roles.
	#[tracing::instrument(skip(self), fields(guild_id = %guild_id, user_id = %user_id))]
	pub async fn on_member_update(&self, guild_id: GuildId, user_id: UserId) -> Result<()> {
		self.permission.invalidate(guild_id, user_id).await?;
		Ok(())
	}

	/// `THREAD_UPDATE` (§4.10): reacts to the archived flag flipping — closes
	/// an open ticket whose thread got archived out from under it, or reopens
	/// one whose thread came back.
	#[tracing::instrument(skip(self, ctx), fields(channel_id = %channel_id, archived = archived))]
	pub async fn on_thread_update(&self, ctx: &OperationContext, channel_id: ChannelId, archived: bool) -> Result<()> {
		let Some(ticket) = self.meta.get_ticket_by_channel(channel_id).await? else {
			return Ok(());
		};

		if archived && ticket.open {
			self.engine.force_close(ticket.guild_id, ticket.ticket_id, ctx.caller_id, Some(thread_archived_reason().to_string())).await?;
		} else if !archived && !ticket.open {
			let request = OpenRequest {
				panel: None,
				subject_text: None,
				originating_channel_id: channel_id,
				caller_username: String::new(),
				caller_nickname: None,
				caller_roles: Vec::new(),
				caller_is_staff: false,
				caller_can_send_in_threads: true,
			};
			self.engine.reopen(ctx, ticket.guild_id, ticket.ticket_id, request).await?;
		}
		Ok(())
	}

	/// `THREAD_MEMBERS_UPDATE` (§4.10): reconciles the "Join Ticket"
	/// notification — newly added participants beyond the opener and the bot
	/// get an announcement in the thread, matching the join message a channel
	/// ticket's webhook would otherwise post automatically.
	#[tracing::instrument(skip(self, added_user_ids), fields(channel_id = %channel_id))]
	pub async fn on_thread_members_update(&self, channel_id: ChannelId, added_user_ids: &[UserId]) -> Result<()> {
		let Some(ticket) = self.meta.get_ticket_by_channel(channel_id).await? else {
			return Ok(());
		};
		if !ticket.open || !ticket.is_thread {
			return Ok(());
		}

		for &user_id in added_user_ids {
			if user_id == ticket.user_id {
				continue;
			}
			let message = OutboundMessage { content: Some(format!("<@{user_id}> joined the ticket.")), ..Default::default() };
			let message_id = self.gateway.post_message(channel_id, message).await?;
			self.meta.set_join_message(ticket.guild_id, ticket.ticket_id, message_id).await?;
		}

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use chrono::Utc;
	use ticket_gateway::http::HttpPlatformGateway;
	use ticket_kvs::memory::InMemoryKvs;
	use ticket_metastore::InMemoryMetaStore;
	use ticket_types::{GuildId, PanelId, Ticket, TicketId};

	use super::*;
	use crate::engine::EngineConfig;
	use crate::permission::PermissionResolver;

	fn listener() -> (LifecycleListener<InMemoryKvs, InMemoryMetaStore, HttpPlatformGateway>, Arc<InMemoryMetaStore>) {
		let kvs = InMemoryKvs::new_shared();
		let meta = InMemoryMetaStore::new_shared();
		let gateway = Arc::new(HttpPlatformGateway::new("https://example.invalid", "test-token"));
		let permission = Arc::new(PermissionResolver::new(kvs.clone(), meta.clone(), std::time::Duration::from_secs(60)));
		let engine = Arc::new(TicketEngine::new(kvs, meta.clone(), gateway.clone(), EngineConfig::new(UserId::new(1))));
		(LifecycleListener::new(engine, meta.clone(), gateway, permission), meta)
	}

	#[tokio::test]
	async fn member_leave_closes_open_tickets_when_enabled() {
		let (listener, meta) = listener();
		let guild_id = GuildId::new(1);
		let user_id = UserId::new(42);

		let mut settings = meta.get_settings(guild_id).await.unwrap();
		settings.autoclose.on_member_leave = true;
		meta.upsert_settings(&settings).await.unwrap();

		let ticket_id = meta.next_ticket_id(guild_id).await.unwrap();
		let mut ticket = Ticket::new_pending(guild_id, ticket_id, user_id, None::<PanelId>, false, Utc::now());
		ticket.channel_id = Some(ChannelId::new(7));
		meta.insert_ticket(&ticket).await.unwrap();

		listener.on_member_leave(guild_id, user_id).await.unwrap();

		let reloaded = meta.get_ticket(guild_id, ticket_id).await.unwrap().unwrap();
		assert!(!reloaded.open);
		assert_eq!(reloaded.close_reason.as_deref(), Some(member_left_reason()));
	}

	#[tokio::test]
	async fn member_leave_is_a_no_op_when_autoclose_disabled() {
		let (listener, meta) = listener();
		let guild_id = GuildId::new(1);
		let user_id = UserId::new(42);

		let ticket_id = meta.next_ticket_id(guild_id).await.unwrap();
		let mut ticket = Ticket::new_pending(guild_id, ticket_id, user_id, None::<PanelId>, false, Utc::now());
		ticket.channel_id = Some(ChannelId::new(7));
		meta.insert_ticket(&ticket).await.unwrap();

		listener.on_member_leave(guild_id, user_id).await.unwrap();

		let reloaded = meta.get_ticket(guild_id, ticket_id).await.unwrap().unwrap();
		assert!(reloaded.open);
	}

	#[tokio::test]
	async fn channel_delete_closes_orphaned_row() {
		let (listener, meta) = listener();
		let guild_id = GuildId::new(1);
		let channel_id = ChannelId::new(99);
		let ticket_id = meta.next_ticket_id(guild_id).await.unwrap();
		let mut ticket = Ticket::new_pending(guild_id, ticket_id, UserId::new(2), None::<PanelId>, false, Utc::now());
		ticket.channel_id = Some(channel_id);
		meta.insert_ticket(&ticket).await.unwrap();

		listener.on_channel_delete(channel_id).await.unwrap();

		let reloaded = meta.get_ticket(guild_id, ticket_id).await.unwrap().unwrap();
		assert!(!reloaded.open);
	}
}
