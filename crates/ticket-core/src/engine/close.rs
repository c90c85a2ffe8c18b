//! Ticket Engine — `close`, `reopen`, `claim`/`unclaim` (§4.7).

use ticket_gateway::GuildMember;
use ticket_gateway::PlatformGateway;
use ticket_kvs::Kvs;
use ticket_metastore::MetaStore;
use ticket_types::{ChannelId, GuildId, PermissionLevel, Ticket, TicketId, UserId};

use super::open::OpenRequest;
use super::TicketEngine;
use crate::context::OperationContext;
use crate::error::{EngineError, Result, UserError};

pub struct CloseInput {
	pub channel_id: ChannelId,
	pub reason: Option<String>,
	pub from_close_request: bool,
}

impl<K, M, G> TicketEngine<K, M, G>
where
	K: Kvs,
	M: MetaStore,
	G: PlatformGateway,
{
	#[tracing::instrument(skip(self, ctx, caller, input), fields(guild_id = %guild_id, channel_id = %input.channel_id))]
	pub async fn close(&self, ctx: &OperationContext, guild_id: GuildId, caller: &GuildMember, input: CloseInput) -> Result<()> {
		let Some(ticket) = self.meta.get_ticket_by_channel(input.channel_id).await? else {
			return Err(UserError::NotATicketChannel.into());
		};
		if !ticket.open {
			return Ok(());
		}

		let settings = self.meta.get_settings(guild_id).await?;
		let level = self.permission.level(guild_id, caller).await?;
		let is_opener = ticket.user_id == ctx.caller_id;
		let can_close = level.at_least(PermissionLevel::Support) || (settings.users_can_close && is_opener);
		if !can_close {
			return Err(UserError::NoPermission.into());
		}

		self.close_internal(guild_id, &ticket, ctx.caller_id, input.reason).await
	}

	/// System-initiated close used by timer pipelines and lifecycle listeners
	/// (§4.8 step 3, §4.10): these run with a synthetic initiator rather than
	/// a caller's own permission grant, so the opener/support gate in
	/// [`close`](Self::close) does not apply.
	#[tracing::instrument(skip(self), fields(guild_id = %guild_id, ticket_id = %ticket_id))]
	pub async fn force_close(&self, guild_id: GuildId, ticket_id: TicketId, closed_by: UserId, reason: Option<String>) -> Result<()> {
		let Some(ticket) = self.meta.get_ticket(guild_id, ticket_id).await? else {
			return Ok(());
		};
		if !ticket.open {
			return Ok(());
		}
		self.close_internal(guild_id, &ticket, closed_by, reason).await
	}

	async fn close_internal(&self, guild_id: GuildId, ticket: &Ticket, closed_by: UserId, reason: Option<String>) -> Result<()> {
		self.meta.close_ticket(guild_id, ticket.ticket_id, closed_by, reason.clone()).await?;
		self.metrics.ticket_closed(guild_id.get(), reason.as_deref().unwrap_or("unspecified"));

		if let Some(channel_id) = ticket.channel_id {
			if ticket.is_thread {
				self.gateway.archive_thread(channel_id).await?;
			} else {
				self.gateway.delete_channel(channel_id).await?;
			}
		}

		self.meta.delete_close_request(guild_id, ticket.ticket_id).await?;

		Ok(())
	}

	/// §4.8: permission-gated to the opener; allocates a new ticket row and
	/// runs the open flow again with the original panel, reusing no
	/// channel/thread.
	#[tracing::instrument(skip(self, ctx), fields(guild_id = %guild_id, ticket_id = %ticket_id))]
	pub async fn reopen(&self, ctx: &OperationContext, guild_id: GuildId, ticket_id: TicketId, request: OpenRequest) -> Result<Ticket> {
		let Some(ticket) = self.meta.get_ticket(guild_id, ticket_id).await? else {
			return Err(UserError::NotATicketChannel.into());
		};
		if ticket.user_id != ctx.caller_id {
			return Err(UserError::NoPermission.into());
		}
		if ticket.open {
			return Err(EngineError::programmer("reopen called on a still-open ticket"));
		}

		let reopened = self.open(ctx, guild_id, request).await?;
		self.metrics.ticket_reopened(guild_id.get());
		Ok(reopened)
	}

	/// §4.7 "Claim/unclaim": permission-gated to Support. The caller
	/// (transport) is responsible for trimming the claim button from the
	/// welcome message's first action row before calling `edit` when the
	/// claim originated from that button.
	#[tracing::instrument(skip(self, caller), fields(guild_id = %guild_id, ticket_id = %ticket_id))]
	pub async fn claim(&self, guild_id: GuildId, ticket_id: TicketId, caller: &GuildMember) -> Result<()> {
		let level = self.permission.level(guild_id, caller).await?;
		if !level.at_least(PermissionLevel::Support) {
			return Err(UserError::NoPermission.into());
		}
		self.meta.set_claimed_by(guild_id, ticket_id, Some(caller.user_id)).await?;
		self.metrics.ticket_claimed(guild_id.get());
		Ok(())
	}

	/// Unclaim re-widens the permission overwrites back to the full support
	/// roster; channel-mode only (threads have no per-member overwrite set
	/// to narrow in the first place).
	#[tracing::instrument(skip(self, caller), fields(guild_id = %guild_id, ticket_id = %ticket_id))]
	pub async fn unclaim(&self, guild_id: GuildId, ticket_id: TicketId, caller: &GuildMember) -> Result<()> {
		let level = self.permission.level(guild_id, caller).await?;
		if !level.at_least(PermissionLevel::Support) {
			return Err(UserError::NoPermission.into());
		}
		let Some(ticket) = self.meta.get_ticket(guild_id, ticket_id).await? else {
			return Err(UserError::NotATicketChannel.into());
		};
		self.meta.set_claimed_by(guild_id, ticket_id, None).await?;

		if !ticket.is_thread {
			if let Some(channel_id) = ticket.channel_id {
				let bot_permissions = self.gateway.bot_permissions(guild_id).await?;
				let overwrites = super::overwrites::build(&super::overwrites::OverwriteInputs {
					guild_id,
					opener: ticket.user_id,
					co_openers: &[],
					support_users: &[],
					support_roles: &[],
					panel_support_roles: &[],
					bot_user: self.config.bot_user_id,
					integration_role: None,
					bot_can_manage_webhooks: bot_permissions.manage_webhooks,
				});
				self.gateway.set_permissions(channel_id, &overwrites).await?;
			}
		}

		Ok(())
	}
}

/// Timer-pipeline synthetic close callers (§4.8 step 3): a fresh context
/// identifying the initiator rather than reusing any interaction's context.
#[must_use]
pub fn autoclose_reason() -> &'static str {
	"inactivity timeout"
}

#[must_use]
pub fn member_left_reason() -> &'static str {
	"member left"
}

#[must_use]
pub fn thread_archived_reason() -> &'static str {
	"thread archived"
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn close_reasons_are_distinct() {
		assert_ne!(autoclose_reason(), member_left_reason());
		assert_ne!(member_left_reason(), thread_archived_reason());
	}
}
