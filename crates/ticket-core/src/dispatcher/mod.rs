//! Component Dispatcher (§4.4): matches an incoming interaction's custom-id
//! to a handler, applies gating, runs it with a bounded timeout, and reports
//! back whether the transport may use an "update original message" ACK.

pub mod handler;
pub mod matcher;
pub mod registry;

pub use handler::{ComponentKind, Handler, HandlerProperties};
pub use matcher::Matcher;
pub use registry::HandlerRegistry;

use std::sync::Arc;

use ticket_gateway::GuildMember;
use ticket_kvs::Kvs;
use ticket_metastore::MetaStore;
use ticket_types::RoleId;

use crate::blacklist::BlacklistGate;
use crate::context::{InteractionSource, OperationContext};
use crate::error::{Result, UserError};
use crate::permission::PermissionResolver;

/// An incoming interaction, already resolved to one unambiguous source by
/// the transport (§4.4 step 1: the transport is responsible for rejecting
/// payloads that assert both a guild and a DM origin, or neither, before
/// handing the dispatcher a well-formed [`InteractionSource`]).
pub struct Interaction {
	pub custom_id: String,
	pub kind: ComponentKind,
	pub source: InteractionSource,
	pub member: GuildMember,
}

pub enum DispatchOutcome {
	/// No handler matched; the caller's transport returns its own default
	/// response (§4.4 step 4).
	NoHandler,
	/// Gating rejected the interaction before `execute` ran.
	Rejected(UserError),
	/// The handler ran to completion (possibly with an error) within its
	/// timeout budget.
	Executed { can_edit: bool, result: Result<()> },
	/// The handler's `properties.timeout` elapsed (§4.4 "cancellation").
	TimedOut,
}

pub struct Dispatcher<K, M> {
	permission: Arc<PermissionResolver<K, M>>,
	blacklist: Arc<BlacklistGate<M>>,
	registry: Arc<HandlerRegistry>,
}

impl<K, M> Dispatcher<K, M>
where
	K: Kvs,
	M: MetaStore,
{
	#[must_use]
	pub fn new(permission: Arc<PermissionResolver<K, M>>, blacklist: Arc<BlacklistGate<M>>, registry: Arc<HandlerRegistry>) -> Self {
		Self { permission, blacklist, registry }
	}

	#[tracing::instrument(skip(self, interaction), fields(guild_id = tracing::field::Empty, user_id = %interaction.member.user_id))]
	pub async fn dispatch(&self, interaction: Interaction) -> DispatchOutcome {
		let Interaction { custom_id, kind, source, member } = interaction;

		if let Some(guild_id) = source.guild_id() {
			tracing::Span::current().record("guild_id", guild_id.get());

			match self.blacklist_check(guild_id, &member).await {
				Ok(true) => return DispatchOutcome::Rejected(UserError::Blacklisted),
				Ok(false) => {}
				Err(err) => {
					tracing::error!(error = %err, "blacklist check failed during dispatch");
					return DispatchOutcome::Rejected(UserError::NoPermission);
				}
			}
		}

		let Some(handler) = self.registry.find(&custom_id) else {
			return DispatchOutcome::NoHandler;
		};

		let properties = handler.properties();

		match source {
			InteractionSource::Guild { .. } if !properties.guild_allowed => {
				return DispatchOutcome::Rejected(UserError::NoPermission);
			}
			InteractionSource::Dm { .. } if !properties.dm_allowed => {
				return DispatchOutcome::Rejected(UserError::NoPermission);
			}
			_ => {}
		}

		if let Some(guild_id) = source.guild_id() {
			let level = match self.permission.level(guild_id, &member).await {
				Ok(level) => level,
				Err(err) => {
					tracing::error!(error = %err, "permission lookup failed during dispatch");
					return DispatchOutcome::Rejected(UserError::NoPermission);
				}
			};
			if !level.at_least(properties.permission_level) {
				return DispatchOutcome::Rejected(UserError::NoPermission);
			}
		}

		let ctx = OperationContext::new(source, member.user_id, tokio_util::sync::CancellationToken::new());
		let can_edit = properties.can_edit;

		let execution = handler.execute(&ctx, &custom_id, kind);
		tokio::select! {
			() = tokio::time::sleep(properties.timeout) => {
				ctx.cancellation.cancel();
				DispatchOutcome::TimedOut
			}
			result = execution => DispatchOutcome::Executed { can_edit, result },
		}
	}

	async fn blacklist_check(&self, guild_id: ticket_types::GuildId, member: &GuildMember) -> Result<bool> {
		let level = self.permission.level(guild_id, member).await?;
		let role_ids: Vec<RoleId> = member.roles.clone();
		Ok(self.blacklist.is_blacklisted(guild_id, member.user_id, &role_ids, level).await?)
	}
}
