//! Ticket Engine — `open` (§4.5).

use chrono::Utc;
use ticket_gateway::types::{ActionRow, ChannelType, CreateChannelOptions, OutboundMessage};
use ticket_gateway::{GatewayError, GuildChannel, PlatformGateway};
use ticket_kvs::Kvs;
use ticket_metastore::MetaStore;
use ticket_types::{AccessControlAction, ChannelId, GuildId, MessageId, Panel, RoleId, Settings, Ticket, UserId};

use super::overwrites::{self, OverwriteInputs};
use super::TicketEngine;
use crate::context::OperationContext;
use crate::error::{CapacityError, EngineError, Result, UserError};

const MAX_CATEGORY_CHANNELS: u32 = 50;
const SUBJECT_MAX_LEN: usize = 256;
const MENTION_MAX_LEN: usize = 2000;

/// §4.5 step 8: guild-wide real-channel ceiling (threads excluded).
const MAX_GUILD_CHANNELS: u32 = 500;
/// §4.5 step 8/13: one refetch per minute per guild, so a storm of opens
/// against a full category does not turn into a `list_guild_channels` storm.
const CHANNEL_REFETCH_CAPACITY: u32 = 1;
const CHANNEL_REFETCH_WINDOW: std::time::Duration = std::time::Duration::from_secs(60);
const GUILD_CHANNELS_CACHE_TTL: std::time::Duration = std::time::Duration::from_secs(300);

/// Everything the transport must resolve before calling `open`, because
/// resolving it requires REST-layer permission-bit computation this CORE
/// treats as the Platform Gateway's job (§1 "the chat-platform REST/HTTPS
/// transport" is out of scope) rather than re-deriving role/overwrite math.
pub struct OpenRequest {
	pub panel: Option<Panel>,
	pub subject_text: Option<String>,
	pub originating_channel_id: ChannelId,
	pub caller_username: String,
	pub caller_nickname: Option<String>,
	pub caller_roles: Vec<RoleId>,
	pub caller_is_staff: bool,
	pub caller_can_send_in_threads: bool,
}

impl<K, M, G> TicketEngine<K, M, G>
where
	K: Kvs,
	M: MetaStore,
	G: PlatformGateway,
{
	/// The `ticket_open:<guild_id>` lease (§5) is held only across the
	/// commit phase below — the ticket-limit/rate-limit/panel-access checks
	/// and the row insert — never across provisioning. Holding it through
	/// the channel/thread create, welcome message, mention and webhook calls
	/// would serialize every open in a guild behind the platform's own
	/// latency, which §5 does not require: those steps only need the row to
	/// already exist, not the lock.
	#[tracing::instrument(skip(self, ctx, request), fields(guild_id = %guild_id))]
	pub async fn open(&self, ctx: &OperationContext, guild_id: GuildId, request: OpenRequest) -> Result<Ticket> {
		let lease = self
			.kvs
			.clone()
			.mutex(&format!("ticket_open:{guild_id}"), self.config.lock_lease, self.config.lock_acquire_timeout)
			.await?;

		let commit = self.open_commit(guild_id, ctx.caller_id, &request).await;

		if let Err(err) = lease.release().await {
			tracing::warn!(error = %err, %guild_id, "failed to release ticket_open lease");
		}

		let (ticket, use_thread, parent_category, name, subject, notification_channel) = commit?;

		self.open_provision(guild_id, ctx.caller_id, request, ticket, use_thread, parent_category, name, subject, notification_channel).await
	}

	#[allow(clippy::type_complexity)]
	async fn open_commit(
		&self,
		guild_id: GuildId,
		caller_id: UserId,
		request: &OpenRequest,
	) -> Result<(Ticket, bool, Option<ChannelId>, String, String, Option<ChannelId>)> {
		let limit = if request.caller_is_staff { self.config.staff_ticket_limit } else { self.ticket_limit(guild_id).await? };
		let current = self.meta.count_open_tickets(guild_id, caller_id).await?;
		if current >= u32::from(limit) {
			self.metrics.capacity_limit_hit(guild_id.get(), "ticket_limit");
			return Err(UserError::TicketLimitReached { limit }.into());
		}

		if !self.kvs.take_token(&format!("open:{guild_id}"), self.config.open_rate_limit_capacity, self.config.open_rate_limit_window).await? {
			self.metrics.rate_limit_denied(guild_id.get());
			return Err(UserError::RateLimited.into());
		}

		if let Some(panel) = &request.panel {
			check_panel_access(panel, &request.caller_roles, guild_id)?;
		}

		let settings = self.meta.get_settings(guild_id).await?;
		let use_thread = settings.use_threads;

		if use_thread && !request.caller_can_send_in_threads {
			return Err(UserError::MissingThreadPermission.into());
		}

		let parent_category = resolve_parent_category(request.panel.as_ref(), &settings);

		if !use_thread {
			self.enforce_channel_capacity(guild_id, &settings, parent_category).await?;
		}

		let subject = resolve_subject(request.panel.as_ref(), request.subject_text.as_deref());

		let ticket_id = self.meta.next_ticket_id(guild_id).await?;
		let ticket = Ticket::new_pending(guild_id, ticket_id, caller_id, request.panel.as_ref().map(|p| p.panel_id), use_thread, Utc::now());
		self.meta.insert_ticket(&ticket).await?;

		let name = super::naming::render(
			request.panel.as_ref().and_then(|p| p.naming_scheme.as_deref()),
			&super::naming::NamingContext { ticket_id, username: &request.caller_username, nickname: request.caller_nickname.as_deref(), claimed: false },
		);

		Ok((ticket, use_thread, parent_category, name, subject, settings.ticket_notification_channel))
	}

	#[allow(clippy::too_many_arguments)]
	async fn open_provision(
		&self,
		guild_id: GuildId,
		caller_id: UserId,
		request: OpenRequest,
		mut ticket: Ticket,
		use_thread: bool,
		parent_category: Option<ChannelId>,
		name: String,
		subject: String,
		notification_channel: Option<ChannelId>,
	) -> Result<Ticket> {
		match self.provision(guild_id, &request, use_thread, parent_category, &name, &subject, caller_id).await {
			Ok(channel_id) => {
				self.meta.set_ticket_channel(guild_id, ticket.ticket_id, channel_id).await?;
				ticket.channel_id = Some(channel_id);
			}
			Err(err) => {
				self.meta.close_orphaned_ticket(guild_id, ticket.ticket_id).await?;
				return Err(err);
			}
		}

		let channel_id = ticket.channel_id.expect("just set above");

		match self.emit_welcome_message(channel_id, &subject).await {
			Ok(message_id) => {
				self.meta.set_welcome_message(guild_id, ticket.ticket_id, message_id).await?;
				ticket.welcome_message_id = Some(message_id);
			}
			Err(err) => tracing::warn!(error = %err, "welcome message failed, continuing per §4.5"),
		}

		self.emit_mention(channel_id, &request, caller_id).await;

		if !use_thread {
			if let Ok((webhook_id, token)) = self.gateway.create_webhook(channel_id, "ticket-transcript").await {
				self.meta.store_webhook(guild_id, ticket.ticket_id, webhook_id, &token).await?;
			}
		} else if let Some(notification_channel) = notification_channel {
			if let Ok(message_id) = self.post_join_notification(notification_channel, &ticket, &name).await {
				self.meta.set_join_message(guild_id, ticket.ticket_id, message_id).await?;
				ticket.join_message_id = Some(message_id);
			}
		}

		self.metrics.ticket_opened(guild_id.get());
		Ok(ticket)
	}

	async fn ticket_limit(&self, guild_id: GuildId) -> Result<u16> {
		let settings = self.meta.get_settings(guild_id).await?;
		Ok(settings.ticket_limit.unwrap_or(self.config.default_ticket_limit))
	}

	async fn enforce_channel_capacity(&self, guild_id: GuildId, settings: &Settings, parent_category: Option<ChannelId>) -> Result<()> {
		self.enforce_guild_channel_limit(guild_id, settings).await?;

		let Some(category_id) = parent_category else { return Ok(()) };

		let count = self.gateway.get_category_channel_count(category_id).await?;
		if count < MAX_CATEGORY_CHANNELS {
			return Ok(());
		}

		if settings.overflow_enabled {
			if let Some(overflow_id) = settings.overflow_category_id {
				let overflow_count = self.gateway.get_category_channel_count(overflow_id).await?;
				if overflow_count < MAX_CATEGORY_CHANNELS {
					return Ok(());
				}
				self.metrics.capacity_limit_hit(guild_id.get(), "overflow_category");
				return Err(CapacityError::OverflowCategoryFull.into());
			}
		}

		self.metrics.capacity_limit_hit(guild_id.get(), "category");
		Err(CapacityError::CategoryFull.into())
	}

	/// §4.5 step 8: guild-wide real-channel ceiling, threads excluded. One
	/// `channel_refetch` token per minute per guild gates how often a guild
	/// sitting at the ceiling actually goes back to the platform to refresh
	/// the cached channel list, rather than trusting a stale cache forever.
	async fn enforce_guild_channel_limit(&self, guild_id: GuildId, settings: &Settings) -> Result<()> {
		let channels = self.guild_channels(guild_id, false).await?;
		if count_real_channels(&channels) < MAX_GUILD_CHANNELS {
			return Ok(());
		}

		let refetched = self.kvs.take_token(&format!("channel_refetch:{guild_id}"), CHANNEL_REFETCH_CAPACITY, CHANNEL_REFETCH_WINDOW).await?;
		let channels = if refetched { self.guild_channels(guild_id, true).await? } else { channels };

		if count_real_channels(&channels) < MAX_GUILD_CHANNELS {
			return Ok(());
		}

		if settings.overflow_enabled && settings.overflow_category_id.is_some() {
			return Ok(());
		}

		self.metrics.capacity_limit_hit(guild_id.get(), "guild_channel_limit");
		Err(CapacityError::GuildChannelLimit.into())
	}

	/// Cached via the KVS under `guild_channels:<guild_id>` (§4.5 step 8/13)
	/// since `list_guild_channels` is a full-guild REST call. `force_refresh`
	/// bypasses the cache and writes the fresh result back.
	async fn guild_channels(&self, guild_id: GuildId, force_refresh: bool) -> Result<Vec<GuildChannel>> {
		let cache_key = format!("guild_channels:{guild_id}");

		if !force_refresh {
			if let Some(bytes) = self.kvs.get(&cache_key).await? {
				if let Ok(channels) = serde_json::from_slice::<Vec<GuildChannel>>(&bytes) {
					return Ok(channels);
				}
			}
		}

		let channels = self.gateway.list_guild_channels(guild_id).await?;
		if let Ok(bytes) = serde_json::to_vec(&channels) {
			self.kvs.set(&cache_key, bytes, Some(GUILD_CHANNELS_CACHE_TTL)).await?;
		}
		Ok(channels)
	}

	#[allow(clippy::too_many_arguments)]
	async fn provision(
		&self,
		guild_id: GuildId,
		request: &OpenRequest,
		use_thread: bool,
		parent_category: Option<ChannelId>,
		name: &str,
		subject: &str,
		caller_id: UserId,
	) -> Result<ChannelId> {
		if use_thread {
			let channel_id = self
				.gateway
				.create_thread(request.originating_channel_id, CreateChannelOptions {
					name: name.to_string(),
					kind: ChannelType::PrivateThread,
					parent_id: None,
					topic: Some(subject.to_string()),
					overwrites: Vec::new(),
					archive_minutes: Some(1440),
				})
				.await?;
			self.gateway.add_thread_member(channel_id, caller_id).await?;
			Ok(channel_id)
		} else {
			let bot_permissions = self.gateway.bot_permissions(guild_id).await?;
			let overwrite_inputs = OverwriteInputs {
				guild_id,
				opener: caller_id,
				co_openers: &[],
				support_users: &[],
				support_roles: &[],
				panel_support_roles: request.panel.as_ref().map_or(&[][..], |p| &p.mention_roles),
				bot_user: self.config.bot_user_id,
				integration_role: None,
				bot_can_manage_webhooks: bot_permissions.manage_webhooks,
			};
			let overwrites = overwrites::build(&overwrite_inputs);
			match self
				.gateway
				.create_channel(guild_id, CreateChannelOptions {
					name: name.to_string(),
					kind: ChannelType::Text,
					parent_id: parent_category,
					topic: Some(subject.to_string()),
					overwrites,
					archive_minutes: None,
				})
				.await
			{
				Ok(channel_id) => Ok(channel_id),
				// §4.5 step 13: on `CHANNEL_PARENT_MAX_CHANNELS` take the refetch
				// token and refresh the cache so the next open sees the true
				// count; this attempt is still a failure, no retry after commit.
				Err(err @ GatewayError::CategoryFull) => {
					if self.kvs.take_token(&format!("channel_refetch:{guild_id}"), CHANNEL_REFETCH_CAPACITY, CHANNEL_REFETCH_WINDOW).await.unwrap_or(false) {
						let _ = self.guild_channels(guild_id, true).await;
					}
					Err(err.into())
				}
				Err(err) => Err(err.into()),
			}
		}
	}

	async fn emit_welcome_message(&self, channel_id: ChannelId, subject: &str) -> Result<MessageId> {
		let message = OutboundMessage { content: Some(format!("Welcome! Subject: {subject}")), ..Default::default() };
		tokio::time::timeout(self.config.welcome_integration_timeout, self.gateway.post_message(channel_id, message))
			.await
			.map_err(|_| EngineError::Transient("welcome integration timed out".into()))?
			.map_err(Into::into)
	}

	async fn emit_mention(&self, channel_id: ChannelId, request: &OpenRequest, caller_id: UserId) {
		let mut content = String::new();
		if let Some(panel) = &request.panel {
			for role in &panel.mention_roles {
				content.push_str(&format!("<@&{}> ", role.get()));
			}
		}
		content.push_str(&format!("<@{}>", caller_id.get()));
		if content.chars().count() > MENTION_MAX_LEN {
			content = content.chars().take(MENTION_MAX_LEN).collect();
		}

		if let Ok(message_id) = self.gateway.post_message(channel_id, OutboundMessage { content: Some(content), ..Default::default() }).await {
			let _ = self.gateway.delete_message(channel_id, message_id).await;
		}
	}

	async fn post_join_notification(&self, notification_channel: ChannelId, ticket: &Ticket, name: &str) -> Result<MessageId> {
		let message = OutboundMessage {
			content: Some(format!("Join ticket {name} (#{})", ticket.ticket_id)),
			action_rows: vec![ActionRow { custom_ids: vec![format!("join-ticket-{}-{}", ticket.guild_id, ticket.ticket_id)] }],
			..Default::default()
		};
		self.gateway.post_message(notification_channel, message).await.map_err(Into::into)
	}
}

fn count_real_channels(channels: &[GuildChannel]) -> u32 {
	channels.iter().filter(|c| c.kind != ChannelType::PrivateThread).count() as u32
}

/// §4.5 step 4: ordered access-control list, first match wins; `@everyone`
/// stands in as the guild id.
fn check_panel_access(panel: &Panel, caller_roles: &[RoleId], guild_id: GuildId) -> Result<()> {
	if !panel.is_open_allowed() {
		return Err(UserError::PanelDisabled.into());
	}
	if panel.access_control.is_empty() {
		return Ok(());
	}

	let mut roles = caller_roles.to_vec();
	roles.push(RoleId::new(guild_id.get()));

	match panel.first_matching_rule(&roles).map(|rule| rule.action) {
		Some(AccessControlAction::Allow) => Ok(()),
		Some(AccessControlAction::Deny) | None => match panel.first_allow_role() {
			Some(role) => Err(UserError::AccessControlDenied { allowed_role: role.get() }.into()),
			None => Err(UserError::AccessControlDeniedNoRole.into()),
		},
	}
}

fn resolve_parent_category(panel: Option<&Panel>, settings: &Settings) -> Option<ChannelId> {
	panel.and_then(|p| p.target_category).or(settings.default_category_id)
}

fn resolve_subject(panel: Option<&Panel>, caller_text: Option<&str>) -> String {
	if let Some(title) = panel.and_then(|p| p.title.as_deref()) {
		return title.to_string();
	}
	if let Some(text) = caller_text {
		let trimmed: String = text.chars().take(SUBJECT_MAX_LEN).collect();
		if !trimmed.trim().is_empty() {
			return trimmed;
		}
	}
	"No subject given".to_string()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn panel(access_control: Vec<ticket_types::AccessControlRule>) -> Panel {
		Panel {
			panel_id: ticket_types::PanelId::new(1),
			guild_id: GuildId::new(1),
			title: Some("Support Request".into()),
			target_category: None,
			naming_scheme: None,
			forced_team: None,
			access_control,
			state: ticket_types::PanelState::Enabled,
			default_team_enabled: true,
			mention_roles: vec![],
			exit_survey_id: None,
			welcome_message: None,
		}
	}

	#[test]
	fn resolve_subject_prefers_panel_title() {
		assert_eq!(resolve_subject(Some(&panel(vec![])), Some("ignored")), "Support Request");
	}

	#[test]
	fn resolve_subject_falls_back_to_default() {
		assert_eq!(resolve_subject(None, None), "No subject given");
	}

	#[test]
	fn resolve_subject_truncates_caller_text() {
		let long = "x".repeat(300);
		let subject = resolve_subject(None, Some(&long));
		assert_eq!(subject.chars().count(), SUBJECT_MAX_LEN);
	}

	#[test]
	fn disabled_panel_is_rejected_before_access_control() {
		let mut p = panel(vec![]);
		p.state = ticket_types::PanelState::Disabled;
		let err = check_panel_access(&p, &[], GuildId::new(1)).unwrap_err();
		assert!(matches!(err, EngineError::User(UserError::PanelDisabled)));
	}

	#[test]
	fn allow_listed_role_passes() {
		let allowed = RoleId::new(42);
		let p = panel(vec![ticket_types::AccessControlRule { role_id: allowed, action: AccessControlAction::Allow }]);
		assert!(check_panel_access(&p, &[allowed], GuildId::new(1)).is_ok());
	}

	#[test]
	fn unmatched_role_is_denied_naming_the_allow_role() {
		let allowed = RoleId::new(42);
		let p = panel(vec![ticket_types::AccessControlRule { role_id: allowed, action: AccessControlAction::Allow }]);
		let err = check_panel_access(&p, &[RoleId::new(7)], GuildId::new(1)).unwrap_err();
		assert!(matches!(err, EngineError::User(UserError::AccessControlDenied { allowed_role: 42 })));
	}
}
