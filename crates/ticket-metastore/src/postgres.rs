use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use ticket_types::{
	AccessControlAction, AccessControlRule, AutocloseRules, BlacklistEntry, ChannelId, CloseRequest, FormInput, GuildId, LastMessage, MessageId, Panel,
	PanelId, PanelState, PermissionGrant, PermissionLevel, RoleId, Settings, SubjectKind, Ticket, TicketId, TicketStatus, UserId, WebhookId,
};

use crate::error::Result;
use crate::models::{status_db_str, TicketRow};

/// Direct-sqlx Postgres implementation of [`crate::MetaStore`]. Grounded on
/// `nest::main`'s pool-then-migrate shape; queries are written out rather
/// than built through `db::some_sqlite`'s generic `Repository<E>` (see
/// DESIGN.md for why).
#[derive(Clone)]
pub struct PgMetaStore {
	pool: PgPool,
}

impl PgMetaStore {
	/// # Errors
	/// Returns [`crate::MetaStoreError::Sqlx`] if the pool cannot connect or
	/// migrations fail to apply.
	pub async fn connect(database_url: &str) -> Result<Self> {
		let pool = PgPoolOptions::new().max_connections(10).connect(database_url).await?;
		sqlx::migrate!("./migrations").run(&pool).await.map_err(sqlx::Error::from)?;
		Ok(Self { pool })
	}

	#[must_use]
	pub const fn pool(&self) -> &PgPool {
		&self.pool
	}
}

fn level_to_str(level: PermissionLevel) -> &'static str {
	match level {
		PermissionLevel::Everyone => "everyone",
		PermissionLevel::Support => "support",
		PermissionLevel::Admin => "admin",
	}
}

fn level_from_str(value: &str) -> PermissionLevel {
	match value {
		"admin" => PermissionLevel::Admin,
		"support" => PermissionLevel::Support,
		_ => PermissionLevel::Everyone,
	}
}

fn subject_kind_to_str(kind: SubjectKind) -> &'static str {
	match kind {
		SubjectKind::User => "user",
		SubjectKind::Role => "role",
	}
}

const TICKET_COLUMNS: &str = "guild_id, ticket_id, user_id, channel_id, is_thread, open, open_time, panel_id, welcome_message_id, \
	join_message_id, status, has_transcript, claimed_by, closed_by, close_reason, closed_at, first_response_at, \
	last_message_id, last_message_author_id, last_message_is_staff";

#[async_trait]
impl crate::MetaStore for PgMetaStore {
	async fn next_ticket_id(&self, guild_id: GuildId) -> Result<TicketId> {
		let mut tx = self.pool.begin().await?;
		let row = sqlx::query(
			"INSERT INTO ticket_sequences (guild_id, next_id) VALUES ($1, 2) \
			 ON CONFLICT (guild_id) DO UPDATE SET next_id = ticket_sequences.next_id + 1 \
			 RETURNING next_id",
		)
		.bind(guild_id.get() as i64)
		.fetch_one(&mut *tx)
		.await?;
		let next_id: i32 = row.try_get::<i32, _>("next_id")? - 1;
		tx.commit().await?;
		Ok(TicketId::new(next_id.max(1)))
	}

	async fn insert_ticket(&self, ticket: &Ticket) -> Result<()> {
		sqlx::query(
			"INSERT INTO tickets (guild_id, ticket_id, user_id, channel_id, is_thread, open, open_time, panel_id, status, has_transcript) \
			 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
		)
		.bind(ticket.guild_id.get() as i64)
		.bind(ticket.ticket_id.0)
		.bind(ticket.user_id.get() as i64)
		.bind(ticket.channel_id.map(|c| c.get() as i64))
		.bind(ticket.is_thread)
		.bind(ticket.open)
		.bind(ticket.open_time)
		.bind(ticket.panel_id.map(|p| p.get() as i64))
		.bind(status_db_str(ticket.status))
		.bind(ticket.has_transcript)
		.execute(&self.pool)
		.await?;
		Ok(())
	}

	async fn get_ticket(&self, guild_id: GuildId, ticket_id: TicketId) -> Result<Option<Ticket>> {
		let row = sqlx::query_as::<_, TicketRow>(&format!("SELECT {TICKET_COLUMNS} FROM tickets WHERE guild_id = $1 AND ticket_id = $2"))
			.bind(guild_id.get() as i64)
			.bind(ticket_id.0)
			.fetch_optional(&self.pool)
			.await?;
		Ok(row.map(TicketRow::into_domain))
	}

	async fn get_ticket_by_channel(&self, channel_id: ChannelId) -> Result<Option<Ticket>> {
		let row = sqlx::query_as::<_, TicketRow>(&format!("SELECT {TICKET_COLUMNS} FROM tickets WHERE channel_id = $1"))
			.bind(channel_id.get() as i64)
			.fetch_optional(&self.pool)
			.await?;
		Ok(row.map(TicketRow::into_domain))
	}

	async fn count_open_tickets(&self, guild_id: GuildId, user_id: UserId) -> Result<u32> {
		let row = sqlx::query("SELECT COUNT(*) AS n FROM tickets WHERE guild_id = $1 AND user_id = $2 AND open")
			.bind(guild_id.get() as i64)
			.bind(user_id.get() as i64)
			.fetch_one(&self.pool)
			.await?;
		let n: i64 = row.try_get("n")?;
		Ok(n.try_into().unwrap_or(u32::MAX))
	}

	async fn list_open_tickets_by_user(&self, guild_id: GuildId, user_id: UserId) -> Result<Vec<Ticket>> {
		let rows = sqlx::query_as::<_, TicketRow>(&format!("SELECT {TICKET_COLUMNS} FROM tickets WHERE guild_id = $1 AND user_id = $2 AND open"))
			.bind(guild_id.get() as i64)
			.bind(user_id.get() as i64)
			.fetch_all(&self.pool)
			.await?;
		Ok(rows.into_iter().map(TicketRow::into_domain).collect())
	}

	async fn set_ticket_channel(&self, guild_id: GuildId, ticket_id: TicketId, channel_id: ChannelId) -> Result<()> {
		sqlx::query("UPDATE tickets SET channel_id = $1 WHERE guild_id = $2 AND ticket_id = $3")
			.bind(channel_id.get() as i64)
			.bind(guild_id.get() as i64)
			.bind(ticket_id.0)
			.execute(&self.pool)
			.await?;
		Ok(())
	}

	async fn set_welcome_message(&self, guild_id: GuildId, ticket_id: TicketId, message_id: MessageId) -> Result<()> {
		sqlx::query("UPDATE tickets SET welcome_message_id = $1 WHERE guild_id = $2 AND ticket_id = $3")
			.bind(message_id.get() as i64)
			.bind(guild_id.get() as i64)
			.bind(ticket_id.0)
			.execute(&self.pool)
			.await?;
		Ok(())
	}

	async fn set_join_message(&self, guild_id: GuildId, ticket_id: TicketId, message_id: MessageId) -> Result<()> {
		sqlx::query("UPDATE tickets SET join_message_id = $1 WHERE guild_id = $2 AND ticket_id = $3")
			.bind(message_id.get() as i64)
			.bind(guild_id.get() as i64)
			.bind(ticket_id.0)
			.execute(&self.pool)
			.await?;
		Ok(())
	}

	async fn set_claimed_by(&self, guild_id: GuildId, ticket_id: TicketId, claimed_by: Option<UserId>) -> Result<()> {
		sqlx::query("UPDATE tickets SET claimed_by = $1 WHERE guild_id = $2 AND ticket_id = $3")
			.bind(claimed_by.map(|u| u.get() as i64))
			.bind(guild_id.get() as i64)
			.bind(ticket_id.0)
			.execute(&self.pool)
			.await?;
		Ok(())
	}

	async fn set_ticket_status(&self, guild_id: GuildId, ticket_id: TicketId, status: TicketStatus) -> Result<()> {
		sqlx::query("UPDATE tickets SET status = $1 WHERE guild_id = $2 AND ticket_id = $3")
			.bind(status_db_str(status))
			.bind(guild_id.get() as i64)
			.bind(ticket_id.0)
			.execute(&self.pool)
			.await?;
		Ok(())
	}

	async fn update_last_message(&self, guild_id: GuildId, ticket_id: TicketId, last_message: LastMessage) -> Result<()> {
		sqlx::query("UPDATE tickets SET last_message_id = $1, last_message_author_id = $2, last_message_is_staff = $3 WHERE guild_id = $4 AND ticket_id = $5")
			.bind(last_message.message_id.get() as i64)
			.bind(last_message.author_id.get() as i64)
			.bind(last_message.is_staff)
			.bind(guild_id.get() as i64)
			.bind(ticket_id.0)
			.execute(&self.pool)
			.await?;
		Ok(())
	}

	async fn record_first_response(&self, guild_id: GuildId, ticket_id: TicketId, at: DateTime<Utc>) -> Result<()> {
		sqlx::query("UPDATE tickets SET first_response_at = $1 WHERE guild_id = $2 AND ticket_id = $3 AND first_response_at IS NULL")
			.bind(at)
			.bind(guild_id.get() as i64)
			.bind(ticket_id.0)
			.execute(&self.pool)
			.await?;
		Ok(())
	}

	async fn mark_has_transcript(&self, guild_id: GuildId, ticket_id: TicketId) -> Result<()> {
		sqlx::query("UPDATE tickets SET has_transcript = TRUE WHERE guild_id = $1 AND ticket_id = $2")
			.bind(guild_id.get() as i64)
			.bind(ticket_id.0)
			.execute(&self.pool)
			.await?;
		Ok(())
	}

	async fn close_ticket(&self, guild_id: GuildId, ticket_id: TicketId, closed_by: UserId, reason: Option<String>) -> Result<()> {
		sqlx::query(
			"UPDATE tickets SET open = FALSE, status = 'closed', closed_by = $1, close_reason = $2, closed_at = now() \
			 WHERE guild_id = $3 AND ticket_id = $4",
		)
		.bind(closed_by.get() as i64)
		.bind(reason)
		.bind(guild_id.get() as i64)
		.bind(ticket_id.0)
		.execute(&self.pool)
		.await?;
		Ok(())
	}

	async fn close_orphaned_ticket(&self, guild_id: GuildId, ticket_id: TicketId) -> Result<()> {
		sqlx::query("UPDATE tickets SET open = FALSE, status = 'closed', closed_at = now() WHERE guild_id = $1 AND ticket_id = $2")
			.bind(guild_id.get() as i64)
			.bind(ticket_id.0)
			.execute(&self.pool)
			.await?;
		Ok(())
	}

	async fn get_settings(&self, guild_id: GuildId) -> Result<Settings> {
		let row = sqlx::query(
			"SELECT use_threads, thread_archive_minutes, overflow_enabled, overflow_category_id, default_category_id, \
			 ticket_notification_channel, users_can_close, ticket_limit, autoclose_enabled, autoclose_inactivity_hours, \
			 autoclose_on_member_leave, autoclose_exclude_claimed FROM settings WHERE guild_id = $1",
		)
		.bind(guild_id.get() as i64)
		.fetch_optional(&self.pool)
		.await?;

		let Some(row) = row else {
			return Ok(Settings::defaults(guild_id));
		};

		Ok(Settings {
			guild_id,
			use_threads: row.try_get("use_threads")?,
			thread_archive_minutes: row.try_get::<i32, _>("thread_archive_minutes")?.try_into().unwrap_or(1440),
			overflow_enabled: row.try_get("overflow_enabled")?,
			overflow_category_id: row.try_get::<Option<i64>, _>("overflow_category_id")?.map(|v| ChannelId::new(v as u64)),
			default_category_id: row.try_get::<Option<i64>, _>("default_category_id")?.map(|v| ChannelId::new(v as u64)),
			ticket_notification_channel: row.try_get::<Option<i64>, _>("ticket_notification_channel")?.map(|v| ChannelId::new(v as u64)),
			users_can_close: row.try_get("users_can_close")?,
			ticket_limit: row.try_get::<Option<i16>, _>("ticket_limit")?.map(|v| v as u16),
			autoclose: AutocloseRules {
				enabled: row.try_get("autoclose_enabled")?,
				inactivity_hours: row.try_get::<i32, _>("autoclose_inactivity_hours")?.try_into().unwrap_or(24),
				on_member_leave: row.try_get("autoclose_on_member_leave")?,
				exclude_claimed: row.try_get("autoclose_exclude_claimed")?,
			},
		})
	}

	async fn upsert_settings(&self, settings: &Settings) -> Result<()> {
		sqlx::query(
			"INSERT INTO settings (guild_id, use_threads, thread_archive_minutes, overflow_enabled, overflow_category_id, \
			 default_category_id, ticket_notification_channel, users_can_close, ticket_limit, autoclose_enabled, \
			 autoclose_inactivity_hours, autoclose_on_member_leave, autoclose_exclude_claimed) \
			 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
			 ON CONFLICT (guild_id) DO UPDATE SET \
			   use_threads = EXCLUDED.use_threads, thread_archive_minutes = EXCLUDED.thread_archive_minutes, \
			   overflow_enabled = EXCLUDED.overflow_enabled, overflow_category_id = EXCLUDED.overflow_category_id, \
			   default_category_id = EXCLUDED.default_category_id, ticket_notification_channel = EXCLUDED.ticket_notification_channel, \
			   users_can_close = EXCLUDED.users_can_close, ticket_limit = EXCLUDED.ticket_limit, \
			   autoclose_enabled = EXCLUDED.autoclose_enabled, autoclose_inactivity_hours = EXCLUDED.autoclose_inactivity_hours, \
			   autoclose_on_member_leave = EXCLUDED.autoclose_on_member_leave, autoclose_exclude_claimed = EXCLUDED.autoclose_exclude_claimed",
		)
		.bind(settings.guild_id.get() as i64)
		.bind(settings.use_threads)
		.bind(settings.thread_archive_minutes as i32)
		.bind(settings.overflow_enabled)
		.bind(settings.overflow_category_id.map(|c| c.get() as i64))
		.bind(settings.default_category_id.map(|c| c.get() as i64))
		.bind(settings.ticket_notification_channel.map(|c| c.get() as i64))
		.bind(settings.users_can_close)
		.bind(settings.ticket_limit.map(|v| v as i16))
		.bind(settings.autoclose.enabled)
		.bind(settings.autoclose.inactivity_hours as i32)
		.bind(settings.autoclose.on_member_leave)
		.bind(settings.autoclose.exclude_claimed)
		.execute(&self.pool)
		.await?;
		Ok(())
	}

	async fn get_panel(&self, panel_id: PanelId) -> Result<Option<Panel>> {
		let row = sqlx::query(
			"SELECT guild_id, title, target_category, naming_scheme, forced_team, access_control, state, \
			 default_team_enabled, mention_roles, exit_survey_id, welcome_message FROM panels WHERE panel_id = $1",
		)
		.bind(panel_id.get() as i64)
		.fetch_optional(&self.pool)
		.await?;

		let Some(row) = row else { return Ok(None) };

		let access_control_json: serde_json::Value = row.try_get("access_control")?;
		let access_control: Vec<AccessControlRule> = serde_json::from_value::<Vec<(i64, bool)>>(access_control_json)?
			.into_iter()
			.map(|(role_id, allow)| AccessControlRule { role_id: RoleId::new(role_id as u64), action: if allow { AccessControlAction::Allow } else { AccessControlAction::Deny } })
			.collect();

		let mention_roles_json: serde_json::Value = row.try_get("mention_roles")?;
		let mention_roles: Vec<RoleId> = serde_json::from_value::<Vec<i64>>(mention_roles_json)?.into_iter().map(|v| RoleId::new(v as u64)).collect();

		let state: String = row.try_get("state")?;
		let state = match state.as_str() {
			"disabled" => PanelState::Disabled,
			"force_disabled" => PanelState::ForceDisabled,
			_ => PanelState::Enabled,
		};

		Ok(Some(Panel {
			panel_id,
			guild_id: GuildId::new(row.try_get::<i64, _>("guild_id")? as u64),
			title: row.try_get("title")?,
			target_category: row.try_get::<Option<i64>, _>("target_category")?.map(|v| ChannelId::new(v as u64)),
			naming_scheme: row.try_get("naming_scheme")?,
			forced_team: row.try_get::<Option<i64>, _>("forced_team")?.map(|v| RoleId::new(v as u64)),
			access_control,
			state,
			default_team_enabled: row.try_get("default_team_enabled")?,
			mention_roles,
			exit_survey_id: row.try_get::<Option<i64>, _>("exit_survey_id")?.map(|v| v as u64),
			welcome_message: row.try_get("welcome_message")?,
		}))
	}

	async fn get_form_inputs(&self, panel_id: PanelId) -> Result<Vec<FormInput>> {
		let rows = sqlx::query("SELECT custom_id, label, required, position FROM form_inputs WHERE panel_id = $1 ORDER BY position ASC")
			.bind(panel_id.get() as i64)
			.fetch_all(&self.pool)
			.await?;
		rows.into_iter()
			.map(|row| {
				Ok(FormInput {
					custom_id: row.try_get("custom_id")?,
					panel_id,
					label: row.try_get("label")?,
					required: row.try_get("required")?,
					position: row.try_get("position")?,
				})
			})
			.collect()
	}

	async fn get_user_grant(&self, guild_id: GuildId, user_id: UserId) -> Result<Option<PermissionGrant>> {
		let row = sqlx::query("SELECT level FROM permission_grants WHERE guild_id = $1 AND subject_id = $2 AND subject_kind = 'user'")
			.bind(guild_id.get() as i64)
			.bind(user_id.get() as i64)
			.fetch_optional(&self.pool)
			.await?;
		Ok(row.map(|r| PermissionGrant::for_user(guild_id, user_id, level_from_str(&r.try_get::<String, _>("level").unwrap_or_default()))))
	}

	async fn get_role_grants(&self, guild_id: GuildId, role_ids: &[RoleId]) -> Result<Vec<PermissionGrant>> {
		if role_ids.is_empty() {
			return Ok(Vec::new());
		}
		let ids: Vec<i64> = role_ids.iter().map(|r| r.get() as i64).collect();
		let rows = sqlx::query("SELECT subject_id, level FROM permission_grants WHERE guild_id = $1 AND subject_kind = 'role' AND subject_id = ANY($2)")
			.bind(guild_id.get() as i64)
			.bind(&ids)
			.fetch_all(&self.pool)
			.await?;
		rows.into_iter()
			.map(|row| {
				let subject_id: i64 = row.try_get("subject_id")?;
				let level: String = row.try_get("level")?;
				Ok(PermissionGrant::for_role(guild_id, RoleId::new(subject_id as u64), level_from_str(&level)))
			})
			.collect()
	}

	async fn upsert_grant(&self, grant: &PermissionGrant) -> Result<()> {
		sqlx::query(
			"INSERT INTO permission_grants (guild_id, subject_id, subject_kind, level) VALUES ($1, $2, $3, $4) \
			 ON CONFLICT (guild_id, subject_id, subject_kind) DO UPDATE SET level = EXCLUDED.level",
		)
		.bind(grant.guild_id.get() as i64)
		.bind(grant.subject_id as i64)
		.bind(subject_kind_to_str(grant.subject_kind))
		.bind(level_to_str(grant.level))
		.execute(&self.pool)
		.await?;
		Ok(())
	}

	async fn remove_grant(&self, guild_id: GuildId, subject_id: u64, subject_kind: SubjectKind) -> Result<()> {
		sqlx::query("DELETE FROM permission_grants WHERE guild_id = $1 AND subject_id = $2 AND subject_kind = $3")
			.bind(guild_id.get() as i64)
			.bind(subject_id as i64)
			.bind(subject_kind_to_str(subject_kind))
			.execute(&self.pool)
			.await?;
		Ok(())
	}

	async fn remove_role_grants(&self, guild_id: GuildId, role_id: RoleId) -> Result<()> {
		sqlx::query("DELETE FROM permission_grants WHERE guild_id = $1 AND subject_id = $2 AND subject_kind = 'role'")
			.bind(guild_id.get() as i64)
			.bind(role_id.get() as i64)
			.execute(&self.pool)
			.await?;
		Ok(())
	}

	async fn is_guild_blacklisted(&self, guild_id: GuildId) -> Result<bool> {
		let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM blacklist_entries WHERE guild_id = $1 AND subject_kind = 'guild') AS exists")
			.bind(guild_id.get() as i64)
			.fetch_one(&self.pool)
			.await?;
		Ok(row.try_get("exists")?)
	}

	async fn is_user_blacklisted(&self, guild_id: GuildId, user_id: UserId) -> Result<bool> {
		let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM blacklist_entries WHERE guild_id = $1 AND subject_kind = 'user' AND subject_id = $2) AS exists")
			.bind(guild_id.get() as i64)
			.bind(user_id.get() as i64)
			.fetch_one(&self.pool)
			.await?;
		Ok(row.try_get("exists")?)
	}

	async fn is_any_role_blacklisted(&self, guild_id: GuildId, role_ids: &[RoleId]) -> Result<bool> {
		if role_ids.is_empty() {
			return Ok(false);
		}
		let ids: Vec<i64> = role_ids.iter().map(|r| r.get() as i64).collect();
		let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM blacklist_entries WHERE guild_id = $1 AND subject_kind = 'role' AND subject_id = ANY($2)) AS exists")
			.bind(guild_id.get() as i64)
			.bind(&ids)
			.fetch_one(&self.pool)
			.await?;
		Ok(row.try_get("exists")?)
	}

	async fn add_blacklist_entry(&self, entry: BlacklistEntry) -> Result<()> {
		let (guild_id, subject_id, kind) = match entry {
			BlacklistEntry::GuildWide(g) => (g, None, "guild"),
			BlacklistEntry::User(g, u) => (g, Some(u.get() as i64), "user"),
			BlacklistEntry::Role(g, r) => (g, Some(r.get() as i64), "role"),
		};
		sqlx::query("INSERT INTO blacklist_entries (guild_id, subject_id, subject_kind) VALUES ($1, $2, $3) ON CONFLICT DO NOTHING")
			.bind(guild_id.get() as i64)
			.bind(subject_id)
			.bind(kind)
			.execute(&self.pool)
			.await?;
		Ok(())
	}

	async fn remove_blacklist_entry(&self, entry: BlacklistEntry) -> Result<()> {
		let (guild_id, subject_id, kind) = match entry {
			BlacklistEntry::GuildWide(g) => (g, None, "guild"),
			BlacklistEntry::User(g, u) => (g, Some(u.get() as i64), "user"),
			BlacklistEntry::Role(g, r) => (g, Some(r.get() as i64), "role"),
		};
		sqlx::query("DELETE FROM blacklist_entries WHERE guild_id = $1 AND subject_kind = $2 AND subject_id IS NOT DISTINCT FROM $3")
			.bind(guild_id.get() as i64)
			.bind(kind)
			.bind(subject_id)
			.execute(&self.pool)
			.await?;
		Ok(())
	}

	async fn get_close_request(&self, guild_id: GuildId, ticket_id: TicketId) -> Result<Option<CloseRequest>> {
		let row = sqlx::query("SELECT reason, created_at, close_at FROM close_requests WHERE guild_id = $1 AND ticket_id = $2")
			.bind(guild_id.get() as i64)
			.bind(ticket_id.0)
			.fetch_optional(&self.pool)
			.await?;
		Ok(row.map(|row| CloseRequest {
			guild_id,
			ticket_id,
			reason: row.try_get("reason").ok(),
			created_at: row.try_get("created_at").unwrap_or_else(|_| Utc::now()),
			close_at: row.try_get("close_at").ok(),
		}))
	}

	async fn upsert_close_request(&self, request: &CloseRequest) -> Result<()> {
		sqlx::query(
			"INSERT INTO close_requests (guild_id, ticket_id, reason, created_at, close_at) VALUES ($1, $2, $3, $4, $5) \
			 ON CONFLICT (guild_id, ticket_id) DO UPDATE SET reason = EXCLUDED.reason, created_at = EXCLUDED.created_at, close_at = EXCLUDED.close_at",
		)
		.bind(request.guild_id.get() as i64)
		.bind(request.ticket_id.0)
		.bind(&request.reason)
		.bind(request.created_at)
		.bind(request.close_at)
		.execute(&self.pool)
		.await?;
		Ok(())
	}

	async fn delete_close_request(&self, guild_id: GuildId, ticket_id: TicketId) -> Result<()> {
		sqlx::query("DELETE FROM close_requests WHERE guild_id = $1 AND ticket_id = $2")
			.bind(guild_id.get() as i64)
			.bind(ticket_id.0)
			.execute(&self.pool)
			.await?;
		Ok(())
	}

	async fn store_webhook(&self, guild_id: GuildId, ticket_id: TicketId, webhook_id: WebhookId, token: &str) -> Result<()> {
		sqlx::query(
			"INSERT INTO ticket_webhooks (guild_id, ticket_id, webhook_id, token) VALUES ($1, $2, $3, $4) \
			 ON CONFLICT (guild_id, ticket_id) DO UPDATE SET webhook_id = EXCLUDED.webhook_id, token = EXCLUDED.token",
		)
		.bind(guild_id.get() as i64)
		.bind(ticket_id.0)
		.bind(webhook_id.get() as i64)
		.bind(token)
		.execute(&self.pool)
		.await?;
		Ok(())
	}

	async fn get_webhook(&self, guild_id: GuildId, ticket_id: TicketId) -> Result<Option<(WebhookId, String)>> {
		let row = sqlx::query("SELECT webhook_id, token FROM ticket_webhooks WHERE guild_id = $1 AND ticket_id = $2")
			.bind(guild_id.get() as i64)
			.bind(ticket_id.0)
			.fetch_optional(&self.pool)
			.await?;
		Ok(match row {
			Some(row) => Some((WebhookId::new(row.try_get::<i64, _>("webhook_id")? as u64), row.try_get("token")?)),
			None => None,
		})
	}
}
