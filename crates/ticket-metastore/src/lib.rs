//! The durable relational store (§3, §4 table row "MetaStore"): tickets,
//! settings, panels, form inputs, permission grants, blacklist entries,
//! close requests, and per-ticket webhook credentials.
//!
//! Grounded on `nest`'s direct-sqlx usage (`nest::main`, `nest::http::error`)
//! rather than `db::some_sqlite`'s generic `Repository<E>` + dynamic query
//! builder: every query this crate needs is known up front and concrete, so
//! the generic machinery would only add indirection. See DESIGN.md.

pub mod error;
pub mod memory;
mod models;
pub mod postgres;

pub use error::{MetaStoreError, Result};
pub use memory::InMemoryMetaStore;
pub use postgres::PgMetaStore;

use async_trait::async_trait;
use ticket_types::{
	BlacklistEntry, ChannelId, CloseRequest, FormInput, GuildId, LastMessage, Panel, PanelId, PermissionGrant, RoleId, Settings, Ticket, TicketId,
	TicketStatus, UserId, WebhookId,
};

#[async_trait]
pub trait MetaStore: Send + Sync + 'static {
	/// Atomically allocates the next dense per-guild ticket id (§17: backed
	/// by a `ticket_sequences` row, `UPDATE ... RETURNING` in a transaction).
	async fn next_ticket_id(&self, guild_id: GuildId) -> Result<TicketId>;

	async fn insert_ticket(&self, ticket: &Ticket) -> Result<()>;
	async fn get_ticket(&self, guild_id: GuildId, ticket_id: TicketId) -> Result<Option<Ticket>>;
	async fn get_ticket_by_channel(&self, channel_id: ChannelId) -> Result<Option<Ticket>>;
	async fn count_open_tickets(&self, guild_id: GuildId, user_id: UserId) -> Result<u32>;
	/// Member-leave autoclose fan-out (§4.10): every still-open ticket a
	/// departing member opened in this guild.
	async fn list_open_tickets_by_user(&self, guild_id: GuildId, user_id: UserId) -> Result<Vec<Ticket>>;

	async fn set_ticket_channel(&self, guild_id: GuildId, ticket_id: TicketId, channel_id: ChannelId) -> Result<()>;
	async fn set_welcome_message(&self, guild_id: GuildId, ticket_id: TicketId, message_id: ticket_types::MessageId) -> Result<()>;
	async fn set_join_message(&self, guild_id: GuildId, ticket_id: TicketId, message_id: ticket_types::MessageId) -> Result<()>;
	async fn set_claimed_by(&self, guild_id: GuildId, ticket_id: TicketId, claimed_by: Option<UserId>) -> Result<()>;
	async fn set_ticket_status(&self, guild_id: GuildId, ticket_id: TicketId, status: TicketStatus) -> Result<()>;
	async fn update_last_message(&self, guild_id: GuildId, ticket_id: TicketId, last_message: LastMessage) -> Result<()>;
	/// `ON CONFLICT DO NOTHING` semantics (§4.9 step 5): only the first call
	/// for a ticket sticks.
	async fn record_first_response(&self, guild_id: GuildId, ticket_id: TicketId, at: chrono::DateTime<chrono::Utc>) -> Result<()>;
	async fn mark_has_transcript(&self, guild_id: GuildId, ticket_id: TicketId) -> Result<()>;
	async fn close_ticket(&self, guild_id: GuildId, ticket_id: TicketId, closed_by: UserId, reason: Option<String>) -> Result<()>;
	/// Marks the row closed without a channel ever having been provisioned
	/// (§3 "otherwise the ticket is closed promptly to avoid orphan
	/// records", §4.5 step 14).
	async fn close_orphaned_ticket(&self, guild_id: GuildId, ticket_id: TicketId) -> Result<()>;

	async fn get_settings(&self, guild_id: GuildId) -> Result<Settings>;
	async fn upsert_settings(&self, settings: &Settings) -> Result<()>;

	async fn get_panel(&self, panel_id: PanelId) -> Result<Option<Panel>>;
	async fn get_form_inputs(&self, panel_id: PanelId) -> Result<Vec<FormInput>>;

	async fn get_user_grant(&self, guild_id: GuildId, user_id: UserId) -> Result<Option<PermissionGrant>>;
	async fn get_role_grants(&self, guild_id: GuildId, role_ids: &[RoleId]) -> Result<Vec<PermissionGrant>>;
	async fn upsert_grant(&self, grant: &PermissionGrant) -> Result<()>;
	async fn remove_grant(&self, guild_id: GuildId, subject_id: u64, subject_kind: ticket_types::SubjectKind) -> Result<()>;
	/// Role-deletion side effect (§4.2, §4.10): drops the grant and any
	/// support-team membership tied to the role.
	async fn remove_role_grants(&self, guild_id: GuildId, role_id: RoleId) -> Result<()>;

	async fn is_guild_blacklisted(&self, guild_id: GuildId) -> Result<bool>;
	async fn is_user_blacklisted(&self, guild_id: GuildId, user_id: UserId) -> Result<bool>;
	async fn is_any_role_blacklisted(&self, guild_id: GuildId, role_ids: &[RoleId]) -> Result<bool>;
	async fn add_blacklist_entry(&self, entry: BlacklistEntry) -> Result<()>;
	async fn remove_blacklist_entry(&self, entry: BlacklistEntry) -> Result<()>;

	async fn get_close_request(&self, guild_id: GuildId, ticket_id: TicketId) -> Result<Option<CloseRequest>>;
	async fn upsert_close_request(&self, request: &CloseRequest) -> Result<()>;
	async fn delete_close_request(&self, guild_id: GuildId, ticket_id: TicketId) -> Result<()>;

	async fn store_webhook(&self, guild_id: GuildId, ticket_id: TicketId, webhook_id: WebhookId, token: &str) -> Result<()>;
	async fn get_webhook(&self, guild_id: GuildId, ticket_id: TicketId) -> Result<Option<(WebhookId, String)>>;
}
