//! Abstraction over the chat-platform REST surface (§2 "Platform Gateway",
//! §6 outbound responses). Grounded on `sdk::github::GitHubClient`'s
//! reqwest-client-plus-typed-request idiom, generalized to an `async_trait`
//! so `ticket-core` can swap in a fake for tests the way `ticket-kvs` and
//! `ticket-metastore` do.

pub mod error;
pub mod http;
pub mod types;

pub use error::{GatewayError, Result};
pub use http::HttpPlatformGateway;

use async_trait::async_trait;
use ticket_types::{ChannelId, GuildId, MessageId, RoleId, UserId, WebhookId};
use types::{BotPermissions, ChannelType, CreateChannelOptions, OutboundMessage, PermissionOverwrite};

#[derive(Debug, Clone)]
pub struct GuildMember {
	pub user_id: UserId,
	pub roles: Vec<RoleId>,
	pub administrator: bool,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct GuildChannel {
	pub channel_id: ChannelId,
	pub kind: ChannelType,
	pub parent_id: Option<ChannelId>,
	pub name: String,
}

#[async_trait]
pub trait PlatformGateway: Send + Sync + 'static {
	async fn create_channel(&self, guild_id: GuildId, options: CreateChannelOptions) -> Result<ChannelId>;
	async fn create_thread(&self, parent_channel_id: ChannelId, options: CreateChannelOptions) -> Result<ChannelId>;
	async fn delete_channel(&self, channel_id: ChannelId) -> Result<()>;
	async fn archive_thread(&self, channel_id: ChannelId) -> Result<()>;
	async fn add_thread_member(&self, channel_id: ChannelId, user_id: UserId) -> Result<()>;
	async fn set_permissions(&self, channel_id: ChannelId, overwrites: &[PermissionOverwrite]) -> Result<()>;

	async fn create_webhook(&self, channel_id: ChannelId, name: &str) -> Result<(WebhookId, String)>;

	async fn post_message(&self, channel_id: ChannelId, message: OutboundMessage) -> Result<MessageId>;
	async fn edit_message(&self, channel_id: ChannelId, message_id: MessageId, message: OutboundMessage) -> Result<()>;
	async fn delete_message(&self, channel_id: ChannelId, message_id: MessageId) -> Result<()>;

	async fn list_guild_channels(&self, guild_id: GuildId) -> Result<Vec<GuildChannel>>;
	async fn list_guild_roles(&self, guild_id: GuildId) -> Result<Vec<RoleId>>;
	async fn get_member(&self, guild_id: GuildId, user_id: UserId) -> Result<Option<GuildMember>>;
	async fn get_category_channel_count(&self, category_id: ChannelId) -> Result<u32>;
	async fn bot_permissions(&self, guild_id: GuildId) -> Result<BotPermissions>;
}
