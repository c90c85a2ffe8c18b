//! Shapes the Platform Gateway trait speaks in. These are the CORE's own
//! vocabulary for "what a channel/message/overwrite looks like" — not a
//! verbatim mirror of the upstream REST schema, which belongs to the
//! transport this crate's `http` module talks to.

use serde::{Deserialize, Serialize};
use ticket_types::{ChannelId, RoleId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChannelType {
	Text,
	PrivateThread,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverwriteSubject {
	Role(RoleId),
	Member(UserId),
}

/// Standard ticket permissions: read/write/attach/embed, nothing more (§4.6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionBits {
	pub view_channel: bool,
	pub send_messages: bool,
	pub attach_files: bool,
	pub embed_links: bool,
	pub manage_webhooks: bool,
}

impl PermissionBits {
	#[must_use]
	pub const fn standard() -> Self {
		Self { view_channel: true, send_messages: true, attach_files: true, embed_links: true, manage_webhooks: false }
	}

	#[must_use]
	pub const fn deny_view() -> Self {
		Self { view_channel: false, send_messages: false, attach_files: false, embed_links: false, manage_webhooks: false }
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionOverwrite {
	pub subject: OverwriteSubject,
	pub allow: PermissionBits,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateChannelOptions {
	pub name: String,
	pub kind: ChannelType,
	pub parent_id: Option<ChannelId>,
	pub topic: Option<String>,
	pub overwrites: Vec<PermissionOverwrite>,
	pub archive_minutes: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Embed {
	pub title: Option<String>,
	pub description: Option<String>,
	pub fields: Vec<(String, String)>,
	pub color: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionRow {
	pub custom_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AllowedMentions {
	pub roles: Vec<RoleId>,
	pub users: Vec<UserId>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutboundMessage {
	pub content: Option<String>,
	pub embeds: Vec<Embed>,
	pub action_rows: Vec<ActionRow>,
	pub allowed_mentions: AllowedMentions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotPermissions {
	pub manage_webhooks: bool,
	pub administrator: bool,
}
