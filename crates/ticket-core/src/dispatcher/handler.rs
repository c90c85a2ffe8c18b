//! A `Handler` declaration (§4.4): matcher, gating properties, and the
//! `execute` body.

use std::time::Duration;

use async_trait::async_trait;
use ticket_types::PermissionLevel;

use crate::context::OperationContext;
use crate::dispatcher::matcher::Matcher;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
	Button,
	Select,
	Modal,
}

/// §4.4 `properties`.
#[derive(Debug, Clone, Copy)]
pub struct HandlerProperties {
	pub permission_level: PermissionLevel,
	pub guild_allowed: bool,
	pub dm_allowed: bool,
	/// Whether the dispatcher's transport may ACK this interaction with an
	/// "update original message" response instead of a deferred reply.
	pub can_edit: bool,
	pub timeout: Duration,
}

impl HandlerProperties {
	#[must_use]
	pub const fn new(permission_level: PermissionLevel) -> Self {
		Self { permission_level, guild_allowed: true, dm_allowed: false, can_edit: false, timeout: Duration::from_secs(10) }
	}

	#[must_use]
	pub const fn dm_allowed(mut self, allowed: bool) -> Self {
		self.dm_allowed = allowed;
		self
	}

	#[must_use]
	pub const fn guild_allowed(mut self, allowed: bool) -> Self {
		self.guild_allowed = allowed;
		self
	}

	#[must_use]
	pub const fn can_edit(mut self, can_edit: bool) -> Self {
		self.can_edit = can_edit;
		self
	}

	#[must_use]
	pub const fn timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}
}

#[async_trait]
pub trait Handler: Send + Sync + 'static {
	fn matcher(&self) -> &Matcher;
	fn properties(&self) -> HandlerProperties;
	/// The handler's body (§4.4 step 6). `custom_id` is the raw id that
	/// matched, so predicate-matched handlers can parse their parameters
	/// back out of it.
	async fn execute(&self, ctx: &OperationContext, custom_id: &str, kind: ComponentKind) -> crate::error::Result<()>;
}
