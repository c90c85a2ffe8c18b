//! Ambient per-request state (§9's "the source's `Context` objects"),
//! modelled as an explicit record rather than a thread-local or a shared
//! background context — see §17's decision to never replicate the
//! original's "TODO: Propagate context" hack. Every background callee
//! (timer pipelines, lifecycle listeners) constructs its own fresh
//! [`OperationContext`] carrying the triggering event's ids.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use ticket_types::{ChannelId, GuildId, UserId};

/// Tagged variant over the sources an interaction can come from (§9: "a
/// tagged variant with a small shared surface"). A DM source carries no
/// `guild_id`; a guild source always does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionSource {
	Guild { guild_id: GuildId, channel_id: ChannelId },
	Dm { channel_id: ChannelId },
}

impl InteractionSource {
	#[must_use]
	pub const fn guild_id(self) -> Option<GuildId> {
		match self {
			Self::Guild { guild_id, .. } => Some(guild_id),
			Self::Dm { .. } => None,
		}
	}

	#[must_use]
	pub const fn channel_id(self) -> ChannelId {
		match self {
			Self::Guild { channel_id, .. } | Self::Dm { channel_id } => channel_id,
		}
	}
}

/// Centralizes the reply follow-up counter (§9, §17): every reply-like
/// helper decrements the same counter regardless of which handler or
/// background task holds the context, and concurrent interactions each get
/// their own instance since dispatch is fully parallel (§5).
#[derive(Debug)]
pub struct ReplyCounter {
	remaining: AtomicU32,
}

pub const MAX_FOLLOW_UPS: u32 = 5;

impl ReplyCounter {
	#[must_use]
	pub fn new() -> Self {
		Self { remaining: AtomicU32::new(MAX_FOLLOW_UPS) }
	}

	/// Consumes one follow-up slot. Returns `false` once the cap (5, §4.4)
	/// is exhausted; callers treat that as a structured error they may
	/// ignore (§9).
	pub fn try_consume(&self) -> bool {
		loop {
			let current = self.remaining.load(Ordering::Acquire);
			if current == 0 {
				return false;
			}
			if self.remaining.compare_exchange(current, current - 1, Ordering::AcqRel, Ordering::Acquire).is_ok() {
				return true;
			}
		}
	}
}

impl Default for ReplyCounter {
	fn default() -> Self {
		Self::new()
	}
}

/// Per-operation record carrying caller identity, the guild/channel ids in
/// play, the reply-follow-up counter, and a cancellation handle that
/// composes with whatever deadline the caller layers on top (§5, §9).
#[derive(Clone)]
pub struct OperationContext {
	pub request_id: Uuid,
	pub source: InteractionSource,
	pub caller_id: UserId,
	pub reply_counter: Arc<ReplyCounter>,
	pub cancellation: CancellationToken,
}

impl OperationContext {
	#[must_use]
	pub fn new(source: InteractionSource, caller_id: UserId, cancellation: CancellationToken) -> Self {
		Self { request_id: Uuid::new_v4(), source, caller_id, reply_counter: Arc::new(ReplyCounter::new()), cancellation }
	}

	/// Builds a context for a background-triggered operation (timer fire,
	/// lifecycle event). `caller_id` is the triggering entity — the bot's
	/// own id for autoclose, the requester for a close-request accept, the
	/// user who left for a member-leave autoclose (§4.8, §4.10, §17).
	#[must_use]
	pub fn background(guild_id: GuildId, channel_id: ChannelId, caller_id: UserId, budget: std::time::Duration) -> Self {
		Self::new(InteractionSource::Guild { guild_id, channel_id }, caller_id, CancellationToken::new()).with_timeout(budget)
	}

	#[must_use]
	fn with_timeout(self, budget: std::time::Duration) -> Self {
		let token = self.cancellation.clone();
		let child = token.child_token();
		tokio::spawn({
			let child = child.clone();
			async move {
				tokio::time::sleep(budget).await;
				child.cancel();
			}
		});
		Self { cancellation: child, ..self }
	}

	#[must_use]
	pub fn guild_id(&self) -> Option<GuildId> {
		self.source.guild_id()
	}

	#[must_use]
	pub fn is_cancelled(&self) -> bool {
		self.cancellation.is_cancelled()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn reply_counter_exhausts_after_five() {
		let counter = ReplyCounter::new();
		for _ in 0..5 {
			assert!(counter.try_consume());
		}
		assert!(!counter.try_consume());
	}

	#[tokio::test]
	async fn background_context_cancels_after_budget() {
		let ctx = OperationContext::background(GuildId::new(1), ChannelId::new(2), UserId::new(3), std::time::Duration::from_millis(20));
		assert!(!ctx.is_cancelled());
		tokio::time::sleep(std::time::Duration::from_millis(60)).await;
		assert!(ctx.is_cancelled());
	}
}
