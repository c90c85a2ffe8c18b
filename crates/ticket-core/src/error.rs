//! The error taxonomy of §7, wired the way `ws_connection::errors::ConnectionError`
//! and `task_queue::error::KnownError` are: named variants, `#[from]` for
//! every crate beneath this one.

use thiserror::Error;
use ticket_bus::BusError;
use ticket_gateway::GatewayError;
use ticket_kvs::KvsError;
use ticket_metastore::MetaStoreError;

/// Pre-formatted, already-localized-boundary message keys plus interpolation
/// args (§14). The translation catalog itself is out of scope (§1); the
/// dispatcher's transport adapter renders these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UserError {
	#[error("not a ticket channel")]
	NotATicketChannel,

	#[error("no permission")]
	NoPermission,

	#[error("you may only have {limit} tickets open at once")]
	TicketLimitReached { limit: u16 },

	#[error("you are opening tickets too quickly")]
	RateLimited,

	#[error("you are blacklisted from opening tickets")]
	Blacklisted,

	#[error("access denied, the following role is allowed: {allowed_role}")]
	AccessControlDenied { allowed_role: u64 },

	#[error("access denied")]
	AccessControlDeniedNoRole,

	#[error("this panel is currently disabled")]
	PanelDisabled,

	#[error("threads may only be opened from a standard text channel")]
	NotAThreadableChannel,

	#[error("you do not have permission to create threads here")]
	MissingThreadPermission,

	#[error("reply follow-up limit reached")]
	FollowUpLimitReached,
}

/// §7 "Capacity": guild or category channel limits, each a distinct
/// user-facing string (§4.5 step 8).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapacityError {
	#[error("this server has reached the maximum number of ticket channels")]
	GuildChannelLimit,

	#[error("the ticket category is full")]
	CategoryFull,

	#[error("the overflow category is also full")]
	OverflowCategoryFull,
}

#[derive(Error, Debug)]
pub enum EngineError {
	#[error("user error: {0}")]
	User(#[from] UserError),

	#[error("capacity error: {0}")]
	Capacity(#[from] CapacityError),

	#[error("platform transient error: {0}")]
	Transient(String),

	#[error("programmer error: {message}")]
	Programmer { message: String },

	#[error("lock expired")]
	LockExpired,

	#[error(transparent)]
	Kvs(KvsError),

	#[error(transparent)]
	MetaStore(#[from] MetaStoreError),

	#[error(transparent)]
	Gateway(#[from] GatewayError),

	#[error(transparent)]
	Bus(#[from] BusError),

	#[error("serialization error: {0}")]
	Serialization(#[from] serde_json::Error),
}

impl EngineError {
	#[must_use]
	pub fn programmer(message: impl Into<String>) -> Self {
		Self::Programmer { message: message.into() }
	}

	/// Whether this error should ever reach a `tracing::error!` call (§7,
	/// §12): user errors never do, even when wrapped from deeper down.
	#[must_use]
	pub const fn is_user_facing_only(&self) -> bool {
		matches!(self, Self::User(_) | Self::Capacity(_))
	}
}

/// `KvsError::LockExpired` gets its own top-level variant (§7 "Lock-expired"
/// is a distinguished category, not just another KVS failure); everything
/// else folds into `Kvs`.
impl From<KvsError> for EngineError {
	fn from(err: KvsError) -> Self {
		match err {
			KvsError::LockExpired => Self::LockExpired,
			other => Self::Kvs(other),
		}
	}
}

pub type Result<T> = std::result::Result<T, EngineError>;
