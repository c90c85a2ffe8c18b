use thiserror::Error;

/// §4.1 KVS contract errors. `LockExpired` is load-bearing: callers must
/// treat the guarded operation as potentially-executed (§7).
#[derive(Error, Debug)]
pub enum KvsError {
	#[error("key not found")]
	NotFound,

	#[error("lock expired before release")]
	LockExpired,

	#[error("lock {key} already held")]
	AlreadyLocked { key: String },

	#[error("redis error: {0}")]
	Redis(#[from] redis::RedisError),

	#[error("serialization error: {0}")]
	Serialization(#[from] serde_json::Error),

	#[error("subscribe failed: {0}")]
	Subscribe(String),
}

pub type Result<T> = std::result::Result<T, KvsError>;
