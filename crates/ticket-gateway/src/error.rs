use thiserror::Error;

/// §7 taxonomy as it applies to the platform REST boundary: a 404 is a user
/// error (the channel/thread/message is already gone), 429/5xx are
/// platform-transient and worth a bounded retry, anything else is
/// programmer error (malformed request this crate built).
#[derive(Error, Debug)]
pub enum GatewayError {
	#[error("the target resource no longer exists")]
	NotFound,

	#[error("permission denied by the platform")]
	Forbidden,

	#[error("platform rate limited the request, retry after {retry_after_ms}ms")]
	RateLimited { retry_after_ms: u64 },

	#[error("platform returned a transient error: {status}")]
	Transient { status: u16 },

	#[error("category at capacity")]
	CategoryFull,

	#[error("request error: {0}")]
	Request(#[from] reqwest::Error),

	#[error("serialization error: {0}")]
	Serialization(#[from] serde_json::Error),

	#[error("unexpected platform response: {0}")]
	Programmer(String),
}

pub type Result<T> = std::result::Result<T, GatewayError>;
