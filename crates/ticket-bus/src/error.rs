use thiserror::Error;

#[derive(Error, Debug)]
pub enum BusError {
	#[error("serialization error: {0}")]
	Serialization(#[from] serde_json::Error),

	#[error("nats error: {0}")]
	Nats(String),

	#[error("publish failed: {0}")]
	PublishFailed(String),

	#[error("no such topic channel")]
	ChannelNotFound,
}

pub type Result<T> = std::result::Result<T, BusError>;
