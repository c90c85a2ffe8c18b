use thiserror::Error;

/// Errors surfaced by the durable store (§3, §4 MetaStore). Grounded on
/// `nest::http::error::Error`'s `#[from] sqlx::Error` wiring, trimmed to
/// what a storage-only crate needs — HTTP status mapping belongs upstream in
/// `ticket-core::error`.
#[derive(Error, Debug)]
pub enum MetaStoreError {
	#[error("row not found")]
	NotFound,

	#[error("database error: {0}")]
	Sqlx(#[from] sqlx::Error),

	#[error("json (de)serialization error: {0}")]
	Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MetaStoreError>;
