//! The KVS contracts of §4.1: token-bucket rate limiting, leased distributed
//! mutexes, a simple get/set/delete store, and pub/sub. Grounded on
//! `task_queue::redis_queue` (Redis client shape) and
//! `some_services::rate_limiter::token_bucket` (the bucket math, generalized
//! here to a remote, shared store instead of one process's atomics).

pub mod error;
pub mod lease;
pub mod memory;
pub mod redis_impl;
pub mod token_bucket;

pub use error::{KvsError, Result};
pub use lease::MutexLease;

use std::time::Duration;

use async_trait::async_trait;

/// Remote key/value store with TTL, atomic token-bucket decrement,
/// distributed mutex with lease, and pub/sub (§4.1).
#[async_trait]
pub trait Kvs: Send + Sync + 'static {
	async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

	async fn set(&self, key: &str, value: Vec<u8>, ttl: Option<Duration>) -> Result<()>;

	async fn delete(&self, key: &str) -> Result<()>;

	/// Returns `true` at most `capacity` times per `window`, per `bucket`.
	async fn take_token(&self, bucket: &str, capacity: u32, window: Duration) -> Result<bool>;

	/// Acquire a named lease. Blocks until acquired or `acquire_timeout`
	/// elapses.
	async fn mutex(self: std::sync::Arc<Self>, key: &str, ttl: Duration, acquire_timeout: Duration) -> Result<MutexLease>;

	async fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<()>;

	/// Subscribes to `topic`. The returned stream is at-least-once; callers
	/// must be idempotent on whatever id the payload carries (§4.1).
	async fn subscribe(&self, topic: &str) -> Result<tokio_stream::wrappers::ReceiverStream<Vec<u8>>>;
}
