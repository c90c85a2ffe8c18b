//! Redis-backed `Kvs` (§4.1). Grounded on `task_queue::redis_queue`'s use of
//! the `redis` crate, adapted from its sync `Connection` + `tokio::Mutex`
//! shape to `redis::aio::ConnectionManager`, which is already safe to clone
//! and share across tasks.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client, Script};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::error::{KvsError, Result};
use crate::lease::{LeaseBackend, MutexLease};
use crate::Kvs;

// Mirrors `token_bucket::take`'s refill arithmetic so a decrement and its
// refill happen as one atomic step on the Redis side, rather than racing two
// round trips from this process.
const TAKE_TOKEN_SCRIPT: &str = r"
local tokens_key = KEYS[1]
local capacity = tonumber(ARGV[1])
local window_ms = tonumber(ARGV[2])
local now = tonumber(ARGV[3])

local raw = redis.call('HMGET', tokens_key, 'tokens', 'last_refill_ms')
local tokens = tonumber(raw[1])
local last_refill_ms = tonumber(raw[2])
if tokens == nil then
  tokens = capacity
  last_refill_ms = now
end

local elapsed = now - last_refill_ms
if elapsed >= 10 then
  local refill_rate_per_ms = math.max(math.floor(capacity * 1000 / window_ms), 1)
  local to_add = math.floor((elapsed * refill_rate_per_ms) / 1000)
  if to_add > 0 then
    tokens = math.min(tokens + to_add, capacity)
    last_refill_ms = now
  end
end

local allowed = 0
if tokens > 0 then
  tokens = tokens - 1
  allowed = 1
end

redis.call('HSET', tokens_key, 'tokens', tokens, 'last_refill_ms', last_refill_ms)
redis.call('PEXPIRE', tokens_key, window_ms * 2)
return allowed
";

const RELEASE_LOCK_SCRIPT: &str = r"
if redis.call('GET', KEYS[1]) == ARGV[1] then
  return redis.call('DEL', KEYS[1])
else
  return 0
end
";

#[derive(Clone)]
pub struct RedisKvs {
	client: Client,
	manager: ConnectionManager,
}

impl RedisKvs {
	/// # Errors
	/// Returns [`KvsError::Redis`] if the initial connection cannot be
	/// established.
	pub async fn connect(redis_url: &str) -> Result<Self> {
		let client = Client::open(redis_url)?;
		let manager = client.get_connection_manager().await?;
		Ok(Self { client, manager })
	}
}

#[async_trait]
impl Kvs for RedisKvs {
	async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
		let mut conn = self.manager.clone();
		let value: Option<Vec<u8>> = conn.get(key).await?;
		Ok(value)
	}

	async fn set(&self, key: &str, value: Vec<u8>, ttl: Option<Duration>) -> Result<()> {
		let mut conn = self.manager.clone();
		match ttl {
			Some(ttl) => {
				let _: () = conn.set_ex(key, value, ttl.as_secs().max(1)).await?;
			}
			None => {
				let _: () = conn.set(key, value).await?;
			}
		}
		Ok(())
	}

	async fn delete(&self, key: &str) -> Result<()> {
		let mut conn = self.manager.clone();
		let _: () = conn.del(key).await?;
		Ok(())
	}

	async fn take_token(&self, bucket: &str, capacity: u32, window: Duration) -> Result<bool> {
		let mut conn = self.manager.clone();
		let now: u64 = current_time_millis();
		let window_ms: u64 = window.as_millis().try_into().unwrap_or(u64::MAX).max(1);
		let allowed: i64 = Script::new(TAKE_TOKEN_SCRIPT)
			.key(format!("bucket:{bucket}"))
			.arg(capacity)
			.arg(window_ms)
			.arg(now)
			.invoke_async(&mut conn)
			.await?;
		Ok(allowed == 1)
	}

	async fn mutex(self: Arc<Self>, key: &str, ttl: Duration, acquire_timeout: Duration) -> Result<MutexLease> {
		let lock_key = format!("lock:{key}");
		let deadline = tokio::time::Instant::now() + acquire_timeout;
		loop {
			let lease = MutexLease::new(key, self.clone() as Arc<dyn LeaseBackend>);
			let mut conn = self.manager.clone();
			let acquired: bool =
				conn.set_options(&lock_key, lease.fence_token(), redis::SetOptions::default().with_expiration(redis::SetExpiry::PX(ttl.as_millis().try_into().unwrap_or(i64::MAX as u64))).conditional_set(redis::ExistenceCheck::NX)).await?;
			if acquired {
				return Ok(lease);
			}
			if tokio::time::Instant::now() >= deadline {
				return Err(KvsError::AlreadyLocked { key: key.to_owned() });
			}
			tokio::time::sleep(Duration::from_millis(50)).await;
		}
	}

	async fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<()> {
		let mut conn = self.manager.clone();
		let _: () = conn.publish(topic, payload).await?;
		Ok(())
	}

	async fn subscribe(&self, topic: &str) -> Result<ReceiverStream<Vec<u8>>> {
		let mut pubsub = self.client.get_async_pubsub().await.map_err(KvsError::Redis)?;
		pubsub.subscribe(topic).await.map_err(KvsError::Redis)?;

		let (tx, rx) = mpsc::channel(256);
		tokio::spawn(async move {
			use futures::StreamExt;
			let mut stream = pubsub.on_message();
			while let Some(msg) = stream.next().await {
				let payload: Vec<u8> = match msg.get_payload() {
					Ok(p) => p,
					Err(err) => {
						tracing::warn!(error = %err, "dropping malformed pubsub payload");
						continue;
					}
				};
				if tx.send(payload).await.is_err() {
					break;
				}
			}
		});
		Ok(ReceiverStream::new(rx))
	}
}

#[async_trait]
impl LeaseBackend for RedisKvs {
	async fn try_release(&self, key: &str, fence_token: &str) -> Result<bool> {
		let mut conn = self.manager.clone();
		let lock_key = format!("lock:{key}");
		let deleted: i64 = Script::new(RELEASE_LOCK_SCRIPT).key(lock_key).arg(fence_token).invoke_async(&mut conn).await?;
		Ok(deleted == 1)
	}
}

fn current_time_millis() -> u64 {
	use std::time::{SystemTime, UNIX_EPOCH};
	SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis().try_into().unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
	use super::*;

	async fn flushed() -> RedisKvs {
		let kvs = RedisKvs::connect("redis://127.0.0.1/").await.expect("redis must be reachable for these tests");
		let mut conn = kvs.manager.clone();
		let _: () = redis::cmd("FLUSHDB").query_async(&mut conn).await.unwrap();
		kvs
	}

	#[tokio::test]
	async fn set_get_delete_roundtrip() {
		let kvs = flushed().await;
		assert!(kvs.get("ticket:1").await.unwrap().is_none());
		kvs.set("ticket:1", b"payload".to_vec(), None).await.unwrap();
		assert_eq!(kvs.get("ticket:1").await.unwrap(), Some(b"payload".to_vec()));
		kvs.delete("ticket:1").await.unwrap();
		assert!(kvs.get("ticket:1").await.unwrap().is_none());
	}

	#[tokio::test]
	async fn take_token_exhausts_capacity() {
		let kvs = flushed().await;
		for _ in 0..3 {
			assert!(kvs.take_token("open:1", 3, Duration::from_secs(10)).await.unwrap());
		}
		assert!(!kvs.take_token("open:1", 3, Duration::from_secs(10)).await.unwrap());
	}

	#[tokio::test]
	async fn mutex_is_exclusive_until_released() {
		let kvs = Arc::new(flushed().await);
		let lease = kvs.clone().mutex("ticket_open:7", Duration::from_secs(5), Duration::from_millis(50)).await.unwrap();
		let err = kvs.clone().mutex("ticket_open:7", Duration::from_secs(5), Duration::from_millis(50)).await.unwrap_err();
		assert!(matches!(err, KvsError::AlreadyLocked { .. }));
		lease.release().await.unwrap();
		kvs.clone().mutex("ticket_open:7", Duration::from_secs(5), Duration::from_millis(50)).await.unwrap();
	}
}
