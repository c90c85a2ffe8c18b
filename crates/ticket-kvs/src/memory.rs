//! In-process `Kvs` backed by `DashMap`. Used by `ticket-core`'s unit tests
//! and by single-process development deployments. Grounded on
//! `ws_connection::core::manager::DashMapConnectionStore`.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::broadcast;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::error::{KvsError, Result};
use crate::lease::{LeaseBackend, MutexLease};
use crate::token_bucket::{self, BucketState};
use crate::Kvs;

struct Entry {
	value: Vec<u8>,
	expires_at: Option<Instant>,
}

struct LockEntry {
	fence_token: String,
	expires_at: Instant,
}

pub struct InMemoryKvs {
	values: DashMap<String, Entry>,
	buckets: DashMap<String, BucketState>,
	locks: Arc<DashMap<String, LockEntry>>,
	topics: DashMap<String, broadcast::Sender<Vec<u8>>>,
}

impl Default for InMemoryKvs {
	fn default() -> Self {
		Self::new()
	}
}

impl InMemoryKvs {
	#[must_use]
	pub fn new() -> Self {
		Self { values: DashMap::new(), buckets: DashMap::new(), locks: Arc::new(DashMap::new()), topics: DashMap::new() }
	}

	fn topic_sender(&self, topic: &str) -> broadcast::Sender<Vec<u8>> {
		self.topics.entry(topic.to_owned()).or_insert_with(|| broadcast::channel(256).0).clone()
	}
}

#[async_trait]
impl Kvs for InMemoryKvs {
	async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
		match self.values.get(key) {
			Some(entry) if entry.expires_at.map_or(true, |at| at > Instant::now()) => Ok(Some(entry.value.clone())),
			Some(_) => {
				self.values.remove(key);
				Ok(None)
			}
			None => Ok(None),
		}
	}

	async fn set(&self, key: &str, value: Vec<u8>, ttl: Option<Duration>) -> Result<()> {
		self.values.insert(key.to_owned(), Entry { value, expires_at: ttl.map(|d| Instant::now() + d) });
		Ok(())
	}

	async fn delete(&self, key: &str) -> Result<()> {
		self.values.remove(key);
		Ok(())
	}

	async fn take_token(&self, bucket: &str, capacity: u32, window: Duration) -> Result<bool> {
		let mut entry = self.buckets.entry(bucket.to_owned()).or_insert_with(|| BucketState::full(capacity));
		let (next, allowed) = token_bucket::take(*entry, capacity, window);
		*entry = next;
		Ok(allowed)
	}

	async fn mutex(self: Arc<Self>, key: &str, ttl: Duration, acquire_timeout: Duration) -> Result<MutexLease> {
		let deadline = Instant::now() + acquire_timeout;
		loop {
			let now = Instant::now();
			let acquired = match self.locks.get(key) {
				Some(existing) if existing.expires_at > now => false,
				_ => true,
			};
			if acquired {
				let lease = MutexLease::new(key, self.clone() as Arc<dyn LeaseBackend>);
				self.locks.insert(key.to_owned(), LockEntry { fence_token: lease.fence_token().to_owned(), expires_at: now + ttl });
				return Ok(lease);
			}
			if Instant::now() >= deadline {
				return Err(KvsError::AlreadyLocked { key: key.to_owned() });
			}
			tokio::time::sleep(Duration::from_millis(20)).await;
		}
	}

	async fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<()> {
		let _ = self.topic_sender(topic).send(payload);
		Ok(())
	}

	async fn subscribe(&self, topic: &str) -> Result<ReceiverStream<Vec<u8>>> {
		let mut rx = self.topic_sender(topic).subscribe();
		let (tx, out_rx) = mpsc::channel(256);
		tokio::spawn(async move {
			while let Ok(payload) = rx.recv().await {
				if tx.send(payload).await.is_err() {
					break;
				}
			}
		});
		Ok(ReceiverStream::new(out_rx))
	}
}

#[async_trait]
impl LeaseBackend for InMemoryKvs {
	async fn try_release(&self, key: &str, fence_token: &str) -> Result<bool> {
		match self.locks.get(key) {
			Some(existing) if existing.fence_token == fence_token => {
				drop(existing);
				self.locks.remove(key);
				Ok(true)
			}
			_ => Ok(false),
		}
	}
}

/// Test helper retained for parity with how other crates expose their fake
/// stores; not used outside `#[cfg(test)]` callers in `ticket-core`.
#[must_use]
pub fn new_shared() -> Arc<InMemoryKvs> {
	Arc::new(InMemoryKvs::new())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn get_set_delete_roundtrip() {
		let kvs = InMemoryKvs::new();
		assert!(kvs.get("a").await.unwrap().is_none());
		kvs.set("a", b"1".to_vec(), None).await.unwrap();
		assert_eq!(kvs.get("a").await.unwrap(), Some(b"1".to_vec()));
		kvs.delete("a").await.unwrap();
		assert!(kvs.get("a").await.unwrap().is_none());
	}

	#[tokio::test]
	async fn ttl_expires() {
		let kvs = InMemoryKvs::new();
		kvs.set("a", b"1".to_vec(), Some(Duration::from_millis(10))).await.unwrap();
		tokio::time::sleep(Duration::from_millis(30)).await;
		assert!(kvs.get("a").await.unwrap().is_none());
	}

	#[tokio::test]
	async fn mutex_excludes_second_acquirer() {
		let kvs = Arc::new(InMemoryKvs::new());
		let lease = kvs.clone().mutex("ticket_open:1", Duration::from_secs(5), Duration::from_millis(50)).await.unwrap();
		let err = kvs.clone().mutex("ticket_open:1", Duration::from_secs(5), Duration::from_millis(50)).await.unwrap_err();
		assert!(matches!(err, KvsError::AlreadyLocked { .. }));
		lease.release().await.unwrap();
		kvs.clone().mutex("ticket_open:1", Duration::from_secs(5), Duration::from_millis(50)).await.unwrap();
	}

	#[tokio::test]
	async fn publish_subscribe_delivers() {
		let kvs = InMemoryKvs::new();
		let mut stream = kvs.subscribe("topic").await.unwrap();
		kvs.publish("topic", b"hi".to_vec()).await.unwrap();
		use tokio_stream::StreamExt;
		let received = stream.next().await;
		assert_eq!(received, Some(b"hi".to_vec()));
	}
}
