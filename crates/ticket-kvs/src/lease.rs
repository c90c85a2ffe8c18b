//! Distributed mutex lease (§4.1, §4.5 step "acquire `ticket_open:<guild_id>`").
//!
//! Grounded on `ws_connection`'s `ConnectionHandle` (a small owned handle
//! wrapping a cheap-to-clone backend reference) and on SPEC_FULL.md §16's
//! supplemented behavior: release is idempotent and explicit, with a
//! best-effort `Drop` fallback layered underneath it rather than relied on.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::{KvsError, Result};

/// Backend hook a `Kvs` implementation provides so `MutexLease` stays
/// implementation-agnostic. `try_release` must be a compare-and-delete: it
/// only deletes the key if its value still equals `fence_token`, and reports
/// whether that comparison held.
#[async_trait]
pub trait LeaseBackend: Send + Sync + 'static {
	async fn try_release(&self, key: &str, fence_token: &str) -> Result<bool>;
}

/// An acquired lease on `key`. Holding one is the caller's proof it won the
/// mutex at acquisition time; it is not proof the lease is still held — the
/// backend TTL may have expired it already, which `release` surfaces as
/// [`KvsError::LockExpired`].
pub struct MutexLease {
	key: String,
	fence_token: String,
	backend: Arc<dyn LeaseBackend>,
	released: Arc<AtomicBool>,
}

impl MutexLease {
	pub(crate) fn new(key: impl Into<String>, backend: Arc<dyn LeaseBackend>) -> Self {
		Self {
			key: key.into(),
			fence_token: Uuid::new_v4().to_string(),
			backend,
			released: Arc::new(AtomicBool::new(false)),
		}
	}

	pub fn key(&self) -> &str {
		&self.key
	}

	pub(crate) fn fence_token(&self) -> &str {
		&self.fence_token
	}

	/// Releases the lease. Idempotent: a second call is a no-op `Ok(())`.
	/// Returns [`KvsError::LockExpired`] if the backend's compare-and-delete
	/// found a different (or absent) value, meaning some other holder has
	/// since acquired the same key — the caller must treat the guarded
	/// operation as possibly racing a concurrent one (§7).
	pub async fn release(&self) -> Result<()> {
		if self.released.swap(true, Ordering::SeqCst) {
			return Ok(());
		}
		if self.backend.try_release(&self.key, &self.fence_token).await? {
			Ok(())
		} else {
			Err(KvsError::LockExpired)
		}
	}
}

impl Drop for MutexLease {
	fn drop(&mut self) {
		if self.released.load(Ordering::SeqCst) {
			return;
		}
		let key = self.key.clone();
		let fence_token = self.fence_token.clone();
		let backend = self.backend.clone();
		let released = self.released.clone();
		tokio::spawn(async move {
			if released.swap(true, Ordering::SeqCst) {
				return;
			}
			if let Err(err) = backend.try_release(&key, &fence_token).await {
				tracing::warn!(key, error = %err, "best-effort lease release on drop failed");
			}
		});
	}
}
