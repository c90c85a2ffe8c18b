//! Ticket Engine (§4.5-§4.7): open, close, claim, unclaim, reopen. Owns the
//! KVS/MetaStore/PlatformGateway trio and the tunables the rest of §4.5-§4.7
//! reference as constants (ticket limits, the open-rate-limit bucket, the
//! `ticket_open:<guild_id>` lease duration).

pub mod close;
pub mod naming;
pub mod open;
pub mod overwrites;

pub use close::CloseInput;
pub use open::OpenRequest;

use std::sync::Arc;
use std::time::Duration;

use ticket_gateway::PlatformGateway;
use ticket_kvs::Kvs;
use ticket_metastore::MetaStore;
use ticket_types::UserId;

use crate::metrics::Metrics;
use crate::permission::PermissionResolver;

/// Tunables that SPEC_FULL.md §11 exposes as configuration rather than
/// hard-coded constants, grounded on `task_queue::config::Config`'s
/// flat-struct-of-durations shape.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
	pub bot_user_id: UserId,
	pub default_ticket_limit: u16,
	pub staff_ticket_limit: u16,
	pub open_rate_limit_capacity: u32,
	pub open_rate_limit_window: Duration,
	pub lock_lease: Duration,
	pub lock_acquire_timeout: Duration,
	pub welcome_integration_timeout: Duration,
	pub permission_cache_ttl: Duration,
}

impl EngineConfig {
	#[must_use]
	pub fn new(bot_user_id: UserId) -> Self {
		Self {
			bot_user_id,
			default_ticket_limit: 5,
			staff_ticket_limit: 50,
			open_rate_limit_capacity: 5,
			open_rate_limit_window: Duration::from_secs(10),
			lock_lease: Duration::from_secs(5),
			lock_acquire_timeout: Duration::from_secs(5),
			welcome_integration_timeout: Duration::from_secs(10),
			permission_cache_ttl: Duration::from_secs(300),
		}
	}
}

pub struct TicketEngine<K, M, G> {
	kvs: Arc<K>,
	meta: Arc<M>,
	gateway: Arc<G>,
	permission: Arc<PermissionResolver<K, M>>,
	config: EngineConfig,
	metrics: Metrics,
}

impl<K, M, G> TicketEngine<K, M, G>
where
	K: Kvs,
	M: MetaStore,
	G: PlatformGateway,
{
	#[must_use]
	pub fn new(kvs: Arc<K>, meta: Arc<M>, gateway: Arc<G>, config: EngineConfig) -> Self {
		let permission = Arc::new(PermissionResolver::new(kvs.clone(), meta.clone(), config.permission_cache_ttl));
		Self { kvs, meta, gateway, permission, config, metrics: Metrics::new() }
	}
}
