//! Process entry point (§6): assembles the live stack (Postgres, Redis,
//! NATS, the HTTP platform gateway) and, per `WORKER_MODE`, either serves the
//! interactions webhook or runs the gateway/timer consumer loop. Grounded on
//! `nest::main`'s pool-then-serve shape and `apps/orchestrator::main`'s
//! transport-then-run shape.

mod config;
mod consumer;
mod server;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser as _;
use config::{Config, WorkerMode};
use ticket_bus::{nats::NatsBus, MessageBus};
use ticket_core::{BlacklistGate, EngineConfig, PermissionResolver, TicketEngine};
use ticket_gateway::http::HttpPlatformGateway;
use ticket_kvs::redis_impl::RedisKvs;
use ticket_metastore::PgMetaStore;
use ticket_types::UserId;

pub struct Stack {
	pub engine: Arc<TicketEngine<RedisKvs, PgMetaStore, HttpPlatformGateway>>,
	pub kvs: Arc<RedisKvs>,
	pub meta: Arc<PgMetaStore>,
	pub gateway: Arc<HttpPlatformGateway>,
	pub bus: Arc<dyn MessageBus>,
	pub permission: Arc<PermissionResolver<RedisKvs, PgMetaStore>>,
	pub blacklist: Arc<BlacklistGate<PgMetaStore>>,
	pub config: Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	dotenv::dotenv().ok();
	let config = Config::parse();
	init_tracing(&config.log_level, config.log_json);

	tracing::info!(mode = ?config.worker_mode, "starting ticket-worker");

	let kvs = Arc::new(RedisKvs::connect(&config.kvs_address).await.context("failed to connect to KVS")?);
	let meta = Arc::new(PgMetaStore::connect(&config.database_url).await.context("failed to connect to MetaStore")?);
	let gateway = Arc::new(HttpPlatformGateway::new(config.platform_base_url.clone(), &config.platform_bot_token));
	let bus: Arc<dyn MessageBus> = Arc::new(NatsBus::connect(&config.nats_url).await.context("failed to connect to the message bus")?);

	let engine_config = EngineConfig {
		default_ticket_limit: config.default_ticket_limit,
		staff_ticket_limit: config.staff_ticket_limit,
		open_rate_limit_capacity: config.open_rate_limit_capacity,
		open_rate_limit_window: config.open_rate_limit_window,
		lock_lease: config.lock_lease,
		permission_cache_ttl: config.permission_cache_ttl,
		welcome_integration_timeout: config.welcome_integration_timeout,
		..EngineConfig::new(UserId::new(config.bot_user_id))
	};
	let engine = Arc::new(TicketEngine::new(kvs.clone(), meta.clone(), gateway.clone(), engine_config));
	let permission = Arc::new(PermissionResolver::new(kvs.clone(), meta.clone(), engine_config.permission_cache_ttl));
	let blacklist = Arc::new(BlacklistGate::new(meta.clone()));

	if let Some(metrics_addr) = config.metrics_addr {
		tokio::spawn(async move {
			if let Err(err) = server::serve_metrics(metrics_addr).await {
				tracing::error!(error = %err, "metrics listener failed");
			}
		});
	}

	let stack = Stack { engine, kvs, meta, gateway, bus, permission, blacklist, config: config.clone() };

	match config.worker_mode {
		WorkerMode::Gateway => consumer::run(stack).await,
		WorkerMode::Interactions => server::serve(stack).await,
	}
}

fn init_tracing(log_level: &str, log_json: bool) {
	use tracing_subscriber::{EnvFilter, FmtSubscriber};
	let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));
	let builder = FmtSubscriber::builder().with_env_filter(filter);
	if log_json {
		builder.json().init();
	} else {
		builder.init();
	}
}
