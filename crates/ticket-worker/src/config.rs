//! Process configuration (§6 "Process env", SPEC_FULL §11), grounded on
//! `task_queue::config::Config`'s `clap::Parser` + `env` idiom.

use std::net::SocketAddr;
use std::time::Duration;

use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerMode {
	/// Consumes gateway events and timer-pipeline messages off the bus.
	Gateway,
	/// Serves the interactions webhook and the `/healthz` route.
	Interactions,
}

#[derive(Parser, Clone, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Config {
	#[arg(long, env = "WORKER_MODE", value_enum)]
	pub worker_mode: WorkerMode,

	#[arg(long, env = "DATABASE_URL")]
	pub database_url: String,

	#[arg(long, env = "KVS_ADDRESS")]
	pub kvs_address: String,

	#[arg(long, env = "NATS_URL", default_value = "nats://localhost:4222")]
	pub nats_url: String,

	#[arg(long, env = "PLATFORM_BASE_URL")]
	pub platform_base_url: String,

	#[arg(long, env = "PLATFORM_BOT_TOKEN")]
	pub platform_bot_token: String,

	#[arg(long, env = "BOT_USER_ID")]
	pub bot_user_id: u64,

	#[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8080")]
	pub bind_addr: String,

	#[arg(long, env = "TIMER_PIPELINE_CONCURRENCY", default_value = "16")]
	pub timer_pipeline_concurrency: usize,

	#[arg(long, env = "LOG_LEVEL", default_value = "info")]
	pub log_level: String,

	/// §12: switches the `tracing_subscriber` formatter between pretty and
	/// `.json()`.
	#[arg(long, env = "LOG_JSON", default_value_t = false)]
	pub log_json: bool,

	/// §13: `/metrics` is only served when this is set.
	#[arg(long, env = "METRICS_ADDR")]
	pub metrics_addr: Option<SocketAddr>,

	/// §4.5 step 2 default for guilds with no `Settings` override.
	#[arg(long, env = "DEFAULT_TICKET_LIMIT", default_value = "5")]
	pub default_ticket_limit: u16,

	/// §3 invariant: staff get 50 regardless of guild settings.
	#[arg(long, env = "STAFF_TICKET_LIMIT", default_value = "50")]
	pub staff_ticket_limit: u16,

	/// §4.5 step 3 `take_token("open:"+guild_id, ...)` bucket capacity.
	#[arg(long, env = "OPEN_RATE_LIMIT_CAPACITY", default_value = "5")]
	pub open_rate_limit_capacity: u32,

	/// §4.5 step 3 bucket window, matching §8 scenario 3 (5 opens / 10s).
	#[arg(long, env = "OPEN_RATE_LIMIT_WINDOW_SECS", default_value = "10", value_parser = parse_duration)]
	pub open_rate_limit_window: Duration,

	/// §5 `ticket_open:<guild_id>` lease duration.
	#[arg(long, env = "LOCK_LEASE_SECS", default_value = "5", value_parser = parse_duration)]
	pub lock_lease: Duration,

	#[arg(long, env = "PERMISSION_CACHE_TTL_SECS", default_value = "300", value_parser = parse_duration)]
	pub permission_cache_ttl: Duration,

	/// §4.5 step 15 welcome-integration deadline.
	#[arg(long, env = "WELCOME_INTEGRATION_TIMEOUT_SECS", default_value = "5", value_parser = parse_duration)]
	pub welcome_integration_timeout: Duration,

	/// §4.4 step 6 default handler dispatch budget.
	#[arg(long, env = "COMPONENT_GATE_TIMEOUT_SECS", default_value = "2", value_parser = parse_duration)]
	pub component_gate_timeout: Duration,

	#[arg(
        long,
        env = "CLOSE_FLOW_TIMEOUT_SECS",
        default_value = "30",
        value_parser = parse_duration,
        help = "Upper bound on a single close flow (§5)"
    )]
	pub close_flow_timeout: Duration,

	/// Passed through opaquely to the out-of-scope archive uploader (§1);
	/// `ticket-core` only needs to know whether archiving is configured.
	#[arg(long, env = "ARCHIVE_SERVICE_URL")]
	pub archive_service_url: Option<String>,

	#[arg(long, env = "ARCHIVE_AES_KEY")]
	pub archive_aes_key: Option<String>,
}

fn parse_duration(s: &str) -> Result<Duration, std::num::ParseIntError> {
	s.parse::<u64>().map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_gateway_mode_from_args() {
		let args = [
			"ticket-worker",
			"--worker-mode",
			"gateway",
			"--database-url",
			"postgres://localhost/tickets",
			"--kvs-address",
			"redis://localhost",
			"--platform-base-url",
			"https://example.invalid",
			"--platform-bot-token",
			"test-token",
			"--bot-user-id",
			"1",
		];
		let config = Config::try_parse_from(args).unwrap();
		assert_eq!(config.worker_mode, WorkerMode::Gateway);
		assert_eq!(config.close_flow_timeout, Duration::from_secs(30));
		assert_eq!(config.staff_ticket_limit, 50);
		assert_eq!(config.open_rate_limit_capacity, 5);
		assert_eq!(config.open_rate_limit_window, Duration::from_secs(10));
		assert!(!config.log_json);
		assert!(config.metrics_addr.is_none());
	}
}
