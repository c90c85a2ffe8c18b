//! Observability surface (§13), grounded on `file_host::metrics`'s
//! `register_*_vec!` + `TextEncoder` idiom: counters and gauges registered
//! against the process-global Prometheus registry, rendered by
//! `ticket-worker`'s `/metrics` route.

use once_cell::sync::Lazy;
use prometheus::{register_gauge_vec, register_int_counter_vec, GaugeVec, IntCounterVec};

static TICKETS_OPENED_TOTAL: Lazy<IntCounterVec> =
	Lazy::new(|| register_int_counter_vec!("tickets_opened_total", "Tickets opened", &["guild_id"]).expect("failed to register tickets_opened_total"));

static TICKETS_CLOSED_TOTAL: Lazy<IntCounterVec> =
	Lazy::new(|| register_int_counter_vec!("tickets_closed_total", "Tickets closed", &["guild_id", "reason"]).expect("failed to register tickets_closed_total"));

static TICKETS_REOPENED_TOTAL: Lazy<IntCounterVec> =
	Lazy::new(|| register_int_counter_vec!("tickets_reopened_total", "Tickets reopened", &["guild_id"]).expect("failed to register tickets_reopened_total"));

static TICKET_CLAIMS_TOTAL: Lazy<IntCounterVec> =
	Lazy::new(|| register_int_counter_vec!("ticket_claims_total", "Ticket claims", &["guild_id"]).expect("failed to register ticket_claims_total"));

static CAPACITY_LIMIT_HITS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
	register_int_counter_vec!("capacity_limit_hits_total", "Capacity limits hit while opening a ticket", &["guild_id", "kind"]).expect("failed to register capacity_limit_hits_total")
});

static RATE_LIMIT_DENIALS_TOTAL: Lazy<IntCounterVec> =
	Lazy::new(|| register_int_counter_vec!("rate_limit_denials_total", "Open requests denied by the rate limiter", &["guild_id"]).expect("failed to register rate_limit_denials_total"));

static AUTOCLOSE_FIRES_TOTAL: Lazy<IntCounterVec> =
	Lazy::new(|| register_int_counter_vec!("autoclose_fires_total", "Autoclose timer firings", &["guild_id"]).expect("failed to register autoclose_fires_total"));

static DISPATCHER_TIMEOUTS_TOTAL: Lazy<IntCounterVec> =
	Lazy::new(|| register_int_counter_vec!("dispatcher_timeouts_total", "Handler executions that hit their timeout", &["handler"]).expect("failed to register dispatcher_timeouts_total"));

static OPEN_TICKETS_GAUGE: Lazy<GaugeVec> =
	Lazy::new(|| register_gauge_vec!("open_tickets", "Currently open tickets per guild", &["guild_id"]).expect("failed to register open_tickets"));

/// Thin, `Clone`-able handle over the process-global registry. Cloning is
/// cheap (the underlying metrics are global `static`s); a handle exists so
/// call sites can depend on `Metrics` as ordinary injected state rather than
/// reaching for bare statics.
#[derive(Debug, Clone, Copy, Default)]
pub struct Metrics;

impl Metrics {
	#[must_use]
	pub const fn new() -> Self {
		Self
	}

	pub fn ticket_opened(self, guild_id: u64) {
		TICKETS_OPENED_TOTAL.with_label_values(&[&guild_id.to_string()]).inc();
	}

	pub fn ticket_closed(self, guild_id: u64, reason: &str) {
		TICKETS_CLOSED_TOTAL.with_label_values(&[&guild_id.to_string(), reason]).inc();
	}

	pub fn ticket_reopened(self, guild_id: u64) {
		TICKETS_REOPENED_TOTAL.with_label_values(&[&guild_id.to_string()]).inc();
	}

	pub fn ticket_claimed(self, guild_id: u64) {
		TICKET_CLAIMS_TOTAL.with_label_values(&[&guild_id.to_string()]).inc();
	}

	pub fn capacity_limit_hit(self, guild_id: u64, kind: &str) {
		CAPACITY_LIMIT_HITS_TOTAL.with_label_values(&[&guild_id.to_string(), kind]).inc();
	}

	pub fn rate_limit_denied(self, guild_id: u64) {
		RATE_LIMIT_DENIALS_TOTAL.with_label_values(&[&guild_id.to_string()]).inc();
	}

	pub fn autoclose_fired(self, guild_id: u64) {
		AUTOCLOSE_FIRES_TOTAL.with_label_values(&[&guild_id.to_string()]).inc();
	}

	pub fn dispatcher_timed_out(self, handler: &str) {
		DISPATCHER_TIMEOUTS_TOTAL.with_label_values(&[handler]).inc();
	}

	pub fn set_open_tickets(self, guild_id: u64, count: u32) {
		OPEN_TICKETS_GAUGE.with_label_values(&[&guild_id.to_string()]).set(f64::from(count));
	}
}

/// Renders the process-global registry in the Prometheus text exposition
/// format, for `ticket-worker`'s `/metrics` route.
///
/// # Errors
/// Returns an error string if the encoder fails to serialize the gathered
/// metric families.
pub fn render() -> Result<String, String> {
	use prometheus::Encoder;
	let encoder = prometheus::TextEncoder::new();
	let families = prometheus::gather();
	let mut buffer = Vec::new();
	encoder.encode(&families, &mut buffer).map_err(|err| err.to_string())?;
	String::from_utf8(buffer).map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn render_includes_registered_metric_names() {
		let metrics = Metrics::new();
		metrics.ticket_opened(1);
		metrics.ticket_closed(1, "inactivity timeout");

		let rendered = render().unwrap();
		assert!(rendered.contains("tickets_opened_total"));
		assert!(rendered.contains("tickets_closed_total"));
	}
}
