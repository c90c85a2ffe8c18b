//! Interactions-webhook server (`WORKER_MODE=interactions`, §6): serves the
//! platform's interactions webhook plus `/healthz`, grounded on
//! `nest::http::serve::serve`'s `Router` + `ServiceBuilder` +
//! `AddExtensionLayer` + `TraceLayer` + `axum::serve` shape. `/metrics` is a
//! separate listener (see [`serve_metrics`]) bound to `metrics_addr` per
//! §13, since it is ambient observability independent of whether this
//! process is running in `interactions` or `gateway` mode.
//!
//! Decoding a platform's signed interaction payload is out of scope (§1);
//! [`interactions`] only acknowledges receipt and logs the raw body, mirroring
//! the same "thin decoded-upstream" boundary `consumer::GatewayEvent` draws
//! for gateway events.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::add_extension::AddExtensionLayer;
use tower_http::trace::TraceLayer;

use crate::Stack;

/// Carried via [`AddExtensionLayer`] for parity with `nest`'s server setup;
/// no route extracts it yet, since every handler below is self-contained.
#[derive(Clone)]
struct ApiContext {
	_stack: Arc<Stack>,
}

pub async fn serve(stack: Stack) -> anyhow::Result<()> {
	let bind_addr = stack.config.bind_addr.clone();
	let context = ApiContext { _stack: Arc::new(stack) };

	let app = Router::new()
		.route("/healthz", get(healthz))
		.route("/interactions", post(interactions))
		.layer(ServiceBuilder::new().layer(AddExtensionLayer::new(context)).layer(TraceLayer::new_for_http()));

	let listener = TcpListener::bind(&bind_addr).await?;
	tracing::info!(addr = %bind_addr, "interactions server listening");
	axum::serve(listener, app).await?;
	Ok(())
}

/// §13: mounted on `metrics_addr` only, independent of `WORKER_MODE`, so a
/// `gateway`-mode process also exposes scrape-able counters/gauges.
pub async fn serve_metrics(metrics_addr: SocketAddr) -> anyhow::Result<()> {
	let app = Router::new().route("/metrics", get(metrics));
	let listener = TcpListener::bind(metrics_addr).await?;
	tracing::info!(addr = %metrics_addr, "metrics listener listening");
	axum::serve(listener, app).await?;
	Ok(())
}

async fn healthz() -> impl IntoResponse {
	Json(serde_json::json!({ "status": "ok" }))
}

async fn metrics() -> impl IntoResponse {
	match ticket_core::metrics::render() {
		Ok(body) => (axum::http::StatusCode::OK, body),
		Err(err) => {
			tracing::error!(error = %err, "failed to render metrics");
			(axum::http::StatusCode::INTERNAL_SERVER_ERROR, String::new())
		}
	}
}

/// Acknowledges an interaction payload without decoding it (§1). A real
/// deployment's transport layer sits in front of this and translates the
/// platform's signed payload into the dispatcher calls `ticket-core` exposes.
async fn interactions(body: axum::body::Bytes) -> impl IntoResponse {
	tracing::debug!(bytes = body.len(), "received interaction payload");
	axum::http::StatusCode::ACCEPTED
}
