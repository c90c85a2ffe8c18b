//! Gateway/timer consumer (`WORKER_MODE=gateway`, §6): runs the three timer
//! pipelines (§4.8) and the gateway-event fan-out (§4.10) concurrently,
//! grounded on `apps/orchestrator::main`'s transport-then-run-then-ctrl_c
//! shape, generalized from one NATS receiver to several long-lived tasks.
//!
//! Decoding a platform's raw gateway event wire format is out of scope
//! (§1); [`GatewayEvent`] is the thin, already-decoded shape this consumer
//! expects upstream transport code to have produced before publishing onto
//! [`ticket_bus::Topic::GatewayEvents`].

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use ticket_bus::{MessageBusExt, Topic};
use ticket_core::context::OperationContext;
use ticket_core::{LifecycleListener, MessageObserver, TimerPipeline};
use ticket_types::{ChannelId, GuildId, MessageId, RoleId, UserId};

use crate::Stack;

/// Already-decoded gateway events this consumer reacts to (§4.10, §4.9's
/// "for each inbound message"). The transport layer that speaks the
/// platform's actual wire protocol is responsible for producing these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GatewayEvent {
	ChannelDelete { channel_id: ChannelId },
	RoleDelete { guild_id: GuildId, role_id: RoleId },
	MemberLeave { guild_id: GuildId, user_id: UserId },
	MemberUpdate { guild_id: GuildId, user_id: UserId },
	ThreadUpdate { guild_id: GuildId, channel_id: ChannelId, archived: bool },
	ThreadMembersUpdate { channel_id: ChannelId, added_user_ids: Vec<UserId> },
	MessageCreate { channel_id: ChannelId, message_id: MessageId, author_id: UserId, author_is_bot: bool, content_preview: String },
}

pub async fn run(stack: Stack) -> anyhow::Result<()> {
	let bot_user_id = UserId::new(stack.config.bot_user_id);

	let autoclose = TimerPipeline::new(stack.engine.clone(), stack.kvs.clone(), stack.bus.clone(), Topic::Autoclose, bot_user_id)
		.with_concurrency(stack.config.timer_pipeline_concurrency);
	let close_request_timer = TimerPipeline::new(stack.engine.clone(), stack.kvs.clone(), stack.bus.clone(), Topic::CloseRequestTimer, bot_user_id)
		.with_concurrency(stack.config.timer_pipeline_concurrency);
	let close_relay = TimerPipeline::new(stack.engine.clone(), stack.kvs.clone(), stack.bus.clone(), Topic::CloseRelay, bot_user_id)
		.with_concurrency(stack.config.timer_pipeline_concurrency);

	let listener = Arc::new(LifecycleListener::new(stack.engine.clone(), stack.meta.clone(), stack.gateway.clone(), stack.permission.clone()));
	let observer = Arc::new(MessageObserver::new(stack.kvs.clone(), stack.meta.clone(), stack.bus.clone()));

	let gateway_events = run_gateway_events(stack.bus.clone(), listener, observer, bot_user_id);

	tokio::spawn(async move {
		if let Err(err) = tokio::signal::ctrl_c().await {
			tracing::error!(error = %err, "failed to listen for shutdown signal");
		} else {
			tracing::info!("received shutdown signal");
		}
	});

	tokio::select! {
		() = autoclose.run() => tracing::warn!("autoclose pipeline exited"),
		() = close_request_timer.run() => tracing::warn!("close-request-timer pipeline exited"),
		() = close_relay.run() => tracing::warn!("close-relay pipeline exited"),
		() = gateway_events => tracing::warn!("gateway-event consumer exited"),
	}

	Ok(())
}

async fn run_gateway_events(
	bus: Arc<dyn ticket_bus::MessageBus>,
	listener: Arc<LifecycleListener<ticket_kvs::redis_impl::RedisKvs, ticket_metastore::PgMetaStore, ticket_gateway::http::HttpPlatformGateway>>,
	observer: Arc<MessageObserver<ticket_kvs::redis_impl::RedisKvs, ticket_metastore::PgMetaStore>>,
	bot_user_id: UserId,
) {
	let mut rx = match bus.subscribe::<GatewayEvent>(Topic::GatewayEvents).await {
		Ok(rx) => rx,
		Err(err) => {
			tracing::error!(error = %err, "failed to subscribe to gateway events");
			return;
		}
	};

	while let Some(event) = rx.recv().await {
		let listener = listener.clone();
		let observer = observer.clone();
		tokio::spawn(async move {
			if let Err(err) = handle_event(&listener, &observer, event, bot_user_id).await {
				tracing::warn!(error = %err, "gateway event handling failed");
			}
		});
	}
}

async fn handle_event(
	listener: &LifecycleListener<ticket_kvs::redis_impl::RedisKvs, ticket_metastore::PgMetaStore, ticket_gateway::http::HttpPlatformGateway>,
	observer: &MessageObserver<ticket_kvs::redis_impl::RedisKvs, ticket_metastore::PgMetaStore>,
	event: GatewayEvent,
	bot_user_id: UserId,
) -> ticket_core::Result<()> {
	match event {
		GatewayEvent::ChannelDelete { channel_id } => listener.on_channel_delete(channel_id).await,
		GatewayEvent::RoleDelete { guild_id, role_id } => listener.on_role_delete(guild_id, role_id).await,
		GatewayEvent::MemberLeave { guild_id, user_id } => listener.on_member_leave(guild_id, user_id).await,
		GatewayEvent::MemberUpdate { guild_id, user_id } => listener.on_member_update(guild_id, user_id).await,
		GatewayEvent::ThreadUpdate { guild_id, channel_id, archived } => {
			let ctx = OperationContext::background(guild_id, channel_id, bot_user_id, std::time::Duration::from_secs(30));
			listener.on_thread_update(&ctx, channel_id, archived).await
		}
		GatewayEvent::ThreadMembersUpdate { channel_id, added_user_ids } => listener.on_thread_members_update(channel_id, &added_user_ids).await,
		GatewayEvent::MessageCreate { channel_id, message_id, author_id, author_is_bot, content_preview } => {
			observer.observe(ticket_core::observer::InboundMessage { channel_id, message_id, author_id, author_is_bot, content_preview }).await
		}
	}
}
