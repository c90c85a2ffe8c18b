//! Reqwest-backed [`PlatformGateway`]. The wire format of the upstream REST
//! API is explicitly out of scope (§1): this talks to it as a thin JSON
//! envelope and leans on the retry/backoff shape, not a literal schema.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use ticket_types::{ChannelId, GuildId, MessageId, RoleId, UserId, WebhookId};

use crate::error::{GatewayError, Result};
use crate::types::{BotPermissions, ChannelType, CreateChannelOptions, OutboundMessage, PermissionOverwrite};
use crate::{GuildChannel, GuildMember, PlatformGateway};

const MAX_RETRIES: u32 = 3;

pub struct HttpPlatformGateway {
	client: Client,
	base_url: String,
}

impl HttpPlatformGateway {
	/// # Panics
	/// Panics if the underlying reqwest client cannot be built, mirroring
	/// `sdk::github::GitHubClient::new`.
	#[must_use]
	pub fn new(base_url: impl Into<String>, bot_token: &str) -> Self {
		let mut headers = reqwest::header::HeaderMap::new();
		let mut auth = reqwest::header::HeaderValue::from_str(&format!("Bot {bot_token}")).expect("bot token must be a valid header value");
		auth.set_sensitive(true);
		headers.insert(reqwest::header::AUTHORIZATION, auth);

		let client = Client::builder().timeout(Duration::from_secs(10)).default_headers(headers).build().expect("failed to build gateway http client");

		Self { client, base_url: base_url.into() }
	}

	fn url(&self, path: &str) -> String {
		format!("{}{}", self.base_url, path)
	}

	async fn request<T: DeserializeOwned>(&self, method: reqwest::Method, path: &str, body: Option<serde_json::Value>) -> Result<T> {
		let value = self.request_value(method, path, body).await?;
		serde_json::from_value(value).map_err(|err| GatewayError::Programmer(err.to_string()))
	}

	async fn request_value(&self, method: reqwest::Method, path: &str, body: Option<serde_json::Value>) -> Result<serde_json::Value> {
		let url = self.url(path);
		let mut attempt = 0;
		loop {
			attempt += 1;
			let mut builder = self.client.request(method.clone(), &url);
			if let Some(ref body) = body {
				builder = builder.json(body);
			}
			let response = builder.send().await?;
			let status = response.status();

			if status.is_success() {
				if status == StatusCode::NO_CONTENT {
					return Ok(json!(null));
				}
				return response.json().await.map_err(GatewayError::Request);
			}

			match status {
				StatusCode::NOT_FOUND => return Err(GatewayError::NotFound),
				StatusCode::FORBIDDEN | StatusCode::UNAUTHORIZED => return Err(GatewayError::Forbidden),
				StatusCode::TOO_MANY_REQUESTS => {
					let retry_after_ms = response
						.headers()
						.get("retry-after")
						.and_then(|v| v.to_str().ok())
						.and_then(|v| v.parse::<f64>().ok())
						.map_or(500, |secs| (secs * 1000.0) as u64);
					if attempt >= MAX_RETRIES {
						return Err(GatewayError::RateLimited { retry_after_ms });
					}
					tokio::time::sleep(Duration::from_millis(retry_after_ms)).await;
				}
				status if status.is_server_error() => {
					if attempt >= MAX_RETRIES {
						return Err(GatewayError::Transient { status: status.as_u16() });
					}
					tokio::time::sleep(Duration::from_millis(200 * u64::from(attempt))).await;
				}
				status if status.as_u16() == 530 => return Err(GatewayError::CategoryFull),
				_ => {
					let text = response.text().await.unwrap_or_default();
					return Err(GatewayError::Programmer(format!("{status}: {text}")));
				}
			}
		}
	}

	async fn request_unit(&self, method: reqwest::Method, path: &str, body: Option<serde_json::Value>) -> Result<()> {
		self.request_value(method, path, body).await.map(|_| ())
	}
}

fn overwrites_to_json(overwrites: &[PermissionOverwrite]) -> serde_json::Value {
	json!(overwrites.iter().map(|o| json!({ "subject": o.subject, "allow": o.allow })).collect::<Vec<_>>())
}

#[async_trait]
impl PlatformGateway for HttpPlatformGateway {
	async fn create_channel(&self, guild_id: GuildId, options: CreateChannelOptions) -> Result<ChannelId> {
		let body = json!({
			"name": options.name,
			"type": "text",
			"parent_id": options.parent_id,
			"topic": options.topic,
			"permission_overwrites": overwrites_to_json(&options.overwrites),
		});
		#[derive(serde::Deserialize)]
		struct Created {
			id: u64,
		}
		let created: Created = self.request(reqwest::Method::POST, &format!("/guilds/{}/channels", guild_id.get()), Some(body)).await?;
		Ok(ChannelId::new(created.id))
	}

	async fn create_thread(&self, parent_channel_id: ChannelId, options: CreateChannelOptions) -> Result<ChannelId> {
		let body = json!({
			"name": options.name,
			"type": "private_thread",
			"auto_archive_duration": options.archive_minutes,
		});
		#[derive(serde::Deserialize)]
		struct Created {
			id: u64,
		}
		let created: Created = self.request(reqwest::Method::POST, &format!("/channels/{}/threads", parent_channel_id.get()), Some(body)).await?;
		Ok(ChannelId::new(created.id))
	}

	async fn delete_channel(&self, channel_id: ChannelId) -> Result<()> {
		self.request_unit(reqwest::Method::DELETE, &format!("/channels/{}", channel_id.get()), None).await
	}

	async fn archive_thread(&self, channel_id: ChannelId) -> Result<()> {
		self.request_unit(reqwest::Method::PATCH, &format!("/channels/{}", channel_id.get()), Some(json!({ "archived": true }))).await
	}

	async fn add_thread_member(&self, channel_id: ChannelId, user_id: UserId) -> Result<()> {
		self.request_unit(reqwest::Method::PUT, &format!("/channels/{}/thread-members/{}", channel_id.get(), user_id.get()), None).await
	}

	async fn set_permissions(&self, channel_id: ChannelId, overwrites: &[PermissionOverwrite]) -> Result<()> {
		self.request_unit(
			reqwest::Method::PATCH,
			&format!("/channels/{}/permissions", channel_id.get()),
			Some(json!({ "overwrites": overwrites_to_json(overwrites) })),
		)
		.await
	}

	async fn create_webhook(&self, channel_id: ChannelId, name: &str) -> Result<(WebhookId, String)> {
		#[derive(serde::Deserialize)]
		struct Created {
			id: u64,
			token: String,
		}
		let created: Created = self.request(reqwest::Method::POST, &format!("/channels/{}/webhooks", channel_id.get()), Some(json!({ "name": name }))).await?;
		Ok((WebhookId::new(created.id), created.token))
	}

	async fn post_message(&self, channel_id: ChannelId, message: OutboundMessage) -> Result<MessageId> {
		#[derive(serde::Deserialize)]
		struct Created {
			id: u64,
		}
		let created: Created = self.request(reqwest::Method::POST, &format!("/channels/{}/messages", channel_id.get()), Some(serde_json::to_value(&message)?)).await?;
		Ok(MessageId::new(created.id))
	}

	async fn edit_message(&self, channel_id: ChannelId, message_id: MessageId, message: OutboundMessage) -> Result<()> {
		self
			.request_unit(reqwest::Method::PATCH, &format!("/channels/{}/messages/{}", channel_id.get(), message_id.get()), Some(serde_json::to_value(&message)?))
			.await
	}

	async fn delete_message(&self, channel_id: ChannelId, message_id: MessageId) -> Result<()> {
		self.request_unit(reqwest::Method::DELETE, &format!("/channels/{}/messages/{}", channel_id.get(), message_id.get()), None).await
	}

	async fn list_guild_channels(&self, guild_id: GuildId) -> Result<Vec<GuildChannel>> {
		#[derive(serde::Deserialize)]
		struct Raw {
			id: u64,
			name: String,
			#[serde(rename = "type")]
			kind: String,
			parent_id: Option<u64>,
		}
		let raw: Vec<Raw> = self.request(reqwest::Method::GET, &format!("/guilds/{}/channels", guild_id.get()), None).await?;
		Ok(raw
			.into_iter()
			.map(|r| GuildChannel {
				channel_id: ChannelId::new(r.id),
				kind: if r.kind == "private_thread" { ChannelType::PrivateThread } else { ChannelType::Text },
				parent_id: r.parent_id.map(ChannelId::new),
				name: r.name,
			})
			.collect())
	}

	async fn list_guild_roles(&self, guild_id: GuildId) -> Result<Vec<RoleId>> {
		#[derive(serde::Deserialize)]
		struct Raw {
			id: u64,
		}
		let raw: Vec<Raw> = self.request(reqwest::Method::GET, &format!("/guilds/{}/roles", guild_id.get()), None).await?;
		Ok(raw.into_iter().map(|r| RoleId::new(r.id)).collect())
	}

	async fn get_member(&self, guild_id: GuildId, user_id: UserId) -> Result<Option<GuildMember>> {
		#[derive(serde::Deserialize)]
		struct Raw {
			roles: Vec<u64>,
			administrator: bool,
		}
		match self.request::<Raw>(reqwest::Method::GET, &format!("/guilds/{}/members/{}", guild_id.get(), user_id.get()), None).await {
			Ok(raw) => Ok(Some(GuildMember { user_id, roles: raw.roles.into_iter().map(RoleId::new).collect(), administrator: raw.administrator })),
			Err(GatewayError::NotFound) => Ok(None),
			Err(err) => Err(err),
		}
	}

	async fn get_category_channel_count(&self, category_id: ChannelId) -> Result<u32> {
		#[derive(serde::Deserialize)]
		struct Raw {
			count: u32,
		}
		let raw: Raw = self.request(reqwest::Method::GET, &format!("/channels/{}/children-count", category_id.get()), None).await?;
		Ok(raw.count)
	}

	async fn bot_permissions(&self, guild_id: GuildId) -> Result<BotPermissions> {
		self.request(reqwest::Method::GET, &format!("/guilds/{}/bot-permissions", guild_id.get()), None).await
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::types::{OverwriteSubject, PermissionBits};

	#[test]
	fn overwrites_serialize_with_subject_and_allow() {
		let overwrites = vec![PermissionOverwrite { subject: OverwriteSubject::Role(RoleId::new(1)), allow: PermissionBits::standard() }];
		let value = overwrites_to_json(&overwrites);
		assert!(value.is_array());
		assert_eq!(value[0]["allow"]["view_channel"], true);
	}

	#[test]
	fn new_gateway_sets_bot_auth_header() {
		let gw = HttpPlatformGateway::new("https://platform.invalid/api", "secret-token");
		assert_eq!(gw.base_url, "https://platform.invalid/api");
	}
}
