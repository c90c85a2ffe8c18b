//! In-memory fake behind the [`MetaStore`] trait (§15), grounded on
//! `ws_connection::core::manager::DashMapConnectionStore`'s pattern of a
//! `DashMap`-backed store standing in for a networked backend in tests.
//! `ticket-core`'s engine/dispatcher tests run against this instead of a
//! live Postgres instance.

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use ticket_types::{
	BlacklistEntry, ChannelId, CloseRequest, FormInput, GuildId, LastMessage, MessageId, Panel, PanelId, PermissionGrant, RoleId, Settings, SubjectKind, Ticket,
	TicketId, TicketKey, TicketStatus, UserId, WebhookId,
};

use crate::{MetaStore, MetaStoreError, Result};

#[derive(Default)]
pub struct InMemoryMetaStore {
	tickets: DashMap<TicketKey, Ticket>,
	sequences: DashMap<GuildId, AtomicI32>,
	settings: DashMap<GuildId, Settings>,
	panels: DashMap<PanelId, Panel>,
	form_inputs: DashMap<PanelId, Vec<FormInput>>,
	user_grants: DashMap<(GuildId, UserId), PermissionGrant>,
	role_grants: DashMap<(GuildId, RoleId), PermissionGrant>,
	blacklist_guild: DashMap<GuildId, ()>,
	blacklist_user: DashMap<(GuildId, UserId), ()>,
	blacklist_role: DashMap<(GuildId, RoleId), ()>,
	close_requests: DashMap<TicketKey, CloseRequest>,
	webhooks: DashMap<TicketKey, (WebhookId, String)>,
}

impl InMemoryMetaStore {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn new_shared() -> Arc<Self> {
		Arc::new(Self::new())
	}
}

#[async_trait]
impl MetaStore for InMemoryMetaStore {
	async fn next_ticket_id(&self, guild_id: GuildId) -> Result<TicketId> {
		let counter = self.sequences.entry(guild_id).or_insert_with(|| AtomicI32::new(0));
		let next = counter.fetch_add(1, Ordering::SeqCst) + 1;
		Ok(TicketId::new(next))
	}

	async fn insert_ticket(&self, ticket: &Ticket) -> Result<()> {
		self.tickets.insert(ticket.key(), ticket.clone());
		Ok(())
	}

	async fn get_ticket(&self, guild_id: GuildId, ticket_id: TicketId) -> Result<Option<Ticket>> {
		Ok(self.tickets.get(&TicketKey { guild_id, ticket_id }).map(|r| r.clone()))
	}

	async fn get_ticket_by_channel(&self, channel_id: ChannelId) -> Result<Option<Ticket>> {
		Ok(self.tickets.iter().find(|entry| entry.value().channel_id == Some(channel_id)).map(|entry| entry.value().clone()))
	}

	async fn count_open_tickets(&self, guild_id: GuildId, user_id: UserId) -> Result<u32> {
		Ok(self.tickets.iter().filter(|entry| entry.value().guild_id == guild_id && entry.value().user_id == user_id && entry.value().open).count() as u32)
	}

	async fn list_open_tickets_by_user(&self, guild_id: GuildId, user_id: UserId) -> Result<Vec<Ticket>> {
		Ok(self.tickets.iter().filter(|entry| entry.value().guild_id == guild_id && entry.value().user_id == user_id && entry.value().open).map(|entry| entry.value().clone()).collect())
	}

	async fn set_ticket_channel(&self, guild_id: GuildId, ticket_id: TicketId, channel_id: ChannelId) -> Result<()> {
		self.with_ticket_mut(guild_id, ticket_id, |t| t.channel_id = Some(channel_id))
	}

	async fn set_welcome_message(&self, guild_id: GuildId, ticket_id: TicketId, message_id: MessageId) -> Result<()> {
		self.with_ticket_mut(guild_id, ticket_id, |t| t.welcome_message_id = Some(message_id))
	}

	async fn set_join_message(&self, guild_id: GuildId, ticket_id: TicketId, message_id: MessageId) -> Result<()> {
		self.with_ticket_mut(guild_id, ticket_id, |t| t.join_message_id = Some(message_id))
	}

	async fn set_claimed_by(&self, guild_id: GuildId, ticket_id: TicketId, claimed_by: Option<UserId>) -> Result<()> {
		self.with_ticket_mut(guild_id, ticket_id, |t| t.claimed_by = claimed_by)
	}

	async fn set_ticket_status(&self, guild_id: GuildId, ticket_id: TicketId, status: TicketStatus) -> Result<()> {
		self.with_ticket_mut(guild_id, ticket_id, |t| t.status = status)
	}

	async fn update_last_message(&self, guild_id: GuildId, ticket_id: TicketId, last_message: LastMessage) -> Result<()> {
		self.with_ticket_mut(guild_id, ticket_id, |t| t.last_message = Some(last_message))
	}

	async fn record_first_response(&self, guild_id: GuildId, ticket_id: TicketId, at: DateTime<Utc>) -> Result<()> {
		self.with_ticket_mut(guild_id, ticket_id, |t| {
			if t.first_response_at.is_none() {
				t.first_response_at = Some(at);
			}
		})
	}

	async fn mark_has_transcript(&self, guild_id: GuildId, ticket_id: TicketId) -> Result<()> {
		self.with_ticket_mut(guild_id, ticket_id, |t| t.has_transcript = true)
	}

	async fn close_ticket(&self, guild_id: GuildId, ticket_id: TicketId, closed_by: UserId, reason: Option<String>) -> Result<()> {
		self.with_ticket_mut(guild_id, ticket_id, |t| {
			t.open = false;
			t.status = TicketStatus::Closed;
			t.closed_by = Some(closed_by);
			t.close_reason = reason;
			t.closed_at = Some(Utc::now());
		})
	}

	async fn close_orphaned_ticket(&self, guild_id: GuildId, ticket_id: TicketId) -> Result<()> {
		self.with_ticket_mut(guild_id, ticket_id, |t| {
			t.open = false;
			t.status = TicketStatus::Closed;
			t.closed_at = Some(Utc::now());
		})
	}

	async fn get_settings(&self, guild_id: GuildId) -> Result<Settings> {
		Ok(self.settings.get(&guild_id).map(|r| r.clone()).unwrap_or_else(|| Settings::defaults(guild_id)))
	}

	async fn upsert_settings(&self, settings: &Settings) -> Result<()> {
		self.settings.insert(settings.guild_id, settings.clone());
		Ok(())
	}

	async fn get_panel(&self, panel_id: PanelId) -> Result<Option<Panel>> {
		Ok(self.panels.get(&panel_id).map(|r| r.clone()))
	}

	async fn get_form_inputs(&self, panel_id: PanelId) -> Result<Vec<FormInput>> {
		Ok(self.form_inputs.get(&panel_id).map(|r| r.clone()).unwrap_or_default())
	}

	async fn get_user_grant(&self, guild_id: GuildId, user_id: UserId) -> Result<Option<PermissionGrant>> {
		Ok(self.user_grants.get(&(guild_id, user_id)).map(|r| r.clone()))
	}

	async fn get_role_grants(&self, guild_id: GuildId, role_ids: &[RoleId]) -> Result<Vec<PermissionGrant>> {
		Ok(role_ids.iter().filter_map(|role_id| self.role_grants.get(&(guild_id, *role_id)).map(|r| r.clone())).collect())
	}

	async fn upsert_grant(&self, grant: &PermissionGrant) -> Result<()> {
		match grant.subject_kind {
			SubjectKind::User => {
				self.user_grants.insert((grant.guild_id, UserId::new(grant.subject_id)), grant.clone());
			}
			SubjectKind::Role => {
				self.role_grants.insert((grant.guild_id, RoleId::new(grant.subject_id)), grant.clone());
			}
		}
		Ok(())
	}

	async fn remove_grant(&self, guild_id: GuildId, subject_id: u64, subject_kind: SubjectKind) -> Result<()> {
		match subject_kind {
			SubjectKind::User => {
				self.user_grants.remove(&(guild_id, UserId::new(subject_id)));
			}
			SubjectKind::Role => {
				self.role_grants.remove(&(guild_id, RoleId::new(subject_id)));
			}
		}
		Ok(())
	}

	async fn remove_role_grants(&self, guild_id: GuildId, role_id: RoleId) -> Result<()> {
		self.role_grants.remove(&(guild_id, role_id));
		Ok(())
	}

	async fn is_guild_blacklisted(&self, guild_id: GuildId) -> Result<bool> {
		Ok(self.blacklist_guild.contains_key(&guild_id))
	}

	async fn is_user_blacklisted(&self, guild_id: GuildId, user_id: UserId) -> Result<bool> {
		Ok(self.blacklist_user.contains_key(&(guild_id, user_id)))
	}

	async fn is_any_role_blacklisted(&self, guild_id: GuildId, role_ids: &[RoleId]) -> Result<bool> {
		Ok(role_ids.iter().any(|role_id| self.blacklist_role.contains_key(&(guild_id, *role_id))))
	}

	async fn add_blacklist_entry(&self, entry: BlacklistEntry) -> Result<()> {
		match entry {
			BlacklistEntry::GuildWide(guild_id) => {
				self.blacklist_guild.insert(guild_id, ());
			}
			BlacklistEntry::User(guild_id, user_id) => {
				self.blacklist_user.insert((guild_id, user_id), ());
			}
			BlacklistEntry::Role(guild_id, role_id) => {
				self.blacklist_role.insert((guild_id, role_id), ());
			}
		}
		Ok(())
	}

	async fn remove_blacklist_entry(&self, entry: BlacklistEntry) -> Result<()> {
		match entry {
			BlacklistEntry::GuildWide(guild_id) => {
				self.blacklist_guild.remove(&guild_id);
			}
			BlacklistEntry::User(guild_id, user_id) => {
				self.blacklist_user.remove(&(guild_id, user_id));
			}
			BlacklistEntry::Role(guild_id, role_id) => {
				self.blacklist_role.remove(&(guild_id, role_id));
			}
		}
		Ok(())
	}

	async fn get_close_request(&self, guild_id: GuildId, ticket_id: TicketId) -> Result<Option<CloseRequest>> {
		Ok(self.close_requests.get(&TicketKey { guild_id, ticket_id }).map(|r| r.clone()))
	}

	async fn upsert_close_request(&self, request: &CloseRequest) -> Result<()> {
		self.close_requests.insert(TicketKey { guild_id: request.guild_id, ticket_id: request.ticket_id }, request.clone());
		Ok(())
	}

	async fn delete_close_request(&self, guild_id: GuildId, ticket_id: TicketId) -> Result<()> {
		self.close_requests.remove(&TicketKey { guild_id, ticket_id });
		Ok(())
	}

	async fn store_webhook(&self, guild_id: GuildId, ticket_id: TicketId, webhook_id: WebhookId, token: &str) -> Result<()> {
		self.webhooks.insert(TicketKey { guild_id, ticket_id }, (webhook_id, token.to_string()));
		Ok(())
	}

	async fn get_webhook(&self, guild_id: GuildId, ticket_id: TicketId) -> Result<Option<(WebhookId, String)>> {
		Ok(self.webhooks.get(&TicketKey { guild_id, ticket_id }).map(|r| r.clone()))
	}
}

impl InMemoryMetaStore {
	fn with_ticket_mut(&self, guild_id: GuildId, ticket_id: TicketId, f: impl FnOnce(&mut Ticket)) -> Result<()> {
		let mut entry = self.tickets.get_mut(&TicketKey { guild_id, ticket_id }).ok_or(MetaStoreError::NotFound)?;
		f(&mut entry);
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn ticket_ids_are_dense_per_guild() {
		let store = InMemoryMetaStore::new();
		assert_eq!(store.next_ticket_id(GuildId::new(1)).await.unwrap(), TicketId::new(1));
		assert_eq!(store.next_ticket_id(GuildId::new(1)).await.unwrap(), TicketId::new(2));
		assert_eq!(store.next_ticket_id(GuildId::new(2)).await.unwrap(), TicketId::new(1));
	}

	#[tokio::test]
	async fn close_ticket_marks_row_closed() {
		let store = InMemoryMetaStore::new();
		let ticket = Ticket::new_pending(GuildId::new(1), TicketId::new(1), UserId::new(9), None, false, Utc::now());
		store.insert_ticket(&ticket).await.unwrap();

		store.close_ticket(GuildId::new(1), TicketId::new(1), UserId::new(1), Some("done".into())).await.unwrap();

		let reloaded = store.get_ticket(GuildId::new(1), TicketId::new(1)).await.unwrap().unwrap();
		assert!(!reloaded.open);
		assert_eq!(reloaded.close_reason.as_deref(), Some("done"));
	}

	#[tokio::test]
	async fn blacklist_checks_are_independent_per_kind() {
		let store = InMemoryMetaStore::new();
		store.add_blacklist_entry(BlacklistEntry::User(GuildId::new(1), UserId::new(5))).await.unwrap();
		assert!(store.is_user_blacklisted(GuildId::new(1), UserId::new(5)).await.unwrap());
		assert!(!store.is_user_blacklisted(GuildId::new(1), UserId::new(6)).await.unwrap());
		assert!(!store.is_guild_blacklisted(GuildId::new(1)).await.unwrap());
	}
}
