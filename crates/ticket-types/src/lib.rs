//! Shared data model for the ticketing CORE (§3 of SPEC_FULL.md).
//!
//! This crate has no I/O of its own: it is the vocabulary `ticket-kvs`,
//! `ticket-metastore`, `ticket-gateway`, `ticket-bus` and `ticket-core` all
//! speak.

pub mod blacklist;
pub mod close_request;
pub mod ids;
pub mod panel;
pub mod permission;
pub mod settings;
pub mod ticket;

pub use blacklist::BlacklistEntry;
pub use close_request::CloseRequest;
pub use ids::{ChannelId, GuildId, MessageId, PanelId, RoleId, TicketId, TicketKey, UserId, WebhookId};
pub use panel::{AccessControlAction, AccessControlRule, FormInput, Panel, PanelState};
pub use permission::{PermissionGrant, PermissionLevel, SubjectKind};
pub use settings::{AutocloseRules, Settings};
pub use ticket::{LastMessage, Ticket, TicketStatus};
