//! Permission overwrite set for a channel-mode ticket (§4.6).

use ticket_gateway::types::{OverwriteSubject, PermissionBits, PermissionOverwrite};
use ticket_types::{GuildId, RoleId, UserId};

pub struct OverwriteInputs<'a> {
	pub guild_id: GuildId,
	pub opener: UserId,
	pub co_openers: &'a [UserId],
	pub support_users: &'a [UserId],
	pub support_roles: &'a [RoleId],
	pub panel_support_roles: &'a [RoleId],
	pub bot_user: UserId,
	pub integration_role: Option<RoleId>,
	pub bot_can_manage_webhooks: bool,
}

/// Builds the overwrite list in the order §4.6 describes it: deny
/// `@everyone`, allow the opener (and co-openers), allow the bot or its
/// integration role, then allow support users/roles.
#[must_use]
pub fn build(inputs: &OverwriteInputs<'_>) -> Vec<PermissionOverwrite> {
	let mut overwrites = Vec::new();

	overwrites.push(PermissionOverwrite { subject: OverwriteSubject::Role(RoleId::new(inputs.guild_id.get())), allow: PermissionBits::deny_view() });

	overwrites.push(PermissionOverwrite { subject: OverwriteSubject::Member(inputs.opener), allow: PermissionBits::standard() });
	for &co_opener in inputs.co_openers {
		overwrites.push(PermissionOverwrite { subject: OverwriteSubject::Member(co_opener), allow: PermissionBits::standard() });
	}

	let mut self_bits = PermissionBits::standard();
	self_bits.manage_webhooks = inputs.bot_can_manage_webhooks;
	let self_subject = inputs.integration_role.map_or(OverwriteSubject::Member(inputs.bot_user), OverwriteSubject::Role);
	overwrites.push(PermissionOverwrite { subject: self_subject, allow: self_bits });

	for &user in inputs.support_users {
		overwrites.push(PermissionOverwrite { subject: OverwriteSubject::Member(user), allow: PermissionBits::standard() });
	}
	for &role in inputs.support_roles.iter().chain(inputs.panel_support_roles) {
		overwrites.push(PermissionOverwrite { subject: OverwriteSubject::Role(role), allow: PermissionBits::standard() });
	}

	overwrites
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn everyone_role_is_denied_view_first() {
		let inputs = OverwriteInputs {
			guild_id: GuildId::new(1),
			opener: UserId::new(2),
			co_openers: &[],
			support_users: &[],
			support_roles: &[],
			panel_support_roles: &[],
			bot_user: UserId::new(9),
			integration_role: None,
			bot_can_manage_webhooks: false,
		};
		let overwrites = build(&inputs);
		assert!(matches!(overwrites[0].subject, OverwriteSubject::Role(r) if r.get() == 1));
		assert!(!overwrites[0].allow.view_channel);
	}

	#[test]
	fn integration_role_is_preferred_over_bot_user() {
		let inputs = OverwriteInputs {
			guild_id: GuildId::new(1),
			opener: UserId::new(2),
			co_openers: &[],
			support_users: &[],
			support_roles: &[],
			panel_support_roles: &[],
			bot_user: UserId::new(9),
			integration_role: Some(RoleId::new(42)),
			bot_can_manage_webhooks: true,
		};
		let overwrites = build(&inputs);
		let self_overwrite = overwrites.iter().find(|o| matches!(o.subject, OverwriteSubject::Role(r) if r.get() == 42)).unwrap();
		assert!(self_overwrite.allow.manage_webhooks);
	}
}
