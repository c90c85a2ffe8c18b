use serde::{Deserialize, Serialize};

use crate::ids::{ChannelId, GuildId, PanelId, RoleId};

/// A panel may be disabled by an admin, or force-disabled by the system
/// (e.g. premium lapsed — out of scope here, but the state survives).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PanelState {
	Enabled,
	Disabled,
	ForceDisabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessControlAction {
	Allow,
	Deny,
}

/// One entry of a panel's ordered access-control list (§3, §4.5 step 4).
/// First match wins; `role_id` may equal the guild id to stand in for
/// `@everyone` (§3 Panel definition).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessControlRule {
	pub role_id: RoleId,
	pub action: AccessControlAction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
	pub panel_id: PanelId,
	pub guild_id: GuildId,
	pub title: Option<String>,
	pub target_category: Option<ChannelId>,
	pub naming_scheme: Option<String>,
	pub forced_team: Option<RoleId>,
	pub access_control: Vec<AccessControlRule>,
	pub state: PanelState,
	pub default_team_enabled: bool,
	pub mention_roles: Vec<RoleId>,
	pub exit_survey_id: Option<u64>,
	pub welcome_message: Option<String>,
}

impl Panel {
	#[must_use]
	pub const fn is_open_allowed(&self) -> bool {
		matches!(self.state, PanelState::Enabled)
	}

	/// Evaluate the ordered access-control list against the caller's roles
	/// (already expected to include the guild id standing in for
	/// `@everyone`, per §3). Returns the first matching rule, if any.
	#[must_use]
	pub fn first_matching_rule(&self, caller_roles: &[RoleId]) -> Option<AccessControlRule> {
		self.access_control.iter().copied().find(|rule| caller_roles.contains(&rule.role_id))
	}

	/// The first `allow`-listed role, used to compose the access-denied
	/// reply naming it (§4.5 step 4, §8 scenario 5).
	#[must_use]
	pub fn first_allow_role(&self) -> Option<RoleId> {
		self
			.access_control
			.iter()
			.find(|rule| rule.action == AccessControlAction::Allow)
			.map(|rule| rule.role_id)
	}
}

/// A question attached to a panel submission (§3).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormInput {
	pub custom_id: String,
	pub panel_id: PanelId,
	pub label: String,
	pub required: bool,
	pub position: i16,
}
