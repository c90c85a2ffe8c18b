//! Channel/thread naming scheme template substitution (§4.5 step 12,
//! GLOSSARY "Naming scheme"): `%id%`, `%username%`, `%nickname%`,
//! `%id_padded%`, `%claimed%`.

use ticket_types::TicketId;

const MAX_NAME_LEN: usize = 100;

pub struct NamingContext<'a> {
	pub ticket_id: TicketId,
	pub username: &'a str,
	pub nickname: Option<&'a str>,
	pub claimed: bool,
}

/// Substitutes the template, then truncates to 100 characters *after*
/// substitution (§4.5 step 12 is explicit about the ordering). Falls back
/// to `ticket-<id>` when no template is configured, or `ticket-<username>`
/// when the template is empty after substitution.
#[must_use]
pub fn render(template: Option<&str>, ctx: &NamingContext<'_>) -> String {
	let rendered = match template {
		Some(template) if !template.is_empty() => substitute(template, ctx),
		_ => format!("ticket-{}", ctx.ticket_id),
	};

	let rendered = if rendered.trim().is_empty() { format!("ticket-{}", ctx.username) } else { rendered };

	truncate(&rendered, MAX_NAME_LEN)
}

fn substitute(template: &str, ctx: &NamingContext<'_>) -> String {
	template
		.replace("%id_padded%", &format!("{:04}", ctx.ticket_id.0))
		.replace("%id%", &ctx.ticket_id.to_string())
		.replace("%username%", ctx.username)
		.replace("%nickname%", ctx.nickname.unwrap_or(ctx.username))
		.replace("%claimed%", if ctx.claimed { "claimed" } else { "unclaimed" })
}

fn truncate(s: &str, max_chars: usize) -> String {
	s.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn ctx() -> NamingContext<'static> {
		NamingContext { ticket_id: TicketId::new(17), username: "ava", nickname: None, claimed: false }
	}

	#[test]
	fn default_template_when_none_configured() {
		assert_eq!(render(None, &ctx()), "ticket-17");
	}

	#[test]
	fn substitutes_all_placeholders() {
		let rendered = render(Some("t-%id_padded%-%username%-%claimed%"), &ctx());
		assert_eq!(rendered, "t-0017-ava-unclaimed");
	}

	#[test]
	fn truncates_after_substitution_not_before() {
		let long_username = "a".repeat(200);
		let c = NamingContext { ticket_id: TicketId::new(1), username: &long_username, nickname: None, claimed: false };
		let rendered = render(Some("ticket-%username%"), &c);
		assert_eq!(rendered.chars().count(), 100);
	}
}
