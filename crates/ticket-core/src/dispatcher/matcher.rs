//! A handler's custom-id matcher (§4.4): either an exact string or a
//! predicate over it, for parametric ids like `view-survey-<guild>-<ticket>`
//! or `form_<panel_custom_id>`.

/// §9 "Handler registry is a static table ... predicate matchers are
/// ordered after exact matchers to keep exact lookups O(1)": the registry
/// stores `Exact` matchers in a map and `Predicate` matchers in an ordered
/// `Vec` it falls back to.
pub enum Matcher {
	Exact(String),
	Predicate(Box<dyn Fn(&str) -> bool + Send + Sync>),
}

impl Matcher {
	#[must_use]
	pub fn exact(custom_id: impl Into<String>) -> Self {
		Self::Exact(custom_id.into())
	}

	#[must_use]
	pub fn predicate(f: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
		Self::Predicate(Box::new(f))
	}

	#[must_use]
	pub fn prefix(prefix: impl Into<String>) -> Self {
		let prefix = prefix.into();
		Self::predicate(move |id| id.starts_with(&prefix))
	}

	#[must_use]
	pub fn matches(&self, custom_id: &str) -> bool {
		match self {
			Self::Exact(expected) => expected == custom_id,
			Self::Predicate(predicate) => predicate(custom_id),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn exact_matches_only_identical_string() {
		let matcher = Matcher::exact("claim");
		assert!(matcher.matches("claim"));
		assert!(!matcher.matches("claim-extra"));
	}

	#[test]
	fn prefix_matches_parametric_ids() {
		let matcher = Matcher::prefix("view-survey-");
		assert!(matcher.matches("view-survey-1-17"));
		assert!(!matcher.matches("claim"));
	}
}
