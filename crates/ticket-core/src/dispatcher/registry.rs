//! Static handler table (§9): exact matchers in a `DashMap` for O(1)
//! lookup, predicate matchers in an ordered `Vec` consulted on miss.
//! Grounded on `apps/orchestrator`'s `DashMap`-keyed manager pattern
//! (generalized here from "one entry per running job" to "one entry per
//! exact custom-id").

use std::sync::Arc;

use dashmap::DashMap;

use crate::dispatcher::handler::Handler;
use crate::dispatcher::matcher::Matcher;

#[derive(Default)]
pub struct HandlerRegistry {
	exact: DashMap<String, Arc<dyn Handler>>,
	predicates: Vec<Arc<dyn Handler>>,
}

impl HandlerRegistry {
	#[must_use]
	pub fn new() -> Self {
		Self { exact: DashMap::new(), predicates: Vec::new() }
	}

	pub fn register(&mut self, handler: Arc<dyn Handler>) {
		match handler.matcher() {
			Matcher::Exact(id) => {
				self.exact.insert(id.clone(), handler);
			}
			Matcher::Predicate(_) => {
				self.predicates.push(handler);
			}
		}
	}

	/// §4.4 step 4: first handler whose matcher accepts the id; exact match
	/// first, predicates in registration order.
	#[must_use]
	pub fn find(&self, custom_id: &str) -> Option<Arc<dyn Handler>> {
		if let Some(handler) = self.exact.get(custom_id) {
			return Some(Arc::clone(&handler));
		}
		self.predicates.iter().find(|h| h.matcher().matches(custom_id)).map(Arc::clone)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::context::OperationContext;
	use crate::dispatcher::handler::{ComponentKind, HandlerProperties};
	use async_trait::async_trait;
	use ticket_types::PermissionLevel;

	struct StubHandler {
		matcher: Matcher,
	}

	#[async_trait]
	impl Handler for StubHandler {
		fn matcher(&self) -> &Matcher {
			&self.matcher
		}
		fn properties(&self) -> HandlerProperties {
			HandlerProperties::new(PermissionLevel::Everyone)
		}
		async fn execute(&self, _ctx: &OperationContext, _custom_id: &str, _kind: ComponentKind) -> crate::error::Result<()> {
			Ok(())
		}
	}

	#[test]
	fn exact_match_wins_even_when_a_predicate_would_also_match() {
		let mut registry = HandlerRegistry::new();
		registry.register(Arc::new(StubHandler { matcher: Matcher::prefix("claim") }));
		registry.register(Arc::new(StubHandler { matcher: Matcher::exact("claim-1") }));

		let found = registry.find("claim-1");
		assert!(found.is_some());
		assert!(matches!(found.unwrap().matcher(), Matcher::Exact(id) if id == "claim-1"));
	}

	#[test]
	fn unmatched_id_returns_none() {
		let registry = HandlerRegistry::new();
		assert!(registry.find("nothing-registered").is_none());
	}
}
