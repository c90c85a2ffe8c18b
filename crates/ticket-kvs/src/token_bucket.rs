//! Token-bucket math shared by the in-memory and Redis `Kvs` backends.
//!
//! Adapted from `some_services::rate_limiter::token_bucket`'s
//! `TokenBucketRateLimiter`: same scaled-refill-rate arithmetic, but
//! expressed as a pure function over an explicit `BucketState` so it can be
//! applied to a value pulled out of Redis instead of living in one
//! process's atomics.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BucketState {
	pub tokens: u32,
	pub last_refill_ms: u64,
}

impl BucketState {
	#[must_use]
	pub fn full(capacity: u32) -> Self {
		Self { tokens: capacity, last_refill_ms: current_time_millis() }
	}
}

pub(crate) fn current_time_millis() -> u64 {
	SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis().try_into().unwrap_or(u64::MAX)
}

/// Refills `state` for elapsed time against `capacity`/`window`, then
/// attempts to take one token. Returns the updated state (always persist it,
/// even when `allowed` is `false`) and whether a token was taken.
#[must_use]
pub fn take(mut state: BucketState, capacity: u32, window: Duration) -> (BucketState, bool) {
	let now = current_time_millis();
	let window_ms = window.as_millis().try_into().unwrap_or(u64::MAX).max(1);
	let refill_rate_per_ms = (u64::from(capacity) * 1000 / window_ms).max(1);

	let elapsed = now.saturating_sub(state.last_refill_ms);
	if elapsed >= 10 {
		let tokens_to_add_scaled = elapsed * refill_rate_per_ms;
		let tokens_to_add = u32::try_from(tokens_to_add_scaled / 1000).unwrap_or(capacity);
		if tokens_to_add > 0 {
			state.tokens = state.tokens.saturating_add(tokens_to_add).min(capacity);
			state.last_refill_ms = now;
		}
	}

	if state.tokens == 0 {
		(state, false)
	} else {
		state.tokens -= 1;
		(state, true)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn exhausts_then_blocks() {
		let mut state = BucketState::full(3);
		for _ in 0..3 {
			let (next, allowed) = take(state, 3, Duration::from_secs(10));
			assert!(allowed);
			state = next;
		}
		let (_, allowed) = take(state, 3, Duration::from_secs(10));
		assert!(!allowed);
	}

	#[test]
	fn refills_after_window() {
		let mut state = BucketState::full(2);
		state = take(state, 2, Duration::from_secs(10)).0;
		state = take(state, 2, Duration::from_secs(10)).0;
		assert!(!take(state, 2, Duration::from_secs(10)).1);

		state.last_refill_ms = state.last_refill_ms.saturating_sub(11_000);
		let (_, allowed) = take(state, 2, Duration::from_secs(10));
		assert!(allowed);
	}
}
