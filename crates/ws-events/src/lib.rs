#[cfg(feature = "stream-orch")]
pub mod stream_orch;

#[cfg(feature = "events")]
pub mod events;

#[cfg(feature = "events")]
pub use events::{unified_event, UnifiedEvent};
