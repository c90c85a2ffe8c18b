#![cfg(feature = "events")]

mod common;
mod unified;

pub use common::{Event, EventType, MessageId, NowPlaying, OrchestratorState, ProcessResult, TickCommand, UtteranceMetadata, UtterancePrompt};
pub use unified::unified_event;
pub use unified::UnifiedEvent;
pub use unified::{ObsCommandMessage, ObsStatusMessage};
