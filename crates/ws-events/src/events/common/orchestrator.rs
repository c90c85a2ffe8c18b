mod commands;
mod events;
mod state;
mod types;

pub use events::{LifetimeEvent, LifetimeKind, OrchestratorEvent, ScenePayload, TimedEvent};

pub use commands::{ComponentPlacementData, FocusIntentData, OrchestratorCommandData, OrchestratorConfigData, SceneConfigData, UILayoutIntentData};
pub use state::{ActiveLifetime, OrchestratorState, StreamStatus};
pub use types::{LifetimeId, Progress, SceneId, TimeMs, Timecode};
