//! The ticketing domain logic: permission resolution, the blacklist gate,
//! the component dispatcher, and the ticket engine (open/close/claim/reopen).
//! Everything here is transport-agnostic — it speaks the `ticket-kvs`,
//! `ticket-metastore`, `ticket-gateway` and `ticket-bus` trait surfaces, never
//! a concrete backend, so `ticket-worker` is the only crate that assembles a
//! live stack.

pub mod blacklist;
pub mod context;
pub mod dispatcher;
pub mod engine;
pub mod error;
pub mod listeners;
pub mod metrics;
pub mod observer;
pub mod permission;
pub mod timers;

pub use blacklist::BlacklistGate;
pub use context::{InteractionSource, OperationContext, ReplyCounter};
pub use dispatcher::{ComponentKind, DispatchOutcome, Dispatcher, Handler, HandlerProperties, HandlerRegistry, Interaction, Matcher};
pub use engine::{CloseInput, EngineConfig, OpenRequest, TicketEngine};
pub use error::{CapacityError, EngineError, Result, UserError};
pub use listeners::LifecycleListener;
pub use metrics::Metrics;
pub use observer::{InboundMessage, MessageObserver};
pub use permission::PermissionResolver;
pub use timers::TimerPipeline;
