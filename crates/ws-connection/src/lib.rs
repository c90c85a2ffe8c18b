pub mod actor;
pub mod core;
pub mod errors;
pub mod types;

pub use actor::{ConnectionHandle, ConnectionState};
pub use core::conn::Connection;
pub use core::store::ConnectionStore;
pub use core::subscription::{EventKey, SubscriptionManager};
pub use types::{ClientId, ConnectionId};
