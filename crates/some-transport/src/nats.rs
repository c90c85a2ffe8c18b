#![cfg(feature = "nats")]

mod pool;
mod receiver;
mod transport;

pub use pool::NatsConnectionPool;
pub use receiver::NatsReceiver;
pub use transport::NatsTransport;
