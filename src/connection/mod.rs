//! Connection layer: liveness probing, the connect/reconnect state machine,
//! and the outbound interaction channel.

pub mod manager;
pub mod outbound;
pub mod probe;
pub mod state;

pub use manager::ConnectionManager;
pub use outbound::InteractionSender;
pub use state::{ConnectionState, Session, SessionPhase};
