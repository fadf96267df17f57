//! Wire protocol: message types and inbound frame classification.
//!
//! Every frame is a single newline-free JSON object. Inbound frames are
//! classified by [`classify::classify`]; outbound interaction messages are
//! serialized by the connection layer.

pub mod classify;
pub mod messages;

pub use classify::{InboundMessage, classify};
pub use messages::{InitializationPayload, InteractionMessage, StateFrame, VisualizationCommand};
