//! Phase-aware classification of inbound text frames.
//!
//! The backend sends exactly one JSON object per frame. The first frame of
//! every session is the initialization payload; after that, any object
//! carrying the `command` discriminant is a visualization command and
//! everything else is a state frame. Unknown `command` values are rejected,
//! not silently dropped.

use crate::connection::state::SessionPhase;
use crate::error::ClientError;

use super::messages::{InitializationPayload, StateFrame, VisualizationCommand};

/// A successfully classified inbound frame.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundMessage {
    /// First frame of the session.
    Initialization(InitializationPayload),
    /// Periodic simulation snapshot.
    Frame(StateFrame),
    /// Out-of-band visualization command.
    Command(VisualizationCommand),
}

/// Classifies one raw text frame according to the session phase.
///
/// # Errors
///
/// Returns [`ClientError::Decode`] when the frame is not valid JSON or does
/// not match the expected shape for its position, and
/// [`ClientError::InvalidInitialization`] when the first frame violates an
/// initialization invariant (duplicate nodes, inverted axis range).
pub fn classify(phase: SessionPhase, raw: &str) -> Result<InboundMessage, ClientError> {
    match phase {
        SessionPhase::AwaitingInit => {
            let payload: InitializationPayload = serde_json::from_str(raw)?;
            payload
                .validate()
                .map_err(ClientError::InvalidInitialization)?;
            Ok(InboundMessage::Initialization(payload))
        }
        SessionPhase::Streaming => {
            let value: serde_json::Value = serde_json::from_str(raw)?;
            if value.get("command").is_some() {
                let command: VisualizationCommand = serde_json::from_value(value)?;
                Ok(InboundMessage::Command(command))
            } else {
                let frame: StateFrame = serde_json::from_value(value)?;
                Ok(InboundMessage::Frame(frame))
            }
        }
    }
}
