//! Connection and session state types.
//!
//! Exactly one [`ConnectionState`] exists per client; it is owned by the
//! connection manager and published read-only through a `watch` channel.
//! A [`Session`] is created for each connection attempt and discarded on
//! close.

/// Lifecycle state of the single client connection.
///
/// Transitions are driven exclusively by the connection manager:
/// `Idle → Probing → Connecting → Open → Closing → Idle`, forever.
/// `Errored` is entered momentarily when the transport reports an error or
/// a connect attempt fails; reconnection behavior is identical to a clean
/// close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// No attempt in progress; the next probe has not started yet.
    Idle,
    /// Waiting for the backend to answer the liveness probe.
    Probing,
    /// Probe succeeded; WebSocket handshake in progress.
    Connecting,
    /// Transport open; frames are being dispatched.
    Open,
    /// Transport closed; session teardown in progress.
    Closing,
    /// The transport or handshake reported an error.
    Errored,
}

/// Where a session is in its inbound message protocol.
///
/// Makes "received a second first-message" unrepresentable: the first frame
/// of a session is always the initialization payload, everything after it
/// is a state frame or a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No frame received yet; the next frame is the initialization payload.
    AwaitingInit,
    /// Initialization consumed; subsequent frames are state or commands.
    Streaming,
}

/// Per-attempt session bookkeeping.
///
/// One `Session` exists per connection attempt. The registered callbacks
/// live in the handler owned by the manager and are reused across sessions;
/// only the protocol phase is session-scoped.
#[derive(Debug)]
pub struct Session {
    phase: SessionPhase,
}

impl Session {
    /// Creates a fresh session awaiting its initialization payload.
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: SessionPhase::AwaitingInit,
        }
    }

    /// Returns the current protocol phase.
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Marks the initialization payload as consumed.
    pub fn begin_streaming(&mut self) {
        self.phase = SessionPhase::Streaming;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_awaits_init() {
        let session = Session::new();
        assert_eq!(session.phase(), SessionPhase::AwaitingInit);
    }

    #[test]
    fn begin_streaming_advances_phase() {
        let mut session = Session::new();
        session.begin_streaming();
        assert_eq!(session.phase(), SessionPhase::Streaming);
    }
}
