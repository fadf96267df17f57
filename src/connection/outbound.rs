//! Outbound channel for client-originated interaction messages.
//!
//! Fire-and-forget: no queuing across sessions, no delivery guarantee, no
//! acknowledgement. Interaction signals are low-stakes (pause/resume
//! toggles), so a message sent while disconnected is simply dropped.

use tokio::sync::{mpsc, watch};

use crate::protocol::InteractionMessage;

use super::state::ConnectionState;

/// Handle given to interaction sources (UI buttons, scripts) for sending
/// messages to the backend.
///
/// Cheap to clone; every clone observes the same connection state.
#[derive(Debug, Clone)]
pub struct InteractionSender {
    state: watch::Receiver<ConnectionState>,
    tx: mpsc::UnboundedSender<InteractionMessage>,
}

impl InteractionSender {
    pub(crate) fn new(
        state: watch::Receiver<ConnectionState>,
        tx: mpsc::UnboundedSender<InteractionMessage>,
    ) -> Self {
        Self { state, tx }
    }

    /// Sends an interaction message to the backend.
    ///
    /// No-op in any state other than [`ConnectionState::Open`]: the message
    /// is dropped, nothing is queued for later delivery, and nothing is
    /// reported back.
    pub fn send(&self, message: InteractionMessage) {
        if *self.state.borrow() != ConnectionState::Open {
            tracing::trace!(?message, "dropping interaction, transport not open");
            return;
        }
        // The manager may have torn the session down since the check; the
        // receiver side drops anything left over between sessions.
        let _ = self.tx.send(message);
    }

    /// Returns the current connection state as observed by this handle.
    #[must_use]
    pub fn connection_state(&self) -> ConnectionState {
        *self.state.borrow()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn sender_in_state(
        state: ConnectionState,
    ) -> (
        watch::Sender<ConnectionState>,
        InteractionSender,
        mpsc::UnboundedReceiver<InteractionMessage>,
    ) {
        let (state_tx, state_rx) = watch::channel(state);
        let (tx, rx) = mpsc::unbounded_channel();
        (state_tx, InteractionSender::new(state_rx, tx), rx)
    }

    #[test]
    fn send_while_open_enqueues() {
        let (_state_tx, sender, mut rx) = sender_in_state(ConnectionState::Open);
        sender.send(InteractionMessage::PauseResume);
        let Ok(message) = rx.try_recv() else {
            panic!("expected enqueued message");
        };
        assert_eq!(message, InteractionMessage::PauseResume);
    }

    #[test]
    fn send_while_not_open_is_a_no_op() {
        for state in [
            ConnectionState::Idle,
            ConnectionState::Probing,
            ConnectionState::Connecting,
            ConnectionState::Closing,
            ConnectionState::Errored,
        ] {
            let (_state_tx, sender, mut rx) = sender_in_state(state);
            sender.send(InteractionMessage::PauseResume);
            assert!(rx.try_recv().is_err(), "message must be dropped in {state:?}");
        }
    }

    #[test]
    fn clones_share_state_view() {
        let (_state_tx, sender, mut rx) = sender_in_state(ConnectionState::Open);
        let clone = sender.clone();
        clone.send(InteractionMessage::PauseResume);
        assert!(rx.try_recv().is_ok());
        assert_eq!(clone.connection_state(), ConnectionState::Open);
    }
}
