//! Callback boundary between the connection core and the renderer.

use crate::protocol::{InitializationPayload, StateFrame, VisualizationCommand};

/// Lifecycle callbacks implemented by the renderer (or any collaborator
/// consuming telemetry).
///
/// The connection manager guarantees, per session: `on_initialize` fires
/// exactly once and strictly before any `on_update`/`on_command`;
/// `on_finalize` fires exactly once after the transport closes, and never
/// for an attempt that failed before opening. Callbacks run on the
/// manager's task in transport delivery order.
pub trait TelemetryHandler {
    /// First frame of a session: node roster and scene bounds. The renderer
    /// builds all session-scoped resources here.
    fn on_initialize(&mut self, payload: InitializationPayload);

    /// Periodic simulation snapshot.
    fn on_update(&mut self, frame: StateFrame);

    /// Out-of-band visualization command. Node-index bounds checking
    /// against the current roster is the implementor's responsibility.
    fn on_command(&mut self, command: VisualizationCommand);

    /// The session's transport closed. The renderer must release all
    /// session-scoped resources before the next `on_initialize`.
    fn on_finalize(&mut self);

    /// Presentation-only connectivity toggle ("connected" / "disconnected"
    /// indicator). Not required for protocol correctness; defaults to a
    /// no-op.
    fn on_connection_change(&mut self, connected: bool) {
        let _ = connected;
    }
}
