//! Connection state machine and session dispatch loop.
//!
//! [`ConnectionManager::run`] drives the probe → connect → dispatch →
//! teardown cycle forever. All connection-level failures are handled here;
//! nothing propagates to the caller. The only externally observable effects
//! are the [`TelemetryHandler`] callbacks and the published
//! [`ConnectionState`].

use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, watch};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use crate::config::SimvizConfig;
use crate::error::ClientError;
use crate::handler::TelemetryHandler;
use crate::protocol::{InboundMessage, InteractionMessage, classify};

use super::outbound::InteractionSender;
use super::probe;
use super::state::{ConnectionState, Session};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsSink = SplitSink<WsStream, Message>;

/// How a session's transport went away. Clean and unclean closes are
/// distinguished for diagnostics only; reconnection is identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionEnd {
    /// The peer sent a close frame.
    Clean,
    /// The stream ended without a close frame.
    Unclean,
    /// The transport reported an error; the close was forced.
    Errored,
}

/// Owns the connection lifecycle: the single [`ConnectionState`], the
/// per-attempt [`Session`], and the registered [`TelemetryHandler`].
///
/// Created once at startup; [`run`](Self::run) loops forever. At most one
/// transport handle is alive at any time because the manager is the only
/// task that ever opens one and it never overlaps attempts.
pub struct ConnectionManager<H: TelemetryHandler> {
    config: SimvizConfig,
    handler: H,
    http: reqwest::Client,
    state_tx: watch::Sender<ConnectionState>,
    outbound_tx: mpsc::UnboundedSender<InteractionMessage>,
    outbound_rx: mpsc::UnboundedReceiver<InteractionMessage>,
}

impl<H: TelemetryHandler> ConnectionManager<H> {
    /// Creates a manager in the [`ConnectionState::Idle`] state.
    ///
    /// The handler's callbacks are registered once here and reused across
    /// every session the manager opens.
    #[must_use]
    pub fn new(config: SimvizConfig, handler: H) -> Self {
        let (state_tx, _) = watch::channel(ConnectionState::Idle);
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        Self {
            config,
            handler,
            http: reqwest::Client::new(),
            state_tx,
            outbound_tx,
            outbound_rx,
        }
    }

    /// Creates a handle for sending interaction messages to the backend.
    ///
    /// Handles can be created and cloned freely; all of them feed the same
    /// session writer and observe the same connection state.
    #[must_use]
    pub fn interaction_sender(&self) -> InteractionSender {
        InteractionSender::new(self.state_tx.subscribe(), self.outbound_tx.clone())
    }

    /// Returns a watch on the connection state, for presentation-layer
    /// "connected" indicators and tests.
    #[must_use]
    pub fn state_watch(&self) -> watch::Receiver<ConnectionState> {
        self.state_tx.subscribe()
    }

    /// Runs the connect/reconnect cycle forever.
    ///
    /// Each cycle: probe until the backend answers, perform the WebSocket
    /// handshake, dispatch frames until the transport goes away, tear the
    /// session down, wait a fixed delay, repeat. Failures never escape;
    /// they only show up as state transitions and log lines.
    pub async fn run(mut self) {
        loop {
            self.set_state(ConnectionState::Probing);
            probe::wait_until_reachable(&self.http, &self.config).await;

            self.set_state(ConnectionState::Connecting);
            match connect_async(self.config.server_url.as_str()).await {
                Ok((stream, _response)) => {
                    tracing::info!(url = %self.config.server_url, "connection established");
                    // Discard interactions enqueued while closed; a message
                    // sent outside Open is never delivered later.
                    while self.outbound_rx.try_recv().is_ok() {}
                    self.set_state(ConnectionState::Open);
                    self.handler.on_connection_change(true);

                    let end = self.drive_session(stream).await;
                    if end == SessionEnd::Errored {
                        self.set_state(ConnectionState::Errored);
                    }

                    self.set_state(ConnectionState::Closing);
                    self.handler.on_finalize();
                    self.handler.on_connection_change(false);
                }
                Err(err) => {
                    // Never opened: no session, no finalize.
                    tracing::warn!(error = %err, "websocket handshake failed");
                    self.set_state(ConnectionState::Errored);
                }
            }

            self.set_state(ConnectionState::Idle);
            tokio::time::sleep(self.config.reconnect_delay).await;
        }
    }

    /// Reads and dispatches frames until the transport goes away, writing
    /// outbound interaction messages as they arrive.
    async fn drive_session(&mut self, stream: WsStream) -> SessionEnd {
        let (mut sink, mut source) = stream.split();
        let mut session = Session::new();

        loop {
            tokio::select! {
                inbound = source.next() => match inbound {
                    Some(Ok(Message::Text(text))) => {
                        self.dispatch_frame(&mut session, text.as_str());
                    }
                    Some(Ok(Message::Close(frame))) => {
                        match frame {
                            Some(close) => tracing::info!(
                                code = ?close.code,
                                reason = %close.reason,
                                "connection closed cleanly"
                            ),
                            None => tracing::info!("connection closed cleanly"),
                        }
                        return SessionEnd::Clean;
                    }
                    // Ping/pong/binary: transport chatter, not frames.
                    Some(Ok(_)) => {}
                    Some(Err(err)) => {
                        tracing::warn!(error = %err, "transport error, forcing close");
                        return SessionEnd::Errored;
                    }
                    None => {
                        tracing::warn!("connection died without close frame");
                        return SessionEnd::Unclean;
                    }
                },
                Some(message) = self.outbound_rx.recv() => {
                    if let Err(err) = write_interaction(&mut sink, &message).await {
                        tracing::warn!(error = %err, "outbound write failed, forcing close");
                        return SessionEnd::Errored;
                    }
                }
            }
        }
    }

    /// Classifies one text frame and invokes the matching callback.
    ///
    /// Malformed frames are dropped with a warning to keep the session
    /// alive; they never tear the connection down.
    fn dispatch_frame(&mut self, session: &mut Session, raw: &str) {
        match classify(session.phase(), raw) {
            Ok(InboundMessage::Initialization(payload)) => {
                session.begin_streaming();
                self.handler.on_initialize(payload);
            }
            Ok(InboundMessage::Frame(frame)) => self.handler.on_update(frame),
            Ok(InboundMessage::Command(command)) => self.handler.on_command(command),
            Err(err) => tracing::warn!(error = %err, "dropping malformed frame"),
        }
    }

    fn set_state(&self, state: ConnectionState) {
        tracing::debug!(?state, "connection state");
        self.state_tx.send_replace(state);
    }
}

impl<H: TelemetryHandler> std::fmt::Debug for ConnectionManager<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionManager")
            .field("config", &self.config)
            .field("state", &*self.state_tx.borrow())
            .finish_non_exhaustive()
    }
}

/// Serializes an interaction message and writes it as one text frame.
async fn write_interaction(
    sink: &mut WsSink,
    message: &InteractionMessage,
) -> Result<(), ClientError> {
    let json = serde_json::to_string(message)?;
    sink.send(Message::Text(json.into())).await?;
    Ok(())
}
