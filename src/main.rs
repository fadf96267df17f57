//! simviz-client demo entry point.
//!
//! Connects to the simulation backend and logs the telemetry lifecycle.
//! Stands in for a real renderer: anything implementing
//! [`TelemetryHandler`] can be wired in instead.

use tracing_subscriber::EnvFilter;

use simviz_client::config::SimvizConfig;
use simviz_client::connection::ConnectionManager;
use simviz_client::handler::TelemetryHandler;
use simviz_client::protocol::{
    InitializationPayload, InteractionMessage, StateFrame, VisualizationCommand,
};

/// Renderer stand-in that reports every callback through `tracing`.
#[derive(Debug, Default)]
struct TraceRenderer {
    node_count: usize,
}

impl TelemetryHandler for TraceRenderer {
    fn on_initialize(&mut self, payload: InitializationPayload) {
        self.node_count = payload.nodes.len();
        tracing::info!(
            nodes = self.node_count,
            x_range = ?payload.x_range,
            y_range = ?payload.y_range,
            z_range = ?payload.z_range,
            "session initialized"
        );
    }

    fn on_update(&mut self, frame: StateFrame) {
        tracing::info!(
            simulation_time = frame.simulation_time,
            real_time = frame.real_time,
            positions = frame.positions.len(),
            "state frame"
        );
    }

    fn on_command(&mut self, command: VisualizationCommand) {
        tracing::info!(?command, "visualization command");
    }

    fn on_finalize(&mut self) {
        self.node_count = 0;
        tracing::info!("session finalized");
    }

    fn on_connection_change(&mut self, connected: bool) {
        tracing::info!(connected, "connection visibility");
    }
}

// The manager's logic is single-threaded and event-driven; a
// current-thread runtime is all it needs.
#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = SimvizConfig::from_env();
    tracing::info!(
        server = %config.server_url,
        probe = %config.probe_url,
        "starting simviz-client"
    );

    let manager = ConnectionManager::new(config, TraceRenderer::default());

    // Enter on stdin toggles pause/resume, standing in for the UI button.
    let interactions = manager.interaction_sender();
    tokio::spawn(async move {
        use tokio::io::AsyncBufReadExt;
        let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(_)) = lines.next_line().await {
            interactions.send(InteractionMessage::PauseResume);
        }
    });

    tokio::select! {
        () = manager.run() => {}
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutting down");
        }
    }
}
