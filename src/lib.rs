//! # simviz-client
//!
//! Reconnecting WebSocket telemetry client for live simulation
//! visualization. The client keeps a persistent connection to a simulation
//! backend, classifies inbound JSON frames into an initialization payload,
//! periodic state frames, or out-of-band visualization commands, and drives
//! lifecycle callbacks while transparently surviving disconnects.
//!
//! ## Architecture
//!
//! ```text
//! Simulation backend (WebSocket + HTTP probe target)
//!     │
//!     ├── Liveness Prober (connection/probe)
//!     ├── Connection Manager (connection/manager)
//!     │       │
//!     │       ├── Message Classifier (protocol/classify)
//!     │       └── TelemetryHandler callbacks (handler)
//!     │
//!     └── Outbound Channel (connection/outbound)
//!             ▲
//!             └── interaction sources (pause/resume, ...)
//! ```
//!
//! Rendering, camera handling, and UI wiring are external collaborators:
//! the renderer implements [`handler::TelemetryHandler`], interaction
//! sources hold a [`connection::InteractionSender`].

pub mod config;
pub mod connection;
pub mod error;
pub mod handler;
pub mod protocol;
