//! Wire message types: initialization payload, state frames, commands,
//! and outbound interaction messages.
//!
//! All messages travel as single JSON objects over the WebSocket. Inbound
//! tagged unions dispatch on the `command` field; outbound ones on the
//! `interaction` field.

use serde::{Deserialize, Serialize};

/// First message of every session: the node roster and scene bounds.
///
/// Sent by the backend exactly once per connection, before any state frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitializationPayload {
    /// Ordered node identifiers. Positions in later [`StateFrame`]s and node
    /// indices in [`VisualizationCommand`]s refer to this order.
    pub nodes: Vec<String>,
    /// Scene extent along the x axis as `[min, max]`.
    pub x_range: [f64; 2],
    /// Scene extent along the y axis as `[min, max]`.
    pub y_range: [f64; 2],
    /// Scene extent along the z axis as `[min, max]`.
    pub z_range: [f64; 2],
}

impl InitializationPayload {
    /// Checks the structural invariants: node identifiers are unique and
    /// every axis range satisfies `min <= max`.
    ///
    /// # Errors
    ///
    /// Returns a description of the first violated invariant.
    pub fn validate(&self) -> Result<(), String> {
        let mut seen = std::collections::HashSet::new();
        for node in &self.nodes {
            if !seen.insert(node.as_str()) {
                return Err(format!("duplicate node identifier: {node}"));
            }
        }
        for (axis, range) in [("x", self.x_range), ("y", self.y_range), ("z", self.z_range)] {
            let [min, max] = range;
            if min > max || min.is_nan() || max.is_nan() {
                return Err(format!("{axis}_range is not ordered: [{min}, {max}]"));
            }
        }
        Ok(())
    }
}

/// Periodic simulation snapshot: one position and one tracked-variable
/// record per node, in initialization order.
///
/// Both time scalars are non-decreasing across the frames of a session;
/// the consumer relies on that, the classifier does not check it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateFrame {
    /// 3-D position per node, same cardinality and order as the
    /// initialization node list.
    pub positions: Vec<[f64; 3]>,
    /// Simulated time in seconds.
    pub simulation_time: f64,
    /// Wall-clock time in seconds.
    pub real_time: f64,
    /// Opaque per-node records, passed through to the renderer untouched.
    pub tracked_variables: Vec<serde_json::Value>,
}

/// Out-of-band visualization command, dispatched on the `command` field
/// with its arguments under `payload`.
///
/// Node indices refer to the initialization node list; bounds checking
/// against the current roster is the renderer's responsibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", content = "payload", rename_all = "snake_case")]
pub enum VisualizationCommand {
    /// Recolor a single node.
    PaintNode {
        /// Index into the initialization node list.
        node_id: usize,
        /// RGB color, one byte per channel.
        color: [u8; 3],
    },
    /// Show or hide the identifier label of a single node.
    ShowId {
        /// Index into the initialization node list.
        node_id: usize,
        /// `true` to show the label, `false` to hide it.
        show: bool,
    },
    /// Recolor the scene background.
    PaintEnvironment {
        /// RGB color, float components in `0.0..=1.0`.
        color: [f32; 3],
    },
    /// Resize every node marker.
    ResizeNodes {
        /// New marker radius in scene units.
        size: f64,
    },
}

/// Client-originated interaction message, dispatched on the `interaction`
/// field. Closed union; new variants extend the wire contract without
/// breaking it because the receiver matches on the same field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "interaction")]
pub enum InteractionMessage {
    /// Toggle the simulation between running and paused.
    #[serde(rename = "pause/resume")]
    PauseResume,
}

#[cfg(test)]
#[allow(clippy::panic, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn init_payload() -> InitializationPayload {
        InitializationPayload {
            nodes: vec!["a".to_string(), "b".to_string()],
            x_range: [0.0, 10.0],
            y_range: [0.0, 10.0],
            z_range: [0.0, 5.0],
        }
    }

    #[test]
    fn initialization_roundtrips() {
        let payload = init_payload();
        let Ok(json) = serde_json::to_string(&payload) else {
            panic!("serialization failed");
        };
        let Ok(back) = serde_json::from_str::<InitializationPayload>(&json) else {
            panic!("deserialization failed");
        };
        assert_eq!(back, payload);
    }

    #[test]
    fn validate_accepts_well_formed_payload() {
        assert!(init_payload().validate().is_ok());
    }

    #[test]
    fn validate_rejects_duplicate_nodes() {
        let mut payload = init_payload();
        payload.nodes.push("a".to_string());
        assert!(payload.validate().is_err());
    }

    #[test]
    fn validate_rejects_inverted_range() {
        let mut payload = init_payload();
        payload.y_range = [10.0, 0.0];
        assert!(payload.validate().is_err());
    }

    #[test]
    fn validate_rejects_nan_range() {
        let mut payload = init_payload();
        payload.z_range = [f64::NAN, 1.0];
        assert!(payload.validate().is_err());
    }

    #[test]
    fn command_decodes_from_tagged_json() {
        let json = r#"{"command":"resize_nodes","payload":{"size":0.5}}"#;
        let Ok(cmd) = serde_json::from_str::<VisualizationCommand>(json) else {
            panic!("decode failed");
        };
        assert_eq!(cmd, VisualizationCommand::ResizeNodes { size: 0.5 });
    }

    #[test]
    fn paint_node_decodes_index_and_color() {
        let json = r#"{"command":"paint_node","payload":{"node_id":1,"color":[255,0,64]}}"#;
        let Ok(cmd) = serde_json::from_str::<VisualizationCommand>(json) else {
            panic!("decode failed");
        };
        assert_eq!(
            cmd,
            VisualizationCommand::PaintNode {
                node_id: 1,
                color: [255, 0, 64],
            }
        );
    }

    #[test]
    fn unknown_command_discriminant_is_an_error() {
        let json = r#"{"command":"explode_nodes","payload":{}}"#;
        assert!(serde_json::from_str::<VisualizationCommand>(json).is_err());
    }

    #[test]
    fn interaction_serializes_to_discriminant_only() {
        let Ok(json) = serde_json::to_string(&InteractionMessage::PauseResume) else {
            panic!("serialization failed");
        };
        assert_eq!(json, r#"{"interaction":"pause/resume"}"#);
    }

    #[test]
    fn state_frame_decodes() {
        let json = r#"{"positions":[[1.0,2.0,3.0],[4.0,5.0,6.0]],"simulation_time":1.5,"real_time":1.6,"tracked_variables":[{},{}]}"#;
        let Ok(frame) = serde_json::from_str::<StateFrame>(json) else {
            panic!("decode failed");
        };
        assert_eq!(frame.positions.len(), 2);
        assert_eq!(frame.positions[0], [1.0, 2.0, 3.0]);
        assert_eq!(frame.tracked_variables.len(), 2);
    }
}
