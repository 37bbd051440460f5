//! Output types for React frontend consumption.
//!
//! After every store operation the frontend re-renders from a
//! serialized snapshot of the collections plus the selection and
//! drill-cursor state. Errors travel in-band as a structured field so
//! the frontend can surface them without parsing console output.

use serde::Serialize;

use crate::model::{Edge, Node};
use crate::store::MindMapStore;

/// The combined state snapshot sent to React.
#[derive(Debug, Clone, Serialize)]
pub struct GraphOutput {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovered: Option<String>,
    #[serde(rename = "currentLevel")]
    pub current_level: u32,
    #[serde(rename = "maxLevel")]
    pub max_level: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

/// Error information for the frontend's import/validity banner.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub message: String,
}

impl GraphOutput {
    /// Snapshot the live store state.
    pub fn snapshot(store: &MindMapStore) -> Self {
        Self {
            nodes: store.nodes().to_vec(),
            edges: store.edges().to_vec(),
            selected: store.selected_id().map(str::to_string),
            hovered: store.hovered_id().map(str::to_string),
            current_level: store.current_level(),
            max_level: store.max_level(),
            error: None,
        }
    }

    /// A snapshot carrying an error alongside the (unchanged) state.
    pub fn snapshot_with_error(store: &MindMapStore, message: impl Into<String>) -> Self {
        Self {
            error: Some(ErrorInfo {
                message: message.into(),
            }),
            ..Self::snapshot(store)
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::MindMapDocument;
    use crate::model::{NodeData, Point};

    #[test]
    fn test_snapshot_reflects_store_state() {
        let mut store = MindMapStore::new();
        store
            .initialize(MindMapDocument {
                nodes: vec![Node {
                    id: "root".to_string(),
                    position: Some(Point { x: 1.0, y: 2.0 }),
                    data: NodeData {
                        label: "Root".to_string(),
                        ..NodeData::default()
                    },
                }],
                edges: vec![],
                hierarchy: None,
            })
            .unwrap();
        store.select_node("root");

        let output = GraphOutput::snapshot(&store);
        assert_eq!(output.nodes.len(), 1);
        assert_eq!(output.selected.as_deref(), Some("root"));
        assert!(output.error.is_none());

        let json = output.to_json();
        assert!(json.contains("\"currentLevel\":0"));
        assert!(!json.contains("\"error\""));
    }

    #[test]
    fn test_error_travels_in_band() {
        let store = MindMapStore::new();
        let output = GraphOutput::snapshot_with_error(&store, "invalid JSON: oops");
        let json = output.to_json();
        assert!(json.contains("invalid JSON: oops"));
    }
}
