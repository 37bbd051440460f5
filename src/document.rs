//
// Source documents: the JSON shape the editor loads and exports.
//
// Import is all-or-nothing: a document is parsed, then validated as a
// whole (unique ids, no dangling edge endpoints) before the store is
// allowed to touch it. A document that fails any check leaves the
// caller's state exactly as it was.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Edge, Node};

/// Parent id → ordered direct child ids. Used only to seed initial
/// layout and levels; never maintained incrementally afterward.
pub type Hierarchy = HashMap<String, Vec<String>>;

/// The JSON document the editor loads and exports.
///
/// Runtime-only node fields (expanded, visible, counts, timestamps)
/// are optional on the way in and populated by the store; the export
/// of a live session is therefore re-importable as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MindMapDocument {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hierarchy: Option<Hierarchy>,
}

/// Why a document was rejected. Nothing here is recoverable by
/// retrying; the document itself has to change.
#[derive(Debug, Clone, Error, Serialize)]
pub enum DocumentError {
    #[error("invalid JSON: {0}")]
    Parse(String),
    #[error("duplicate node id: {0}")]
    DuplicateNodeId(String),
    #[error("duplicate edge id: {0}")]
    DuplicateEdgeId(String),
    #[error("edge {edge_id} references unknown node: {node_id}")]
    DanglingEdge { edge_id: String, node_id: String },
}

impl MindMapDocument {
    /// Parse and validate a document in one step.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let doc: MindMapDocument =
            serde_json::from_str(json).map_err(|e| DocumentError::Parse(e.to_string()))?;
        doc.validate()?;
        Ok(doc)
    }

    /// Check the document invariants: node/edge ids unique, every edge
    /// endpoint present. A dangling edge is a defect, not a valid state.
    pub fn validate(&self) -> Result<(), DocumentError> {
        let mut node_ids: HashSet<&str> = HashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if !node_ids.insert(&node.id) {
                return Err(DocumentError::DuplicateNodeId(node.id.clone()));
            }
        }

        let mut edge_ids: HashSet<&str> = HashSet::with_capacity(self.edges.len());
        for edge in &self.edges {
            if !edge_ids.insert(&edge.id) {
                return Err(DocumentError::DuplicateEdgeId(edge.id.clone()));
            }
            for endpoint in [&edge.source, &edge.target] {
                if !node_ids.contains(endpoint.as_str()) {
                    return Err(DocumentError::DanglingEdge {
                        edge_id: edge.id.clone(),
                        node_id: endpoint.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Serialize for export. A straight structural dump of the current
    /// `{ nodes, edges }`, the same schema the importer accepts.
    pub fn to_json(&self) -> String {
        // Serialization of these plain structs cannot fail.
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EdgeStyle, NodeData, Point};

    fn node(id: &str) -> Node {
        Node {
            id: id.to_string(),
            position: Some(Point { x: 0.0, y: 0.0 }),
            data: NodeData {
                label: id.to_string(),
                ..NodeData::default()
            },
        }
    }

    fn edge(id: &str, source: &str, target: &str) -> Edge {
        Edge {
            id: id.to_string(),
            source: source.to_string(),
            target: target.to_string(),
            style: EdgeStyle::default(),
            selected: false,
        }
    }

    #[test]
    fn test_valid_document_passes() {
        let doc = MindMapDocument {
            nodes: vec![node("a"), node("b")],
            edges: vec![edge("e1", "a", "b")],
            hierarchy: None,
        };
        assert!(doc.validate().is_ok());
    }

    #[test]
    fn test_duplicate_node_id_rejected() {
        let doc = MindMapDocument {
            nodes: vec![node("a"), node("a")],
            edges: vec![],
            hierarchy: None,
        };
        assert!(matches!(
            doc.validate(),
            Err(DocumentError::DuplicateNodeId(id)) if id == "a"
        ));
    }

    #[test]
    fn test_duplicate_edge_id_rejected() {
        let doc = MindMapDocument {
            nodes: vec![node("a"), node("b")],
            edges: vec![edge("e1", "a", "b"), edge("e1", "b", "a")],
            hierarchy: None,
        };
        assert!(matches!(
            doc.validate(),
            Err(DocumentError::DuplicateEdgeId(id)) if id == "e1"
        ));
    }

    #[test]
    fn test_dangling_edge_rejected() {
        let doc = MindMapDocument {
            nodes: vec![node("a")],
            edges: vec![edge("e1", "a", "ghost")],
            hierarchy: None,
        };
        match doc.validate() {
            Err(DocumentError::DanglingEdge { edge_id, node_id }) => {
                assert_eq!(edge_id, "e1");
                assert_eq!(node_id, "ghost");
            }
            other => panic!("expected dangling edge error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_failure_reported() {
        assert!(matches!(
            MindMapDocument::from_json("{ not json"),
            Err(DocumentError::Parse(_))
        ));
    }

    #[test]
    fn test_json_round_trip_preserves_ids_and_pairs() {
        let doc = MindMapDocument {
            nodes: vec![node("a"), node("b"), node("c")],
            edges: vec![edge("e1", "a", "b"), edge("e2", "a", "c")],
            hierarchy: None,
        };
        let reparsed = MindMapDocument::from_json(&doc.to_json()).unwrap();
        let ids: Vec<&str> = reparsed.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        let pairs: Vec<(&str, &str)> = reparsed
            .edges
            .iter()
            .map(|e| (e.source.as_str(), e.target.as_str()))
            .collect();
        assert_eq!(pairs, vec![("a", "b"), ("a", "c")]);
    }
}
