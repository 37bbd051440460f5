//! Deltas reported by the interaction surface.
//!
//! The rendering canvas reports drags, selections and removals as
//! batches of incremental changes keyed by id. Batches merge into the
//! collections in order, so the last delta for an id wins; node
//! removals cascade to incident edges the same way a delete does,
//! keeping the no-dangling-edges invariant on every path.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::model::Point;

use super::MindMapStore;

/// An incremental node change from the surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeChange {
    /// Drag moved a node.
    Position { id: String, position: Point },
    /// Surface-side selection toggle.
    Select { id: String, selected: bool },
    /// Node removed on the surface (keyboard delete etc).
    Remove { id: String },
}

/// An incremental edge change from the surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EdgeChange {
    Select { id: String, selected: bool },
    Remove { id: String },
}

impl MindMapStore {
    /// Merge a batch of node deltas. Changes referencing ids that are
    /// gone by the time they apply are skipped.
    pub fn apply_node_changes(&mut self, changes: Vec<NodeChange>) {
        let mut structural = false;
        for change in changes {
            match change {
                NodeChange::Position { id, position } => {
                    match self.nodes.iter_mut().find(|n| n.id == id) {
                        Some(node) => node.position = Some(position),
                        None => debug!("position delta for unknown node {}", id),
                    }
                }
                NodeChange::Select { id, selected } => {
                    if selected {
                        if self.node(&id).is_some() {
                            self.selected = Some(id);
                        }
                    } else if self.selected.as_deref() == Some(id.as_str()) {
                        self.selected = None;
                    }
                }
                NodeChange::Remove { id } => {
                    if let Some(index) = self.nodes.iter().position(|n| n.id == id) {
                        self.remove_node_cascading(index);
                        structural = true;
                    } else {
                        debug!("remove delta for unknown node {}", id);
                    }
                }
            }
        }
        if structural {
            self.refresh_counts();
        }
    }

    /// Merge a batch of edge deltas.
    pub fn apply_edge_changes(&mut self, changes: Vec<EdgeChange>) {
        let mut structural = false;
        for change in changes {
            match change {
                EdgeChange::Select { id, selected } => {
                    match self.edges.iter_mut().find(|e| e.id == id) {
                        Some(edge) => edge.selected = selected,
                        None => debug!("select delta for unknown edge {}", id),
                    }
                }
                EdgeChange::Remove { id } => {
                    let before = self.edges.len();
                    self.edges.retain(|e| e.id != id);
                    structural |= self.edges.len() != before;
                }
            }
        }
        if structural {
            self.refresh_counts();
        }
    }
}
