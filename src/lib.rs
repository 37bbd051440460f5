//! Graph-state core for an interactive mind-map editor.
//!
//! The crate owns the node/edge collections and every interactive
//! mutation over them (selection, hover highlighting, hierarchical
//! add/delete with derived counts, collapse/expand, level drilling,
//! restyling), loads and exports JSON documents, and assigns initial
//! radial layout coordinates. Rendering is external: a React canvas
//! consumes state snapshots over the wasm boundary and reports
//! gestures back by node id.

mod document;
mod layout;
mod model;
mod output;
mod store;
#[cfg(target_arch = "wasm32")]
mod wasm;

pub use document::{DocumentError, Hierarchy, MindMapDocument};
pub use layout::{assign_initial_positions, compute_level, fan_position, LayoutConfig};
pub use model::{ArrowMarker, Edge, EdgeStyle, Node, NodeData, NodeShape, Point};
pub use output::{ErrorInfo, GraphOutput};
pub use store::{AlwaysConfirm, Confirm, EdgeChange, MindMapStore, NodeChange, NodeUpdate};
#[cfg(target_arch = "wasm32")]
pub use wasm::MindMap;
