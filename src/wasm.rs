//! WASM bindings for the mindmap-core library.
//!
//! The React frontend owns one `MindMap` instance and drives every
//! gesture through it; each call returns the full state snapshot as a
//! JSON string for re-rendering. Failures never throw across the
//! boundary: the prior state comes back with an in-band error field.

use wasm_bindgen::prelude::*;

use crate::model::NodeShape;
use crate::output::GraphOutput;
use crate::store::{Confirm, EdgeChange, MindMapStore, NodeChange, NodeUpdate};

/// Install the console logger and panic hook once per page load.
fn init_logging() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = console_log::init_with_level(log::Level::Debug);
        console_error_panic_hook::set_once();
    });
}

/// Delete confirmation backed by the browser's blocking
/// `window.confirm` dialog. Declines when no window is available.
struct BrowserConfirm;

impl Confirm for BrowserConfirm {
    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
}

#[wasm_bindgen]
pub struct MindMap {
    store: MindMapStore,
}

#[wasm_bindgen]
impl MindMap {
    #[wasm_bindgen(constructor)]
    pub fn new() -> MindMap {
        init_logging();
        MindMap {
            store: MindMapStore::new(),
        }
    }

    /// Load a document, replacing all state. On parse or validation
    /// failure the previous state is kept and returned with an error.
    pub fn load_document(&mut self, json: &str) -> String {
        match self.store.load_json(json) {
            Ok(()) => self.snapshot(),
            Err(e) => {
                log::error!("document rejected: {}", e);
                GraphOutput::snapshot_with_error(&self.store, e.to_string()).to_json()
            }
        }
    }

    /// Current state without mutating anything.
    pub fn snapshot(&self) -> String {
        GraphOutput::snapshot(&self.store).to_json()
    }

    /// Export the current `{ nodes, edges }` as importable JSON.
    pub fn export_document(&self) -> String {
        self.store.export_json()
    }

    pub fn select_node(&mut self, id: &str) -> String {
        self.store.select_node(id);
        self.snapshot()
    }

    pub fn hover_node(&mut self, id: &str) -> String {
        self.store.hover_node(id);
        self.snapshot()
    }

    pub fn clear_hover(&mut self) -> String {
        self.store.clear_hover();
        self.snapshot()
    }

    /// Merge a batch of node deltas (drag positions, selections,
    /// removals) as serialized by the canvas.
    pub fn apply_node_changes(&mut self, changes_json: &str) -> String {
        match serde_json::from_str::<Vec<NodeChange>>(changes_json) {
            Ok(changes) => {
                self.store.apply_node_changes(changes);
                self.snapshot()
            }
            Err(e) => {
                log::error!("bad node change batch: {}", e);
                GraphOutput::snapshot_with_error(&self.store, e.to_string()).to_json()
            }
        }
    }

    pub fn apply_edge_changes(&mut self, changes_json: &str) -> String {
        match serde_json::from_str::<Vec<EdgeChange>>(changes_json) {
            Ok(changes) => {
                self.store.apply_edge_changes(changes);
                self.snapshot()
            }
            Err(e) => {
                log::error!("bad edge change batch: {}", e);
                GraphOutput::snapshot_with_error(&self.store, e.to_string()).to_json()
            }
        }
    }

    /// Connect-drag completed between two nodes.
    pub fn connect(&mut self, source: &str, target: &str) -> String {
        self.store.connect(source, target);
        self.snapshot()
    }

    /// Create a node. All arguments optional: no parent means "under
    /// the current selection, else as a new root".
    pub fn add_node(
        &mut self,
        parent: Option<String>,
        kind: Option<String>,
        shape: Option<String>,
    ) -> String {
        let shape = shape.as_deref().and_then(|s| {
            let parsed = NodeShape::from_str(s);
            if parsed.is_none() {
                log::warn!("unknown shape {:?}, using default", s);
            }
            parsed
        });
        self.store.add_node(parent.as_deref(), kind.as_deref(), shape);
        self.snapshot()
    }

    /// Shallow-merge fields (`{ label?, summary?, type?, shape?,
    /// color?, tags?, isExpanded? }`) into a node's data.
    pub fn update_node(&mut self, id: &str, updates_json: &str) -> String {
        match serde_json::from_str::<NodeUpdate>(updates_json) {
            Ok(update) => {
                self.store.update_node(id, update);
                self.snapshot()
            }
            Err(e) => {
                log::error!("bad node update: {}", e);
                GraphOutput::snapshot_with_error(&self.store, e.to_string()).to_json()
            }
        }
    }

    /// Delete a node after a browser confirm dialog.
    pub fn delete_node(&mut self, id: &str) -> String {
        self.store.delete_node(id, &BrowserConfirm);
        self.snapshot()
    }

    /// Restyle a node's shape; empty id targets the selection.
    pub fn change_node_shape(&mut self, id: Option<String>, shape: &str) -> String {
        match NodeShape::from_str(shape) {
            Some(shape) => {
                self.store.change_node_shape(id.as_deref(), shape);
                self.snapshot()
            }
            None => {
                log::warn!("unknown shape {:?}", shape);
                GraphOutput::snapshot_with_error(&self.store, format!("unknown shape: {}", shape))
                    .to_json()
            }
        }
    }

    /// Recolor a node; empty id targets the selection.
    pub fn change_node_color(&mut self, id: Option<String>, color: &str) -> String {
        self.store.change_node_color(id.as_deref(), color);
        self.snapshot()
    }

    pub fn expand_all(&mut self) -> String {
        self.store.expand_all();
        self.snapshot()
    }

    pub fn collapse_all(&mut self) -> String {
        self.store.collapse_all();
        self.snapshot()
    }

    pub fn drill_down(&mut self) -> String {
        self.store.drill_down();
        self.snapshot()
    }

    pub fn drill_up(&mut self) -> String {
        self.store.drill_up();
        self.snapshot()
    }
}

impl Default for MindMap {
    fn default() -> Self {
        Self::new()
    }
}
