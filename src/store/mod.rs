//
// The graph state store: single owner of the node/edge collections,
// selection/hover state and the hierarchy drill cursor.
//
// Every interactive mutation goes through the operations here so the
// derived fields (children/connection counts, selection consistency,
// visibility) stay correct. All operations are synchronous and run to
// completion; there is no background work and no timers. Operations
// that reference an id absent from the collections are logged no-ops,
// never panics - interactive events may race against just-completed
// deletions.
//
// Selection and hover are stored as ids, not node clones, so an
// update can never leave a stale duplicate behind.

use std::collections::HashMap;

use chrono::Utc;
use log::{debug, warn};

use crate::document::{DocumentError, MindMapDocument};
use crate::layout::{assign_initial_positions, compute_level, fan_position, LayoutConfig};
use crate::model::{level_color, Edge, EdgeStyle, Node, NodeData, NodeShape, Point};

mod changes;

pub use changes::{EdgeChange, NodeChange};

/// Fallback spot for the first root node created on an empty canvas.
const ROOT_X: f64 = 400.0;
/// Vertical gap between a new root and the lowest existing node.
const ROOT_Y_STEP: f64 = 150.0;

/// Synchronous yes/no gate for destructive operations.
///
/// The browser frontend backs this with `window.confirm`; tests and
/// non-interactive embeddings supply their own policy.
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

/// Policy that approves everything. For embeddings with no user to ask.
pub struct AlwaysConfirm;

impl Confirm for AlwaysConfirm {
    fn confirm(&self, _message: &str) -> bool {
        true
    }
}

/// Optional field updates for [`MindMapStore::update_node`]. Fields
/// left as `None` are untouched; `updated_at` is always restamped.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct NodeUpdate {
    pub label: Option<String>,
    pub summary: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub shape: Option<NodeShape>,
    pub color: Option<String>,
    pub tags: Option<Vec<String>>,
    #[serde(rename = "isExpanded")]
    pub expanded: Option<bool>,
}

pub struct MindMapStore {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    selected: Option<String>,
    hovered: Option<String>,
    current_level: u32,
    max_level: u32,
    layout: LayoutConfig,
    next_node_id: u64,
    next_edge_id: u64,
}

impl Default for MindMapStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MindMapStore {
    pub fn new() -> Self {
        Self::with_layout(LayoutConfig::default())
    }

    pub fn with_layout(layout: LayoutConfig) -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            selected: None,
            hovered: None,
            current_level: 0,
            max_level: 0,
            layout,
            next_node_id: 1,
            next_edge_id: 1,
        }
    }

    // ------------------------------------------------------------------
    // Read access. The collections are owned exclusively by the store;
    // callers only ever see them by reference.

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn selected_node(&self) -> Option<&Node> {
        self.selected.as_deref().and_then(|id| self.node(id))
    }

    pub fn hovered_node(&self) -> Option<&Node> {
        self.hovered.as_deref().and_then(|id| self.node(id))
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn hovered_id(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    pub fn current_level(&self) -> u32 {
        self.current_level
    }

    pub fn max_level(&self) -> u32 {
        self.max_level
    }

    // ------------------------------------------------------------------
    // Document lifecycle

    /// Replace the collections wholesale from a validated document.
    ///
    /// Levels come from the document hierarchy where one is present;
    /// nodes the document leaves unpositioned get radial layout
    /// coordinates. Every node starts expanded; visibility reflects
    /// the drill cursor, which resets to 0. All-or-nothing: a document
    /// that fails validation leaves the previous state untouched.
    pub fn initialize(&mut self, document: MindMapDocument) -> Result<(), DocumentError> {
        document.validate()?;

        let MindMapDocument {
            mut nodes,
            edges,
            hierarchy,
        } = document;

        let hierarchy = hierarchy.unwrap_or_default();
        let positions = assign_initial_positions(&nodes, &hierarchy, &self.layout);
        let today = today();

        for node in &mut nodes {
            if !hierarchy.is_empty() {
                node.data.level = compute_level(&node.id, &hierarchy);
            }
            if node.position.is_none() {
                node.position = positions.get(&node.id).copied().or(Some(Point::default()));
            }
            if node.data.color.is_empty() {
                node.data.color = level_color(node.data.level).to_string();
            }
            if node.data.created_at.is_empty() {
                node.data.created_at = today.clone();
            }
            if node.data.updated_at.is_empty() {
                node.data.updated_at = today.clone();
            }
            node.data.expanded = true;
        }

        self.nodes = nodes;
        self.edges = edges;
        self.selected = None;
        self.hovered = None;
        self.current_level = 0;
        self.max_level = self.nodes.iter().map(|n| n.data.level).max().unwrap_or(0);
        self.bump_counters_past_existing_ids();
        self.refresh_counts();
        self.refresh_visibility();

        debug!(
            "initialized mind map: {} nodes, {} edges, max level {}",
            self.nodes.len(),
            self.edges.len(),
            self.max_level
        );
        Ok(())
    }

    /// Import a JSON document. All-or-nothing: on any parse or
    /// validation failure the current state is left untouched.
    pub fn load_json(&mut self, json: &str) -> Result<(), DocumentError> {
        let document = MindMapDocument::from_json(json)?;
        self.initialize(document)
    }

    /// Snapshot the current `{ nodes, edges }` as an importable JSON
    /// document.
    pub fn export_json(&self) -> String {
        MindMapDocument {
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
            hierarchy: None,
        }
        .to_json()
    }

    // ------------------------------------------------------------------
    // Selection and hover

    /// Select a node. Clicking the already-selected node again toggles
    /// its expanded flag (click-again-to-collapse).
    pub fn select_node(&mut self, id: &str) {
        let Some(index) = self.node_index(id) else {
            debug!("select on unknown node {}, ignoring", id);
            return;
        };

        if self.selected.as_deref() == Some(id) {
            let node = &mut self.nodes[index];
            node.data.expanded = !node.data.expanded;
            node.data.updated_at = today();
        }
        self.selected = Some(id.to_string());
    }

    /// Hover a node: every incident edge gets the highlight style,
    /// every other edge the default. A full restyle pass over the edge
    /// collection - O(edges) per hover event, fine at interactive
    /// scale - which also makes repeated hovers idempotent.
    pub fn hover_node(&mut self, id: &str) {
        if self.node_index(id).is_none() {
            debug!("hover on unknown node {}, ignoring", id);
            return;
        }
        self.hovered = Some(id.to_string());
        for edge in &mut self.edges {
            edge.style = if edge.source == id || edge.target == id {
                EdgeStyle::highlighted()
            } else {
                EdgeStyle::default()
            };
        }
    }

    /// Clear hover and revert every edge to the default style.
    pub fn clear_hover(&mut self) {
        self.hovered = None;
        for edge in &mut self.edges {
            edge.style = EdgeStyle::default();
        }
    }

    // ------------------------------------------------------------------
    // Structural mutation

    /// Append a default-styled edge between two existing nodes.
    /// Parallel duplicates and cycles are permitted; only the ids have
    /// to resolve.
    pub fn connect(&mut self, source: &str, target: &str) {
        if self.node_index(source).is_none() || self.node_index(target).is_none() {
            warn!("connect {} -> {}: unknown endpoint, ignoring", source, target);
            return;
        }
        let id = format!("edge-{}", self.next_edge_id);
        self.next_edge_id += 1;
        self.edges.push(Edge {
            id,
            source: source.to_string(),
            target: target.to_string(),
            style: EdgeStyle::default(),
            selected: false,
        });
        self.refresh_counts();
    }

    /// Create a node, optionally as a child of `parent` (falling back
    /// to the current selection, then to root creation). Returns the
    /// fresh node id; the new node becomes the selection.
    pub fn add_node(
        &mut self,
        parent: Option<&str>,
        kind: Option<&str>,
        shape: Option<NodeShape>,
    ) -> String {
        let kind = kind.unwrap_or("default");

        // Effective parent: explicit id if it resolves, else the
        // current selection. An unresolvable id falls through to root
        // creation rather than failing the gesture.
        let parent_id = parent
            .map(str::to_string)
            .or_else(|| self.selected.clone())
            .filter(|id| self.node_index(id).is_some());

        let (position, level) = match parent_id.as_deref().and_then(|id| self.node(id)) {
            Some(p) => (
                fan_position(
                    p.position.unwrap_or_default(),
                    p.data.children_count,
                    p.data.level,
                    &self.layout,
                ),
                p.data.level + 1,
            ),
            None => (self.next_root_position(), 0),
        };

        let id = format!("node-{}", self.next_node_id);
        self.next_node_id += 1;
        let today = today();

        self.nodes.push(Node {
            id: id.clone(),
            position: Some(position),
            data: NodeData {
                label: format!("New {} Node", kind),
                summary: Some("Click to edit this node".to_string()),
                kind: kind.to_string(),
                shape: shape.unwrap_or_default(),
                color: level_color(level).to_string(),
                tags: vec!["new".to_string()],
                level,
                expanded: true,
                visible: level <= self.current_level,
                children_count: 0,
                connection_count: 0,
                created_at: today.clone(),
                updated_at: today,
            },
        });

        if let Some(parent_id) = parent_id {
            self.edges.push(Edge {
                id: format!("edge-{}-{}", parent_id, id),
                source: parent_id,
                target: id.clone(),
                style: EdgeStyle::default(),
                selected: false,
            });
        }

        self.max_level = self.max_level.max(level);
        self.refresh_counts();
        self.selected = Some(id.clone());
        id
    }

    /// Shallow-merge the given fields into a node's data payload and
    /// restamp `updated_at`.
    pub fn update_node(&mut self, id: &str, update: NodeUpdate) {
        let Some(index) = self.node_index(id) else {
            debug!("update on unknown node {}, ignoring", id);
            return;
        };
        let data = &mut self.nodes[index].data;
        if let Some(label) = update.label {
            data.label = label;
        }
        if let Some(summary) = update.summary {
            data.summary = Some(summary);
        }
        if let Some(kind) = update.kind {
            data.kind = kind;
        }
        if let Some(shape) = update.shape {
            data.shape = shape;
        }
        if let Some(color) = update.color {
            data.color = color;
        }
        if let Some(tags) = update.tags {
            data.tags = tags;
        }
        if let Some(expanded) = update.expanded {
            data.expanded = expanded;
        }
        data.updated_at = today();
    }

    /// Delete a node and every incident edge, gated on the injected
    /// confirmation policy. Returns whether the deletion happened.
    /// Former parents see their children count drop by one (the counts
    /// are recomputed from the remaining edges, so they floor at zero).
    pub fn delete_node(&mut self, id: &str, confirm: &dyn Confirm) -> bool {
        let Some(index) = self.node_index(id) else {
            debug!("delete on unknown node {}, ignoring", id);
            return false;
        };

        let label = self.nodes[index].data.label.clone();
        let message = format!("Delete node \"{}\" and all its connections?", label);
        if !confirm.confirm(&message) {
            debug!("delete of {} declined", id);
            return false;
        }

        self.remove_node_cascading(index);
        self.refresh_counts();
        self.max_level = self.nodes.iter().map(|n| n.data.level).max().unwrap_or(0);
        self.current_level = self.current_level.min(self.max_level);
        true
    }

    /// Restyle a node's shape. `None` targets the current selection -
    /// toolbar buttons have no node context of their own.
    pub fn change_node_shape(&mut self, id: Option<&str>, shape: NodeShape) {
        if let Some(id) = self.resolve_target(id) {
            self.update_node(
                &id,
                NodeUpdate {
                    shape: Some(shape),
                    ..NodeUpdate::default()
                },
            );
        }
    }

    /// Recolor a node. `None` targets the current selection.
    pub fn change_node_color(&mut self, id: Option<&str>, color: &str) {
        if let Some(id) = self.resolve_target(id) {
            self.update_node(
                &id,
                NodeUpdate {
                    color: Some(color.to_string()),
                    ..NodeUpdate::default()
                },
            );
        }
    }

    // ------------------------------------------------------------------
    // Hierarchy: expand/collapse flags and the level drill cursor

    /// Expand every node and open the drill cursor to the deepest
    /// level.
    pub fn expand_all(&mut self) {
        for node in &mut self.nodes {
            node.data.expanded = true;
        }
        self.current_level = self.max_level;
        self.refresh_visibility();
    }

    /// Collapse every node and reset the drill cursor to the root
    /// level.
    pub fn collapse_all(&mut self) {
        for node in &mut self.nodes {
            node.data.expanded = false;
        }
        self.current_level = 0;
        self.refresh_visibility();
    }

    /// Reveal one more hierarchy level, clamped at the deepest.
    pub fn drill_down(&mut self) {
        self.current_level = (self.current_level + 1).min(self.max_level);
        self.refresh_visibility();
    }

    /// Hide the deepest visible hierarchy level, clamped at the root.
    pub fn drill_up(&mut self) {
        self.current_level = self.current_level.saturating_sub(1);
        self.refresh_visibility();
    }

    // ------------------------------------------------------------------
    // Internals

    fn node_index(&self, id: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n.id == id)
    }

    fn resolve_target(&self, id: Option<&str>) -> Option<String> {
        id.map(str::to_string).or_else(|| self.selected.clone())
    }

    /// Remove the node at `index` plus every edge touching it, and
    /// drop any selection/hover that referenced it. Callers refresh
    /// counts afterward.
    pub(crate) fn remove_node_cascading(&mut self, index: usize) {
        let id = self.nodes.remove(index).id;
        self.edges.retain(|e| e.source != id && e.target != id);
        if self.selected.as_deref() == Some(id.as_str()) {
            self.selected = None;
        }
        if self.hovered.as_deref() == Some(id.as_str()) {
            self.hovered = None;
        }
    }

    /// Recompute children/connection counts authoritatively from the
    /// edge collection. Runs after every structural mutation instead
    /// of ad-hoc increments at each call site, so the counts cannot
    /// drift.
    pub(crate) fn refresh_counts(&mut self) {
        let mut outgoing: HashMap<String, u32> = HashMap::new();
        let mut incident: HashMap<String, u32> = HashMap::new();
        for edge in &self.edges {
            *outgoing.entry(edge.source.clone()).or_default() += 1;
            *incident.entry(edge.source.clone()).or_default() += 1;
            *incident.entry(edge.target.clone()).or_default() += 1;
        }
        for node in &mut self.nodes {
            node.data.children_count = outgoing.get(&node.id).copied().unwrap_or(0);
            node.data.connection_count = incident.get(&node.id).copied().unwrap_or(0);
        }
    }

    /// Visibility is purely a function of the drill cursor: a node is
    /// visible when its level is at or above the cursor.
    fn refresh_visibility(&mut self) {
        for node in &mut self.nodes {
            node.data.visible = node.data.level <= self.current_level;
        }
    }

    /// Root creation heuristic: below the lowest existing node.
    fn next_root_position(&self) -> Point {
        let max_y = self
            .nodes
            .iter()
            .filter_map(|n| n.position)
            .map(|p| p.y)
            .fold(f64::NEG_INFINITY, f64::max);
        if max_y.is_finite() {
            Point { x: ROOT_X, y: max_y + ROOT_Y_STEP }
        } else {
            Point { x: ROOT_X, y: 0.0 }
        }
    }

    /// Fresh ids are monotonic; make sure the counters start past any
    /// counter-shaped id the loaded document already uses.
    fn bump_counters_past_existing_ids(&mut self) {
        for node in &self.nodes {
            if let Some(n) = numeric_suffix(&node.id, "node-") {
                self.next_node_id = self.next_node_id.max(n + 1);
            }
        }
        for edge in &self.edges {
            if let Some(n) = numeric_suffix(&edge.id, "edge-") {
                self.next_edge_id = self.next_edge_id.max(n + 1);
            }
        }
    }
}

fn numeric_suffix(id: &str, prefix: &str) -> Option<u64> {
    id.strip_prefix(prefix)?.parse().ok()
}

/// Today's date, date-only ISO form.
fn today() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}
