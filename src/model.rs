//
// Graph model: the node/edge collections the store owns and the
// rendering surface consumes.
//
// These are plain data. All behavior lives in the store; the renderer
// receives these structs serialized to JSON and never mutates them.
//
// Runtime-only fields (expanded, visible, counts, timestamps) carry
// serde defaults so a source document may omit them; `initialize`
// populates them.

use serde::{Deserialize, Serialize};

/// Default edge stroke, matching the frontend's neutral gray.
pub const EDGE_STROKE: &str = "#4B5563";
/// Stroke used for edges incident to the hovered node.
pub const EDGE_STROKE_HIGHLIGHT: &str = "#3B82F6";
pub const EDGE_WIDTH: f64 = 2.0;
pub const EDGE_WIDTH_HIGHLIGHT: f64 = 3.0;

/// Level-keyed default node colors: root, category, subcategory,
/// detail, leaf. Levels past the end reuse the last entry.
pub const LEVEL_COLORS: &[&str] = &["#3B82F6", "#10B981", "#8B5CF6", "#F59E0B", "#EF4444"];

/// A position on the unbounded 2-D canvas plane.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Node shape as drawn by the rendering surface.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeShape {
    Circle,
    #[default]
    Oval,
    Rectangle,
    Square,
    Diamond,
}

impl NodeShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeShape::Circle => "circle",
            NodeShape::Oval => "oval",
            NodeShape::Rectangle => "rectangle",
            NodeShape::Square => "square",
            NodeShape::Diamond => "diamond",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "circle" => Some(NodeShape::Circle),
            "oval" => Some(NodeShape::Oval),
            "rectangle" => Some(NodeShape::Rectangle),
            "square" => Some(NodeShape::Square),
            "diamond" => Some(NodeShape::Diamond),
            _ => None,
        }
    }
}

/// The display payload of a node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeData {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Open kind tag: "default", "topic", "subtopic", "detail",
    /// "reference" or a domain-specific variant.
    #[serde(default = "default_kind", rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub shape: NodeShape,
    /// Hex color. Empty in a source document means "derive from level".
    #[serde(default)]
    pub color: String,
    /// Ordered, duplicates permitted.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Depth from the hierarchy root; 0 = root.
    #[serde(default)]
    pub level: u32,
    #[serde(default, rename = "isExpanded")]
    pub expanded: bool,
    #[serde(default, rename = "isVisible")]
    pub visible: bool,
    #[serde(default, rename = "childrenCount")]
    pub children_count: u32,
    #[serde(default, rename = "connectionCount")]
    pub connection_count: u32,
    /// ISO date (date only, e.g. "2026-08-30").
    #[serde(default, rename = "createdAt")]
    pub created_at: String,
    #[serde(default, rename = "updatedAt")]
    pub updated_at: String,
}

fn default_kind() -> String {
    "default".to_string()
}

impl Default for NodeData {
    fn default() -> Self {
        Self {
            label: String::new(),
            summary: None,
            kind: default_kind(),
            shape: NodeShape::default(),
            color: String::new(),
            tags: Vec::new(),
            level: 0,
            expanded: true,
            visible: true,
            children_count: 0,
            connection_count: 0,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }
}

/// A mind-map topic: identity, canvas position, display payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,
    pub data: NodeData,
}

/// Arrow marker descriptor forwarded verbatim to the rendering surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrowMarker {
    #[serde(rename = "type")]
    pub kind: String,
    pub width: f64,
    pub height: f64,
}

impl Default for ArrowMarker {
    fn default() -> Self {
        Self {
            kind: "arrowclosed".to_string(),
            width: 20.0,
            height: 20.0,
        }
    }
}

/// Visual style of an edge. The hover pass rewrites these wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeStyle {
    pub stroke: String,
    #[serde(rename = "strokeWidth")]
    pub stroke_width: f64,
    pub animated: bool,
    #[serde(rename = "markerEnd")]
    pub marker_end: ArrowMarker,
}

impl Default for EdgeStyle {
    fn default() -> Self {
        Self {
            stroke: EDGE_STROKE.to_string(),
            stroke_width: EDGE_WIDTH,
            animated: false,
            marker_end: ArrowMarker::default(),
        }
    }
}

impl EdgeStyle {
    /// Style for an edge incident to the hovered node.
    pub fn highlighted() -> Self {
        Self {
            stroke: EDGE_STROKE_HIGHLIGHT.to_string(),
            stroke_width: EDGE_WIDTH_HIGHLIGHT,
            animated: true,
            marker_end: ArrowMarker::default(),
        }
    }
}

/// A directed connection. Source → target is parent → child in the
/// hierarchy sense used by layout and the drill cursor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub style: EdgeStyle,
    /// Surface-side selection flag, merged in via edge deltas.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub selected: bool,
}

/// Default color for a node at the given hierarchy level.
pub fn level_color(level: u32) -> &'static str {
    LEVEL_COLORS[(level as usize).min(LEVEL_COLORS.len() - 1)]
}
