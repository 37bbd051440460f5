// Radial placement over a parent -> children hierarchy.
//
// The hierarchy mapping comes straight from the source document and is
// used only here: levels and initial coordinates are computed once at
// initialization, then the store owns positions outright.

use std::collections::{HashMap, HashSet, VecDeque};
use std::f64::consts::PI;

use crate::document::Hierarchy;
use crate::model::{Node, Point};

use super::LayoutConfig;

/// Compute initial coordinates for every node.
///
/// Roots (nodes that appear in `nodes` but are nobody's child) are
/// stacked vertically starting at `cfg.center`. Each parent's direct
/// children are distributed evenly on a circle around it, child `i` of
/// `n` siblings at angle `2*PI*i/n`, on a radius that tightens with
/// depth. Deterministic given stable input ordering.
pub fn assign_initial_positions(
    nodes: &[Node],
    hierarchy: &Hierarchy,
    cfg: &LayoutConfig,
) -> HashMap<String, Point> {
    let mut positions: HashMap<String, Point> = HashMap::with_capacity(nodes.len());
    if nodes.is_empty() {
        return positions;
    }

    let children_of: HashSet<&str> = hierarchy
        .values()
        .flat_map(|kids| kids.iter().map(String::as_str))
        .collect();

    // Roots in document order, stacked below the center point.
    let mut queue: VecDeque<(String, u32)> = VecDeque::new();
    let mut root_index = 0usize;
    for node in nodes {
        if children_of.contains(node.id.as_str()) {
            continue;
        }
        let pos = Point {
            x: cfg.center.x,
            y: cfg.center.y + root_index as f64 * cfg.root_spacing,
        };
        positions.insert(node.id.clone(), pos);
        queue.push_back((node.id.clone(), 0));
        root_index += 1;
    }

    // BFS down the hierarchy, placing children around each parent.
    while let Some((parent_id, parent_level)) = queue.pop_front() {
        let Some(child_ids) = hierarchy.get(&parent_id) else {
            continue;
        };
        if child_ids.is_empty() {
            continue;
        }

        let parent_pos = positions[&parent_id];
        let radius = cfg.radius_for_level(parent_level);
        let step = 2.0 * PI / child_ids.len() as f64;

        for (i, child_id) in child_ids.iter().enumerate() {
            if positions.contains_key(child_id) {
                continue;
            }
            let angle = step * i as f64;
            positions.insert(
                child_id.clone(),
                Point {
                    x: parent_pos.x + radius * angle.cos(),
                    y: parent_pos.y + radius * angle.sin(),
                },
            );
            queue.push_back((child_id.clone(), parent_level + 1));
        }
    }

    positions
}

/// Depth of a node below its hierarchy root: 0 for an unparented node,
/// otherwise one more than its parent.
///
/// Precondition: the hierarchy is acyclic. A cyclic mapping would
/// recurse forever; callers guarantee acyclicity, it is not checked
/// here.
pub fn compute_level(node_id: &str, hierarchy: &Hierarchy) -> u32 {
    let parent = hierarchy
        .iter()
        .find(|(_, kids)| kids.iter().any(|k| k == node_id))
        .map(|(parent_id, _)| parent_id.as_str());

    match parent {
        Some(parent_id) => compute_level(parent_id, hierarchy) + 1,
        None => 0,
    }
}

/// Position for a freshly added child, keyed to how many children the
/// parent already has. Siblings fan out progressively; earlier
/// siblings are never recomputed.
pub fn fan_position(parent: Point, existing_children: u32, parent_level: u32, cfg: &LayoutConfig) -> Point {
    // An eighth of a turn per sibling keeps the first few children
    // well separated before the fan wraps.
    let step = PI / 4.0;
    let angle = existing_children as f64 * step;
    let radius = cfg.radius_for_level(parent_level);
    Point {
        x: parent.x + radius * angle.cos(),
        y: parent.y + radius * angle.sin(),
    }
}
