//
// Initial layout for mind-map documents.
//
// Goals:
// - Deterministic: no randomness, same input order => same layout
// - Pure: computes coordinates, never mutates node data
// - Radial: children on circles around their parents, root centered,
//   tighter radii at deeper levels
//
// Submodules:
// - radial: placement + hierarchy level computation

use crate::model::Point;

mod radial;

pub use radial::{assign_initial_positions, compute_level, fan_position};

/// Tunables for radial placement.
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Where the designated root lands.
    pub center: Point,
    /// Circle radius for level-1 children around the root.
    pub base_radius: f64,
    /// Multiplier applied to the radius per extra level of depth.
    pub level_decay: f64,
    /// Radius never shrinks below this.
    pub min_radius: f64,
    /// Vertical spacing between multiple roots.
    pub root_spacing: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            center: Point { x: 400.0, y: 300.0 },
            base_radius: 250.0,
            level_decay: 0.6,
            min_radius: 80.0,
            root_spacing: 150.0,
        }
    }
}

impl LayoutConfig {
    /// Radius of the circle that children of a node at `parent_level`
    /// sit on.
    pub fn radius_for_level(&self, parent_level: u32) -> f64 {
        let r = self.base_radius * self.level_decay.powi(parent_level as i32);
        r.max(self.min_radius)
    }
}
