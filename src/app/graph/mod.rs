mod build;
mod interaction;
mod view;

use std::collections::HashMap;

use eframe::egui::Vec2;

pub(in crate::app) use build::build_layout_graph;

/// Mutable, layout-owned copy of an input node. Owned exclusively by the
/// active layout pass; rebuilt from scratch whenever the input changes.
pub(in crate::app) struct LayoutNode {
    pub id: String,
    pub label: Option<String>,
    pub year: Option<i32>,
    pub weight: u64,
    pub doctype: Option<String>,
    pub h_index: Option<f64>,
    pub productivity: Option<f64>,
    pub pos: Vec2,
    pub velocity: Vec2,
    /// Set while the node is dragged; overrides simulated motion.
    pub pin: Option<Vec2>,
    pub ring_radius: Option<f32>,
    pub ring_angle: Option<f32>,
    pub base_radius: f32,
}

impl LayoutNode {
    pub(in crate::app) fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }
}

/// Link with both endpoints resolved to node indices at build time. Links
/// naming an unknown id never make it into this set.
pub(in crate::app) struct LayoutLink {
    pub source: usize,
    pub target: usize,
    pub weight: f32,
}

/// Quadratic curve descriptor emitted by the radial engine, one per link.
pub(in crate::app) struct LinkCurve {
    pub start: Vec2,
    pub control: Vec2,
    pub end: Vec2,
}

pub(in crate::app) struct LayoutGraph {
    pub nodes: Vec<LayoutNode>,
    pub links: Vec<LayoutLink>,
    pub index_by_id: HashMap<String, usize>,
    /// Link-degree per node, feeding the link force strength.
    pub degrees: Vec<usize>,
    pub year_domain: (i32, i32),
    pub max_weight: u64,
    /// Present only after a radial pass; force mode draws straight segments.
    pub link_curves: Option<Vec<LinkCurve>>,
    /// `(year, ring radius)` guides for the radial mode backdrop.
    pub ring_radii: Vec<(i32, f32)>,
}

impl LayoutGraph {
    pub(in crate::app) fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(in crate::app) fn neighbors_of(&self, index: usize) -> Vec<usize> {
        let mut neighbors = Vec::new();
        for link in &self.links {
            if link.source == index && link.target != index {
                neighbors.push(link.target);
            } else if link.target == index && link.source != index {
                neighbors.push(link.source);
            }
        }
        neighbors.sort_unstable();
        neighbors.dedup();
        neighbors
    }
}
