use std::collections::{BTreeMap, HashMap};

use eframe::egui::{Vec2, vec2};

use crate::app::graph::{LayoutGraph, LinkCurve};
use crate::app::scales::year_sectors;

use super::Layout;

/// Ring radius range for the innermost and outermost year.
pub(in crate::app) const RING_RADIUS_RANGE: (f32, f32) = (120.0, 260.0);

fn ring_radius(year: i32, domain: (i32, i32)) -> f32 {
    let (min_year, max_year) = domain;
    let (min_radius, max_radius) = RING_RADIUS_RANGE;
    if max_year > min_year {
        let t = (year - min_year) as f32 / (max_year - min_year) as f32;
        min_radius + (max_radius - min_radius) * t
    } else {
        // Degenerate single-year domain sits on the middle ring.
        (min_radius + max_radius) * 0.5
    }
}

/// Deterministic placement on concentric year rings with approximate edge
/// bundling: same-year links route through the year's centroid, cross-year
/// links through the midpoint of the two centroids. No tick loop; the whole
/// layout is recomputed from scratch on every input change.
pub(in crate::app) struct RadialLayout {
    computed: bool,
    halted: bool,
}

impl RadialLayout {
    pub(in crate::app) fn new() -> Self {
        Self {
            computed: false,
            halted: false,
        }
    }

    fn compute(graph: &mut LayoutGraph) {
        // Distinct years in ascending order; nodes without a year are left
        // out of radial placement and sit at the canvas origin.
        let mut groups: BTreeMap<i32, Vec<usize>> = BTreeMap::new();
        for (index, node) in graph.nodes.iter().enumerate() {
            if let Some(year) = node.year {
                groups.entry(year).or_default().push(index);
            }
        }

        let years = groups.keys().copied().collect::<Vec<_>>();
        let domain = (
            years.first().copied().unwrap_or(0),
            years.last().copied().unwrap_or(0),
        );
        let sectors = year_sectors(years.len());

        for node in &mut graph.nodes {
            node.pos = Vec2::ZERO;
            node.velocity = Vec2::ZERO;
            node.ring_radius = None;
            node.ring_angle = None;
        }

        graph.ring_radii = years
            .iter()
            .map(|&year| (year, ring_radius(year, domain)))
            .collect();

        let mut centroids: HashMap<i32, Vec2> = HashMap::with_capacity(years.len());
        for ((&year, members), &(sector_start, sector_span)) in groups.iter().zip(sectors.iter()) {
            let radius = ring_radius(year, domain);
            let count = members.len() as f32;

            let mut centroid = Vec2::ZERO;
            for (position_in_group, &index) in members.iter().enumerate() {
                let t = (position_in_group as f32 + 0.5) / count;
                let angle = sector_start + t * sector_span;
                let pos = vec2(angle.cos(), angle.sin()) * radius;

                let node = &mut graph.nodes[index];
                node.pos = pos;
                node.ring_radius = Some(radius);
                node.ring_angle = Some(angle);
                centroid += pos;
            }
            centroids.insert(year, centroid / count);
        }

        let curves = graph
            .links
            .iter()
            .map(|link| {
                let source = &graph.nodes[link.source];
                let target = &graph.nodes[link.target];

                let control = match (source.year, target.year) {
                    (Some(source_year), Some(target_year)) => {
                        let source_centroid = centroids.get(&source_year);
                        let target_centroid = centroids.get(&target_year);
                        match (source_centroid, target_centroid) {
                            (Some(&centroid), _) if source_year == target_year => centroid,
                            (Some(&a), Some(&b)) => (a + b) * 0.5,
                            _ => Vec2::ZERO,
                        }
                    }
                    _ => Vec2::ZERO,
                };

                LinkCurve {
                    start: source.pos,
                    control,
                    end: target.pos,
                }
            })
            .collect();

        graph.link_curves = Some(curves);
    }
}

impl Layout for RadialLayout {
    fn advance(&mut self, graph: &mut LayoutGraph) -> bool {
        if self.halted || graph.nodes.is_empty() {
            return false;
        }
        if !self.computed {
            Self::compute(graph);
            self.computed = true;
        }
        false
    }

    fn halt(&mut self) {
        self.halted = true;
    }
}
