use std::f32::consts::TAU;

use eframe::egui::{Vec2, vec2};

use crate::app::graph::LayoutGraph;

use super::ForceConfig;
use super::chargetree::ChargeTree;

/// Deterministic tiny offset for coincident points, so degenerate pairs
/// separate in a stable direction instead of dividing by zero.
fn jiggle(a: usize, b: usize) -> Vec2 {
    let angle = ((a as f32) * 0.618_034 + (b as f32) * 0.414_214) * TAU;
    vec2(angle.cos(), angle.sin()) * 1e-3
}

/// Spring force pulling each link's endpoints toward the rest distance.
/// Strength and bias follow link degree, so hubs move less than leaves.
pub(super) fn apply_link_force(graph: &mut LayoutGraph, config: &ForceConfig, alpha: f32) {
    for index in 0..graph.links.len() {
        let (source, target) = {
            let link = &graph.links[index];
            (link.source, link.target)
        };
        if source == target {
            continue;
        }

        let source_node = &graph.nodes[source];
        let target_node = &graph.nodes[target];
        let mut delta =
            (target_node.pos + target_node.velocity) - (source_node.pos + source_node.velocity);
        if delta.length_sq() <= 1e-8 {
            delta = jiggle(source, target);
        }

        let distance = delta.length();
        let source_degree = graph.degrees[source].max(1) as f32;
        let target_degree = graph.degrees[target].max(1) as f32;
        let strength = config.link_strength / source_degree.min(target_degree);
        let magnitude = (distance - config.link_distance) / distance * alpha * strength;
        let bias = source_degree / (source_degree + target_degree);

        let correction = delta * magnitude;
        graph.nodes[target].velocity -= correction * bias;
        graph.nodes[source].velocity += correction * (1.0 - bias);
    }
}

/// Many-body charge force via the Barnes-Hut approximation. A negative
/// strength repels, mirroring the sign convention of the config.
pub(super) fn apply_charge_force(
    graph: &mut LayoutGraph,
    tree: &ChargeTree,
    positions: &[Vec2],
    config: &ForceConfig,
    alpha: f32,
) {
    for index in 0..graph.nodes.len() {
        let point = positions[index];
        let mut acceleration = Vec2::ZERO;
        tree.for_each_approximation(index, positions, config.theta, |approximation, charge| {
            let delta = approximation - point;
            let distance_sq = delta.length_sq().max(1.0);
            acceleration += delta * (config.charge_strength * charge * alpha) / distance_sq;
        });
        graph.nodes[index].velocity += acceleration;
    }
}

/// Minimum-separation constraint between node circles at the fixed
/// collision radius, resolved through quadtree range queries so each
/// overlapping pair is pushed apart exactly once.
pub(super) fn apply_collision_force(
    graph: &mut LayoutGraph,
    tree: &ChargeTree,
    positions: &[Vec2],
    adjustments: &mut Vec<Vec2>,
    config: &ForceConfig,
) {
    let min_distance = config.collide_radius * 2.0;
    if min_distance <= 0.0 {
        return;
    }

    adjustments.clear();
    adjustments.resize(positions.len(), Vec2::ZERO);

    for index in 0..positions.len() {
        let point = positions[index];
        tree.for_each_within(point, min_distance, |other| {
            if other <= index {
                return;
            }

            let mut delta = point - positions[other];
            if delta.length_sq() <= 1e-8 {
                delta = jiggle(index, other);
            }
            let distance = delta.length();
            if distance >= min_distance {
                return;
            }

            let push = delta / distance * (min_distance - distance) * 0.5;
            adjustments[index] += push;
            adjustments[other] -= push;
        });
    }

    for (node, adjustment) in graph.nodes.iter_mut().zip(adjustments.iter()) {
        node.velocity += *adjustment;
    }
}

/// Re-centers the layout's centroid on the canvas origin. Pinned nodes stay
/// where the user holds them.
pub(super) fn recenter(graph: &mut LayoutGraph) {
    if graph.nodes.is_empty() {
        return;
    }

    let mut centroid = Vec2::ZERO;
    for node in &graph.nodes {
        centroid += node.pos;
    }
    centroid = centroid / graph.nodes.len() as f32;

    for node in &mut graph.nodes {
        if node.pin.is_none() {
            node.pos -= centroid;
        }
    }
}
