use std::collections::HashMap;
use std::f32::consts::TAU;

use eframe::egui::{Vec2, vec2};
use log::debug;

use crate::data::NetworkData;
use crate::util::stable_pair;

use super::super::scales::{weight_radius, year_domain};
use super::{LayoutGraph, LayoutLink, LayoutNode};

const SEED_RADIUS: f32 = 180.0;
const SEED_JITTER: f32 = 40.0;

/// Optional truncation applied before layout ever sees the data: keep the
/// `cap` heaviest nodes, preserving input order among the survivors. The
/// layout algorithms themselves never truncate.
fn select_nodes(data: &NetworkData, max_nodes: Option<usize>) -> Vec<usize> {
    let all = || (0..data.nodes.len()).collect::<Vec<_>>();

    let Some(cap) = max_nodes else {
        return all();
    };
    if data.nodes.len() <= cap {
        return all();
    }

    let mut ranked = all();
    ranked.sort_by(|&a, &b| {
        data.nodes[b]
            .weight()
            .cmp(&data.nodes[a].weight())
            .then(a.cmp(&b))
    });
    ranked.truncate(cap);
    ranked.sort_unstable();
    ranked
}

/// Deterministic initial placement: a circle walk with hash-seeded jitter so
/// identical inputs start the simulation from identical positions.
fn seed_position(id: &str, index: usize, total: usize) -> Vec2 {
    let angle = (index as f32 / total.max(1) as f32) * TAU;
    let (jx, jy) = stable_pair(id);
    vec2(angle.cos(), angle.sin()) * SEED_RADIUS + vec2(jx, jy) * SEED_JITTER
}

/// Copies the input records into a layout-owned graph: nodes become mutable
/// [`LayoutNode`]s, links are resolved to node indices, and links whose
/// endpoint id is absent are silently dropped. Multi-edges and self-edges
/// are kept as-is.
pub(in crate::app) fn build_layout_graph(
    data: &NetworkData,
    max_nodes: Option<usize>,
) -> LayoutGraph {
    let kept = select_nodes(data, max_nodes);

    let domain = year_domain(
        kept.iter()
            .filter_map(|&index| data.nodes[index].year),
    );
    let max_weight = kept
        .iter()
        .map(|&index| data.nodes[index].weight())
        .max()
        .unwrap_or(0);

    let mut nodes = Vec::with_capacity(kept.len());
    let mut index_by_id = HashMap::with_capacity(kept.len());
    for &input_index in &kept {
        let record = &data.nodes[input_index];
        if index_by_id.contains_key(&record.id) {
            continue;
        }

        let slot = nodes.len();
        index_by_id.insert(record.id.clone(), slot);
        let weight = record.weight();
        nodes.push(LayoutNode {
            id: record.id.clone(),
            label: record.label.clone(),
            year: record.year,
            weight,
            doctype: record.doctype.clone(),
            h_index: record.h_index,
            productivity: record.productivity,
            pos: seed_position(&record.id, slot, kept.len()),
            velocity: Vec2::ZERO,
            pin: None,
            ring_radius: None,
            ring_angle: None,
            base_radius: weight_radius(weight, max_weight),
        });
    }

    let mut links = Vec::with_capacity(data.links.len());
    let mut dropped = 0usize;
    for link in &data.links {
        let (Some(&source), Some(&target)) = (
            index_by_id.get(&link.source),
            index_by_id.get(&link.target),
        ) else {
            dropped += 1;
            continue;
        };

        links.push(LayoutLink {
            source,
            target,
            weight: link.weight.unwrap_or(1.0) as f32,
        });
    }
    if dropped > 0 {
        debug!("dropped {dropped} links with unresolved endpoints");
    }

    let mut degrees = vec![0usize; nodes.len()];
    for link in &links {
        degrees[link.source] += 1;
        degrees[link.target] += 1;
    }

    LayoutGraph {
        nodes,
        links,
        index_by_id,
        degrees,
        year_domain: domain,
        max_weight,
        link_curves: None,
        ring_radii: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{GraphLink, GraphNode};

    fn node(id: &str, year: Option<i32>, weight: u64) -> GraphNode {
        GraphNode {
            id: id.to_owned(),
            label: None,
            year,
            patent_count: Some(weight),
            doctype: None,
            h_index: None,
            productivity: None,
        }
    }

    fn link(source: &str, target: &str) -> GraphLink {
        GraphLink {
            source: source.to_owned(),
            target: target.to_owned(),
            weight: None,
        }
    }

    fn network(nodes: Vec<GraphNode>, links: Vec<GraphLink>) -> NetworkData {
        NetworkData {
            nodes,
            links,
            meta: None,
        }
    }

    #[test]
    fn dangling_links_are_silently_dropped() {
        let data = network(
            vec![node("A", None, 0), node("B", None, 0)],
            vec![link("A", "B"), link("A", "ghost")],
        );

        let graph = build_layout_graph(&data, None);
        assert_eq!(graph.links.len(), 1);
        assert_eq!(graph.links[0].source, graph.index_by_id["A"]);
        assert_eq!(graph.links[0].target, graph.index_by_id["B"]);
    }

    #[test]
    fn multi_edges_and_self_edges_survive() {
        let data = network(
            vec![node("A", None, 0), node("B", None, 0)],
            vec![link("A", "B"), link("A", "B"), link("B", "B")],
        );

        let graph = build_layout_graph(&data, None);
        assert_eq!(graph.links.len(), 3);
    }

    #[test]
    fn max_nodes_prefilter_caps_before_layout() {
        let data = network(
            vec![
                node("light", None, 1),
                node("heavy", None, 50),
                node("medium", None, 10),
            ],
            vec![
                link("light", "heavy"),
                link("heavy", "medium"),
                link("light", "medium"),
            ],
        );

        let graph = build_layout_graph(&data, Some(2));
        assert_eq!(graph.nodes.len(), 2);
        assert!(graph.index_by_id.contains_key("heavy"));
        assert!(graph.index_by_id.contains_key("medium"));
        // Only the heavy-medium link keeps both endpoints.
        assert_eq!(graph.links.len(), 1);
    }

    #[test]
    fn seeded_positions_are_deterministic_and_finite() {
        let data = network(
            vec![node("A", Some(2020), 3), node("B", Some(2022), 7)],
            vec![link("A", "B")],
        );

        let first = build_layout_graph(&data, None);
        let second = build_layout_graph(&data, None);
        for (a, b) in first.nodes.iter().zip(second.nodes.iter()) {
            assert_eq!(a.pos, b.pos);
            assert!(a.pos.x.is_finite() && a.pos.y.is_finite());
        }
    }

    #[test]
    fn degrees_count_resolved_link_endpoints() {
        let data = network(
            vec![node("A", None, 0), node("B", None, 0), node("C", None, 0)],
            vec![link("A", "B"), link("A", "C")],
        );

        let graph = build_layout_graph(&data, None);
        assert_eq!(graph.degrees[graph.index_by_id["A"]], 2);
        assert_eq!(graph.degrees[graph.index_by_id["B"]], 1);
    }

    #[test]
    fn empty_input_builds_an_empty_graph() {
        let graph = build_layout_graph(&NetworkData::default(), None);
        assert!(graph.is_empty());
        assert!(graph.links.is_empty());
        assert_eq!(graph.year_domain, crate::app::scales::YEAR_FALLBACK_DOMAIN);
    }
}
