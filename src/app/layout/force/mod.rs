mod chargetree;
mod forces;

use eframe::egui::Vec2;
use log::debug;

use crate::app::graph::LayoutGraph;

use super::Layout;
use chargetree::ChargeTree;
use forces::{apply_charge_force, apply_collision_force, apply_link_force, recenter};

/// The simulation is settled once alpha relaxes below this epsilon.
const ALPHA_MIN: f32 = 0.001;
/// Alpha target while a node is dragged; keeps the simulation hot.
const DRAG_ALPHA_TARGET: f32 = 0.3;
/// Fraction of velocity retained per tick.
const VELOCITY_DECAY: f32 = 0.6;
/// Speed ceiling per tick; keeps positions finite under any force spike.
const MAX_SPEED: f32 = 90.0;
/// Ticks over which alpha decays from 1 to `ALPHA_MIN` while cooling.
const COOLING_TICKS: f32 = 300.0;

#[derive(Clone, Copy, Debug)]
pub(in crate::app) struct ForceConfig {
    /// Rest length of the link springs.
    pub link_distance: f32,
    /// Many-body strength; negative repels.
    pub charge_strength: f32,
    /// Node circle radius for the minimum-separation constraint.
    pub collide_radius: f32,
    /// Scale on the degree-derived link strength.
    pub link_strength: f32,
    /// Barnes-Hut accuracy knob; 0 disables approximation.
    pub theta: f32,
}

impl Default for ForceConfig {
    fn default() -> Self {
        Self {
            link_distance: 60.0,
            charge_strength: -60.0,
            collide_radius: 16.0,
            link_strength: 1.0,
            theta: 0.9,
        }
    }
}

/// Iterative force-directed layout with a decaying alpha. Cooling is the
/// default state; dragging reheats by raising the alpha target. Once halted
/// the instance never mutates positions again.
pub(in crate::app) struct ForceSimulation {
    config: ForceConfig,
    alpha: f32,
    alpha_target: f32,
    alpha_decay: f32,
    halted: bool,
    positions: Vec<Vec2>,
    adjustments: Vec<Vec2>,
}

impl ForceSimulation {
    pub(in crate::app) fn new(config: ForceConfig) -> Self {
        Self {
            config,
            alpha: 1.0,
            alpha_target: 0.0,
            alpha_decay: 1.0 - ALPHA_MIN.powf(1.0 / COOLING_TICKS),
            halted: false,
            positions: Vec::new(),
            adjustments: Vec::new(),
        }
    }

    /// Live parameter updates from the tuning panel; takes effect next tick.
    pub(in crate::app) fn set_config(&mut self, config: ForceConfig) {
        self.config = config;
    }

    /// Raises alpha so a cooled layout starts moving again.
    pub(in crate::app) fn reheat(&mut self, alpha: f32) {
        if !self.halted {
            self.alpha = self.alpha.max(alpha.clamp(0.0, 1.0));
        }
    }

    fn settled(&self) -> bool {
        self.alpha < ALPHA_MIN && self.alpha_target < ALPHA_MIN
    }

    fn tick(&mut self, graph: &mut LayoutGraph) {
        self.alpha += (self.alpha_target - self.alpha) * self.alpha_decay;

        self.positions.clear();
        self.positions.extend(graph.nodes.iter().map(|node| node.pos));
        let tree = ChargeTree::build(&self.positions);

        apply_link_force(graph, &self.config, self.alpha);
        if let Some(tree) = &tree {
            apply_charge_force(graph, tree, &self.positions, &self.config, self.alpha);
            apply_collision_force(graph, tree, &self.positions, &mut self.adjustments, &self.config);
        }

        for node in &mut graph.nodes {
            if let Some(pin) = node.pin {
                node.pos = pin;
                node.velocity = Vec2::ZERO;
                continue;
            }

            node.velocity *= VELOCITY_DECAY;
            let speed = node.velocity.length();
            if speed > MAX_SPEED {
                node.velocity *= MAX_SPEED / speed;
            }
            node.pos += node.velocity;

            // Positions must stay finite for the renderer, whatever the
            // forces did this tick.
            if !node.pos.x.is_finite() || !node.pos.y.is_finite() {
                node.pos = Vec2::ZERO;
                node.velocity = Vec2::ZERO;
            }
        }

        recenter(graph);
    }
}

impl Layout for ForceSimulation {
    fn advance(&mut self, graph: &mut LayoutGraph) -> bool {
        if self.halted || graph.nodes.is_empty() || self.settled() {
            return false;
        }

        self.tick(graph);
        if self.settled() {
            debug!("force simulation settled");
            return false;
        }
        true
    }

    fn halt(&mut self) {
        if !self.halted {
            debug!("force simulation halted");
        }
        self.halted = true;
    }

    fn drag_start(&mut self, graph: &mut LayoutGraph, index: usize) {
        if self.halted {
            return;
        }
        if let Some(node) = graph.nodes.get_mut(index) {
            node.pin = Some(node.pos);
        }
        self.alpha_target = DRAG_ALPHA_TARGET;
    }

    fn drag_to(&mut self, graph: &mut LayoutGraph, index: usize, world: Vec2) {
        if self.halted {
            return;
        }
        if let Some(node) = graph.nodes.get_mut(index) {
            node.pin = Some(world);
        }
    }

    fn drag_end(&mut self, graph: &mut LayoutGraph, index: usize) {
        if let Some(node) = graph.nodes.get_mut(index) {
            node.pin = None;
        }
        self.alpha_target = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::graph::build_layout_graph;
    use crate::data::{GraphLink, GraphNode, NetworkData};
    use eframe::egui::vec2;

    fn node(id: &str) -> GraphNode {
        GraphNode {
            id: id.to_owned(),
            label: None,
            year: None,
            patent_count: None,
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

    fn small_graph() -> LayoutGraph {
        let data = NetworkData {
            nodes: vec![node("a"), node("b"), node("c"), node("d")],
            links: vec![link("a", "b"), link("b", "c"), link("c", "a")],
            meta: None,
        };
        build_layout_graph(&data, None)
    }

    fn run_to_rest(sim: &mut ForceSimulation, graph: &mut LayoutGraph) -> usize {
        let mut ticks = 0;
        while sim.advance(graph) {
            ticks += 1;
            assert!(ticks < 2_000, "simulation failed to settle");
        }
        ticks
    }

    fn snapshot(graph: &LayoutGraph) -> Vec<eframe::egui::Vec2> {
        graph.nodes.iter().map(|node| node.pos).collect()
    }

    #[test]
    fn cooled_simulation_has_finite_positions_and_stops_ticking() {
        let mut graph = small_graph();
        let mut sim = ForceSimulation::new(ForceConfig::default());

        let ticks = run_to_rest(&mut sim, &mut graph);
        assert!(ticks > 0);

        for node in &graph.nodes {
            assert!(node.pos.x.is_finite() && node.pos.y.is_finite());
        }

        let rest = snapshot(&graph);
        assert!(!sim.advance(&mut graph));
        assert_eq!(snapshot(&graph), rest);
    }

    #[test]
    fn drag_pins_then_release_clears_pin_and_target() {
        let mut graph = small_graph();
        let mut sim = ForceSimulation::new(ForceConfig::default());

        sim.drag_start(&mut graph, 0);
        assert!(graph.nodes[0].pin.is_some());
        assert_eq!(sim.alpha_target, DRAG_ALPHA_TARGET);

        sim.drag_to(&mut graph, 0, vec2(42.0, -17.0));
        sim.advance(&mut graph);
        assert_eq!(graph.nodes[0].pos, vec2(42.0, -17.0));

        sim.drag_end(&mut graph, 0);
        assert!(graph.nodes[0].pin.is_none());
        assert_eq!(sim.alpha_target, 0.0);

        // After re-cooling the node rejoins free simulation and the run ends.
        run_to_rest(&mut sim, &mut graph);
        assert!(graph.nodes[0].pin.is_none());
    }

    #[test]
    fn drag_keeps_a_settled_simulation_ticking() {
        let mut graph = small_graph();
        let mut sim = ForceSimulation::new(ForceConfig::default());
        run_to_rest(&mut sim, &mut graph);

        sim.drag_start(&mut graph, 1);
        assert!(sim.advance(&mut graph));
        sim.drag_end(&mut graph, 1);
        run_to_rest(&mut sim, &mut graph);
    }

    #[test]
    fn halt_is_idempotent_and_freezes_positions() {
        let mut graph = small_graph();
        let mut sim = ForceSimulation::new(ForceConfig::default());

        for _ in 0..10 {
            sim.advance(&mut graph);
        }

        sim.halt();
        let frozen = snapshot(&graph);

        assert!(!sim.advance(&mut graph));
        sim.halt();
        assert!(!sim.advance(&mut graph));
        assert_eq!(snapshot(&graph), frozen);
    }

    #[test]
    fn empty_graph_is_a_clean_noop() {
        let mut graph = build_layout_graph(&NetworkData::default(), None);
        let mut sim = ForceSimulation::new(ForceConfig::default());
        assert!(!sim.advance(&mut graph));
    }

    #[test]
    fn reheat_wakes_a_cooled_layout() {
        let mut graph = small_graph();
        let mut sim = ForceSimulation::new(ForceConfig::default());
        run_to_rest(&mut sim, &mut graph);

        sim.reheat(0.5);
        assert!(sim.advance(&mut graph));
        run_to_rest(&mut sim, &mut graph);
    }
}
