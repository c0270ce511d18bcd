mod force;
mod radial;

use eframe::egui::Vec2;

pub(in crate::app) use force::{ForceConfig, ForceSimulation};
pub(in crate::app) use radial::RadialLayout;

use super::graph::LayoutGraph;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::app) enum LayoutMode {
    ForceDirected,
    RadialBundled,
}

impl LayoutMode {
    pub(in crate::app) fn label(self) -> &'static str {
        match self {
            Self::ForceDirected => "Force-directed",
            Self::RadialBundled => "Radial bundled",
        }
    }
}

/// Computes positions for the active node/link set. One implementation per
/// layout mode; the view model picks the variant, never inheritance.
pub(in crate::app) trait Layout {
    /// Advances (force) or recomputes (radial) the layout. Returns true when
    /// another frame is needed.
    fn advance(&mut self, graph: &mut LayoutGraph) -> bool;

    /// Permanently stops this pass. Idempotent; once halted, further
    /// `advance` calls must leave every position untouched.
    fn halt(&mut self);

    fn drag_start(&mut self, _graph: &mut LayoutGraph, _index: usize) {}

    fn drag_to(&mut self, _graph: &mut LayoutGraph, _index: usize, _world: Vec2) {}

    fn drag_end(&mut self, _graph: &mut LayoutGraph, _index: usize) {}
}
