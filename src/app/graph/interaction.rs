use eframe::egui::{self, Pos2, Rect, Ui};

use super::super::ViewModel;
use super::super::layout::LayoutMode;

impl ViewModel {
    pub(in crate::app) fn handle_zoom(&mut self, ui: &Ui, rect: Rect, response: &egui::Response) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        let factor = (1.0 + (scroll * 0.0018)).clamp(0.85, 1.15);
        self.viewport.zoom_around(rect, pointer, factor);
    }

    /// A primary drag starting on a node drags that node; starting on empty
    /// canvas it pans. The two never mix within one gesture.
    pub(in crate::app) fn handle_pan_and_drag(&mut self, rect: Rect, response: &egui::Response) {
        let node_drag_enabled = self.layout_mode == LayoutMode::ForceDirected;

        if response.drag_started_by(egui::PointerButton::Primary) {
            self.drag_node = response
                .interact_pointer_pos()
                .filter(|_| node_drag_enabled)
                .and_then(|pointer| self.node_at(rect, pointer));
            if let Some(index) = self.drag_node {
                self.layout.as_layout().drag_start(&mut self.graph, index);
            }
        }

        if response.dragged_by(egui::PointerButton::Primary) {
            match self.drag_node {
                Some(index) => {
                    if let Some(pointer) = response.interact_pointer_pos() {
                        let world = self.viewport.screen_to_world(rect, pointer);
                        self.layout.as_layout().drag_to(&mut self.graph, index, world);
                    }
                }
                None => self.viewport.pan_by(response.drag_delta()),
            }
        }

        if response.drag_stopped_by(egui::PointerButton::Primary)
            && let Some(index) = self.drag_node.take()
        {
            self.layout.as_layout().drag_end(&mut self.graph, index);
        }

        if response.dragged_by(egui::PointerButton::Secondary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            self.viewport.pan_by(response.drag_delta());
        }
    }

    pub(in crate::app) fn node_at(&self, rect: Rect, pointer: Pos2) -> Option<usize> {
        let zoom = self.viewport.zoom;
        self.graph
            .nodes
            .iter()
            .enumerate()
            .filter_map(|(index, node)| {
                let screen = self.viewport.world_to_screen(rect, node.pos);
                let radius = (node.base_radius * zoom).max(4.0) + 2.0;
                let distance = screen.distance(pointer);
                (distance <= radius).then_some((index, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(index, _)| index)
    }

    pub(in crate::app) fn hovered_node(&self, ui: &Ui, rect: Rect) -> Option<usize> {
        let pointer = ui.input(|input| input.pointer.hover_pos())?;
        if !rect.contains(pointer) {
            return None;
        }
        self.node_at(rect, pointer)
    }
}
