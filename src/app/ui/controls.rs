use eframe::egui::{self, Ui};

use crate::data::NetworkKind;

use super::super::layout::LayoutMode;
use super::super::{ActiveLayout, ViewModel};

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Network Controls");
        ui.separator();
        ui.add_space(4.0);

        let mut rebuild = false;

        if self.data.authors.is_some() {
            ui.label("Dataset");
            ui.horizontal(|ui| {
                let citations = ui
                    .selectable_value(&mut self.network, NetworkKind::Citations, "Citations")
                    .on_hover_text("Paper citation network.")
                    .changed();
                let authors = ui
                    .selectable_value(&mut self.network, NetworkKind::Authors, "Co-authors")
                    .on_hover_text("Author collaboration network.")
                    .changed();
                if citations || authors {
                    self.selected = None;
                    self.year_highlight = None;
                    self.max_nodes = self.active_network().nodes.len().max(2);
                    rebuild = true;
                }
            });
            ui.separator();
        }

        ui.label("Layout");
        let has_years = self
            .active_network()
            .nodes
            .iter()
            .any(|node| node.year.is_some());
        if !has_years && self.layout_mode == LayoutMode::RadialBundled {
            self.layout_mode = LayoutMode::ForceDirected;
            rebuild = true;
        }
        ui.horizontal(|ui| {
            rebuild |= ui
                .selectable_value(
                    &mut self.layout_mode,
                    LayoutMode::ForceDirected,
                    LayoutMode::ForceDirected.label(),
                )
                .on_hover_text("Physical simulation; drag nodes to rearrange.")
                .changed();

            ui.add_enabled_ui(has_years, |ui| {
                rebuild |= ui
                    .selectable_value(
                        &mut self.layout_mode,
                        LayoutMode::RadialBundled,
                        LayoutMode::RadialBundled.label(),
                    )
                    .on_hover_text(
                        "Concentric year rings with bundled edges; needs publication years.",
                    )
                    .changed();
            });
        });

        ui.separator();

        ui.label("Search (title or id)")
            .on_hover_text("Fuzzy-highlight matching nodes without changing the layout.");
        ui.text_edit_singleline(&mut self.search);

        ui.separator();

        let node_limit = self.active_network().nodes.len().max(2);
        let max_nodes_slider = ui
            .add(
                egui::Slider::new(&mut self.max_nodes, 2..=node_limit)
                    .step_by(5.0)
                    .text("Max rendered nodes"),
            )
            .on_hover_text("Keep only the most-cited nodes before layout runs.");
        rebuild |= max_nodes_slider.changed();
        ui.small(format!("top citation count in view: {}", self.graph.max_weight));

        if self.layout_mode == LayoutMode::ForceDirected {
            let mut tuned = false;
            ui.collapsing("Force tuning", |ui| {
                tuned |= ui
                    .add(
                        egui::Slider::new(&mut self.force_config.link_distance, 20.0..=160.0)
                            .text("Link distance"),
                    )
                    .on_hover_text("Rest length of the link springs.")
                    .changed();

                tuned |= ui
                    .add(
                        egui::Slider::new(&mut self.force_config.charge_strength, -200.0..=-5.0)
                            .text("Charge"),
                    )
                    .on_hover_text("Node repulsion; more negative pushes harder.")
                    .changed();

                tuned |= ui
                    .add(
                        egui::Slider::new(&mut self.force_config.collide_radius, 0.0..=40.0)
                            .text("Collision radius"),
                    )
                    .on_hover_text("Minimum separation between node circles.")
                    .changed();

                tuned |= ui
                    .add(
                        egui::Slider::new(&mut self.force_config.link_strength, 0.1..=2.0)
                            .text("Link strength"),
                    )
                    .on_hover_text("Scale on the spring stiffness.")
                    .changed();
            });

            if ui
                .button("Reheat simulation")
                .on_hover_text("Restart the cooled layout from its current positions.")
                .clicked()
                && let ActiveLayout::Force(sim) = &mut self.layout
            {
                sim.reheat(1.0);
                ui.ctx().request_repaint();
            }

            if tuned && let ActiveLayout::Force(sim) = &mut self.layout {
                sim.set_config(self.force_config);
                sim.reheat(0.3);
                ui.ctx().request_repaint();
            }
        }

        if rebuild {
            self.graph_dirty = true;
        }
    }
}
