use eframe::egui::{self, RichText, Ui};

use crate::util::short_id;

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Selection");
        ui.add_space(6.0);

        let Some(selected_id) = self.selected.clone() else {
            ui.label("Click a node in the graph to inspect it.");
            return;
        };

        let Some(&index) = self.graph.index_by_id.get(&selected_id) else {
            ui.label("The selected node is not in the rendered graph.");
            return;
        };

        let node = &self.graph.nodes[index];
        ui.label(RichText::new(node.display_label()).strong());
        ui.small(short_id(&node.id));
        ui.add_space(6.0);

        match node.year {
            Some(year) => ui.label(format!("Year: {year}")),
            None => ui.label("Year: unknown"),
        };
        ui.label(format!("Citations: {}", node.weight));
        if let Some(doctype) = &node.doctype {
            ui.label(format!("Type: {doctype}"));
        }
        if let Some(h_index) = node.h_index {
            ui.label(format!("h-index: {h_index:.0}"));
        }
        if let Some(productivity) = node.productivity {
            ui.label(format!("Productivity: {productivity:.1}"));
        }
        ui.label(format!("Degree: {}", self.graph.degrees[index]));

        ui.separator();
        ui.label(RichText::new("Neighbors").strong());

        let neighbors = self.graph.neighbors_of(index);
        if neighbors.is_empty() {
            ui.label("No links touch this node.");
            return;
        }

        let mut pending = None;
        egui::ScrollArea::vertical()
            .id_salt("neighbor_scroll")
            .max_height(320.0)
            .auto_shrink([false, false])
            .show_rows(ui, 22.0, neighbors.len(), |ui, row_range| {
                for row in row_range {
                    let Some(&neighbor_index) = neighbors.get(row) else {
                        continue;
                    };
                    let neighbor = &self.graph.nodes[neighbor_index];
                    let label = match neighbor.year {
                        Some(year) => format!("{}  ({year})", neighbor.display_label()),
                        None => neighbor.display_label().to_owned(),
                    };
                    if ui.link(label).on_hover_text(neighbor.id.as_str()).clicked() {
                        pending = Some(neighbor.id.clone());
                    }
                }
            });

        if let Some(id) = pending {
            self.selected = Some(id);
        }
    }
}
