use std::collections::HashSet;
use std::sync::Arc;

use eframe::egui::{self, Align2, Color32, FontId, Sense, Shape, Stroke, Ui, Vec2, vec2};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use super::super::render_utils::{
    blend_color, circle_visible, dim_color, draw_background, quadratic_point, span_visible,
};
use super::super::{SearchCache, ViewModel};

const CURVE_SEGMENTS: usize = 14;
const SELECTED_COLOR: Color32 = Color32::from_rgb(245, 206, 93);
const HOVER_COLOR: Color32 = Color32::from_rgb(255, 164, 101);
const SEARCH_COLOR: Color32 = Color32::from_rgb(103, 196, 255);

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

impl ViewModel {
    fn update_screen_space(&mut self, rect: egui::Rect) {
        let zoom = self.viewport.zoom;
        self.scratch.screen_positions.clear();
        self.scratch.screen_radii.clear();
        for node in &self.graph.nodes {
            self.scratch
                .screen_positions
                .push(self.viewport.world_to_screen(rect, node.pos));
            self.scratch.screen_radii.push(node.base_radius * zoom);
        }
    }

    fn ensure_draw_order(&mut self) {
        if !self.scratch.draw_order_dirty
            && self.scratch.draw_order.len() == self.graph.nodes.len()
        {
            return;
        }

        self.scratch.draw_order.clear();
        self.scratch.draw_order.extend(0..self.graph.nodes.len());
        // Heavy nodes paint last, so they stay on top of the pile.
        self.scratch
            .draw_order
            .sort_by(|&a, &b| self.graph.nodes[a].weight.cmp(&self.graph.nodes[b].weight));
        self.scratch.draw_order_dirty = false;
    }

    fn search_matches(&mut self) -> Option<Arc<HashSet<usize>>> {
        let query = self.search.trim();
        if query.is_empty() {
            return None;
        }

        if let Some(cache) = &self.search_cache
            && cache.revision == self.graph_revision
            && cache.query == query
        {
            return Some(Arc::clone(&cache.matches));
        }

        let matcher = SkimMatcherV2::default();
        let matches = self
            .graph
            .nodes
            .iter()
            .enumerate()
            .filter_map(|(index, node)| {
                fuzzy_match_score(&matcher, node.display_label(), query).map(|_| index)
            })
            .collect::<HashSet<_>>();
        let matches = Arc::new(matches);

        self.search_cache = Some(SearchCache {
            query: query.to_owned(),
            revision: self.graph_revision,
            matches: Arc::clone(&matches),
        });

        Some(matches)
    }

    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        if self.graph_dirty {
            self.rebuild_layout();
        }

        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        draw_background(&painter, rect, self.viewport.pan, self.viewport.zoom);

        self.handle_zoom(ui, rect, &response);
        self.handle_pan_and_drag(rect, &response);

        if self.graph.is_empty() {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "No nodes in the current dataset.",
                FontId::proportional(14.0),
                Color32::from_gray(160),
            );
            return;
        }

        let animating = self.layout.as_layout().advance(&mut self.graph);
        if animating || response.dragged() {
            ui.ctx().request_repaint();
        }

        let search_matches = self.search_matches();
        self.update_screen_space(rect);
        self.ensure_draw_order();

        let zoom = self.viewport.zoom;
        let edge_color = Color32::from_rgba_unmultiplied(153, 153, 153, 110);
        let edge_stroke = |weight: f32| {
            Stroke::new(
                (weight.max(1.0).sqrt() * zoom.sqrt()).clamp(0.5, 3.0),
                edge_color,
            )
        };

        // Ring guides behind everything else in radial mode.
        let origin = self.viewport.world_to_screen(rect, Vec2::ZERO);
        for &(_year, radius) in &self.graph.ring_radii {
            painter.circle_stroke(
                origin,
                radius * zoom,
                Stroke::new(1.0, Color32::from_rgba_unmultiplied(80, 88, 100, 90)),
            );
        }

        if let Some(curves) = &self.graph.link_curves {
            for (curve, link) in curves.iter().zip(&self.graph.links) {
                let mut points = Vec::with_capacity(CURVE_SEGMENTS + 1);
                for step in 0..=CURVE_SEGMENTS {
                    let t = step as f32 / CURVE_SEGMENTS as f32;
                    let world = quadratic_point(curve.start, curve.control, curve.end, t);
                    points.push(self.viewport.world_to_screen(rect, world));
                }
                if span_visible(rect, &points, 2.0) {
                    painter.add(Shape::line(points, edge_stroke(link.weight)));
                }
            }
        } else {
            for link in &self.graph.links {
                let start = self.scratch.screen_positions[link.source];
                let end = self.scratch.screen_positions[link.target];
                if span_visible(rect, &[start, end], 2.0) {
                    painter.line_segment([start, end], edge_stroke(link.weight));
                }
            }
        }

        let hovered = self.hovered_node(ui, rect);
        if hovered.is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }

        let pending_selection = if response.clicked_by(egui::PointerButton::Primary) {
            Some(hovered.and_then(|index| self.graph.nodes.get(index).map(|node| node.id.clone())))
        } else {
            None
        };

        let selection_active = self.selected.is_some();
        let search_active = search_matches
            .as_ref()
            .is_some_and(|matches| !matches.is_empty());
        let year_highlight = self.year_highlight;

        for &index in &self.scratch.draw_order {
            let node = &self.graph.nodes[index];
            let position = self.scratch.screen_positions[index];
            let radius = self.scratch.screen_radii[index];
            if !circle_visible(rect, position, radius + 2.0) {
                continue;
            }

            let is_selected = self.selected.as_deref() == Some(node.id.as_str());
            let is_hovered = hovered == Some(index);
            let is_search_match = search_matches
                .as_ref()
                .is_some_and(|matches| matches.contains(&index));
            let in_highlighted_year =
                year_highlight.is_some() && node.year == year_highlight;

            let base_color = super::super::scales::year_color(node.year, self.graph.year_domain);
            let color = if is_hovered {
                HOVER_COLOR
            } else if is_selected {
                SELECTED_COLOR
            } else if in_highlighted_year {
                blend_color(base_color, Color32::WHITE, 0.25)
            } else if is_search_match {
                blend_color(base_color, SEARCH_COLOR, 0.65)
            } else if year_highlight.is_some() {
                dim_color(base_color, 0.35)
            } else if selection_active || search_active {
                dim_color(base_color, 0.55)
            } else {
                base_color
            };

            painter.circle_filled(position, radius, color);
            painter.circle_stroke(
                position,
                radius,
                Stroke::new(
                    if is_selected { 2.0 } else { 0.8 },
                    Color32::from_rgba_unmultiplied(255, 255, 255, 200),
                ),
            );

            let should_label = is_selected || is_hovered || (is_search_match && zoom > 0.8);
            if should_label {
                painter.text(
                    position + vec2(radius + 5.0, 0.0),
                    Align2::LEFT_CENTER,
                    node.display_label(),
                    FontId::proportional(12.0),
                    Color32::from_gray(238),
                );
            }
        }

        if let Some(index) = hovered
            && let Some(node) = self.graph.nodes.get(index)
        {
            let year = node
                .year
                .map(|year| year.to_string())
                .unwrap_or_else(|| "NA".to_owned());
            painter.text(
                rect.left_top() + vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                format!(
                    "{}  |  Year: {year}  |  Citations: {}",
                    node.display_label(),
                    node.weight
                ),
                FontId::proportional(13.0),
                Color32::from_gray(240),
            );
        }

        if let Some(selection) = pending_selection {
            self.selected = selection;
        }
    }
}
