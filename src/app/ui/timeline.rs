use eframe::egui::{Align2, Color32, FontId, Rect, Sense, Ui, pos2, vec2};

use super::super::ViewModel;

const BAR_COLOR: Color32 = Color32::from_rgb(49, 130, 189);
const BAR_SELECTED_COLOR: Color32 = Color32::from_rgb(255, 127, 14);

impl ViewModel {
    /// Publications-per-year bars; clicking a bar toggles a year highlight
    /// on the graph canvas.
    pub(in crate::app) fn draw_timeline(&mut self, ui: &mut Ui) {
        if self.year_counts.is_empty() {
            ui.label("No publication years in this dataset.");
            return;
        }

        let (rect, response) =
            ui.allocate_exact_size(vec2(ui.available_width(), 72.0), Sense::click());
        let painter = ui.painter_at(rect);

        let max_count = self
            .year_counts
            .iter()
            .map(|&(_, count)| count)
            .max()
            .unwrap_or(1)
            .max(1);
        let band = rect.width() / self.year_counts.len() as f32;
        let bar_width = (band * 0.8).max(1.0);
        let pointer = response.hover_pos();

        let mut hovered_year = None;
        for (index, &(year, count)) in self.year_counts.iter().enumerate() {
            let height = (count as f32 / max_count as f32) * (rect.height() - 20.0);
            let left = rect.left() + band * index as f32 + (band - bar_width) * 0.5;
            let bar = Rect::from_min_max(
                pos2(left, rect.bottom() - height - 14.0),
                pos2(left + bar_width, rect.bottom() - 14.0),
            );

            let is_hovered =
                pointer.is_some_and(|pointer| pointer.x >= left && pointer.x <= left + bar_width);
            if is_hovered {
                hovered_year = Some((year, count));
            }

            let color = if self.year_highlight == Some(year) {
                BAR_SELECTED_COLOR
            } else if is_hovered {
                Color32::from_rgb(107, 174, 214)
            } else {
                BAR_COLOR
            };
            painter.rect_filled(bar, 1.0, color);
        }

        let (first_year, _) = self.year_counts[0];
        let (last_year, _) = self.year_counts[self.year_counts.len() - 1];
        painter.text(
            rect.left_bottom(),
            Align2::LEFT_BOTTOM,
            first_year.to_string(),
            FontId::proportional(11.0),
            Color32::from_gray(170),
        );
        painter.text(
            rect.right_bottom(),
            Align2::RIGHT_BOTTOM,
            last_year.to_string(),
            FontId::proportional(11.0),
            Color32::from_gray(170),
        );

        if let Some((year, count)) = hovered_year {
            painter.text(
                rect.right_top(),
                Align2::RIGHT_TOP,
                format!("{year}: {count} papers"),
                FontId::proportional(12.0),
                Color32::from_gray(230),
            );
        }

        if response.clicked()
            && let Some((year, _)) = hovered_year
        {
            self.year_highlight = if self.year_highlight == Some(year) {
                None
            } else {
                Some(year)
            };
        }
    }
}
