use eframe::egui;

pub const SELECTED_FILL: egui::Color32 = egui::Color32::from_rgb(0xef, 0xf6, 0xff);
pub const SELECTED_RING: egui::Color32 = egui::Color32::from_rgb(0x3b, 0x82, 0xf6);
const HOVER_FILL: egui::Color32 = egui::Color32::from_rgb(0xf8, 0xfa, 0xfc);
const SWATCH_RING: egui::Color32 = egui::Color32::from_rgb(0xe2, 0xe8, 0xf0);
const LABEL_COLOR: egui::Color32 = egui::Color32::from_rgb(0x47, 0x55, 0x69);

/// A palette entry: a filled colour dot followed by the colour's name.
pub struct SwatchButton {
    pub color: egui::Color32,
    pub label: &'static str,
    pub selected: bool,
}

impl SwatchButton {
    pub fn new(color: egui::Color32, label: &'static str, selected: bool) -> Self {
        Self {
            color,
            label,
            selected,
        }
    }

    pub fn show(&self, ui: &mut egui::Ui) -> egui::Response {
        let button_size = egui::vec2(100.0, 36.0);
        let (rect, response) = ui.allocate_exact_size(button_size, egui::Sense::click());

        if ui.is_rect_visible(rect) {
            let bg_color = if self.selected {
                SELECTED_FILL
            } else if response.hovered() {
                HOVER_FILL
            } else {
                egui::Color32::TRANSPARENT
            };
            ui.painter().rect_filled(rect, 8.0, bg_color);

            let dot_center = egui::pos2(rect.left() + 18.0, rect.center().y);
            ui.painter().circle(
                dot_center,
                10.0,
                self.color,
                egui::Stroke::new(2.0, SWATCH_RING),
            );

            ui.painter().text(
                egui::pos2(rect.left() + 36.0, rect.center().y),
                egui::Align2::LEFT_CENTER,
                self.label,
                egui::FontId::proportional(14.0),
                LABEL_COLOR,
            );

            if self.selected {
                ui.painter().rect_stroke(
                    rect,
                    8.0,
                    egui::Stroke::new(2.0, SELECTED_RING),
                );
            }
        }

        response.on_hover_text(self.label)
    }
}
