use egui::{Color32, RichText};

use crate::renderer;
use crate::session::Session;

/// Smallest canvas ever laid out, in points
pub const MIN_CANVAS_SIZE: egui::Vec2 = egui::vec2(400.0, 300.0);
const FOOTER_HEIGHT: f32 = 56.0;
const ANALYZE_FILL: Color32 = Color32::from_rgb(0x25, 0x63, 0xeb);
const ANALYZE_SIZE: egui::Vec2 = egui::vec2(200.0, 36.0);
const ANALYZE_LABEL: &str = "▶ Analyze Drawing";
const CLEAR_FILL: Color32 = Color32::from_rgb(0xf1, 0xf5, 0xf9);

/// Footer buttons that need more than the session to carry out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasAction {
    Analyze,
    Clear,
}

/// The drawing area and its footer. Pointer input is routed into the session.
pub fn canvas_panel(session: &mut Session, ctx: &egui::Context) -> Option<CanvasAction> {
    let mut action = None;

    egui::CentralPanel::default().show(ctx, |ui| {
        let available = ui.available_size() - egui::vec2(0.0, FOOTER_HEIGHT);
        let size = available.max(MIN_CANVAS_SIZE);
        let (response, painter) = ui.allocate_painter(size, egui::Sense::click_and_drag());
        let rect = response.rect;
        session.resize_canvas(rect.size());

        handle_pointer(session, ui, &response, rect);
        renderer::render_canvas(&painter, rect, session.surface(), &session.state().grid);

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if analyze_button(ui, session.is_busy()) {
                action = Some(CanvasAction::Analyze);
            }

            let clear = egui::Button::new("🗑 Clear")
                .fill(CLEAR_FILL)
                .min_size(egui::vec2(100.0, 36.0));
            if ui.add(clear).clicked() {
                action = Some(CanvasAction::Clear);
            }
        });
    });

    action
}

/// The Analyze button. While busy its label is replaced by a spinner and it ignores clicks.
fn analyze_button(ui: &mut egui::Ui, busy: bool) -> bool {
    if busy {
        let (rect, _) = ui.allocate_exact_size(ANALYZE_SIZE, egui::Sense::hover());
        ui.painter().rect_filled(rect, 4.0, ANALYZE_FILL.gamma_multiply(0.6));
        let spinner = egui::Rect::from_center_size(rect.center(), egui::vec2(18.0, 18.0));
        ui.put(spinner, egui::Spinner::new().size(18.0).color(Color32::WHITE));
        return false;
    }

    let button = egui::Button::new(RichText::new(ANALYZE_LABEL).color(Color32::WHITE).strong())
        .fill(ANALYZE_FILL)
        .min_size(ANALYZE_SIZE);
    ui.add(button).clicked()
}

fn handle_pointer(session: &mut Session, ui: &egui::Ui, response: &egui::Response, rect: egui::Rect) {
    let to_canvas = |pos: egui::Pos2| pos - rect.min.to_vec2();

    if response.drag_started() {
        // Start at the press position, not where the drag threshold was crossed
        let origin = ui
            .input(|i| i.pointer.press_origin())
            .or_else(|| response.interact_pointer_pos());
        if let Some(origin) = origin {
            session.begin_stroke(to_canvas(origin));
        }
    }
    if response.dragged() {
        if let Some(pos) = response.interact_pointer_pos() {
            session.extend_stroke(to_canvas(pos));
        }
    }
    if response.drag_stopped() {
        session.end_stroke();
    }

    // A click without movement leaves a dot
    if response.clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            session.begin_stroke(to_canvas(pos));
            session.end_stroke();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn painted_text(busy: bool) -> Vec<String> {
        let ctx = egui::Context::default();
        let output = ctx.run(Default::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                analyze_button(ui, busy);
            });
        });
        output
            .shapes
            .iter()
            .filter_map(|clipped| match &clipped.shape {
                egui::Shape::Text(text) => Some(text.galley.text().to_owned()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_idle_button_shows_label() {
        assert!(painted_text(false).iter().any(|t| t == ANALYZE_LABEL));
    }

    #[test]
    fn test_busy_button_shows_spinner_instead_of_label() {
        assert!(painted_text(true).iter().all(|t| !t.contains("Analyze")));
    }
}
