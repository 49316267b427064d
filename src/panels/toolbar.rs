use egui::{Color32, RichText};

use crate::components::swatch_button::SELECTED_RING;
use crate::components::SwatchButton;
use crate::session::Session;
use crate::state::{
    BrushColor, PaletteColor, GRID_SIZE_STEP, MAX_BRUSH_SIZE, MAX_GRID_SIZE, MIN_BRUSH_SIZE, MIN_GRID_SIZE,
};

const TOOLBAR_WIDTH: f32 = 240.0;
const HEADING_COLOR: Color32 = Color32::from_rgb(0x33, 0x41, 0x55);

fn section_heading(ui: &mut egui::Ui, icon: &str, title: &str) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(icon).color(SELECTED_RING));
        ui.label(RichText::new(title).strong().color(HEADING_COLOR));
    });
}

/// The collapsible toolbar on the left. When collapsed only a tab remains.
pub fn toolbar_panel(session: &mut Session, ctx: &egui::Context) {
    let open = session.state().toolbar_open;

    if !open {
        egui::Area::new(egui::Id::new("toolbar_tab"))
            .anchor(egui::Align2::LEFT_TOP, egui::vec2(0.0, 80.0))
            .show(ctx, |ui| {
                if ui.button("▶").on_hover_text("Show toolbar").clicked() {
                    session.update(|s| s.toggle_toolbar());
                }
            });
        return;
    }

    egui::SidePanel::left("toolbar_panel")
        .resizable(false)
        .exact_width(TOOLBAR_WIDTH)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Toolbar");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("◀").on_hover_text("Hide toolbar").clicked() {
                        session.update(|s| s.toggle_toolbar());
                    }
                });
            });
            ui.separator();

            egui::ScrollArea::vertical().show(ui, |ui| {
                colors_section(session, ui);
                ui.add_space(16.0);
                tools_section(session, ui);
                ui.add_space(16.0);
                brush_section(session, ui);
                ui.add_space(16.0);
                grid_section(session, ui);
            });
        });
}

fn colors_section(session: &mut Session, ui: &mut egui::Ui) {
    section_heading(ui, "🎨", "Colors");
    let current = session.state().brush.color;

    egui::Grid::new("palette_grid")
        .num_columns(2)
        .spacing([8.0, 8.0])
        .show(ui, |ui| {
            for (i, color) in PaletteColor::ALL.into_iter().enumerate() {
                let selected = current == BrushColor::Palette(color);
                if SwatchButton::new(color.color(), color.name(), selected)
                    .show(ui)
                    .clicked()
                {
                    log::debug!("Color selected: {}", color.name());
                    session.update(|s| s.select_color(color));
                }
                if i % 2 == 1 {
                    ui.end_row();
                }
            }
        });
}

fn tools_section(session: &mut Session, ui: &mut egui::Ui) {
    section_heading(ui, "✏", "Tools");
    let is_eraser = session.state().brush.color.is_eraser();

    ui.horizontal(|ui| {
        if ui.selectable_label(is_eraser, "⌫ Eraser").clicked() {
            session.update(|s| s.select_eraser());
        }
        let can_undo = !session.surface().strokes().is_empty();
        if ui.add_enabled(can_undo, egui::Button::new("↶ Undo")).clicked() {
            session.undo();
        }
    });
}

fn brush_section(session: &mut Session, ui: &mut egui::Ui) {
    let mut size = session.state().brush.size;

    ui.horizontal(|ui| {
        // Preview dot, capped at the 20px box it sits in
        let (rect, _) = ui.allocate_exact_size(egui::vec2(20.0, 20.0), egui::Sense::hover());
        let radius = f32::from(size.min(20)) / 2.0;
        ui.painter().circle_filled(rect.center(), radius, SELECTED_RING);
        ui.label(
            RichText::new(format!("Brush Size: {}px", size))
                .strong()
                .color(HEADING_COLOR),
        );
    });

    let response = ui.add(
        egui::Slider::new(&mut size, MIN_BRUSH_SIZE..=MAX_BRUSH_SIZE).show_value(false),
    );
    if response.changed() {
        session.update(|s| s.set_brush_size(i64::from(size)));
    }
}

fn grid_section(session: &mut Session, ui: &mut egui::Ui) {
    section_heading(ui, "▦", "Grid");
    let grid = session.state().grid;

    let toggle_text = if grid.visible { "Hide Grid" } else { "Show Grid" };
    if ui.selectable_label(grid.visible, toggle_text).clicked() {
        session.update(|s| s.toggle_grid());
    }

    let mut cell_size = grid.cell_size;
    ui.add_enabled_ui(grid.visible, |ui| {
        ui.label(RichText::new(format!("Grid Size: {}px", cell_size)).small());
        let response = ui.add(
            egui::Slider::new(&mut cell_size, MIN_GRID_SIZE..=MAX_GRID_SIZE)
                .step_by(f64::from(GRID_SIZE_STEP))
                .show_value(false),
        );
        if response.changed() {
            session.update(|s| s.set_grid_size(i64::from(cell_size)));
        }
    });
}
