use egui::{Color32, RichText};

use crate::state::AnalysisStatus;

pub const RESULTS_WIDTH: f32 = 300.0;
pub const PLACEHOLDER_TEXT: &str = "Draw something and click Analyze to see the result";

const ERROR_FILL: Color32 = Color32::from_rgb(0xfe, 0xf2, 0xf2);
const ERROR_BORDER: Color32 = Color32::from_rgb(0xfe, 0xca, 0xca);
const ERROR_TEXT: Color32 = Color32::from_rgb(0xdc, 0x26, 0x26);
const RESULT_FILL: Color32 = Color32::from_rgb(0xef, 0xf6, 0xff);
const RESULT_BORDER: Color32 = Color32::from_rgb(0xbf, 0xdb, 0xfe);
const RESULT_TEXT: Color32 = Color32::from_rgb(0x33, 0x41, 0x55);
const PLACEHOLDER_COLOR: Color32 = Color32::from_rgb(0x94, 0xa3, 0xb8);

/// Which branch of the panel to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultView<'a> {
    Placeholder,
    Busy,
    Text(&'a str),
    Error(&'a str),
}

impl<'a> ResultView<'a> {
    pub fn of(status: &'a AnalysisStatus) -> Self {
        match status {
            AnalysisStatus::Idle => ResultView::Placeholder,
            AnalysisStatus::Pending => ResultView::Busy,
            AnalysisStatus::Success(text) => ResultView::Text(text),
            AnalysisStatus::Failure(message) => ResultView::Error(message),
        }
    }

    /// The text the panel shows for this branch, if any
    pub fn text(&self) -> Option<&'a str> {
        match *self {
            ResultView::Placeholder => Some(PLACEHOLDER_TEXT),
            ResultView::Busy => None,
            ResultView::Text(text) | ResultView::Error(text) => Some(text),
        }
    }
}

fn boxed_text(ui: &mut egui::Ui, text: &str, fill: Color32, border: Color32, color: Color32) {
    egui::Frame::none()
        .fill(fill)
        .stroke(egui::Stroke::new(1.0, border))
        .rounding(8.0)
        .inner_margin(12.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(text).color(color));
        });
}

pub fn results_panel(status: &AnalysisStatus, ctx: &egui::Context) {
    egui::SidePanel::right("results_panel")
        .resizable(false)
        .exact_width(RESULTS_WIDTH)
        .show(ctx, |ui| {
            ui.heading("Analysis Result");
            ui.add_space(8.0);

            egui::ScrollArea::vertical().show(ui, |ui| match ResultView::of(status) {
                ResultView::Error(message) => {
                    boxed_text(ui, message, ERROR_FILL, ERROR_BORDER, ERROR_TEXT);
                }
                ResultView::Text(text) => {
                    boxed_text(ui, text, RESULT_FILL, RESULT_BORDER, RESULT_TEXT);
                }
                ResultView::Busy => {
                    ui.vertical_centered(|ui| {
                        ui.add_space(24.0);
                        ui.add(egui::Spinner::new().size(24.0));
                        ui.label(RichText::new("Analyzing...").color(PLACEHOLDER_COLOR));
                    });
                }
                ResultView::Placeholder => {
                    ui.vertical_centered(|ui| {
                        ui.add_space(24.0);
                        ui.label(RichText::new(PLACEHOLDER_TEXT).small().color(PLACEHOLDER_COLOR));
                    });
                }
            });
        });
}
