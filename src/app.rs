use std::rc::Rc;

use crate::analysis::{AnalysisClient, GeminiClient, Spawner};
use crate::config::AnalysisConfig;
use crate::panels::{self, CanvasAction};
use crate::session::Session;

/// Nothing is persisted: every launch starts from a blank canvas and default tools.
pub struct SketchApp {
    session: Session,
    spawner: Spawner,
}

impl SketchApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::light());

        let config = AnalysisConfig::from_env();
        log::info!("Analysis configured: {:?}", config);
        Self::with_client(Rc::new(GeminiClient::new(config)))
    }

    pub fn with_client(client: Rc<dyn AnalysisClient>) -> Self {
        Self {
            session: Session::new(client),
            spawner: Spawner::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn analyze(&mut self, ctx: &egui::Context) {
        let repaint = ctx.clone();
        if let Some(driver) = self.session.start_analysis(move || repaint.request_repaint()) {
            self.spawner.spawn(driver);
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        let undo = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Z);
        if ctx.input_mut(|i| i.consume_shortcut(&undo)) {
            self.session.undo();
        }
    }
}

impl eframe::App for SketchApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.session.poll_analysis();
        self.handle_shortcuts(ctx);

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading(egui::RichText::new("Smart Drawing Analysis").size(24.0).strong());
            });
        });

        // Side panels must be laid out before the central panel
        panels::toolbar_panel(&mut self.session, ctx);
        panels::results_panel(&self.session.state().analysis, ctx);

        match panels::canvas_panel(&mut self.session, ctx) {
            Some(CanvasAction::Analyze) => self.analyze(ctx),
            Some(CanvasAction::Clear) => self.session.clear(),
            None => {}
        }
    }
}
