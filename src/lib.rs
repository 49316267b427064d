#![warn(clippy::all, rust_2018_idioms)]

pub mod analysis;
pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod panels;
pub mod raster;
pub mod renderer;
pub mod session;
pub mod state;
pub mod stroke;
pub mod surface;

pub use analysis::{AnalysisClient, GeminiClient};
pub use app::SketchApp;
pub use config::AnalysisConfig;
pub use error::{AnalysisError, AnalysisResult};
pub use session::Session;
pub use state::UiState;
pub use stroke::Stroke;
pub use surface::DrawingSurface;
