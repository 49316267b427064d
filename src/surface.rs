use egui::{Pos2, Vec2};
use image::RgbaImage;

use crate::error::{AnalysisError, AnalysisResult};
use crate::raster;
use crate::state::{BrushState, BACKGROUND_COLOR};
use crate::stroke::{MutableStroke, StrokeRef};

/// The drawing surface: committed strokes, the stroke being drawn, and the
/// pixel size of the area they are drawn on.
///
/// Coordinates are canvas-local, `(0, 0)` being the top-left corner of the
/// canvas, so the same strokes can be painted on screen and exported.
#[derive(Debug, Default)]
pub struct DrawingSurface {
    strokes: Vec<StrokeRef>,
    current: Option<MutableStroke>,
    size: [u32; 2],
}

impl DrawingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// A surface that is already laid out at the given pixel size
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            size: [width, height],
            ..Self::default()
        }
    }

    /// Called every frame with the canvas area; strokes are kept and clipped on export.
    pub fn resize(&mut self, size: Vec2) {
        let width = size.x.max(0.0).round() as u32;
        let height = size.y.max(0.0).round() as u32;
        if self.size != [width, height] {
            log::debug!("Canvas resized to {}x{}", width, height);
            self.size = [width, height];
        }
    }

    pub fn size(&self) -> [u32; 2] {
        self.size
    }

    pub fn is_initialized(&self) -> bool {
        self.size[0] > 0 && self.size[1] > 0
    }

    pub fn begin_stroke(&mut self, pos: Pos2, brush: &BrushState) {
        let mut stroke = MutableStroke::new(brush.draw_color(), brush.radius());
        stroke.add_point(pos);
        self.current = Some(stroke);
    }

    pub fn extend_stroke(&mut self, pos: Pos2) {
        if let Some(stroke) = &mut self.current {
            stroke.add_point(pos);
        }
    }

    /// Commits the stroke in progress, if any.
    pub fn end_stroke(&mut self) {
        if let Some(stroke) = self.current.take() {
            if !stroke.points().is_empty() {
                self.strokes.push(stroke.into_stroke_ref());
            }
        }
    }

    pub fn current_stroke(&self) -> Option<&MutableStroke> {
        self.current.as_ref()
    }

    pub fn strokes(&self) -> &[StrokeRef] {
        &self.strokes
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty() && self.current.is_none()
    }

    /// Removes the most recently committed stroke
    pub fn undo(&mut self) -> Option<StrokeRef> {
        self.strokes.pop()
    }

    pub fn clear(&mut self) {
        self.strokes.clear();
        self.current = None;
    }

    /// Rasterizes the committed strokes onto an opaque white bitmap.
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::NotInitialized` if the surface has never been laid out.
    pub fn export_bitmap(&self) -> AnalysisResult<RgbaImage> {
        if !self.is_initialized() {
            return Err(AnalysisError::NotInitialized);
        }
        let [width, height] = self.size;
        let layer = raster::rasterize(self.strokes.iter().map(|s| s.as_ref()), width, height);
        Ok(raster::flatten_onto(&layer, BACKGROUND_COLOR))
    }
}
