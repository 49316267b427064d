use egui::{Color32, Pos2, Vec2};
use std::sync::Arc;

// Immutable stroke for sharing
#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    points: Vec<Pos2>,
    color: Color32,
    radius: f32,
}

// Mutable stroke for the gesture in progress
#[derive(Debug)]
pub struct MutableStroke {
    points: Vec<Pos2>,
    color: Color32,
    radius: f32,
}

// Define a reference-counted type alias for Stroke
pub type StrokeRef = Arc<Stroke>;

impl Stroke {
    pub fn new(color: Color32, radius: f32, points: Vec<Pos2>) -> Self {
        Self {
            points,
            color,
            radius,
        }
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    /// Brush radius in canvas pixels. The painted line is twice as wide.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Copy of this stroke moved by `offset`, used to map canvas-local
    /// coordinates onto screen space.
    pub fn translated(&self, offset: Vec2) -> Stroke {
        Stroke::new(
            self.color,
            self.radius,
            self.points.iter().map(|p| *p + offset).collect(),
        )
    }
}

impl MutableStroke {
    pub fn new(color: Color32, radius: f32) -> Self {
        Self {
            points: Vec::new(),
            color,
            radius,
        }
    }

    // Consecutive duplicates are dropped; a resting pointer would otherwise
    // grow the stroke every frame.
    pub fn add_point(&mut self, point: Pos2) {
        if self.points.last() != Some(&point) {
            self.points.push(point);
        }
    }

    pub fn into_stroke_ref(self) -> StrokeRef {
        Arc::new(Stroke::new(self.color, self.radius, self.points))
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutable_stroke_skips_repeated_points() {
        let mut stroke = MutableStroke::new(Color32::RED, 2.0);
        stroke.add_point(Pos2::new(1.0, 1.0));
        stroke.add_point(Pos2::new(1.0, 1.0));
        stroke.add_point(Pos2::new(2.0, 1.0));
        assert_eq!(stroke.points().len(), 2);
    }

    #[test]
    fn test_translated_moves_every_point() {
        let stroke = Stroke::new(Color32::BLUE, 1.0, vec![Pos2::new(0.0, 0.0), Pos2::new(5.0, 5.0)]);
        let moved = stroke.translated(Vec2::new(10.0, 20.0));
        assert_eq!(moved.points(), &[Pos2::new(10.0, 20.0), Pos2::new(15.0, 25.0)]);
        assert_eq!(moved.color(), Color32::BLUE);
    }
}
