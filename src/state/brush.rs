use egui::Color32;

/// Canvas background. The eraser paints with this colour.
pub const BACKGROUND_COLOR: Color32 = Color32::WHITE;

pub const MIN_BRUSH_SIZE: u8 = 1;
pub const MAX_BRUSH_SIZE: u8 = 20;
pub const DEFAULT_BRUSH_SIZE: u8 = 4;

pub const GRID_SIZE_STEP: u32 = 20;
pub const MIN_GRID_SIZE: u32 = 20;
pub const MAX_GRID_SIZE: u32 = 100;
pub const DEFAULT_GRID_SIZE: u32 = 40;

/// The fixed drawing palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteColor {
    Black,
    Blue,
    Red,
    Green,
}

impl PaletteColor {
    pub const ALL: [PaletteColor; 4] = [
        PaletteColor::Black,
        PaletteColor::Blue,
        PaletteColor::Red,
        PaletteColor::Green,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PaletteColor::Black => "Black",
            PaletteColor::Blue => "Blue",
            PaletteColor::Red => "Red",
            PaletteColor::Green => "Green",
        }
    }

    pub fn color(self) -> Color32 {
        match self {
            PaletteColor::Black => Color32::from_rgb(0x1e, 0x29, 0x3b),
            PaletteColor::Blue => Color32::from_rgb(0x3b, 0x82, 0xf6),
            PaletteColor::Red => Color32::from_rgb(0xef, 0x44, 0x44),
            PaletteColor::Green => Color32::from_rgb(0x22, 0xc5, 0x5e),
        }
    }
}

/// The single "current colour" field shared by the swatches and the eraser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrushColor {
    Palette(PaletteColor),
    Eraser,
}

impl BrushColor {
    /// Colour actually laid down on the canvas
    pub fn draw_color(self) -> Color32 {
        match self {
            BrushColor::Palette(color) => color.color(),
            BrushColor::Eraser => BACKGROUND_COLOR,
        }
    }

    pub fn is_eraser(self) -> bool {
        matches!(self, BrushColor::Eraser)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrushState {
    pub color: BrushColor,
    pub size: u8,
}

impl Default for BrushState {
    fn default() -> Self {
        Self {
            color: BrushColor::Palette(PaletteColor::Black),
            size: DEFAULT_BRUSH_SIZE,
        }
    }
}

impl BrushState {
    pub fn with_color(self, color: PaletteColor) -> Self {
        Self {
            color: BrushColor::Palette(color),
            ..self
        }
    }

    pub fn with_eraser(self) -> Self {
        Self {
            color: BrushColor::Eraser,
            ..self
        }
    }

    pub fn with_size(self, size: i64) -> Self {
        Self {
            size: clamp_brush_size(size),
            ..self
        }
    }

    pub fn draw_color(&self) -> Color32 {
        self.color.draw_color()
    }

    /// Brush radius in canvas pixels
    pub fn radius(&self) -> f32 {
        f32::from(self.size)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridState {
    pub visible: bool,
    pub cell_size: u32,
}

impl Default for GridState {
    fn default() -> Self {
        Self {
            visible: true,
            cell_size: DEFAULT_GRID_SIZE,
        }
    }
}

impl GridState {
    pub fn toggled(self) -> Self {
        Self {
            visible: !self.visible,
            ..self
        }
    }

    pub fn with_cell_size(self, cell_size: i64) -> Self {
        Self {
            cell_size: snap_grid_size(cell_size),
            ..self
        }
    }
}

pub fn clamp_brush_size(size: i64) -> u8 {
    // Bounded by MAX_BRUSH_SIZE, so the narrowing cast cannot truncate
    size.clamp(i64::from(MIN_BRUSH_SIZE), i64::from(MAX_BRUSH_SIZE)) as u8
}

/// Snaps to the nearest multiple of `GRID_SIZE_STEP` within the slider range.
pub fn snap_grid_size(size: i64) -> u32 {
    let step = i64::from(GRID_SIZE_STEP);
    let clamped = size.clamp(i64::from(MIN_GRID_SIZE), i64::from(MAX_GRID_SIZE));
    let snapped = ((clamped + step / 2) / step) * step;
    snapped.clamp(i64::from(MIN_GRID_SIZE), i64::from(MAX_GRID_SIZE)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eraser_uses_background_color() {
        let brush = BrushState::default().with_eraser();
        assert!(brush.color.is_eraser());
        assert_eq!(brush.draw_color(), BACKGROUND_COLOR);
    }

    #[test]
    fn test_palette_overrides_eraser() {
        let brush = BrushState::default().with_eraser().with_color(PaletteColor::Red);
        assert!(!brush.color.is_eraser());
        assert_eq!(brush.draw_color(), PaletteColor::Red.color());
    }

    #[test]
    fn test_brush_size_is_clamped() {
        assert_eq!(clamp_brush_size(-3), 1);
        assert_eq!(clamp_brush_size(0), 1);
        assert_eq!(clamp_brush_size(7), 7);
        assert_eq!(clamp_brush_size(21), 20);
        assert_eq!(clamp_brush_size(i64::MAX), 20);
    }

    #[test]
    fn test_grid_size_snaps_to_steps() {
        for input in -50..250 {
            let size = snap_grid_size(input);
            assert!([20, 40, 60, 80, 100].contains(&size), "{input} -> {size}");
        }
        assert_eq!(snap_grid_size(49), 40);
        assert_eq!(snap_grid_size(50), 60);
        assert_eq!(snap_grid_size(100), 100);
    }

    #[test]
    fn test_palette_values() {
        assert_eq!(PaletteColor::Black.color(), Color32::from_hex("#1e293b").unwrap());
        assert_eq!(PaletteColor::Blue.color(), Color32::from_hex("#3b82f6").unwrap());
        assert_eq!(PaletteColor::Red.color(), Color32::from_hex("#ef4444").unwrap());
        assert_eq!(PaletteColor::Green.color(), Color32::from_hex("#22c55e").unwrap());
    }
}
