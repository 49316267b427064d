//! CPU rasterization of strokes for export.
//!
//! On screen strokes are tessellated by egui; the exported bitmap has to be
//! produced without a GPU, so strokes are stamped as filled discs along each
//! segment into an `image::RgbaImage`.

use egui::{Color32, Pos2};
use image::{Rgba, RgbaImage};

use crate::stroke::Stroke;

/// Renders `strokes` onto a fully transparent layer of `width` x `height`.
pub fn rasterize<'a>(strokes: impl IntoIterator<Item = &'a Stroke>, width: u32, height: u32) -> RgbaImage {
    let mut layer = RgbaImage::new(width, height);
    for stroke in strokes {
        draw_stroke(&mut layer, stroke);
    }
    layer
}

/// Composites `layer` over an opaque `background`, so no alpha survives export.
pub fn flatten_onto(layer: &RgbaImage, background: Color32) -> RgbaImage {
    let bg = Rgba([background.r(), background.g(), background.b(), 255]);
    let mut out = RgbaImage::from_pixel(layer.width(), layer.height(), bg);
    for (x, y, pixel) in layer.enumerate_pixels() {
        blend_over(out.get_pixel_mut(x, y), *pixel);
    }
    out
}

pub fn draw_stroke(layer: &mut RgbaImage, stroke: &Stroke) {
    let color = stroke.color().to_srgba_unmultiplied();
    let pixel = Rgba(color);
    let radius = stroke.radius().max(0.5);

    match stroke.points() {
        [] => {}
        [single] => stamp_disc(layer, *single, radius, pixel),
        points => {
            // Half-radius spacing keeps consecutive discs overlapping
            let spacing = (radius * 0.5).max(0.5);
            for segment in points.windows(2) {
                let (start, end) = (segment[0], segment[1]);
                let length = start.distance(end);
                let steps = (length / spacing).ceil().max(1.0) as usize;
                for i in 0..=steps {
                    let t = i as f32 / steps as f32;
                    stamp_disc(layer, start.lerp(end, t), radius, pixel);
                }
            }
        }
    }
}

fn stamp_disc(layer: &mut RgbaImage, center: Pos2, radius: f32, pixel: Rgba<u8>) {
    let (width, height) = (layer.width() as i64, layer.height() as i64);
    let min_x = ((center.x - radius).floor() as i64).max(0);
    let max_x = ((center.x + radius).ceil() as i64).min(width - 1);
    let min_y = ((center.y - radius).floor() as i64).max(0);
    let max_y = ((center.y + radius).ceil() as i64).min(height - 1);
    let radius_sq = radius * radius;

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            // Sample at the pixel centre
            let dx = x as f32 + 0.5 - center.x;
            let dy = y as f32 + 0.5 - center.y;
            if dx * dx + dy * dy <= radius_sq {
                // Overlapping stamps of the same stroke must not accumulate alpha
                layer.put_pixel(x as u32, y as u32, pixel);
            }
        }
    }
}

fn blend_over(dst: &mut Rgba<u8>, src: Rgba<u8>) {
    let alpha = u32::from(src[3]);
    if alpha == 0 {
        return;
    }
    if alpha == 255 {
        *dst = Rgba([src[0], src[1], src[2], 255]);
        return;
    }
    for channel in 0..3 {
        let s = u32::from(src[channel]);
        let d = u32::from(dst[channel]);
        dst[channel] = ((s * alpha + d * (255 - alpha) + 127) / 255) as u8;
    }
    dst[3] = 255;
}
