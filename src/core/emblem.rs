//! Procedural brand emblem: a ringed circle with a white leaf.

use image::{Rgba, RgbaImage};

/// Geometry is authored on a 60 px canvas and scaled to the requested side.
const REFERENCE_SIDE: f32 = 60.0;
const MARGIN: f32 = 5.0;
const OUTLINE: f32 = 2.0;
const LEAF: [(f32, f32); 7] = [
    (30.0, 10.0),
    (15.0, 25.0),
    (25.0, 35.0),
    (30.0, 30.0),
    (35.0, 35.0),
    (45.0, 25.0),
    (30.0, 10.0),
];

#[derive(Debug, Clone, Copy)]
pub struct EmblemColors {
    pub fill: [u8; 3],
    pub outline: [u8; 3],
    pub leaf: [u8; 3],
}

impl Default for EmblemColors {
    fn default() -> Self {
        Self {
            fill: [74, 124, 89],
            outline: [45, 90, 39],
            leaf: [255, 255, 255],
        }
    }
}

/// 在透明圖層上畫出標誌；圓形以外的像素 alpha 為 0
pub fn draw_emblem(side: u32, colors: EmblemColors) -> RgbaImage {
    let scale = side as f32 / REFERENCE_SIDE;
    let center = side as f32 / 2.0;
    let radius = center - MARGIN * scale;
    let outline = (OUTLINE * scale).max(1.0);
    let leaf: Vec<(f32, f32)> = LEAF.iter().map(|&(x, y)| (x * scale, y * scale)).collect();

    let opaque = |c: [u8; 3]| Rgba([c[0], c[1], c[2], 255]);

    RgbaImage::from_fn(side, side, |x, y| {
        let px = x as f32 + 0.5;
        let py = y as f32 + 0.5;
        let distance = ((px - center).powi(2) + (py - center).powi(2)).sqrt();

        if distance > radius {
            Rgba([255, 255, 255, 0])
        } else if point_in_polygon(px, py, &leaf) {
            opaque(colors.leaf)
        } else if distance > radius - outline {
            opaque(colors.outline)
        } else {
            opaque(colors.fill)
        }
    })
}

/// Even-odd rule ray cast.
fn point_in_polygon(x: f32, y: f32, polygon: &[(f32, f32)]) -> bool {
    let mut inside = false;
    let mut j = polygon.len().saturating_sub(1);
    for i in 0..polygon.len() {
        let (xi, yi) = polygon[i];
        let (xj, yj) = polygon[j];
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}
