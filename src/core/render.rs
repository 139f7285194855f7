//! Rasterises QR module matrices in the three supported styles.
//!
//! The `qrcode` crate only supplies the module matrix; every pixel is drawn
//! here so the three styles share one geometry: an image side of
//! `(modules + 2 * border) * module_size`.

use crate::core::emblem::{self, EmblemColors};
use crate::utils::error::{QrGenError, Result};
use image::{imageops, DynamicImage, GrayImage, ImageFormat, Luma, Rgba, RgbaImage};
use qrcode::{Color, EcLevel, QrCode};
use std::io::Cursor;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Module matrix plus the quiet-zone geometry used to map pixels to modules.
pub struct ModuleGrid {
    width: i64,
    colors: Vec<Color>,
    module_size: u32,
    border: u32,
}

impl ModuleGrid {
    pub fn encode(text: &str, level: EcLevel, module_size: u32, border: u32) -> Result<Self> {
        let code = QrCode::with_error_correction_level(text.as_bytes(), level)?;
        tracing::debug!(
            "Encoded {} bytes as QR {:?} at level {:?}",
            text.len(),
            code.version(),
            level
        );
        Ok(Self {
            width: code.width() as i64,
            colors: code.to_colors(),
            module_size: module_size.max(1),
            border,
        })
    }

    /// 影像邊長（像素）
    pub fn side(&self) -> u32 {
        (self.width as u32 + 2 * self.border) * self.module_size
    }

    /// 以模組座標查詢，靜區與範圍外一律視為淺色
    pub fn is_dark(&self, mx: i64, my: i64) -> bool {
        if mx < 0 || my < 0 || mx >= self.width || my >= self.width {
            return false;
        }
        self.colors[(my * self.width + mx) as usize] == Color::Dark
    }

    /// Maps a pixel to its module coordinates and the offset inside that module.
    fn locate(&self, px: u32, py: u32) -> (i64, i64, u32, u32) {
        let border = self.border as i64;
        let mx = (px / self.module_size) as i64 - border;
        let my = (py / self.module_size) as i64 - border;
        (mx, my, px % self.module_size, py % self.module_size)
    }
}

/// Black-on-white QR at level L.
pub fn render_plain(text: &str, module_size: u32, border: u32) -> Result<GrayImage> {
    let grid = ModuleGrid::encode(text, EcLevel::L, module_size, border)?;
    let side = grid.side();
    let mut img = GrayImage::from_pixel(side, side, Luma([255u8]));

    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let (mx, my, _, _) = grid.locate(x, y);
        if grid.is_dark(mx, my) {
            *pixel = Luma([0u8]);
        }
    }

    Ok(img)
}

/// Rounded modules filled with a radial gradient, level M.
pub fn render_styled(
    text: &str,
    module_size: u32,
    border: u32,
    center: [u8; 3],
    edge: [u8; 3],
) -> Result<RgbaImage> {
    let grid = ModuleGrid::encode(text, EcLevel::M, module_size, border)?;
    let side = grid.side();
    let mut img = RgbaImage::from_pixel(side, side, WHITE);

    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let (mx, my, lx, ly) = grid.locate(x, y);
        if !grid.is_dark(mx, my) {
            continue;
        }
        if rounded_corner_clips(&grid, mx, my, lx, ly) {
            continue;
        }
        *pixel = radial_gradient(x, y, side, center, edge);
    }

    Ok(img)
}

/// 只有在角落兩側的鄰居都是淺色時才把該角修圓
fn rounded_corner_clips(grid: &ModuleGrid, mx: i64, my: i64, lx: u32, ly: u32) -> bool {
    let size = grid.module_size as f32;
    let half = size / 2.0;
    let fx = lx as f32 + 0.5;
    let fy = ly as f32 + 0.5;

    let dx = if fx < half { -1 } else { 1 };
    let dy = if fy < half { -1 } else { 1 };
    if grid.is_dark(mx + dx, my) || grid.is_dark(mx, my + dy) {
        return false;
    }

    let distance = ((fx - half).powi(2) + (fy - half).powi(2)).sqrt();
    distance > half
}

fn radial_gradient(x: u32, y: u32, side: u32, center: [u8; 3], edge: [u8; 3]) -> Rgba<u8> {
    let half = side as f32 / 2.0;
    let dx = x as f32 + 0.5 - half;
    let dy = y as f32 + 0.5 - half;
    let t = ((dx * dx + dy * dy).sqrt() / (half * std::f32::consts::SQRT_2)).clamp(0.0, 1.0);

    let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
    Rgba([
        mix(center[0], edge[0]),
        mix(center[1], edge[1]),
        mix(center[2], edge[2]),
        255,
    ])
}

/// Level-H carrier in `dark` on white, before any emblem is applied.
pub fn render_carrier(text: &str, module_size: u32, border: u32, dark: [u8; 3]) -> Result<RgbaImage> {
    let grid = ModuleGrid::encode(text, EcLevel::H, module_size, border)?;
    let side = grid.side();
    let mut img = RgbaImage::from_pixel(side, side, WHITE);
    let ink = Rgba([dark[0], dark[1], dark[2], 255]);

    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let (mx, my, _, _) = grid.locate(x, y);
        if grid.is_dark(mx, my) {
            *pixel = ink;
        }
    }

    Ok(img)
}

/// Carrier at level H with the procedural emblem composited in the centre.
pub fn render_with_logo(
    text: &str,
    module_size: u32,
    border: u32,
    logo_size: u32,
    dark: [u8; 3],
    colors: EmblemColors,
) -> Result<RgbaImage> {
    let mut img = render_carrier(text, module_size, border, dark)?;
    let side = img.width();

    // 超過邊長 30% 的遮罩已超出 H 級的修復能力
    if logo_size as u64 * 10 > side as u64 * 3 {
        return Err(QrGenError::LogoTooLarge {
            logo: logo_size,
            image: side,
        });
    }

    let logo = emblem::draw_emblem(logo_size, colors);
    let offset = ((side - logo_size) / 2) as i64;
    imageops::overlay(&mut img, &logo, offset, offset);

    Ok(img)
}

pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, ImageFormat::Png)?;
    Ok(buffer.into_inner())
}
