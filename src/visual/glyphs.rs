//! Glyph mask textures for the ten digits and the colon.
//!
//! Masks are either rasterized from seven-segment shapes at startup or loaded
//! from PNG files. The shader only reads the red channel.

use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};

use crate::clock::Digit;
use crate::clock::digit::SegmentId;
use crate::clock::settings::GlyphSettings;

/// Handles to every glyph mask
#[derive(Resource, Clone, Debug)]
pub struct GlyphTextures {
    pub digits: [Handle<Image>; 10],
    pub colon: Handle<Image>,
}

impl GlyphTextures {
    pub fn digit(&self, digit: Digit) -> Handle<Image> {
        self.digits[digit.to_u8() as usize].clone()
    }

    pub fn from_settings(
        settings: &GlyphSettings,
        colon_ratio: f32,
        images: &mut Assets<Image>,
        asset_server: &AssetServer,
    ) -> Self {
        match settings {
            GlyphSettings::Procedural { width, height } => {
                Self::procedural(images, *width, *height, colon_ratio)
            }
            GlyphSettings::Assets { dir } => Self::load(asset_server, dir),
        }
    }

    /// Issue one load per glyph; slots pick the textures up once they resolve
    pub fn load(asset_server: &AssetServer, dir: &str) -> Self {
        info!("Loading digit glyphs from {dir}/");
        Self {
            digits: std::array::from_fn(|n| asset_server.load(format!("{dir}/{n}.png"))),
            colon: asset_server.load(format!("{dir}/colon.png")),
        }
    }

    pub fn procedural(images: &mut Assets<Image>, width: u32, height: u32, colon_ratio: f32) -> Self {
        let width = width.max(8);
        let height = height.max(8);
        let colon_width = ((width as f32 * colon_ratio).round() as u32).max(4);

        let digits = std::array::from_fn(|n| {
            let digit = Digit::ALL[n];
            images.add(mask_image(width, height, rasterize_digit(digit, width, height)))
        });
        let colon = images.add(mask_image(
            colon_width,
            height,
            rasterize_colon(colon_width, height),
        ));

        info!("Rasterized digit glyphs at {width}x{height}");
        Self { digits, colon }
    }
}

fn mask_image(width: u32, height: u32, data: Vec<u8>) -> Image {
    Image::new(
        Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        data,
        TextureFormat::R8Unorm,
        RenderAssetUsages::RENDER_WORLD,
    )
}

/// Pixel rectangle, half-open on the max side
#[derive(Clone, Copy, Debug)]
struct Rect {
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
}

impl Rect {
    fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }
}

/// Segment rectangle in pixel space (y grows downward)
fn segment_rect(segment: SegmentId, width: f32, height: f32) -> Rect {
    let mx = width * 0.12;
    let my = height * 0.08;
    let t = width * 0.16;
    let mid = height * 0.5;

    let (left, right) = (mx, width - mx);
    let (top, bottom) = (my, height - my);

    match segment {
        SegmentId::Top => Rect { x0: left, y0: top, x1: right, y1: top + t },
        SegmentId::Middle => Rect { x0: left, y0: mid - t * 0.5, x1: right, y1: mid + t * 0.5 },
        SegmentId::Bottom => Rect { x0: left, y0: bottom - t, x1: right, y1: bottom },
        SegmentId::TopLeft => Rect { x0: left, y0: top, x1: left + t, y1: mid },
        SegmentId::TopRight => Rect { x0: right - t, y0: top, x1: right, y1: mid },
        SegmentId::BottomLeft => Rect { x0: left, y0: mid, x1: left + t, y1: bottom },
        SegmentId::BottomRight => Rect { x0: right - t, y0: mid, x1: right, y1: bottom },
    }
}

/// Row-major 8-bit mask of a seven-segment digit
pub fn rasterize_digit(digit: Digit, width: u32, height: u32) -> Vec<u8> {
    let rects: Vec<Rect> = SegmentId::ALL
        .iter()
        .filter(|&&segment| digit.is_segment_lit(segment))
        .map(|&segment| segment_rect(segment, width as f32, height as f32))
        .collect();

    rasterize(width, height, |x, y| rects.iter().any(|r| r.contains(x, y)))
}

/// Row-major 8-bit mask of two stacked round dots
pub fn rasterize_colon(width: u32, height: u32) -> Vec<u8> {
    let cx = width as f32 * 0.5;
    let radius = width as f32 * 0.3;
    let dots = [height as f32 * 0.32, height as f32 * 0.68];

    rasterize(width, height, |x, y| {
        dots.iter()
            .any(|&cy| (x - cx).powi(2) + (y - cy).powi(2) <= radius * radius)
    })
}

fn rasterize(width: u32, height: u32, inside: impl Fn(f32, f32) -> bool) -> Vec<u8> {
    let mut data = Vec::with_capacity((width * height) as usize);
    for row in 0..height {
        for col in 0..width {
            let lit = inside(col as f32 + 0.5, row as f32 + 0.5);
            data.push(if lit { u8::MAX } else { 0 });
        }
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(data: &[u8]) -> usize {
        data.iter().filter(|&&v| v > 0).count()
    }

    #[test]
    fn test_every_digit_has_pixels() {
        for digit in Digit::ALL {
            let data = rasterize_digit(digit, 64, 104);
            assert_eq!(data.len(), 64 * 104);
            assert!(lit(&data) > 0, "{:?} is blank", digit);
        }
    }

    #[test]
    fn test_eight_covers_one() {
        let one = rasterize_digit(Digit::One, 64, 104);
        let eight = rasterize_digit(Digit::Eight, 64, 104);
        assert!(lit(&eight) > lit(&one) * 2);
        for (a, b) in one.iter().zip(&eight) {
            if *a > 0 {
                assert!(*b > 0);
            }
        }
    }

    #[test]
    fn test_digits_are_distinct() {
        let masks: Vec<_> = Digit::ALL
            .iter()
            .map(|&d| rasterize_digit(d, 32, 52))
            .collect();
        for i in 0..masks.len() {
            for j in (i + 1)..masks.len() {
                assert_ne!(masks[i], masks[j], "digits {} and {} look the same", i, j);
            }
        }
    }

    #[test]
    fn test_colon_has_two_dots() {
        let (w, h) = (26, 104);
        let data = rasterize_colon(w, h);
        assert!(lit(&data) > 0);

        // Middle row sits between the dots
        let mid_row = &data[(h / 2 * w) as usize..((h / 2 + 1) * w) as usize];
        assert_eq!(lit(mid_row), 0);
        let dot_row = (h as f32 * 0.32) as u32;
        let row = &data[(dot_row * w) as usize..((dot_row + 1) * w) as usize];
        assert!(lit(row) > 0);
    }
}
