use std::borrow::Cow;

use image::buffer::ConvertBuffer;
use image::imageops::{self, FilterType};
use image::{RgbImage, Rgba, RgbaImage};
use serde::Deserialize;

use crate::raster::{self, Rect};

/// Edge length of the master image every output is resampled from.
pub const MASTER_SIZE: u32 = 1024;

// Glyph proportions, as fractions of the canonical edge length.
const RING_PAD: f32 = 0.18;
const RING_THICKNESS: f32 = 0.14;
const OPENING_WIDTH: f32 = 0.33;
const OPENING_HEIGHT: f32 = 0.58;
const END_CAP: f32 = 0.6; // of the ring thickness
const PLAY_DISC_RADIUS: f32 = 0.13;
const PLAY_TRIANGLE: [(f32, f32); 3] = [(-0.04, -0.065), (-0.04, 0.065), (0.07, 0.0)];

const GLOSS_BOX: [f32; 4] = [-0.15, -0.25, 0.75, 0.45];
const GLOSS_ALPHA: u8 = 46;
const GLOSS_BLUR: f32 = 0.06;

const SHADOW_OPACITY: f32 = 0.35;
const SHADOW_BLUR: f32 = 0.02;
const SHADOW_OFFSET: f32 = 0.012;

/// Colours and optional refinements of the generated icon.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Recipe {
    #[serde(default = "default_top_color")]
    pub top_color: [u8; 3],

    #[serde(default = "default_bottom_color")]
    pub bottom_color: [u8; 3],

    /// Glyph colour
    #[serde(default = "default_foreground")]
    pub foreground: [u8; 3],

    /// Soft highlight near the top-left corner
    #[serde(default = "default_true")]
    pub gloss: bool,

    /// Blurred drop shadow beneath the glyph
    #[serde(default = "default_true")]
    pub shadow: bool,
}

impl Default for Recipe {
    fn default() -> Self {
        Self {
            top_color: default_top_color(),
            bottom_color: default_bottom_color(),
            foreground: default_foreground(),
            gloss: true,
            shadow: true,
        }
    }
}

impl Recipe {
    /// Composes background, gloss, shadow and glyph at `size`×`size`.
    ///
    /// Production output always uses [`MASTER_SIZE`]; other sizes exist so
    /// the composition can be compared across resolutions.
    pub fn render(&self, size: u32) -> RgbaImage {
        let mut canvas = gradient(size, self.top_color, self.bottom_color);

        if self.gloss {
            imageops::overlay(&mut canvas, &gloss(size), 0, 0);
        }

        let glyph = glyph(size, self.foreground);

        if self.shadow {
            let offset = (SHADOW_OFFSET * size as f32).round() as i64;
            imageops::overlay(&mut canvas, &shadow(&glyph), 0, offset);
        }

        imageops::overlay(&mut canvas, &glyph, 0, 0);
        canvas
    }

    pub fn render_master(&self) -> RgbaImage {
        self.render(MASTER_SIZE)
    }
}

fn default_top_color() -> [u8; 3] {
    [10, 132, 255]
}

fn default_bottom_color() -> [u8; 3] {
    [0, 96, 223]
}

fn default_foreground() -> [u8; 3] {
    [255, 255, 255]
}

fn default_true() -> bool {
    true
}

/// Opaque vertical gradient from `top` (first row) to `bottom` (last row).
pub fn gradient(size: u32, top: [u8; 3], bottom: [u8; 3]) -> RgbaImage {
    let mut img = RgbaImage::new(size, size);
    let denominator = f64::from(size.saturating_sub(1).max(1));

    for (y, row) in img.enumerate_rows_mut() {
        let t = f64::from(y) / denominator;
        let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t) as u8;
        let color = Rgba([
            mix(top[0], bottom[0]),
            mix(top[1], bottom[1]),
            mix(top[2], bottom[2]),
            255,
        ]);
        for (_, _, pixel) in row {
            *pixel = color;
        }
    }

    img
}

/// Translucent white highlight, blurred, on a transparent layer.
pub fn gloss(size: u32) -> RgbaImage {
    let s = size as f32;
    // White under zero alpha so the blur only spreads alpha.
    let mut layer = RgbaImage::from_pixel(size, size, Rgba([255, 255, 255, 0]));
    let [x0, y0, x1, y1] = GLOSS_BOX;
    raster::fill_ellipse(
        &mut layer,
        Rect::new(x0 * s, y0 * s, x1 * s, y1 * s),
        Rgba([255, 255, 255, GLOSS_ALPHA]),
    );
    soften(layer, GLOSS_BLUR * s)
}

/// The "C" ring with a knocked-out play symbol in its hollow.
pub fn glyph(size: u32, foreground: [u8; 3]) -> RgbaImage {
    let s = size as f32;
    let fg = Rgba([foreground[0], foreground[1], foreground[2], 255]);
    let mut layer = RgbaImage::new(size, size);

    let pad = RING_PAD * s;
    let thickness = RING_THICKNESS * s;
    raster::stroke_ellipse(&mut layer, Rect::new(pad, pad, s - pad, s - pad), thickness, fg);

    // The bottom-centre edge pixel lies outside the ring, so cutting with it
    // restores whatever the layer was filled with.
    let cut = *layer.get_pixel(size / 2, size - 1);

    let open_w = OPENING_WIDTH * s;
    let open_h = OPENING_HEIGHT * s;
    let open_left = s - pad - open_w;
    let open_top = (s - open_h) / 2.0;
    let open_bottom = (s + open_h) / 2.0;
    raster::fill_rect(
        &mut layer,
        Rect::new(open_left, open_top, s - pad + open_w, open_bottom),
        cut,
    );

    let end_r = END_CAP * thickness;
    raster::fill_ellipse(&mut layer, Rect::around(open_left, open_top, end_r), cut);
    raster::fill_ellipse(&mut layer, Rect::around(open_left, open_bottom, end_r), cut);

    let (cx, cy) = (s / 2.0, s / 2.0);
    raster::fill_ellipse(&mut layer, Rect::around(cx, cy, PLAY_DISC_RADIUS * s), fg);
    let triangle = PLAY_TRIANGLE.map(|(dx, dy)| (cx + dx * s, cy + dy * s));
    raster::fill_polygon(&mut layer, &triangle, cut);

    layer
}

/// Blurred black silhouette of `glyph` at reduced opacity.
pub fn shadow(glyph: &RgbaImage) -> RgbaImage {
    let mask = RgbaImage::from_fn(glyph.width(), glyph.height(), |x, y| {
        let alpha = f32::from(glyph.get_pixel(x, y)[3]);
        Rgba([0, 0, 0, (alpha * SHADOW_OPACITY).round() as u8])
    });
    soften(mask, SHADOW_BLUR * glyph.width() as f32)
}

fn soften(layer: RgbaImage, sigma: f32) -> RgbaImage {
    if sigma < 1.0 {
        return layer;
    }
    imageops::fast_blur(&layer, sigma)
}

/// `master` itself when it already has the requested edge length, otherwise
/// a Lanczos3 resampled copy.
pub fn resample(master: &RgbaImage, pixels: u32) -> Cow<'_, RgbaImage> {
    if master.width() == pixels && master.height() == pixels {
        Cow::Borrowed(master)
    } else {
        Cow::Owned(imageops::resize(master, pixels, pixels, FilterType::Lanczos3))
    }
}

/// Drops the alpha channel; icons are delivered opaque.
pub fn flatten(img: &RgbaImage) -> RgbImage {
    img.convert()
}

/// blake3 digest of the pixel data, independent of PNG encoder settings.
pub fn pixel_hash(img: &RgbImage) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&img.width().to_le_bytes());
    hasher.update(&img.height().to_le_bytes());
    hasher.update(img.as_raw());
    hasher.finalize().to_hex().to_string()
}

