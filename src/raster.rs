//! Solid-fill drawing primitives on an RGBA buffer.
//!
//! Shapes are described in continuous pixel-edge coordinates: the pixel at
//! `(x, y)` covers `[x, x + 1) × [y, y + 1)` and is painted when its centre
//! lies inside the shape. Painting replaces the pixel outright, alpha
//! included, so drawing a transparent colour punches a hole.

use image::{Rgba, RgbaImage};

/// Axis-aligned box in pixel-edge coordinates. May extend past the image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl Rect {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Square of side `2 * r` centred on `(cx, cy)`.
    pub fn around(cx: f32, cy: f32, r: f32) -> Self {
        Self::new(cx - r, cy - r, cx + r, cy + r)
    }

    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    fn center(&self) -> (f32, f32) {
        ((self.x0 + self.x1) / 2.0, (self.y0 + self.y1) / 2.0)
    }
}

/// Paints every pixel whose centre lies in `bounds` (clipped to the image)
/// and satisfies `inside`.
fn paint_where(
    img: &mut RgbaImage,
    bounds: Rect,
    color: Rgba<u8>,
    inside: impl Fn(f32, f32) -> bool,
) {
    let (w, h) = img.dimensions();
    let x_start = bounds.x0.floor().max(0.0) as u32;
    let y_start = bounds.y0.floor().max(0.0) as u32;
    let x_end = (bounds.x1.ceil().max(0.0) as u32).min(w);
    let y_end = (bounds.y1.ceil().max(0.0) as u32).min(h);

    for y in y_start..y_end {
        let py = y as f32 + 0.5;
        if py < bounds.y0 || py >= bounds.y1 {
            continue;
        }
        for x in x_start..x_end {
            let px = x as f32 + 0.5;
            if px >= bounds.x0 && px < bounds.x1 && inside(px, py) {
                img.put_pixel(x, y, color);
            }
        }
    }
}

pub fn fill_rect(img: &mut RgbaImage, rect: Rect, color: Rgba<u8>) {
    paint_where(img, rect, color, |_, _| true);
}

/// Fills the ellipse inscribed in `bbox`.
pub fn fill_ellipse(img: &mut RgbaImage, bbox: Rect, color: Rgba<u8>) {
    let (cx, cy) = bbox.center();
    let (rx, ry) = (bbox.width() / 2.0, bbox.height() / 2.0);
    if rx <= 0.0 || ry <= 0.0 {
        return;
    }

    paint_where(img, bbox, color, |px, py| in_ellipse(px - cx, py - cy, rx, ry));
}

/// Draws the outline of the ellipse inscribed in `bbox`, `thickness` pixels
/// wide, growing inwards from the box edge.
pub fn stroke_ellipse(img: &mut RgbaImage, bbox: Rect, thickness: f32, color: Rgba<u8>) {
    let (cx, cy) = bbox.center();
    let (rx, ry) = (bbox.width() / 2.0, bbox.height() / 2.0);
    if rx <= 0.0 || ry <= 0.0 || thickness <= 0.0 {
        return;
    }

    let (irx, iry) = (rx - thickness, ry - thickness);
    paint_where(img, bbox, color, |px, py| {
        let (dx, dy) = (px - cx, py - cy);
        in_ellipse(dx, dy, rx, ry) && (irx <= 0.0 || iry <= 0.0 || !in_ellipse(dx, dy, irx, iry))
    });
}

/// Fills a simple polygon using the even-odd rule.
pub fn fill_polygon(img: &mut RgbaImage, points: &[(f32, f32)], color: Rgba<u8>) {
    if points.len() < 3 {
        return;
    }

    let bounds = points.iter().fold(
        Rect::new(f32::MAX, f32::MAX, f32::MIN, f32::MIN),
        |r, &(x, y)| Rect::new(r.x0.min(x), r.y0.min(y), r.x1.max(x), r.y1.max(y)),
    );

    paint_where(img, bounds, color, |px, py| in_polygon(points, px, py));
}

fn in_ellipse(dx: f32, dy: f32, rx: f32, ry: f32) -> bool {
    let nx = dx / rx;
    let ny = dy / ry;
    nx * nx + ny * ny <= 1.0
}

fn in_polygon(points: &[(f32, f32)], px: f32, py: f32) -> bool {
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (xi, yi) = points[i];
        let (xj, yj) = points[j];
        if (yi > py) != (yj > py) && px < (xj - xi) * (py - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}
