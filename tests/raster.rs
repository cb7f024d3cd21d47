use image::{Rgba, RgbaImage};
use iconset::raster::{fill_ellipse, fill_polygon, fill_rect, stroke_ellipse, Rect};

const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);
const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

fn painted(img: &RgbaImage) -> usize {
    img.pixels().filter(|p| **p != CLEAR).count()
}

#[test]
fn rect_covers_pixel_centres() {
    let mut img = RgbaImage::new(10, 10);
    fill_rect(&mut img, Rect::new(2.0, 3.0, 5.0, 7.0), RED);

    assert_eq!(painted(&img), 3 * 4);
    assert_eq!(*img.get_pixel(2, 3), RED);
    assert_eq!(*img.get_pixel(4, 6), RED);
    assert_eq!(*img.get_pixel(5, 6), CLEAR);
    assert_eq!(*img.get_pixel(4, 7), CLEAR);
}

#[test]
fn rect_is_clipped_to_image() {
    let mut img = RgbaImage::new(8, 8);
    fill_rect(&mut img, Rect::new(-20.0, -20.0, 40.0, 4.0), RED);
    assert_eq!(painted(&img), 8 * 4);

    let mut img = RgbaImage::new(8, 8);
    fill_rect(&mut img, Rect::new(10.0, 10.0, 20.0, 20.0), RED);
    assert_eq!(painted(&img), 0);
}

#[test]
fn painting_replaces_alpha() {
    let mut img = RgbaImage::from_pixel(4, 4, RED);
    fill_rect(&mut img, Rect::new(0.0, 0.0, 2.0, 4.0), CLEAR);
    assert_eq!(*img.get_pixel(0, 0), CLEAR);
    assert_eq!(*img.get_pixel(3, 0), RED);
}

#[test]
fn ellipse_fill_is_symmetric() {
    let mut img = RgbaImage::new(21, 21);
    fill_ellipse(&mut img, Rect::new(0.0, 0.0, 21.0, 21.0), RED);

    assert_eq!(*img.get_pixel(10, 10), RED);
    assert_eq!(*img.get_pixel(0, 10), RED);
    assert_eq!(*img.get_pixel(10, 20), RED);
    assert_eq!(*img.get_pixel(0, 0), CLEAR);
    assert_eq!(*img.get_pixel(20, 20), CLEAR);
    for y in 0..21 {
        for x in 0..21 {
            assert_eq!(img.get_pixel(x, y), img.get_pixel(20 - x, y));
            assert_eq!(img.get_pixel(x, y), img.get_pixel(x, 20 - y));
        }
    }

    // Close to pi * r^2
    let area = painted(&img) as f32;
    let expected = std::f32::consts::PI * 10.5 * 10.5;
    assert!((area - expected).abs() / expected < 0.05, "area {}", area);
}

#[test]
fn degenerate_ellipse_draws_nothing() {
    let mut img = RgbaImage::new(8, 8);
    fill_ellipse(&mut img, Rect::new(4.0, 4.0, 4.0, 8.0), RED);
    stroke_ellipse(&mut img, Rect::new(0.0, 0.0, 8.0, 8.0), 0.0, RED);
    assert_eq!(painted(&img), 0);
}

#[test]
fn ellipse_outline_leaves_hollow() {
    let mut img = RgbaImage::new(40, 40);
    stroke_ellipse(&mut img, Rect::new(0.0, 0.0, 40.0, 40.0), 5.0, RED);

    assert_eq!(*img.get_pixel(20, 20), CLEAR);
    assert_eq!(*img.get_pixel(2, 20), RED);
    assert_eq!(*img.get_pixel(37, 20), RED);
    assert_eq!(*img.get_pixel(20, 2), RED);
    assert_eq!(*img.get_pixel(8, 20), CLEAR);
    assert_eq!(*img.get_pixel(0, 0), CLEAR);
}

#[test]
fn thick_outline_fills_the_ellipse() {
    let mut outline = RgbaImage::new(20, 20);
    stroke_ellipse(&mut outline, Rect::new(0.0, 0.0, 20.0, 20.0), 15.0, RED);
    let mut filled = RgbaImage::new(20, 20);
    fill_ellipse(&mut filled, Rect::new(0.0, 0.0, 20.0, 20.0), RED);
    assert_eq!(outline, filled);
}

#[test]
fn polygon_fill_triangle() {
    let mut img = RgbaImage::new(20, 20);
    fill_polygon(&mut img, &[(0.0, 0.0), (20.0, 0.0), (0.0, 20.0)], RED);

    assert_eq!(*img.get_pixel(1, 1), RED);
    assert_eq!(*img.get_pixel(18, 0), RED);
    assert_eq!(*img.get_pixel(18, 18), CLEAR);
    // Upper-left half of the square; centres on the diagonal stay clear
    assert_eq!(painted(&img), (0..20).map(|y| 19 - y).sum::<usize>());
}

#[test]
fn polygon_needs_three_points() {
    let mut img = RgbaImage::new(8, 8);
    fill_polygon(&mut img, &[(0.0, 0.0), (8.0, 8.0)], RED);
    assert_eq!(painted(&img), 0);
}
