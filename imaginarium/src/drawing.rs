//! Drawing primitives for 8-bit images.
//!
//! Shapes overwrite pixels (no blending). The color is written in the image's
//! own channel layout, so gray images receive the color's luminance.

use crate::{Color, Image};
use glam::Vec2;

/// Fill an axis-aligned ellipse.
///
/// A pixel `(x, y)` is covered when `((x-cx)/rx)² + ((y-cy)/ry)² <= 1`.
/// A non-positive radius on either axis draws nothing.
///
/// # Arguments
/// * `image` - The image to draw on
/// * `center` - Center coordinates
/// * `radii` - Horizontal and vertical radius in pixels
/// * `color` - Fill color
pub fn fill_ellipse(image: &mut Image, center: Vec2, radii: Vec2, color: Color) {
    if radii.x <= 0.0 || radii.y <= 0.0 {
        return;
    }

    let width = image.width() as i64;
    let height = image.height() as i64;

    let x_min = ((center.x - radii.x).floor() as i64).max(0);
    let x_max = ((center.x + radii.x).ceil() as i64).min(width - 1);
    let y_min = ((center.y - radii.y).floor() as i64).max(0);
    let y_max = ((center.y + radii.y).ceil() as i64).min(height - 1);

    // ellipse inequality multiplied through by rx² ry²
    let rx_sq = radii.x as f64 * radii.x as f64;
    let ry_sq = radii.y as f64 * radii.y as f64;
    let limit = rx_sq * ry_sq;

    for y in y_min..=y_max {
        let dy = y as f64 - center.y as f64;
        for x in x_min..=x_max {
            let dx = x as f64 - center.x as f64;
            if dx * dx * ry_sq + dy * dy * rx_sq <= limit {
                image.set_pixel(x as usize, y as usize, color);
            }
        }
    }
}

/// Fill a circle; shorthand for [`fill_ellipse`] with equal radii.
pub fn fill_circle(image: &mut Image, center: Vec2, radius: f32, color: Color) {
    fill_ellipse(image, center, Vec2::splat(radius), color);
}

/// Draw a straight line with the given thickness.
///
/// # Arguments
/// * `image` - The image to draw on
/// * `start` - Start point
/// * `end` - End point
/// * `color` - Line color
/// * `thickness` - Line thickness in pixels
pub fn draw_line(image: &mut Image, start: Vec2, end: Vec2, color: Color, thickness: f32) {
    let delta = end - start;
    let length = delta.length();

    if length < 0.001 {
        put_pixel(image, start, color);
        return;
    }

    let dir = delta / length;
    let normal = dir.perp();
    let half_thick = thickness / 2.0;

    let steps = (length.ceil() as usize).max(1);
    let thick_steps = (thickness.ceil() as i32).max(1);

    for i in 0..=steps {
        let point = start + delta * (i as f32 / steps as f32);

        for j in -thick_steps..=thick_steps {
            let offset = j as f32 * 0.5;
            if offset.abs() > half_thick {
                continue;
            }
            put_pixel(image, point + normal * offset, color);
        }
    }
}

#[inline]
fn put_pixel(image: &mut Image, position: Vec2, color: Color) {
    let x = position.x.round() as i64;
    let y = position.y.round() as i64;
    if image.contains(x, y) {
        image.set_pixel(x as usize, y as usize, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ChannelCount, ImageDesc};

    fn gray_image(width: usize, height: usize) -> Image {
        Image::new_empty(ImageDesc::new(width, height, ChannelCount::L)).unwrap()
    }

    fn covered(image: &Image) -> usize {
        image.bytes().iter().filter(|&&v| v == 255).count()
    }

    #[test]
    fn fill_circle_matches_distance_rule() {
        let mut img = gray_image(21, 21);
        fill_circle(&mut img, Vec2::new(10.0, 10.0), 5.0, Color::WHITE);

        for y in 0..21 {
            for x in 0..21 {
                let dx = x as f32 - 10.0;
                let dy = y as f32 - 10.0;
                let inside = dx * dx + dy * dy <= 25.0;
                assert_eq!(img.pixel(x, y)[0] == 255, inside, "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn zero_radius_draws_nothing() {
        let mut img = gray_image(8, 8);
        fill_circle(&mut img, Vec2::new(4.0, 4.0), 0.0, Color::WHITE);
        assert_eq!(covered(&img), 0);
    }

    #[test]
    fn ellipse_clips_to_image() {
        let mut img = gray_image(10, 10);
        fill_ellipse(&mut img, Vec2::new(0.0, 0.0), Vec2::new(4.0, 2.0), Color::WHITE);
        assert_eq!(img.pixel(0, 0)[0], 255);
        assert_eq!(img.pixel(4, 0)[0], 255);
        assert_eq!(img.pixel(0, 2)[0], 255);
        assert_eq!(img.pixel(4, 1)[0], 0);
        assert_eq!(img.pixel(0, 3)[0], 0);
    }

    #[test]
    fn horizontal_line_has_thickness() {
        let desc = ImageDesc::new(20, 20, ChannelCount::Rgba);
        let mut img = Image::new_filled(desc, Color::TRANSPARENT).unwrap();
        let color = Color::gray(50).with_alpha(128);
        draw_line(&mut img, Vec2::new(2.0, 10.0), Vec2::new(17.0, 10.0), color, 3.0);

        assert_eq!(img.pixel(2, 10), &[50, 50, 50, 128]);
        assert_eq!(img.pixel(17, 10), &[50, 50, 50, 128]);
        assert_eq!(img.pixel(10, 9), &[50, 50, 50, 128]);
        assert_eq!(img.pixel(10, 11), &[50, 50, 50, 128]);
        assert_eq!(img.pixel(10, 13), &[0, 0, 0, 0]);
        assert_eq!(img.pixel(0, 10), &[0, 0, 0, 0]);
    }

    #[test]
    fn degenerate_line_is_a_point() {
        let mut img = gray_image(5, 5);
        draw_line(&mut img, Vec2::new(2.0, 2.0), Vec2::new(2.0, 2.0), Color::WHITE, 4.0);
        assert_eq!(covered(&img), 1);
        assert_eq!(img.pixel(2, 2)[0], 255);
    }
}
