//! Image comparison utilities for testing.

use crate::image::Image;

/// Bounding rectangle of the pixels that differ between two images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangedRegion {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

/// Returns the smallest rectangle containing every pixel where `a` and `b`
/// differ in any channel, or `None` if the images are identical.
///
/// # Panics
/// Panics if images have different dimensions or channel layouts.
pub fn changed_region(a: &Image, b: &Image) -> Option<ChangedRegion> {
    assert_eq!(a.desc(), b.desc(), "image desc mismatch");

    let width = a.desc().width;
    let mut bounds: Option<(usize, usize, usize, usize)> = None;

    for y in 0..a.desc().height {
        for x in 0..width {
            if a.pixel(x, y) == b.pixel(x, y) {
                continue;
            }
            bounds = Some(match bounds {
                None => (x, y, x, y),
                Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
            });
        }
    }

    bounds.map(|(x0, y0, x1, y1)| ChangedRegion {
        x: x0,
        y: y0,
        width: x1 - x0 + 1,
        height: y1 - y0 + 1,
    })
}
