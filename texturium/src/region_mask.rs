use glam::{IVec2, Vec2};
use imaginarium::drawing::fill_circle;
use imaginarium::{ChannelCount, Color, Image, ImageDesc};

use crate::config::RingGeometry;
use crate::error::{Error, Result};

/// Foreground value of a mask pixel.
pub const FOREGROUND: u8 = 255;

/// Single-channel placement region: 255 where sprites may land, 0 elsewhere.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionMask {
    mask: Image,
}

impl RegionMask {
    /// Paints a disc of `outer_radius`, then clears a disc of `inner_radius`
    /// at the same center. `inner_radius >= outer_radius` leaves the mask empty.
    pub fn build_ring(
        width: usize,
        height: usize,
        center: IVec2,
        inner_radius: i32,
        outer_radius: i32,
    ) -> Result<Self> {
        let desc = ImageDesc::new(width, height, ChannelCount::L);
        let mut mask = Image::new_empty(desc).map_err(Error::Composite)?;

        let center = Vec2::new(center.x as f32, center.y as f32);
        fill_circle(&mut mask, center, outer_radius as f32, Color::WHITE);
        fill_circle(&mut mask, center, inner_radius as f32, Color::BLACK);

        Ok(Self { mask })
    }

    pub fn from_geometry(width: usize, height: usize, ring: &RingGeometry) -> Result<Self> {
        Self::build_ring(
            width,
            height,
            ring.center,
            ring.inner_radius,
            ring.outer_radius,
        )
    }

    /// Out-of-image coordinates, negative ones included, are outside.
    pub fn is_inside(&self, x: i64, y: i64) -> bool {
        self.mask.contains(x, y) && self.mask.pixel(x as usize, y as usize)[0] == FOREGROUND
    }

    /// Number of foreground pixels.
    pub fn area(&self) -> usize {
        self.mask.bytes().iter().filter(|&&v| v == FOREGROUND).count()
    }

    pub fn width(&self) -> usize {
        self.mask.width()
    }

    pub fn height(&self) -> usize {
        self.mask.height()
    }

    pub fn image(&self) -> &Image {
        &self.mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_inner_radius_is_a_filled_disk() {
        let mask = RegionMask::build_ring(41, 41, IVec2::new(20, 20), 0, 10).unwrap();
        for y in 0..41i64 {
            for x in 0..41i64 {
                let d2 = (x - 20).pow(2) + (y - 20).pow(2);
                assert_eq!(mask.is_inside(x, y), d2 <= 100, "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn ring_excludes_hole_and_keeps_boundaries() {
        let mask = RegionMask::build_ring(41, 41, IVec2::new(20, 20), 5, 10).unwrap();
        assert!(!mask.is_inside(20, 20));
        assert!(!mask.is_inside(25, 20));
        assert!(mask.is_inside(26, 20));
        assert!(mask.is_inside(30, 20));
        assert!(!mask.is_inside(31, 20));
        assert!(mask.is_inside(20, 12));
    }

    #[test]
    fn inverted_ring_is_empty() {
        let mask = RegionMask::build_ring(30, 30, IVec2::new(15, 15), 10, 10).unwrap();
        assert_eq!(mask.area(), 0);
        let mask = RegionMask::build_ring(30, 30, IVec2::new(15, 15), 12, 8).unwrap();
        assert_eq!(mask.area(), 0);
    }

    #[test]
    fn out_of_image_is_outside() {
        let mask = RegionMask::build_ring(10, 10, IVec2::new(0, 0), 0, 20).unwrap();
        assert!(mask.is_inside(0, 0));
        assert!(mask.is_inside(9, 9));
        assert!(!mask.is_inside(-1, 0));
        assert!(!mask.is_inside(0, -1));
        assert!(!mask.is_inside(10, 3));
        assert_eq!(mask.area(), 100);
    }

    #[test]
    fn default_geometry_matches_annulus() {
        let mask = RegionMask::from_geometry(2000, 2000, &RingGeometry::default()).unwrap();
        assert!(!mask.is_inside(600, 1524));
        assert!(mask.is_inside(900, 1524));
        assert!(mask.is_inside(524, 1024));
        assert!(!mask.is_inside(524, 1023));
    }
}
