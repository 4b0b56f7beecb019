//! 8-bit RGBA color type for drawing operations.

use super::color_format::ChannelCount;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const TRANSPARENT: Color = Color::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Opaque gray with all color channels set to `value`.
    pub const fn gray(value: u8) -> Self {
        Self::rgb(value, value, value)
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// ITU-R 601-2 luma with rounding, as used for RGB to L conversion.
    pub fn luminance(&self) -> u8 {
        luma(self.r, self.g, self.b)
    }

    /// Writes the color into `pixel` using the layout of `channel_count`.
    pub(crate) fn write_to(&self, pixel: &mut [u8], channel_count: ChannelCount) {
        match channel_count {
            ChannelCount::L => pixel[0] = self.luminance(),
            ChannelCount::LA => {
                pixel[0] = self.luminance();
                pixel[1] = self.a;
            }
            ChannelCount::Rgb => pixel[..3].copy_from_slice(&[self.r, self.g, self.b]),
            ChannelCount::Rgba => pixel[..4].copy_from_slice(&[self.r, self.g, self.b, self.a]),
        }
    }
}

#[inline]
pub(crate) fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((r as u32 * 19595 + g as u32 * 38470 + b as u32 * 7471 + 0x8000) >> 16) as u8
}
