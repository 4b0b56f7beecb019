mod io;

#[cfg(test)]
mod tests;

use std::path::Path;

use crate::common::color::luma;
use crate::common::{ChannelCount, Color, Error, Result};

/// Supported image file extensions for reading. Writing supports png and jpeg.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif"];

#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub struct ImageDesc {
    pub width: usize,
    pub height: usize,
    pub channel_count: ChannelCount,
}

/// Tightly packed 8-bit image, rows top to bottom.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    desc: ImageDesc,
    bytes: Vec<u8>,
}

impl ImageDesc {
    pub fn new(width: usize, height: usize, channel_count: ChannelCount) -> Self {
        Self {
            width,
            height,
            channel_count,
        }
    }

    pub fn row_bytes(&self) -> usize {
        self.width * self.channel_count.byte_count()
    }

    pub fn size_in_bytes(&self) -> usize {
        self.row_bytes() * self.height
    }

    fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidDimensions(format!(
                "{}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

impl Image {
    pub fn desc(&self) -> &ImageDesc {
        &self.desc
    }

    pub fn width(&self) -> usize {
        self.desc.width
    }

    pub fn height(&self) -> usize {
        self.desc.height
    }

    pub fn channel_count(&self) -> ChannelCount {
        self.desc.channel_count
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    pub fn take_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Creates an image with every byte set to zero.
    pub fn new_empty(desc: ImageDesc) -> Result<Image> {
        desc.validate()?;

        let bytes = vec![0; desc.size_in_bytes()];

        Ok(Image { desc, bytes })
    }

    /// Creates an image with every pixel set to `color`.
    pub fn new_filled(desc: ImageDesc, color: Color) -> Result<Image> {
        let mut image = Image::new_empty(desc)?;
        let pixel_size = desc.channel_count.byte_count();
        for pixel in image.bytes.chunks_exact_mut(pixel_size) {
            color.write_to(pixel, desc.channel_count);
        }
        Ok(image)
    }

    pub fn new_with_data(desc: ImageDesc, bytes: Vec<u8>) -> Result<Image> {
        desc.validate()?;

        if bytes.len() != desc.size_in_bytes() {
            return Err(Error::InvalidDimensions(format!(
                "bytes length {} does not match expected size {}",
                bytes.len(),
                desc.size_in_bytes()
            )));
        }

        Ok(Image { desc, bytes })
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.desc.width && y < self.desc.height);
        y * self.desc.row_bytes() + x * self.desc.channel_count.byte_count()
    }

    /// Channel values of the pixel at `(x, y)`.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> &[u8] {
        let offset = self.offset(x, y);
        &self.bytes[offset..offset + self.desc.channel_count.byte_count()]
    }

    #[inline]
    pub fn pixel_mut(&mut self, x: usize, y: usize) -> &mut [u8] {
        let offset = self.offset(x, y);
        let size = self.desc.channel_count.byte_count();
        &mut self.bytes[offset..offset + size]
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, color: Color) {
        let channel_count = self.desc.channel_count;
        color.write_to(self.pixel_mut(x, y), channel_count);
    }

    /// Returns whether `(x, y)` lies inside the image. Accepts negative coordinates.
    #[inline]
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.desc.width && (y as usize) < self.desc.height
    }

    pub fn read_file<P: AsRef<Path>>(filename: P) -> Result<Image> {
        let extension = filename
            .as_ref()
            .extension()
            .and_then(|os_str| os_str.to_str())
            .ok_or_else(|| Error::InvalidExtension("missing extension".to_string()))?
            .to_ascii_lowercase();

        if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(Error::InvalidExtension(extension));
        }

        io::load(filename)
    }

    pub fn save_file<P: AsRef<Path>>(&self, filename: P) -> Result<()> {
        let extension = filename
            .as_ref()
            .extension()
            .and_then(|os_str| os_str.to_str())
            .ok_or_else(|| Error::InvalidExtension("missing extension".to_string()))?
            .to_ascii_lowercase();

        match extension.as_str() {
            "png" => io::save_png(self, filename)?,
            "jpeg" | "jpg" => io::save_jpg(self, filename)?,

            _ => return Err(Error::InvalidExtension(extension)),
        };

        Ok(())
    }

    /// Converts to another channel layout.
    ///
    /// Color to gray uses rounded ITU-R 601-2 luma, gray to color replicates
    /// the gray value, and a missing alpha channel becomes fully opaque.
    pub fn convert(&self, channel_count: ChannelCount) -> Image {
        if self.desc.channel_count == channel_count {
            return self.clone();
        }

        let from = self.desc.channel_count;
        let desc = ImageDesc::new(self.desc.width, self.desc.height, channel_count);
        let mut bytes = vec![0u8; desc.size_in_bytes()];

        for (src, dst) in self
            .bytes
            .chunks_exact(from.byte_count())
            .zip(bytes.chunks_exact_mut(channel_count.byte_count()))
        {
            let (r, g, b) = match from {
                ChannelCount::L | ChannelCount::LA => (src[0], src[0], src[0]),
                ChannelCount::Rgb | ChannelCount::Rgba => (src[0], src[1], src[2]),
            };
            let a = match from {
                ChannelCount::LA => src[1],
                ChannelCount::Rgba => src[3],
                _ => u8::MAX,
            };
            let gray = match from {
                ChannelCount::L | ChannelCount::LA => src[0],
                ChannelCount::Rgb | ChannelCount::Rgba => luma(r, g, b),
            };

            match channel_count {
                ChannelCount::L => dst[0] = gray,
                ChannelCount::LA => dst.copy_from_slice(&[gray, a]),
                ChannelCount::Rgb => dst.copy_from_slice(&[r, g, b]),
                ChannelCount::Rgba => dst.copy_from_slice(&[r, g, b, a]),
            }
        }

        Image { desc, bytes }
    }

    /// Copies the `width`×`height` rectangle whose top-left corner is `(x, y)`.
    pub fn crop(&self, x: usize, y: usize, width: usize, height: usize) -> Result<Image> {
        if x + width > self.desc.width || y + height > self.desc.height {
            return Err(Error::InvalidDimensions(format!(
                "crop {}x{} at ({}, {}) exceeds {}x{}",
                width, height, x, y, self.desc.width, self.desc.height
            )));
        }

        let desc = ImageDesc::new(width, height, self.desc.channel_count);
        desc.validate()?;

        let pixel_size = self.desc.channel_count.byte_count();
        let mut bytes = Vec::with_capacity(desc.size_in_bytes());
        for row in y..y + height {
            let start = self.offset(x, row);
            bytes.extend_from_slice(&self.bytes[start..start + width * pixel_size]);
        }

        Ok(Image { desc, bytes })
    }
}
