//! Normal maps derived from image gradients.

#[cfg(test)]
mod tests;

use std::path::Path;

use common::Buffer2;
use glam::Vec3;
use imaginarium::{ChannelCount, Image, ImageDesc};
use tracing::debug;

use crate::config::NormalMapSettings;
use crate::error::{Error, Result};
use crate::field::{luminance_field, GradientPair};
use crate::filter;

/// Per-pixel unit surface normals.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalMap {
    normals: Buffer2<Vec3>,
}

impl NormalMap {
    /// Normalizes `(gx / max, gy / max, 1 / intensity)` per pixel, where `max`
    /// is the largest signed value over both gradient components.
    ///
    /// A zero or non-finite `max` yields the flat normal `(0, 0, 1)` everywhere.
    ///
    /// # Panics
    /// If `intensity` is zero or not finite.
    pub fn build(gradients: &GradientPair, intensity: f32) -> Self {
        assert!(
            intensity.is_finite() && intensity != 0.0,
            "Intensity must be finite and non-zero"
        );

        let max = gradients.max_value().unwrap_or(0.0);
        if max == 0.0 || !max.is_finite() {
            debug!(max, "Gradient maximum unusable, emitting flat normal map");
            return Self::flat(gradients.width(), gradients.height());
        }

        let nz = 1.0 / intensity;
        let normals = Buffer2::from_fn(gradients.width(), gradients.height(), |x, y| {
            Vec3::new(gradients.x[(x, y)] / max, gradients.y[(x, y)] / max, nz).normalize()
        });

        Self { normals }
    }

    pub fn flat(width: usize, height: usize) -> Self {
        Self {
            normals: Buffer2::new_filled(width, height, Vec3::Z),
        }
    }

    pub fn width(&self) -> usize {
        self.normals.width()
    }

    pub fn height(&self) -> usize {
        self.normals.height()
    }

    pub fn normals(&self) -> &Buffer2<Vec3> {
        &self.normals
    }

    /// Encodes each component as `trunc((n * 0.5 + 0.5) * 255)` into an RGB image.
    pub fn to_image(&self) -> Result<Image> {
        let desc = ImageDesc::new(self.width(), self.height(), ChannelCount::Rgb);
        let bytes = self
            .normals
            .iter()
            .flat_map(|n| n.to_array())
            .map(encode_component)
            .collect();

        Image::new_with_data(desc, bytes).map_err(Error::Composite)
    }
}

#[inline]
fn encode_component(value: f32) -> u8 {
    ((value * 0.5 + 0.5) * 255.0) as u8
}

/// Gray conversion, Gaussian smoothing, Sobel gradients and normal construction.
pub fn derive_normal_map(image: &Image, settings: &NormalMapSettings) -> NormalMap {
    let field = luminance_field(image);
    let smoothed = filter::smooth_with_gain(&field, settings.smoothness, settings.kernel_gain);
    let gradients = filter::gradients(&smoothed);
    NormalMap::build(&gradients, settings.intensity)
}

/// Reads `input`, derives its normal map and writes it to `output`.
pub fn convert_file(input: &Path, output: &Path, settings: &NormalMapSettings) -> Result<()> {
    let image = Image::read_file(input).map_err(|e| Error::image(input, e))?;
    let normal_map = derive_normal_map(&image, settings);
    normal_map
        .to_image()?
        .save_file(output)
        .map_err(|e| Error::image(output, e))?;

    debug!(input = %input.display(), output = %output.display(), "Normal map written");
    Ok(())
}
