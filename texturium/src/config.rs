//! Run configuration, loaded from YAML or JSON.

use std::path::{Path, PathBuf};

use common::FileFormat;
use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::filter::KernelGain;

/// Annulus inside which sprites are placed, in base-image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingGeometry {
    pub center: IVec2,
    pub inner_radius: i32,
    pub outer_radius: i32,
}

impl Default for RingGeometry {
    fn default() -> Self {
        Self {
            center: IVec2::new(524, 1524),
            inner_radius: 270,
            outer_radius: 500,
        }
    }
}

impl RingGeometry {
    pub fn validate(&self) -> Result<()> {
        if self.inner_radius < 0 || self.outer_radius < 0 {
            return Err(Error::Configuration(format!(
                "Ring radii must be non-negative, got inner {} and outer {}",
                self.inner_radius, self.outer_radius
            )));
        }
        if self.inner_radius >= self.outer_radius {
            return Err(Error::Configuration(format!(
                "Ring inner radius must be below the outer radius, got {} >= {}",
                self.inner_radius, self.outer_radius
            )));
        }
        Ok(())
    }
}

/// Parameters of the gray → smooth → gradient → normal chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalMapSettings {
    /// Gaussian sigma; `0` disables smoothing.
    pub smoothness: f32,
    pub intensity: f32,
    pub kernel_gain: KernelGain,
}

impl Default for NormalMapSettings {
    fn default() -> Self {
        Self {
            smoothness: 1.5,
            intensity: 2.0,
            kernel_gain: KernelGain::Unnormalized,
        }
    }
}

impl NormalMapSettings {
    pub fn validate(&self) -> Result<()> {
        if !self.smoothness.is_finite() || self.smoothness < 0.0 {
            return Err(Error::Configuration(format!(
                "smoothness must be finite and non-negative, got {}",
                self.smoothness
            )));
        }
        if !self.intensity.is_finite() || self.intensity == 0.0 {
            return Err(Error::Configuration(format!(
                "intensity must be finite and non-zero, got {}",
                self.intensity
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementSettings {
    /// Sample points drawn per image; never retried.
    pub max_attempts: usize,
    /// Inset of the sampling square from the outer radius.
    pub margin: i32,
}

impl Default for PlacementSettings {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            margin: 10,
        }
    }
}

/// Everything a batch run needs. Immutable once validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub base_image: PathBuf,
    pub defect_dir: PathBuf,
    pub basecolor_dir: PathBuf,
    pub normal_dir: PathBuf,
    pub labels_dir: PathBuf,
    pub ring: RingGeometry,
    /// Number of output indices, written as `1..=batch_count`.
    pub batch_count: usize,
    pub smoothness: f32,
    pub intensity: f32,
    pub kernel_gain: KernelGain,
    pub max_placement_attempts: usize,
    pub placement_margin: i32,
    /// `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        let normal_map = NormalMapSettings::default();
        let placement = PlacementSettings::default();
        Self {
            base_image: PathBuf::from("texture/raw/raw_basecolor.png"),
            defect_dir: PathBuf::from("texture/defects/ps"),
            basecolor_dir: PathBuf::from("texture/texture_maps"),
            normal_dir: PathBuf::from("texture/texture_maps/normal"),
            labels_dir: PathBuf::from("texture/labels"),
            ring: RingGeometry::default(),
            batch_count: 5000,
            smoothness: normal_map.smoothness,
            intensity: normal_map.intensity,
            kernel_gain: normal_map.kernel_gain,
            max_placement_attempts: placement.max_attempts,
            placement_margin: placement.margin,
            seed: None,
        }
    }
}

impl PipelineConfig {
    /// Reads a config file; the format follows the extension (`yaml`, `yml`, `json`).
    /// Missing fields take their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let format = FileFormat::from_file_name(path)?;
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Ok(common::deserialize(&text, format)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let format = FileFormat::from_file_name(path)?;
        let text = common::serialize(self, format)?;
        std::fs::write(path, text).map_err(|e| Error::io(path, e))
    }

    pub fn normal_map(&self) -> NormalMapSettings {
        NormalMapSettings {
            smoothness: self.smoothness,
            intensity: self.intensity,
            kernel_gain: self.kernel_gain,
        }
    }

    pub fn placement(&self) -> PlacementSettings {
        PlacementSettings {
            max_attempts: self.max_placement_attempts,
            margin: self.placement_margin,
        }
    }

    /// Parameter checks only; see [`PipelineConfig::check_inputs`] for the filesystem.
    pub fn validate(&self) -> Result<()> {
        self.ring.validate()?;
        self.normal_map().validate()?;

        if self.max_placement_attempts == 0 {
            return Err(Error::Configuration(
                "max_placement_attempts must be positive, got 0".to_string(),
            ));
        }
        if self.placement_margin < 0 {
            return Err(Error::Configuration(format!(
                "placement_margin must be non-negative, got {}",
                self.placement_margin
            )));
        }
        Ok(())
    }

    /// Verifies the base image and the sprite directory exist.
    pub fn check_inputs(&self) -> Result<()> {
        if !self.base_image.is_file() {
            return Err(Error::Configuration(format!(
                "Base image not found: {}",
                self.base_image.display()
            )));
        }
        if !self.defect_dir.is_dir() {
            return Err(Error::Configuration(format!(
                "Defect directory not found: {}",
                self.defect_dir.display()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::test_utils::test_output_path;

    #[test]
    fn defaults_are_valid() {
        let config = PipelineConfig::default();
        config.validate().unwrap();
        assert_eq!(config.ring.center, IVec2::new(524, 1524));
        assert_eq!(config.placement(), PlacementSettings::default());
        assert_eq!(config.normal_map(), NormalMapSettings::default());
    }

    #[test]
    fn validate_rejects_bad_parameters() {
        let cases: Vec<Box<dyn Fn(&mut PipelineConfig)>> = vec![
            Box::new(|c: &mut PipelineConfig| c.smoothness = -0.5),
            Box::new(|c: &mut PipelineConfig| c.smoothness = f32::NAN),
            Box::new(|c: &mut PipelineConfig| c.intensity = 0.0),
            Box::new(|c: &mut PipelineConfig| c.intensity = f32::INFINITY),
            Box::new(|c: &mut PipelineConfig| c.ring.inner_radius = 500),
            Box::new(|c: &mut PipelineConfig| c.ring.inner_radius = -1),
            Box::new(|c: &mut PipelineConfig| c.max_placement_attempts = 0),
            Box::new(|c: &mut PipelineConfig| c.placement_margin = -3),
        ];

        for (i, mutate) in cases.iter().enumerate() {
            let mut config = PipelineConfig::default();
            mutate(&mut config);
            assert!(
                matches!(config.validate(), Err(Error::Configuration(_))),
                "case {i} should be rejected"
            );
        }
    }

    #[test]
    fn zero_smoothness_is_allowed() {
        let config = PipelineConfig {
            smoothness: 0.0,
            ..Default::default()
        };
        config.validate().unwrap();
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let path = test_output_path("texturium_partial_config.yaml");
        std::fs::write(
            &path,
            "batch_count: 7\nseed: 42\nkernel_gain: unit_sum\nring:\n  center: [100, 200]\n  inner_radius: 10\n  outer_radius: 60\n",
        )
        .unwrap();

        let config = PipelineConfig::load(&path).unwrap();
        assert_eq!(config.batch_count, 7);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.kernel_gain, KernelGain::UnitSum);
        assert_eq!(config.ring.center, IVec2::new(100, 200));
        assert_eq!(config.intensity, 2.0);
        assert_eq!(config.labels_dir, PathBuf::from("texture/labels"));
    }

    #[test]
    fn partial_ring_keeps_default_radii() {
        let path = test_output_path("texturium_partial_ring.yaml");
        std::fs::write(&path, "ring:\n  center: [300, 400]\n").unwrap();

        let config = PipelineConfig::load(&path).unwrap();
        assert_eq!(
            config.ring,
            RingGeometry {
                center: IVec2::new(300, 400),
                ..Default::default()
            }
        );
        config.validate().unwrap();
    }

    #[test]
    fn json_round_trip() {
        let path = test_output_path("texturium_config_round_trip.json");
        let config = PipelineConfig {
            batch_count: 3,
            seed: Some(9),
            ..Default::default()
        };
        config.save(&path).unwrap();
        assert_eq!(PipelineConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        assert!(matches!(
            PipelineConfig::load("settings.toml"),
            Err(Error::FileExtension(_))
        ));
    }

    #[test]
    fn check_inputs_reports_missing_base_image() {
        let config = PipelineConfig {
            base_image: PathBuf::from("/nonexistent/base.png"),
            ..Default::default()
        };
        assert!(matches!(config.check_inputs(), Err(Error::Configuration(_))));
    }
}
