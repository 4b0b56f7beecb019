//! Texturium - synthetic defect dataset generation.
//!
//! Composites defect sprites (scratches and dents) onto a base texture inside
//! an annular region, writes one bounding-box label per placed sprite, and
//! derives a normal map from every composited image.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use texturium::{PipelineConfig, PipelineDriver};
//!
//! let config = PipelineConfig::load("texturium.yaml")?;
//! let summary = PipelineDriver::new(config)?.run()?;
//! println!("{} images, {} sprites", summary.images, summary.sprites_placed);
//! ```

mod asset_source;
mod compositor;
mod config;
mod convert;
mod error;
mod field;
pub mod filter;
mod labels;
mod normal_map;
mod pipeline;
mod region_mask;
pub mod sprites;

pub use asset_source::{AssetSource, DirectoryAssets, SpritePool};
pub use compositor::{insert, target_count, Placement, PlacementRng, TextureCompositor};
pub use config::{NormalMapSettings, PipelineConfig, PlacementSettings, RingGeometry};
pub use convert::{ConversionSummary, DirectoryConverter};
pub use error::{Error, Result};
pub use field::{luminance_field, GradientPair, ScalarField};
pub use filter::KernelGain;
pub use labels::{BoundingBox, LabelSet, LabelWriter};
pub use normal_map::{convert_file, derive_normal_map, NormalMap};
pub use pipeline::{BatchSummary, PipelineDriver};
pub use region_mask::RegionMask;
