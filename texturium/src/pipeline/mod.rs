//! Batch driver: composite, label and normal-map every output index.


use std::path::{Path, PathBuf};

use imaginarium::Image;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::asset_source::{DirectoryAssets, SpritePool};
use crate::compositor::{PlacementRng, TextureCompositor};
use crate::config::PipelineConfig;
use crate::error::{Error, Result};
use crate::labels::LabelWriter;
use crate::normal_map::derive_normal_map;
use crate::region_mask::RegionMask;

/// Totals of one batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub images: usize,
    pub sprites_placed: usize,
    /// Indices that received fewer sprites than their target.
    pub shortfalls: usize,
}

/// Inputs decoded once and shared by every index.
struct BatchResources {
    base: Image,
    mask: RegionMask,
    pool: SpritePool,
}

#[derive(Debug)]
pub struct PipelineDriver {
    config: PipelineConfig,
}

impl PipelineDriver {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn basecolor_path(&self, index: usize) -> PathBuf {
        self.config
            .basecolor_dir
            .join(format!("basecolor_{index}.png"))
    }

    pub fn normal_path(&self, index: usize) -> PathBuf {
        self.config
            .normal_dir
            .join(format!("basecolor_{index}_normal.png"))
    }

    /// Seeded from `config.seed`, or from OS entropy when unset.
    pub fn run(&self) -> Result<BatchSummary> {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        self.run_with_rng(&mut rng)
    }

    /// Processes indices `1..=batch_count`. Inputs are checked and decoded
    /// before the first output is written; an I/O failure stops the batch
    /// and keeps what was already written.
    pub fn run_with_rng<R: PlacementRng + ?Sized>(&self, rng: &mut R) -> Result<BatchSummary> {
        let resources = self.prepare()?;
        self.create_output_dirs()?;

        let compositor = TextureCompositor::new(self.config.placement());
        let labels = LabelWriter::new(&self.config.labels_dir);

        info!(
            batch_count = self.config.batch_count,
            sprites = resources.pool.len(),
            "Batch started"
        );

        let mut summary = BatchSummary::default();
        for index in 1..=self.config.batch_count {
            let mut background = resources.base.clone();
            let placement = compositor.place(
                &mut background,
                &resources.mask,
                &resources.pool,
                &self.config.ring,
                &mut *rng,
            )?;

            labels.append(index, &placement.labels)?;

            let basecolor = self.basecolor_path(index);
            background
                .save_file(&basecolor)
                .map_err(|e| Error::image(&basecolor, e))?;

            let normal = self.normal_path(index);
            derive_normal_map(&background, &self.config.normal_map())
                .to_image()?
                .save_file(&normal)
                .map_err(|e| Error::image(&normal, e))?;

            info!(
                index,
                placed = placement.placed(),
                target = placement.target,
                path = %basecolor.display(),
                "Image saved"
            );

            summary.images += 1;
            summary.sprites_placed += placement.placed();
            if placement.shortfall() > 0 {
                summary.shortfalls += 1;
            }
        }

        info!(
            images = summary.images,
            sprites_placed = summary.sprites_placed,
            shortfalls = summary.shortfalls,
            "Batch finished"
        );
        Ok(summary)
    }

    fn prepare(&self) -> Result<BatchResources> {
        self.config.check_inputs()?;

        let path = &self.config.base_image;
        let base = Image::read_file(path).map_err(|e| Error::image(path, e))?;
        let pool = SpritePool::load(&DirectoryAssets::new(&self.config.defect_dir))?;
        let mask = RegionMask::from_geometry(base.width(), base.height(), &self.config.ring)?;

        if mask.area() == 0 {
            warn!(
                ring = ?self.config.ring,
                "Placement ring misses the base image, no sprites will be placed"
            );
        }
        debug!(
            width = base.width(),
            height = base.height(),
            mask_area = mask.area(),
            "Base image decoded"
        );

        Ok(BatchResources { base, mask, pool })
    }

    fn create_output_dirs(&self) -> Result<()> {
        for dir in [
            &self.config.basecolor_dir,
            &self.config.normal_dir,
            &self.config.labels_dir,
        ] {
            create_dir(dir)?;
        }
        Ok(())
    }
}

fn create_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))
}
