//! Procedural defect sprites: dark dents and translucent scratches.

use std::path::{Path, PathBuf};

use glam::Vec2;
use imaginarium::drawing::{draw_line, fill_circle};
use imaginarium::{ChannelCount, Color, Image, ImageDesc};
use rand::Rng;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Smallest canvas that fits a dent of radius 1.
pub const MIN_SPRITE_SIZE: usize = 10;

/// Side length range used when no size is given.
pub const DEFAULT_SIZE_RANGE: std::ops::RangeInclusive<usize> = 100..=200;

const MAX_DENT_RADIUS: usize = 12;
const SHADE_MAX: u8 = 100;
const SCRATCH_ALPHA: u8 = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefectKind {
    Dent,
    Scratch,
}

/// Transparent `size`×`size` RGBA canvas with one dent or one scratch.
pub fn generate_sprite<R: Rng>(size: usize, rng: &mut R) -> Result<(Image, DefectKind)> {
    if size < MIN_SPRITE_SIZE {
        return Err(Error::Configuration(format!(
            "Sprite size must be at least {MIN_SPRITE_SIZE}, got {size}"
        )));
    }

    let desc = ImageDesc::new(size, size, ChannelCount::Rgba);
    let mut sprite = Image::new_filled(desc, Color::TRANSPARENT).map_err(Error::Composite)?;

    let kind = if rng.random::<bool>() {
        DefectKind::Dent
    } else {
        DefectKind::Scratch
    };

    match kind {
        DefectKind::Dent => {
            let center = Vec2::new(
                rng.random_range(size / 4..=size * 3 / 4) as f32,
                rng.random_range(size / 4..=size * 3 / 4) as f32,
            );
            let radius = rng.random_range(1..=(size / 10).min(MAX_DENT_RADIUS));
            let shade = rng.random_range(0..=SHADE_MAX);
            fill_circle(&mut sprite, center, radius as f32, Color::gray(shade));
        }
        DefectKind::Scratch => {
            let mut point = || {
                Vec2::new(
                    rng.random_range(0..size) as f32,
                    rng.random_range(0..size) as f32,
                )
            };
            let start = point();
            let end = point();
            let shade = rng.random_range(0..=SHADE_MAX);
            let width = rng.random_range(1..=5u32);
            let color = Color::gray(shade).with_alpha(SCRATCH_ALPHA);
            draw_line(&mut sprite, start, end, color, width as f32);
        }
    }

    Ok((sprite, kind))
}

/// Writes `defect_1.png ..= defect_{count}.png` into `dir`, all of side `size`.
pub fn generate_pool<R: Rng>(
    dir: &Path,
    count: usize,
    size: usize,
    rng: &mut R,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;

    let mut written = Vec::with_capacity(count);
    for k in 1..=count {
        let (sprite, kind) = generate_sprite(size, rng)?;
        let path = dir.join(format!("defect_{k}.png"));
        sprite
            .save_file(&path)
            .map_err(|e| Error::image(&path, e))?;
        debug!(path = %path.display(), ?kind, "Sprite written");
        written.push(path);
    }

    info!(count, size, dir = %dir.display(), "Sprite pool generated");
    Ok(written)
}
