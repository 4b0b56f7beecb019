//! Stochastic placement of defect sprites inside a region mask.

mod rng;


pub use rng::PlacementRng;

use std::borrow::Cow;

use imaginarium::{paste_with_alpha, Image};
use tracing::{debug, trace};

use crate::asset_source::SpritePool;
use crate::config::{PlacementSettings, RingGeometry};
use crate::error::{Error, Result};
use crate::labels::{BoundingBox, LabelSet};
use crate::region_mask::RegionMask;

/// Number of sprites wanted for one image, from a uniform draw `r` in `[0, 1)`:
/// 3 with probability 0.1, 2 with probability 0.2, 1 otherwise.
pub fn target_count(r: f64) -> usize {
    if r < 0.1 {
        3
    } else if r < 0.3 {
        2
    } else {
        1
    }
}

/// Outcome of [`TextureCompositor::place`] for one image.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub target: usize,
    pub labels: LabelSet,
}

impl Placement {
    pub fn placed(&self) -> usize {
        self.labels.len()
    }

    /// Sprites wanted but not placed because every attempt was spent.
    pub fn shortfall(&self) -> usize {
        self.target.saturating_sub(self.placed())
    }
}

#[derive(Debug, Clone, Default)]
pub struct TextureCompositor {
    settings: PlacementSettings,
}

impl TextureCompositor {
    pub fn new(settings: PlacementSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &PlacementSettings {
        &self.settings
    }

    /// Draws a target count, then spends exactly `max_attempts` sample points.
    ///
    /// Each attempt samples `x` then `y` uniformly in
    /// `[c - outer + margin, c + outer - margin]`. A point is accepted while
    /// fewer than target sprites are placed and the mask covers it; the sprite
    /// is then chosen uniformly from `pool`. When the sampling range is empty
    /// no attempt is made.
    pub fn place<R: PlacementRng + ?Sized>(
        &self,
        background: &mut Image,
        mask: &RegionMask,
        pool: &SpritePool,
        ring: &RingGeometry,
        rng: &mut R,
    ) -> Result<Placement> {
        let target = target_count(rng.unit());
        let mut labels = LabelSet::new();

        let reach = ring.outer_radius as i64 - self.settings.margin as i64;
        let (cx, cy) = (ring.center.x as i64, ring.center.y as i64);
        let (x_low, x_high) = (cx - reach, cx + reach);
        let (y_low, y_high) = (cy - reach, cy + reach);

        if x_low > x_high || y_low > y_high {
            trace!(reach, "Sampling square is empty, no placement attempted");
            return Ok(Placement { target, labels });
        }

        for attempt in 0..self.settings.max_attempts {
            let x = rng.coordinate(x_low, x_high);
            let y = rng.coordinate(y_low, y_high);

            if labels.len() >= target || !mask.is_inside(x, y) {
                trace!(attempt, x, y, "Sample rejected");
                continue;
            }

            let index = rng.choose(pool.len());
            let bbox = insert(background, pool.get(index), x, y)?;
            debug!(attempt, x, y, sprite = index, %bbox, "Sprite placed");
            labels.push(bbox);
        }

        let placement = Placement { target, labels };
        if placement.shortfall() > 0 {
            trace!(
                target,
                placed = placement.placed(),
                "Placement attempts exhausted"
            );
        }
        Ok(placement)
    }
}

/// Blends `sprite` centered at `(x, y)` and returns its normalized box.
///
/// The top-left corner is `(x - w/2, y - h/2)`. The sprite is cropped to the
/// right and bottom edges of `background`; a negative corner is kept as is,
/// so pixels left of or above the image are dropped while the box still
/// starts outside it.
pub fn insert(background: &mut Image, sprite: &Image, x: i64, y: i64) -> Result<BoundingBox> {
    let x0 = x - (sprite.width() / 2) as i64;
    let y0 = y - (sprite.height() / 2) as i64;

    let x_end = (x0 + sprite.width() as i64).min(background.width() as i64);
    let y_end = (y0 + sprite.height() as i64).min(background.height() as i64);
    let crop_width = x_end - x0;
    let crop_height = y_end - y0;

    if crop_width <= 0 || crop_height <= 0 {
        return Err(Error::Configuration(format!(
            "Sprite centered at ({x}, {y}) lies past the image edge"
        )));
    }

    let (crop_width, crop_height) = (crop_width as usize, crop_height as usize);
    let visible = if crop_width < sprite.width() || crop_height < sprite.height() {
        Cow::Owned(
            sprite
                .crop(0, 0, crop_width, crop_height)
                .map_err(Error::Composite)?,
        )
    } else {
        Cow::Borrowed(sprite)
    };

    paste_with_alpha(background, &visible, x0, y0).map_err(Error::Composite)?;

    Ok(BoundingBox::from_pixels(
        x0,
        y0,
        crop_width,
        crop_height,
        background.width(),
        background.height(),
    ))
}
