use std::path::{Path, PathBuf};

use common::file_utils::{files_with_extensions, walk_files_with_extensions, RASTER_EXTENSIONS};
use imaginarium::{ChannelCount, Image};
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Enumerates raster assets in a stable, sorted order.
pub trait AssetSource {
    fn assets(&self) -> Result<Vec<PathBuf>>;
}

/// Raster files under a directory, filtered by extension (case-insensitive).
#[derive(Debug, Clone)]
pub struct DirectoryAssets {
    root: PathBuf,
    recursive: bool,
    extensions: Vec<String>,
}

impl DirectoryAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            recursive: false,
            extensions: RASTER_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn with_extensions(mut self, extensions: &[&str]) -> Self {
        self.extensions = extensions.iter().map(|e| e.to_ascii_lowercase()).collect();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetSource for DirectoryAssets {
    fn assets(&self) -> Result<Vec<PathBuf>> {
        if !self.root.is_dir() {
            return Err(Error::Configuration(format!(
                "Asset directory not found: {}",
                self.root.display()
            )));
        }

        let extensions: Vec<&str> = self.extensions.iter().map(String::as_str).collect();
        let files = if self.recursive {
            walk_files_with_extensions(&self.root, &extensions)
        } else {
            files_with_extensions(&self.root, &extensions)
        };
        files.map_err(|e| Error::io(&self.root, e))
    }
}

/// Decoded defect sprites, shared read-only by every output index.
#[derive(Debug, Clone)]
pub struct SpritePool {
    sprites: Vec<Image>,
}

impl SpritePool {
    /// Sprites without alpha are promoted to opaque RGBA. An empty list is an error.
    pub fn from_sprites(sprites: Vec<Image>) -> Result<Self> {
        if sprites.is_empty() {
            return Err(Error::Configuration("Sprite pool is empty".to_string()));
        }

        let sprites = sprites
            .into_iter()
            .map(|sprite| {
                if sprite.channel_count().has_alpha() {
                    sprite
                } else {
                    sprite.convert(ChannelCount::Rgba)
                }
            })
            .collect();

        Ok(Self { sprites })
    }

    pub fn load(source: &dyn AssetSource) -> Result<Self> {
        let paths = source.assets()?;
        let mut sprites = Vec::with_capacity(paths.len());
        for path in &paths {
            let sprite = Image::read_file(path).map_err(|e| Error::image(path, e))?;
            debug!(
                path = %path.display(),
                width = sprite.width(),
                height = sprite.height(),
                "Sprite loaded"
            );
            sprites.push(sprite);
        }

        let pool = Self::from_sprites(sprites)?;
        info!(count = pool.len(), "Sprite pool ready");
        Ok(pool)
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    pub fn get(&self, index: usize) -> &Image {
        &self.sprites[index]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Image> {
        self.sprites.iter()
    }
}
