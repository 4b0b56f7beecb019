use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::asset_source::AssetSource;
use crate::config::NormalMapSettings;
use crate::error::{Error, Result};
use crate::normal_map::convert_file;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionSummary {
    pub converted: usize,
    pub skipped: usize,
}

/// Writes `<output_dir>/<stem>_normal.png` for every asset of a source.
///
/// A target produced earlier by this converter, or already on disk, is skipped.
#[derive(Debug)]
pub struct DirectoryConverter {
    settings: NormalMapSettings,
    produced: HashSet<PathBuf>,
}

impl DirectoryConverter {
    pub fn new(settings: NormalMapSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            produced: HashSet::new(),
        })
    }

    pub fn output_path(output_dir: &Path, input: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .unwrap_or(input.as_os_str())
            .to_string_lossy();
        output_dir.join(format!("{stem}_normal.png"))
    }

    /// Assets are listed before the first write, so outputs landing inside
    /// the source tree are not picked up by the same call.
    pub fn convert_directory(
        &mut self,
        source: &dyn AssetSource,
        output_dir: &Path,
    ) -> Result<ConversionSummary> {
        let assets = source.assets()?;
        std::fs::create_dir_all(output_dir).map_err(|e| Error::io(output_dir, e))?;

        let mut summary = ConversionSummary::default();
        for input in &assets {
            let target = Self::output_path(output_dir, input);
            if self.produced.contains(&target) || target.exists() {
                debug!(
                    input = %input.display(),
                    target = %target.display(),
                    "Skipping conversion"
                );
                summary.skipped += 1;
                continue;
            }

            convert_file(input, &target, &self.settings)?;
            info!(input = %input.display(), target = %target.display(), "Normal map saved");
            self.produced.insert(target);
            summary.converted += 1;
        }

        Ok(summary)
    }
}
