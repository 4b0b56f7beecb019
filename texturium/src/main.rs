use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use common::log_setup::LogSettings;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use texturium::sprites::{self, DEFAULT_SIZE_RANGE};
use texturium::{DirectoryAssets, DirectoryConverter, PipelineConfig, PipelineDriver};
use tracing::info;

const USAGE: &str = "\
usage:
  texturium run [config.yaml|config.json]
  texturium convert <input_dir> <output_dir> [config]
  texturium sprites <output_dir> <count> [seed]";

fn main() -> Result<()> {
    common::log_setup::setup_logging(&LogSettings::new("texturium"))?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    match args.as_slice() {
        ["run"] => run(PipelineConfig::default()),
        ["run", config] => run(load_config(config)?),
        ["convert", input, output] => convert(input, output, PipelineConfig::default()),
        ["convert", input, output, config] => convert(input, output, load_config(config)?),
        ["sprites", output, count] => generate_sprites(output, count, None),
        ["sprites", output, count, seed] => generate_sprites(output, count, Some(*seed)),
        _ => bail!("{USAGE}"),
    }
}

fn load_config(path: &str) -> Result<PipelineConfig> {
    PipelineConfig::load(path).with_context(|| format!("Failed to load config '{path}'"))
}

fn run(config: PipelineConfig) -> Result<()> {
    let driver = PipelineDriver::new(config).context("Invalid configuration")?;
    let summary = driver.run().context("Batch failed")?;
    info!(
        images = summary.images,
        sprites = summary.sprites_placed,
        shortfalls = summary.shortfalls,
        "Done"
    );
    Ok(())
}

fn convert(input: &str, output: &str, config: PipelineConfig) -> Result<()> {
    let source = DirectoryAssets::new(input).recursive(true);
    let mut converter = DirectoryConverter::new(config.normal_map())?;
    let summary = converter
        .convert_directory(&source, Path::new(output))
        .with_context(|| format!("Failed to convert '{input}'"))?;
    info!(
        converted = summary.converted,
        skipped = summary.skipped,
        "Done"
    );
    Ok(())
}

fn generate_sprites(output: &str, count: &str, seed: Option<&str>) -> Result<()> {
    let count: usize = count
        .parse()
        .with_context(|| format!("Invalid sprite count '{count}'"))?;
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(
            seed.parse()
                .with_context(|| format!("Invalid seed '{seed}'"))?,
        ),
        None => StdRng::from_os_rng(),
    };

    let size = rng.random_range(DEFAULT_SIZE_RANGE);
    let written = sprites::generate_pool(&PathBuf::from(output), count, size, &mut rng)?;
    info!(count = written.len(), size, "Done");
    Ok(())
}
