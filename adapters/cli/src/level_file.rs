use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use wormhole_snake_core::{LevelData, LEVEL_FORMAT_VERSION};

/// Reads and parses the level stored at the provided path.
pub(crate) fn load_level(path: &Path) -> Result<LevelData> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read level file at {}", path.display()))?;
    let mut level = parse_level(&contents)
        .with_context(|| format!("failed to parse level file at {}", path.display()))?;
    if level.name.is_empty() {
        level.name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
    }
    Ok(level)
}

/// Parses a level from TOML. Layer rows are listed bottom row first.
pub(crate) fn parse_level(contents: &str) -> Result<LevelData> {
    let level: LevelData =
        toml::from_str(contents).context("failed to parse level toml contents")?;
    if level.version != LEVEL_FORMAT_VERSION {
        bail!(
            "unsupported level format version {}; expected {}",
            level.version,
            LEVEL_FORMAT_VERSION
        );
    }
    Ok(level)
}
