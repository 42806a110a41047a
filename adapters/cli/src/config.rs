use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use froggies_core::EngineConfig;
use serde::Deserialize;

const SUPPORTED_CONFIG_VERSION: u32 = 1;

#[derive(Debug, Deserialize)]
struct ConfigFile {
    version: u32,
    #[serde(default)]
    engine: EngineConfig,
}

/// Loads engine tuning from the TOML file at `path`, or the defaults when absent.
pub(crate) fn load(path: Option<&Path>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    parse(&contents).with_context(|| format!("invalid config file at {}", path.display()))
}

fn parse(contents: &str) -> Result<EngineConfig> {
    let file: ConfigFile = toml::from_str(contents).context("failed to parse config toml")?;
    if file.version != SUPPORTED_CONFIG_VERSION {
        bail!(
            "unsupported config version {}; expected {}",
            file.version,
            SUPPORTED_CONFIG_VERSION
        );
    }
    file.engine
        .validate()
        .context("engine settings describe an unplayable board")?;
    Ok(file.engine)
}
