//! `yarspg.toml` discovery and defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use yarspg_codec::DecodeOptions;

pub const CONFIG_FILE: &str = "yarspg.toml";

/// Optional project configuration. Command-line flags override every value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct YarspgConfig {
    /// Defaults for `yarspg serialize`.
    pub serialize: SerializeConfig,
    /// Defaults for `yarspg parse`.
    pub parse: ParseConfig,
}

/// `[serialize]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SerializeConfig {
    /// Compression method for the extra compressed copy.
    pub compression: Option<String>,
    /// Compression level.
    pub level: Option<u32>,
    /// RDF format of the input file.
    pub input_format: Option<String>,
}

/// `[parse]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ParseConfig {
    /// Compression method of the input files.
    pub compression: Option<String>,
    /// RDF format of the output file.
    pub format: Option<String>,
    #[serde(flatten)]
    pub decode: DecodeOptions,
}

impl YarspgConfig {
    /// The configuration in effect for `dir`: the nearest `yarspg.toml` in
    /// `dir` or one of its ancestors, else defaults.
    pub fn discover(dir: &Path) -> Result<Self> {
        let Some(path) = dir
            .ancestors()
            .map(|d| d.join(CONFIG_FILE))
            .find(|p| p.is_file())
        else {
            return Ok(Self::default());
        };
        let config = Self::load(&path)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("in {}", path.display()))
    }

    fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("parsing yarspg.toml")
    }
}
