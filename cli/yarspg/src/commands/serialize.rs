//! `yarspg serialize`: RDF to YARS-PG.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use yarspg_core::Graph;
use yarspg_io::{Compression, RdfFormat};

use crate::config::SerializeConfig;

/// Effective settings after merging flags over `yarspg.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SerializeSettings {
    pub compression: Option<Compression>,
    pub level: Option<u32>,
    pub input_format: RdfFormat,
}

impl SerializeSettings {
    pub fn resolve(
        compression: Option<&str>,
        level: Option<u32>,
        input_format: Option<&str>,
        config: &SerializeConfig,
    ) -> Result<Self> {
        let compression = compression
            .or(config.compression.as_deref())
            .map(str::parse::<Compression>)
            .transpose()?;
        let input_format = input_format
            .or(config.input_format.as_deref())
            .map(str::parse::<RdfFormat>)
            .transpose()?
            .unwrap_or_default();
        Ok(Self {
            compression,
            level: level.or(config.level),
            input_format,
        })
    }
}

/// Serialize an RDF file into one YARS-PG document.
pub fn wholefile(input: &Path, output: &Path, settings: &SerializeSettings) -> Result<Vec<PathBuf>> {
    let graph = load_graph(input, settings.input_format)?;
    let document = yarspg_codec::serialize(&graph).document();

    let mut written = Vec::new();
    write_file(output, document.as_bytes(), "Serialized file", settings, &mut written)?;
    Ok(written)
}

/// Serialize an RDF file into separate nodes and edges files.
///
/// The files hold bare records without section headers; `yarspg parse
/// sections` adds them back.
pub fn sections(
    input: &Path,
    output_nodes: &Path,
    output_edges: &Path,
    settings: &SerializeSettings,
) -> Result<Vec<PathBuf>> {
    let graph = load_graph(input, settings.input_format)?;
    let document = yarspg_codec::serialize(&graph).document();
    let parts = yarspg_codec::split(&document);

    let mut written = Vec::new();
    write_file(
        output_nodes,
        parts.nodes_text().as_bytes(),
        "Serialized nodes file",
        settings,
        &mut written,
    )?;
    write_file(
        output_edges,
        parts.edges_text().as_bytes(),
        "Serialized edges file",
        settings,
        &mut written,
    )?;
    Ok(written)
}

fn load_graph(input: &Path, format: RdfFormat) -> Result<Graph> {
    let text = fs::read_to_string(input)
        .with_context(|| format!("reading {}", input.display()))?;
    yarspg_io::read_graph(&text, format)
        .with_context(|| format!("parsing {} as {format}", input.display()))
}

/// Write `data` to `path`, plus a compressed copy when compression is set.
fn write_file(
    path: &Path,
    data: &[u8],
    what: &str,
    settings: &SerializeSettings,
    written: &mut Vec<PathBuf>,
) -> Result<()> {
    fs::write(path, data).with_context(|| format!("writing {}", path.display()))?;
    println!("{what} created: {}", path.display());
    written.push(path.to_path_buf());

    if let Some(method) = settings.compression {
        let compressed_path = compressed_path(path, method);
        let packed = yarspg_io::compress(data, method, settings.level)
            .with_context(|| format!("compressing {}", path.display()))?;
        fs::write(&compressed_path, packed)
            .with_context(|| format!("writing {}", compressed_path.display()))?;
        println!("Compressed file created: {}", compressed_path.display());
        written.push(compressed_path);
    }
    Ok(())
}

/// `out.yarspg` becomes `out.yarspg.gzip`.
pub fn compressed_path(path: &Path, method: Compression) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(method.extension());
    PathBuf::from(name)
}
