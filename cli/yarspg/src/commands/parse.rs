//! `yarspg parse`: YARS-PG to RDF.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use yarspg_codec::{DecodeOptions, IriEncoding};
use yarspg_io::{Compression, RdfFormat};

use crate::config::ParseConfig;

/// Effective settings after merging flags over `yarspg.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseSettings {
    pub compression: Option<Compression>,
    pub format: RdfFormat,
    pub decode: DecodeOptions,
}

impl ParseSettings {
    /// Boolean flags can only switch an option on.
    pub fn resolve(
        compression: Option<&str>,
        format: Option<&str>,
        strict_edges: bool,
        preserve_blank_nodes: bool,
        iri_encoding: Option<&str>,
        config: &ParseConfig,
    ) -> Result<Self> {
        let compression = compression
            .or(config.compression.as_deref())
            .map(str::parse::<Compression>)
            .transpose()?;
        let format = format
            .or(config.format.as_deref())
            .map(str::parse::<RdfFormat>)
            .transpose()?
            .unwrap_or_default();
        let iri_encoding = match iri_encoding {
            Some(name) => name.parse::<IriEncoding>().map_err(anyhow::Error::msg)?,
            None => config.decode.iri_encoding,
        };
        Ok(Self {
            compression,
            format,
            decode: DecodeOptions {
                strict_edges: strict_edges || config.decode.strict_edges,
                preserve_blank_nodes: preserve_blank_nodes || config.decode.preserve_blank_nodes,
                iri_encoding,
            },
        })
    }
}

/// Parse one YARS-PG document into an RDF file.
pub fn wholefile(input: &Path, output: &Path, settings: &ParseSettings) -> Result<()> {
    let document = read_input(input, settings.compression)?;
    write_rdf(&document, output, settings)
}

/// Parse separately stored nodes and edges files into one RDF file.
pub fn sections(
    input_nodes: &Path,
    input_edges: &Path,
    output: &Path,
    settings: &ParseSettings,
) -> Result<()> {
    let nodes = read_input(input_nodes, settings.compression)?;
    let edges = read_input(input_edges, settings.compression)?;
    let document = yarspg_codec::combine(&nodes, &edges);
    write_rdf(&document, output, settings)
}

/// Read a file, decompressing it in memory when a method is given.
fn read_input(path: &Path, compression: Option<Compression>) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let bytes = match compression {
        Some(method) => yarspg_io::decompress(&bytes, method)
            .with_context(|| format!("decompressing {}", path.display()))?,
        None => bytes,
    };
    String::from_utf8(bytes).with_context(|| format!("{} is not valid UTF-8", path.display()))
}

fn write_rdf(document: &str, output: &Path, settings: &ParseSettings) -> Result<()> {
    let graph = yarspg_codec::parse_with(document, &settings.decode)?;
    let text = yarspg_io::write_graph(&graph, settings.format)?;
    fs::write(output, text).with_context(|| format!("writing {}", output.display()))?;
    println!("Parsed file created: {}", output.display());
    Ok(())
}
