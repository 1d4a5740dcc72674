//! Whole-buffer compression filters.

use std::fmt;
use std::io::{Read, Write};
use std::str::FromStr;

use tracing::{debug, warn};

use crate::error::{IoError, Result};

/// Supported compression methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    Gzip,
    Brotli,
    Zstd,
    /// Raw (unframed) snappy.
    Snappy,
}

impl Compression {
    pub const ALL: [Compression; 4] = [
        Compression::Gzip,
        Compression::Brotli,
        Compression::Zstd,
        Compression::Snappy,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Compression::Gzip => "gzip",
            Compression::Brotli => "brotli",
            Compression::Zstd => "zstd",
            Compression::Snappy => "snappy",
        }
    }

    /// File extension appended to a compressed copy.
    pub fn extension(self) -> &'static str {
        self.name()
    }

    fn default_level(self) -> u32 {
        match self {
            Compression::Gzip => 6,
            Compression::Brotli => 11,
            Compression::Zstd => 3,
            Compression::Snappy => 0,
        }
    }

    fn error(self, err: impl fmt::Display) -> IoError {
        IoError::Compression {
            method: self.name().to_string(),
            detail: err.to_string(),
        }
    }
}

impl FromStr for Compression {
    type Err = IoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "gzip" => Ok(Compression::Gzip),
            "brotli" => Ok(Compression::Brotli),
            "zstd" => Ok(Compression::Zstd),
            "snappy" => Ok(Compression::Snappy),
            _ => Err(IoError::UnsupportedCompression(s.to_string())),
        }
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Compress `data`. `level` falls back to the method's default; gzip levels
/// are clamped to 0–9 and brotli levels to 0–11.
pub fn compress(data: &[u8], method: Compression, level: Option<u32>) -> Result<Vec<u8>> {
    let level = level.unwrap_or_else(|| method.default_level());
    debug!(%method, level, bytes = data.len(), "compressing");

    let out = match method {
        Compression::Gzip => {
            let mut encoder =
                flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::new(level.min(9)));
            encoder.write_all(data).map_err(|e| method.error(e))?;
            encoder.finish().map_err(|e| method.error(e))?
        }
        Compression::Brotli => {
            let mut out = Vec::new();
            {
                let mut writer = brotli::CompressorWriter::new(&mut out, 4096, level.min(11), 22);
                writer.write_all(data).map_err(|e| method.error(e))?;
                writer.flush().map_err(|e| method.error(e))?;
            }
            out
        }
        Compression::Zstd => {
            let level = i32::try_from(level).unwrap_or(i32::MAX);
            zstd::encode_all(data, level).map_err(|e| method.error(e))?
        }
        Compression::Snappy => {
            if level != method.default_level() {
                warn!(level, "snappy has no compression levels; ignoring");
            }
            snap::raw::Encoder::new()
                .compress_vec(data)
                .map_err(|e| method.error(e))?
        }
    };
    Ok(out)
}

/// Decompress a buffer produced by [`compress`] with the same method.
pub fn decompress(data: &[u8], method: Compression) -> Result<Vec<u8>> {
    debug!(%method, bytes = data.len(), "decompressing");
    let out = match method {
        Compression::Gzip => {
            let mut out = Vec::new();
            flate2::read::GzDecoder::new(data)
                .read_to_end(&mut out)
                .map_err(|e| method.error(e))?;
            out
        }
        Compression::Brotli => {
            let mut out = Vec::new();
            brotli::Decompressor::new(data, 4096)
                .read_to_end(&mut out)
                .map_err(|e| method.error(e))?;
            out
        }
        Compression::Zstd => zstd::decode_all(data).map_err(|e| method.error(e))?,
        Compression::Snappy => snap::raw::Decoder::new()
            .decompress_vec(data)
            .map_err(|e| method.error(e))?,
    };
    Ok(out)
}
