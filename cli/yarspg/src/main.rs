//! yarspg CLI: convert between RDF and YARS-PG, with optional compression.

mod commands;
mod config;

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::parse::ParseSettings;
use commands::serialize::SerializeSettings;
use config::YarspgConfig;

#[derive(Parser)]
#[command(
    name = "yarspg",
    version,
    about = "Serialize RDF to YARS-PG and parse YARS-PG back to RDF"
)]
struct Cli {
    /// Log debug detail to stderr
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,
    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serialize RDF to YARS-PG
    Serialize {
        #[command(subcommand)]
        mode: SerializeMode,
    },
    /// Parse YARS-PG to RDF
    Parse {
        #[command(subcommand)]
        mode: ParseMode,
    },
}

#[derive(Subcommand)]
enum SerializeMode {
    /// Serialize an entire RDF file to one YARS-PG file
    Wholefile {
        /// Input RDF file
        input: PathBuf,
        /// Output YARS-PG file
        output: PathBuf,
        #[command(flatten)]
        opts: SerializeArgs,
    },
    /// Serialize an RDF file to separate nodes and edges files
    Sections {
        /// Input RDF file
        input: PathBuf,
        /// Output file for node records
        #[arg(long)]
        output_nodes: PathBuf,
        /// Output file for edge records
        #[arg(long)]
        output_edges: PathBuf,
        #[command(flatten)]
        opts: SerializeArgs,
    },
}

#[derive(Subcommand)]
enum ParseMode {
    /// Parse one YARS-PG file to RDF
    Wholefile {
        /// Input YARS-PG file
        input: PathBuf,
        /// Output RDF file
        output: PathBuf,
        #[command(flatten)]
        opts: ParseArgs,
    },
    /// Parse separate nodes and edges files to RDF
    Sections {
        /// Input file with node records
        #[arg(long)]
        input_nodes: PathBuf,
        /// Input file with edge records
        #[arg(long)]
        input_edges: PathBuf,
        /// Output RDF file
        output: PathBuf,
        #[command(flatten)]
        opts: ParseArgs,
    },
}

#[derive(Args)]
struct SerializeArgs {
    /// Also write a compressed copy (gzip, brotli, zstd, snappy)
    #[arg(long)]
    compression: Option<String>,
    /// Compression level (gzip, brotli, zstd)
    #[arg(short, long)]
    level: Option<u32>,
    /// Input RDF format (nt, turtle)
    #[arg(long)]
    input_format: Option<String>,
}

#[derive(Args)]
struct ParseArgs {
    /// Decompress the input first (gzip, brotli, zstd, snappy)
    #[arg(long)]
    compression: Option<String>,
    /// Output RDF format (nt, turtle); N-Triples by default
    #[arg(long)]
    format: Option<String>,
    /// Fail on edges that cannot be turned into triples
    #[arg(long)]
    strict_edges: bool,
    /// Decode BNode records as blank nodes
    #[arg(long)]
    preserve_blank_nodes: bool,
    /// IRI handling on decode (percent, verbatim)
    #[arg(long)]
    iri_encoding: Option<String>,
}

impl SerializeArgs {
    fn settings(&self, config: &YarspgConfig) -> anyhow::Result<SerializeSettings> {
        SerializeSettings::resolve(
            self.compression.as_deref(),
            self.level,
            self.input_format.as_deref(),
            &config.serialize,
        )
    }
}

impl ParseArgs {
    fn settings(&self, config: &YarspgConfig) -> anyhow::Result<ParseSettings> {
        ParseSettings::resolve(
            self.compression.as_deref(),
            self.format.as_deref(),
            self.strict_edges,
            self.preserve_blank_nodes,
            self.iri_encoding.as_deref(),
            &config.parse,
        )
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

/// `RUST_LOG` wins when set; otherwise `-v`/`-q` pick the level.
fn init_tracing(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let config = YarspgConfig::discover(&cwd)?;

    match cli.command {
        Commands::Serialize { mode } => match mode {
            SerializeMode::Wholefile {
                input,
                output,
                opts,
            } => {
                let settings = opts.settings(&config)?;
                commands::serialize::wholefile(&input, &output, &settings).map(drop)
            }
            SerializeMode::Sections {
                input,
                output_nodes,
                output_edges,
                opts,
            } => {
                let settings = opts.settings(&config)?;
                commands::serialize::sections(&input, &output_nodes, &output_edges, &settings)
                    .map(drop)
            }
        },

        Commands::Parse { mode } => match mode {
            ParseMode::Wholefile {
                input,
                output,
                opts,
            } => {
                let settings = opts.settings(&config)?;
                commands::parse::wholefile(&input, &output, &settings)
            }
            ParseMode::Sections {
                input_nodes,
                input_edges,
                output,
                opts,
            } => {
                let settings = opts.settings(&config)?;
                commands::parse::sections(&input_nodes, &input_edges, &output, &settings)
            }
        },
    }
}
