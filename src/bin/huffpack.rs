//! huffpack Command Line Interface
//!
//! Usage:
//!   huffpack compress <input> <output>
//!   huffpack decompress <input> <output>
//!   huffpack info <input>

#![allow(clippy::cast_precision_loss)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use huffpack::{compress, decompress, Artifact, CodeBook, HuffmanTree};

#[derive(Parser, Debug)]
#[command(name = "huffpack")]
#[command(version)]
#[command(about = "Static Huffman file compressor", long_about = None)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    /// Suppress the summary output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compress a file
    Compress {
        /// File to compress
        input: PathBuf,
        /// Artifact to write
        output: PathBuf,
    },
    /// Decompress an artifact
    Decompress {
        /// Artifact to read
        input: PathBuf,
        /// File to write
        output: PathBuf,
    },
    /// Print artifact header details without decoding
    Info {
        /// Artifact to inspect
        input: PathBuf,
    },
}

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Read a file into a byte vector.
fn read_file(path: &Path) -> CliResult<Vec<u8>> {
    fs::read(path).map_err(|e| format!("Cannot read {}: {e}", path.display()).into())
}

/// Write a byte vector to a file, replacing any existing file.
fn write_file(path: &Path, data: &[u8]) -> CliResult<()> {
    fs::write(path, data).map_err(|e| format!("Cannot write {}: {e}", path.display()).into())
}

/// Ratio of `num` to `den`, guarding the empty case.
fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

fn do_compress(input: &Path, output: &Path, quiet: bool) -> CliResult<()> {
    let data = read_file(input)?;
    debug!(path = %input.display(), bytes = data.len(), "read input");

    let artifact = compress(&data);
    write_file(output, &artifact)?;

    if !quiet {
        println!("Input:   {} ({} bytes)", input.display(), data.len());
        println!("Output:  {} ({} bytes)", output.display(), artifact.len());
        println!("Ratio:   {:.2}x", ratio(data.len(), artifact.len()));
    }
    Ok(())
}

fn do_decompress(input: &Path, output: &Path, quiet: bool) -> CliResult<()> {
    let artifact = read_file(input)?;
    debug!(path = %input.display(), bytes = artifact.len(), "read artifact");

    let data = decompress(&artifact).map_err(|e| format!("Decompression failed: {e}"))?;
    write_file(output, &data)?;

    if !quiet {
        println!("Input:   {} ({} bytes)", input.display(), artifact.len());
        println!("Output:  {} ({} bytes)", output.display(), data.len());
    }
    Ok(())
}

fn do_info(input: &Path) -> CliResult<()> {
    let bytes = read_file(input)?;
    let artifact = Artifact::parse(&bytes).map_err(|e| format!("Invalid artifact: {e}"))?;
    let frequencies = &artifact.header.frequencies;

    let tree = HuffmanTree::build(frequencies);
    let book = CodeBook::from_tree(&tree);
    let payload_bits = book.encoded_bit_len(frequencies).unwrap_or(0);

    println!("File:            {} ({} bytes)", input.display(), bytes.len());
    println!("Original length: {} bytes", artifact.header.original_len);
    println!("Symbols:         {}", frequencies.distinct_symbols());
    println!("Max code length: {} bits", tree.depth().max(usize::from(!tree.is_empty())));
    println!("Header:          {} bytes", artifact.header.encoded_len());
    println!("Payload:         {} bytes ({payload_bits} bits)", artifact.payload.len());
    println!("Ratio:           {:.2}x", ratio(artifact.original_len(), bytes.len()));
    Ok(())
}

fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("Warning: logging already initialized");
    }
}

fn main() {
    let args = Args::parse();
    init_logging(&args.log_level);

    let result = match &args.command {
        Command::Compress { input, output } => do_compress(input, output, args.quiet),
        Command::Decompress { input, output } => do_decompress(input, output, args.quiet),
        Command::Info { input } => do_info(input),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
