//! OxiFpz CLI - The Oxidized Field Packer
//!
//! Losslessly compresses raw little-endian float32/float64 array files.

use clap::{Parser, Subcommand, ValueEnum};
use oxifpz_codec::{compress, decompress_f32, decompress_f64, read_header, SampleKind};
use oxifpz_core::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "oxifpz")]
#[command(
    author,
    version,
    about = "The Oxidized Field Packer - lossless floating-point array compression"
)]
#[command(long_about = "
OxiFpz compresses raw binary files of little-endian IEEE 754 values.
Samples are indexed x + nx*(y + ny*(z + nz*f)); dimensions that are not
given default to 1, and nx defaults to the full element count.

Examples:
  oxifpz compress field.raw field.fpz --kind f32 --nx 65 --ny 64 --nz 63
  oxifpz compress series.raw series.fpz --kind f64
  oxifpz decompress field.fpz field.raw
  oxifpz info field.fpz
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Sample width of a raw input file.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    /// IEEE 754 single precision.
    F32,
    /// IEEE 754 double precision.
    F64,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a raw array file
    #[command(alias = "c")]
    Compress {
        /// Raw input file of little-endian samples
        input: PathBuf,

        /// Compressed output file
        output: PathBuf,

        /// Sample type of the input
        #[arg(short, long, value_enum)]
        kind: KindArg,

        /// Extent along x (defaults to the element count)
        #[arg(long)]
        nx: Option<u32>,

        /// Extent along y
        #[arg(long, default_value_t = 1)]
        ny: u32,

        /// Extent along z
        #[arg(long, default_value_t = 1)]
        nz: u32,

        /// Number of fields
        #[arg(long, default_value_t = 1)]
        nf: u32,
    },

    /// Decompress to a raw array file
    #[command(alias = "d")]
    Decompress {
        /// Compressed input file
        input: PathBuf,

        /// Raw output file
        output: PathBuf,
    },

    /// Show the header of a compressed file
    Info {
        /// Compressed input file
        input: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compress {
            input,
            output,
            kind,
            nx,
            ny,
            nz,
            nf,
        } => cmd_compress(&input, &output, kind, nx, ny, nz, nf),
        Commands::Decompress { input, output } => cmd_decompress(&input, &output),
        Commands::Info { input } => cmd_info(&input),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_compress(
    input: &Path,
    output: &Path,
    kind: KindArg,
    nx: Option<u32>,
    ny: u32,
    nz: u32,
    nf: u32,
) -> Result<()> {
    let raw = fs::read(input)?;
    let compressed = match kind {
        KindArg::F32 => {
            let samples = samples_from_le::<4, f32>(&raw, f32::from_le_bytes)?;
            let nx = nx.unwrap_or(samples.len() as u32);
            compress(&samples, nx, ny, nz, nf)?
        }
        KindArg::F64 => {
            let samples = samples_from_le::<8, f64>(&raw, f64::from_le_bytes)?;
            let nx = nx.unwrap_or(samples.len() as u32);
            compress(&samples, nx, ny, nz, nf)?
        }
    };
    fs::write(output, &compressed)?;
    println!(
        "{} -> {}: {} -> {} bytes ({:.2}x)",
        input.display(),
        output.display(),
        raw.len(),
        compressed.len(),
        raw.len() as f64 / compressed.len() as f64
    );
    Ok(())
}

fn cmd_decompress(input: &Path, output: &Path) -> Result<()> {
    let compressed = fs::read(input)?;
    let header = read_header(&compressed)?;
    let raw = match header.kind {
        SampleKind::Float => samples_to_le::<4, f32>(&decompress_f32(&compressed)?, |v| {
            v.to_le_bytes()
        }),
        SampleKind::Double => samples_to_le::<8, f64>(&decompress_f64(&compressed)?, |v| {
            v.to_le_bytes()
        }),
    };
    fs::write(output, &raw)?;
    println!(
        "{} -> {}: {} samples of {}",
        input.display(),
        output.display(),
        header.element_count()?,
        header.kind.name()
    );
    Ok(())
}

fn cmd_info(input: &Path) -> Result<()> {
    let compressed = fs::read(input)?;
    let header = read_header(&compressed)?;
    let count = header.element_count()?;
    let raw_size = count * (header.kind.bit_width() as usize / 8);
    println!("File:        {}", input.display());
    println!("Type:        {}", header.kind.name());
    println!(
        "Dimensions:  {} x {} x {}, {} field(s)",
        header.nx, header.ny, header.nz, header.nf
    );
    println!("Samples:     {}", count);
    println!("Raw size:    {} bytes", raw_size);
    println!("Packed size: {} bytes", compressed.len());
    println!(
        "Ratio:       {:.2}x",
        raw_size as f64 / compressed.len() as f64
    );
    Ok(())
}

/// Reinterpret a raw little-endian byte file as samples.
fn samples_from_le<const N: usize, T>(raw: &[u8], from: fn([u8; N]) -> T) -> Result<Vec<T>> {
    if raw.len() % N != 0 {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("raw file length {} is not a multiple of the sample size {N}", raw.len()),
        )
        .into());
    }
    Ok(raw
        .chunks_exact(N)
        .map(|chunk| {
            let mut bytes = [0u8; N];
            bytes.copy_from_slice(chunk);
            from(bytes)
        })
        .collect())
}

/// Serialize samples back to raw little-endian bytes.
fn samples_to_le<const N: usize, T: Copy>(samples: &[T], to: fn(T) -> [u8; N]) -> Vec<u8> {
    let mut raw = Vec::with_capacity(samples.len() * N);
    for &sample in samples {
        raw.extend_from_slice(&to(sample));
    }
    raw
}
