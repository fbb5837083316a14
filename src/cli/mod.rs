//! # CLI Module
//!
//! Command-line interface for the fingerprint library.
//!
//! ## Usage
//! ```bash
//! # Hash one or more images
//! imghash hash photo.png scan.jpg
//!
//! # JSON output, four worker threads
//! imghash hash ~/evidence/*.png --output json --jobs 4
//!
//! # Compare two hashes
//! imghash compare 8f0e1c3c3c1e0f8f 8f0e1c3c3c1e0f0f
//!
//! # Check that image decoding works on this machine
//! imghash check
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use console::{style, Term};
use perceptual_fingerprint::core::calculator::{CalculatorConfig, HashCalculator, HashInput};
use perceptual_fingerprint::core::hasher::{
    HashAlgorithmKind, ImageHashSet, ImageHashValue, PerceptualHash,
};
use perceptual_fingerprint::core::pool::{HashWorkerPool, PoolConfig};
use perceptual_fingerprint::core::result::ProcessResult;
use perceptual_fingerprint::core::tool::Tool;
use perceptual_fingerprint::error::{FingerprintError, Result};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

/// imghash - perceptual fingerprints for near-duplicate and tamper detection
#[derive(Parser, Debug)]
#[command(name = "imghash")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute aHash, pHash, dHash and wHash for images
    Hash {
        /// Image files to hash
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,

        /// Worker threads (defaults to one per core)
        #[arg(short, long)]
        jobs: Option<usize>,

        /// Compute the four hashes of each image one after another
        #[arg(long)]
        sequential: bool,

        /// Show processing time per image
        #[arg(short, long)]
        verbose: bool,
    },

    /// Hamming distance between two 16-digit hex hashes
    Compare {
        hash_a: String,
        hash_b: String,

        /// Algorithm the hashes came from (for display only)
        #[arg(short, long, default_value = "perceptual")]
        algorithm: Algorithm,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,
    },

    /// Check that image decoding is available
    Check,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Algorithm {
    /// Average Hash
    Average,
    /// Difference Hash
    Difference,
    /// Perceptual Hash (default)
    Perceptual,
    /// Wavelet Hash
    Wavelet,
}

impl From<Algorithm> for HashAlgorithmKind {
    fn from(algo: Algorithm) -> Self {
        match algo {
            Algorithm::Average => HashAlgorithmKind::Average,
            Algorithm::Difference => HashAlgorithmKind::Difference,
            Algorithm::Perceptual => HashAlgorithmKind::Perceptual,
            Algorithm::Wavelet => HashAlgorithmKind::Wavelet,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON output for scripting
    Json,
    /// Minimal output (hashes and path, one line per image)
    Minimal,
}

/// Run the CLI
pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Hash {
            paths,
            output,
            jobs,
            sequential,
            verbose,
        } => run_hash(paths, output, jobs, sequential, verbose),
        Commands::Compare {
            hash_a,
            hash_b,
            algorithm,
            output,
        } => run_compare(&hash_a, &hash_b, algorithm.into(), output),
        Commands::Check => run_check(),
    }
}

fn run_hash(
    paths: Vec<PathBuf>,
    output: OutputFormat,
    jobs: Option<usize>,
    sequential: bool,
    verbose: bool,
) -> Result<ExitCode> {
    if jobs == Some(0) {
        return Err(FingerprintError::Config("--jobs must be at least 1".to_string()));
    }

    let config = CalculatorConfig::new().parallel(!sequential);
    let calculator = Arc::new(HashCalculator::with_config(config));

    let mut pool_config = PoolConfig::new();
    if let Some(jobs) = jobs {
        pool_config = pool_config.workers(jobs);
    }
    let pool = HashWorkerPool::new(calculator, pool_config)?;

    let inputs: Vec<HashInput> = paths.iter().cloned().map(HashInput::from).collect();
    let results = pool.process_all(inputs);
    pool.shutdown();

    match output {
        OutputFormat::Pretty => print_pretty_hashes(&Term::stdout(), &paths, &results, verbose),
        OutputFormat::Json => print_json_hashes(&paths, &results)?,
        OutputFormat::Minimal => print_minimal_hashes(&paths, &results),
    }

    let failures = results.iter().filter(|r| !r.is_success()).count();
    Ok(if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_pretty_hashes(
    term: &Term,
    paths: &[PathBuf],
    results: &[ProcessResult<ImageHashSet>],
    verbose: bool,
) {
    for (path, result) in paths.iter().zip(results) {
        match (result.data(), result.error()) {
            (Some(hashes), _) => {
                term.write_line(&format!("{} {}", style("✓").green().bold(), path.display()))
                    .ok();
                for kind in HashAlgorithmKind::ALL {
                    term.write_line(&format!(
                        "    {} {}",
                        style(format!("{}:", kind)).dim(),
                        style(hashes.get(kind)).cyan()
                    ))
                    .ok();
                }
            }
            (None, Some(error)) => {
                term.write_line(&format!(
                    "{} {} {}",
                    style("✗").red().bold(),
                    path.display(),
                    style(error).red()
                ))
                .ok();
            }
            (None, None) => {}
        }

        if verbose {
            if let Some(metadata) = result.metadata() {
                term.write_line(&format!(
                    "    {}",
                    style(format!("{} ms", metadata.processing_time_ms)).dim()
                ))
                .ok();
            }
        }
    }
}

fn print_json_hashes(paths: &[PathBuf], results: &[ProcessResult<ImageHashSet>]) -> Result<()> {
    let output: Vec<serde_json::Value> = paths
        .iter()
        .zip(results)
        .map(|(path, result)| {
            serde_json::json!({
                "path": path,
                "result": result,
            })
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_minimal_hashes(paths: &[PathBuf], results: &[ProcessResult<ImageHashSet>]) {
    for (path, result) in paths.iter().zip(results) {
        if let Some(hashes) = result.data() {
            println!(
                "{} {} {} {}  {}",
                hashes.a_hash,
                hashes.p_hash,
                hashes.d_hash,
                hashes.w_hash,
                path.display()
            );
        }
    }
}

fn run_compare(
    hash_a: &str,
    hash_b: &str,
    algorithm: HashAlgorithmKind,
    output: OutputFormat,
) -> Result<ExitCode> {
    let a = ImageHashValue::from_hex(hash_a, algorithm)?;
    let b = ImageHashValue::from_hex(hash_b, algorithm)?;

    let distance = a.distance(&b);
    let similarity = a.similarity(&b);

    match output {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "algorithm": algorithm.to_string(),
                "distance": distance,
                "similarity": similarity,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Minimal => println!("{}", distance),
        OutputFormat::Pretty => {
            let term = Term::stdout();
            term.write_line(&format!(
                "{} distance {} ({} of {} bits match)",
                style(algorithm).bold(),
                style(distance).cyan(),
                style(similarity).green(),
                a.bit_count()
            ))
            .ok();
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn run_check() -> Result<ExitCode> {
    let calculator = HashCalculator::new();
    let term = Term::stdout();

    let available = calculator.is_available();
    let status = if available {
        style("available").green().bold()
    } else {
        style("unavailable").red().bold()
    };

    term.write_line(&format!(
        "{} {} - image decoding {}",
        style(Tool::name(&calculator)).bold(),
        style(Tool::version(&calculator)).dim(),
        status
    ))
    .ok();

    Ok(if available {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
