//! # imghash CLI
//!
//! Command-line interface for the perceptual fingerprint library.
//!
//! ## Usage
//! ```bash
//! imghash hash photo.png --output json
//! imghash compare 8f0e1c3c3c1e0f8f 8f0e1c3c3c1e0f0f
//! ```

mod cli;

use perceptual_fingerprint::Result;
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    perceptual_fingerprint::init_tracing();
    cli::run()
}
