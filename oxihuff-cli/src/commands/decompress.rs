//! Decompress command implementation.

use crate::utils::{BarProgress, is_stdout, write_output};
use oxihuff::{decompress_file, decompress_with_progress};
use std::path::Path;

pub fn cmd_decompress(
    input: &Path,
    output: Option<&Path>,
    verbose: bool,
    progress: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if verbose {
        eprintln!("Decompressing {}", input.display());
    }

    if output.is_some() && is_stdout(output) {
        let data = std::fs::read(input)?;
        let decompressed = decompress_with_progress(&data, BarProgress::new(progress))?;
        write_output(None, &decompressed)?;
        if verbose {
            eprintln!("  {} -> {} bytes", data.len(), decompressed.len());
        }
        return Ok(());
    }

    let written = decompress_file(input, output, BarProgress::new(progress))?;
    println!("{} -> {}", input.display(), written.display());
    if verbose {
        eprintln!("  {} bytes written", std::fs::metadata(&written)?.len());
    }
    Ok(())
}
