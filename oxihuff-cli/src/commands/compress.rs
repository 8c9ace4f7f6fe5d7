//! Compress command implementation.

use super::{InputMode, Source};
use crate::utils::{BarProgress, format_savings, is_stdout, write_output};
use oxihuff::{compress_file, compress_with_progress};
use std::path::Path;

pub fn cmd_compress(
    input: &str,
    mode: InputMode,
    output: Option<&Path>,
    verbose: bool,
    progress: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = mode.resolve(input)?;
    if verbose {
        eprintln!("Compressing {}", source.describe());
    }

    match source {
        Source::File(path) if !(output.is_some() && is_stdout(output)) => {
            let written = compress_file(&path, output, BarProgress::new(progress))?;
            let original = std::fs::metadata(&path)?.len();
            let compressed = std::fs::metadata(&written)?.len();
            println!(
                "{} -> {} ({} -> {} bytes, saved {})",
                path.display(),
                written.display(),
                original,
                compressed,
                format_savings(original, compressed)
            );
        }
        source => {
            let data = source.read()?;
            let compressed = compress_with_progress(&data, BarProgress::new(progress))?;
            write_output(output, &compressed)?;
            if verbose {
                eprintln!(
                    "  {} -> {} bytes (saved {})",
                    data.len(),
                    compressed.len(),
                    format_savings(data.len() as u64, compressed.len() as u64)
                );
            }
        }
    }

    Ok(())
}
